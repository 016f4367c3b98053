//! Interaction wrapper that retries its inner task or question

use std::fmt;

use screenplay_actor::{Actor, Question, Task};
use screenplay_core_types::Result;

use crate::retry::RetryOn;

/// Wraps an interaction so the actor retries it on `E`.
///
/// Renders exactly like the wrapped interaction, so log lines are unchanged.
pub struct Retrying<I, E> {
    inner: I,
    retry: RetryOn<E>,
}

impl<E> RetryOn<E>
where
    E: fmt::Display + fmt::Debug + Send + Sync + 'static,
{
    pub fn wrap<I>(&self, inner: I) -> Retrying<I, E> {
        Retrying {
            inner,
            retry: self.clone(),
        }
    }
}

impl<I, E> Retrying<I, E> {
    pub fn inner(&self) -> &I {
        &self.inner
    }
}

impl<I: fmt::Display, E> fmt::Display for Retrying<I, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl<I, E> Task for Retrying<I, E>
where
    I: Task,
    E: fmt::Display + fmt::Debug + Send + Sync + 'static,
{
    fn perform_as(&self, actor: &Actor) -> Result<()> {
        let description = self.inner.to_string();
        self.retry
            .run(actor, &description, || self.inner.perform_as(actor))
    }
}

impl<I, E> Question for Retrying<I, E>
where
    I: Question,
    E: fmt::Display + fmt::Debug + Send + Sync + 'static,
{
    type Answer = I::Answer;

    fn request_as(&self, actor: &Actor) -> Result<I::Answer> {
        let description = self.inner.to_string();
        self.retry
            .run(actor, &description, || self.inner.request_as(actor))
    }
}
