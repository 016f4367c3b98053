//! Task and Question interactions
//!
//! A task changes the world and returns nothing; a question observes it and
//! returns an answer. Both are built up front and then handed to an actor,
//! which resolves abilities and logs around the call.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use screenplay_core_types::Result;

use crate::actor::Actor;

/// Side-effecting interaction.
pub trait Task: fmt::Display {
    fn perform_as(&self, actor: &Actor) -> Result<()>;
}

/// Side-effect-free interaction returning an answer.
///
/// Questions must tolerate being asked repeatedly, since the waiting engine
/// polls them.
pub trait Question: fmt::Display {
    type Answer: fmt::Debug;

    fn request_as(&self, actor: &Actor) -> Result<Self::Answer>;
}

/// Async counterpart of [`Task`].
#[async_trait]
pub trait AsyncTask: fmt::Display + Send + Sync {
    async fn perform_as(&self, actor: &Actor) -> Result<()>;
}

/// Async counterpart of [`Question`].
#[async_trait]
pub trait AsyncQuestion: fmt::Display + Send + Sync {
    type Answer: fmt::Debug + Send;

    async fn request_as(&self, actor: &Actor) -> Result<Self::Answer>;
}

/// Task backed by a closure.
pub struct TaskFn<F> {
    description: String,
    body: F,
}

pub fn task_fn<F>(description: impl Into<String>, body: F) -> TaskFn<F>
where
    F: Fn(&Actor) -> Result<()>,
{
    TaskFn {
        description: description.into(),
        body,
    }
}

impl<F> fmt::Display for TaskFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl<F> Task for TaskFn<F>
where
    F: Fn(&Actor) -> Result<()>,
{
    fn perform_as(&self, actor: &Actor) -> Result<()> {
        (self.body)(actor)
    }
}

/// Question backed by a closure.
pub struct QuestionFn<F, T> {
    description: String,
    body: F,
    answer: PhantomData<fn() -> T>,
}

pub fn question_fn<F, T>(description: impl Into<String>, body: F) -> QuestionFn<F, T>
where
    F: Fn(&Actor) -> Result<T>,
    T: fmt::Debug,
{
    QuestionFn {
        description: description.into(),
        body,
        answer: PhantomData,
    }
}

impl<F, T> fmt::Display for QuestionFn<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl<F, T> Question for QuestionFn<F, T>
where
    F: Fn(&Actor) -> Result<T>,
    T: fmt::Debug,
{
    type Answer = T;

    fn request_as(&self, actor: &Actor) -> Result<T> {
        (self.body)(actor)
    }
}
