//! Async polling for waits over async questions

use std::time::{Duration, Instant};

use async_trait::async_trait;
use screenplay_actor::{Actor, AsyncQuestion, AsyncTask, SeverityGuard};
use screenplay_conditions::Condition;
use screenplay_core_types::{Result, ScreenplayError, Severity};
use tokio::time::sleep;
use tracing::debug;

use crate::wait::Wait;

/// Async form of [`crate::wait_for_answer`].
///
/// Between polls the task yields to the runtime (or sleeps for the wait's
/// poll interval) so other tasks on the same executor keep running.
pub async fn wait_for_answer_async<Q, C>(actor: &Actor, wait: &Wait<Q, C>) -> Result<Q::Answer>
where
    Q: AsyncQuestion,
    C: Condition<Q::Answer>,
{
    let timeout_seconds = wait.effective_timeout(actor);
    let limit = Duration::from_secs(timeout_seconds);
    let _severity = wait
        .suppress_logs
        .then(|| SeverityGuard::raise_to(actor.logger(), Severity::Warning));

    debug!(actor = %actor, timeout_seconds, "waiting until {}", wait);
    let started = Instant::now();
    loop {
        let answer = actor.asks_for_async(&wait.question).await?;
        if wait.condition.evaluate(&answer)? {
            return Ok(answer);
        }
        if started.elapsed() >= limit {
            return Err(ScreenplayError::WaitingFailed {
                description: wait.describe(timeout_seconds),
                last_answer: format!("{:?}", answer),
            });
        }
        if wait.poll_interval.is_zero() {
            tokio::task::yield_now().await;
        } else {
            sleep(wait.poll_interval).await;
        }
    }
}

#[async_trait]
impl<Q, C> AsyncTask for Wait<Q, C>
where
    Q: AsyncQuestion,
    C: Condition<Q::Answer>,
{
    async fn perform_as(&self, actor: &Actor) -> Result<()> {
        wait_for_answer_async(actor, self).await.map(|_| ())
    }
}

#[async_trait]
impl<Q, C> AsyncQuestion for Wait<Q, C>
where
    Q: AsyncQuestion,
    C: Condition<Q::Answer>,
{
    type Answer = Q::Answer;

    async fn request_as(&self, actor: &Actor) -> Result<Q::Answer> {
        wait_for_answer_async(actor, self).await
    }
}
