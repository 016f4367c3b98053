//! Bounded retry loop

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::thread;
use std::time::Duration;

use screenplay_actor::{type_label, Actor, Logger};
use screenplay_core_types::{Result, ScreenplayError};
use screenplay_policy_center::RetryPolicy;
use tracing::debug;

/// Entry point for building a [`RetryOn`].
pub struct Retry;

impl Retry {
    /// Retries operations that fail with an interaction error of type `E`.
    pub fn on<E>() -> RetryOn<E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        RetryOn {
            policy: RetryPolicy::default(),
            _error: PhantomData,
        }
    }
}

/// Retry loop bound to the transient error type `E`.
pub struct RetryOn<E> {
    policy: RetryPolicy,
    _error: PhantomData<fn() -> E>,
}

impl<E> Clone for RetryOn<E> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy,
            _error: PhantomData,
        }
    }
}

impl<E> fmt::Debug for RetryOn<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryOn")
            .field("error", &type_label::<E>())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<E> RetryOn<E>
where
    E: fmt::Display + fmt::Debug + Send + Sync + 'static,
{
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Total attempts, including the first call.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.policy.max_attempts = attempts;
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.policy.backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn attempt_bound(&self) -> u32 {
        self.policy.max_attempts.max(1)
    }

    fn backoff(&self) -> Duration {
        Duration::from_millis(self.policy.backoff_ms)
    }

    /// Runs `op`, retrying it while it fails with `E`.
    pub fn run<T, F>(&self, actor: &Actor, description: &str, op: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        self.run_counted(actor, description, op).map(|(value, _)| value)
    }

    /// Like [`RetryOn::run`], also returning how many retries were needed.
    pub fn run_counted<T, F>(&self, actor: &Actor, description: &str, mut op: F) -> Result<(T, u32)>
    where
        F: FnMut() -> Result<T>,
    {
        let bound = self.attempt_bound();
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok((value, attempt - 1)),
                Err(err) if attempt < bound && err.is_transient::<E>() => {
                    self.note_retry(actor, description, &err, attempt, bound);
                    attempt += 1;
                    if self.policy.backoff_ms > 0 {
                        thread::sleep(self.backoff());
                    }
                }
                Err(err) => {
                    self.note_give_up(description, &err, attempt);
                    return Err(err);
                }
            }
        }
    }

    /// Async form of [`RetryOn::run`]; backoff sleeps on the tokio timer.
    pub async fn run_async<T, F, Fut>(&self, actor: &Actor, description: &str, op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run_counted_async(actor, description, op)
            .await
            .map(|(value, _)| value)
    }

    pub async fn run_counted_async<T, F, Fut>(
        &self,
        actor: &Actor,
        description: &str,
        mut op: F,
    ) -> Result<(T, u32)>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let bound = self.attempt_bound();
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok((value, attempt - 1)),
                Err(err) if attempt < bound && err.is_transient::<E>() => {
                    self.note_retry(actor, description, &err, attempt, bound);
                    attempt += 1;
                    if self.policy.backoff_ms > 0 {
                        tokio::time::sleep(self.backoff()).await;
                    }
                }
                Err(err) => {
                    self.note_give_up(description, &err, attempt);
                    return Err(err);
                }
            }
        }
    }

    fn note_retry(
        &self,
        actor: &Actor,
        description: &str,
        err: &ScreenplayError,
        attempt: u32,
        bound: u32,
    ) {
        actor.logger().debug(&format!(
            "{} retrying {} after {} (attempt {}/{}): {}",
            actor,
            description,
            type_label::<E>(),
            attempt,
            bound,
            err
        ));
        debug!(
            actor = %actor,
            attempt,
            max_attempts = bound,
            backoff_ms = self.policy.backoff_ms,
            "retrying {}",
            description
        );
    }

    fn note_give_up(&self, description: &str, err: &ScreenplayError, attempt: u32) {
        if err.is_transient::<E>() {
            debug!(attempts = attempt, "giving up on {}: {}", description, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenplay_actor::{MemoryLogger, Severity};
    use std::cell::Cell;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[derive(Debug, thiserror::Error)]
    #[error("element went stale")]
    struct Stale;

    #[derive(Debug, thiserror::Error)]
    #[error("no such element")]
    struct Missing;

    fn fail_first<T>(calls: &Cell<u32>, failures: u32, value: T) -> Result<T> {
        calls.set(calls.get() + 1);
        if calls.get() <= failures {
            Err(ScreenplayError::interaction(Stale))
        } else {
            Ok(value)
        }
    }

    #[test]
    fn succeeds_after_two_transient_failures() {
        let actor = Actor::new("Rita");
        let calls = Cell::new(0);
        let (value, retries) = Retry::on::<Stale>()
            .run_counted(&actor, "click the button", || fail_first(&calls, 2, "clicked"))
            .unwrap();
        assert_eq!(value, "clicked");
        assert_eq!(retries, 2);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn other_errors_are_not_retried() {
        let actor = Actor::new("Rita");
        let calls = Cell::new(0);
        let err = Retry::on::<Stale>()
            .run(&actor, "read the label", || -> Result<()> {
                calls.set(calls.get() + 1);
                Err(ScreenplayError::interaction(Missing))
            })
            .unwrap_err();
        assert!(err.is_transient::<Missing>());
        assert_eq!(calls.get(), 1);

        let calls = Cell::new(0);
        let err = Retry::on::<Stale>()
            .run(&actor, "read the label", || -> Result<()> {
                calls.set(calls.get() + 1);
                Err(ScreenplayError::InvalidCondition("bad".into()))
            })
            .unwrap_err();
        assert!(matches!(err, ScreenplayError::InvalidCondition(_)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn exhaustion_returns_last_transient_error() {
        let actor = Actor::new("Rita");
        let calls = Cell::new(0);
        let err = Retry::on::<Stale>()
            .max_attempts(3)
            .run(&actor, "click the button", || fail_first(&calls, u32::MAX, ()))
            .unwrap_err();
        assert!(err.is_transient::<Stale>());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn default_bound_is_ten_attempts() {
        let actor = Actor::new("Rita");
        let calls = Cell::new(0);
        let retry = Retry::on::<Stale>();
        assert_eq!(retry.policy(), &RetryPolicy::default());
        assert!(retry
            .run(&actor, "click", || fail_first(&calls, u32::MAX, ()))
            .is_err());
        assert_eq!(calls.get(), 10);
    }

    #[test]
    fn zero_attempts_still_runs_once() {
        let actor = Actor::new("Rita");
        let calls = Cell::new(0);
        let result = Retry::on::<Stale>()
            .max_attempts(0)
            .run(&actor, "click", || fail_first(&calls, 0, 7));
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn retries_are_logged_at_debug() {
        let logger = Arc::new(MemoryLogger::new(Severity::Debug));
        let actor = Actor::with_logger("Rita", logger.clone());
        let calls = Cell::new(0);
        Retry::on::<Stale>()
            .run(&actor, "click the button", || fail_first(&calls, 1, ()))
            .unwrap();
        let entries = logger.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, Severity::Debug);
        assert!(entries[0].message.starts_with("Rita retrying click the button after Stale"));

        let quiet = Arc::new(MemoryLogger::new(Severity::Info));
        let actor = Actor::with_logger("Rita", quiet.clone());
        let calls = Cell::new(0);
        Retry::on::<Stale>()
            .run(&actor, "click the button", || fail_first(&calls, 1, ()))
            .unwrap();
        assert!(quiet.entries().is_empty());
    }

    #[test]
    fn backoff_is_applied_between_attempts() {
        let actor = Actor::new("Rita");
        let calls = Cell::new(0);
        let started = Instant::now();
        Retry::on::<Stale>()
            .with_backoff(Duration::from_millis(15))
            .run(&actor, "click", || fail_first(&calls, 2, ()))
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn async_run_retries_transient_errors() {
        let actor = Actor::new("Rita");
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let (value, retries) = Retry::on::<Stale>()
            .with_policy(RetryPolicy {
                max_attempts: 5,
                backoff_ms: 1,
            })
            .run_counted_async(&actor, "fetch the order", move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(ScreenplayError::interaction(Stale))
                } else {
                    Ok(42)
                }
            })
            .await
            .unwrap();
        assert_eq!(value, 42);
        assert_eq!(retries, 2);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}
