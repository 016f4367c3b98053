//! Blocking wait descriptor and polling loop

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use screenplay_actor::{Actor, Question, SeverityGuard, Task};
use screenplay_conditions::Condition;
use screenplay_core_types::{Result, ScreenplayError, Severity};
use tracing::debug;

use crate::timeouts::effective_timeout;

/// Waits until `condition` holds for the answer to `question`.
///
/// As a [`Task`] the satisfying answer is discarded; as a [`Question`] it is
/// returned.
pub struct Wait<Q, C> {
    pub(crate) question: Q,
    pub(crate) condition: C,
    pub(crate) timeout_seconds: Option<u64>,
    pub(crate) additional_seconds: u64,
    pub(crate) suppress_logs: bool,
    pub(crate) poll_interval: Duration,
}

impl<Q, C> Wait<Q, C> {
    pub fn until(question: Q, condition: C) -> Self {
        Self {
            question,
            condition,
            timeout_seconds: None,
            additional_seconds: 0,
            suppress_logs: false,
            poll_interval: Duration::ZERO,
        }
    }

    /// Replaces the standard timeout for this wait only.
    pub fn for_up_to(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Adds seconds on top of the computed timeout.
    pub fn for_an_additional(mut self, seconds: u64) -> Self {
        self.additional_seconds = seconds;
        self
    }

    /// Keeps polls below `Warning` out of the actor's log.
    pub fn suppressing_logs(mut self) -> Self {
        self.suppress_logs = true;
        self
    }

    /// Sleeps between polls. Polling is back-to-back unless this is set.
    pub fn polling_every(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn timeout_override(&self) -> Option<u64> {
        self.timeout_seconds
    }

    pub fn additional_seconds(&self) -> u64 {
        self.additional_seconds
    }

    pub fn suppresses_logs(&self) -> bool {
        self.suppress_logs
    }

    pub fn effective_timeout(&self, actor: &Actor) -> u64 {
        effective_timeout(actor, self.timeout_seconds, self.additional_seconds)
    }
}

impl<Q: fmt::Display, C: fmt::Display> Wait<Q, C> {
    pub(crate) fn describe(&self, timeout_seconds: u64) -> String {
        format!("{} for up to {}s", self, timeout_seconds)
    }
}

impl<Q: fmt::Display, C: fmt::Display> fmt::Display for Wait<Q, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.question, self.condition)
    }
}

/// Polls until the wait's condition holds and returns the satisfying answer.
///
/// The question is always asked at least once. Elapsed time is checked only
/// between polls, so one slow answer can overrun the timeout.
pub fn wait_for_answer<Q, C>(actor: &Actor, wait: &Wait<Q, C>) -> Result<Q::Answer>
where
    Q: Question,
    C: Condition<Q::Answer>,
{
    let timeout_seconds = wait.effective_timeout(actor);
    let limit = Duration::from_secs(timeout_seconds);
    let _severity = wait
        .suppress_logs
        .then(|| SeverityGuard::raise_to(actor.logger(), Severity::Warning));

    debug!(actor = %actor, timeout_seconds, "waiting until {}", wait);
    let started = Instant::now();
    let mut polls: u64 = 0;
    loop {
        let answer = actor.asks_for(&wait.question)?;
        polls += 1;
        if wait.condition.evaluate(&answer)? {
            debug!(actor = %actor, polls, "wait satisfied");
            return Ok(answer);
        }
        if started.elapsed() >= limit {
            debug!(actor = %actor, polls, "wait timed out");
            return Err(ScreenplayError::WaitingFailed {
                description: wait.describe(timeout_seconds),
                last_answer: format!("{:?}", answer),
            });
        }
        if !wait.poll_interval.is_zero() {
            thread::sleep(wait.poll_interval);
        }
    }
}

impl<Q, C> Task for Wait<Q, C>
where
    Q: Question,
    C: Condition<Q::Answer>,
{
    fn perform_as(&self, actor: &Actor) -> Result<()> {
        wait_for_answer(actor, self).map(|_| ())
    }
}

impl<Q, C> Question for Wait<Q, C>
where
    Q: Question,
    C: Condition<Q::Answer>,
{
    type Answer = Q::Answer;

    fn request_as(&self, actor: &Actor) -> Result<Q::Answer> {
        wait_for_answer(actor, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeouts::SetTimeouts;
    use screenplay_actor::{question_fn, task_fn, Logger, MemoryLogger};
    use screenplay_conditions::{is_equal_to, is_greater_than};
    use std::cell::Cell;
    use std::sync::Arc;

    #[derive(Debug, thiserror::Error)]
    #[error("page crashed")]
    struct PageCrashed;

    fn logged_actor(lowest: Severity) -> (Actor, Arc<MemoryLogger>) {
        let logger = Arc::new(MemoryLogger::new(lowest));
        (Actor::with_logger("Wanda", logger.clone()), logger)
    }

    #[test]
    fn returns_answer_once_condition_holds() {
        let actor = Actor::new("Wanda");
        let polls = Cell::new(0);
        let counter = question_fn("the counter", |_| {
            polls.set(polls.get() + 1);
            Ok(polls.get())
        });
        let wait = Wait::until(counter, is_equal_to(3)).for_up_to(5);
        assert_eq!(actor.asks_for(&wait).unwrap(), 3);
        assert_eq!(polls.get(), 3);
    }

    #[test]
    fn zero_timeout_still_polls_once() {
        let actor = Actor::new("Wanda");
        let polls = Cell::new(0);
        let counter = question_fn("the counter", |_| {
            polls.set(polls.get() + 1);
            Ok(polls.get())
        });
        let wait = Wait::until(counter, is_greater_than(10)).for_up_to(0);
        let err = actor.attempts_to(&wait).unwrap_err();
        assert_eq!(polls.get(), 1);
        match err {
            ScreenplayError::WaitingFailed {
                description,
                last_answer,
            } => {
                assert_eq!(
                    description,
                    "the counter is greater than 10 for up to 0s"
                );
                assert_eq!(last_answer, "1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_timeout_succeeds_on_first_poll() {
        let actor = Actor::new("Wanda");
        let title = question_fn("the title", |_| Ok("Home".to_string()));
        let wait = Wait::until(title, is_equal_to("Home")).for_up_to(0);
        actor.attempts_to(&wait).unwrap();
    }

    #[test]
    fn times_out_when_value_arrives_too_late() {
        let actor = Actor::new("Wanda");
        let polls = Cell::new(0u32);
        let counter = question_fn("the counter", |_| {
            polls.set(polls.get() + 1);
            Ok(polls.get())
        });
        let wait = Wait::until(counter, is_equal_to(u32::MAX))
            .for_up_to(1)
            .polling_every(Duration::from_millis(20));
        let started = Instant::now();
        let err = actor.attempts_to(&wait).unwrap_err();
        assert!(err.is_waiting_failure());
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert!(polls.get() > 1);
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn timeout_uses_actor_ability() {
        let actor = Actor::new("Wanda")
            .who_can(SetTimeouts::new(30, 5))
            .unwrap();
        let title = question_fn("the title", |_| Ok("x".to_string()));
        let wait = Wait::until(title, is_equal_to("x")).for_an_additional(2);
        assert_eq!(wait.effective_timeout(&actor), 37);
        let wait = wait.for_up_to(10).for_an_additional(0);
        assert_eq!(wait.effective_timeout(&actor), 15);
        assert_eq!(wait.effective_timeout(&Actor::new("Nobody")), 10);
    }

    #[test]
    fn suppression_hides_polls_and_restores_on_success() {
        let (actor, logger) = logged_actor(Severity::Debug);
        let polls = Cell::new(0);
        let counter = question_fn("the counter", |_| {
            polls.set(polls.get() + 1);
            Ok(polls.get())
        });
        let wait = Wait::until(counter, is_equal_to(4))
            .for_up_to(5)
            .suppressing_logs();
        actor.attempts_to(&wait).unwrap();
        assert_eq!(logger.lowest_severity(), Severity::Debug);
        let messages = logger.messages();
        assert!(messages.iter().all(|line| !line.contains("asks for")));
        assert_eq!(
            messages.first().map(String::as_str),
            Some("Wanda attempts to the counter is equal to 4")
        );
    }

    #[test]
    fn suppression_restores_after_waiting_failure() {
        let (actor, logger) = logged_actor(Severity::Info);
        let title = question_fn("the title", |_| Ok("Away".to_string()));
        let wait = Wait::until(title, is_equal_to("Home"))
            .for_up_to(0)
            .suppressing_logs();
        let err = actor.asks_for(&wait).unwrap_err();
        assert!(err.is_waiting_failure());
        assert!(err.to_string().contains("\"Away\""));
        assert_eq!(logger.lowest_severity(), Severity::Info);
    }

    #[test]
    fn suppression_restores_after_question_error() {
        let (actor, logger) = logged_actor(Severity::Trace);
        let crashing = question_fn("the crashing page", |_| -> Result<u8> {
            Err(ScreenplayError::interaction(PageCrashed))
        });
        let wait = Wait::until(crashing, is_equal_to(1u8)).suppressing_logs();
        let err = actor.asks_for(&wait).unwrap_err();
        assert!(err.is_transient::<PageCrashed>());
        assert_eq!(logger.lowest_severity(), Severity::Trace);
    }

    #[test]
    fn suppression_leaves_stricter_logger_alone() {
        let (actor, logger) = logged_actor(Severity::Error);
        let title = question_fn("the title", |_| Ok("Home".to_string()));
        let wait = Wait::until(title, is_equal_to("Home")).suppressing_logs();
        actor.attempts_to(&wait).unwrap();
        assert_eq!(logger.lowest_severity(), Severity::Error);
    }

    #[test]
    fn wait_then_refresh_then_wait_again() {
        let actor = Actor::new("Wanda");
        let loaded = Cell::new(false);
        let is_loaded = question_fn("the page load state", |_| Ok(loaded.get()));
        let refresh = task_fn("refresh the page", |_| {
            loaded.set(true);
            Ok(())
        });
        let wait = Wait::until(is_loaded, is_equal_to(true)).for_up_to(0);

        let first = actor.attempts_to(&wait);
        assert!(matches!(first, Err(ScreenplayError::WaitingFailed { .. })));
        actor.attempts_to(&refresh).unwrap();
        actor.attempts_to(&wait).unwrap();
    }
}
