//! Timeout ability and effective-timeout composition

use screenplay_actor::{Ability, Actor};
use screenplay_policy_center::TimeoutPolicy;

pub use screenplay_policy_center::defaults::DEFAULT_STANDARD_TIMEOUT_SECONDS;

/// Lets an actor choose how long its waits last.
///
/// Without this ability an actor waits for
/// [`DEFAULT_STANDARD_TIMEOUT_SECONDS`] with no extra time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTimeouts {
    standard_seconds: u64,
    extra_seconds: u64,
}

impl SetTimeouts {
    pub fn new(standard_seconds: u64, extra_seconds: u64) -> Self {
        Self {
            standard_seconds,
            extra_seconds,
        }
    }

    pub fn from_policy(policy: &TimeoutPolicy) -> Self {
        Self::new(policy.standard_seconds, policy.extra_seconds)
    }

    pub fn to_standard(mut self, seconds: u64) -> Self {
        self.standard_seconds = seconds;
        self
    }

    pub fn with_extra(mut self, seconds: u64) -> Self {
        self.extra_seconds = seconds;
        self
    }

    pub fn standard_seconds(&self) -> u64 {
        self.standard_seconds
    }

    pub fn extra_seconds(&self) -> u64 {
        self.extra_seconds
    }

    /// `(override ?? standard) + extra`. The override replaces only the
    /// standard part.
    pub fn calculate_timeout(&self, timeout_override: Option<u64>) -> u64 {
        timeout_override
            .unwrap_or(self.standard_seconds)
            .saturating_add(self.extra_seconds)
    }
}

impl Default for SetTimeouts {
    fn default() -> Self {
        Self::from_policy(&TimeoutPolicy::default())
    }
}

impl Ability for SetTimeouts {}

/// Seconds a wait will poll for on behalf of `actor`.
pub fn effective_timeout(actor: &Actor, timeout_override: Option<u64>, additional: u64) -> u64 {
    let base = match actor.abilities().get::<SetTimeouts>() {
        Some(timeouts) => timeouts.calculate_timeout(timeout_override),
        None => timeout_override.unwrap_or(DEFAULT_STANDARD_TIMEOUT_SECONDS),
    };
    base.saturating_add(additional)
}
