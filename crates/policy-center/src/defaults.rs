use screenplay_core_types::Severity;

use crate::model::{LoggingPolicy, PolicySnapshot, RetryPolicy, TimeoutPolicy};

/// Standard wait timeout used when an actor has no timeout ability.
pub const DEFAULT_STANDARD_TIMEOUT_SECONDS: u64 = 30;

/// Attempt cap for the transient-error retry wrapper.
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 10;

pub fn default_snapshot() -> PolicySnapshot {
    PolicySnapshot {
        rev: 1,
        timeouts: TimeoutPolicy {
            standard_seconds: DEFAULT_STANDARD_TIMEOUT_SECONDS,
            extra_seconds: 0,
        },
        retry: RetryPolicy {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            backoff_ms: 0,
        },
        logging: LoggingPolicy {
            lowest_severity: Severity::Info,
        },
        provenance: Default::default(),
    }
}
