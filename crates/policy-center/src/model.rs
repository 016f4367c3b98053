use std::collections::HashMap;

use screenplay_core_types::Severity;
use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_RETRY_MAX_ATTEMPTS, DEFAULT_STANDARD_TIMEOUT_SECONDS};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PolicySnapshot {
    pub rev: u64,
    pub timeouts: TimeoutPolicy,
    pub retry: RetryPolicy,
    pub logging: LoggingPolicy,
    pub provenance: HashMap<String, PolicyProvenance>,
}

/// Seconds used to compute effective wait timeouts.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeoutPolicy {
    pub standard_seconds: u64,
    pub extra_seconds: u64,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            standard_seconds: DEFAULT_STANDARD_TIMEOUT_SECONDS,
            extra_seconds: 0,
        }
    }
}

/// Bound for retrying transient interaction errors.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first call.
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            backoff_ms: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LoggingPolicy {
    pub lowest_severity: Severity,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyProvenance {
    pub path: String,
    pub source: PolicySource,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PolicySource {
    Builtin,
    File,
    Env,
    RuntimeOverride,
}

impl PolicySnapshot {
    pub fn set_provenance(&mut self, path: &str, source: PolicySource) {
        self.provenance.insert(
            path.to_string(),
            PolicyProvenance {
                path: path.to_string(),
                source,
            },
        );
    }

    pub fn source_of(&self, path: &str) -> Option<PolicySource> {
        self.provenance.get(path).map(|entry| entry.source)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuntimeOverrideSpec {
    pub path: String,
    pub value: serde_json::Value,
    pub owner: String,
    pub reason: String,
    pub ttl_seconds: u64,
}
