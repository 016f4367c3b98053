use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use screenplay_core_types::Severity;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::PolicyError;
use crate::model::{PolicySnapshot, PolicySource, RuntimeOverrideSpec};
use crate::override_store::OverrideStore;

pub trait PolicyCenter: Send + Sync {
    fn snapshot(&self) -> Arc<PolicySnapshot>;
    fn apply_override(&self, override_spec: RuntimeOverrideSpec) -> Result<(), PolicyError>;
    fn clear_override(&self, path: &str) -> Result<bool, PolicyError>;
    fn guard(&self) -> PolicyGuard;
}

struct PolicyState {
    base: PolicySnapshot,
    overrides: OverrideStore,
    rev_counter: u64,
}

impl PolicyState {
    fn new(base: PolicySnapshot) -> Self {
        let rev_counter = base.rev;
        Self {
            base,
            overrides: OverrideStore::default(),
            rev_counter,
        }
    }

    fn rebuild(&mut self) -> Result<PolicySnapshot, PolicyError> {
        let mut snapshot = self.base.clone();
        for (path, value) in self.overrides.live_entries() {
            apply_override_to_snapshot(&mut snapshot, &path, &value, PolicySource::RuntimeOverride)?;
        }
        self.rev_counter = self.rev_counter.saturating_add(1);
        snapshot.rev = self.rev_counter;
        Ok(snapshot)
    }
}

/// Policy center holding a base snapshot plus runtime overrides.
pub struct InMemoryPolicyCenter {
    state: Mutex<PolicyState>,
    current: ArcSwap<PolicySnapshot>,
}

impl InMemoryPolicyCenter {
    pub fn new(snapshot: PolicySnapshot) -> Self {
        let current = ArcSwap::from_pointee(snapshot.clone());
        Self {
            state: Mutex::new(PolicyState::new(snapshot)),
            current,
        }
    }

    fn publish(&self, state: &mut PolicyState) -> Result<(), PolicyError> {
        let snapshot = state.rebuild()?;
        debug!(rev = snapshot.rev, "policy snapshot rebuilt");
        self.current.store(Arc::new(snapshot));
        Ok(())
    }
}

impl PolicyCenter for InMemoryPolicyCenter {
    fn snapshot(&self) -> Arc<PolicySnapshot> {
        {
            let mut state = self.state.lock();
            if state.overrides.has_expired() {
                if let Err(err) = self.publish(&mut state) {
                    warn!(%err, "policy snapshot rebuild failed");
                }
            }
        }
        self.current.load_full()
    }

    fn apply_override(&self, override_spec: RuntimeOverrideSpec) -> Result<(), PolicyError> {
        let mut probe = self.current.load_full().as_ref().clone();
        apply_override_to_snapshot(
            &mut probe,
            &override_spec.path,
            &override_spec.value,
            PolicySource::RuntimeOverride,
        )?;

        let ttl = if override_spec.ttl_seconds > 0 {
            Some(Duration::from_secs(override_spec.ttl_seconds))
        } else {
            None
        };
        debug!(
            path = %override_spec.path,
            owner = %override_spec.owner,
            reason = %override_spec.reason,
            "applying policy override"
        );
        let mut state = self.state.lock();
        state
            .overrides
            .insert(override_spec.path, override_spec.value, ttl);
        self.publish(&mut state)
    }

    fn clear_override(&self, path: &str) -> Result<bool, PolicyError> {
        let mut state = self.state.lock();
        if !state.overrides.remove(path) {
            return Ok(false);
        }
        self.publish(&mut state)?;
        Ok(true)
    }

    fn guard(&self) -> PolicyGuard {
        PolicyGuard {
            snapshot: self.snapshot(),
        }
    }
}

/// Sticky view of one policy revision.
#[derive(Clone, Debug)]
pub struct PolicyGuard {
    snapshot: Arc<PolicySnapshot>,
}

impl PolicyGuard {
    pub fn revision(&self) -> u64 {
        self.snapshot.rev
    }

    pub fn snapshot(&self) -> Arc<PolicySnapshot> {
        Arc::clone(&self.snapshot)
    }
}

pub(crate) fn apply_override_to_snapshot(
    snapshot: &mut PolicySnapshot,
    path: &str,
    value: &Value,
    source: PolicySource,
) -> Result<(), PolicyError> {
    match path {
        "timeouts.standard_seconds" => snapshot.timeouts.standard_seconds = to_u64(value)?,
        "timeouts.extra_seconds" => snapshot.timeouts.extra_seconds = to_u64(value)?,
        "retry.max_attempts" => snapshot.retry.max_attempts = to_attempts(value)?,
        "retry.backoff_ms" => snapshot.retry.backoff_ms = to_u64(value)?,
        "logging.lowest_severity" => snapshot.logging.lowest_severity = to_severity(value)?,
        path => return Err(PolicyError::UnsupportedPath(path.to_string())),
    }
    snapshot.set_provenance(path, source);
    Ok(())
}

fn to_u64(value: &Value) -> Result<u64, PolicyError> {
    value
        .as_u64()
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected unsigned integer, got {value}")))
}

fn to_attempts(value: &Value) -> Result<u32, PolicyError> {
    let raw = to_u64(value)?;
    match u32::try_from(raw) {
        Ok(0) => Err(PolicyError::InvalidValue(
            "retry.max_attempts must be at least 1".to_string(),
        )),
        Ok(attempts) => Ok(attempts),
        Err(_) => Err(PolicyError::InvalidValue(format!("value {raw} exceeds u32"))),
    }
}

fn to_severity(value: &Value) -> Result<Severity, PolicyError> {
    let raw = value
        .as_str()
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected severity name, got {value}")))?;
    raw.parse::<Severity>()
        .map_err(|err| PolicyError::InvalidValue(err.to_string()))
}
