//! Actors configured from policy

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use screenplay_actor::{Actor, Logger, TracingLogger};
use screenplay_core_types::Result;
use screenplay_policy_center::{
    load_snapshot, InMemoryPolicyCenter, PolicyCenter, PolicySnapshot,
};
use screenplay_retry::{Retry, RetryOn};
use screenplay_waiting::SetTimeouts;
use tracing::debug;

/// Hands out actors whose timeouts, retry bound and log level come from a
/// [`PolicyCenter`].
///
/// The snapshot is read whenever an actor is built, so runtime overrides
/// apply to actors created afterwards and never to existing ones.
#[derive(Clone)]
pub struct Cast {
    center: Arc<dyn PolicyCenter>,
}

impl Cast {
    pub fn new(center: Arc<dyn PolicyCenter>) -> Self {
        Self { center }
    }

    pub fn from_snapshot(snapshot: PolicySnapshot) -> Self {
        Self::new(Arc::new(InMemoryPolicyCenter::new(snapshot)))
    }

    /// Defaults, then the YAML file at `path` if it exists, then env vars.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let snapshot = load_snapshot(path)?;
        debug!(rev = snapshot.rev, "loaded screenplay policy");
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn policy(&self) -> Arc<PolicySnapshot> {
        self.center.snapshot()
    }

    pub fn center(&self) -> &Arc<dyn PolicyCenter> {
        &self.center
    }

    /// Actor logging through `tracing` at the policy's lowest severity.
    pub fn actor_named(&self, name: &str) -> Result<Actor> {
        let policy = self.policy();
        let logger = Arc::new(TracingLogger::new(policy.logging.lowest_severity));
        self.cast(name, logger, &policy)
    }

    /// Actor with a caller-supplied logger, left at its own severity.
    pub fn actor_with_logger(&self, name: &str, logger: Arc<dyn Logger>) -> Result<Actor> {
        let policy = self.policy();
        self.cast(name, logger, &policy)
    }

    /// Retry builder bounded by the policy's retry section.
    pub fn retry_on<E>(&self) -> RetryOn<E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Retry::on::<E>().with_policy(self.policy().retry)
    }

    fn cast(&self, name: &str, logger: Arc<dyn Logger>, policy: &PolicySnapshot) -> Result<Actor> {
        Actor::with_logger(name, logger).who_can(SetTimeouts::from_policy(&policy.timeouts))
    }
}

impl fmt::Debug for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cast")
            .field("rev", &self.policy().rev)
            .finish()
    }
}
