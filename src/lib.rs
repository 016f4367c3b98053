//! Screenplay pattern core
//!
//! Actors hold abilities and perform tasks and ask questions through them.
//! This crate gathers the workspace into one import surface and adds the
//! pieces that tie it together:
//! - [`cast::Cast`] builds actors configured from the policy center
//! - [`telemetry::init_tracing`] installs the process-wide subscriber

pub mod cast;
pub mod telemetry;

pub use cast::Cast;

pub use screenplay_abilities as abilities;
pub use screenplay_actor as actor;
pub use screenplay_conditions as conditions;
pub use screenplay_policy_center as policy;
pub use screenplay_retry as retry;
pub use screenplay_waiting as waiting;

pub use screenplay_abilities::{BrowseTheWeb, CallRestApi, StaleHandle, WebDriver};
pub use screenplay_actor::{
    question_fn, task_fn, Ability, Actor, AsyncQuestion, AsyncTask, Logger, MemoryLogger,
    NoOpLogger, Question, Task, TracingLogger,
};
pub use screenplay_conditions::{Condition, ConditionExt};
pub use screenplay_core_types::{Result, ScreenplayError, Severity};
pub use screenplay_retry::{Retry, RetryOn};
pub use screenplay_waiting::{SetTimeouts, Wait};

/// Everything needed to write tasks, questions and waits.
pub mod prelude {
    pub use crate::{
        question_fn, task_fn, Ability, Actor, AsyncQuestion, AsyncTask, Condition,
        ConditionExt, Logger, Question, Result, Retry, ScreenplayError, SetTimeouts, Severity,
        Task, Wait,
    };
    pub use screenplay_conditions::*;
}
