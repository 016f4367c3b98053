//! Actor dispatch for the Screenplay pattern
//!
//! An [`Actor`] owns a set of abilities (one per type) and a logger, and
//! executes [`Task`]s and [`Question`]s, logging around each call:
//! - type-keyed ability registry with single registration per type
//! - one dispatch routine shared by every public verb
//! - mirrored async verbs for [`AsyncTask`] and [`AsyncQuestion`]

pub mod ability;
pub mod actor;
pub mod interaction;
pub mod logger;

pub use ability::{ability_name, type_label, Ability, AbilityRegistry};
pub use actor::{Actor, DEFAULT_ACTOR_NAME};
pub use interaction::{
    question_fn, task_fn, AsyncQuestion, AsyncTask, Question, QuestionFn, Task, TaskFn,
};
pub use logger::{
    Artifact, LogEntry, Logger, MemoryLogger, NoOpLogger, SeverityCell, SeverityGuard,
    TracingLogger,
};
pub use screenplay_core_types::{Result, ScreenplayError, Severity};
