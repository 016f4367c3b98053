//! Waiting engine
//!
//! Polls a question through an actor until a condition holds on its answer
//! or the effective timeout elapses:
//! - effective timeout = (override ?? standard) + extra + additional
//! - do-while polling against a monotonic clock
//! - optional log suppression, restored on every exit path
//! - async mirror: `Wait` over an async question is an async task/question

pub mod async_wait;
pub mod timeouts;
pub mod wait;

pub use async_wait::wait_for_answer_async;
pub use timeouts::{effective_timeout, SetTimeouts, DEFAULT_STANDARD_TIMEOUT_SECONDS};
pub use wait::{wait_for_answer, Wait};
