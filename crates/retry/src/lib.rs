//! Retry on a designated transient error
//!
//! [`Retry::on`] picks the error type to retry on. Any other error ends the
//! run immediately; the designated one is retried until the attempt bound
//! from [`RetryPolicy`] is spent, after which the last error is returned.

pub mod retry;
pub mod retrying;

pub use retry::{Retry, RetryOn};
pub use retrying::Retrying;
pub use screenplay_policy_center::RetryPolicy;
