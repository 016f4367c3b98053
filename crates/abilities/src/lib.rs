//! Abilities shipped with the Screenplay core
//!
//! - [`BrowseTheWeb`]: holds a browser driver handle behind [`WebDriver`]
//! - [`CallRestApi`]: holds a configured blocking HTTP client and base URL,
//!   with optional request/response dumping

pub mod browse;
pub mod rest;

pub use browse::{BrowseTheWeb, StaleHandle, TheCurrentUrl, ThePageTitle, WebDriver};
pub use rest::{CallRestApi, Dumper, Exchange, MemoryDumper};
