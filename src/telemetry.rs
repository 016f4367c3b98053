//! Process-wide tracing setup

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

static INIT: OnceCell<()> = OnceCell::new();

/// Filter directives, e.g. `screenplay=debug`. Falls back to `RUST_LOG`.
pub const LOG_ENV: &str = "SCREENPLAY_LOG";
/// Set to `json` for one JSON object per event.
pub const LOG_FORMAT_ENV: &str = "SCREENPLAY_LOG_FORMAT";

/// Installs a global subscriber once; later calls are no-ops.
///
/// An already-installed global subscriber is left in place.
pub fn init_tracing() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let json = std::env::var(LOG_FORMAT_ENV)
            .map(|value| value.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let result = if json {
            let subscriber = Registry::default()
                .with(filter)
                .with(fmt::layer().json().with_current_span(false));
            tracing::subscriber::set_global_default(subscriber)
        } else {
            let subscriber = Registry::default().with(filter).with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true),
            );
            tracing::subscriber::set_global_default(subscriber)
        };
        if result.is_err() {
            tracing::debug!("global subscriber already installed");
        }
    });
}
