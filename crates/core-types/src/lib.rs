//! Shared primitives for the Screenplay actor core.
//!
//! Every crate in the workspace reports failures through [`ScreenplayError`]
//! and grades log output with [`Severity`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, ScreenplayError>;

/// Error type for actor dispatch, waiting, and interactions.
#[derive(Debug, Error)]
pub enum ScreenplayError {
    /// The actor was asked for an ability it does not hold.
    #[error("{actor} does not have the ability to {ability}")]
    MissingAbility { actor: String, ability: String },

    /// The actor already holds an ability of this type.
    #[error("{actor} already has the ability to {ability}")]
    DuplicateAbility { actor: String, ability: String },

    /// A wait condition was not satisfied before the timeout elapsed.
    #[error("Waiting until {description} timed out; last answer: {last_answer}")]
    WaitingFailed {
        description: String,
        last_answer: String,
    },

    /// A positional condition was evaluated against an empty sequence.
    #[error("cannot evaluate '{condition}' against an empty sequence")]
    EmptySequence { condition: String },

    /// A condition could not be constructed or evaluated.
    #[error("invalid condition: {0}")]
    InvalidCondition(String),

    /// Configuration could not be loaded.
    #[error("policy error: {0}")]
    Policy(String),

    /// Error raised from inside a task or question body.
    #[error(transparent)]
    Interaction(#[from] anyhow::Error),
}

impl ScreenplayError {
    /// Wrap any error raised by an interaction body.
    pub fn interaction<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ScreenplayError::Interaction(anyhow::Error::new(err))
    }

    /// Returns the interaction payload as `E`, if it is one.
    pub fn downcast_interaction<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        match self {
            ScreenplayError::Interaction(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Check whether this error carries an interaction error of type `E`.
    pub fn is_transient<E>(&self) -> bool
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.downcast_interaction::<E>().is_some()
    }

    /// Check whether this is a waiting failure.
    pub fn is_waiting_failure(&self) -> bool {
        matches!(self, ScreenplayError::WaitingFailed { .. })
    }
}

/// Totally ordered log severity.
#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Severity {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(raw: u8) -> Severity {
        match raw {
            0 => Severity::Trace,
            1 => Severity::Debug,
            2 => Severity::Info,
            3 => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ScreenplayError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(ScreenplayError::Policy(format!(
                "unknown severity '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("stale")]
    struct Stale;

    #[derive(Debug, Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn severity_is_totally_ordered() {
        assert!(Severity::Trace < Severity::Debug);
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        for severity in Severity::ALL {
            assert_eq!(Severity::from_u8(severity.as_u8()), severity);
        }
    }

    #[test]
    fn severity_parses_aliases() {
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn interaction_errors_downcast_by_type() {
        let err = ScreenplayError::interaction(Stale);
        assert!(err.is_transient::<Stale>());
        assert!(!err.is_transient::<Other>());
        assert_eq!(err.to_string(), "stale");

        let missing = ScreenplayError::MissingAbility {
            actor: "Alice".into(),
            ability: "BrowseTheWeb".into(),
        };
        assert!(!missing.is_transient::<Stale>());
        assert!(missing.to_string().contains("Alice"));
        assert!(missing.to_string().contains("BrowseTheWeb"));
    }
}
