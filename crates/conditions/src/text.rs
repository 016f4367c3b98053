//! Text matching over anything that reads as `str`

use std::fmt;

use regex::Regex;
use screenplay_core_types::{Result, ScreenplayError};

use crate::condition::Condition;

macro_rules! text_condition {
    ($name:ident, $ctor:ident, $phrase:literal, |$actual:ident, $expected:ident| $body:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub expected: String,
        }

        pub fn $ctor(expected: impl Into<String>) -> $name {
            $name {
                expected: expected.into(),
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($phrase, " {:?}"), self.expected)
            }
        }

        impl<T: AsRef<str> + ?Sized> Condition<T> for $name {
            fn evaluate(&self, actual: &T) -> Result<bool> {
                let $actual: &str = actual.as_ref();
                let $expected: &str = &self.expected;
                Ok($body)
            }
        }
    };
}

text_condition!(ContainsSubstring, contains_substring, "contains substring", |actual, expected| actual.contains(expected));
text_condition!(StartsWith, starts_with, "starts with", |actual, expected| actual.starts_with(expected));
text_condition!(EndsWith, ends_with, "ends with", |actual, expected| actual.ends_with(expected));

/// Text matches a regular expression anywhere in the string.
#[derive(Debug, Clone)]
pub struct MatchesRegex {
    pattern: Regex,
}

impl MatchesRegex {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|err| {
            ScreenplayError::InvalidCondition(format!("bad regex '{}': {}", pattern, err))
        })?;
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

pub fn matches_regex(pattern: &str) -> Result<MatchesRegex> {
    MatchesRegex::new(pattern)
}

impl fmt::Display for MatchesRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matches regex /{}/", self.pattern.as_str())
    }
}

impl<T: AsRef<str> + ?Sized> Condition<T> for MatchesRegex {
    fn evaluate(&self, actual: &T) -> Result<bool> {
        Ok(self.pattern.is_match(actual.as_ref()))
    }
}
