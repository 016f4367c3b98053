//! Conditions for waiting
//!
//! A condition is a pure predicate over an answer, describable through
//! `Display` so that timeout failures can say what was expected:
//! - value comparisons (equality, ordering, booleans)
//! - text matching (substring, prefix, suffix, regex)
//! - collection quantifiers (every, at least one, first, last, nth, size)
//! - `and` / `or` composition through an explicit [`Operator`] tag

pub mod collection;
pub mod condition;
pub mod text;
pub mod value;

pub use collection::{
    at_least_one_item, every_item, first_item, has_size_that, item_at_position, last_item,
    AtLeastOneItem, EveryItem, FirstItem, HasSizeThat, ItemAtPosition, LastItem,
};
pub use condition::{Combined, Condition, ConditionExt, Not, Operator};
pub use text::{contains_substring, ends_with, matches_regex, starts_with};
pub use text::{ContainsSubstring, EndsWith, MatchesRegex, StartsWith};
pub use value::{
    is_equal_to, is_false, is_greater_than, is_greater_than_or_equal_to, is_less_than,
    is_less_than_or_equal_to, is_true, IsEqualTo, IsFalse, IsGreaterThan,
    IsGreaterThanOrEqualTo, IsLessThan, IsLessThanOrEqualTo, IsTrue,
};
