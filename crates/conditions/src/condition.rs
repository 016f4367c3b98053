//! Condition trait and logical composition

use std::fmt;

use screenplay_core_types::Result;

/// Pure predicate over an answer of type `T`.
///
/// Evaluation returns `Result` because some conditions treat their input as
/// a precondition violation (a first item of an empty list) rather than as
/// simply unsatisfied.
pub trait Condition<T: ?Sized>: fmt::Display + Send + Sync {
    fn evaluate(&self, actual: &T) -> Result<bool>;
}

impl<T: ?Sized, C: Condition<T> + ?Sized> Condition<T> for Box<C> {
    fn evaluate(&self, actual: &T) -> Result<bool> {
        (**self).evaluate(actual)
    }
}

impl<T: ?Sized, C: Condition<T> + ?Sized> Condition<T> for &C {
    fn evaluate(&self, actual: &T) -> Result<bool> {
        (**self).evaluate(actual)
    }
}

/// How two conditions combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => f.write_str("and"),
            Operator::Or => f.write_str("or"),
        }
    }
}

/// Two conditions joined by an [`Operator`]. Evaluation short-circuits.
#[derive(Debug, Clone)]
pub struct Combined<L, R> {
    pub operator: Operator,
    pub left: L,
    pub right: R,
}

impl<L, R> Combined<L, R> {
    pub fn new(operator: Operator, left: L, right: R) -> Self {
        Self {
            operator,
            left,
            right,
        }
    }
}

impl<L: fmt::Display, R: fmt::Display> fmt::Display for Combined<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

impl<T, L, R> Condition<T> for Combined<L, R>
where
    T: ?Sized,
    L: Condition<T>,
    R: Condition<T>,
{
    fn evaluate(&self, actual: &T) -> Result<bool> {
        let left = self.left.evaluate(actual)?;
        match (self.operator, left) {
            (Operator::And, false) => Ok(false),
            (Operator::Or, true) => Ok(true),
            _ => self.right.evaluate(actual),
        }
    }
}

/// Negation of a condition.
#[derive(Debug, Clone)]
pub struct Not<C> {
    pub inner: C,
}

impl<C: fmt::Display> fmt::Display for Not<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not ({})", self.inner)
    }
}

impl<T: ?Sized, C: Condition<T>> Condition<T> for Not<C> {
    fn evaluate(&self, actual: &T) -> Result<bool> {
        Ok(!self.inner.evaluate(actual)?)
    }
}

/// Builder methods for composing conditions.
pub trait ConditionExt: Sized {
    fn and<R>(self, right: R) -> Combined<Self, R> {
        Combined::new(Operator::And, self, right)
    }

    fn or<R>(self, right: R) -> Combined<Self, R> {
        Combined::new(Operator::Or, self, right)
    }

    fn negated(self) -> Not<Self> {
        Not { inner: self }
    }
}

impl<C: fmt::Display + Send + Sync> ConditionExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{is_equal_to, is_greater_than, is_less_than};
    use screenplay_core_types::ScreenplayError;

    struct Explodes;

    impl fmt::Display for Explodes {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("explodes")
        }
    }

    impl Condition<i32> for Explodes {
        fn evaluate(&self, _actual: &i32) -> Result<bool> {
            Err(ScreenplayError::InvalidCondition("boom".into()))
        }
    }

    #[test]
    fn and_requires_both() {
        let range = is_greater_than(3).and(is_less_than(10));
        assert!(range.evaluate(&5).unwrap());
        assert!(!range.evaluate(&3).unwrap());
        assert!(!range.evaluate(&10).unwrap());
        assert_eq!(range.to_string(), "(is greater than 3 and is less than 10)");
    }

    #[test]
    fn or_accepts_either() {
        let edge = is_equal_to(0).or(is_equal_to(100));
        assert!(edge.evaluate(&0).unwrap());
        assert!(edge.evaluate(&100).unwrap());
        assert!(!edge.evaluate(&50).unwrap());
        assert_eq!(edge.operator, Operator::Or);
    }

    #[test]
    fn composition_short_circuits() {
        assert!(!is_equal_to(1).and(Explodes).evaluate(&2).unwrap());
        assert!(is_equal_to(1).or(Explodes).evaluate(&1).unwrap());
        assert!(is_equal_to(1).and(Explodes).evaluate(&1).is_err());
    }

    #[test]
    fn negation_inverts_and_describes() {
        let not_zero = is_equal_to(0).negated();
        assert!(not_zero.evaluate(&1).unwrap());
        assert!(!not_zero.evaluate(&0).unwrap());
        assert_eq!(not_zero.to_string(), "not (is equal to 0)");
    }

    #[test]
    fn boxed_conditions_delegate() {
        let boxed: Box<dyn Condition<i32>> = Box::new(is_less_than(2));
        assert!(boxed.evaluate(&1).unwrap());
        assert_eq!(boxed.to_string(), "is less than 2");
    }
}
