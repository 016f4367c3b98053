//! Comparisons against an expected value

use std::fmt;

use screenplay_core_types::Result;

use crate::condition::Condition;

/// `actual == expected`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsEqualTo<V> {
    pub expected: V,
}

pub fn is_equal_to<V>(expected: V) -> IsEqualTo<V> {
    IsEqualTo { expected }
}

impl<V: fmt::Debug> fmt::Display for IsEqualTo<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "is equal to {:?}", self.expected)
    }
}

impl<T, V> Condition<T> for IsEqualTo<V>
where
    T: PartialEq<V> + ?Sized,
    V: fmt::Debug + Send + Sync,
{
    fn evaluate(&self, actual: &T) -> Result<bool> {
        Ok(*actual == self.expected)
    }
}

macro_rules! ordering_condition {
    ($name:ident, $ctor:ident, $phrase:literal, $op:tt) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name<V> {
            pub expected: V,
        }

        pub fn $ctor<V>(expected: V) -> $name<V> {
            $name { expected }
        }

        impl<V: fmt::Debug> fmt::Display for $name<V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($phrase, " {:?}"), self.expected)
            }
        }

        impl<T, V> Condition<T> for $name<V>
        where
            T: PartialOrd<V> + ?Sized,
            V: fmt::Debug + Send + Sync,
        {
            fn evaluate(&self, actual: &T) -> Result<bool> {
                Ok(*actual $op self.expected)
            }
        }
    };
}

ordering_condition!(IsGreaterThan, is_greater_than, "is greater than", >);
ordering_condition!(
    IsGreaterThanOrEqualTo,
    is_greater_than_or_equal_to,
    "is greater than or equal to",
    >=
);
ordering_condition!(IsLessThan, is_less_than, "is less than", <);
ordering_condition!(
    IsLessThanOrEqualTo,
    is_less_than_or_equal_to,
    "is less than or equal to",
    <=
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsTrue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsFalse;

pub fn is_true() -> IsTrue {
    IsTrue
}

pub fn is_false() -> IsFalse {
    IsFalse
}

impl fmt::Display for IsTrue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("is true")
    }
}

impl fmt::Display for IsFalse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("is false")
    }
}

impl Condition<bool> for IsTrue {
    fn evaluate(&self, actual: &bool) -> Result<bool> {
        Ok(*actual)
    }
}

impl Condition<bool> for IsFalse {
    fn evaluate(&self, actual: &bool) -> Result<bool> {
        Ok(!*actual)
    }
}
