//! Quantifiers that lift an item condition to a sequence
//!
//! `FirstItem` and `LastItem` reject an empty sequence with an error, while
//! `ItemAtPosition` answers `false` for any index outside the sequence.

use std::fmt;

use screenplay_core_types::{Result, ScreenplayError};

use crate::condition::Condition;

/// Every element satisfies the inner condition. True for an empty sequence.
#[derive(Debug, Clone)]
pub struct EveryItem<C> {
    pub inner: C,
}

/// At least one element satisfies the inner condition. False when empty.
#[derive(Debug, Clone)]
pub struct AtLeastOneItem<C> {
    pub inner: C,
}

#[derive(Debug, Clone)]
pub struct FirstItem<C> {
    pub inner: C,
}

#[derive(Debug, Clone)]
pub struct LastItem<C> {
    pub inner: C,
}

#[derive(Debug, Clone)]
pub struct ItemAtPosition<C> {
    pub index: isize,
    pub inner: C,
}

/// Applies a `usize` condition to the sequence length.
#[derive(Debug, Clone)]
pub struct HasSizeThat<C> {
    pub inner: C,
}

pub fn every_item<C>(inner: C) -> EveryItem<C> {
    EveryItem { inner }
}

pub fn at_least_one_item<C>(inner: C) -> AtLeastOneItem<C> {
    AtLeastOneItem { inner }
}

pub fn first_item<C>(inner: C) -> FirstItem<C> {
    FirstItem { inner }
}

pub fn last_item<C>(inner: C) -> LastItem<C> {
    LastItem { inner }
}

pub fn item_at_position<C>(index: isize, inner: C) -> ItemAtPosition<C> {
    ItemAtPosition { index, inner }
}

pub fn has_size_that<C>(inner: C) -> HasSizeThat<C> {
    HasSizeThat { inner }
}

impl<C: fmt::Display> fmt::Display for EveryItem<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "has every item that {}", self.inner)
    }
}

impl<C: fmt::Display> fmt::Display for AtLeastOneItem<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "has at least one item that {}", self.inner)
    }
}

impl<C: fmt::Display> fmt::Display for FirstItem<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "has a first item that {}", self.inner)
    }
}

impl<C: fmt::Display> fmt::Display for LastItem<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "has a last item that {}", self.inner)
    }
}

impl<C: fmt::Display> fmt::Display for ItemAtPosition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "has an item at position {} that {}", self.index, self.inner)
    }
}

impl<C: fmt::Display> fmt::Display for HasSizeThat<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "has a size that {}", self.inner)
    }
}

impl<T, C: Condition<T>> Condition<[T]> for EveryItem<C> {
    fn evaluate(&self, actual: &[T]) -> Result<bool> {
        for item in actual {
            if !self.inner.evaluate(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<T, C: Condition<T>> Condition<[T]> for AtLeastOneItem<C> {
    fn evaluate(&self, actual: &[T]) -> Result<bool> {
        for item in actual {
            if self.inner.evaluate(item)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl<T, C: Condition<T>> Condition<[T]> for FirstItem<C> {
    fn evaluate(&self, actual: &[T]) -> Result<bool> {
        let first = actual.first().ok_or_else(|| self.empty())?;
        self.inner.evaluate(first)
    }
}

impl<T, C: Condition<T>> Condition<[T]> for LastItem<C> {
    fn evaluate(&self, actual: &[T]) -> Result<bool> {
        let last = actual.last().ok_or_else(|| self.empty())?;
        self.inner.evaluate(last)
    }
}

impl<T, C: Condition<T>> Condition<[T]> for ItemAtPosition<C> {
    fn evaluate(&self, actual: &[T]) -> Result<bool> {
        let item = usize::try_from(self.index)
            .ok()
            .and_then(|index| actual.get(index));
        match item {
            Some(item) => self.inner.evaluate(item),
            None => Ok(false),
        }
    }
}

impl<T, C: Condition<usize>> Condition<[T]> for HasSizeThat<C> {
    fn evaluate(&self, actual: &[T]) -> Result<bool> {
        self.inner.evaluate(&actual.len())
    }
}

impl<C: fmt::Display> FirstItem<C> {
    fn empty(&self) -> ScreenplayError {
        ScreenplayError::EmptySequence {
            condition: self.to_string(),
        }
    }
}

impl<C: fmt::Display> LastItem<C> {
    fn empty(&self) -> ScreenplayError {
        ScreenplayError::EmptySequence {
            condition: self.to_string(),
        }
    }
}

// Answers usually arrive as owned vectors; delegate to the slice impls.
macro_rules! vec_delegate {
    ($($name:ident),+ $(,)?) => {
        $(
            impl<T, C> Condition<Vec<T>> for $name<C>
            where
                $name<C>: Condition<[T]>,
            {
                fn evaluate(&self, actual: &Vec<T>) -> Result<bool> {
                    Condition::<[T]>::evaluate(self, actual.as_slice())
                }
            }
        )+
    };
}

vec_delegate!(
    EveryItem,
    AtLeastOneItem,
    FirstItem,
    LastItem,
    ItemAtPosition,
    HasSizeThat,
);
