//! Comparators used to order the elements of the collections in this crate.
//!
//! Any closure of the form `Fn(&T, &T) -> Ordering` is a comparator. `Natural` orders by `Ord`
//! and is the default for every collection.
//!
//! # Examples
//!
//! ```
//! use redblack_collections::compare::{ByKey, Compare, Natural, Reverse};
//! use std::cmp::Ordering;
//!
//! assert_eq!(Natural.compare(&1, &2), Ordering::Less);
//! assert_eq!(Reverse(Natural).compare(&1, &2), Ordering::Greater);
//! assert_eq!(ByKey::new(|pair: &(u32, char)| pair.1).compare(&(1, 'b'), &(2, 'a')), Ordering::Greater);
//! ```

use std::cmp::Ordering;
use std::marker::PhantomData;

/// A total order over values of type `T`.
///
/// Implementations must be consistent, transitive, and antisymmetric. Two values that compare
/// as `Ordering::Equal` are treated as the same key.
pub trait Compare<T: ?Sized> {
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

impl<T, F> Compare<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// Orders values by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T> Compare<T> for Natural
where
    T: Ord + ?Sized,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Inverts the order of the wrapped comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T, C> Compare<T> for Reverse<C>
where
    T: ?Sized,
    C: Compare<T>,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.0.compare(right, left)
    }
}

/// Orders values by the natural order of a key extracted from each value.
pub struct ByKey<F, K> {
    extract: F,
    marker: PhantomData<fn() -> K>,
}

impl<F, K> ByKey<F, K> {
    pub fn new(extract: F) -> Self {
        ByKey {
            extract,
            marker: PhantomData,
        }
    }
}

impl<F, K> Clone for ByKey<F, K>
where
    F: Clone,
{
    fn clone(&self) -> Self {
        ByKey::new(self.extract.clone())
    }
}

impl<T, K, F> Compare<T> for ByKey<F, K>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.extract)(left).cmp(&(self.extract)(right))
    }
}

#[cfg(test)]
mod tests {
    use super::{ByKey, Compare, Natural, Reverse};
    use std::cmp::Ordering;

    #[test]
    fn test_natural() {
        assert_eq!(Natural.compare(&1, &1), Ordering::Equal);
        assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
    }

    #[test]
    fn test_closure() {
        let by_abs = |a: &i32, b: &i32| a.abs().cmp(&b.abs());
        assert_eq!(by_abs.compare(&-3, &2), Ordering::Greater);
        assert_eq!(by_abs.compare(&-3, &3), Ordering::Equal);
    }

    #[test]
    fn test_reverse() {
        assert_eq!(Reverse(Natural).compare(&1, &2), Ordering::Greater);
        assert_eq!(Reverse(Reverse(Natural)).compare(&1, &2), Ordering::Less);
    }

    #[test]
    fn test_by_key() {
        let by_second = ByKey::new(|pair: &(u32, u32)| pair.1);
        assert_eq!(by_second.compare(&(0, 5), &(9, 1)), Ordering::Greater);
    }
}
