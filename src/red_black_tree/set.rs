use crate::compare::{Compare, Natural};
use crate::error::{Error, Result};
use crate::red_black_tree::tree::{Tree, TreeIntoIter, TreeIter};
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using a red black tree.
///
/// Values are ordered by the comparator `C`, which defaults to the natural order of `T`. Two
/// values that the comparator reports as equal are the same element, so inserting a duplicate
/// leaves the set unchanged.
///
/// # Examples
///
/// ```
/// use redblack_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Ok(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert!(set.remove(&0));
/// assert!(!set.remove(&1));
/// ```
#[derive(Clone)]
pub struct RedBlackSet<T, C = Natural> {
    tree: Tree<T>,
    comparator: C,
}

impl<T> RedBlackSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackSet<T>` ordered by the natural order of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C> RedBlackSet<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `RedBlackSet<T, C>` that orders values with `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::with_comparator(|a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0));
    /// set.insert((2, 'b'));
    /// set.insert((1, 'a'));
    /// assert!(!set.insert((2, 'z')));
    /// assert_eq!(set.min(), Ok(&(1, 'a')));
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        RedBlackSet {
            tree: Tree::new(),
            comparator,
        }
    }

    /// Constructs a new, empty `RedBlackSet<T, C>` whose node arena allocates `chunk_size`
    /// nodes at a time. Returns `Error::InvalidArgument` if `chunk_size` is zero.
    pub fn with_chunk_size(comparator: C, chunk_size: usize) -> Result<Self> {
        Ok(RedBlackSet {
            tree: Tree::with_chunk_size(chunk_size)?,
            comparator,
        })
    }

    /// Constructs a set ordered by `comparator` by inserting `values` one at a time. Values
    /// equal to an earlier value are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::compare::{Natural, Reverse};
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set = RedBlackSet::from_values(Reverse(Natural), vec![1, 3, 2, 3]);
    /// assert_eq!(set.to_vec(), vec![3, 2, 1]);
    /// ```
    pub fn from_values<I>(comparator: C, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Self::with_comparator(comparator);
        set.extend(values);
        set
    }

    /// Inserts a value into the set. Returns `false` and leaves the set unchanged if an equal
    /// value is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let RedBlackSet { tree, comparator } = self;
        tree.insert(value, |new, old| comparator.compare(new, old), |_, _| {})
    }

    /// Removes a value from the set. Returns `true` if the value was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes a value from the set and returns the stored value equal to it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.take(&1), Some(1));
    /// assert_eq!(set.take(&1), None);
    /// ```
    pub fn take(&mut self, value: &T) -> Option<T> {
        let RedBlackSet { tree, comparator } = self;
        tree.remove(|stored| comparator.compare(value, stored))
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Returns the stored value that is equal to `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        let RedBlackSet { tree, comparator } = self;
        tree.get(|stored| comparator.compare(value, stored))
    }

    /// Returns a value in the set that is less than or equal to a particular value. Returns
    /// `None` if such a value does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, value: &T) -> Option<&T> {
        let RedBlackSet { tree, comparator } = self;
        tree.floor(|stored| comparator.compare(value, stored))
    }

    /// Returns a value in the set that is greater than or equal to a particular value. Returns
    /// `None` if such a value does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil(&self, value: &T) -> Option<&T> {
        let RedBlackSet { tree, comparator } = self;
        tree.ceil(|stored| comparator.compare(value, stored))
    }
}

impl<T, C> RedBlackSet<T, C> {
    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = (0..1000).collect();
    /// assert!(set.height() <= 20);
    /// ```
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the minimum value of the set. Returns `Error::EmptyStructure` if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::error::Error;
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.min(), Err(Error::EmptyStructure));
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&T> {
        self.tree.min().ok_or(Error::EmptyStructure)
    }

    /// Returns the maximum value of the set. Returns `Error::EmptyStructure` if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Ok(&3));
    /// ```
    pub fn max(&self) -> Result<&T> {
        self.tree.max().ok_or(Error::EmptyStructure)
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter {
            tree_iter: self.tree.iter(),
        }
    }

    /// Copies the values of the set into a `Vec` in ascending order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T, C> IntoIterator for RedBlackSet<T, C> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackSet<T, C>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct RedBlackSetIntoIter<T> {
    tree_iter: TreeIntoIter<T>,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

/// An iterator for `RedBlackSet<T, C>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct RedBlackSetIter<'a, T> {
    tree_iter: TreeIter<'a, T>,
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<T> Default for RedBlackSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_values(Natural, iter)
    }
}

impl<T, C> Extend<T> for RedBlackSet<T, C>
where
    C: Compare<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, C> fmt::Debug for RedBlackSet<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
