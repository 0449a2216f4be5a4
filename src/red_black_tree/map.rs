use crate::compare::{Compare, Natural};
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::red_black_tree::tree::{Tree, TreeIntoIter, TreeIter};
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::ops::Index;

/// An ordered map implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black.
/// No red node has a red child and every path from a node down to an empty subtree crosses the
/// same number of black nodes, so the height stays within twice the logarithm of the size.
///
/// Keys are ordered by the comparator `C`, which defaults to the natural order of `K`.
///
/// # Examples
///
/// ```
/// use redblack_collections::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.first_key(), Ok(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// *map.get_mut(&0).unwrap() = 2;
/// assert_eq!(map.remove(&0), Some(2));
/// assert_eq!(map.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct RedBlackMap<K, V, C = Natural> {
    tree: Tree<Entry<K, V>>,
    comparator: C,
}

impl<K, V> RedBlackMap<K, V>
where
    K: Ord,
{
    /// Constructs a new, empty `RedBlackMap<K, V>` ordered by the natural order of `K`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> RedBlackMap<K, V, C>
where
    C: Compare<K>,
{
    /// Constructs a new, empty `RedBlackMap<K, V, C>` that orders keys with `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    /// assert_eq!(map.first_key(), Ok(&2));
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        RedBlackMap {
            tree: Tree::new(),
            comparator,
        }
    }

    /// Constructs a new, empty `RedBlackMap<K, V, C>` whose node arena allocates `chunk_size`
    /// nodes at a time. Returns `Error::InvalidArgument` if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::compare::Natural;
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::with_chunk_size(Natural, 1024).unwrap();
    /// assert!(RedBlackMap::<u32, u32>::with_chunk_size(Natural, 0).is_err());
    /// ```
    pub fn with_chunk_size(comparator: C, chunk_size: usize) -> Result<Self> {
        Ok(RedBlackMap {
            tree: Tree::with_chunk_size(chunk_size)?,
            comparator,
        })
    }

    /// Constructs a map ordered by `comparator` by inserting `entries` one at a time. Later
    /// entries overwrite the values of earlier entries with an equal key.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::compare::{Natural, Reverse};
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let map = RedBlackMap::from_entries(Reverse(Natural), vec![(1, 'a'), (2, 'b'), (1, 'c')]);
    /// assert_eq!(map.iter().collect::<Vec<_>>(), vec![(&2, &'b'), (&1, &'c')]);
    /// ```
    pub fn from_entries<I>(comparator: C, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_comparator(comparator);
        map.extend(entries);
        map
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its value
    /// is replaced in place and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let RedBlackMap { tree, comparator } = self;
        let mut replaced = None;
        tree.insert(
            Entry::new(key, value),
            |new, old| comparator.compare(&new.key, &old.key),
            |old, new| replaced = Some(mem::replace(&mut old.value, new.value)),
        );
        replaced
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated value. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some(1));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let RedBlackMap { tree, comparator } = self;
        tree.remove(|entry| comparator.compare(key, &entry.key))
            .map(|entry| entry.value)
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let RedBlackMap { tree, comparator } = self;
        tree.get(|entry| comparator.compare(key, &entry.key))
            .map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let RedBlackMap { tree, comparator } = self;
        tree.get_mut(|entry| comparator.compare(key, &entry.key))
            .map(|entry| &mut entry.value)
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, key: &K) -> Option<&K> {
        let RedBlackMap { tree, comparator } = self;
        tree.floor(|entry| comparator.compare(key, &entry.key))
            .map(|entry| &entry.key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil(&self, key: &K) -> Option<&K> {
        let RedBlackMap { tree, comparator } = self;
        tree.ceil(|entry| comparator.compare(key, &entry.key))
            .map(|entry| &entry.key)
    }
}

impl<K, V, C> RedBlackMap<K, V, C> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the minimum key of the map. Returns `Error::EmptyStructure` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::error::Error;
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.first_key(), Err(Error::EmptyStructure));
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.first_key(), Ok(&1));
    /// ```
    pub fn first_key(&self) -> Result<&K> {
        self.first().map(|(key, _)| key)
    }

    /// Returns the maximum key of the map. Returns `Error::EmptyStructure` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.last_key(), Ok(&3));
    /// ```
    pub fn last_key(&self) -> Result<&K> {
        self.last().map(|(key, _)| key)
    }

    /// Returns the entry with the minimum key.
    pub fn first(&self) -> Result<(&K, &V)> {
        self.tree
            .min()
            .map(|entry| (&entry.key, &entry.value))
            .ok_or(Error::EmptyStructure)
    }

    /// Returns the entry with the maximum key.
    pub fn last(&self) -> Result<(&K, &V)> {
        self.tree
            .max()
            .map(|entry| (&entry.key, &entry.value))
            .ok_or(Error::EmptyStructure)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<'_, K, V> {
        RedBlackMapIter {
            tree_iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the keys of the map in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<_, _> = vec![(3, 'c'), (1, 'a')].into_iter().collect();
    /// assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &3]);
    /// ```
    pub fn keys(&self) -> RedBlackMapKeys<'_, K, V> {
        RedBlackMapKeys {
            tree_iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the values of the map, ordered by their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use redblack_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<_, _> = vec![(3, 'c'), (1, 'a')].into_iter().collect();
    /// assert_eq!(map.values().collect::<Vec<&char>>(), vec![&'a', &'c']);
    /// ```
    pub fn values(&self) -> RedBlackMapValues<'_, K, V> {
        RedBlackMapValues {
            tree_iter: self.tree.iter(),
        }
    }
}

impl<K, V, C> Index<&K> for RedBlackMap<K, V, C>
where
    C: Compare<K>,
{
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).expect("Key does not exist.")
    }
}

impl<K, V, C> IntoIterator for RedBlackMap<K, V, C> {
    type IntoIter = RedBlackMapIntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a RedBlackMap<K, V, C>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = RedBlackMapIter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackMap<K, V, C>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct RedBlackMapIntoIter<K, V> {
    tree_iter: TreeIntoIter<Entry<K, V>>,
}

impl<K, V> Iterator for RedBlackMapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(Entry::into_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

/// An iterator for `RedBlackMap<K, V, C>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct RedBlackMapIter<'a, K, V> {
    tree_iter: TreeIter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

/// An iterator over the keys of a `RedBlackMap<K, V, C>` in ascending order.
pub struct RedBlackMapKeys<'a, K, V> {
    tree_iter: TreeIter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for RedBlackMapKeys<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| &entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

/// An iterator over the values of a `RedBlackMap<K, V, C>`, ordered by key.
pub struct RedBlackMapValues<'a, K, V> {
    tree_iter: TreeIter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for RedBlackMapValues<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| &entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<K, V> Default for RedBlackMap<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for RedBlackMap<K, V>
where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_entries(Natural, iter)
    }
}

impl<K, V, C> Extend<(K, V)> for RedBlackMap<K, V, C>
where
    C: Compare<K>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C> fmt::Debug for RedBlackMap<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
