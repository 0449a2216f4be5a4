//! An ordered set and a sorted map backed by a red black tree.
//!
//! Both collections order their elements with an injected comparator (see `compare`) and share
//! a single tree engine whose nodes live in a typed arena (see `arena`).
//!
//! # Examples
//!
//! ```
//! use redblack_collections::red_black_tree::{RedBlackMap, RedBlackSet};
//!
//! let set: RedBlackSet<u32> = vec![5, 3, 7, 1, 4].into_iter().collect();
//! assert_eq!(set.to_vec(), vec![1, 3, 4, 5, 7]);
//!
//! let mut map = RedBlackMap::new();
//! map.insert(5, "five");
//! map.insert(5, "FIVE");
//! assert_eq!(map.get(&5), Some(&"FIVE"));
//! assert_eq!(map.len(), 1);
//! ```

mod entry;
pub mod arena;
pub mod compare;
pub mod error;
pub mod red_black_tree;
