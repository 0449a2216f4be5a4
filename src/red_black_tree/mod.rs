//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Nodes live in an arena and link to their parent and children by handle, so rotations are a
//! constant number of handle updates. `RedBlackSet` and `RedBlackMap` share one engine.

mod map;
mod node;
mod set;
mod tree;

pub use self::map::{
    RedBlackMap, RedBlackMapIntoIter, RedBlackMapIter, RedBlackMapKeys, RedBlackMapValues,
};
pub use self::set::{RedBlackSet, RedBlackSetIntoIter, RedBlackSetIter};
pub use self::tree::DEFAULT_CHUNK_SIZE;
