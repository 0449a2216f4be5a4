//! Chunked slot allocator for tree nodes.

use crate::error::{Error, Result};
use log::debug;
use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to an object stored in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator that stores objects of a single type and addresses them by `Handle`.
///
/// Objects live in fixed-size chunks, so growing the arena never moves existing objects.
/// Freed slots are threaded onto a free list and handed out again by the next allocation.
/// All objects are dropped when the arena is dropped or cleared.
///
/// # Examples
///
/// ```
/// use redblack_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024).unwrap();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert_eq!(arena.get(&x), None);
/// ```
#[derive(Clone)]
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    size: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: &Handle) -> bool {
        handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` holding `chunk_size` objects per chunk.
    ///
    /// Returns `Error::InvalidArgument` if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidArgument("arena chunk size must be non-zero"));
        }
        Ok(TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            size: 0,
            capacity: 0,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Stores `value` in the arena and returns its handle.
    pub fn allocate(&mut self, value: T) -> Handle {
        if self.size == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
            debug!(
                "arena grew to {} chunks ({} slots)",
                self.chunks.len(),
                self.capacity,
            );
        }
        self.size += 1;

        match self.head.take() {
            None => {
                let chunk_count = self.chunks.len();
                let last_chunk = &mut self.chunks[chunk_count - 1];
                last_chunk.push(Block::Occupied(value));
                Handle {
                    chunk_index: chunk_count - 1,
                    block_index: last_chunk.len() - 1,
                }
            },
            Some(handle) => {
                let vacant_block = mem::replace(
                    &mut self.chunks[handle.chunk_index][handle.block_index],
                    Block::Occupied(value),
                );

                match vacant_block {
                    Block::Vacant(next_handle) => {
                        self.head = next_handle;
                        handle
                    },
                    Block::Occupied(_) => panic!("Expected free list to point at a vacant block."),
                }
            },
        }
    }

    /// Removes the object behind `handle` from the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is out of bounds or refers to a vacant slot.
    pub fn free(&mut self, handle: &Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(
            &mut self.chunks[handle.chunk_index][handle.block_index],
            Block::Vacant(self.head),
        );
        match old_block {
            Block::Vacant(_) => panic!("Error: attempting to free vacant block."),
            Block::Occupied(value) => {
                self.size -= 1;
                self.head = Some(*handle);
                value
            },
        }
    }

    /// Drops every object and releases all chunks.
    pub fn clear(&mut self) {
        debug!("clearing arena with {} live objects", self.size);
        self.head = None;
        self.chunks.clear();
        self.size = 0;
        self.capacity = 0;
    }

    pub fn get(&self, handle: &Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};
    use crate::error::Error;

    #[test]
    fn test_zero_chunk_size() {
        assert_eq!(
            TypedArena::<u32>::new(0).err(),
            Some(Error::InvalidArgument("arena chunk size must be non-zero")),
        );
    }

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(16).unwrap();
        arena.free(&Handle {
            chunk_index: 0,
            block_index: 0,
        });
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new(16).unwrap();
        let handle = arena.allocate(0);
        arena.free(&handle);
        arena.free(&handle);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2).unwrap();
        let handles: Vec<Handle> = (0..3).map(|i| arena.allocate(i)).collect();
        assert_eq!(
            handles[2],
            Handle {
                chunk_index: 1,
                block_index: 0,
            },
        );
        assert_eq!(arena.len(), 3);
        assert_eq!(arena[handles[0]], 0);
        assert_eq!(arena[handles[2]], 2);
    }

    #[test]
    fn test_free_reuses_slot() {
        let mut arena = TypedArena::new(16).unwrap();
        let first = arena.allocate(1);
        let second = arena.allocate(2);
        assert_eq!(arena.free(&first), 1);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.allocate(3), first);
        assert_eq!(arena[first], 3);
        assert_eq!(arena[second], 2);
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new(16).unwrap();
        let handle = arena.allocate(0);
        arena.free(&handle);
        assert_eq!(arena.get(&handle), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(16).unwrap();
        let handle = arena.allocate(0);
        *arena.get_mut(&handle).unwrap() = 1;
        assert_eq!(arena.get(&handle), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(2).unwrap();
        for i in 0..5 {
            arena.allocate(i);
        }
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(
            arena.allocate(7),
            Handle {
                chunk_index: 0,
                block_index: 0,
            },
        );
    }
}
