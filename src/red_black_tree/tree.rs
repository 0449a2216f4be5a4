use crate::arena::{Handle, TypedArena};
use crate::error::Result;
use crate::red_black_tree::node::{Color, Node, Side};
use log::trace;
use std::cmp::Ordering;
use std::mem;

pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// The red black tree engine shared by `RedBlackSet` and `RedBlackMap`.
///
/// The engine stores opaque payloads and never orders them itself. Insertion takes a comparator
/// over two payloads; lookups take a probe that reports where the target lies relative to a
/// stored payload (`Less` means the target belongs in the left subtree).
#[derive(Clone)]
pub struct Tree<T> {
    arena: TypedArena<Node<T>>,
    root: Option<Handle>,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Tree {
            arena: TypedArena::new(DEFAULT_CHUNK_SIZE)
                .expect("Expected default chunk size to be non-zero."),
            root: None,
        }
    }

    pub fn with_chunk_size(chunk_size: usize) -> Result<Self> {
        Ok(Tree {
            arena: TypedArena::new(chunk_size)?,
            root: None,
        })
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    fn color(&self, handle: Option<Handle>) -> Color {
        handle.map_or(Color::Black, |handle| self.arena[handle].color)
    }

    fn is_red(&self, handle: Option<Handle>) -> bool {
        self.color(handle) == Color::Red
    }

    fn set_color(&mut self, handle: Handle, color: Color) {
        self.arena[handle].color = color;
    }

    fn child(&self, handle: Handle, side: Side) -> Option<Handle> {
        self.arena[handle].child(side)
    }

    fn parent(&self, handle: Handle) -> Option<Handle> {
        self.arena[handle].parent
    }

    fn side_of(&self, child: Option<Handle>, parent: Handle) -> Side {
        if self.arena[parent].left == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    // Points the link that used to reference `old` at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(Some(old), parent);
                *self.arena[parent].child_mut(side) = new;
            },
        }
    }

    // Rotates the subtree rooted at `handle` toward `side`: the child on the opposite side takes
    // its place and `handle` becomes that child's `side` child. `Side::Left` is a left rotation.
    fn rotate(&mut self, handle: Handle, side: Side) {
        trace!("rotating {:?} {:?}", handle, side);
        let pivot = self
            .child(handle, side.opposite())
            .expect("Expected rotation pivot to be `Some`.");
        let inner = self.child(pivot, side);

        *self.arena[handle].child_mut(side.opposite()) = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(handle);
        }

        let parent = self.parent(handle);
        self.arena[pivot].parent = parent;
        self.replace_child(parent, handle, Some(pivot));

        *self.arena[pivot].child_mut(side) = Some(handle);
        self.arena[handle].parent = Some(pivot);
    }

    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.child(handle, side) {
            handle = child;
        }
        handle
    }

    fn find<F>(&self, mut probe: F) -> Option<Handle>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match probe(&node.payload) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Inserts `payload` if no stored payload compares equal to it and returns `true`.
    /// Otherwise calls `on_equal` with the stored payload and the rejected one and returns
    /// `false`; the shape of the tree is left untouched in that case.
    pub fn insert<F, G>(&mut self, payload: T, mut compare: F, on_equal: G) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
        G: FnOnce(&mut T, T),
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;
        while let Some(handle) = curr {
            side = match compare(&payload, &self.arena[handle].payload) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    on_equal(&mut self.arena[handle].payload, payload);
                    return false;
                },
            };
            parent = Some(handle);
            curr = self.child(handle, side);
        }

        let handle = self.arena.allocate(Node::new(payload, parent));
        match parent {
            None => self.root = Some(handle),
            Some(parent) => *self.arena[parent].child_mut(side) = Some(handle),
        }
        self.insert_fixup(handle);
        true
    }

    fn insert_fixup(&mut self, mut handle: Handle) {
        while let Some(parent) = self.parent(handle) {
            if !self.is_red(Some(parent)) {
                break;
            }
            // the root is black, so a red parent always has a parent of its own
            let grandparent = self
                .parent(parent)
                .expect("Expected red node to have a parent.");
            let side = self.side_of(Some(parent), grandparent);
            let uncle = self.child(grandparent, side.opposite());

            if let Some(uncle) = uncle.filter(|uncle| self.is_red(Some(*uncle))) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                handle = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.child(parent, side.opposite()) == Some(handle) {
                // inner child: lift it into the parent's slot to reach the outer case
                self.rotate(parent, side);
                parent = handle;
            }

            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Removes the payload matched by `probe` and returns it.
    pub fn remove<F>(&mut self, probe: F) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let target = self.find(probe)?;

        // the node that is physically unlinked has at most one child
        let spliced = match (self.arena[target].left, self.arena[target].right) {
            (Some(_), Some(right)) => self.extreme(right, Side::Left),
            _ => target,
        };
        let node = &self.arena[spliced];
        let child = node.left.or(node.right);
        let parent = node.parent;

        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
        self.replace_child(parent, spliced, child);

        let Node { payload, color, .. } = self.arena.free(&spliced);
        let removed = if spliced == target {
            payload
        } else {
            mem::replace(&mut self.arena[target].payload, payload)
        };

        if color == Color::Black {
            self.remove_fixup(child, parent);
        }
        Some(removed)
    }

    // `handle` carries a double black deficiency. It may be the empty sentinel, so its parent
    // is tracked separately.
    fn remove_fixup(&mut self, mut handle: Option<Handle>, mut parent: Option<Handle>) {
        while handle != self.root && !self.is_red(handle) {
            let curr_parent = match parent {
                Some(parent) => parent,
                None => break,
            };
            let side = self.side_of(handle, curr_parent);
            let mut sibling = self
                .child(curr_parent, side.opposite())
                .expect("Expected doubly black node to have a sibling.");

            if self.is_red(Some(sibling)) {
                self.set_color(sibling, Color::Black);
                self.set_color(curr_parent, Color::Red);
                self.rotate(curr_parent, side);
                sibling = self
                    .child(curr_parent, side.opposite())
                    .expect("Expected doubly black node to have a sibling.");
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());
            if !self.is_red(near) && !self.is_red(far) {
                trace!("pushing black deficiency up to {:?}", curr_parent);
                self.set_color(sibling, Color::Red);
                handle = Some(curr_parent);
                parent = self.parent(curr_parent);
                continue;
            }

            if !self.is_red(far) {
                let near = near.expect("Expected red nephew to be `Some`.");
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = self
                    .child(curr_parent, side.opposite())
                    .expect("Expected doubly black node to have a sibling.");
            }

            let far = self
                .child(sibling, side.opposite())
                .expect("Expected red nephew to be `Some`.");
            let parent_color = self.arena[curr_parent].color;
            self.set_color(sibling, parent_color);
            self.set_color(curr_parent, Color::Black);
            self.set_color(far, Color::Black);
            self.rotate(curr_parent, side);
            handle = self.root;
        }

        if let Some(handle) = handle {
            self.set_color(handle, Color::Black);
        }
    }

    pub fn get<F>(&self, probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.find(probe).map(|handle| &self.arena[handle].payload)
    }

    pub fn get_mut<F>(&mut self, probe: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let handle = self.find(probe)?;
        Some(&mut self.arena[handle].payload)
    }

    /// Returns the greatest payload that is less than or equal to the probe's target.
    pub fn floor<F>(&self, mut probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut curr = self.root;
        let mut best = None;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match probe(&node.payload) {
                Ordering::Less => node.left,
                Ordering::Greater => {
                    best = Some(&node.payload);
                    node.right
                },
                Ordering::Equal => return Some(&node.payload),
            };
        }
        best
    }

    /// Returns the least payload that is greater than or equal to the probe's target.
    pub fn ceil<F>(&self, mut probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut curr = self.root;
        let mut best = None;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match probe(&node.payload) {
                Ordering::Greater => node.right,
                Ordering::Less => {
                    best = Some(&node.payload);
                    node.left
                },
                Ordering::Equal => return Some(&node.payload),
            };
        }
        best
    }

    pub fn min(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[self.extreme(root, Side::Left)].payload)
    }

    pub fn max(&self) -> Option<&T> {
        self.root
            .map(|root| &self.arena[self.extreme(root, Side::Right)].payload)
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height: usize = 0;
        let mut stack: Vec<(Handle, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.arena[handle];
            for child in node.left.iter().chain(node.right.iter()) {
                stack.push((*child, depth + 1));
            }
        }
        height
    }

    pub fn iter(&self) -> TreeIter<'_, T> {
        TreeIter {
            tree: self,
            current: self.root,
            stack: Vec::new(),
            remaining: self.len(),
        }
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for Tree<T> {
    type IntoIter = TreeIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        let current = self.root;
        TreeIntoIter {
            tree: self,
            current,
            stack: Vec::new(),
        }
    }
}

/// An in-order iterator over the payloads of a `Tree<T>`.
pub struct TreeIter<'a, T> {
    tree: &'a Tree<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
    remaining: usize,
}

impl<'a, T> Iterator for TreeIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = tree.arena[handle].left;
        }
        self.stack.pop().map(|handle| {
            let node = &tree.arena[handle];
            self.current = node.right;
            self.remaining -= 1;
            &node.payload
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for TreeIter<'a, T> where T: 'a {}

/// An owning in-order iterator over the payloads of a `Tree<T>`.
pub struct TreeIntoIter<T> {
    tree: Tree<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<T> Iterator for TreeIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.tree.arena[handle].left;
        }
        self.stack.pop().map(|handle| {
            let node = self.tree.arena.free(&handle);
            self.current = node.right;
            node.payload
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tree.len();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for TreeIntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::Tree;
    use crate::arena::Handle;
    use crate::red_black_tree::node::Color;
    use rand::{Rng, SeedableRng, XorShiftRng};
    use std::collections::BTreeSet;

    fn insert(tree: &mut Tree<u32>, value: u32) -> bool {
        tree.insert(value, |a, b| a.cmp(b), |_, _| {})
    }

    fn remove(tree: &mut Tree<u32>, value: u32) -> Option<u32> {
        tree.remove(|payload| value.cmp(payload))
    }

    // Returns the black height of the subtree rooted at `handle`.
    fn check_subtree(tree: &Tree<u32>, handle: Option<Handle>, parent: Option<Handle>) -> usize {
        let handle = match handle {
            Some(handle) => handle,
            None => return 1,
        };
        let node = &tree.arena[handle];
        assert_eq!(node.parent, parent, "parent link is stale");
        if node.color == Color::Red {
            assert!(!tree.is_red(node.left), "red node has a red left child");
            assert!(!tree.is_red(node.right), "red node has a red right child");
        }
        let left_height = check_subtree(tree, node.left, Some(handle));
        let right_height = check_subtree(tree, node.right, Some(handle));
        assert_eq!(left_height, right_height, "black height differs between subtrees");
        left_height + if node.color == Color::Black { 1 } else { 0 }
    }

    fn check_invariants(tree: &Tree<u32>) {
        assert!(!tree.is_red(tree.root), "root is red");
        check_subtree(tree, tree.root, None);

        let values: Vec<u32> = tree.iter().cloned().collect();
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(values.len(), tree.len());
        assert_eq!(tree.len() == 0, tree.root.is_none());
    }

    #[test]
    fn test_empty() {
        let tree: Tree<u32> = Tree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
        assert_eq!(tree.height(), 0);
        check_invariants(&tree);
    }

    #[test]
    fn test_zero_chunk_size() {
        assert!(Tree::<u32>::with_chunk_size(0).is_err());
    }

    #[test]
    fn test_insert_root_is_black() {
        let mut tree = Tree::new();
        assert!(insert(&mut tree, 1));
        assert_eq!(tree.color(tree.root), Color::Black);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_insert_duplicate_calls_hook() {
        let mut tree: Tree<(u32, char)> = Tree::new();
        assert!(tree.insert((1, 'a'), |a, b| a.0.cmp(&b.0), |_, _| {}));
        assert!(!tree.insert((1, 'b'), |a, b| a.0.cmp(&b.0), |old, new| *old = new));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(|payload| 1u32.cmp(&payload.0)), Some(&(1, 'b')));
    }

    #[test]
    fn test_insert_ascending_is_balanced() {
        let mut tree = Tree::new();
        for i in 1..=1000 {
            assert!(insert(&mut tree, i));
            check_invariants(&tree);
        }
        assert!(tree.height() as f64 <= 2.0 * (1001f64).log2());
    }

    #[test]
    fn test_insert_fixup_cases() {
        // zig-zag inserts exercise the inner child rotation on both sides
        let mut tree = Tree::new();
        for value in &[10, 5, 7, 20, 15, 3, 4, 25, 30, 1] {
            insert(&mut tree, *value);
            check_invariants(&tree);
        }
        assert_eq!(
            tree.iter().cloned().collect::<Vec<u32>>(),
            vec![1, 3, 4, 5, 7, 10, 15, 20, 25, 30],
        );
    }

    #[test]
    fn test_remove_missing() {
        let mut tree = Tree::new();
        for value in &[5, 3, 7] {
            insert(&mut tree, *value);
        }
        let height = tree.height();
        assert_eq!(remove(&mut tree, 4), None);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.height(), height);
        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), vec![3, 5, 7]);
    }

    #[test]
    fn test_remove_root_repeatedly() {
        let mut tree = Tree::new();
        for value in &[4, 2, 6, 1, 3, 5, 7] {
            insert(&mut tree, *value);
        }
        check_invariants(&tree);

        let mut expected: BTreeSet<u32> = (1..=7).collect();
        while let Some(root) = tree.root {
            let value = tree.arena[root].payload;
            assert_eq!(remove(&mut tree, value), Some(value));
            expected.remove(&value);
            check_invariants(&tree);
            assert_eq!(
                tree.iter().cloned().collect::<Vec<u32>>(),
                expected.iter().cloned().collect::<Vec<u32>>(),
            );
        }
        assert!(tree.is_empty());
        assert!(expected.is_empty());
    }

    #[test]
    fn test_remove_successor_keeps_other_payloads() {
        let mut tree = Tree::new();
        for value in 0..32 {
            insert(&mut tree, value);
        }
        for value in (0..32u32).filter(|value| value % 3 == 0) {
            assert_eq!(remove(&mut tree, value), Some(value));
            check_invariants(&tree);
        }
        for value in 0..32u32 {
            let expected = if value % 3 == 0 { None } else { Some(&value) };
            assert_eq!(tree.get(|payload| value.cmp(payload)), expected);
        }
    }

    #[test]
    fn test_remove_reuses_arena_slots() {
        let mut tree = Tree::with_chunk_size(4).unwrap();
        for value in 0..4 {
            insert(&mut tree, value);
        }
        remove(&mut tree, 2);
        insert(&mut tree, 9);
        assert_eq!(tree.arena.chunk_size(), 4);
        assert_eq!(tree.len(), 4);
        check_invariants(&tree);
    }

    #[test]
    fn test_random_operations() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = Tree::new();
        let mut expected = BTreeSet::new();

        for _ in 0..2000 {
            let value = rng.gen_range(0, 200);
            if rng.gen::<bool>() {
                assert_eq!(insert(&mut tree, value), expected.insert(value));
            } else {
                assert_eq!(remove(&mut tree, value).is_some(), expected.remove(&value));
            }
            check_invariants(&tree);
        }

        assert_eq!(
            tree.iter().cloned().collect::<Vec<u32>>(),
            expected.into_iter().collect::<Vec<u32>>(),
        );
    }

    #[test]
    fn test_floor_ceil() {
        let mut tree = Tree::new();
        for value in &[1, 3, 5] {
            insert(&mut tree, *value);
        }
        let floor = |target: u32| tree.floor(|payload: &u32| target.cmp(payload)).cloned();
        assert_eq!(floor(0), None);
        assert_eq!(floor(2), Some(1));
        assert_eq!(floor(5), Some(5));
        assert_eq!(floor(6), Some(5));

        let ceil = |target: u32| tree.ceil(|payload: &u32| target.cmp(payload)).cloned();
        assert_eq!(ceil(0), Some(1));
        assert_eq!(ceil(4), Some(5));
        assert_eq!(ceil(6), None);
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut tree = Tree::new();
        for value in &[2, 1, 3] {
            insert(&mut tree, *value);
        }
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.len(), 2);
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    }

    #[test]
    fn test_into_iter() {
        let mut tree = Tree::new();
        for value in &[4, 2, 6, 1, 3, 5, 7] {
            insert(&mut tree, *value);
        }
        assert_eq!(
            tree.into_iter().collect::<Vec<u32>>(),
            vec![1, 2, 3, 4, 5, 6, 7],
        );
    }

    #[test]
    fn test_clear() {
        let mut tree = Tree::new();
        for value in 0..10 {
            insert(&mut tree, value);
        }
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.iter().next(), None);
        assert!(insert(&mut tree, 3));
        check_invariants(&tree);
    }

    #[test]
    fn test_custom_order() {
        let mut tree = Tree::new();
        for value in &[1u32, 5, 3] {
            tree.insert(*value, |a, b| b.cmp(a), |_, _| {});
        }
        assert_eq!(tree.min(), Some(&5));
        assert_eq!(tree.max(), Some(&1));
        assert_eq!(
            tree.remove(|payload: &u32| payload.cmp(&3)),
            Some(3),
        );
    }
}
