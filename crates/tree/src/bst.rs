//! Unbalanced binary search tree (CLRS chapter 12) over an [`Arena`].
//!
//! The free functions take the arena and the current root and return the new
//! root; the red-black tree builds on them.

use std::cmp::Ordering;

use crate::compare::{Comparator, HeapType, NaturalOrder};
use crate::error::TreeError;
use crate::node::{Arena, NodeId};
use crate::render::{self, WalkOrder};
use crate::stats::OpStats;

/// Find a node whose key equals `value`.
pub fn search<T, C: Comparator<T>>(arena: &Arena<T, C>, root: NodeId, value: &T) -> Option<NodeId> {
    let mut x = root;
    while !x.is_nil() {
        match arena.compare_key(x, value) {
            Ordering::Equal => return Some(x),
            Ordering::Greater => x = arena.left(x),
            Ordering::Less => x = arena.right(x),
        }
    }
    None
}

/// Leftmost node of the subtree rooted at the non-sentinel `x`.
pub(crate) fn subtree_min<T, C>(arena: &Arena<T, C>, mut x: NodeId) -> NodeId {
    loop {
        let left = arena.left(x);
        if left.is_nil() {
            return x;
        }
        x = left;
    }
}

pub fn min<T, C>(arena: &Arena<T, C>, root: NodeId) -> Option<NodeId> {
    if root.is_nil() {
        return None;
    }
    Some(subtree_min(arena, root))
}

pub fn max<T, C>(arena: &Arena<T, C>, root: NodeId) -> Option<NodeId> {
    if root.is_nil() {
        return None;
    }
    let mut x = root;
    loop {
        let right = arena.right(x);
        if right.is_nil() {
            return Some(x);
        }
        x = right;
    }
}

/// Attach the detached node `z` as a leaf. Equal keys go right, so in-order
/// position follows insertion order.
pub fn insert<T, C: Comparator<T>>(arena: &mut Arena<T, C>, root: NodeId, z: NodeId) -> NodeId {
    let mut y = NodeId::NIL;
    let mut x = root;
    while !x.is_nil() {
        y = x;
        x = if arena.compare(z, x) == Ordering::Less {
            arena.left(x)
        } else {
            arena.right(x)
        };
    }

    arena.set_parent(z, y);
    if y.is_nil() {
        return z;
    }
    if arena.compare(z, y) == Ordering::Less {
        arena.set_left(y, z);
    } else {
        arena.set_right(y, z);
    }
    root
}

/// Replace the subtree rooted at `dst` with the one rooted at `src`.
///
/// `src`'s parent is written even when `src` is the sentinel; red-black
/// deletion reads it back.
pub fn transplant<T, C>(arena: &mut Arena<T, C>, root: NodeId, dst: NodeId, src: NodeId) -> NodeId {
    let parent = arena.parent(dst);
    let root = if parent.is_nil() {
        src
    } else {
        arena.replace_child(parent, dst, src);
        root
    };
    arena.set_parent(src, parent);
    root
}

/// Unlink `z` from the tree. `z` is left detached but still allocated.
pub fn remove<T, C>(arena: &mut Arena<T, C>, root: NodeId, z: NodeId) -> NodeId {
    let mut root = root;
    let z_left = arena.left(z);
    let z_right = arena.right(z);

    if z_left.is_nil() {
        root = transplant(arena, root, z, z_right);
    } else if z_right.is_nil() {
        root = transplant(arena, root, z, z_left);
    } else {
        let y = subtree_min(arena, z_right);
        if arena.parent(y) != z {
            let y_right = arena.right(y);
            root = transplant(arena, root, y, y_right);
            arena.set_right(y, z_right);
            arena.set_parent(z_right, y);
        }
        root = transplant(arena, root, z, y);
        arena.set_left(y, z_left);
        arena.set_parent(z_left, y);
    }

    arena.set_parent(NodeId::NIL, NodeId::NIL);
    arena.detach(z);
    root
}

/// Parent links agree with child links and the root has no parent.
pub(crate) fn check_links<T, C>(
    arena: &Arena<T, C>,
    root: NodeId,
    structure: &'static str,
) -> Result<usize, TreeError> {
    if root.is_nil() {
        return Ok(0);
    }
    if !arena.raw(root).parent.is_nil() {
        return Err(TreeError::invariant(structure, format!("root {} has a parent", root)));
    }
    let mut count = 0;
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        count += 1;
        let node = arena.raw(n);
        for child in [node.left, node.right] {
            if child.is_nil() {
                continue;
            }
            if arena.raw(child).parent != n {
                return Err(TreeError::invariant(
                    structure,
                    format!("{} is a child of {} but points at {}", child, n, arena.raw(child).parent),
                ));
            }
            stack.push(child);
        }
    }
    Ok(count)
}

/// In-order traversal is strictly increasing under the structural order.
pub(crate) fn check_inorder<T, C: Comparator<T>>(
    arena: &Arena<T, C>,
    root: NodeId,
    structure: &'static str,
) -> Result<(), TreeError> {
    let order = render::walk(arena, root, WalkOrder::In);
    for pair in order.windows(2) {
        if arena.compare_quiet(pair[0], pair[1]) != Ordering::Less {
            return Err(TreeError::invariant(
                structure,
                format!("in-order walk out of order at {} -> {}", pair[0], pair[1]),
            ));
        }
    }
    Ok(())
}

/// Binary search tree keyed by an injected comparator.
pub struct Bst<T, C = NaturalOrder> {
    arena: Arena<T, C>,
    root: NodeId,
    size: usize,
}

impl<T: Ord> Bst<T> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Ord> Default for Bst<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> Bst<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_order(cmp, HeapType::Min)
    }

    /// `HeapType::Max` flips the comparator, so `min()` yields the largest key.
    pub fn with_order(cmp: C, heap_type: HeapType) -> Self {
        Self {
            arena: Arena::new(cmp, heap_type),
            root: NodeId::NIL,
            size: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> NodeId {
        let node = self.arena.alloc(value);
        self.root = insert(&mut self.arena, self.root, node);
        self.size += 1;
        node
    }

    /// Remove `node` and return its value.
    ///
    /// # Panics
    /// If `node` is not a live node of this tree.
    pub fn remove(&mut self, node: NodeId) -> T {
        assert!(self.arena.contains(node), "node {} is not in this tree", node);
        self.root = remove(&mut self.arena, self.root, node);
        self.size -= 1;
        self.arena.free(node)
    }

    pub fn search(&self, value: &T) -> Option<NodeId> {
        search(&self.arena, self.root, value)
    }

    pub fn min(&self) -> Option<NodeId> {
        min(&self.arena, self.root)
    }

    pub fn max(&self) -> Option<NodeId> {
        max(&self.arena, self.root)
    }

    pub fn value(&self, node: NodeId) -> &T {
        self.arena.value(node)
    }

    pub fn validate(&self) -> Result<(), TreeError> {
        let count = check_links(&self.arena, self.root, "bst")?;
        if count != self.size {
            return Err(TreeError::invariant(
                "bst",
                format!("{} reachable nodes but size is {}", count, self.size),
            ));
        }
        check_inorder(&self.arena, self.root, "bst")
    }
}

impl<T, C> Bst<T, C> {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn arena(&self) -> &Arena<T, C> {
        &self.arena
    }

    pub fn walk(&self, order: WalkOrder) -> Vec<&T> {
        render::walk(&self.arena, self.root, order)
            .into_iter()
            .map(|id| render::value_of(&self.arena, id))
            .collect()
    }

    pub fn stats(&self) -> OpStats {
        self.arena.stats()
    }

    pub fn reset_stats(&self) {
        self.arena.reset_stats();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tree_of(values: &[i32]) -> Bst<i32> {
        let mut t = Bst::new();
        for &v in values {
            t.insert(v);
        }
        t
    }

    fn tuple(t: &Bst<i32>) -> String {
        render::tuple(t.arena(), t.root(), &|v: &i32| v.to_string(), false)
    }

    #[test]
    fn insert_shapes() {
        let t = tree_of(&[5]);
        assert_eq!(tuple(&t), "[5 NIL NIL]");

        let t = tree_of(&[5, 3, 8]);
        assert_eq!(tuple(&t), "[5 [3 NIL NIL] [8 NIL NIL]]");

        let t = tree_of(&[5, 3, 8, 4, 1]);
        assert_eq!(tuple(&t), "[5 [3 [1 NIL NIL] [4 NIL NIL]] [8 NIL NIL]]");
        assert_eq!(t.len(), 5);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn walks() {
        let t = tree_of(&[5, 3, 8, 4, 1]);
        assert_eq!(t.walk(WalkOrder::In), vec![&1, &3, &4, &5, &8]);
        assert_eq!(t.walk(WalkOrder::Pre), vec![&5, &3, &1, &4, &8]);
        assert_eq!(t.walk(WalkOrder::Post), vec![&1, &4, &3, &8, &5]);
        assert!(tree_of(&[]).walk(WalkOrder::In).is_empty());
    }

    #[test]
    fn search_min_max() {
        let t = tree_of(&[50, 25, 75, 10, 30, 60, 90]);
        let found = t.search(&30).unwrap();
        assert_eq!(*t.value(found), 30);
        assert!(t.search(&31).is_none());
        assert_eq!(*t.value(t.min().unwrap()), 10);
        assert_eq!(*t.value(t.max().unwrap()), 90);

        let empty: Bst<i32> = Bst::new();
        assert!(empty.min().is_none());
        assert!(empty.max().is_none());
        assert!(empty.search(&1).is_none());
    }

    #[test]
    fn remove_leaf_single_child_and_two_children() {
        let mut t = tree_of(&[50, 25, 75, 10, 30, 60, 90, 55]);

        // Leaf.
        let n = t.search(&10).unwrap();
        assert_eq!(t.remove(n), 10);
        assert_eq!(tuple(&t), "[50 [25 NIL [30 NIL NIL]] [75 [60 [55 NIL NIL] NIL] [90 NIL NIL]]]");

        // Only a right child.
        let n = t.search(&25).unwrap();
        t.remove(n);
        assert_eq!(tuple(&t), "[50 [30 NIL NIL] [75 [60 [55 NIL NIL] NIL] [90 NIL NIL]]]");

        // Two children, successor deeper than the right child.
        let n = t.search(&50).unwrap();
        t.remove(n);
        assert_eq!(tuple(&t), "[55 [30 NIL NIL] [75 [60 NIL NIL] [90 NIL NIL]]]");

        // Two children, successor is the immediate right child.
        let n = t.search(&75).unwrap();
        t.remove(n);
        assert_eq!(tuple(&t), "[55 [30 NIL NIL] [90 [60 NIL NIL] NIL]]");
        assert!(t.validate().is_ok());
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn remove_root_until_empty() {
        let mut t = tree_of(&[2, 1, 3]);
        while !t.root().is_nil() {
            let root = t.root();
            t.remove(root);
            assert!(t.validate().is_ok());
        }
        assert!(t.is_empty());
        assert_eq!(tuple(&t), "NIL");
    }

    #[test]
    fn equal_keys_come_out_in_insertion_order() {
        let mut t = Bst::with_comparator(|a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
        for item in [(1, 'a'), (0, 'x'), (1, 'b'), (1, 'c')] {
            t.insert(item);
        }
        let mut out = Vec::new();
        while let Some(n) = t.min() {
            out.push(t.remove(n).1);
        }
        assert_eq!(out, vec!['x', 'a', 'b', 'c']);
    }

    #[test]
    fn max_orientation_flips_min() {
        let mut t = Bst::with_order(NaturalOrder, HeapType::Max);
        for v in [3, 9, 1, 7] {
            t.insert(v);
        }
        assert_eq!(*t.value(t.min().unwrap()), 9);
        assert_eq!(t.walk(WalkOrder::In), vec![&9, &7, &3, &1]);
    }

    #[test]
    #[should_panic(expected = "not in this tree")]
    fn removing_a_foreign_node_panics() {
        let mut t = tree_of(&[1, 2]);
        let n = t.search(&2).unwrap();
        t.remove(n);
        t.remove(n);
    }

    #[test]
    #[should_panic(expected = "not in this tree")]
    fn removing_a_handle_from_another_tree_panics() {
        let a = tree_of(&[1, 2]);
        let mut b = tree_of(&[50, 60]);
        let n = a.search(&1).unwrap();
        b.remove(n);
    }

    #[test]
    #[should_panic(expected = "not in this tree")]
    fn removing_a_stale_handle_panics() {
        let mut t = tree_of(&[1, 2]);
        let stale = t.search(&1).unwrap();
        t.remove(stale);
        let reused = t.insert(7);
        assert_eq!(reused.index(), stale.index());
        t.remove(stale);
    }

    #[test]
    fn random_insert_remove_keeps_order() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut t = Bst::new();
        let mut shadow: Vec<i32> = Vec::new();
        for _ in 0..2_000 {
            if shadow.is_empty() || rng.gen_bool(0.6) {
                let v = rng.gen_range(0..200);
                t.insert(v);
                shadow.push(v);
            } else {
                let v = shadow.swap_remove(rng.gen_range(0..shadow.len()));
                let n = t.search(&v).unwrap();
                assert_eq!(t.remove(n), v);
            }
        }
        t.validate().unwrap();
        shadow.sort();
        let walked: Vec<i32> = t.walk(WalkOrder::In).into_iter().copied().collect();
        assert_eq!(walked, shadow);
    }
}
