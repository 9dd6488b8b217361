//! Binary heap kept as a linked complete tree instead of an array.
//!
//! There is no slot arithmetic, so the node in the last level-order position
//! is found by walking down from the root and deciding at each level which
//! subtree holds it (see [`get_last`]). Repairs move whole nodes with
//! [`Arena::swap`]; a value never changes its node.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::bst::check_links;
use crate::compare::{Comparator, HeapType, NaturalOrder};
use crate::error::TreeError;
use crate::node::{Arena, NodeId};
use crate::render;
use crate::stats::OpStats;

/// Node count of a perfect tree with `levels` levels.
fn perfect(levels: u32) -> usize {
    (1usize << levels) - 1
}

/// Locate level-order position `size` (1-based) in a complete tree.
///
/// Returns the node at that position and its parent. Asking for `len + 1`
/// yields `(NIL, parent)` where `parent` is the node the next insertion hangs
/// from.
///
/// At every level the subtree holding `size` positions has `h` levels. If the
/// bottom level is at most half full the target lies on the left and the
/// right subtree is perfect with `h - 2` levels; otherwise the left subtree
/// is perfect with `h - 1` levels. Skipping the root plus that perfect
/// subtree leaves the position within the chosen child.
pub fn get_last<T, C>(arena: &Arena<T, C>, root: NodeId, size: usize) -> (NodeId, NodeId) {
    let mut node = root;
    let mut parent = NodeId::NIL;
    let mut remaining = size;
    while remaining > 1 {
        let h = usize::BITS - remaining.leading_zeros();
        let small = perfect(h - 2);
        let large = perfect(h - 1);
        let flip = (large + perfect(h)) / 2;
        parent = node;
        if remaining <= flip {
            node = arena.left(node);
            remaining -= small + 1;
        } else {
            node = arena.right(node);
            remaining -= large + 1;
        }
    }
    (node, parent)
}

/// Move `node` toward the root until its parent precedes it.
pub fn bubble_up<T, C: Comparator<T>>(arena: &mut Arena<T, C>, mut root: NodeId, node: NodeId) -> NodeId {
    loop {
        let parent = arena.parent(node);
        if parent.is_nil() || arena.compare(parent, node) == Ordering::Less {
            return root;
        }
        root = arena.swap(root, parent, node);
    }
}

/// Move `node` toward the leaves until it precedes both children.
pub fn bubble_down<T, C: Comparator<T>>(arena: &mut Arena<T, C>, mut root: NodeId, node: NodeId) -> NodeId {
    loop {
        let left = arena.left(node);
        if left.is_nil() {
            return root;
        }
        let right = arena.right(node);
        let child = if !right.is_nil() && arena.compare(left, right) == Ordering::Greater {
            right
        } else {
            left
        };
        if arena.compare(node, child) == Ordering::Less {
            return root;
        }
        root = arena.swap(root, node, child);
    }
}

/// Hang the detached node `z` in position `size + 1` and restore heap order.
pub fn insert<T, C: Comparator<T>>(arena: &mut Arena<T, C>, root: NodeId, size: usize, z: NodeId) -> NodeId {
    let (_, parent) = get_last(arena, root, size + 1);
    if parent.is_nil() {
        return z;
    }
    if arena.left(parent).is_nil() {
        arena.set_left(parent, z);
    } else {
        arena.set_right(parent, z);
    }
    arena.set_parent(z, parent);
    bubble_up(arena, root, z)
}

/// Unlink the top of a heap holding `size` nodes. The old top is left
/// detached but allocated; the new root is returned.
pub fn remove_top<T, C: Comparator<T>>(arena: &mut Arena<T, C>, root: NodeId, size: usize) -> NodeId {
    let top = root;
    if size == 1 {
        arena.detach(top);
        return NodeId::NIL;
    }
    let (last, _) = get_last(arena, root, size);
    let root = arena.swap(root, top, last);
    let parent = arena.parent(top);
    arena.replace_child(parent, top, NodeId::NIL);
    arena.detach(top);
    bubble_down(arena, root, last)
}

/// Priority queue over a linked complete binary tree.
pub struct HeapTree<T, C = NaturalOrder> {
    arena: Arena<T, C>,
    root: NodeId,
    size: usize,
}

impl<T: Ord> HeapTree<T> {
    pub fn new(heap_type: HeapType) -> Self {
        Self::with_order(NaturalOrder, heap_type)
    }
}

impl<T, C: Comparator<T>> HeapTree<T, C> {
    pub fn with_order(cmp: C, heap_type: HeapType) -> Self {
        Self {
            arena: Arena::new(cmp, heap_type),
            root: NodeId::NIL,
            size: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> NodeId {
        let node = self.arena.alloc(value);
        self.root = insert(&mut self.arena, self.root, self.size, node);
        self.size += 1;
        node
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.root.is_nil() {
            return None;
        }
        let top = self.root;
        self.root = remove_top(&mut self.arena, self.root, self.size);
        self.size -= 1;
        Some(self.arena.free(top))
    }

    pub fn peek(&self) -> Option<&T> {
        if self.root.is_nil() {
            None
        } else {
            Some(self.arena.value(self.root))
        }
    }

    /// Links, heap order and complete shape.
    pub fn validate(&self) -> Result<(), TreeError> {
        let count = check_links(&self.arena, self.root, "heaptree")?;
        if count != self.size {
            return Err(TreeError::invariant(
                "heaptree",
                format!("{} reachable nodes but size is {}", count, self.size),
            ));
        }

        let mut queue = VecDeque::from([self.root]);
        let mut seen_gap = false;
        while let Some(id) = queue.pop_front() {
            if id.is_nil() {
                seen_gap = true;
                continue;
            }
            if seen_gap {
                return Err(TreeError::invariant(
                    "heaptree",
                    format!("{} follows an empty slot in level order", id),
                ));
            }
            let node = self.arena.raw(id);
            for child in [node.left, node.right] {
                if !child.is_nil() && self.arena.compare_quiet(id, child) != Ordering::Less {
                    return Err(TreeError::invariant(
                        "heaptree",
                        format!("{} does not precede its child {}", id, child),
                    ));
                }
            }
            queue.push_back(node.left);
            queue.push_back(node.right);
        }
        Ok(())
    }
}

impl<T, C> HeapTree<T, C> {
    pub fn heap_type(&self) -> HeapType {
        self.arena.heap_type()
    }

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

    /// Node in the last level-order position.
    pub fn last(&self) -> Option<NodeId> {
        if self.size == 0 {
            return None;
        }
        Some(get_last(&self.arena, self.root, self.size).0)
    }

    pub fn to_tuple(&self, label: &dyn Fn(&T) -> String) -> String {
        render::tuple(&self.arena, self.root, label, false)
    }

    pub fn stats(&self) -> OpStats {
        self.arena.stats()
    }

    pub fn reset_stats(&self) {
        self.arena.reset_stats();
    }
}
