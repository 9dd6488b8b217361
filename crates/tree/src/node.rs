//! Arena-backed linked nodes shared by the BST, red-black tree and pointer heap.
//!
//! Relations are [`NodeId`]s into the arena. Slot 0 is the sentinel
//! ([`NodeId::NIL`]): it stands in for every missing child or parent, has no
//! value and is always black. Its parent may be set transiently by red-black
//! deletion.

use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use serde::{Deserialize, Serialize};

use crate::compare::{Comparator, HeapType, KeyOrder};
use crate::stats::{Field, OpStats, StatsRecorder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Single-letter tag used in tuple renderings.
    pub fn tag(self) -> &'static str {
        match self {
            Color::Red => "r",
            Color::Black => "b",
        }
    }
}

/// Source of per-arena owner tags. Zero is reserved for the sentinel.
static NEXT_ARENA: AtomicU64 = AtomicU64::new(1);

/// Stable handle to a node inside an [`Arena`].
///
/// Besides the slot index a handle carries the owning arena's tag and the
/// node's sequence number, so a handle from another arena, or one whose slot
/// has since been freed and reused, is not [`Arena::contains`]-ed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    arena: u64,
    seq: u64,
}

impl NodeId {
    pub const NIL: NodeId = NodeId { index: 0, arena: 0, seq: 0 };

    #[inline]
    pub fn is_nil(self) -> bool {
        self.index == 0
    }

    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            f.write_str("NIL")
        } else {
            write!(f, "n{}", self.index)
        }
    }
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: Option<T>,
    pub(crate) seq: u64,
    pub(crate) color: Color,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Self {
            value: None,
            seq: 0,
            color: Color::Black,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }
}

pub struct Arena<T, C> {
    id: u64,
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    next_seq: u64,
    order: KeyOrder<C>,
    stats: StatsRecorder,
}

impl<T, C> Arena<T, C> {
    pub fn new(cmp: C, heap_type: HeapType) -> Self {
        Self {
            id: NEXT_ARENA.fetch_add(1, AtomicOrdering::Relaxed),
            nodes: vec![Node::sentinel()],
            free: Vec::new(),
            next_seq: 0,
            order: KeyOrder::new(cmp, heap_type),
            stats: StatsRecorder::default(),
        }
    }

    pub fn heap_type(&self) -> HeapType {
        self.order.heap_type()
    }

    /// Number of live (allocated, not freed) nodes.
    pub fn live(&self) -> usize {
        self.nodes.len() - 1 - self.free.len()
    }

    /// Create a detached black node holding `value`.
    pub fn alloc(&mut self, value: T) -> NodeId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let node = Node {
            value: Some(value),
            seq,
            color: Color::Black,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        NodeId {
            index,
            arena: self.id,
            seq,
        }
    }

    /// Release a node that has already been unlinked and hand back its value.
    pub fn free(&mut self, id: NodeId) -> T {
        assert!(!id.is_nil(), "cannot free the sentinel");
        assert!(self.contains(id), "node {} is stale or from another arena", id);
        let node = &mut self.nodes[id.index];
        let value = node.value.take().expect("node freed twice");
        node.parent = NodeId::NIL;
        node.left = NodeId::NIL;
        node.right = NodeId::NIL;
        self.free.push(id.index);
        value
    }

    pub(crate) fn raw(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.index]
    }

    /// True when `id` was handed out by this arena and its node is still live.
    pub fn contains(&self, id: NodeId) -> bool {
        !id.is_nil()
            && id.arena == self.id
            && self
                .nodes
                .get(id.index)
                .is_some_and(|n| n.value.is_some() && n.seq == id.seq)
    }

    pub fn value(&self, id: NodeId) -> &T {
        self.stats.read(Field::Value);
        self.nodes[id.index]
            .value
            .as_ref()
            .expect("sentinel or freed node has no value")
    }

    pub fn seq(&self, id: NodeId) -> u64 {
        self.nodes[id.index].seq
    }

    #[inline]
    pub fn color(&self, id: NodeId) -> Color {
        self.stats.read(Field::Color);
        self.nodes[id.index].color
    }

    #[inline]
    pub fn set_color(&mut self, id: NodeId, color: Color) {
        debug_assert!(
            !(id.is_nil() && color == Color::Red),
            "sentinel must stay black"
        );
        self.stats.write(Field::Color);
        self.nodes[id.index].color = color;
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.stats.read(Field::Parent);
        self.nodes[id.index].parent
    }

    #[inline]
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.stats.write(Field::Parent);
        self.nodes[id.index].parent = parent;
    }

    #[inline]
    pub fn left(&self, id: NodeId) -> NodeId {
        self.stats.read(Field::Left);
        self.nodes[id.index].left
    }

    #[inline]
    pub fn set_left(&mut self, id: NodeId, left: NodeId) {
        debug_assert!(!id.is_nil(), "sentinel has no children");
        self.stats.write(Field::Left);
        self.nodes[id.index].left = left;
    }

    #[inline]
    pub fn right(&self, id: NodeId) -> NodeId {
        self.stats.read(Field::Right);
        self.nodes[id.index].right
    }

    #[inline]
    pub fn set_right(&mut self, id: NodeId, right: NodeId) {
        debug_assert!(!id.is_nil(), "sentinel has no children");
        self.stats.write(Field::Right);
        self.nodes[id.index].right = right;
    }

    /// Clear every relation of `id`.
    pub(crate) fn detach(&mut self, id: NodeId) {
        self.set_parent(id, NodeId::NIL);
        self.set_left(id, NodeId::NIL);
        self.set_right(id, NodeId::NIL);
    }

    /// Point `parent`'s link that currently targets `old` at `new`.
    /// No-op when `parent` is the sentinel.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_nil() {
            return;
        }
        if self.left(parent) == old {
            self.set_left(parent, new);
        } else {
            self.set_right(parent, new);
        }
    }

    pub fn stats(&self) -> OpStats {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Exchange the tree positions of `a` and `b`, leaving values (and colors)
    /// attached to their nodes. Returns the root after the exchange.
    ///
    /// Handles the immediate parent/child relation in either direction as well
    /// as siblings and unrelated nodes.
    pub fn swap(&mut self, root: NodeId, a: NodeId, b: NodeId) -> NodeId {
        assert!(!a.is_nil() && !b.is_nil(), "swap called with the sentinel");
        if a == b {
            return root;
        }
        self.stats.swap();

        // When adjacent, n1 is always the parent.
        let (n1, n2) = if self.parent(a) == b { (b, a) } else { (a, b) };

        let p1 = self.parent(n1);
        let p2 = self.parent(n2);
        let (n1_left, n1_right) = (self.left(n1), self.right(n1));
        let (n2_left, n2_right) = (self.left(n2), self.right(n2));

        if n1 == p2 {
            self.replace_child(p1, n1, n2);
            self.set_parent(n1, n2);
            self.set_parent(n2, p1);
            self.set_left(n1, n2_left);
            self.set_right(n1, n2_right);
            if !n2_left.is_nil() {
                self.set_parent(n2_left, n1);
            }
            if !n2_right.is_nil() {
                self.set_parent(n2_right, n1);
            }
            if n1_left == n2 {
                self.set_left(n2, n1);
                self.set_right(n2, n1_right);
                if !n1_right.is_nil() {
                    self.set_parent(n1_right, n2);
                }
            } else {
                self.set_left(n2, n1_left);
                self.set_right(n2, n1);
                if !n1_left.is_nil() {
                    self.set_parent(n1_left, n2);
                }
            }
        } else {
            // Sides are read before any link moves; siblings share a parent.
            let n1_is_left = !p1.is_nil() && self.left(p1) == n1;
            let n2_is_left = !p2.is_nil() && self.left(p2) == n2;

            self.set_parent(n1, p2);
            self.set_parent(n2, p1);
            self.set_left(n1, n2_left);
            self.set_right(n1, n2_right);
            self.set_left(n2, n1_left);
            self.set_right(n2, n1_right);
            if !p1.is_nil() {
                if n1_is_left {
                    self.set_left(p1, n2);
                } else {
                    self.set_right(p1, n2);
                }
            }
            if !p2.is_nil() {
                if n2_is_left {
                    self.set_left(p2, n1);
                } else {
                    self.set_right(p2, n1);
                }
            }
            for child in [n1_left, n1_right] {
                if !child.is_nil() {
                    self.set_parent(child, n2);
                }
            }
            for child in [n2_left, n2_right] {
                if !child.is_nil() {
                    self.set_parent(child, n1);
                }
            }
        }

        if root == n1 {
            n2
        } else if root == n2 {
            n1
        } else {
            root
        }
    }
}

impl<T, C: Comparator<T>> Arena<T, C> {
    /// Full structural order: comparator, orientation, then insertion order.
    pub fn compare(&self, a: NodeId, b: NodeId) -> Ordering {
        self.stats.compare();
        let (na, nb) = (self.raw(a), self.raw(b));
        self.order.entries(self.value(a), na.seq, self.value(b), nb.seq)
    }

    /// Same order as [`Arena::compare`] without touching the counters; used by
    /// validation and rendering.
    pub(crate) fn compare_quiet(&self, a: NodeId, b: NodeId) -> Ordering {
        let (na, nb) = (self.raw(a), self.raw(b));
        match (na.value.as_ref(), nb.value.as_ref()) {
            (Some(va), Some(vb)) => self.order.entries(va, na.seq, vb, nb.seq),
            _ => panic!("compare involving the sentinel"),
        }
    }

    /// Compare a node's key against a free-standing value (search only).
    pub fn compare_key(&self, node: NodeId, value: &T) -> Ordering {
        self.stats.compare();
        self.order.keys(self.value(node), value)
    }
}
