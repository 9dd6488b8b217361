//! Binary heap over a flat vector: children of slot `i` live at `2i + 1` and
//! `2i + 2`, and the last element is simply `len - 1`.

use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::compare::{Comparator, HeapType, KeyOrder, NaturalOrder};
use crate::error::TreeError;
use crate::render::escape;
use crate::stats::{Field, OpStats, StatsRecorder};

#[derive(Debug)]
struct Entry<T> {
    seq: u64,
    value: T,
}

pub struct HeapArray<T, C = NaturalOrder> {
    items: Vec<Entry<T>>,
    next_seq: u64,
    order: KeyOrder<C>,
    stats: StatsRecorder,
}

impl<T: Ord> HeapArray<T> {
    pub fn new(heap_type: HeapType) -> Self {
        Self::with_order(NaturalOrder, heap_type)
    }
}

impl<T, C> HeapArray<T, C> {
    pub fn heap_type(&self) -> HeapType {
        self.order.heap_type()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Values in slot order.
    pub fn as_slots(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|e| &e.value)
    }

    fn parent_of(&self, i: usize) -> usize {
        self.stats.read(Field::Parent);
        (i - 1) / 2
    }

    fn left_of(&self, i: usize) -> usize {
        self.stats.read(Field::Left);
        2 * i + 1
    }

    fn right_of(&self, i: usize) -> usize {
        self.stats.read(Field::Right);
        2 * i + 2
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.stats.swap();
        self.stats.write(Field::Index);
        self.stats.write(Field::Index);
        self.items.swap(a, b);
    }

    /// Nested `[value left right]` form, `NIL` for empty slots.
    pub fn to_tuple(&self, label: &dyn Fn(&T) -> String) -> String {
        let mut out = String::new();
        self.write_tuple(0, label, &mut out);
        out
    }

    fn write_tuple(&self, i: usize, label: &dyn Fn(&T) -> String, out: &mut String) {
        let Some(entry) = self.items.get(i) else {
            out.push_str("NIL");
            return;
        };
        out.push('[');
        out.push_str(&label(&entry.value));
        out.push(' ');
        self.write_tuple(2 * i + 1, label, out);
        out.push(' ');
        self.write_tuple(2 * i + 2, label, out);
        out.push(']');
    }

    /// Graphviz description with slot numbers as node names.
    pub fn to_dot(&self, label: &dyn Fn(&T) -> String) -> String {
        let mut out = String::from("digraph Binary_Heap {\n");
        for (i, entry) in self.items.iter().enumerate() {
            let _ = writeln!(out, "  {} [label=\"{}\" color=black];", i, escape(&label(&entry.value)));
            for child in [2 * i + 1, 2 * i + 2] {
                if child < self.items.len() {
                    let _ = writeln!(out, "  {} -> {};", i, child);
                }
            }
        }
        out.push('}');
        out
    }

    pub fn stats(&self) -> OpStats {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

impl<T, C: Comparator<T>> HeapArray<T, C> {
    pub fn with_order(cmp: C, heap_type: HeapType) -> Self {
        Self {
            items: Vec::new(),
            next_seq: 0,
            order: KeyOrder::new(cmp, heap_type),
            stats: StatsRecorder::default(),
        }
    }

    fn compare(&self, a: usize, b: usize) -> Ordering {
        self.stats.compare();
        self.stats.read(Field::Index);
        self.stats.read(Field::Index);
        let (ea, eb) = (&self.items[a], &self.items[b]);
        self.order.entries(&ea.value, ea.seq, &eb.value, eb.seq)
    }

    fn bubble_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = self.parent_of(i);
            if self.compare(parent, i) == Ordering::Less {
                return;
            }
            self.swap_slots(parent, i);
            i = parent;
        }
    }

    fn bubble_down(&mut self, mut i: usize) {
        let len = self.items.len();
        loop {
            let left = self.left_of(i);
            if left >= len {
                return;
            }
            let right = self.right_of(i);
            let child = if right < len && self.compare(left, right) == Ordering::Greater {
                right
            } else {
                left
            };
            if self.compare(i, child) == Ordering::Less {
                return;
            }
            self.swap_slots(i, child);
            i = child;
        }
    }

    pub fn insert(&mut self, value: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.stats.write(Field::Index);
        self.items.push(Entry { seq, value });
        self.bubble_up(self.items.len() - 1);
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        if last > 0 {
            self.swap_slots(0, last);
        }
        let top = self.items.pop().map(|e| e.value);
        if !self.items.is_empty() {
            self.bubble_down(0);
        }
        top
    }

    pub fn peek(&self) -> Option<&T> {
        let first = self.items.first()?;
        self.stats.read(Field::Index);
        Some(&first.value)
    }

    /// Every slot precedes its children.
    pub fn validate(&self) -> Result<(), TreeError> {
        for i in 1..self.items.len() {
            let parent = (i - 1) / 2;
            let (ep, ei) = (&self.items[parent], &self.items[i]);
            if self.order.entries(&ep.value, ep.seq, &ei.value, ei.seq) != Ordering::Less {
                return Err(TreeError::invariant(
                    "heaparray",
                    format!("slot {} does not precede its child slot {}", parent, i),
                ));
            }
        }
        Ok(())
    }
}
