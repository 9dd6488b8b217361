//! One priority-queue contract over every backend.
//!
//! The scheduler only talks to `dyn Timeline<T>`; which structure sits behind
//! it is a runtime choice made through [`TimelineKind`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bst::Bst;
use crate::compare::{Comparator, HeapType};
use crate::error::TreeError;
use crate::heap_array::HeapArray;
use crate::heap_tree::HeapTree;
use crate::rbt::RedBlackTree;
use crate::render;
use crate::stats::OpStats;

/// Extract-first queue. Equal keys come out in insertion order.
pub trait Timeline<T> {
    fn kind(&self) -> TimelineKind;

    fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    fn heap_type(&self) -> HeapType;

    fn insert(&mut self, value: T);

    /// Remove and return the first element under the structure's order.
    fn pop(&mut self) -> Option<T>;

    fn peek(&self) -> Option<&T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> OpStats;

    fn reset_stats(&self);

    /// Full structural check of the backend's invariants.
    fn validate(&self) -> Result<(), TreeError>;

    fn to_tuple(&self, label: &dyn Fn(&T) -> String) -> String;

    fn to_dot(&self, label: &dyn Fn(&T) -> String) -> String;
}

impl<T, C: Comparator<T>> Timeline<T> for Bst<T, C> {
    fn kind(&self) -> TimelineKind {
        TimelineKind::Bst
    }

    fn heap_type(&self) -> HeapType {
        self.arena().heap_type()
    }

    fn insert(&mut self, value: T) {
        Bst::insert(self, value);
    }

    fn pop(&mut self) -> Option<T> {
        let first = self.min()?;
        Some(self.remove(first))
    }

    fn peek(&self) -> Option<&T> {
        self.min().map(|n| self.value(n))
    }

    fn len(&self) -> usize {
        Bst::len(self)
    }

    fn stats(&self) -> OpStats {
        Bst::stats(self)
    }

    fn reset_stats(&self) {
        Bst::reset_stats(self);
    }

    fn validate(&self) -> Result<(), TreeError> {
        Bst::validate(self)
    }

    fn to_tuple(&self, label: &dyn Fn(&T) -> String) -> String {
        render::tuple(self.arena(), self.root(), label, false)
    }

    fn to_dot(&self, label: &dyn Fn(&T) -> String) -> String {
        render::dot(self.arena(), self.root(), "Binary_Search_Tree", label, false)
    }
}

impl<T, C: Comparator<T>> Timeline<T> for RedBlackTree<T, C> {
    fn kind(&self) -> TimelineKind {
        TimelineKind::RedBlack
    }

    fn heap_type(&self) -> HeapType {
        self.arena().heap_type()
    }

    fn insert(&mut self, value: T) {
        RedBlackTree::insert(self, value);
    }

    fn pop(&mut self) -> Option<T> {
        let first = self.min()?;
        Some(self.remove(first))
    }

    fn peek(&self) -> Option<&T> {
        self.min().map(|n| self.value(n))
    }

    fn len(&self) -> usize {
        RedBlackTree::len(self)
    }

    fn stats(&self) -> OpStats {
        RedBlackTree::stats(self)
    }

    fn reset_stats(&self) {
        RedBlackTree::reset_stats(self);
    }

    fn validate(&self) -> Result<(), TreeError> {
        RedBlackTree::validate(self).map(|_| ())
    }

    fn to_tuple(&self, label: &dyn Fn(&T) -> String) -> String {
        render::tuple(self.arena(), self.root(), label, true)
    }

    fn to_dot(&self, label: &dyn Fn(&T) -> String) -> String {
        render::dot(self.arena(), self.root(), "Red_Black_Tree", label, true)
    }
}

impl<T, C: Comparator<T>> Timeline<T> for HeapTree<T, C> {
    fn kind(&self) -> TimelineKind {
        TimelineKind::HeapTree
    }

    fn heap_type(&self) -> HeapType {
        HeapTree::heap_type(self)
    }

    fn insert(&mut self, value: T) {
        HeapTree::insert(self, value);
    }

    fn pop(&mut self) -> Option<T> {
        HeapTree::pop(self)
    }

    fn peek(&self) -> Option<&T> {
        HeapTree::peek(self)
    }

    fn len(&self) -> usize {
        HeapTree::len(self)
    }

    fn stats(&self) -> OpStats {
        HeapTree::stats(self)
    }

    fn reset_stats(&self) {
        HeapTree::reset_stats(self);
    }

    fn validate(&self) -> Result<(), TreeError> {
        HeapTree::validate(self)
    }

    fn to_tuple(&self, label: &dyn Fn(&T) -> String) -> String {
        HeapTree::to_tuple(self, label)
    }

    fn to_dot(&self, label: &dyn Fn(&T) -> String) -> String {
        render::dot(self.arena(), self.root(), "Binary_Heap", label, false)
    }
}

impl<T, C: Comparator<T>> Timeline<T> for HeapArray<T, C> {
    fn kind(&self) -> TimelineKind {
        TimelineKind::HeapArray
    }

    fn heap_type(&self) -> HeapType {
        HeapArray::heap_type(self)
    }

    fn insert(&mut self, value: T) {
        HeapArray::insert(self, value);
    }

    fn pop(&mut self) -> Option<T> {
        HeapArray::pop(self)
    }

    fn peek(&self) -> Option<&T> {
        HeapArray::peek(self)
    }

    fn len(&self) -> usize {
        HeapArray::len(self)
    }

    fn stats(&self) -> OpStats {
        HeapArray::stats(self)
    }

    fn reset_stats(&self) {
        HeapArray::reset_stats(self);
    }

    fn validate(&self) -> Result<(), TreeError> {
        HeapArray::validate(self)
    }

    fn to_tuple(&self, label: &dyn Fn(&T) -> String) -> String {
        HeapArray::to_tuple(self, label)
    }

    fn to_dot(&self, label: &dyn Fn(&T) -> String) -> String {
        HeapArray::to_dot(self, label)
    }
}

/// Backend selector, spelled `bst`, `rbt`, `heaptree` or `heaparray` on the
/// command line and in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Bst,
    #[default]
    #[serde(rename = "rbt")]
    RedBlack,
    HeapTree,
    HeapArray,
}

impl TimelineKind {
    pub const ALL: [TimelineKind; 4] = [
        TimelineKind::Bst,
        TimelineKind::RedBlack,
        TimelineKind::HeapTree,
        TimelineKind::HeapArray,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimelineKind::Bst => "bst",
            TimelineKind::RedBlack => "rbt",
            TimelineKind::HeapTree => "heaptree",
            TimelineKind::HeapArray => "heaparray",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TimelineKind::Bst => "binary search tree",
            TimelineKind::RedBlack => "red-black tree",
            TimelineKind::HeapTree => "linked binary heap",
            TimelineKind::HeapArray => "array binary heap",
        }
    }

    /// Construct an empty backend of this kind.
    pub fn build<T, C>(self, heap_type: HeapType, cmp: C) -> Box<dyn Timeline<T>>
    where
        T: 'static,
        C: Comparator<T> + 'static,
    {
        debug!(timeline = %self, heap = %heap_type, "building timeline");
        match self {
            TimelineKind::Bst => Box::new(Bst::with_order(cmp, heap_type)),
            TimelineKind::RedBlack => Box::new(RedBlackTree::with_order(cmp, heap_type)),
            TimelineKind::HeapTree => Box::new(HeapTree::with_order(cmp, heap_type)),
            TimelineKind::HeapArray => Box::new(HeapArray::with_order(cmp, heap_type)),
        }
    }
}

impl fmt::Display for TimelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimelineKind {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimelineKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| TreeError::UnknownTimeline(s.to_string()))
    }
}
