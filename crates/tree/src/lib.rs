//! Ordered structures sharing one priority-queue contract.
//!
//! Four backends (binary search tree, red-black tree, pointer-linked heap and
//! array heap) implement [`Timeline`], so a caller can pick one by
//! [`TimelineKind`] and never care which it got. The pointer-linked
//! structures keep their nodes in an [`Arena`] where slot 0 is the shared
//! sentinel.

pub mod bst;
pub mod compare;
pub mod error;
pub mod heap_array;
pub mod heap_tree;
pub mod node;
pub mod rbt;
pub mod render;
pub mod stats;
pub mod timeline;

pub use bst::Bst;
pub use compare::{Comparator, HeapType, NaturalOrder};
pub use error::TreeError;
pub use heap_array::HeapArray;
pub use heap_tree::HeapTree;
pub use node::{Arena, Color, NodeId};
pub use rbt::RedBlackTree;
pub use render::WalkOrder;
pub use stats::{Field, FieldCounts, OpStats, StatsRecorder};
pub use timeline::{Timeline, TimelineKind};
