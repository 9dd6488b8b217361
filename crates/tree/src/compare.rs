use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;

/// Ordering injected into a structure at construction time.
pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The value's own `Ord`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Which extremum a structure hands out first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeapType {
    #[default]
    Min,
    Max,
}

impl HeapType {
    pub fn as_str(self) -> &'static str {
        match self {
            HeapType::Min => "min",
            HeapType::Max => "max",
        }
    }
}

impl fmt::Display for HeapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeapType {
    type Err = TreeError;

    /// Only the exact strings `min` and `max` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(HeapType::Min),
            "max" => Ok(HeapType::Max),
            other => Err(TreeError::UnknownHeapType(other.to_string())),
        }
    }
}

/// Total order used inside every structure: the injected comparator, flipped
/// for max orientation, then insertion sequence. Earlier insertions therefore
/// win ties on every backend.
#[derive(Debug, Clone)]
pub struct KeyOrder<C> {
    cmp: C,
    heap_type: HeapType,
}

impl<C> KeyOrder<C> {
    pub fn new(cmp: C, heap_type: HeapType) -> Self {
        Self { cmp, heap_type }
    }

    pub fn heap_type(&self) -> HeapType {
        self.heap_type
    }

    /// Compare keys only, ignoring insertion order.
    pub fn keys<T>(&self, a: &T, b: &T) -> Ordering
    where
        C: Comparator<T>,
    {
        let ord = self.cmp.compare(a, b);
        match self.heap_type {
            HeapType::Min => ord,
            HeapType::Max => ord.reverse(),
        }
    }

    pub fn entries<T>(&self, a: &T, a_seq: u64, b: &T, b_seq: u64) -> Ordering
    where
        C: Comparator<T>,
    {
        self.keys(a, b).then(a_seq.cmp(&b_seq))
    }
}
