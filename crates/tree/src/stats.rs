//! Operation counters for the ordered structures.
//!
//! Each structure owns one [`StatsRecorder`]; accessors record their own reads
//! and writes, so two structures never share counts and tests can run in
//! parallel.

use std::cell::Cell;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Node attribute touched by an access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Color,
    Parent,
    Left,
    Right,
    /// Array slot index (array heap only).
    Index,
    Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCounts {
    pub color: u64,
    pub parent: u64,
    pub left: u64,
    pub right: u64,
    pub index: u64,
    pub value: u64,
}

impl FieldCounts {
    fn bump(&mut self, field: Field) {
        match field {
            Field::Color => self.color += 1,
            Field::Parent => self.parent += 1,
            Field::Left => self.left += 1,
            Field::Right => self.right += 1,
            Field::Index => self.index += 1,
            Field::Value => self.value += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.color + self.parent + self.left + self.right + self.index + self.value
    }
}

impl AddAssign for FieldCounts {
    fn add_assign(&mut self, other: Self) {
        self.color += other.color;
        self.parent += other.parent;
        self.left += other.left;
        self.right += other.right;
        self.index += other.index;
        self.value += other.value;
    }
}

/// Snapshot of everything a structure has counted since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpStats {
    pub reads: FieldCounts,
    pub writes: FieldCounts,
    pub compares: u64,
    pub swaps: u64,
}

impl OpStats {
    pub fn total_reads(&self) -> u64 {
        self.reads.total()
    }

    pub fn total_writes(&self) -> u64 {
        self.writes.total()
    }
}

impl AddAssign for OpStats {
    fn add_assign(&mut self, other: Self) {
        self.reads += other.reads;
        self.writes += other.writes;
        self.compares += other.compares;
        self.swaps += other.swaps;
    }
}

/// Interior-mutable counter set, so read accessors can record through `&self`.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    inner: Cell<OpStats>,
}

impl StatsRecorder {
    fn update(&self, f: impl FnOnce(&mut OpStats)) {
        let mut stats = self.inner.get();
        f(&mut stats);
        self.inner.set(stats);
    }

    #[inline]
    pub fn read(&self, field: Field) {
        self.update(|s| s.reads.bump(field));
    }

    #[inline]
    pub fn write(&self, field: Field) {
        self.update(|s| s.writes.bump(field));
    }

    #[inline]
    pub fn compare(&self) {
        self.update(|s| s.compares += 1);
    }

    #[inline]
    pub fn swap(&self) {
        self.update(|s| s.swaps += 1);
    }

    pub fn snapshot(&self) -> OpStats {
        self.inner.get()
    }

    pub fn reset(&self) {
        self.inner.set(OpStats::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_by_field() {
        let rec = StatsRecorder::default();
        rec.read(Field::Left);
        rec.read(Field::Left);
        rec.read(Field::Value);
        rec.write(Field::Parent);
        rec.compare();
        rec.swap();

        let s = rec.snapshot();
        assert_eq!(s.reads.left, 2);
        assert_eq!(s.reads.value, 1);
        assert_eq!(s.total_reads(), 3);
        assert_eq!(s.writes.parent, 1);
        assert_eq!(s.compares, 1);
        assert_eq!(s.swaps, 1);

        rec.reset();
        assert_eq!(rec.snapshot(), OpStats::default());
    }

    #[test]
    fn stats_accumulate() {
        let mut total = OpStats::default();
        let mut one = OpStats::default();
        one.compares = 3;
        one.reads.color = 2;
        total += one;
        total += one;
        assert_eq!(total.compares, 6);
        assert_eq!(total.reads.color, 4);
    }
}
