//! Range aggregate index over hourly traffic slots.
//!
//! [`RangeIndex`] is a segment tree stored in a flat buffer: the children of
//! node `k` live at `2k + 1` and `2k + 2`. Every node holds the summed
//! measurements of the slots it covers, so range sums and point updates both
//! take logarithmic time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Measurements of a single time slot.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Slot {
    /// Average speed (km/h).
    pub speed: f64,
    /// Congestion level (vehicles per hour).
    pub congestion: f64,
}

impl Slot {
    pub fn new(speed: f64, congestion: f64) -> Self {
        Self { speed, congestion }
    }
}

/// Summed measurements over a contiguous set of slots.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Aggregate {
    pub speed_sum: f64,
    pub congestion_sum: f64,
}

impl Aggregate {
    /// Identity element of [`Aggregate::merge`].
    pub const NEUTRAL: Self = Self {
        speed_sum: 0.0,
        congestion_sum: 0.0,
    };

    pub fn merge(self, other: Self) -> Self {
        Self {
            speed_sum: self.speed_sum + other.speed_sum,
            congestion_sum: self.congestion_sum + other.congestion_sum,
        }
    }

    /// Divide both sums by the number of slots they were taken over.
    ///
    /// The result is NaN when `n_slots` is zero.
    pub fn average(self, n_slots: usize) -> Average {
        let n_slots = n_slots as f64;
        Average {
            speed: self.speed_sum / n_slots,
            congestion: self.congestion_sum / n_slots,
        }
    }
}

impl From<Slot> for Aggregate {
    fn from(slot: Slot) -> Self {
        Self {
            speed_sum: slot.speed,
            congestion_sum: slot.congestion,
        }
    }
}

/// Mean measurements over a range of slots.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Average {
    pub speed: f64,
    pub congestion: f64,
}

/// Precondition violations reported by [`RangeIndex`].
///
/// All of them are detected before the index is touched.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum Error {
    #[error("number of slots must be positive")]
    NoSlots,

    #[error("expected {expected} slots, but got {found}")]
    SlotCount { expected: usize, found: usize },

    #[error("range [{l}, {r}] is invalid for {n_slots} slots")]
    InvalidRange { l: usize, r: usize, n_slots: usize },

    #[error("slot index {index} is out of range for {n_slots} slots")]
    IndexOutOfRange { index: usize, n_slots: usize },
}

/// Segment tree of [`Aggregate`] values over a fixed number of slots.
#[derive(Debug, Clone)]
pub struct RangeIndex {
    n_slots: usize,
    tree: Vec<Aggregate>,
}

impl RangeIndex {
    /// Build the index for `n_slots` slots from their initial measurements.
    ///
    /// # Errors
    /// Returns [`Error::NoSlots`] if `n_slots` is zero and
    /// [`Error::SlotCount`] if `slots` does not hold exactly `n_slots` values.
    pub fn build(n_slots: usize, slots: &[Slot]) -> Result<Self, Error> {
        if n_slots == 0 {
            return Err(Error::NoSlots);
        }
        if slots.len() != n_slots {
            return Err(Error::SlotCount {
                expected: n_slots,
                found: slots.len(),
            });
        }

        // Enough room for a complete tree over the next power of two.
        let n_nodes = 2 * n_slots.next_power_of_two() - 1;
        let mut index = Self {
            n_slots,
            tree: vec![Aggregate::NEUTRAL; n_nodes],
        };
        index.build_node(0, 0, n_slots - 1, slots);

        Ok(index)
    }

    /// Build the index with one slot per element of `slots`.
    pub fn from_slots(slots: &[Slot]) -> Result<Self, Error> {
        Self::build(slots.len(), slots)
    }

    pub fn n_slots(&self) -> usize {
        self.n_slots
    }

    /// Aggregate over every slot.
    pub fn total(&self) -> Aggregate {
        self.tree[0]
    }

    /// Summed measurements of the slots in `[l, r]` (both inclusive).
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] if `l > r` or `r` is not a slot index.
    pub fn query(&self, l: usize, r: usize) -> Result<Aggregate, Error> {
        self.check_range(l, r)?;
        Ok(self.query_node(0, 0, self.n_slots - 1, l, r))
    }

    /// Mean measurements of the slots in `[l, r]` (both inclusive).
    ///
    /// # Errors
    /// Same as [`RangeIndex::query`].
    pub fn average(&self, l: usize, r: usize) -> Result<Average, Error> {
        let agg = self.query(l, r)?;
        Ok(agg.average(r - l + 1))
    }

    /// Current measurements of a single slot.
    pub fn slot(&self, index: usize) -> Result<Slot, Error> {
        self.check_index(index)?;

        let (mut node, mut start, mut end) = (0, 0, self.n_slots - 1);
        while start != end {
            let mid = (start + end) / 2;
            if index <= mid {
                (node, end) = (2 * node + 1, mid);
            } else {
                (node, start) = (2 * node + 2, mid + 1);
            }
        }

        let leaf = self.tree[node];
        Ok(Slot::new(leaf.speed_sum, leaf.congestion_sum))
    }

    /// Replace the measurements of slot `index`.
    ///
    /// Only the nodes on the path from the root to the slot's leaf change.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `index` is not a slot index.
    pub fn update(&mut self, index: usize, slot: Slot) -> Result<(), Error> {
        self.check_index(index)?;
        self.update_node(0, 0, self.n_slots - 1, index, slot.into());
        Ok(())
    }

    fn check_range(&self, l: usize, r: usize) -> Result<(), Error> {
        if l > r || r >= self.n_slots {
            return Err(Error::InvalidRange {
                l,
                r,
                n_slots: self.n_slots,
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index >= self.n_slots {
            return Err(Error::IndexOutOfRange {
                index,
                n_slots: self.n_slots,
            });
        }
        Ok(())
    }

    fn build_node(&mut self, node: usize, start: usize, end: usize, slots: &[Slot]) {
        if start == end {
            self.tree[node] = slots[start].into();
            return;
        }
        let mid = (start + end) / 2;
        self.build_node(2 * node + 1, start, mid, slots);
        self.build_node(2 * node + 2, mid + 1, end, slots);
        self.pull(node);
    }

    fn query_node(
        &self,
        node: usize,
        start: usize,
        end: usize,
        l: usize,
        r: usize,
    ) -> Aggregate {
        // Disjoint from the query range.
        if r < start || end < l {
            return Aggregate::NEUTRAL;
        }
        // Fully inside the query range.
        if l <= start && end <= r {
            return self.tree[node];
        }
        let mid = (start + end) / 2;
        let left = self.query_node(2 * node + 1, start, mid, l, r);
        let right = self.query_node(2 * node + 2, mid + 1, end, l, r);
        left.merge(right)
    }

    fn update_node(
        &mut self,
        node: usize,
        start: usize,
        end: usize,
        index: usize,
        leaf: Aggregate,
    ) {
        if start == end {
            self.tree[node] = leaf;
            return;
        }
        let mid = (start + end) / 2;
        if index <= mid {
            self.update_node(2 * node + 1, start, mid, index, leaf);
        } else {
            self.update_node(2 * node + 2, mid + 1, end, index, leaf);
        }
        self.pull(node);
    }

    fn pull(&mut self, node: usize) {
        self.tree[node] = self.tree[2 * node + 1].merge(self.tree[2 * node + 2]);
    }
}
