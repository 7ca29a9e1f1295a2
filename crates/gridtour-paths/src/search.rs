use std::collections::HashMap;

use gridtour_core::{Point, Range};

use crate::reconstruct::{UnreachableGoal, reconstruct};

/// Sentinel cost for a cell that can never be entered.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Everything a single A* run discovered.
///
/// Holds the best known cost-so-far and predecessor of every cell the search
/// reached, not only those on the winning path. A fresh state is built for
/// each search and nothing is shared between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub(crate) costs: HashMap<Point, i32>,
    pub(crate) predecessors: HashMap<Point, Point>,
    pub(crate) expanded: usize,
}

impl SearchState {
    /// Best known cumulative cost from the search start to `p`.
    #[inline]
    pub fn cost(&self, p: Point) -> Option<i32> {
        self.costs.get(&p).copied()
    }

    /// Predecessor of `p` on the best known path to it.
    #[inline]
    pub fn predecessor(&self, p: Point) -> Option<Point> {
        self.predecessors.get(&p).copied()
    }

    /// Whether the search reached `p`.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.costs.contains_key(&p)
    }

    /// All discovered cost-so-far values.
    pub fn costs(&self) -> &HashMap<Point, i32> {
        &self.costs
    }

    /// All discovered predecessor links.
    pub fn predecessors(&self) -> &HashMap<Point, Point> {
        &self.predecessors
    }

    /// Number of cells popped from the frontier and expanded.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Walk the predecessor links back from `goal` to `start`.
    ///
    /// Shorthand for [`reconstruct`] over this state's predecessors.
    pub fn path(&self, start: Point, goal: Point) -> Result<Vec<Point>, UnreachableGoal> {
        reconstruct(&self.predecessors, start, goal)
    }
}

// ---------------------------------------------------------------------------
// Frontier entries
// ---------------------------------------------------------------------------

/// Open-list entry, ordered by `f` for use in `BinaryHeap`.
///
/// `seq` records insertion order so that entries with equal `f` pop first in,
/// first out. `g` is the cost the entry was pushed with; an entry whose `g`
/// exceeds the best known cost for `pos` is stale.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Frontier {
    pub(crate) f: i32,
    pub(crate) seq: u64,
    pub(crate) g: i32,
    pub(crate) pos: Point,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Bounds and scratch space for searches over one grid rectangle.
///
/// Cells outside the range are never expanded, whatever the pather reports.
/// Only the neighbor buffer is reused between searches.
#[derive(Debug, Clone)]
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            nbuf: Vec::with_capacity(4),
        }
    }
}
