use std::collections::BinaryHeap;

use gridtour_core::Point;

use crate::reconstruct::UnreachableGoal;
use crate::search::{Frontier, PathRange, SearchState};
use crate::traits::AstarPather;

/// A reconstructed least-cost path and its total cost.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Cells from start to goal, both inclusive.
    pub cells: Vec<Point>,
    /// Sum of the entry costs of every cell after the start.
    pub cost: i32,
}

impl PathRange {
    /// Run A* from `start` to `goal` and return everything it discovered.
    ///
    /// The search stops as soon as `goal` is popped from the frontier, or when
    /// the frontier runs dry. An unreachable goal is not an error here: it is
    /// simply absent from the returned costs. If either endpoint lies outside
    /// the range the state is returned empty.
    pub fn astar_search<P: AstarPather>(
        &mut self,
        pather: &P,
        start: Point,
        goal: Point,
    ) -> SearchState {
        let mut state = SearchState::default();
        if !self.rng.contains(start) || !self.rng.contains(goal) {
            return state;
        }

        state.costs.insert(start, 0);

        let mut seq: u64 = 0;
        let mut open: BinaryHeap<Frontier> = BinaryHeap::new();
        open.push(Frontier {
            f: pather.estimate(start, goal),
            seq,
            g: 0,
            pos: start,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            // Skip stale entries.
            if state
                .costs
                .get(&current.pos)
                .is_some_and(|&best| current.g > best)
            {
                continue;
            }

            if current.pos == goal {
                break;
            }

            state.expanded += 1;

            nbuf.clear();
            pather.neighbors(current.pos, &mut nbuf);

            for &np in nbuf.iter() {
                if !self.rng.contains(np) {
                    continue;
                }
                let tentative = current.g.saturating_add(pather.cost(current.pos, np));
                if state.costs.get(&np).is_some_and(|&g| tentative >= g) {
                    continue;
                }

                state.costs.insert(np, tentative);
                state.predecessors.insert(np, current.pos);
                seq += 1;
                open.push(Frontier {
                    f: tentative.saturating_add(pather.estimate(np, goal)),
                    seq,
                    g: tentative,
                    pos: np,
                });
            }
        }

        self.nbuf = nbuf;

        log::trace!(
            "astar {} -> {}: expanded {} cells, goal cost {:?}",
            start,
            goal,
            state.expanded,
            state.cost(goal)
        );
        state
    }

    /// Compute the least-cost path from `start` to `goal` using A*.
    ///
    /// Combines [`astar_search`](Self::astar_search) with path
    /// reconstruction, returning the full path (including both endpoints)
    /// together with the cost recorded for `goal`.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        start: Point,
        goal: Point,
    ) -> Result<Path, UnreachableGoal> {
        let state = self.astar_search(pather, start, goal);
        let cells = state.path(start, goal)?;
        // A successful walk back means the goal was recorded.
        let cost = state.cost(goal).unwrap_or_default();
        Ok(Path { cells, cost })
    }
}
