//! Least-cost pathfinding on weighted, 4-connected grids.
//!
//! - **A\*** search ([`PathRange::astar_search`]) returning the full
//!   [`SearchState`] of discovered costs and predecessors
//! - **Path reconstruction** ([`reconstruct`]) from a predecessor map
//! - The **Manhattan** heuristic ([`manhattan`])
//!
//! Every search starts from a fresh state; [`PathRange`] only keeps the search
//! bounds and a scratch buffer between calls.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | enterable neighbours of a cell |
//! | [`WeightedPather`] : [`Pather`] | positive step costs |
//! | [`AstarPather`] : [`WeightedPather`] | admissible estimate for A* |

mod astar;
mod distance;
mod reconstruct;
mod search;
mod traits;

pub use astar::Path;
pub use distance::manhattan;
pub use reconstruct::{UnreachableGoal, reconstruct};
pub use search::{PathRange, SearchState, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};
