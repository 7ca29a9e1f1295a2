use std::collections::HashMap;
use std::fmt;

use gridtour_core::Point;

/// No chain of predecessor links connects a goal back to its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnreachableGoal {
    pub start: Point,
    pub goal: Point,
    /// Cell at which the walk back from `goal` stopped.
    pub broken_at: Point,
}

impl fmt::Display for UnreachableGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no passable route from {} to {}: {} is not connected to the start",
            self.start, self.goal, self.broken_at
        )
    }
}

impl std::error::Error for UnreachableGoal {}

/// Convert a predecessor map into the ordered cell sequence from `start` to
/// `goal`, both inclusive.
///
/// Fails as soon as a cell other than `start` has no recorded predecessor.
/// A walk longer than the number of recorded links can only come from a
/// cyclic map and is reported the same way.
pub fn reconstruct(
    predecessors: &HashMap<Point, Point>,
    start: Point,
    goal: Point,
) -> Result<Vec<Point>, UnreachableGoal> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let prev = match predecessors.get(&current) {
            Some(&prev) if path.len() <= predecessors.len() => prev,
            _ => {
                return Err(UnreachableGoal {
                    start,
                    goal,
                    broken_at: current,
                });
            }
        };
        path.push(prev);
        current = prev;
    }
    path.reverse();
    Ok(path)
}
