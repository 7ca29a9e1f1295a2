//! Greedy nearest-first tour planning.
//!
//! The planner repeatedly picks, among the targets not yet visited, the one
//! closest to where the route currently ends (by Manhattan distance), runs A*
//! to it and appends that leg to the route. When no targets remain, a final
//! leg runs to the exit. The ordering is a greedy approximation, not an
//! optimal tour.

use std::fmt;
use std::ops::Range as Span;

use gridtour_core::Point;
use gridtour_paths::{PathRange, UnreachableGoal, manhattan};

use crate::map::{MapError, TerrainMap};
use crate::target::Target;

/// A named place on the tour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Waypoint {
    /// Where the tour begins.
    Start,
    /// A target, by name.
    Target(String),
    /// Where the tour ends.
    Exit,
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("the start"),
            Self::Target(name) => write!(f, "target {name}"),
            Self::Exit => f.write_str("the exit"),
        }
    }
}

/// One shortest-path leg of a tour.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub destination: Waypoint,
    pub from: Point,
    pub to: Point,
    /// Terrain cost of this leg alone.
    pub cost: i32,
    /// Indices of the route cells this leg contributed.
    pub route_span: Span<usize>,
}

/// A planned route through every target to the exit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    start: Point,
    exit: Point,
    route: Vec<Point>,
    legs: Vec<Leg>,
    visited: Vec<Target>,
}

impl Tour {
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn exit(&self) -> Point {
        self.exit
    }

    /// Every step of the tour in order. The start cell itself is not
    /// included, so the first cell is adjacent to [`start`](Self::start) and
    /// each following cell is adjacent to the one before it.
    pub fn route(&self) -> &[Point] {
        &self.route
    }

    /// Legs in travel order; the last one always ends at the exit.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Targets in the order they were visited.
    pub fn visited(&self) -> &[Target] {
        &self.visited
    }

    /// Names of the targets in visiting order.
    pub fn visit_order(&self) -> Vec<&str> {
        self.visited.iter().map(Target::name).collect()
    }

    /// Cost of the whole route, summed over every leg.
    pub fn total_cost(&self) -> i32 {
        self.legs.iter().map(|leg| leg.cost).sum()
    }

    /// Cost of the final leg to the exit only.
    pub fn final_leg_cost(&self) -> i32 {
        self.legs.last().map_or(0, |leg| leg.cost)
    }
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

/// Plans tours over one map, reusing its search scratch space between legs.
pub struct TourPlanner<'a> {
    map: &'a TerrainMap,
    paths: PathRange,
}

impl<'a> TourPlanner<'a> {
    pub fn new(map: &'a TerrainMap) -> Self {
        Self {
            map,
            paths: PathRange::new(map.range()),
        }
    }

    /// Plan a tour from `start` through every target to `exit`.
    ///
    /// All positions are bounds-checked before any search runs. The first
    /// leg that cannot be completed fails the whole tour.
    pub fn plan(
        &mut self,
        start: Point,
        targets: Vec<Target>,
        exit: Point,
    ) -> Result<Tour, TourError> {
        self.check(Waypoint::Start, start)?;
        self.check(Waypoint::Exit, exit)?;
        for t in &targets {
            self.check(Waypoint::Target(t.name().to_string()), t.position())?;
        }

        let mut remaining = targets;
        let mut visited = Vec::with_capacity(remaining.len());
        let mut route = Vec::new();
        let mut legs = Vec::with_capacity(remaining.len() + 1);
        let mut current = start;

        while let Some(idx) = nearest(current, &remaining) {
            let target = remaining.remove(idx);
            let destination = Waypoint::Target(target.name().to_string());
            legs.push(self.leg(current, target.position(), destination, &mut route)?);
            current = target.position();
            visited.push(target);
        }
        legs.push(self.leg(current, exit, Waypoint::Exit, &mut route)?);

        let tour = Tour {
            start,
            exit,
            route,
            legs,
            visited,
        };
        log::info!(
            "planned tour {} -> {} through {} targets: {} steps, total cost {}",
            start,
            exit,
            tour.visited.len(),
            tour.route.len(),
            tour.total_cost()
        );
        Ok(tour)
    }

    fn check(&self, what: Waypoint, pos: Point) -> Result<(), TourError> {
        self.map
            .check(pos)
            .map_err(|source| TourError::OutOfBounds { what, source })
    }

    /// Search one leg and append its cells, minus the shared first cell.
    fn leg(
        &mut self,
        from: Point,
        to: Point,
        destination: Waypoint,
        route: &mut Vec<Point>,
    ) -> Result<Leg, TourError> {
        let state = self.paths.astar_search(self.map, from, to);
        let cells = state
            .path(from, to)
            .map_err(|source| TourError::Unreachable {
                destination: destination.clone(),
                from,
                source,
            })?;
        let cost = state.cost(to).unwrap_or_default();
        log::debug!(
            "leg to {destination} at {to}: cost {cost}, {} steps, {} cells expanded",
            cells.len() - 1,
            state.expanded()
        );

        let begin = route.len();
        route.extend_from_slice(&cells[1..]);
        Ok(Leg {
            destination,
            from,
            to,
            cost,
            route_span: begin..route.len(),
        })
    }
}

/// Plan a tour with a one-off [`TourPlanner`].
pub fn plan_tour(
    map: &TerrainMap,
    start: Point,
    targets: Vec<Target>,
    exit: Point,
) -> Result<Tour, TourError> {
    TourPlanner::new(map).plan(start, targets, exit)
}

/// Index of the target closest to `from`; ties go to the earliest entry.
///
/// The remaining targets keep the caller's order for the whole tour. They are
/// never re-sorted by an earlier pick's distances, so a tie is always settled
/// by list position and never by how far the targets were from a previous
/// stop.
pub fn nearest(from: Point, targets: &[Target]) -> Option<usize> {
    targets
        .iter()
        .enumerate()
        .min_by_key(|(_, t)| manhattan(from, t.position()))
        .map(|(i, _)| i)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that abort tour planning.
#[derive(Debug)]
pub enum TourError {
    /// The start, the exit or a target lies outside the map.
    OutOfBounds { what: Waypoint, source: MapError },
    /// No passable route leads from `from` to `destination`.
    Unreachable {
        destination: Waypoint,
        from: Point,
        source: UnreachableGoal,
    },
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { what, .. } => write!(f, "{what} is not on the map"),
            Self::Unreachable {
                destination,
                from,
                source,
            } => write!(
                f,
                "{destination} at {} cannot be reached from {from}",
                source.goal
            ),
        }
    }
}

impl std::error::Error for TourError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfBounds { source, .. } => Some(source),
            Self::Unreachable { source, .. } => Some(source),
        }
    }
}
