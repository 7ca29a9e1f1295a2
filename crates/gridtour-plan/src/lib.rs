//! Multi-target route planning over terrain maps.
//!
//! - [`TerrainMap`]: a rectangular grid of [`Terrain`] parsed from text,
//!   searchable with `gridtour-paths`
//! - [`TourPlanner`]: visits every [`Target`] in greedy nearest-first order
//!   and finishes at an exit, producing a [`Tour`]
//! - [`Playback`] / [`Presenter`]: the step-by-step view of a tour handed to
//!   whatever displays it
//!
//! ```
//! use gridtour_core::Point;
//! use gridtour_plan::{Target, TerrainMap, plan_tour};
//!
//! let map = TerrainMap::parse("AAAAA\nAEEEA\nAAAAA").unwrap();
//! let targets = vec![Target::new("Carl", Point::from_row_col(0, 4))];
//! let tour = plan_tour(&map, Point::from_row_col(0, 0), targets, Point::from_row_col(2, 0)).unwrap();
//! assert_eq!(tour.visit_order(), vec!["Carl"]);
//! assert_eq!(tour.total_cost(), 4 + 6);
//! ```

mod map;
mod playback;
mod target;
mod terrain;
mod tour;

pub use map::{MapError, TerrainMap, map_file_name};
pub use playback::{FINISHED_MESSAGE, Frame, Playback, Presenter, play};
pub use target::{Target, default_roster};
pub use terrain::Terrain;
pub use tour::{Leg, Tour, TourError, TourPlanner, Waypoint, nearest, plan_tour};
