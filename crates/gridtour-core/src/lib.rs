//! **gridtour-core**: value types shared by the route planning crates.
//!
//! This crate provides the geometry primitives ([`Point`], [`Range`]) used to
//! address grid cells and the packed RGB [`Color`] attached to targets.

pub mod geom;
pub mod style;

pub use geom::{Point, Range, RangeIter};
pub use style::{Color, ParseColorError};
