//! Named points the tour has to visit.

use std::hash::{Hash, Hasher};

use gridtour_core::{Color, Point};

/// A named target with a position on the map and a display colour.
///
/// Two targets are the same target when they have the same name, wherever
/// they stand.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    name: String,
    position: Point,
    color: Color,
}

impl Target {
    /// Create a target drawn in the default green.
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Self {
            name: name.into(),
            position,
            color: Color::GREEN,
        }
    }

    /// Set the display colour (builder).
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Target {}

impl Hash for Target {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// The four targets used when none are supplied.
pub fn default_roster() -> Vec<Target> {
    vec![
        Target::new("Carl", Point::from_row_col(6, 32)),
        Target::new("Daryl", Point::from_row_col(13, 31)),
        Target::new("Glen", Point::from_row_col(35, 35)),
        Target::new("Maggie", Point::from_row_col(32, 9)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_is_by_name() {
        let a = Target::new("Carl", Point::from_row_col(6, 32));
        let mut b = a.clone().with_color(Color::RED);
        b.set_position(Point::from_row_col(0, 0));
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);

        let mut c = Target::new("Carl", Point::ZERO);
        c.set_name("Judith");
        assert!(!set.contains(&c));
    }

    #[test]
    fn defaults() {
        let t = Target::new("Glen", Point::from_row_col(35, 35));
        assert_eq!(t.color(), Color::GREEN);
        let roster = default_roster();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster[3].name(), "Maggie");
        assert_eq!(roster[3].position(), Point::from_row_col(32, 9));
    }
}
