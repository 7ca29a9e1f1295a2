use gridtour_core::Point;

/// Manhattan (L1) distance between two points.
///
/// This is the A* estimate for 4-directional movement where every step costs
/// at least 1, and the distance proxy used to order tour targets.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Point::from_row_col(0, 0);
        let b = Point::from_row_col(4, 4);
        assert_eq!(manhattan(a, b), 8);
        assert_eq!(manhattan(b, a), 8);
        assert_eq!(manhattan(a, a), 0);
        assert_eq!(manhattan(Point::new(-2, 3), Point::new(1, -1)), 7);
    }
}
