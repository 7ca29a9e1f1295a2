//! Non-interactive output: a text overlay of the route, or JSON.

use std::fmt::Write as _;

use gridtour_core::Point;
use gridtour_plan::{TerrainMap, Tour};
use serde::Serialize;

/// Character marking the `i`th visited target (0-based): `1`..`9`, then
/// `a`..`z`, then `#`.
fn order_mark(i: usize) -> char {
    u32::try_from(i + 1)
        .ok()
        .and_then(|n| char::from_digit(n, 36))
        .unwrap_or('#')
}

fn overlay(map: &TerrainMap, tour: &Tour, p: Point) -> char {
    if p == tour.start() {
        return 'S';
    }
    if p == tour.exit() {
        return 'X';
    }
    if let Some(i) = tour.visited().iter().position(|t| t.position() == p) {
        return order_mark(i);
    }
    if tour.route().contains(&p) {
        return '*';
    }
    map.terrain_at(p).map_or('?', |t| t.rune())
}

/// Render the map with the route drawn on it, followed by one line per leg
/// and the totals.
pub fn plain(map: &TerrainMap, tour: &Tour) -> String {
    let mut s = String::new();
    for y in 0..map.height() {
        for x in 0..map.width() {
            s.push(overlay(map, tour, Point::new(x, y)));
        }
        s.push('\n');
    }
    s.push('\n');
    for (i, leg) in tour.legs().iter().enumerate() {
        let _ = writeln!(
            s,
            "{:>2}. {} -> {} {}: cost {}, {} steps",
            i + 1,
            leg.from,
            leg.to,
            leg.destination,
            leg.cost,
            leg.route_span.len()
        );
    }
    let _ = writeln!(s, "Visit order: {}", tour.visit_order().join(", "));
    let _ = writeln!(s, "Steps: {}", tour.route().len());
    let _ = writeln!(s, "Final leg cost: {}", tour.final_leg_cost());
    let _ = writeln!(s, "Total cost: {}", tour.total_cost());
    s
}

#[derive(Serialize)]
struct Report<'a> {
    width: i32,
    height: i32,
    total_cost: i32,
    final_leg_cost: i32,
    tour: &'a Tour,
}

/// The tour and its totals as pretty-printed JSON.
pub fn json(map: &TerrainMap, tour: &Tour) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report {
        width: map.width(),
        height: map.height(),
        total_cost: tour.total_cost(),
        final_leg_cost: tour.final_leg_cost(),
        tour,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridtour_plan::{Target, plan_tour};

    fn sample() -> (TerrainMap, Tour) {
        let map = TerrainMap::parse("AAAA\nAEEA\nAAAA").unwrap();
        let targets = vec![
            Target::new("Glen", Point::from_row_col(2, 3)),
            Target::new("Carl", Point::from_row_col(0, 3)),
        ];
        let tour = plan_tour(&map, Point::from_row_col(0, 0), targets, Point::from_row_col(2, 0))
            .unwrap();
        (map, tour)
    }

    #[test]
    fn plain_overlay() {
        let (map, tour) = sample();
        let out = plain(&map, &tour);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("S**1"));
        assert_eq!(lines.next(), Some("AEE*"));
        assert_eq!(lines.next(), Some("X**2"));
        assert!(out.contains("Visit order: Carl, Glen"));
        assert!(out.contains("Steps: 8"));
        assert!(out.contains("Final leg cost: 3"));
        assert!(out.contains("Total cost: 8"));
        assert!(out.contains("target Carl: cost 3, 3 steps"));
    }

    #[test]
    fn json_carries_totals() {
        let (map, tour) = sample();
        let v: serde_json::Value = serde_json::from_str(&json(&map, &tour).unwrap()).unwrap();
        assert_eq!(v["width"], 4);
        assert_eq!(v["height"], 3);
        assert_eq!(v["total_cost"], 8);
        assert_eq!(v["final_leg_cost"], 3);
        assert_eq!(v["tour"]["visited"][1]["name"], "Glen");
        assert_eq!(v["tour"]["route"].as_array().map(Vec::len), Some(8));
    }

    #[test]
    fn order_marks() {
        assert_eq!(order_mark(0), '1');
        assert_eq!(order_mark(8), '9');
        assert_eq!(order_mark(9), 'a');
        assert_eq!(order_mark(40), '#');
    }
}
