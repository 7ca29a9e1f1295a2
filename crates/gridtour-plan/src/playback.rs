//! The boundary between a planned tour and whatever displays it.
//!
//! [`Playback`] walks a [`Tour`] one route cell at a time and describes each
//! step as a [`Frame`]. A [`Presenter`] turns frames into output. Nothing in
//! this module knows how, or whether, frames are drawn.

use std::error::Error;
use std::thread;
use std::time::Duration;

use gridtour_core::Point;

use crate::map::TerrainMap;
use crate::target::Target;
use crate::tour::{Tour, Waypoint};

/// Message shown once the route has been walked to its end.
pub const FINISHED_MESSAGE: &str = "End of route";

/// Everything a presenter needs to draw one step of a tour.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub map: &'a TerrainMap,
    /// Route cells walked so far.
    pub route: &'a [Point],
    /// Where the walker stands.
    pub position: Point,
    /// Targets not reached yet.
    pub remaining: &'a [Target],
    /// Status for this step, such as the target just reached.
    pub message: Option<&'a str>,
    /// Total route cost, once the end is reached.
    pub total_cost: Option<i32>,
    pub finished: Option<&'a str>,
}

/// Step-by-step replay of a tour.
#[derive(Debug, Clone)]
pub struct Playback<'a> {
    map: &'a TerrainMap,
    tour: &'a Tour,
    shown: usize,
    position: Point,
    remaining: Vec<Target>,
    message: Option<String>,
}

impl<'a> Playback<'a> {
    /// Start a replay with the walker on the tour's start cell.
    pub fn new(map: &'a TerrainMap, tour: &'a Tour) -> Self {
        let mut pb = Self {
            map,
            tour,
            shown: 0,
            position: tour.start(),
            remaining: tour.visited().to_vec(),
            message: None,
        };
        // Targets standing on the start are reached before the first step.
        pb.arrive();
        pb
    }

    /// Advance one route cell. Returns `false` once the route is exhausted.
    pub fn step(&mut self) -> bool {
        let Some(&next) = self.tour.route().get(self.shown) else {
            return false;
        };
        self.shown += 1;
        self.position = next;
        self.arrive();
        true
    }

    /// Whether the walker has reached the end of the route.
    pub fn is_finished(&self) -> bool {
        self.shown == self.tour.route().len()
    }

    /// Number of route cells walked so far.
    pub fn steps_taken(&self) -> usize {
        self.shown
    }

    /// Describe the current step.
    pub fn frame(&self) -> Frame<'_> {
        let finished = self.is_finished();
        Frame {
            map: self.map,
            route: &self.tour.route()[..self.shown],
            position: self.position,
            remaining: &self.remaining,
            message: self.message.as_deref(),
            total_cost: finished.then(|| self.tour.total_cost()),
            finished: finished.then_some(FINISHED_MESSAGE),
        }
    }

    /// Drop every target whose leg ends at the current step.
    fn arrive(&mut self) {
        let mut reached = Vec::new();
        for leg in self.tour.legs() {
            if leg.route_span.end != self.shown {
                continue;
            }
            let Waypoint::Target(name) = &leg.destination else {
                continue;
            };
            if let Some(idx) = self.remaining.iter().position(|t| t.name() == name) {
                reached.push(self.remaining.remove(idx));
            }
        }
        self.message = match reached.as_slice() {
            [] => None,
            [one] => Some(format!("Reached {}", one.name())),
            many => Some(format!(
                "Reached {}",
                many.iter().map(Target::name).collect::<Vec<_>>().join(", ")
            )),
        };
    }
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

/// Output back-end for tour playback (terminal, window, log...).
pub trait Presenter {
    /// Prepare the output.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Draw one frame.
    fn present(&mut self, frame: &Frame<'_>) -> Result<(), Box<dyn Error>>;

    /// Whether the viewer asked to stop early.
    fn poll_quit(&mut self) -> Result<bool, Box<dyn Error>> {
        Ok(false)
    }

    /// Restore the output. Called even when playback fails.
    fn close(&mut self);
}

/// Drive `presenter` through a whole playback, pausing `delay` between
/// frames.
///
/// Returns `true` if the route was played to the end and `false` if the
/// presenter asked to stop first.
pub fn play<P: Presenter + ?Sized>(
    presenter: &mut P,
    mut playback: Playback<'_>,
    delay: Duration,
) -> Result<bool, Box<dyn Error>> {
    presenter.init()?;
    let result = play_frames(presenter, &mut playback, delay);
    presenter.close();
    result
}

fn play_frames<P: Presenter + ?Sized>(
    presenter: &mut P,
    playback: &mut Playback<'_>,
    delay: Duration,
) -> Result<bool, Box<dyn Error>> {
    loop {
        presenter.present(&playback.frame())?;
        if playback.is_finished() {
            return Ok(true);
        }
        if presenter.poll_quit()? {
            log::info!("playback stopped after {} steps", playback.steps_taken());
            return Ok(false);
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        playback.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::plan_tour;

    fn at(row: i32, col: i32) -> Point {
        Point::from_row_col(row, col)
    }

    fn line_map() -> TerrainMap {
        TerrainMap::parse("AAAAA").unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Point, usize, Vec<String>, Option<String>, Option<i32>, bool)>,
        quit_after: Option<usize>,
        closed: bool,
    }

    impl Presenter for Recorder {
        fn init(&mut self) -> Result<(), Box<dyn Error>> {
            Ok(())
        }

        fn present(&mut self, frame: &Frame<'_>) -> Result<(), Box<dyn Error>> {
            self.frames.push((
                frame.position,
                frame.route.len(),
                frame.remaining.iter().map(|t| t.name().to_string()).collect(),
                frame.message.map(str::to_string),
                frame.total_cost,
                frame.finished.is_some(),
            ));
            Ok(())
        }

        fn poll_quit(&mut self) -> Result<bool, Box<dyn Error>> {
            Ok(self.quit_after.is_some_and(|n| self.frames.len() >= n))
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[test]
    fn frames_follow_the_route() {
        let map = line_map();
        let targets = vec![Target::new("b", at(0, 3)), Target::new("a", at(0, 1))];
        let tour = plan_tour(&map, at(0, 0), targets, at(0, 4)).unwrap();

        let mut rec = Recorder::default();
        let done = play(&mut rec, Playback::new(&map, &tour), Duration::ZERO).unwrap();
        assert!(done);
        assert!(rec.closed);
        assert_eq!(rec.frames.len(), 5);

        let (pos, drawn, remaining, message, cost, finished) = &rec.frames[0];
        assert_eq!(*pos, at(0, 0));
        assert_eq!(*drawn, 0);
        assert_eq!(remaining, &["a", "b"]);
        assert!(message.is_none() && cost.is_none() && !finished);

        let (_, _, remaining, message, _, _) = &rec.frames[1];
        assert_eq!(remaining, &["b"]);
        assert_eq!(message.as_deref(), Some("Reached a"));

        assert_eq!(rec.frames[2].3, None);
        assert_eq!(rec.frames[3].3.as_deref(), Some("Reached b"));

        let (pos, drawn, remaining, _, cost, finished) = &rec.frames[4];
        assert_eq!(*pos, at(0, 4));
        assert_eq!(*drawn, 4);
        assert!(remaining.is_empty());
        assert_eq!(*cost, Some(4));
        assert!(*finished);
    }

    #[test]
    fn crossing_a_target_before_its_turn_does_not_count() {
        let map = TerrainMap::parse("AEA\nAAA").unwrap();
        // Both targets are two steps away, so list order wins and the way to
        // "first" runs across "second".
        let targets = vec![Target::new("first", at(0, 2)), Target::new("second", at(1, 1))];
        let tour = plan_tour(&map, at(0, 0), targets, at(1, 0)).unwrap();
        assert_eq!(tour.visit_order(), vec!["first", "second"]);
        assert_eq!(tour.route()[1], at(1, 1));

        let mut pb = Playback::new(&map, &tour);
        assert!(pb.step());
        assert!(pb.step());
        assert_eq!(pb.frame().position, at(1, 1));
        assert_eq!(pb.frame().message, None);
        assert_eq!(pb.frame().remaining.len(), 2);
        assert!(pb.step());
        assert!(pb.step());
        assert_eq!(pb.frame().message, Some("Reached first"));
        assert!(pb.step());
        assert!(pb.step());
        assert_eq!(pb.frame().message, Some("Reached second"));
        assert!(pb.frame().remaining.is_empty());
    }

    #[test]
    fn empty_route_finishes_immediately() {
        let map = line_map();
        let targets = vec![Target::new("here", at(0, 2))];
        let tour = plan_tour(&map, at(0, 2), targets, at(0, 2)).unwrap();
        let mut pb = Playback::new(&map, &tour);
        let frame = pb.frame();
        assert_eq!(frame.finished, Some(FINISHED_MESSAGE));
        assert_eq!(frame.total_cost, Some(0));
        assert_eq!(frame.message, Some("Reached here"));
        assert!(frame.remaining.is_empty());
        assert!(!pb.step());
    }

    #[test]
    fn presenter_can_stop_early() {
        let map = line_map();
        let tour = plan_tour(&map, at(0, 0), Vec::new(), at(0, 4)).unwrap();
        let mut rec = Recorder {
            quit_after: Some(2),
            ..Recorder::default()
        };
        let done = play(&mut rec, Playback::new(&map, &tour), Duration::ZERO).unwrap();
        assert!(!done);
        assert!(rec.closed);
        assert_eq!(rec.frames.len(), 2);
    }
}
