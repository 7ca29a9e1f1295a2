//! Scenario files and the settings resolved from them and the command line.
//!
//! A scenario is a TOML file such as:
//!
//! ```toml
//! map = "prison.txt"
//! start = [21, 13]
//! exit = [41, 20]
//!
//! [[targets]]
//! name = "Carl"
//! position = [6, 32]
//! color = "#228b22"
//!
//! [display]
//! frame_delay_ms = 100
//! hold_ms = 2000
//! ```
//!
//! A relative `map` path is taken relative to the scenario file.

use std::fmt;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gridtour_core::{Color, Point};
use gridtour_plan::{Target, default_roster};
use serde::Deserialize;

use crate::cli::{Opt, Output};

/// Start cell used when neither the scenario nor the command line gives one.
pub const DEFAULT_START: Point = Point::from_row_col(21, 13);

/// Exit cell used when neither the scenario nor the command line gives one.
pub const DEFAULT_EXIT: Point = Point::from_row_col(41, 20);

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub map: Option<PathBuf>,
    /// `[row, col]`
    pub start: Option<[i32; 2]>,
    /// `[row, col]`
    pub exit: Option<[i32; 2]>,
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
    #[serde(default)]
    pub display: DisplayParams,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSpec {
    pub name: String,
    /// `[row, col]`
    pub position: [i32; 2],
    pub color: Option<Color>,
}

impl From<TargetSpec> for Target {
    fn from(spec: TargetSpec) -> Self {
        let [row, col] = spec.position;
        let target = Target::new(spec.name, Point::from_row_col(row, col));
        match spec.color {
            Some(c) => target.with_color(c),
            None => target,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayParams {
    pub frame_delay_ms: u64,
    pub hold_ms: u64,
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self {
            frame_delay_ms: 100,
            hold_ms: 2000,
        }
    }
}

impl Scenario {
    /// Load a scenario file, resolving a relative map path against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut scenario: Scenario = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let (Some(map), Some(dir)) = (&scenario.map, path.parent()) {
            if map.is_relative() {
                scenario.map = Some(dir.join(map));
            }
        }
        log::debug!("loaded scenario {}", path.display());
        Ok(scenario)
    }
}

// ---------------------------------------------------------------------------
// Resolved settings
// ---------------------------------------------------------------------------

/// Everything a run needs, after merging the scenario with the command line.
#[derive(Debug)]
pub struct Settings {
    pub map: PathBuf,
    pub start: Point,
    pub exit: Point,
    pub targets: Vec<Target>,
    pub output: Output,
    pub frame_delay: Duration,
    pub hold: Duration,
}

impl Settings {
    /// Command-line values win over scenario values, which win over the
    /// built-in defaults. Targets fall back to [`default_roster`].
    pub fn resolve(opt: Opt, scenario: Scenario) -> Result<Self, ConfigError> {
        let map = opt.map.or(scenario.map).ok_or(ConfigError::NoMap)?;
        let cell = |rc: [i32; 2]| Point::from_row_col(rc[0], rc[1]);
        let start = opt.start.or(scenario.start.map(cell)).unwrap_or(DEFAULT_START);
        let exit = opt.exit.or(scenario.exit.map(cell)).unwrap_or(DEFAULT_EXIT);

        let targets = if opt.default_targets {
            default_roster()
        } else if !opt.targets.is_empty() {
            opt.targets
        } else if !scenario.targets.is_empty() {
            scenario.targets.into_iter().map(Target::from).collect()
        } else {
            log::info!("no targets given, using the default roster");
            default_roster()
        };

        let display = scenario.display;
        Ok(Self {
            map,
            start,
            exit,
            targets,
            output: opt.output,
            frame_delay: Duration::from_millis(opt.frame_delay_ms.unwrap_or(display.frame_delay_ms)),
            hold: Duration::from_millis(opt.hold_ms.unwrap_or(display.hold_ms)),
        })
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while collecting the run's inputs.
#[derive(Debug)]
pub enum ConfigError {
    /// No map was named anywhere.
    NoMap,
    /// The scenario file could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The scenario file is not a valid scenario.
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMap => f.write_str("no map given: pass --map or set `map` in the scenario"),
            Self::Read { path, .. } => write!(f, "cannot read scenario {}", path.display()),
            Self::Parse { path, .. } => write!(f, "invalid scenario {}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoMap => None,
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use structopt::StructOpt;

    fn opt(args: &[&str]) -> Opt {
        Opt::from_iter_safe(std::iter::once("gridtour").chain(args.iter().copied())).unwrap()
    }

    const SCENARIO: &str = r##"
map = "yard.txt"
start = [1, 2]
exit = [3, 4]

[[targets]]
name = "Carl"
position = [0, 1]
color = "#ff0000"

[[targets]]
name = "Glen"
position = [2, 2]

[display]
frame_delay_ms = 5
"##;

    #[test]
    fn scenario_values_are_used() {
        let scenario: Scenario = toml::from_str(SCENARIO).unwrap();
        let s = Settings::resolve(opt(&[]), scenario).unwrap();
        assert_eq!(s.map, PathBuf::from("yard.txt"));
        assert_eq!(s.start, Point::from_row_col(1, 2));
        assert_eq!(s.exit, Point::from_row_col(3, 4));
        assert_eq!(s.targets.len(), 2);
        assert_eq!(s.targets[0].color(), Color::RED);
        assert_eq!(s.targets[1].color(), Color::GREEN);
        assert_eq!(s.frame_delay, Duration::from_millis(5));
        assert_eq!(s.hold, Duration::from_millis(2000));
        assert_eq!(s.output, Output::Terminal);
    }

    #[test]
    fn command_line_wins() {
        let scenario: Scenario = toml::from_str(SCENARIO).unwrap();
        let s = Settings::resolve(
            opt(&["-m", "other", "--start", "0,0", "-t", "Daryl:1,1", "--frame-delay-ms", "0"]),
            scenario,
        )
        .unwrap();
        assert_eq!(s.map, PathBuf::from("other"));
        assert_eq!(s.start, Point::ZERO);
        assert_eq!(s.exit, Point::from_row_col(3, 4));
        assert_eq!(s.targets.len(), 1);
        assert_eq!(s.targets[0].name(), "Daryl");
        assert_eq!(s.frame_delay, Duration::ZERO);
    }

    #[test]
    fn defaults_fill_the_gaps() {
        let s = Settings::resolve(opt(&["-m", "prison"]), Scenario::default()).unwrap();
        assert_eq!(s.start, DEFAULT_START);
        assert_eq!(s.exit, DEFAULT_EXIT);
        assert_eq!(s.targets, default_roster());

        let scenario: Scenario = toml::from_str(SCENARIO).unwrap();
        let s = Settings::resolve(opt(&["--default-targets"]), scenario).unwrap();
        assert_eq!(s.targets.len(), 4);
    }

    #[test]
    fn map_is_required() {
        let err = Settings::resolve(opt(&[]), Scenario::default()).unwrap_err();
        assert!(matches!(err, ConfigError::NoMap));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<Scenario>("mapp = \"x\"").is_err());
        assert!(toml::from_str::<Scenario>("start = [1]").is_err());
        assert!(toml::from_str::<Scenario>("[[targets]]\nname = \"a\"\nposition = [0, 0]\ncolor = \"teal\"").is_err());
    }

    #[test]
    fn map_path_is_relative_to_the_scenario() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/prison.toml"));
        let scenario = Scenario::load(path).unwrap();
        let expected = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/prison.txt"));
        assert_eq!(scenario.map.as_deref(), Some(expected));
        assert_eq!(scenario.targets.len(), 4);
        assert_eq!(scenario.targets[1].color, Some(Color::RED));
        assert_eq!(scenario.display.frame_delay_ms, 80);

        let s = Settings::resolve(opt(&[]), scenario).unwrap();
        let map = gridtour_plan::TerrainMap::load(&s.map).unwrap();
        assert_eq!(map.size(), Point::new(42, 42));
        assert!(map.passable(s.start));
        assert!(map.passable(s.exit));
    }

    #[test]
    fn missing_scenario_file() {
        let err = Scenario::load(Path::new("no/such/scenario.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
