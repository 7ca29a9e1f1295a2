//! Command line options.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use gridtour_core::Point;
use gridtour_plan::Target;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "gridtour",
    about = "Plan a nearest-first route through targets on a terrain map and walk it."
)]
pub struct Opt {
    /// Scenario file (TOML) with the map, start, exit and targets.
    #[structopt(short, long, parse(from_os_str))]
    pub scenario: Option<PathBuf>,

    /// Map file, one row per line using A T G P E; `.txt` is appended when
    /// missing.
    #[structopt(short, long, parse(from_os_str))]
    pub map: Option<PathBuf>,

    /// Start cell as ROW,COL.
    #[structopt(long, parse(try_from_str = parse_cell))]
    pub start: Option<Point>,

    /// Exit cell as ROW,COL.
    #[structopt(long, parse(try_from_str = parse_cell))]
    pub exit: Option<Point>,

    /// Target to visit as NAME:ROW,COL. Repeat for more targets.
    #[structopt(short, long = "target", parse(try_from_str = parse_target))]
    pub targets: Vec<Target>,

    /// Visit the built-in four targets instead of any others given.
    #[structopt(long)]
    pub default_targets: bool,

    /// Pause between animation frames, in milliseconds.
    #[structopt(long)]
    pub frame_delay_ms: Option<u64>,

    /// How long the last frame stays up, in milliseconds.
    #[structopt(long)]
    pub hold_ms: Option<u64>,

    /// Output: `terminal` (animated), `plain` or `json`.
    #[structopt(short, long, default_value = "terminal")]
    pub output: Output,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,

    /// Write the log here instead of stderr.
    #[structopt(long, parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

/// How the planned tour is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Terminal,
    Plain,
    Json,
}

impl FromStr for Output {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "terminal" => Ok(Self::Terminal),
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output \u{201c}{other}\u{201d} (terminal, plain, json)")),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Terminal => "terminal",
            Self::Plain => "plain",
            Self::Json => "json",
        })
    }
}

/// Parse `ROW,COL` into a cell.
pub fn parse_cell(s: &str) -> Result<Point, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got \u{201c}{s}\u{201d}"))?;
    let num = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|e| format!("bad coordinate \u{201c}{}\u{201d} in \u{201c}{s}\u{201d}: {e}", part.trim()))
    };
    Ok(Point::from_row_col(num(row)?, num(col)?))
}

/// Parse `NAME:ROW,COL` into a target.
pub fn parse_target(s: &str) -> Result<Target, String> {
    let (name, cell) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:ROW,COL, got \u{201c}{s}\u{201d}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("target \u{201c}{s}\u{201d} has no name"));
    }
    Ok(Target::new(name, parse_cell(cell)?))
}
