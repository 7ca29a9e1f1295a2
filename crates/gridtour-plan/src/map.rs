//! The terrain grid: parsing, bounds and cost lookup.
//!
//! A [`TerrainMap`] is read once from text, one line per row and one
//! character per cell, and never changes afterwards. It is also the
//! [`AstarPather`] the planner searches over: a step may go to any of the
//! four cardinal neighbours that lies inside the map and is not a building,
//! and costs whatever the entered cell's terrain costs.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use gridtour_core::{Point, Range};
use gridtour_paths::{AstarPather, Pather, UNREACHABLE, WeightedPather, manhattan};

use crate::terrain::Terrain;

/// A rectangular grid of [`Terrain`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainMap {
    cells: Vec<Terrain>,
    width: i32,
    height: i32,
}

impl TerrainMap {
    /// Parse a map from text.
    ///
    /// See [`from_lines`](Self::from_lines) for the accepted format.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        Self::from_lines(s.lines())
    }

    /// Build a map from its rows.
    ///
    /// Each line is trimmed of surrounding whitespace. Blank lines before
    /// the first row and after the last one are ignored; a blank line between
    /// rows is a row of width zero. Every character must be one of the terrain
    /// runes and every row must be as wide as the first.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, MapError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut height = 0;
        let mut blank_after_rows: Option<usize> = None;

        for (idx, line) in lines.into_iter().enumerate() {
            let line_no = idx + 1;
            let line = line.as_ref().trim();
            if line.is_empty() {
                if width.is_some() && blank_after_rows.is_none() {
                    blank_after_rows = Some(line_no);
                }
                continue;
            }

            let row_start = cells.len();
            for (col, ch) in line.chars().enumerate() {
                let terrain = Terrain::from_rune(ch).ok_or(MapError::InvalidTerrainCharacter {
                    ch,
                    line: line_no,
                    column: col + 1,
                })?;
                cells.push(terrain);
            }
            let found = cells.len() - row_start;

            let expected = *width.get_or_insert(found);
            if let Some(blank) = blank_after_rows {
                return Err(MapError::RaggedRow {
                    line: blank,
                    expected,
                    found: 0,
                });
            }
            if found != expected {
                return Err(MapError::RaggedRow {
                    line: line_no,
                    expected,
                    found,
                });
            }
            height += 1;
        }

        let Some(width) = width else {
            return Err(MapError::Empty);
        };
        Ok(Self {
            cells,
            width: width as i32,
            height,
        })
    }

    /// Read and parse a map file.
    ///
    /// The name is resolved with [`map_file_name`] first, so `prison` loads
    /// `prison.txt`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = map_file_name(path.as_ref());
        let text = fs::read_to_string(&path).map_err(|source| MapError::Io {
            path: path.clone(),
            source,
        })?;
        let map = Self::parse(&text)?;
        log::debug!("loaded {} map from {}", map.range(), path.display());
        Ok(map)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a `Point` (columns, rows).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The map extent, anchored at the origin.
    #[inline]
    pub fn range(&self) -> Range {
        Range::sized(self.width, self.height)
    }

    /// Whether `p` lies inside the map.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range().contains(p)
    }

    /// Fail with [`MapError::OutOfBounds`] unless `p` lies inside the map.
    pub fn check(&self, p: Point) -> Result<(), MapError> {
        if self.contains(p) {
            Ok(())
        } else {
            Err(MapError::OutOfBounds {
                pos: p,
                bounds: self.range(),
            })
        }
    }

    /// Terrain at `p`.
    pub fn terrain_at(&self, p: Point) -> Result<Terrain, MapError> {
        self.check(p)?;
        Ok(self.cells[(p.y * self.width + p.x) as usize])
    }

    /// Cost of stepping onto `p`, `None` for a building.
    pub fn cost_of(&self, p: Point) -> Result<Option<i32>, MapError> {
        self.terrain_at(p).map(Terrain::cost)
    }

    /// Whether `p` is inside the map and enterable.
    pub fn passable(&self, p: Point) -> bool {
        self.terrain_at(p).is_ok_and(Terrain::passable)
    }

    /// The cells of row `y`, or `None` past the last row.
    pub fn row(&self, y: i32) -> Option<&[Terrain]> {
        if y < 0 || y >= self.height {
            return None;
        }
        let start = (y * self.width) as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Row-major iterator over every cell and its terrain.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Terrain)> + '_ {
        self.range().iter().zip(self.cells.iter().copied())
    }
}

/// Writes the map back out in its file format.
impl fmt::Display for TerrainMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                f.write_str("\n")?;
            }
            for t in self.row(y).unwrap_or_default() {
                write!(f, "{}", t.rune())?;
            }
        }
        Ok(())
    }
}

impl Pather for TerrainMap {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(
            p.neighbors_4()
                .into_iter()
                .filter(|&n| self.passable(n)),
        );
    }
}

impl WeightedPather for TerrainMap {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        self.cost_of(to).ok().flatten().unwrap_or(UNREACHABLE)
    }
}

impl AstarPather for TerrainMap {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

/// Resolve a user-supplied map name to a file path, appending `.txt` unless
/// the name already ends with it.
pub fn map_file_name(name: &Path) -> PathBuf {
    if name.extension().is_some_and(|ext| ext == "txt") {
        return name.to_path_buf();
    }
    let mut s = name.as_os_str().to_owned();
    s.push(".txt");
    PathBuf::from(s)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when reading or querying a map.
#[derive(Debug)]
pub enum MapError {
    /// A character outside the terrain legend was found.
    InvalidTerrainCharacter {
        ch: char,
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        column: usize,
    },
    /// A row is not as wide as the first row.
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// The input holds no rows.
    Empty,
    /// A coordinate lies outside the map.
    OutOfBounds { pos: Point, bounds: Range },
    /// The map file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTerrainCharacter { ch, line, column } => write!(
                f,
                "invalid terrain character \u{201c}{ch}\u{201d} on line {line} (column {column})"
            ),
            Self::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "map is not rectangular: line {line} has {found} cells, expected {expected}"
            ),
            Self::Empty => f.write_str("map is empty"),
            Self::OutOfBounds { pos, bounds } => {
                write!(f, "{pos} lies outside the map ({bounds})")
            }
            Self::Io { path, .. } => write!(f, "cannot read map {}", path.display()),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YARD: &str = "\
AATGP
AEEEA
AAAAA";

    #[test]
    fn parse_and_size() {
        let m = TerrainMap::parse(YARD).unwrap();
        assert_eq!(m.size(), Point::new(5, 3));
        assert_eq!(m.width(), 5);
        assert_eq!(m.height(), 3);
        assert_eq!(m.terrain_at(Point::from_row_col(0, 2)).unwrap(), Terrain::Dirt);
        assert_eq!(m.terrain_at(Point::from_row_col(1, 1)).unwrap(), Terrain::Building);
        assert_eq!(m.to_string(), YARD);
    }

    #[test]
    fn cost_lookup() {
        let m = TerrainMap::parse(YARD).unwrap();
        assert_eq!(m.cost_of(Point::from_row_col(0, 0)).unwrap(), Some(1));
        assert_eq!(m.cost_of(Point::from_row_col(0, 3)).unwrap(), Some(5));
        assert_eq!(m.cost_of(Point::from_row_col(0, 4)).unwrap(), Some(10));
        assert_eq!(m.cost_of(Point::from_row_col(1, 2)).unwrap(), None);
    }

    #[test]
    fn out_of_bounds_lookup() {
        let m = TerrainMap::parse(YARD).unwrap();
        for p in [Point::from_row_col(3, 0), Point::from_row_col(0, 5), Point::new(-1, 0)] {
            match m.cost_of(p) {
                Err(MapError::OutOfBounds { pos, bounds }) => {
                    assert_eq!(pos, p);
                    assert_eq!(bounds, Range::sized(5, 3));
                }
                other => panic!("expected OutOfBounds, got {other:?}"),
            }
        }
        assert!(!m.passable(Point::from_row_col(3, 0)));
    }

    #[test]
    fn invalid_character_names_char_and_line() {
        let err = TerrainMap::parse("AAAA\nAAAA\nAAXA\nAAAA").unwrap_err();
        match err {
            MapError::InvalidTerrainCharacter { ch, line, column } => {
                assert_eq!(ch, 'X');
                assert_eq!(line, 3);
                assert_eq!(column, 3);
            }
            other => panic!("unexpected error {other:?}"),
        }
        let msg = TerrainMap::parse("AA\nAA\nXA").unwrap_err().to_string();
        assert!(msg.contains('X'));
        assert!(msg.contains("line 3"));
    }

    #[test]
    fn invalid_character_reported_before_width() {
        let err = TerrainMap::parse("AAA\nAX").unwrap_err();
        assert!(matches!(err, MapError::InvalidTerrainCharacter { ch: 'X', line: 2, .. }));
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = TerrainMap::parse("AAA\nAA\nAAA").unwrap_err();
        assert!(matches!(
            err,
            MapError::RaggedRow {
                line: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn whitespace_and_blank_lines() {
        let m = TerrainMap::parse("\n  AAA \r\nTTT\r\n\n\n").unwrap();
        assert_eq!(m.size(), Point::new(3, 2));

        let err = TerrainMap::parse("AAA\n\nAAA").unwrap_err();
        assert!(matches!(err, MapError::RaggedRow { line: 2, found: 0, .. }));
    }

    #[test]
    fn empty_map() {
        assert!(matches!(TerrainMap::parse(""), Err(MapError::Empty)));
        assert!(matches!(TerrainMap::parse(" \n\n"), Err(MapError::Empty)));
    }

    #[test]
    fn neighbors_skip_buildings_and_edges() {
        let m = TerrainMap::parse(YARD).unwrap();
        let mut buf = Vec::new();
        m.neighbors(Point::from_row_col(0, 1), &mut buf);
        buf.sort();
        assert_eq!(buf, vec![Point::from_row_col(0, 0), Point::from_row_col(0, 2)]);
        assert_eq!(m.cost(Point::ZERO, Point::from_row_col(0, 4)), 10);
        assert_eq!(m.cost(Point::ZERO, Point::from_row_col(1, 1)), UNREACHABLE);
    }

    #[test]
    fn iter_row_major() {
        let m = TerrainMap::parse(YARD).unwrap();
        let cells: Vec<_> = m.iter().collect();
        assert_eq!(cells.len(), 15);
        assert_eq!(cells[0], (Point::ZERO, Terrain::Asphalt));
        assert_eq!(cells[6], (Point::from_row_col(1, 1), Terrain::Building));
        assert_eq!(m.row(2).map(<[Terrain]>::len), Some(5));
        assert!(m.row(3).is_none());
    }

    #[test]
    fn map_file_names() {
        assert_eq!(map_file_name(Path::new("prison")), PathBuf::from("prison.txt"));
        assert_eq!(map_file_name(Path::new("maps/prison.txt")), PathBuf::from("maps/prison.txt"));
        assert_eq!(map_file_name(Path::new("prison.v2")), PathBuf::from("prison.v2.txt"));
    }

    #[test]
    fn load_missing_file() {
        let err = TerrainMap::load("definitely/not/here").unwrap_err();
        match &err {
            MapError::Io { path, .. } => assert_eq!(path, Path::new("definitely/not/here.txt")),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }
}
