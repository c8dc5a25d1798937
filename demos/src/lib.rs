//! Shared code for the tilenav demo: scenario parsing and a text overlay.
//!
//! A scenario is an ASCII map in the [`TileGrid`] format plus exactly one
//! `S` (start) and one `T` (target) marker, both standing on open cells.

use std::fmt;

use tilenav_core::{OPEN, Point, TileGrid};
use tilenav_paths::{Path, ReachableSet};

pub const START: char = 'S';
pub const TARGET: char = 'T';
const PATH: char = '*';
const IN_RANGE: char = '+';

/// Map used when no file is given.
pub const DEFAULT_MAP: &str = "\
S.........#.........
..........#.........
....####..#..####...
....#.....#.....#...
....#..#######..#...
....#...........#...
....######.######...
.........#.#........
..##.....#.#.....##.
..#..........#....#.
..#..#########....#.
.....#.......#.....T";

/// Movement range used when none is given.
pub const DEFAULT_RANGE: i32 = 6;

/// A map with a start and a target.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid: TileGrid,
    pub start: Point,
    pub target: Point,
}

impl Scenario {
    /// Parse a map containing one `S` and one `T` marker.
    pub fn parse(text: &str) -> Result<Self, DemoError> {
        let mut start = None;
        let mut target = None;
        let mut plain = String::with_capacity(text.len());

        for (y, line) in text.trim().lines().enumerate() {
            if y > 0 {
                plain.push('\n');
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let slot = match ch {
                    START => &mut start,
                    TARGET => &mut target,
                    _ => {
                        plain.push(ch);
                        continue;
                    }
                };
                if slot.replace(pos).is_some() {
                    return Err(DemoError::DuplicateMarker(ch));
                }
                plain.push(OPEN);
            }
        }

        let grid = TileGrid::from_ascii(&plain).map_err(DemoError::Map)?;
        Ok(Self {
            grid,
            start: start.ok_or(DemoError::MissingMarker(START))?,
            target: target.ok_or(DemoError::MissingMarker(TARGET))?,
        })
    }
}

/// Draw the map with the path and the movement range on top.
///
/// Path cells take precedence over range cells; markers over both.
pub fn overlay(scenario: &Scenario, path: Option<&Path>, range: &ReachableSet) -> String {
    let grid = &scenario.grid;
    let base = grid.to_string();
    let mut rows: Vec<Vec<char>> = base.lines().map(|l| l.chars().collect()).collect();

    let mut paint = |p: Point, ch: char| {
        if let Some(cell) = rows
            .get_mut(p.y as usize)
            .and_then(|row| row.get_mut(p.x as usize))
        {
            *cell = ch;
        }
    };
    for p in range.iter() {
        paint(p, IN_RANGE);
    }
    if let Some(path) = path {
        for &p in path {
            paint(p, PATH);
        }
    }
    paint(scenario.start, START);
    paint(scenario.target, TARGET);

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors raised while loading a demo scenario.
#[derive(Debug)]
pub enum DemoError {
    Io(std::io::Error),
    Map(tilenav_core::GridError),
    MissingMarker(char),
    DuplicateMarker(char),
    BadRange(String),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read map: {e}"),
            Self::Map(e) => write!(f, "bad map: {e}"),
            Self::MissingMarker(ch) => write!(f, "map has no \u{201c}{ch}\u{201d} marker"),
            Self::DuplicateMarker(ch) => {
                write!(f, "map has more than one \u{201c}{ch}\u{201d} marker")
            }
            Self::BadRange(s) => write!(f, "range must be an integer, got \u{201c}{s}\u{201d}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Map(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DemoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilenav_core::Terrain;
    use tilenav_paths::Navigator;

    #[test]
    fn default_map_parses() {
        let sc = Scenario::parse(DEFAULT_MAP).unwrap();
        assert_eq!(sc.start, Point::new(0, 0));
        assert_eq!(sc.target, Point::new(19, 11));
        assert!(sc.grid.is_traversible(sc.start));
        assert!(sc.grid.is_traversible(sc.target));
    }

    #[test]
    fn default_map_has_a_route() {
        let sc = Scenario::parse(DEFAULT_MAP).unwrap();
        let mut nav = Navigator::new(sc.grid.bounds());
        let path = nav.find_path(&sc.grid, sc.start, sc.target).unwrap();
        assert_eq!(path.target(), Some(sc.target));
    }

    #[test]
    fn markers_are_required_once() {
        assert!(matches!(
            Scenario::parse("S..\n..."),
            Err(DemoError::MissingMarker('T'))
        ));
        assert!(matches!(
            Scenario::parse("S.T\nS.."),
            Err(DemoError::DuplicateMarker('S'))
        ));
        assert!(matches!(
            Scenario::parse("S.T\n.x."),
            Err(DemoError::Map(_))
        ));
    }

    #[test]
    fn overlay_draws_layers() {
        let sc = Scenario::parse("S...\n.#..\n...T").unwrap();
        let mut nav = Navigator::new(sc.grid.bounds());
        let path = nav.find_path(&sc.grid, sc.start, sc.target).unwrap();
        let range = nav.compute_reachable(&sc.grid, sc.start, 1).unwrap();
        let text = overlay(&sc, Some(&path), &range);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with('S'));
        assert!(rows[1].contains('#'));
        assert!(rows[2].ends_with('T'));
        assert_eq!(text.matches(PATH).count(), path.len() - 1);
    }
}
