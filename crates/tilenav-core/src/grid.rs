//! Traversability grids.
//!
//! [`Terrain`] is the seam through which the navigation algorithms learn
//! which cells can be walked on. [`TileGrid`] is the owned, fixed-size
//! implementation used by most callers.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Point, Range};
use crate::neighbors::{push_neighbors, push_traversible_neighbors};

/// Rune for a blocked cell in the ASCII map format.
pub const BLOCKED: char = '#';
/// Rune for a traversible cell in the ASCII map format.
pub const OPEN: char = '.';

/// Read-only view of a grid's traversability.
///
/// Implementations must return `false` from [`is_traversible`] for any point
/// outside [`bounds`], and must not change answers while a search runs.
///
/// [`is_traversible`]: Terrain::is_traversible
/// [`bounds`]: Terrain::bounds
pub trait Terrain {
    /// The cells of the grid.
    fn bounds(&self) -> Range;

    /// Whether a unit may stand on `p`.
    fn is_traversible(&self, p: Point) -> bool;

    /// In-bounds Moore neighbours of `p`, walls included.
    fn neighbors(&self, p: Point) -> Vec<Point> {
        let mut buf = Vec::with_capacity(8);
        push_neighbors(self, p, &mut buf);
        buf
    }

    /// Neighbours of `p` reachable in one step without cutting a corner.
    fn traversible_neighbors(&self, p: Point) -> Vec<Point> {
        let mut buf = Vec::with_capacity(8);
        push_traversible_neighbors(self, p, &mut buf);
        buf
    }
}

impl<T: Terrain + ?Sized> Terrain for &T {
    fn bounds(&self) -> Range {
        (**self).bounds()
    }

    fn is_traversible(&self, p: Point) -> bool {
        (**self).is_traversible(p)
    }
}

/// A fixed-size W×H grid of traversability flags, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTileGrid")
)]
pub struct TileGrid {
    cells: Vec<bool>,
    width: i32,
    height: i32,
}

impl TileGrid {
    /// Create a grid with every cell traversible. Negative sizes clamp to 0.
    pub fn new(width: i32, height: i32) -> Self {
        Self::from_fn(width, height, |_| true)
    }

    /// Create a grid asking `traversible` about every cell once, row by row.
    pub fn from_fn(width: i32, height: i32, mut traversible: impl FnMut(Point) -> bool) -> Self {
        let bounds = Range::with_size(width, height);
        let cells = bounds.iter().map(&mut traversible).collect();
        Self {
            cells,
            width: bounds.width(),
            height: bounds.height(),
        }
    }

    /// Wrap an existing row-major flag buffer.
    ///
    /// `cells` must hold exactly `width * height` flags and neither size may
    /// be negative.
    pub fn from_cells(width: i32, height: i32, cells: Vec<bool>) -> Result<Self, GridError> {
        let expected = (width >= 0 && height >= 0)
            .then(|| (width as usize).checked_mul(height as usize))
            .flatten();
        if expected != Some(cells.len()) {
            return Err(GridError::SizeMismatch {
                width,
                height,
                cells: cells.len(),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Parse a map drawn with [`BLOCKED`] and [`OPEN`] runes, one row per line.
    ///
    /// Surrounding whitespace of the whole string is ignored; every line must
    /// have the same width.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let mut cells = Vec::new();
        let mut width: Option<usize> = None;
        let mut height = 0;

        for (y, line) in s.trim().lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let mut w = 0;
            for (x, ch) in line.chars().enumerate() {
                match ch {
                    OPEN => cells.push(true),
                    BLOCKED => cells.push(false),
                    _ => {
                        return Err(GridError::InvalidRune {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        });
                    }
                }
                w += 1;
            }
            match width {
                Some(expected) if expected != w => {
                    return Err(GridError::InconsistentWidth { line: y });
                }
                _ => width = Some(w),
            }
            height += 1;
        }

        Ok(Self {
            cells,
            width: width.unwrap_or(0) as i32,
            height,
        })
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Mark a cell as open or blocked, e.g. for an obstacle that appeared
    /// between two searches.
    pub fn set_traversible(&mut self, p: Point, traversible: bool) -> Result<(), GridError> {
        let i = self.index(p).ok_or(GridError::OutOfBounds(p))?;
        self.cells[i] = traversible;
        Ok(())
    }

    /// Number of traversible cells.
    pub fn count_traversible(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }
}

impl Terrain for TileGrid {
    #[inline]
    fn bounds(&self) -> Range {
        Range::with_size(self.width, self.height)
    }

    #[inline]
    fn is_traversible(&self, p: Point) -> bool {
        self.index(p)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or(false)
    }
}

impl FromStr for TileGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s)
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for x in 0..self.width {
                let ch = if self.is_traversible(Point::new(x, y)) {
                    OPEN
                } else {
                    BLOCKED
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// Errors raised while building or editing a [`TileGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A cell reference outside the grid.
    OutOfBounds(Point),
    /// A map line whose width differs from the first line.
    InconsistentWidth { line: usize },
    /// A map rune other than [`OPEN`] or [`BLOCKED`].
    InvalidRune { ch: char, pos: Point },
    /// A flag buffer whose length does not match the grid size.
    SizeMismatch { width: i32, height: i32, cells: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "cell {p} is outside the grid"),
            Self::InconsistentWidth { line } => {
                write!(f, "map line {line} has a different width than line 0")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "map contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::SizeMismatch {
                width,
                height,
                cells,
            } => write!(f, "{width}x{height} grid cannot hold {cells} cells"),
        }
    }
}

impl std::error::Error for GridError {}

/// Unchecked wire form of a [`TileGrid`], validated by
/// [`TileGrid::from_cells`] on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTileGrid {
    cells: Vec<bool>,
    width: i32,
    height: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTileGrid> for TileGrid {
    type Error = GridError;

    fn try_from(raw: RawTileGrid) -> Result<Self, Self::Error> {
        Self::from_cells(raw.width, raw.height, raw.cells)
    }
}
