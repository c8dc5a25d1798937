use std::fmt;

use tilenav_core::Point;

/// Why a navigation query produced no result.
///
/// None of these are fatal; the caller decides whether to pick another
/// target, show a "no path" hint, or cancel the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The target is not connected to the start through traversible cells.
    Unreachable,
    /// A cell argument lies outside the navigator's grid.
    OutOfBounds(Point),
    /// A* closed the configured maximum number of cells without reaching
    /// the target.
    SearchLimit { expanded: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable => write!(f, "no path to target"),
            Self::OutOfBounds(p) => write!(f, "cell {p} is outside the grid"),
            Self::SearchLimit { expanded } => {
                write!(f, "search gave up after expanding {expanded} cells")
            }
        }
    }
}

impl std::error::Error for PathError {}
