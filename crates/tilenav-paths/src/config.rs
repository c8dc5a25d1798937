//! Navigator settings.

/// Tunables for a [`Navigator`](crate::Navigator).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    /// Expansion iterations used by
    /// [`movement_range`](crate::Navigator::movement_range).
    pub movement_range: i32,

    /// Maximum number of cells A* may close before giving up with
    /// [`PathError::SearchLimit`](crate::PathError::SearchLimit).
    /// Zero disables the cap.
    pub max_expansions: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            movement_range: 20,
            max_expansions: 0,
        }
    }
}

impl NavConfig {
    /// Set the default movement range.
    pub fn with_movement_range(mut self, range: i32) -> Self {
        self.movement_range = range;
        self
    }

    /// Cap the number of cells a single A* search may close.
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = limit;
        self
    }

    /// Whether `expanded` closed cells exhaust the search budget.
    #[inline]
    pub(crate) fn limit_reached(&self, expanded: usize) -> bool {
        self.max_expansions > 0 && expanded >= self.max_expansions
    }
}
