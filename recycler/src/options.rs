use alloc::vec::Vec;
use core::fmt;

use crate::{LayoutStrategy, Orientation};

/// Configuration for [`crate::TableContentController`].
///
/// Layout-specific settings (cell size, column count) live on the [`LayoutStrategy`] value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableOptions {
    pub orientation: Orientation,

    /// Cells kept bound beyond the strict viewport on each side, for pre-emptive navigation.
    ///
    /// Jagged layouts extend by items; the fixed grid extends by whole rows.
    pub extra_cell_count: usize,

    /// Grow the pool (by instantiating from the first cell) instead of leaving indices unbound.
    pub auto_cell_adding: bool,

    /// Log a warning for every index that could not get a cell.
    pub report_lack_of_cell: bool,

    /// Wrap-around scrolling. Fixed grid only.
    pub repeat: bool,

    /// Buffer region around the content in repeat mode. Should be at least twice the viewport's
    /// main-axis extent so the host can scroll freely between wraps.
    pub repeat_margin: f32,

    /// Set when another layout system also positions the content transform. The controller keeps
    /// working, but the host layout may override positions.
    pub external_layout: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            extra_cell_count: 0,
            auto_cell_adding: false,
            report_lack_of_cell: false,
            repeat: false,
            repeat_margin: 0.0,
            external_layout: false,
        }
    }
}

impl TableOptions {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_extra_cell_count(mut self, extra_cell_count: usize) -> Self {
        self.extra_cell_count = extra_cell_count;
        self
    }

    pub fn with_auto_cell_adding(mut self, auto_cell_adding: bool) -> Self {
        self.auto_cell_adding = auto_cell_adding;
        self
    }

    pub fn with_report_lack_of_cell(mut self, report_lack_of_cell: bool) -> Self {
        self.report_lack_of_cell = report_lack_of_cell;
        self
    }

    /// Enables repeat mode with the given buffer margin.
    ///
    /// Each item is bound to at most one cell, so a pass shows at most one period of rows. Keep
    /// the period (the grid's content extent) larger than the viewport plus one row: otherwise a
    /// viewport that straddles the period boundary leaves its trailing row empty.
    pub fn with_repeat(mut self, repeat: bool, repeat_margin: f32) -> Self {
        self.repeat = repeat;
        self.repeat_margin = repeat_margin;
        self
    }

    pub fn with_external_layout(mut self, external_layout: bool) -> Self {
        self.external_layout = external_layout;
        self
    }

    /// Lists configuration conflicts. None of them stops the controller; each describes how it
    /// degrades.
    pub fn validate(&self, layout: &LayoutStrategy, pool_capacity: usize) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.external_layout {
            issues.push(ConfigIssue::ExternalLayout);
        }
        if pool_capacity == 0 {
            issues.push(ConfigIssue::EmptyPool);
        }
        if self.repeat && !layout.supports_repeat() {
            issues.push(ConfigIssue::RepeatUnsupported);
        }
        if self.repeat && (self.repeat_margin.is_nan() || self.repeat_margin < 0.0) {
            issues.push(ConfigIssue::NegativeRepeatMargin);
        }
        if let LayoutStrategy::FixedGrid(grid) = layout {
            if grid.configured_columns() == 0 {
                issues.push(ConfigIssue::ZeroColumns);
            }
            let main = self.orientation.main_len(grid.cell_size());
            if main.is_nan() || main <= 0.0 {
                issues.push(ConfigIssue::EmptyCellSize);
            }
        }
        issues
    }
}

/// A configuration conflict detected at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigIssue {
    /// Another layout system also drives the content transform.
    ExternalLayout,
    /// No template cells: nothing can be shown, and the pool has nothing to grow from.
    EmptyPool,
    /// Repeat mode was requested for a jagged layout; it is ignored.
    RepeatUnsupported,
    /// The repeat margin is negative (or NaN); it is treated as `0`.
    NegativeRepeatMargin,
    /// A fixed grid with zero columns; it is treated as one column.
    ZeroColumns,
    /// A fixed grid whose cells have no main-axis size; the grid stays empty.
    EmptyCellSize,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ExternalLayout => {
                "an external layout also controls the content transform; positions may be overridden"
            }
            Self::EmptyPool => "the cell pool is empty; no item can be shown",
            Self::RepeatUnsupported => "repeat mode is only supported by the fixed grid; ignoring it",
            Self::NegativeRepeatMargin => "repeat margin must be non-negative; using 0",
            Self::ZeroColumns => "column count must be at least 1; using 1",
            Self::EmptyCellSize => "fixed grid cell size is zero along the scroll axis",
        })
    }
}
