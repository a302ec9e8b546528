//! Layout strategies: given a scroll offset and viewport, produce the window of visible indices
//! and a rectangle for each.

mod fixed_grid;
mod jagged_column;
mod jagged_rows;
mod window;

pub use fixed_grid::FixedGridLayout;
pub use jagged_column::JaggedColumnLayout;
pub use jagged_rows::{JaggedRowsLayout, PackedRow};
pub use window::LayoutWindow;

use crate::{DataSource, Orientation, Rect, Size};

/// Everything a strategy needs for one pass, in main/cross coordinates.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LayoutInput {
    pub(crate) orientation: Orientation,
    pub(crate) offset_main: f32,
    pub(crate) offset_cross: f32,
    pub(crate) viewport_main: f32,
    pub(crate) viewport_cross: f32,
    pub(crate) count: usize,
    pub(crate) extra_cells: usize,
    /// Maximum number of slots that may receive a rectangle.
    pub(crate) slot_limit: usize,
    pub(crate) repeat: bool,
    pub(crate) repeat_margin: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LayoutOutput {
    /// Sum of item/row extents along the main axis.
    pub(crate) content_main: f32,
    pub(crate) content_cross: f32,
    /// Main-axis size the host should give its content (adds the repeat margins).
    pub(crate) scroll_main: f32,
    /// The offset after a repeat-mode wrap, when one happened.
    pub(crate) wrapped_main: Option<f32>,
}

/// The layout used by a [`crate::TableContentController`], chosen at construction.
#[derive(Clone, Debug)]
pub enum LayoutStrategy {
    FixedGrid(FixedGridLayout),
    JaggedColumn(JaggedColumnLayout),
    JaggedRows(JaggedRowsLayout),
}

impl LayoutStrategy {
    pub fn fixed_grid(cell_size: Size, column_count: usize) -> Self {
        Self::FixedGrid(FixedGridLayout::new(cell_size, column_count))
    }

    pub fn jagged_column() -> Self {
        Self::JaggedColumn(JaggedColumnLayout::new())
    }

    pub fn jagged_rows() -> Self {
        Self::JaggedRows(JaggedRowsLayout::new())
    }

    /// Only the fixed grid can wrap around.
    pub fn supports_repeat(&self) -> bool {
        matches!(self, Self::FixedGrid(_))
    }

    pub(crate) fn compute<S: DataSource>(
        &mut self,
        input: &LayoutInput,
        source: &mut S,
        window: &mut LayoutWindow,
    ) -> LayoutOutput {
        match self {
            Self::FixedGrid(l) => l.compute(input, window),
            Self::JaggedColumn(l) => l.compute(input, source, window),
            Self::JaggedRows(l) => l.compute(input, source, window),
        }
    }

    /// Canonical rectangle of `index`. Jagged layouts answer from their last pass.
    pub(crate) fn item_rect(
        &self,
        orientation: Orientation,
        count: usize,
        main_origin: f32,
        index: usize,
    ) -> Option<Rect> {
        match self {
            Self::FixedGrid(l) => (index < count).then(|| l.item_rect(orientation, index, main_origin)),
            Self::JaggedColumn(l) => l.item_rect(index),
            Self::JaggedRows(l) => l.item_rect(index),
        }
    }
}
