use crate::layout::{LayoutInput, LayoutOutput, LayoutWindow};
use crate::math::{self, ceil, floor, to_i64};
use crate::{Orientation, Rect, Size};

/// Uniform cells in `column_count` columns.
///
/// Windowing is O(1): visible rows follow directly from `offset / cell_main`. In repeat mode the
/// rows tile endlessly; the scroll offset is kept inside the band
/// `[margin / 2, margin + extent + margin / 2)` and rows wrap modulo the row count.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedGridLayout {
    cell_size: Size,
    column_count: usize,
}

impl FixedGridLayout {
    /// `column_count == 0` is treated as `1` (and reported as a configuration issue).
    pub fn new(cell_size: Size, column_count: usize) -> Self {
        Self {
            cell_size,
            column_count,
        }
    }

    pub fn cell_size(&self) -> Size {
        self.cell_size
    }

    /// The configured column count, as given.
    pub fn configured_columns(&self) -> usize {
        self.column_count
    }

    /// The effective column count (at least `1`).
    pub fn column_count(&self) -> usize {
        self.column_count.max(1)
    }

    pub fn row_count(&self, count: usize) -> usize {
        count.div_ceil(self.column_count())
    }

    /// Main-axis extent of `count` items: `ceil(count / columns) * cell_main`.
    pub fn content_extent(&self, orientation: Orientation, count: usize) -> f32 {
        self.row_count(count) as f32 * math::non_negative(orientation.main_len(self.cell_size))
    }

    /// Rectangle of `index` in the canonical (non-wrapped) position. `main_origin` is the leading
    /// repeat margin, or `0`.
    pub(crate) fn item_rect(&self, orientation: Orientation, index: usize, main_origin: f32) -> Rect {
        let cols = self.column_count();
        let (main_len, cross_len) = self.axis_lens(orientation);
        let row = (index / cols) as f32;
        let col = (index % cols) as f32;
        orientation.rect(main_origin + row * main_len, col * cross_len, main_len, cross_len)
    }

    fn axis_lens(&self, orientation: Orientation) -> (f32, f32) {
        (
            math::non_negative(orientation.main_len(self.cell_size)),
            math::non_negative(orientation.cross_len(self.cell_size)),
        )
    }

    /// Inclusive column range intersecting the viewport along the cross axis.
    fn radix(&self, input: &LayoutInput) -> (usize, usize) {
        let cols = self.column_count();
        let (_, cross_len) = self.axis_lens(input.orientation);
        if cols == 1 || cross_len <= 0.0 || input.viewport_cross <= 0.0 {
            return (0, cols - 1);
        }
        let last = cols as i64 - 1;
        let left = to_i64(floor(input.offset_cross / cross_len)).clamp(0, last);
        let right = (to_i64(ceil((input.offset_cross + input.viewport_cross) / cross_len)) - 1)
            .clamp(left, last);
        (left as usize, right as usize)
    }

    pub(crate) fn compute(&self, input: &LayoutInput, window: &mut LayoutWindow) -> LayoutOutput {
        let orientation = input.orientation;
        let cols = self.column_count();
        let (main_len, cross_len) = self.axis_lens(orientation);
        let rows = self.row_count(input.count);
        let content_main = rows as f32 * main_len;
        let mut out = LayoutOutput {
            content_main,
            content_cross: cols as f32 * cross_len,
            scroll_main: content_main,
            wrapped_main: None,
        };

        if input.count == 0 || main_len <= 0.0 || input.viewport_main <= 0.0 {
            window.clear();
            return out;
        }

        if input.repeat {
            self.compute_repeat(input, window, &mut out);
            return out;
        }

        let extra_rows = input.extra_cells.div_ceil(cols) as i64;
        let first_row = (to_i64(floor(input.offset_main / main_len)) - extra_rows).max(0);
        let end_row = (to_i64(ceil((input.offset_main + input.viewport_main) / main_len))
            + extra_rows)
            .min(rows as i64);
        if first_row >= end_row {
            window.clear();
            return out;
        }

        let start = first_row as usize * cols;
        let end = (end_row as usize * cols).min(input.count);
        window.reset(start, end - start, None, input.slot_limit);

        let (left, right) = self.radix(input);
        for k in 0..window.len() {
            let index = start + k;
            let col = index % cols;
            if col < left || col > right {
                continue;
            }
            let row = (index / cols) as f32;
            window.set_slot(
                k,
                orientation.rect(row * main_len, col as f32 * cross_len, main_len, cross_len),
            );
        }
        out
    }

    fn compute_repeat(&self, input: &LayoutInput, window: &mut LayoutWindow, out: &mut LayoutOutput) {
        let orientation = input.orientation;
        let cols = self.column_count();
        let (main_len, cross_len) = self.axis_lens(orientation);
        let rows = self.row_count(input.count);
        let period_main = out.content_main;
        let margin = math::non_negative(input.repeat_margin);
        out.scroll_main = period_main + 2.0 * margin;

        let band_start = margin / 2.0;
        let band_end = margin + period_main + margin / 2.0;
        let mut offset = input.offset_main;
        if offset < band_start || offset >= band_end {
            offset = band_start + math::wrap_f32(offset - band_start, period_main);
            rdebug!(
                from = input.offset_main,
                to = offset,
                "FixedGrid: wrapped repeat offset"
            );
            out.wrapped_main = Some(offset);
        }

        let extra_rows = input.extra_cells.div_ceil(cols) as i64;
        let first_row = to_i64(floor((offset - margin) / main_len)) - extra_rows;
        let end_row =
            to_i64(ceil((offset + input.viewport_main - margin) / main_len)) + extra_rows;
        let mut row_span = (end_row - first_row).max(0) as usize;
        if row_span > rows {
            rwarn!(
                rows_needed = row_span,
                rows,
                "FixedGrid: viewport exceeds one repeat period; each item is shown once"
            );
            row_span = rows;
        }

        let period = rows * cols;
        let start = math::wrap(first_row, rows as i64) as usize * cols;
        window.reset(start, row_span * cols, Some(period), input.slot_limit);

        let (left, right) = self.radix(input);
        for k in 0..window.len() {
            let index = window.index_at(k);
            let col = k % cols;
            if index >= input.count || col < left || col > right {
                continue;
            }
            let virtual_row = first_row + (k / cols) as i64;
            window.set_slot(
                k,
                orientation.rect(
                    margin + virtual_row as f32 * main_len,
                    col as f32 * cross_len,
                    main_len,
                    cross_len,
                ),
            );
        }
    }
}

