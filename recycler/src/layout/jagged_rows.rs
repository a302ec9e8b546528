use alloc::vec::Vec;

use crate::layout::{LayoutInput, LayoutOutput, LayoutWindow};
use crate::math::non_negative;
use crate::{DataSource, Rect, ViewportWindower};

/// A finalized row of a [`JaggedRowsLayout`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedRow {
    /// First item of the row.
    pub first: usize,
    /// One past the last item of the row.
    pub end: usize,
    /// Main-axis start of the row.
    pub offset: f32,
    /// Main-axis size: the largest item in the row.
    pub main_len: f32,
    /// Cross-axis space used by the row's items.
    pub cross_len: f32,
}

impl PackedRow {
    pub fn len(&self) -> usize {
        self.end - self.first
    }

    pub fn is_empty(&self) -> bool {
        self.first == self.end
    }
}

#[derive(Clone, Copy, Debug)]
struct OpenRow {
    first: usize,
    cursor: f32,
    main_len: f32,
}

impl OpenRow {
    fn starting_at(first: usize) -> Self {
        Self {
            first,
            cursor: 0.0,
            main_len: 0.0,
        }
    }
}

/// Items of varying 2D size packed left-to-right into rows.
///
/// The row budget is the viewport's cross-axis extent. An item that would overflow the current
/// row is held back and opens the next row once the current one is finalized with the height of
/// its tallest item; an item wider than the budget therefore sits alone in its row. Rows are
/// windowed like the single-column layout, and every item of a visible row is emitted.
#[derive(Clone, Debug, Default)]
pub struct JaggedRowsLayout {
    rows: Vec<PackedRow>,
    items: Vec<Rect>,
}

impl JaggedRowsLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows packed by the last pass.
    pub fn rows(&self) -> &[PackedRow] {
        &self.rows
    }

    pub(crate) fn item_rect(&self, index: usize) -> Option<Rect> {
        self.items.get(index).copied()
    }

    pub(crate) fn compute<S: DataSource>(
        &mut self,
        input: &LayoutInput,
        source: &mut S,
        window: &mut LayoutWindow,
    ) -> LayoutOutput {
        let orientation = input.orientation;
        let budget = non_negative(input.viewport_cross);
        self.rows.clear();
        self.items.clear();
        self.items.reserve(input.count);

        let mut windower = ViewportWindower::new(input.offset_main, input.viewport_main);
        let mut row_offset = 0.0f32;
        let mut widest = 0.0f32;
        let mut row = OpenRow::starting_at(0);

        for index in 0..input.count {
            let size = source.item_size(index);
            let main_len = non_negative(orientation.main_len(size));
            let cross_len = non_negative(orientation.cross_len(size));

            if index > row.first && row.cursor + cross_len > budget {
                self.finish_row(&row, index, &mut row_offset, &mut windower);
                widest = widest.max(row.cursor);
                row = OpenRow::starting_at(index);
            }

            self.items
                .push(orientation.rect(row_offset, row.cursor, main_len, cross_len));
            row.cursor += cross_len;
            row.main_len = row.main_len.max(main_len);
        }
        if input.count > row.first {
            self.finish_row(&row, input.count, &mut row_offset, &mut windower);
            widest = widest.max(row.cursor);
        }

        let out = LayoutOutput {
            content_main: row_offset,
            content_cross: widest,
            scroll_main: row_offset,
            wrapped_main: None,
        };

        let Some((first_row, last_row)) = windower.range() else {
            window.clear();
            return out;
        };
        let start = self.rows[first_row].first.saturating_sub(input.extra_cells);
        let end = self.rows[last_row]
            .end
            .saturating_add(input.extra_cells)
            .min(input.count);
        window.reset(start, end - start, None, input.slot_limit);

        for k in 0..window.len() {
            window.set_slot(k, self.items[start + k]);
        }
        out
    }

    fn finish_row(
        &mut self,
        row: &OpenRow,
        end: usize,
        row_offset: &mut f32,
        windower: &mut ViewportWindower,
    ) {
        let packed = PackedRow {
            first: row.first,
            end,
            offset: *row_offset,
            main_len: row.main_len,
            cross_len: row.cursor,
        };
        windower.observe(self.rows.len(), packed.offset, packed.main_len);
        self.rows.push(packed);
        *row_offset += row.main_len;
    }
}
