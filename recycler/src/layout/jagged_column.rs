use alloc::vec::Vec;

use crate::layout::{LayoutInput, LayoutOutput, LayoutWindow};
use crate::math::non_negative;
use crate::{DataSource, Orientation, Rect, ViewportWindower};

/// A single column of items whose main-axis sizes vary per item.
///
/// Every pass scans all items from index `0`, so sizes may change between passes without any
/// explicit invalidation of cached offsets. This is O(count) per pass; very long lists are better
/// served by [`crate::FixedGridLayout`].
#[derive(Clone, Debug, Default)]
pub struct JaggedColumnLayout {
    /// `offsets[i]` is the start of item `i`; the final entry is the content extent.
    offsets: Vec<f32>,
    cross_len: f32,
    orientation: Orientation,
}

impl JaggedColumnLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start offset of `index` as of the last pass.
    pub fn item_offset(&self, index: usize) -> Option<f32> {
        // The trailing entry is the extent, not an item.
        (index + 1 < self.offsets.len()).then(|| self.offsets[index])
    }

    pub(crate) fn item_rect(&self, index: usize) -> Option<Rect> {
        let start = self.item_offset(index)?;
        let end = self.offsets[index + 1];
        Some(self.orientation.rect(start, 0.0, end - start, self.cross_len))
    }

    pub(crate) fn compute<S: DataSource>(
        &mut self,
        input: &LayoutInput,
        source: &mut S,
        window: &mut LayoutWindow,
    ) -> LayoutOutput {
        let orientation = input.orientation;
        self.orientation = orientation;
        self.cross_len = non_negative(input.viewport_cross);
        self.offsets.clear();
        self.offsets.reserve(input.count + 1);

        let mut windower = ViewportWindower::new(input.offset_main, input.viewport_main);
        let mut cursor = 0.0f32;
        for index in 0..input.count {
            let size = non_negative(orientation.main_len(source.item_size(index)));
            self.offsets.push(cursor);
            windower.observe(index, cursor, size);
            cursor += size;
        }
        self.offsets.push(cursor);

        let out = LayoutOutput {
            content_main: cursor,
            content_cross: self.cross_len,
            scroll_main: cursor,
            wrapped_main: None,
        };

        let Some((first, last)) = windower.range() else {
            window.clear();
            return out;
        };
        let start = first.saturating_sub(input.extra_cells);
        let end = last
            .saturating_add(1)
            .saturating_add(input.extra_cells)
            .min(input.count);
        window.reset(start, end - start, None, input.slot_limit);

        for k in 0..window.len() {
            if let Some(rect) = self.item_rect(start + k) {
                window.set_slot(k, rect);
            }
        }
        out
    }
}
