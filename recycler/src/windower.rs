/// Finds the contiguous run of main-axis intervals that overlaps a viewport.
///
/// Intervals must be fed in order of non-decreasing start (cumulative offsets of items or rows).
/// The window opens on the first interval overlapping `[scroll_offset, scroll_offset + extent)`,
/// stays open while intervals start before the viewport end, and closes on the first one that
/// does not. Once closed, every later interval is outside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportWindower {
    view_start: f32,
    view_end: f32,
    first: Option<usize>,
    last: Option<usize>,
    closed: bool,
}

impl ViewportWindower {
    pub fn new(scroll_offset: f32, viewport_extent: f32) -> Self {
        let extent = if viewport_extent > 0.0 {
            viewport_extent
        } else {
            0.0
        };
        Self {
            view_start: scroll_offset,
            view_end: scroll_offset + extent,
            first: None,
            last: None,
            closed: false,
        }
    }

    pub fn view_start(&self) -> f32 {
        self.view_start
    }

    pub fn view_end(&self) -> f32 {
        self.view_end
    }

    /// Half-open overlap test of `[start, start + size)` against the viewport.
    pub fn overlaps(&self, start: f32, size: f32) -> bool {
        start < self.view_end && start + size > self.view_start
    }

    /// Feeds the next interval. Returns `true` when `index` is inside the window.
    pub fn observe(&mut self, index: usize, start: f32, size: f32) -> bool {
        if self.closed {
            return false;
        }
        if start >= self.view_end {
            self.closed = true;
            return false;
        }
        // Once open, a following interval starts at or after the previous end, which is already
        // past `view_start`.
        if self.first.is_none() && start + size <= self.view_start {
            return false;
        }
        self.first.get_or_insert(index);
        self.last = Some(index);
        true
    }

    pub fn is_open(&self) -> bool {
        self.first.is_some() && !self.closed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// First and last (inclusive) observed index inside the window.
    pub fn range(&self) -> Option<(usize, usize)> {
        Some((self.first?, self.last?))
    }
}
