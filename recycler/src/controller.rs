use alloc::vec::Vec;

use crate::layout::{LayoutInput, LayoutWindow};
use crate::math::non_negative;
use crate::pool::{CellId, CellPool, ReconcileReport};
use crate::{
    Align, ConfigIssue, DataSource, LayoutStrategy, Point, Rect, Size, TableOptions, TableState,
};

/// Ticks after construction (or [`TableContentController::reactivate`]) that run a layout pass
/// even when nothing is dirty, so host geometry can settle.
const SETTLE_TICKS: u8 = 2;

/// Summary of one layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassReport {
    pub start_index: usize,
    /// One past the last index of the window (unwrapped in repeat mode).
    pub end_index: usize,
    /// Main-axis content extent.
    pub content_extent: f32,
    pub cells: ReconcileReport,
    /// Window indices that got no rectangle because the pool budget was exceeded.
    pub starved: usize,
    /// The layout wrapped the scroll offset (repeat mode); another pass follows next tick.
    pub wrapped: bool,
}

impl PassReport {
    /// Indices of the window left without a cell this pass.
    pub fn lacking(&self) -> usize {
        self.cells.lacking + self.starved
    }
}

/// Drives a [`LayoutStrategy`] and a [`CellPool`] from host ticks.
///
/// This type does not hold the data source or draw anything. Adapters drive it by calling:
/// - `set_viewport` when the viewport geometry is known or changes
/// - `on_scroll` (or `set_content_offset`) when the content offset changes
/// - `update(&mut source)` once per tick
///
/// and then position each active cell at the rectangle reported by `for_each_active_cell`.
#[derive(Clone, Debug)]
pub struct TableContentController<H> {
    options: TableOptions,
    layout: LayoutStrategy,
    pool: CellPool<H>,
    window: LayoutWindow,
    requested: Vec<usize>,
    config_issues: Vec<ConfigIssue>,

    content_offset: Point,
    viewport: Option<Size>,
    content_size: Size,
    scroll_main: f32,
    total_count: usize,
    wrap_shift: Point,

    needs_layout: bool,
    in_layout: bool,
    settle_ticks: u8,
    last_report: Option<PassReport>,
}

impl<H> TableContentController<H> {
    /// Creates a controller whose pool holds `cells`, the host's pre-instantiated views.
    ///
    /// Configuration conflicts are logged and kept in [`Self::config_issues`]; none of them
    /// prevents construction.
    pub fn new(
        options: TableOptions,
        layout: LayoutStrategy,
        cells: impl IntoIterator<Item = H>,
    ) -> Self {
        let mut pool = CellPool::new(cells);
        pool.set_report_lack_of_cell(options.report_lack_of_cell);
        let config_issues = options.validate(&layout, pool.capacity());
        #[cfg(feature = "tracing")]
        for issue in &config_issues {
            rwarn!(%issue, "TableContentController: configuration issue");
        }
        rdebug!(
            capacity = pool.capacity(),
            repeat = options.repeat,
            extra_cell_count = options.extra_cell_count,
            "TableContentController::new"
        );
        Self {
            options,
            layout,
            pool,
            window: LayoutWindow::new(),
            requested: Vec::new(),
            config_issues,
            content_offset: Point::ZERO,
            viewport: None,
            content_size: Size::ZERO,
            scroll_main: 0.0,
            total_count: 0,
            wrap_shift: Point::ZERO,
            needs_layout: true,
            in_layout: false,
            settle_ticks: SETTLE_TICKS,
            last_report: None,
        }
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Replaces the options, re-validates them, and schedules a layout pass.
    pub fn set_options(&mut self, options: TableOptions) {
        self.pool.set_report_lack_of_cell(options.report_lack_of_cell);
        self.config_issues = options.validate(&self.layout, self.pool.capacity());
        self.options = options;
        self.needs_layout = true;
    }

    pub fn layout(&self) -> &LayoutStrategy {
        &self.layout
    }

    /// Mutable access to the strategy; schedules a layout pass.
    pub fn layout_mut(&mut self) -> &mut LayoutStrategy {
        self.needs_layout = true;
        &mut self.layout
    }

    pub fn pool(&self) -> &CellPool<H> {
        &self.pool
    }

    pub fn window(&self) -> &LayoutWindow {
        &self.window
    }

    pub fn config_issues(&self) -> &[ConfigIssue] {
        &self.config_issues
    }

    pub fn last_report(&self) -> Option<PassReport> {
        self.last_report
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Item count seen by the last pass.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    /// Content size from the last pass; the main-axis component is the content extent.
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn content_extent(&self) -> f32 {
        self.options.orientation.main_len(self.content_size)
    }

    /// The size the host should give its scrollable content. Equals [`Self::content_size`]
    /// except in repeat mode, where the main axis gains the leading and trailing margins.
    pub fn scroll_extent(&self) -> Size {
        let o = self.options.orientation;
        o.size(self.scroll_main, o.cross_len(self.content_size))
    }

    /// Total offset the layout added to the content offset through repeat-mode wraps.
    ///
    /// Observers that remember an offset across ticks add the change of this value to stay in
    /// sync.
    pub fn wrap_shift(&self) -> Point {
        self.wrap_shift
    }

    fn repeat_enabled(&self) -> bool {
        self.options.repeat && self.layout.supports_repeat()
    }

    fn main_origin(&self) -> f32 {
        if self.repeat_enabled() {
            non_negative(self.options.repeat_margin)
        } else {
            0.0
        }
    }

    pub fn max_content_offset(&self) -> Point {
        let Some(view) = self.viewport else {
            return Point::ZERO;
        };
        let o = self.options.orientation;
        let main = (self.scroll_main - o.main_len(view)).max(0.0);
        let cross = (o.cross_len(self.content_size) - o.cross_len(view)).max(0.0);
        o.point(main, cross)
    }

    pub fn clamp_content_offset(&self, offset: Point) -> Point {
        let max = self.max_content_offset();
        Point::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y))
    }

    /// Sets the viewport size. The controller no-ops every tick until this is called.
    pub fn set_viewport(&mut self, viewport: Size) {
        if self.viewport == Some(viewport) {
            return;
        }
        self.viewport = Some(viewport);
        self.needs_layout = true;
    }

    /// Forgets the viewport (e.g. the host container went away).
    pub fn clear_viewport(&mut self) {
        self.viewport = None;
    }

    /// Records a new content offset and schedules a layout pass for the next tick.
    pub fn set_content_offset(&mut self, offset: Point) {
        self.scroll_changed(offset);
    }

    /// The host's scroll-change handler: records the offset and lays out immediately.
    ///
    /// A change that arrives while a pass is running only marks the layout dirty, so the pass is
    /// never re-entered; the next tick picks it up.
    pub fn on_scroll<S>(&mut self, offset: Point, source: &mut S) -> Option<PassReport>
    where
        S: DataSource<Cell = H>,
    {
        if !self.scroll_changed(offset) {
            return None;
        }
        let viewport = self.viewport?;
        Some(self.layout_pass(source, viewport))
    }

    /// Returns `true` when a pass should run right away.
    fn scroll_changed(&mut self, offset: Point) -> bool {
        if self.content_offset != offset {
            self.content_offset = offset;
            self.needs_layout = true;
        }
        !self.in_layout && self.needs_layout
    }

    /// Forces recomputation without releasing bound cells (geometry changed, membership did not).
    pub fn mark_needs_relayout(&mut self) {
        self.needs_layout = true;
    }

    /// Releases every cell and forces a full layout pass on the next tick, so every visible
    /// index is bound (and set up) again.
    pub fn refresh<S>(&mut self, source: &mut S) -> usize
    where
        S: DataSource<Cell = H>,
    {
        let released = self.pool.release_all(source);
        self.window.clear();
        self.needs_layout = true;
        rdebug!(released, "TableContentController::refresh");
        released
    }

    /// Restarts the settle period, as after construction (e.g. when the host re-activates).
    pub fn reactivate(&mut self) {
        self.settle_ticks = SETTLE_TICKS;
        self.needs_layout = true;
    }

    /// Runs a layout pass if one is due. Call once per tick.
    ///
    /// Returns `None` when nothing was dirty or when no viewport is known yet.
    pub fn update<S>(&mut self, source: &mut S) -> Option<PassReport>
    where
        S: DataSource<Cell = H>,
    {
        let viewport = self.viewport?;
        let settling = self.settle_ticks > 0;
        if settling {
            self.settle_ticks -= 1;
        }
        if !settling && !self.needs_layout {
            return None;
        }
        Some(self.layout_pass(source, viewport))
    }

    fn layout_pass<S>(&mut self, source: &mut S, viewport: Size) -> PassReport
    where
        S: DataSource<Cell = H>,
    {
        // Cleared first: invalidations raised during the pass land on the next tick.
        self.needs_layout = false;
        self.in_layout = true;

        let o = self.options.orientation;
        let count = source.total_count();
        let allow_growth = self.options.auto_cell_adding;
        let input = LayoutInput {
            orientation: o,
            offset_main: o.main_of(self.content_offset),
            offset_cross: o.cross_of(self.content_offset),
            viewport_main: o.main_len(viewport),
            viewport_cross: o.cross_len(viewport),
            count,
            extra_cells: self.options.extra_cell_count,
            slot_limit: if allow_growth {
                usize::MAX
            } else {
                self.pool.capacity()
            },
            repeat: self.repeat_enabled(),
            repeat_margin: self.options.repeat_margin,
        };
        let out = self.layout.compute(&input, source, &mut self.window);
        self.total_count = count;
        self.content_size = o.size(out.content_main, out.content_cross);
        self.scroll_main = out.scroll_main;

        if let Some(main) = out.wrapped_main {
            let cur = self.content_offset;
            let next = o.point(main, o.cross_of(cur));
            self.wrap_shift.x += next.x - cur.x;
            self.wrap_shift.y += next.y - cur.y;
            self.scroll_changed(next);
        }

        self.requested.clear();
        self.requested
            .extend(self.window.placements().map(|(index, _)| index));
        let cells = self.pool.reconcile(&self.requested, source, allow_growth);

        let starved = self.window.starved();
        if starved > 0 {
            if self.options.report_lack_of_cell {
                rwarn!(
                    starved,
                    capacity = self.pool.capacity(),
                    "TableContentController: lack of cell (window exceeds pool)"
                );
            } else {
                rdebug!(
                    starved,
                    capacity = self.pool.capacity(),
                    "TableContentController: window exceeds pool"
                );
            }
        }

        let report = PassReport {
            start_index: self.window.start_index(),
            end_index: self.window.end_index(),
            content_extent: out.content_main,
            cells,
            starved,
            wrapped: out.wrapped_main.is_some(),
        };
        rtrace!(
            start = report.start_index,
            end = report.end_index,
            bound = cells.bound,
            newly_bound = cells.newly_bound,
            released = cells.released,
            "layout pass"
        );
        self.in_layout = false;
        self.last_report = Some(report);
        report
    }

    /// Canonical rectangle of `index` (content coordinates).
    ///
    /// The fixed grid computes it directly; jagged layouts answer from the last pass, so indices
    /// outside the window work too once a pass has run.
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        if let Some(rect) = self.window.rect_of(index) {
            return Some(rect);
        }
        self.layout.item_rect(
            self.options.orientation,
            self.total_count,
            self.main_origin(),
            index,
        )
    }

    pub fn cell_for(&self, index: usize) -> Option<CellId> {
        self.pool.cell_for(index)
    }

    pub fn cell(&self, index: usize) -> Option<&H> {
        let id = self.pool.cell_for(index)?;
        self.pool.get(id).map(|c| c.view())
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut H> {
        let id = self.pool.cell_for(index)?;
        self.pool.get_mut(id).map(|c| c.view_mut())
    }

    /// Highest index bound to an active cell.
    pub fn last_bound_index(&self) -> Option<usize> {
        self.pool.last_bound_index()
    }

    /// Visits every bound cell with its index and rectangle, in window order.
    pub fn for_each_active_cell(&self, mut f: impl FnMut(usize, &H, Rect)) {
        for (index, rect) in self.window.placements() {
            if let Some(view) = self.cell(index) {
                f(index, view, rect);
            }
        }
    }

    /// Computes the content offset that brings `index` into view (no animation).
    ///
    /// Only the main axis moves. Returns `None` without a viewport or when the index has no known
    /// rectangle.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> Option<Point> {
        let view = self.viewport?;
        let rect = self.item_rect(index)?;
        let o = self.options.orientation;

        let start = o.main_of(rect.origin());
        let size = o.main_len(rect.size());
        let end = start + size;
        let view_len = o.main_len(view);
        let cur = o.main_of(self.content_offset);

        let target = match align {
            Align::Start => start,
            Align::End => end - view_len,
            Align::Center => start + size / 2.0 - view_len / 2.0,
            Align::Auto => {
                if start >= cur && end <= cur + view_len {
                    cur
                } else if start < cur {
                    start
                } else {
                    end - view_len
                }
            }
        };

        let offset = o.point(target, o.cross_of(self.content_offset));
        Some(self.clamp_content_offset(offset))
    }

    /// Applies [`Self::scroll_to_index_offset`]; the window follows on the next tick.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<Point> {
        let offset = self.scroll_to_index_offset(index, align)?;
        self.set_content_offset(offset);
        Some(offset)
    }

    pub fn state(&self) -> TableState {
        TableState {
            content_offset: self.content_offset,
            viewport: self.viewport,
        }
    }

    pub fn restore_state(&mut self, state: TableState) {
        match state.viewport {
            Some(viewport) => self.set_viewport(viewport),
            None => self.clear_viewport(),
        }
        self.set_content_offset(state.content_offset);
    }

    /// Consumes the controller and hands the pooled views back to the host.
    pub fn into_views(self) -> Vec<H> {
        self.pool.into_views()
    }
}
