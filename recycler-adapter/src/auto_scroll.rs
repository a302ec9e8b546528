use recycler::math::abs;
use recycler::{Insets, Point, Rect, Size, TableContentController};

use crate::{FocusMemory, HalfLife};

/// Which item the auto scroller follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutoScrollMode {
    /// Keep the last bound item in view (chat logs, consoles). Set an extra cell count on the
    /// table so the item past the viewport edge is bound and the scroller reaches the end.
    #[default]
    LastItem,
    /// Keep the focused item in view.
    Focused,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutoScrollPhase {
    #[default]
    Idle,
    Converging,
}

/// Configuration for [`AutoScroller`]. Times are in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoScrollOptions {
    pub mode: AutoScrollMode,
    pub half_life: HalfLife,
    /// Time after creation (or [`AutoScroller::restart`]) before the first step.
    pub activation_delay: f32,
    /// Space kept around the target when bringing it into view.
    pub selection_margin: Insets,
    /// Remaining distance below which the target counts as reached.
    pub epsilon: f32,
    /// Divergence from the last written offset attributed to someone else scrolling.
    pub interference_tolerance: f32,
    /// Ticks to stand down after interference.
    pub suspend_ticks: u32,
    /// How long a lost focus is still followed.
    pub focus_grace: f32,
}

impl Default for AutoScrollOptions {
    fn default() -> Self {
        Self {
            mode: AutoScrollMode::LastItem,
            half_life: HalfLife::default(),
            activation_delay: 0.0,
            selection_margin: Insets::ZERO,
            epsilon: 0.5,
            interference_tolerance: 1.0,
            suspend_ticks: 3,
            focus_grace: 0.25,
        }
    }
}

impl AutoScrollOptions {
    pub fn new(mode: AutoScrollMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_half_life(mut self, half_life: HalfLife) -> Self {
        self.half_life = half_life;
        self
    }

    pub fn with_activation_delay(mut self, seconds: f32) -> Self {
        self.activation_delay = seconds;
        self
    }

    pub fn with_selection_margin(mut self, margin: Insets) -> Self {
        self.selection_margin = margin;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_interference_tolerance(mut self, tolerance: f32) -> Self {
        self.interference_tolerance = tolerance;
        self
    }

    pub fn with_suspend_ticks(mut self, ticks: u32) -> Self {
        self.suspend_ticks = ticks;
        self
    }

    pub fn with_focus_grace(mut self, seconds: f32) -> Self {
        self.focus_grace = seconds;
        self
    }
}

/// Moves a table's content offset toward a target item with a damped approach, and stands down
/// when something else scrolls the table.
///
/// The scroller holds no table or view; each tick borrows the controller:
///
/// ```text
/// scroller.tick(&mut table, focused, dt);
/// table.update(&mut source);
/// ```
///
/// The offset it writes is picked up by the table's next layout pass.
#[derive(Clone, Debug)]
pub struct AutoScroller {
    options: AutoScrollOptions,
    phase: AutoScrollPhase,
    target: Option<usize>,
    elapsed: f32,
    suspended_for: u32,
    focus: FocusMemory,
    /// Offset left in the table after the previous tick, and the table's wrap shift at that time.
    baseline: Option<(Point, Point)>,
}

impl AutoScroller {
    pub fn new(options: AutoScrollOptions) -> Self {
        Self {
            options,
            phase: AutoScrollPhase::Idle,
            target: None,
            elapsed: 0.0,
            suspended_for: 0,
            focus: FocusMemory::new(),
            baseline: None,
        }
    }

    pub fn options(&self) -> &AutoScrollOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: AutoScrollOptions) {
        self.options = options;
    }

    pub fn phase(&self) -> AutoScrollPhase {
        self.phase
    }

    /// The item chosen on the last tick.
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended_for > 0
    }

    /// Drops the current target and returns to idle. A later tick picks a target again.
    pub fn cancel(&mut self) {
        self.target = None;
        self.phase = AutoScrollPhase::Idle;
        self.baseline = None;
        self.focus.clear();
    }

    /// Cancels and restarts the activation delay.
    pub fn restart(&mut self) {
        self.cancel();
        self.elapsed = 0.0;
        self.suspended_for = 0;
    }

    /// Advances by `dt` seconds, writing at most one new content offset into `table`.
    pub fn tick<H>(
        &mut self,
        table: &mut TableContentController<H>,
        focused: Option<usize>,
        dt: f32,
    ) -> AutoScrollPhase {
        let dt = if dt > 0.0 { dt } else { 0.0 };
        self.elapsed += dt;
        if self.elapsed < self.options.activation_delay {
            return self.idle();
        }

        if self.interfered(table) {
            rdebug!(
                offset_x = table.content_offset().x,
                offset_y = table.content_offset().y,
                suspend_ticks = self.options.suspend_ticks,
                "AutoScroller: manual scroll detected; suspending"
            );
            self.suspended_for = self.options.suspend_ticks;
        }
        if self.suspended_for > 0 {
            self.suspended_for -= 1;
            self.target = None;
            self.record(table);
            return self.idle();
        }

        self.target = self.select_target(table, focused, dt);
        let phase = match self.target.and_then(|index| self.goal(table, index)) {
            Some(goal) => {
                let cur = table.content_offset();
                let half_life = self.options.half_life;
                table.set_content_offset(Point::new(
                    half_life.step(cur.x, goal.x, dt),
                    half_life.step(cur.y, goal.y, dt),
                ));
                AutoScrollPhase::Converging
            }
            None => AutoScrollPhase::Idle,
        };
        self.record(table);
        self.phase = phase;
        phase
    }

    fn idle(&mut self) -> AutoScrollPhase {
        self.phase = AutoScrollPhase::Idle;
        self.phase
    }

    fn record<H>(&mut self, table: &TableContentController<H>) {
        self.baseline = Some((table.content_offset(), table.wrap_shift()));
    }

    /// The table moved since the last tick by more than the layout's own wraps explain.
    fn interfered<H>(&self, table: &TableContentController<H>) -> bool {
        let Some((offset, shift)) = self.baseline else {
            return false;
        };
        let wrap = table.wrap_shift();
        let expected = Point::new(offset.x + wrap.x - shift.x, offset.y + wrap.y - shift.y);
        let actual = table.content_offset();
        let tolerance = self.options.interference_tolerance;
        abs(actual.x - expected.x) > tolerance || abs(actual.y - expected.y) > tolerance
    }

    fn select_target<H>(
        &mut self,
        table: &TableContentController<H>,
        focused: Option<usize>,
        dt: f32,
    ) -> Option<usize> {
        match self.options.mode {
            // The highest bound index; extra cells past the viewport pull the table forward as
            // later items get bound.
            AutoScrollMode::LastItem => table.last_bound_index(),
            AutoScrollMode::Focused => {
                let focused = focused.filter(|&index| table.cell_for(index).is_some());
                self.focus
                    .observe(focused, dt, self.options.focus_grace)
                    .filter(|&index| table.cell_for(index).is_some())
            }
        }
    }

    /// Clamped offset that brings `index` (plus the selection margin) into view, or `None` when
    /// it is already within `epsilon`.
    fn goal<H>(&self, table: &TableContentController<H>, index: usize) -> Option<Point> {
        let view = table.viewport()?;
        let rect = table.item_rect(index)?.outset(self.options.selection_margin);
        let cur = table.content_offset();
        let (dx, dy) = reveal_offset(rect, cur, view);
        let goal = table.clamp_content_offset(Point::new(cur.x + dx, cur.y + dy));
        let epsilon = self.options.epsilon;
        (abs(goal.x - cur.x) > epsilon || abs(goal.y - cur.y) > epsilon).then_some(goal)
    }
}

/// Signed per-axis offset that brings `rect` inside the viewport at `offset`.
fn reveal_offset(rect: Rect, offset: Point, view: Size) -> (f32, f32) {
    (
        axis_offset(rect.x, rect.width, offset.x, view.width),
        axis_offset(rect.y, rect.height, offset.y, view.height),
    )
}

fn axis_offset(start: f32, len: f32, cur: f32, view: f32) -> f32 {
    let end = start + len;
    if start < cur {
        start - cur
    } else if end > cur + view {
        // A rect larger than the viewport aligns its start.
        (end - (cur + view)).min(start - cur)
    } else {
        0.0
    }
}
