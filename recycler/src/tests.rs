use crate::*;

use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_i64(&mut self, start: i64, end_exclusive: i64) -> i64 {
        start + self.gen_range_u64(0, (end_exclusive - start) as u64) as i64
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct View {
    shown: Option<usize>,
    setups: usize,
}

#[derive(Debug, Default)]
struct Source {
    count: usize,
    sizes: Vec<Size>,
    default_size: Size,
    setups: Vec<usize>,
    deactivations: usize,
    growable: bool,
}

impl Source {
    fn uniform(count: usize, size: Size) -> Self {
        Self {
            count,
            default_size: size,
            ..Self::default()
        }
    }

    fn with_sizes(sizes: Vec<Size>) -> Self {
        Self {
            count: sizes.len(),
            sizes,
            ..Self::default()
        }
    }

    fn heights(heights: &[f32]) -> Self {
        Self::with_sizes(heights.iter().map(|&h| Size::new(100.0, h)).collect())
    }
}

impl DataSource for Source {
    type Cell = View;

    fn total_count(&self) -> usize {
        self.count
    }

    fn item_size(&mut self, index: usize) -> Size {
        self.sizes.get(index).copied().unwrap_or(self.default_size)
    }

    fn set_up_cell(&mut self, index: usize, cell: &mut View) {
        cell.shown = Some(index);
        cell.setups += 1;
        self.setups.push(index);
    }

    fn deactivate_cell(&mut self, cell: &mut View) {
        cell.shown = None;
        self.deactivations += 1;
    }

    fn instantiate_cell(&mut self, _template: &View) -> Option<View> {
        self.growable.then(View::default)
    }
}

fn views(n: usize) -> Vec<View> {
    (0..n).map(|_| View::default()).collect()
}

fn table(
    options: TableOptions,
    layout: LayoutStrategy,
    cells: usize,
    viewport: Size,
) -> TableContentController<View> {
    let mut t = TableContentController::new(options, layout, views(cells));
    t.set_viewport(viewport);
    t
}

fn bound_indices(t: &TableContentController<View>) -> Vec<usize> {
    let mut out = Vec::new();
    t.for_each_active_cell(|index, view, _| {
        assert_eq!(view.shown, Some(index));
        out.push(index);
    });
    out
}

fn brute_force_window(sizes: &[f32], offset: f32, extent: f32) -> Option<(usize, usize)> {
    let mut first = None;
    let mut last = None;
    let mut start = 0.0f32;
    for (i, &size) in sizes.iter().enumerate() {
        if start < offset + extent && start + size > offset {
            first.get_or_insert(i);
            last = Some(i);
        }
        start += size;
    }
    Some((first?, last?))
}

#[test]
fn wrap_and_floor_div_agree() {
    let mut rng = Lcg::new(7);
    for _ in 0..2_000 {
        let i = rng.gen_range_i64(-10_000, 10_000);
        let n = rng.gen_range_i64(1, 64);
        let w = math::wrap(i, n);
        assert!((0..n).contains(&w), "wrap({i}, {n}) = {w}");
        assert_eq!(i, math::floor_div(i, n) * n + w);
    }
    assert_eq!(math::wrap(-1, 5), 4);
    assert_eq!(math::floor_div(-1, 5), -1);
}

#[test]
fn wrap_f32_stays_in_period() {
    assert_eq!(math::wrap_f32(-30.0, 50.0), 20.0);
    assert_eq!(math::wrap_f32(95.0, 50.0), 45.0);
    assert_eq!(math::wrap_f32(50.0, 50.0), 0.0);
    assert_eq!(math::wrap_f32(12.0, 0.0), 12.0);
    assert!(math::wrap_f32(-1e-7, 50.0) < 50.0);
}

#[test]
fn windower_opens_and_closes_once() {
    let mut w = ViewportWindower::new(10.0, 20.0);
    assert!(!w.observe(0, 0.0, 10.0));
    assert!(w.observe(1, 10.0, 5.0));
    assert!(w.is_open());
    assert!(w.observe(2, 15.0, 14.0));
    assert!(!w.observe(3, 30.0, 1.0));
    assert!(w.is_closed());
    assert!(!w.observe(4, 0.0, 100.0));
    assert_eq!(w.range(), Some((1, 2)));
    assert!(w.overlaps(29.0, 1.0));
    assert!(!w.overlaps(30.0, 1.0));
}

#[test]
fn fixed_grid_extent_and_rects() {
    let mut t = table(
        TableOptions::default(),
        LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), 3),
        10,
        Size::new(30.0, 100.0),
    );
    let mut source = Source::uniform(7, Size::new(10.0, 10.0));
    let report = t.update(&mut source).unwrap();

    assert_eq!(report.content_extent, 30.0);
    assert_eq!(t.content_size(), Size::new(30.0, 30.0));
    assert_eq!((report.start_index, report.end_index), (0, 7));
    assert_eq!(report.cells.bound, 7);
    assert_eq!(t.item_rect(4), Some(Rect::new(10.0, 10.0, 10.0, 10.0)));
    assert_eq!(t.item_rect(7), None);
    assert_eq!(bound_indices(&t), (0..7).collect::<Vec<_>>());

    if let LayoutStrategy::FixedGrid(grid) = t.layout() {
        assert_eq!(grid.row_count(7), 3);
        assert_eq!(grid.content_extent(Orientation::Vertical, 7), 30.0);
    } else {
        panic!("expected a fixed grid");
    }
}

#[test]
fn fixed_grid_horizontal_swaps_axes() {
    let mut t = table(
        TableOptions::new(Orientation::Horizontal),
        LayoutStrategy::fixed_grid(Size::new(10.0, 20.0), 2),
        10,
        Size::new(100.0, 40.0),
    );
    let mut source = Source::uniform(6, Size::new(10.0, 20.0));
    t.update(&mut source).unwrap();

    assert_eq!(t.content_size(), Size::new(30.0, 40.0));
    // Index 3: row 1 along x, column 1 along y.
    assert_eq!(t.item_rect(3), Some(Rect::new(10.0, 20.0, 10.0, 20.0)));
}

#[test]
fn fixed_grid_radix_clips_offscreen_columns() {
    let mut t = table(
        TableOptions::default(),
        LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), 4),
        16,
        Size::new(20.0, 20.0),
    );
    t.set_content_offset(Point::new(10.0, 0.0));
    let mut source = Source::uniform(8, Size::new(10.0, 10.0));
    let report = t.update(&mut source).unwrap();

    assert_eq!((report.start_index, report.end_index), (0, 8));
    assert_eq!(bound_indices(&t), vec![1, 2, 5, 6]);
    assert!(t.window().contains(0));
    assert_eq!(t.window().rect_of(0), None);
    assert_eq!(t.cell_for(0), None);
}

#[test]
fn fixed_grid_clipped_columns_do_not_spend_pool() {
    // Exactly enough cells for the 2x3 block that is on screen.
    let mut t = table(
        TableOptions::default(),
        LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), 10),
        6,
        Size::new(20.0, 30.0),
    );
    t.set_content_offset(Point::new(40.0, 0.0));
    let mut source = Source::uniform(100, Size::new(10.0, 10.0));
    let report = t.update(&mut source).unwrap();

    let mut bound = bound_indices(&t);
    bound.sort_unstable();
    assert_eq!(bound, vec![4, 5, 14, 15, 24, 25]);
    assert_eq!(report.starved, 0);
    assert_eq!(report.lacking(), 0);
    assert_eq!(t.window().placed(), 6);
    assert_eq!(t.pool().lack_of_cell_events(), 0);
}

#[test]
fn repeating_grid_clipped_columns_do_not_spend_pool() {
    let mut t = table(
        TableOptions::default().with_repeat(true, 30.0),
        LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), 10),
        6,
        Size::new(20.0, 30.0),
    );
    t.set_content_offset(Point::new(40.0, 60.0));
    let mut source = Source::uniform(100, Size::new(10.0, 10.0));
    let report = t.update(&mut source).unwrap();

    assert!(!report.wrapped);
    let mut bound = bound_indices(&t);
    bound.sort_unstable();
    assert_eq!(bound, vec![34, 35, 44, 45, 54, 55]);
    assert_eq!(report.lacking(), 0);
}

#[test]
fn extra_cells_extend_grid_by_rows_and_columns_by_items() {
    let mut grid = table(
        TableOptions::default().with_extra_cell_count(3),
        LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), 2),
        32,
        Size::new(20.0, 20.0),
    );
    grid.set_content_offset(Point::new(0.0, 50.0));
    let mut source = Source::uniform(20, Size::new(10.0, 10.0));
    let report = grid.update(&mut source).unwrap();
    assert_eq!((report.start_index, report.end_index), (6, 18));

    let mut column = table(
        TableOptions::default().with_extra_cell_count(2),
        LayoutStrategy::jagged_column(),
        32,
        Size::new(100.0, 20.0),
    );
    column.set_content_offset(Point::new(0.0, 50.0));
    let mut source = Source::heights(&[10.0; 20]);
    let report = column.update(&mut source).unwrap();
    assert_eq!((report.start_index, report.end_index), (3, 9));
    assert_eq!(bound_indices(&column), (3..9).collect::<Vec<_>>());
}

#[test]
fn jagged_column_windows_by_cumulative_offsets() {
    let mut t = table(
        TableOptions::default(),
        LayoutStrategy::jagged_column(),
        8,
        Size::new(100.0, 20.0),
    );
    let mut source = Source::heights(&[5.0, 30.0, 5.0, 5.0]);
    let report = t.update(&mut source).unwrap();

    assert_eq!((report.start_index, report.end_index), (0, 2));
    assert_eq!(report.content_extent, 45.0);
    assert_eq!(bound_indices(&t), vec![0, 1]);
    assert_eq!(t.item_rect(1), Some(Rect::new(0.0, 5.0, 100.0, 30.0)));
    // Outside the window, answered from the last scan.
    assert_eq!(t.item_rect(3), Some(Rect::new(0.0, 40.0, 100.0, 5.0)));
}

#[test]
fn jagged_rows_pack_with_lookahead() {
    let mut t = table(
        TableOptions::default(),
        LayoutStrategy::jagged_rows(),
        8,
        Size::new(100.0, 22.0),
    );
    let mut source = Source::with_sizes(vec![
        Size::new(40.0, 10.0),
        Size::new(50.0, 20.0),
        Size::new(30.0, 5.0),
        Size::new(120.0, 15.0),
        Size::new(60.0, 10.0),
    ]);
    let report = t.update(&mut source).unwrap();

    assert_eq!(report.content_extent, 50.0);
    assert_eq!(t.content_size(), Size::new(120.0, 50.0));
    assert_eq!((report.start_index, report.end_index), (0, 3));
    assert_eq!(t.item_rect(1), Some(Rect::new(40.0, 0.0, 50.0, 20.0)));

    let LayoutStrategy::JaggedRows(rows) = t.layout() else {
        panic!("expected jagged rows");
    };
    let spans: Vec<(usize, usize)> = rows.rows().iter().map(|r| (r.first, r.end)).collect();
    assert_eq!(spans, vec![(0, 2), (2, 3), (3, 4), (4, 5)]);
    // The oversized item sits alone.
    assert_eq!(rows.rows()[2].len(), 1);
    assert_eq!(rows.rows()[1].offset, 20.0);
}

#[test]
fn pool_reports_lack_of_cell() {
    let mut pool = CellPool::new(views(5));
    let mut source = Source::uniform(7, Size::new(10.0, 10.0));
    let requested: Vec<usize> = (0..7).collect();
    let report = pool.reconcile(&requested, &mut source, false);

    assert_eq!(report.bound, 5);
    assert_eq!(report.lacking, 2);
    assert_eq!(pool.lack_of_cell_events(), 2);
    assert_eq!(pool.high_water_mark(), 7);
    assert!(pool.cell_for(5).is_none());
    assert!(pool.is_consistent());
}

#[test]
fn controller_starves_window_beyond_pool() {
    let mut t = table(
        TableOptions::default().with_report_lack_of_cell(true),
        LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), 1),
        5,
        Size::new(10.0, 70.0),
    );
    let mut source = Source::uniform(100, Size::new(10.0, 10.0));
    let report = t.update(&mut source).unwrap();

    assert_eq!(report.end_index - report.start_index, 7);
    assert_eq!(report.starved, 2);
    assert_eq!(report.cells.bound, 5);
    assert_eq!(report.lacking(), 2);
    assert_eq!(t.pool().active_count(), 5);
}

#[test]
fn pool_grows_from_template_when_enabled() {
    let mut t = table(
        TableOptions::default().with_auto_cell_adding(true),
        LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), 1),
        2,
        Size::new(10.0, 50.0),
    );
    let mut source = Source::uniform(100, Size::new(10.0, 10.0));
    source.growable = true;
    let report = t.update(&mut source).unwrap();

    assert_eq!(report.cells.grown, 3);
    assert_eq!(report.lacking(), 0);
    assert_eq!(t.pool().capacity(), 5);
    assert_eq!(t.pool().growth_events(), 3);
}

#[test]
fn growth_refused_by_source_counts_as_lacking() {
    let mut pool = CellPool::new(views(1));
    let mut source = Source::uniform(3, Size::new(10.0, 10.0));
    let report = pool.reconcile(&[0, 1, 2], &mut source, true);
    assert_eq!((report.bound, report.grown, report.lacking), (1, 0, 2));
    assert_eq!(pool.capacity(), 1);
}

#[test]
fn empty_collection_binds_nothing() {
    for layout in [
        LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), 3),
        LayoutStrategy::jagged_column(),
        LayoutStrategy::jagged_rows(),
    ] {
        let mut t = table(TableOptions::default(), layout, 4, Size::new(30.0, 30.0));
        let mut source = Source::uniform(0, Size::new(10.0, 10.0));
        let report = t.update(&mut source).unwrap();
        assert_eq!(report.content_extent, 0.0);
        assert!(t.window().is_empty());
        assert_eq!(t.pool().active_count(), 0);
        assert_eq!(t.last_bound_index(), None);
    }
}

#[test]
fn set_up_cell_only_on_bind() {
    for layout in [
        LayoutStrategy::fixed_grid(Size::new(100.0, 10.0), 1),
        LayoutStrategy::jagged_column(),
        LayoutStrategy::jagged_rows(),
    ] {
        let mut t = table(TableOptions::default(), layout, 10, Size::new(100.0, 30.0));
        let mut source = Source::uniform(20, Size::new(100.0, 10.0));
        t.update(&mut source).unwrap();
        assert_eq!(source.setups, vec![0, 1, 2]);

        // Settle pass: same window, no new bindings.
        let report = t.update(&mut source).unwrap();
        assert_eq!(report.cells.newly_bound, 0);
        assert_eq!(source.setups.len(), 3);

        let report = t.on_scroll(Point::new(0.0, 10.0), &mut source).unwrap();
        assert_eq!(report.cells.newly_bound, 1);
        assert_eq!(report.cells.released, 1);
        assert_eq!(source.setups, vec![0, 1, 2, 3]);
        assert_eq!(source.deactivations, 1);
        assert_eq!(bound_indices(&t), vec![1, 2, 3]);
    }
}

#[test]
fn update_is_noop_without_viewport() {
    let mut t = TableContentController::new(
        TableOptions::default(),
        LayoutStrategy::jagged_column(),
        views(4),
    );
    let mut source = Source::heights(&[10.0; 4]);
    assert!(t.update(&mut source).is_none());
    assert!(t.on_scroll(Point::new(0.0, 5.0), &mut source).is_none());
    assert!(t.needs_layout());
    assert_eq!(t.pool().active_count(), 0);
    assert_eq!(t.max_content_offset(), Point::ZERO);
}

#[test]
fn two_settle_ticks_then_only_when_dirty() {
    let mut t = table(
        TableOptions::default(),
        LayoutStrategy::jagged_column(),
        4,
        Size::new(100.0, 20.0),
    );
    let mut source = Source::heights(&[10.0; 4]);
    assert!(t.update(&mut source).is_some());
    assert!(t.update(&mut source).is_some());
    assert!(t.update(&mut source).is_none());

    t.mark_needs_relayout();
    assert!(t.update(&mut source).is_some());
    assert!(t.update(&mut source).is_none());

    t.reactivate();
    assert!(t.update(&mut source).is_some());
    assert!(t.update(&mut source).is_some());
    assert!(t.update(&mut source).is_none());
}

#[test]
fn set_content_offset_defers_until_update() {
    let mut t = table(
        TableOptions::default(),
        LayoutStrategy::jagged_column(),
        4,
        Size::new(100.0, 20.0),
    );
    let mut source = Source::heights(&[10.0; 10]);
    t.update(&mut source);
    t.update(&mut source);

    t.set_content_offset(Point::new(0.0, 50.0));
    assert!(t.needs_layout());
    assert_eq!(bound_indices(&t), vec![0, 1]);
    t.update(&mut source).unwrap();
    assert_eq!(bound_indices(&t), vec![5, 6]);

    // Same offset again: nothing to do.
    assert!(t.on_scroll(Point::new(0.0, 50.0), &mut source).is_none());
}

#[test]
fn refresh_rebinds_everything() {
    let mut t = table(
        TableOptions::default(),
        LayoutStrategy::jagged_column(),
        4,
        Size::new(100.0, 20.0),
    );
    let mut source = Source::heights(&[10.0; 10]);
    t.update(&mut source);
    t.update(&mut source);
    assert_eq!(source.setups, vec![0, 1]);

    assert_eq!(t.refresh(&mut source), 2);
    assert_eq!(t.pool().active_count(), 0);
    let report = t.update(&mut source).unwrap();
    assert_eq!(report.cells.newly_bound, 2);
    assert_eq!(source.setups, vec![0, 1, 0, 1]);
}

fn repeat_grid() -> TableContentController<View> {
    table(
        TableOptions::default().with_repeat(true, 40.0),
        LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), 2),
        16,
        Size::new(20.0, 20.0),
    )
}

#[test]
fn repeat_wraps_into_band_and_defers_relayout() {
    let mut t = repeat_grid();
    let mut source = Source::uniform(10, Size::new(10.0, 10.0));

    // Period 50, margin 40: band [20, 110). Offset 0 wraps to 20 + (-20 mod 50) = 50.
    let report = t.update(&mut source).unwrap();
    assert!(report.wrapped);
    assert_eq!(t.content_offset(), Point::new(0.0, 50.0));
    assert_eq!(t.wrap_shift(), Point::new(0.0, 50.0));
    assert_eq!(t.scroll_extent(), Size::new(20.0, 130.0));
    assert!(t.needs_layout());

    let report = t.update(&mut source).unwrap();
    assert!(!report.wrapped);
    assert!(!t.needs_layout());
    assert_eq!(t.window().indices().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
    assert_eq!(t.item_rect(2), Some(Rect::new(0.0, 50.0, 10.0, 10.0)));

    // Past the band end: 20 + (95 mod 50) = 65.
    let report = t.on_scroll(Point::new(0.0, 115.0), &mut source).unwrap();
    assert!(report.wrapped);
    assert_eq!(t.content_offset(), Point::new(0.0, 65.0));
    assert_eq!(t.wrap_shift(), Point::new(0.0, 0.0));
    assert!(t.needs_layout());
    assert!(!t.update(&mut source).unwrap().wrapped);
}

#[test]
fn repeat_rows_wrap_across_the_period() {
    let mut t = repeat_grid();
    let mut source = Source::uniform(10, Size::new(10.0, 10.0));
    t.update(&mut source);
    t.update(&mut source);

    // Rows 6..9 of the infinite strip are rows 1..4 of the data.
    t.on_scroll(Point::new(0.0, 105.0), &mut source).unwrap();
    let window = t.window();
    assert_eq!(window.period(), Some(10));
    assert_eq!(window.indices().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6, 7]);
    assert_eq!(window.rect_of(2), Some(Rect::new(0.0, 100.0, 10.0, 10.0)));
    assert!(bound_indices(&t).len() <= 10);
    assert!(t.pool().is_consistent());
}

#[test]
fn repeat_partial_last_row_leaves_empty_slots() {
    let mut t = repeat_grid();
    let mut source = Source::uniform(9, Size::new(10.0, 10.0));
    t.set_viewport(Size::new(20.0, 10.0));
    t.set_content_offset(Point::new(0.0, 80.0));
    let report = t.update(&mut source).unwrap();

    assert!(!report.wrapped);
    assert_eq!(t.window().indices().collect::<Vec<_>>(), vec![8, 9]);
    assert_eq!(t.window().rect_of(9), None);
    assert_eq!(bound_indices(&t), vec![8]);
}

#[test]
fn repeat_window_never_exceeds_one_period() {
    // One row of period 10 and a viewport of 7 straddling the boundary at 10: the item can only
    // be in one place, so the trailing virtual row stays empty.
    let mut t = table(
        TableOptions::default().with_repeat(true, 0.0),
        LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), 1),
        4,
        Size::new(10.0, 7.0),
    );
    t.set_content_offset(Point::new(0.0, 5.0));
    let mut source = Source::uniform(1, Size::new(10.0, 10.0));
    let report = t.update(&mut source).unwrap();

    assert!(!report.wrapped);
    assert_eq!(t.window().len(), 1);
    assert_eq!(bound_indices(&t), vec![0]);
    assert_eq!(t.window().rect_of(0), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn repeat_is_ignored_for_jagged_layouts() {
    let mut t = table(
        TableOptions::default().with_repeat(true, 40.0),
        LayoutStrategy::jagged_column(),
        4,
        Size::new(100.0, 20.0),
    );
    assert_eq!(t.config_issues(), &[ConfigIssue::RepeatUnsupported]);
    let mut source = Source::heights(&[10.0; 10]);
    let report = t.update(&mut source).unwrap();
    assert!(!report.wrapped);
    assert_eq!(t.content_offset(), Point::ZERO);
    assert_eq!(t.scroll_extent(), Size::new(100.0, 100.0));
}

#[test]
fn config_issues_are_collected() {
    let t = TableContentController::<View>::new(
        TableOptions::default()
            .with_external_layout(true)
            .with_repeat(true, -1.0),
        LayoutStrategy::fixed_grid(Size::new(10.0, 0.0), 0),
        Vec::new(),
    );
    assert_eq!(
        t.config_issues(),
        &[
            ConfigIssue::ExternalLayout,
            ConfigIssue::EmptyPool,
            ConfigIssue::NegativeRepeatMargin,
            ConfigIssue::ZeroColumns,
            ConfigIssue::EmptyCellSize,
        ]
    );
    assert!(
        ConfigIssue::ZeroColumns
            .to_string()
            .contains("at least 1")
    );
}

#[test]
fn scroll_to_index_offset_aligns_and_clamps() {
    let mut t = table(
        TableOptions::default(),
        LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), 1),
        8,
        Size::new(10.0, 30.0),
    );
    let mut source = Source::uniform(100, Size::new(10.0, 10.0));
    t.update(&mut source);

    let y = |p: Option<Point>| p.map(|p| p.y);
    assert_eq!(y(t.scroll_to_index_offset(10, Align::Start)), Some(100.0));
    assert_eq!(y(t.scroll_to_index_offset(10, Align::End)), Some(80.0));
    assert_eq!(y(t.scroll_to_index_offset(10, Align::Center)), Some(90.0));
    assert_eq!(y(t.scroll_to_index_offset(1, Align::Auto)), Some(0.0));
    assert_eq!(y(t.scroll_to_index_offset(10, Align::Auto)), Some(80.0));
    assert_eq!(y(t.scroll_to_index_offset(99, Align::Start)), Some(970.0));
    assert_eq!(t.scroll_to_index_offset(100, Align::Start), None);

    assert_eq!(t.scroll_to_index(50, Align::Start), Some(Point::new(0.0, 500.0)));
    t.update(&mut source).unwrap();
    assert_eq!(t.window().start_index(), 50);
}

#[test]
fn state_roundtrips_offset_and_viewport() {
    let mut t = table(
        TableOptions::default(),
        LayoutStrategy::jagged_column(),
        4,
        Size::new(100.0, 20.0),
    );
    t.set_content_offset(Point::new(0.0, 30.0));
    let state = t.state();

    let mut restored = TableContentController::new(
        TableOptions::default(),
        LayoutStrategy::jagged_column(),
        views(4),
    );
    restored.restore_state(state);
    assert_eq!(restored.state(), state);
    let mut source = Source::heights(&[10.0; 10]);
    restored.update(&mut source).unwrap();
    assert_eq!(bound_indices(&restored), vec![3, 4]);
}

#[test]
fn cell_views_return_to_host() {
    let mut t = table(
        TableOptions::default(),
        LayoutStrategy::jagged_column(),
        3,
        Size::new(100.0, 20.0),
    );
    let mut source = Source::heights(&[10.0; 10]);
    t.update(&mut source);
    if let Some(view) = t.cell_mut(1) {
        view.setups += 100;
    }
    assert_eq!(t.cell(1).map(|v| v.setups), Some(101));
    let views = t.into_views();
    assert_eq!(views.len(), 3);
    assert_eq!(views.iter().filter(|v| v.shown.is_some()).count(), 2);
}

#[test]
fn property_jagged_column_window_matches_brute_force() {
    for seed in 1..=200u64 {
        let mut rng = Lcg::new(seed);
        let count = rng.gen_range_usize(0, 50);
        let heights: Vec<f32> = (0..count)
            .map(|_| rng.gen_range_u64(0, 20) as f32)
            .collect();
        let total: f32 = heights.iter().sum();
        let offset = rng.gen_range_u64(0, total as u64 + 10) as f32;
        let extent = rng.gen_range_u64(1, 60) as f32;

        let mut t = table(
            TableOptions::default(),
            LayoutStrategy::jagged_column(),
            64,
            Size::new(100.0, extent),
        );
        t.set_content_offset(Point::new(0.0, offset));
        let mut source = Source::heights(&heights);
        let report = t.update(&mut source).unwrap();

        assert_eq!(report.content_extent, total, "seed={seed}");
        let expected = brute_force_window(&heights, offset, extent)
            .map(|(first, last)| (first, last + 1))
            .unwrap_or((0, 0));
        assert_eq!(
            (report.start_index, report.end_index),
            expected,
            "seed={seed} offset={offset} extent={extent}"
        );
        assert_eq!(report.lacking(), 0);

        let viewport = Rect::new(0.0, offset, 100.0, extent);
        t.for_each_active_cell(|index, _, rect| {
            if heights[index] > 0.0 {
                assert!(rect.intersects(&viewport), "seed={seed} index={index}");
            }
        });
    }
}

#[test]
fn property_jagged_rows_stay_within_budget() {
    for seed in 1..=100u64 {
        let mut rng = Lcg::new(seed);
        let count = rng.gen_range_usize(1, 40);
        let budget = rng.gen_range_u64(20, 120) as f32;
        let sizes: Vec<Size> = (0..count)
            .map(|_| {
                Size::new(
                    rng.gen_range_u64(1, 150) as f32,
                    rng.gen_range_u64(1, 30) as f32,
                )
            })
            .collect();

        let mut t = table(
            TableOptions::default(),
            LayoutStrategy::jagged_rows(),
            64,
            Size::new(budget, 50.0),
        );
        let mut source = Source::with_sizes(sizes.clone());
        let report = t.update(&mut source).unwrap();

        let LayoutStrategy::JaggedRows(layout) = t.layout() else {
            panic!("expected jagged rows");
        };
        let mut next = 0usize;
        let mut extent = 0.0f32;
        for row in layout.rows() {
            assert_eq!(row.first, next, "seed={seed}");
            assert!(!row.is_empty());
            assert!(row.len() == 1 || row.cross_len <= budget, "seed={seed}");
            let tallest = sizes[row.first..row.end]
                .iter()
                .map(|s| s.height)
                .fold(0.0f32, f32::max);
            assert_eq!(row.main_len, tallest);
            assert_eq!(row.offset, extent);
            extent += row.main_len;
            next = row.end;
        }
        assert_eq!(next, count);
        assert_eq!(report.content_extent, extent);
    }
}

#[test]
fn property_fixed_grid_window_matches_brute_force() {
    for seed in 1..=300u64 {
        let mut rng = Lcg::new(seed);
        let cols = rng.gen_range_usize(1, 9);
        let count = rng.gen_range_usize(0, 80);
        let cell = Size::new(
            rng.gen_range_u64(1, 20) as f32,
            rng.gen_range_u64(1, 20) as f32,
        );
        let view = Size::new(
            rng.gen_range_u64(1, 60) as f32,
            rng.gen_range_u64(1, 60) as f32,
        );
        let content_w = cols as u64 * cell.width as u64;
        let content_h = count.div_ceil(cols) as u64 * cell.height as u64;
        let offset = Point::new(
            rng.gen_range_u64(0, content_w) as f32,
            rng.gen_range_u64(0, content_h + 10) as f32,
        );

        let viewport = Rect::new(offset.x, offset.y, view.width, view.height);
        let expected: Vec<usize> = (0..count)
            .filter(|&i| {
                let rect = Rect::new(
                    (i % cols) as f32 * cell.width,
                    (i / cols) as f32 * cell.height,
                    cell.width,
                    cell.height,
                );
                rect.intersects(&viewport)
            })
            .collect();

        // A pool sized exactly to what is on screen.
        let mut t = table(
            TableOptions::default(),
            LayoutStrategy::fixed_grid(cell, cols),
            expected.len(),
            view,
        );
        t.set_content_offset(offset);
        let mut source = Source::uniform(count, cell);
        let report = t.update(&mut source).unwrap();

        let mut bound = bound_indices(&t);
        bound.sort_unstable();
        assert_eq!(
            bound, expected,
            "seed={seed} cols={cols} cell={cell:?} view={view:?} offset={offset:?}"
        );
        assert_eq!(report.starved, 0, "seed={seed}");
        assert_eq!(report.lacking(), 0, "seed={seed}");
        for &index in &bound {
            assert_eq!(t.window().rect_of(index), t.item_rect(index), "seed={seed}");
        }
    }
}

#[test]
fn property_jagged_rows_window_matches_brute_force() {
    for seed in 1..=200u64 {
        let mut rng = Lcg::new(seed);
        let count = rng.gen_range_usize(1, 40);
        let budget = rng.gen_range_u64(20, 120) as f32;
        let extent = rng.gen_range_u64(1, 60) as f32;
        let sizes: Vec<Size> = (0..count)
            .map(|_| {
                Size::new(
                    rng.gen_range_u64(1, 60) as f32,
                    rng.gen_range_u64(1, 30) as f32,
                )
            })
            .collect();
        let offset = rng.gen_range_u64(0, count as u64 * 30 + 10) as f32;

        let mut t = table(
            TableOptions::default(),
            LayoutStrategy::jagged_rows(),
            64,
            Size::new(budget, extent),
        );
        t.set_content_offset(Point::new(0.0, offset));
        let mut source = Source::with_sizes(sizes);
        let report = t.update(&mut source).unwrap();

        let LayoutStrategy::JaggedRows(layout) = t.layout() else {
            panic!("expected jagged rows");
        };
        let expected: Vec<usize> = layout
            .rows()
            .iter()
            .filter(|row| row.offset < offset + extent && row.offset + row.main_len > offset)
            .flat_map(|row| row.first..row.end)
            .collect();

        let mut bound = bound_indices(&t);
        bound.sort_unstable();
        assert_eq!(bound, expected, "seed={seed} offset={offset} extent={extent}");
        match (expected.first(), expected.last()) {
            (Some(&first), Some(&last)) => {
                assert_eq!((report.start_index, report.end_index), (first, last + 1));
            }
            _ => assert_eq!(report.start_index, report.end_index, "seed={seed}"),
        }
        assert_eq!(report.lacking(), 0);
    }
}

#[test]
fn property_pool_keeps_bindings_consistent() {
    for seed in 1..=200u64 {
        let mut rng = Lcg::new(seed);
        let capacity = rng.gen_range_usize(0, 12);
        let mut pool = CellPool::new(views(capacity));
        let mut source = Source::uniform(64, Size::new(1.0, 1.0));
        let mut previous: Vec<(usize, CellId)> = Vec::new();

        for _ in 0..20 {
            let start = rng.gen_range_usize(0, 48);
            let len = rng.gen_range_usize(0, 16);
            let requested: Vec<usize> = (start..start + len).collect();
            let grow = rng.gen_bool();
            source.growable = rng.gen_bool();
            let report = pool.reconcile(&requested, &mut source, grow);

            assert!(pool.is_consistent(), "seed={seed}");
            assert_eq!(report.bound + report.lacking, requested.len());
            assert_eq!(pool.active_count(), report.bound);
            for (index, id) in &previous {
                if requested.contains(index) {
                    assert_eq!(pool.cell_for(*index), Some(*id), "seed={seed}");
                }
            }
            for (_, cell) in pool.iter_active() {
                let index = cell.bound_index().unwrap();
                assert_eq!(cell.view().shown, Some(index));
                assert!(requested.contains(&index));
            }
            previous = requested
                .iter()
                .filter_map(|&i| pool.cell_for(i).map(|id| (i, id)))
                .collect();
        }
    }
}

#[test]
fn property_repeat_offset_settles_in_band() {
    for seed in 1..=100u64 {
        let mut rng = Lcg::new(seed);
        let cols = rng.gen_range_usize(1, 4);
        let count = rng.gen_range_usize(1, 30);
        let view = rng.gen_range_u64(5, 40) as f32;
        let margin = 2.0 * view;
        let mut t = table(
            TableOptions::default().with_repeat(true, margin),
            LayoutStrategy::fixed_grid(Size::new(10.0, 10.0), cols),
            256,
            Size::new(10.0 * cols as f32, view),
        );
        let mut source = Source::uniform(count, Size::new(10.0, 10.0));
        let period = count.div_ceil(cols) as f32 * 10.0;

        for _ in 0..10 {
            let offset = rng.gen_range_i64(-500, 500) as f32;
            t.on_scroll(Point::new(0.0, offset), &mut source);
            t.update(&mut source);
            let y = t.content_offset().y;
            assert!(
                y >= margin / 2.0 && y < margin + period + margin / 2.0,
                "seed={seed} offset={offset} y={y}"
            );
            assert!(t.window().len() <= count.div_ceil(cols) * cols);
            for index in bound_indices(&t) {
                assert!(index < count);
            }
            assert!(t.pool().is_consistent());
        }
    }
}

#[test]
fn example_basic_smoke() {
    let mut t = table(
        TableOptions::default().with_extra_cell_count(2),
        LayoutStrategy::fixed_grid(Size::new(80.0, 24.0), 4),
        64,
        Size::new(320.0, 240.0),
    );
    let mut source = Source::uniform(1_000_000, Size::new(80.0, 24.0));
    t.update(&mut source).unwrap();
    t.on_scroll(Point::new(0.0, 24_000.0), &mut source).unwrap();
    let indices = bound_indices(&t);
    assert_eq!(indices.first().copied(), Some(3_996));
    assert!(indices.len() <= 64);
    assert_eq!(t.scroll_extent().height, 250_000.0 * 24.0);
}
