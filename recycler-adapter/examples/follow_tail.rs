use recycler::{DataSource, LayoutStrategy, Point, Size, TableContentController, TableOptions};
use recycler_adapter::{AutoScrollOptions, AutoScrollPhase, AutoScroller, HalfLife};

struct Log {
    lines: Vec<String>,
}

impl DataSource for Log {
    type Cell = String;

    fn total_count(&self) -> usize {
        self.lines.len()
    }

    fn item_size(&mut self, index: usize) -> Size {
        // Wrapped lines take more room.
        let rows = self.lines[index].len().div_ceil(40).max(1);
        Size::new(320.0, 16.0 * rows as f32)
    }

    fn set_up_cell(&mut self, index: usize, cell: &mut String) {
        cell.clone_from(&self.lines[index]);
    }
}

fn main() {
    // Example: a console that keeps the newest line in view, unless the user scrolls away.
    //
    // An adapter would, once per frame:
    // - tick the auto scroller (it writes the table's content offset)
    // - update the table (it lays out and rebinds cells)
    // - place each active cell at its rectangle
    let mut log = Log { lines: Vec::new() };
    let mut table = TableContentController::new(
        TableOptions::default().with_extra_cell_count(2),
        LayoutStrategy::jagged_column(),
        (0..24).map(|_| String::new()),
    );
    table.set_viewport(Size::new(320.0, 160.0));
    let mut scroller =
        AutoScroller::new(AutoScrollOptions::default().with_half_life(HalfLife::new(0.05)));

    let dt = 1.0 / 60.0;
    for frame in 0..300u32 {
        if frame % 10 == 0 {
            log.lines
                .push(format!("[{frame:>4}] {}", "event ".repeat((frame % 7) as usize)));
            table.mark_needs_relayout();
        }
        if frame == 150 {
            // The user scrolls back to the top; the scroller stands down for a few ticks.
            table.on_scroll(Point::ZERO, &mut log);
        }

        let phase = scroller.tick(&mut table, None, dt);
        table.update(&mut log);

        if frame % 30 == 0 || frame == 151 {
            println!(
                "frame={frame:>3} phase={phase:?} suspended={} offset={:>7.1} window={}..{}",
                scroller.is_suspended(),
                table.content_offset().y,
                table.window().start_index(),
                table.window().end_index(),
            );
        }
        if phase == AutoScrollPhase::Idle && frame == 299 {
            table.for_each_active_cell(|index, line, rect| {
                println!("{index:>3} y={:>7.1} {line}", rect.y);
            });
        }
    }
}
