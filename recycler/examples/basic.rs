// Example: a million-row grid shown through 64 recycled cells, plus the scroll-to helper.
use recycler::{Align, DataSource, LayoutStrategy, Point, Size, TableContentController, TableOptions};

struct Rows;

impl DataSource for Rows {
    type Cell = String;

    fn total_count(&self) -> usize {
        1_000_000
    }

    fn item_size(&mut self, _index: usize) -> Size {
        Size::new(80.0, 24.0)
    }

    fn set_up_cell(&mut self, index: usize, cell: &mut String) {
        cell.clear();
        cell.push_str(&format!("row {index}"));
    }
}

fn main() {
    let cells = (0..64).map(|_| String::new());
    let mut table = TableContentController::new(
        TableOptions::default().with_extra_cell_count(4),
        LayoutStrategy::fixed_grid(Size::new(80.0, 24.0), 4),
        cells,
    );
    table.set_viewport(Size::new(320.0, 240.0));

    let mut rows = Rows;
    let report = table.update(&mut rows);
    println!("first pass: {report:?}");
    println!("scroll_extent={:?}", table.scroll_extent());

    let report = table.on_scroll(Point::new(0.0, 123_456.0), &mut rows);
    println!("after scroll: {report:?}");
    table.for_each_active_cell(|index, text, rect| {
        if index % 16 == 0 {
            println!("{index:>8} {text:<12} {rect:?}");
        }
    });

    if let Some(off) = table.scroll_to_index_offset(999_999, Align::End) {
        table.set_content_offset(off);
        table.update(&mut rows);
        println!("after scroll_to_index: offset={:?}", table.content_offset());
        println!("last_bound_index={:?}", table.last_bound_index());
    }
}
