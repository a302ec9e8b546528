// Example: variable-size items packed into rows that fit the viewport width.
use recycler::{DataSource, LayoutStrategy, Point, Size, TableContentController, TableOptions};

struct Photos {
    sizes: Vec<Size>,
}

impl DataSource for Photos {
    type Cell = usize;

    fn total_count(&self) -> usize {
        self.sizes.len()
    }

    fn item_size(&mut self, index: usize) -> Size {
        self.sizes[index]
    }

    fn set_up_cell(&mut self, index: usize, cell: &mut usize) {
        *cell = index;
    }

    fn instantiate_cell(&mut self, _template: &usize) -> Option<usize> {
        Some(usize::MAX)
    }
}

fn main() {
    let mut photos = Photos {
        sizes: (0..200)
            .map(|i| Size::new(60.0 + (i * 37 % 90) as f32, 40.0 + (i * 13 % 50) as f32))
            .collect(),
    };
    let mut table = TableContentController::new(
        TableOptions::default().with_auto_cell_adding(true),
        LayoutStrategy::jagged_rows(),
        vec![0usize; 8],
    );
    table.set_viewport(Size::new(320.0, 200.0));

    for y in [0.0, 400.0, 1_200.0] {
        table.on_scroll(Point::new(0.0, y), &mut photos);
        let report = table.last_report();
        println!("offset={y} report={report:?}");
    }

    if let LayoutStrategy::JaggedRows(layout) = table.layout() {
        for row in layout.rows().iter().take(5) {
            println!(
                "row {:>3}..{:<3} at {:>6.1} height {:>5.1}",
                row.first, row.end, row.offset, row.main_len
            );
        }
    }
    println!(
        "capacity={} growth_events={} content={:?}",
        table.pool().capacity(),
        table.pool().growth_events(),
        table.content_size()
    );
}
