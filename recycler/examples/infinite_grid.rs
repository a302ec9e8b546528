// Example: repeat mode. The offset is wrapped back into the buffer band and rows tile endlessly.
use recycler::{DataSource, LayoutStrategy, Point, Size, TableContentController, TableOptions};

struct Tiles {
    labels: Vec<&'static str>,
}

impl DataSource for Tiles {
    type Cell = Option<&'static str>;

    fn total_count(&self) -> usize {
        self.labels.len()
    }

    fn item_size(&mut self, _index: usize) -> Size {
        Size::new(50.0, 50.0)
    }

    fn set_up_cell(&mut self, index: usize, cell: &mut Self::Cell) {
        *cell = self.labels.get(index).copied();
    }

    fn deactivate_cell(&mut self, cell: &mut Self::Cell) {
        *cell = None;
    }
}

fn main() {
    let mut tiles = Tiles {
        labels: vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"],
    };
    let viewport = Size::new(150.0, 100.0);
    let mut table = TableContentController::new(
        TableOptions::default().with_repeat(true, 2.0 * viewport.height),
        LayoutStrategy::fixed_grid(Size::new(50.0, 50.0), 3),
        (0..12).map(|_| None),
    );
    table.set_viewport(viewport);

    let mut y = 0.0f32;
    for tick in 0..12 {
        table.on_scroll(Point::new(0.0, y), &mut tiles);
        table.update(&mut tiles);
        // Keep scrolling from wherever the controller put us after a wrap.
        y = table.content_offset().y + 35.0;

        let mut row = String::new();
        table.for_each_active_cell(|_, label, _| row.push_str(label.unwrap_or("?")));
        println!(
            "tick={tick:>2} offset={:>6.1} window={:?} cells={row}",
            table.content_offset().y,
            table.window().indices().collect::<Vec<_>>(),
        );
    }
    println!("wrap_shift={:?}", table.wrap_shift());
}
