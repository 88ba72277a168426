// Example: programmatic row moves resolve the drop target by identity.
use virtual_grid::{
    FieldKind, FieldTable, FieldValue, GridHost, GridOptions, Point, Record, RecordId, RowRect,
    VirtualGrid,
};

#[derive(Default)]
struct Line {
    id: RecordId,
    text: String,
}

impl Record for Line {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field_table() -> FieldTable<Self> {
        FieldTable::new().with_settable_field(
            "Text",
            FieldKind::Text,
            |l: &Line| FieldValue::Text(l.text.clone()),
            |l: &mut Line, v: FieldValue| {
                l.text = v.as_text().unwrap_or_default().to_owned();
                Ok(())
            },
        )
    }
}

/// Prints what a real widget would be told to do. No geometry, no selection.
#[derive(Default)]
struct PrintHost {
    current: Option<(usize, usize)>,
}

impl GridHost for PrintHost {
    fn set_row_count(&mut self, count: usize) {
        println!("  host: row count -> {count}");
    }

    fn redraw(&mut self) {}

    fn set_current_cell(&mut self, row: usize, column: usize) {
        println!("  host: current cell -> ({row}, {column})");
        self.current = Some((row, column));
    }

    fn current_cell(&self) -> Option<(usize, usize)> {
        self.current
    }

    fn begin_edit(&mut self, _select_all: bool) {}

    fn end_edit(&mut self) {}

    fn is_editing(&self) -> bool {
        false
    }

    fn clear_selection(&mut self) {}

    fn select_row(&mut self, _row: usize) {}

    fn selected_rows(&self) -> Vec<usize> {
        Vec::new()
    }

    fn row_at(&self, _point: Point) -> Option<usize> {
        None
    }

    fn row_rect(&self, _row: usize) -> Option<RowRect> {
        None
    }
}

fn print_rows(grid: &mut VirtualGrid<Line, PrintHost>) {
    let rows: Vec<String> = (0..grid.count())
        .filter_map(|row| grid.cell_value_needed(row, 0).ok().flatten())
        .map(|v| v.to_string())
        .collect();
    println!("rows: {rows:?}");
}

fn main() {
    let lines = ["A", "B", "C", "D"].map(|text| Line {
        text: text.to_owned(),
        ..Line::default()
    });
    let grid = VirtualGrid::with_records(PrintHost::default(), GridOptions::default(), lines);
    let Ok(mut grid) = grid else {
        return;
    };
    print_rows(&mut grid);

    println!("move_row(3, 2):");
    match grid.move_row(3, 2) {
        Ok(index) => println!("moved to {index}"),
        Err(err) => println!("move failed: {err}"),
    }
    print_rows(&mut grid);

    println!("move_row(9, 0):");
    if let Err(err) = grid.move_row(9, 0) {
        println!("move failed: {err}");
    }
}
