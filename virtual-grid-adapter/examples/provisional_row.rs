use virtual_grid::{FieldKind, FieldTable, FieldValue, GridOptions, Record, RecordId};
use virtual_grid_adapter::{Controller, RowLayout};

#[derive(Default)]
struct Todo {
    id: RecordId,
    text: Option<String>,
    done: bool,
}

impl Record for Todo {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field_table() -> FieldTable<Self> {
        FieldTable::new()
            .with_settable_field(
                "Text",
                FieldKind::Text,
                |t: &Todo| t.text.clone().into(),
                |t: &mut Todo, v: FieldValue| {
                    t.text = v.as_text().map(str::to_owned);
                    Ok(())
                },
            )
            .with_settable_field(
                "Done",
                FieldKind::Bool,
                |t: &Todo| t.done.into(),
                |t: &mut Todo, v: FieldValue| {
                    t.done = v.as_bool().unwrap_or(false);
                    Ok(())
                },
            )
    }
}

fn report(c: &Controller<Todo>, label: &str) {
    println!(
        "{label}: records={} displayed={} provisional={:?}",
        c.grid().count(),
        c.host().row_count(),
        c.grid().provisional().state()
    );
}

fn main() -> Result<(), virtual_grid::GridError> {
    // Example: the sentinel "new row" becomes a provisional record while it is edited.
    let mut c = Controller::<Todo>::new(GridOptions::default(), RowLayout::default())?;
    report(&c, "empty");

    c.edit_cell(0, 0, "write docs".into())?;
    report(&c, "typing into the new row");
    println!("commit: {:?}", c.commit_row()?);
    report(&c, "committed");

    c.edit_cell(1, 0, "abandoned".into())?;
    report(&c, "typing again");
    println!("cancel: {:?}", c.cancel_row()?);
    report(&c, "cancelled");

    c.edit_cell(0, 1, true.into())?;
    for row in c.paint()? {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|v| v.as_ref().map_or("-".to_owned(), |v| v.to_string()))
            .collect();
        println!("  {:>2} {cells:?}", row.row);
    }
    Ok(())
}
