use virtual_grid::{DragMode, FieldKind, FieldTable, FieldValue, GridOptions, Record, RecordId};
use virtual_grid_adapter::{Controller, RowLayout};

#[derive(Default)]
struct Song {
    id: RecordId,
    title: String,
}

impl Record for Song {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field_table() -> FieldTable<Self> {
        FieldTable::new().with_field("Title", FieldKind::Text, |s: &Song| {
            FieldValue::Text(s.title.clone())
        })
    }
}

fn print(c: &mut Controller<Song>, label: &str) {
    let Ok(rows) = c.paint() else {
        return;
    };
    println!("{label}:");
    for row in rows {
        let title = row.cells.first().cloned().flatten().unwrap_or_default().to_string();
        let marker = if row.selected { '*' } else { ' ' };
        let style = row.style.map_or("new row".to_owned(), |s| format!("{s:?}"));
        println!("  {marker} {:>2} {title:<8} {style}", row.row);
    }
}

fn main() {
    // Example: swipe-to-drag reordering, driven without any UI objects.
    //
    // An adapter would:
    // - forward press / move / release to the controller
    // - call tick(now_ms) from a timer so a multi-selection stays draggable for a while
    // - paint using the returned rows
    for mode in [DragMode::Remove, DragMode::Dim] {
        let songs = ["Intro", "Verse", "Chorus", "Bridge", "Outro"].map(|title| Song {
            title: title.to_owned(),
            ..Song::default()
        });
        let options = GridOptions::default().with_drag_mode(mode);
        let Ok(mut c) = Controller::with_records(options, RowLayout::default(), songs) else {
            return;
        };

        // Select "Verse" and ctrl-click "Bridge".
        let (Some(verse), Some(target)) = (c.point_in_row(1, true), c.point_in_row(2, false)) else {
            return;
        };
        let _ = c.press(verse, 0);
        let _ = c.release(verse, 0);
        let _ = c.toggle_row(3, 10);
        print(&mut c, &format!("{mode:?}: before"));

        // Swipe left, then drop below the third displayed row.
        match c.drag_rows(verse, target, 100) {
            Ok(Some(outcome)) => println!(
                "dragged={} committed={} reverted={}",
                outcome.dragged.len(),
                outcome.committed,
                outcome.reverted
            ),
            Ok(None) => println!("no drag"),
            Err(err) => println!("drag failed: {err}"),
        }
        print(&mut c, &format!("{mode:?}: after"));
    }
}
