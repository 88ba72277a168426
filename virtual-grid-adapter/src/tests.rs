use crate::*;

use virtual_grid::{
    DragMode, Edge, FieldKind, FieldTable, FieldValue, GridHost, GridOptions, Point, Record,
    RecordId, RowCancel, RowRect, RowStyle, RowValidation,
};

#[derive(Clone, Debug, Default)]
struct Task {
    id: RecordId,
    title: String,
    done: bool,
}

impl Record for Task {
    fn id(&self) -> RecordId {
        self.id
    }

    fn field_table() -> FieldTable<Self> {
        FieldTable::new()
            .with_settable_field(
                "Title",
                FieldKind::Text,
                |t: &Task| FieldValue::Text(t.title.clone()),
                |t: &mut Task, v: FieldValue| {
                    t.title = v.as_text().unwrap_or_default().to_owned();
                    Ok(())
                },
            )
            .with_settable_field(
                "Done",
                FieldKind::Bool,
                |t: &Task| t.done.into(),
                |t: &mut Task, v: FieldValue| {
                    t.done = v.as_bool().unwrap_or(false);
                    Ok(())
                },
            )
    }
}

fn task(title: &str) -> Task {
    Task {
        title: title.to_owned(),
        ..Task::default()
    }
}

fn controller(titles: &[&str], options: GridOptions) -> Controller<Task> {
    Controller::with_records(
        options,
        RowLayout::default(),
        titles.iter().map(|t| task(t)),
    )
    .unwrap()
}

fn titles(c: &Controller<Task>) -> Vec<String> {
    c.grid().store().iter().map(|t| t.title.clone()).collect()
}

fn selected(c: &Controller<Task>) -> Vec<usize> {
    c.host().selected().iter().copied().collect()
}

fn at(c: &Controller<Task>, row: usize, above: bool) -> Point {
    c.point_in_row(row, above).unwrap()
}

fn click(c: &mut Controller<Task>, row: usize, now_ms: u64) {
    let p = at(c, row, true);
    c.press(p, now_ms).unwrap();
    c.release(p, now_ms).unwrap();
}

#[test]
fn layout_maps_points_to_rows() {
    let layout = RowLayout::new(20, 400, 300).with_header_height(24);
    assert_eq!(layout.row_at(Point::new(10, 23), 10), None);
    assert_eq!(layout.row_at(Point::new(10, 24), 10), Some(0));
    assert_eq!(layout.row_at(Point::new(10, 63), 10), Some(1));
    assert_eq!(layout.row_at(Point::new(10, 63), 1), None);
    assert_eq!(layout.row_at(Point::new(400, 30), 10), None);
    assert_eq!(
        layout.row_rect(1, 10),
        Some(RowRect {
            x: 0,
            y: 44,
            width: 400,
            height: 20
        })
    );
    assert_eq!(layout.visible_rows(), 14);

    let scrolled = layout.with_first_row(5);
    assert_eq!(scrolled.row_at(Point::new(10, 24), 10), Some(5));
    assert_eq!(scrolled.row_rect(4, 10), None);

    let above = layout.point_in_row(2, true, 7).unwrap();
    let below = layout.point_in_row(2, false, 7).unwrap();
    let mid = layout.row_rect(2, 10).unwrap().midline();
    assert!(above.y <= mid);
    assert!(below.y > mid);
}

#[test]
fn click_selects_a_single_row() {
    let mut c = controller(&["A", "B", "C"], GridOptions::default());
    click(&mut c, 1, 0);
    assert_eq!(selected(&c), [1]);
    assert_eq!(c.host().current_cell().map(|(row, _)| row), Some(1));
    assert!(!c.grid().selection().is_multi_select_armed());

    click(&mut c, 2, 10);
    assert_eq!(selected(&c), [2]);
}

#[test]
fn multi_selection_survives_clicks_while_armed() {
    let mut c = controller(&["A", "B", "C"], GridOptions::default());
    click(&mut c, 0, 0);
    c.toggle_row(2, 10).unwrap();
    assert_eq!(selected(&c), [0, 2]);
    assert!(c.grid().selection().is_multi_select_armed());

    click(&mut c, 1, 20);
    assert_eq!(selected(&c), [0, 2]);

    assert!(c.tick(2010).unwrap());
    click(&mut c, 1, 2020);
    assert_eq!(selected(&c), [1]);
}

#[test]
fn swipe_drag_moves_the_selected_row() {
    let mut c = controller(&["A", "B", "C", "D"], GridOptions::default());
    click(&mut c, 1, 0);

    let from = at(&c, 1, true);
    let drop_at = at(&c, 2, false);
    let outcome = c.drag_rows(from, drop_at, 100).unwrap().unwrap();
    assert!(outcome.committed);

    assert_eq!(titles(&c), ["A", "C", "D", "B"]);
    assert_eq!(selected(&c), [3]);
    assert_eq!(c.host().row_count(), 5);
    assert!(!c.host().in_drag_loop());
    assert!(!c.host().is_captured());
    assert!(!c.is_dragging());
}

#[test]
fn drops_without_a_target_revert() {
    let mut c = controller(&["A", "B", "C", "D"], GridOptions::default());
    click(&mut c, 1, 0);
    let from = at(&c, 1, true);

    let outside = c.drag_rows(from, Point::new(200, 1000), 100).unwrap().unwrap();
    assert!(outside.reverted);
    assert_eq!(titles(&c), ["A", "B", "C", "D"]);

    // Inside the client area but below the last row.
    let below = c.drag_rows(from, Point::new(200, 250), 200).unwrap().unwrap();
    assert!(below.reverted);
    assert_eq!(titles(&c), ["A", "B", "C", "D"]);
    assert_eq!(selected(&c), [1]);
}

#[test]
fn dim_drag_paints_dimmed_rows_and_indicator() {
    let mut c = controller(
        &["A", "B", "C", "D"],
        GridOptions::default().with_drag_mode(DragMode::Dim),
    );
    let from = at(&c, 1, true);
    c.press(from, 0).unwrap();
    c.move_to(Point::new(from.x - 40, from.y)).unwrap();
    assert!(c.host().in_drag_loop());

    let target = at(&c, 3, true);
    c.move_to(target).unwrap();
    let painted = c.paint().unwrap();
    assert_eq!(painted.len(), 4);
    assert_eq!(painted[1].style, Some(RowStyle::Dimmed));
    assert_eq!(painted[0].style, Some(RowStyle::Normal));
    assert_eq!(painted[3].indicator, Some(Edge::Top));
    assert!(painted.iter().filter(|r| r.row != 3).all(|r| r.indicator.is_none()));

    c.release(target, 50).unwrap();
    assert_eq!(titles(&c), ["A", "C", "B", "D"]);
    assert_eq!(selected(&c), [2]);
}

#[test]
fn multi_row_drag_rearms_the_selection() {
    let mut c = controller(&["A", "B", "C", "D", "E"], GridOptions::default());
    click(&mut c, 0, 0);
    c.toggle_row(2, 10).unwrap();

    let from = at(&c, 0, true);
    let drop_at = at(&c, 2, true);
    c.drag_rows(from, drop_at, 500).unwrap();
    assert_eq!(titles(&c), ["B", "D", "A", "C", "E"]);
    assert_eq!(selected(&c), [2, 3]);
    assert!(c.grid().selection().is_multi_select_armed());

    assert!(!c.tick(2499).unwrap());
    assert!(c.tick(2500).unwrap());
}

#[test]
fn editing_the_sentinel_row_adds_a_record() {
    let mut c = controller(&["A", "B"], GridOptions::default());
    assert_eq!(c.host().row_count(), 3);

    assert!(c.edit_cell(2, 0, "C".into()).unwrap());
    assert_eq!(c.grid().count(), 3);
    assert_eq!(c.host().row_count(), 3);
    assert!(c.grid().provisional().is_editing());
    assert!(c.grid().row_dirty_state_needed());

    let id = c.grid().provisional().id().unwrap();
    assert_eq!(c.commit_row().unwrap(), RowValidation::Committed(id));
    assert_eq!(titles(&c), ["A", "B", "C"]);
    assert_eq!(c.host().row_count(), 4);

    let painted = c.paint().unwrap();
    let sentinel = painted.last().unwrap();
    assert_eq!(sentinel.row, 3);
    assert!(sentinel.cells.iter().all(Option::is_none));
    assert_eq!(sentinel.style, None);
    assert_eq!(c.grid().lookup_misses(), 0);
}

#[test]
fn cancelling_the_new_row_rolls_it_back() {
    let mut c = controller(&["A", "B"], GridOptions::default());
    c.edit_cell(2, 0, "C".into()).unwrap();
    let id = c.grid().provisional().id().unwrap();

    assert_eq!(c.cancel_row().unwrap(), RowCancel::Cancelled(id));
    assert_eq!(titles(&c), ["A", "B"]);
    assert_eq!(c.host().row_count(), 3);
}

#[test]
fn pressing_the_sentinel_row_creates_the_record_on_the_next_tick() {
    let mut c = controller(&["A"], GridOptions::default());
    let p = at(&c, 1, true);
    c.press(p, 0).unwrap();
    assert_eq!(c.grid().count(), 1);
    assert_eq!(c.grid().pending_tasks(), 1);

    let painted = c.paint().unwrap();
    assert_eq!(c.grid().count(), 2);
    assert_eq!(painted.len(), 2);
    assert!(c.host().is_editing());
    assert!(c.host().select_all_on_edit());
}

#[test]
fn checkbox_edits_commit_immediately() {
    let mut c = controller(&["A", "B"], GridOptions::default());
    assert!(c.edit_cell(0, 1, true.into()).unwrap());
    assert!(c.grid().store().get(0).unwrap().done);
    assert!(!c.host().is_editing());
    assert!(!c.grid().row_dirty_state_needed());
}

#[test]
fn edits_are_refused_while_dragging() {
    let mut c = controller(&["A", "B", "C"], GridOptions::default());
    let from = at(&c, 0, true);
    c.press(from, 0).unwrap();
    c.move_to(Point::new(from.x - 40, from.y)).unwrap();
    assert!(c.is_dragging());

    assert!(!c.edit_cell(0, 0, "x".into()).unwrap());
    c.release(Point::new(200, 1000), 10).unwrap();
    assert_eq!(titles(&c), ["A", "B", "C"]);
}

#[test]
fn deleting_a_row_resyncs() {
    let mut c = controller(&["A", "B"], GridOptions::default());
    let removed = c.delete_row(0).unwrap().unwrap();
    assert_eq!(removed.title, "A");
    assert_eq!(c.host().row_count(), 2);
    assert!(c.delete_row(5).unwrap().is_none());
}

#[test]
fn painting_reads_every_displayed_cell() {
    let mut c = controller(&["A", "B"], GridOptions::default().with_allow_new_row(false));
    let painted = c.paint().unwrap();
    assert_eq!(painted.len(), 2);
    assert_eq!(
        painted[1].cells,
        [Some(FieldValue::from("B")), Some(FieldValue::Bool(false))]
    );
    assert!(!painted[1].selected);
}
