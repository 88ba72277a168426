use std::collections::BTreeSet;

use virtual_grid::{GridHost, Point, RowRect};

use crate::RowLayout;

/// A headless presentation host.
///
/// `SimHost` keeps the state a real grid widget would keep (displayed row count, current
/// cell, edit mode, selection, pointer capture) and answers geometry queries from a
/// [`RowLayout`]. It holds no UI objects and never calls back into the grid.
#[derive(Clone, Debug, Default)]
pub struct SimHost {
    layout: RowLayout,
    row_count: usize,
    current: Option<(usize, usize)>,
    editing: bool,
    select_all: bool,
    selected: BTreeSet<usize>,
    captured: bool,
    drag_loop: bool,
    redraws: u64,
    row_count_changes: u64,
}

impl SimHost {
    pub fn new(layout: RowLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: RowLayout) {
        self.layout = layout;
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, row: usize) -> bool {
        self.selected.contains(&row)
    }

    /// Replaces the selection with `row`. Returns `true` if the selection changed.
    pub fn select_only(&mut self, row: usize) -> bool {
        if self.selected.len() == 1 && self.selected.contains(&row) {
            return false;
        }
        self.selected.clear();
        self.selected.insert(row);
        true
    }

    /// Flips `row` in or out of the selection.
    pub fn toggle(&mut self, row: usize) {
        if !self.selected.remove(&row) {
            self.selected.insert(row);
        }
    }

    /// Whether the editor was opened with its text selected.
    pub fn select_all_on_edit(&self) -> bool {
        self.select_all
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Whether a drag-and-drop loop is running.
    pub fn in_drag_loop(&self) -> bool {
        self.drag_loop
    }

    pub fn end_drag_loop(&mut self) {
        self.drag_loop = false;
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn row_count_changes(&self) -> u64 {
        self.row_count_changes
    }
}

impl GridHost for SimHost {
    fn set_row_count(&mut self, count: usize) {
        if count != self.row_count {
            self.row_count_changes += 1;
        }
        self.row_count = count;
        self.selected.retain(|&row| row < count);
        if self.current.is_some_and(|(row, _)| row >= count) {
            self.current = None;
            self.editing = false;
        }
    }

    fn redraw(&mut self) {
        self.redraws += 1;
    }

    fn set_current_cell(&mut self, row: usize, column: usize) {
        self.current = Some((row, column));
    }

    fn current_cell(&self) -> Option<(usize, usize)> {
        self.current
    }

    fn begin_edit(&mut self, select_all: bool) {
        if self.current.is_some() {
            self.editing = true;
            self.select_all = select_all;
        }
    }

    fn end_edit(&mut self) {
        self.editing = false;
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn clear_selection(&mut self) {
        self.selected.clear();
    }

    fn select_row(&mut self, row: usize) {
        if row < self.row_count {
            self.selected.insert(row);
        }
    }

    fn selected_rows(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    fn row_at(&self, point: Point) -> Option<usize> {
        self.layout.row_at(point, self.row_count)
    }

    fn row_rect(&self, row: usize) -> Option<RowRect> {
        self.layout.row_rect(row, self.row_count)
    }

    fn set_pointer_capture(&mut self, captured: bool) {
        self.captured = captured;
    }

    fn start_drag_drop(&mut self) {
        self.drag_loop = true;
    }
}
