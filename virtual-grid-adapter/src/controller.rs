use virtual_grid::{
    DragOutcome, EditorKey, FieldValue, GridError, GridHost, GridOptions, Point, Record,
    RowCancel, RowStyle, RowValidation, VirtualGrid, WidgetMap,
};

use crate::{RowLayout, SimHost};

/// One displayed row as a renderer would draw it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaintedRow {
    pub row: usize,
    /// One entry per column. `None` where the store has no value (the sentinel row).
    pub cells: Vec<Option<FieldValue>>,
    /// `None` for the sentinel row.
    pub style: Option<RowStyle>,
    pub selected: bool,
    pub indicator: Option<virtual_grid::Edge>,
}

/// A framework-neutral controller that wraps a `virtual_grid::VirtualGrid` over a
/// [`SimHost`] and turns gestures into the event sequences a grid widget would deliver.
///
/// This type does not hold any UI objects. Adapters (or tests) drive it by calling:
/// - `press` / `move_to` / `release` for pointer input
/// - `edit_cell`, `commit_row`, `cancel_row` for the editor
/// - `tick(now_ms)` from a timer or frame loop
///
/// Work the grid defers runs before `move_to` returns, the way a message loop would
/// process it before the next input event.
pub struct Controller<R: Record> {
    grid: VirtualGrid<R, SimHost>,
    left_down: bool,
}

impl<R: Record> Controller<R> {
    pub fn new(options: GridOptions, layout: RowLayout) -> Result<Self, GridError> {
        let grid = VirtualGrid::with_widgets(SimHost::new(layout), options, &WidgetMap::default())?;
        Ok(Self::from_grid(grid))
    }

    pub fn with_records(
        options: GridOptions,
        layout: RowLayout,
        records: impl IntoIterator<Item = R>,
    ) -> Result<Self, GridError> {
        let grid = VirtualGrid::with_records(SimHost::new(layout), options, records)?;
        Ok(Self::from_grid(grid))
    }

    pub fn from_grid(grid: VirtualGrid<R, SimHost>) -> Self {
        Self {
            grid,
            left_down: false,
        }
    }

    pub fn grid(&self) -> &VirtualGrid<R, SimHost> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut VirtualGrid<R, SimHost> {
        &mut self.grid
    }

    pub fn into_grid(self) -> VirtualGrid<R, SimHost> {
        self.grid
    }

    pub fn host(&self) -> &SimHost {
        self.grid.host()
    }

    pub fn layout(&self) -> &RowLayout {
        self.grid.host().layout()
    }

    pub fn is_dragging(&self) -> bool {
        self.grid.is_dragging()
    }

    /// The point inside `row` a scripted gesture should use.
    pub fn point_in_row(&self, row: usize, above: bool) -> Option<Point> {
        let layout = self.layout();
        layout.point_in_row(row, above, layout.width / 2)
    }

    /// Left button down. Unless the grid swallows the click, the row under the pointer
    /// becomes the only selected row and the current row.
    pub fn press(&mut self, point: Point, now_ms: u64) -> Result<(), GridError> {
        self.left_down = true;
        if !self.grid.mouse_down(point)? {
            return Ok(());
        }
        let Some(row) = self.grid.host().row_at(point) else {
            return Ok(());
        };
        self.make_current(row)?;
        if row < self.grid.count()
            && self.grid.select_row_request(row, true)
            && self.grid.host_mut().select_only(row)
        {
            self.grid.selection_changed(now_ms)?;
        }
        Ok(())
    }

    /// Ctrl+click: flips `row` in or out of the selection.
    pub fn toggle_row(&mut self, row: usize, now_ms: u64) -> Result<(), GridError> {
        if row >= self.grid.count() {
            return Ok(());
        }
        let selecting = !self.grid.host().is_selected(row);
        if selecting && !self.grid.select_row_request(row, true) {
            return Ok(());
        }
        self.grid.host_mut().toggle(row);
        self.grid.selection_changed(now_ms)
    }

    /// Pointer move. Inside a drag loop this is a drag-over; otherwise it may start a drag.
    pub fn move_to(&mut self, point: Point) -> Result<(), GridError> {
        if self.grid.host().in_drag_loop() {
            self.grid.drag_over(point)?;
        } else {
            self.grid.mouse_move(point, self.left_down)?;
            self.grid.pump()?;
        }
        Ok(())
    }

    /// Left button up. Ends a drag loop with a drop inside the grid, or without one outside.
    pub fn release(&mut self, point: Point, now_ms: u64) -> Result<Option<DragOutcome>, GridError> {
        self.left_down = false;
        let mut outcome = None;
        if self.grid.host().in_drag_loop() {
            self.grid.host_mut().end_drag_loop();
            let inside = self.layout().contains(point);
            adebug!(x = point.x, y = point.y, inside, "Controller::release: drag loop ended");
            outcome = if inside {
                self.grid.drag_drop(point, now_ms)?
            } else {
                self.grid.drag_ended(now_ms)?
            };
        }
        if let Some(finalized) = self.grid.mouse_up(now_ms)? {
            outcome = Some(finalized);
        }
        Ok(outcome)
    }

    /// Drags the current selection: swipes left from `from` past the drag threshold, moves
    /// to `drop_at` and releases there.
    pub fn drag_rows(
        &mut self,
        from: Point,
        drop_at: Point,
        now_ms: u64,
    ) -> Result<Option<DragOutcome>, GridError> {
        self.left_down = true;
        self.grid.mouse_down(from)?;
        let swipe = self.grid.options().drag_threshold.saturating_add(1);
        self.move_to(Point::new(from.x.saturating_sub(swipe), from.y))?;
        self.move_to(drop_at)?;
        self.release(drop_at, now_ms)
    }

    pub fn tick(&mut self, now_ms: u64) -> Result<bool, GridError> {
        self.grid.tick(now_ms)
    }

    /// Types `value` into a cell and leaves the editor.
    ///
    /// Editing the sentinel row creates the provisional record first. Returns `false` when
    /// the edit was refused or the value did not change.
    pub fn edit_cell(
        &mut self,
        row: usize,
        column: usize,
        value: FieldValue,
    ) -> Result<bool, GridError> {
        self.grid.host_mut().set_current_cell(row, column);
        if row == self.grid.count() && self.grid.new_row_affordance() {
            self.grid.new_row_needed()?;
            self.grid.pump()?;
            self.grid.host_mut().set_current_cell(row, column);
        }
        if !self.grid.cell_begin_edit(row, column)? {
            atrace!(row, column, "Controller::edit_cell: edit refused");
            return Ok(false);
        }
        if !self.grid.host().is_editing() {
            self.grid.host_mut().begin_edit(false);
        }
        self.grid.current_cell_dirty_changed(true)?;
        let changed = self.grid.cell_value_pushed(row, column, value)?;
        self.grid.cell_end_edit(row, column)?;
        self.grid.host_mut().end_edit();
        self.grid.editor_hidden()?;
        self.grid.pump()?;
        Ok(changed)
    }

    /// Enter in the editor: the current row is validated.
    pub fn commit_row(&mut self) -> Result<RowValidation, GridError> {
        self.grid.editor_key_down(EditorKey::Enter)?;
        self.grid.host_mut().end_edit();
        self.grid.editor_hidden()?;
        let row = self.current_row();
        self.grid.row_validated(row)
    }

    /// Escape in the editor: pending row edits are cancelled.
    pub fn cancel_row(&mut self) -> Result<RowCancel, GridError> {
        self.grid.editor_key_down(EditorKey::Escape)?;
        self.grid.host_mut().end_edit();
        self.grid.editor_hidden()?;
        self.grid.cancel_row_edit()
    }

    /// Delete key on a selected row.
    pub fn delete_row(&mut self, row: usize) -> Result<Option<R>, GridError> {
        self.grid.user_deleting_row(row)
    }

    /// Renders every displayed row through the grid's virtual-mode queries.
    pub fn paint(&mut self) -> Result<Vec<PaintedRow>, GridError> {
        self.grid.pump()?;
        let indicator = self.grid.drop_indicator();
        let columns = self.grid.columns().len();
        let mut rows = Vec::with_capacity(self.grid.host().row_count());
        for row in 0..self.grid.host().row_count() {
            let mut cells = Vec::with_capacity(columns);
            for column in 0..columns {
                // The sentinel row has no record behind it.
                let value = if row < self.grid.count() {
                    self.grid.cell_value_needed(row, column)?
                } else {
                    None
                };
                cells.push(value);
            }
            rows.push(PaintedRow {
                row,
                cells,
                style: self.grid.row_style(row),
                selected: self.grid.host().is_selected(row),
                indicator: indicator.filter(|i| i.row == row).map(|i| i.edge),
            });
        }
        Ok(rows)
    }

    fn current_row(&self) -> usize {
        self.grid
            .host()
            .current_cell()
            .map_or(self.grid.count(), |(row, _)| row)
    }

    fn make_current(&mut self, row: usize) -> Result<(), GridError> {
        let column = self
            .grid
            .host()
            .current_cell()
            .map_or(0, |(_, column)| column);
        self.grid.host_mut().set_current_cell(row, column);
        if row == self.grid.count() && self.grid.new_row_affordance() {
            self.grid.new_row_needed()?;
        }
        Ok(())
    }
}
