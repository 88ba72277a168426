use crate::{Point, RowRect};

/// The presentation layer a [`crate::VirtualGrid`] drives.
///
/// The grid holds no UI objects. A host renders rows, owns the selection and the editing
/// control, and forwards its input events to the grid's entry points. The grid calls back
/// through this trait to change what the host shows. Implementations must not call back
/// into the grid from these methods; anything that needs to react should do so after the
/// current grid call returns.
pub trait GridHost {
    /// Sets how many rows the host displays, including the sentinel new row.
    fn set_row_count(&mut self, count: usize);

    /// Requests a full repaint.
    fn redraw(&mut self);

    fn set_current_cell(&mut self, row: usize, column: usize);

    fn current_cell(&self) -> Option<(usize, usize)>;

    /// Puts the current cell into edit mode.
    fn begin_edit(&mut self, select_all: bool);

    /// Commits and leaves edit mode.
    fn end_edit(&mut self);

    fn is_editing(&self) -> bool;

    fn clear_selection(&mut self);

    fn select_row(&mut self, row: usize);

    /// Selected rows, in any order.
    fn selected_rows(&self) -> Vec<usize>;

    /// The displayed row under `point`, if any.
    fn row_at(&self, point: Point) -> Option<usize>;

    /// The display rectangle of `row`, if it is displayed.
    fn row_rect(&self, row: usize) -> Option<RowRect>;

    fn set_pointer_capture(&mut self, _captured: bool) {}

    /// Called once when a drag gesture begins. Hosts with a native drag loop start it here.
    fn start_drag_drop(&mut self) {}
}
