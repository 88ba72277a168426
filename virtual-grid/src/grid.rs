use crate::hit::hit_test;
use crate::selection::PointerIntent;
use crate::{
    BackingStore, CellBridge, CellWidget, ColumnSet, CountDrift, Deferred, DragEngine, DragEntry,
    DragMode, DragOutcome, DropIndicator, Edge, EditorKey, FieldValue, GridError, GridHost,
    GridOptions, InsertionPoint, LookupFailure, Point, ProvisionalRow, Record, RecordId,
    RowCancel, RowCountSync, RowStyle, RowValidation, SelectionCoordinator, StoreError,
    StoreEvent, SubscriptionId, Suspension, TaskQueue, WidgetMap, WriteTarget,
};

/// A virtual-mode grid bound to a [`BackingStore`].
///
/// The grid owns the records and the host. The host forwards its input and paint events to
/// the entry points below; the grid answers cell queries from the store and tells the host
/// how many rows to show.
///
/// Every event entry point first drains work deferred by earlier events (see
/// [`VirtualGrid::pump`]), so a deferred action never interleaves with a handler.
pub struct VirtualGrid<R: Record, H: GridHost> {
    host: H,
    options: GridOptions,
    store: BackingStore<R>,
    columns: ColumnSet,
    sync: RowCountSync,
    bridge: CellBridge,
    provisional: ProvisionalRow,
    drag: DragEngine<R>,
    selection: SelectionCoordinator,
    queue: TaskQueue,
}

impl<R: Record, H: GridHost> VirtualGrid<R, H> {
    /// Creates an empty grid with one column per declared field.
    pub fn new(host: H, options: GridOptions) -> Result<Self, GridError> {
        Self::with_widgets(host, options, &WidgetMap::default())
    }

    /// Creates an empty grid, mapping field kinds to widgets through `widgets`.
    ///
    /// Fails with [`GridError::UnsupportedColumnKind`] if a field has no widget.
    pub fn with_widgets(
        host: H,
        options: GridOptions,
        widgets: &WidgetMap,
    ) -> Result<Self, GridError> {
        let store = BackingStore::new();
        let columns = ColumnSet::generate(store.field_table(), widgets)?;
        Self::with_columns(host, options, store, columns)
    }

    /// Creates a grid seeded with `records`.
    pub fn with_records(
        host: H,
        options: GridOptions,
        records: impl IntoIterator<Item = R>,
    ) -> Result<Self, GridError> {
        let store = BackingStore::from_records(records)?;
        let columns = ColumnSet::generate(store.field_table(), &WidgetMap::default())?;
        Self::with_columns(host, options, store, columns)
    }

    /// Creates a grid from an existing store and explicit columns.
    ///
    /// Fails with [`GridError::UnboundColumn`] if a column does not name a field.
    pub fn with_columns(
        host: H,
        options: GridOptions,
        store: BackingStore<R>,
        columns: ColumnSet,
    ) -> Result<Self, GridError> {
        columns.validate(store.field_table())?;
        let mut grid = Self {
            host,
            sync: RowCountSync::new(options.allow_new_row),
            selection: SelectionCoordinator::new(
                options.multi_select_debounce_ms,
                options.drag_threshold,
            ),
            options,
            store,
            columns,
            bridge: CellBridge::new(),
            provisional: ProvisionalRow::new(),
            drag: DragEngine::new(),
            queue: TaskQueue::new(),
        };
        // Columns first, row count last.
        grid.sync.resync(grid.store.count(), &mut grid.host);
        gdebug!(
            count = grid.store.count(),
            columns = grid.columns.len(),
            "VirtualGrid::new"
        );
        Ok(grid)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn store(&self) -> &BackingStore<R> {
        &self.store
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn provisional(&self) -> &ProvisionalRow {
        &self.provisional
    }

    pub fn drag(&self) -> &DragEngine<R> {
        &self.drag
    }

    pub fn selection(&self) -> &SelectionCoordinator {
        &self.selection
    }

    pub fn row_count_sync(&self) -> &RowCountSync {
        &self.sync
    }

    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// The row count last pushed to the host.
    pub fn displayed_row_count(&self) -> usize {
        self.sync.displayed()
    }

    pub fn count_drift(&self) -> CountDrift {
        self.sync.drift(self.store.count())
    }

    pub fn new_row_affordance(&self) -> bool {
        self.sync.new_row_affordance()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn lookup_misses(&self) -> u64 {
        self.bridge.misses()
    }

    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    pub fn set_drag_mode(&mut self, mode: DragMode) {
        self.options.drag_mode = mode;
        self.host.redraw();
    }

    pub fn set_allow_new_row(&mut self, allow: bool) {
        self.options.allow_new_row = allow;
        self.sync.set_allow_new_row(allow);
        self.sync.resync(self.store.count(), &mut self.host);
    }

    /// Runs deferred work until the queue is empty. Returns the number of tasks run.
    pub fn pump(&mut self) -> Result<usize, GridError> {
        let mut ran = 0;
        while let Some(task) = self.queue.pop() {
            ran += 1;
            match task {
                Deferred::EnsureProvisional => {
                    self.ensure_provisional()?;
                }
                Deferred::Redraw => self.host.redraw(),
                Deferred::EndEdit => self.host.end_edit(),
                Deferred::BeginDrag => self.begin_drag(),
            }
        }
        Ok(ran)
    }

    // -----------------------------------------------------------------------------------
    // List operations. Each one mutates the store completely, then resyncs.
    // -----------------------------------------------------------------------------------

    pub fn add(&mut self, record: R) -> Result<(), GridError> {
        self.store.add(record)?;
        self.settle();
        Ok(())
    }

    pub fn insert(&mut self, index: usize, record: R) -> Result<(), GridError> {
        self.store.insert(index, record)?;
        self.settle();
        Ok(())
    }

    pub fn set(&mut self, index: usize, record: R) -> Result<R, GridError> {
        let old = self.store.set(index, record)?;
        self.settle();
        Ok(old)
    }

    pub fn remove(&mut self, id: RecordId) -> Option<R> {
        let record = self.store.remove(id)?;
        self.settle();
        Some(record)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<R, GridError> {
        let record = self.store.remove_at(index)?;
        self.settle();
        Ok(record)
    }

    pub fn clear(&mut self) -> Vec<R> {
        let records = self.store.clear();
        self.settle();
        records
    }

    /// Writes a field by name, notifying store listeners if it changed.
    pub fn set_field(
        &mut self,
        index: usize,
        field: &str,
        value: FieldValue,
    ) -> Result<bool, GridError> {
        Ok(self.store.set_field(index, field, value)?)
    }

    /// Runs `f` against the store, then resyncs.
    pub fn update_store<T>(&mut self, f: impl FnOnce(&mut BackingStore<R>) -> T) -> T {
        let out = f(&mut self.store);
        self.settle();
        out
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&StoreEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.store.unsubscribe(subscription)
    }

    /// Moves the record at `drag_row` in front of the record at `drop_row`.
    ///
    /// Both records are captured by identity before the list changes, so the drop target is
    /// found again after the removal shifts indices. Returns the moved record's new index and
    /// makes it the current row.
    pub fn move_row(&mut self, drag_row: usize, drop_row: usize) -> Result<usize, GridError> {
        self.pump()?;
        let count = self.store.count();
        let dragged = self
            .store
            .get(drag_row)
            .map(Record::id)
            .ok_or(StoreError::IndexOutOfRange {
                index: drag_row,
                count,
            })?;
        let target = self
            .store
            .get(drop_row)
            .map(Record::id)
            .ok_or(StoreError::IndexOutOfRange {
                index: drop_row,
                count,
            })?;
        if dragged == target {
            return Ok(drag_row);
        }

        let record = self.store.remove_at(drag_row)?;
        self.sync.resync(self.store.count(), &mut self.host);

        let at = self
            .store
            .index_of(target)
            .unwrap_or(self.store.count());
        self.store.insert(at, record)?;
        self.sync.resync(self.store.count(), &mut self.host);

        let new_index = self.store.index_of(dragged).unwrap_or(at);
        let column = self.host.current_cell().map_or(0, |(_, column)| column);
        self.host.set_current_cell(new_index, column);
        Ok(new_index)
    }

    // -----------------------------------------------------------------------------------
    // Cells
    // -----------------------------------------------------------------------------------

    /// Answers the host's "cell value needed" query.
    ///
    /// Coordinates the store cannot satisfy yield `Ok(None)`; the host shows a blank cell.
    pub fn cell_value_needed(
        &mut self,
        row: usize,
        column: usize,
    ) -> Result<Option<FieldValue>, GridError> {
        self.pump()?;
        self.bridge.read(&self.store, &self.columns, row, column)
    }

    /// Applies the host's "cell value pushed" notification.
    ///
    /// A push into the sentinel row first creates the provisional record. Returns `true` if
    /// the stored value changed.
    pub fn cell_value_pushed(
        &mut self,
        row: usize,
        column: usize,
        value: FieldValue,
    ) -> Result<bool, GridError> {
        self.pump()?;
        let count = self.store.count();
        let new_row = self.accepts_new_row();
        let target = match CellBridge::locate_write(count, new_row, &self.columns, row, column) {
            Ok((target, _)) => target,
            Err(failure) => {
                self.bridge.absorb(failure);
                return Ok(false);
            }
        };
        let index = match target {
            WriteTarget::Row(index) => index,
            WriteTarget::NewRow => {
                let id = self.ensure_provisional()?;
                match self.store.index_of(id) {
                    Some(index) => index,
                    None => {
                        self.bridge.absorb(LookupFailure::RowOutOfRange {
                            row,
                            count: self.store.count(),
                        });
                        return Ok(false);
                    }
                }
            }
        };
        let Some(column) = self.columns.get(column) else {
            return Ok(false);
        };
        self.bridge.write(&mut self.store, index, column, value)
    }

    pub fn row_dirty_state_needed(&self) -> bool {
        self.provisional.is_dirty()
    }

    /// Returns `false` to cancel the edit. Edits are refused while dragging.
    pub fn cell_begin_edit(&mut self, row: usize, _column: usize) -> Result<bool, GridError> {
        self.pump()?;
        if self.drag.is_dragging() {
            gtrace!(row, "cell_begin_edit: refused during drag");
            return Ok(false);
        }
        if row == self.store.count() {
            if !self.accepts_new_row() {
                self.bridge.absorb(LookupFailure::RowOutOfRange {
                    row,
                    count: self.store.count(),
                });
                return Ok(false);
            }
            self.ensure_provisional()?;
            // The new record's read-only fields only show after a repaint.
            self.queue.defer(Deferred::Redraw);
        }
        Ok(true)
    }

    pub fn cell_end_edit(&mut self, _row: usize, _column: usize) -> Result<(), GridError> {
        self.pump()?;
        gtrace!(
            row = _row,
            column = _column,
            editing = self.host.is_editing(),
            "cell_end_edit"
        );
        Ok(())
    }

    /// Handles a change of the current cell's dirty state.
    ///
    /// A dirty checkbox commits on the next tick so a toggle takes effect at once. Any other
    /// dirty cell marks the row dirty.
    pub fn current_cell_dirty_changed(&mut self, dirty: bool) -> Result<(), GridError> {
        self.pump()?;
        if !dirty {
            return Ok(());
        }
        let is_checkbox = self
            .host
            .current_cell()
            .and_then(|(_, column)| self.columns.get(column))
            .is_some_and(|c| c.widget == CellWidget::CheckBox);
        if is_checkbox {
            if self.host.is_editing() {
                self.queue.defer(Deferred::EndEdit);
            }
        } else {
            gtrace!("row marked dirty");
            self.provisional.mark_dirty();
            self.host.redraw();
        }
        Ok(())
    }

    // -----------------------------------------------------------------------------------
    // Rows
    // -----------------------------------------------------------------------------------

    /// Handles the host's "new row needed" notification (the user entered the sentinel row).
    pub fn new_row_needed(&mut self) -> Result<(), GridError> {
        self.pump()?;
        if self.drag.is_dragging() {
            return Ok(());
        }
        self.sync.suspend(Suspension::ProvisionalEdit);
        self.host.redraw();
        self.queue.defer(Deferred::EnsureProvisional);
        Ok(())
    }

    pub fn row_validated(&mut self, _row: usize) -> Result<RowValidation, GridError> {
        self.pump()?;
        let outcome = self
            .provisional
            .validate(&self.store, &mut self.sync, &mut self.host);
        self.host.redraw();
        Ok(outcome)
    }

    pub fn cancel_row_edit(&mut self) -> Result<RowCancel, GridError> {
        self.pump()?;
        // A drag holding the record must not bring it back on revert.
        if let Some(id) = self.provisional.id() {
            self.drag.forget(id);
        }
        Ok(self
            .provisional
            .cancel(&mut self.store, &mut self.sync, &mut self.host))
    }

    /// Removes the record behind a row the user deleted.
    pub fn user_deleting_row(&mut self, row: usize) -> Result<Option<R>, GridError> {
        self.pump()?;
        if row >= self.store.count() {
            self.bridge.absorb(LookupFailure::RowOutOfRange {
                row,
                count: self.store.count(),
            });
            return Ok(None);
        }
        let record = self.store.remove_at(row)?;
        self.settle();
        Ok(Some(record))
    }

    /// Visual treatment of `row`, or `None` outside the data rows.
    pub fn row_style(&self, row: usize) -> Option<RowStyle> {
        let record = self.store.get(row)?;
        let dimmed = self
            .drag
            .session()
            .is_some_and(|s| s.mode() == DragMode::Dim && s.contains(record.id()));
        Some(if dimmed {
            RowStyle::Dimmed
        } else {
            RowStyle::Normal
        })
    }

    // -----------------------------------------------------------------------------------
    // Selection and pointer
    // -----------------------------------------------------------------------------------

    pub fn selection_changed(&mut self, now_ms: u64) -> Result<(), GridError> {
        self.pump()?;
        let selected = self.host.selected_rows().len();
        self.selection.on_selection_changed(selected, now_ms);
        Ok(())
    }

    /// Returns `true` if the host should run its normal click handling.
    ///
    /// Clicks are swallowed while a multi-selection is armed for dragging.
    pub fn mouse_down(&mut self, point: Point) -> Result<bool, GridError> {
        self.pump()?;
        Ok(self.selection.mouse_down(point.x))
    }

    pub fn mouse_move(
        &mut self,
        point: Point,
        left_button: bool,
    ) -> Result<PointerIntent, GridError> {
        self.pump()?;
        let intent = self.selection.mouse_move(point.x, left_button);
        if intent == PointerIntent::BeginDrag {
            self.queue.defer(Deferred::BeginDrag);
        }
        Ok(intent)
    }

    pub fn mouse_up(&mut self, now_ms: u64) -> Result<Option<DragOutcome>, GridError> {
        self.pump()?;
        if !self.drag.is_dragging() {
            return Ok(None);
        }
        Ok(Some(self.finalize_drag(now_ms)))
    }

    /// Filters a host request to set a row's selected state. Returns the state to apply.
    pub fn select_row_request(&self, _row: usize, selected: bool) -> bool {
        self.selection
            .filter_select(selected, self.drag.is_dragging())
    }

    pub fn editor_key_down(&mut self, key: EditorKey) -> Result<(), GridError> {
        self.pump()?;
        if key == EditorKey::Enter {
            self.selection.set_allow_select(false);
        }
        Ok(())
    }

    pub fn editor_hidden(&mut self) -> Result<(), GridError> {
        self.pump()?;
        self.selection.set_allow_select(true);
        Ok(())
    }

    /// Advances adapter-driven timers. Returns `true` when the multi-select window closed.
    pub fn tick(&mut self, now_ms: u64) -> Result<bool, GridError> {
        self.pump()?;
        Ok(self.selection.tick(now_ms))
    }

    // -----------------------------------------------------------------------------------
    // Drag and drop
    // -----------------------------------------------------------------------------------

    /// Tracks the insertion point while a drag hovers over the grid.
    pub fn drag_over(&mut self, point: Point) -> Result<Option<InsertionPoint>, GridError> {
        self.pump()?;
        if !self.drag.is_dragging() {
            return Ok(None);
        }
        let insertion = hit_test(&self.host, point, self.store.count());
        if self.drag.set_insertion(insertion) {
            self.host.redraw();
        }
        Ok(insertion)
    }

    /// Drops the dragged rows at `point` and ends the gesture.
    ///
    /// A drop that hits no data row commits nothing, so the gesture reverts.
    pub fn drag_drop(
        &mut self,
        point: Point,
        now_ms: u64,
    ) -> Result<Option<DragOutcome>, GridError> {
        self.pump()?;
        if !self.drag.is_dragging() {
            return Ok(None);
        }
        let insertion = hit_test(&self.host, point, self.store.count());
        self.drag.set_insertion(insertion);
        let committed = match insertion {
            Some(insertion) => self.drag.commit(&mut self.store, insertion.index),
            None => {
                gdebug!(x = point.x, y = point.y, "drag_drop: no row under pointer");
                Ok(false)
            }
        };
        if matches!(committed, Ok(true)) {
            self.sync.resume(Suspension::Drag);
            self.sync.resync(self.store.count(), &mut self.host);
        }
        let outcome = self.finalize_drag(now_ms);
        committed?;
        Ok(Some(outcome))
    }

    /// Ends a gesture whose drag loop finished without a drop.
    pub fn drag_ended(&mut self, now_ms: u64) -> Result<Option<DragOutcome>, GridError> {
        self.pump()?;
        if !self.drag.is_dragging() {
            return Ok(None);
        }
        Ok(Some(self.finalize_drag(now_ms)))
    }

    /// Where to draw the insertion line, if anywhere.
    pub fn drop_indicator(&self) -> Option<DropIndicator> {
        if !self.drag.is_dragging() {
            return None;
        }
        let insertion = self.drag.session()?.insertion()?;
        let record = self.store.get(insertion.row)?;
        if self.drag.is_dragged(record.id()) {
            return None;
        }
        Some(DropIndicator {
            row: insertion.row,
            edge: if insertion.above {
                Edge::Top
            } else {
                Edge::Bottom
            },
        })
    }

    // -----------------------------------------------------------------------------------

    /// Whether row `count` currently stands for a new record.
    fn accepts_new_row(&self) -> bool {
        self.sync.allow_new_row() && !self.drag.is_dragging()
    }

    fn ensure_provisional(&mut self) -> Result<RecordId, GridError> {
        Ok(self
            .provisional
            .ensure(&mut self.store, &mut self.sync, &mut self.host)?)
    }

    fn begin_drag(&mut self) {
        let selected = self.host.selected_rows();
        let entry = self
            .drag
            .enter(&mut self.store, self.options.drag_mode, &selected);
        if let DragEntry::Started { .. } = entry {
            self.sync.suspend(Suspension::Drag);
            self.sync.resync(self.store.count(), &mut self.host);
            self.host.clear_selection();
            self.host.set_pointer_capture(true);
            self.host.start_drag_drop();
        }
    }

    fn finalize_drag(&mut self, now_ms: u64) -> DragOutcome {
        let outcome = self.drag.finalize(&mut self.store);
        self.host.set_pointer_capture(false);
        self.selection.reset_gesture();
        // Rows must exist before they can be selected again.
        self.sync.resync(self.store.count(), &mut self.host);

        if self.selection.filter_select(true, false) {
            for id in &outcome.dragged {
                if let Some(row) = self.store.index_of(*id) {
                    self.host.select_row(row);
                }
            }
        }
        if outcome.dragged.len() > 1 {
            self.selection.rearm(now_ms);
        }

        self.sync.resume(Suspension::Drag);
        self.sync.resync(self.store.count(), &mut self.host);
        self.host.redraw();
        outcome
    }

    /// Post-mutation bookkeeping for list operations.
    fn settle(&mut self) {
        let orphaned = self
            .provisional
            .id()
            .filter(|id| !self.store.contains(*id));
        if let Some(id) = orphaned {
            gdebug!(%id, "provisional record removed from the store");
            self.provisional.forget(id, &mut self.sync);
        }
        self.sync.resync(self.store.count(), &mut self.host);
    }
}
