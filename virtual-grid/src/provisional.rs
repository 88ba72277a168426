use crate::{BackingStore, GridHost, Record, RecordId, RowCountSync, StoreError, Suspension};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProvisionalState {
    #[default]
    Idle,
    /// A tentative record has been appended to the store and is being edited.
    Editing(RecordId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowValidation {
    /// The provisional record became permanent.
    Committed(RecordId),
    /// An existing row had pending edits; they are now accepted.
    DirtyCleared,
    Clean,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowCancel {
    /// The provisional record was rolled back out of the store.
    Cancelled(RecordId),
    NothingPending,
}

/// Lifecycle of the record created through the sentinel new row.
///
/// `Idle -> Editing -> (Committed | Cancelled) -> Idle`. While editing, the new-row
/// affordance is suspended so the provisional record itself occupies the last row.
#[derive(Clone, Debug, Default)]
pub struct ProvisionalRow {
    state: ProvisionalState,
    dirty: bool,
}

impl ProvisionalRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProvisionalState {
        self.state
    }

    pub fn id(&self) -> Option<RecordId> {
        match self.state {
            ProvisionalState::Editing(id) => Some(id),
            ProvisionalState::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, ProvisionalState::Editing(_))
    }

    pub fn is_provisional(&self, id: RecordId) -> bool {
        self.id() == Some(id)
    }

    /// Row dirty state as reported to the host.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns the provisional record, creating it first if needed.
    ///
    /// Creation appends a blank record, resyncs the row count (sentinel withdrawn), and opens
    /// an editor on the new record's first cell.
    pub fn ensure<R: Record>(
        &mut self,
        store: &mut BackingStore<R>,
        sync: &mut RowCountSync,
        host: &mut impl GridHost,
    ) -> Result<RecordId, StoreError> {
        if let ProvisionalState::Editing(id) = self.state {
            return Ok(id);
        }
        let record = R::default();
        let id = record.id();
        store.add(record)?;
        self.state = ProvisionalState::Editing(id);
        gdebug!(%id, count = store.count(), "ProvisionalRow: Idle -> Editing");

        sync.suspend(Suspension::ProvisionalEdit);
        sync.resync(store.count(), host);
        host.set_current_cell(store.count() - 1, 0);
        host.begin_edit(true);
        host.redraw();
        Ok(id)
    }

    /// Handles the host's row-validated signal.
    pub fn validate<R: Record>(
        &mut self,
        store: &BackingStore<R>,
        sync: &mut RowCountSync,
        host: &mut impl GridHost,
    ) -> RowValidation {
        let was_dirty = core::mem::take(&mut self.dirty);
        let outcome = match core::mem::take(&mut self.state) {
            ProvisionalState::Editing(id) => {
                gdebug!(%id, "ProvisionalRow: Editing -> Committed");
                RowValidation::Committed(id)
            }
            ProvisionalState::Idle if was_dirty => RowValidation::DirtyCleared,
            ProvisionalState::Idle => RowValidation::Clean,
        };
        if outcome != RowValidation::Clean {
            sync.resume(Suspension::ProvisionalEdit);
            sync.resync(store.count(), host);
        }
        outcome
    }

    /// Handles the host's row-edit-cancel signal.
    pub fn cancel<R: Record>(
        &mut self,
        store: &mut BackingStore<R>,
        sync: &mut RowCountSync,
        host: &mut impl GridHost,
    ) -> RowCancel {
        self.dirty = false;
        let outcome = match core::mem::take(&mut self.state) {
            ProvisionalState::Editing(id) => {
                if store.remove(id).is_none() {
                    gwarn!(%id, "ProvisionalRow: provisional record already left the store");
                }
                gdebug!(%id, count = store.count(), "ProvisionalRow: Editing -> Cancelled");
                RowCancel::Cancelled(id)
            }
            ProvisionalState::Idle => RowCancel::NothingPending,
        };
        sync.resume(Suspension::ProvisionalEdit);
        sync.resync(store.count(), host);
        outcome
    }

    /// Drops the provisional marker for a record that was removed some other way.
    pub fn forget(&mut self, id: RecordId, sync: &mut RowCountSync) -> bool {
        if !self.is_provisional(id) {
            return false;
        }
        self.state = ProvisionalState::Idle;
        self.dirty = false;
        sync.resume(Suspension::ProvisionalEdit);
        true
    }
}
