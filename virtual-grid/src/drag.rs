use std::collections::HashMap;

use crate::{BackingStore, InsertionPoint, Record, RecordId, StoreError};

/// How dragged rows are presented while the gesture is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragMode {
    /// Dragged records leave the store until they are dropped.
    #[default]
    Remove,
    /// Dragged records stay in place and are drawn dimmed.
    Dim,
}

/// State for one drag gesture, from setup to finalize.
#[derive(Debug)]
pub struct DragSession<R> {
    mode: DragMode,
    items: Vec<RecordId>,
    held: Vec<R>,
    snapshot: Option<Vec<RecordId>>,
    insertion: Option<InsertionPoint>,
    committed: bool,
}

impl<R> DragSession<R> {
    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Dragged identities, in ascending original row order.
    pub fn items(&self) -> &[RecordId] {
        &self.items
    }

    /// Records currently held outside the store (Remove mode).
    pub fn held(&self) -> &[R] {
        &self.held
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn insertion(&self) -> Option<InsertionPoint> {
        self.insertion
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.items.contains(&id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEntry {
    /// First entry of the gesture: the session was set up.
    Started { items: usize },
    /// The gesture was already active; only the depth counter moved.
    Reentered { depth: usize },
}

/// What [`DragEngine::finalize`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragOutcome {
    pub dragged: Vec<RecordId>,
    pub committed: bool,
    pub reverted: bool,
}

/// The row drag state machine.
///
/// `depth == 0` is idle. Every entry during one gesture bumps the depth but only the first
/// captures the selection and snapshots the store; [`DragEngine::finalize`] always returns
/// the depth to zero.
#[derive(Debug)]
pub struct DragEngine<R> {
    depth: usize,
    session: Option<DragSession<R>>,
}

impl<R: Record> DragEngine<R> {
    pub fn new() -> Self {
        Self {
            depth: 0,
            session: None,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_dragging(&self) -> bool {
        self.depth != 0
    }

    pub fn session(&self) -> Option<&DragSession<R>> {
        self.session.as_ref()
    }

    pub fn is_dragged(&self, id: RecordId) -> bool {
        self.session.as_ref().is_some_and(|s| s.contains(id))
    }

    /// Drops `id` from the active gesture so neither commit nor revert brings it back.
    ///
    /// Returns the held record in Remove mode. Returns `None` when the record is not part of
    /// the gesture or is still in the store.
    pub fn forget(&mut self, id: RecordId) -> Option<R> {
        let session = self.session.as_mut()?;
        session.items.retain(|&item| item != id);
        if let Some(snapshot) = session.snapshot.as_mut() {
            snapshot.retain(|&item| item != id);
        }
        let at = session.held.iter().position(|r| r.id() == id)?;
        gdebug!(%id, "DragEngine: forgot held record");
        Some(session.held.remove(at))
    }

    /// Enters the drag state.
    ///
    /// On the first entry the current ordering is snapshotted and the records at
    /// `selected_rows` are captured in ascending row order. In Remove mode they are taken
    /// out of the store right away.
    pub fn enter(
        &mut self,
        store: &mut BackingStore<R>,
        mode: DragMode,
        selected_rows: &[usize],
    ) -> DragEntry {
        let depth = self.depth;
        self.depth = self.depth.saturating_add(1);
        if depth != 0 {
            return DragEntry::Reentered { depth: self.depth };
        }

        let snapshot = store.ids();
        let mut rows: Vec<usize> = selected_rows
            .iter()
            .copied()
            .filter(|&row| row < store.count())
            .collect();
        rows.sort_unstable();
        rows.dedup();
        let items: Vec<RecordId> = rows.iter().map(|&row| snapshot[row]).collect();

        let held = match mode {
            DragMode::Remove => items.iter().filter_map(|&id| store.remove(id)).collect(),
            DragMode::Dim => Vec::new(),
        };
        gdebug!(
            ?mode,
            items = items.len(),
            count = store.count(),
            "DragEngine: Idle -> Dragging"
        );

        let entry = DragEntry::Started { items: items.len() };
        self.session = Some(DragSession {
            mode,
            items,
            held,
            snapshot: Some(snapshot),
            insertion: None,
            committed: false,
        });
        entry
    }

    /// Records the latest hit-test result. Returns `true` if the insertion index changed.
    pub fn set_insertion(&mut self, insertion: Option<InsertionPoint>) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let changed = session.insertion.map(|p| p.index) != insertion.map(|p| p.index);
        session.insertion = insertion;
        if changed {
            gtrace!(index = ?insertion.map(|p| p.index), "DragEngine: insertion index changed");
        }
        changed
    }

    /// Places the dragged records at `index` and forgets the revert snapshot.
    ///
    /// The target is resolved by identity: the first non-dragged record at or after
    /// `index` is captured before anything moves, and the dragged records are inserted in
    /// front of wherever that record sits afterwards. No such record means the end of the
    /// list. Returns `false` when no gesture is active.
    pub fn commit(
        &mut self,
        store: &mut BackingStore<R>,
        index: usize,
    ) -> Result<bool, StoreError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };
        let anchor = store
            .iter()
            .skip(index)
            .map(Record::id)
            .find(|id| !session.items.contains(id));

        let moving: Vec<R> = match session.mode {
            DragMode::Remove => core::mem::take(&mut session.held),
            DragMode::Dim => session
                .items
                .iter()
                .filter_map(|&id| store.remove(id))
                .collect(),
        };

        let mut at = anchor
            .and_then(|id| store.index_of(id))
            .unwrap_or(store.count());
        gdebug!(
            requested = index,
            resolved = at,
            items = moving.len(),
            "DragEngine: commit"
        );
        for record in moving {
            store.insert(at, record)?;
            at += 1;
        }

        session.snapshot = None;
        session.committed = true;
        Ok(true)
    }

    /// Ends the gesture, whatever happened.
    ///
    /// If the gesture was not committed the store is rebuilt from the snapshot, putting
    /// back the same record instances in their original order.
    pub fn finalize(&mut self, store: &mut BackingStore<R>) -> DragOutcome {
        self.depth = 0;
        let Some(mut session) = self.session.take() else {
            return DragOutcome::default();
        };

        let mut reverted = false;
        if let Some(snapshot) = session.snapshot.take() {
            let held = core::mem::take(&mut session.held);
            revert(store, &snapshot, held);
            reverted = true;
        } else if !session.held.is_empty() {
            gwarn!(
                held = session.held.len(),
                "DragEngine: held records without snapshot, appending"
            );
            for record in core::mem::take(&mut session.held) {
                if let Err(_err) = store.add(record) {
                    gwarn!(error = %_err, "DragEngine: failed to return held record");
                }
            }
        }
        gdebug!(
            committed = session.committed,
            reverted,
            count = store.count(),
            "DragEngine: Dragging -> Idle"
        );

        DragOutcome {
            dragged: session.items,
            committed: session.committed,
            reverted,
        }
    }
}

impl<R: Record> Default for DragEngine<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn revert<R: Record>(store: &mut BackingStore<R>, snapshot: &[RecordId], held: Vec<R>) {
    let mut pool: HashMap<RecordId, R> = store
        .clear()
        .into_iter()
        .chain(held)
        .map(|r| (r.id(), r))
        .collect();
    for id in snapshot {
        match pool.remove(id) {
            Some(record) => {
                if let Err(_err) = store.add(record) {
                    gwarn!(error = %_err, "DragEngine: revert failed to restore record");
                }
            }
            None => {
                gwarn!(%id, "DragEngine: snapshot record missing during revert");
            }
        }
    }
    for (_, record) in pool {
        gwarn!(id = %record.id(), "DragEngine: record outside snapshot kept after revert");
        if let Err(_err) = store.add(record) {
            gwarn!(error = %_err, "DragEngine: revert failed to keep record");
        }
    }
}
