use alloc::sync::Arc;
use core::fmt;

use crate::{FieldError, FieldTable, FieldValue, Record, RecordId, StoreError};

/// A structural or field-level change to a [`BackingStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    Inserted { index: usize, id: RecordId },
    Removed { index: usize, id: RecordId },
    Replaced { index: usize, old: RecordId, new: RecordId },
    Cleared,
    FieldChanged {
        id: RecordId,
        field: &'static str,
        value: FieldValue,
    },
}

/// A store observer. Listeners run synchronously after the change is applied.
pub type StoreListener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The ordered, index-addressable list of records behind the grid.
///
/// Identity is by [`RecordId`]: a record can appear at most once.
pub struct BackingStore<R: Record> {
    records: Vec<R>,
    table: FieldTable<R>,
    listeners: Vec<(SubscriptionId, StoreListener)>,
    next_subscription: u64,
}

impl<R: Record> BackingStore<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            table: R::field_table(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Seeds a store. Fails on the first duplicate identity.
    pub fn from_records(records: impl IntoIterator<Item = R>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            store.add(record)?;
        }
        Ok(store)
    }

    pub fn field_table(&self) -> &FieldTable<R> {
        &self.table
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    /// Mutable access bypasses change notification; prefer [`Self::set_field`].
    pub fn get_mut(&mut self, index: usize) -> Option<&mut R> {
        self.records.get_mut(index)
    }

    pub fn get_by_id(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Replaces the record at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, record: R) -> Result<R, StoreError> {
        let count = self.count();
        if index >= count {
            return Err(StoreError::IndexOutOfRange { index, count });
        }
        let new = record.id();
        if self.records[index].id() != new && self.contains(new) {
            return Err(StoreError::DuplicateRecord(new));
        }
        let old = core::mem::replace(&mut self.records[index], record);
        self.emit(&StoreEvent::Replaced {
            index,
            old: old.id(),
            new,
        });
        Ok(old)
    }

    pub fn add(&mut self, record: R) -> Result<(), StoreError> {
        let index = self.count();
        self.insert(index, record)
    }

    pub fn insert(&mut self, index: usize, record: R) -> Result<(), StoreError> {
        let count = self.count();
        if index > count {
            return Err(StoreError::IndexOutOfRange { index, count });
        }
        let id = record.id();
        if self.contains(id) {
            return Err(StoreError::DuplicateRecord(id));
        }
        self.records.insert(index, record);
        self.emit(&StoreEvent::Inserted { index, id });
        Ok(())
    }

    /// Removes the record with identity `id`. Returns `None` if it is not in the store.
    pub fn remove(&mut self, id: RecordId) -> Option<R> {
        let index = self.index_of(id)?;
        self.remove_at(index).ok()
    }

    pub fn remove_at(&mut self, index: usize) -> Result<R, StoreError> {
        let count = self.count();
        if index >= count {
            return Err(StoreError::IndexOutOfRange { index, count });
        }
        let record = self.records.remove(index);
        self.emit(&StoreEvent::Removed {
            index,
            id: record.id(),
        });
        Ok(record)
    }

    /// Removes every record and hands them back in order.
    pub fn clear(&mut self) -> Vec<R> {
        let drained = core::mem::take(&mut self.records);
        self.emit(&StoreEvent::Cleared);
        drained
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    pub fn index_of(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(Record::id).collect()
    }

    pub fn field_value(&self, index: usize, field: &str) -> Result<FieldValue, StoreError> {
        let count = self.count();
        let record = self
            .records
            .get(index)
            .ok_or(StoreError::IndexOutOfRange { index, count })?;
        let field = self
            .table
            .field(field)
            .ok_or_else(|| StoreError::UnknownField(field.to_owned()))?;
        Ok(field.get(record))
    }

    /// Writes a field through its declared setter.
    ///
    /// Returns `true` and notifies listeners only if the value actually changed.
    pub fn set_field(
        &mut self,
        index: usize,
        field: &str,
        value: FieldValue,
    ) -> Result<bool, StoreError> {
        let count = self.count();
        let Some(record) = self.records.get_mut(index) else {
            return Err(StoreError::IndexOutOfRange { index, count });
        };
        let field = self
            .table
            .field(field)
            .ok_or_else(|| StoreError::UnknownField(field.to_owned()))?;
        if !field.is_settable() {
            return Err(FieldError::ReadOnly { field: field.name() }.into());
        }
        if field.get(record) == value {
            return Ok(false);
        }
        field.set(record, value)?;
        let event = StoreEvent::FieldChanged {
            id: record.id(),
            field: field.name(),
            value: field.get(record),
        };
        self.emit(&event);
        Ok(true)
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&StoreEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    fn emit(&self, event: &StoreEvent) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }
}

impl<R: Record> Default for BackingStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R: Record> IntoIterator for &'a BackingStore<R> {
    type Item = &'a R;
    type IntoIter = core::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R: Record + fmt::Debug> fmt::Debug for BackingStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackingStore")
            .field("records", &self.records)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
