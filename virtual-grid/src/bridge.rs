use crate::{
    BackingStore, Column, ColumnSet, FieldValue, GridError, LookupFailure, Record, StoreError,
};

/// Which record a cell write lands in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteTarget {
    Row(usize),
    /// The sentinel new row; the write needs a provisional record first.
    NewRow,
}

/// Maps (row, column) coordinates onto record fields through the columns' binding keys.
///
/// Out-of-range coordinates are lookup misses: they are logged and counted, and reads
/// produce no value. A binding key that does not resolve is a configuration error.
#[derive(Clone, Debug, Default)]
pub struct CellBridge {
    misses: u64,
}

impl CellBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup misses absorbed so far.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn absorb(&mut self, _failure: LookupFailure) {
        gwarn!(failure = %_failure, "CellBridge: lookup miss");
        self.misses = self.misses.wrapping_add(1);
    }

    fn column(columns: &ColumnSet, column: usize) -> Result<&Column, LookupFailure> {
        columns.get(column).ok_or(LookupFailure::ColumnOutOfRange {
            column,
            count: columns.len(),
        })
    }

    pub fn locate_read<'a>(
        count: usize,
        columns: &'a ColumnSet,
        row: usize,
        column: usize,
    ) -> Result<&'a Column, LookupFailure> {
        let column = Self::column(columns, column)?;
        if row >= count {
            return Err(LookupFailure::RowOutOfRange { row, count });
        }
        Ok(column)
    }

    /// Resolves a write. Row `count` is the sentinel row only when `new_row` says one can
    /// be opened; otherwise it is out of range like any other row past the end.
    pub fn locate_write<'a>(
        count: usize,
        new_row: bool,
        columns: &'a ColumnSet,
        row: usize,
        column: usize,
    ) -> Result<(WriteTarget, &'a Column), LookupFailure> {
        let column = Self::column(columns, column)?;
        let target = match row.cmp(&count) {
            core::cmp::Ordering::Less => WriteTarget::Row(row),
            core::cmp::Ordering::Equal if new_row => WriteTarget::NewRow,
            _ => return Err(LookupFailure::RowOutOfRange { row, count }),
        };
        Ok((target, column))
    }

    /// Reads the value shown at (row, column).
    pub fn read<R: Record>(
        &mut self,
        store: &BackingStore<R>,
        columns: &ColumnSet,
        row: usize,
        column: usize,
    ) -> Result<Option<FieldValue>, GridError> {
        let column = match Self::locate_read(store.count(), columns, row, column) {
            Ok(column) => column,
            Err(failure) => {
                self.absorb(failure);
                return Ok(None);
            }
        };
        store
            .field_value(row, &column.name)
            .map(Some)
            .map_err(|err| binding_error(err, column))
    }

    /// Writes `value` into the record at store index `index`, in the field bound to `column`.
    ///
    /// Returns `true` if the stored value changed.
    pub fn write<R: Record>(
        &mut self,
        store: &mut BackingStore<R>,
        index: usize,
        column: &Column,
        value: FieldValue,
    ) -> Result<bool, GridError> {
        gtrace!(index, column = %column.name, ?value, "CellBridge: write");
        store
            .set_field(index, &column.name, value)
            .map_err(|err| binding_error(err, column))
    }
}

fn binding_error(err: StoreError, column: &Column) -> GridError {
    match err {
        StoreError::UnknownField(_) => GridError::UnboundColumn {
            column: column.name.clone(),
        },
        other => GridError::Store(other),
    }
}
