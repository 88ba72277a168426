use crate::{FieldError, FieldKind, RecordId};

/// A cell coordinate that the store cannot currently satisfy.
///
/// Expected while the displayed row count is ahead of the store. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupFailure {
    #[error("row {row} is out of range ({count} records)")]
    RowOutOfRange { row: usize, count: usize },
    #[error("column {column} is out of range ({count} columns)")]
    ColumnOutOfRange { column: usize, count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("index {index} is out of range ({count} records)")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("record {0} is already in the store")]
    DuplicateRecord(RecordId),
    #[error("record type has no field named `{0}`")]
    UnknownField(String),
    #[error(transparent)]
    Field(#[from] FieldError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("column `{column}` is not bound to any field of the record type")]
    UnboundColumn { column: String },
    #[error("no cell widget registered for field `{field}` of kind {kind:?}")]
    UnsupportedColumnKind { field: &'static str, kind: FieldKind },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<FieldError> for GridError {
    fn from(err: FieldError) -> Self {
        Self::Store(StoreError::Field(err))
    }
}
