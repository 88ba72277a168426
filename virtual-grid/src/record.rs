use core::fmt;

use uuid::Uuid;

/// Stable identity of a record, independent of its field values and of its row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a fresh random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    Text,
    Bool,
    Int,
}

/// A cell value as exchanged with the presentation host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    #[default]
    Null,
    Text(String),
    Bool(bool),
    Int(i64),
}

impl FieldValue {
    /// Kind of the value, or `None` for `Null`.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Null => None,
            Self::Text(_) => Some(FieldKind::Text),
            Self::Bool(_) => Some(FieldKind::Bool),
            Self::Int(_) => Some(FieldKind::Int),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("field `{field}` is read-only")]
    ReadOnly { field: &'static str },
    #[error("field `{field}` expects {expected:?}, got {actual:?}")]
    KindMismatch {
        field: &'static str,
        expected: FieldKind,
        actual: Option<FieldKind>,
    },
}

pub type Getter<R> = fn(&R) -> FieldValue;
pub type Setter<R> = fn(&mut R, FieldValue) -> Result<(), FieldError>;

/// A statically declared accessor for one named field of `R`.
pub struct Field<R> {
    name: &'static str,
    kind: FieldKind,
    get: Getter<R>,
    set: Option<Setter<R>>,
}

impl<R> Field<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Whether the host may push values into this field.
    pub fn is_settable(&self) -> bool {
        self.set.is_some()
    }

    pub fn get(&self, record: &R) -> FieldValue {
        (self.get)(record)
    }

    /// Writes `value` into `record`.
    ///
    /// The value kind is checked against the declared kind before the setter runs. `Null` is
    /// only accepted by text fields.
    pub fn set(&self, record: &mut R, value: FieldValue) -> Result<(), FieldError> {
        let Some(set) = self.set else {
            return Err(FieldError::ReadOnly { field: self.name });
        };
        match value.kind() {
            Some(kind) if kind == self.kind => {}
            None if self.kind == FieldKind::Text => {}
            actual => {
                return Err(FieldError::KindMismatch {
                    field: self.name,
                    expected: self.kind,
                    actual,
                });
            }
        }
        set(record, value)
    }
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind,
            get: self.get,
            set: self.set,
        }
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("settable", &self.is_settable())
            .finish_non_exhaustive()
    }
}

/// The ordered set of fields a record type exposes to the grid.
///
/// Column order follows declaration order.
pub struct FieldTable<R> {
    fields: Vec<Field<R>>,
}

impl<R> FieldTable<R> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declares a read-only field.
    pub fn with_field(mut self, name: &'static str, kind: FieldKind, get: Getter<R>) -> Self {
        self.fields.push(Field {
            name,
            kind,
            get,
            set: None,
        });
        self
    }

    /// Declares a field the host can write.
    pub fn with_settable_field(
        mut self,
        name: &'static str,
        kind: FieldKind,
        get: Getter<R>,
        set: Setter<R>,
    ) -> Self {
        self.fields.push(Field {
            name,
            kind,
            get,
            set: Some(set),
        });
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field<R>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<R> Default for FieldTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for FieldTable<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<R> fmt::Debug for FieldTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

/// A row-backing entity.
///
/// `Default` builds the blank record used for the provisional new row.
pub trait Record: Default {
    fn id(&self) -> RecordId;

    /// Declares the record's fields. Called once per store.
    fn field_table() -> FieldTable<Self>;
}
