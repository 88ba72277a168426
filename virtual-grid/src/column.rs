use alloc::collections::BTreeMap;

use crate::{FieldKind, FieldTable, GridError};

/// The editor/renderer a column uses for its cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellWidget {
    TextBox,
    CheckBox,
}

/// How a column claims horizontal space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnSizing {
    /// Share the remaining width.
    Fill,
    /// Size to the header text.
    Header,
}

/// Maps field kinds to cell widgets. Kinds without an entry cannot be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetMap {
    entries: BTreeMap<FieldKind, (CellWidget, ColumnSizing)>,
}

impl WidgetMap {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, kind: FieldKind, widget: CellWidget, sizing: ColumnSizing) -> Self {
        self.entries.insert(kind, (widget, sizing));
        self
    }

    pub fn get(&self, kind: FieldKind) -> Option<(CellWidget, ColumnSizing)> {
        self.entries.get(&kind).copied()
    }
}

impl Default for WidgetMap {
    /// Text fields fill, booleans are header-sized checkboxes.
    fn default() -> Self {
        Self::empty()
            .with(FieldKind::Text, CellWidget::TextBox, ColumnSizing::Fill)
            .with(FieldKind::Bool, CellWidget::CheckBox, ColumnSizing::Header)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Binding key: the name of the record field this column shows.
    pub name: String,
    pub header: String,
    pub kind: FieldKind,
    pub widget: CellWidget,
    pub sizing: ColumnSizing,
    pub read_only: bool,
}

/// The grid's column configuration. Read-only once the grid is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    /// Derives one column per field, in declaration order.
    pub fn generate<R>(table: &FieldTable<R>, widgets: &WidgetMap) -> Result<Self, GridError> {
        let mut columns = Vec::with_capacity(table.len());
        for field in table.fields() {
            let Some((widget, sizing)) = widgets.get(field.kind()) else {
                return Err(GridError::UnsupportedColumnKind {
                    field: field.name(),
                    kind: field.kind(),
                });
            };
            columns.push(Column {
                name: field.name().to_owned(),
                header: field.name().to_owned(),
                kind: field.kind(),
                widget,
                sizing,
                read_only: !field.is_settable(),
            });
        }
        Ok(Self { columns })
    }

    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Checks that every column resolves to a field of `table`.
    pub fn validate<R>(&self, table: &FieldTable<R>) -> Result<(), GridError> {
        for column in &self.columns {
            if table.field(&column.name).is_none() {
                return Err(GridError::UnboundColumn {
                    column: column.name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    /// Overrides a column's header text. Returns `false` if there is no such column.
    pub fn set_header(&mut self, index: usize, header: impl Into<String>) -> bool {
        match self.columns.get_mut(index) {
            Some(column) => {
                column.header = header.into();
                true
            }
            None => false,
        }
    }
}
