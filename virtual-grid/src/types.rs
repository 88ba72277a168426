/// A pointer position in grid client coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The display rectangle of a row, in grid client coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RowRect {
    pub fn midline(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// The result of hit-testing a pointer against the data rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsertionPoint {
    /// Row under the pointer.
    pub row: usize,
    /// `true` when the pointer is in the upper half of the row.
    pub above: bool,
    /// Store index the dragged items would be inserted at.
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Top,
    Bottom,
}

/// Where the host should draw the insertion line while a drag is in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropIndicator {
    pub row: usize,
    pub edge: Edge,
}

/// Visual treatment of a data row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowStyle {
    Normal,
    /// The row's record is part of a Dim-mode drag.
    Dimmed,
}

/// Keys reported by the active cell editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorKey {
    Enter,
    Escape,
    Tab,
    Other,
}

/// Relation between the displayed row count and what the store can satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountDrift {
    InSync,
    /// The host displays fewer rows than expected.
    Behind(usize),
    /// The host displays rows the store cannot back. Cell queries may land out of range.
    Ahead(usize),
}

impl CountDrift {
    pub fn is_in_sync(&self) -> bool {
        matches!(self, Self::InSync)
    }
}
