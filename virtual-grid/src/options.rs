use crate::DragMode;

/// Configuration for [`crate::VirtualGrid`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize` so a host can
/// persist user preferences such as the drag mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    /// Show the sentinel "new row" after the last record.
    pub allow_new_row: bool,

    pub drag_mode: DragMode,

    /// How long a multi-selection stays armed for dragging.
    pub multi_select_debounce_ms: u64,

    /// Leftward pointer travel, in pixels, that turns a press into a drag.
    pub drag_threshold: i32,
}

impl GridOptions {
    pub fn new() -> Self {
        Self {
            allow_new_row: true,
            drag_mode: DragMode::Remove,
            multi_select_debounce_ms: 2000,
            drag_threshold: 30,
        }
    }

    pub fn with_allow_new_row(mut self, allow_new_row: bool) -> Self {
        self.allow_new_row = allow_new_row;
        self
    }

    pub fn with_drag_mode(mut self, drag_mode: DragMode) -> Self {
        self.drag_mode = drag_mode;
        self
    }

    pub fn with_multi_select_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.multi_select_debounce_ms = debounce_ms;
        self
    }

    pub fn with_drag_threshold(mut self, drag_threshold: i32) -> Self {
        self.drag_threshold = drag_threshold;
        self
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        Self::new()
    }
}
