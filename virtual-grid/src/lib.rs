//! A headless virtual-mode data grid.
//!
//! For a simulated host and a gesture controller, see the `virtual-grid-adapter` crate.
//!
//! The grid never stores cell values. It answers the host's cell queries from a
//! [`BackingStore`] of typed records, keeps the host's row count in step with the store, and
//! runs the interactions on top of it: a provisional "new row", drag-to-reorder of the
//! selected rows, and a debounce window that keeps a multi-selection alive long enough to be
//! dragged.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to implement [`GridHost`] and to provide:
//! - row geometry (`row_at` / `row_rect`)
//! - the selection and the editing control
//! - input events and a monotonic `now_ms` for the timers
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod bridge;
mod column;
mod drag;
mod error;
mod grid;
mod hit;
mod host;
mod options;
mod provisional;
mod queue;
mod record;
mod selection;
mod store;
mod sync;
mod types;


pub use bridge::{CellBridge, WriteTarget};
pub use column::{CellWidget, Column, ColumnSet, ColumnSizing, WidgetMap};
pub use drag::{DragEngine, DragEntry, DragMode, DragOutcome, DragSession};
pub use error::{GridError, LookupFailure, StoreError};
pub use grid::VirtualGrid;
pub use hit::hit_test;
pub use host::GridHost;
pub use options::GridOptions;
pub use provisional::{ProvisionalRow, ProvisionalState, RowCancel, RowValidation};
pub use queue::{Deferred, TaskQueue};
pub use record::{
    Field, FieldError, FieldKind, FieldTable, FieldValue, Getter, Record, RecordId, Setter,
};
pub use selection::{DebounceTimer, PointerIntent, SelectionCoordinator};
pub use store::{BackingStore, StoreEvent, StoreListener, SubscriptionId};
pub use sync::{RowCountSync, Suspension};
pub use types::{
    CountDrift, DropIndicator, Edge, EditorKey, InsertionPoint, Point, RowRect, RowStyle,
};
