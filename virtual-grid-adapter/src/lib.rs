//! Adapter utilities for the `virtual-grid` crate.
//!
//! The `virtual-grid` crate is UI-agnostic and only talks to a presentation layer through
//! its `GridHost` trait. This crate provides small, framework-neutral pieces commonly needed
//! to drive it:
//!
//! - Fixed-height row geometry (`RowLayout`)
//! - A headless host that keeps widget-side state (`SimHost`)
//! - A gesture controller that replays clicks, swipes, drags and edits (`Controller`)
//!
//! This crate is framework-agnostic (no ratatui/egui bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod host;
mod layout;

#[cfg(test)]
mod tests;

pub use controller::{Controller, PaintedRow};
pub use host::SimHost;
pub use layout::RowLayout;
