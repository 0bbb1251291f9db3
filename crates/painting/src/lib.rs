//! Quill painting - freehand stroke capture and compositing
//!
//! This crate turns pointer input into persisted strokes:
//! - [`input`] - Normalizes mouse and touch events into touch records
//! - [`mapper`] - Page to oversampled surface coordinates
//! - [`tracker`] - Per-pointer in-progress paths and their compression
//! - [`stack`] - Ordered history of finished paths with change listeners
//! - [`palette`] - Pen trait and per-type dispatch
//! - [`surface`] - Layer abstraction, in-memory RGBA layer, data URI export
//! - [`board`] - The board tying it all together, plus a tokio driver
//! - [`validation`] - Consistency checks for host-supplied paths

pub mod board;
pub mod constants;
pub mod input;
pub mod mapper;
pub mod palette;
pub mod stack;
pub mod surface;
pub mod tracker;
pub mod types;
pub mod validation;

#[cfg(test)]
mod testing;

pub use board::*;
pub use constants::*;
pub use input::*;
pub use mapper::*;
pub use palette::*;
pub use stack::*;
pub use surface::*;
pub use tracker::*;
pub use types::*;
pub use validation::*;

pub use quill_config::{BoardConfig, ExportMode};
pub use quill_ipc::{EventKind, PenConfig, PointerId, RawEvent, TouchPoint};
