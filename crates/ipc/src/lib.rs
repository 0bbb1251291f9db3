//! Wire types shared between Quill and its host
//!
//! Defines the raw input events a host forwards to a drawing board, the
//! pen configuration the host selects, and the normalized touch records
//! the board consumes.

mod error;
mod input;
mod pen;
mod record;

pub use error::IpcError;
pub use input::{EventKind, RawEvent, TouchPoint};
pub use pen::PenConfig;
pub use record::{PointerId, RecordPhase, TouchRecord};
