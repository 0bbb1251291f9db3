//! Normalized touch records consumed by the stroke tracker.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pen::PenConfig;

/// Identifier of the pointer that owns a stroke.
///
/// Mouse input uses a fixed synthetic id so it never collides with touch
/// contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerId {
    Mouse,
    Touch(i64),
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerId::Mouse => f.write_str("mouse"),
            PointerId::Touch(id) => write!(f, "{id}"),
        }
    }
}

/// Gesture phase of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One pointer observation, independent of the device that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchRecord {
    pub phase: RecordPhase,
    pub pointer: PointerId,
    pub config: PenConfig,
    pub page_x: f32,
    pub page_y: f32,
    pub force: Option<f32>,
    pub tilt: Option<f32>,
}

impl TouchRecord {
    pub fn new(
        phase: RecordPhase,
        pointer: PointerId,
        config: PenConfig,
        page_x: f32,
        page_y: f32,
    ) -> Self {
        Self {
            phase,
            pointer,
            config,
            page_x,
            page_y,
            force: None,
            tilt: None,
        }
    }

    pub fn with_pressure(mut self, force: Option<f32>, tilt: Option<f32>) -> Self {
        self.force = force;
        self.tilt = tilt;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_display() {
        assert_eq!(PointerId::Mouse.to_string(), "mouse");
        assert_eq!(PointerId::Touch(7).to_string(), "7");
    }

    #[test]
    fn test_mouse_never_equals_touch() {
        assert_ne!(PointerId::Mouse, PointerId::Touch(0));
    }
}
