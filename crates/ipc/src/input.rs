//! Raw input event types forwarded by the host.

use serde::{Deserialize, Serialize};

use crate::error::IpcError;
use crate::record::RecordPhase;

/// Input event type, named after the DOM event it mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    /// Any event type the board does not draw with
    #[serde(other)]
    Other,
}

impl EventKind {
    pub fn is_mouse(&self) -> bool {
        matches!(
            self,
            EventKind::MouseDown | EventKind::MouseMove | EventKind::MouseUp
        )
    }

    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            EventKind::TouchStart
                | EventKind::TouchMove
                | EventKind::TouchEnd
                | EventKind::TouchCancel
        )
    }

    /// Gesture phase this event drives, if any
    pub fn phase(&self) -> Option<RecordPhase> {
        match self {
            EventKind::MouseDown | EventKind::TouchStart => Some(RecordPhase::Start),
            EventKind::MouseMove | EventKind::TouchMove => Some(RecordPhase::Move),
            EventKind::MouseUp | EventKind::TouchEnd => Some(RecordPhase::End),
            EventKind::TouchCancel => Some(RecordPhase::Cancel),
            EventKind::Other => None,
        }
    }
}

/// One changed contact point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    pub identifier: i64,
    pub page_x: f32,
    pub page_y: f32,
    /// Contact pressure 0..1, `None` when the device does not report it
    #[serde(default)]
    pub force: Option<f32>,
    #[serde(default)]
    pub tilt: Option<f32>,
}

impl TouchPoint {
    pub fn new(identifier: i64, page_x: f32, page_y: f32) -> Self {
        Self {
            identifier,
            page_x,
            page_y,
            force: None,
            tilt: None,
        }
    }

    pub fn with_force(mut self, force: f32) -> Self {
        self.force = Some(force);
        self
    }

    pub fn with_tilt(mut self, tilt: f32) -> Self {
        self.tilt = Some(tilt);
        self
    }
}

/// A raw mouse or touch event as delivered by the host.
///
/// Mouse events carry their position in `page_x`/`page_y`; touch events
/// carry one entry per changed contact in `changed_touches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub page_x: f32,
    #[serde(default)]
    pub page_y: f32,
    #[serde(default)]
    pub changed_touches: Vec<TouchPoint>,
    #[serde(skip)]
    default_prevented: bool,
}

impl RawEvent {
    pub fn mouse(kind: EventKind, page_x: f32, page_y: f32) -> Self {
        Self {
            kind,
            page_x,
            page_y,
            changed_touches: Vec::new(),
            default_prevented: false,
        }
    }

    pub fn touch(kind: EventKind, changed_touches: Vec<TouchPoint>) -> Self {
        Self {
            kind,
            page_x: 0.0,
            page_y: 0.0,
            changed_touches,
            default_prevented: false,
        }
    }

    /// Decode an event forwarded as JSON by a webview host
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Suppress the host's default action (scrolling, text selection)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
