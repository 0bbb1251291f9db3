//! Input event normalization
//!
//! Turns raw mouse and touch events into [`TouchRecord`]s, one per pointer
//! observation, so the tracker never sees device differences.

use quill_ipc::{PenConfig, PointerId, RawEvent, TouchRecord};

/// Normalize `event` into touch records stamped with `pen`.
///
/// - Touch events yield one record per changed touch, keyed by the touch's
///   identifier. Force and tilt are carried only when the device reports
///   a force.
/// - Mouse events yield exactly one record under [`PointerId::Mouse`].
/// - Anything else yields nothing.
///
/// The event's default action is always suppressed.
pub fn route(event: &mut RawEvent, pen: &PenConfig) -> Vec<TouchRecord> {
    event.prevent_default();

    let Some(phase) = event.kind.phase() else {
        return Vec::new();
    };

    if event.kind.is_touch() {
        event
            .changed_touches
            .iter()
            .map(|touch| {
                let (force, tilt) = match touch.force {
                    Some(force) => (Some(force), touch.tilt),
                    None => (None, None),
                };
                TouchRecord::new(
                    phase,
                    PointerId::Touch(touch.identifier),
                    pen.clone(),
                    touch.page_x,
                    touch.page_y,
                )
                .with_pressure(force, tilt)
            })
            .collect()
    } else {
        vec![TouchRecord::new(
            phase,
            PointerId::Mouse,
            pen.clone(),
            event.page_x,
            event.page_y,
        )]
    }
}
