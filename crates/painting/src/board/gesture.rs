//! Gesture handling for the drawing board

use std::time::Instant;

use quill_ipc::{PointerId, RawEvent, RecordPhase, TouchRecord};
use tracing::debug;

use crate::input::route;
use crate::palette::PaletteError;
use crate::surface::Surface;
use crate::types::{Path, Sample};

use super::{Board, BoardError};

impl<S: Surface> Board<S> {
    /// Feed a raw input event.
    ///
    /// Returns the paths this event completed; their compositing is
    /// deferred (see [`Board::run_due_commits`]). When a record fails, the
    /// remaining records of the event are still applied and the first
    /// error is returned.
    pub fn handle_event(&mut self, event: &mut RawEvent) -> Result<Vec<Path>, BoardError> {
        self.handle_event_at(event, Instant::now())
    }

    /// Feed a raw input event observed at `now`
    pub fn handle_event_at(
        &mut self,
        event: &mut RawEvent,
        now: Instant,
    ) -> Result<Vec<Path>, BoardError> {
        let mut completed = Vec::new();
        let mut first_error = None;
        // Every changed touch is handled even if an earlier one fails
        for record in route(event, &self.pen) {
            match self.handle_record_at(record, now) {
                Ok(Some(path)) => completed.push(path),
                Ok(None) => {}
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        first_error.map_or(Ok(completed), Err)
    }

    /// Feed one normalized record
    pub fn handle_record(&mut self, record: TouchRecord) -> Result<Option<Path>, BoardError> {
        self.handle_record_at(record, Instant::now())
    }

    /// Feed one normalized record observed at `now`.
    ///
    /// Moves and releases for pointers without an active path are ignored.
    /// A start over an active pointer discards the old path.
    pub fn handle_record_at(
        &mut self,
        record: TouchRecord,
        now: Instant,
    ) -> Result<Option<Path>, BoardError> {
        if self.torn_down {
            debug!("record for pointer {} after teardown, ignoring", record.pointer);
            return Ok(None);
        }

        let TouchRecord {
            phase,
            pointer,
            config,
            page_x,
            page_y,
            force,
            tilt,
        } = record;

        match phase {
            RecordPhase::Start => {
                // A path no pen can draw never enters the active set
                if !self.palette.contains(config.kind()) {
                    return Err(PaletteError::MissingPen {
                        kind: config.kind.clone(),
                    }
                    .into());
                }
                let (x, y) = self.mapper.map(&mut self.layers.active, page_x, page_y, true);
                debug!("start pointer {} at ({:.1}, {:.1})", pointer, x, y);
                self.active
                    .start(pointer, Sample::new(x, y, config).with_pressure(force, tilt));
                self.draw_active(false)?;
                Ok(None)
            }
            RecordPhase::Move => {
                if !self.active.contains(pointer) {
                    return Ok(None);
                }
                let (x, y) = self.mapper.map(&mut self.layers.active, page_x, page_y, false);
                self.active
                    .append(pointer, Sample::new(x, y, config).with_pressure(force, tilt));
                self.draw_active(false)?;
                Ok(None)
            }
            // Releases add no sample; a cancelled path ends at its last
            // recorded position
            RecordPhase::End | RecordPhase::Cancel => {
                let Some(path) = self.complete(pointer) else {
                    return Ok(None);
                };
                self.commits.schedule(path.clone(), now);
                Ok(Some(path))
            }
        }
    }

    /// Finish `pointer`'s path and append it to the paint stack.
    ///
    /// The path is not drawn onto the persisted layer here.
    pub fn complete(&mut self, pointer: PointerId) -> Option<Path> {
        let path = self.active.complete(pointer)?;
        debug!(
            "complete pointer {}: {} samples, {} stacked",
            pointer,
            path.len(),
            self.stack.len() + 1
        );
        self.stack.push(path.clone());
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::BoardError;
    use crate::palette::{PaletteError, PaletteSpec};
    use crate::testing::{board, mouse, touch, Op, RecordingPen};
    use quill_ipc::{EventKind, PenConfig, PointerId, RawEvent, TouchPoint};
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn test_mouse_stroke_without_pressure() {
        let mut board = board();
        let now = Instant::now();

        board.handle_event_at(&mut mouse(EventKind::MouseDown, 100.0, 100.0), now).unwrap();
        board.handle_event_at(&mut mouse(EventKind::MouseMove, 110.0, 100.0), now).unwrap();
        let completed = board
            .handle_event_at(&mut mouse(EventKind::MouseUp, 110.0, 100.0), now)
            .unwrap();

        assert_eq!(completed.len(), 1);
        let path = &board.paint_stack()[0];
        assert_eq!(path.data.xs, vec![300.0, 330.0]);
        assert_eq!(path.data.ys, vec![300.0, 300.0]);
        assert!(path.data.pressure.is_none());
        assert!(path.data.configs.is_none());
        assert!(board.active_paths().is_empty());
    }

    #[test]
    fn test_pressure_stroke_keeps_lengths_aligned() {
        let mut board = board();
        let now = Instant::now();

        board
            .handle_event_at(
                &mut touch(EventKind::TouchStart, vec![TouchPoint::new(1, 0.0, 0.0).with_force(0.6)]),
                now,
            )
            .unwrap();
        for i in 1..=4 {
            // Force drops out halfway through
            let mut point = TouchPoint::new(1, i as f32, 0.0);
            if i < 3 {
                point = point.with_force(0.5).with_tilt(0.1);
            }
            board
                .handle_event_at(&mut touch(EventKind::TouchMove, vec![point]), now)
                .unwrap();
        }
        board
            .handle_event_at(&mut touch(EventKind::TouchEnd, vec![TouchPoint::new(1, 4.0, 0.0)]), now)
            .unwrap();

        let path = &board.paint_stack()[0];
        let pressure = path.data.pressure.as_ref().unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(pressure.forces.len(), 5);
        assert_eq!(pressure.tilts.len(), 5);
        assert_eq!(pressure.forces[4], None);
    }

    #[test]
    fn test_concurrent_touches_stay_separate() {
        let mut board = board();
        let now = Instant::now();

        board
            .handle_event_at(
                &mut touch(
                    EventKind::TouchStart,
                    vec![TouchPoint::new(1, 10.0, 10.0), TouchPoint::new(2, 50.0, 50.0)],
                ),
                now,
            )
            .unwrap();
        board
            .handle_event_at(&mut touch(EventKind::TouchMove, vec![TouchPoint::new(2, 51.0, 50.0)]), now)
            .unwrap();
        board
            .handle_event_at(&mut touch(EventKind::TouchEnd, vec![TouchPoint::new(1, 10.0, 10.0)]), now)
            .unwrap();
        board
            .handle_event_at(&mut touch(EventKind::TouchEnd, vec![TouchPoint::new(2, 51.0, 50.0)]), now)
            .unwrap();

        let stack = board.paint_stack();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack[0].data.xs, vec![30.0]);
        assert_eq!(stack[1].data.xs, vec![150.0, 153.0]);
    }

    #[test]
    fn test_orphaned_move_changes_nothing() {
        let mut board = board();
        let before = board.active_layer().ops.len();

        board
            .handle_event_at(&mut mouse(EventKind::MouseMove, 5.0, 5.0), Instant::now())
            .unwrap();
        let completed = board
            .handle_event_at(&mut mouse(EventKind::MouseUp, 5.0, 5.0), Instant::now())
            .unwrap();

        assert!(completed.is_empty());
        assert!(board.active_paths().is_empty());
        assert!(board.paint_stack().is_empty());
        assert_eq!(board.pending_commits(), 0);
        assert_eq!(board.active_layer().ops.len(), before);
    }

    #[test]
    fn test_duplicate_start_discards_partial_path() {
        let mut board = board();
        let now = Instant::now();

        board.handle_event_at(&mut mouse(EventKind::MouseDown, 0.0, 0.0), now).unwrap();
        board.handle_event_at(&mut mouse(EventKind::MouseMove, 1.0, 0.0), now).unwrap();
        board.handle_event_at(&mut mouse(EventKind::MouseDown, 50.0, 0.0), now).unwrap();
        board.handle_event_at(&mut mouse(EventKind::MouseUp, 50.0, 0.0), now).unwrap();

        assert_eq!(board.paint_stack().len(), 1);
        assert_eq!(board.paint_stack()[0].data.xs, vec![150.0]);
    }

    #[test]
    fn test_cancel_completes_path() {
        let mut board = board();
        let now = Instant::now();

        board
            .handle_event_at(&mut touch(EventKind::TouchStart, vec![TouchPoint::new(9, 1.0, 1.0)]), now)
            .unwrap();
        board
            .handle_event_at(&mut touch(EventKind::TouchMove, vec![TouchPoint::new(9, 2.0, 1.0)]), now)
            .unwrap();
        let completed = board
            .handle_event_at(&mut touch(EventKind::TouchCancel, vec![TouchPoint::new(9, 0.0, 0.0)]), now)
            .unwrap();

        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].last_point(), Some((6.0, 3.0)));
        assert!(!board.active_paths().contains(PointerId::Touch(9)));
    }

    #[test]
    fn test_pen_change_mid_stroke_keeps_configs() {
        let mut board = board();
        let now = Instant::now();

        board.handle_event_at(&mut mouse(EventKind::MouseDown, 0.0, 0.0), now).unwrap();
        board.set_pen(board.pen().clone().with_param("color", "red"));
        board.handle_event_at(&mut mouse(EventKind::MouseMove, 1.0, 0.0), now).unwrap();
        board.handle_event_at(&mut mouse(EventKind::MouseUp, 1.0, 0.0), now).unwrap();

        let path = &board.paint_stack()[0];
        let configs = path.data.configs.as_ref().unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[1].param("color"), Some(&serde_json::json!("red")));
        assert_eq!(path.config.kind, "ink");
    }

    #[test]
    fn test_active_paths_drawn_with_active_hint() {
        let mut board = board();
        let now = Instant::now();

        board.handle_event_at(&mut mouse(EventKind::MouseDown, 0.0, 0.0), now).unwrap();
        board.handle_event_at(&mut mouse(EventKind::MouseMove, 1.0, 0.0), now).unwrap();

        assert_eq!(
            board.active_layer().ops,
            vec![Op::draw("ink", &[0.0], true), Op::draw("ink", &[0.0, 3.0], true)]
        );
    }

    #[test]
    fn test_pointer_down_refreshes_origin() {
        let mut board = board();
        let now = Instant::now();

        board.handle_event_at(&mut mouse(EventKind::MouseDown, 0.0, 0.0), now).unwrap();
        board.handle_event_at(&mut mouse(EventKind::MouseMove, 1.0, 0.0), now).unwrap();
        board.handle_event_at(&mut mouse(EventKind::MouseUp, 1.0, 0.0), now).unwrap();
        board.handle_event_at(&mut mouse(EventKind::MouseDown, 0.0, 0.0), now).unwrap();

        assert_eq!(board.active_layer().refreshes, 2);
    }

    #[test]
    fn test_other_events_ignored() {
        let mut board = board();
        let mut event = RawEvent::mouse(EventKind::Other, 0.0, 0.0);
        assert!(board.handle_event(&mut event).unwrap().is_empty());
        assert!(event.default_prevented());
    }

    #[test]
    fn test_start_with_unknown_pen_is_rejected() {
        let mut board = board();
        let now = Instant::now();

        board.set_pen(PenConfig::new("chalk"));
        let result = board.handle_event_at(&mut mouse(EventKind::MouseDown, 0.0, 0.0), now);
        assert!(matches!(
            result,
            Err(BoardError::Palette(PaletteError::MissingPen { kind })) if kind == "chalk"
        ));
        assert!(board.active_paths().is_empty());
        assert!(board.handle_event_at(&mut mouse(EventKind::MouseUp, 0.0, 0.0), now).unwrap().is_empty());

        board.set_pen(PenConfig::new("ink"));
        board.handle_event_at(&mut mouse(EventKind::MouseDown, 1.0, 0.0), now).unwrap();
        board.handle_event_at(&mut mouse(EventKind::MouseUp, 1.0, 0.0), now).unwrap();
        assert_eq!(board.paint_stack().len(), 1);
        assert_eq!(board.paint_stack()[0].kind(), "ink");
    }

    #[test]
    fn test_failing_record_does_not_skip_other_touches() {
        let mut board = board();
        let now = Instant::now();
        board
            .handle_event_at(
                &mut touch(
                    EventKind::TouchStart,
                    vec![TouchPoint::new(1, 0.0, 0.0), TouchPoint::new(2, 10.0, 0.0)],
                ),
                now,
            )
            .unwrap();

        // Palette without "ink": drawing the active paths now fails
        board
            .set_palette(Arc::new(PaletteSpec::new().with_pen::<RecordingPen>("marker")))
            .unwrap();
        let result = board.handle_event_at(
            &mut touch(
                EventKind::TouchMove,
                vec![TouchPoint::new(1, 1.0, 0.0), TouchPoint::new(2, 11.0, 0.0)],
            ),
            now,
        );
        assert!(result.is_err());
        assert_eq!(board.active_paths().get(PointerId::Touch(1)).unwrap().len(), 2);
        assert_eq!(board.active_paths().get(PointerId::Touch(2)).unwrap().len(), 2);

        let completed = board
            .handle_event_at(
                &mut touch(
                    EventKind::TouchEnd,
                    vec![TouchPoint::new(1, 1.0, 0.0), TouchPoint::new(2, 11.0, 0.0)],
                ),
                now,
            )
            .unwrap();
        assert_eq!(completed.len(), 2);
        assert!(board.active_paths().is_empty());
    }
}
