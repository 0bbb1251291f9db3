//! Test doubles shared by the unit tests

use std::sync::Arc;

use quill_config::BoardConfig;
use quill_ipc::{EventKind, PenConfig, RawEvent, TouchPoint};

use crate::board::{Board, Layers};
use crate::palette::{Pen, PaletteSpec};
use crate::surface::{DataUriOptions, ImageData, PageOffset, Surface, SurfaceError};
use crate::types::{DrawOptions, Path, PathData};

/// Something that happened to a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear,
    Draw {
        kind: String,
        xs: Vec<f32>,
        active: bool,
    },
}

impl Op {
    pub fn draw(kind: &str, xs: &[f32], active: bool) -> Self {
        Op::Draw {
            kind: kind.to_string(),
            xs: xs.to_vec(),
            active,
        }
    }
}

/// Surface that logs operations instead of rasterizing
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
    pub interpolation: bool,
    /// Number of times the cached page offset was dropped
    pub refreshes: usize,
    pub placement: PageOffset,
    pub width: u32,
    pub height: u32,
    cached: Option<PageOffset>,
}

impl RecordingSurface {
    pub fn sized(width: u32, height: u32, placement: PageOffset) -> Self {
        Self {
            width,
            height,
            placement,
            ..Default::default()
        }
    }
}

impl Surface for RecordingSurface {
    type Context = Vec<Op>;

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn context(&mut self) -> &mut Vec<Op> {
        &mut self.ops
    }

    fn page_offset(&mut self) -> PageOffset {
        *self.cached.get_or_insert(self.placement)
    }

    fn clear_page_offset(&mut self) {
        self.refreshes += 1;
        self.cached = None;
    }

    fn set_interpolation(&mut self, enabled: bool) {
        self.interpolation = enabled;
    }

    fn to_data_uri(&self, kind: &str, _options: &DataUriOptions) -> Result<String, SurfaceError> {
        Ok(format!("data:{};ops={}", kind, self.ops.len()))
    }

    fn image_data(&self) -> ImageData {
        ImageData {
            width: self.width,
            height: self.height,
            data: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct RecordingPen;

impl Pen<Vec<Op>> for RecordingPen {
    fn draw(&self, context: &mut Vec<Op>, path: &Path, options: &DrawOptions) {
        context.push(Op::draw(path.kind(), &path.data.xs, options.active));
    }
}

pub fn recording_spec() -> Arc<PaletteSpec<Vec<Op>>> {
    Arc::new(PaletteSpec::new().with_pen::<RecordingPen>("ink"))
}

/// 200x200 board at ratio 3, placed at the page origin, drawing with "ink"
pub fn board() -> Board<RecordingSurface> {
    let config = BoardConfig::new(200, 200).with_render_ratio(3);
    let placement = PageOffset::new(0.0, 0.0, 200.0, 200.0);
    let layers = Layers::new(
        RecordingSurface::sized(600, 600, placement),
        RecordingSurface::sized(600, 600, placement),
    );
    Board::new(config, layers, recording_spec(), PenConfig::new("ink"))
        .expect("test board should build")
}

/// Single-sample path at (x, 0)
pub fn dot(kind: &str, x: f32) -> Path {
    Path {
        config: PenConfig::new(kind),
        data: PathData {
            xs: vec![x],
            ys: vec![0.0],
            ..Default::default()
        },
    }
}

pub fn mouse(kind: EventKind, page_x: f32, page_y: f32) -> RawEvent {
    RawEvent::mouse(kind, page_x, page_y)
}

pub fn touch(kind: EventKind, points: Vec<TouchPoint>) -> RawEvent {
    RawEvent::touch(kind, points)
}
