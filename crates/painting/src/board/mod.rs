//! Drawing board
//!
//! This module connects the capture pipeline:
//! - Input events (normalized by [`crate::input::route`])
//! - Coordinate mapping onto the oversampled layers
//! - Per-pointer active paths (drawn on the active layer)
//! - The paint stack (drawn on the persisted layer)
//! - Pen dispatch through the palette
//!
//! All mutation goes through `&mut Board`; see [`BoardDriver`] for a
//! thread-safe wrapper that also runs the deferred commits on tokio.

mod commit;
mod driver;
mod gesture;

use std::sync::Arc;

use quill_config::{BoardConfig, ConfigError};
use quill_ipc::PenConfig;
use tracing::info;

use crate::mapper::CoordinateMapper;
use crate::palette::{Palette, PaletteError, PaletteSpec};
use crate::stack::PaintStack;
use crate::surface::{DataUriOptions, ImageData, RasterLayer, Surface, SurfaceError};
use crate::tracker::ActivePaths;
use crate::types::{DrawOptions, Path};
use crate::validation::{validate_paths, ValidationError};

pub use commit::CommitQueue;
pub use driver::BoardDriver;

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Failed to parse paths: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid path at index {index}: {source}")]
    InvalidPath {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

/// The layers a board draws onto
pub struct Layers<S> {
    /// Strokes in progress
    pub active: S,
    /// The paint stack
    pub persisted: S,
    /// Optional image beneath both
    pub background: Option<S>,
}

impl<S> Layers<S> {
    pub fn new(active: S, persisted: S) -> Self {
        Self {
            active,
            persisted,
            background: None,
        }
    }

    pub fn with_background(mut self, background: S) -> Self {
        self.background = Some(background);
        self
    }
}

impl Layers<RasterLayer> {
    /// In-memory layers sized for `config`
    pub fn raster(config: &BoardConfig) -> Self {
        Self::new(RasterLayer::for_board(config), RasterLayer::for_board(config))
    }
}

/// Freehand drawing board
pub struct Board<S: Surface> {
    config: BoardConfig,
    mapper: CoordinateMapper,
    layers: Layers<S>,
    palette: Palette<S::Context>,
    /// Pen stamped onto new samples
    pen: PenConfig,
    active: ActivePaths,
    stack: PaintStack,
    commits: CommitQueue,
    torn_down: bool,
}

impl<S: Surface> Board<S> {
    /// Create a board with an empty paint stack.
    ///
    /// Fails if the configuration is invalid or a pen factory fails.
    pub fn new(
        config: BoardConfig,
        mut layers: Layers<S>,
        palette: Arc<PaletteSpec<S::Context>>,
        pen: PenConfig,
    ) -> Result<Self, BoardError> {
        config.validate()?;

        // Active strokes are always sampled sharp
        layers.active.set_interpolation(false);
        layers.persisted.set_interpolation(config.interpolation);
        if let Some(background) = layers.background.as_mut() {
            background.set_interpolation(config.interpolation);
        }

        let mut board = Self {
            mapper: CoordinateMapper::new(&config),
            config,
            layers,
            palette: Palette::instantiate(palette)?,
            pen,
            active: ActivePaths::new(),
            stack: PaintStack::new(),
            commits: CommitQueue::new(),
            torn_down: false,
        };
        board.full_redraw()?;
        Ok(board)
    }

    /// Seed the paint stack with previously captured paths
    pub fn with_data(mut self, data: Vec<Path>) -> Result<Self, BoardError> {
        self.replace_stack(data)?;
        Ok(self)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn pen(&self) -> &PenConfig {
        &self.pen
    }

    /// Select the pen used for subsequent samples
    pub fn set_pen(&mut self, pen: PenConfig) {
        self.pen = pen;
    }

    /// Swap the palette specification.
    ///
    /// The palette is rebuilt from scratch whenever `spec` is a different
    /// `Arc` than the current one, and left alone otherwise. Returns whether
    /// a rebuild happened.
    pub fn set_palette(&mut self, spec: Arc<PaletteSpec<S::Context>>) -> Result<bool, PaletteError> {
        if !self.palette.is_stale(&spec) {
            return Ok(false);
        }
        self.palette = Palette::instantiate(spec)?;
        Ok(true)
    }

    pub fn palette(&self) -> &Palette<S::Context> {
        &self.palette
    }

    /// Every committed path, oldest first
    pub fn paint_stack(&self) -> &[Path] {
        self.stack.paths()
    }

    pub fn active_paths(&self) -> &ActivePaths {
        &self.active
    }

    /// Register a listener called after every committed stroke with the
    /// whole stack and the new path
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: Fn(&[Path], &Path) + Send + Sync + 'static,
    {
        self.stack.add_listener(listener);
    }

    pub fn active_layer(&self) -> &S {
        &self.layers.active
    }

    pub fn active_layer_mut(&mut self) -> &mut S {
        &mut self.layers.active
    }

    pub fn persisted_layer(&self) -> &S {
        &self.layers.persisted
    }

    pub fn background_layer_mut(&mut self) -> Option<&mut S> {
        self.layers.background.as_mut()
    }

    /// Encode the persisted layer as a `data:` URI
    pub fn to_data_uri(&self, kind: &str, options: &DataUriOptions) -> Result<String, SurfaceError> {
        self.layers.persisted.to_data_uri(kind, options)
    }

    /// RGBA pixels of the persisted layer
    pub fn image(&self) -> ImageData {
        self.layers.persisted.image_data()
    }

    /// Replace the paint stack wholesale and redraw it
    pub fn replace_stack(&mut self, data: Vec<Path>) -> Result<(), PaletteError> {
        let previous = self.stack.replace(data);
        info!(
            "Replaced paint stack ({} -> {} paths)",
            previous.len(),
            self.stack.len()
        );
        self.full_redraw()
    }

    /// Replace the paint stack with paths decoded from JSON.
    ///
    /// The current stack is left untouched if decoding or validation fails.
    pub fn import_json(&mut self, json: &str) -> Result<(), BoardError> {
        let paths: Vec<Path> = serde_json::from_str(json)?;
        validate_paths(&paths).map_err(|(index, source)| BoardError::InvalidPath { index, source })?;
        self.replace_stack(paths)?;
        Ok(())
    }

    /// Serialize the paint stack as JSON
    pub fn export_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string(self.stack.paths())?)
    }

    /// Clear the persisted layer and draw the whole stack in order.
    ///
    /// Paths whose pen is missing are skipped; the first such error is
    /// returned after the rest of the stack is drawn.
    pub fn full_redraw(&mut self) -> Result<(), PaletteError> {
        self.layers.persisted.clear();
        let context = self.layers.persisted.context();
        let mut first_error = None;
        for path in &self.stack {
            if let Err(e) = self.palette.draw(context, path, &DrawOptions::PERSISTED) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Draw one new path onto the persisted layer and notify listeners
    pub fn patch(&mut self, path: &Path) -> Result<(), PaletteError> {
        self.palette.draw(
            self.layers.persisted.context(),
            path,
            &DrawOptions::PERSISTED,
        )?;
        self.stack.notify(path);
        Ok(())
    }

    /// Draw every in-progress path onto the active layer.
    ///
    /// Like [`Board::full_redraw`], one failing path does not hide the others.
    pub fn draw_active(&mut self, clear_first: bool) -> Result<(), PaletteError> {
        if clear_first {
            self.layers.active.clear();
        }
        let context = self.layers.active.context();
        let mut first_error = None;
        for active in self.active.iter() {
            if let Err(e) = self.palette.draw(context, active.path(), &DrawOptions::ACTIVE) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
