//! Drawing surface abstraction
//!
//! A board draws onto two or three stacked layers: the active layer holds
//! strokes still in progress, the persisted layer holds the paint stack, and
//! an optional background layer sits beneath both. Each layer implements
//! [`Surface`]; [`RasterLayer`] is the in-memory implementation.

mod export;
mod raster;

pub use export::{encode_data_uri, DataUriOptions};
pub use raster::{Raster, RasterLayer};

use serde::{Deserialize, Serialize};

/// Errors raised by surface exports
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Unsupported image type: {0:?}")]
    UnsupportedFormat(String),

    #[error("Pixel buffer of {len} bytes does not match {width}x{height}")]
    InvalidBuffer { width: u32, height: u32, len: usize },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Placement of a layer on the page, in page pixels.
///
/// `width`/`height` are the rendered size, which may differ from the
/// board's logical size when the layer is scaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PageOffset {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PageOffset {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// 8-bit RGBA pixels in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// A drawing layer
pub trait Surface {
    /// Handle pens draw with
    type Context: 'static;

    /// Erase the whole layer
    fn clear(&mut self);

    fn context(&mut self) -> &mut Self::Context;

    /// Page placement, computed once and cached until
    /// [`Surface::clear_page_offset`]
    fn page_offset(&mut self) -> PageOffset;

    /// Forget the cached placement so the next read recomputes it
    fn clear_page_offset(&mut self);

    /// Whether scaled sampling of this layer is smoothed
    fn set_interpolation(&mut self, enabled: bool);

    /// Encode the layer as a `data:` URI of the given MIME type
    fn to_data_uri(&self, kind: &str, options: &DataUriOptions) -> Result<String, SurfaceError>;

    fn image_data(&self) -> ImageData;
}
