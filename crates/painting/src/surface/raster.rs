//! In-memory RGBA layer

use quill_config::BoardConfig;

use super::export::{encode_data_uri, DataUriOptions};
use super::{ImageData, PageOffset, Surface, SurfaceError};

/// Pixel buffer handed to pens as their drawing context.
///
/// Channels are `f32` in 0..1 with straight alpha, stored row by row.
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[f32; 4]>,
}

impl Raster {
    /// Fully transparent raster
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width as usize * height as usize],
        }
    }

    pub fn fill(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// `None` outside the raster
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite one pixel; writes outside the raster are dropped
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [f32; 4]) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Source-over composite of `color` scaled by `opacity`
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [f32; 4], opacity: f32) {
        let Some(i) = self.offset(x, y) else {
            return;
        };
        let alpha = color[3] * opacity;
        let dst = self.pixels[i];
        let mut out = [0.0; 4];
        for c in 0..3 {
            out[c] = color[c] * alpha + dst[c] * (1.0 - alpha);
        }
        out[3] = alpha + dst[3] * (1.0 - alpha);
        self.pixels[i] = out;
    }

    /// Scale a pixel towards transparent by `amount` (0..1)
    pub fn erase_pixel(&mut self, x: u32, y: u32, amount: f32) {
        if let Some(i) = self.offset(x, y) {
            let keep = (1.0 - amount).max(0.0);
            self.pixels[i] = self.pixels[i].map(|c| c * keep);
        }
    }

    /// Quantize to 8-bit RGBA
    pub fn to_rgba8(&self) -> Vec<u8> {
        let channels: &[f32] = bytemuck::cast_slice(&self.pixels);
        channels
            .iter()
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }
}

/// A [`Surface`] backed by a [`Raster`].
///
/// The host tells the layer where it sits on the page with
/// [`RasterLayer::set_placement`]; the layer only picks that up after its
/// cached offset is cleared, the way a browser canvas caches its bounding
/// box between gestures.
pub struct RasterLayer {
    raster: Raster,
    placement: PageOffset,
    cached_offset: Option<PageOffset>,
    interpolation: bool,
}

impl RasterLayer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            raster: Raster::new(width, height),
            placement: PageOffset::new(0.0, 0.0, width as f32, height as f32),
            cached_offset: None,
            interpolation: false,
        }
    }

    /// A layer at the board's oversampled resolution, placed at the page
    /// origin with its logical size
    pub fn for_board(config: &BoardConfig) -> Self {
        let mut layer = Self::new(config.layer_width(), config.layer_height());
        layer.placement = PageOffset::new(0.0, 0.0, config.width_f32(), config.height_f32());
        layer
    }

    pub fn set_placement(&mut self, placement: PageOffset) {
        self.placement = placement;
    }

    pub fn placement(&self) -> PageOffset {
        self.placement
    }

    pub fn interpolation(&self) -> bool {
        self.interpolation
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }
}

impl Surface for RasterLayer {
    type Context = Raster;

    fn clear(&mut self) {
        self.raster.fill([0.0, 0.0, 0.0, 0.0]);
    }

    fn context(&mut self) -> &mut Raster {
        &mut self.raster
    }

    fn page_offset(&mut self) -> PageOffset {
        *self.cached_offset.get_or_insert(self.placement)
    }

    fn clear_page_offset(&mut self) {
        self.cached_offset = None;
    }

    fn set_interpolation(&mut self, enabled: bool) {
        self.interpolation = enabled;
    }

    fn to_data_uri(&self, kind: &str, options: &DataUriOptions) -> Result<String, SurfaceError> {
        encode_data_uri(&self.image_data(), kind, options)
    }

    fn image_data(&self) -> ImageData {
        ImageData {
            width: self.raster.width,
            height: self.raster.height,
            data: self.raster.to_rgba8(),
        }
    }
}
