//! Page to surface coordinate mapping

use quill_config::BoardConfig;

use crate::surface::{PageOffset, Surface};

/// Converts page coordinates into oversampled surface coordinates.
///
/// The mapping subtracts the layer's page offset, re-centers when the
/// rendered size differs from the logical size, then scales by the render
/// ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    width: f32,
    height: f32,
    ratio: f32,
}

impl CoordinateMapper {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            width: config.width_f32(),
            height: config.height_f32(),
            ratio: config.ratio_f32(),
        }
    }

    /// Map against a fixed offset snapshot
    pub fn project(&self, offset: &PageOffset, page_x: f32, page_y: f32) -> (f32, f32) {
        let x = (page_x - offset.left - (offset.width - self.width) / 2.0) * self.ratio;
        let y = (page_y - offset.top - (offset.height - self.height) / 2.0) * self.ratio;
        (x, y)
    }

    /// Map against `surface`'s page offset.
    ///
    /// `refresh_origin` drops the surface's cached offset first; boards set
    /// it on pointer-down so layout shifts between gestures are picked up.
    pub fn map<S: Surface>(
        &self,
        surface: &mut S,
        page_x: f32,
        page_y: f32,
        refresh_origin: bool,
    ) -> (f32, f32) {
        if refresh_origin {
            surface.clear_page_offset();
        }
        let offset = surface.page_offset();
        self.project(&offset, page_x, page_y)
    }
}
