//! `data:` URI encoding of layer pixels

use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use super::{ImageData, SurfaceError};

/// JPEG quality used when none is requested (matches browser canvases)
pub const DEFAULT_JPEG_QUALITY: f32 = 0.92;

/// Encoder options for [`encode_data_uri`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DataUriOptions {
    /// Lossy quality 0..1, ignored by lossless formats
    pub quality: Option<f32>,
}

impl DataUriOptions {
    pub fn with_quality(quality: f32) -> Self {
        Self {
            quality: Some(quality),
        }
    }
}

/// Encode RGBA pixels as a base64 `data:` URI.
///
/// `kind` is a MIME type; an empty string selects PNG.
pub fn encode_data_uri(
    image: &ImageData,
    kind: &str,
    options: &DataUriOptions,
) -> Result<String, SurfaceError> {
    let ImageData {
        width,
        height,
        ref data,
    } = *image;
    let rgba = RgbaImage::from_raw(width, height, data.clone()).ok_or(
        SurfaceError::InvalidBuffer {
            width,
            height,
            len: data.len(),
        },
    )?;

    let mut bytes = Vec::new();
    let mime = match kind {
        "" | "image/png" => {
            PngEncoder::new(&mut bytes).write_image(
                rgba.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
            "image/png"
        }
        "image/jpeg" => {
            let quality = options.quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(0.0, 1.0);
            let quality = ((quality * 100.0).round() as u8).max(1);
            let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, quality).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
            "image/jpeg"
        }
        other => return Err(SurfaceError::UnsupportedFormat(other.to_string())),
    };

    Ok(format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(&bytes)
    ))
}
