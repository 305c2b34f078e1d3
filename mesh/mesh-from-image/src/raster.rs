//! Raster decoding and sampling.
//!
//! Decodes PNG/JPEG bytes, shrinks the image so its longest side fits the
//! configured cap, and reduces every pixel to one scalar on a 0-255 scale.

// Image sides are u32 and grids are at most a few thousand cells across
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use image::ImageFormat;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::error::{GenerateError, GenerateResult};
use crate::grid::{Grid, SampleGrid};
use crate::params::SampleParams;

/// Sample value of a background (paper) pixel.
pub const BACKGROUND: f64 = 255.0;

/// How a pixel becomes a scalar sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleMode {
    /// Luminosity of the color channels; alpha is ignored.
    Luminance,
    /// Luminosity, except pixels with `alpha <= alpha_cutoff` read as
    /// [`BACKGROUND`].
    Silhouette {
        /// Largest alpha still treated as transparent.
        alpha_cutoff: u8,
    },
}

impl SampleMode {
    /// Reduce one RGBA pixel to a sample.
    #[inline]
    #[must_use]
    pub fn sample(self, [r, g, b, a]: [u8; 4]) -> f64 {
        match self {
            Self::Silhouette { alpha_cutoff } if a <= alpha_cutoff => BACKGROUND,
            Self::Luminance | Self::Silhouette { .. } => luminance(r, g, b),
        }
    }
}

/// Perceived brightness: `0.299 R + 0.587 G + 0.114 B`.
///
/// # Example
///
/// ```
/// use mesh_from_image::raster::luminance;
///
/// assert!((luminance(255, 255, 255) - 255.0).abs() < 1e-9);
/// assert!(luminance(0, 0, 0).abs() < 1e-9);
/// ```
#[inline]
#[must_use]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.114f64.mul_add(
        f64::from(b),
        0.299f64.mul_add(f64::from(r), 0.587 * f64::from(g)),
    )
}

/// Dimensions after shrinking `width × height` so the longest side is at
/// most `cap`, keeping the aspect ratio.
///
/// Sides are rounded to the nearest integer and never drop below 1.
/// Images that already fit are left alone (no upscaling).
///
/// # Example
///
/// ```
/// use mesh_from_image::raster::target_dimensions;
///
/// assert_eq!(target_dimensions(1024, 768, 512), (512, 384));
/// assert_eq!(target_dimensions(300, 200, 512), (300, 200));
/// assert_eq!(target_dimensions(5000, 3, 512), (512, 1));
/// ```
#[must_use]
pub fn target_dimensions(width: u32, height: u32, cap: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= cap || longest == 0 {
        return (width, height);
    }
    let factor = f64::from(cap) / f64::from(longest);
    let fit = |side: u32| ((f64::from(side) * factor).round() as u32).clamp(1, cap.max(1));
    (fit(width), fit(height))
}

/// Decode image bytes into a grid of scalar samples.
///
/// # Arguments
///
/// * `bytes` - Raw PNG or JPEG file contents
/// * `params` - Downscale cap, alpha cutoff and row order
/// * `mode` - How pixels become samples
///
/// # Errors
///
/// Returns [`GenerateError::Decode`] if the bytes are not a PNG or JPEG,
/// cannot be decoded, or decode to a zero-area image.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use image::{ImageFormat, Rgba, RgbaImage};
/// use mesh_from_image::raster::{sample, SampleMode};
/// use mesh_from_image::SampleParams;
///
/// let img = RgbaImage::from_pixel(4, 2, Rgba([255, 255, 255, 255]));
/// let mut png = Vec::new();
/// img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();
///
/// let grid = sample(&png, &SampleParams::default(), SampleMode::Luminance).unwrap();
/// assert_eq!((grid.width(), grid.height()), (4, 2));
/// ```
pub fn sample(
    bytes: &[u8],
    params: &SampleParams,
    mode: SampleMode,
) -> GenerateResult<SampleGrid> {
    let format = image::guess_format(bytes)?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(GenerateError::decode(format!(
            "unsupported image format {format:?} (expected PNG or JPEG)"
        )));
    }

    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(GenerateError::decode(format!(
            "image decodes to zero area ({width}x{height})"
        )));
    }

    let mut rgba = decoded.into_rgba8();
    let (target_w, target_h) = target_dimensions(width, height, params.max_dimension);
    if (target_w, target_h) != (width, height) {
        debug!(width, height, target_w, target_h, "Downscaling raster");
        rgba = imageops::resize(&rgba, target_w, target_h, FilterType::Nearest);
    }
    if params.flip_vertical {
        imageops::flip_vertical_in_place(&mut rgba);
    }

    let samples = rgba.pixels().map(|p| mode.sample(p.0)).collect();
    Grid::from_vec(rgba.width() as usize, rgba.height() as usize, samples)
}
