//! End-to-end generation: image bytes in, STL text out.
//!
//! Stages run strictly forward (sample, transform, build, serialize) and
//! the first failure ends the run. Nothing is written anywhere: the caller
//! receives either the complete artifact or an error.

use mesh_io::to_stl_ascii;
use mesh_types::Mesh;
use tracing::info;

use crate::builder::build_mesh;
use crate::error::GenerateResult;
use crate::params::GenerationConfig;
use crate::raster;

/// Output of a successful run: the mesh and its ASCII STL text.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// The generated triangles, for callers that preview them.
    pub mesh: Mesh,
    /// The serialized STL document.
    pub stl: String,
}

/// Generate the mesh for an image without serializing it.
///
/// # Errors
///
/// - [`GenerateError::InvalidConfig`](crate::GenerateError::InvalidConfig)
///   if `config` fails validation
/// - [`GenerateError::Decode`](crate::GenerateError::Decode) if the bytes
///   are not a usable PNG or JPEG
/// - [`GenerateError::DegenerateInput`](crate::GenerateError::DegenerateInput)
///   if the image is flat and `config.require_variation` is set
/// - [`GenerateError::Internal`](crate::GenerateError::Internal) if the
///   geometry comes out non-finite
pub fn generate(bytes: &[u8], config: &GenerationConfig) -> GenerateResult<Mesh> {
    config.validate()?;

    let mode = config.strategy.sample_mode(&config.sample);
    let grid = raster::sample(bytes, &config.sample, mode)?;
    info!(
        width = grid.width(),
        height = grid.height(),
        strategy = ?config.strategy,
        "Sampled raster"
    );

    let field = config.strategy.transform(&grid, config)?;
    build_mesh(&field, config)
}

/// Generate the mesh for an image and serialize it as ASCII STL.
///
/// # Errors
///
/// Same as [`generate`]; serialization failures surface as
/// [`GenerateError::Internal`](crate::GenerateError::Internal).
pub fn run_with_mesh(bytes: &[u8], config: &GenerationConfig) -> GenerateResult<Generated> {
    let mesh = generate(bytes, config)?;
    let stl = to_stl_ascii(&mesh, &config.stl)?;
    info!(
        triangles = mesh.len(),
        bytes = stl.len(),
        solid = %config.stl.solid_name,
        "Serialized STL"
    );
    Ok(Generated { mesh, stl })
}

/// Turn image bytes into an ASCII STL document.
///
/// Identical bytes and config always produce identical text.
///
/// # Errors
///
/// Same as [`run_with_mesh`].
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use image::{ImageFormat, Rgba, RgbaImage};
/// use mesh_from_image::{run, GenerationConfig};
///
/// let img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
/// let mut png = Vec::new();
/// img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();
///
/// let stl = run(&png, &GenerationConfig::height_map()).unwrap();
/// assert!(stl.starts_with("solid heightMap\n"));
/// assert_eq!(stl.matches("endfacet").count(), 2);
/// ```
pub fn run(bytes: &[u8], config: &GenerationConfig) -> GenerateResult<String> {
    run_with_mesh(bytes, config).map(|generated| generated.stl)
}
