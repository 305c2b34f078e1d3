//! Image-to-solid mesh generation.
//!
//! This crate turns a single PNG or JPEG into a 3D-printable triangle mesh
//! and its ASCII STL text. Two extrusion strategies share one pipeline:
//!
//! - **Height map**: grayscale luminance displaces a surface over a flat
//!   floor, like a relief plate
//! - **Outline**: the dark silhouette's boundary becomes a tapered
//!   cookie-cutter wall on a base plate
//!
//! # Pipeline
//!
//! ```text
//! bytes ──► raster::sample ──► Strategy::transform ──► build_mesh ──► STL text
//!           (SampleGrid)        (Field)                 (Mesh)
//! ```
//!
//! Every run is a pure function of its bytes and [`GenerationConfig`]:
//! no global state, no I/O, byte-identical output for identical input.
//! Runs are independent, so callers may execute many in parallel.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero GUI dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use image::{ImageFormat, Rgba, RgbaImage};
//! use mesh_from_image::{run_with_mesh, GenerationConfig};
//!
//! // Black square on white paper
//! let mut img = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
//! for y in 4..12 {
//!     for x in 4..12 {
//!         img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
//!     }
//! }
//! let mut png = Vec::new();
//! img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();
//!
//! let generated = run_with_mesh(&png, &GenerationConfig::cookie_cutter()).unwrap();
//! assert!(generated.mesh.len() > 12);
//! assert!(generated.stl.starts_with("solid cookieCutter"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod builder;
mod error;
pub mod field;
mod grid;
mod params;
mod pipeline;
pub mod raster;

pub use builder::{
    Edge, HeightMapBuilder, MeshBuilder, OutlineBuilder, TAPER_STARTS_AT_TOP_WIDTH, WorldMapping,
    build_mesh,
};
pub use error::{ErrorKind, GenerateError, GenerateResult};
pub use field::Field;
pub use grid::{Grid, HeightField, NEIGHBOR_OFFSETS, OccupancyField, OutlineField, SampleGrid};
pub use params::{GenerationConfig, MARGIN_PER_TOP_WIDTH, SampleParams, Strategy};
pub use pipeline::{Generated, generate, run, run_with_mesh};
pub use raster::SampleMode;
