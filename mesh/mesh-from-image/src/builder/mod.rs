//! Mesh builders: one per extrusion strategy, behind [`MeshBuilder`].
//!
//! Both builders map grid cells onto the same square footprint through
//! [`WorldMapping`] and emit flat-shaded triangles in a deterministic order.

// Grid indices are far below 2^52
#![allow(clippy::cast_precision_loss)]

mod heightmap;
mod outline;

pub use heightmap::HeightMapBuilder;
pub use outline::{Edge, OutlineBuilder, TAPER_STARTS_AT_TOP_WIDTH};

use mesh_types::{Aabb, Mesh, Point3};
use tracing::info;

use crate::error::{GenerateError, GenerateResult};
use crate::field::Field;
use crate::params::GenerationConfig;

/// Turns a transformed field into a triangle mesh.
pub trait MeshBuilder {
    /// The field this builder consumes.
    type Field;

    /// Build the mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder's parameters cannot produce geometry.
    fn build(&self, field: &Self::Field) -> GenerateResult<Mesh>;
}

/// Build a mesh from whichever field the strategy produced.
///
/// The resulting mesh is checked for non-finite coordinates and normals.
///
/// # Errors
///
/// Propagates builder errors, and returns [`GenerateError::Internal`] if any
/// emitted coordinate or normal is not finite.
///
/// # Example
///
/// ```
/// use mesh_from_image::{build_mesh, Field, GenerationConfig, Grid};
///
/// let field = Field::Outline(Grid::from_vec(3, 3, vec![false; 9]).unwrap());
/// let mesh = build_mesh(&field, &GenerationConfig::cookie_cutter()).unwrap();
///
/// // Only the base plate
/// assert_eq!(mesh.len(), 12);
/// ```
pub fn build_mesh(field: &Field, config: &GenerationConfig) -> GenerateResult<Mesh> {
    let mesh = match field {
        Field::Height(heights) => HeightMapBuilder::from_config(config).build(heights)?,
        Field::Outline(edges) => OutlineBuilder::from_config(config).build(edges)?,
    };

    if let Some(index) = mesh.first_non_finite() {
        return Err(GenerateError::internal(format!(
            "triangle {index} has a non-finite coordinate or normal"
        )));
    }

    info!(
        strategy = ?field.strategy(),
        triangles = mesh.len(),
        "Built mesh"
    );
    Ok(mesh)
}

/// Maps grid indices onto a square footprint centred on the origin.
///
/// Index `i` of `n` lands at `((i / n) - 0.5) * scale`, so index 0 sits on
/// the footprint's low edge and index `n` would sit on its high edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldMapping {
    width: usize,
    height: usize,
    scale: f64,
}

impl WorldMapping {
    /// Mapping for a `width × height` grid onto a `scale`-wide footprint.
    #[must_use]
    pub const fn new(width: usize, height: usize, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// World X of column `x`.
    #[inline]
    #[must_use]
    pub fn x(&self, x: usize) -> f64 {
        (x as f64 / self.width as f64 - 0.5) * self.scale
    }

    /// World Y of row `y`.
    #[inline]
    #[must_use]
    pub fn y(&self, y: usize) -> f64 {
        (y as f64 / self.height as f64 - 0.5) * self.scale
    }

    /// World position of cell `(x, y)` at height `z`.
    #[inline]
    #[must_use]
    pub fn point(&self, x: usize, y: usize, z: f64) -> Point3<f64> {
        Point3::new(self.x(x), self.y(y), z)
    }

    /// World extent of one cell as `(dx, dy)`.
    #[must_use]
    pub fn cell_size(&self) -> (f64, f64) {
        (
            self.scale / self.width as f64,
            self.scale / self.height as f64,
        )
    }

    /// The full square footprint between `z_min` and `z_max`.
    #[must_use]
    pub fn footprint(&self, z_min: f64, z_max: f64) -> Aabb {
        let half = self.scale * 0.5;
        Aabb::new(
            Point3::new(-half, -half, z_min),
            Point3::new(half, half, z_max),
        )
    }
}
