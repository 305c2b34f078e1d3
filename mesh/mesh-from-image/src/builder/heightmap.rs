//! Height-map extrusion.

use mesh_types::{Mesh, Point3, Triangle, Vector3};
use tracing::debug;

use super::{MeshBuilder, WorldMapping};
use crate::error::GenerateResult;
use crate::grid::HeightField;
use crate::params::GenerationConfig;

/// Displaces a surface by normalized height over a flat floor.
///
/// Every 2×2 cell neighbourhood becomes one quad split along its
/// `(x, y)` to `(x + 1, y + 1)` diagonal. The floor is a single rectangle at
/// `z = -base_thickness` under the surface, facing down. Surface and floor
/// are not joined by side walls.
///
/// # Example
///
/// ```
/// use mesh_from_image::{Grid, HeightMapBuilder, MeshBuilder};
///
/// let heights = Grid::from_vec(3, 2, vec![0.0, 0.5, 1.0, 0.0, 0.5, 1.0]).unwrap();
/// let mesh = HeightMapBuilder::new(60.0, 2.0).build(&heights).unwrap();
///
/// // Two quads of surface plus the floor
/// assert_eq!(mesh.len(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightMapBuilder {
    /// Footprint edge length; heights are scaled by the same factor.
    pub scale: f64,
    /// Depth of the floor below z = 0.
    pub base_thickness: f64,
}

impl HeightMapBuilder {
    /// Create a builder.
    #[must_use]
    pub const fn new(scale: f64, base_thickness: f64) -> Self {
        Self {
            scale,
            base_thickness,
        }
    }

    /// Take the builder's parameters from a generation config.
    #[must_use]
    pub const fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.scale, config.base_thickness)
    }

    fn surface(&self, heights: &HeightField, world: &WorldMapping, mesh: &mut Mesh) {
        let point = |x: usize, y: usize| world.point(x, y, heights.at(x, y) * self.scale);

        for y in 0..heights.height() - 1 {
            for x in 0..heights.width() - 1 {
                let p00 = point(x, y);
                let p10 = point(x + 1, y);
                let p11 = point(x + 1, y + 1);
                let p01 = point(x, y + 1);
                mesh.push(Triangle::from_winding(p00, p10, p11));
                mesh.push(Triangle::from_winding(p00, p11, p01));
            }
        }
    }

    /// Downward-facing floor spanning the surface's X/Y extent.
    fn floor(&self, heights: &HeightField, world: &WorldMapping, mesh: &mut Mesh) {
        let z = -self.base_thickness;
        let (x0, x1) = (world.x(0), world.x(heights.width() - 1));
        let (y0, y1) = (world.y(0), world.y(heights.height() - 1));
        let down = Vector3::new(0.0, 0.0, -1.0);

        // Clockwise seen from +Z
        mesh.push(Triangle::with_normal(
            Point3::new(x0, y0, z),
            Point3::new(x0, y1, z),
            Point3::new(x1, y1, z),
            down,
        ));
        mesh.push(Triangle::with_normal(
            Point3::new(x0, y0, z),
            Point3::new(x1, y1, z),
            Point3::new(x1, y0, z),
            down,
        ));
    }
}

impl MeshBuilder for HeightMapBuilder {
    type Field = HeightField;

    fn build(&self, heights: &HeightField) -> GenerateResult<Mesh> {
        let (width, height) = (heights.width(), heights.height());
        let world = WorldMapping::new(width, height, self.scale);

        let (min, max) = heights
            .cells()
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            });
        let flat = max <= min;

        let quads = (width - 1) * (height - 1);
        let mut mesh = Mesh::with_capacity(if flat { 2 } else { 2 * quads + 2 });
        if flat {
            debug!(width, height, "Flat height field, emitting floor only");
        } else {
            self.surface(heights, &world, &mut mesh);
        }
        self.floor(heights, &world, &mut mesh);

        Ok(mesh)
    }
}
