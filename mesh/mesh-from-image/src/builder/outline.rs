//! Outline (cookie-cutter) extrusion.
//!
//! Every outline cell grows a tapered wall strip toward each neighbour that
//! is not itself on the outline. Strips are split into layers; each layer is
//! a quad joining the cell position (inner edge) to the offset position
//! (outer edge) at the layer's lower and upper heights. The last layer is
//! closed with a horizontal cap, and the whole cutter sits on a closed base
//! plate that overhangs the footprint by the margin.

// Layer indices are tiny
#![allow(clippy::cast_precision_loss)]

use mesh_types::{Mesh, Point3, Triangle, Vector3, closed_box};
use tracing::debug;

use super::{MeshBuilder, WorldMapping};
use crate::error::{GenerateError, GenerateResult};
use crate::grid::{NEIGHBOR_OFFSETS, OutlineField};
use crate::params::GenerationConfig;

/// Whether the wall's offset width starts at `top_width` on the lowest
/// layer and shrinks to `bottom_width` on the highest one.
///
/// The parameter names suggest the reverse, but `true` reproduces the
/// published profile. Flipping this swaps which end of the wall is wide.
pub const TAPER_STARTS_AT_TOP_WIDTH: bool = true;

/// A horizontal segment across a wall strip, perpendicular to the wall's
/// direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Endpoint on the right of the wall direction.
    pub start: Point3<f64>,
    /// Endpoint on the left of the wall direction.
    pub end: Point3<f64>,
}

impl Edge {
    /// Edge centred on `center`, extending `half_extent` either side of it
    /// perpendicular to the horizontal `direction`.
    #[must_use]
    pub fn across(center: Point3<f64>, direction: &Vector3<f64>, half_extent: f64) -> Self {
        let side = Vector3::new(-direction.y, direction.x, 0.0) * half_extent;
        Self {
            start: center - side,
            end: center + side,
        }
    }
}

/// Builds a tapered cookie-cutter wall along an outline field.
///
/// # Example
///
/// ```
/// use mesh_from_image::{GenerationConfig, Grid, MeshBuilder, OutlineBuilder};
///
/// // A single outline cell walled on all eight sides
/// let mut cells = vec![false; 9];
/// cells[4] = true;
/// let field = Grid::from_vec(3, 3, cells).unwrap();
///
/// let builder = OutlineBuilder::from_config(&GenerationConfig::cookie_cutter().with_layers(2));
/// let mesh = builder.build(&field).unwrap();
///
/// // 8 walls x (1 layer quad + cap quad) + 12 base-plate triangles
/// assert_eq!(mesh.len(), 8 * 4 + 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineBuilder {
    /// Footprint edge length.
    pub scale: f64,
    /// Base plate height; walls start here.
    pub base_thickness: f64,
    /// Wall height above the base plate.
    pub wall_height: f64,
    /// Offset width at the first layer boundary.
    pub top_width: f64,
    /// Offset width at the last layer boundary.
    pub bottom_width: f64,
    /// Number of layer boundaries.
    pub num_layers: usize,
    /// Base plate overhang past the footprint.
    pub margin: f64,
}

impl OutlineBuilder {
    /// Take the builder's parameters from a generation config.
    #[must_use]
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            scale: config.scale,
            base_thickness: config.base_thickness,
            wall_height: config.wall_height,
            top_width: config.top_width,
            bottom_width: config.bottom_width,
            num_layers: config.num_layers,
            margin: config.margin(),
        }
    }

    /// Offset width at layer boundary `layer`.
    #[must_use]
    pub fn width_at(&self, layer: usize) -> f64 {
        let (first, last) = if TAPER_STARTS_AT_TOP_WIDTH {
            (self.top_width, self.bottom_width)
        } else {
            (self.bottom_width, self.top_width)
        };
        first - layer as f64 * (first - last) / self.segments() as f64
    }

    /// Height of layer boundary `layer`.
    #[must_use]
    pub fn height_at(&self, layer: usize) -> f64 {
        self.base_thickness + self.wall_height * layer as f64 / self.segments() as f64
    }

    /// Close a wall strip with a horizontal quad between two edges.
    ///
    /// The quad runs `inner.start → outer.start → outer.end → inner.end`,
    /// which faces +Z when the edges come from [`Edge::across`].
    #[must_use]
    pub fn cap_layer(inner: Edge, outer: Edge) -> [Triangle; 2] {
        [
            Triangle::from_winding(inner.start, outer.start, outer.end),
            Triangle::from_winding(inner.start, outer.end, inner.end),
        ]
    }

    const fn segments(&self) -> usize {
        self.num_layers - 1
    }

    /// Emit the layered strip and cap for one wall.
    fn wall(
        &self,
        origin: Point3<f64>,
        direction: &Vector3<f64>,
        half_extent: f64,
        mesh: &mut Mesh,
    ) {
        let at = |layer: usize, offset: f64| {
            let base = origin + direction * offset;
            Point3::new(base.x, base.y, self.height_at(layer))
        };

        for layer in 0..self.segments() {
            let (w1, w2) = (self.width_at(layer), self.width_at(layer + 1));
            mesh.push_quad(
                at(layer, w1),
                at(layer, 0.0),
                at(layer + 1, 0.0),
                at(layer + 1, w2),
            );
        }

        let top = self.segments();
        let width = self.width_at(top);
        if width > 0.0 {
            let inner = Edge::across(at(top, 0.0), direction, half_extent);
            let outer = Edge::across(at(top, width), direction, half_extent);
            mesh.extend(Self::cap_layer(inner, outer));
        }
    }
}

impl MeshBuilder for OutlineBuilder {
    type Field = OutlineField;

    fn build(&self, field: &OutlineField) -> GenerateResult<Mesh> {
        if self.num_layers < 2 {
            return Err(GenerateError::invalid_config(format!(
                "num_layers = {} (must be at least 2)",
                self.num_layers
            )));
        }

        let world = WorldMapping::new(field.width(), field.height(), self.scale);
        let (cell_w, cell_h) = world.cell_size();
        let half_extent = 0.5 * cell_w.min(cell_h);
        let directions = NEIGHBOR_OFFSETS.map(|(dx, dy)| {
            (dx, dy, Vector3::new(dx as f64, dy as f64, 0.0).normalize())
        });

        let mut mesh = Mesh::new();
        let mut walls = 0usize;
        for y in 0..field.height() {
            for x in 0..field.width() {
                if !field.at(x, y) {
                    continue;
                }
                let origin = world.point(x, y, 0.0);
                for (dx, dy, direction) in &directions {
                    let neighbor = x
                        .checked_add_signed(*dx)
                        .zip(y.checked_add_signed(*dy))
                        .and_then(|(nx, ny)| field.get(nx, ny));
                    // Walls face background cells inside the grid only
                    if neighbor != Some(&false) {
                        continue;
                    }
                    self.wall(origin, direction, half_extent, &mut mesh);
                    walls += 1;
                }
            }
        }

        let plate = world.footprint(0.0, self.base_thickness).expanded_xy(self.margin);
        mesh.extend(closed_box(&plate).triangles);

        debug!(
            walls,
            layers = self.num_layers,
            margin = self.margin,
            "Extruded outline walls"
        );
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use approx::assert_relative_eq;
    use mesh_types::MeshBounds;

    fn centre_cell() -> OutlineField {
        let mut cells = vec![false; 9];
        cells[4] = true;
        Grid::from_vec(3, 3, cells).unwrap()
    }

    fn builder() -> OutlineBuilder {
        OutlineBuilder::from_config(&GenerationConfig::cookie_cutter())
    }

    #[test]
    fn empty_field_gives_base_plate_only() {
        let field = Grid::from_vec(3, 3, vec![false; 9]).unwrap();
        let mesh = builder().build(&field).unwrap();

        assert_eq!(mesh.len(), 12);
        let bounds = mesh.bounds();
        assert_relative_eq!(bounds.min, Point3::new(-36.0, -36.0, 0.0));
        assert_relative_eq!(bounds.max, Point3::new(36.0, 36.0, 0.8));
    }

    #[test]
    fn base_plate_faces_outward() {
        let field = Grid::from_vec(3, 3, vec![false; 9]).unwrap();
        let mesh = builder().build(&field).unwrap();
        let centre = mesh.bounds().center();

        for tri in &mesh {
            let [a, b, c] = tri.vertices;
            let centroid = Point3::from((a.coords + b.coords + c.coords) / 3.0);
            assert!(tri.normal.dot(&(centroid - centre)) > 0.0);
        }
    }

    #[test]
    fn isolated_cell_walls_every_direction() {
        let mesh = builder().build(&centre_cell()).unwrap();
        // 8 walls x (7 layer quads + cap) x 2 + base plate
        assert_eq!(mesh.len(), 8 * 16 + 12);
    }

    #[test]
    fn walls_skip_outline_neighbours() {
        let mut cells = vec![false; 12];
        cells[5] = true;
        cells[6] = true;
        let field = Grid::from_vec(4, 3, cells).unwrap();

        let mesh = builder().build(&field).unwrap();
        assert_eq!(mesh.len(), 2 * 7 * 16 + 12);
    }

    #[test]
    fn no_walls_past_the_grid_edge() {
        let mut cells = vec![false; 4];
        cells[0] = true;
        let field = Grid::from_vec(2, 2, cells).unwrap();

        // Only (1,0), (0,1) and (1,1) exist around the corner cell
        let mesh = builder().build(&field).unwrap();
        assert_eq!(mesh.len(), 3 * 16 + 12);
    }

    #[test]
    fn taper_narrows_with_layer_index() {
        let b = builder();
        assert!(TAPER_STARTS_AT_TOP_WIDTH);
        assert_relative_eq!(b.width_at(0), 4.0);
        assert_relative_eq!(b.width_at(7), 0.5);
        assert_relative_eq!(b.width_at(1), 3.5);
        assert!((0..7).all(|i| b.width_at(i + 1) < b.width_at(i)));

        assert_relative_eq!(b.height_at(0), 0.8);
        assert_relative_eq!(b.height_at(7), 15.8);
    }

    #[test]
    fn first_wall_layout() {
        let mesh = builder().build(&centre_cell()).unwrap();

        // Cell (1, 1) of a 3x3 grid on a 60mm footprint sits at (-10, -10);
        // the first wall points toward -X
        let first = &mesh.triangles[0];
        assert_relative_eq!(first.vertices[0], Point3::new(-14.0, -10.0, 0.8), epsilon = 1e-9);
        assert_relative_eq!(first.vertices[1], Point3::new(-10.0, -10.0, 0.8), epsilon = 1e-9);
        assert_relative_eq!(
            first.vertices[2],
            Point3::new(-10.0, -10.0, 0.8 + 15.0 / 7.0),
            epsilon = 1e-9
        );

        // Second half of the last layer ends at the bottom width, full height
        let last_layer = &mesh.triangles[13];
        assert_relative_eq!(
            last_layer.vertices[2],
            Point3::new(-10.5, -10.0, 15.8),
            epsilon = 1e-9
        );

        // Second wall points toward +X
        let second = &mesh.triangles[16];
        assert_relative_eq!(second.vertices[0], Point3::new(-6.0, -10.0, 0.8), epsilon = 1e-9);
    }

    #[test]
    fn diagonal_walls_use_unit_direction() {
        let mesh = builder().build(&centre_cell()).unwrap();
        let offset = 4.0 / 2.0_f64.sqrt();

        // Fifth direction is (-1, -1)
        let diagonal = &mesh.triangles[4 * 16];
        assert_relative_eq!(
            diagonal.vertices[0],
            Point3::new(-10.0 - offset, -10.0 - offset, 0.8),
            epsilon = 1e-9
        );
    }

    #[test]
    fn caps_face_up() {
        let mesh = builder().build(&centre_cell()).unwrap();
        for wall in 0..8 {
            for tri in &mesh.triangles[wall * 16 + 14..wall * 16 + 16] {
                assert_relative_eq!(tri.normal, Vector3::z(), epsilon = 1e-9);
                assert!(tri.vertices.iter().all(|v| (v.z - 15.8).abs() < 1e-9));
                assert!(tri.area() > 0.0);
            }
        }
    }

    #[test]
    fn cap_layer_spans_edges() {
        let direction = Vector3::new(0.0, 1.0, 0.0);
        let inner = Edge::across(Point3::new(0.0, 0.0, 5.0), &direction, 1.0);
        let outer = Edge::across(Point3::new(0.0, 2.0, 5.0), &direction, 1.0);
        assert_relative_eq!(inner.start, Point3::new(1.0, 0.0, 5.0));
        assert_relative_eq!(inner.end, Point3::new(-1.0, 0.0, 5.0));

        let [a, b] = OutlineBuilder::cap_layer(inner, outer);
        assert_relative_eq!(a.area() + b.area(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(a.normal, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(b.normal, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn zero_bottom_width_skips_cap() {
        let config = GenerationConfig::cookie_cutter().with_wall_widths(4.0, 0.0);
        let mesh = OutlineBuilder::from_config(&config).build(&centre_cell()).unwrap();
        assert_eq!(mesh.len(), 8 * 14 + 12);
    }

    #[test]
    fn rejects_single_layer() {
        let config = GenerationConfig::cookie_cutter().with_layers(1);
        let err = OutlineBuilder::from_config(&config).build(&centre_cell()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidConfig);
    }

    #[test]
    fn deterministic_order() {
        let field = Grid::from_fn(6, 5, |x, y| (1..5).contains(&x) && (y == 1 || y == 3)).unwrap();
        let a = builder().build(&field).unwrap();
        let b = builder().build(&field).unwrap();
        assert_eq!(a, b);
    }
}
