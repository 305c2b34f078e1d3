//! Facet (triangle soup) mesh.

use crate::{Aabb, MeshBounds, Triangle, Vertex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered list of flat-shaded triangles.
///
/// Vertices are not indexed or deduplicated; each triangle owns its three
/// corners. Construction is append-only and insertion order is preserved, so
/// identical build steps always produce identical triangle order.
///
/// # Winding Order
///
/// Triangles use **counter-clockwise (CCW) winding** when viewed from the
/// side their normal faces.
///
/// # Example
///
/// ```
/// use mesh_types::{Mesh, Point3};
///
/// let mut mesh = Mesh::new();
/// mesh.push_quad(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert_eq!(mesh.len(), 2);
/// assert!(mesh.iter().all(|t| t.normal.z > 0.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    /// Triangles in emission order.
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    /// Create a mesh with room for `triangle_count` triangles.
    #[inline]
    #[must_use]
    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Append a triangle.
    #[inline]
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Append a quad as the two triangles `(v1, v2, v3)` and `(v1, v3, v4)`.
    ///
    /// Each half gets its own normal derived from its winding.
    pub fn push_quad(&mut self, v1: Vertex, v2: Vertex, v3: Vertex, v4: Vertex) {
        self.triangles.push(Triangle::from_winding(v1, v2, v3));
        self.triangles.push(Triangle::from_winding(v1, v3, v4));
    }

    /// Append every triangle of `other`, keeping its order.
    pub fn append(&mut self, other: &mut Self) {
        self.triangles.append(&mut other.triangles);
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterate over triangles in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Iterate over every vertex copy (three per triangle).
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }

    /// Index of the first triangle holding a non-finite value, if any.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<usize> {
        self.triangles.iter().position(|t| !t.is_finite())
    }

    /// Check that every coordinate and normal in the mesh is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }
}

impl MeshBounds for Mesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices())
    }
}

impl Extend<Triangle> for Mesh {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

/// Create a closed axis-aligned box with outward-facing normals.
///
/// Emits six quads (bottom, top, front, right, back, left), twelve
/// triangles in total.
///
/// # Example
///
/// ```
/// use mesh_types::{closed_box, Aabb, MeshBounds, Point3};
///
/// let bounds = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
/// let cube = closed_box(&bounds);
/// assert_eq!(cube.len(), 12);
/// assert_eq!(cube.bounds(), bounds);
/// ```
#[must_use]
pub fn closed_box(bounds: &Aabb) -> Mesh {
    let (lo, hi) = (bounds.min, bounds.max);
    let b0 = Vertex::new(lo.x, lo.y, lo.z);
    let b1 = Vertex::new(hi.x, lo.y, lo.z);
    let b2 = Vertex::new(hi.x, hi.y, lo.z);
    let b3 = Vertex::new(lo.x, hi.y, lo.z);
    let t4 = Vertex::new(lo.x, lo.y, hi.z);
    let t5 = Vertex::new(hi.x, lo.y, hi.z);
    let t6 = Vertex::new(hi.x, hi.y, hi.z);
    let t7 = Vertex::new(lo.x, hi.y, hi.z);

    let mut mesh = Mesh::with_capacity(12);
    mesh.push_quad(b0, b3, b2, b1); // Bottom
    mesh.push_quad(t4, t5, t6, t7); // Top
    mesh.push_quad(b0, b1, t5, t4); // Front
    mesh.push_quad(b1, b2, t6, t5); // Right
    mesh.push_quad(b2, b3, t7, t6); // Back
    mesh.push_quad(b3, b0, t4, t7); // Left
    mesh
}
