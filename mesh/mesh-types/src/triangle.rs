//! Flat-shaded triangle facets.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in 3D space.
///
/// Vertices carry no identity beyond their coordinates: every triangle owns
/// three independent copies, the way facet-based formats such as STL store
/// them.
pub type Vertex = Point3<f64>;

/// A triangle with concrete vertex positions and its own face normal.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**: the
/// normal derived by [`Triangle::from_winding`] follows the right-hand rule
/// on `(v1 - v0) × (v2 - v0)`. Normals are never shared between triangles.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::from_winding(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.normal.z - 1.0).abs() < 1e-10);
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// The three corners, in winding order.
    pub vertices: [Vertex; 3],
    /// Face normal (unit length, or zero for a degenerate triangle).
    pub normal: Vector3<f64>,
}

impl Triangle {
    /// Create a triangle whose normal is derived from its winding.
    ///
    /// A zero-area triangle gets the zero vector as its normal rather than
    /// a NaN-filled one.
    #[must_use]
    pub fn from_winding(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        let normal = face_normal(&v0, &v1, &v2).unwrap_or_else(Vector3::zeros);
        Self {
            vertices: [v0, v1, v2],
            normal,
        }
    }

    /// Create a triangle with an explicitly chosen normal.
    ///
    /// The caller is responsible for winding the vertices consistently
    /// with `normal`.
    #[inline]
    #[must_use]
    pub const fn with_normal(v0: Vertex, v1: Vertex, v2: Vertex, normal: Vector3<f64>) -> Self {
        Self {
            vertices: [v0, v1, v2],
            normal,
        }
    }

    /// Compute the (unnormalized) winding normal via cross product.
    ///
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let [v0, v1, v2] = &self.vertices;
        (v1 - v0).cross(&(v2 - v0))
    }

    /// Compute the area of the triangle.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Check whether the triangle has (numerically) zero area.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.normal_unnormalized().norm_squared() <= f64::EPSILON
    }

    /// Check that every coordinate and normal component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .flat_map(|v| v.coords.iter())
            .chain(self.normal.iter())
            .all(|c| c.is_finite())
    }
}

/// Compute the unit normal of the triangle `(v0, v1, v2)`.
///
/// Returns `None` for degenerate triangles (zero area).
///
/// # Example
///
/// ```
/// use mesh_types::{face_normal, Point3};
///
/// // Collinear points have no normal
/// let n = face_normal(
///     &Point3::new(0.0, 0.0, 0.0),
///     &Point3::new(1.0, 0.0, 0.0),
///     &Point3::new(2.0, 0.0, 0.0),
/// );
/// assert!(n.is_none());
/// ```
#[must_use]
pub fn face_normal(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Option<Vector3<f64>> {
    let n = (v1 - v0).cross(&(v2 - v0));
    let len_sq = n.norm_squared();
    if len_sq > f64::EPSILON * f64::EPSILON {
        Some(n / len_sq.sqrt())
    } else {
        None
    }
}
