//! Triangle-soup mesh types for image-to-solid generation.
//!
//! The generator emits and the serializer consumes the same small set of
//! types:
//!
//! - [`Vertex`]: a bare `Point3<f64>`, with no index or identity
//! - [`Triangle`]: three vertex copies and the triangle's own normal
//! - [`Mesh`]: triangles in emission order, append-only while building
//! - [`Aabb`]: axis-aligned bounds, for footprints and base plates
//!
//! Coordinates are unit-agnostic `f64`; `mesh-from-image` works in
//! millimeters with Z up. Triangles wind counter-clockwise seen from the
//! side their normal points to.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Mesh, Point3, Triangle};
//!
//! let mut mesh = Mesh::new();
//! mesh.push(Triangle::from_winding(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ));
//!
//! assert_eq!(mesh.len(), 1);
//! assert!(mesh.triangles[0].normal.z > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod traits;
mod triangle;

pub use bounds::Aabb;
pub use mesh::{Mesh, closed_box};
pub use traits::MeshBounds;
pub use triangle::{Triangle, Vertex, face_normal};

pub use nalgebra::{Point3, Vector3};
