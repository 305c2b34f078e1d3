//! Mesh serialization for image-to-solid generation.
//!
//! This crate turns a [`mesh_types::Mesh`] into STL:
//!
//! - **ASCII STL** as an in-memory `String` ([`to_stl_ascii`]) or to any
//!   writer ([`write_stl_ascii`])
//! - **Binary STL** to any writer ([`write_stl_binary`])
//! - Either flavour straight to a file ([`save_stl`])
//!
//! Output is a pure function of the mesh and the [`StlOptions`]: triangles
//! are written in mesh order with their stored normals.
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
//! use mesh_io::{to_stl_ascii, StlOptions};
//! use mesh_types::{closed_box, Aabb, Point3};
//!
//! let plate = closed_box(&Aabb::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 10.0, 1.0),
//! ));
//! let text = to_stl_ascii(&plate, &StlOptions::default()).unwrap();
//! assert_eq!(text.matches("endfacet").count(), 12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod stl;

pub use error::{IoError, IoResult};
pub use stl::{
    DEFAULT_SOLID_NAME, StlEncoding, StlOptions, save_stl, to_stl_ascii, write_stl_ascii,
    write_stl_binary,
};
