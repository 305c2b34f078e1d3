//! STL (Stereolithography) output.
//!
//! Writes facet meshes as ASCII text (the primary artifact) or as binary STL.
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```

use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_types::{Mesh, Triangle};
use tempfile::NamedTempFile;

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Solid name used when none is configured.
pub const DEFAULT_SOLID_NAME: &str = "mesh";

/// STL flavour to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StlEncoding {
    /// Human-readable text.
    #[default]
    Ascii,
    /// Compact little-endian binary.
    Binary,
}

/// Formatting options for STL output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StlOptions {
    /// Name written after `solid` and `endsolid`.
    pub solid_name: String,

    /// Fixed number of decimals for every number in ASCII output.
    ///
    /// `None` prints the shortest representation that round-trips the
    /// stored `f64` exactly, so no precision is lost.
    pub precision: Option<usize>,
}

impl Default for StlOptions {
    fn default() -> Self {
        Self {
            solid_name: DEFAULT_SOLID_NAME.to_string(),
            precision: None,
        }
    }
}

impl StlOptions {
    /// Set the solid name.
    #[must_use]
    pub fn with_solid_name(mut self, name: impl Into<String>) -> Self {
        self.solid_name = name.into();
        self
    }

    /// Fix the number of decimals in ASCII output.
    #[must_use]
    pub const fn with_precision(mut self, decimals: usize) -> Self {
        self.precision = Some(decimals);
        self
    }

    /// Check that the options can be expressed in an STL file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidContent`] if the solid name spans more than
    /// one line.
    pub fn validate(&self) -> IoResult<()> {
        if self.solid_name.contains(['\n', '\r']) {
            return Err(IoError::invalid_content(format!(
                "solid name {:?} must fit on one line",
                self.solid_name
            )));
        }
        Ok(())
    }
}

/// A number printed at full or fixed precision.
struct Num {
    value: f64,
    precision: Option<usize>,
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Adding +0.0 turns -0.0 into 0.0
        let value = self.value + 0.0;
        let text = match self.precision {
            Some(decimals) => format!("{value:.decimals$}"),
            None => value.to_string(),
        };
        // Tiny negatives still round to "-0.000"
        match text.strip_prefix('-') {
            Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => f.write_str(rest),
            _ => f.write_str(&text),
        }
    }
}

/// Render a mesh as ASCII STL text.
///
/// Triangles are written in mesh order with their stored normals, so the
/// same mesh always yields the same text.
///
/// # Errors
///
/// Returns an error if the options are invalid.
///
/// # Example
///
/// ```
/// use mesh_io::{to_stl_ascii, StlOptions};
/// use mesh_types::{Mesh, Point3, Triangle};
///
/// let mut mesh = Mesh::new();
/// mesh.push(Triangle::from_winding(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ));
///
/// let text = to_stl_ascii(&mesh, &StlOptions::default().with_solid_name("part")).unwrap();
/// assert!(text.starts_with("solid part\n"));
/// assert!(text.contains("facet normal 0 0 1"));
/// assert!(text.trim_end().ends_with("endsolid part"));
/// ```
pub fn to_stl_ascii(mesh: &Mesh, options: &StlOptions) -> IoResult<String> {
    // Roughly 250 bytes per facet at full precision.
    let mut buf = Vec::with_capacity(64 + mesh.len() * 256);
    write_stl_ascii(mesh, &mut buf, options)?;
    Ok(String::from_utf8(buf)?)
}

/// Write a mesh as ASCII STL to any writer.
///
/// # Errors
///
/// Returns an error if the options are invalid or the writer fails.
pub fn write_stl_ascii<W: Write>(mesh: &Mesh, mut writer: W, options: &StlOptions) -> IoResult<()> {
    options.validate()?;
    let name = &options.solid_name;
    let num = |value: f64| Num {
        value,
        precision: options.precision,
    };

    writeln!(writer, "solid {name}")?;

    for Triangle { vertices, normal } in mesh {
        writeln!(
            writer,
            "  facet normal {} {} {}",
            num(normal.x),
            num(normal.y),
            num(normal.z)
        )?;
        writeln!(writer, "    outer loop")?;
        for v in vertices {
            writeln!(writer, "      vertex {} {} {}", num(v.x), num(v.y), num(v.z))?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid {name}")?;
    writer.flush()?;

    Ok(())
}

/// Write a mesh as binary STL to any writer.
///
/// Coordinates and normals are narrowed to `f32` as the format requires.
///
/// # Errors
///
/// Returns an error if the mesh has more triangles than the format can
/// count, or if the writer fails.
pub fn write_stl_binary<W: Write>(
    mesh: &Mesh,
    mut writer: W,
    options: &StlOptions,
) -> IoResult<()> {
    let face_count = u32::try_from(mesh.len()).map_err(|_| IoError::TooManyTriangles {
        max: u64::from(u32::MAX),
        got: mesh.len(),
    })?;

    // Header carries the solid name, padded with spaces.
    let mut header = [b' '; HEADER_SIZE];
    let text = options.solid_name.as_bytes();
    let len = text.len().min(HEADER_SIZE);
    header[..len].copy_from_slice(&text[..len]);
    writer.write_all(&header)?;
    writer.write_all(&face_count.to_le_bytes())?;

    for tri in mesh {
        write_vec3_binary(&mut writer, tri.normal.x, tri.normal.y, tri.normal.z)?;
        for v in &tri.vertices {
            write_vec3_binary(&mut writer, v.x, v.y, v.z)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

/// Write three components as f32s in little-endian.
fn write_vec3_binary<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> IoResult<()> {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: f64 to f32 is intentional for STL format
    {
        writer.write_all(&(x as f32).to_le_bytes())?;
        writer.write_all(&(y as f32).to_le_bytes())?;
        writer.write_all(&(z as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Save a mesh to an STL file.
///
/// The mesh is written to a temporary file next to `path`, which then
/// replaces `path`. A failed save leaves any existing file untouched.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `encoding` - ASCII or binary
/// * `options` - Solid name and ASCII precision
///
/// # Errors
///
/// Returns an error if the file cannot be written or the options are invalid.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{save_stl, StlEncoding, StlOptions};
/// use mesh_types::Mesh;
///
/// let mesh = Mesh::new();
/// save_stl(&mesh, "output.stl", StlEncoding::Binary, &StlOptions::default()).unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    encoding: StlEncoding,
    options: &StlOptions,
) -> IoResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    {
        let writer = BufWriter::new(staged.as_file_mut());
        match encoding {
            StlEncoding::Ascii => write_stl_ascii(mesh, writer, options)?,
            StlEncoding::Binary => write_stl_binary(mesh, writer, options)?,
        }
    }
    staged.persist(path).map_err(|err| err.error)?;

    Ok(())
}
