//! Behaviour shared by geometry containers.

use crate::Aabb;

/// Geometry occupying a bounded region of space.
pub trait MeshBounds {
    /// Smallest axis-aligned box holding every vertex.
    ///
    /// Empty when there are no vertices.
    fn bounds(&self) -> Aabb;

    /// Like [`bounds`](Self::bounds), but `None` when there are no vertices.
    fn bounds_opt(&self) -> Option<Aabb> {
        Some(self.bounds()).filter(|bounds| !bounds.is_empty())
    }
}
