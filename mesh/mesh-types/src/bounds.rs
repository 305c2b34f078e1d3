//! Axis-aligned bounds.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned box between two corners.
///
/// Generators describe footprints and base plates with it; callers use a
/// mesh's bounds to frame a preview or report printed size.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3, Vector3};
///
/// let plate = Aabb::new(Point3::new(-30.0, -30.0, 0.0), Point3::new(30.0, 30.0, 0.8));
/// assert_eq!(plate.size(), Vector3::new(60.0, 60.0, 0.8));
/// assert_eq!(plate.center(), Point3::new(0.0, 0.0, 0.4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Corner with the smallest coordinate on every axis.
    pub min: Point3<f64>,
    /// Corner with the largest coordinate on every axis.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Box spanning two opposite corners, given in any order.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// A box containing nothing; growing it by a point yields that point.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::from(Vector3::repeat(f64::INFINITY)),
            max: Point3::from(Vector3::repeat(f64::NEG_INFINITY)),
        }
    }

    /// Tightest box around `points`, or [`Aabb::empty`] if there are none.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        points.fold(Self::empty(), |mut bounds, p| {
            bounds.expand_to_include(p);
            bounds
        })
    }

    /// True when some axis has `min > max`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    /// Edge lengths along X, Y and Z.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Midpoint of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Grow the box just enough to hold `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Grow the box by `margin` in X and Y only, keeping its Z range.
    ///
    /// Used for plates that overhang a footprint. Negative values shrink it.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let plate = Aabb::new(Point3::new(-1.0, -1.0, 0.0), Point3::new(1.0, 1.0, 0.5))
    ///     .expanded_xy(2.0);
    /// assert_eq!(plate.min, Point3::new(-3.0, -3.0, 0.0));
    /// assert_eq!(plate.max, Point3::new(3.0, 3.0, 0.5));
    /// ```
    #[must_use]
    pub fn expanded_xy(&self, margin: f64) -> Self {
        let grow = Vector3::new(margin, margin, 0.0);
        Self {
            min: self.min - grow,
            max: self.max + grow,
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_sorted_per_axis() {
        let bounds = Aabb::new(Point3::new(5.0, 0.0, 2.0), Point3::new(0.0, 5.0, 0.0));
        assert_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(5.0, 5.0, 2.0));
    }

    #[test]
    fn tight_around_points() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 5.0, 3.0),
            Point3::new(-2.0, 8.0, 1.0),
        ];

        let bounds = Aabb::from_points(points.iter());
        assert_eq!(bounds.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(10.0, 8.0, 3.0));
    }

    #[test]
    fn empty_until_grown() {
        let mut bounds = Aabb::default();
        assert!(bounds.is_empty());
        assert!(Aabb::from_points(std::iter::empty()).is_empty());

        bounds.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
        assert!(!bounds.is_empty());
        assert_eq!(bounds.size(), Vector3::zeros());
    }

    #[test]
    fn expanded_xy_keeps_height() {
        let bounds = Aabb::new(Point3::new(0.0, 0.0, 1.0), Point3::new(2.0, 4.0, 3.0));
        let grown = bounds.expanded_xy(0.5);
        assert_eq!(grown.size(), Vector3::new(3.0, 5.0, 2.0));
        assert_eq!(grown.center(), bounds.center());
    }
}
