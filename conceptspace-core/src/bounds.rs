//! Axis-aligned bounding boxes

use crate::point::*;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
///
/// `min` holds the smallest coordinate on each axis and `max` the largest.
/// A box built from no points collapses to the origin, so callers never see
/// infinities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    /// Create a box from its two corners
    pub fn new(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// The degenerate box at the origin
    pub fn zero() -> Self {
        Self {
            min: Point3f::origin(),
            max: Point3f::origin(),
        }
    }

    /// Smallest box enclosing every point of the iterator
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3f>,
    {
        let mut iter = points.into_iter();
        let first = match iter.next() {
            Some(p) => *p,
            None => return Self::zero(),
        };

        let mut min = first;
        let mut max = first;
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Self { min, max }
    }

    /// Inclusive containment test on all six faces
    #[inline]
    pub fn contains_point(&self, p: &Point3f) -> bool {
        p.x >= self.min.x && p.x <= self.max.x
            && p.y >= self.min.y && p.y <= self.max.y
            && p.z >= self.min.z && p.z <= self.max.z
    }

    /// Edge lengths along each axis
    pub fn size(&self) -> Vector3f {
        self.max - self.min
    }

    /// Longest edge length
    pub fn max_extent(&self) -> f32 {
        self.size().max()
    }

    pub fn center(&self) -> Point3f {
        nalgebra::center(&self.min, &self.max)
    }

    /// Smallest box enclosing both `self` and `other`
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_points_give_zero_box() {
        let aabb = Aabb::from_points(std::iter::empty());
        assert_eq!(aabb, Aabb::zero());
        assert_eq!(aabb.max_extent(), 0.0);
    }

    #[test]
    fn test_from_points_and_size() {
        let points = vec![
            Point3f::new(1.0, -2.0, 0.5),
            Point3f::new(-1.0, 4.0, 0.0),
            Point3f::new(0.0, 0.0, 3.0),
        ];
        let aabb = Aabb::from_points(&points);

        assert_eq!(aabb.min, Point3f::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3f::new(1.0, 4.0, 3.0));
        assert_relative_eq!(aabb.size(), Vector3f::new(2.0, 6.0, 3.0));
        assert_relative_eq!(aabb.max_extent(), 6.0);
        assert_relative_eq!(aabb.center(), Point3f::new(0.0, 1.0, 1.5));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let aabb = Aabb::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        assert!(aabb.contains_point(&Point3f::new(0.0, 0.5, 1.0)));
        assert!(aabb.contains_point(&Point3f::new(1.0, 1.0, 1.0)));
        assert!(!aabb.contains_point(&Point3f::new(1.0001, 0.5, 0.5)));
        assert!(!aabb.contains_point(&Point3f::new(0.5, -0.1, 0.5)));
    }

    #[test]
    fn test_merge() {
        let a = Aabb::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3f::new(-1.0, 0.5, 0.5), Point3f::new(0.5, 2.0, 0.5));
        let merged = a.merge(&b);
        assert_eq!(merged.min, Point3f::new(-1.0, 0.0, 0.0));
        assert_eq!(merged.max, Point3f::new(1.0, 2.0, 1.0));
    }
}
