//! Bed and exclusion-zone geometry.
//!
//! Coordinates are in bed units with the origin at the lower-left corner of the bed,
//! `x` along the bed length and `y` along the bed width.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular garden bed spanning `[0, length] x [0, width]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bed {
    /// Extent along the x axis.
    pub length: f32,
    /// Extent along the y axis.
    pub width: f32,
}

impl Bed {
    pub fn new(length: f32, width: f32) -> Self {
        Self { length, width }
    }

    /// Bed size as a vector `(length, width)`.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.length, self.width)
    }

    /// Returns `true` if `point` lies strictly inside the bed shrunk by `buffer` on every side.
    #[inline]
    pub fn interior_contains(&self, point: Vec2, buffer: f32) -> bool {
        point.x > buffer
            && point.x < self.length - buffer
            && point.y > buffer
            && point.y < self.width - buffer
    }

    /// Lower-left and upper-right corners of the buffered interior.
    ///
    /// The rectangle is inverted (min > max) when the buffer consumes the bed.
    pub fn interior_bounds(&self, buffer: f32) -> (Vec2, Vec2) {
        (
            Vec2::splat(buffer),
            Vec2::new(self.length - buffer, self.width - buffer),
        )
    }
}

/// A circular region in which nothing may be planted.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionZone {
    pub center: Vec2,
    pub radius: f32,
}

impl ExclusionZone {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Returns `true` if `point` is inside or on the boundary of the circle.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.radius
    }

    /// Returns `true` if the circle covers the whole axis-aligned rectangle `[min, max]`.
    pub fn covers_rect(&self, min: Vec2, max: Vec2) -> bool {
        [
            min,
            max,
            Vec2::new(min.x, max.y),
            Vec2::new(max.x, min.y),
        ]
        .into_iter()
        .all(|corner| self.contains(corner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_contains_is_strict() {
        let bed = Bed::new(10.0, 6.0);
        assert!(bed.interior_contains(Vec2::new(5.0, 3.0), 1.0));
        assert!(!bed.interior_contains(Vec2::new(1.0, 3.0), 1.0));
        assert!(!bed.interior_contains(Vec2::new(9.0, 3.0), 1.0));
        assert!(!bed.interior_contains(Vec2::new(5.0, 1.0), 1.0));
        assert!(!bed.interior_contains(Vec2::new(5.0, 5.0), 1.0));
    }

    #[test]
    fn interior_is_empty_when_buffer_reaches_center() {
        let bed = Bed::new(10.0, 6.0);
        assert!(!bed.interior_contains(Vec2::new(5.0, 3.0), 3.0));
        let (min, max) = bed.interior_bounds(4.0);
        assert!(min.y > max.y);
    }

    #[test]
    fn exclusion_contains_boundary_point() {
        let zone = ExclusionZone::new(Vec2::new(0.0, 0.0), 5.0);
        assert!(zone.contains(Vec2::new(3.0, 4.0)));
        assert!(zone.contains(Vec2::ZERO));
        assert!(!zone.contains(Vec2::new(3.0, 4.1)));
    }

    #[test]
    fn covers_rect_checks_every_corner() {
        let zone = ExclusionZone::new(Vec2::new(5.0, 5.0), 7.1);
        assert!(zone.covers_rect(Vec2::ZERO, Vec2::new(10.0, 10.0)));
        let zone = ExclusionZone::new(Vec2::new(5.0, 5.0), 7.0);
        assert!(!zone.covers_rect(Vec2::ZERO, Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn extent_is_length_by_width() {
        assert_eq!(Bed::new(72.0, 36.0).extent(), Vec2::new(72.0, 36.0));
    }
}
