//! Bounding-box geometry for tracked entities
//!
//! Axis-aligned boxes in tracker coordinates, plus the containment,
//! overlap and distance measures used by hand-person assignment.

use nalgebra::Point2;
use num_traits::{Float, ToPrimitive};

// ============================================================================
// Bounding Box
// ============================================================================

/// An axis-aligned bounding box `[x_min, y_min, x_max, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox<T = f64> {
    /// Left edge
    pub x_min: T,
    /// Top edge
    pub y_min: T,
    /// Right edge
    pub x_max: T,
    /// Bottom edge
    pub y_max: T,
}

impl<T: Float> BoundingBox<T> {
    /// Creates a box from its four edges.
    #[inline]
    pub const fn new(x_min: T, y_min: T, x_max: T, y_max: T) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Creates a box from `[x_min, y_min, x_max, y_max]`.
    #[inline]
    pub fn from_array(coords: [T; 4]) -> Self {
        Self::new(coords[0], coords[1], coords[2], coords[3])
    }

    /// Creates a box from the two corner points a tracker estimate carries.
    #[inline]
    pub fn from_corners(top_left: [T; 2], bottom_right: [T; 2]) -> Self {
        Self::new(top_left[0], top_left[1], bottom_right[0], bottom_right[1])
    }

    /// Returns the edges as `[x_min, y_min, x_max, y_max]`.
    #[inline]
    pub fn to_array(&self) -> [T; 4] {
        [self.x_min, self.y_min, self.x_max, self.y_max]
    }

    /// Pixel-inclusive area, `(w + 1) * (h + 1)`.
    #[inline]
    pub fn inclusive_area(&self) -> T {
        (self.x_max - self.x_min + T::one()) * (self.y_max - self.y_min + T::one())
    }

    /// Integer midpoint of the box.
    ///
    /// Each coordinate is `trunc((max - min) / 2 + min)`. Returns `None` if a
    /// coordinate is not finite or does not fit in an `i64`.
    pub fn center(&self) -> Option<Point2<i64>> {
        let two = T::one() + T::one();
        let cx = ((self.x_max - self.x_min) / two + self.x_min).trunc();
        let cy = ((self.y_max - self.y_min) / two + self.y_min).trunc();
        Some(Point2::new(cx.to_i64()?, cy.to_i64()?))
    }

    /// Returns true if `self` lies inside `outer` once `outer` has been grown
    /// by `margin_x` horizontally and `margin_y` vertically on every side.
    pub fn is_inside(&self, outer: &BoundingBox<T>, margin_x: T, margin_y: T) -> bool {
        self.x_min >= outer.x_min - margin_x
            && self.y_min >= outer.y_min - margin_y
            && self.x_max <= outer.x_max + margin_x
            && self.y_max <= outer.y_max + margin_y
    }

    /// Intersection over union with the pixel-inclusive convention.
    ///
    /// Disjoint boxes score 0; identical boxes score 1.
    pub fn iou(&self, other: &BoundingBox<T>) -> T {
        let x_a = self.x_min.max(other.x_min);
        let y_a = self.y_min.max(other.y_min);
        let x_b = self.x_max.min(other.x_max);
        let y_b = self.y_max.min(other.y_max);

        let inter_w = (x_b - x_a + T::one()).max(T::zero());
        let inter_h = (y_b - y_a + T::one()).max(T::zero());
        let intersection = inter_w * inter_h;

        let union = self.inclusive_area() + other.inclusive_area() - intersection;
        if union <= T::zero() {
            return T::zero();
        }
        intersection / union
    }
}

// ============================================================================
// Points
// ============================================================================

/// Euclidean distance between two integer points.
#[inline]
pub fn euclidean_distance(a: &Point2<i64>, b: &Point2<i64>) -> f64 {
    nalgebra::distance(&to_real(a), &to_real(b))
}

/// Converts an integer pixel location into a real-valued point.
#[inline]
pub fn to_real(p: &Point2<i64>) -> Point2<f64> {
    Point2::new(
        p.x.to_f64().unwrap_or(f64::NAN),
        p.y.to_f64().unwrap_or(f64::NAN),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(c: [f64; 4]) -> BoundingBox<f64> {
        BoundingBox::from_array(c)
    }

    #[test]
    fn test_center_truncates() {
        let b = bbox([0.0, 0.0, 11.0, 5.0]);
        assert_eq!(b.center(), Some(Point2::new(5, 2)));

        let b = bbox([10.0, 10.0, 20.0, 20.0]);
        assert_eq!(b.center(), Some(Point2::new(15, 15)));
    }

    #[test]
    fn test_center_non_finite() {
        let b = bbox([0.0, 0.0, f64::NAN, 5.0]);
        assert_eq!(b.center(), None);
    }

    #[test]
    fn test_equal_box_is_inside_for_any_margin() {
        let b = bbox([12.5, 40.0, 90.0, 300.0]);
        for margin in [0.0, 1.0, 35.0, 1000.0] {
            assert!(b.is_inside(&b, margin, margin), "margin {}", margin);
        }
    }

    #[test]
    fn test_margin_extends_outer_box() {
        let person = bbox([100.0, 100.0, 200.0, 200.0]);
        let hand = bbox([70.0, 120.0, 90.0, 140.0]);

        assert!(!hand.is_inside(&person, 0.0, 0.0));
        assert!(hand.is_inside(&person, 35.0, 35.0));
        assert!(!hand.is_inside(&person, 29.0, 35.0));
        // Vertical margin does not help a horizontal overhang
        assert!(!hand.is_inside(&person, 0.0, 100.0));
    }

    #[test]
    fn test_iou_identical_and_disjoint() {
        let a = bbox([0.0, 0.0, 9.0, 9.0]);
        let b = bbox([50.0, 50.0, 60.0, 60.0]);
        assert!((a.iou(&a) - 1.0).abs() < 1e-12);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        // Inclusive areas: 100 each, intersection 5x10 = 50
        let a = bbox([0.0, 0.0, 9.0, 9.0]);
        let b = bbox([5.0, 0.0, 14.0, 9.0]);
        let iou = a.iou(&b);
        assert!((iou - 50.0 / 150.0).abs() < 1e-12, "got {}", iou);
        assert!((iou - b.iou(&a)).abs() < 1e-12);
    }

    #[test]
    fn test_euclidean_distance() {
        let d = euclidean_distance(&Point2::new(0, 0), &Point2::new(3, 4));
        assert!((d - 5.0).abs() < 1e-12);
    }
}
