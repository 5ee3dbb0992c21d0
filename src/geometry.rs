//! Axis-aligned extents used for avoidance, passage and collision checks.
use glam::Vec3;

/// Axis-aligned bounding box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Extent {
    /// Builds the extent of a box of `size` centred on `centre`.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use leashline::geometry::Extent;
    /// let e = Extent::from_centre(Vec3::new(1.0, 0.0, 4.0), Vec3::ONE);
    /// assert_eq!(e.min, Vec3::new(0.5, -0.5, 3.5));
    /// assert!((e.width() - 1.0).abs() < f32::EPSILON);
    /// ```
    #[must_use]
    pub fn from_centre(centre: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: centre - half,
            max: centre + half,
        }
    }

    /// Lateral width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Whether the lateral spans of `self` and `other` intersect.
    ///
    /// Touching edges count as overlapping.
    #[must_use]
    pub fn overlaps_lateral(&self, other: &Self) -> bool {
        !(self.min.x > other.max.x || self.max.x < other.min.x)
    }

    /// Whether the scroll-axis spans of `self` and `other` intersect.
    #[must_use]
    pub fn overlaps_scroll(&self, other: &Self) -> bool {
        !(self.min.z > other.max.z || self.max.z < other.min.z)
    }

    /// Whether the boxes touch in the lane plane. Height is ignored.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_lateral(other) && self.overlaps_scroll(other)
    }

    /// Whether the whole of `self` lies behind `other` on the scroll axis.
    #[must_use]
    pub fn is_behind(&self, other: &Self) -> bool {
        self.max.z < other.min.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn unit_at(x: f32, z: f32) -> Extent {
        Extent::from_centre(Vec3::new(x, 0.0, z), Vec3::ONE)
    }

    #[rstest]
    #[case::same_spot(0.0, 0.0, true)]
    #[case::touching(1.0, 0.0, true)]
    #[case::apart_laterally(1.01, 0.0, false)]
    #[case::apart_on_scroll(0.0, 1.01, false)]
    fn overlap_cases(#[case] x: f32, #[case] z: f32, #[case] expected: bool) {
        assert_eq!(unit_at(0.0, 0.0).overlaps(&unit_at(x, z)), expected);
    }

    #[test]
    fn behind_requires_full_clearance() {
        let agent = unit_at(0.0, 0.0);
        assert!(!unit_at(0.0, -0.9).is_behind(&agent));
        assert!(unit_at(0.0, -1.1).is_behind(&agent));
    }

    #[test]
    fn negative_sizes_are_normalised() {
        let e = Extent::from_centre(Vec3::ZERO, Vec3::new(-2.0, 1.0, 1.0));
        assert!((e.width() - 2.0).abs() < f32::EPSILON);
    }
}
