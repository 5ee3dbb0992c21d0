//! Basic vector math helpers for lateral motion.
//! Small helpers for clamping magnitudes and reading the sign of a lateral
//! displacement.
use glam::Vec3;

/// Returns `vector` scaled down so its length does not exceed `max`.
///
/// Vectors already within `max` are returned unchanged. Non-finite input
/// and non-positive limits yield the zero vector.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use leashline::vector_math::clamp_length;
/// let clamped = clamp_length(Vec3::new(6.0, 0.0, 8.0), 5.0);
/// assert!((clamped.length() - 5.0).abs() < 1e-6);
/// assert_eq!(clamp_length(Vec3::X, 5.0), Vec3::X);
/// ```
#[must_use]
pub fn clamp_length(vector: Vec3, max: f32) -> Vec3 {
    if !vector.is_finite() || max.is_nan() || max <= 0.0 {
        return Vec3::ZERO;
    }
    vector.clamp_length_max(max)
}

/// Keeps only the lateral component of `vector`.
#[must_use]
pub const fn lateral(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, 0.0, 0.0)
}

/// Sign of a lateral quantity, with an explicit zero.
///
/// Used for the companion's side relative to the walker and for input and
/// gesture directions. `Zero` means "no preference".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    /// Toward the lane minimum.
    Negative,
    /// Exactly zero.
    #[default]
    Zero,
    /// Toward the lane maximum.
    Positive,
}

impl Sign {
    /// Classifies `value`. NaN is treated as zero.
    ///
    /// # Examples
    /// ```
    /// use leashline::vector_math::Sign;
    /// assert_eq!(Sign::of(-0.2), Sign::Negative);
    /// assert_eq!(Sign::of(0.0), Sign::Zero);
    /// assert_eq!(Sign::of(f32::NAN), Sign::Zero);
    /// ```
    #[must_use]
    pub fn of(value: f32) -> Self {
        if value > 0.0 {
            Self::Positive
        } else if value < 0.0 {
            Self::Negative
        } else {
            Self::Zero
        }
    }

    /// Returns the sign as `-1.0`, `0.0` or `1.0`.
    #[must_use]
    pub const fn as_f32(self) -> f32 {
        match self {
            Self::Negative => -1.0,
            Self::Zero => 0.0,
            Self::Positive => 1.0,
        }
    }

    /// Returns the opposite sign; zero stays zero.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Negative => Self::Positive,
            Self::Zero => Self::Zero,
            Self::Positive => Self::Negative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::inside(Vec3::new(1.0, 0.0, 0.0), 3.0, Vec3::new(1.0, 0.0, 0.0))]
    #[case::outside(Vec3::new(-9.0, 0.0, 0.0), 3.0, Vec3::new(-3.0, 0.0, 0.0))]
    #[case::nan(Vec3::new(f32::NAN, 0.0, 0.0), 3.0, Vec3::ZERO)]
    #[case::zero_limit(Vec3::new(1.0, 0.0, 0.0), 0.0, Vec3::ZERO)]
    fn clamp_length_cases(#[case] input: Vec3, #[case] max: f32, #[case] expected: Vec3) {
        let actual = clamp_length(input, max);
        assert!(
            (actual - expected).length() < 1e-6,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn lateral_drops_other_axes() {
        assert_eq!(lateral(Vec3::new(1.5, 2.0, -4.0)), Vec3::new(1.5, 0.0, 0.0));
    }

    #[rstest]
    #[case(Sign::Negative, Sign::Positive)]
    #[case(Sign::Zero, Sign::Zero)]
    #[case(Sign::Positive, Sign::Negative)]
    fn flipped_mirrors(#[case] input: Sign, #[case] expected: Sign) {
        assert_eq!(input.flipped(), expected);
        assert_eq!(input.flipped().as_f32(), -input.as_f32());
    }
}
