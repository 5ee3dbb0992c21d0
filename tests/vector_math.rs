//! Lateral vector helpers and sign handling.
use glam::Vec3;
use leashline::vector_math::{clamp_length, lateral, Sign};

#[test]
fn clamp_returns_zero_for_nan() {
    let result = clamp_length(Vec3::new(f32::NAN, 1.0, 0.0), 5.0);
    assert_eq!(result, Vec3::ZERO);
}

#[test]
fn clamp_scales_long_vectors() {
    let result = clamp_length(Vec3::new(3.0, 0.0, 4.0), 1.0);
    assert!((result - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
}

#[test]
fn lateral_drops_other_axes() {
    assert_eq!(lateral(Vec3::new(2.0, 3.0, -4.0)), Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn flipping_a_sign_twice_is_identity() {
    for sign in [Sign::Negative, Sign::Zero, Sign::Positive] {
        assert_eq!(sign.flipped().flipped(), sign);
    }
}
