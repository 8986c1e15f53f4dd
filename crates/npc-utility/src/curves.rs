//! Response curves for shaping raw inputs into scores.

/// Position of `v` within `[a, b]`, clamped to `[0, 1]`. A degenerate range yields `0`.
pub fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    if (b - a).abs() <= f32::EPSILON * a.abs().max(b.abs()).max(1.0) {
        return 0.0;
    }
    ramp((v - a) / (b - a))
}

/// Clamp to `[0, 1]`. NaN maps to `0`, which reads as "not eligible".
pub fn ramp(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

