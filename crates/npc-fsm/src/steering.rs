//! Steering helpers. Pure vector math, no state.

use npc_core::Vec2;

/// Unit direction from `from` towards `to`, or zero when already there.
pub fn seek(from: Vec2, to: Vec2) -> Vec2 {
    let d = to - from;
    if d.length() < 0.001 {
        return Vec2::ZERO;
    }
    d.normalize_or_zero()
}

/// Velocity that carries `to` with `speed` without stepping past it within `dt`.
pub fn arrive(from: Vec2, to: Vec2, speed: f32, dt: f32) -> Vec2 {
    let distance = from.distance(to);
    let capped = if dt > 0.0 {
        speed.min(distance / dt)
    } else {
        speed
    };
    seek(from, to) * capped.max(0.0)
}

/// Unit direction that circles `center` at `radius`.
///
/// `sign` picks the winding (`1.0` counter-clockwise, `-1.0` clockwise). A radial term pulls the
/// agent back onto the ring when it drifts inside or outside it.
pub fn orbit(center: Vec2, from: Vec2, radius: f32, sign: f32) -> Vec2 {
    let offset = from - center;
    let dist = offset.length();
    if dist < 0.001 {
        // On top of the center: step straight out.
        return Vec2::new(1.0, 0.0);
    }
    let radial = offset / dist;
    let tangent = radial.perp() * sign.signum();
    let correction = ((radius - dist) / radius.max(1.0)).clamp(-1.0, 1.0);
    (tangent + radial * correction).normalize_or_zero()
}
