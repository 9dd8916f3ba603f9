use glam::{Quat, Vec4};

/// Above this cosine the two rotations are treated as coincident and blended
/// component-wise, since `sin(theta)` is too close to zero to divide by.
pub const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

/// Spherical linear interpolation along the shorter arc.
///
/// * `t = 0` returns `a` (normalized).
/// * `t = 1` returns `b` or its negation, which is the same rotation.
/// * Intermediate values rotate at constant angular speed.
///
/// If `a · b < 0` the quaternions lie in opposite hemispheres and `b` is negated
/// before interpolating, otherwise the blend would take the long way around.
#[must_use]
pub fn slerp(a: Quat, b: Quat, t: f32) -> Quat {
    let a = a.normalize();
    let mut b = b.normalize();

    let mut cos_theta = a.dot(b);
    if cos_theta < 0.0 {
        b = -b;
        cos_theta = -cos_theta;
    }

    if cos_theta > SLERP_LINEAR_THRESHOLD {
        return nlerp(a, b, t);
    }

    let theta = cos_theta.min(1.0).acos();
    let sin_theta = theta.sin();

    let weight_a = ((1.0 - t) * theta).sin() / sin_theta;
    let weight_b = (t * theta).sin() / sin_theta;

    let blended = Vec4::from(a) * weight_a + Vec4::from(b) * weight_b;
    Quat::from_vec4(blended).normalize()
}

/// Normalized linear blend of quaternion components.
///
/// Expects `a` and `b` in the same hemisphere; [`slerp`] takes care of that
/// before falling back to this.
#[must_use]
pub fn nlerp(a: Quat, b: Quat, t: f32) -> Quat {
    let blended = Vec4::from(a).lerp(Vec4::from(b), t);
    Quat::from_vec4(blended).normalize()
}
