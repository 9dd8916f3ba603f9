use glam::{Quat, Vec3};

use crate::math::quaternion;

/// Values that can be blended between two keyframes.
///
/// `t` is the progression between the bracketing keyframes, in `[0, 1]`.
pub trait Interpolatable: Copy {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    /// Shortest-arc SLERP; see [`quaternion::slerp`].
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        quaternion::slerp(start, end, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_and_vector_blend_linearly() {
        assert!((f32::interpolate_linear(2.0, 6.0, 0.25) - 3.0).abs() < 1e-6);
        let v = Vec3::interpolate_linear(Vec3::ZERO, Vec3::new(2.0, -4.0, 8.0), 0.5);
        assert!((v - Vec3::new(1.0, -2.0, 4.0)).length() < 1e-6);
    }
}
