use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::values::Interpolatable;

/// Parent-relative rigid transform of one joint: a position and a unit
/// rotation. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointTransform {
    position: Vec3,
    rotation: Quat,
}

impl Default for JointTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl JointTransform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// `rotation` is normalized on construction.
    #[must_use]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
        }
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    #[must_use]
    pub fn from_rotation(rotation: Quat) -> Self {
        Self::new(Vec3::ZERO, rotation)
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// `translation(position) * rotation`, still in the parent joint's space.
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.position)
    }

    /// Blends two transforms: position linearly, rotation by shortest-arc SLERP.
    ///
    /// A progression of 0 returns `from` and 1 returns `to`, bit for bit.
    #[must_use]
    pub fn interpolate(from: &Self, to: &Self, progression: f32) -> Self {
        if progression <= 0.0 {
            return *from;
        }
        if progression >= 1.0 {
            return *to;
        }
        Self {
            position: Vec3::interpolate_linear(from.position, to.position, progression),
            rotation: Quat::interpolate_linear(from.rotation, to.rotation, progression),
        }
    }
}

impl Interpolatable for JointTransform {
    #[inline]
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        Self::interpolate(&start, &end, t)
    }
}
