use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::animation::joint_transform::JointTransform;

/// A snapshot of every animated joint's local transform at one instant.
///
/// Joints are keyed by name here; [`Binder`](crate::animation::Binder)
/// resolves the names to joint indices once, when the clip is attached to a
/// model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFrame {
    /// Seconds from the start of the clip.
    time_stamp: f32,
    pose: FxHashMap<String, JointTransform>,
}

impl KeyFrame {
    #[must_use]
    pub fn new(time_stamp: f32, pose: FxHashMap<String, JointTransform>) -> Self {
        Self { time_stamp, pose }
    }

    /// A keyframe with no joints yet; fill it with [`with_joint`](Self::with_joint).
    #[must_use]
    pub fn at(time_stamp: f32) -> Self {
        Self::new(time_stamp, FxHashMap::default())
    }

    /// Builder-style insertion of one joint's transform.
    #[must_use]
    pub fn with_joint(mut self, name: impl Into<String>, transform: JointTransform) -> Self {
        self.pose.insert(name.into(), transform);
        self
    }

    #[inline]
    #[must_use]
    pub fn time_stamp(&self) -> f32 {
        self.time_stamp
    }

    #[inline]
    #[must_use]
    pub fn pose(&self) -> &FxHashMap<String, JointTransform> {
        &self.pose
    }

    #[inline]
    #[must_use]
    pub fn joint_transform(&self, name: &str) -> Option<&JointTransform> {
        self.pose.get(name)
    }
}
