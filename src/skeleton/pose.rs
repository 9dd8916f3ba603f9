use glam::Mat4;

use super::{JointIndex, Skeleton};

/// Per-instance joint state: the current skinning matrix of every joint.
///
/// A freshly created pose is the bind pose (all identity), which leaves the
/// mesh undeformed. [`Skeleton::compose_pose`] overwrites every slot each
/// time an animator updates.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonPose {
    current: Vec<Mat4>,
}

impl SkeletonPose {
    #[must_use]
    pub fn bind_pose(joint_count: usize) -> Self {
        Self {
            current: vec![Mat4::IDENTITY; joint_count],
        }
    }

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.current.len()
    }

    /// Overwrites the current pose of one joint.
    ///
    /// The matrix is expected to be a model-space affine transform; it is not
    /// validated.
    #[inline]
    pub fn set_pose(&mut self, index: JointIndex, matrix: Mat4) {
        self.current[index] = matrix;
    }

    #[inline]
    #[must_use]
    pub fn current_pose(&self, index: JointIndex) -> Option<&Mat4> {
        self.current.get(index)
    }

    /// Resets every joint to the bind pose.
    pub fn reset(&mut self) {
        self.current.fill(Mat4::IDENTITY);
    }

    /// The skinning palette, indexed by joint index.
    #[inline]
    #[must_use]
    pub fn skinning_matrices(&self) -> &[Mat4] {
        &self.current
    }

    /// The skinning palette as raw bytes, ready for a uniform or storage buffer.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.current)
    }

    /// Walks the skeleton and gathers every joint's current pose into a new
    /// array of `joint_count` matrices.
    #[must_use]
    pub fn collect_skinning_matrices(&self, skeleton: &Skeleton) -> Vec<Mat4> {
        let mut out = vec![Mat4::IDENTITY; skeleton.joint_count()];
        self.collect_into(skeleton, &mut out);
        out
    }

    /// Same as [`collect_skinning_matrices`](Self::collect_skinning_matrices),
    /// writing into caller-owned storage.
    ///
    /// # Panics
    ///
    /// If `out` is not exactly `joint_count` long, if this pose was created for
    /// a different joint count, or if a joint index is out of range or
    /// repeated. These are asset-build defects, not runtime conditions.
    pub fn collect_into(&self, skeleton: &Skeleton, out: &mut [Mat4]) {
        let count = skeleton.joint_count();
        assert_eq!(out.len(), count, "skinning palette size mismatch");
        assert_eq!(self.current.len(), count, "pose belongs to another skeleton");

        let mut written = vec![false; count];
        for &i in skeleton.traversal_order() {
            let index = skeleton.joints()[i].index;
            assert!(index < count, "joint index {index} out of range ({count})");
            assert!(!written[index], "joint index {index} used twice");
            written[index] = true;
            out[index] = self.current[index];
        }
    }
}
