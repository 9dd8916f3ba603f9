use glam::{Affine3A, Mat4};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Position of a joint in the flat skinning palette.
pub type JointIndex = usize;

/// A node of the skeleton hierarchy.
///
/// Joints live in a flat arena owned by [`Skeleton`](super::Skeleton):
/// `joints[i].index == i`, parents are referenced by index and the parent
/// owns the ordered list of its children. The structure is immutable once the
/// skeleton is built; the per-frame pose lives in
/// [`SkeletonPose`](super::SkeletonPose).
#[derive(Debug, Clone)]
pub struct Joint {
    pub index: JointIndex,
    /// Identifier used to bind animation channels to this joint.
    pub name: String,
    pub parent: Option<JointIndex>,
    pub children: SmallVec<[JointIndex; 4]>,

    // Maps model-space bind-pose geometry into this joint's local space.
    // Set once at build time.
    inverse_bind_transform: Affine3A,
}

impl Joint {
    pub(crate) fn new(index: JointIndex, name: String, inverse_bind_transform: Affine3A) -> Self {
        Self {
            index,
            name,
            parent: None,
            children: SmallVec::new(),
            inverse_bind_transform,
        }
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_transform(&self) -> &Affine3A {
        &self.inverse_bind_transform
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Tree-shaped joint description, as produced by an asset importer.
///
/// Each node carries its palette index, its name, its inverse bind transform
/// and its children. [`Skeleton::from_hierarchy`](super::Skeleton::from_hierarchy)
/// flattens it into the joint arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointNode {
    pub index: JointIndex,
    pub name: String,
    #[serde(default = "identity_matrix")]
    pub inverse_bind_transform: Mat4,
    #[serde(default)]
    pub children: Vec<JointNode>,
}

fn identity_matrix() -> Mat4 {
    Mat4::IDENTITY
}

impl JointNode {
    #[must_use]
    pub fn new(index: JointIndex, name: impl Into<String>, inverse_bind_transform: Mat4) -> Self {
        Self {
            index,
            name: name.into(),
            inverse_bind_transform,
            children: Vec::new(),
        }
    }

    /// Builder-style child insertion.
    #[must_use]
    pub fn with_child(mut self, child: JointNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: JointNode) {
        self.children.push(child);
    }
}
