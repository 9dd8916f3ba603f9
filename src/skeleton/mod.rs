//! Skeleton Hierarchy
//!
//! The skeleton is an arena of [`Joint`]s addressed by their palette index.
//! Construction validates the hierarchy once (single root, contiguous unique
//! indices, no cycles, unique names) so that per-frame code can walk it
//! without any checks:
//!
//! - [`Skeleton::traversal_order`] is a precomputed pre-order walk, so every
//!   parent is visited before its children.
//! - [`Skeleton::compose_pose`] turns parent-relative joint transforms into
//!   skinning matrices in a single pass over that order.
//!
//! The mutable per-frame state is kept apart in [`SkeletonPose`], which lets
//! many entities share one immutable `Skeleton`.

mod joint;
mod pose;

pub use joint::{Joint, JointIndex, JointNode};
pub use pose::SkeletonPose;

use glam::{Affine3A, Mat4};
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::errors::{AnimationError, Result};

#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: Uuid,
    pub name: String,

    // joints[i].index == i
    joints: Vec<Joint>,
    root: JointIndex,

    // Pre-order walk from the root: parents always precede their children.
    traversal: Vec<JointIndex>,

    // Parent-relative bind transforms, used for joints a clip does not animate.
    bind_locals: Vec<Affine3A>,

    name_lookup: FxHashMap<String, JointIndex>,
}

impl Skeleton {
    /// Builds a skeleton from the rooted tree handed over by an importer.
    pub fn from_hierarchy(name: &str, root: JointNode) -> Result<Self> {
        // Flatten with an explicit stack; record (node, parent) pairs.
        let mut flat: Vec<(JointNode, Option<JointIndex>)> = Vec::new();
        let mut stack = vec![(root, None)];

        while let Some((mut node, parent)) = stack.pop() {
            let children = std::mem::take(&mut node.children);
            let index = node.index;
            for child in children.into_iter().rev() {
                stack.push((child, Some(index)));
            }
            flat.push((node, parent));
        }

        let count = flat.len();
        let mut slots: Vec<Option<Joint>> = vec![None; count];

        for (node, parent) in &flat {
            if node.index >= count {
                return Err(AnimationError::JointIndexOutOfRange {
                    index: node.index,
                    count,
                });
            }
            if slots[node.index].is_some() {
                return Err(AnimationError::DuplicateJointIndex(node.index));
            }
            let mut joint = Joint::new(
                node.index,
                node.name.clone(),
                Affine3A::from_mat4(node.inverse_bind_transform),
            );
            joint.parent = *parent;
            slots[node.index] = Some(joint);
        }

        // Every index in [0, count) is now filled exactly once.
        let mut joints: Vec<Joint> = slots.into_iter().flatten().collect();

        // Children in authoring order (pre-order visit order of the tree).
        for (node, parent) in &flat {
            if let Some(parent) = parent {
                joints[*parent].children.push(node.index);
            }
        }

        Self::build(name, joints)
    }

    /// Builds a skeleton from flat per-joint arrays.
    ///
    /// `parents[i]` is the index of joint `i`'s parent, or any negative value
    /// for the root.
    pub fn from_parents(
        name: &str,
        joint_names: &[String],
        parents: &[i32],
        inverse_bind_transforms: &[Affine3A],
    ) -> Result<Self> {
        let count = joint_names.len();
        if parents.len() != count || inverse_bind_transforms.len() != count {
            return Err(AnimationError::MismatchedJointData {
                names: count,
                parents: parents.len(),
                inverse_binds: inverse_bind_transforms.len(),
            });
        }

        let mut joints: Vec<Joint> = joint_names
            .iter()
            .zip(inverse_bind_transforms)
            .enumerate()
            .map(|(i, (name, ibm))| Joint::new(i, name.clone(), *ibm))
            .collect();

        for (i, &parent) in parents.iter().enumerate() {
            if parent < 0 {
                continue;
            }
            let p = parent as usize;
            if p >= count || p == i {
                return Err(AnimationError::InvalidParent { joint: i, parent });
            }
            joints[i].parent = Some(p);
            joints[p].children.push(i);
        }

        Self::build(name, joints)
    }

    fn build(name: &str, joints: Vec<Joint>) -> Result<Self> {
        if joints.is_empty() {
            return Err(AnimationError::EmptySkeleton);
        }

        let mut root = None;
        for joint in joints.iter().filter(|j| j.is_root()) {
            match root {
                None => root = Some(joint.index),
                Some(first) => {
                    return Err(AnimationError::MultipleRoots {
                        first,
                        second: joint.index,
                    });
                }
            }
        }
        let root = root.ok_or(AnimationError::NoRoot)?;

        let traversal = pre_order(&joints, root);
        if traversal.len() != joints.len() {
            let mut visited = vec![false; joints.len()];
            for &i in &traversal {
                visited[i] = true;
            }
            let orphan = visited.iter().position(|v| !v).unwrap_or(0);
            return Err(AnimationError::DisconnectedJoint(orphan));
        }

        let mut name_lookup = FxHashMap::default();
        name_lookup.reserve(joints.len());
        for joint in &joints {
            if name_lookup.insert(joint.name.clone(), joint.index).is_some() {
                return Err(AnimationError::DuplicateJointName(joint.name.clone()));
            }
        }

        let bind_locals = joints
            .iter()
            .map(|joint| {
                let bind_model = joint.inverse_bind_transform().inverse();
                match joint.parent {
                    Some(p) => *joints[p].inverse_bind_transform() * bind_model,
                    None => bind_model,
                }
            })
            .collect();

        let skeleton = Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            joints,
            root,
            traversal,
            bind_locals,
            name_lookup,
        };

        log::info!(
            "Built skeleton '{}' ({} joints, root '{}')",
            skeleton.name,
            skeleton.joint_count(),
            skeleton.joints[root].name
        );

        Ok(skeleton)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Joint {
        &self.joints[self.root]
    }

    #[inline]
    #[must_use]
    pub fn joint(&self, index: JointIndex) -> Option<&Joint> {
        self.joints.get(index)
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Resolves a joint name to its palette index.
    #[inline]
    #[must_use]
    pub fn find_joint(&self, name: &str) -> Option<JointIndex> {
        self.name_lookup.get(name).copied()
    }

    /// Parent-before-children visiting order.
    #[inline]
    #[must_use]
    pub fn traversal_order(&self) -> &[JointIndex] {
        &self.traversal
    }

    /// Parent-relative bind pose of every joint, indexed by joint index.
    #[inline]
    #[must_use]
    pub fn bind_local_transforms(&self) -> &[Affine3A] {
        &self.bind_locals
    }

    /// Number of joints on the longest root-to-leaf path (root only = 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depths = vec![0usize; self.joints.len()];
        let mut max = 0;
        for &i in &self.traversal {
            let d = self.joints[i].parent.map_or(1, |p| depths[p] + 1);
            depths[i] = d;
            max = max.max(d);
        }
        max
    }

    // ========================================================================
    // Pose Composition
    // ========================================================================

    /// Composes parent-relative joint transforms into skinning matrices.
    ///
    /// For every joint, in pre-order:
    /// 1. `model = parent_model * local` (the root uses `local` as-is),
    /// 2. `skinning = model * inverse_bind`, written into `pose`.
    ///
    /// `locals` and `model_space` are indexed by joint index and must hold
    /// [`joint_count`](Self::joint_count) entries. `model_space` is scratch
    /// storage; after the call it holds every joint's model-space transform.
    pub fn compose_pose(
        &self,
        locals: &[Affine3A],
        model_space: &mut [Affine3A],
        pose: &mut SkeletonPose,
    ) {
        debug_assert_eq!(locals.len(), self.joints.len());
        debug_assert_eq!(model_space.len(), self.joints.len());

        for &i in &self.traversal {
            let joint = &self.joints[i];
            let model = match joint.parent {
                Some(p) => model_space[p] * locals[i],
                None => locals[i],
            };
            model_space[i] = model;
            pose.set_pose(i, Mat4::from(model * *joint.inverse_bind_transform()));
        }
    }
}

fn pre_order(joints: &[Joint], root: JointIndex) -> Vec<JointIndex> {
    let mut order = Vec::with_capacity(joints.len());
    let mut visited = vec![false; joints.len()];
    let mut stack = vec![root];

    while let Some(i) = stack.pop() {
        if visited[i] {
            continue;
        }
        visited[i] = true;
        order.push(i);
        for &child in joints[i].children.iter().rev() {
            stack.push(child);
        }
    }

    order
}
