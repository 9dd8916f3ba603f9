use glam::{Affine3A, Mat4};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::skeleton::{JointNode, Skeleton};

/// Flat skeleton description: parallel per-joint arrays, with the parent of
/// each joint given by index (negative for the root).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonAsset {
    pub bone_names: Vec<String>,
    pub parent_indices: Vec<i32>,
    pub inverse_bind_matrices: Vec<Mat4>,
}

impl SkeletonAsset {
    pub fn build(&self, name: &str) -> Result<Skeleton> {
        let inverse_binds: Vec<Affine3A> = self
            .inverse_bind_matrices
            .iter()
            .map(|m| Affine3A::from_mat4(*m))
            .collect();
        Skeleton::from_parents(name, &self.bone_names, &self.parent_indices, &inverse_binds)
    }
}

/// Either shape an importer may hand over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkeletonSource {
    /// Rooted joint tree.
    Hierarchy(JointNode),
    /// Parallel arrays with parent indices.
    Flat(SkeletonAsset),
}

impl SkeletonSource {
    pub fn build(self, name: &str) -> Result<Skeleton> {
        match self {
            Self::Hierarchy(root) => Skeleton::from_hierarchy(name, root),
            Self::Flat(asset) => asset.build(name),
        }
    }
}
