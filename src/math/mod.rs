//! Math Utilities
//!
//! Rotation helpers layered on top of `glam`. The rest of the crate works
//! directly with `glam` types: [`glam::Affine3A`] for every joint-space
//! transform and [`glam::Mat4`] for the skinning palette.

pub mod quaternion;

pub use quaternion::{SLERP_LINEAR_THRESHOLD, nlerp, slerp};
