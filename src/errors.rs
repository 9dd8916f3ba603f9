//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`AnimationError`] covers every failure that can be
//! detected while a skeleton, a clip or a whole model asset is being built,
//! plus the clip lookup failures of the playback API:
//! - Skeleton integrity errors (broken hierarchy, bad joint indices)
//! - Clip integrity errors (empty clips, unordered keyframes, unknown joints)
//! - Lookup errors (unknown clip name or stale clip handle)
//! - Asset I/O and JSON decoding errors
//!
//! Per-frame operations (`Animator::update`, pose composition) never fail:
//! numerical edge cases are handled by local fallback rules instead.
//!
//! # Usage
//!
//! ```rust,ignore
//! use armature::errors::{AnimationError, Result};
//!
//! fn load() -> Result<()> {
//!     let model = armature::assets::ModelAsset::from_json_str(text)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for skeleton, clip and model construction.
#[derive(Error, Debug)]
pub enum AnimationError {
    // ========================================================================
    // Skeleton Integrity Errors
    // ========================================================================
    /// A skeleton must contain at least one joint.
    #[error("Skeleton has no joints")]
    EmptySkeleton,

    /// A joint index lies outside `[0, joint_count)`.
    #[error("Joint index {index} out of range (joint count: {count})")]
    JointIndexOutOfRange {
        /// The offending index
        index: usize,
        /// Number of joints in the skeleton
        count: usize,
    },

    /// Two joints claim the same index.
    #[error("Duplicate joint index: {0}")]
    DuplicateJointIndex(usize),

    /// Two joints share a name, so animation channels cannot be bound unambiguously.
    #[error("Duplicate joint name: {0}")]
    DuplicateJointName(String),

    /// A parent index refers to a joint that does not exist or to the joint itself.
    #[error("Joint {joint} has invalid parent index {parent}")]
    InvalidParent {
        /// Joint carrying the bad parent reference
        joint: usize,
        /// The invalid parent index
        parent: i32,
    },

    /// The per-joint arrays of a flat skeleton description differ in length.
    #[error(
        "Mismatched joint data: {names} names, {parents} parents, \
         {inverse_binds} inverse bind matrices"
    )]
    MismatchedJointData {
        /// Number of joint names
        names: usize,
        /// Number of parent indices
        parents: usize,
        /// Number of inverse bind matrices
        inverse_binds: usize,
    },

    /// No joint without a parent was found.
    #[error("Skeleton has no root joint")]
    NoRoot,

    /// More than one joint has no parent.
    #[error("Skeleton has more than one root joint ({first} and {second})")]
    MultipleRoots {
        /// First root found
        first: usize,
        /// Second root found
        second: usize,
    },

    /// A joint cannot be reached from the root (the parent chain contains a cycle).
    #[error("Joint {0} is not reachable from the root")]
    DisconnectedJoint(usize),

    /// The skeleton does not fit into the skinning palette.
    #[error("Skeleton has {count} joints, maximum supported is {max}")]
    TooManyJoints {
        /// Joints in the skeleton
        count: usize,
        /// Configured palette size
        max: usize,
    },

    // ========================================================================
    // Clip Integrity Errors
    // ========================================================================
    /// A clip must contain at least one keyframe.
    #[error("Animation '{0}' has no keyframes")]
    EmptyClip(String),

    /// A clip animates a joint that the skeleton does not have.
    #[error("Animation '{clip}' references unknown joint '{joint}'")]
    UnknownJoint {
        /// Clip name
        clip: String,
        /// Joint name that could not be resolved
        joint: String,
    },

    /// Keyframe timestamps decrease somewhere in the clip.
    #[error("Animation '{clip}': keyframe {index} is earlier than its predecessor")]
    NonChronological {
        /// Clip name
        clip: String,
        /// Index of the first out-of-order keyframe
        index: usize,
    },

    /// A keyframe does not cover the same joint set as the first keyframe.
    #[error("Animation '{clip}': keyframe {index} does not cover the same joints as keyframe 0")]
    InconsistentKeyFrame {
        /// Clip name
        clip: String,
        /// Index of the inconsistent keyframe
        index: usize,
    },

    /// The clip length is negative, not finite, or shorter than its last keyframe.
    #[error("Animation '{clip}' has invalid length {length}")]
    InvalidLength {
        /// Clip name
        clip: String,
        /// Length in seconds
        length: f32,
    },

    /// Clip names must be unique within a model.
    #[error("Duplicate animation name: {0}")]
    DuplicateClipName(String),

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// No clip with this name exists in the model.
    #[error("Unknown animation: {0}")]
    UnknownClip(String),

    /// The clip handle does not belong to this model.
    #[error("Invalid animation handle")]
    InvalidClipHandle,

    // ========================================================================
    // Asset I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, AnimationError>`.
pub type Result<T> = std::result::Result<T, AnimationError>;
