//! Animation System
//!
//! Keyframe clips and their per-entity playback:
//!
//! - [`Animation`] / [`KeyFrame`] / [`JointTransform`]: clip data as imported,
//!   joints addressed by name.
//! - [`Binder`]: resolves a clip against a skeleton into a [`SkeletalClip`]
//!   (joint indices, flat keyframe storage), checking its integrity.
//! - [`Animator`]: advances time, selects keyframe brackets, interpolates and
//!   composes the skeleton into skinning matrices.
//! - [`AnimationSystem`]: steps many animators per frame.

pub mod animator;
pub mod binder;
pub mod clip;
pub mod joint_transform;
pub mod keyframe;
pub mod sampler;
pub mod system;
pub mod values;

pub use animator::{Animator, PlaybackState};
pub use binder::Binder;
pub use clip::{Animation, ClipLength, SkeletalClip};
pub use joint_transform::JointTransform;
pub use keyframe::KeyFrame;
pub use sampler::{Bracket, KeyframeCursor, find_bracket, find_bracket_with_cursor};
pub use system::AnimationSystem;
pub use values::Interpolatable;
