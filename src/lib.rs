#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Skeletal animation core.
//!
//! Data flows one way per frame:
//!
//! ```text
//! Animator::update(dt)
//!   -> advance clip time (wraps modulo length)
//!   -> select (previous, next) keyframes
//!   -> interpolate each animated joint (lerp + shortest-arc SLERP)
//!   -> compose the hierarchy root-to-leaves, apply inverse bind transforms
//!   -> skinning palette, read by the renderer
//! ```

pub mod animation;
pub mod assets;
pub mod errors;
pub mod math;
pub mod model;
pub mod settings;
pub mod skeleton;

pub use animation::{
    Animation, AnimationSystem, Animator, ClipLength, JointTransform, KeyFrame, PlaybackState,
    SkeletalClip,
};
pub use assets::ModelAsset;
pub use errors::{AnimationError, Result};
pub use model::{AnimatedModel, ClipHandle, MeshKey};
pub use settings::AnimationSettings;
pub use skeleton::{Joint, JointIndex, JointNode, Skeleton, SkeletonPose};
