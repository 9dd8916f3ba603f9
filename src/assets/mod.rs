//! Asset Descriptions
//!
//! Serializable forms of skeletons and clips, as produced by an external
//! importer. Nothing here parses third-party scene formats; an importer
//! converts those into [`ModelAsset`] (or calls the skeleton and clip
//! constructors directly).
//!
//! ```rust,ignore
//! let model = ModelAsset::from_path("assets/character.json")?
//!     .build(AnimationSettings::default())?;
//! let mut animator = Animator::new(model);
//! animator.play_named("walk")?;
//! ```

pub mod model_asset;
pub mod skeleton_asset;

pub use model_asset::{AnimationAsset, ModelAsset};
pub use skeleton_asset::{SkeletonAsset, SkeletonSource};
