use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::{Animation, ClipLength, KeyFrame};
use crate::assets::skeleton_asset::SkeletonSource;
use crate::errors::Result;
use crate::model::AnimatedModel;
use crate::settings::AnimationSettings;

/// One clip as written by an importer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationAsset {
    pub name: String,
    pub length: ClipLength,
    pub key_frames: Vec<KeyFrame>,
}

impl AnimationAsset {
    #[must_use]
    pub fn into_animation(self) -> Animation {
        Animation::new(self.name, self.key_frames, self.length)
    }
}

/// Skeleton plus clip set of one animated model, in serialized form.
///
/// Building validates everything up front: a defect anywhere aborts loading
/// of this model only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAsset {
    pub name: String,
    pub skeleton: SkeletonSource,
    #[serde(default)]
    pub animations: Vec<AnimationAsset>,
}

impl ModelAsset {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(BufReader::new(reader))?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Builds the skeleton, binds every clip and returns the shareable model.
    pub fn build(self, settings: AnimationSettings) -> Result<Arc<AnimatedModel>> {
        let skeleton = self.skeleton.build(&self.name)?;
        let mut model = AnimatedModel::new(&self.name, skeleton, settings)?;

        for asset in self.animations {
            model.add_animation(&asset.into_animation())?;
        }

        log::info!(
            "Loaded model '{}' ({} joints, {} animations)",
            model.name,
            model.joint_count(),
            model.animation_count()
        );

        Ok(Arc::new(model))
    }
}
