//! Animation Settings
//!
//! Runtime configuration shared by a model and every animator driving it.
//!
//! ```rust,ignore
//! use armature::AnimationSettings;
//!
//! // Defaults: 150-joint palette, normal speed.
//! let settings = AnimationSettings::default();
//!
//! // Partial JSON; missing fields keep their defaults.
//! let settings = AnimationSettings::from_json_str(r#"{ "max_joints": 64 }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Size of the skinning matrix array in the default skinning shader.
pub const DEFAULT_MAX_JOINTS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Largest skeleton a model may carry.
    pub max_joints: usize,
    /// Speed multiplier new animators start with.
    pub playback_speed: f32,
    /// Lower bound for the playback speed; speed never reaches zero.
    pub min_playback_speed: f32,
    /// Amount added or removed by `increase_speed` / `decrease_speed`.
    pub speed_step: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            max_joints: DEFAULT_MAX_JOINTS,
            playback_speed: 1.0,
            min_playback_speed: 0.01,
            speed_step: 0.01,
        }
    }
}

impl AnimationSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Clamps a requested speed to the configured minimum.
    #[must_use]
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        if speed.is_finite() {
            speed.max(self.min_playback_speed)
        } else {
            self.playback_speed
        }
    }
}
