use serde::{Deserialize, Serialize};

use crate::animation::joint_transform::JointTransform;
use crate::animation::keyframe::KeyFrame;
use crate::skeleton::JointIndex;

/// Duration of a clip as delivered by an importer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipLength {
    /// Authored directly in seconds.
    Seconds(f32),
    /// Authoring-tool ticks plus the tool's tick rate.
    Ticks { duration: f32, ticks_per_second: f32 },
}

impl ClipLength {
    /// Normalizes to seconds.
    ///
    /// A tick rate of zero or below means the tool did not record one; the
    /// raw duration is then taken as seconds.
    #[must_use]
    pub fn seconds(self) -> f32 {
        match self {
            Self::Seconds(seconds) => seconds,
            Self::Ticks {
                duration,
                ticks_per_second,
            } if ticks_per_second > 0.0 => duration / ticks_per_second,
            Self::Ticks { duration, .. } => duration,
        }
    }
}

impl From<f32> for ClipLength {
    fn from(seconds: f32) -> Self {
        Self::Seconds(seconds)
    }
}

/// A named, time-bounded sequence of keyframes, as imported.
///
/// The constructor only normalizes the length; ordering and coverage are
/// checked when the clip is bound to a skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    name: String,
    key_frames: Vec<KeyFrame>,
    length: f32,
}

impl Animation {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        key_frames: Vec<KeyFrame>,
        length: impl Into<ClipLength>,
    ) -> Self {
        Self {
            name: name.into(),
            key_frames,
            length: length.into().seconds(),
        }
    }

    /// Clip whose duration is expressed in authoring-tool ticks.
    #[must_use]
    pub fn from_ticks(
        name: impl Into<String>,
        key_frames: Vec<KeyFrame>,
        duration: f32,
        ticks_per_second: f32,
    ) -> Self {
        Self::new(
            name,
            key_frames,
            ClipLength::Ticks {
                duration,
                ticks_per_second,
            },
        )
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn key_frames(&self) -> &[KeyFrame] {
        &self.key_frames
    }

    /// Total duration in seconds.
    #[inline]
    #[must_use]
    pub fn length(&self) -> f32 {
        self.length
    }
}

/// A clip resolved against one skeleton, ready for playback.
///
/// Keyframe data is stored frame-major in one flat array: frame `f` holds the
/// transforms of [`channels`](Self::channels) at
/// `poses[f * channels.len()..(f + 1) * channels.len()]`. Built by
/// [`Binder::bind`](crate::animation::Binder::bind); immutable and shared by
/// every animator that plays it.
#[derive(Debug, Clone)]
pub struct SkeletalClip {
    pub(crate) name: String,
    pub(crate) length: f32,
    pub(crate) times: Vec<f32>,
    pub(crate) channels: Vec<JointIndex>,
    pub(crate) poses: Vec<JointTransform>,
}

impl SkeletalClip {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Keyframe timestamps, non-decreasing.
    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn key_frame_count(&self) -> usize {
        self.times.len()
    }

    /// Animated joints, ascending by index.
    #[inline]
    #[must_use]
    pub fn channels(&self) -> &[JointIndex] {
        &self.channels
    }

    /// Transforms of every channel at keyframe `index`, in channel order.
    #[inline]
    #[must_use]
    pub fn frame(&self, index: usize) -> &[JointTransform] {
        let width = self.channels.len();
        &self.poses[index * width..(index + 1) * width]
    }
}
