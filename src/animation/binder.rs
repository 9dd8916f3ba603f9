use crate::animation::clip::{Animation, SkeletalClip};
use crate::animation::joint_transform::JointTransform;
use crate::errors::{AnimationError, Result};
use crate::skeleton::{JointIndex, Skeleton};

pub struct Binder;

impl Binder {
    /// Resolves a clip's joint names against `skeleton` and checks its
    /// integrity, producing an index-keyed [`SkeletalClip`].
    ///
    /// Fails when the clip is empty, its keyframes are not in chronological
    /// order, a keyframe covers a different joint set than the first one, a
    /// joint name is unknown to the skeleton, or the length is negative or
    /// shorter than the last keyframe.
    pub fn bind(clip: &Animation, skeleton: &Skeleton) -> Result<SkeletalClip> {
        let name = clip.name();
        let key_frames = clip.key_frames();

        let Some(first) = key_frames.first() else {
            return Err(AnimationError::EmptyClip(name.to_string()));
        };

        for (i, pair) in key_frames.windows(2).enumerate() {
            let (prev, next) = (pair[0].time_stamp(), pair[1].time_stamp());
            if next < prev || next.is_nan() || prev.is_nan() {
                return Err(AnimationError::NonChronological {
                    clip: name.to_string(),
                    index: i + 1,
                });
            }
        }

        let length = clip.length();
        let last_time = key_frames[key_frames.len() - 1].time_stamp();
        if !length.is_finite() || length < 0.0 || length < last_time {
            return Err(AnimationError::InvalidLength {
                clip: name.to_string(),
                length,
            });
        }

        // Channel set is defined by the first keyframe, ordered by joint index.
        let mut channels: Vec<(JointIndex, &str)> = Vec::with_capacity(first.pose().len());
        for joint_name in first.pose().keys() {
            let index = skeleton
                .find_joint(joint_name)
                .ok_or_else(|| AnimationError::UnknownJoint {
                    clip: name.to_string(),
                    joint: joint_name.clone(),
                })?;
            channels.push((index, joint_name.as_str()));
        }
        channels.sort_unstable_by_key(|&(index, _)| index);

        let width = channels.len();
        let mut poses = Vec::with_capacity(width * key_frames.len());
        let mut times = Vec::with_capacity(key_frames.len());

        for (i, key_frame) in key_frames.iter().enumerate() {
            if key_frame.pose().len() != width {
                return Err(AnimationError::InconsistentKeyFrame {
                    clip: name.to_string(),
                    index: i,
                });
            }
            for &(_, joint_name) in &channels {
                let transform = key_frame.joint_transform(joint_name).ok_or_else(|| {
                    AnimationError::InconsistentKeyFrame {
                        clip: name.to_string(),
                        index: i,
                    }
                })?;
                poses.push(JointTransform::new(transform.position(), transform.rotation()));
            }
            times.push(key_frame.time_stamp());
        }

        log::debug!(
            "Bound animation '{}' to skeleton '{}': {} keyframes, {} of {} joints animated, {:.3}s",
            name,
            skeleton.name,
            times.len(),
            width,
            skeleton.joint_count(),
            length
        );

        Ok(SkeletalClip {
            name: name.to_string(),
            length,
            times,
            channels: channels.into_iter().map(|(index, _)| index).collect(),
            poses,
        })
    }
}
