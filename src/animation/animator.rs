use std::sync::Arc;

use glam::{Affine3A, Mat4};

use crate::animation::clip::SkeletalClip;
use crate::animation::joint_transform::JointTransform;
use crate::animation::sampler::{Bracket, KeyframeCursor, find_bracket_with_cursor};
use crate::errors::{AnimationError, Result};
use crate::model::{AnimatedModel, ClipHandle};
use crate::skeleton::SkeletonPose;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No clip assigned; `update` leaves the pose untouched.
    Idle,
    /// A clip is assigned and loops indefinitely.
    Playing,
}

#[derive(Debug, Clone)]
struct ActiveClip {
    handle: ClipHandle,
    clip: Arc<SkeletalClip>,
}

/// Per-entity playback engine.
///
/// Drives one [`AnimatedModel`]: advances the clip time, finds the bracketing
/// keyframes, interpolates every animated joint and composes the hierarchy
/// into the skinning palette. Each animator owns its pose, so animators that
/// share a model can be updated independently (and in parallel).
#[derive(Debug, Clone)]
pub struct Animator {
    model: Arc<AnimatedModel>,
    current: Option<ActiveClip>,

    // Seconds into the current clip, kept in [0, length).
    time: f32,
    speed: f32,

    cursor: KeyframeCursor,
    pose: SkeletonPose,

    // Per-frame scratch, indexed by joint index.
    locals: Vec<Affine3A>,
    model_space: Vec<Affine3A>,
}

impl Animator {
    #[must_use]
    pub fn new(model: Arc<AnimatedModel>) -> Self {
        let joint_count = model.joint_count();
        let speed = model.settings().playback_speed;
        let model_space = vec![Affine3A::IDENTITY; joint_count];
        let locals = model.skeleton().bind_local_transforms().to_vec();

        Self {
            model,
            current: None,
            time: 0.0,
            speed,
            cursor: KeyframeCursor::default(),
            pose: SkeletonPose::bind_pose(joint_count),
            locals,
            model_space,
        }
    }

    // ========================================================================
    // Clip Selection
    // ========================================================================

    /// Starts `handle` from its beginning, replacing any clip in progress.
    ///
    /// On an unknown handle the playback state is left unchanged.
    pub fn play(&mut self, handle: ClipHandle) -> Result<()> {
        let Some(clip) = self.model.animation(handle) else {
            log::warn!("Model '{}': invalid animation handle {:?}", self.model.name, handle);
            return Err(AnimationError::InvalidClipHandle);
        };

        log::debug!("Model '{}': playing '{}'", self.model.name, clip.name());
        self.current = Some(ActiveClip {
            handle,
            clip: Arc::clone(clip),
        });
        self.time = 0.0;
        self.cursor.reset();
        Ok(())
    }

    /// Looks up a clip by name and plays it.
    ///
    /// On an unknown name the playback state is left unchanged.
    pub fn play_named(&mut self, name: &str) -> Result<()> {
        let Some(handle) = self.model.find_animation(name) else {
            log::warn!("Model '{}': unknown animation '{}'", self.model.name, name);
            return Err(AnimationError::UnknownClip(name.to_string()));
        };
        self.play(handle)
    }

    /// Returns to `Idle`. Joints keep the last computed pose.
    pub fn stop(&mut self) {
        if let Some(active) = self.current.take() {
            log::debug!("Model '{}': stopped '{}'", self.model.name, active.clip.name());
        }
        self.time = 0.0;
        self.cursor.reset();
    }

    /// Rewinds the current clip to its start.
    pub fn restart(&mut self) {
        self.time = 0.0;
        self.cursor.reset();
    }

    // ========================================================================
    // Playback Speed
    // ========================================================================

    /// Multiplier applied to every frame delta; 2.0 plays twice as fast.
    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Sets the playback speed multiplier, clamped to the configured minimum.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = self.model.settings().clamp_speed(speed);
    }

    pub fn increase_speed(&mut self) {
        self.set_speed(self.speed + self.model.settings().speed_step);
    }

    /// Slows playback down by one step, unless that would reach the minimum.
    pub fn decrease_speed(&mut self) {
        let settings = self.model.settings();
        let slower = self.speed - settings.speed_step;
        if slower >= settings.min_playback_speed {
            self.speed = slower;
        }
    }

    // ========================================================================
    // Per-frame Update
    // ========================================================================

    /// Advances playback by `delta_seconds` and recomputes the skinning palette.
    ///
    /// Does nothing while idle. Time always wraps modulo the clip length, so
    /// a delta longer than the clip (after a stall) still lands inside it.
    pub fn update(&mut self, delta_seconds: f32) {
        let Self {
            model,
            current,
            time,
            speed,
            cursor,
            pose,
            locals,
            model_space,
        } = self;

        let Some(active) = current.as_ref() else {
            return;
        };
        let clip = &*active.clip;

        *time = advance_time(*time, delta_seconds * *speed, clip.length());

        let times = clip.times();
        let bracket = find_bracket_with_cursor(times, *time, cursor);
        let progression = bracket.progression(times, *time);

        let skeleton = model.skeleton();
        locals.copy_from_slice(skeleton.bind_local_transforms());
        interpolate_channels(clip, bracket, progression, locals.as_mut_slice());

        skeleton.compose_pose(locals, model_space, pose);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn model(&self) -> &Arc<AnimatedModel> {
        &self.model
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        if self.current.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    #[inline]
    #[must_use]
    pub fn current_animation(&self) -> Option<&SkeletalClip> {
        self.current.as_ref().map(|active| &*active.clip)
    }

    #[inline]
    #[must_use]
    pub fn current_handle(&self) -> Option<ClipHandle> {
        self.current.as_ref().map(|active| active.handle)
    }

    /// Seconds elapsed in the current clip.
    #[inline]
    #[must_use]
    pub fn animation_time(&self) -> f32 {
        self.time
    }

    #[inline]
    #[must_use]
    pub fn pose(&self) -> &SkeletonPose {
        &self.pose
    }

    /// The skinning palette, one matrix per joint, indexed by joint index.
    #[inline]
    #[must_use]
    pub fn skinning_matrices(&self) -> &[Mat4] {
        self.pose.skinning_matrices()
    }

    /// Model-space joint transforms from the last update (before the inverse
    /// bind correction).
    #[inline]
    #[must_use]
    pub fn model_space_transforms(&self) -> &[Affine3A] {
        &self.model_space
    }

    #[must_use]
    pub fn collect_skinning_matrices(&self) -> Vec<Mat4> {
        self.pose.collect_skinning_matrices(self.model.skeleton())
    }
}

fn advance_time(time: f32, delta: f32, length: f32) -> f32 {
    if length <= 0.0 {
        return 0.0;
    }
    let advanced = time + delta;
    if !advanced.is_finite() {
        // A broken frame clock must not poison the clip time.
        return time;
    }
    let wrapped = advanced % length;
    if wrapped < advanced {
        log::trace!("Animation looped ({advanced:.3}s -> {wrapped:.3}s)");
    }
    wrapped
}

fn interpolate_channels(
    clip: &SkeletalClip,
    bracket: Bracket,
    progression: f32,
    locals: &mut [Affine3A],
) {
    let previous = clip.frame(bracket.previous);
    let next = clip.frame(bracket.next);

    for ((&joint, from), to) in clip.channels().iter().zip(previous).zip(next) {
        locals[joint] = JointTransform::interpolate(from, to, progression).local_matrix();
    }
}
