//! Animated Model
//!
//! Aggregates what every entity of one kind shares: the meshes to deform, the
//! skeleton, and the named clip set. A model is immutable once built and is
//! shared between animators through an `Arc`; which clip is playing is state
//! of the [`Animator`](crate::animation::Animator), not of the model.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::animation::{Animation, Binder, SkeletalClip};
use crate::errors::{AnimationError, Result};
use crate::settings::AnimationSettings;
use crate::skeleton::Skeleton;

new_key_type! {
    /// Handle to a clip inside one [`AnimatedModel`].
    pub struct ClipHandle;
    /// Handle to a mesh owned by the renderer.
    pub struct MeshKey;
}

#[derive(Debug)]
pub struct AnimatedModel {
    pub name: String,
    // Sub-meshes deformed by the same skeleton.
    meshes: SmallVec<[MeshKey; 4]>,
    skeleton: Skeleton,
    clips: SlotMap<ClipHandle, Arc<SkeletalClip>>,
    clip_names: FxHashMap<String, ClipHandle>,
    settings: AnimationSettings,
}

impl AnimatedModel {
    /// Creates a model without clips.
    ///
    /// Fails if the skeleton has more joints than `settings.max_joints`.
    pub fn new(name: &str, skeleton: Skeleton, settings: AnimationSettings) -> Result<Self> {
        if skeleton.joint_count() > settings.max_joints {
            return Err(AnimationError::TooManyJoints {
                count: skeleton.joint_count(),
                max: settings.max_joints,
            });
        }

        Ok(Self {
            name: name.to_string(),
            meshes: SmallVec::new(),
            skeleton,
            clips: SlotMap::with_key(),
            clip_names: FxHashMap::default(),
            settings,
        })
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: MeshKey) -> Self {
        self.meshes.push(mesh);
        self
    }

    /// Attaches every sub-mesh the skeleton drives, in draw order.
    #[must_use]
    pub fn with_meshes(mut self, meshes: impl IntoIterator<Item = MeshKey>) -> Self {
        self.meshes.extend(meshes);
        self
    }

    /// Binds and adds every clip, failing on the first invalid one.
    pub fn with_animations<'a>(
        mut self,
        animations: impl IntoIterator<Item = &'a Animation>,
    ) -> Result<Self> {
        for animation in animations {
            self.add_animation(animation)?;
        }
        Ok(self)
    }

    /// Binds `animation` to this model's skeleton and adds it to the clip set.
    pub fn add_animation(&mut self, animation: &Animation) -> Result<ClipHandle> {
        if self.clip_names.contains_key(animation.name()) {
            return Err(AnimationError::DuplicateClipName(animation.name().to_string()));
        }

        let clip = Binder::bind(animation, &self.skeleton)?;
        let handle = self.clips.insert(Arc::new(clip));
        self.clip_names.insert(animation.name().to_string(), handle);
        Ok(handle)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn meshes(&self) -> &[MeshKey] {
        &self.meshes
    }

    #[inline]
    #[must_use]
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    #[inline]
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.skeleton.joint_count()
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn animation(&self, handle: ClipHandle) -> Option<&Arc<SkeletalClip>> {
        self.clips.get(handle)
    }

    #[inline]
    #[must_use]
    pub fn find_animation(&self, name: &str) -> Option<ClipHandle> {
        self.clip_names.get(name).copied()
    }

    /// Names of every clip in the set, in no particular order.
    pub fn animation_names(&self) -> impl Iterator<Item = &str> {
        self.clip_names.keys().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn animation_count(&self) -> usize {
        self.clips.len()
    }
}
