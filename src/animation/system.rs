use crate::animation::animator::Animator;

/// Animation system.
///
/// Steps every animator of a scene by the same frame delta.
pub struct AnimationSystem;

impl AnimationSystem {
    /// Updates all animators sequentially.
    ///
    /// # Arguments
    /// * `animators` - One animator per animated entity
    /// * `dt` - Delta time of this frame (in seconds)
    #[inline]
    pub fn update(animators: &mut [Animator], dt: f32) {
        for animator in animators {
            animator.update(dt);
        }
    }

    /// Updates all animators on the rayon thread pool.
    ///
    /// Each animator owns its pose, so no two tasks touch the same joint data.
    #[cfg(feature = "parallel")]
    pub fn update_parallel(animators: &mut [Animator], dt: f32) {
        use rayon::prelude::*;

        animators
            .par_iter_mut()
            .for_each(|animator| animator.update(dt));
    }
}
