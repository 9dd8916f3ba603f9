use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::{Affine3A, Quat, Vec3};

use armature::animation::{Animation, AnimationSystem, Animator, JointTransform, KeyFrame};
use armature::model::AnimatedModel;
use armature::settings::AnimationSettings;
use armature::skeleton::Skeleton;

const JOINTS: usize = 64;
const KEY_FRAMES: usize = 120;

/// A single chain of `JOINTS` joints, one unit apart along Y.
fn chain_skeleton() -> Skeleton {
    let names: Vec<String> = (0..JOINTS).map(|i| format!("joint_{i}")).collect();
    let parents: Vec<i32> = (0..JOINTS as i32).map(|i| i - 1).collect();
    let inverse_binds: Vec<Affine3A> = (0..JOINTS)
        .map(|i| Affine3A::from_translation(Vec3::new(0.0, -(i as f32), 0.0)))
        .collect();
    Skeleton::from_parents("chain", &names, &parents, &inverse_binds).unwrap()
}

/// Every joint sways about Z, phase-shifted along the chain.
fn wave_clip() -> Animation {
    let length = 4.0;
    let key_frames = (0..KEY_FRAMES)
        .map(|k| {
            let t = k as f32 / (KEY_FRAMES - 1) as f32 * length;
            (0..JOINTS).fold(KeyFrame::at(t), |frame, j| {
                let angle = (t * 2.0 + j as f32 * 0.1).sin() * 0.2;
                let position = if j == 0 { Vec3::ZERO } else { Vec3::Y };
                let transform = JointTransform::new(position, Quat::from_rotation_z(angle));
                frame.with_joint(format!("joint_{j}"), transform)
            })
        })
        .collect();
    Animation::new("wave", key_frames, length)
}

fn build_model() -> Arc<AnimatedModel> {
    let model = AnimatedModel::new("chain", chain_skeleton(), AnimationSettings::default())
        .unwrap()
        .with_animations([&wave_clip()])
        .unwrap();
    Arc::new(model)
}

fn playing_animators(model: &Arc<AnimatedModel>, count: usize) -> Vec<Animator> {
    (0..count)
        .map(|_| {
            let mut animator = Animator::new(Arc::clone(model));
            animator.play_named("wave").unwrap();
            animator
        })
        .collect()
}

fn pose_update_benchmark(c: &mut Criterion) {
    let model = build_model();

    c.bench_function("animator_update_64_joints", |b| {
        let mut animator = Animator::new(Arc::clone(&model));
        animator.play_named("wave").unwrap();
        b.iter(|| {
            animator.update(black_box(1.0 / 60.0));
            black_box(animator.skinning_matrices());
        });
    });

    let mut group = c.benchmark_group("animation_system");
    for count in [16usize, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut animators = playing_animators(&model, count);
            b.iter(|| AnimationSystem::update(black_box(&mut animators), 1.0 / 60.0));
        });
    }
    group.finish();

    #[cfg(feature = "parallel")]
    {
        let mut group = c.benchmark_group("animation_system_parallel");
        for count in [16usize, 128] {
            group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
                let mut animators = playing_animators(&model, count);
                b.iter(|| AnimationSystem::update_parallel(black_box(&mut animators), 1.0 / 60.0));
            });
        }
        group.finish();
    }
}

criterion_group!(benches, pose_update_benchmark);
criterion_main!(benches);
