//! Asset Loading Tests
//!
//! Tests for:
//! - ModelAsset JSON decoding (hierarchical and flat skeletons)
//! - Clip lengths in seconds and in ticks
//! - Building shared models and playing their clips
//! - Whole-asset rejection on any integrity defect
//! - AnimationSettings JSON overrides

use std::f32::consts::FRAC_PI_4;

use anyhow::Result;
use glam::{Quat, Vec3};

use armature::animation::{Animator, ClipLength};
use armature::assets::{ModelAsset, SkeletonSource};
use armature::errors::AnimationError;
use armature::settings::{AnimationSettings, DEFAULT_MAX_JOINTS};

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

const ARM_JSON: &str = r#"{
    "name": "arm",
    "skeleton": {
        "hierarchy": {
            "index": 0,
            "name": "root",
            "children": [{ "index": 1, "name": "child" }]
        }
    },
    "animations": [
        {
            "name": "swing",
            "length": { "seconds": 1.0 },
            "key_frames": [
                {
                    "time_stamp": 0.0,
                    "pose": {
                        "root": { "position": [0.0, 0.0, 0.0], "rotation": [0.0, 0.0, 0.0, 1.0] },
                        "child": { "position": [1.0, 0.0, 0.0], "rotation": [0.0, 0.0, 0.0, 1.0] }
                    }
                },
                {
                    "time_stamp": 1.0,
                    "pose": {
                        "root": {
                            "position": [0.0, 0.0, 0.0],
                            "rotation": [0.0, 0.70710677, 0.0, 0.70710677]
                        },
                        "child": { "position": [1.0, 0.0, 0.0], "rotation": [0.0, 0.0, 0.0, 1.0] }
                    }
                }
            ]
        },
        {
            "name": "rise",
            "length": { "ticks": { "duration": 48.0, "ticks_per_second": 24.0 } },
            "key_frames": [
                {
                    "time_stamp": 0.0,
                    "pose": {
                        "root": { "position": [0.0, 0.0, 0.0], "rotation": [0.0, 0.0, 0.0, 1.0] }
                    }
                },
                {
                    "time_stamp": 2.0,
                    "pose": {
                        "root": { "position": [0.0, 4.0, 0.0], "rotation": [0.0, 0.0, 0.0, 1.0] }
                    }
                }
            ]
        }
    ]
}"#;

const FLAT_JSON: &str = r#"{
    "name": "flat",
    "skeleton": {
        "flat": {
            "bone_names": ["root", "tip"],
            "parent_indices": [-1, 0],
            "inverse_bind_matrices": [
                [1.0, 0.0, 0.0, 0.0,  0.0, 1.0, 0.0, 0.0,  0.0, 0.0, 1.0, 0.0,  0.0, 0.0, 0.0, 1.0],
                [1.0, 0.0, 0.0, 0.0,  0.0, 1.0, 0.0, 0.0,  0.0, 0.0, 1.0, 0.0,  0.0, -2.0, 0.0, 1.0]
            ]
        }
    }
}"#;

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn decodes_hierarchical_model() -> Result<()> {
    let asset = ModelAsset::from_json_str(ARM_JSON)?;

    assert_eq!(asset.name, "arm");
    assert!(matches!(asset.skeleton, SkeletonSource::Hierarchy(_)));
    assert_eq!(asset.animations.len(), 2);
    assert_eq!(asset.animations[0].length, ClipLength::Seconds(1.0));
    assert_eq!(
        asset.animations[1].length,
        ClipLength::Ticks {
            duration: 48.0,
            ticks_per_second: 24.0
        }
    );
    Ok(())
}

#[test]
fn malformed_json_is_reported() {
    let err = ModelAsset::from_json_str(r#"{ "name": "broken", "skeleton": "#)
        .unwrap_err();
    assert!(matches!(err, AnimationError::JsonError(_)));
}

#[test]
fn missing_file_is_reported() {
    let err = ModelAsset::from_path("definitely/not/here.json").unwrap_err();
    assert!(matches!(err, AnimationError::IoError(_)));
}

#[test]
fn loads_from_reader() -> Result<()> {
    let asset = ModelAsset::from_reader(ARM_JSON.as_bytes())?;
    assert_eq!(asset.animations[0].name, "swing");
    Ok(())
}

#[test]
fn loads_from_path() -> Result<()> {
    let file_name = format!("armature_asset_{}.json", std::process::id());
    let path = std::env::temp_dir().join(file_name);
    std::fs::write(&path, FLAT_JSON)?;
    let loaded = ModelAsset::from_path(&path);
    std::fs::remove_file(&path)?;

    let model = loaded?.build(AnimationSettings::default())?;
    assert_eq!(model.name, "flat");
    assert_eq!(model.joint_count(), 2);
    Ok(())
}

#[test]
fn asset_survives_serialization() -> Result<()> {
    let asset = ModelAsset::from_json_str(ARM_JSON)?;
    let text = serde_json::to_string(&asset)?;
    assert_eq!(ModelAsset::from_json_str(&text)?, asset);
    Ok(())
}

// ============================================================================
// Building
// ============================================================================

#[test]
fn built_model_plays_imported_clip() -> Result<()> {
    let model = ModelAsset::from_json_str(ARM_JSON)?.build(AnimationSettings::default())?;
    assert_eq!(model.animation_count(), 2);

    let mut animator = Animator::new(model);
    animator.play_named("swing")?;
    animator.update(0.5);

    let child = animator.skinning_matrices()[1].transform_point3(Vec3::ZERO);
    assert!(vec3_approx(child, Quat::from_rotation_y(FRAC_PI_4) * Vec3::X));
    Ok(())
}

#[test]
fn tick_lengths_are_converted_to_seconds() -> Result<()> {
    let model = ModelAsset::from_json_str(ARM_JSON)?.build(AnimationSettings::default())?;
    let handle = model.find_animation("rise").expect("clip should be loaded");
    assert!((model.animation(handle).unwrap().length() - 2.0).abs() < EPSILON);

    let mut animator = Animator::new(model);
    animator.play(handle)?;
    animator.update(1.0);
    let root = animator.skinning_matrices()[0].w_axis.truncate();
    assert!(vec3_approx(root, Vec3::new(0.0, 2.0, 0.0)));
    Ok(())
}

#[test]
fn flat_skeleton_keeps_inverse_binds() -> Result<()> {
    let model = ModelAsset::from_json_str(FLAT_JSON)?.build(AnimationSettings::default())?;
    let skeleton = model.skeleton();

    let tip = skeleton.joint(1).unwrap();
    let translation: Vec3 = tip.inverse_bind_transform().translation.into();
    assert!(vec3_approx(translation, Vec3::new(0.0, -2.0, 0.0)));

    let bind_local: Vec3 = skeleton.bind_local_transforms()[1].translation.into();
    assert!(vec3_approx(bind_local, Vec3::new(0.0, 2.0, 0.0)));
    Ok(())
}

#[test]
fn one_bad_clip_rejects_the_whole_model() -> Result<()> {
    let mut asset = ModelAsset::from_json_str(ARM_JSON)?;
    asset.animations[1].key_frames.reverse();

    let err = asset.build(AnimationSettings::default()).unwrap_err();
    assert!(matches!(err, AnimationError::NonChronological { clip, index: 1 } if clip == "rise"));
    Ok(())
}

#[test]
fn oversized_skeleton_rejects_the_model() -> Result<()> {
    let settings = AnimationSettings::from_json_str(r#"{ "max_joints": 1 }"#)?;
    let err = ModelAsset::from_json_str(FLAT_JSON)?.build(settings).unwrap_err();
    assert!(matches!(err, AnimationError::TooManyJoints { count: 2, max: 1 }));
    Ok(())
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn settings_defaults() {
    let settings = AnimationSettings::default();
    assert_eq!(settings.max_joints, DEFAULT_MAX_JOINTS);
    assert_eq!(settings.playback_speed, 1.0);
    assert_eq!(settings.min_playback_speed, 0.01);
}

#[test]
fn settings_partial_json_keeps_defaults() -> Result<()> {
    let settings = AnimationSettings::from_json_str(r#"{ "playback_speed": 1.5 }"#)?;
    assert_eq!(settings.playback_speed, 1.5);
    assert_eq!(settings.max_joints, DEFAULT_MAX_JOINTS);
    Ok(())
}

#[test]
fn animator_starts_at_configured_speed() -> Result<()> {
    let settings = AnimationSettings::from_json_str(r#"{ "playback_speed": 2.0 }"#)?;
    let model = ModelAsset::from_json_str(ARM_JSON)?.build(settings)?;

    let mut animator = Animator::new(model);
    assert_eq!(animator.speed(), 2.0);
    animator.play_named("rise")?;
    animator.update(0.5);
    assert!((animator.animation_time() - 1.0).abs() < EPSILON);
    Ok(())
}
