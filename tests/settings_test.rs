use std::path::PathBuf;

use glam::Vec3;

use jar_sprite::config::{SceneSettings, SettingsError};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("jar-sprite-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn defaults_match_the_scene_constants() {
    let s = SceneSettings::default();
    assert_eq!((s.viewport.width, s.viewport.height), (600, 800));
    assert_eq!(s.camera.position, Vec3::new(0.0, 1.2, 4.0));
    assert_eq!(s.camera.target, Vec3::new(0.0, -0.3, 0.0));
    assert_eq!(s.behavior.floor_radius, 1800.0);
    assert_eq!(s.behavior.walk_speed, 250.0);
    assert_eq!(s.behavior.arrival_radius, 100.0);
    assert_eq!(s.behavior.max_frame_delta, 0.05);
    assert_eq!(s.animation.time_step, 0.01);
}

#[test]
fn save_then_load_round_trips() {
    let path = scratch_path("roundtrip/sprite.toml");
    let mut settings = SceneSettings::default();
    settings.behavior.walk_speed = 320.0;
    settings.light.direction = Vec3::new(0.1, 1.0, 0.0);

    settings.save_to(&path).unwrap();
    let loaded = SceneSettings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn missing_file_reports_its_path() {
    let path = scratch_path("does-not-exist.toml");
    match SceneSettings::load_from(&path) {
        Err(SettingsError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn toml_text_is_human_editable() {
    let text = SceneSettings::default().to_toml_string().unwrap();
    assert!(text.contains("[behavior]"));
    assert!(text.contains("floor_radius"));
    let edited = text.replace("walk_speed = 250.0", "walk_speed = 125.0");
    assert_eq!(SceneSettings::from_toml_str(&edited).unwrap().behavior.walk_speed, 125.0);
}
