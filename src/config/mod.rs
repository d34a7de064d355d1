pub mod settings;

// Re-export commonly used types
pub use settings::{
    SceneSettings, ViewportSettings, CameraSettings, LightSettings, BehaviorSettings,
    AnimationSettings, SettingsError, SettingsResult,
    load_scene_settings, save_scene_settings,
};
