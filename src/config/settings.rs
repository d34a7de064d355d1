use std::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use glam::Vec3;
use serde::{Serialize, Deserialize};
use thiserror::Error;

const SCENE_CONFIG_FILE: &str = "sprite.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings I/O failed for {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Settings decode failed: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("Settings encode failed: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

// =============================================================================
// Scene Configuration
// =============================================================================

/// Size of the jar canvas the floor and sprite are composited into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: u32,
    pub height: u32,
    /// Side of the square sprite viewport as a fraction of the canvas width.
    pub sprite_fraction: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 800,
            sprite_fraction: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.2, 4.0),
            target: Vec3::new(0.0, -0.3, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSettings {
    /// Direction towards the light. Normalized when bound.
    pub direction: Vec3,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.3, 0.9, 0.2),
        }
    }
}

/// Tuning for the wandering state machine. Distances are floor world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorSettings {
    pub floor_radius: f32,
    pub walk_speed: f32,
    pub walk_frequency: f32,
    pub arrival_radius: f32,
    /// Radians per second.
    pub max_turn_speed: f32,
    pub start_position: Vec3,
    /// Frame delta ceiling in seconds.
    pub max_frame_delta: f32,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            floor_radius: 1800.0,
            walk_speed: 250.0,
            walk_frequency: 6.0,
            arrival_radius: 100.0,
            max_turn_speed: std::f32::consts::PI,
            start_position: Vec3::new(0.0, -500.0, 0.0),
            max_frame_delta: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Pose clock advance per rendered frame.
    pub time_step: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self { time_step: 0.01 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub viewport: ViewportSettings,
    pub camera: CameraSettings,
    pub light: LightSettings,
    pub behavior: BehaviorSettings,
    pub animation: AnimationSettings,
}

impl BehaviorSettings {
    /// Reject values the frame loop cannot clamp or divide by.
    pub fn validate(&self) -> SettingsResult<()> {
        let checks = [
            ("floor_radius", self.floor_radius, self.floor_radius > 0.0),
            ("walk_speed", self.walk_speed, self.walk_speed >= 0.0),
            ("walk_frequency", self.walk_frequency, self.walk_frequency >= 0.0),
            ("arrival_radius", self.arrival_radius, self.arrival_radius >= 0.0),
            ("max_turn_speed", self.max_turn_speed, self.max_turn_speed >= 0.0),
            ("max_frame_delta", self.max_frame_delta, self.max_frame_delta >= 0.0),
        ];
        for (name, value, ok) in checks {
            if !value.is_finite() || !ok {
                return Err(SettingsError::Invalid(format!("behavior.{} = {}", name, value)));
            }
        }
        if !self.start_position.is_finite() {
            return Err(SettingsError::Invalid(format!(
                "behavior.start_position = {:?}",
                self.start_position
            )));
        }
        Ok(())
    }
}

impl SceneSettings {
    pub fn validate(&self) -> SettingsResult<()> {
        self.behavior.validate()?;
        let fraction = self.viewport.sprite_fraction;
        if !fraction.is_finite() || fraction <= 0.0 {
            return Err(SettingsError::Invalid(format!("viewport.sprite_fraction = {}", fraction)));
        }
        if !self.animation.time_step.is_finite() {
            return Err(SettingsError::Invalid(format!("animation.time_step = {}", self.animation.time_step)));
        }
        if !(self.camera.position.is_finite() && self.camera.target.is_finite() && self.light.direction.is_finite()) {
            return Err(SettingsError::Invalid("camera and light vectors must be finite".to_string()));
        }
        Ok(())
    }

    /// Decode and validate. Any rejected value fails the whole file.
    pub fn from_toml_str(data: &str) -> SettingsResult<Self> {
        let settings: Self = toml::from_str(data)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_from(path: &Path) -> SettingsResult<Self> {
        let data = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    pub fn save_to(&self, path: &Path) -> SettingsResult<()> {
        let io_err = |source| SettingsError::Io { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_toml_string()?).map_err(io_err)
    }
}

fn scene_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "jar-sprite", "jar-sprite")
        .map(|proj| proj.config_dir().join(SCENE_CONFIG_FILE))
}

pub fn save_scene_settings(settings: &SceneSettings) -> SettingsResult<()> {
    if let Some(path) = scene_config_path() {
        settings.save_to(&path)?;
    }
    Ok(())
}

/// Load settings from the user config dir, falling back to defaults when the
/// file is missing or unreadable.
pub fn load_scene_settings() -> SceneSettings {
    let Some(path) = scene_config_path() else {
        return SceneSettings::default();
    };
    if !path.exists() {
        return SceneSettings::default();
    }
    match SceneSettings::load_from(&path) {
        Ok(settings) => {
            tracing::info!("Loaded scene settings from {}", path.display());
            settings
        }
        Err(e) => {
            tracing::warn!("Ignoring scene settings: {}", e);
            SceneSettings::default()
        }
    }
}
