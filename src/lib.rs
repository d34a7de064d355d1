// Jar Sprite: a raymarched sprite wandering a floor disk.

pub mod app;
pub mod config;
pub mod rendering;
pub mod utils;
pub mod world;

pub use config::{load_scene_settings, SceneSettings};
pub use rendering::{render_image, RenderEngine, RenderError, SpriteUniforms};
pub use world::{Behavior, BehaviorSnapshot, Mode, Rig};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
