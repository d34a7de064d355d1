pub mod engine;
pub mod light;
pub mod raymarch;
pub mod sdf;
pub mod shaders;
pub mod uniforms;

pub use engine::{RenderEngine, RenderError};
pub use raymarch::{render_image, shade_sample, PinholeCamera, SpriteScene};
pub use uniforms::{apply_rig_uniforms, LayoutUniforms, SpriteProps, SpriteUniforms, UniformValue};
