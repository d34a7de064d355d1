// Sprite shader source, compiled once per device by the render engine.

pub const SPRITE_SHADER: &str = include_str!("sprite.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const SPRITE_FRAGMENT_ENTRY: &str = "fs_sprite";
pub const FLOOR_FRAGMENT_ENTRY: &str = "fs_floor";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_exist() {
        for entry in [VERTEX_ENTRY, SPRITE_FRAGMENT_ENTRY, FLOOR_FRAGMENT_ENTRY] {
            assert!(SPRITE_SHADER.contains(&format!("fn {entry}(")), "missing {entry}");
        }
    }

    #[test]
    fn uniform_struct_ends_with_mouth_size() {
        let start = SPRITE_SHADER.find("struct SpriteUniforms").unwrap();
        let body = &SPRITE_SHADER[start..];
        let end = body.find("};").unwrap();
        assert!(body[..end].trim_end().ends_with("mouth_size: vec2<f32>,"));
    }

    #[test]
    fn sprite_shader_validates() {
        use naga::valid::{Capabilities, ValidationFlags, Validator};

        let module = naga::front::wgsl::parse_str(SPRITE_SHADER)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(SPRITE_SHADER)));
        Validator::new(ValidationFlags::all(), Capabilities::all())
            .validate(&module)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(SPRITE_SHADER)));

        for entry in [VERTEX_ENTRY, SPRITE_FRAGMENT_ENTRY, FLOOR_FRAGMENT_ENTRY] {
            assert!(module.entry_points.iter().any(|ep| ep.name == entry), "missing {entry}");
        }
    }
}
