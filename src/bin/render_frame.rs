use anyhow::{bail, Context, Result};
use glam::{Vec2, Vec3};
use std::collections::BTreeMap;
use std::env;

use jar_sprite::config::load_scene_settings;
use jar_sprite::rendering::raymarch::render_image;
use jar_sprite::rendering::uniforms::{apply_rig_uniforms, SpriteProps, SpriteUniforms, UniformValue};
use jar_sprite::utils::logging::init_console_logging;
use jar_sprite::world::pose::{pose_rig, Mode};
use jar_sprite::world::rig::Rig;

fn usage(program: &str) {
    eprintln!("Usage: {} <output.png> [mode] [time] [size] [--yaw <radians>] [--dump-uniforms]", program);
    eprintln!("  mode  - idle (default), walk or sit");
    eprintln!("  time  - animation time in seconds (default 0)");
    eprintln!("  size  - square image side in pixels (default 256)");
}

fn main() -> Result<()> {
    init_console_logging();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
        return Ok(());
    }

    let mut positional = Vec::new();
    let mut dump_uniforms = false;
    let mut yaw = 0.0f32;
    let mut rest = args[1..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--dump-uniforms" => dump_uniforms = true,
            "--yaw" => {
                let value = rest.next().context("--yaw needs a value")?;
                yaw = value.parse().with_context(|| format!("Invalid yaw: {}", value))?;
            }
            flag if flag.starts_with("--") => bail!("Unknown flag: {}", flag),
            _ => positional.push(arg.as_str()),
        }
    }

    let Some(&output) = positional.first() else {
        usage(&args[0]);
        return Ok(());
    };
    let mode: Mode = match positional.get(1) {
        Some(m) => m.parse().map_err(anyhow::Error::msg)?,
        None => Mode::Idle,
    };
    let time: f32 = match positional.get(2) {
        Some(t) => t.parse().with_context(|| format!("Invalid time: {}", t))?,
        None => 0.0,
    };
    let size: u32 = match positional.get(3) {
        Some(s) => s.parse().with_context(|| format!("Invalid size: {}", s))?,
        None => 256,
    };
    if size == 0 {
        bail!("Image size must be positive");
    }

    let settings = load_scene_settings();
    let rig = pose_rig(&Rig::default(), mode, time);
    let props = SpriteProps {
        rotation: Some(Vec3::new(0.0, yaw, 0.0)),
        ..Default::default()
    };

    let mut uniforms = SpriteUniforms::new(&settings.camera, &settings.light, Vec2::splat(size as f32));
    uniforms.time = time;
    apply_rig_uniforms(Some(&mut uniforms), Some(&rig), Some(&props));

    if dump_uniforms {
        let named: BTreeMap<&str, UniformValue> = uniforms.named_values().into_iter().collect();
        println!("{}", serde_json::to_string_pretty(&named)?);
    }

    println!("Rendering {} pose at t={} ({}x{})", mode, time, size, size);
    let image = render_image(&uniforms, size, size);
    image
        .save(output)
        .with_context(|| format!("Failed to write image: {}", output))?;
    println!("Wrote {}", output);

    Ok(())
}
