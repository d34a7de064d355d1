use glam::{Vec2, Vec3};

use jar_sprite::config::{CameraSettings, LightSettings};
use jar_sprite::rendering::raymarch::{render_image, shade_sample, PinholeCamera, SpriteScene};
use jar_sprite::rendering::uniforms::{apply_rig_uniforms, SpriteProps, SpriteUniforms};
use jar_sprite::world::pose::{pose_rig, Mode};
use jar_sprite::world::rig::Rig;

fn bound(mode: Mode, time: f32, props: SpriteProps) -> SpriteUniforms {
    let mut u = SpriteUniforms::new(&CameraSettings::default(), &LightSettings::default(), Vec2::splat(48.0));
    let rig = pose_rig(&Rig::default(), mode, time);
    apply_rig_uniforms(Some(&mut u), Some(&rig), Some(&props));
    u
}

#[test]
fn default_rig_binds_leg_size() {
    let u = bound(Mode::Idle, 0.0, SpriteProps::default());
    assert_eq!(u.leg_size, [0.15, 0.1]);
}

#[test]
fn idle_frame_has_a_body_and_clear_sky() {
    let u = bound(Mode::Idle, 0.0, SpriteProps::default());
    let image = render_image(&u, 48, 48);

    let opaque = image.pixels().filter(|p| p.0[3] == 255).count();
    assert!(opaque > 20, "only {opaque} opaque pixels");

    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(image.get_pixel(47, 0).0, [0, 0, 0, 0]);
}

#[test]
fn poses_render_differently() {
    let idle = render_image(&bound(Mode::Idle, 0.4, SpriteProps::default()), 32, 32);
    let sit = render_image(&bound(Mode::Sit, 0.4, SpriteProps::default()), 32, 32);
    assert_ne!(idle.as_raw(), sit.as_raw());
}

#[test]
fn rendering_is_deterministic() {
    let u = bound(Mode::Walk, 1.3, SpriteProps::default());
    assert_eq!(render_image(&u, 24, 24).as_raw(), render_image(&u, 24, 24).as_raw());
}

#[test]
fn coincident_camera_and_target_stay_finite() {
    let props = SpriteProps {
        camera_pos: Some(Vec3::new(0.0, 1.0, 3.0)),
        camera_target: Some(Vec3::new(0.0, 1.0, 3.0)),
        ..Default::default()
    };
    let u = bound(Mode::Idle, 0.0, props);
    let scene = SpriteScene::from_uniforms(&u);
    let camera = PinholeCamera::look_at(u.cam_pos(), u.cam_target());

    for y in 0..9 {
        for x in 0..9 {
            let uv = Vec2::new(x as f32 / 4.0 - 1.0, y as f32 / 4.0 - 1.0);
            let c = shade_sample(&u, &scene, &camera, uv);
            assert!(c.is_finite(), "sample {uv:?} gave {c:?}");
        }
    }
}

#[test]
fn zero_light_direction_stays_finite() {
    let props = SpriteProps { light_dir: Some(Vec3::ZERO), ..Default::default() };
    let u = bound(Mode::Sit, 0.0, props);
    let scene = SpriteScene::from_uniforms(&u);
    let camera = PinholeCamera::look_at(u.cam_pos(), u.cam_target());
    for uv in [Vec2::ZERO, Vec2::new(0.0, -0.6), Vec2::new(0.3, -0.9)] {
        assert!(shade_sample(&u, &scene, &camera, uv).is_finite());
    }
}
