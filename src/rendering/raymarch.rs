//! CPU reference of the sprite shader.
//!
//! Mirrors `shaders/sprite.wgsl` sample for sample so frames can be rendered
//! and checked without a GPU.

use glam::{Vec2, Vec3, Vec4};
use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use super::light::{Light, EYE_COLOR, EYE_SPECULAR_POWER, EYE_SPECULAR_STRENGTH};
use super::sdf::{op_smooth_union, sd_round_cone, sd_round_hemisphere, sd_sphere};
use super::uniforms::SpriteUniforms;
use crate::utils::math::{rotate_xyz, rotate_y, safe_normalize, safe_normalize2, smoothstep};

pub const FOCAL_LENGTH: f32 = 1.8;
pub const MAX_STEPS: usize = 96;
pub const MAX_DISTANCE: f32 = 8.0;
pub const PRECISION: f32 = 0.002;
pub const NORMAL_EPSILON: f32 = 0.001;

/// Smooth-union blend radius per part.
pub const HEAD_BLEND: f32 = 0.02;
pub const ARM_BLEND: f32 = 0.01;
pub const LEG_BLEND: f32 = 0.05;

pub const EYE_EDGE: f32 = 0.05;

pub const SHADOW_LENGTH: f32 = 0.6;
pub const SHADOW_WIDTH: f32 = 0.35;
pub const SHADOW_STRENGTH: f32 = 0.4;
/// Ground samples further out than this (in ellipse units squared) are skipped.
pub const SHADOW_CUTOFF: f32 = 1.5;

/// Camera ray through one viewport sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Pinhole camera looking from `position` at `target` with +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeCamera {
    pub position: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl PinholeCamera {
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        let forward = safe_normalize(target - position);
        let right = safe_normalize(Vec3::Y.cross(forward));
        let up = forward.cross(right);
        Self { position, forward, right, up }
    }

    /// `uv` spans [-1, 1] with +Y up.
    pub fn ray(&self, uv: Vec2) -> Ray {
        let direction = safe_normalize(uv.x * self.right + uv.y * self.up + FOCAL_LENGTH * self.forward);
        Ray { origin: self.position, direction }
    }
}

/// Sprite body resolved from the uniforms: every part center precomputed in
/// body-local space.
#[derive(Debug, Clone, Copy)]
pub struct SpriteScene {
    body_pos: Vec3,
    body_size: Vec3,
    sprite_yaw: f32,
    head_center: Vec3,
    head_radius: f32,
    left_hand: Vec3,
    right_hand: Vec3,
    arm_radius: f32,
    left_foot: Vec3,
    right_foot: Vec3,
    leg_size: Vec2,
}

fn limb_end(position: [f32; 3], rotation: [f32; 3], length: f32, rest_dir: Vec3) -> Vec3 {
    Vec3::from(position) + rotate_xyz(rest_dir, Vec3::from(rotation)) * length
}

impl SpriteScene {
    pub fn from_uniforms(u: &SpriteUniforms) -> Self {
        let down = Vec3::NEG_Y;
        Self {
            body_pos: u.body_pos(),
            body_size: u.body_size(),
            sprite_yaw: u.sprite_rot().y,
            head_center: limb_end(u.head_pos, u.head_rot, u.head_len, Vec3::Y),
            head_radius: u.head_radius,
            left_hand: limb_end(u.left_arm_pos, u.left_arm_rot, u.left_arm_len, down),
            right_hand: limb_end(u.right_arm_pos, u.right_arm_rot, u.right_arm_len, down),
            arm_radius: u.arm_radius,
            left_foot: limb_end(u.left_leg_pos, u.left_leg_rot, u.left_leg_len, down),
            right_foot: limb_end(u.right_leg_pos, u.right_leg_rot, u.right_leg_len, down),
            leg_size: u.leg_size(),
        }
    }

    pub fn head_center(&self) -> Vec3 {
        self.head_center
    }

    /// World point into the sprite's local frame (body origin, yaw undone).
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        rotate_y(world - self.body_pos, self.sprite_yaw)
    }

    pub fn normal_to_world(&self, local: Vec3) -> Vec3 {
        rotate_y(local, -self.sprite_yaw)
    }

    /// Distance to the whole body from a local-space point.
    pub fn distance(&self, p: Vec3) -> f32 {
        let s = self.body_size;
        let body = sd_round_cone(p - self.body_pos, s.x, s.y, s.z);
        let head = sd_sphere(p - self.head_center, self.head_radius);
        let left_arm = sd_sphere(p - self.left_hand, self.arm_radius);
        let right_arm = sd_sphere(p - self.right_hand, self.arm_radius);
        let left_leg = sd_round_hemisphere(p - self.left_foot, self.leg_size.x, self.leg_size.y);
        let right_leg = sd_round_hemisphere(p - self.right_foot, self.leg_size.x, self.leg_size.y);

        let mut d = body;
        d = op_smooth_union(d, head, HEAD_BLEND);
        d = op_smooth_union(d, left_arm, ARM_BLEND);
        d = op_smooth_union(d, right_arm, ARM_BLEND);
        d = op_smooth_union(d, left_leg, LEG_BLEND);
        d = op_smooth_union(d, right_leg, LEG_BLEND);
        d
    }

    /// Central-difference gradient, local space.
    pub fn normal(&self, p: Vec3) -> Vec3 {
        let e = NORMAL_EPSILON;
        let dx = self.distance(p + Vec3::X * e) - self.distance(p - Vec3::X * e);
        let dy = self.distance(p + Vec3::Y * e) - self.distance(p - Vec3::Y * e);
        let dz = self.distance(p + Vec3::Z * e) - self.distance(p - Vec3::Z * e);
        safe_normalize(Vec3::new(dx, dy, dz))
    }

    /// Sphere-trace `ray`. Returns the travelled distance on a hit.
    pub fn march(&self, ray: &Ray) -> Option<f32> {
        let mut t = 0.0;
        let mut h = PRECISION * 2.0;
        for _ in 0..MAX_STEPS {
            if h < PRECISION || t > MAX_DISTANCE {
                break;
            }
            h = self.distance(self.to_local(ray.at(t)));
            t += h;
        }
        (t < MAX_DISTANCE).then_some(t)
    }
}

/// Eyes composited over the lit body on the head's front hemisphere.
fn shade_face(u: &SpriteUniforms, scene: &SpriteScene, light: &Light, local_hit: Vec3, world_normal: Vec3, body_lit: Vec3) -> Vec3 {
    if u.face_blend <= 0.0 {
        return body_lit;
    }
    let head_local = local_hit - scene.head_center;
    if head_local.z < 0.0 {
        return body_lit;
    }

    let face_pos = Vec2::new(head_local.x, head_local.y) / u.head_radius.max(1e-4);
    let offset = u.eye_offset();
    let eye_r = u.eye_radius;

    let eye_mask = |center: Vec2| 1.0 - smoothstep(eye_r, eye_r + EYE_EDGE, face_pos.distance(center));
    let mask = eye_mask(Vec2::new(-offset.x, offset.y)).max(eye_mask(Vec2::new(offset.x, offset.y)));

    let view_dir = safe_normalize(u.cam_pos() - u.body_pos());
    let spec = light.specular(world_normal, view_dir, EYE_SPECULAR_POWER);
    let eye_color = EYE_COLOR + Vec3::ONE * spec * EYE_SPECULAR_STRENGTH;

    body_lit.lerp(eye_color, mask * u.face_blend)
}

/// Soft ellipse on the ground under the sprite, stretched along the light.
/// Returns the darkening strength, or `None` when the ray misses the patch.
fn contact_shadow(u: &SpriteUniforms, scene: &SpriteScene, ray: &Ray) -> Option<f32> {
    let ground_y = scene.body_pos.y - (scene.body_size.z * 0.5 + scene.leg_size.x * 0.5);
    let t_plane = (ground_y - ray.origin.y) / ray.direction.y;
    if !(t_plane > 0.0 && t_plane < MAX_DISTANCE) {
        return None;
    }

    let ground = scene.to_local(ray.at(t_plane));
    let light_xz = safe_normalize2(Vec2::new(u.light_dir[0], u.light_dir[2]));
    let perp = Vec2::new(-light_xz.y, light_xz.x);

    let g = Vec2::new(ground.x, ground.z);
    let along = g.dot(light_xz) / SHADOW_LENGTH;
    let across = g.dot(perp) / SHADOW_WIDTH;

    let r2 = along * along + across * across;
    if r2 >= SHADOW_CUTOFF {
        return None;
    }
    let mask = (1.0 - r2).clamp(0.0, 1.0);
    Some(SHADOW_STRENGTH * mask * mask)
}

/// Shade one sample. `uv` spans [-1, 1] with +Y up; output is straight RGBA.
pub fn shade_sample(u: &SpriteUniforms, scene: &SpriteScene, camera: &PinholeCamera, uv: Vec2) -> Vec4 {
    let ray = camera.ray(uv);
    let light = Light::new(u.light_dir());

    let mut color = Vec4::ZERO;

    if let Some(t) = scene.march(&ray) {
        let local_hit = scene.to_local(ray.at(t));
        let world_normal = safe_normalize(scene.normal_to_world(scene.normal(local_hit)));
        let body_lit = light.shade_skin(world_normal);
        let lit = shade_face(u, scene, &light, local_hit, world_normal, body_lit);
        color = lit.extend(1.0);
    }

    if let Some(strength) = contact_shadow(u, scene, &ray) {
        let rgb = color.truncate().lerp(Vec3::ZERO, strength);
        color = rgb.extend(color.w.max(strength));
    }

    color
}

/// Render a full frame on the CPU, samples shaded in parallel.
pub fn render_image(u: &SpriteUniforms, width: u32, height: u32) -> RgbaImage {
    let scene = SpriteScene::from_uniforms(u);
    let camera = PinholeCamera::look_at(u.cam_pos(), u.cam_target());
    let mut image = RgbaImage::new(width, height);

    image
        .par_enumerate_pixels_mut()
        .for_each(|(x, y, pixel)| {
            let uv = Vec2::new(
                (x as f32 + 0.5) / width as f32 * 2.0 - 1.0,
                1.0 - (y as f32 + 0.5) / height as f32 * 2.0,
            );
            *pixel = to_rgba8(shade_sample(u, &scene, &camera, uv));
        });

    image
}

fn to_rgba8(c: Vec4) -> Rgba<u8> {
    let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([q(c.x), q(c.y), q(c.z), q(c.w)])
}
