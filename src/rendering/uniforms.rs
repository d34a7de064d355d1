use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::config::{CameraSettings, LightSettings};
use crate::utils::math::safe_normalize;
use crate::world::projection::{FloorProjection, ScreenPlacement};
use crate::world::rig::{Joint, Rig};

/// Everything the sprite shader reads, in WGSL uniform layout.
///
/// Each `[f32; 3]` is followed by a scalar so every row stays 16 bytes, the
/// same packing WGSL applies to `vec3<f32>` followed by `f32`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub face_blend: f32,

    pub cam_pos: [f32; 3],
    pub head_radius: f32,
    pub cam_target: [f32; 3],
    pub arm_radius: f32,
    pub light_dir: [f32; 3],
    pub eye_radius: f32,

    pub sprite_pos: [f32; 3],
    pub _padding0: f32,
    pub sprite_rot: [f32; 3],
    pub _padding1: f32,
    pub body_pos: [f32; 3],
    pub _padding2: f32,
    /// x = top radius, y = bottom radius, z = height
    pub body_size: [f32; 3],
    pub _padding3: f32,

    pub head_pos: [f32; 3],
    pub head_len: f32,
    pub head_rot: [f32; 3],
    pub _padding4: f32,
    pub left_arm_pos: [f32; 3],
    pub left_arm_len: f32,
    pub left_arm_rot: [f32; 3],
    pub _padding5: f32,
    pub right_arm_pos: [f32; 3],
    pub right_arm_len: f32,
    pub right_arm_rot: [f32; 3],
    pub _padding6: f32,
    pub left_leg_pos: [f32; 3],
    pub left_leg_len: f32,
    pub left_leg_rot: [f32; 3],
    pub _padding7: f32,
    pub right_leg_pos: [f32; 3],
    pub right_leg_len: f32,
    pub right_leg_rot: [f32; 3],
    pub _padding8: f32,

    /// x = leg radius, y = leg width
    pub leg_size: [f32; 2],
    pub eye_offset: [f32; 2],
    pub mouth_offset: [f32; 2],
    pub mouth_size: [f32; 2],
}

/// Optional per-frame overrides handed to [`apply_rig_uniforms`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpriteProps {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub camera_pos: Option<Vec3>,
    pub camera_target: Option<Vec3>,
    pub light_dir: Option<Vec3>,
}

/// One entry of the flattened parameter listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
}

impl SpriteUniforms {
    /// Uniforms with camera, light and resolution set and no rig bound yet.
    pub fn new(camera: &CameraSettings, light: &LightSettings, resolution: Vec2) -> Self {
        Self {
            resolution: resolution.to_array(),
            cam_pos: camera.position.to_array(),
            cam_target: camera.target.to_array(),
            light_dir: safe_normalize(light.direction).to_array(),
            ..Self::zeroed()
        }
    }

    pub fn cam_pos(&self) -> Vec3 { Vec3::from(self.cam_pos) }
    pub fn cam_target(&self) -> Vec3 { Vec3::from(self.cam_target) }
    pub fn light_dir(&self) -> Vec3 { Vec3::from(self.light_dir) }
    pub fn sprite_rot(&self) -> Vec3 { Vec3::from(self.sprite_rot) }
    pub fn body_pos(&self) -> Vec3 { Vec3::from(self.body_pos) }
    pub fn body_size(&self) -> Vec3 { Vec3::from(self.body_size) }
    pub fn leg_size(&self) -> Vec2 { Vec2::from(self.leg_size) }
    pub fn eye_offset(&self) -> Vec2 { Vec2::from(self.eye_offset) }

    /// Parameter name → value, in shader declaration order.
    pub fn named_values(&self) -> Vec<(&'static str, UniformValue)> {
        use UniformValue::{Float, Vec2 as V2, Vec3 as V3};
        let v3 = |a: [f32; 3]| V3(Vec3::from(a));
        let v2 = |a: [f32; 2]| V2(Vec2::from(a));
        vec![
            ("uResolution", v2(self.resolution)),
            ("uTime", Float(self.time)),
            ("uCamPos", v3(self.cam_pos)),
            ("uCamTarget", v3(self.cam_target)),
            ("uLightDir", v3(self.light_dir)),
            ("uSpritePos", v3(self.sprite_pos)),
            ("uSpriteRot", v3(self.sprite_rot)),
            ("uBodyPos", v3(self.body_pos)),
            ("uHeadPos", v3(self.head_pos)),
            ("uHeadLen", Float(self.head_len)),
            ("uHeadRot", v3(self.head_rot)),
            ("uLeftArmPos", v3(self.left_arm_pos)),
            ("uLeftArmLen", Float(self.left_arm_len)),
            ("uLeftArmRot", v3(self.left_arm_rot)),
            ("uRightArmPos", v3(self.right_arm_pos)),
            ("uRightArmLen", Float(self.right_arm_len)),
            ("uRightArmRot", v3(self.right_arm_rot)),
            ("uLeftLegPos", v3(self.left_leg_pos)),
            ("uLeftLegLen", Float(self.left_leg_len)),
            ("uLeftLegRot", v3(self.left_leg_rot)),
            ("uRightLegPos", v3(self.right_leg_pos)),
            ("uRightLegLen", Float(self.right_leg_len)),
            ("uRightLegRot", v3(self.right_leg_rot)),
            ("uBodySize", v3(self.body_size)),
            ("uHeadRadius", Float(self.head_radius)),
            ("uArmRadius", Float(self.arm_radius)),
            ("uLegSize", v2(self.leg_size)),
            ("uEyeOffset", v2(self.eye_offset)),
            ("uEyeRadius", Float(self.eye_radius)),
            ("uMouthOffset", v2(self.mouth_offset)),
            ("uMouthSize", v2(self.mouth_size)),
            ("uFaceBlend", Float(self.face_blend)),
        ]
    }
}

/// Frame layout shared by the floor and sprite passes, in framebuffer pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LayoutUniforms {
    pub viewport: [f32; 2],
    pub floor_center: [f32; 2],
    pub floor_radii: [f32; 2],
    /// Top-left corner of the square the sprite is raymarched into.
    pub sprite_origin: [f32; 2],
    pub sprite_side: f32,
    pub _padding: [f32; 3],
}

impl LayoutUniforms {
    /// `sprite_fraction` is the sprite square's side relative to the viewport
    /// width before depth scaling.
    pub fn new(projection: &FloorProjection, placement: &ScreenPlacement, sprite_fraction: f32) -> Self {
        let ellipse = projection.ellipse();
        let side = sprite_fraction * projection.width * placement.scale;
        let center = Vec2::new(placement.x * projection.width, placement.y * projection.height);
        Self {
            viewport: [projection.width, projection.height],
            floor_center: projection.floor_center().to_array(),
            floor_radii: [ellipse.base_radius, ellipse.depth_radius],
            sprite_origin: (center - Vec2::splat(side / 2.0)).to_array(),
            sprite_side: side,
            _padding: [0.0; 3],
        }
    }
}

fn joint_rows(joint: &Joint) -> ([f32; 3], f32, [f32; 3]) {
    (joint.position.to_array(), joint.length, joint.rotation.to_array())
}

/// Copy a posed rig and the optional overrides into `uniforms`.
///
/// Camera and light are only touched when the props carry them. Missing
/// uniforms, rig or props make this a no-op so one bad frame never stops the
/// render loop.
pub fn apply_rig_uniforms(
    uniforms: Option<&mut SpriteUniforms>,
    rig: Option<&Rig>,
    props: Option<&SpriteProps>,
) {
    let (Some(u), Some(rig), Some(props)) = (uniforms, rig, props) else {
        return;
    };

    u.body_pos = rig.body_position.to_array();

    let sizes = &rig.sizes;
    u.head_radius = sizes.head_radius;
    u.body_size = [sizes.body.top_radius, sizes.body.bottom_radius, sizes.body.height];
    u.arm_radius = sizes.arm_radius;
    u.leg_size = sizes.leg.as_vec2().to_array();

    u.sprite_rot = props.rotation.unwrap_or(rig.sprite_rotation).to_array();
    u.sprite_pos = props.position.unwrap_or(rig.sprite_position).to_array();

    let j = &rig.joints;
    (u.head_pos, u.head_len, u.head_rot) = joint_rows(&j.head);
    (u.left_arm_pos, u.left_arm_len, u.left_arm_rot) = joint_rows(&j.left_arm);
    (u.right_arm_pos, u.right_arm_len, u.right_arm_rot) = joint_rows(&j.right_arm);
    (u.left_leg_pos, u.left_leg_len, u.left_leg_rot) = joint_rows(&j.left_leg);
    (u.right_leg_pos, u.right_leg_len, u.right_leg_rot) = joint_rows(&j.right_leg);

    let face = &rig.face;
    u.eye_offset = [face.eyes.position.x, face.eyes.position.y];
    u.eye_radius = face.eyes.size;
    u.mouth_offset = [face.mouth.position.x, face.mouth.position.y];
    u.mouth_size = [face.mouth.width, face.mouth.width];
    u.face_blend = 1.0;

    if let Some(cam_pos) = props.camera_pos {
        u.cam_pos = cam_pos.to_array();
    }
    if let Some(cam_target) = props.camera_target {
        u.cam_target = cam_target.to_array();
    }
    if let Some(light_dir) = props.light_dir {
        u.light_dir = safe_normalize(light_dir).to_array();
    }
}
