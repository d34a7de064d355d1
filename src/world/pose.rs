use std::f32::consts::PI;
use std::fmt;

use glam::Vec3;

use super::rig::{Joints, Rig, Sizes};

pub const WALK_FREQUENCY: f32 = 6.0;
pub const WALK_AMPLITUDE: f32 = 0.5;
/// Arms swing at this share of the leg amplitude.
pub const ARM_SWING_RATIO: f32 = 0.7;
pub const HEAD_BOB: f32 = 0.1;

pub const BREATH_FREQUENCY: f32 = 2.0;
pub const BREATH_AMPLITUDE: f32 = 0.05;

pub const SIT_DROP: f32 = 0.08;
pub const SIT_LEG_ANGLE: f32 = -1.0;
pub const SIT_LEG_SPREAD: f32 = 0.5;
pub const SIT_LEG_FLARE: f32 = 1.2;
pub const SIT_ARM_ANGLE: f32 = -0.3;

/// Behavior mode of the sprite, which is also the pose it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Idle,
    Walk,
    Sit,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Walk => "walk",
            Mode::Sit => "sit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idle" => Ok(Mode::Idle),
            "walk" => Ok(Mode::Walk),
            "sit" => Ok(Mode::Sit),
            _ => Err(format!("Invalid mode: {}", s)),
        }
    }
}

fn breath(time: f32) -> f32 {
    BREATH_AMPLITUDE * (time * BREATH_FREQUENCY).sin()
}

/// Pose `base` for `mode` at `time` seconds.
pub fn pose_rig(base: &Rig, mode: Mode, time: f32) -> Rig {
    match mode {
        Mode::Walk => walk_cycle(base, time),
        Mode::Sit => sit(base, time),
        Mode::Idle => idle(base, time),
    }
}

/// Legs swing in antiphase, each arm opposes the leg on its side.
pub fn walk_cycle(base: &Rig, time: f32) -> Rig {
    let phase = time * WALK_FREQUENCY;
    let left_leg = phase.sin() * WALK_AMPLITUDE;
    let right_leg = (phase + PI).sin() * WALK_AMPLITUDE;
    let left_arm = (phase + PI).sin() * WALK_AMPLITUDE * ARM_SWING_RATIO;
    let right_arm = phase.sin() * WALK_AMPLITUDE * ARM_SWING_RATIO;

    let j = &base.joints;
    Rig {
        joints: Joints {
            head: j.head.rotated(Vec3::new(HEAD_BOB * phase.sin(), 0.0, 0.0)),
            left_leg: j.left_leg.rotated(Vec3::new(left_leg, 0.0, 0.0)),
            right_leg: j.right_leg.rotated(Vec3::new(right_leg, 0.0, 0.0)),
            left_arm: j.left_arm.rotated(Vec3::new(left_arm, 0.0, 0.0)),
            right_arm: j.right_arm.rotated(Vec3::new(right_arm, 0.0, 0.0)),
        },
        ..base.clone()
    }
}

/// Settle down with folded, flared legs and drooping arms.
pub fn sit(base: &Rig, time: f32) -> Rig {
    let breath = breath(time);
    let slow = time.sin();

    let mut body_position = base.body_position;
    body_position.y += -SIT_DROP + 0.01 * slow;

    let j = &base.joints;
    let mut head = j.head.rotated(Vec3::new(0.05 * slow, 0.0, 0.0));
    head.position.y += 0.01 + 0.008 * slow;

    let leg_rotation = Vec3::new(SIT_LEG_ANGLE + breath, 0.0, SIT_LEG_SPREAD);
    let arm_rotation = Vec3::new(SIT_ARM_ANGLE + breath, 0.0, 0.0);

    let mut sizes: Sizes = base.sizes;
    sizes.leg.radius *= SIT_LEG_FLARE;

    Rig {
        body_position,
        sizes,
        joints: Joints {
            head,
            left_leg: j.left_leg.rotated(leg_rotation),
            right_leg: j.right_leg.rotated(leg_rotation),
            left_arm: j.left_arm.rotated(arm_rotation),
            right_arm: j.right_arm.rotated(arm_rotation),
        },
        ..base.clone()
    }
}

/// Slow bob and sway while standing.
pub fn idle(base: &Rig, time: f32) -> Rig {
    let breath = breath(time);
    let slow = time.sin();

    let mut body_position = base.body_position;
    body_position.y += 0.01 * slow;

    let j = &base.joints;
    Rig {
        body_position,
        joints: Joints {
            head: j.head.rotated(Vec3::new(0.05 * slow, 0.0, 0.0)),
            left_arm: j.left_arm.rotated(Vec3::new(breath, 0.0, 0.0)),
            right_arm: j.right_arm.rotated(Vec3::new(breath, 0.0, 0.0)),
            ..*j
        },
        ..base.clone()
    }
}
