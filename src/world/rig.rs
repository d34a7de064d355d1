use glam::{Vec2, Vec3};

/// One limb or head attachment. `position` is the joint's offset from the body
/// origin, `length` how far the part's center sits along the rotated bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub position: Vec3,
    pub length: f32,
    pub rotation: Vec3,
}

impl Joint {
    pub const fn new(position: Vec3, length: f32) -> Self {
        Self { position, length, rotation: Vec3::ZERO }
    }

    /// Same joint with a different rotation.
    pub fn rotated(self, rotation: Vec3) -> Self {
        Self { rotation, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointName {
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl JointName {
    pub const ALL: [JointName; 5] = [
        JointName::Head,
        JointName::LeftArm,
        JointName::RightArm,
        JointName::LeftLeg,
        JointName::RightLeg,
    ];
}

/// The fixed joint set of a sprite body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joints {
    pub head: Joint,
    pub left_arm: Joint,
    pub right_arm: Joint,
    pub left_leg: Joint,
    pub right_leg: Joint,
}

impl Joints {
    pub fn get(&self, name: JointName) -> &Joint {
        match name {
            JointName::Head => &self.head,
            JointName::LeftArm => &self.left_arm,
            JointName::RightArm => &self.right_arm,
            JointName::LeftLeg => &self.left_leg,
            JointName::RightLeg => &self.right_leg,
        }
    }
}

/// Torso round cone. `top_radius` is the cap at the body origin and
/// `bottom_radius` the cap `height` above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySize {
    pub top_radius: f32,
    pub bottom_radius: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegSize {
    pub radius: f32,
    pub width: f32,
}

impl LegSize {
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.radius, self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizes {
    pub body: BodySize,
    pub head_radius: f32,
    pub arm_radius: f32,
    pub leg: LegSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EyeExpression {
    #[default]
    Neutral,
    Happy,
    Sad,
    Angry,
    Surprised,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouthExpression {
    #[default]
    Neutral,
    Smile,
    Frown,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eyes {
    pub size: f32,
    /// `x` is the half distance between the eyes, `y` their height, both in
    /// head-radius units.
    pub position: Vec3,
    pub expression: EyeExpression,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mouth {
    pub width: f32,
    pub position: Vec3,
    pub expression: MouthExpression,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub eyes: Eyes,
    pub mouth: Mouth,
}

/// Full parametric description of the sprite body at one instant.
///
/// Rigs are values: pose generators take a base rig and return a new one,
/// nothing mutates a rig in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Rig {
    pub id: String,
    pub name: String,

    // World-space sprite transform
    pub sprite_position: Vec3,
    pub sprite_rotation: Vec3,

    // Relative to the sprite
    pub body_position: Vec3,
    pub body_rotation: Vec3,
    pub scale: Vec3,

    pub sizes: Sizes,
    pub joints: Joints,
    pub face: Face,
}

impl Rig {
    /// Lengths and radii must be finite and non-negative.
    pub fn is_well_formed(&self) -> bool {
        let s = &self.sizes;
        let lengths = JointName::ALL.iter().map(|&n| self.joints.get(n).length);
        [
            s.body.top_radius,
            s.body.bottom_radius,
            s.body.height,
            s.head_radius,
            s.arm_radius,
            s.leg.radius,
            s.leg.width,
        ]
        .into_iter()
        .chain(lengths)
        .all(|v| v.is_finite() && v >= 0.0)
    }
}

impl Default for Rig {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            name: "Default Sprite Rig".to_string(),
            sprite_position: Vec3::ZERO,
            sprite_rotation: Vec3::ZERO,
            body_position: Vec3::ZERO,
            body_rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            sizes: Sizes {
                body: BodySize {
                    top_radius: 0.4,
                    bottom_radius: 0.2,
                    height: 0.6,
                },
                head_radius: 0.3,
                arm_radius: 0.15,
                leg: LegSize {
                    radius: 0.15,
                    width: 0.1,
                },
            },
            joints: Joints {
                head: Joint::new(Vec3::new(0.0, 0.6, 0.0), 0.2),
                left_arm: Joint::new(Vec3::new(-0.3, 0.7, 0.0), 0.5),
                right_arm: Joint::new(Vec3::new(0.3, 0.7, 0.0), 0.5),
                left_leg: Joint::new(Vec3::new(-0.25, -0.2, 0.1), 0.2),
                right_leg: Joint::new(Vec3::new(0.25, -0.2, 0.1), 0.2),
            },
            face: Face {
                eyes: Eyes {
                    size: 0.02,
                    position: Vec3::new(0.4, 0.1, 0.28),
                    expression: EyeExpression::Neutral,
                },
                mouth: Mouth {
                    width: 0.1,
                    position: Vec3::new(0.0, -0.1, 0.28),
                    expression: MouthExpression::Neutral,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rig_is_well_formed() {
        let rig = Rig::default();
        assert!(rig.is_well_formed());
        assert_eq!(rig.sizes.leg.as_vec2(), Vec2::new(0.15, 0.1));
        for name in JointName::ALL {
            assert_eq!(rig.joints.get(name).rotation, Vec3::ZERO);
        }
    }

    #[test]
    fn arms_and_legs_are_mirrored() {
        let j = Rig::default().joints;
        assert_eq!(j.left_arm.position.x, -j.right_arm.position.x);
        assert_eq!(j.left_leg.position.x, -j.right_leg.position.x);
        assert_eq!(j.left_leg.length, j.right_leg.length);
    }

    #[test]
    fn negative_radius_is_rejected() {
        let mut rig = Rig::default();
        rig.sizes.arm_radius = -0.1;
        assert!(!rig.is_well_formed());
    }
}
