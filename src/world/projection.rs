use glam::{Vec2, Vec3};

use crate::utils::math::clamp_to_unit_disk;

/// Sprite scale when standing at the front edge of the floor.
pub const NEAR_SCALE: f32 = 0.95;
/// Sprite scale at the back edge.
pub const FAR_SCALE: f32 = 1.0;
/// World floor radius maps onto this much of the shader's local frame.
pub const SDF_FLOOR_EXTENT: f32 = 0.9;

/// Where to draw the sprite, as fractions of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPlacement {
    pub x: f32,
    pub y: f32,
    /// Floor depth in [-1, 1], back to front.
    pub depth_norm: f32,
    pub scale: f32,
}

/// Ellipse the floor disk is drawn as, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorEllipse {
    /// Offset of the ellipse center below the viewport center.
    pub half_h: f32,
    pub base_radius: f32,
    pub depth_radius: f32,
}

impl FloorEllipse {
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let base_radius = width * 0.32;
        Self {
            half_h: height * 0.4,
            base_radius,
            depth_radius: base_radius * 0.35,
        }
    }
}

/// Maps between the circular world floor and its stylized on-screen ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorProjection {
    pub width: f32,
    pub height: f32,
    pub floor_radius: f32,
}

impl FloorProjection {
    pub fn new(width: f32, height: f32, floor_radius: f32) -> Self {
        Self { width, height, floor_radius }
    }

    pub fn ellipse(&self) -> FloorEllipse {
        FloorEllipse::for_viewport(self.width, self.height)
    }

    /// Viewport pixel of the floor ellipse center.
    pub fn floor_center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0 + self.ellipse().half_h)
    }

    pub fn world_to_screen(&self, position: Vec3) -> ScreenPlacement {
        let e = self.ellipse();
        let x_norm = (position.x / self.floor_radius).clamp(-1.0, 1.0);
        let z_norm = (position.z / self.floor_radius).clamp(-1.0, 1.0);

        let px = x_norm * e.base_radius;
        let py = e.half_h + z_norm * e.depth_radius;

        let t = (z_norm + 1.0) / 2.0;
        ScreenPlacement {
            x: (self.width / 2.0 + px) / self.width,
            y: (self.height / 2.0 + py) / self.height,
            depth_norm: z_norm,
            scale: FAR_SCALE + (NEAR_SCALE - FAR_SCALE) * t,
        }
    }

    /// Inverse mapping for pointer input. Points off the ellipse land on the
    /// floor's rim. The result sits at `floor_y`.
    pub fn screen_to_world(&self, pointer: Vec2, floor_y: f32) -> Vec3 {
        let e = self.ellipse();
        let offset = pointer - self.floor_center();
        let norm = clamp_to_unit_disk(Vec2::new(offset.x / e.base_radius, offset.y / e.depth_radius));
        Vec3::new(norm.x * self.floor_radius, floor_y, norm.y * self.floor_radius)
    }

    /// Position handed to the shader: world XZ squeezed into the raymarch frame.
    pub fn world_to_sdf_position(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x / self.floor_radius * SDF_FLOOR_EXTENT,
            0.0,
            position.z / self.floor_radius * SDF_FLOOR_EXTENT,
        )
    }
}
