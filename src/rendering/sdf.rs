//! Signed distance primitives used to build the sprite body.
//!
//! Every function returns negative values inside the shape. Points are in the
//! primitive's local frame.

use glam::{Vec2, Vec3};

pub fn sd_sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

/// Capsule-like cone along +Y: radius `r1` at the origin, `r2` at height `h`.
pub fn sd_round_cone(p: Vec3, r1: f32, r2: f32, h: f32) -> f32 {
    let b = (r1 - r2) / h;
    let a = (1.0 - b * b).max(0.0).sqrt();

    let q = Vec2::new(Vec2::new(p.x, p.z).length(), p.y);
    let k = q.dot(Vec2::new(-b, a));
    if k < 0.0 {
        return q.length() - r1;
    }
    if k > a * h {
        return (q - Vec2::new(0.0, h)).length() - r2;
    }
    q.dot(Vec2::new(a, b)) - r1
}

/// Dome with its flat side down: the upper half of a sphere of `radius`.
/// `_width` is carried for the rig's leg shape but does not change the cap.
pub fn sd_round_hemisphere(p: Vec3, radius: f32, _width: f32) -> f32 {
    let d_sphere = p.length() - radius;
    let d_plane = -p.y;
    d_sphere.max(d_plane)
}

/// Polynomial smooth minimum. `k` is the blend radius.
pub fn op_smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    let k = k * 4.0;
    let h = (k - (d1 - d2).abs()).max(0.0);
    d1.min(d2) - h * h * 0.25 / k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_sign() {
        assert!((sd_sphere(Vec3::ZERO, 1.0) + 1.0).abs() < 1e-6);
        assert!((sd_sphere(Vec3::new(2.0, 0.0, 0.0), 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn round_cone_caps() {
        // below the base cap
        let d = sd_round_cone(Vec3::new(0.0, -1.0, 0.0), 0.4, 0.2, 0.6);
        assert!((d - 0.6).abs() < 1e-5);
        // above the top cap
        let d = sd_round_cone(Vec3::new(0.0, 1.6, 0.0), 0.4, 0.2, 0.6);
        assert!((d - 0.8).abs() < 1e-5);
        assert!(sd_round_cone(Vec3::new(0.0, 0.3, 0.0), 0.4, 0.2, 0.6) < 0.0);
    }

    #[test]
    fn hemisphere_flat_side_is_down() {
        assert!(sd_round_hemisphere(Vec3::new(0.0, 0.05, 0.0), 0.15, 0.1) < 0.0);
        assert!(sd_round_hemisphere(Vec3::new(0.0, -0.05, 0.0), 0.15, 0.1) > 0.0);
    }

    #[test]
    fn smooth_union_never_exceeds_min() {
        for (a, b) in [(0.1, 0.2), (0.5, -0.1), (0.03, 0.03), (2.0, 3.0)] {
            let d = op_smooth_union(a, b, 0.05);
            assert!(d <= a.min(b) + 1e-7);
        }
        // far apart surfaces blend like a plain min
        assert_eq!(op_smooth_union(1.0, 3.0, 0.02), 1.0);
    }
}
