use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Small offset added before normalizing vectors that may be zero-length.
pub const NORMALIZE_EPSILON: f32 = 1e-5;

/// Wrap an angle into the half-open range (-π, π].
pub fn wrap_angle(a: f32) -> f32 {
    let mut a = a % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// Signed difference `to - from` taking the short way around the circle.
/// Always lands in (-π, π].
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    wrap_angle(wrap_angle(to) - wrap_angle(from))
}

/// Heading (radians about +Y) that faces along `dir` on the XZ plane.
/// Zero heading looks down +Z.
pub fn heading_towards(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z)
}

pub fn rotate_x(p: Vec3, a: f32) -> Vec3 {
    let (s, c) = a.sin_cos();
    Vec3::new(p.x, c * p.y - s * p.z, s * p.y + c * p.z)
}

pub fn rotate_y(p: Vec3, a: f32) -> Vec3 {
    let (s, c) = a.sin_cos();
    Vec3::new(p.x * c + p.z * s, p.y, -p.x * s + p.z * c)
}

pub fn rotate_z(p: Vec3, a: f32) -> Vec3 {
    let (s, c) = a.sin_cos();
    Vec3::new(c * p.x - s * p.y, s * p.x + c * p.y, p.z)
}

/// Euler rotation applied X, then Y, then Z. Matches the shader's `rotate_xyz`.
pub fn rotate_xyz(p: Vec3, a: Vec3) -> Vec3 {
    rotate_z(rotate_y(rotate_x(p, a.x), a.y), a.z)
}

/// GLSL-style hermite step.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Normalize with an epsilon nudge so a zero vector never yields NaN.
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let v = if v.length_squared() < NORMALIZE_EPSILON * NORMALIZE_EPSILON {
        v + Vec3::splat(NORMALIZE_EPSILON)
    } else {
        v
    };
    v.normalize()
}

pub fn safe_normalize2(v: Vec2) -> Vec2 {
    (v + Vec2::splat(NORMALIZE_EPSILON)).normalize_or(Vec2::X)
}

/// Clamp a 2D vector into the unit disk, keeping its direction.
pub fn clamp_to_unit_disk(v: Vec2) -> Vec2 {
    let r = v.length();
    if r > 1.0 {
        v / r
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_stays_in_half_open_range() {
        let mut a = -20.0_f32;
        while a < 20.0 {
            let w = wrap_angle(a);
            assert!(w > -PI && w <= PI, "wrap_angle({a}) = {w}");
            a += 0.137;
        }
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), PI);
    }

    #[test]
    fn shortest_delta_takes_short_way() {
        let d = shortest_angle_delta(3.0, -3.0);
        assert!((d - (TAU - 6.0)).abs() < 1e-5);
        let d = shortest_angle_delta(-3.0, 3.0);
        assert!((d + (TAU - 6.0)).abs() < 1e-5);

        let mut a = -7.0_f32;
        while a < 7.0 {
            let mut b = -7.0_f32;
            while b < 7.0 {
                let d = shortest_angle_delta(a, b);
                assert!(d > -PI && d <= PI);
                b += 0.41;
            }
            a += 0.53;
        }
    }

    #[test]
    fn rotate_y_quarter_turn() {
        let p = rotate_y(Vec3::X, std::f32::consts::FRAC_PI_2);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn safe_normalize_never_nan() {
        assert!(safe_normalize(Vec3::ZERO).is_finite());
        assert!(safe_normalize2(Vec2::ZERO).is_finite());
        assert!(safe_normalize2(Vec2::new(-NORMALIZE_EPSILON, -NORMALIZE_EPSILON)).is_finite());
    }

    #[test]
    fn clamp_to_unit_disk_keeps_direction() {
        let v = clamp_to_unit_disk(Vec2::new(3.0, 4.0));
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v - Vec2::new(0.6, 0.8)).length() < 1e-6);
        assert_eq!(clamp_to_unit_disk(Vec2::new(0.3, 0.1)), Vec2::new(0.3, 0.1));
    }
}
