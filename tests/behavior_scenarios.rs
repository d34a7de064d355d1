use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use jar_sprite::config::BehaviorSettings;
use jar_sprite::world::behavior::{pick_wander_target, Behavior, BehaviorState, ScriptedSource};
use jar_sprite::world::pose::Mode;
use jar_sprite::world::projection::FloorProjection;

const WIDTH: f32 = 600.0;
const HEIGHT: f32 = 800.0;

fn scripted(draws: &[f64]) -> Behavior<ScriptedSource> {
    let settings = BehaviorSettings::default();
    let projection = FloorProjection::new(WIDTH, HEIGHT, settings.floor_radius);
    Behavior::new(settings, projection, 0.0, ScriptedSource::new(draws.to_vec()))
}

/// Viewport pixel over the floor point `x` units right of the center.
fn pixel_at(b: &Behavior<ScriptedSource>, x: f32) -> Vec2 {
    let p = b.projection().world_to_screen(Vec3::new(x, -500.0, 0.0));
    Vec2::new(p.x * WIDTH, p.y * HEIGHT)
}

#[test]
fn forced_low_draw_starts_a_walk() {
    // first window draw, decision, step, angle, next window
    let mut b = scripted(&[0.5, 0.3, 0.5, 0.25, 0.5]);
    assert_eq!(b.state().next_decision_ms, 4000.0);

    let snap = b.tick(0.0);
    assert_eq!(snap.mode, Mode::Idle);

    let snap = b.tick(4000.0);
    assert_eq!(snap.mode, Mode::Walk);

    let state = b.state();
    let target = state.target_position;
    assert!((target.x - 360.0).abs() < 1e-2, "target {target:?}");
    assert!((target.y + 500.0).abs() < 1e-4);
    assert!(target.z.abs() < 1e-2);
    assert!((state.target_heading - FRAC_PI_2).abs() < 1e-4);
    assert_eq!(state.next_decision_ms, 6750.0);
}

#[test]
fn walk_reaches_wander_target_then_idles() {
    let mut b = scripted(&[0.5, 0.3, 0.5, 0.25, 0.5]);
    b.tick(0.0);
    b.tick(4000.0);

    let mut now = 4000.0;
    while b.state().mode == Mode::Walk && now < 6000.0 {
        now += 16.0;
        b.tick(now);
    }
    let state = b.state();
    assert_eq!(state.mode, Mode::Idle);
    assert_eq!(state.target_position, state.position);
    assert!(state.position.x > 200.0);
}

#[test]
fn pointer_inside_dead_zone_is_ignored() {
    let mut b = scripted(&[0.5]);
    let before = b.state().clone();

    // 15 world units right of the floor center, the start position
    let ellipse = b.projection().ellipse();
    let center = b.projection().floor_center();
    let pointer = center + Vec2::new(15.0 / 1800.0 * ellipse.base_radius, 0.0);

    assert!(!b.pointer_move(pointer));
    assert_eq!(b.state(), &before);
    assert!(!b.state().pointer_active);
}

#[test]
fn pointer_off_the_floor_is_clamped_to_the_rim() {
    let projection = FloorProjection::new(WIDTH, HEIGHT, 1800.0);
    let raw = projection.screen_to_world(Vec2::new(WIDTH, HEIGHT), -500.0);
    let radius = Vec2::new(raw.x, raw.z).length();
    assert!((radius - 1800.0).abs() < 1e-2, "radius {radius}");
    assert_eq!(raw.y, -500.0);

    let mut b = scripted(&[0.5]);
    assert!(b.pointer_move(Vec2::new(WIDTH, HEIGHT)));
    let target = b.state().target_position;
    assert!(Vec2::new(target.x, target.z).length() <= 1800.0);
    assert!(b.state().pointer_active);
}

#[test]
fn pointer_far_away_forces_walk() {
    let mut b = scripted(&[0.5]);
    b.tick(0.0);
    for _ in 0..4 {
        b.pointer_move(Vec2::new(WIDTH, 720.0));
    }
    let snap = b.tick(16.0);
    assert_eq!(snap.mode, Mode::Walk);

    b.pointer_leave(100.0);
    assert!(!b.state().pointer_active);
    assert!(b.state().next_decision_ms >= 1100.0);
    assert!(b.state().next_decision_ms <= 4100.0);
}

#[test]
fn pointer_heading_eases_towards_the_target() {
    let mut b = scripted(&[0.5]);
    assert!(b.pointer_move(Vec2::new(WIDTH, 720.0)));
    let state = b.state();
    // rim at +X, smoothed target sits at x = 450
    assert!((state.target_position.x - 450.0).abs() < 1e-2);
    assert!((state.target_heading - 0.3 * FRAC_PI_2).abs() < 1e-5, "{}", state.target_heading);
    assert_eq!(state.heading, 0.0);

    // a second move eases the remaining gap by the same factor
    b.pointer_move(Vec2::new(WIDTH, 720.0));
    let expected = 0.3 * FRAC_PI_2 + 0.3 * (FRAC_PI_2 - 0.3 * FRAC_PI_2);
    assert!((b.state().target_heading - expected).abs() < 1e-5);
}

#[test]
fn active_pointer_holds_back_decisions() {
    // a 0.0 draw would start a wander at the first decision
    let mut b = scripted(&[0.0]);
    assert_eq!(b.state().next_decision_ms, 2000.0);
    b.tick(0.0);
    assert!(b.pointer_move(pixel_at(&b, 400.0)));

    let snap = b.tick(2500.0);
    assert_eq!(snap.mode, Mode::Idle);
    assert_eq!(b.state().next_decision_ms, 2000.0);
    assert!(b.state().pointer_active);

    b.pointer_leave(3000.0);
    assert_eq!(b.state().next_decision_ms, 4000.0);
    assert_eq!(b.tick(4000.0).mode, Mode::Walk);
}

#[test]
fn pointer_near_the_target_does_not_force_walk() {
    let mut b = scripted(&[0.5]);
    b.tick(0.0);
    assert!(b.pointer_move(pixel_at(&b, 760.0)));
    assert!((b.state().target_position.x - 190.0).abs() < 0.5);

    // past the arrival radius, still inside the slack
    let snap = b.tick(16.0);
    let dist = b.state().position.distance(b.state().target_position);
    assert!(dist > 100.0 && dist < 200.0, "dist {dist}");
    assert_eq!(snap.mode, Mode::Idle);

    b.pointer_move(pixel_at(&b, 760.0));
    assert_eq!(b.tick(32.0).mode, Mode::Walk);
}

#[test]
fn arrival_snaps_target_and_idles() {
    let settings = BehaviorSettings::default();
    let projection = FloorProjection::new(WIDTH, HEIGHT, settings.floor_radius);
    let state = BehaviorState {
        mode: Mode::Walk,
        target_position: Vec3::new(50.0, -500.0, 0.0),
        ..BehaviorState::at_rest(settings.start_position, 2000.0)
    };
    let mut b = Behavior::from_state(settings, projection, state, ScriptedSource::new(vec![0.5]));
    let snap = b.tick(0.0);
    assert_eq!(snap.mode, Mode::Idle);
    assert_eq!(b.state().target_position, b.state().position);
}

#[test]
fn wander_from_the_rim_stays_on_the_floor() {
    let radius = 1800.0;
    let from = Vec3::new(radius, -500.0, 0.0);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let target = pick_wander_target(from, radius, &mut rng);
        let r = Vec2::new(target.x, target.z).length();
        assert!(r <= radius * (1.0 + 1e-5), "r = {r}");
        assert_eq!(target.y, from.y);
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = || {
        let settings = BehaviorSettings::default();
        let projection = FloorProjection::new(WIDTH, HEIGHT, settings.floor_radius);
        let mut b = Behavior::new(settings, projection, 0.0, StdRng::seed_from_u64(42));
        let mut last = b.tick(0.0);
        for i in 1..2000 {
            last = b.tick(i as f64 * 16.0);
        }
        last
    };
    assert_eq!(run(), run());
}
