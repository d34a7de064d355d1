use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, RngCore};
use tracing::{debug, info};

use crate::config::BehaviorSettings;
use crate::utils::math::{heading_towards, shortest_angle_delta, wrap_angle};
use super::pose::Mode;
use super::projection::FloorProjection;

/// Non-walk modes slide this fraction of the remaining distance each frame.
pub const IDLE_FOLLOW: f32 = 0.15;
/// Share of the floor radius a single wander step may cover.
pub const WANDER_REACH: f32 = 0.4;
pub const POINTER_DEAD_ZONE: f32 = 20.0;
pub const POINTER_TARGET_SMOOTHING: f32 = 0.25;
pub const POINTER_HEADING_SMOOTHING: f32 = 0.3;
/// Extra slack beyond the arrival radius before a pointer target forces a walk.
pub const POINTER_WALK_SLACK: f32 = 100.0;

const CADENCE_MIN: f32 = 0.65;
const WANDER_CHANCE: f64 = 0.55;
const IDLE_CHANCE: f64 = 0.80;

/// Delay windows in milliseconds before the next autonomous decision.
const AFTER_ARRIVAL_MS: (f64, f64) = (2000.0, 6000.0);
const AFTER_WANDER_MS: (f64, f64) = (1500.0, 4000.0);
const AFTER_IDLE_MS: (f64, f64) = (2000.0, 6000.0);
const AFTER_SIT_MS: (f64, f64) = (4000.0, 9000.0);
const AFTER_POINTER_LEAVE_MS: (f64, f64) = (1000.0, 4000.0);

/// Uniform draws in [0, 1) used for every random decision.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    fn between(&mut self, (min, max): (f64, f64)) -> f64 {
        min + self.next_unit() * (max - min)
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when it runs out. Lets callers force
/// a particular decision branch.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    index: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), index: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.index % self.values.len()];
        self.index += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Mutable simulation state of the wandering sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorState {
    /// Floor plane is XZ, Y stays at the start height.
    pub position: Vec3,
    /// Radians about +Y in (-π, π].
    pub heading: f32,
    pub mode: Mode,
    pub target_position: Vec3,
    pub target_heading: f32,
    /// Timestamp (ms) after which the next autonomous decision may fire.
    pub next_decision_ms: f64,
    /// Seconds spent walking, drives the stride cadence.
    pub walk_phase: f32,
    pub pointer_active: bool,
}

impl BehaviorState {
    /// Idle at `position` facing +Z, waiting for the decision at `next_decision_ms`.
    pub fn at_rest(position: Vec3, next_decision_ms: f64) -> Self {
        Self {
            position,
            heading: 0.0,
            mode: Mode::Idle,
            target_position: position,
            target_heading: 0.0,
            next_decision_ms,
            walk_phase: 0.0,
            pointer_active: false,
        }
    }
}

/// Read-only view published after every tick for rendering and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorSnapshot {
    pub position: Vec3,
    /// Euler rotation, only `y` (heading) is driven.
    pub rotation: Vec3,
    pub mode: Mode,
}

/// Pick a random point within `WANDER_REACH` of `from`, kept on the floor disk.
pub fn pick_wander_target<S: RandomSource + ?Sized>(from: Vec3, floor_radius: f32, rng: &mut S) -> Vec3 {
    let max_step = floor_radius * WANDER_REACH;
    let step = rng.next_unit() as f32 * max_step;
    let angle = rng.next_unit() as f32 * TAU;

    let mut candidate = from + Vec3::new(angle.sin() * step, 0.0, angle.cos() * step);

    let dist = Vec2::new(candidate.x, candidate.z).length();
    if dist > floor_radius {
        let scale = floor_radius / dist;
        candidate.x *= scale;
        candidate.z *= scale;
    }
    candidate
}

/// Idle / walk / sit state machine, ticked once per animation frame.
pub struct Behavior<R: RandomSource = StdRng> {
    settings: BehaviorSettings,
    projection: FloorProjection,
    state: BehaviorState,
    last_tick_ms: Option<f64>,
    rng: R,
}

impl<R: RandomSource> Behavior<R> {
    pub fn new(settings: BehaviorSettings, projection: FloorProjection, now_ms: f64, mut rng: R) -> Self {
        let start = settings.start_position;
        let next_decision_ms = now_ms + rng.between(AFTER_ARRIVAL_MS);
        info!("Sprite behavior started at {:?}, first decision in {:.0}ms", start, next_decision_ms - now_ms);
        Self::from_state(settings, projection, BehaviorState::at_rest(start, next_decision_ms), rng)
    }

    /// Resume from a known state. The frame clock restarts, so the next tick
    /// has no elapsed time.
    pub fn from_state(settings: BehaviorSettings, projection: FloorProjection, state: BehaviorState, rng: R) -> Self {
        Self {
            settings,
            projection,
            state,
            last_tick_ms: None,
            rng,
        }
    }

    pub fn state(&self) -> &BehaviorState {
        &self.state
    }

    pub fn settings(&self) -> &BehaviorSettings {
        &self.settings
    }

    pub fn projection(&self) -> &FloorProjection {
        &self.projection
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.projection.width = width;
        self.projection.height = height;
    }

    pub fn snapshot(&self) -> BehaviorSnapshot {
        BehaviorSnapshot {
            position: self.state.position,
            rotation: Vec3::new(0.0, self.state.heading, 0.0),
            mode: self.state.mode,
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if self.state.mode != mode {
            debug!("Sprite mode {} -> {}", self.state.mode, mode);
            self.state.mode = mode;
        }
    }

    fn frame_delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_tick_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, self.settings.max_frame_delta.max(0.0)),
            None => 0.0,
        };
        self.last_tick_ms = Some(now_ms);
        dt
    }

    /// Advance one frame and publish the result.
    pub fn tick(&mut self, now_ms: f64) -> BehaviorSnapshot {
        let dt = self.frame_delta(now_ms);

        self.step_position(dt);
        self.step_heading(dt);

        let pointer_driven = self.state.pointer_active;
        let dist_to_target = self.state.position.distance(self.state.target_position);

        if dist_to_target < self.settings.arrival_radius && self.state.mode == Mode::Walk {
            self.state.target_position = self.state.position;
            self.state.pointer_active = false;
            self.state.next_decision_ms = now_ms + self.rng.between(AFTER_ARRIVAL_MS);
            self.set_mode(Mode::Idle);
        }

        if !pointer_driven {
            if now_ms >= self.state.next_decision_ms {
                self.decide(now_ms);
            }
        } else if self.state.mode != Mode::Walk
            && dist_to_target > self.settings.arrival_radius + POINTER_WALK_SLACK
        {
            self.set_mode(Mode::Walk);
        }

        self.snapshot()
    }

    fn step_position(&mut self, dt: f32) {
        let to_target = self.state.target_position - self.state.position;
        let dist = to_target.length();

        if self.state.mode == Mode::Walk && dist > 0.0 && dt > 0.0 {
            self.state.walk_phase += dt;
            let phase = self.state.walk_phase * self.settings.walk_frequency;
            let cadence = CADENCE_MIN + (1.0 - CADENCE_MIN) * phase.sin().abs();
            let max_step = self.settings.walk_speed * cadence * dt;

            if dist <= max_step {
                self.state.position = self.state.target_position;
            } else {
                self.state.position += to_target * (max_step / dist);
            }
        } else {
            // Fixed per-frame ease, so the slide speed follows the frame rate.
            self.state.position = self.state.position.lerp(self.state.target_position, IDLE_FOLLOW);
        }
    }

    fn step_heading(&mut self, dt: f32) {
        let delta = shortest_angle_delta(self.state.heading, self.state.target_heading);
        let max_turn = (self.settings.max_turn_speed * dt).max(0.0);
        let step = delta.clamp(-max_turn, max_turn);
        self.state.heading = wrap_angle(self.state.heading + step);
    }

    fn decide(&mut self, now_ms: f64) {
        let choice = self.rng.next_unit();

        if choice < WANDER_CHANCE {
            let from = self.state.position;
            let target = pick_wander_target(from, self.settings.floor_radius, &mut self.rng);
            self.state.target_position = target;
            self.state.target_heading = wrap_angle(heading_towards(target - from));
            self.state.next_decision_ms = now_ms + self.rng.between(AFTER_WANDER_MS);
            debug!("Wandering towards ({:.0}, {:.0})", target.x, target.z);
            self.set_mode(Mode::Walk);
        } else if choice < IDLE_CHANCE {
            self.state.target_position = self.state.position;
            self.state.next_decision_ms = now_ms + self.rng.between(AFTER_IDLE_MS);
            self.set_mode(Mode::Idle);
        } else {
            self.state.target_position = self.state.position;
            self.state.next_decision_ms = now_ms + self.rng.between(AFTER_SIT_MS);
            self.set_mode(Mode::Sit);
        }
    }

    /// Steer towards a pointer at viewport pixel `pointer`. Returns false when
    /// the move fell inside the dead zone and was ignored.
    pub fn pointer_move(&mut self, pointer: Vec2) -> bool {
        let raw_target = self.projection.screen_to_world(pointer, self.settings.start_position.y);
        let from = self.state.position;

        if raw_target.distance(from) < POINTER_DEAD_ZONE {
            return false;
        }

        let smoothed = self.state.target_position.lerp(raw_target, POINTER_TARGET_SMOOTHING);
        self.state.target_position = smoothed;

        let desired = heading_towards(smoothed - from);
        let delta = shortest_angle_delta(self.state.target_heading, desired);
        self.state.target_heading = wrap_angle(self.state.target_heading + delta * POINTER_HEADING_SMOOTHING);

        self.state.pointer_active = true;
        true
    }

    pub fn pointer_leave(&mut self, now_ms: f64) {
        self.state.pointer_active = false;
        self.state.next_decision_ms = now_ms + self.rng.between(AFTER_POINTER_LEAVE_MS);
    }
}
