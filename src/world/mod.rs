pub mod behavior;
pub mod pose;
pub mod projection;
pub mod rig;

pub use behavior::{Behavior, BehaviorSnapshot, BehaviorState, RandomSource, ScriptedSource};
pub use pose::{pose_rig, Mode};
pub use projection::{FloorProjection, ScreenPlacement};
pub use rig::Rig;
