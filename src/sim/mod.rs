//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulation clock advanced only by the host
//! - Seeded RNG only
//! - Stable iteration order (spawn order = heart id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod fall;
pub mod phase;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CatchZone, CollisionResult, Rect, evaluate};
pub use fall::{AnimationOutcome, FallAnimator, FallHandle, HeartPose, TweenAnimator};
pub use phase::{
    reset_to_start, resize_area, show_final, spawn_tick, start_game, start_game_with_area,
    stop_game,
};
pub use schedule::{FrameLoop, Interval, Timeout};
pub use spawn::{HeartVariant, spawn_heart};
pub use state::{Basket, GameEvent, GamePhase, GameState, Heart, HeartId, PlayArea, Toast};
pub use tick::{advance, idle_target, resolve_capture_complete, resolve_fall_complete, tick};
