//! Heart Catch - catch the falling hearts before they slip away
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, catching, phases)
//! - `messages`: Messages revealed per catch and the final payload
//! - `tuning`: Data-driven game balance
//! - `web`: Browser host binding (wasm32 only)

pub mod messages;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use messages::{FinalMessage, MessageBook};
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Extra catch depth below the basket band (px), covers per-frame movement
    pub const CATCH_TOLERANCE_BELOW: f32 = 15.0;
    /// Extra catch width on each side of the basket (px)
    pub const CATCH_TOLERANCE_SIDE: f32 = 10.0;
    /// Gap between the basket bottom and the play area bottom (px)
    pub const BASKET_BOTTOM_OFFSET: f32 = 20.0;

    /// Basket horizontal position limits (percent of play area width)
    pub const BASKET_X_MIN: f32 = 5.0;
    pub const BASKET_X_MAX: f32 = 95.0;
    pub const BASKET_X_START: f32 = 50.0;

    /// Basket defaults
    pub const BASKET_WIDTH: f32 = 100.0;
    pub const BASKET_HEIGHT: f32 = 75.0;

    /// Hearts never spawn closer than this to either side wall
    pub const SPAWN_MARGIN: f32 = 30.0;
    /// Spawn height, above the visible top edge
    pub const SPAWN_Y: f32 = -60.0;
    pub const HEART_SIZE_MIN: f32 = 44.0;
    pub const HEART_SIZE_MAX: f32 = 64.0;

    /// Seconds between spawns while playing
    pub const SPAWN_INTERVAL_SECS: f32 = 1.8;
    /// Pause between the last catch and the final screen
    pub const FINAL_DELAY_SECS: f32 = 1.8;

    /// Fall animation defaults
    pub const FALL_DURATION_MIN_SECS: f32 = 4.0;
    pub const FALL_DURATION_MAX_SECS: f32 = 7.0;
    pub const FALL_START_DELAY_SECS: f32 = 0.1;
    /// Hearts fall this far past the bottom edge before counting as missed
    pub const FALL_OVERSHOOT: f32 = 80.0;
    pub const SCALE_IN_SECS: f32 = 0.3;
    pub const SWAY_MIN: f32 = 20.0;
    pub const SWAY_MAX: f32 = 50.0;
    /// Rotation drift over a fall (degrees, sign picked at random)
    pub const ROTATION_MIN_DEG: f32 = 15.0;
    pub const ROTATION_MAX_DEG: f32 = 35.0;
    /// Initial tilt range (± degrees)
    pub const INITIAL_TILT_DEG: f32 = 15.0;

    /// Capture effect length
    pub const CAPTURE_SECS: f32 = 0.5;
    /// How long a revealed message stays on screen
    pub const TOAST_SECS: f32 = 3.2;

    /// Host frame step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame a host may feed in one step (tab switches etc.)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Quadratic ease-in (GSAP `power1.in`)
#[inline]
pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

/// Sinusoidal ease-in-out (GSAP `sine.inOut`)
#[inline]
pub fn ease_sine_in_out(t: f32) -> f32 {
    0.5 - 0.5 * (std::f32::consts::PI * t).cos()
}
