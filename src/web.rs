//! Browser host binding
//!
//! The page owns the DOM, `requestAnimationFrame` and pointer listeners; it
//! forwards frame timestamps, resizes and normalized pointer positions here
//! and renders from the drained events and heart poses.

use wasm_bindgen::prelude::*;

use crate::consts::{FRAME_DT, MAX_FRAME_DT};
use crate::messages::MessageBook;
use crate::sim::{
    Basket, GameState, TweenAnimator, advance, reset_to_start, resize_area, start_game_with_area,
};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("Logger already initialized");
    }
    log::info!("Heart Catch starting...");
}

/// One game instance, driven by the page
#[wasm_bindgen]
pub struct HeartCatch {
    state: GameState,
    animator: TweenAnimator,
    messages: MessageBook,
    last_time: f64,
}

impl HeartCatch {
    fn build(seed: u64, messages: MessageBook, tuning: Tuning) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed, messages.total_targets(), tuning.clone()),
            animator: TweenAnimator::new(seed, tuning),
            messages,
            last_time: 0.0,
        }
    }
}

#[wasm_bindgen]
impl HeartCatch {
    /// Default messages and tuning, seeded from the clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> HeartCatch {
        let seed = js_sys::Date::now() as u64;
        Self::build(seed, MessageBook::default(), Tuning::default())
    }

    /// Custom messages and tuning (JSON). Throws on invalid data.
    pub fn from_config(messages_json: &str, tuning_json: &str) -> Result<HeartCatch, JsError> {
        let messages = MessageBook::from_json(messages_json)?;
        let tuning = Tuning::from_json(tuning_json)?;
        let seed = js_sys::Date::now() as u64;
        Ok(Self::build(seed, messages, tuning))
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        resize_area(&mut self.state, &mut self.animator, width, height);
    }

    /// Start a session with the play area's current size
    pub fn start(&mut self, width: f32, height: f32) -> bool {
        start_game_with_area(&mut self.state, &mut self.animator, width, height)
    }

    pub fn reset(&mut self) -> bool {
        reset_to_start(&mut self.state, &mut self.animator)
    }

    /// Pointer/touch offset from the play area's left edge
    pub fn pointer_move(&mut self, relative_x: f32, area_width: f32) {
        if let Some(percent) = Basket::percent_from_pointer(relative_x, area_width) {
            self.state.set_basket_position(percent);
        }
    }

    /// Called from `requestAnimationFrame` with its timestamp (ms)
    pub fn frame(&mut self, time_ms: f64) {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            FRAME_DT
        };
        self.last_time = time_ms;
        advance(&mut self.state, &mut self.animator, dt.min(MAX_FRAME_DT));
    }

    pub fn phase(&self) -> String {
        self.state.phase.as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn total_targets(&self) -> u32 {
        self.state.total_targets
    }

    pub fn basket_x(&self) -> f32 {
        self.state.basket.x
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.state.drain_events())?)
    }

    /// Current heart poses, as a JSON array
    pub fn poses(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.animator.poses(self.state.time))?)
    }

    pub fn message(&self, index: usize) -> String {
        self.messages.message(index).to_string()
    }

    /// Message on screen right now, if any
    pub fn toast_message(&self) -> Option<String> {
        self.state
            .toast
            .as_ref()
            .map(|toast| self.messages.message(toast.message_index).to_string())
    }

    pub fn final_message(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.messages.final_message())?)
    }
}

impl Default for HeartCatch {
    fn default() -> Self {
        Self::new()
    }
}
