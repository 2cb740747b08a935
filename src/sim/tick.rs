//! Frame loop and simulation clock
//!
//! `tick` is the per-frame collision pass. `advance` is what a host calls
//! once per rendered frame: it moves the clock, runs the frame, settles
//! animation outcomes, then fires whichever timers came due.

use super::collision::CatchZone;
use super::fall::{AnimationOutcome, FallAnimator};
use super::phase::{show_final, spawn_tick, stop_game};
use super::schedule::Timeout;
use super::state::{GameEvent, GamePhase, GameState, HeartId, Toast};
use crate::messages::message_index_for_catch;

/// Collision pass over all live hearts, in spawn order.
///
/// Returns the number of hearts caught this frame. Scanning stops as soon as
/// the session target is reached; the spawner and the loop are cancelled in
/// the same frame.
pub fn tick<A: FallAnimator>(state: &mut GameState, animator: &mut A) -> usize {
    if state.phase != GamePhase::Playing || !state.frame_loop.begin_frame() {
        return 0;
    }
    if !state.play_area.is_measured() {
        return 0;
    }

    let now = state.time;
    let zone = CatchZone::new(&state.basket, &state.play_area);
    let mut catches = 0;

    for idx in 0..state.hearts.len() {
        let heart = &state.hearts[idx];
        if heart.caught {
            continue;
        }
        let Some(bounds) = animator.bounds(heart.id, now) else {
            continue;
        };
        if !zone.test(&bounds).is_hit() {
            continue;
        }

        catch_heart(state, animator, idx);
        catches += 1;
        if state.target_reached() {
            break;
        }
    }

    catches
}

/// Register a catch for the heart at `idx` in the live set
fn catch_heart<A: FallAnimator>(state: &mut GameState, animator: &mut A, idx: usize) {
    let now = state.time;
    let heart = &mut state.hearts[idx];
    heart.caught = true;
    let heart = heart.clone();

    state.score += 1;
    animator.cancel_fall(heart.id, now);
    animator.play_capture(heart.id, now);

    let message_index = message_index_for_catch(state.score, state.total_targets);
    log::debug!(
        "Caught heart {} ({}/{}), message {}",
        heart.id,
        state.score,
        state.total_targets,
        message_index
    );
    state.emit(GameEvent::HeartCaught {
        heart,
        message_index,
    });
    state.emit(GameEvent::ScoreChanged { score: state.score });
    show_toast(state, message_index);

    if state.target_reached() {
        stop_game(state);
        state.final_timer.start(now, state.tuning.final_delay_secs);
        log::info!("Target of {} hearts reached", state.total_targets);
    }
}

/// Display a message, replacing any message still on screen
fn show_toast(state: &mut GameState, message_index: usize) {
    let mut hide = Timeout::new();
    hide.start(state.time, state.tuning.toast_secs);
    state.toast = Some(Toast {
        message_index,
        hide,
    });
}

/// A heart's fall ran out. Ignored unless the heart is live and uncaught, so
/// a catch registered earlier always wins over a late fall completion.
pub fn resolve_fall_complete(state: &mut GameState, id: HeartId) -> bool {
    let caught = match state.heart(id) {
        Some(heart) => heart.caught,
        None => {
            log::warn!("Stale fall completion for heart {}", id);
            return false;
        }
    };
    if caught {
        log::debug!("Fall completion for caught heart {} ignored", id);
        return false;
    }
    let Some(heart) = state.remove_heart(id) else {
        return false;
    };
    log::debug!("Missed heart {}", id);
    state.emit(GameEvent::HeartMissed { heart });
    true
}

/// A capture effect finished; drop the heart from the live set
pub fn resolve_capture_complete(state: &mut GameState, id: HeartId) -> bool {
    if state.remove_heart(id).is_none() {
        log::warn!("Stale capture completion for heart {}", id);
        return false;
    }
    true
}

/// Advance the session by `dt` seconds
pub fn advance<A: FallAnimator>(state: &mut GameState, animator: &mut A, dt: f32) {
    state.time += dt.max(0.0) as f64;
    let now = state.time;

    // Collisions first: a heart inside the basket on the frame its fall
    // ends is caught, not missed
    tick(state, animator);

    let mut outcomes = Vec::new();
    animator.poll(now, &mut outcomes);
    for outcome in outcomes {
        match outcome {
            AnimationOutcome::FallComplete(id) => {
                resolve_fall_complete(state, id);
            }
            AnimationOutcome::CaptureComplete(id) => {
                resolve_capture_complete(state, id);
            }
        }
    }

    while state.spawn_timer.poll(now) {
        spawn_tick(state, animator);
    }

    if state.final_timer.poll(now) {
        show_final(state);
    }

    let toast_expired = state
        .toast
        .as_mut()
        .is_some_and(|toast| toast.hide.poll(now));
    if toast_expired {
        state.toast = None;
        state.emit(GameEvent::MessageHidden);
    }
}

/// Idle/demo steering: basket position (percent) under the lowest uncaught
/// heart, if any is on screen
pub fn idle_target<A: FallAnimator>(state: &GameState, animator: &A) -> Option<f32> {
    let width = state.play_area.width;
    if width <= 0.0 {
        return None;
    }
    state
        .hearts
        .iter()
        .filter(|h| !h.caught)
        .filter_map(|h| animator.bounds(h.id, state.time))
        .max_by(|a, b| {
            a.bottom()
                .partial_cmp(&b.bottom())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|bounds| bounds.center_x() / width * 100.0)
}
