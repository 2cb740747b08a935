//! Phase transitions: Start -> Playing -> Final
//!
//! Every entry point here is safe to call in any phase; requests that do not
//! apply to the current phase are no-ops returning `false`.

use super::fall::FallAnimator;
use super::spawn::spawn_heart;
use super::state::{GameEvent, GamePhase, GameState, HeartId};

/// Start a session. Only valid from `Start`.
///
/// Resets score, hearts and ids, arms the spawn cadence and the frame loop,
/// and spawns the first heart right away.
pub fn start_game<A: FallAnimator>(state: &mut GameState, animator: &mut A) -> bool {
    if state.phase != GamePhase::Start {
        log::warn!("start ignored in phase {}", state.phase.as_str());
        return false;
    }

    state.reset_session();
    animator.clear();
    state.phase = GamePhase::Playing;
    state.emit(GameEvent::PhaseChanged {
        phase: GamePhase::Playing,
    });
    state.emit(GameEvent::ScoreChanged { score: 0 });

    let now = state.time;
    state.spawn_timer.start(now);
    state.frame_loop.request();
    log::info!(
        "Session started: {} hearts to catch, area {}x{}",
        state.total_targets,
        state.play_area.width,
        state.play_area.height
    );

    spawn_tick(state, animator);
    true
}

/// Start a session on a freshly measured play area
pub fn start_game_with_area<A: FallAnimator>(
    state: &mut GameState,
    animator: &mut A,
    width: f32,
    height: f32,
) -> bool {
    state.resize(width, height);
    start_game(state, animator)
}

/// Host layout change. A spawn deferred for lack of dimensions runs now
/// instead of waiting for the next cadence fire.
pub fn resize_area<A: FallAnimator>(
    state: &mut GameState,
    animator: &mut A,
    width: f32,
    height: f32,
) {
    state.resize(width, height);
    if state.spawn_deferred && state.play_area.is_measured() {
        log::debug!("Play area measured, running deferred spawn");
        spawn_tick(state, animator);
    }
}

/// Cancel the spawn cadence and the frame loop. Idempotent; returns whether
/// anything was still running.
pub fn stop_game(state: &mut GameState) -> bool {
    let was_running = state.spawn_timer.is_active() || state.frame_loop.is_running();
    state.spawn_timer.cancel();
    state.frame_loop.cancel();
    state.spawn_deferred = false;
    if was_running {
        log::debug!("Spawning and frame loop stopped");
    }
    was_running
}

/// Enter `Final`. Fired by the final-screen timer once the target is reached.
pub fn show_final(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    stop_game(state);
    state.final_timer.cancel();
    state.phase = GamePhase::Final;
    state.toast = None;
    state.emit(GameEvent::PhaseChanged {
        phase: GamePhase::Final,
    });
    log::info!("All {} hearts caught, showing final screen", state.score);
    true
}

/// Return to `Start` from any other phase, discarding the whole session,
/// including a pending final-screen timer.
pub fn reset_to_start<A: FallAnimator>(state: &mut GameState, animator: &mut A) -> bool {
    if state.phase == GamePhase::Start {
        return false;
    }
    stop_game(state);
    state.reset_session();
    animator.clear();
    state.phase = GamePhase::Start;
    state.emit(GameEvent::PhaseChanged {
        phase: GamePhase::Start,
    });
    log::info!("Session reset");
    true
}

/// Spawn-cadence handler: add one heart and start its fall.
///
/// No-op unless playing with the cadence armed. An unmeasured play area
/// defers the spawn to the next fire.
pub fn spawn_tick<A: FallAnimator>(state: &mut GameState, animator: &mut A) -> Option<HeartId> {
    if state.phase != GamePhase::Playing || !state.spawn_timer.is_active() {
        return None;
    }
    if !state.play_area.is_measured() {
        log::warn!("Play area not measured yet, spawn deferred");
        state.spawn_deferred = true;
        return None;
    }
    state.spawn_deferred = false;

    let id = state.next_entity_id();
    let heart = spawn_heart(&mut state.rng, id, state.play_area.width, &state.tuning);
    let fall = animator.start_fall(&heart, state.play_area.height, state.time);
    log::debug!(
        "Spawned heart {} at x={:.1} size={:.1}, lands at {:.2}s",
        id,
        heart.x,
        heart.size,
        fall.ends_at
    );

    state.hearts.push(heart.clone());
    state.emit(GameEvent::HeartSpawned { heart });
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TweenAnimator;
    use crate::sim::state::PlayArea;
    use crate::tuning::Tuning;

    fn setup() -> (GameState, TweenAnimator) {
        let mut state = GameState::new(42, 3, Tuning::default());
        state.resize(400.0, 600.0);
        (state, TweenAnimator::new(42, Tuning::default()))
    }

    #[test]
    fn test_start_spawns_first_heart() {
        let (mut state, mut anim) = setup();
        assert!(start_game(&mut state, &mut anim));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.hearts.len(), 1);
        assert_eq!(state.hearts[0].id, 0);
        assert!(state.spawn_timer.is_active());
        assert!(state.frame_loop.is_running());
        assert_eq!(
            state.events()[0],
            GameEvent::PhaseChanged {
                phase: GamePhase::Playing
            }
        );
    }

    #[test]
    fn test_start_only_from_start() {
        let (mut state, mut anim) = setup();
        assert!(start_game(&mut state, &mut anim));
        assert!(!start_game(&mut state, &mut anim));
        assert_eq!(state.hearts.len(), 1);
    }

    #[test]
    fn test_start_without_dimensions_defers_spawn() {
        let mut state = GameState::new(42, 3, Tuning::default());
        let mut anim = TweenAnimator::new(42, Tuning::default());
        assert!(start_game(&mut state, &mut anim));
        assert!(state.hearts.is_empty());

        state.resize(400.0, 600.0);
        assert_eq!(spawn_tick(&mut state, &mut anim), Some(0));
    }

    #[test]
    fn test_resize_runs_deferred_first_spawn() {
        let mut state = GameState::new(42, 3, Tuning::default());
        let mut anim = TweenAnimator::new(42, Tuning::default());
        start_game(&mut state, &mut anim);
        assert!(state.spawn_deferred);

        resize_area(&mut state, &mut anim, 400.0, 600.0);
        assert_eq!(state.hearts.len(), 1);
        assert_eq!(anim.in_flight(), 1);
        assert!(!state.spawn_deferred);

        // Later layout changes do not spawn on their own
        resize_area(&mut state, &mut anim, 500.0, 600.0);
        assert_eq!(state.hearts.len(), 1);
    }

    #[test]
    fn test_resize_without_deferred_spawn_only_resizes() {
        let (mut state, mut anim) = setup();
        start_game(&mut state, &mut anim);
        stop_game(&mut state);
        resize_area(&mut state, &mut anim, 0.0, 0.0);
        resize_area(&mut state, &mut anim, 300.0, 500.0);
        assert_eq!(state.hearts.len(), 1);
        assert_eq!(state.play_area, PlayArea::new(300.0, 500.0));
    }

    #[test]
    fn test_start_with_area_reads_latest_dimensions() {
        let mut state = GameState::new(42, 3, Tuning::default());
        let mut anim = TweenAnimator::new(42, Tuning::default());
        state.resize(100.0, 100.0);
        assert!(start_game_with_area(&mut state, &mut anim, 400.0, 600.0));
        assert_eq!(state.play_area, PlayArea::new(400.0, 600.0));
        assert_eq!(state.hearts.len(), 1);
        let x = state.hearts[0].x;
        assert!((30.0..=370.0).contains(&x));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut state, mut anim) = setup();
        start_game(&mut state, &mut anim);
        assert!(stop_game(&mut state));
        assert!(!stop_game(&mut state));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_spawn_after_stop_adds_nothing() {
        let (mut state, mut anim) = setup();
        start_game(&mut state, &mut anim);
        stop_game(&mut state);
        assert_eq!(spawn_tick(&mut state, &mut anim), None);
        assert_eq!(state.hearts.len(), 1);
    }

    #[test]
    fn test_show_final_once() {
        let (mut state, mut anim) = setup();
        assert!(!show_final(&mut state));
        start_game(&mut state, &mut anim);
        assert!(show_final(&mut state));
        assert!(!show_final(&mut state));
        let finals = state
            .events()
            .iter()
            .filter(|e| {
                **e == GameEvent::PhaseChanged {
                    phase: GamePhase::Final,
                }
            })
            .count();
        assert_eq!(finals, 1);
        assert!(!state.frame_loop.is_running());
    }

    #[test]
    fn test_reset_reinitializes_session() {
        let (mut state, mut anim) = setup();
        start_game(&mut state, &mut anim);
        state.score = 2;
        state.final_timer.start(state.time, 1.8);
        assert!(reset_to_start(&mut state, &mut anim));
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert!(state.hearts.is_empty());
        assert!(!state.final_timer.is_pending());
        assert!(!state.spawn_timer.is_active());
        assert_eq!(anim.in_flight(), 0);
        assert!(!reset_to_start(&mut state, &mut anim));

        assert!(start_game(&mut state, &mut anim));
        assert_eq!(state.hearts[0].id, 0);
    }
}
