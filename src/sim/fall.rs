//! Fall and capture animation boundary
//!
//! The loop never inspects animation internals; it starts a fall, asks for a
//! heart's current bounds, and collects outcomes. `TweenAnimator` computes
//! poses analytically from elapsed time (ease-in descent, yoyo sway, rotation
//! drift), so no rendered geometry is ever measured.
//!
//! Per heart exactly one terminal outcome is produced: `FallComplete` if the
//! fall runs out, or `CaptureComplete` after a capture. Cancelling a fall
//! freezes it in place and guarantees it never reports `FallComplete`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Rect;
use super::spawn::HeartVariant;
use super::state::{Heart, HeartId};
use crate::consts::INITIAL_TILT_DEG;
use crate::tuning::Tuning;
use crate::{ease_in_quad, ease_sine_in_out};

/// Capture effect rise (px)
const CAPTURE_RISE: f32 = 40.0;
/// Capture effect final scale
const CAPTURE_SCALE: f32 = 1.8;
/// Keeps the animator stream apart from the spawner stream for the same seed
const ANIMATOR_STREAM_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Terminal animation events, delivered through `FallAnimator::poll`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// The heart left the bottom edge uncaught
    FallComplete(HeartId),
    /// The capture effect finished
    CaptureComplete(HeartId),
}

/// Returned by `start_fall`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallHandle {
    pub id: HeartId,
    /// Simulation time at which the fall completes
    pub ends_at: f64,
}

/// Visual state of a heart at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeartPose {
    pub id: HeartId,
    /// Emoji to draw
    pub symbol: &'static str,
    /// Top-left of the unscaled heart box
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub scale: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
}

impl HeartPose {
    /// Screen bounds, scaled around the box center
    pub fn bounds(&self) -> Rect {
        let half = self.size / 2.0;
        Rect::centered(self.x + half, self.y + half, self.size * self.scale)
    }
}

/// Animation collaborator as seen by the game loop
pub trait FallAnimator {
    /// Begin a heart's fall from its spawn point to past the bottom edge
    fn start_fall(&mut self, heart: &Heart, area_height: f32, now: f64) -> FallHandle;

    /// Stop a fall where it is; it will never report `FallComplete`.
    /// Returns false if no fall was in flight.
    fn cancel_fall(&mut self, id: HeartId, now: f64) -> bool;

    /// Play the capture effect; reports `CaptureComplete` when done
    fn play_capture(&mut self, id: HeartId, now: f64);

    /// Current on-screen bounds of a falling heart
    fn bounds(&self, id: HeartId, now: f64) -> Option<Rect>;

    /// Append every outcome due at `now`
    fn poll(&mut self, now: f64, outcomes: &mut Vec<AnimationOutcome>);

    /// Drop all in-flight animations (session reset)
    fn clear(&mut self);
}

#[derive(Debug, Clone)]
struct FallTrack {
    id: HeartId,
    variant: HeartVariant,
    origin: Vec2,
    size: f32,
    start: f64,
    delay: f32,
    duration: f32,
    target_y: f32,
    sway: f32,
    tilt_deg: f32,
    rotation_deg: f32,
    scale_in: f32,
    frozen_at: Option<f64>,
}

impl FallTrack {
    fn ends_at(&self) -> f64 {
        self.start + (self.delay + self.duration) as f64
    }

    fn pose(&self, now: f64) -> HeartPose {
        let now = self.frozen_at.map_or(now, |t| t.min(now));
        let t = (now - self.start).max(0.0) as f32;
        let fall_t = ((t - self.delay) / self.duration).clamp(0.0, 1.0);
        let y = self.origin.y + (self.target_y - self.origin.y) * ease_in_quad(fall_t);

        // Out to full sway over half the fall, then back
        let sway_t = ((t - self.delay) / (self.duration / 2.0)).clamp(0.0, 2.0);
        let sway_t = if sway_t <= 1.0 { sway_t } else { 2.0 - sway_t };
        let x = self.origin.x + self.sway * ease_sine_in_out(sway_t);

        let scale = if self.scale_in > 0.0 {
            (t / self.scale_in).min(1.0)
        } else {
            1.0
        };
        let spin_t = (t / self.duration).min(1.0);

        HeartPose {
            id: self.id,
            symbol: self.variant.symbol(),
            x,
            y,
            size: self.size,
            scale,
            rotation_deg: self.tilt_deg + self.rotation_deg * ease_sine_in_out(spin_t),
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
struct CaptureTrack {
    from: HeartPose,
    start: f64,
    duration: f32,
}

impl CaptureTrack {
    fn done_at(&self) -> f64 {
        self.start + self.duration as f64
    }

    fn pose(&self, now: f64) -> HeartPose {
        let t = if self.duration > 0.0 {
            (((now - self.start) as f32) / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        // power2.out
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        HeartPose {
            y: self.from.y - CAPTURE_RISE * eased,
            scale: self.from.scale + (CAPTURE_SCALE - self.from.scale) * eased,
            opacity: 1.0 - eased,
            ..self.from
        }
    }
}

/// Analytic tween animator with seeded cosmetic jitter
#[derive(Debug, Clone)]
pub struct TweenAnimator {
    rng: Pcg32,
    tuning: Tuning,
    falls: Vec<FallTrack>,
    captures: Vec<CaptureTrack>,
}

impl TweenAnimator {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ ANIMATOR_STREAM_SALT),
            tuning,
            falls: Vec::new(),
            captures: Vec::new(),
        }
    }

    /// Poses of everything on screen, in heart id order
    pub fn poses(&self, now: f64) -> Vec<HeartPose> {
        let mut poses: Vec<HeartPose> = self
            .falls
            .iter()
            .map(|f| f.pose(now))
            .chain(self.captures.iter().map(|c| c.pose(now)))
            .collect();
        poses.sort_by_key(|p| p.id);
        poses
    }

    pub fn in_flight(&self) -> usize {
        self.falls.iter().filter(|f| f.frozen_at.is_none()).count()
    }

    fn random_sign(&mut self) -> f32 {
        if self.rng.random_bool(0.5) { 1.0 } else { -1.0 }
    }
}

impl FallAnimator for TweenAnimator {
    fn start_fall(&mut self, heart: &Heart, area_height: f32, now: f64) -> FallHandle {
        let t = &self.tuning;
        let (dur_min, dur_max) = (t.fall_duration_min_secs, t.fall_duration_max_secs);
        let (sway_min, sway_max) = (t.sway_min, t.sway_max);
        let (rot_min, rot_max) = (t.rotation_min_deg, t.rotation_max_deg);
        let (delay, scale_in) = (t.fall_start_delay_secs, t.scale_in_secs);
        let target_y = area_height + t.fall_overshoot;

        let duration = self.rng.random_range(dur_min..=dur_max);
        let sway = self.rng.random_range(sway_min..=sway_max) * self.random_sign();
        let rotation_deg = self.rng.random_range(rot_min..=rot_max) * self.random_sign();
        let tilt_deg = self
            .rng
            .random_range(-INITIAL_TILT_DEG..=INITIAL_TILT_DEG);

        // Restarting an id replaces its old track
        self.falls.retain(|f| f.id != heart.id);
        let track = FallTrack {
            id: heart.id,
            variant: heart.variant,
            origin: Vec2::new(heart.x, heart.y),
            size: heart.size,
            start: now,
            delay,
            duration,
            target_y,
            sway,
            tilt_deg,
            rotation_deg,
            scale_in,
            frozen_at: None,
        };
        let handle = FallHandle {
            id: heart.id,
            ends_at: track.ends_at(),
        };
        self.falls.push(track);
        handle
    }

    fn cancel_fall(&mut self, id: HeartId, now: f64) -> bool {
        match self
            .falls
            .iter_mut()
            .find(|f| f.id == id && f.frozen_at.is_none())
        {
            Some(track) => {
                track.frozen_at = Some(now);
                true
            }
            None => false,
        }
    }

    fn play_capture(&mut self, id: HeartId, now: f64) {
        let from = match self.falls.iter().position(|f| f.id == id) {
            Some(idx) => self.falls.remove(idx).pose(now),
            None => {
                log::warn!("capture for heart {} without a fall track", id);
                HeartPose {
                    id,
                    symbol: HeartVariant::Red.symbol(),
                    x: 0.0,
                    y: 0.0,
                    size: 0.0,
                    scale: 1.0,
                    rotation_deg: 0.0,
                    opacity: 1.0,
                }
            }
        };
        self.captures.push(CaptureTrack {
            from,
            start: now,
            duration: self.tuning.capture_secs,
        });
    }

    fn bounds(&self, id: HeartId, now: f64) -> Option<Rect> {
        self.falls
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.pose(now).bounds())
    }

    fn poll(&mut self, now: f64, outcomes: &mut Vec<AnimationOutcome>) {
        self.falls.retain(|f| {
            let done = f.frozen_at.is_none() && now >= f.ends_at();
            if done {
                outcomes.push(AnimationOutcome::FallComplete(f.id));
            }
            !done
        });
        self.captures.retain(|c| {
            let done = now >= c.done_at();
            if done {
                outcomes.push(AnimationOutcome::CaptureComplete(c.from.id));
            }
            !done
        });
    }

    fn clear(&mut self) {
        self.falls.clear();
        self.captures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::HeartVariant;

    fn heart(id: HeartId, x: f32) -> Heart {
        Heart {
            id,
            x,
            y: -60.0,
            size: 50.0,
            variant: HeartVariant::Red,
            caught: false,
        }
    }

    /// Fixed 4s fall, no sway/spin/scale-in, 0.1s start delay
    fn steady_tuning() -> Tuning {
        Tuning {
            fall_duration_min_secs: 4.0,
            fall_duration_max_secs: 4.0,
            sway_min: 0.0,
            sway_max: 0.0,
            rotation_min_deg: 0.0,
            rotation_max_deg: 0.0,
            scale_in_secs: 0.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_fall_descends_to_overshoot() {
        let mut anim = TweenAnimator::new(1, steady_tuning());
        let handle = anim.start_fall(&heart(0, 100.0), 600.0, 0.0);
        assert!((handle.ends_at - 4.1).abs() < 1e-6);

        let start = anim.bounds(0, 0.0).unwrap();
        assert_eq!(start.top, -60.0);
        assert_eq!(start.center_x(), 125.0);

        let mid = anim.bounds(0, 2.1).unwrap();
        // ease-in: a quarter of the distance at half time
        assert!((mid.top - (-60.0 + 740.0 * 0.25)).abs() < 1e-3);

        let end = anim.bounds(0, 4.1).unwrap();
        assert!((end.top - 680.0).abs() < 1e-3);
    }

    #[test]
    fn test_fall_reports_completion_once() {
        let mut anim = TweenAnimator::new(1, steady_tuning());
        anim.start_fall(&heart(0, 100.0), 600.0, 0.0);
        let mut out = Vec::new();
        anim.poll(4.0, &mut out);
        assert!(out.is_empty());
        anim.poll(4.2, &mut out);
        assert_eq!(out, vec![AnimationOutcome::FallComplete(0)]);
        anim.poll(9.0, &mut out);
        assert_eq!(out.len(), 1);
        assert!(anim.bounds(0, 9.0).is_none());
    }

    #[test]
    fn test_cancelled_fall_never_completes() {
        let mut anim = TweenAnimator::new(1, steady_tuning());
        anim.start_fall(&heart(0, 100.0), 600.0, 0.0);
        assert!(anim.cancel_fall(0, 2.0));
        assert!(!anim.cancel_fall(0, 2.0));

        let frozen = anim.bounds(0, 3.0).unwrap();
        assert_eq!(frozen, anim.bounds(0, 2.0).unwrap());

        let mut out = Vec::new();
        anim.poll(10.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_capture_completes_after_effect() {
        let mut anim = TweenAnimator::new(1, steady_tuning());
        anim.start_fall(&heart(3, 100.0), 600.0, 0.0);
        anim.cancel_fall(3, 1.0);
        anim.play_capture(3, 1.0);
        assert!(anim.bounds(3, 1.2).is_none());

        let poses = anim.poses(1.25);
        assert_eq!(poses.len(), 1);
        assert!(poses[0].opacity < 1.0 && poses[0].scale > 1.0);

        let mut out = Vec::new();
        anim.poll(1.4, &mut out);
        assert!(out.is_empty());
        anim.poll(1.5, &mut out);
        assert_eq!(out, vec![AnimationOutcome::CaptureComplete(3)]);
    }

    #[test]
    fn test_pose_carries_variant_symbol() {
        let mut anim = TweenAnimator::new(1, steady_tuning());
        let ribbon = Heart {
            variant: HeartVariant::Ribbon,
            ..heart(2, 100.0)
        };
        anim.start_fall(&ribbon, 600.0, 0.0);
        anim.start_fall(&heart(1, 200.0), 600.0, 0.0);

        let poses = anim.poses(1.0);
        assert_eq!(poses[0].symbol, HeartVariant::Red.symbol());
        assert_eq!(poses[1].symbol, HeartVariant::Ribbon.symbol());

        // The capture effect keeps drawing the same heart
        anim.play_capture(2, 1.0);
        let captured = anim.poses(1.1);
        assert_eq!(captured[1].id, 2);
        assert_eq!(captured[1].symbol, HeartVariant::Ribbon.symbol());
    }

    #[test]
    fn test_sway_returns_to_origin() {
        let tuning = Tuning {
            sway_min: 30.0,
            sway_max: 30.0,
            ..steady_tuning()
        };
        let mut anim = TweenAnimator::new(5, tuning);
        anim.start_fall(&heart(0, 100.0), 600.0, 0.0);
        let apex = anim.bounds(0, 2.1).unwrap().center_x();
        assert!((apex - 125.0).abs() > 29.0);
        let back = anim.bounds(0, 4.1).unwrap().center_x();
        assert!((back - 125.0).abs() < 1e-3);
    }

    #[test]
    fn test_durations_stay_in_range() {
        let mut anim = TweenAnimator::new(11, Tuning::default());
        for id in 0..100 {
            let handle = anim.start_fall(&heart(id, 100.0), 600.0, 0.0);
            assert!(handle.ends_at >= 4.1 - 1e-6 && handle.ends_at <= 7.1 + 1e-6);
        }
        assert_eq!(anim.in_flight(), 100);
        anim.clear();
        assert_eq!(anim.in_flight(), 0);
    }
}
