//! Heart spawning
//!
//! Spawn attributes are drawn from the session rng so a seed replays the
//! same hearts.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Heart, HeartId};
use crate::tuning::Tuning;

/// Cosmetic heart styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeartVariant {
    Red,
    Sparkling,
    Growing,
    TwoHearts,
    Arrow,
    Ribbon,
}

impl HeartVariant {
    pub const ALL: [HeartVariant; 6] = [
        HeartVariant::Red,
        HeartVariant::Sparkling,
        HeartVariant::Growing,
        HeartVariant::TwoHearts,
        HeartVariant::Arrow,
        HeartVariant::Ribbon,
    ];

    /// Emoji used by the browser front end
    pub fn symbol(&self) -> &'static str {
        match self {
            HeartVariant::Red => "\u{2764}\u{fe0f}",
            HeartVariant::Sparkling => "\u{1f496}",
            HeartVariant::Growing => "\u{1f497}",
            HeartVariant::TwoHearts => "\u{1f495}",
            HeartVariant::Arrow => "\u{1f498}",
            HeartVariant::Ribbon => "\u{1f49d}",
        }
    }
}

/// Build a new heart above the top edge at a random horizontal position.
///
/// `x` is uniform in `[margin, width - margin]`; areas too narrow for the
/// margins spawn at the center.
pub fn spawn_heart<R: Rng>(rng: &mut R, id: HeartId, area_width: f32, tuning: &Tuning) -> Heart {
    let margin = tuning.spawn_margin;
    let x = if area_width > 2.0 * margin {
        rng.random_range(margin..=area_width - margin)
    } else {
        area_width / 2.0
    };
    let size = rng.random_range(tuning.heart_size_min..=tuning.heart_size_max);
    let variant = HeartVariant::ALL[rng.random_range(0..HeartVariant::ALL.len())];

    Heart {
        id,
        x,
        y: tuning.spawn_y,
        size,
        variant,
        caught: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_within_bounds() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..500 {
            let heart = spawn_heart(&mut rng, id, 400.0, &tuning);
            assert_eq!(heart.id, id);
            assert!(heart.x >= 30.0 && heart.x <= 370.0, "x = {}", heart.x);
            assert!(heart.size >= 44.0 && heart.size <= 64.0);
            assert_eq!(heart.y, -60.0);
            assert!(!heart.caught);
        }
    }

    #[test]
    fn test_narrow_area_spawns_centered() {
        let mut rng = Pcg32::seed_from_u64(7);
        let heart = spawn_heart(&mut rng, 0, 50.0, &Tuning::default());
        assert_eq!(heart.x, 25.0);
    }

    #[test]
    fn test_same_seed_same_hearts() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for id in 0..20 {
            assert_eq!(
                spawn_heart(&mut a, id, 640.0, &tuning),
                spawn_heart(&mut b, id, 640.0, &tuning)
            );
        }
    }

    #[test]
    fn test_all_variants_show_up() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = [false; 6];
        for id in 0..300 {
            let heart = spawn_heart(&mut rng, id, 400.0, &tuning);
            let idx = HeartVariant::ALL
                .iter()
                .position(|v| *v == heart.variant)
                .unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
