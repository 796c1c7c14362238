//! Downed body-angle wiggle.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Ticks in one wiggle cycle.
const CYCLE_TICKS: u64 = 300;
/// Degrees added or removed per wiggling tick.
const WIGGLE_STEP: f32 = 0.35;
/// Largest angle shift from one forceful impact.
const IMPACT_SHIFT: f32 = 10.0;

/// The angle a downed or dead actor lies at, and how it drifts.
///
/// Seeded from the actor's stable variation seed, so two runs over the
/// same inputs produce the same angles.
#[derive(Clone, Debug)]
pub struct DownedWiggler {
    downed_angle: f32,
    rng: ChaCha8Rng,
}

impl DownedWiggler {
    /// Wiggler with a fresh random lying angle.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed));
        let mut downed_angle = rng.gen_range(45.0..135.0);
        if rng.gen_bool(0.5) {
            downed_angle += 180.0;
        }
        Self { downed_angle, rng }
    }

    /// Current lying angle in degrees.
    #[inline]
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.downed_angle
    }

    /// Advances the wiggle. Only moves while `wiggling` (downed, spawned, not in bed).
    pub fn tick(&mut self, tick: u64, wiggling: bool) {
        if !wiggling {
            return;
        }
        let phase = tick % CYCLE_TICKS * 2;
        if phase < 90 {
            self.downed_angle += WIGGLE_STEP;
        } else if (300..390).contains(&phase) {
            self.downed_angle -= WIGGLE_STEP;
        }
    }

    /// Jolts the angle after a forceful impact on a downed or dead actor.
    ///
    /// Living actors are kept off their face; corpses just wrap.
    pub fn notify_impact(&mut self, dead: bool) {
        self.downed_angle += IMPACT_SHIFT * self.rng.gen_range(-1.0_f32..1.0);
        if dead {
            self.downed_angle = self.downed_angle.rem_euclid(360.0);
        } else {
            self.downed_angle = clamp_living(self.downed_angle);
        }
    }
}

/// Clamps into `[45, 315]`, then out of the `(135, 225)` face-down gap.
fn clamp_living(angle: f32) -> f32 {
    let angle = angle.clamp(45.0, 315.0);
    if angle > 135.0 && angle < 225.0 {
        if angle > 180.0 {
            225.0
        } else {
            135.0
        }
    } else {
        angle
    }
}
