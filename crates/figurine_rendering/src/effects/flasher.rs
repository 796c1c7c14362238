//! Damage flash timer.

use crate::config::FlashConfig;

/// Flash state for one frame. Inactive when `ticks_left` is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FlashState {
    /// Ticks remaining; the variant key for the flashed material.
    pub ticks_left: u8,
}

impl FlashState {
    /// No flash.
    pub const NONE: Self = Self { ticks_left: 0 };

    /// True while flashing.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.ticks_left > 0
    }
}

/// Remembers when the actor was last hurt.
#[derive(Clone, Copy, Debug)]
pub struct DamageFlasher {
    last_damage_tick: Option<u64>,
    duration_ticks: u8,
    min_intensity: f32,
}

impl DamageFlasher {
    /// A flasher that has never fired.
    #[must_use]
    pub const fn new(config: &FlashConfig) -> Self {
        Self { last_damage_tick: None, duration_ticks: config.duration_ticks, min_intensity: config.min_intensity }
    }

    /// Records harmful damage at `now`.
    pub fn notify_damage(&mut self, now: u64) {
        self.last_damage_tick = Some(now);
    }

    /// Ticks of flash left at `now`.
    #[must_use]
    pub fn ticks_left(&self, now: u64) -> u8 {
        let Some(hit) = self.last_damage_tick else { return 0 };
        let elapsed = now.saturating_sub(hit);
        u8::try_from(u64::from(self.duration_ticks).saturating_sub(elapsed)).unwrap_or(self.duration_ticks)
    }

    /// Flash intensity in `[0, 1]` at `now`.
    #[must_use]
    pub fn intensity(&self, now: u64) -> f32 {
        f32::from(self.ticks_left(now)) / f32::from(self.duration_ticks.max(1))
    }

    /// Flash state at `now`; faint flashes count as off.
    #[must_use]
    pub fn state_at(&self, now: u64) -> FlashState {
        if self.intensity(now) < self.min_intensity {
            FlashState::NONE
        } else {
            FlashState { ticks_left: self.ticks_left(now) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_fades_over_duration() {
        let mut flasher = DamageFlasher::new(&FlashConfig::default());
        assert_eq!(flasher.state_at(100), FlashState::NONE);

        flasher.notify_damage(100);
        assert_eq!(flasher.state_at(100).ticks_left, 16);
        assert!((flasher.intensity(104) - 0.75).abs() < 1e-6);
        assert_eq!(flasher.state_at(115).ticks_left, 1);
        assert!(!flasher.state_at(116).is_active());
        assert!(!flasher.state_at(10_000).is_active());
    }

    #[test]
    fn test_faint_flash_is_off() {
        let config = FlashConfig { duration_ticks: 16, min_intensity: 0.5 };
        let mut flasher = DamageFlasher::new(&config);
        flasher.notify_damage(0);
        assert!(flasher.state_at(8).is_active());
        assert!(!flasher.state_at(9).is_active());
    }

    #[test]
    fn test_repeat_damage_restarts() {
        let mut flasher = DamageFlasher::new(&FlashConfig::default());
        flasher.notify_damage(0);
        flasher.notify_damage(10);
        assert_eq!(flasher.ticks_left(12), 14);
    }
}
