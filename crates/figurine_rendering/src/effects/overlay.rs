//! Material substitution chain applied right before a draw entry is built.

use crate::actor::ActorRenderState;
use crate::assets::MaterialRef;

use super::flasher::FlashState;

/// Overlay inputs for one composite pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayEffects {
    portrait: bool,
    invisible: bool,
    flash: FlashState,
}

impl OverlayEffects {
    /// Overlays for a pass over `state`.
    #[must_use]
    pub const fn new(state: &ActorRenderState, portrait: bool) -> Self {
        Self { portrait, invisible: state.invisible, flash: state.damage_flash }
    }

    /// Invisibility (map only), then damage flash.
    ///
    /// Idempotent: `apply(apply(m)) == apply(m)`.
    #[must_use]
    pub const fn apply(&self, material: MaterialRef) -> MaterialRef {
        let mut material = material;
        if !self.portrait && self.invisible {
            material = material.invisible_variant();
        }
        if self.flash.is_active() {
            material = material.with_damage_flash(self.flash.ticks_left);
        }
        material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MaterialId;

    fn effects(portrait: bool, invisible: bool, ticks_left: u8) -> OverlayEffects {
        OverlayEffects { portrait, invisible, flash: FlashState { ticks_left } }
    }

    #[test]
    fn test_no_triggers_is_identity() {
        let base = MaterialRef::new(MaterialId(3));
        assert_eq!(effects(false, false, 0).apply(base), base);
    }

    #[test]
    fn test_invisible_skipped_in_portrait() {
        let base = MaterialRef::new(MaterialId(3));
        assert!(effects(false, true, 0).apply(base).invisible);
        assert!(!effects(true, true, 0).apply(base).invisible);
    }

    #[test]
    fn test_chain_is_idempotent() {
        let fx = effects(false, true, 9);
        let base = MaterialRef::new(MaterialId(3));
        let once = fx.apply(base);
        assert_eq!(fx.apply(once), once);
        assert!(once.invisible);
        assert_eq!(once.flash_ticks, 9);
    }
}
