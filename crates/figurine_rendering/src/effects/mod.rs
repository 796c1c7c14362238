//! # Overlay Effects
//!
//! Pure material transforms layered on top of an actor's own materials:
//! invisibility first, damage flash second.

mod flasher;
mod overlay;

pub use flasher::{DamageFlasher, FlashState};
pub use overlay::OverlayEffects;
