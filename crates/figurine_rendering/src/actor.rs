//! # Actor Inputs
//!
//! Everything the compositor is told about an actor for one frame.
//!
//! [`ActorFrame`] is what external systems (health, jobs, inventory) hand
//! over. [`ActorRenderState`] is the immutable snapshot derived from it once
//! posture and flash state are known; the compositor reads only the
//! snapshot plus the frame's item lists.

use serde::Deserialize;

use figurine_shared::{Facing, Vec2, Vec3};

use crate::assets::{MaterialId, VisualTraits};
use crate::effects::FlashState;
use crate::error::{RenderError, RenderResult};
use crate::posture::Posture;

/// Broad body plan. Drives mesh choice and lying orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum Species {
    /// Uses the shared humanlike body and head meshes.
    #[default]
    Humanlike,
    /// Uses its own body mesh; may carry a pack.
    Animal,
    /// Anything else with a body graphic.
    Other,
}

impl Species {
    /// True for humanlikes.
    #[inline]
    #[must_use]
    pub const fn is_humanlike(self) -> bool {
        matches!(self, Self::Humanlike)
    }
}

/// Which body graphics a corpse (or living actor) is drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum RotDrawMode {
    /// Normal skin.
    #[default]
    Fresh,
    /// Rotting skin.
    Rotting,
    /// Bones only.
    Dessicated,
}

impl RotDrawMode {
    /// All modes in index order.
    pub const ALL: [Self; 3] = [Self::Fresh, Self::Rotting, Self::Dessicated];

    /// Index into per-mode tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Health-driven flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BodyCondition {
    /// Actor is a corpse.
    pub dead: bool,
    /// Actor is incapacitated.
    pub downed: bool,
    /// Actor is on the map (as opposed to in a container or world pawn).
    pub spawned: bool,
}

impl Default for BodyCondition {
    fn default() -> Self {
        Self { dead: false, downed: false, spawned: true }
    }
}

/// Posture requested by the actor's current job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum JobPosture {
    /// Upright.
    #[default]
    Standing,
    /// Lying on the ground, face up.
    LayingOnGroundFaceUp,
    /// Lying on the ground in any other way.
    LayingOnGround,
    /// Lying in furniture.
    LayingInBed,
}

impl JobPosture {
    /// True for every lying posture.
    #[must_use]
    pub const fn is_laying(self) -> bool {
        !matches!(self, Self::Standing)
    }
}

/// Sleeping furniture the actor currently occupies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BedSlot {
    /// Orientation of the furniture.
    pub rotation: Facing,
    /// Center of the actor's sleeping cell, altitude included.
    pub anchor: Vec3,
    /// Whether the furniture shows the sleeper's body.
    pub show_sleeper_body: bool,
}

/// Position and flags the current action may impose on a carried item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarryOverride {
    /// Replaces the computed carry position (altitude is then nudged).
    pub position: Option<Vec3>,
    /// Draw behind the actor.
    pub behind: bool,
    /// Mirror the item.
    pub flip: bool,
}

/// An item held in the actor's hands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarriedThing {
    /// Item material.
    pub material: MaterialId,
    /// A creature or a corpse (held further out).
    pub is_creature_or_corpse: bool,
    /// Driver-imposed placement.
    pub action_override: Option<CarryOverride>,
}

/// Primary equipment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EquippedItem {
    /// Item material.
    pub material: MaterialId,
    /// Per-item angle added (or mirrored) when drawn.
    pub angle_offset: f32,
}

/// What a busy stance is focused on.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub enum AimTarget {
    /// A map cell; aimed at its center.
    Cell {
        /// Cell x.
        x: i32,
        /// Cell z.
        z: i32,
    },
    /// Something with a body, aimed at its draw position.
    Thing {
        /// Target's draw position.
        position: Vec3,
    },
}

impl AimTarget {
    /// Point the weapon aims at.
    #[must_use]
    pub fn position(self) -> Vec3 {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Cell { x, z } => Vec3::new(x as f32 + 0.5, 0.0, z as f32 + 0.5),
            Self::Thing { position } => position,
        }
    }
}

/// Job and stance state that decides how equipment is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeaponContext {
    /// Focus target of a busy stance, if the actor is in one.
    pub busy_target: Option<AimTarget>,
    /// The busy stance's verb never aims.
    pub never_aim_weapon: bool,
    /// The current job hides weapons.
    pub job_hides_weapon: bool,
    /// Under direct player control.
    pub drafted: bool,
    /// The current job always shows the weapon.
    pub job_always_shows_weapon: bool,
    /// The assigned duty always shows the weapon.
    pub duty_always_shows_weapon: bool,
    /// The actor's group always shows weapons.
    pub lord_always_shows_weapon: bool,
}

/// Player display preferences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayPrefs {
    /// Hide headgear in portraits.
    pub hats_only_on_map: bool,
}

/// Everything external systems supply about an actor for one frame.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActorFrame {
    /// Stable per-actor integer for deterministic variation.
    pub stable_variation_seed: u32,
    /// Current facing.
    pub facing: Facing,
    /// Interpolated world draw position.
    pub draw_position: Vec3,
    /// Actor is invisible (psychic or otherwise).
    pub invisible: bool,
    /// Corpse decay stage.
    pub rot_draw_mode: RotDrawMode,
    /// Actor has no head.
    pub head_stump: bool,
    /// Declared visual traits.
    pub traits: VisualTraits,
    /// Health flags.
    pub condition: BodyCondition,
    /// Posture requested by the current job.
    pub job_posture: JobPosture,
    /// Being carried by another actor.
    pub carried_by_another: bool,
    /// Occupied furniture.
    pub bed: Option<BedSlot>,
    /// Item held in the hands.
    pub carried: Option<CarriedThing>,
    /// Primary equipment.
    pub equipment: Option<EquippedItem>,
    /// Stance and job weapon flags.
    pub weapon: WeaponContext,
    /// Number of items in the actor's inventory.
    pub inventory_count: u32,
    /// Wound decal materials, drawn over a fresh body.
    pub wounds: Vec<MaterialId>,
    /// Status icon materials.
    pub status_overlays: Vec<MaterialId>,
    /// Player display preferences.
    pub prefs: DisplayPrefs,
}

/// Immutable per-frame snapshot the compositor branches on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorRenderState {
    /// Derived posture.
    pub posture: Posture,
    /// Discrete facing used for graphics selection.
    pub facing: Facing,
    /// Head offset for the actor's body type.
    pub body_type_head_offset: Vec2,
    /// Seed for deterministic tie-breaking.
    pub stable_variation_seed: u32,
    /// Current damage flash.
    pub damage_flash: FlashState,
    /// Draw with the invisibility shader.
    pub invisible: bool,
    /// Corpse decay stage.
    pub rot_draw_mode: RotDrawMode,
    /// Actor has no head.
    pub head_stump: bool,
    /// Body plan.
    pub species: Species,
}

impl ActorRenderState {
    /// Snapshot of `frame` with the derived posture and flash state.
    #[must_use]
    pub fn from_frame(frame: &ActorFrame, posture: Posture, facing: Facing, damage_flash: FlashState) -> Self {
        Self {
            posture,
            facing,
            body_type_head_offset: frame.traits.head_offset,
            stable_variation_seed: frame.stable_variation_seed,
            damage_flash,
            invisible: frame.invisible,
            rot_draw_mode: frame.rot_draw_mode,
            head_stump: frame.head_stump,
            species: frame.traits.species,
        }
    }
}

/// Converts a raw facing index from an external producer.
///
/// # Errors
///
/// Returns [`RenderError::InvalidFacing`] outside `0..=3`.
pub fn facing_from_raw(raw: i32) -> RenderResult<Facing> {
    Facing::from_raw(raw).ok_or(RenderError::InvalidFacing(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_target_aims_at_center() {
        let target = AimTarget::Cell { x: 3, z: -2 };
        assert_eq!(target.position(), Vec3::new(3.5, 0.0, -1.5));
    }

    #[test]
    fn test_default_condition_is_spawned() {
        let frame = ActorFrame::default();
        assert!(frame.condition.spawned);
        assert!(!frame.condition.dead);
        assert_eq!(frame.facing, Facing::South);
    }

    #[test]
    fn test_raw_facing_conversion() {
        assert_eq!(facing_from_raw(3).ok(), Some(Facing::West));
        assert!(matches!(facing_from_raw(7), Err(RenderError::InvalidFacing(7))));
    }
}
