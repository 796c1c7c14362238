//! # Posture Resolution
//!
//! Turns health, job and furniture state into where and how the body is
//! laid out this frame. Pure: the only carried state is the wiggle angle,
//! which lives in [`DownedWiggler`] and is passed in.
//!
//! ```text
//!   carried by another ──────────────────────────► CarriedByAnother
//!   humanlike in a bed ──────────────────────────► BedAnchored
//!   dead / downed / lying job ── face-up job ────► LyingFaceUp
//!                              └─ otherwise ─────► LyingOther
//!   otherwise ───────────────────────────────────► Standing
//! ```

mod table;
mod wiggler;

pub use table::{PostureEntry, PostureTable};
pub use wiggler::DownedWiggler;

use figurine_shared::{Facing, Vec3};

use crate::actor::{ActorFrame, JobPosture};
use crate::config::CompositorConfig;

/// Body posture for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Posture {
    /// Upright.
    #[default]
    Standing,
    /// On the back.
    LyingFaceUp,
    /// On the ground any other way.
    LyingOther,
    /// Held by another actor.
    CarriedByAnother,
    /// In furniture, head on the pillow.
    BedAnchored,
}

impl Posture {
    /// Number of postures.
    pub const COUNT: usize = 5;

    /// All postures in index order.
    pub const ALL: [Self; Self::COUNT] =
        [Self::Standing, Self::LyingFaceUp, Self::LyingOther, Self::CarriedByAnother, Self::BedAnchored];

    /// Table index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Anything but standing.
    #[inline]
    #[must_use]
    pub const fn is_lying(self) -> bool {
        !matches!(self, Self::Standing)
    }
}

/// Output of posture resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPosture {
    /// Derived posture.
    pub posture: Posture,
    /// Facing used for the body graphics.
    pub body_facing: Facing,
    /// Facing used for the head graphics.
    pub head_facing: Facing,
    /// Body rotation in degrees.
    pub body_angle: f32,
    /// Root position; `y` is the base altitude.
    pub root: Vec3,
    /// Whether the body and body apparel are drawn.
    pub render_body: bool,
}

/// Evaluates posture from a frame against the startup-validated table.
#[derive(Clone, Debug, PartialEq)]
pub struct PostureResolver {
    table: PostureTable,
}

impl PostureResolver {
    /// Resolver over a validated table.
    #[must_use]
    pub const fn new(table: PostureTable) -> Self {
        Self { table }
    }

    /// The lookup table.
    #[must_use]
    pub const fn table(&self) -> &PostureTable {
        &self.table
    }

    /// Posture implied by the frame's external state.
    #[must_use]
    pub fn posture_of(frame: &ActorFrame) -> Posture {
        if frame.carried_by_another {
            Posture::CarriedByAnother
        } else if frame.bed.is_some() && frame.traits.species.is_humanlike() {
            Posture::BedAnchored
        } else if frame.condition.dead || frame.condition.downed || frame.job_posture.is_laying() {
            if frame.job_posture == JobPosture::LayingOnGroundFaceUp {
                Posture::LyingFaceUp
            } else {
                Posture::LyingOther
            }
        } else {
            Posture::Standing
        }
    }

    /// Resolves the map pose. `wiggle_angle` is the downed wiggler's angle.
    #[must_use]
    pub fn resolve(&self, frame: &ActorFrame, wiggle_angle: f32, config: &CompositorConfig) -> ResolvedPosture {
        let posture = Self::posture_of(frame);
        let humanlike = frame.traits.species.is_humanlike();
        let seed = frame.stable_variation_seed;

        if posture == Posture::Standing {
            return ResolvedPosture {
                posture,
                body_facing: frame.facing,
                head_facing: frame.facing,
                body_angle: 0.0,
                root: frame.draw_position,
                render_body: true,
            };
        }

        if let (Posture::BedAnchored, Some(bed)) = (posture, frame.bed) {
            let facing = bed.rotation.opposite();
            let entry = self.table.entry(posture, facing);
            let anchor = bed.anchor.with_y(bed.anchor.y.max(config.altitudes.laying_pawn));
            let root = (anchor + entry.anchor_direction * -frame.traits.head_offset.y).lifted(config.depth.head);
            return ResolvedPosture {
                posture,
                body_facing: facing,
                head_facing: facing,
                body_angle: entry.angle,
                root,
                render_body: bed.show_sleeper_body,
            };
        }

        let facing = if posture == Posture::LyingFaceUp {
            Facing::South
        } else {
            self.table.lying_facing(humanlike, seed)
        };
        let body_angle = if frame.condition.downed || frame.condition.dead {
            wiggle_angle
        } else if humanlike {
            self.table.entry(posture, facing).angle
        } else {
            self.table.entry(posture, self.table.side_facing(seed)).angle
        };
        let mut root = frame.draw_position;
        if !frame.condition.dead && posture != Posture::CarriedByAnother {
            root.y = config.altitudes.laying_pawn + config.depth.body;
        }
        ResolvedPosture { posture, body_facing: facing, head_facing: facing, body_angle, root, render_body: true }
    }

    /// Portrait pose: origin, facing south, tipped over when incapacitated.
    #[must_use]
    pub fn resolve_portrait(frame: &ActorFrame, config: &CompositorConfig) -> ResolvedPosture {
        let incapacitated = frame.condition.dead || frame.condition.downed;
        let (body_angle, root) = if incapacitated {
            (config.portrait.downed_angle, Vec3::ZERO + config.portrait.downed_shift)
        } else {
            (0.0, Vec3::ZERO)
        };
        ResolvedPosture {
            posture: Self::posture_of(frame),
            body_facing: Facing::South,
            head_facing: Facing::South,
            body_angle,
            root,
            render_body: true,
        }
    }
}
