//! # Equipment Aim Geometry
//!
//! Where a held weapon goes and which way it points.
//!
//! ```text
//!   aim (deg)   0 ─── 20 ════ 160 ─── 200 ════ 340 ─── 360
//!   mesh          primary  primary  primary  MIRRORED primary
//!   rotation      aim-90+offset             aim-270-offset
//! ```

use figurine_shared::{normalize_angle, Vec3};

use crate::actor::ActorFrame;
use crate::assets::{MeshPool, MeshRef};
use crate::config::CompositorConfig;

/// Which equipment branch is active. At most one per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EquipmentBranch {
    /// Pointing at a stance target.
    Aiming,
    /// Resting in a fixed per-facing pose.
    CarriedOpenly,
    /// Not drawn.
    Hidden,
}

/// Aim inputs derived from job and stance state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EquipmentAimState {
    /// A busy stance is focused on something and may aim.
    pub has_aim_target: bool,
    /// Where the target is.
    pub aim_target_position: Option<Vec3>,
    /// The weapon is shown while idle.
    pub carry_openly: bool,
}

impl EquipmentAimState {
    /// Derives the aim state for a frame.
    #[must_use]
    pub fn derive(frame: &ActorFrame) -> Self {
        let weapon = &frame.weapon;
        let target = weapon.busy_target.filter(|_| !weapon.never_aim_weapon);
        Self {
            has_aim_target: target.is_some(),
            aim_target_position: target.map(|t| t.position()),
            carry_openly: carry_weapon_openly(frame),
        }
    }

    /// Active branch, by priority: aiming, then carrying openly.
    #[must_use]
    pub const fn branch(&self) -> EquipmentBranch {
        if self.has_aim_target {
            EquipmentBranch::Aiming
        } else if self.carry_openly {
            EquipmentBranch::CarriedOpenly
        } else {
            EquipmentBranch::Hidden
        }
    }
}

/// True when an idle actor shows its weapon.
#[must_use]
pub fn carry_weapon_openly(frame: &ActorFrame) -> bool {
    if frame.carried.is_some() {
        return false;
    }
    let weapon = &frame.weapon;
    weapon.drafted
        || weapon.job_always_shows_weapon
        || weapon.duty_always_shows_weapon
        || weapon.lord_always_shows_weapon
}

/// Mesh choice and final rotation for an aim angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimedMesh {
    /// Use the mirrored plane.
    pub flipped: bool,
    /// Rotation in `[0, 360)`.
    pub rotation: f32,
}

impl AimedMesh {
    /// Resolves mesh and rotation for `aim_angle` and the item's own angle offset.
    #[must_use]
    pub fn for_aim(aim_angle: f32, angle_offset: f32) -> Self {
        let base = aim_angle - 90.0;
        let (flipped, rotation) = if aim_angle > 20.0 && aim_angle < 160.0 {
            (false, base + angle_offset)
        } else if aim_angle > 200.0 && aim_angle < 340.0 {
            (true, base - 180.0 - angle_offset)
        } else {
            (false, base + angle_offset)
        };
        Self { flipped, rotation: normalize_angle(rotation) }
    }

    /// The mesh to draw with.
    #[must_use]
    pub const fn mesh(&self, pool: &MeshPool) -> MeshRef {
        if self.flipped {
            pool.plane10_flip
        } else {
            pool.plane10
        }
    }
}

/// Placement of the held item for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquipmentPlacement {
    /// Branch that produced it.
    pub branch: EquipmentBranch,
    /// Draw position, depth included.
    pub position: Vec3,
    /// Aim angle in degrees.
    pub aim_angle: f32,
    /// Mesh and rotation.
    pub mesh: AimedMesh,
}

/// Places the equipped item relative to `root`, or `None` if it is not shown.
#[must_use]
pub fn place_equipment(frame: &ActorFrame, root: Vec3, config: &CompositorConfig) -> Option<EquipmentPlacement> {
    let item = frame.equipment?;
    if frame.condition.dead || !frame.condition.spawned || frame.weapon.job_hides_weapon {
        return None;
    }
    let state = EquipmentAimState::derive(frame);
    let branch = state.branch();
    let (offset, aim_angle) = match (branch, state.aim_target_position) {
        (EquipmentBranch::Aiming, Some(target)) => {
            let to_target = target - frame.draw_position;
            let angle = if to_target.horizontal_length_squared() > config.equipment.min_aim_distance_sq {
                to_target.angle_flat()
            } else {
                0.0
            };
            (Vec3::new(0.0, 0.0, config.equipment.aim_distance).rotated_by(angle), angle)
        }
        (EquipmentBranch::CarriedOpenly, _) => {
            let pose = config.equipment.pose_at(frame.facing);
            (pose.offset, pose.angle)
        }
        _ => return None,
    };
    Some(EquipmentPlacement {
        branch,
        position: (root + offset).lifted(config.depth.equipment),
        aim_angle,
        mesh: AimedMesh::for_aim(aim_angle, item.angle_offset),
    })
}
