//! Mesh and material handles.
//!
//! Handles are plain integers into pools owned by the backend. A
//! [`MaterialRef`] additionally carries the overlay variant so the backend
//! can pick the invisible or damage-flash shader without a second lookup.

use bytemuck::{Pod, Zeroable};
use serde::Deserialize;

use figurine_shared::Facing;

/// Handle to a mesh in the backend's mesh pool.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable, Deserialize)]
#[serde(transparent)]
pub struct MeshRef(pub u32);

/// Handle to a base material in the backend's material pool.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub u32);

/// Shared material used for every ground shadow.
pub const SHADOW_MATERIAL: MaterialId = MaterialId(0xFFFF_0001);

/// A base material plus the overlay variant it is drawn with.
///
/// Variants are flags, not chained wrappers, so re-applying the same
/// overlay yields the same value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MaterialRef {
    /// Base material.
    pub id: MaterialId,
    /// Drawn with the invisibility shader.
    pub invisible: bool,
    /// Remaining damage-flash ticks (0 = no flash).
    pub flash_ticks: u8,
}

impl MaterialRef {
    /// Plain base material.
    #[inline]
    #[must_use]
    pub const fn new(id: MaterialId) -> Self {
        Self { id, invisible: false, flash_ticks: 0 }
    }

    /// The invisible variant of this material.
    #[inline]
    #[must_use]
    pub const fn invisible_variant(self) -> Self {
        Self { invisible: true, ..self }
    }

    /// The damage-flash variant keyed by remaining ticks.
    #[inline]
    #[must_use]
    pub const fn with_damage_flash(self, ticks_left: u8) -> Self {
        Self { flash_ticks: ticks_left, ..self }
    }

    /// True when no overlay variant is applied.
    #[inline]
    #[must_use]
    pub const fn is_base(self) -> bool {
        !self.invisible && self.flash_ticks == 0
    }
}

impl From<MaterialId> for MaterialRef {
    fn from(id: MaterialId) -> Self {
        Self::new(id)
    }
}

/// One mesh per facing. West usually holds the horizontally mirrored mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct MeshSet {
    /// Mesh for north.
    pub north: MeshRef,
    /// Mesh for east.
    pub east: MeshRef,
    /// Mesh for south.
    pub south: MeshRef,
    /// Mesh for west.
    pub west: MeshRef,
}

impl MeshSet {
    /// Same mesh for north, east and south; the flipped mesh for west.
    #[must_use]
    pub const fn mirrored(normal: MeshRef, flipped: MeshRef) -> Self {
        Self { north: normal, east: normal, south: normal, west: flipped }
    }

    /// Mesh for a facing.
    #[inline]
    #[must_use]
    pub const fn mesh_at(&self, facing: Facing) -> MeshRef {
        match facing {
            Facing::North => self.north,
            Facing::East => self.east,
            Facing::South => self.south,
            Facing::West => self.west,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_variants_are_idempotent() {
        let base = MaterialRef::new(MaterialId(7));
        assert!(base.is_base());
        let once = base.invisible_variant().with_damage_flash(12);
        let twice = once.invisible_variant().with_damage_flash(12);
        assert_eq!(once, twice);
        assert_eq!(once.id, MaterialId(7));
        assert!(!once.is_base());
    }

    #[test]
    fn test_mirrored_set_flips_west_only() {
        let set = MeshSet::mirrored(MeshRef(1), MeshRef(2));
        assert_eq!(set.mesh_at(Facing::North), MeshRef(1));
        assert_eq!(set.mesh_at(Facing::East), MeshRef(1));
        assert_eq!(set.mesh_at(Facing::South), MeshRef(1));
        assert_eq!(set.mesh_at(Facing::West), MeshRef(2));
    }
}
