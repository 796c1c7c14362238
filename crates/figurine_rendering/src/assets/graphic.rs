//! Resolved graphics: per-facing materials plus optional mesh and shadow.

use serde::Deserialize;

use figurine_shared::{Facing, Vec3};

use super::material::{MaterialId, MaterialRef, MeshRef, MeshSet};
use super::mesh_pool::MeshPool;

/// Ground shadow cast by a graphic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShadowData {
    /// Shadow volume; `x`/`z` become the mesh scale.
    pub volume: Vec3,
    /// Offset from the actor's root on the ground plane.
    pub offset: Vec3,
}

/// A graphic as held by the catalog.
///
/// Any facing may be absent; lookups fall back north to south, east to
/// west and vice versa, then to whichever facing exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Graphic {
    /// Material facing north.
    pub north: Option<MaterialId>,
    /// Material facing east.
    pub east: Option<MaterialId>,
    /// Material facing south.
    pub south: Option<MaterialId>,
    /// Material facing west.
    pub west: Option<MaterialId>,
    /// Own mesh set; the pool's unit plane when absent.
    pub mesh: Option<MeshSet>,
    /// Shadow drawn under the actor when this is the base body graphic.
    pub shadow: Option<ShadowData>,
}

impl Graphic {
    /// A graphic with one material for every facing.
    #[must_use]
    pub const fn single(id: MaterialId) -> Self {
        Self { north: Some(id), east: Some(id), south: Some(id), west: Some(id), mesh: None, shadow: None }
    }

    /// Sets the mesh set.
    #[must_use]
    pub const fn with_mesh(mut self, mesh: MeshSet) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Sets the shadow.
    #[must_use]
    pub const fn with_shadow(mut self, shadow: ShadowData) -> Self {
        self.shadow = Some(shadow);
        self
    }

    fn slot(&self, facing: Facing) -> Option<MaterialId> {
        match facing {
            Facing::North => self.north,
            Facing::East => self.east,
            Facing::South => self.south,
            Facing::West => self.west,
        }
    }

    /// Material for a facing, with fallback. `None` only if no facing has one.
    #[must_use]
    pub fn mat_at(&self, facing: Facing) -> Option<MaterialRef> {
        self.slot(facing)
            .or_else(|| self.slot(facing.opposite()))
            .or_else(|| self.slot(facing.rotated(1)))
            .or_else(|| self.slot(facing.rotated(-1)))
            .map(MaterialRef::new)
    }

    /// True when at least one facing has a material.
    #[must_use]
    pub fn has_material(&self) -> bool {
        self.mat_at(Facing::South).is_some()
    }

    /// Mesh for a facing; the pool's unit plane when the graphic has none.
    #[must_use]
    pub fn mesh_at(&self, facing: Facing, pool: &MeshPool) -> MeshRef {
        self.mesh.unwrap_or_else(|| pool.plane10_set()).mesh_at(facing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_fallback() {
        let g = Graphic { south: Some(MaterialId(1)), east: Some(MaterialId(2)), ..Graphic::default() };
        assert_eq!(g.mat_at(Facing::North).map(|m| m.id), Some(MaterialId(1)));
        assert_eq!(g.mat_at(Facing::West).map(|m| m.id), Some(MaterialId(2)));
        assert_eq!(g.mat_at(Facing::East).map(|m| m.id), Some(MaterialId(2)));
    }

    #[test]
    fn test_single_facing_graphic_covers_all() {
        let g = Graphic { north: Some(MaterialId(9)), ..Graphic::default() };
        for facing in Facing::ALL {
            assert_eq!(g.mat_at(facing).map(|m| m.id), Some(MaterialId(9)));
        }
    }

    #[test]
    fn test_empty_graphic_has_no_material() {
        assert!(!Graphic::default().has_material());
        assert_eq!(Graphic::default().mesh_at(Facing::West, &MeshPool::standard()), MeshPool::standard().plane10_flip);
    }
}
