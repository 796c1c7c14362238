//! Shared mesh pool.
//!
//! Read-only after creation; one pool is shared by every actor.

use super::material::{MeshRef, MeshSet};

/// Well-known meshes the compositor draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshPool {
    /// Humanlike body quads.
    pub humanlike_body: MeshSet,
    /// Humanlike head quads (also the status overlay anchor).
    pub humanlike_head: MeshSet,
    /// Humanlike hair quads.
    pub humanlike_hair: MeshSet,
    /// Unit plane for graphics without their own mesh set.
    pub plane10: MeshRef,
    /// Horizontally mirrored unit plane.
    pub plane10_flip: MeshRef,
    /// Ground shadow mesh.
    pub shadow: MeshRef,
}

impl MeshPool {
    /// Mesh ids as registered by the standard backend.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            humanlike_body: MeshSet::mirrored(MeshRef(1), MeshRef(2)),
            humanlike_head: MeshSet::mirrored(MeshRef(3), MeshRef(4)),
            humanlike_hair: MeshSet::mirrored(MeshRef(5), MeshRef(6)),
            plane10: MeshRef(7),
            plane10_flip: MeshRef(8),
            shadow: MeshRef(9),
        }
    }

    /// Unit plane as a facing set.
    #[must_use]
    pub const fn plane10_set(&self) -> MeshSet {
        MeshSet::mirrored(self.plane10, self.plane10_flip)
    }
}

impl Default for MeshPool {
    fn default() -> Self {
        Self::standard()
    }
}
