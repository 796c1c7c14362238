//! # Draw Output
//!
//! The compositor's product: an ordered [`DrawList`] of [`DrawEntry`]
//! values, handed to a [`DrawBackend`] either entry by entry or as packed
//! [`DrawInstance`] records.

use bytemuck::{Pod, Zeroable};

use figurine_shared::{Quaternion, Transform, Vec3};

use crate::assets::{MaterialRef, MeshRef};
use crate::depth::GraphicLayer;

/// One draw operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawEntry {
    /// Tag that produced the entry.
    pub layer: GraphicLayer,
    /// Mesh to draw.
    pub mesh: MeshRef,
    /// World position; `y` encodes depth.
    pub position: Vec3,
    /// Rotation about the up axis in degrees.
    pub angle: f32,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Material, overlay variant included.
    pub material: MaterialRef,
    /// Issue now instead of queueing for the batched pass.
    pub immediate: bool,
}

impl DrawEntry {
    /// Unscaled entry.
    #[must_use]
    pub const fn new(
        layer: GraphicLayer,
        mesh: MeshRef,
        position: Vec3,
        angle: f32,
        material: MaterialRef,
        immediate: bool,
    ) -> Self {
        Self { layer, mesh, position, angle, scale: Vec3::ONE, material, immediate }
    }

    /// Entry placed by a full transform (belt packs).
    #[must_use]
    pub const fn from_transform(
        layer: GraphicLayer,
        mesh: MeshRef,
        transform: Transform,
        angle: f32,
        material: MaterialRef,
        immediate: bool,
    ) -> Self {
        Self { layer, mesh, position: transform.position, angle, scale: transform.scale, material, immediate }
    }

    /// Sets the scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation as a quaternion.
    #[must_use]
    pub fn rotation(&self) -> Quaternion {
        Quaternion::from_angle_up(self.angle)
    }

    /// Full model transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation(), self.scale)
    }

    /// Packs the entry for GPU upload.
    #[must_use]
    pub fn to_instance(&self) -> DrawInstance {
        let q = self.rotation();
        DrawInstance {
            position_angle: [self.position.x, self.position.y, self.position.z, self.angle],
            rotation: [q.x, q.y, q.z, q.w],
            scale: [self.scale.x, self.scale.y, self.scale.z, 1.0],
            ids: [
                self.material.id.0,
                self.mesh.0,
                u32::from(self.material.invisible) | (u32::from(self.material.flash_ticks) << 8),
                layer_code(self.layer),
            ],
        }
    }
}

/// Per-entry record uploaded to the instance buffer. 64 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// Position (xyz) and angle in degrees (w).
    pub position_angle: [f32; 4],
    /// Rotation quaternion.
    pub rotation: [f32; 4],
    /// Scale (xyz), w unused.
    pub scale: [f32; 4],
    /// Material id, mesh id, variant bits (bit 0 invisible, bits 8..16 flash ticks), layer code.
    pub ids: [u32; 4],
}

impl DrawInstance {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}

fn layer_code(layer: GraphicLayer) -> u32 {
    match layer {
        GraphicLayer::Shadow => 0,
        GraphicLayer::Body => 1,
        GraphicLayer::ApparelLayer(n) => 0x100 | u32::from(n),
        GraphicLayer::WoundOverlay => 2,
        GraphicLayer::Head => 3,
        GraphicLayer::Hair => 4,
        GraphicLayer::Overhead { front_of_face: false } => 5,
        GraphicLayer::Overhead { front_of_face: true } => 6,
        GraphicLayer::Shell => 7,
        GraphicLayer::Pack => 8,
        GraphicLayer::Equipment => 9,
        GraphicLayer::WornExtra => 10,
        GraphicLayer::StatusOverlay => 11,
        GraphicLayer::CarriedThing => 12,
    }
}

/// Receives draw entries.
pub trait DrawBackend {
    /// Draws right away.
    fn issue(&mut self, entry: &DrawEntry);

    /// Queues for the batched pass later in the frame.
    fn enqueue(&mut self, entry: &DrawEntry);
}

/// Caller-owned draw buffer, cleared and refilled every pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    entries: Vec<DrawEntry>,
}

impl DrawList {
    /// Empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty list with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Drops all entries, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Appends an entry.
    #[inline]
    pub fn push(&mut self, entry: DrawEntry) {
        self.entries.push(entry);
    }

    /// Entries in emission order.
    #[must_use]
    pub fn entries(&self) -> &[DrawEntry] {
        &self.entries
    }

    /// Entries produced by one tag.
    pub fn by_layer(&self, layer: GraphicLayer) -> impl Iterator<Item = &DrawEntry> + '_ {
        self.entries.iter().filter(move |e| e.layer == layer)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing will be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hands every entry to `backend` in order, honouring `immediate`.
    pub fn submit<B: DrawBackend + ?Sized>(&self, backend: &mut B) {
        for entry in &self.entries {
            if entry.immediate {
                backend.issue(entry);
            } else {
                backend.enqueue(entry);
            }
        }
    }

    /// Packs every entry for GPU upload.
    #[must_use]
    pub fn instances(&self) -> Vec<DrawInstance> {
        self.entries.iter().map(DrawEntry::to_instance).collect()
    }
}

/// Backend that records what it receives. Queued entries move to
/// `issued` on [`flush`](Self::flush).
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    /// Entries drawn so far.
    pub issued: Vec<DrawEntry>,
    /// Entries waiting for the batched pass.
    pub queued: Vec<DrawEntry>,
}

impl RecordingBackend {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the batched pass.
    pub fn flush(&mut self) {
        self.issued.append(&mut self.queued);
    }
}

impl DrawBackend for RecordingBackend {
    fn issue(&mut self, entry: &DrawEntry) {
        self.issued.push(*entry);
    }

    fn enqueue(&mut self, entry: &DrawEntry) {
        self.queued.push(*entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MaterialId;

    fn entry(layer: GraphicLayer, immediate: bool) -> DrawEntry {
        DrawEntry::new(layer, MeshRef(1), Vec3::new(1.0, 0.5, 2.0), 90.0, MaterialRef::new(MaterialId(4)), immediate)
    }

    #[test]
    fn test_instance_is_64_bytes() {
        assert_eq!(DrawInstance::SIZE, 64);
        let list = DrawList { entries: vec![entry(GraphicLayer::Body, false)] };
        assert_eq!(bytemuck::cast_slice::<DrawInstance, u8>(&list.instances()).len(), 64);
    }

    #[test]
    fn test_instance_packs_variant_bits() {
        let mut e = entry(GraphicLayer::Head, false);
        e.material = e.material.invisible_variant().with_damage_flash(5);
        let inst = e.to_instance();
        assert_eq!(inst.ids, [4, 1, 1 | (5 << 8), 3]);
        assert_eq!(inst.position_angle, [1.0, 0.5, 2.0, 90.0]);
    }

    #[test]
    fn test_submit_routes_by_immediacy() {
        let mut list = DrawList::new();
        list.push(entry(GraphicLayer::Body, true));
        list.push(entry(GraphicLayer::Pack, false));
        let mut backend = RecordingBackend::new();
        list.submit(&mut backend);
        assert_eq!(backend.issued.len(), 1);
        assert_eq!(backend.queued.len(), 1);
        backend.flush();
        assert_eq!(backend.issued.len(), 2);
        assert!(backend.queued.is_empty());
    }

    #[test]
    fn test_transform_round_trip() {
        let e = entry(GraphicLayer::Body, false).with_scale(Vec3::new(0.5, 1.0, 0.5));
        let t = e.transform();
        assert_eq!(t.position, e.position);
        assert_eq!(t.scale, e.scale);
    }
}
