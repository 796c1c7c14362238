//! Map-only layers: equipment, apparel extras, status icons.

use figurine_shared::Vec3;

use crate::assets::MaterialRef;
use crate::backend::DrawEntry;
use crate::depth::GraphicLayer;
use crate::equipment::place_equipment;

use super::PassBuilder;

impl PassBuilder<'_> {
    pub(super) fn draw_equipment(&mut self) {
        let frame = self.pass.frame;
        let Some(item) = frame.equipment else { return };
        let Some(placed) = place_equipment(frame, self.pass.pose.root, self.config) else { return };
        let entry = DrawEntry::new(
            GraphicLayer::Equipment,
            placed.mesh.mesh(self.meshes),
            placed.position,
            placed.mesh.rotation,
            self.overlays.apply(MaterialRef::new(item.material)),
            false,
        );
        self.out.push(entry);
    }

    pub(super) fn draw_worn_extras(&mut self) {
        let frame = self.pass.frame;
        let base = self.at(GraphicLayer::WornExtra);
        for apparel in &frame.traits.apparel {
            for extra in &apparel.worn_extras {
                let entry = DrawEntry::new(
                    GraphicLayer::WornExtra,
                    self.meshes.plane10,
                    base + extra.offset.to_ground(),
                    0.0,
                    self.overlays.apply(MaterialRef::new(extra.material)),
                    false,
                )
                .with_scale(Vec3::new(extra.size, 1.0, extra.size));
                self.out.push(entry);
            }
        }
    }

    pub(super) fn draw_status_overlays(&mut self) {
        let frame = self.pass.frame;
        let mesh = self.meshes.humanlike_head.mesh_at(self.pass.pose.head_facing);
        let position = self.at(GraphicLayer::StatusOverlay);
        let angle = self.angle();
        for &icon in &frame.status_overlays {
            let entry = DrawEntry::new(GraphicLayer::StatusOverlay, mesh, position, angle, MaterialRef::new(icon), false);
            self.out.push(entry);
        }
    }
}
