//! Shell apparel and packs.

use figurine_shared::{Quaternion, Transform, Vec3};

use crate::actor::Species;
use crate::backend::DrawEntry;
use crate::depth::GraphicLayer;

use super::PassBuilder;

impl PassBuilder<'_> {
    pub(super) fn draw_body_apparel(&mut self) {
        let pass = self.pass;
        if !pass.pose.render_body {
            return;
        }
        let facing = pass.pose.body_facing;
        let body_type = pass.frame.traits.body_type;
        let mesh = self.body_mesh();

        for record in &pass.graphics.apparel {
            let Some(material) = record.graphic.mat_at(facing) else { continue };

            if record.is_shell_layer && !record.shell_renders_behind_head {
                self.push_owned(GraphicLayer::Shell, mesh, self.at(GraphicLayer::Shell), material);
            }
            if !record.renders_as_pack {
                continue;
            }
            let Some(worn) = record.worn_graphic else {
                self.push_owned(GraphicLayer::Pack, mesh, self.at(GraphicLayer::Pack), material);
                continue;
            };
            let offset = worn.belt_offset_at(facing, body_type);
            let scale = worn.belt_scale_at(body_type);
            let transform = Transform::translate(self.at(GraphicLayer::Pack))
                .then(Transform::rotate(Quaternion::from_angle_up(self.angle())))
                .then(Transform::translate(offset.to_ground()))
                .then(Transform::scale(Vec3::new(scale.x, 1.0, scale.y)));
            let entry = DrawEntry::from_transform(
                GraphicLayer::Pack,
                mesh,
                transform,
                self.angle(),
                self.overlays.apply(material),
                pass.portrait,
            );
            self.out.push(entry);
        }
    }

    /// Saddlebags on an animal with inventory. Issued immediately.
    pub(super) fn draw_animal_pack(&mut self) {
        let pass = self.pass;
        if pass.state.species != Species::Animal || pass.frame.inventory_count == 0 {
            return;
        }
        let Some(material) = pass.graphics.pack.and_then(|g| g.mat_at(pass.pose.body_facing)) else {
            return;
        };
        let entry = DrawEntry::new(
            GraphicLayer::Pack,
            self.body_mesh(),
            self.at(GraphicLayer::Pack),
            self.angle(),
            self.overlays.apply(material),
            true,
        );
        self.out.push(entry);
    }
}
