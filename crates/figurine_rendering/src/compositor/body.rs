//! Body stack and wounds.

use crate::actor::RotDrawMode;
use crate::assets::MaterialRef;
use crate::depth::GraphicLayer;

use super::PassBuilder;

impl PassBuilder<'_> {
    pub(super) fn draw_body(&mut self) {
        let pass = self.pass;
        if !pass.pose.render_body {
            return;
        }
        let facing = pass.pose.body_facing;
        let mode = pass.state.rot_draw_mode;

        // Bones of non-humanlikes are a single graphic.
        if mode == RotDrawMode::Dessicated && !pass.state.species.is_humanlike() && !pass.portrait {
            if let Some(bones) = pass.graphics.dessicated {
                if let Some(material) = bones.mat_at(facing) {
                    let mesh = bones.mesh_at(facing, self.meshes);
                    self.push_owned(GraphicLayer::Body, mesh, self.at(GraphicLayer::Body), material);
                }
                return;
            }
        }

        let mesh = self.body_mesh();
        let stack = pass.graphics.body_stack_at(facing, mode);
        for (position, entry) in stack.iter().enumerate() {
            let position = u8::try_from(position).unwrap_or(u8::MAX);
            let lift = self.config.depth.body_stack_offset(position, stack.len());
            self.push_owned(entry.layer, mesh, self.pass.pose.root.lifted(lift), entry.material);
        }

        if mode == RotDrawMode::Fresh {
            let position = self.at(GraphicLayer::WoundOverlay);
            for &wound in &pass.frame.wounds {
                self.push_owned(GraphicLayer::WoundOverlay, mesh, position, MaterialRef::new(wound));
            }
        }
    }
}
