//! Head, headgear and hair.

use figurine_shared::{Facing, Vec2, Vec3};

use tracing::error;

use crate::actor::{facing_from_raw, RotDrawMode};
use crate::depth::GraphicLayer;

use super::PassBuilder;

/// Head offset from the body center for a facing, before body rotation.
///
/// Sideways facings shift the head towards the face; the vertical
/// component is the same for every facing.
#[must_use]
pub fn base_head_offset_at(facing: Facing, head_offset: Vec2) -> Vec3 {
    match facing {
        Facing::North | Facing::South => Vec3::new(0.0, 0.0, head_offset.y),
        Facing::East => Vec3::new(head_offset.x, 0.0, head_offset.y),
        Facing::West => Vec3::new(-head_offset.x, 0.0, head_offset.y),
    }
}

/// [`base_head_offset_at`] for a raw facing index from an external producer.
///
/// An index outside `0..=3` is logged and yields a zero offset.
#[must_use]
pub fn head_offset_for_raw(raw_facing: i32, head_offset: Vec2) -> Vec3 {
    match facing_from_raw(raw_facing) {
        Ok(facing) => base_head_offset_at(facing, head_offset),
        Err(err) => {
            error!("{err}");
            Vec3::ZERO
        }
    }
}

impl PassBuilder<'_> {
    pub(super) fn draw_head(&mut self) {
        let pass = self.pass;
        if pass.graphics.head.is_none() {
            return;
        }
        let state = pass.state;
        let head_facing = pass.pose.head_facing;
        let body_facing = pass.pose.body_facing;
        let offset = base_head_offset_at(head_facing, state.body_type_head_offset).rotated_by(self.angle());
        let head_root = pass.pose.root + offset;
        let depth = self.config.depth;

        if let Some(material) = pass.graphics.head_material_at(head_facing, state.rot_draw_mode, state.head_stump) {
            let mesh = self.meshes.humanlike_head.mesh_at(head_facing);
            self.push_owned(GraphicLayer::Head, mesh, head_root.lifted(depth.head), material);
        }

        let hair_mesh = self.meshes.humanlike_hair.mesh_at(head_facing);
        let mut hair_hidden = false;
        if !(pass.portrait && pass.frame.prefs.hats_only_on_map) {
            for record in pass.graphics.apparel.iter().filter(|r| r.is_overhead_layer) {
                let Some(material) = record.graphic.mat_at(body_facing) else { continue };
                let layer = GraphicLayer::Overhead { front_of_face: record.hat_rendered_front_of_face };
                hair_hidden |= record.hat_rendered_front_of_face;
                self.push_owned(layer, hair_mesh, head_root.lifted(depth.offset(layer)), material);
            }
        }

        if hair_hidden || state.head_stump || state.rot_draw_mode == RotDrawMode::Dessicated {
            return;
        }
        if let Some(material) = pass.graphics.hair_material_at(head_facing) {
            self.push_owned(GraphicLayer::Hair, hair_mesh, head_root.lifted(depth.hair), material);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_offset_per_facing() {
        let offset = Vec2::new(0.09, 0.34);
        assert_eq!(base_head_offset_at(Facing::North, offset), Vec3::new(0.0, 0.0, 0.34));
        assert_eq!(base_head_offset_at(Facing::South, offset), Vec3::new(0.0, 0.0, 0.34));
        assert_eq!(base_head_offset_at(Facing::East, offset), Vec3::new(0.09, 0.0, 0.34));
        assert_eq!(base_head_offset_at(Facing::West, offset), Vec3::new(-0.09, 0.0, 0.34));
    }

    #[test]
    fn test_raw_head_offset() {
        let offset = Vec2::new(0.09, 0.34);
        assert_eq!(head_offset_for_raw(1, offset), Vec3::new(0.09, 0.0, 0.34));
        assert_eq!(head_offset_for_raw(4, offset), Vec3::ZERO);
        assert_eq!(head_offset_for_raw(-1, offset), Vec3::ZERO);
    }
}
