//! Carried thing and ground shadows. Standing map renders only.

use figurine_shared::Vec3;

use crate::assets::{MaterialRef, ShadowData, SHADOW_MATERIAL};
use crate::backend::DrawEntry;
use crate::depth::GraphicLayer;

use super::PassBuilder;

impl PassBuilder<'_> {
    pub(super) fn draw_carried_thing(&mut self) {
        let Some(thing) = self.pass.frame.carried else { return };
        let root = self.pass.pose.root;
        let carry = self.config.carry;
        let action = thing.action_override.unwrap_or_default();

        let mut position = action.position.unwrap_or_else(|| {
            root + if thing.is_creature_or_corpse { carry.creature_offset } else { carry.item_offset }
        });
        let nudge = self.config.depth.carried_thing;
        position.y += if action.behind { -nudge } else { nudge };

        let mesh = if action.flip { self.meshes.plane10_flip } else { self.meshes.plane10 };
        self.out.push(DrawEntry::new(
            GraphicLayer::CarriedThing,
            mesh,
            position,
            0.0,
            MaterialRef::new(thing.material),
            false,
        ));
    }

    pub(super) fn draw_shadows(&mut self) {
        if self.pass.state.invisible {
            return;
        }
        if let Some(shadow) = self.pass.graphics.race_shadow {
            self.push_shadow(shadow);
        }
        if let Some(shadow) = self.pass.graphics.naked.and_then(|g| g.shadow) {
            self.push_shadow(shadow);
        }
    }

    fn push_shadow(&mut self, shadow: ShadowData) {
        let root = self.pass.pose.root;
        let position = Vec3::new(root.x + shadow.offset.x, self.config.altitudes.shadow, root.z + shadow.offset.z);
        let entry = DrawEntry::new(
            GraphicLayer::Shadow,
            self.meshes.shadow,
            position,
            0.0,
            MaterialRef::new(SHADOW_MATERIAL),
            false,
        )
        .with_scale(Vec3::new(shadow.volume.x, 1.0, shadow.volume.z));
        self.out.push(entry);
    }
}
