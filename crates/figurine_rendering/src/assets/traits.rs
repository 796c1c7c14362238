//! Declared visual traits: what an actor looks like, by asset path.

use serde::Deserialize;

use figurine_shared::{Facing, Vec2};

use crate::actor::Species;

use super::graphic::ShadowData;
use super::material::MaterialId;

/// Body shape. Selects body-specific apparel art and belt placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum BodyType {
    /// Male.
    #[default]
    Male,
    /// Female.
    Female,
    /// Thin.
    Thin,
    /// Hulk.
    Hulk,
    /// Fat.
    Fat,
}

impl BodyType {
    /// Suffix appended to body-specific apparel paths.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Thin => "Thin",
            Self::Hulk => "Hulk",
            Self::Fat => "Fat",
        }
    }
}

/// Apparel layers in draw order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum ApparelLayer {
    /// Underwear.
    OnSkin,
    /// Shirts and armor vests.
    #[default]
    Middle,
    /// Coats and dusters.
    Shell,
    /// Belts and packs.
    Belt,
    /// Headgear.
    Overhead,
}

/// Offset and scale tweak for one body type.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BodyTypeAdjust {
    /// Extra offset.
    pub offset: Vec2,
    /// Scale multiplier.
    pub scale: Vec2,
}

impl Default for BodyTypeAdjust {
    fn default() -> Self {
        Self { offset: Vec2::ZERO, scale: Vec2::ONE }
    }
}

/// Per-body-type adjustments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BodyTypeAdjusts {
    /// Male.
    pub male: BodyTypeAdjust,
    /// Female.
    pub female: BodyTypeAdjust,
    /// Thin.
    pub thin: BodyTypeAdjust,
    /// Hulk.
    pub hulk: BodyTypeAdjust,
    /// Fat.
    pub fat: BodyTypeAdjust,
}

impl BodyTypeAdjusts {
    /// Adjustment for a body type.
    #[must_use]
    pub const fn get(&self, body: BodyType) -> &BodyTypeAdjust {
        match body {
            BodyType::Male => &self.male,
            BodyType::Female => &self.female,
            BodyType::Thin => &self.thin,
            BodyType::Hulk => &self.hulk,
            BodyType::Fat => &self.fat,
        }
    }
}

/// Belt placement for one facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WornDirectionData {
    /// Base offset for this facing.
    pub offset: Vec2,
    /// Body-type offsets for this facing.
    pub body_types: BodyTypeAdjusts,
}

/// How a utility item is worn on the body.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WornGraphicData {
    /// Draw the item as a pack over the body.
    pub render_utility_as_pack: bool,
    /// Placement facing north.
    pub north: WornDirectionData,
    /// Placement facing east.
    pub east: WornDirectionData,
    /// Placement facing south.
    pub south: WornDirectionData,
    /// Placement facing west.
    pub west: WornDirectionData,
    /// Base scale.
    pub scale: Vec2,
    /// Body-type scales.
    pub body_types: BodyTypeAdjusts,
}

impl Default for WornGraphicData {
    fn default() -> Self {
        Self {
            render_utility_as_pack: true,
            north: WornDirectionData::default(),
            east: WornDirectionData::default(),
            south: WornDirectionData::default(),
            west: WornDirectionData::default(),
            scale: Vec2::ONE,
            body_types: BodyTypeAdjusts::default(),
        }
    }
}

impl WornGraphicData {
    const fn direction(&self, facing: Facing) -> &WornDirectionData {
        match facing {
            Facing::North => &self.north,
            Facing::East => &self.east,
            Facing::South => &self.south,
            Facing::West => &self.west,
        }
    }

    /// Belt offset on the ground plane for a facing and body type.
    #[must_use]
    pub fn belt_offset_at(&self, facing: Facing, body: BodyType) -> Vec2 {
        let dir = self.direction(facing);
        dir.offset + dir.body_types.get(body).offset
    }

    /// Belt scale for a body type.
    #[must_use]
    pub fn belt_scale_at(&self, body: BodyType) -> Vec2 {
        let adjust = self.body_types.get(body).scale;
        Vec2::new(self.scale.x * adjust.x, self.scale.y * adjust.y)
    }
}

/// Supplementary graphic drawn by a worn item (shield bubbles and the like).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WornExtra {
    /// Material.
    pub material: MaterialId,
    /// Ground offset from the actor's root.
    pub offset: Vec2,
    /// Uniform draw size.
    pub size: f32,
}

impl Default for WornExtra {
    fn default() -> Self {
        Self { material: MaterialId::default(), offset: Vec2::ZERO, size: 1.0 }
    }
}

/// One worn apparel item.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApparelDef {
    /// Display label.
    pub label: String,
    /// Base graphic path.
    pub graphic_path: String,
    /// Outermost layer the item covers.
    pub layer: ApparelLayer,
    /// Shell item hidden behind the head.
    pub shell_renders_behind_head: bool,
    /// Hat drawn in front of the face.
    pub hat_rendered_front_of_face: bool,
    /// Path is used as-is, without the body-type suffix.
    pub body_typeless: bool,
    /// Belt placement for utility items.
    pub worn_graphic: Option<WornGraphicData>,
    /// Extra graphics drawn while worn.
    pub worn_extras: Vec<WornExtra>,
}

impl ApparelDef {
    /// Whether this item is drawn as a worn pack.
    #[must_use]
    pub fn renders_as_pack(&self) -> bool {
        self.layer == ApparelLayer::Belt
            && self.worn_graphic.map_or(true, |w| w.render_utility_as_pack)
    }

    /// Path of the graphic to resolve for a body type.
    #[must_use]
    pub fn graphic_path_for(&self, body: BodyType) -> String {
        if self.body_typeless || self.layer == ApparelLayer::Overhead || self.renders_as_pack() {
            self.graphic_path.clone()
        } else {
            format!("{}_{}", self.graphic_path, body.name())
        }
    }
}

/// Everything that defines an actor's look. A change forces re-resolution.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisualTraits {
    /// Body plan.
    pub species: Species,
    /// Body shape.
    pub body_type: BodyType,
    /// Head offset from the body center for this body type.
    pub head_offset: Vec2,
    /// Fresh body.
    pub naked_graphic: Option<String>,
    /// Rotting body.
    pub rotting_graphic: Option<String>,
    /// Bones.
    pub dessicated_graphic: Option<String>,
    /// Head.
    pub head_graphic: Option<String>,
    /// Rotting head.
    pub rotting_head_graphic: Option<String>,
    /// Skull.
    pub skull_graphic: Option<String>,
    /// Head stump.
    pub stump_graphic: Option<String>,
    /// Hair.
    pub hair_graphic: Option<String>,
    /// Pack drawn when an animal carries inventory.
    pub pack_graphic: Option<String>,
    /// Species-specific shadow.
    pub race_shadow: Option<ShadowData>,
    /// Worn apparel in wear order.
    pub apparel: Vec<ApparelDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_type_suffix() {
        let shirt = ApparelDef { graphic_path: "Apparel/Shirt".into(), ..ApparelDef::default() };
        assert_eq!(shirt.graphic_path_for(BodyType::Hulk), "Apparel/Shirt_Hulk");

        let hat = ApparelDef { graphic_path: "Apparel/Cowboy".into(), layer: ApparelLayer::Overhead, ..ApparelDef::default() };
        assert_eq!(hat.graphic_path_for(BodyType::Hulk), "Apparel/Cowboy");
    }

    #[test]
    fn test_utility_renders_as_pack_by_default() {
        let belt = ApparelDef { layer: ApparelLayer::Belt, ..ApparelDef::default() };
        assert!(belt.renders_as_pack());

        let hidden = ApparelDef {
            layer: ApparelLayer::Belt,
            worn_graphic: Some(WornGraphicData { render_utility_as_pack: false, ..WornGraphicData::default() }),
            ..ApparelDef::default()
        };
        assert!(!hidden.renders_as_pack());

        let shell = ApparelDef { layer: ApparelLayer::Shell, ..ApparelDef::default() };
        assert!(!shell.renders_as_pack());
    }

    #[test]
    fn test_belt_offset_and_scale() {
        let mut worn = WornGraphicData::default();
        worn.east.offset = Vec2::new(0.1, -0.2);
        worn.east.body_types.fat.offset = Vec2::new(0.05, 0.0);
        worn.scale = Vec2::new(0.5, 0.5);
        worn.body_types.fat.scale = Vec2::new(1.2, 1.0);

        let offset = worn.belt_offset_at(Facing::East, BodyType::Fat);
        assert!((offset.x - 0.15).abs() < 1e-6);
        assert!((offset.y + 0.2).abs() < 1e-6);
        assert_eq!(worn.belt_offset_at(Facing::North, BodyType::Fat), Vec2::ZERO);

        let scale = worn.belt_scale_at(BodyType::Fat);
        assert!((scale.x - 0.6).abs() < 1e-6);
        assert!((scale.y - 0.5).abs() < 1e-6);
    }
}
