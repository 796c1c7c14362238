//! Per-actor graphic resolution and caching.
//!
//! Resolution turns [`VisualTraits`] paths into [`Graphic`]s once and keeps
//! the result until the traits change or the cache is invalidated. Missing
//! assets are logged and left out; nothing here fails a frame.

use tracing::{debug, error, trace};

use figurine_shared::Facing;

use crate::actor::{RotDrawMode, Species};
use crate::depth::GraphicLayer;

use super::catalog::AssetSource;
use super::graphic::{Graphic, ShadowData};
use super::material::{MaterialRef, MeshRef};
use super::mesh_pool::MeshPool;
use super::traits::{ApparelLayer, VisualTraits, WornExtra, WornGraphicData};

/// A worn item whose graphic resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ApparelGraphicRecord {
    /// Index of the item in [`VisualTraits::apparel`].
    pub apparel_index: usize,
    /// Resolved graphic.
    pub graphic: Graphic,
    /// Outermost layer.
    pub layer: ApparelLayer,
    /// Layer is Shell.
    pub is_shell_layer: bool,
    /// Shell item hidden behind the head.
    pub shell_renders_behind_head: bool,
    /// Layer is Overhead.
    pub is_overhead_layer: bool,
    /// Hat drawn in front of the face.
    pub hat_rendered_front_of_face: bool,
    /// Drawn as a worn pack.
    pub renders_as_pack: bool,
    /// Belt placement.
    pub worn_graphic: Option<WornGraphicData>,
    /// Extra graphics drawn while worn.
    pub worn_extras: Vec<WornExtra>,
}

/// One material of the precomputed body stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodyStackEntry {
    /// `Body` for the base material, `ApparelLayer(n)` at stack position `n`.
    pub layer: GraphicLayer,
    /// Material.
    pub material: MaterialRef,
}

/// Everything resolved for one actor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedGraphics {
    /// Fresh body.
    pub naked: Option<Graphic>,
    /// Rotting body.
    pub rotting: Option<Graphic>,
    /// Bones.
    pub dessicated: Option<Graphic>,
    /// Head.
    pub head: Option<Graphic>,
    /// Rotting head.
    pub rotting_head: Option<Graphic>,
    /// Skull.
    pub skull: Option<Graphic>,
    /// Head stump.
    pub stump: Option<Graphic>,
    /// Hair.
    pub hair: Option<Graphic>,
    /// Animal pack.
    pub pack: Option<Graphic>,
    /// Species shadow.
    pub race_shadow: Option<ShadowData>,
    /// Worn apparel, sorted by layer.
    pub apparel: Vec<ApparelGraphicRecord>,
    body_stacks: [[Vec<BodyStackEntry>; 3]; 4],
}

impl ResolvedGraphics {
    fn build(traits: &VisualTraits, source: &dyn AssetSource) -> Self {
        let lookup = |what: &str, path: &Option<String>| -> Option<Graphic> {
            let path = path.as_deref()?;
            let graphic = source.graphic(path).filter(Graphic::has_material);
            if graphic.is_none() {
                error!(what, path, "graphic failed to resolve; layer will be skipped");
            }
            graphic
        };

        let mut apparel = Vec::with_capacity(traits.apparel.len());
        for (index, def) in traits.apparel.iter().enumerate() {
            let path = def.graphic_path_for(traits.body_type);
            let Some(graphic) = source.graphic(&path).filter(Graphic::has_material) else {
                error!(label = %def.label, path = %path, "apparel graphic failed to resolve");
                continue;
            };
            apparel.push(ApparelGraphicRecord {
                apparel_index: index,
                graphic,
                layer: def.layer,
                is_shell_layer: def.layer == ApparelLayer::Shell,
                shell_renders_behind_head: def.shell_renders_behind_head,
                is_overhead_layer: def.layer == ApparelLayer::Overhead,
                hat_rendered_front_of_face: def.hat_rendered_front_of_face,
                renders_as_pack: def.renders_as_pack(),
                worn_graphic: def.worn_graphic,
                worn_extras: def.worn_extras.clone(),
            });
        }
        // Stable: equal layers keep wear order.
        apparel.sort_by_key(|record| record.layer);

        let mut resolved = Self {
            naked: lookup("naked body", &traits.naked_graphic),
            rotting: lookup("rotting body", &traits.rotting_graphic),
            dessicated: lookup("dessicated body", &traits.dessicated_graphic),
            head: lookup("head", &traits.head_graphic),
            rotting_head: lookup("rotting head", &traits.rotting_head_graphic),
            skull: lookup("skull", &traits.skull_graphic),
            stump: lookup("head stump", &traits.stump_graphic),
            hair: lookup("hair", &traits.hair_graphic),
            pack: lookup("pack", &traits.pack_graphic),
            race_shadow: traits.race_shadow,
            apparel,
            body_stacks: Default::default(),
        };
        for facing in Facing::ALL {
            for mode in RotDrawMode::ALL {
                resolved.body_stacks[facing.index()][mode.index()] = resolved.build_body_stack(facing, mode);
            }
        }
        resolved
    }

    fn body_graphic(&self, mode: RotDrawMode) -> Option<&Graphic> {
        match mode {
            RotDrawMode::Fresh => self.naked.as_ref(),
            RotDrawMode::Rotting => self.rotting.as_ref(),
            RotDrawMode::Dessicated => self.dessicated.as_ref().or(self.rotting.as_ref()),
        }
    }

    fn build_body_stack(&self, facing: Facing, mode: RotDrawMode) -> Vec<BodyStackEntry> {
        let mut stack = Vec::with_capacity(1 + self.apparel.len());
        if let Some(material) = self.body_graphic(mode).and_then(|g| g.mat_at(facing)) {
            stack.push(BodyStackEntry { layer: GraphicLayer::Body, material });
        }
        let body_apparel = self
            .apparel
            .iter()
            .filter(|r| r.shell_renders_behind_head || !r.is_shell_layer)
            .filter(|r| !r.is_overhead_layer && !r.renders_as_pack);
        for record in body_apparel {
            if let Some(material) = record.graphic.mat_at(facing) {
                let position = u8::try_from(stack.len()).unwrap_or(u8::MAX);
                stack.push(BodyStackEntry { layer: GraphicLayer::ApparelLayer(position), material });
            }
        }
        stack
    }

    /// Body material stack, bottom first.
    #[must_use]
    pub fn body_stack_at(&self, facing: Facing, mode: RotDrawMode) -> &[BodyStackEntry] {
        &self.body_stacks[facing.index()][mode.index()]
    }

    /// Body mesh: the shared humanlike set, else the naked graphic's own.
    #[must_use]
    pub fn body_mesh_at(&self, species: Species, facing: Facing, pool: &MeshPool) -> MeshRef {
        if species.is_humanlike() {
            pool.humanlike_body.mesh_at(facing)
        } else {
            self.naked.map_or_else(|| pool.plane10_set().mesh_at(facing), |g| g.mesh_at(facing, pool))
        }
    }

    /// Head material for a facing and decay stage. `None` means skip the head.
    #[must_use]
    pub fn head_material_at(&self, facing: Facing, mode: RotDrawMode, stump: bool) -> Option<MaterialRef> {
        let graphic = match (mode, stump) {
            (RotDrawMode::Fresh | RotDrawMode::Rotting, true) => self.stump.as_ref(),
            (RotDrawMode::Fresh, false) => self.head.as_ref(),
            (RotDrawMode::Rotting, false) => self.rotting_head.as_ref().or(self.head.as_ref()),
            (RotDrawMode::Dessicated, false) => self.skull.as_ref(),
            (RotDrawMode::Dessicated, true) => None,
        };
        graphic.and_then(|g| g.mat_at(facing))
    }

    /// Hair material for a facing.
    #[must_use]
    pub fn hair_material_at(&self, facing: Facing) -> Option<MaterialRef> {
        self.hair.and_then(|g| g.mat_at(facing))
    }
}

/// Owns one actor's resolved graphics.
#[derive(Debug, Default)]
pub struct AssetResolver {
    resolved_for: Option<VisualTraits>,
    graphics: ResolvedGraphics,
    rebuilds: u32,
}

impl AssetResolver {
    /// Empty, unresolved cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True once something has been resolved and not invalidated since.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved_for.is_some()
    }

    /// Forces the next [`resolve_all`](Self::resolve_all) to rebuild.
    pub fn invalidate(&mut self) {
        if self.resolved_for.take().is_some() {
            debug!("asset cache invalidated");
        }
    }

    /// Resolves every graphic for `traits`, or returns the cached result if
    /// the traits are unchanged since the last call.
    pub fn resolve_all(&mut self, traits: &VisualTraits, source: &dyn AssetSource) -> &ResolvedGraphics {
        if self.resolved_for.as_ref() == Some(traits) {
            trace!("asset cache hit");
        } else {
            self.graphics = ResolvedGraphics::build(traits, source);
            self.resolved_for = Some(traits.clone());
            self.rebuilds += 1;
            debug!(
                rebuilds = self.rebuilds,
                apparel = self.graphics.apparel.len(),
                "asset cache rebuilt"
            );
        }
        &self.graphics
    }

    /// Last resolved graphics, if any.
    #[must_use]
    pub fn graphics(&self) -> Option<&ResolvedGraphics> {
        self.is_resolved().then_some(&self.graphics)
    }

    /// How many times the cache has been rebuilt.
    #[must_use]
    pub const fn rebuild_count(&self) -> u32 {
        self.rebuilds
    }
}
