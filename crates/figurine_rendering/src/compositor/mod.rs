//! # Layer Compositor
//!
//! One pass per visible actor per frame (plus one for the portrait). The
//! pass walks the layers in a fixed sequence and appends draw entries to a
//! caller-owned [`DrawList`]:
//!
//! ```text
//! ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//! │ body stack   │→ │ head / hats  │→ │ shell / pack │→ │ equipment    │
//! │ + wounds     │  │ + hair       │  │ apparel      │  │ extras/status│
//! └──────────────┘  └──────────────┘  └──────────────┘  └──────────────┘
//!                     standing, map only: carried thing, shadows
//! ```
//!
//! Depth comes only from [`DepthTable`](crate::depth::DepthTable); branches
//! decide whether a tag is drawn, never where it sits.

mod apparel;
mod body;
mod carried;
mod extras;
mod head;

pub use head::{base_head_offset_at, head_offset_for_raw};

use figurine_shared::Vec3;

use crate::actor::{ActorFrame, ActorRenderState};
use crate::assets::{MaterialRef, MeshPool, MeshRef, ResolvedGraphics};
use crate::backend::{DrawEntry, DrawList};
use crate::config::CompositorConfig;
use crate::depth::GraphicLayer;
use crate::effects::OverlayEffects;
use crate::posture::{Posture, ResolvedPosture};

/// Inputs for one composite pass.
#[derive(Clone, Copy, Debug)]
pub struct CompositePass<'a> {
    /// External per-frame inputs.
    pub frame: &'a ActorFrame,
    /// Snapshot derived from the frame.
    pub state: &'a ActorRenderState,
    /// Root, facings and body angle.
    pub pose: &'a ResolvedPosture,
    /// Resolved graphics for the actor.
    pub graphics: &'a ResolvedGraphics,
    /// Portrait render: everything immediate, map-only layers skipped.
    pub portrait: bool,
}

/// Builds draw lists from resolved state. Holds only shared, read-only data.
#[derive(Clone, Copy, Debug)]
pub struct LayerCompositor<'a> {
    config: &'a CompositorConfig,
    meshes: &'a MeshPool,
}

impl<'a> LayerCompositor<'a> {
    /// Compositor over shared config and meshes.
    #[must_use]
    pub const fn new(config: &'a CompositorConfig, meshes: &'a MeshPool) -> Self {
        Self { config, meshes }
    }

    /// Clears `out` and fills it with the actor's draw entries.
    pub fn compose(&self, pass: &CompositePass<'_>, out: &mut DrawList) {
        out.clear();
        let mut builder = PassBuilder {
            config: self.config,
            meshes: self.meshes,
            pass,
            overlays: OverlayEffects::new(pass.state, pass.portrait),
            out,
        };

        builder.draw_body();
        builder.draw_head();
        builder.draw_body_apparel();

        if pass.portrait {
            return;
        }
        builder.draw_animal_pack();
        builder.draw_equipment();
        builder.draw_worn_extras();
        builder.draw_status_overlays();

        if pass.pose.posture == Posture::Standing {
            builder.draw_carried_thing();
            builder.draw_shadows();
        }
    }
}

/// State shared by the per-layer steps of one pass.
struct PassBuilder<'p> {
    config: &'p CompositorConfig,
    meshes: &'p MeshPool,
    pass: &'p CompositePass<'p>,
    overlays: OverlayEffects,
    out: &'p mut DrawList,
}

impl PassBuilder<'_> {
    /// Root lifted to a tag's depth.
    fn at(&self, layer: GraphicLayer) -> Vec3 {
        self.pass.pose.root.lifted(self.config.depth.offset(layer))
    }

    fn angle(&self) -> f32 {
        self.pass.pose.body_angle
    }

    fn body_mesh(&self) -> MeshRef {
        self.pass
            .graphics
            .body_mesh_at(self.pass.state.species, self.pass.pose.body_facing, self.meshes)
    }

    /// Appends an actor-owned entry: overlays applied, immediate in portraits.
    fn push_owned(&mut self, layer: GraphicLayer, mesh: MeshRef, position: Vec3, material: MaterialRef) {
        let material = self.overlays.apply(material);
        let entry = DrawEntry::new(layer, mesh, position, self.angle(), material, self.pass.portrait);
        self.out.push(entry);
    }
}
