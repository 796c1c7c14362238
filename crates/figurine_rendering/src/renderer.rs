//! # Actor Renderer
//!
//! Per-actor entry point. Owns the things that belong to exactly one
//! actor (asset cache, damage flasher, downed wiggler) and borrows the rest
//! from [`SharedResources`].

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::actor::{ActorFrame, ActorRenderState};
use crate::assets::{AssetResolver, AssetSource, MeshPool};
use crate::backend::DrawList;
use crate::compositor::{CompositePass, LayerCompositor};
use crate::config::CompositorConfig;
use crate::effects::{DamageFlasher, FlashState};
use crate::error::RenderResult;
use crate::posture::{DownedWiggler, PostureResolver, PostureTable};

/// Read-only data shared by every actor's renderer.
pub struct SharedResources {
    /// Validated configuration.
    pub config: CompositorConfig,
    /// Mesh pool.
    pub meshes: MeshPool,
    /// Graphic source.
    pub assets: Arc<dyn AssetSource>,
    /// Posture resolver over the validated table.
    pub postures: PostureResolver,
}

impl SharedResources {
    /// Validates `config`, builds the posture table and bundles everything.
    ///
    /// # Errors
    ///
    /// Returns the first configuration or posture table violation.
    pub fn new(config: CompositorConfig, meshes: MeshPool, assets: Arc<dyn AssetSource>) -> RenderResult<Arc<Self>> {
        config.validate()?;
        let postures = PostureResolver::new(PostureTable::standard()?);
        info!("compositor shared resources ready");
        Ok(Arc::new(Self { config, meshes, assets, postures }))
    }
}

impl fmt::Debug for SharedResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedResources")
            .field("config", &self.config)
            .field("meshes", &self.meshes)
            .finish_non_exhaustive()
    }
}

/// A damage event as seen by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageEvent {
    /// The damage hurts health (triggers the flash).
    pub harms_health: bool,
    /// The damage knocks the body around (jolts a lying actor).
    pub forceful_impact: bool,
}

/// Renders one actor.
#[derive(Debug)]
pub struct ActorRenderer {
    shared: Arc<SharedResources>,
    resolver: AssetResolver,
    flasher: DamageFlasher,
    wiggler: DownedWiggler,
    tick: u64,
}

impl ActorRenderer {
    /// Renderer for the actor with `stable_variation_seed`.
    #[must_use]
    pub fn new(shared: Arc<SharedResources>, stable_variation_seed: u32) -> Self {
        let flasher = DamageFlasher::new(&shared.config.flash);
        Self {
            shared,
            resolver: AssetResolver::new(),
            flasher,
            wiggler: DownedWiggler::new(stable_variation_seed),
            tick: 0,
        }
    }

    /// Composites the actor on the map into `out`.
    pub fn render_at(&mut self, frame: &ActorFrame, out: &mut DrawList) {
        let shared = &self.shared;
        let pose = shared.postures.resolve(frame, self.wiggler.angle(), &shared.config);
        let state = ActorRenderState::from_frame(frame, pose.posture, pose.body_facing, self.flash_state());
        let graphics = self.resolver.resolve_all(&frame.traits, shared.assets.as_ref());
        let pass = CompositePass { frame, state: &state, pose: &pose, graphics, portrait: false };
        LayerCompositor::new(&shared.config, &shared.meshes).compose(&pass, out);
        trace!(entries = out.len(), posture = ?pose.posture, "actor composited");
    }

    /// Composites the portrait variant into `out`. Every entry is immediate.
    pub fn render_portrait(&mut self, frame: &ActorFrame, out: &mut DrawList) {
        let shared = &self.shared;
        let pose = PostureResolver::resolve_portrait(frame, &shared.config);
        let state = ActorRenderState::from_frame(frame, pose.posture, pose.body_facing, self.flash_state());
        let graphics = self.resolver.resolve_all(&frame.traits, shared.assets.as_ref());
        let pass = CompositePass { frame, state: &state, pose: &pose, graphics, portrait: true };
        LayerCompositor::new(&shared.config, &shared.meshes).compose(&pass, out);
        trace!(entries = out.len(), "portrait composited");
    }

    /// Advances the renderer's clock and the downed wiggle.
    pub fn renderer_tick(&mut self, frame: &ActorFrame, tick: u64) {
        self.tick = tick;
        let wiggling = frame.condition.downed && frame.condition.spawned && frame.bed.is_none();
        self.wiggler.tick(tick, wiggling);
    }

    /// Feeds a damage event to the flasher and the wiggler.
    pub fn notify_damage_applied(&mut self, frame: &ActorFrame, damage: DamageEvent) {
        if damage.harms_health {
            self.flasher.notify_damage(self.tick);
        }
        let lying = frame.condition.downed || frame.condition.dead;
        if lying && damage.forceful_impact {
            self.wiggler.notify_impact(frame.condition.dead);
            debug!(angle = self.wiggler.angle(), "downed angle jolted");
        }
    }

    /// Drops cached graphics; the next render re-resolves.
    pub fn invalidate_graphics(&mut self) {
        self.resolver.invalidate();
    }

    /// Damage flash at the current tick.
    #[must_use]
    pub fn flash_state(&self) -> FlashState {
        self.flasher.state_at(self.tick)
    }

    /// The actor's asset cache.
    #[must_use]
    pub const fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }

    /// Current lying angle.
    #[must_use]
    pub const fn downed_angle(&self) -> f32 {
        self.wiggler.angle()
    }
}
