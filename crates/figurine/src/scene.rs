//! # Scene Files
//!
//! A scene bundles everything needed to composite a handful of actors
//! without a running simulation: the compositor config, a graphic catalog
//! and one frame per actor, plus a short scripted history (ticks and
//! damage) so transient effects show up.
//!
//! ```toml
//! [config.flash]
//! duration_ticks = 16
//!
//! [catalog.graphics."Bodies/Naked_Male"]
//! south = 10
//!
//! [[actors]]
//! name = "colonist"
//! ticks = 20
//!
//! [actors.frame]
//! facing = "East"
//! draw_position = { x = 10.5, y = 1.0, z = 4.5 }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use figurine_rendering::{
    ActorFrame, ActorRenderer, AssetCatalog, CompositorConfig, DamageEvent, DrawList, MeshPool, RenderError,
    RenderResult, SharedResources,
};

/// A damage event scheduled at a given tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScriptedDamage {
    /// Tick the damage lands on.
    pub at_tick: u64,
    /// The damage hurts health.
    pub harms_health: bool,
    /// The damage knocks the body around.
    pub forceful_impact: bool,
}

impl From<ScriptedDamage> for DamageEvent {
    fn from(damage: ScriptedDamage) -> Self {
        Self { harms_health: damage.harms_health, forceful_impact: damage.forceful_impact }
    }
}

/// One actor in a scene.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneActor {
    /// Display name.
    pub name: String,
    /// Last tick simulated before compositing.
    pub ticks: u64,
    /// Damage applied along the way.
    pub damage: Vec<ScriptedDamage>,
    /// The actor's frame.
    pub frame: ActorFrame,
}

/// A parsed scene file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Compositor configuration (validated when the scene is composited).
    pub config: CompositorConfig,
    /// Graphics by asset path.
    pub catalog: AssetCatalog,
    /// Actors to composite.
    pub actors: Vec<SceneActor>,
}

/// Both composites of one actor.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorComposite {
    /// Actor name from the scene.
    pub name: String,
    /// Map composite.
    pub map: DrawList,
    /// Portrait composite.
    pub portrait: DrawList,
}

impl Scene {
    /// Parses a scene from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Parse`] if the text does not match the schema.
    pub fn from_toml_str(text: &str) -> RenderResult<Self> {
        let scene: Self = toml::from_str(text)?;
        debug!(actors = scene.actors.len(), graphics = scene.catalog.len(), "scene parsed");
        Ok(scene)
    }

    /// Reads and parses a scene file.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| RenderError::Io { path: path.to_path_buf(), source })?;
        let scene = Self::from_toml_str(&text)?;
        info!(path = %path.display(), actors = scene.actors.len(), "scene loaded");
        Ok(scene)
    }

    /// Plays each actor's script and composites it for the map and the portrait.
    ///
    /// # Errors
    ///
    /// Returns whatever [`SharedResources::new`] rejects in the config.
    pub fn composite(&self) -> RenderResult<Vec<ActorComposite>> {
        let shared = SharedResources::new(self.config, MeshPool::standard(), Arc::new(self.catalog.clone()))?;
        let composites = self
            .actors
            .iter()
            .map(|actor| {
                let mut renderer = ActorRenderer::new(Arc::clone(&shared), actor.frame.stable_variation_seed);
                play_script(&mut renderer, actor);

                let mut map = DrawList::new();
                renderer.render_at(&actor.frame, &mut map);
                let mut portrait = DrawList::new();
                renderer.render_portrait(&actor.frame, &mut portrait);
                debug!(actor = %actor.name, map = map.len(), portrait = portrait.len(), "actor composited");

                ActorComposite { name: actor.name.clone(), map, portrait }
            })
            .collect();
        Ok(composites)
    }
}

fn play_script(renderer: &mut ActorRenderer, actor: &SceneActor) {
    for tick in 0..=actor.ticks {
        renderer.renderer_tick(&actor.frame, tick);
        for damage in actor.damage.iter().filter(|d| d.at_tick == tick) {
            renderer.notify_damage_applied(&actor.frame, (*damage).into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figurine_rendering::GraphicLayer;
    use figurine_shared::Facing;

    const SCENE: &str = r#"
        [catalog.graphics."Bodies/Naked_Male"]
        south = 10

        [catalog.graphics."Heads/Male"]
        south = 20

        [[actors]]
        name = "plain"

        [actors.frame]
        facing = "West"
        traits = { naked_graphic = "Bodies/Naked_Male", head_graphic = "Heads/Male" }
    "#;

    #[test]
    fn test_parse_scene() {
        let scene = Scene::from_toml_str(SCENE).expect("scene parses");
        assert_eq!(scene.catalog.len(), 2);
        assert_eq!(scene.actors.len(), 1);
        assert_eq!(scene.actors[0].frame.facing, Facing::West);
        assert_eq!(scene.config, CompositorConfig::default());
    }

    #[test]
    fn test_composite_scene() {
        let scene = Scene::from_toml_str(SCENE).expect("scene parses");
        let composites = scene.composite().expect("default config is valid");
        assert_eq!(composites.len(), 1);

        let plain = &composites[0];
        assert_eq!(plain.name, "plain");
        assert_eq!(plain.map.by_layer(GraphicLayer::Body).count(), 1);
        assert_eq!(plain.map.by_layer(GraphicLayer::Head).count(), 1);
        assert!(plain.portrait.entries().iter().all(|e| e.immediate));
    }

    #[test]
    fn test_invalid_config_is_rejected_at_composite() {
        let text = format!("[config.flash]\nduration_ticks = 0\n{SCENE}");
        let scene = Scene::from_toml_str(&text).expect("parse does not validate");
        assert!(matches!(scene.composite(), Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_scripted_damage_flashes() {
        let mut scene = Scene::from_toml_str(SCENE).expect("scene parses");
        scene.actors[0].ticks = 4;
        scene.actors[0].damage.push(ScriptedDamage { at_tick: 2, harms_health: true, forceful_impact: false });
        let composites = scene.composite().expect("valid");
        let body = composites[0].map.by_layer(GraphicLayer::Body).next().expect("body drawn");
        assert!(body.material.flash_ticks > 0);
    }

    #[test]
    fn test_unknown_field_type_fails() {
        assert!(matches!(Scene::from_toml_str("actors = 3"), Err(RenderError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(Scene::load("/nonexistent/scene.toml"), Err(RenderError::Io { .. })));
    }
}
