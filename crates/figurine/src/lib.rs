//! # FIGURINE
//!
//! Driver crate: loads scene files and runs the compositor over them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌────────────────────┐     ┌──────────────┐
//! │  scene.toml  │────>│  figurine_rendering │────>│  DrawList ×2 │
//! │  config      │     │  ActorRenderer      │     │  map         │
//! │  catalog     │     │  (one per actor)    │     │  portrait    │
//! │  actors      │     └────────────────────┘     └──────────────┘
//! └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - `scene`: scene files and scripted compositing

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod scene;

pub use figurine_rendering as rendering;
pub use figurine_shared as shared;
pub use scene::{ActorComposite, Scene, SceneActor, ScriptedDamage};
