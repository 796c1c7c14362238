//! # FIGURINE Rendering
//!
//! Layered actor compositor. Given an actor's pose, facing, worn and held
//! items and transient visual state, produces one depth-ordered list of
//! draw entries that together form the actor's sprite composite.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ACTOR RENDER PASS                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ActorFrame → PostureResolver → ActorRenderState            │
//! │       ↓                               ↓                     │
//! │  AssetResolver (cached)  →  LayerCompositor → DrawList      │
//! │                                 ↑          ↓                │
//! │            EquipmentAimGeometry  OverlayEffects  DrawBackend│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## MANDATE
//!
//! - Depth comes from the per-tag table only; branches just skip tags
//! - A missing asset or bad input costs one layer, never the frame
//! - Draw lists are caller-owned and reused across frames

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod actor;
pub mod assets;
pub mod backend;
pub mod compositor;
pub mod config;
pub mod depth;
pub mod effects;
pub mod equipment;
pub mod error;
pub mod posture;
pub mod renderer;

pub use actor::{ActorFrame, ActorRenderState, RotDrawMode, Species};
pub use assets::{AssetCatalog, AssetResolver, AssetSource, MaterialId, MaterialRef, MeshPool, MeshRef, VisualTraits};
pub use backend::{DrawBackend, DrawEntry, DrawInstance, DrawList, RecordingBackend};
pub use compositor::{CompositePass, LayerCompositor};
pub use config::CompositorConfig;
pub use depth::{DepthTable, GraphicLayer};
pub use effects::{DamageFlasher, FlashState, OverlayEffects};
pub use equipment::{EquipmentAimState, EquipmentBranch};
pub use error::{RenderError, RenderResult};
pub use posture::{Posture, PostureResolver, ResolvedPosture};
pub use renderer::{ActorRenderer, DamageEvent, SharedResources};
