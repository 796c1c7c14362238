//! # Asset Resolution
//!
//! Bridge between declared looks and drawable handles.
//!
//! ```text
//! ┌──────────────┐   paths    ┌──────────────┐  graphics  ┌───────────────────┐
//! │ VisualTraits │ ─────────► │ AssetSource  │ ─────────► │ AssetResolver     │
//! └──────────────┘            │ (catalog)    │            │ (per-actor cache) │
//!                             └──────────────┘            └───────────────────┘
//! ```
//!
//! Catalog and [`MeshPool`] are shared and immutable; each actor owns its
//! own [`AssetResolver`].

mod catalog;
mod graphic;
mod material;
mod mesh_pool;
mod resolver;
mod traits;

pub use catalog::{AssetCatalog, AssetSource};
pub use graphic::{Graphic, ShadowData};
pub use material::{MaterialId, MaterialRef, MeshRef, MeshSet, SHADOW_MATERIAL};
pub use mesh_pool::MeshPool;
pub use resolver::{ApparelGraphicRecord, AssetResolver, BodyStackEntry, ResolvedGraphics};
pub use traits::{
    ApparelDef, ApparelLayer, BodyType, BodyTypeAdjust, BodyTypeAdjusts, VisualTraits, WornDirectionData,
    WornExtra, WornGraphicData,
};
