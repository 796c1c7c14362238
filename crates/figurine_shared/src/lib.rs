//! # FIGURINE Shared
//!
//! Math and orientation types used by the compositor and by whatever builds
//! the per-frame actor snapshots.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on rendering code. If you need meshes,
//! materials or draw entries, put them in `figurine_rendering`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod facing;
pub mod math;

pub use facing::Facing;
pub use math::{normalize_angle, Quaternion, Transform, Vec2, Vec3, FLAT_EPSILON_SQ};
