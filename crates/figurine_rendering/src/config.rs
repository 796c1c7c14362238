//! # Compositor Configuration
//!
//! Tuned constants, grouped by concern and loadable from TOML. Every
//! section defaults to the shipped values, so a config file only needs the
//! keys it overrides:
//!
//! ```toml
//! [altitudes]
//! laying_pawn = 5.0
//!
//! [flash]
//! duration_ticks = 20
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use figurine_shared::{Facing, Vec3};

use crate::depth::DepthTable;
use crate::error::{RenderError, RenderResult};

/// Where carried items sit relative to the root.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarryConfig {
    /// Offset for a carried creature or corpse.
    pub creature_offset: Vec3,
    /// Offset for any other item.
    pub item_offset: Vec3,
}

impl Default for CarryConfig {
    fn default() -> Self {
        Self {
            creature_offset: Vec3::new(0.44, 0.0, 0.0),
            item_offset: Vec3::new(0.18, 0.0, 0.05),
        }
    }
}

/// A fixed resting pose for openly carried equipment.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct CarryPose {
    /// Offset from the root.
    pub offset: Vec3,
    /// Aim angle in degrees.
    pub angle: f32,
}

/// Equipment geometry.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EquipmentConfig {
    /// Distance from the root along the aim direction.
    pub aim_distance: f32,
    /// Horizontal squared distance under which the aim angle is zero.
    pub min_aim_distance_sq: f32,
    /// Resting pose facing north.
    pub north: CarryPose,
    /// Resting pose facing east.
    pub east: CarryPose,
    /// Resting pose facing south.
    pub south: CarryPose,
    /// Resting pose facing west.
    pub west: CarryPose,
}

impl EquipmentConfig {
    /// Resting pose for a facing.
    #[must_use]
    pub const fn pose_at(&self, facing: Facing) -> CarryPose {
        match facing {
            Facing::North => self.north,
            Facing::East => self.east,
            Facing::South => self.south,
            Facing::West => self.west,
        }
    }
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            aim_distance: 0.4,
            min_aim_distance_sq: figurine_shared::FLAT_EPSILON_SQ,
            north: CarryPose { offset: Vec3::new(0.0, 0.0, -0.11), angle: 143.0 },
            east: CarryPose { offset: Vec3::new(0.2, 0.0, -0.22), angle: 143.0 },
            south: CarryPose { offset: Vec3::new(0.0, 0.0, -0.22), angle: 143.0 },
            west: CarryPose { offset: Vec3::new(-0.2, 0.0, -0.22), angle: 217.0 },
        }
    }
}

/// Absolute altitudes.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AltitudeConfig {
    /// Base altitude for actors lying on the ground.
    pub laying_pawn: f32,
    /// Altitude of ground shadows.
    pub shadow: f32,
}

impl Default for AltitudeConfig {
    fn default() -> Self {
        Self { laying_pawn: 6.923_077, shadow: 0.769_230_8 }
    }
}

/// Portrait pose for incapacitated actors.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortraitConfig {
    /// Body angle when dead or downed.
    pub downed_angle: f32,
    /// Root shift when dead or downed.
    pub downed_shift: Vec3,
}

impl Default for PortraitConfig {
    fn default() -> Self {
        Self { downed_angle: 85.0, downed_shift: Vec3::new(-0.18, 0.0, -0.18) }
    }
}

/// Damage flash timing.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
    /// Ticks a flash lasts.
    pub duration_ticks: u8,
    /// Intensity below which the flash is off.
    pub min_intensity: f32,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self { duration_ticks: 16, min_intensity: 0.01 }
    }
}

/// Full compositor configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Per-tag depth offsets.
    pub depth: DepthTable,
    /// Carried item placement.
    pub carry: CarryConfig,
    /// Equipment geometry.
    pub equipment: EquipmentConfig,
    /// Absolute altitudes.
    pub altitudes: AltitudeConfig,
    /// Portrait pose.
    pub portrait: PortraitConfig,
    /// Damage flash.
    pub flash: FlashConfig,
}

impl CompositorConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Parse`] for malformed TOML, or whatever
    /// [`validate`](Self::validate) rejects.
    pub fn from_toml_str(text: &str) -> RenderResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| RenderError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "compositor config loaded");
        Ok(config)
    }

    /// Checks depth ordering and value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DepthOrder`] or [`RenderError::InvalidConfig`].
    pub fn validate(&self) -> RenderResult<()> {
        self.depth.validate()?;
        if self.flash.duration_ticks == 0 {
            return Err(RenderError::InvalidConfig("flash.duration_ticks must be > 0".into()));
        }
        if !(0.0..1.0).contains(&self.flash.min_intensity) {
            return Err(RenderError::InvalidConfig(format!(
                "flash.min_intensity must be in [0, 1), got {}",
                self.flash.min_intensity
            )));
        }
        if self.equipment.aim_distance < 0.0 || self.equipment.min_aim_distance_sq < 0.0 {
            return Err(RenderError::InvalidConfig("equipment distances must be non-negative".into()));
        }
        for facing in Facing::ALL {
            let angle = self.equipment.pose_at(facing).angle;
            if !(0.0..360.0).contains(&angle) {
                return Err(RenderError::InvalidConfig(format!(
                    "equipment.{facing:?} angle {angle} outside [0, 360)"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(CompositorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CompositorConfig::from_toml_str(
            r"
            [altitudes]
            laying_pawn = 5.0

            [flash]
            duration_ticks = 20
            ",
        )
        .expect("valid config");
        assert_eq!(config.altitudes.laying_pawn, 5.0);
        assert_eq!(config.flash.duration_ticks, 20);
        assert_eq!(config.depth, DepthTable::STANDARD);
        assert_eq!(config.equipment.pose_at(Facing::West).angle, 217.0);
    }

    #[test]
    fn test_depth_override_out_of_order_is_rejected() {
        let result = CompositorConfig::from_toml_str("[depth]\nhead = 0.001\n");
        assert!(matches!(result, Err(RenderError::DepthOrder { .. })));
    }

    #[test]
    fn test_zero_flash_duration_is_rejected() {
        let result = CompositorConfig::from_toml_str("[flash]\nduration_ticks = 0\n");
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_pose_override() {
        let config = CompositorConfig::from_toml_str(
            "[equipment.north]\noffset = { x = 0.0, y = 0.0, z = -0.2 }\nangle = 150.0\n",
        )
        .expect("valid config");
        assert_eq!(config.equipment.north.angle, 150.0);
        assert_eq!(config.equipment.south.angle, 143.0);
    }

    #[test]
    fn test_unknown_type_is_parse_error() {
        let result = CompositorConfig::from_toml_str("[flash]\nduration_ticks = \"long\"\n");
        assert!(matches!(result, Err(RenderError::Parse(_))));
    }
}
