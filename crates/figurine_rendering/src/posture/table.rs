//! Validated posture lookup table.

use tracing::debug;

use figurine_shared::{Facing, Vec3};

use crate::error::{RenderError, RenderResult};

use super::Posture;

/// Angle and anchor direction for one (posture, facing) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PostureEntry {
    /// Body angle in degrees.
    pub angle: f32,
    /// Unit direction the root is shifted along, or zero.
    pub anchor_direction: Vec3,
}

/// Lookup table replacing the posture and facing cascade.
#[derive(Clone, Debug, PartialEq)]
pub struct PostureTable {
    entries: [[PostureEntry; 4]; Posture::COUNT],
    humanlike_lying: [Facing; 4],
    other_lying: [Facing; 4],
    side_lying: [Facing; 2],
}

impl PostureTable {
    /// Builds and validates the standard table.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidPostureTable`] if validation fails.
    pub fn standard() -> RenderResult<Self> {
        let mut entries = [[PostureEntry::default(); 4]; Posture::COUNT];
        for posture in Posture::ALL {
            for facing in Facing::ALL {
                entries[posture.index()][facing.index()] = match posture {
                    Posture::Standing => PostureEntry::default(),
                    Posture::BedAnchored => {
                        PostureEntry { angle: facing.as_angle(), anchor_direction: facing.facing_cell() }
                    }
                    Posture::LyingFaceUp | Posture::LyingOther | Posture::CarriedByAnother => {
                        PostureEntry { angle: facing.as_angle(), anchor_direction: Vec3::ZERO }
                    }
                };
            }
        }
        let table = Self {
            entries,
            humanlike_lying: [Facing::South, Facing::South, Facing::East, Facing::West],
            other_lying: [Facing::South, Facing::East, Facing::West, Facing::West],
            side_lying: [Facing::West, Facing::East],
        };
        table.validate()?;
        debug!("posture table validated");
        Ok(table)
    }

    /// Checks angle ranges, anchor lengths, and that nobody lies facing north.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidPostureTable`] naming the bad entry.
    pub fn validate(&self) -> RenderResult<()> {
        for posture in Posture::ALL {
            for facing in Facing::ALL {
                let entry = self.entry(posture, facing);
                if !(0.0..360.0).contains(&entry.angle) {
                    return Err(RenderError::InvalidPostureTable(format!(
                        "{posture:?}/{facing:?}: angle {} outside [0, 360)",
                        entry.angle
                    )));
                }
                let len_sq = entry.anchor_direction.length_squared();
                if len_sq != 0.0 && (len_sq - 1.0).abs() > 1e-4 {
                    return Err(RenderError::InvalidPostureTable(format!(
                        "{posture:?}/{facing:?}: anchor direction is not unit length"
                    )));
                }
            }
        }
        let mut lying = self.humanlike_lying.iter().chain(&self.other_lying).chain(&self.side_lying);
        if lying.any(|f| *f == Facing::North) {
            return Err(RenderError::InvalidPostureTable("lying facing tables must not contain North".into()));
        }
        Ok(())
    }

    /// Entry for a posture and effective facing.
    #[inline]
    #[must_use]
    pub const fn entry(&self, posture: Posture, facing: Facing) -> PostureEntry {
        self.entries[posture.index()][facing.index()]
    }

    /// Lying facing picked by `seed % 4`.
    #[must_use]
    pub const fn lying_facing(&self, humanlike: bool, seed: u32) -> Facing {
        let slot = (seed % 4) as usize;
        if humanlike {
            self.humanlike_lying[slot]
        } else {
            self.other_lying[slot]
        }
    }

    /// Side a non-humanlike lies on, picked by `seed % 2`.
    #[must_use]
    pub const fn side_facing(&self, seed: u32) -> Facing {
        self.side_lying[(seed % 2) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_validates() {
        let table = PostureTable::standard().expect("standard table");
        assert_eq!(table.entry(Posture::Standing, Facing::West).angle, 0.0);
        assert_eq!(table.entry(Posture::LyingOther, Facing::West).angle, 270.0);
        assert_eq!(table.entry(Posture::BedAnchored, Facing::South).anchor_direction, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_lying_facings_by_seed() {
        let table = PostureTable::standard().expect("standard table");
        let human: Vec<_> = (0..4).map(|s| table.lying_facing(true, s)).collect();
        assert_eq!(human, vec![Facing::South, Facing::South, Facing::East, Facing::West]);
        let other: Vec<_> = (4..8).map(|s| table.lying_facing(false, s)).collect();
        assert_eq!(other, vec![Facing::South, Facing::East, Facing::West, Facing::West]);
        assert_eq!(table.side_facing(7), Facing::East);
    }

    #[test]
    fn test_north_lying_is_rejected() {
        let mut table = PostureTable::standard().expect("standard table");
        table.other_lying[0] = Facing::North;
        assert!(matches!(table.validate(), Err(RenderError::InvalidPostureTable(_))));
    }

    #[test]
    fn test_bad_anchor_is_rejected() {
        let mut table = PostureTable::standard().expect("standard table");
        table.entries[Posture::BedAnchored.index()][0].anchor_direction = Vec3::new(2.0, 0.0, 0.0);
        assert!(table.validate().is_err());
    }
}
