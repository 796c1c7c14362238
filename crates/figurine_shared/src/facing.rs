//! Cardinal facings.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// One of the four cardinal orientations an actor can face.
///
/// The discriminants are the raw facing indices used by snapshot producers.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Facing {
    /// Facing away from the camera.
    North = 0,
    /// Facing right.
    East = 1,
    /// Facing the camera.
    #[default]
    South = 2,
    /// Facing left (drawn with mirrored meshes).
    West = 3,
}

impl Facing {
    /// All facings in index order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Converts a raw facing index. Returns `None` outside `0..=3`.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::North),
            1 => Some(Self::East),
            2 => Some(Self::South),
            3 => Some(Self::West),
            _ => None,
        }
    }

    /// Raw facing index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rotates clockwise by `steps` quarter turns (negative turns counter-clockwise).
    #[must_use]
    pub const fn rotated(self, steps: i32) -> Self {
        match (self as i32 + steps).rem_euclid(4) {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    /// The facing turned 180 degrees.
    #[must_use]
    pub const fn opposite(self) -> Self {
        self.rotated(2)
    }

    /// Bearing of this facing in degrees.
    #[must_use]
    pub const fn as_angle(self) -> f32 {
        match self {
            Self::North => 0.0,
            Self::East => 90.0,
            Self::South => 180.0,
            Self::West => 270.0,
        }
    }

    /// Unit step on the ground plane towards this facing.
    #[must_use]
    pub const fn facing_cell(self) -> Vec3 {
        match self {
            Self::North => Vec3::new(0.0, 0.0, 1.0),
            Self::East => Vec3::new(1.0, 0.0, 0.0),
            Self::South => Vec3::new(0.0, 0.0, -1.0),
            Self::West => Vec3::new(-1.0, 0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip_and_range() {
        for facing in Facing::ALL {
            assert_eq!(Facing::from_raw(facing as i32), Some(facing));
        }
        assert_eq!(Facing::from_raw(4), None);
        assert_eq!(Facing::from_raw(-1), None);
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Facing::North.opposite(), Facing::South);
        assert_eq!(Facing::East.opposite(), Facing::West);
        assert_eq!(Facing::West.rotated(1), Facing::North);
        assert_eq!(Facing::North.rotated(-1), Facing::West);
    }

    #[test]
    fn test_facing_cell_agrees_with_angle() {
        for facing in Facing::ALL {
            let dir = Vec3::new(0.0, 0.0, 1.0).rotated_by(facing.as_angle());
            assert!((dir - facing.facing_cell()).length() < 1e-5, "{facing:?}");
        }
    }
}
