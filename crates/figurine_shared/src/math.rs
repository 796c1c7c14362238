//! Mathematical types shared by the compositor and its callers.
//!
//! World space is `x` east, `y` altitude (draw depth), `z` north.
//! Angles are degrees about the up axis, clockwise when seen from above.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Squared horizontal length below which a direction counts as "no direction".
pub const FLAT_EPSILON_SQ: f32 = 0.001;

/// 3D Vector - position, offset, direction
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component (east)
    pub x: f32,
    /// Y component (altitude / depth)
    pub y: f32,
    /// Z component (north)
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All ones
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Returns a copy with the altitude replaced.
    #[must_use]
    pub const fn with_y(self, y: f32) -> Self {
        Self::new(self.x, y, self.z)
    }

    /// Returns a copy raised (or lowered, for negative `dy`) in altitude.
    #[must_use]
    pub fn lifted(self, dy: f32) -> Self {
        Self::new(self.x, self.y + dy, self.z)
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared length ignoring altitude.
    #[must_use]
    pub fn horizontal_length_squared(self) -> f32 {
        self.x * self.x + self.z * self.z
    }

    /// Rotates this vector about the up axis by `angle` degrees.
    ///
    /// `(0, 0, 1).rotated_by(90.0)` is `(1, 0, 0)`.
    #[must_use]
    pub fn rotated_by(self, angle: f32) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self::new(
            self.x * cos + self.z * sin,
            self.y,
            self.z * cos - self.x * sin,
        )
    }

    /// Compass bearing of this vector on the ground plane, in `[0, 360)`.
    ///
    /// North is 0, east is 90. The zero vector has bearing 0.
    #[must_use]
    pub fn angle_flat(self) -> f32 {
        if self.x == 0.0 && self.z == 0.0 {
            return 0.0;
        }
        normalize_angle(self.x.atan2(self.z).to_degrees())
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// 2D Vector - head offsets, belt offsets and scales
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// All ones
    pub const ONE: Self = Self::new(1.0, 1.0);

    /// Lifts onto the ground plane: `x` stays east, `y` becomes north.
    #[must_use]
    pub const fn to_ground(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.y)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Quaternion for rotations
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Quaternion {
    /// Creates a new quaternion
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Rotation of `angle` degrees about the up (`y`) axis.
    #[must_use]
    pub fn from_angle_up(angle: f32) -> Self {
        let (sin, cos) = (angle.to_radians() * 0.5).sin_cos();
        Self::new(0.0, sin, 0.0, cos)
    }

    /// Applies this rotation to a vector.
    #[must_use]
    pub fn rotate(self, v: Vec3) -> Vec3 {
        // v' = v + 2w(q × v) + 2q × (q × v)
        let q = Vec3::new(self.x, self.y, self.z);
        let t = cross(q, v) * 2.0;
        v + t * self.w + cross(q, t)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// Transform - position + rotation + per-axis scale
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Transform {
    /// Position
    pub position: Vec3,
    /// Rotation
    pub rotation: Quaternion,
    /// Scale per axis
    pub scale: Vec3,
}

impl Transform {
    /// Creates a new transform
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quaternion, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    /// Identity transform
    pub const IDENTITY: Self = Self::new(Vec3::ZERO, Quaternion::IDENTITY, Vec3::ONE);

    /// Pure translation.
    #[must_use]
    pub const fn translate(position: Vec3) -> Self {
        Self::new(position, Quaternion::IDENTITY, Vec3::ONE)
    }

    /// Pure rotation.
    #[must_use]
    pub const fn rotate(rotation: Quaternion) -> Self {
        Self::new(Vec3::ZERO, rotation, Vec3::ONE)
    }

    /// Pure scale.
    #[must_use]
    pub const fn scale(scale: Vec3) -> Self {
        Self::new(Vec3::ZERO, Quaternion::IDENTITY, scale)
    }

    /// Composes `self * child`: the child transform is applied first.
    ///
    /// Only valid for uniform parent scales or scale applied last, which is
    /// how draw transforms are built (translate, rotate, translate, scale).
    #[must_use]
    pub fn then(self, child: Self) -> Self {
        let scaled = Vec3::new(
            child.position.x * self.scale.x,
            child.position.y * self.scale.y,
            child.position.z * self.scale.z,
        );
        Self {
            position: self.position + self.rotation.rotate(scaled),
            rotation: mul_quat(self.rotation, child.rotation),
            scale: Vec3::new(
                self.scale.x * child.scale.x,
                self.scale.y * child.scale.y,
                self.scale.z * child.scale.z,
            ),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn mul_quat(a: Quaternion, b: Quaternion) -> Quaternion {
    Quaternion::new(
        a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
        a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
        a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
    )
}

/// Wraps an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        let sum = a + b;
        assert_eq!(sum.x, 5.0);
        assert_eq!(sum.y, 7.0);
        assert_eq!(sum.z, 9.0);

        let dot = a.dot(b);
        assert_eq!(dot, 32.0); // 1*4 + 2*5 + 3*6
    }

    #[test]
    fn test_vec3_bytemuck() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 12); // 3 * 4 bytes
    }

    #[test]
    fn test_rotation_is_clockwise_from_north() {
        let north = Vec3::new(0.0, 0.0, 1.0);
        assert!(close(north.rotated_by(90.0), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(north.rotated_by(180.0), Vec3::new(0.0, 0.0, -1.0)));
        assert!(close(north.rotated_by(270.0), Vec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_quaternion_matches_rotated_by() {
        let v = Vec3::new(0.3, 0.7, -0.2);
        for angle in [0.0, 33.0, 90.0, 143.0, 217.0, 301.5] {
            let q = Quaternion::from_angle_up(angle);
            assert!(close(q.rotate(v), v.rotated_by(angle)), "angle {angle}");
        }
    }

    #[test]
    fn test_angle_flat() {
        assert_eq!(Vec3::ZERO.angle_flat(), 0.0);
        assert!((Vec3::new(1.0, 5.0, 0.0).angle_flat() - 90.0).abs() < 1e-4);
        assert!((Vec3::new(0.0, 0.0, -1.0).angle_flat() - 180.0).abs() < 1e-4);
        assert!((Vec3::new(-1.0, 0.0, 0.0).angle_flat() - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(725.0), 5.0);
        assert!(normalize_angle(-1e-9) < 360.0);
    }

    #[test]
    fn test_transform_composition() {
        // translate, rotate, translate, scale: the belt-pack composition
        let t = Transform::translate(Vec3::new(1.0, 0.5, 1.0))
            .then(Transform::rotate(Quaternion::from_angle_up(90.0)))
            .then(Transform::translate(Vec3::new(0.0, 0.0, 0.2)))
            .then(Transform::scale(Vec3::new(0.8, 1.0, 1.2)));

        assert!(close(t.position, Vec3::new(1.2, 0.5, 1.0)));
        assert!(close(t.scale, Vec3::new(0.8, 1.0, 1.2)));
        let probe = t.rotation.rotate(Vec3::new(0.0, 0.0, 1.0));
        assert!(close(probe, Vec3::new(1.0, 0.0, 0.0)));
    }
}
