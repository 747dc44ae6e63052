//! Geometry value types shared by the catalog, the stroke engine and hosts.
use glam::{Mat4, Quat, Vec3};
use rand::RngCore;

/// A ray in world space, as produced by projecting a pointer position through the editor camera.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Returns the same ray with its origin moved by `offset`.
    pub fn offset_origin(&self, offset: Vec3) -> Self {
        Self {
            origin: self.origin + offset,
            direction: self.direction,
        }
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of resolving a ray against the scene surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit<O> {
    /// World-space hit point.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
    /// Host object that was hit.
    pub object: O,
}

impl<O> SurfaceHit<O> {
    pub fn new(point: Vec3, normal: Vec3, object: O) -> Self {
        Self {
            point,
            normal,
            object,
        }
    }
}

/// Placement of a single painted instance: translation, rotation and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl InstanceTransform {
    /// The instance's local up axis expressed in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Scale as a vector with the same value on all three axes.
    pub fn scale_vec(&self) -> Vec3 {
        Vec3::splat(self.scale)
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale_vec(), self.rotation, self.translation)
    }
}

/// Generate a random float in the range [0, 1).
///
/// Uses the top 24 bits so every value is exactly representable.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Compute the next smaller representable float value.
///
/// Used to keep `value * rand01()` strictly below `value` after float rounding.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}

/// Uniform sample in `[0, upper)`; returns 0 when `upper` is not positive.
#[inline]
pub(crate) fn sample_below(upper: f32, rng: &mut dyn RngCore) -> f32 {
    if upper <= 0.0 {
        return 0.0;
    }
    (rand01(rng) * upper).min(next_down(upper))
}
