//! Brush parameters and the defaults applied to newly added brushes.
use glam::Vec3;
use rand::RngCore;

use crate::error::{Error, Result};
use crate::math::rand01;

/// Upper bound on ray attempts in one paint stroke, whatever `density * radius` is.
pub const MAX_ATTEMPTS_PER_STROKE: usize = 1024;

/// Closed interval for the uniform scale applied to painted instances.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawScaleRange"))]
pub struct ScaleRange {
    min: f32,
    max: f32,
}

impl ScaleRange {
    /// Creates a range, rejecting non-finite, non-positive or inverted bounds.
    pub fn new(min: f32, max: f32) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidBrush(format!(
                "scale range must be finite, got [{min}, {max}]"
            )));
        }
        if min <= 0.0 {
            return Err(Error::InvalidBrush(format!(
                "scale range minimum must be > 0, got {min}"
            )));
        }
        if min > max {
            return Err(Error::InvalidBrush(format!(
                "scale range minimum {min} exceeds maximum {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Range containing only `value`.
    pub fn exact(value: f32) -> Result<Self> {
        Self::new(value, value)
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Draws one scale value from the range.
    pub fn sample(&self, rng: &mut dyn RngCore) -> f32 {
        let value = self.min + rand01(rng) * (self.max - self.min);
        value.clamp(self.min, self.max)
    }
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self { min: 0.5, max: 1.5 }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawScaleRange {
    min: f32,
    max: f32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawScaleRange> for ScaleRange {
    type Error = Error;

    fn try_from(raw: RawScaleRange) -> Result<Self> {
        Self::new(raw.min, raw.max)
    }
}

/// Axes on which a painted instance receives a random rotation in [0°, 360°).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomRotationAxes {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl RandomRotationAxes {
    pub const NONE: Self = Self {
        x: false,
        y: false,
        z: false,
    };
    pub const Y: Self = Self {
        x: false,
        y: true,
        z: false,
    };
    pub const ALL: Self = Self {
        x: true,
        y: true,
        z: true,
    };

    pub fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    pub fn any(&self) -> bool {
        self.x || self.y || self.z
    }
}

/// Values applied to a brush when it is added to a catalog.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrushDefaults {
    /// Instances attempted per stroke event, per unit of radius.
    pub density: f32,
    /// Jitter extent when painting and erase radius, in world units.
    pub radius: f32,
    /// Offset added to each surface hit before spawning.
    pub pivot_offset: Vec3,
    /// Range of the uniform scale.
    pub scale_range: ScaleRange,
    /// Whether instances are tilted so their up axis follows the surface normal.
    pub align_to_surface: bool,
    /// Axes that receive a random rotation.
    pub rotation: RandomRotationAxes,
}

impl Default for BrushDefaults {
    fn default() -> Self {
        Self {
            density: 1.0,
            radius: 5.0,
            pivot_offset: Vec3::ZERO,
            scale_range: ScaleRange::default(),
            align_to_surface: false,
            rotation: RandomRotationAxes::Y,
        }
    }
}

impl BrushDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default density.
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Sets the default radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the default pivot offset.
    pub fn with_pivot_offset(mut self, pivot_offset: Vec3) -> Self {
        self.pivot_offset = pivot_offset;
        self
    }

    /// Sets the default scale range.
    pub fn with_scale_range(mut self, scale_range: ScaleRange) -> Self {
        self.scale_range = scale_range;
        self
    }

    /// Sets whether new brushes align to the surface.
    pub fn with_align_to_surface(mut self, align_to_surface: bool) -> Self {
        self.align_to_surface = align_to_surface;
        self
    }

    /// Sets the default rotation randomization.
    pub fn with_rotation(mut self, rotation: RandomRotationAxes) -> Self {
        self.rotation = rotation;
        self
    }

    /// Validates the defaults, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        validate_non_negative("density", self.density).map_err(into_config)?;
        validate_non_negative("radius", self.radius).map_err(into_config)?;
        if !self.pivot_offset.is_finite() {
            return Err(Error::InvalidConfig("pivot_offset must be finite".into()));
        }
        ScaleRange::new(self.scale_range.min, self.scale_range.max).map_err(into_config)?;
        Ok(())
    }
}

fn into_config(err: Error) -> Error {
    match err {
        Error::InvalidBrush(msg) => Error::InvalidConfig(msg),
        other => other,
    }
}

fn validate_non_negative(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidBrush(format!(
            "{name} must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}

/// One user-defined brush: a template reference plus stroke parameters.
///
/// `T` is the host's template handle. The brush never owns the template; a
/// `None` template models a reference whose asset has gone away, and painting
/// with such a brush does nothing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawBrushDefinition<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct BrushDefinition<T> {
    template: Option<T>,
    density: f32,
    radius: f32,
    pivot_offset: Vec3,
    scale_range: ScaleRange,
    align_to_surface: bool,
    rotation: RandomRotationAxes,
}

impl<T> BrushDefinition<T> {
    /// Creates a brush with [`BrushDefaults::default`] parameters.
    pub fn new(template: Option<T>) -> Self {
        Self::with_defaults(template, &BrushDefaults::default())
    }

    /// Creates a brush from the given defaults.
    ///
    /// The defaults are expected to be valid; see [`BrushDefaults::validate`].
    pub fn with_defaults(template: Option<T>, defaults: &BrushDefaults) -> Self {
        debug_assert!(defaults.validate().is_ok(), "brush defaults must be valid");
        Self {
            template,
            density: defaults.density,
            radius: defaults.radius,
            pivot_offset: defaults.pivot_offset,
            scale_range: defaults.scale_range,
            align_to_surface: defaults.align_to_surface,
            rotation: defaults.rotation,
        }
    }

    pub fn template(&self) -> Option<&T> {
        self.template.as_ref()
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn pivot_offset(&self) -> Vec3 {
        self.pivot_offset
    }

    pub fn scale_range(&self) -> ScaleRange {
        self.scale_range
    }

    pub fn align_to_surface(&self) -> bool {
        self.align_to_surface
    }

    pub fn rotation(&self) -> RandomRotationAxes {
        self.rotation
    }

    /// Number of placement attempts per stroke event: `density * radius`
    /// rounded, at least 1 and at most [`MAX_ATTEMPTS_PER_STROKE`].
    pub fn attempts_per_stroke(&self) -> usize {
        // Ties round to even, matching the editor this brush was modelled on.
        let raw = (self.density * self.radius).round_ties_even();
        if raw < 1.0 {
            1
        } else if raw >= MAX_ATTEMPTS_PER_STROKE as f32 {
            MAX_ATTEMPTS_PER_STROKE
        } else {
            raw as usize
        }
    }

    pub fn set_template(&mut self, template: Option<T>) {
        self.template = template;
    }

    pub fn set_density(&mut self, density: f32) -> Result<()> {
        validate_non_negative("density", density)?;
        self.density = density;
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f32) -> Result<()> {
        validate_non_negative("radius", radius)?;
        self.radius = radius;
        Ok(())
    }

    pub fn set_pivot_offset(&mut self, pivot_offset: Vec3) -> Result<()> {
        if !pivot_offset.is_finite() {
            return Err(Error::InvalidBrush(format!(
                "pivot offset must be finite, got {pivot_offset}"
            )));
        }
        self.pivot_offset = pivot_offset;
        Ok(())
    }

    pub fn set_scale_range(&mut self, min: f32, max: f32) -> Result<()> {
        self.scale_range = ScaleRange::new(min, max)?;
        Ok(())
    }

    pub fn set_align_to_surface(&mut self, align_to_surface: bool) {
        self.align_to_surface = align_to_surface;
    }

    pub fn set_rotation(&mut self, rotation: RandomRotationAxes) {
        self.rotation = rotation;
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBrushDefinition<T> {
    template: Option<T>,
    density: f32,
    radius: f32,
    pivot_offset: Vec3,
    scale_range: ScaleRange,
    align_to_surface: bool,
    rotation: RandomRotationAxes,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawBrushDefinition<T>> for BrushDefinition<T> {
    type Error = Error;

    fn try_from(raw: RawBrushDefinition<T>) -> Result<Self> {
        let mut brush = Self::new(raw.template);
        brush.set_density(raw.density)?;
        brush.set_radius(raw.radius)?;
        brush.set_pivot_offset(raw.pivot_offset)?;
        brush.scale_range = raw.scale_range;
        brush.set_align_to_surface(raw.align_to_surface);
        brush.set_rotation(raw.rotation);
        Ok(brush)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn new_brush_uses_documented_defaults() {
        let brush = BrushDefinition::new(Some("rock"));
        assert_eq!(brush.template(), Some(&"rock"));
        assert_eq!(brush.density(), 1.0);
        assert_eq!(brush.radius(), 5.0);
        assert_eq!(brush.scale_range().min(), 0.5);
        assert_eq!(brush.scale_range().max(), 1.5);
        assert_eq!(brush.rotation(), RandomRotationAxes::Y);
        assert!(!brush.align_to_surface());
        assert_eq!(brush.pivot_offset(), Vec3::ZERO);
    }

    #[test]
    fn scale_range_rejects_invalid_bounds() {
        assert!(ScaleRange::new(2.0, 1.0).is_err());
        assert!(ScaleRange::new(0.0, 1.0).is_err());
        assert!(ScaleRange::new(-1.0, 1.0).is_err());
        assert!(ScaleRange::new(1.0, f32::INFINITY).is_err());
        assert!(ScaleRange::new(f32::NAN, 1.0).is_err());
        assert!(ScaleRange::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn rejected_setter_leaves_brush_unchanged() {
        let mut brush = BrushDefinition::new(Some(1u32));
        assert!(brush.set_scale_range(3.0, 2.0).is_err());
        assert_eq!(brush.scale_range(), ScaleRange::default());

        assert!(brush.set_radius(-1.0).is_err());
        assert_eq!(brush.radius(), 5.0);

        assert!(brush.set_density(f32::NAN).is_err());
        assert_eq!(brush.density(), 1.0);

        assert!(brush.set_pivot_offset(Vec3::new(0.0, f32::INFINITY, 0.0)).is_err());
        assert_eq!(brush.pivot_offset(), Vec3::ZERO);
    }

    #[test]
    fn accepted_setters_update_fields() {
        let mut brush = BrushDefinition::new(Some(1u32));
        brush.set_density(2.5).unwrap();
        brush.set_radius(0.0).unwrap();
        brush.set_scale_range(0.25, 4.0).unwrap();
        brush.set_pivot_offset(Vec3::new(0.0, -0.5, 0.0)).unwrap();
        brush.set_align_to_surface(true);
        brush.set_rotation(RandomRotationAxes::ALL);
        brush.set_template(None);

        assert_eq!(brush.density(), 2.5);
        assert_eq!(brush.radius(), 0.0);
        assert_eq!(brush.scale_range(), ScaleRange::new(0.25, 4.0).unwrap());
        assert_eq!(brush.pivot_offset(), Vec3::new(0.0, -0.5, 0.0));
        assert!(brush.align_to_surface());
        assert!(brush.rotation().any());
        assert!(brush.template().is_none());
    }

    #[test]
    fn attempts_floor_to_one() {
        let mut brush = BrushDefinition::new(Some(()));
        brush.set_radius(0.0).unwrap();
        assert_eq!(brush.attempts_per_stroke(), 1);

        brush.set_radius(5.0).unwrap();
        brush.set_density(0.0).unwrap();
        assert_eq!(brush.attempts_per_stroke(), 1);

        brush.set_density(0.1).unwrap();
        assert_eq!(brush.attempts_per_stroke(), 1);
    }

    #[test]
    fn attempts_round_density_times_radius() {
        let mut brush = BrushDefinition::new(Some(()));
        brush.set_density(1.0).unwrap();
        brush.set_radius(5.0).unwrap();
        assert_eq!(brush.attempts_per_stroke(), 5);

        brush.set_density(0.7).unwrap();
        brush.set_radius(10.0).unwrap();
        assert_eq!(brush.attempts_per_stroke(), 7);

        // 2.5 rounds to the even neighbour.
        brush.set_density(0.5).unwrap();
        brush.set_radius(5.0).unwrap();
        assert_eq!(brush.attempts_per_stroke(), 2);
    }

    #[test]
    fn attempts_are_capped_for_huge_brushes() {
        let mut brush = BrushDefinition::new(Some(()));
        brush.set_density(1e6).unwrap();
        brush.set_radius(1e6).unwrap();
        assert_eq!(brush.attempts_per_stroke(), MAX_ATTEMPTS_PER_STROKE);

        brush.set_density(f32::MAX).unwrap();
        brush.set_radius(f32::MAX).unwrap();
        assert_eq!(brush.attempts_per_stroke(), MAX_ATTEMPTS_PER_STROKE);

        // Largest editor slider values stay under the cap.
        brush.set_density(5.0).unwrap();
        brush.set_radius(25.0).unwrap();
        assert_eq!(brush.attempts_per_stroke(), 125);
    }

    #[test]
    fn scale_samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        let range = ScaleRange::new(0.5, 1.5).unwrap();
        for _ in 0..1000 {
            assert!(range.contains(range.sample(&mut rng)));
        }

        let exact = ScaleRange::exact(1.0).unwrap();
        assert_eq!(exact.sample(&mut rng), 1.0);
    }

    #[test]
    fn defaults_validate() {
        assert!(BrushDefaults::default().validate().is_ok());
        let bad = BrushDefaults::new().with_radius(-2.0);
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));
        let bad = BrushDefaults::new().with_density(f32::INFINITY);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn with_defaults_copies_every_field() {
        let defaults = BrushDefaults::new()
            .with_density(0.2)
            .with_radius(12.0)
            .with_pivot_offset(Vec3::Y)
            .with_scale_range(ScaleRange::exact(2.0).unwrap())
            .with_align_to_surface(true)
            .with_rotation(RandomRotationAxes::NONE);
        let brush = BrushDefinition::with_defaults(Some("tree"), &defaults);
        assert_eq!(brush.density(), 0.2);
        assert_eq!(brush.radius(), 12.0);
        assert_eq!(brush.pivot_offset(), Vec3::Y);
        assert_eq!(brush.scale_range().min(), 2.0);
        assert!(brush.align_to_surface());
        assert!(!brush.rotation().any());
    }

    #[cfg(feature = "serde")]
    mod serde_validation {
        use super::*;

        #[test]
        fn inverted_scale_range_is_rejected() {
            let parsed = ron::from_str::<ScaleRange>("(min: 3.0, max: 1.0)");
            assert!(parsed.is_err());
            let parsed = ron::from_str::<ScaleRange>("(min: 0.0, max: 1.0)");
            assert!(parsed.is_err());
        }

        #[test]
        fn valid_scale_range_is_accepted() {
            let range = ron::from_str::<ScaleRange>("(min: 0.5, max: 2.0)").unwrap();
            assert_eq!(range, ScaleRange::new(0.5, 2.0).unwrap());
        }

        #[test]
        fn brush_with_negative_radius_is_rejected() {
            let text = r#"(
                template: Some("rock"),
                density: 1.0,
                radius: -5.0,
                pivot_offset: (0.0, 0.0, 0.0),
                scale_range: (min: 1.0, max: 1.0),
                align_to_surface: false,
                rotation: (x: false, y: true, z: false),
            )"#;
            assert!(ron::from_str::<BrushDefinition<String>>(text).is_err());
        }

        #[test]
        fn brush_with_inverted_scale_range_is_rejected() {
            let text = r#"(
                template: None,
                density: 1.0,
                radius: 5.0,
                pivot_offset: (0.0, 0.0, 0.0),
                scale_range: (min: 3.0, max: 1.0),
                align_to_surface: true,
                rotation: (x: false, y: false, z: false),
            )"#;
            assert!(ron::from_str::<BrushDefinition<String>>(text).is_err());
        }

        #[test]
        fn serialized_brush_reads_back() {
            let mut brush = BrushDefinition::new(Some("tree".to_owned()));
            brush.set_density(0.4).unwrap();
            brush.set_scale_range(0.8, 1.6).unwrap();
            let text = ron::to_string(&brush).unwrap();
            let parsed: BrushDefinition<String> = ron::from_str(&text).unwrap();
            assert_eq!(parsed, brush);
        }
    }
}
