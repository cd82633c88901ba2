//! Superposition of source fields at a query point.

use crate::config::FieldConfig;
use crate::fields::{source_electric_field, source_magnetic_field};
use crate::math::{finite_or_zero, R3};
use crate::sources::FieldSource;
use crate::surfaces::GaussianSurface;

/// Entry of a mixed scene list: either a charge/current source or a Gaussian
/// query surface.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    /// Produces a field.
    Source(FieldSource),
    /// Query volume; never contributes to the field.
    Surface(GaussianSurface),
}

impl From<FieldSource> for SceneObject {
    fn from(value: FieldSource) -> Self {
        Self::Source(value)
    }
}

impl From<GaussianSurface> for SceneObject {
    fn from(value: GaussianSurface) -> Self {
        Self::Surface(value)
    }
}

impl SceneObject {
    /// The source, if this object is one.
    #[must_use]
    pub const fn as_source(&self) -> Option<&FieldSource> {
        match self {
            Self::Source(source) => Some(source),
            Self::Surface(_) => None,
        }
    }
}

/// Electric field of `sources` at `point` with the scene-scaled constants.
#[must_use]
pub fn field_at(sources: &[FieldSource], point: &R3) -> R3 {
    field_at_with(&FieldConfig::default(), sources, point)
}

/// Electric field of `sources` at `point`.
#[must_use]
pub fn field_at_with(config: &FieldConfig, sources: &[FieldSource], point: &R3) -> R3 {
    let total = sources
        .iter()
        .map(|source| source_electric_field(source, point, config))
        .sum();
    finite_or_zero(total)
}

/// Electric field at `point` of every source in a mixed scene list.
///
/// Gaussian surfaces are skipped.
#[must_use]
pub fn field_at_scene(objects: &[SceneObject], point: &R3) -> R3 {
    field_at_scene_with(&FieldConfig::default(), objects, point)
}

/// [`field_at_scene`] with explicit constants.
#[must_use]
pub fn field_at_scene_with(config: &FieldConfig, objects: &[SceneObject], point: &R3) -> R3 {
    let total = objects
        .iter()
        .filter_map(SceneObject::as_source)
        .map(|source| source_electric_field(source, point, config))
        .sum();
    finite_or_zero(total)
}

/// Magnetic flux density of `sources` at `point`; only current loops contribute.
#[must_use]
pub fn magnetic_field_at(sources: &[FieldSource], point: &R3) -> R3 {
    magnetic_field_at_with(&FieldConfig::default(), sources, point)
}

/// [`magnetic_field_at`] with explicit constants.
#[must_use]
pub fn magnetic_field_at_with(config: &FieldConfig, sources: &[FieldSource], point: &R3) -> R3 {
    let total = sources
        .iter()
        .map(|source| source_magnetic_field(source, point, config))
        .sum();
    finite_or_zero(total)
}
