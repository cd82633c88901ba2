//! Convenience re-exports for building field queries.

pub use crate::aggregate::{
    field_at, field_at_scene, field_at_scene_with, field_at_with, magnetic_field_at,
    magnetic_field_at_with, SceneObject,
};
pub use crate::config::{EnclosureConfig, FieldConfig};
pub use crate::constants::*;
pub use crate::enclosure::{
    charged_sphere_intersects, estimate_enclosed_charge, estimate_enclosed_charge_with,
    object_intersects_surface, plane_intersects, wire_intersects, EnclosureEstimate,
};
pub use crate::errors::EmFieldError;
pub use crate::fields::{source_electric_field, source_magnetic_field, ElectrostaticSource};
pub use crate::flux::{
    flux_through_loop, flux_through_loop_with, flux_through_surface, flux_through_surface_with,
    magnetic_flux_through_loop, magnetic_flux_through_loop_with, FluxDisk,
};
pub use crate::math::{normalize_or_zero, plane_basis, Rotation, Scalar, R3};
pub use crate::shells::{charge_per_surface, Material, ShellLayer, ShellSystem};
pub use crate::sources::{
    ChargedPlane, ChargedSphere, ChargedWire, ConcentricShells, CurrentElement, CurrentLoopSample,
    FieldSource, FinitePlane, FiniteWire, InfinitePlane, InfiniteWire, PlaneExtent, PointCharge,
    ShellGeometry, StackedPlanes,
};
pub use crate::surfaces::{allocate_samples, GaussianSurface, SamplePoint, SurfaceNormal, SurfaceShape};
pub use crate::transform::SurfaceTransform;
