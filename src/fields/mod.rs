//! Closed-form electric and magnetic fields of the canonical source shapes.
//!
//! Every solver is total: degenerate shapes (zero length, area or radius,
//! zero direction vectors) and query points exactly on a charged boundary
//! yield the zero vector rather than `NaN` or infinities.

mod electrostatic;
mod magnetic;
mod plane;
mod shell;
mod wire;

use crate::config::FieldConfig;
use crate::math::R3;
use crate::sources::FieldSource;

pub use electrostatic::{charged_sphere_field, coulomb_field, point_charge_field};
pub use magnetic::{current_loop_field, magnetic_contribution_at};
pub use plane::{finite_plane_field, infinite_plane_field, stacked_planes_field};
pub use shell::{concentric_shells_field, shell_region, ShellRegion};
pub use wire::{finite_wire_field, infinite_wire_field};

/// Trait implemented by every source shape that produces an electrostatic field.
pub trait ElectrostaticSource {
    /// Electric field of the source at `point`.
    fn electric_field(&self, point: &R3, config: &FieldConfig) -> R3;
}

/// Electric field of a single source at `point`.
///
/// Current loops carry no net charge and contribute nothing.
#[must_use]
pub fn source_electric_field(source: &FieldSource, point: &R3, config: &FieldConfig) -> R3 {
    match source {
        FieldSource::PointCharge(s) => s.electric_field(point, config),
        FieldSource::FiniteWire(s) => s.electric_field(point, config),
        FieldSource::InfiniteWire(s) => s.electric_field(point, config),
        FieldSource::FinitePlane(s) => s.electric_field(point, config),
        FieldSource::InfinitePlane(s) => s.electric_field(point, config),
        FieldSource::ChargedSphere(s) => s.electric_field(point, config),
        FieldSource::ConcentricShells(s) => s.electric_field(point, config),
        FieldSource::StackedPlanes(s) => s.electric_field(point, config),
        FieldSource::CurrentLoop(_) => R3::zeros(),
    }
}

/// Magnetic field of a single source at `point`; only current loops contribute.
#[must_use]
pub fn source_magnetic_field(source: &FieldSource, point: &R3, config: &FieldConfig) -> R3 {
    match source {
        FieldSource::CurrentLoop(lp) => current_loop_field(lp, point, config),
        FieldSource::PointCharge(_)
        | FieldSource::FiniteWire(_)
        | FieldSource::InfiniteWire(_)
        | FieldSource::FinitePlane(_)
        | FieldSource::InfinitePlane(_)
        | FieldSource::ChargedSphere(_)
        | FieldSource::ConcentricShells(_)
        | FieldSource::StackedPlanes(_) => R3::zeros(),
    }
}
