use crate::config::FieldConfig;
use crate::constants::{BOUNDARY_EPSILON, SINGULARITY_DISTANCE_SQ};
use crate::math::{finite_or_zero, normalize_or_zero, R3};
use crate::sources::{FiniteWire, InfiniteWire};

use super::ElectrostaticSource;

/// Electric field of a uniformly charged straight segment.
///
/// With `a` and `b` the axial offsets of the two ends from the query point and
/// `d` its distance from the axis, the closed-form line integral gives
///
/// ```text
/// E_radial = kλ/d · (b/√(b²+d²) − a/√(a²+d²))
/// E_axial  = kλ   · (1/√(b²+d²) − 1/√(a²+d²))
/// ```
///
/// Points inside the conductor (within `radius` of the axis and between the
/// ends) or on the line charge itself see no field.
#[must_use]
pub fn finite_wire_field(wire: &FiniteWire, point: &R3, config: &FieldConfig) -> R3 {
    let axis = normalize_or_zero(&wire.axis);
    if axis == R3::zeros() || wire.length <= 0.0 {
        return R3::zeros();
    }
    let k_lambda = config.coulomb_constant() * wire.linear_density;
    let rel = point - wire.position;
    let z = rel.dot(&axis);
    let radial = rel - axis * z;
    let d = radial.norm();
    let half = wire.length * 0.5;
    let a = -half - z;
    let b = half - z;
    let within_ends = a <= 0.0 && b >= 0.0;

    if within_ends && (d < wire.radius || d <= BOUNDARY_EPSILON) {
        return R3::zeros();
    }
    if d <= BOUNDARY_EPSILON {
        // On the axis beyond an end: purely axial.
        return finite_or_zero(axis * (k_lambda * (1.0 / b.abs() - 1.0 / a.abs())));
    }

    let r_a = a.hypot(d);
    let r_b = b.hypot(d);
    let e_radial = k_lambda / d * (b / r_b - a / r_a);
    let e_axial = k_lambda * (1.0 / r_b - 1.0 / r_a);
    finite_or_zero(radial / d * e_radial + axis * e_axial)
}

/// Electric field `2kλ/d` of an infinite line charge, directed away from the line.
#[must_use]
pub fn infinite_wire_field(wire: &InfiniteWire, point: &R3, config: &FieldConfig) -> R3 {
    let axis = normalize_or_zero(&wire.axis);
    if axis == R3::zeros() {
        return R3::zeros();
    }
    let rel = point - wire.position;
    let radial = rel - axis * rel.dot(&axis);
    let d2 = radial.norm_squared();
    if d2 < SINGULARITY_DISTANCE_SQ {
        return R3::zeros();
    }
    radial * (2.0 * config.coulomb_constant() * wire.linear_density / d2)
}

impl ElectrostaticSource for FiniteWire {
    fn electric_field(&self, point: &R3, config: &FieldConfig) -> R3 {
        finite_wire_field(self, point, config)
    }
}

impl ElectrostaticSource for InfiniteWire {
    fn electric_field(&self, point: &R3, config: &FieldConfig) -> R3 {
        infinite_wire_field(self, point, config)
    }
}
