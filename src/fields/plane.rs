use std::f64::consts::PI;

use crate::config::FieldConfig;
use crate::constants::BOUNDARY_EPSILON;
use crate::math::{finite_or_zero, normalize_or_zero, Scalar, R3};
use crate::sources::{ChargedPlane, FinitePlane, InfinitePlane, StackedPlanes};

use super::ElectrostaticSource;

/// `ln(v₁ + √(v₁² + a²)) − ln(v₀ + √(v₀² + a²))` for `v₀ ≤ v₁`.
///
/// Negative offsets use `v + r = a² / (r − v)`; when both offsets are negative
/// the `a²` factors cancel, so the difference stays finite as `a² → 0`.
#[inline]
fn log_difference(v0: Scalar, v1: Scalar, a_sq: Scalar) -> Scalar {
    let r0 = (v0 * v0 + a_sq).sqrt();
    let r1 = (v1 * v1 + a_sq).sqrt();
    if v0 >= 0.0 {
        ((v1 + r1) / (v0 + r0)).ln()
    } else if v1 < 0.0 {
        ((r0 - v0) / (r1 - v1)).ln()
    } else {
        ((v1 + r1) * (r0 - v0) / a_sq).ln()
    }
}

/// Electric field of a uniformly charged rectangle.
///
/// Evaluated in the plane's `(u, v, n)` frame. With `uᵢ`, `vⱼ` the offsets of
/// the rectangle edges from the query point and `Rᵢⱼ = √(uᵢ² + vⱼ² + z²)`:
///
/// ```text
/// E_u = kσ · ln[(v₂+R₂₂)(v₁+R₁₁) / ((v₁+R₂₁)(v₂+R₁₂))]
/// E_v = kσ · ln[(u₂+R₂₂)(u₁+R₁₁) / ((u₁+R₁₂)(u₂+R₂₁))]
/// E_n = kσ · Σ ±atan(uᵢ vⱼ / (z Rᵢⱼ))
/// ```
///
/// A point in the plane of the sheet has no normal component; one inside the
/// rectangle itself sees no field at all.
#[must_use]
pub fn finite_plane_field(plane: &FinitePlane, point: &R3, config: &FieldConfig) -> R3 {
    let (u_axis, v_axis, n_axis) = plane.frame();
    if n_axis == R3::zeros() || plane.width <= 0.0 || plane.height <= 0.0 {
        return R3::zeros();
    }
    let rel = point - plane.position;
    let x = rel.dot(&u_axis);
    let y = rel.dot(&v_axis);
    let z = rel.dot(&n_axis);
    let (hw, hh) = (plane.width * 0.5, plane.height * 0.5);
    let in_plane = z.abs() <= BOUNDARY_EPSILON;
    if in_plane && x.abs() <= hw && y.abs() <= hh {
        return R3::zeros();
    }

    let u = [-hw - x, hw - x];
    let v = [-hh - y, hh - y];
    let z2 = z * z;

    // ∂/∂v of the u-antiderivative and vice versa
    let e_u = log_difference(v[0], v[1], u[1] * u[1] + z2) - log_difference(v[0], v[1], u[0] * u[0] + z2);
    let e_v = log_difference(u[0], u[1], v[1] * v[1] + z2) - log_difference(u[0], u[1], v[0] * v[0] + z2);
    let mut e_n = 0.0;
    if !in_plane {
        for (i, &ui) in u.iter().enumerate() {
            for (j, &vj) in v.iter().enumerate() {
                let sign = if i == j { 1.0 } else { -1.0 };
                let r = (ui * ui + vj * vj + z2).sqrt();
                e_n += sign * (ui * vj / (z * r)).atan();
            }
        }
    }

    let k_sigma = config.coulomb_constant() * plane.surface_density;
    finite_or_zero((u_axis * e_u + v_axis * e_v + n_axis * e_n) * k_sigma)
}

/// Electric field `σ / 2ε` of an infinite sheet, pointing away from it on either side.
#[must_use]
pub fn infinite_plane_field(plane: &InfinitePlane, point: &R3, config: &FieldConfig) -> R3 {
    let n = normalize_or_zero(&plane.normal);
    if n == R3::zeros() {
        return R3::zeros();
    }
    let distance = (point - plane.position).dot(&n);
    if distance.abs() <= BOUNDARY_EPSILON {
        return R3::zeros();
    }
    let magnitude = 2.0 * PI * config.coulomb_constant() * plane.surface_density;
    n * (magnitude * distance.signum())
}

/// Superposed field of every layer in a plane stack.
#[must_use]
pub fn stacked_planes_field(stack: &StackedPlanes, point: &R3, config: &FieldConfig) -> R3 {
    stack
        .layers()
        .map(|layer| match layer {
            ChargedPlane::Finite(plane) => finite_plane_field(&plane, point, config),
            ChargedPlane::Infinite(plane) => infinite_plane_field(&plane, point, config),
        })
        .sum()
}

impl ElectrostaticSource for FinitePlane {
    fn electric_field(&self, point: &R3, config: &FieldConfig) -> R3 {
        finite_plane_field(self, point, config)
    }
}

impl ElectrostaticSource for InfinitePlane {
    fn electric_field(&self, point: &R3, config: &FieldConfig) -> R3 {
        infinite_plane_field(self, point, config)
    }
}

impl ElectrostaticSource for StackedPlanes {
    fn electric_field(&self, point: &R3, config: &FieldConfig) -> R3 {
        stacked_planes_field(self, point, config)
    }
}
