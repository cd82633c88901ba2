use crate::config::FieldConfig;
use crate::constants::SINGULARITY_DISTANCE_SQ;
use crate::math::{Scalar, R3};
use crate::sources::{ChargedSphere, PointCharge};

use super::ElectrostaticSource;

/// Coulomb field `k q r̂ / r²` of a charge at `source` observed at `point`.
///
/// Points closer than `√SINGULARITY_DISTANCE_SQ` to the charge see no field.
#[inline]
#[must_use]
pub fn coulomb_field(source: &R3, charge: Scalar, point: &R3, k: Scalar) -> R3 {
    let r_vec = point - source;
    let r2 = r_vec.norm_squared();
    if r2 < SINGULARITY_DISTANCE_SQ {
        return R3::zeros();
    }
    r_vec * (k * charge / (r2 * r2.sqrt()))
}

/// Electric field of a single point charge.
#[must_use]
pub fn point_charge_field(charge: &PointCharge, point: &R3, config: &FieldConfig) -> R3 {
    coulomb_field(&charge.position, charge.charge, point, config.coulomb_constant())
}

/// Electric field of a uniformly charged sphere.
///
/// Outside (`r ≥ R`) the sphere acts as a point charge of its total charge.
/// Inside, a solid sphere's field grows linearly with `r` and a hollow
/// sphere's field vanishes.
#[must_use]
pub fn charged_sphere_field(sphere: &ChargedSphere, point: &R3, config: &FieldConfig) -> R3 {
    if sphere.radius <= 0.0 {
        return R3::zeros();
    }
    let k = config.coulomb_constant();
    let q = sphere.total_charge();
    let r_vec = point - sphere.position;
    if r_vec.norm() >= sphere.radius {
        return coulomb_field(&sphere.position, q, point, k);
    }
    if sphere.hollow {
        R3::zeros()
    } else {
        r_vec * (k * q / sphere.radius.powi(3))
    }
}

impl ElectrostaticSource for PointCharge {
    fn electric_field(&self, point: &R3, config: &FieldConfig) -> R3 {
        point_charge_field(self, point, config)
    }
}

impl ElectrostaticSource for ChargedSphere {
    fn electric_field(&self, point: &R3, config: &FieldConfig) -> R3 {
        charged_sphere_field(self, point, config)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn point_charge_matches_coulomb_law() {
        let cfg = FieldConfig::si();
        let q = PointCharge::new(R3::zeros(), 1.0e-9);
        let e = point_charge_field(&q, &R3::new(0.0, 0.0, 2.0), &cfg);
        let expected = cfg.coulomb_constant() * 1.0e-9 / 4.0;
        assert_relative_eq!(e.z, expected, max_relative = 1.0e-12);
        assert_relative_eq!(e.x, 0.0);
    }

    #[test]
    fn coincident_point_sees_no_field() {
        let q = PointCharge::new(R3::new(1.0, 1.0, 1.0), 5.0);
        let e = point_charge_field(&q, &R3::new(1.0, 1.0, 1.0005), &FieldConfig::default());
        assert_eq!(e, R3::zeros());
    }

    #[test]
    fn hollow_sphere_interior_is_field_free() {
        let cfg = FieldConfig::default();
        let sphere = ChargedSphere::hollow(R3::zeros(), 1.0, 2.0);
        assert_eq!(charged_sphere_field(&sphere, &R3::new(0.5, 0.0, 0.0), &cfg), R3::zeros());
        assert_eq!(charged_sphere_field(&sphere, &R3::new(-0.5, 0.0, 0.0), &cfg), R3::zeros());

        let outside = R3::new(2.0, 0.0, 0.0);
        let as_point = point_charge_field(&PointCharge::new(R3::zeros(), sphere.total_charge()), &outside, &cfg);
        assert_relative_eq!(charged_sphere_field(&sphere, &outside, &cfg), as_point, max_relative = 1.0e-12);
    }

    #[test]
    fn solid_sphere_interior_grows_linearly() {
        let cfg = FieldConfig::default();
        let sphere = ChargedSphere::solid(R3::zeros(), 1.0, 1.0);
        let half = charged_sphere_field(&sphere, &R3::new(0.0, 0.5, 0.0), &cfg).norm();
        let surface = charged_sphere_field(&sphere, &R3::new(0.0, 1.0, 0.0), &cfg).norm();
        assert_relative_eq!(half, 0.5 * surface, max_relative = 1.0e-12);
    }

    #[test]
    fn degenerate_sphere_has_no_field() {
        let sphere = ChargedSphere::solid(R3::zeros(), 0.0, 1.0);
        assert_eq!(charged_sphere_field(&sphere, &R3::new(1.0, 0.0, 0.0), &FieldConfig::default()), R3::zeros());
    }
}
