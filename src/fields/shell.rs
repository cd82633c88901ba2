use crate::config::FieldConfig;
use crate::constants::{BOUNDARY_EPSILON, SINGULARITY_DISTANCE_SQ};
use crate::math::{normalize_or_zero, Scalar, R3};
use crate::shells::Material;
use crate::sources::{ConcentricShells, ShellGeometry};

use super::ElectrostaticSource;

/// Region of a shell stack containing a given radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellRegion {
    /// Layer index, or `None` outside the outermost radius.
    pub layer: Option<usize>,
    /// Free charge on every boundary strictly inside the radius.
    pub enclosed_charge: Scalar,
    /// Relative permittivity of the region (1 outside the stack).
    pub dielectric_constant: Scalar,
    /// True inside a conductor layer.
    pub conducting: bool,
}

/// Locates `radius` within the stack and sums the boundary charges it encloses.
///
/// Returns `None` when `radius` lies on a layer boundary, except the outermost
/// boundary of a dielectric stack, which is treated as outside.
#[must_use]
pub fn shell_region(shells: &ConcentricShells, radius: Scalar) -> Option<ShellRegion> {
    let system = &shells.system;
    let n = system.radii.len().min(system.materials.len());
    for (i, &boundary) in system.radii.iter().take(n).enumerate() {
        if (radius - boundary).abs() <= BOUNDARY_EPSILON {
            let outer_dielectric = i + 1 == n && system.materials[i] == Material::Dielectric;
            if !outer_dielectric {
                return None;
            }
        }
    }

    let charges = system.charge_per_surface();
    let layer = system.radii.iter().take(n).position(|&boundary| radius < boundary);
    let inner = layer.unwrap_or(n);
    let enclosed_charge = charges.iter().take(inner).sum();
    let (dielectric_constant, conducting) = match layer {
        Some(i) => (
            system.dielectric_constants.get(i).copied().unwrap_or(1.0),
            system.materials[i] == Material::Conductor,
        ),
        None => (1.0, false),
    };
    Some(ShellRegion { layer, enclosed_charge, dielectric_constant, conducting })
}

/// Electric field of a concentric conductor/dielectric stack.
///
/// After redistributing the free charge over the layer boundaries, Gauss's law
/// gives `k·Q/(κ r²)` for spherical stacks and `2k·λ/(κ r)` for cylindrical
/// ones, with `Q`/`λ` the charge enclosed by the query radius and `κ` the
/// dielectric constant of the layer containing it. Conductor interiors and
/// boundary radii see no field.
#[must_use]
pub fn concentric_shells_field(shells: &ConcentricShells, point: &R3, config: &FieldConfig) -> R3 {
    let rel = point - shells.position;
    let radial = match shells.geometry {
        ShellGeometry::Spherical => rel,
        ShellGeometry::Cylindrical => {
            let axis = normalize_or_zero(&shells.axis);
            if axis == R3::zeros() {
                return R3::zeros();
            }
            rel - axis * rel.dot(&axis)
        }
    };
    let r2 = radial.norm_squared();
    if r2 < SINGULARITY_DISTANCE_SQ {
        return R3::zeros();
    }
    let r = r2.sqrt();
    let Some(region) = shell_region(shells, r) else {
        return R3::zeros();
    };
    if region.conducting || region.dielectric_constant <= 0.0 {
        return R3::zeros();
    }

    let k = config.coulomb_constant();
    let magnitude = match shells.geometry {
        ShellGeometry::Spherical => k * region.enclosed_charge / (region.dielectric_constant * r2),
        ShellGeometry::Cylindrical => 2.0 * k * region.enclosed_charge / (region.dielectric_constant * r),
    };
    radial / r * magnitude
}

impl ElectrostaticSource for ConcentricShells {
    fn electric_field(&self, point: &R3, config: &FieldConfig) -> R3 {
        concentric_shells_field(self, point, config)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::wire::infinite_wire_field;
    use crate::shells::{Material::*, ShellSystem};
    use crate::sources::InfiniteWire;

    fn core_in_dielectric() -> ShellSystem {
        ShellSystem::new(vec![1.0, 2.0], vec![Conductor, Dielectric], vec![1.0, 2.0], vec![5.0, 0.0])
    }

    #[test]
    fn conductor_core_in_dielectric_shell() {
        let cfg = FieldConfig::default();
        let shells = ConcentricShells::spherical(R3::zeros(), core_in_dielectric());
        let k = cfg.coulomb_constant();

        assert_eq!(concentric_shells_field(&shells, &R3::new(0.5, 0.0, 0.0), &cfg), R3::zeros());

        let region = shell_region(&shells, 1.5).expect("interior radius");
        assert_relative_eq!(region.enclosed_charge, 5.0);
        let e = concentric_shells_field(&shells, &R3::new(0.0, 1.5, 0.0), &cfg);
        assert_relative_eq!(e.y, k * 5.0 / (2.0 * 1.5 * 1.5), max_relative = 1.0e-12);

        let e = concentric_shells_field(&shells, &R3::new(0.0, 0.0, 3.0), &cfg);
        assert_relative_eq!(e.z, k * 5.0 / 9.0, max_relative = 1.0e-12);
    }

    #[test]
    fn boundaries_follow_zero_field_convention() {
        let cfg = FieldConfig::default();
        let shells = ConcentricShells::spherical(R3::zeros(), core_in_dielectric());
        assert_eq!(concentric_shells_field(&shells, &R3::new(1.0, 0.0, 0.0), &cfg), R3::zeros());
        // outermost dielectric boundary stays continuous with the outside
        let e = concentric_shells_field(&shells, &R3::new(2.0, 0.0, 0.0), &cfg);
        assert_relative_eq!(e.x, cfg.coulomb_constant() * 5.0 / 4.0, max_relative = 1.0e-12);

        let outer_conductor = ConcentricShells::spherical(
            R3::zeros(),
            ShellSystem::new(vec![1.0, 2.0], vec![Dielectric, Conductor], vec![1.0, 1.0], vec![0.0, 3.0]),
        );
        assert_eq!(concentric_shells_field(&outer_conductor, &R3::new(2.0, 0.0, 0.0), &cfg), R3::zeros());
    }

    #[test]
    fn grounded_style_shell_screens_inner_charge() {
        let cfg = FieldConfig::default();
        // core +4, neutral outer conductor from r = 2 to 3
        let system = ShellSystem::new(
            vec![1.0, 2.0, 3.0],
            vec![Conductor, Dielectric, Conductor],
            vec![1.0, 1.0, 1.0],
            vec![4.0, 0.0, 0.0],
        );
        let shells = ConcentricShells::spherical(R3::zeros(), system);
        assert_eq!(concentric_shells_field(&shells, &R3::new(2.5, 0.0, 0.0), &cfg), R3::zeros());
        let outside = concentric_shells_field(&shells, &R3::new(4.0, 0.0, 0.0), &cfg);
        assert_relative_eq!(outside.x, cfg.coulomb_constant() * 4.0 / 16.0, max_relative = 1.0e-12);
    }

    #[test]
    fn cylindrical_stack_matches_line_charge_outside() {
        let cfg = FieldConfig::default();
        let system = ShellSystem::new(vec![0.5], vec![Conductor], vec![1.0], vec![2.0]);
        let shells = ConcentricShells::cylindrical(R3::zeros(), R3::z(), system);
        let wire = InfiniteWire::new(R3::zeros(), R3::z(), 2.0);
        let p = R3::new(1.0, -2.0, 17.0);
        assert_relative_eq!(
            concentric_shells_field(&shells, &p, &cfg),
            infinite_wire_field(&wire, &p, &cfg),
            max_relative = 1.0e-12
        );
    }
}
