//! Free-charge redistribution in nested conductor/dielectric layers.
//!
//! Layer `i` fills the region between `radii[i - 1]` (or the center) and
//! `radii[i]`; `charge_per_surface[i]` is the free charge sitting on the
//! boundary at `radii[i]`. Conductors hold no field in their interior, so the
//! charge enclosed by a conductor must be cancelled on its inner boundary and
//! the conductor's own charge pushed to its outer boundary. Dielectrics carry
//! no free charge.

use crate::errors::EmFieldError;
use crate::math::Scalar;

/// Electrical behavior of a shell layer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Ideal conductor: zero interior field, free charge on its boundaries.
    Conductor,
    /// Linear dielectric: field scaled by its dielectric constant.
    Dielectric,
}

/// One layer of a shell stack, used to build a [`ShellSystem`] row by row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellLayer {
    /// Outer radius of the layer.
    pub radius: Scalar,
    /// Layer material.
    pub material: Material,
    /// Relative permittivity κ.
    pub dielectric_constant: Scalar,
    /// Net free charge assigned to the layer (per unit length for cylinders).
    pub nominal_charge: Scalar,
}

/// Parallel per-layer arrays of a concentric stack, innermost layer first.
///
/// Callers must keep the arrays the same length and the radii strictly
/// increasing; [`ShellSystem::validate`] checks this but the solvers do not.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShellSystem {
    /// Outer radius of each layer.
    pub radii: Vec<Scalar>,
    /// Material of each layer.
    pub materials: Vec<Material>,
    /// Relative permittivity of each layer.
    pub dielectric_constants: Vec<Scalar>,
    /// Net free charge of each layer.
    pub nominal_charges: Vec<Scalar>,
}

impl ShellSystem {
    /// Creates a system from parallel arrays.
    #[must_use]
    pub fn new(
        radii: Vec<Scalar>,
        materials: Vec<Material>,
        dielectric_constants: Vec<Scalar>,
        nominal_charges: Vec<Scalar>,
    ) -> Self {
        Self { radii, materials, dielectric_constants, nominal_charges }
    }

    /// Creates a system from layers ordered innermost first.
    #[must_use]
    pub fn from_layers(layers: impl IntoIterator<Item = ShellLayer>) -> Self {
        let mut system = Self::default();
        for layer in layers {
            system.radii.push(layer.radius);
            system.materials.push(layer.material);
            system.dielectric_constants.push(layer.dielectric_constant);
            system.nominal_charges.push(layer.nominal_charge);
        }
        system
    }

    /// Number of layers, taken from `radii`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    /// True when the system has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Checks the array-length, radius-ordering and permittivity preconditions.
    pub fn validate(&self) -> Result<(), EmFieldError> {
        let expected = self.radii.len();
        if expected == 0 {
            return Err(EmFieldError::EmptySystem);
        }
        for (field, actual) in [
            ("materials", self.materials.len()),
            ("dielectric_constants", self.dielectric_constants.len()),
            ("nominal_charges", self.nominal_charges.len()),
        ] {
            if actual != expected {
                return Err(EmFieldError::LengthMismatch { field, expected, actual });
            }
        }
        let mut previous = 0.0;
        for (index, &radius) in self.radii.iter().enumerate() {
            if !(radius > previous) {
                return Err(EmFieldError::NonIncreasingRadii { index, radius });
            }
            previous = radius;
        }
        if let Some((index, &value)) = self
            .dielectric_constants
            .iter()
            .enumerate()
            .find(|&(_, &k)| !(k > 0.0))
        {
            return Err(EmFieldError::NonPositiveDielectric { index, value });
        }
        Ok(())
    }

    /// Free charge on each layer boundary; see [`charge_per_surface`].
    #[must_use]
    pub fn charge_per_surface(&self) -> Vec<Scalar> {
        charge_per_surface(
            &self.radii,
            &self.nominal_charges,
            &self.materials,
            &self.dielectric_constants,
        )
    }
}

/// Running state of the innermost-to-outermost sweep.
#[derive(Debug, Clone, Copy, Default)]
struct Redistribution {
    /// Sum of boundary charges placed so far.
    enclosed_charge: Scalar,
    /// Nominal charge of the conductors in the current run, excluding the last.
    acc_conductor_charge: Scalar,
    /// Charge placed on the inner boundary of the current conductor run.
    last_cancel_charge: Scalar,
    in_conductor_run: bool,
    /// Charge on the previous boundary.
    previous_surface_charge: Scalar,
}

impl Redistribution {
    fn step(&mut self, material: Material, next: Option<Material>, nominal: Scalar) -> Scalar {
        use Material::{Conductor, Dielectric};

        let boundary = match (material, next) {
            (Dielectric, Some(Conductor)) => {
                let cancel = -self.enclosed_charge;
                self.last_cancel_charge = cancel;
                cancel
            }
            (Conductor, Some(Conductor)) => {
                self.acc_conductor_charge += nominal;
                self.in_conductor_run = true;
                0.0
            }
            // The region outside the last layer behaves as a dielectric.
            (Conductor, Some(Dielectric) | None) => {
                if self.in_conductor_run {
                    let charge = nominal + self.acc_conductor_charge - self.last_cancel_charge;
                    self.acc_conductor_charge = 0.0;
                    self.in_conductor_run = false;
                    charge
                } else {
                    nominal - self.previous_surface_charge
                }
            }
            (Dielectric, Some(Dielectric) | None) => 0.0,
        };

        self.enclosed_charge += boundary;
        self.previous_surface_charge = boundary;
        boundary
    }
}

/// Computes the free charge residing on each layer boundary at equilibrium.
///
/// Layers are processed innermost first and the result depends on that order:
/// a dielectric followed by a conductor receives the charge cancelling
/// everything enclosed, a conductor (or run of conductors) followed by a
/// dielectric or by the outside carries its net nominal charge minus that
/// cancelling charge, and every other boundary is neutral.
///
/// `dielectric_constants` does not move free charge; it is accepted so the
/// call mirrors the field solver's layer description. Dielectric layers carry
/// no free charge, so their nominal charges are not placed anywhere. The
/// layer count is `radii.len()`; arrays are expected to match it (unchecked).
#[must_use]
pub fn charge_per_surface(
    radii: &[Scalar],
    nominal_charges: &[Scalar],
    materials: &[Material],
    _dielectric_constants: &[Scalar],
) -> Vec<Scalar> {
    let n = radii.len().min(materials.len());
    let mut state = Redistribution::default();
    (0..n)
        .map(|i| {
            let nominal = nominal_charges.get(i).copied().unwrap_or(0.0);
            let next = if i + 1 < n { Some(materials[i + 1]) } else { None };
            state.step(materials[i], next, nominal)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use Material::{Conductor, Dielectric};

    fn redistribute(materials: &[Material], nominal: &[Scalar]) -> Vec<Scalar> {
        let radii: Vec<Scalar> = (1..=materials.len()).map(|r| r as Scalar).collect();
        let kappa = vec![1.0; materials.len()];
        charge_per_surface(&radii, nominal, materials, &kappa)
    }

    #[test]
    fn conductor_core_in_dielectric_keeps_its_charge() {
        let q = redistribute(&[Conductor, Dielectric], &[5.0, 0.0]);
        assert_eq!(q, vec![5.0, 0.0]);
    }

    #[test]
    fn conductor_shell_cancels_enclosed_charge_on_inner_boundary() {
        // core conductor, gap, shell conductor
        let q = redistribute(&[Conductor, Dielectric, Conductor], &[3.0, 0.0, -1.0]);
        assert_eq!(q, vec![3.0, -3.0, 2.0]);
    }

    #[test]
    fn conductor_run_collapses_to_outer_boundary() {
        let q = redistribute(&[Dielectric, Conductor, Conductor, Dielectric], &[0.0, 2.0, 4.0, 0.0]);
        assert_eq!(q, vec![0.0, 0.0, 6.0, 0.0]);

        let q = redistribute(
            &[Conductor, Dielectric, Conductor, Conductor, Conductor],
            &[1.0, 0.0, 2.0, 3.0, 4.0],
        );
        assert_eq!(q, vec![1.0, -1.0, 0.0, 0.0, 10.0]);
        assert_relative_eq!(q.iter().sum::<Scalar>(), 10.0);
    }

    #[test]
    fn all_dielectric_stack_is_inert() {
        let q = redistribute(&[Dielectric; 4], &[0.0; 4]);
        assert_eq!(q, vec![0.0; 4]);
    }

    #[test]
    fn charge_is_conserved() {
        let materials = [Conductor, Dielectric, Dielectric, Conductor, Dielectric, Conductor];
        let nominal = [1.5, 0.0, 0.0, -4.0, 0.0, 2.25];
        let q = redistribute(&materials, &nominal);
        assert_relative_eq!(q.iter().sum::<Scalar>(), nominal.iter().sum::<Scalar>(), epsilon = 1.0e-12);
    }

    #[test]
    fn validate_reports_malformed_systems() {
        let ok = ShellSystem::new(vec![1.0, 2.0], vec![Conductor, Dielectric], vec![1.0, 2.0], vec![5.0, 0.0]);
        assert!(ok.validate().is_ok());

        let mismatch = ShellSystem::new(vec![1.0, 2.0], vec![Conductor], vec![1.0, 2.0], vec![5.0, 0.0]);
        assert_eq!(
            mismatch.validate(),
            Err(EmFieldError::LengthMismatch { field: "materials", expected: 2, actual: 1 })
        );

        let unordered = ShellSystem::new(vec![2.0, 2.0], vec![Conductor; 2], vec![1.0; 2], vec![0.0; 2]);
        assert!(matches!(unordered.validate(), Err(EmFieldError::NonIncreasingRadii { index: 1, .. })));

        assert_eq!(ShellSystem::default().validate(), Err(EmFieldError::EmptySystem));
    }

    #[test]
    fn from_layers_matches_parallel_arrays() {
        let system = ShellSystem::from_layers([
            ShellLayer { radius: 1.0, material: Conductor, dielectric_constant: 1.0, nominal_charge: 5.0 },
            ShellLayer { radius: 2.0, material: Dielectric, dielectric_constant: 2.0, nominal_charge: 0.0 },
        ]);
        assert_eq!(system.len(), 2);
        assert_eq!(system.charge_per_surface(), vec![5.0, 0.0]);
    }
}
