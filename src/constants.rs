//! Physical constants and the scene scaling multipliers.
//!
//! ## Accuracy
//!
//! Measured constants (ε₀, μ₀) are provided with 11-12 significant figures,
//! suitable for engineering applications. Values follow CODATA 2018
//! (NIST Reference on Constants, Units, and Uncertainty:
//! <https://physics.nist.gov/cuu/Constants/>).
//!
//! ## Scene units
//!
//! Interactive scenes place charges of order one coulomb a few units apart. In
//! pure SI units the resulting fields are of order 10⁹ V/m, which cannot be
//! drawn next to the weak field of a lightly charged plane. The engine therefore
//! multiplies ε₀ and μ₀ by fixed scale factors so that typical magnitudes land
//! near unity. [`FieldConfig::si`](crate::config::FieldConfig::si) turns the
//! scaling off.

use std::f64::consts::PI;

use crate::math::Scalar;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m (11 significant figures).
pub const VACUUM_PERMITTIVITY: Scalar = 8.854_187_812_8e-12;
/// Vacuum permeability μ₀ in henries per meter (H/m).
/// Approximate value: 1.25663706212 × 10⁻⁶ H/m (12 significant figures).
pub const VACUUM_PERMEABILITY: Scalar = 1.256_637_062_12e-6;

/// Multiplier applied to ε₀ in scene units.
///
/// With this value the Coulomb constant becomes ≈ 0.899 instead of ≈ 8.99 × 10⁹.
pub const PERMITTIVITY_SCENE_SCALE: Scalar = 1.0e10;
/// Multiplier applied to μ₀ in scene units.
///
/// With this value μ/4π becomes ≈ 0.1 instead of 10⁻⁷.
pub const PERMEABILITY_SCENE_SCALE: Scalar = 1.0e6;

/// Squared separation below which a source is treated as coincident with the
/// query point and contributes nothing.
pub const SINGULARITY_DISTANCE_SQ: Scalar = 1.0e-6;
/// Distance below which a query point is considered to lie on a charged
/// plane or shell boundary.
pub const BOUNDARY_EPSILON: Scalar = 1.0e-9;

/// Coulomb coefficient `1 / (4π ε)` for an absolute permittivity `permittivity`.
#[inline]
#[must_use]
pub fn coulomb_coefficient(permittivity: Scalar) -> Scalar {
    1.0 / (4.0 * PI * permittivity)
}

/// Biot–Savart coefficient `μ / 4π` for an absolute permeability `permeability`.
#[inline]
#[must_use]
pub fn biot_savart_coefficient(permeability: Scalar) -> Scalar {
    permeability / (4.0 * PI)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn si_coulomb_constant_matches_reference() {
        let k = coulomb_coefficient(VACUUM_PERMITTIVITY);
        assert_relative_eq!(k, 8.987_551_79e9, max_relative = 1.0e-8);
    }

    #[test]
    fn scene_scaling_brings_coefficients_near_unity() {
        let k = coulomb_coefficient(VACUUM_PERMITTIVITY * PERMITTIVITY_SCENE_SCALE);
        let m = biot_savart_coefficient(VACUUM_PERMEABILITY * PERMEABILITY_SCENE_SCALE);
        assert_relative_eq!(k, 0.898_755_179, max_relative = 1.0e-8);
        assert_relative_eq!(m, 0.1, max_relative = 1.0e-8);
    }
}
