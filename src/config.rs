//! Engine configuration: unit scaling and enclosure sampling resolution.

use crate::constants::{
    biot_savart_coefficient, coulomb_coefficient, PERMEABILITY_SCENE_SCALE,
    PERMITTIVITY_SCENE_SCALE, VACUUM_PERMEABILITY, VACUUM_PERMITTIVITY,
};
use crate::errors::EmFieldError;
use crate::math::Scalar;

/// Unit system used when converting source strengths into field magnitudes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Multiplier applied to ε₀.
    pub permittivity_scale: Scalar,
    /// Multiplier applied to μ₀.
    pub permeability_scale: Scalar,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::scene()
    }
}

impl FieldConfig {
    /// Scene units: ε₀ and μ₀ scaled so typical magnitudes stay renderable.
    #[must_use]
    pub const fn scene() -> Self {
        Self {
            permittivity_scale: PERMITTIVITY_SCENE_SCALE,
            permeability_scale: PERMEABILITY_SCENE_SCALE,
        }
    }

    /// Unscaled SI units.
    #[must_use]
    pub const fn si() -> Self {
        Self {
            permittivity_scale: 1.0,
            permeability_scale: 1.0,
        }
    }

    /// Effective vacuum permittivity ε in F/m.
    #[must_use]
    pub fn permittivity(&self) -> Scalar {
        VACUUM_PERMITTIVITY * self.permittivity_scale
    }

    /// Effective vacuum permeability μ in H/m.
    #[must_use]
    pub fn permeability(&self) -> Scalar {
        VACUUM_PERMEABILITY * self.permeability_scale
    }

    /// Coulomb constant `k = 1 / (4π ε)`.
    #[must_use]
    pub fn coulomb_constant(&self) -> Scalar {
        coulomb_coefficient(self.permittivity())
    }

    /// Biot–Savart prefactor `μ / 4π`.
    #[must_use]
    pub fn biot_savart_constant(&self) -> Scalar {
        biot_savart_coefficient(self.permeability())
    }

    /// Checks that both scale factors are finite and positive.
    pub fn validate(&self) -> Result<(), EmFieldError> {
        for (name, value) in [
            ("permittivity_scale", self.permittivity_scale),
            ("permeability_scale", self.permeability_scale),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EmFieldError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Sampling parameters for enclosed-charge estimation.
///
/// Resolutions count samples per linear dimension of the source: a finite
/// plane is sampled on a `resolution × resolution` grid, a wire at
/// `resolution` points along its length.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnclosureConfig {
    /// Resolution of the first, cheap pass.
    pub coarse_resolution: usize,
    /// Resolution of the retry pass used when the coarse pass finds nothing
    /// but the geometry overlaps.
    pub fine_resolution: usize,
    /// Containment tolerance passed to `contains_point`.
    pub epsilon: Scalar,
}

impl Default for EnclosureConfig {
    fn default() -> Self {
        Self {
            coarse_resolution: 24,
            fine_resolution: 240,
            epsilon: 1.0e-6,
        }
    }
}

impl EnclosureConfig {
    /// Creates a configuration with explicit resolutions and the default epsilon.
    #[must_use]
    pub fn new(coarse_resolution: usize, fine_resolution: usize) -> Self {
        Self {
            coarse_resolution,
            fine_resolution,
            ..Self::default()
        }
    }

    /// Checks that resolutions are non-zero and ordered, and epsilon is non-negative.
    pub fn validate(&self) -> Result<(), EmFieldError> {
        if self.coarse_resolution == 0 {
            return Err(EmFieldError::InvalidConfig(
                "coarse_resolution must be at least 1".into(),
            ));
        }
        if self.fine_resolution < self.coarse_resolution {
            return Err(EmFieldError::InvalidConfig(format!(
                "fine_resolution ({}) must not be below coarse_resolution ({})",
                self.fine_resolution, self.coarse_resolution
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(EmFieldError::InvalidConfig(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}
