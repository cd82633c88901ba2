//! Flux of the aggregated fields through loops and closed Gaussian surfaces.

use std::f64::consts::PI;

use crate::aggregate::{field_at_with, magnetic_field_at_with};
use crate::config::FieldConfig;
use crate::math::{normalize_or_zero, plane_basis, Scalar, R3};
use crate::sources::FieldSource;
use crate::surfaces::GaussianSurface;

/// Flat disk bounded by a loop, integrated on a polar midpoint grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxDisk {
    /// Disk center.
    pub center: R3,
    /// Disk normal; flux is positive along it.
    pub normal: R3,
    /// Disk radius.
    pub radius: Scalar,
    /// Rings of the quadrature grid.
    pub radial_samples: usize,
    /// Sectors of the quadrature grid.
    pub angular_samples: usize,
}

impl FluxDisk {
    /// Creates a quadrature disk.
    #[must_use]
    pub const fn new(
        center: R3,
        normal: R3,
        radius: Scalar,
        radial_samples: usize,
        angular_samples: usize,
    ) -> Self {
        Self { center, normal, radius, radial_samples, angular_samples }
    }

    /// Integrates `field · n dA` over the disk.
    ///
    /// Empty grids, non-positive radii and zero normals give zero flux.
    pub fn integrate<F>(&self, field: F) -> Scalar
    where
        F: Fn(&R3) -> R3,
    {
        let normal = normalize_or_zero(&self.normal);
        if self.radius <= 0.0 || normal == R3::zeros() {
            return 0.0;
        }
        if self.radial_samples == 0 || self.angular_samples == 0 {
            return 0.0;
        }
        let (u, v) = plane_basis(&normal);
        let dr = self.radius / self.radial_samples as Scalar;
        let dtheta = 2.0 * PI / self.angular_samples as Scalar;
        let mut flux = 0.0;
        for i in 0..self.radial_samples {
            let r = (i as Scalar + 0.5) * dr;
            let area = r * dr * dtheta;
            for j in 0..self.angular_samples {
                let (s, c) = ((j as Scalar + 0.5) * dtheta).sin_cos();
                let point = self.center + (u * c + v * s) * r;
                flux += field(&point).dot(&normal) * area;
            }
        }
        flux
    }
}

/// Electric flux through the disk spanned by a loop, with scene constants.
#[must_use]
pub fn flux_through_loop(
    center: &R3,
    normal: &R3,
    radius: Scalar,
    radial_samples: usize,
    angular_samples: usize,
    sources: &[FieldSource],
) -> Scalar {
    let disk = FluxDisk::new(*center, *normal, radius, radial_samples, angular_samples);
    flux_through_loop_with(&FieldConfig::default(), &disk, sources)
}

/// Electric flux through `disk`.
#[must_use]
pub fn flux_through_loop_with(config: &FieldConfig, disk: &FluxDisk, sources: &[FieldSource]) -> Scalar {
    disk.integrate(|p| field_at_with(config, sources, p))
}

/// Magnetic flux through the disk spanned by a loop, with scene constants.
///
/// Its rate of change is the EMF induced around the loop.
#[must_use]
pub fn magnetic_flux_through_loop(
    center: &R3,
    normal: &R3,
    radius: Scalar,
    radial_samples: usize,
    angular_samples: usize,
    sources: &[FieldSource],
) -> Scalar {
    let disk = FluxDisk::new(*center, *normal, radius, radial_samples, angular_samples);
    magnetic_flux_through_loop_with(&FieldConfig::default(), &disk, sources)
}

/// Magnetic flux through `disk`.
#[must_use]
pub fn magnetic_flux_through_loop_with(
    config: &FieldConfig,
    disk: &FluxDisk,
    sources: &[FieldSource],
) -> Scalar {
    disk.integrate(|p| magnetic_field_at_with(config, sources, p))
}

/// Outward electric flux through a closed surface from `count` area-weighted
/// samples, with scene constants.
#[must_use]
pub fn flux_through_surface(surface: &GaussianSurface, sources: &[FieldSource], count: usize) -> Scalar {
    flux_through_surface_with(&FieldConfig::default(), surface, sources, count)
}

/// Outward electric flux through a closed surface.
///
/// By Gauss's law `flux · config.permittivity()` approximates the enclosed
/// charge when no charge sits on the surface itself.
#[must_use]
pub fn flux_through_surface_with(
    config: &FieldConfig,
    surface: &GaussianSurface,
    sources: &[FieldSource],
    count: usize,
) -> Scalar {
    surface
        .sample_surface_points(count, true)
        .iter()
        .filter_map(|s| {
            let normal = s.normal?;
            let weight = s.area_weight?;
            Some(field_at_with(config, sources, &s.position).dot(&normal) * weight)
        })
        .sum()
}
