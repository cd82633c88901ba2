//! Gaussian surfaces: closed query volumes used for enclosure and flux estimates.
//!
//! Shapes are described in their own local frame, centered on the origin and
//! unrotated; the cylinder axis is local +Y and a cuboid's width, height and
//! depth run along local X, Y and Z. [`GaussianSurface`] attaches a world pose.

mod sampling;

use std::f64::consts::PI;

use crate::math::{Scalar, R3};
use crate::transform::SurfaceTransform;

pub use sampling::allocate_samples;
pub(crate) use sampling::{fibonacci_sphere, Region};

/// Surface point, optionally carrying what numerical flux integration needs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Position of the sample.
    pub position: R3,
    /// Outward unit normal, when requested.
    pub normal: Option<R3>,
    /// Area represented by the sample (`region area / samples in region`), when requested.
    pub area_weight: Option<Scalar>,
}

impl SamplePoint {
    /// Position-only sample.
    #[must_use]
    pub const fn at(position: R3) -> Self {
        Self { position, normal: None, area_weight: None }
    }

    /// Sample with outward normal and area weight.
    #[must_use]
    pub const fn with_normal(position: R3, normal: R3, area_weight: Scalar) -> Self {
        Self { position, normal: Some(normal), area_weight: Some(area_weight) }
    }
}

/// Outward normal anchored on the surface, for display.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceNormal {
    /// Anchor point on the surface.
    pub origin: R3,
    /// Outward unit direction.
    pub direction: R3,
}

/// Shape of a Gaussian surface in its local frame.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceShape {
    /// Sphere centered on the origin.
    Sphere {
        /// Sphere radius.
        radius: Scalar,
    },
    /// Closed cylinder along local Y, centered on the origin.
    Cylinder {
        /// Cylinder radius.
        radius: Scalar,
        /// Full height along Y.
        height: Scalar,
    },
    /// Box centered on the origin.
    Cuboid {
        /// Extent along X.
        width: Scalar,
        /// Extent along Y.
        height: Scalar,
        /// Extent along Z.
        depth: Scalar,
    },
}

impl SurfaceShape {
    /// True when any extent is zero or negative.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Self::Sphere { radius } => !(radius > 0.0),
            Self::Cylinder { radius, height } => !(radius > 0.0 && height > 0.0),
            Self::Cuboid { width, height, depth } => !(width > 0.0 && height > 0.0 && depth > 0.0),
        }
    }

    /// Half extents of the local axis-aligned bounding box.
    #[must_use]
    pub fn half_extents(&self) -> R3 {
        let h = match *self {
            Self::Sphere { radius } => R3::repeat(radius),
            Self::Cylinder { radius, height } => R3::new(radius, height * 0.5, radius),
            Self::Cuboid { width, height, depth } => R3::new(width, height, depth) * 0.5,
        };
        h.map(|c| c.max(0.0))
    }

    /// Radius of the smallest origin-centered sphere enclosing the shape.
    #[must_use]
    pub fn bounding_radius(&self) -> Scalar {
        match *self {
            Self::Sphere { radius } => radius.max(0.0),
            Self::Cylinder { .. } | Self::Cuboid { .. } => self.half_extents().norm(),
        }
    }

    /// Half-width of the shape's projection onto the local unit direction `dir`.
    #[must_use]
    pub fn projected_half_extent(&self, dir: &R3) -> Scalar {
        let h = self.half_extents();
        match *self {
            Self::Sphere { .. } => h.x,
            Self::Cylinder { .. } => {
                let axial = dir.y.abs().min(1.0);
                h.x * (1.0 - axial * axial).sqrt() + h.y * axial
            }
            Self::Cuboid { .. } => h.x * dir.x.abs() + h.y * dir.y.abs() + h.z * dir.z.abs(),
        }
    }

    /// Total surface area.
    #[must_use]
    pub fn area(&self) -> Scalar {
        self.regions().iter().map(Region::area).sum()
    }

    /// Inclusive containment test for a point in the local frame.
    ///
    /// Degenerate shapes contain nothing.
    #[must_use]
    pub fn contains_point(&self, local: &R3, epsilon: Scalar) -> bool {
        if self.is_degenerate() {
            return false;
        }
        match *self {
            Self::Sphere { radius } => local.norm() <= radius + epsilon,
            Self::Cylinder { radius, height } => {
                local.x.hypot(local.z) <= radius + epsilon && local.y.abs() <= height * 0.5 + epsilon
            }
            Self::Cuboid { .. } => {
                let h = self.half_extents();
                local.x.abs() <= h.x + epsilon
                    && local.y.abs() <= h.y + epsilon
                    && local.z.abs() <= h.z + epsilon
            }
        }
    }

    /// Small fixed set of outward normals in the local frame.
    #[must_use]
    pub fn representative_normals(&self) -> Vec<SurfaceNormal> {
        if self.is_degenerate() {
            return Vec::new();
        }
        let axes = [R3::x(), -R3::x(), R3::y(), -R3::y(), R3::z(), -R3::z()];
        let h = self.half_extents();
        axes.iter()
            .map(|&direction| SurfaceNormal {
                origin: direction.component_mul(&h),
                direction,
            })
            .collect()
    }

    /// Regions sampled in proportion to their areas: the sphere itself, the
    /// cylinder side and caps, or the six cuboid faces.
    pub(crate) fn regions(&self) -> Vec<Region> {
        if self.is_degenerate() {
            return Vec::new();
        }
        match *self {
            Self::Sphere { radius } => vec![Region::Sphere { radius }],
            Self::Cylinder { radius, height } => {
                let cap = |sign: Scalar| Region::Disk {
                    center: R3::new(0.0, sign * height * 0.5, 0.0),
                    u: R3::z(),
                    v: R3::x(),
                    radius,
                    normal: R3::y() * sign,
                };
                vec![Region::Lateral { radius, height }, cap(1.0), cap(-1.0)]
            }
            Self::Cuboid { .. } => {
                let h = self.half_extents();
                let face = |normal: R3, u: R3, v: R3| Region::Rect {
                    center: normal.component_mul(&h),
                    u_half: u.component_mul(&h),
                    v_half: v.component_mul(&h),
                    normal,
                };
                vec![
                    face(R3::x(), R3::y(), R3::z()),
                    face(-R3::x(), R3::z(), R3::y()),
                    face(R3::y(), R3::z(), R3::x()),
                    face(-R3::y(), R3::x(), R3::z()),
                    face(R3::z(), R3::x(), R3::y()),
                    face(-R3::z(), R3::y(), R3::x()),
                ]
            }
        }
    }

    /// Exactly `count` samples in the local frame, spread over the regions in
    /// proportion to their areas. Degenerate shapes produce no samples.
    #[must_use]
    pub fn sample_surface_points(&self, count: usize, include_normals: bool) -> Vec<SamplePoint> {
        let regions = self.regions();
        if regions.is_empty() {
            tracing::trace!(shape = ?self, "degenerate Gaussian surface, no samples");
            return Vec::new();
        }
        let areas: Vec<Scalar> = regions.iter().map(Region::area).collect();
        let counts = allocate_samples(count, &areas);
        let mut samples = Vec::with_capacity(count);
        for (region, n) in regions.iter().zip(counts) {
            region.sample(n, include_normals, &mut samples);
        }
        samples
    }
}

/// Gaussian surface placed in the world.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianSurface {
    /// Local shape.
    pub shape: SurfaceShape,
    /// World pose of the local frame.
    pub transform: SurfaceTransform,
}

impl GaussianSurface {
    /// Creates a surface from a shape and a pose.
    #[must_use]
    pub const fn new(shape: SurfaceShape, transform: SurfaceTransform) -> Self {
        Self { shape, transform }
    }

    /// Unrotated sphere centered on `position`.
    #[must_use]
    pub fn sphere(position: R3, radius: Scalar) -> Self {
        Self::new(SurfaceShape::Sphere { radius }, SurfaceTransform::at(position))
    }

    /// Unrotated Y-aligned cylinder centered on `position`.
    #[must_use]
    pub fn cylinder(position: R3, radius: Scalar, height: Scalar) -> Self {
        Self::new(SurfaceShape::Cylinder { radius, height }, SurfaceTransform::at(position))
    }

    /// Unrotated box centered on `position`.
    #[must_use]
    pub fn cuboid(position: R3, width: Scalar, height: Scalar, depth: Scalar) -> Self {
        Self::new(SurfaceShape::Cuboid { width, height, depth }, SurfaceTransform::at(position))
    }

    /// Inclusive containment test for a point already in the local frame.
    #[must_use]
    pub fn contains_point(&self, local: &R3, epsilon: Scalar) -> bool {
        self.shape.contains_point(local, epsilon)
    }

    /// Inclusive containment test for a world-space point.
    #[must_use]
    pub fn contains_world_point(&self, world: &R3, epsilon: Scalar) -> bool {
        self.shape.contains_point(&self.transform.to_local_point(world), epsilon)
    }

    /// Representative outward normals in world space.
    #[must_use]
    pub fn representative_normals(&self) -> Vec<SurfaceNormal> {
        self.shape
            .representative_normals()
            .into_iter()
            .map(|n| SurfaceNormal {
                origin: self.transform.to_world_point(&n.origin),
                direction: self.transform.to_world_vector(&n.direction),
            })
            .collect()
    }

    /// Exactly `count` world-space samples spread over the surface by area.
    #[must_use]
    pub fn sample_surface_points(&self, count: usize, include_normals: bool) -> Vec<SamplePoint> {
        self.shape
            .sample_surface_points(count, include_normals)
            .into_iter()
            .map(|s| SamplePoint {
                position: self.transform.to_world_point(&s.position),
                normal: s.normal.map(|n| self.transform.to_world_vector(&n)),
                area_weight: s.area_weight,
            })
            .collect()
    }

    /// Volume enclosed by the surface.
    #[must_use]
    pub fn volume(&self) -> Scalar {
        if self.shape.is_degenerate() {
            return 0.0;
        }
        match self.shape {
            SurfaceShape::Sphere { radius } => 4.0 / 3.0 * PI * radius.powi(3),
            SurfaceShape::Cylinder { radius, height } => PI * radius * radius * height,
            SurfaceShape::Cuboid { width, height, depth } => width * height * depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Rotation;

    #[test]
    fn sphere_containment_is_boundary_inclusive() {
        let sphere = SurfaceShape::Sphere { radius: 2.0 };
        assert!(sphere.contains_point(&R3::new(2.0, 0.0, 0.0), 0.0));
        assert!(!sphere.contains_point(&R3::new(2.01, 0.0, 0.0), 0.0));
        assert!(sphere.contains_point(&R3::new(2.01, 0.0, 0.0), 0.02));
    }

    #[test]
    fn cylinder_and_cuboid_containment() {
        let cyl = SurfaceShape::Cylinder { radius: 1.0, height: 4.0 };
        assert!(cyl.contains_point(&R3::new(0.6, 2.0, 0.8), 0.0));
        assert!(!cyl.contains_point(&R3::new(0.6, 2.1, 0.8), 0.0));
        assert!(!cyl.contains_point(&R3::new(0.8, 0.0, 0.8), 0.0));

        let cube = SurfaceShape::Cuboid { width: 2.0, height: 4.0, depth: 6.0 };
        assert!(cube.contains_point(&R3::new(1.0, -2.0, 3.0), 0.0));
        assert!(!cube.contains_point(&R3::new(1.0, -2.0, 3.1), 0.0));
    }

    #[test]
    fn sampling_returns_exact_counts_and_area() {
        let shapes = [
            SurfaceShape::Sphere { radius: 1.5 },
            SurfaceShape::Cylinder { radius: 0.5, height: 3.0 },
            SurfaceShape::Cuboid { width: 1.0, height: 2.0, depth: 0.25 },
        ];
        for shape in shapes {
            for count in [1, 5, 6, 7, 64, 1000] {
                let samples = shape.sample_surface_points(count, true);
                assert_eq!(samples.len(), count, "{shape:?} with {count} samples");
                let area: Scalar = samples.iter().filter_map(|s| s.area_weight).sum();
                assert_relative_eq!(area, shape.area(), max_relative = 1.0e-12);
                assert!(samples.iter().all(|s| shape.contains_point(&s.position, 1.0e-9)));
            }
        }
    }

    #[test]
    fn degenerate_shapes_produce_no_samples() {
        assert!(SurfaceShape::Sphere { radius: 0.0 }.sample_surface_points(10, true).is_empty());
        assert!(SurfaceShape::Cuboid { width: 1.0, height: -1.0, depth: 1.0 }
            .sample_surface_points(10, false)
            .is_empty());
        assert!(SurfaceShape::Cylinder { radius: 1.0, height: 0.0 }.representative_normals().is_empty());
    }

    #[test]
    fn normals_point_outward() {
        let shape = SurfaceShape::Cylinder { radius: 1.0, height: 2.0 };
        for s in shape.sample_surface_points(200, true) {
            let n = s.normal.expect("normals requested");
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1.0e-12);
            assert!(!shape.contains_point(&(s.position + n * 1.0e-3), 0.0));
        }
    }

    #[test]
    fn world_samples_follow_the_pose() {
        let surface = GaussianSurface::new(
            SurfaceShape::Cuboid { width: 2.0, height: 1.0, depth: 1.0 },
            SurfaceTransform::new(R3::new(5.0, 0.0, 0.0), Rotation::from_axis_angle(&R3::z_axis(), FRAC_PI_4)),
        );
        for s in surface.sample_surface_points(60, false) {
            assert!(surface.contains_world_point(&s.position, 1.0e-9));
            assert!(s.normal.is_none() && s.area_weight.is_none());
        }
        let normals = surface.representative_normals();
        assert_eq!(normals.len(), 6);
        let diag = R3::new(1.0, 1.0, 0.0).normalize();
        assert_relative_eq!(normals[0].direction, diag, epsilon = 1.0e-12);
        assert_relative_eq!(normals[0].origin, R3::new(5.0, 0.0, 0.0) + diag, epsilon = 1.0e-12);
    }
}
