//! Intersection tests between sources and Gaussian surfaces, and numerical
//! estimates of the charge a surface encloses.
//!
//! Extended sources are sampled (area for planes and sphere shells, length for
//! wires, volume for solid spheres) and each sample is weighted by the charge
//! it stands for. A coarse pass runs first; when it finds no enclosed sample
//! but the geometry overlaps, the thin overlap may have slipped between
//! samples, so a much finer pass is tried before giving up with
//! `can_estimate = false`. The retry is a heuristic without a formal error
//! bound.

use std::f64::consts::PI;

use tracing::debug;

use crate::config::EnclosureConfig;
use crate::math::{closest_point_on_segment, normalize_or_zero, plane_basis, Scalar, R3};
use crate::shells::ShellSystem;
use crate::sources::{
    ChargedPlane, ChargedSphere, ChargedWire, ConcentricShells, FieldSource, FiniteWire,
    ShellGeometry,
};
use crate::surfaces::{fibonacci_sphere, GaussianSurface, SurfaceShape};

/// Half-length used when an infinite wire must be represented by a segment.
const INFINITE_WIRE_HALF_LENGTH: Scalar = 1.0e6;

/// Result of an enclosed-charge estimate.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnclosureEstimate {
    /// False when the overlap could not be resolved even at the fine
    /// resolution; `enclosed_charge` must then not be trusted.
    pub can_estimate: bool,
    /// Estimated charge inside the surface.
    pub enclosed_charge: Scalar,
}

impl EnclosureEstimate {
    /// A trusted estimate.
    #[must_use]
    pub const fn resolved(enclosed_charge: Scalar) -> Self {
        Self { can_estimate: true, enclosed_charge }
    }

    /// An overlap too thin for the sampling resolution.
    #[must_use]
    pub const fn unresolved() -> Self {
        Self { can_estimate: false, enclosed_charge: 0.0 }
    }
}

/// Outcome of one sampling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Coverage {
    /// Samples taken.
    sampled: usize,
    /// Samples found inside the surface.
    inside: usize,
    /// Charge represented by the inside samples.
    charge: Scalar,
}

impl Coverage {
    fn merge(self, other: Self) -> Self {
        Self {
            sampled: self.sampled + other.sampled,
            inside: self.inside + other.inside,
            charge: self.charge + other.charge,
        }
    }
}

/// Tests whether a plane crosses the volume of `surface`.
///
/// The plane's distance from the surface center is compared with the
/// surface's half-extent along the plane normal; a finite plane must also
/// overlap the surface's projection along its own width and height axes.
#[must_use]
pub fn plane_intersects(surface: &GaussianSurface, plane: &ChargedPlane) -> bool {
    if surface.shape.is_degenerate() {
        return false;
    }
    let t = &surface.transform;
    let normal = normalize_or_zero(&t.to_local_vector(&plane.normal()));
    if normal == R3::zeros() {
        return false;
    }
    let center = t.to_local_point(&plane.position());
    if normal.dot(&center).abs() > surface.shape.projected_half_extent(&normal) {
        return false;
    }
    match plane {
        ChargedPlane::Infinite(_) => true,
        ChargedPlane::Finite(p) => {
            if p.width <= 0.0 || p.height <= 0.0 {
                return false;
            }
            let (u, v, _) = p.frame();
            [(u, p.width), (v, p.height)].iter().all(|(axis, size)| {
                let axis = t.to_local_vector(axis);
                center.dot(&axis).abs() <= size * 0.5 + surface.shape.projected_half_extent(&axis)
            })
        }
    }
}

/// Axis segment of a wire; infinite wires become a very long segment.
fn wire_segment(wire: &ChargedWire) -> Option<(R3, R3)> {
    let axis = normalize_or_zero(&wire.axis());
    if axis == R3::zeros() {
        return None;
    }
    match wire {
        ChargedWire::Finite(w) if w.length > 0.0 => Some(w.endpoints()),
        ChargedWire::Finite(_) => None,
        ChargedWire::Infinite(w) => {
            let half = axis * INFINITE_WIRE_HALF_LENGTH;
            Some((w.position - half, w.position + half))
        }
    }
}

/// Tests whether a wire passes through the surface's bounding box inflated by
/// the wire radius.
///
/// Both endpoints and the midpoint are tested for containment first; failing
/// that, the wire's closest approach to the surface center is compared with
/// the smallest half-extent.
#[must_use]
pub fn wire_intersects(surface: &GaussianSurface, wire: &ChargedWire) -> bool {
    if surface.shape.is_degenerate() {
        return false;
    }
    let Some((start, end)) = wire_segment(wire) else {
        return false;
    };
    let t = &surface.transform;
    let a = t.to_local_point(&start);
    let b = t.to_local_point(&end);
    let half = surface.shape.half_extents().add_scalar(wire.radius().max(0.0));
    let in_box = |p: &R3| p.x.abs() <= half.x && p.y.abs() <= half.y && p.z.abs() <= half.z;
    if in_box(&a) || in_box(&b) || in_box(&((a + b) * 0.5)) {
        return true;
    }
    closest_point_on_segment(&R3::zeros(), &a, &b).norm() <= half.min()
}

/// Tests whether the volume of a sphere at `center` overlaps the surface.
fn sphere_overlaps(surface: &GaussianSurface, center: &R3, radius: Scalar) -> bool {
    if surface.shape.is_degenerate() || radius < 0.0 {
        return false;
    }
    let c = surface.transform.to_local_point(center);
    match surface.shape {
        SurfaceShape::Sphere { radius: r } => c.norm() <= r + radius,
        SurfaceShape::Cuboid { .. } => {
            let h = surface.shape.half_extents();
            let closest = R3::new(c.x.clamp(-h.x, h.x), c.y.clamp(-h.y, h.y), c.z.clamp(-h.z, h.z));
            (c - closest).norm() <= radius
        }
        SurfaceShape::Cylinder { radius: r, height } => {
            let radial = (c.x.hypot(c.z) - r).max(0.0);
            let axial = (c.y.abs() - height * 0.5).max(0.0);
            radial.hypot(axial) <= radius
        }
    }
}

/// Distance from `center` to the farthest point of the surface volume.
fn farthest_distance(surface: &GaussianSurface, center: &R3) -> Scalar {
    let c = surface.transform.to_local_point(center);
    let h = surface.shape.half_extents();
    match surface.shape {
        SurfaceShape::Sphere { radius } => c.norm() + radius,
        SurfaceShape::Cuboid { .. } => (c.abs() + h).norm(),
        SurfaceShape::Cylinder { radius, height } => {
            (c.x.hypot(c.z) + radius).hypot(c.y.abs() + height * 0.5)
        }
    }
}

/// Tests whether a spherical sheet of charge crosses the surface volume, as
/// opposed to the volume sitting wholly inside the sheet's cavity.
fn spherical_sheet_crosses(surface: &GaussianSurface, center: &R3, radius: Scalar) -> bool {
    sphere_overlaps(surface, center, radius) && farthest_distance(surface, center) >= radius
}

/// Tests whether a cylindrical sheet of charge may cross the surface volume.
/// Conservative: the surface is bounded by its bounding sphere.
fn cylindrical_sheet_crosses(surface: &GaussianSurface, shells: &ConcentricShells, radius: Scalar) -> bool {
    let axis = normalize_or_zero(&shells.axis);
    let rel = surface.transform.position - shells.position;
    let from_axis = (rel - axis * rel.dot(&axis)).norm();
    wire_intersects(surface, &bounding_cylinder(shells, radius))
        && from_axis + surface.shape.bounding_radius() >= radius
}

/// Exact overlap test between a charged sphere's volume and the surface.
#[must_use]
pub fn charged_sphere_intersects(surface: &GaussianSurface, sphere: &ChargedSphere) -> bool {
    sphere.radius > 0.0 && sphere_overlaps(surface, &sphere.position, sphere.radius)
}

/// Tests whether any part of `source` lies within or crosses `surface`.
///
/// Shell stacks reduce to their outermost radius; sampled current paths count
/// as intersecting when any sample lies inside.
#[must_use]
pub fn object_intersects_surface(surface: &GaussianSurface, source: &FieldSource) -> bool {
    match source {
        FieldSource::PointCharge(q) => surface.contains_world_point(&q.position, 0.0),
        FieldSource::FiniteWire(w) => wire_intersects(surface, &ChargedWire::Finite(*w)),
        FieldSource::InfiniteWire(w) => wire_intersects(surface, &ChargedWire::Infinite(*w)),
        FieldSource::FinitePlane(p) => plane_intersects(surface, &ChargedPlane::Finite(*p)),
        FieldSource::InfinitePlane(p) => plane_intersects(surface, &ChargedPlane::Infinite(*p)),
        FieldSource::ChargedSphere(s) => charged_sphere_intersects(surface, s),
        FieldSource::ConcentricShells(shells) => shells_intersect(surface, shells),
        FieldSource::StackedPlanes(stack) => stack.layers().any(|p| plane_intersects(surface, &p)),
        FieldSource::CurrentLoop(lp) => lp
            .positions
            .iter()
            .any(|p| surface.contains_world_point(p, 0.0)),
    }
}

fn shells_intersect(surface: &GaussianSurface, shells: &ConcentricShells) -> bool {
    let outer = shells.outer_radius();
    if outer <= 0.0 {
        return false;
    }
    match shells.geometry {
        ShellGeometry::Spherical => sphere_overlaps(surface, &shells.position, outer),
        ShellGeometry::Cylindrical => wire_intersects(surface, &bounding_cylinder(shells, outer)),
    }
}

/// Finite wire standing in for the outer cylinder of a cylindrical stack.
fn bounding_cylinder(shells: &ConcentricShells, radius: Scalar) -> ChargedWire {
    ChargedWire::Finite(FiniteWire::new(
        shells.position,
        shells.axis,
        2.0 * INFINITE_WIRE_HALF_LENGTH,
        radius,
        0.0,
    ))
}

/// Estimates the charge enclosed by `surface` with the default sampling configuration.
#[must_use]
pub fn estimate_enclosed_charge(surface: &GaussianSurface, source: &FieldSource) -> EnclosureEstimate {
    estimate_enclosed_charge_with(surface, source, &EnclosureConfig::default())
}

/// Estimates the charge enclosed by `surface` using explicit sampling resolutions.
#[must_use]
pub fn estimate_enclosed_charge_with(
    surface: &GaussianSurface,
    source: &FieldSource,
    config: &EnclosureConfig,
) -> EnclosureEstimate {
    let eps = config.epsilon;
    match source {
        FieldSource::PointCharge(q) => {
            let inside = surface.contains_world_point(&q.position, eps);
            EnclosureEstimate::resolved(if inside { q.charge } else { 0.0 })
        }
        FieldSource::CurrentLoop(_) => EnclosureEstimate::resolved(0.0),
        FieldSource::FinitePlane(p) => {
            let plane = ChargedPlane::Finite(*p);
            two_tier(config, || plane_intersects(surface, &plane), |n| plane_coverage(surface, &plane, n, eps))
        }
        FieldSource::InfinitePlane(p) => {
            let plane = ChargedPlane::Infinite(*p);
            two_tier(config, || plane_intersects(surface, &plane), |n| plane_coverage(surface, &plane, n, eps))
        }
        FieldSource::StackedPlanes(stack) => two_tier(
            config,
            || stack.layers().any(|p| plane_intersects(surface, &p)),
            |n| {
                stack
                    .layers()
                    .map(|p| plane_coverage(surface, &p, n, eps))
                    .fold(Coverage::default(), Coverage::merge)
            },
        ),
        FieldSource::FiniteWire(w) => {
            let wire = ChargedWire::Finite(*w);
            two_tier(config, || wire_intersects(surface, &wire), |n| wire_coverage(surface, &wire, n, eps))
        }
        FieldSource::InfiniteWire(w) => {
            let wire = ChargedWire::Infinite(*w);
            two_tier(config, || wire_intersects(surface, &wire), |n| wire_coverage(surface, &wire, n, eps))
        }
        FieldSource::ChargedSphere(s) => two_tier(
            config,
            || {
                if s.hollow {
                    s.radius > 0.0 && spherical_sheet_crosses(surface, &s.position, s.radius)
                } else {
                    charged_sphere_intersects(surface, s)
                }
            },
            |n| sphere_coverage(surface, s, n, eps),
        ),
        FieldSource::ConcentricShells(shells) => {
            let charges = shells.system.charge_per_surface();
            let charged: Vec<Scalar> = shells
                .system
                .radii
                .iter()
                .zip(&charges)
                .filter(|(r, q)| **r > 0.0 && **q != 0.0)
                .map(|(r, _)| *r)
                .collect();
            two_tier(
                config,
                || {
                    charged.iter().any(|&r| match shells.geometry {
                        ShellGeometry::Spherical => spherical_sheet_crosses(surface, &shells.position, r),
                        ShellGeometry::Cylindrical => cylindrical_sheet_crosses(surface, shells, r),
                    })
                },
                |n| shells_coverage(surface, shells, &charges, n, eps),
            )
        }
    }
}

/// Coarse pass, then a fine pass when the coarse one saw nothing but the
/// geometry overlaps.
fn two_tier(
    config: &EnclosureConfig,
    overlaps: impl FnOnce() -> bool,
    sample: impl Fn(usize) -> Coverage,
) -> EnclosureEstimate {
    let coarse = sample(config.coarse_resolution.max(1));
    if coarse.sampled == 0 {
        return EnclosureEstimate::resolved(0.0);
    }
    if coarse.inside > 0 {
        return EnclosureEstimate::resolved(coarse.charge);
    }
    if !overlaps() {
        return EnclosureEstimate::resolved(0.0);
    }
    debug!(
        coarse = config.coarse_resolution,
        fine = config.fine_resolution,
        "coarse enclosure pass missed an overlapping source, resampling"
    );
    let fine = sample(config.fine_resolution.max(1));
    if fine.inside > 0 {
        EnclosureEstimate::resolved(fine.charge)
    } else {
        debug!(resolution = config.fine_resolution, "overlap thinner than the fine sampling grid");
        EnclosureEstimate::unresolved()
    }
}

/// Samples an `n × n` grid on the part of a plane that can meet the surface.
///
/// Finite planes are sampled over their rectangle. Infinite planes are sampled
/// over the square patch, centered on the foot of the surface center, that
/// covers the surface's bounding sphere.
fn plane_coverage(surface: &GaussianSurface, plane: &ChargedPlane, n: usize, eps: Scalar) -> Coverage {
    let normal = normalize_or_zero(&plane.normal());
    if normal == R3::zeros() {
        return Coverage::default();
    }
    let (center, u, v, width, height) = match plane {
        ChargedPlane::Finite(p) => {
            let (u, v, _) = p.frame();
            (p.position, u, v, p.width, p.height)
        }
        ChargedPlane::Infinite(p) => {
            let c = surface.transform.position;
            let foot = c - normal * (c - p.position).dot(&normal);
            let (u, v) = plane_basis(&normal);
            let side = 2.0 * surface.shape.bounding_radius();
            (foot, u, v, side, side)
        }
    };
    if width <= 0.0 || height <= 0.0 {
        return Coverage::default();
    }
    let inside = grid_points(n)
        .filter(|&(s, t)| {
            let p = center + u * (s * width * 0.5) + v * (t * height * 0.5);
            surface.contains_world_point(&p, eps)
        })
        .count();
    let total = n * n;
    Coverage {
        sampled: total,
        inside,
        charge: plane.surface_density() * width * height * inside as Scalar / total as Scalar,
    }
}

/// Cell centers of an `n × n` grid over `[-1, 1]²`.
fn grid_points(n: usize) -> impl Iterator<Item = (Scalar, Scalar)> {
    let cell = move |i: usize| (i as Scalar + 0.5) / n as Scalar * 2.0 - 1.0;
    (0..n).flat_map(move |i| (0..n).map(move |j| (cell(i), cell(j))))
}

/// Samples `n` points along the part of a wire that can meet the surface.
fn wire_coverage(surface: &GaussianSurface, wire: &ChargedWire, n: usize, eps: Scalar) -> Coverage {
    let axis = normalize_or_zero(&wire.axis());
    if axis == R3::zeros() {
        return Coverage::default();
    }
    let (start, end) = match wire {
        ChargedWire::Finite(w) => w.endpoints(),
        ChargedWire::Infinite(w) => {
            let c = surface.transform.position;
            let foot = w.position + axis * (c - w.position).dot(&axis);
            let half = axis * surface.shape.bounding_radius();
            (foot - half, foot + half)
        }
    };
    segment_coverage(surface, &start, &end, wire.linear_density(), n, eps)
}

fn segment_coverage(
    surface: &GaussianSurface,
    start: &R3,
    end: &R3,
    linear_density: Scalar,
    n: usize,
    eps: Scalar,
) -> Coverage {
    let length = (end - start).norm();
    if length <= 0.0 || n == 0 {
        return Coverage::default();
    }
    let inside = (0..n)
        .filter(|&i| {
            let s = (i as Scalar + 0.5) / n as Scalar;
            surface.contains_world_point(&(start + (end - start) * s), eps)
        })
        .count();
    Coverage {
        sampled: n,
        inside,
        charge: linear_density * length * inside as Scalar / n as Scalar,
    }
}

/// Samples a sphere of total charge `charge` spread over its surface.
fn spherical_shell_coverage(
    surface: &GaussianSurface,
    center: &R3,
    radius: Scalar,
    charge: Scalar,
    n: usize,
    eps: Scalar,
) -> Coverage {
    let count = n * n;
    if radius <= 0.0 || count == 0 {
        return Coverage::default();
    }
    let inside = fibonacci_sphere(count)
        .filter(|d| surface.contains_world_point(&(center + d * radius), eps))
        .count();
    Coverage {
        sampled: count,
        inside,
        charge: charge * inside as Scalar / count as Scalar,
    }
}

/// Hollow spheres are sampled on their surface; solid spheres on `n`
/// equal-volume shells of `4n` directions each.
fn sphere_coverage(surface: &GaussianSurface, sphere: &ChargedSphere, n: usize, eps: Scalar) -> Coverage {
    let q = sphere.total_charge();
    if sphere.hollow {
        return spherical_shell_coverage(surface, &sphere.position, sphere.radius, q, n, eps);
    }
    if sphere.radius <= 0.0 || n == 0 {
        return Coverage::default();
    }
    let directions: Vec<R3> = fibonacci_sphere(4 * n).collect();
    let mut inside = 0;
    for k in 0..n {
        let r = sphere.radius * ((k as Scalar + 0.5) / n as Scalar).cbrt();
        inside += directions
            .iter()
            .filter(|d| surface.contains_world_point(&(sphere.position + *d * r), eps))
            .count();
    }
    let total = n * directions.len();
    Coverage {
        sampled: total,
        inside,
        charge: q * inside as Scalar / total as Scalar,
    }
}

/// Samples every charged boundary of a shell stack.
///
/// Cylindrical boundaries are approximated by `n` axial lines, each carrying
/// an equal share of the boundary's line charge.
fn shells_coverage(
    surface: &GaussianSurface,
    shells: &ConcentricShells,
    charges: &[Scalar],
    n: usize,
    eps: Scalar,
) -> Coverage {
    let system: &ShellSystem = &shells.system;
    let boundaries = system.radii.iter().zip(charges).filter(|(r, q)| **r > 0.0 && **q != 0.0);
    match shells.geometry {
        ShellGeometry::Spherical => boundaries
            .map(|(&r, &q)| spherical_shell_coverage(surface, &shells.position, r, q, n, eps))
            .fold(Coverage::default(), Coverage::merge),
        ShellGeometry::Cylindrical => {
            let axis = normalize_or_zero(&shells.axis);
            if axis == R3::zeros() || n == 0 {
                return Coverage::default();
            }
            let (u, v) = plane_basis(&axis);
            let c = surface.transform.position;
            let half = axis * surface.shape.bounding_radius();
            boundaries
                .flat_map(|(&r, &q)| {
                    (0..n).map(move |j| {
                        let theta = 2.0 * PI * (j as Scalar + 0.5) / n as Scalar;
                        let (s, co) = theta.sin_cos();
                        (shells.position + (u * co + v * s) * r, q / n as Scalar)
                    })
                })
                .map(|(on_line, lambda)| {
                    let foot = on_line + axis * (c - on_line).dot(&axis);
                    segment_coverage(surface, &(foot - half), &(foot + half), lambda, n, eps)
                })
                .fold(Coverage::default(), Coverage::merge)
        }
    }
}
