//! Field source snapshots.
//!
//! Every source is an immutable value built from the caller's scene state for a
//! single query. Directions (`axis`, `normal`) are world-space and need not be
//! normalized; the solvers normalize them and treat a zero direction as a
//! degenerate shape.

use std::f64::consts::PI;

use crate::math::{normalize_or_zero, plane_basis, Scalar, R3};
use crate::shells::ShellSystem;

/// Discrete point charge.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCharge {
    /// Position of the charge.
    pub position: R3,
    /// Charge in coulombs.
    pub charge: Scalar,
}

impl PointCharge {
    /// Creates a point charge.
    #[must_use]
    pub const fn new(position: R3, charge: Scalar) -> Self {
        Self { position, charge }
    }
}

/// Straight wire of finite length with a uniform line charge, centered on `position`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteWire {
    /// Midpoint of the wire.
    pub position: R3,
    /// Direction of the wire axis.
    pub axis: R3,
    /// Length along `axis`.
    pub length: Scalar,
    /// Conductor radius.
    pub radius: Scalar,
    /// Charge per unit length λ.
    pub linear_density: Scalar,
}

impl FiniteWire {
    /// Creates a finite wire.
    #[must_use]
    pub const fn new(
        position: R3,
        axis: R3,
        length: Scalar,
        radius: Scalar,
        linear_density: Scalar,
    ) -> Self {
        Self { position, axis, length, radius, linear_density }
    }

    /// Start and end points of the wire axis.
    #[must_use]
    pub fn endpoints(&self) -> (R3, R3) {
        let half = normalize_or_zero(&self.axis) * (self.length.max(0.0) * 0.5);
        (self.position - half, self.position + half)
    }

    /// Total charge λ·L.
    #[must_use]
    pub fn total_charge(&self) -> Scalar {
        self.linear_density * self.length.max(0.0)
    }
}

/// Infinite straight line charge passing through `position`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteWire {
    /// Any point on the line.
    pub position: R3,
    /// Direction of the line.
    pub axis: R3,
    /// Charge per unit length λ.
    pub linear_density: Scalar,
}

impl InfiniteWire {
    /// Creates an infinite wire.
    #[must_use]
    pub const fn new(position: R3, axis: R3, linear_density: Scalar) -> Self {
        Self { position, axis, linear_density }
    }
}

/// Rectangular sheet of uniform surface charge centered on `position`.
///
/// `width` runs along the first tangent of [`plane_basis`] and `height` along
/// the second.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinitePlane {
    /// Center of the rectangle.
    pub position: R3,
    /// Plane normal.
    pub normal: R3,
    /// Extent along the first tangent.
    pub width: Scalar,
    /// Extent along the second tangent.
    pub height: Scalar,
    /// Charge per unit area σ.
    pub surface_density: Scalar,
}

impl FinitePlane {
    /// Creates a finite plane.
    #[must_use]
    pub const fn new(
        position: R3,
        normal: R3,
        width: Scalar,
        height: Scalar,
        surface_density: Scalar,
    ) -> Self {
        Self { position, normal, width, height, surface_density }
    }

    /// Orthonormal frame `(u, v, n)` with `u` along the width.
    #[must_use]
    pub fn frame(&self) -> (R3, R3, R3) {
        let (u, v) = plane_basis(&self.normal);
        (u, v, normalize_or_zero(&self.normal))
    }

    /// Area of the rectangle; zero for degenerate extents.
    #[must_use]
    pub fn area(&self) -> Scalar {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Total charge σ·A.
    #[must_use]
    pub fn total_charge(&self) -> Scalar {
        self.surface_density * self.area()
    }
}

/// Unbounded sheet of uniform surface charge through `position`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfinitePlane {
    /// Any point on the plane.
    pub position: R3,
    /// Plane normal.
    pub normal: R3,
    /// Charge per unit area σ.
    pub surface_density: Scalar,
}

impl InfinitePlane {
    /// Creates an infinite plane.
    #[must_use]
    pub const fn new(position: R3, normal: R3, surface_density: Scalar) -> Self {
        Self { position, normal, surface_density }
    }
}

/// Uniformly charged sphere.
///
/// A solid sphere carries volume density ρ; a hollow one carries surface density σ.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargedSphere {
    /// Center of the sphere.
    pub position: R3,
    /// Sphere radius.
    pub radius: Scalar,
    /// `true` when all charge sits on the surface.
    pub hollow: bool,
    /// ρ for a solid sphere, σ for a hollow one.
    pub density: Scalar,
}

impl ChargedSphere {
    /// Solid sphere with volume density `rho`.
    #[must_use]
    pub const fn solid(position: R3, radius: Scalar, rho: Scalar) -> Self {
        Self { position, radius, hollow: false, density: rho }
    }

    /// Hollow sphere with surface density `sigma`.
    #[must_use]
    pub const fn hollow(position: R3, radius: Scalar, sigma: Scalar) -> Self {
        Self { position, radius, hollow: true, density: sigma }
    }

    /// Total charge of the sphere; zero for a non-positive radius.
    #[must_use]
    pub fn total_charge(&self) -> Scalar {
        if self.radius <= 0.0 {
            return 0.0;
        }
        if self.hollow {
            self.density * 4.0 * PI * self.radius * self.radius
        } else {
            self.density * 4.0 / 3.0 * PI * self.radius.powi(3)
        }
    }
}

/// Whether a shell stack is nested spheres or coaxial infinite cylinders.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellGeometry {
    /// Concentric spheres; charges are totals in coulombs.
    Spherical,
    /// Coaxial infinite cylinders; charges are per unit length.
    Cylindrical,
}

/// Concentric conductor/dielectric stack centered on `position`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConcentricShells {
    /// Common center (spherical) or a point on the common axis (cylindrical).
    pub position: R3,
    /// Common axis; ignored for spherical stacks.
    pub axis: R3,
    /// Shape of the layers.
    pub geometry: ShellGeometry,
    /// Layer parameters.
    pub system: ShellSystem,
}

impl ConcentricShells {
    /// Spherical stack centered on `position`.
    #[must_use]
    pub fn spherical(position: R3, system: ShellSystem) -> Self {
        Self { position, axis: R3::y(), geometry: ShellGeometry::Spherical, system }
    }

    /// Cylindrical stack around the line through `position` along `axis`.
    #[must_use]
    pub fn cylindrical(position: R3, axis: R3, system: ShellSystem) -> Self {
        Self { position, axis, geometry: ShellGeometry::Cylindrical, system }
    }

    /// Radius of the outermost layer, or zero for an empty stack.
    #[must_use]
    pub fn outer_radius(&self) -> Scalar {
        self.system.radii.last().copied().unwrap_or(0.0).max(0.0)
    }
}

/// Lateral extent shared by every plane in a stack.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneExtent {
    /// Rectangular planes of the given size.
    Finite {
        /// Extent along the first tangent.
        width: Scalar,
        /// Extent along the second tangent.
        height: Scalar,
    },
    /// Unbounded planes.
    Infinite,
}

/// A single charged plane, finite or infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargedPlane {
    /// Rectangular sheet.
    Finite(FinitePlane),
    /// Unbounded sheet.
    Infinite(InfinitePlane),
}

impl ChargedPlane {
    /// A point on the plane (the rectangle center for finite planes).
    #[must_use]
    pub const fn position(&self) -> R3 {
        match self {
            Self::Finite(p) => p.position,
            Self::Infinite(p) => p.position,
        }
    }

    /// Plane normal as given by the caller.
    #[must_use]
    pub const fn normal(&self) -> R3 {
        match self {
            Self::Finite(p) => p.normal,
            Self::Infinite(p) => p.normal,
        }
    }

    /// Charge per unit area.
    #[must_use]
    pub const fn surface_density(&self) -> Scalar {
        match self {
            Self::Finite(p) => p.surface_density,
            Self::Infinite(p) => p.surface_density,
        }
    }
}

/// A single charged wire, finite or infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargedWire {
    /// Wire of finite length and thickness.
    Finite(FiniteWire),
    /// Unbounded line.
    Infinite(InfiniteWire),
}

impl ChargedWire {
    /// A point on the axis (the midpoint for finite wires).
    #[must_use]
    pub const fn position(&self) -> R3 {
        match self {
            Self::Finite(w) => w.position,
            Self::Infinite(w) => w.position,
        }
    }

    /// Axis direction as given by the caller.
    #[must_use]
    pub const fn axis(&self) -> R3 {
        match self {
            Self::Finite(w) => w.axis,
            Self::Infinite(w) => w.axis,
        }
    }

    /// Conductor radius; zero for infinite lines.
    #[must_use]
    pub const fn radius(&self) -> Scalar {
        match self {
            Self::Finite(w) => w.radius,
            Self::Infinite(_) => 0.0,
        }
    }

    /// Charge per unit length.
    #[must_use]
    pub const fn linear_density(&self) -> Scalar {
        match self {
            Self::Finite(w) => w.linear_density,
            Self::Infinite(w) => w.linear_density,
        }
    }
}

/// Parallel planes sharing a normal, evenly spaced and centered on `position`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StackedPlanes {
    /// Center of the stack.
    pub position: R3,
    /// Shared plane normal; layers are offset along it.
    pub normal: R3,
    /// Surface density of each layer, first layer at the most negative offset.
    pub densities: Vec<Scalar>,
    /// Distance between neighbouring layers.
    pub spacing: Scalar,
    /// Finite or infinite layers.
    pub extent: PlaneExtent,
}

impl StackedPlanes {
    /// Creates a plane stack.
    #[must_use]
    pub fn new(
        position: R3,
        normal: R3,
        densities: Vec<Scalar>,
        spacing: Scalar,
        extent: PlaneExtent,
    ) -> Self {
        Self { position, normal, densities, spacing, extent }
    }

    /// Offset of layer `i` along the normal: `i·spacing − (n−1)·spacing/2`.
    #[must_use]
    pub fn layer_offset(&self, i: usize) -> Scalar {
        let n = self.densities.len() as Scalar;
        i as Scalar * self.spacing - (n - 1.0) * self.spacing * 0.5
    }

    /// Expands the stack into one plane per layer.
    pub fn layers(&self) -> impl Iterator<Item = ChargedPlane> + '_ {
        let n = normalize_or_zero(&self.normal);
        self.densities.iter().enumerate().map(move |(i, &sigma)| {
            let position = self.position + n * self.layer_offset(i);
            match self.extent {
                PlaneExtent::Finite { width, height } => ChargedPlane::Finite(FinitePlane::new(
                    position,
                    self.normal,
                    width,
                    height,
                    sigma,
                )),
                PlaneExtent::Infinite => {
                    ChargedPlane::Infinite(InfinitePlane::new(position, self.normal, sigma))
                }
            }
        })
    }
}

/// One Biot–Savart element of a sampled current path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentElement {
    /// Midpoint of the element.
    pub position: R3,
    /// Element vector `dl`; its length is the element length.
    pub tangent: R3,
    /// Current in amperes.
    pub current: Scalar,
}

/// Current path discretised into elements, used only by the magnetic solvers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentLoopSample {
    /// Element midpoints.
    pub positions: Vec<R3>,
    /// Element vectors `dl`, paired with `positions`.
    pub tangents: Vec<R3>,
    /// Current in amperes.
    pub current: Scalar,
}

impl CurrentLoopSample {
    /// Creates a loop from explicit samples.
    #[must_use]
    pub fn new(positions: Vec<R3>, tangents: Vec<R3>, current: Scalar) -> Self {
        Self { positions, tangents, current }
    }

    /// Circular loop of `radius` around `center`, discretised into `segments`
    /// elements. Current circulates counter-clockwise seen from `normal`.
    #[must_use]
    pub fn circular(center: R3, normal: R3, radius: Scalar, segments: usize, current: Scalar) -> Self {
        if radius <= 0.0 || segments == 0 {
            return Self::new(Vec::new(), Vec::new(), current);
        }
        let (u, v) = plane_basis(&normal);
        let dtheta = 2.0 * PI / segments as Scalar;
        let (positions, tangents): (Vec<R3>, Vec<R3>) = (0..segments)
            .map(|i| {
                let theta = (i as Scalar + 0.5) * dtheta;
                let (s, c) = theta.sin_cos();
                let position = center + (u * c + v * s) * radius;
                let tangent = (v * c - u * s) * (radius * dtheta);
                (position, tangent)
            })
            .unzip();
        Self::new(positions, tangents, current)
    }

    /// Iterates the elements; unpaired trailing samples are ignored.
    pub fn elements(&self) -> impl Iterator<Item = CurrentElement> + '_ {
        self.positions
            .iter()
            .zip(&self.tangents)
            .map(move |(&position, &tangent)| CurrentElement {
                position,
                tangent,
                current: self.current,
            })
    }
}

/// Any field-producing object in a scene.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSource {
    /// Discrete charge.
    PointCharge(PointCharge),
    /// Line charge of finite length.
    FiniteWire(FiniteWire),
    /// Unbounded line charge.
    InfiniteWire(InfiniteWire),
    /// Rectangular sheet charge.
    FinitePlane(FinitePlane),
    /// Unbounded sheet charge.
    InfinitePlane(InfinitePlane),
    /// Solid or hollow charged sphere.
    ChargedSphere(ChargedSphere),
    /// Conductor/dielectric shell stack.
    ConcentricShells(ConcentricShells),
    /// Parallel plane stack.
    StackedPlanes(StackedPlanes),
    /// Sampled current path.
    CurrentLoop(CurrentLoopSample),
}

macro_rules! impl_from_variant {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldSource {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(
    PointCharge => PointCharge,
    FiniteWire => FiniteWire,
    InfiniteWire => InfiniteWire,
    FinitePlane => FinitePlane,
    InfinitePlane => InfinitePlane,
    ChargedSphere => ChargedSphere,
    ConcentricShells => ConcentricShells,
    StackedPlanes => StackedPlanes,
    CurrentLoopSample => CurrentLoop,
);

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn stacked_offsets_are_centered() {
        let stack = StackedPlanes::new(R3::zeros(), R3::z(), vec![1.0, -1.0, 2.0], 0.5, PlaneExtent::Infinite);
        let offsets: Vec<_> = (0..3).map(|i| stack.layer_offset(i)).collect();
        assert_eq!(offsets, vec![-0.5, 0.0, 0.5]);
        let positions: Vec<_> = stack
            .layers()
            .map(|layer| match layer {
                ChargedPlane::Infinite(p) => p.position.z,
                ChargedPlane::Finite(p) => p.position.z,
            })
            .collect();
        assert_eq!(positions, offsets);
    }

    #[test]
    fn circular_loop_has_closed_circumference() {
        let lp = CurrentLoopSample::circular(R3::zeros(), R3::z(), 2.0, 64, 1.0);
        assert_eq!(lp.elements().count(), 64);
        let total: Scalar = lp.tangents.iter().map(|t| t.norm()).sum();
        assert_relative_eq!(total, 4.0 * PI, max_relative = 1.0e-12);
        let net: R3 = lp.tangents.iter().sum();
        assert_relative_eq!(net.norm(), 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn sphere_total_charge_depends_on_hollowness() {
        let solid = ChargedSphere::solid(R3::zeros(), 1.0, 3.0);
        let hollow = ChargedSphere::hollow(R3::zeros(), 1.0, 1.0);
        assert_relative_eq!(solid.total_charge(), 4.0 * PI);
        assert_relative_eq!(hollow.total_charge(), 4.0 * PI);
        assert_eq!(ChargedSphere::solid(R3::zeros(), -1.0, 3.0).total_charge(), 0.0);
    }
}
