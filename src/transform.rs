//! World ⇄ local pose transforms shared by Gaussian surfaces and intersection tests.

use crate::math::{Rotation, R3};

/// Rigid pose of a query volume: a translation followed by an orientation.
///
/// The local frame is centered on `position` and unrotated, so a local point
/// `p` maps to `position + orientation * p` in world space.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    /// World-space origin of the local frame.
    pub position: R3,
    /// Orientation of the local frame relative to world axes.
    pub orientation: Rotation,
}

impl Default for SurfaceTransform {
    fn default() -> Self {
        Self::at(R3::zeros())
    }
}

impl SurfaceTransform {
    /// Creates a transform from a position and an orientation.
    #[must_use]
    pub const fn new(position: R3, orientation: Rotation) -> Self {
        Self { position, orientation }
    }

    /// Unrotated transform located at `position`.
    #[must_use]
    pub fn at(position: R3) -> Self {
        Self::new(position, Rotation::identity())
    }

    /// Maps a world-space point into the local frame.
    #[inline]
    #[must_use]
    pub fn to_local_point(&self, world: &R3) -> R3 {
        self.orientation.inverse_transform_vector(&(world - self.position))
    }

    /// Maps a local-frame point into world space.
    #[inline]
    #[must_use]
    pub fn to_world_point(&self, local: &R3) -> R3 {
        self.position + self.orientation.transform_vector(local)
    }

    /// Rotates a world-space direction into the local frame (no translation).
    #[inline]
    #[must_use]
    pub fn to_local_vector(&self, world: &R3) -> R3 {
        self.orientation.inverse_transform_vector(world)
    }

    /// Rotates a local direction into world space (no translation).
    #[inline]
    #[must_use]
    pub fn to_world_vector(&self, local: &R3) -> R3 {
        self.orientation.transform_vector(local)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn point_round_trips_through_local_frame() {
        let t = SurfaceTransform::new(
            R3::new(1.0, -2.0, 3.0),
            Rotation::from_euler_angles(0.3, -1.1, 0.7),
        );
        let world = R3::new(4.0, 5.0, -6.0);
        assert_relative_eq!(t.to_world_point(&t.to_local_point(&world)), world, epsilon = 1.0e-12);
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let t = SurfaceTransform::new(
            R3::new(0.0, 0.0, 1.0),
            Rotation::from_axis_angle(&R3::z_axis(), FRAC_PI_2),
        );
        assert_relative_eq!(t.to_world_vector(&R3::x()), R3::y(), epsilon = 1.0e-12);
        assert_relative_eq!(t.to_local_point(&R3::new(0.0, 1.0, 1.0)), R3::x(), epsilon = 1.0e-12);
    }
}
