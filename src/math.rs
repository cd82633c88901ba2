//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{UnitQuaternion, Vector3};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;
/// Orientation of a posed object.
pub type Rotation = UnitQuaternion<Scalar>;

/// Norm below which a vector is considered to have no direction.
pub const NORMALIZE_EPSILON: Scalar = 1.0e-12;

/// Returns `v / |v|`, or the zero vector when `|v|` is too small to define a direction.
#[inline]
#[must_use]
pub fn normalize_or_zero(v: &R3) -> R3 {
    let n = v.norm();
    if n <= NORMALIZE_EPSILON {
        R3::zeros()
    } else {
        v / n
    }
}

/// Builds two unit tangents `(u, v)` spanning the plane orthogonal to `normal`.
///
/// `(u, v, normal)` is right-handed. The helper axis is world +Y unless the
/// normal is nearly parallel to it, in which case +X is used, so a plane facing
/// +Z has `u = +X` and `v = +Y`.
#[must_use]
pub fn plane_basis(normal: &R3) -> (R3, R3) {
    let n = normalize_or_zero(normal);
    if n == R3::zeros() {
        return (R3::x(), R3::y());
    }
    let helper = if n.y.abs() < 0.999 { R3::y() } else { R3::x() };
    let u = normalize_or_zero(&helper.cross(&n));
    let v = n.cross(&u);
    (u, v)
}

/// Closest point to `p` on the segment `[a, b]`.
#[must_use]
pub fn closest_point_on_segment(p: &R3, a: &R3, b: &R3) -> R3 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= NORMALIZE_EPSILON {
        return *a;
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Replaces a vector holding any non-finite component with the zero vector.
#[inline]
#[must_use]
pub fn finite_or_zero(v: R3) -> R3 {
    if v.iter().all(|c| c.is_finite()) {
        v
    } else {
        R3::zeros()
    }
}
