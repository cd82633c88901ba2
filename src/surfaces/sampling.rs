//! Area-stratified surface sampling.
//!
//! A sample budget is split across the planar/curved regions of a shape in
//! proportion to their areas. Rectangular regions use a cell-centered grid;
//! disks and spheres use a golden-angle spiral for even coverage.

use std::f64::consts::PI;

use crate::math::{Scalar, R3};

use super::SamplePoint;

/// Golden angle `π(3 − √5)` in radians.
const GOLDEN_ANGLE: Scalar = 2.399_963_229_728_653;

/// Splits `count` samples across regions proportionally to `weights`.
///
/// Uses the largest-remainder method: every region receives the floor of its
/// quota and the leftover samples go to the largest fractional remainders
/// (ties resolved by index), so the result always sums to `count` when any
/// weight is positive. Non-positive weights receive nothing.
#[must_use]
pub fn allocate_samples(count: usize, weights: &[Scalar]) -> Vec<usize> {
    let total: Scalar = weights.iter().filter(|w| **w > 0.0).sum();
    if count == 0 || !(total > 0.0) {
        return vec![0; weights.len()];
    }
    let quotas: Vec<Scalar> = weights
        .iter()
        .map(|&w| if w > 0.0 { count as Scalar * w / total } else { 0.0 })
        .collect();
    let mut counts: Vec<usize> = quotas.iter().map(|q| q.floor() as usize).collect();
    let assigned: usize = counts.iter().sum();

    let mut order: Vec<usize> = (0..weights.len()).filter(|&i| weights[i] > 0.0).collect();
    order.sort_by(|&a, &b| {
        let ra = quotas[a] - quotas[a].floor();
        let rb = quotas[b] - quotas[b].floor();
        rb.total_cmp(&ra).then(a.cmp(&b))
    });
    for &i in order.iter().cycle().take(count.saturating_sub(assigned)) {
        counts[i] += 1;
    }
    counts
}

/// Sampleable piece of a shape surface, in the shape's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Region {
    /// Parallelogram `center + s·u_half + t·v_half`, `s, t ∈ [-1, 1]`.
    Rect { center: R3, u_half: R3, v_half: R3, normal: R3 },
    /// Flat disk spanned by the unit tangents `u`, `v`.
    Disk { center: R3, u: R3, v: R3, radius: Scalar, normal: R3 },
    /// Side of a Y-aligned cylinder centered on the origin.
    Lateral { radius: Scalar, height: Scalar },
    /// Sphere centered on the origin.
    Sphere { radius: Scalar },
}

impl Region {
    pub(crate) fn area(&self) -> Scalar {
        match *self {
            Self::Rect { u_half, v_half, .. } => 4.0 * u_half.cross(&v_half).norm(),
            Self::Disk { radius, .. } => PI * radius * radius,
            Self::Lateral { radius, height } => 2.0 * PI * radius * height,
            Self::Sphere { radius } => 4.0 * PI * radius * radius,
        }
    }

    /// Generates exactly `n` samples on the region; their area weights sum to
    /// the region area.
    pub(crate) fn sample(&self, n: usize, include_normals: bool, out: &mut Vec<SamplePoint>) {
        if n == 0 {
            return;
        }
        let area = self.area();
        let mut push = |position: R3, normal: R3, weight: Scalar| {
            out.push(if include_normals {
                SamplePoint::with_normal(position, normal, weight)
            } else {
                SamplePoint::at(position)
            });
        };
        match *self {
            Self::Rect { center, u_half, v_half, normal } => {
                for (s, t, share) in grid_cells(n, u_half.norm(), v_half.norm()) {
                    push(center + u_half * (s * 2.0 - 1.0) + v_half * (t * 2.0 - 1.0), normal, area * share);
                }
            }
            Self::Lateral { radius, height } => {
                for (s, t, share) in grid_cells(n, 2.0 * PI * radius, height) {
                    let (sin, cos) = (s * 2.0 * PI).sin_cos();
                    let y = (t - 0.5) * height;
                    push(R3::new(radius * cos, y, radius * sin), R3::new(cos, 0.0, sin), area * share);
                }
            }
            Self::Disk { center, u, v, radius, normal } => {
                let weight = area / n as Scalar;
                for (x, y) in fibonacci_disk(n) {
                    push(center + (u * x + v * y) * radius, normal, weight);
                }
            }
            Self::Sphere { radius } => {
                let weight = area / n as Scalar;
                for direction in fibonacci_sphere(n) {
                    push(direction * radius, direction, weight);
                }
            }
        }
    }
}

/// Cell centers `(s, t)` in `[0, 1]²` and area shares of `n` cells tiling a
/// `width × height` rectangle.
///
/// The rectangle is cut into equal-height rows whose cell counts differ by at
/// most one, so every cell is filled and the shares sum to one.
fn grid_cells(n: usize, width: Scalar, height: Scalar) -> impl Iterator<Item = (Scalar, Scalar, Scalar)> {
    let aspect = if width > 0.0 && height > 0.0 { width / height } else { 1.0 };
    let rows = ((n as Scalar / aspect).sqrt().round() as usize).clamp(1, n.max(1));
    let (base, extra) = (n / rows, n % rows);
    (0..rows).flat_map(move |row| {
        let cols = base + usize::from(row < extra);
        let t = cell_center(row, rows);
        let share = 1.0 / (rows * cols) as Scalar;
        (0..cols).map(move |col| (cell_center(col, cols), t, share))
    })
}

#[inline]
fn cell_center(index: usize, cells: usize) -> Scalar {
    (index as Scalar + 0.5) / cells as Scalar
}

/// Golden-angle points covering the unit disk evenly.
pub(crate) fn fibonacci_disk(n: usize) -> impl Iterator<Item = (Scalar, Scalar)> {
    (0..n).map(move |k| {
        let r = ((k as Scalar + 0.5) / n as Scalar).sqrt();
        let (s, c) = (k as Scalar * GOLDEN_ANGLE).sin_cos();
        (r * c, r * s)
    })
}

/// Golden-angle unit directions covering the sphere evenly.
pub(crate) fn fibonacci_sphere(n: usize) -> impl Iterator<Item = R3> {
    (0..n).map(move |k| {
        let y = 1.0 - 2.0 * (k as Scalar + 0.5) / n as Scalar;
        let ring = (1.0 - y * y).max(0.0).sqrt();
        let (s, c) = (k as Scalar * GOLDEN_ANGLE).sin_cos();
        R3::new(c * ring, y, s * ring)
    })
}
