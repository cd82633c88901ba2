use crate::config::FieldConfig;
use crate::constants::SINGULARITY_DISTANCE_SQ;
use crate::math::R3;
use crate::sources::{CurrentElement, CurrentLoopSample};

/// Biot–Savart contribution `(μ/4π) · I · dl × r / |r|³` of one current element.
///
/// Points coinciding with the element contribute nothing.
#[must_use]
pub fn magnetic_contribution_at(element: &CurrentElement, point: &R3, config: &FieldConfig) -> R3 {
    let r_vec = point - element.position;
    let r2 = r_vec.norm_squared();
    if r2 < SINGULARITY_DISTANCE_SQ {
        return R3::zeros();
    }
    let coeff = config.biot_savart_constant() * element.current / (r2 * r2.sqrt());
    element.tangent.cross(&r_vec) * coeff
}

/// Magnetic flux density of a sampled current path.
#[must_use]
pub fn current_loop_field(current_loop: &CurrentLoopSample, point: &R3, config: &FieldConfig) -> R3 {
    current_loop
        .elements()
        .map(|element| magnetic_contribution_at(&element, point, config))
        .sum()
}
