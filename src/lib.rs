#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and the scene scaling multipliers.
pub mod constants;
/// Shared vector utilities built on nalgebra.
pub mod math;
/// Field constants and enclosure sampling configuration.
pub mod config;
/// Errors reported by the optional validation helpers.
pub mod errors;
/// Local/world frame conversion for Gaussian surfaces.
pub mod transform;
/// Charge and current source snapshots.
pub mod sources;
/// Charge redistribution across concentric conductor/dielectric shells.
pub mod shells;
/// Closed-form electric and magnetic fields per source shape.
pub mod fields;
/// Gaussian surface shapes, containment and area-stratified sampling.
pub mod surfaces;
/// Intersection tests and enclosed-charge estimation.
pub mod enclosure;
/// Field superposition over source lists.
pub mod aggregate;
/// Loop and closed-surface flux quadrature.
pub mod flux;

/// Common exports for downstream crates.
pub mod prelude;
