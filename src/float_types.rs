//! Scalar type and the fixed numeric tolerances of the kernel.

/// Our Real scalar type. The tolerances below are tuned to double-precision
/// central projection; there is no `f32` build of this crate.
pub type Real = f64;

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// Two vertices closer than this are treated as coincident.
pub const VERTEX_EPSILON: Real = 1e-8;

/// A projected vertex counts as lying on its face plane when |z| is below
/// this.
pub const PLANE_EPSILON: Real = 1e-6;

/// Two region areas closer than this (in steradians) compare as equal.
pub const AREA_EPSILON: Real = 1e-11;
