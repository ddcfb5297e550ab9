//! Bounding spherical caps `{v : n . v >= d}` and the predicates used to
//! short-circuit boolean operations.

use crate::float_types::{Real, VERTEX_EPSILON};
use nalgebra::Vector3;

/// Sentinel minimum dot product of the empty cap: no unit vector reaches it.
pub const EMPTY_CAP_D: Real = 2.0;

/// Smallest cap enclosing the given unit vectors.
///
/// Empty input yields the empty-cap sentinel `((1,0,0), 2)`. When the
/// vectors cancel out (a region wrapping most of the sphere) the whole
/// sphere cap `((1,0,0), -1)` is returned rather than a NaN axis. Otherwise
/// the axis is the normalized vertex sum and `d` the smallest dot product,
/// nudged outward to absorb rounding.
pub(crate) fn compute_bounding_cap(points: &[Vector3<Real>]) -> (Vector3<Real>, Real) {
    if points.is_empty() {
        return (Vector3::x(), EMPTY_CAP_D);
    }
    let sum: Vector3<Real> = points.iter().sum();
    if sum.norm() < VERTEX_EPSILON {
        return (Vector3::x(), -1.0);
    }
    let n = sum.normalize();
    let mut d: Real = 1.0;
    for v in points {
        d = d.min(n.dot(v));
    }
    d *= if d > 0.0 { 0.9999999 } else { 1.0000001 };
    (n, d)
}

/// Can the two caps share a point? False only when they are certainly
/// disjoint; an empty cap intersects nothing.
pub(crate) fn caps_intersect(
    n1: &Vector3<Real>,
    d1: Real,
    n2: &Vector3<Real>,
    d2: Real,
) -> bool {
    if d1 > 1.0 || d2 > 1.0 {
        return false;
    }
    let a = d1 * d2 - n1.dot(n2);
    d1 + d2 <= 0.0 || a <= 0.0 || (a <= 1.0 && a * a <= (1.0 - d1 * d1) * (1.0 - d2 * d2))
}

/// Does cap 1 contain cap 2? A cap of half-angle α₂ around n₂ fits in one
/// of half-angle α₁ around n₁ iff the angle between the axes plus α₂ is at
/// most α₁; in dot-product form that needs `d1 <= d2` plus the algebraic
/// test below. An empty cap contains nothing and is contained by anything.
pub(crate) fn cap_contains(
    n1: &Vector3<Real>,
    d1: Real,
    n2: &Vector3<Real>,
    d2: Real,
) -> bool {
    if d2 > 1.0 {
        return true;
    }
    if d1 > 1.0 {
        return false;
    }
    let a = n1.dot(n2) - d1 * d2;
    d1 <= d2 && (a >= 1.0 || (a >= 0.0 && a * a >= (1.0 - d1 * d1) * (1.0 - d2 * d2)))
}
