//! The octahedral face table and the central projection onto face planes.

use crate::contour::SubContour;
use crate::float_types::{Real, PLANE_EPSILON};
use nalgebra::Vector3;

/// Outward directions of the eight octant faces, in the fixed index order
/// persisted data relies on: bit 0 of the index encodes the z sign, bit 1
/// the x sign, bit 2 the y sign.
pub const SIDE_DIRECTIONS: [Vector3<Real>; 8] = [
    Vector3::new(1.0, 1.0, 1.0),
    Vector3::new(1.0, 1.0, -1.0),
    Vector3::new(-1.0, 1.0, 1.0),
    Vector3::new(-1.0, 1.0, -1.0),
    Vector3::new(1.0, -1.0, 1.0),
    Vector3::new(1.0, -1.0, -1.0),
    Vector3::new(-1.0, -1.0, 1.0),
    Vector3::new(-1.0, -1.0, -1.0),
];

/// Index of the octant containing `p`.
#[inline]
pub fn side_number(p: &Vector3<Real>) -> usize {
    (if p.z < 0.0 { 1 } else { 0 })
        + (if p.x < 0.0 { 2 } else { 0 })
        + (if p.y < 0.0 { 4 } else { 0 })
}

/// Project every vertex of the eight per-octant groups onto its face plane.
///
/// The central projection has aperture 90 degrees: `v <- v / (n . v)`, after
/// which the planar coordinates live in x and y and z is forced to zero.
pub(crate) fn project_on_octahedron(sides: &mut [Vec<SubContour>; 8]) {
    for (i, contours) in sides.iter_mut().enumerate() {
        let n = SIDE_DIRECTIONS[i];
        for sc in contours.iter_mut() {
            for ev in &mut sc.vertices {
                let d = n.dot(&ev.vertex);
                ev.vertex *= 1.0 / d;
                ev.vertex.z = 0.0;
            }
        }
    }
}

/// Lift a face-plane point back onto the unit sphere by reconstructing z
/// from the face plane equation, then normalizing.
#[inline]
pub(crate) fn unproject_octahedron(
    mut v: Vector3<Real>,
    side_direction: &Vector3<Real>,
) -> Vector3<Real> {
    debug_assert!(v.z.abs() < PLANE_EPSILON);
    v.z = (1.0 - side_direction.dot(&v)) / side_direction.z;
    v.normalize()
}

/// True when the 2D triangle a, b, c is convex and counter-clockwise
/// (z components are ignored).
pub(crate) fn is_triangle_convex_positive_2d(
    a: &Vector3<Real>,
    b: &Vector3<Real>,
    c: &Vector3<Real>,
) -> bool {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x) >= 0.0
        && (c.x - b.x) * (a.y - b.y) - (c.y - b.y) * (a.x - b.x) >= 0.0
        && (a.x - c.x) * (b.y - c.y) - (a.y - c.y) * (b.x - c.x) >= 0.0
}
