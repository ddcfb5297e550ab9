//! Splitting of closed spherical contours by the coordinate planes.
//!
//! Cuts insert great-circle intersection points flagged as synthetic; a
//! contour that never crosses the plane passes through untouched.

use crate::contour::{EdgeVertex, SubContour};
use crate::float_types::{Real, VERTEX_EPSILON};
use nalgebra::Vector3;

/// Half-space index of `v` with respect to the coordinate plane orthogonal
/// to `axis`: 0 for `v[axis] >= 0`, 1 otherwise.
#[inline]
pub(crate) fn side(v: &Vector3<Real>, axis: usize) -> usize {
    if v[axis] >= 0.0 { 0 } else { 1 }
}

/// Intersection of the great circle through `p1` and `p2` with the plane
/// through the origin of normal `n`, choosing the solution on the arc
/// between the two points.
///
/// Returns `None` when the endpoints are too close (or antipodal) to define
/// a great circle, or when the arc lies in the cutting plane itself.
pub fn great_circle_intersection(
    p1: &Vector3<Real>,
    p2: &Vector3<Real>,
    n: &Vector3<Real>,
) -> Option<Vector3<Real>> {
    let arc_normal = p1.cross(p2);
    if arc_normal.norm() < VERTEX_EPSILON {
        return None;
    }
    let dir = arc_normal.cross(n);
    let len = dir.norm();
    if len < VERTEX_EPSILON {
        return None;
    }
    let mut p = dir / len;
    // Two antipodal candidates; the crossing lies on the minor arc, in the
    // hemisphere of the midpoint.
    if p.dot(&(p1 + p2)) < 0.0 {
        p = -p;
    }
    Some(p)
}

/// Partition a closed contour into the two half-spaces of coordinate plane
/// `axis`, appending the pieces to `result[0]` (non-negative side) and
/// `result[1]`.
///
/// The walk is cyclic: vertices seen before the first crossing are held back
/// and concatenated after the closing segment has been handled, so a contour
/// is never split spuriously at its start index. Every synthesized cut
/// vertex carries `edge_flag = false`; when the intersection is degenerate
/// the endpoints are kept on their own sides with the broken segment
/// unflagged instead.
pub(crate) fn split_contour_by_plane(
    axis: usize,
    contour: &SubContour,
    result: &mut [Vec<SubContour>; 2],
) {
    debug_assert!(axis < 3);
    let input = &contour.vertices;
    if input.is_empty() {
        return;
    }
    let mut plane = Vector3::zeros();
    plane[axis] = 1.0;

    let mut current: Vec<EdgeVertex> = Vec::new();
    let mut unfinished: Vec<EdgeVertex> = Vec::new();
    let mut previous_side = side(&input[0].vertex, axis);
    let mut current_side = previous_side;
    let mut previous_vertex = input[0];

    // Head of the cycle, up to the first crossing. These vertices form the
    // tail accumulator re-attached at the end.
    let mut i = 0;
    while i < input.len() {
        let v = input[i];
        current_side = side(&v.vertex, axis);
        if current_side != previous_side {
            debug_assert!(current.is_empty());
            if let Some(p) =
                great_circle_intersection(&previous_vertex.vertex, &v.vertex, &plane)
            {
                unfinished.push(EdgeVertex::new(p, false));
                current.push(EdgeVertex::new(p, false));
            }
            previous_side = current_side;
            // input[i] is left for the loop below, which re-reads it and
            // starts the new sub-contour with it.
            break;
        }
        unfinished.push(v);
        previous_vertex = v;
        i += 1;
    }

    // Remainder of the cycle.
    while i < input.len() {
        let v = input[i];
        current_side = side(&v.vertex, axis);
        if current_side == previous_side {
            current.push(v);
        } else {
            match great_circle_intersection(&previous_vertex.vertex, &v.vertex, &plane) {
                Some(p) => {
                    current.push(EdgeVertex::new(p, false));
                    result[previous_side].push(SubContour::from(std::mem::take(&mut current)));
                    current.push(EdgeVertex::new(p, false));
                    current.push(v);
                },
                None => {
                    // Endpoints too close to define a cut; keep them on
                    // their respective sides.
                    if let Some(last) = current.last_mut() {
                        last.edge_flag = false;
                    }
                    result[previous_side].push(SubContour::from(std::mem::take(&mut current)));
                    current.push(EdgeVertex::new(v.vertex, false));
                },
            }
            previous_side = current_side;
        }
        previous_vertex = v;
        i += 1;
    }

    // Closing segment from the last vertex back to the first.
    previous_side = current_side;
    current_side = side(&input[0].vertex, axis);
    if current_side != previous_side {
        match great_circle_intersection(&previous_vertex.vertex, &input[0].vertex, &plane) {
            Some(p) => {
                current.push(EdgeVertex::new(p, false));
                result[previous_side].push(SubContour::from(std::mem::take(&mut current)));
                current.push(EdgeVertex::new(p, false));
            },
            None => {
                if let Some(last) = current.last_mut() {
                    last.edge_flag = false;
                }
                result[previous_side].push(SubContour::from(std::mem::take(&mut current)));
            },
        }
    }

    // Join the tail with the held-back head.
    current.extend(unfinished);
    if !current.is_empty() {
        result[current_side].push(SubContour::from(current));
    }
}
