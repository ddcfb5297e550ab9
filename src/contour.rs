//! Contour building blocks: vertices carrying an edge flag, and the closed
//! sub-contours the kernel splits across octahedron faces.

use crate::float_types::{Real, VERTEX_EPSILON};
use nalgebra::Vector3;

/// A contour vertex, holding position and the flag of the segment leaving it.
///
/// `edge_flag == true` means the segment beginning at this vertex is part of
/// the user-supplied polygon outline; `false` marks segments synthesized by
/// the kernel (plane cuts, pole fills). Outlines handed to consumers keep
/// only segments where at least one endpoint flag is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeVertex {
    pub vertex: Vector3<Real>,
    pub edge_flag: bool,
}

impl EdgeVertex {
    /// Create a new [`EdgeVertex`].
    pub const fn new(vertex: Vector3<Real>, edge_flag: bool) -> Self {
        EdgeVertex { vertex, edge_flag }
    }
}

/// An ordered, implicitly closed sequence of [`EdgeVertex`] (the successor of
/// the last vertex is the first).
///
/// Before octahedral decomposition the vertices are unit directions on the
/// sphere; once a sub-contour has been projected onto a face they are planar
/// points with `z == 0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubContour {
    pub vertices: Vec<EdgeVertex>,
}

impl SubContour {
    /// Build a contour from a point sequence.
    ///
    /// A closed contour marks every segment as a real outline edge. An open
    /// one is a path: its first and last vertices are flagged `false` so the
    /// synthetic closure does not show up in outlines.
    ///
    /// Consecutive points closer than the vertex tolerance are clamped to a
    /// single vertex, as is a trailing point that repeats the first.
    pub fn new(points: &[Vector3<Real>], closed: bool) -> Self {
        let mut vertices: Vec<EdgeVertex> = Vec::with_capacity(points.len());
        for p in points {
            if let Some(prev) = vertices.last() {
                if (prev.vertex - p).norm() < VERTEX_EPSILON {
                    continue;
                }
            }
            vertices.push(EdgeVertex::new(*p, true));
        }
        // Drop an explicit closing repeat of the first point.
        if vertices.len() > 1 {
            let first = vertices[0].vertex;
            if (vertices[vertices.len() - 1].vertex - first).norm() < VERTEX_EPSILON {
                vertices.pop();
            }
        }
        if !closed {
            if let Some(v) = vertices.first_mut() {
                v.edge_flag = false;
            }
            if let Some(v) = vertices.last_mut() {
                v.edge_flag = false;
            }
        }
        SubContour { vertices }
    }

    /// The contour walked backwards. Edge flags travel with their vertex.
    pub fn reversed(&self) -> SubContour {
        SubContour {
            vertices: self.vertices.iter().rev().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Debug representation: one `[ra_deg, dec_deg, edge_flag]` triple per
    /// vertex, angles rounded to 12 significant digits.
    pub fn to_json_fragment(&self) -> serde_json::Value {
        let triples: Vec<serde_json::Value> = self
            .vertices
            .iter()
            .map(|ev| {
                let v = ev.vertex;
                let ra = v.y.atan2(v.x).to_degrees();
                let dec = v.z.clamp(-1.0, 1.0).asin().to_degrees();
                serde_json::json!([round_sig(ra, 12), round_sig(dec, 12), ev.edge_flag])
            })
            .collect();
        serde_json::Value::Array(triples)
    }
}

impl From<Vec<EdgeVertex>> for SubContour {
    fn from(vertices: Vec<EdgeVertex>) -> Self {
        SubContour { vertices }
    }
}

/// Round `x` to `digits` significant digits.
pub(crate) fn round_sig(x: Real, digits: i32) -> Real {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let magnitude = x.abs().log10().floor() as i32;
    let factor = (10.0 as Real).powi(digits - 1 - magnitude);
    (x * factor).round() / factor
}
