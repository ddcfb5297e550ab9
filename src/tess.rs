//! Planar tessellation of face contours, built on the `geo` boolean kernel.
//!
//! Each octahedron face hands its sub-contours to this module as planar
//! rings (`z == 0`). Two passes are offered: boundary-only line loops under
//! a winding rule (canonicalization of overlapping contour sets), and fill
//! triangles of the positive-winding region. Both honor the per-face
//! tessellation normal (±z by face parity), and vertices synthesized at
//! contour crossings take the logical OR of the contributing edge flags.
//!
//! Internally rings are first made simple (consecutive duplicates clamped,
//! self-intersections split into separate loops), then an exact winding
//! count is attached to every cell of the arrangement by folding the rings
//! through `geo::BooleanOps`. The winding rule selects the cells to keep.

use crate::contour::{EdgeVertex, SubContour};
use crate::float_types::{Real, VERTEX_EPSILON};
use geo::{
    BooleanOps, Coord, LineString, MultiPolygon, Polygon as GeoPolygon, TriangulateEarcut,
    Winding,
};
use hashbrown::HashMap;
use nalgebra::Vector3;

/// Winding rule selecting which parts of a contour arrangement are
/// interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindingRule {
    /// Net winding >= 1 (union-like, the construction default).
    Positive,
    /// |winding| >= 2 (intersection-like).
    AbsGeqTwo,
}

/// Quantization grid for vertex identity lookups. Coarser than the vertex
/// coincidence tolerance so boolean-op output snaps back onto its inputs.
const FLAG_GRID: Real = 1e-7;

#[inline]
fn quantize(x: Real, y: Real) -> (i64, i64) {
    ((x / FLAG_GRID).round() as i64, (y / FLAG_GRID).round() as i64)
}

/// Boundary-only pass: the closed line loops of the region selected by
/// `rule`, wound positively for the face normal `(0, 0, orient)` (exterior
/// loops counter-clockwise with respect to that normal, holes clockwise).
pub(crate) fn boundary_loops(
    contours: &[SubContour],
    orient: Real,
    rule: WindingRule,
) -> Vec<SubContour> {
    let rings = simple_rings(contours);
    if rings.is_empty() {
        return Vec::new();
    }
    let lookup = FlagLookup::build(contours);
    let region = region_for_rule(winding_levels(&rings, orient), rule);

    let mut out = Vec::new();
    for poly in region.0 {
        let (exterior, interiors) = poly.into_inner();
        if let Some(sc) = ring_to_subcontour(exterior, orient > 0.0, &lookup) {
            out.push(sc);
        }
        for hole in interiors {
            if let Some(sc) = ring_to_subcontour(hole, orient <= 0.0, &lookup) {
                out.push(sc);
            }
        }
    }
    out
}

/// Triangle pass: earcut triangles of the positive-winding region, each
/// wound positively for the face normal `(0, 0, orient)`, as a flat list of
/// planar points in groups of three.
pub(crate) fn fill_triangles(contours: &[SubContour], orient: Real) -> Vec<Vector3<Real>> {
    let rings = simple_rings(contours);
    if rings.is_empty() {
        return Vec::new();
    }
    let region = region_for_rule(winding_levels(&rings, orient), WindingRule::Positive);

    let mut out = Vec::new();
    for poly in &region.0 {
        for tri in poly.earcut_triangles() {
            let [a, b, c] = tri.to_array();
            let doubled_area = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
            if doubled_area.abs() < 1e-16 {
                continue;
            }
            let (a, b, c) = if doubled_area * orient > 0.0 { (a, b, c) } else { (a, c, b) };
            out.push(Vector3::new(a.x, a.y, 0.0));
            out.push(Vector3::new(b.x, b.y, 0.0));
            out.push(Vector3::new(c.x, c.y, 0.0));
        }
    }
    out
}

/// Clamp duplicates and break self-intersections so every returned ring is
/// simple. Rings degenerating below three vertices are dropped.
fn simple_rings(contours: &[SubContour]) -> Vec<Vec<EdgeVertex>> {
    let mut rings = Vec::new();
    for sc in contours {
        let mut ring: Vec<EdgeVertex> = Vec::with_capacity(sc.len());
        for ev in &sc.vertices {
            if let Some(prev) = ring.last_mut() {
                if planar_distance_sq(&prev.vertex, &ev.vertex) < VERTEX_EPSILON * VERTEX_EPSILON
                {
                    // Coincident vertices collapse; an outline flag on
                    // either survives.
                    prev.edge_flag |= ev.edge_flag;
                    continue;
                }
            }
            ring.push(*ev);
        }
        while ring.len() > 1
            && planar_distance_sq(&ring[0].vertex, &ring[ring.len() - 1].vertex)
                < VERTEX_EPSILON * VERTEX_EPSILON
        {
            let dropped = ring[ring.len() - 1];
            ring.pop();
            ring[0].edge_flag |= dropped.edge_flag;
        }
        if ring.len() < 3 {
            continue;
        }
        rings.extend(split_at_self_intersections(ring));
    }
    rings
}

#[inline]
fn planar_distance_sq(a: &Vector3<Real>, b: &Vector3<Real>) -> Real {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Proper intersection of segments a1-a2 and b1-b2, excluding endpoint
/// touches. Returns the parameters along each segment and the point.
fn segment_intersection_2d(
    a1: &Vector3<Real>,
    a2: &Vector3<Real>,
    b1: &Vector3<Real>,
    b2: &Vector3<Real>,
) -> Option<(Real, Real, Vector3<Real>)> {
    let d1 = (a2.x - a1.x, a2.y - a1.y);
    let d2 = (b2.x - b1.x, b2.y - b1.y);
    let denom = d1.0 * d2.1 - d1.1 * d2.0;
    if denom.abs() < 1e-14 {
        return None;
    }
    let e = (b1.x - a1.x, b1.y - a1.y);
    let t = (e.0 * d2.1 - e.1 * d2.0) / denom;
    let u = (e.0 * d1.1 - e.1 * d1.0) / denom;
    const MARGIN: Real = 1e-9;
    if t <= MARGIN || t >= 1.0 - MARGIN || u <= MARGIN || u >= 1.0 - MARGIN {
        return None;
    }
    Some((
        t,
        u,
        Vector3::new(a1.x + t * d1.0, a1.y + t * d1.1, 0.0),
    ))
}

/// Split a closed ring at its self-intersections into simple loops.
///
/// Crossing points are inserted into both segments (flag = OR of the two
/// segments' flags, the combine rule), then loops are peeled off whenever
/// the walk revisits a point.
fn split_at_self_intersections(ring: Vec<EdgeVertex>) -> Vec<Vec<EdgeVertex>> {
    let n = ring.len();
    let mut cuts: Vec<Vec<(Real, EdgeVertex)>> = vec![Vec::new(); n];
    let mut crossed = false;
    for i in 0..n {
        let (a1, a2) = (&ring[i].vertex, &ring[(i + 1) % n].vertex);
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue; // adjacent across the wrap
            }
            let (b1, b2) = (&ring[j].vertex, &ring[(j + 1) % n].vertex);
            if let Some((t, u, p)) = segment_intersection_2d(a1, a2, b1, b2) {
                let flag = ring[i].edge_flag || ring[j].edge_flag;
                let ev = EdgeVertex::new(p, flag);
                cuts[i].push((t, ev));
                cuts[j].push((u, ev));
                crossed = true;
            }
        }
    }
    if !crossed {
        return vec![ring];
    }

    let mut expanded: Vec<EdgeVertex> = Vec::with_capacity(n + 4);
    for (i, ev) in ring.into_iter().enumerate() {
        expanded.push(ev);
        cuts[i].sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        for (_, cut) in cuts[i].drain(..) {
            expanded.push(cut);
        }
    }

    let mut loops = Vec::new();
    let mut path: Vec<EdgeVertex> = Vec::new();
    let mut seen: HashMap<(i64, i64), usize> = HashMap::new();
    for ev in expanded {
        let key = quantize(ev.vertex.x, ev.vertex.y);
        if let Some(&start) = seen.get(&key) {
            let peeled: Vec<EdgeVertex> = path.drain(start..).collect();
            for v in &peeled {
                seen.remove(&quantize(v.vertex.x, v.vertex.y));
            }
            seen.insert(key, path.len());
            path.push(ev);
            if peeled.len() >= 3 {
                loops.push(peeled);
            }
        } else {
            seen.insert(key, path.len());
            path.push(ev);
        }
    }
    if path.len() >= 3 {
        loops.push(path);
    }
    loops
}

/// Signed area of a ring (shoelace, counter-clockwise positive).
fn shoelace(ring: &[EdgeVertex]) -> Real {
    let mut s = 0.0;
    for i in 0..ring.len() {
        let p = &ring[i].vertex;
        let q = &ring[(i + 1) % ring.len()].vertex;
        s += p.x * q.y - q.x * p.y;
    }
    0.5 * s
}

/// Decompose the arrangement of simple rings into disjoint regions labeled
/// with their exact winding count (relative to the `(0, 0, orient)` normal).
/// Regions of count zero are not tracked: anything outside every returned
/// region winds to zero.
fn winding_levels(
    rings: &[Vec<EdgeVertex>],
    orient: Real,
) -> Vec<(i32, MultiPolygon<Real>)> {
    let mut levels: Vec<(i32, MultiPolygon<Real>)> = Vec::new();
    for ring in rings {
        let area = shoelace(ring);
        if area.abs() < 1e-16 {
            continue;
        }
        let s: i32 = if area * orient > 0.0 { 1 } else { -1 };
        let mut ls = to_geo_ring(ring);
        ls.make_ccw_winding();
        let rp = MultiPolygon::new(vec![GeoPolygon::new(ls, vec![])]);

        let mut next: Vec<(i32, MultiPolygon<Real>)> = Vec::new();
        let mut remaining = rp.clone();
        for (c, m) in levels {
            push_level(&mut next, c + s, m.intersection(&rp));
            push_level(&mut next, c, m.difference(&rp));
            remaining = remaining.difference(&m);
        }
        push_level(&mut next, s, remaining);
        levels = next;
    }
    levels
}

fn push_level(levels: &mut Vec<(i32, MultiPolygon<Real>)>, c: i32, m: MultiPolygon<Real>) {
    if c == 0 || m.0.is_empty() {
        return;
    }
    if let Some((_, existing)) = levels.iter_mut().find(|(lc, _)| *lc == c) {
        *existing = existing.union(&m);
    } else {
        levels.push((c, m));
    }
}

fn region_for_rule(
    levels: Vec<(i32, MultiPolygon<Real>)>,
    rule: WindingRule,
) -> MultiPolygon<Real> {
    let mut acc = MultiPolygon::new(Vec::new());
    for (c, m) in levels {
        let keep = match rule {
            WindingRule::Positive => c >= 1,
            WindingRule::AbsGeqTwo => c.abs() >= 2,
        };
        if keep {
            acc = if acc.0.is_empty() { m } else { acc.union(&m) };
        }
    }
    acc
}

fn to_geo_ring(ring: &[EdgeVertex]) -> LineString<Real> {
    let mut coords: Vec<Coord<Real>> = ring
        .iter()
        .map(|ev| Coord { x: ev.vertex.x, y: ev.vertex.y })
        .collect();
    coords.push(coords[0]);
    LineString::new(coords)
}

fn ring_to_subcontour(
    mut ls: LineString<Real>,
    ccw: bool,
    lookup: &FlagLookup,
) -> Option<SubContour> {
    if ccw {
        ls.make_ccw_winding();
    } else {
        ls.make_cw_winding();
    }
    let mut pts = ls.0;
    if pts.len() >= 2 && pts.first() == pts.last() {
        pts.pop();
    }
    let mut vertices: Vec<EdgeVertex> = Vec::with_capacity(pts.len());
    for c in pts {
        let v = Vector3::new(c.x, c.y, 0.0);
        if let Some(prev) = vertices.last() {
            if planar_distance_sq(&prev.vertex, &v) < VERTEX_EPSILON * VERTEX_EPSILON {
                continue;
            }
        }
        vertices.push(EdgeVertex::new(v, lookup.flag_at(c.x, c.y)));
    }
    while vertices.len() > 1
        && planar_distance_sq(&vertices[0].vertex, &vertices[vertices.len() - 1].vertex)
            < VERTEX_EPSILON * VERTEX_EPSILON
    {
        vertices.pop();
    }
    if vertices.len() < 3 || shoelace(&vertices).abs() < 1e-14 {
        return None;
    }
    Some(SubContour { vertices })
}

/// Maps output vertices back to the edge flags of the input contours.
///
/// A vertex that coincides with an input vertex keeps that vertex's flag
/// (OR over coincident inputs). A vertex synthesized on an input segment
/// takes the OR of the flags of every segment it lies on; one matching
/// nothing is fully synthetic and gets `false`.
struct FlagLookup {
    by_vertex: HashMap<(i64, i64), bool>,
    segments: Vec<(Real, Real, Real, Real, bool)>,
}

impl FlagLookup {
    fn build(contours: &[SubContour]) -> Self {
        let mut by_vertex: HashMap<(i64, i64), bool> = HashMap::new();
        let mut segments = Vec::new();
        for sc in contours {
            let n = sc.len();
            for (i, ev) in sc.vertices.iter().enumerate() {
                let entry = by_vertex
                    .entry(quantize(ev.vertex.x, ev.vertex.y))
                    .or_insert(false);
                *entry |= ev.edge_flag;
                let next = &sc.vertices[(i + 1) % n];
                segments.push((
                    ev.vertex.x,
                    ev.vertex.y,
                    next.vertex.x,
                    next.vertex.y,
                    ev.edge_flag || next.edge_flag,
                ));
            }
        }
        FlagLookup { by_vertex, segments }
    }

    fn flag_at(&self, x: Real, y: Real) -> bool {
        let (kx, ky) = quantize(x, y);
        let mut matched = false;
        let mut flag = false;
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(&f) = self.by_vertex.get(&(kx + dx, ky + dy)) {
                    matched = true;
                    flag |= f;
                }
            }
        }
        if matched {
            return flag;
        }
        for &(x1, y1, x2, y2, f) in &self.segments {
            if point_on_segment(x, y, x1, y1, x2, y2) {
                flag |= f;
            }
        }
        flag
    }
}

fn point_on_segment(px: Real, py: Real, x1: Real, y1: Real, x2: Real, y2: Real) -> bool {
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len_sq = dx * dx + dy * dy;
    if len_sq < VERTEX_EPSILON * VERTEX_EPSILON {
        return false;
    }
    let t = ((px - x1) * dx + (py - y1) * dy) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return false;
    }
    let qx = x1 + t * dx - px;
    let qy = y1 + t * dy - py;
    qx * qx + qy * qy < FLAG_GRID * FLAG_GRID
}
