//! The spherical region type: eight per-face contour sets, cached fill and
//! outline meshes, and a bounding cap.

use crate::cap::{cap_contains, caps_intersect, compute_bounding_cap, EMPTY_CAP_D};
use crate::contour::{EdgeVertex, SubContour};
use crate::errors::RegionError;
use crate::float_types::{Real, AREA_EPSILON, PI, PLANE_EPSILON, VERTEX_EPSILON};
use crate::octant::{
    is_triangle_convex_positive_2d, project_on_octahedron, side_number, unproject_octahedron,
    SIDE_DIRECTIONS,
};
use crate::splitter::split_contour_by_plane;
use crate::tess::{boundary_loops, fill_triangles, WindingRule};
use nalgebra::Vector3;

/// Tessellation normal direction (±z) for a face: the two parities use
/// opposite normals so projected contours keep a positive winding.
#[inline]
pub(crate) fn face_orient(side: usize) -> Real {
    if side % 2 == 0 { 1.0 } else { -1.0 }
}

/// An arbitrary region on the unit sphere, represented as planar polygon
/// sets on the eight faces of an inscribed octahedron.
///
/// Contours are given as unit vectors, counter-clockwise as seen from
/// outside the sphere around the region they enclose. The region supports
/// in-place boolean operations, point and region containment, area, and
/// (de)serialization; after every mutation the cached triangle fill, the
/// outline segments and the bounding cap are consistent with the contour
/// sets.
#[derive(Debug, Clone)]
pub struct OctahedronPolygon {
    /// Per-octant sub-contour lists; the canonical representation.
    pub(crate) sides: [Vec<SubContour>; 8],
    /// Spherical triangles covering the region, in groups of three,
    /// counter-clockwise seen from outside the sphere.
    fill_cache: Vec<Vector3<Real>>,
    /// Outline segments in pairs, real polygon edges only.
    outline_cache: Vec<Vector3<Real>>,
    cap_n: Vector3<Real>,
    cap_d: Real,
}

impl Default for OctahedronPolygon {
    fn default() -> Self {
        OctahedronPolygon {
            sides: Default::default(),
            fill_cache: Vec::new(),
            outline_cache: Vec::new(),
            cap_n: Vector3::x(),
            cap_d: EMPTY_CAP_D,
        }
    }
}

impl OctahedronPolygon {
    /// The empty region.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Region enclosed by a single closed contour of unit vectors.
    pub fn from_contour(contour: &[Vector3<Real>]) -> Self {
        Self::from_sub_contour(SubContour::new(contour, true))
    }

    /// Region enclosed by several closed contours. Overlaps are resolved
    /// with positive winding, so disjoint contours accumulate and nested
    /// reversed contours cut holes.
    pub fn from_contours(contours: &[Vec<Vector3<Real>>]) -> Self {
        let mut poly = Self::default();
        for c in contours {
            poly.append_sub_contour(&SubContour::new(c, true));
        }
        poly.tesselate(WindingRule::Positive);
        poly.update_vertex_array();
        poly
    }

    /// Region enclosed by an already-built sub-contour (open paths keep
    /// their endpoint flags cleared).
    pub fn from_sub_contour(contour: SubContour) -> Self {
        let mut poly = Self::default();
        poly.append_sub_contour(&contour);
        poly.tesselate(WindingRule::Positive);
        poly.update_vertex_array();
        poly
    }

    /// The whole celestial sphere: every octant holds its own face
    /// triangle, all edges flagged as real outline.
    pub fn full_sky() -> Self {
        let mut poly = Self::default();
        for (i, n) in SIDE_DIRECTIONS.iter().enumerate() {
            // Face corners after projection: the z corner lands on the
            // origin of the face plane.
            let mut vertices = vec![
                EdgeVertex::new(Vector3::new(n.x, 0.0, 0.0), true),
                EdgeVertex::new(Vector3::new(0.0, n.y, 0.0), true),
                EdgeVertex::new(Vector3::new(0.0, 0.0, 0.0), true),
            ];
            // Doubled signed area of that corner triangle is n.x * n.y;
            // wind it positively for the face normal.
            if n.x * n.y * face_orient(i) < 0.0 {
                vertices.reverse();
            }
            poly.sides[i].push(SubContour { vertices });
        }
        poly.update_vertex_array();
        poly
    }

    /// Split a spherical contour across the octahedron and append the
    /// face-local pieces to the contour sets. Caches are not rebuilt.
    pub(crate) fn append_sub_contour(&mut self, contour: &SubContour) {
        if contour.is_empty() {
            return;
        }

        // Split on y = 0, then x = 0, into the four (x, y) sign quadrants.
        let mut split_y: [Vec<SubContour>; 2] = Default::default();
        split_contour_by_plane(1, contour, &mut split_y);
        let mut quadrants: [Vec<SubContour>; 4] = Default::default();
        for (half, base) in split_y.iter().zip([0usize, 2]) {
            let mut tmp: [Vec<SubContour>; 2] = Default::default();
            for sc in half {
                split_contour_by_plane(0, sc, &mut tmp);
            }
            let [xp, xn] = tmp;
            quadrants[base] = xp;
            quadrants[base + 1] = xn;
        }

        let mut result: [Vec<SubContour>; 8] = Default::default();
        for (q, contours) in quadrants.iter_mut().enumerate() {
            for sc in contours.iter_mut() {
                // Pieces that were actually cut may need a pole to close
                // them around the quadrant corner where the two meridian
                // cuts meet.
                let last = match sc.vertices.last() {
                    Some(last) if !last.edge_flag => *last,
                    _ => continue,
                };
                let v = sc.vertices[0].vertex.cross(&last.vertex);
                if v.z > VERTEX_EPSILON {
                    sc.vertices
                        .push(EdgeVertex::new(Vector3::new(0.0, 0.0, 1.0), false));
                } else if v.z < -VERTEX_EPSILON {
                    sc.vertices
                        .push(EdgeVertex::new(Vector3::new(0.0, 0.0, -1.0), false));
                } else {
                    // The piece already closes along the meridian it
                    // started on.
                    debug_assert!(v.x.abs() < PLANE_EPSILON || v.y.abs() < PLANE_EPSILON);
                }
            }
            let mut halves: [Vec<SubContour>; 2] = Default::default();
            for sc in contours.iter() {
                split_contour_by_plane(2, sc, &mut halves);
            }
            let [zp, zn] = halves;
            result[q * 2] = zp;
            result[q * 2 + 1] = zn;
        }

        project_on_octahedron(&mut result);
        for (side, contours) in result.into_iter().enumerate() {
            self.sides[side].extend(contours);
        }
    }

    fn append(&mut self, other: &OctahedronPolygon) {
        for i in 0..8 {
            self.sides[i].extend(other.sides[i].iter().cloned());
        }
    }

    fn append_reversed(&mut self, other: &OctahedronPolygon) {
        for i in 0..8 {
            self.sides[i]
                .extend(other.sides[i].iter().map(SubContour::reversed));
        }
    }

    /// Canonicalization pass: replace every face's contour set with the
    /// boundary loops of the region selected by `rule`.
    pub(crate) fn tesselate(&mut self, rule: WindingRule) {
        for (i, side) in self.sides.iter_mut().enumerate() {
            if side.is_empty() {
                continue;
            }
            *side = boundary_loops(side, face_orient(i), rule);
        }
    }

    /// Rebuild the fill triangles, the outline segments and the bounding
    /// cap from the contour sets. Must run before a mutated region is
    /// handed back to the caller.
    pub(crate) fn update_vertex_array(&mut self) {
        self.fill_cache.clear();
        self.outline_cache.clear();

        for i in 0..8 {
            if self.sides[i].is_empty() {
                continue;
            }
            let n = &SIDE_DIRECTIONS[i];

            let triangles = fill_triangles(&self.sides[i], face_orient(i));
            debug_assert_eq!(triangles.len() % 3, 0);
            for t in triangles.chunks_exact(3) {
                let positive = if i % 2 == 0 {
                    is_triangle_convex_positive_2d(&t[0], &t[1], &t[2])
                } else {
                    is_triangle_convex_positive_2d(&t[2], &t[1], &t[0])
                };
                if !positive {
                    log::debug!("side {i}: dropping a triangle wound against the face normal");
                    continue;
                }
                for &v in t {
                    self.fill_cache.push(unproject_octahedron(v, n));
                }
            }

            // Outline segments, dropping runs where both endpoints are
            // synthetic. The closing segment is tested like any other.
            for sc in &self.sides[i] {
                let lifted: Vec<(Vector3<Real>, bool)> = sc
                    .vertices
                    .iter()
                    .map(|ev| (unproject_octahedron(ev.vertex, n), ev.edge_flag))
                    .collect();
                for j in 0..lifted.len() {
                    let (v, flag) = lifted[j];
                    let (w, next_flag) = lifted[(j + 1) % lifted.len()];
                    if flag || next_flag {
                        self.outline_cache.push(v);
                        self.outline_cache.push(w);
                    }
                }
            }
        }

        let (cap_n, cap_d) = compute_bounding_cap(&self.outline_cache);
        self.cap_n = cap_n;
        self.cap_d = cap_d;

        #[cfg(debug_assertions)]
        for t in self.fill_cache.chunks_exact(3) {
            // Counter-clockwise from outside: the triangle normal points
            // away from the sphere center.
            debug_assert!((t[1] - t[0]).cross(&(t[2] - t[0])).dot(&t[0]) > -1e-12);
        }
    }

    /// Grow this region to the union with `other`.
    pub fn union_in_place(&mut self, other: &OctahedronPolygon) {
        let intersects = caps_intersect(&self.cap_n, self.cap_d, &other.cap_n, other.cap_d);
        self.append(other);
        if intersects {
            self.tesselate(WindingRule::Positive);
        }
        self.update_vertex_array();
    }

    /// Shrink this region to the intersection with `other`. Disjoint
    /// bounding caps short-circuit straight to the empty region.
    pub fn intersection_in_place(&mut self, other: &OctahedronPolygon) {
        if !caps_intersect(&self.cap_n, self.cap_d, &other.cap_n, other.cap_d) {
            self.sides = Default::default();
            self.update_vertex_array();
            return;
        }
        self.append(other);
        self.tesselate(WindingRule::AbsGeqTwo);
        self.update_vertex_array();
    }

    /// Remove `other` from this region. Disjoint bounding caps make this
    /// a no-op.
    pub fn subtraction_in_place(&mut self, other: &OctahedronPolygon) {
        if !caps_intersect(&self.cap_n, self.cap_d, &other.cap_n, other.cap_d) {
            return;
        }
        self.append_reversed(other);
        self.tesselate(WindingRule::Positive);
        self.update_vertex_array();
    }

    /// Return a new region covering both operands.
    pub fn union(&self, other: &OctahedronPolygon) -> OctahedronPolygon {
        let mut res = self.clone();
        res.union_in_place(other);
        res
    }

    /// Return a new region covering the overlap of the operands.
    pub fn intersection(&self, other: &OctahedronPolygon) -> OctahedronPolygon {
        let mut res = self.clone();
        res.intersection_in_place(other);
        res
    }

    /// Return a new region covering this operand minus the other.
    pub fn difference(&self, other: &OctahedronPolygon) -> OctahedronPolygon {
        let mut res = self.clone();
        res.subtraction_in_place(other);
        res
    }

    /// Region area in steradians, by Girard's theorem over the fill
    /// triangles.
    pub fn area(&self) -> Real {
        let mut area = 0.0;
        for t in self.fill_cache.chunks_exact(3) {
            let e1 = t[0].cross(&t[1]);
            let e2 = t[1].cross(&t[2]);
            let e3 = t[2].cross(&t[0]);
            area += 2.0 * PI - e1.angle(&e2) - e2.angle(&e3) - e3.angle(&e1);
        }
        area
    }

    /// A point in the interior of the region.
    pub fn point_inside(&self) -> Result<Vector3<Real>, RegionError> {
        if self.fill_cache.len() < 3 {
            return Err(RegionError::EmptyRegion);
        }
        Ok((self.fill_cache[0] + self.fill_cache[1] + self.fill_cache[2]).normalize())
    }

    /// Does the region contain the unit vector `p`?
    pub fn contains_point(&self, p: &Vector3<Real>) -> bool {
        if self.sides[side_number(p)].is_empty() {
            return false;
        }
        self.fill_cache.chunks_exact(3).any(|t| {
            side_half_space_contains(&t[0], &t[1], p)
                && side_half_space_contains(&t[1], &t[2], p)
                && side_half_space_contains(&t[2], &t[0], p)
        })
    }

    /// Does the region contain the whole of `other`? Decided by a cap test
    /// first, then by checking that removing this region from `other`
    /// leaves nothing behind (up to the area-equality tolerance).
    pub fn contains(&self, other: &OctahedronPolygon) -> bool {
        if !cap_contains(&self.cap_n, self.cap_d, &other.cap_n, other.cap_d) {
            return false;
        }
        let mut tmp = other.clone();
        tmp.subtraction_in_place(self);
        tmp.is_empty() || tmp.area() < AREA_EPSILON
    }

    /// Do the two regions share any area?
    pub fn intersects(&self, other: &OctahedronPolygon) -> bool {
        if !caps_intersect(&self.cap_n, self.cap_d, &other.cap_n, other.cap_d) {
            return false;
        }
        let mut tmp = self.clone();
        tmp.intersection_in_place(other);
        !tmp.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.sides.iter().all(Vec::is_empty)
    }

    /// The cached fill triangles as a flat vertex array (groups of three).
    pub fn fill_vertex_array(&self) -> &[Vector3<Real>] {
        &self.fill_cache
    }

    /// The cached outline segments as a flat vertex array (groups of two).
    pub fn outline_vertex_array(&self) -> &[Vector3<Real>] {
        &self.outline_cache
    }

    /// Bounding spherical cap `(axis, minimum dot product)` enclosing the
    /// region.
    pub fn bounding_cap(&self) -> (Vector3<Real>, Real) {
        (self.cap_n, self.cap_d)
    }

    /// The per-octant contour sets.
    pub fn sides(&self) -> &[Vec<SubContour>; 8] {
        &self.sides
    }
}

/// Is `p` on the interior side of the oriented great-circle plane through
/// the origin, `a` and `b`?
#[inline]
fn side_half_space_contains(a: &Vector3<Real>, b: &Vector3<Real>, p: &Vector3<Real>) -> bool {
    a.cross(b).dot(p) >= 0.0
}
