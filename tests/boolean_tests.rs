mod support;

use nalgebra::Vector3;
use octsphere::OctahedronPolygon;
use std::f64::consts::PI;
use support::{approx_eq, cap_region, sample_sphere, unit};

#[test]
fn disjoint_caps_do_not_interact() {
    let a = cap_region(Vector3::x(), 10.0, 32);
    let b = cap_region(-Vector3::x(), 10.0, 32);

    assert!(!a.intersects(&b));
    assert!(a.intersection(&b).is_empty());
    assert!(!a.contains(&b));

    // The operands land on complementary face sets, so the union area is
    // exactly additive.
    let u = a.union(&b);
    assert!(approx_eq(u.area(), a.area() + b.area(), 1e-9));
    assert!(u.contains(&a));
    assert!(u.contains(&b));
}

#[test]
fn nested_squares_contain_each_other_one_way() {
    let outer = cap_region(Vector3::z(), 20.0, 4);
    let inner = cap_region(Vector3::z(), 10.0, 4);

    assert!(outer.contains(&inner));
    assert!(!inner.contains(&outer));

    let ring = outer.difference(&inner);
    assert!(!ring.is_empty());
    assert!(approx_eq(ring.area(), outer.area() - inner.area(), 1e-6));
}

#[test]
fn subtraction_leaves_a_hole() {
    let outer = cap_region(Vector3::z(), 30.0, 64);
    let inner = cap_region(Vector3::z(), 10.0, 64);
    let ring = outer.difference(&inner);

    assert!(!ring.contains_point(&Vector3::z()));
    // 20 degrees from the axis, between the two boundaries.
    let colat = 20f64.to_radians();
    let p = Vector3::new(
        colat.sin() * 30f64.to_radians().cos(),
        colat.sin() * 30f64.to_radians().sin(),
        colat.cos(),
    );
    assert!(ring.contains_point(&p));
    assert!(approx_eq(ring.area(), outer.area() - inner.area(), 1e-6));

    // Both the outer and the reversed inner boundary survive as outlines.
    let outline = ring.outline_vertex_array();
    let cos10 = 10f64.to_radians().cos();
    let cos30 = 30f64.to_radians().cos();
    assert!(outline.iter().any(|v| (v.z - cos10).abs() < 1e-3));
    assert!(outline.iter().any(|v| (v.z - cos30).abs() < 1e-3));
}

#[test]
fn boolean_ops_are_idempotent() {
    let r = cap_region(unit(1.0, 0.4, 0.3), 18.0, 40);

    let u = r.union(&r);
    assert!(approx_eq(u.area(), r.area(), 1e-6));
    let i = r.intersection(&r);
    assert!(approx_eq(i.area(), r.area(), 1e-6));
    let d = r.difference(&r);
    assert!(d.is_empty());
}

#[test]
fn boolean_ops_commute() {
    let r = cap_region(unit(0.9, 0.2, 0.4), 15.0, 36);
    let s = cap_region(unit(0.7, 0.5, 0.5), 12.0, 36);
    assert!(r.intersects(&s));

    let rs = r.union(&s);
    let sr = s.union(&r);
    assert!(approx_eq(rs.area(), sr.area(), 1e-6));

    let ri = r.intersection(&s);
    let ir = s.intersection(&r);
    assert!(approx_eq(ri.area(), ir.area(), 1e-6));

    for p in sample_sphere(11, 400) {
        assert_eq!(rs.contains_point(&p), sr.contains_point(&p));
        assert_eq!(ri.contains_point(&p), ir.contains_point(&p));
    }
}

#[test]
fn union_grows_and_intersection_shrinks() {
    let r = cap_region(unit(0.9, 0.2, 0.4), 15.0, 36);
    let s = cap_region(unit(0.7, 0.5, 0.5), 12.0, 36);

    let u = r.union(&s);
    let i = r.intersection(&s);
    assert!(u.area() >= r.area().max(s.area()) - 1e-9);
    assert!(i.area() <= r.area().min(s.area()) + 1e-9);
    assert!(approx_eq(u.area() + i.area(), r.area() + s.area(), 1e-6));
}

#[test]
fn partial_overlap_subtraction() {
    let r = cap_region(unit(0.9, 0.2, 0.4), 15.0, 36);
    let s = cap_region(unit(0.7, 0.5, 0.5), 12.0, 36);

    let d = r.difference(&s);
    assert!(approx_eq(d.area(), r.area() - r.intersection(&s).area(), 1e-6));
    for p in sample_sphere(23, 400) {
        let expected = r.contains_point(&p) && !s.contains_point(&p);
        assert_eq!(d.contains_point(&p), expected);
    }
}

#[test]
fn self_intersecting_bowtie_survives() {
    // Degenerate by design: one edge joins two antipodal vertices. The
    // kernel clamps rather than rejects, and whatever region comes out
    // must still behave like a region.
    let bowtie = OctahedronPolygon::from_contour(&[
        unit(1.0, 0.0, 0.0),
        unit(0.0, 1.0, 0.0),
        unit(0.0, -1.0, 0.0),
        unit(1.0, 0.0, 0.01),
    ]);
    let area = bowtie.area();
    assert!((0.0..=4.0 * PI + 1e-9).contains(&area));
    assert!(bowtie.contains(&bowtie));
    let i = bowtie.intersection(&bowtie);
    assert!(approx_eq(i.area(), area, 1e-6));
}

#[test]
fn subtracting_everything_empties_the_region() {
    let r = cap_region(unit(0.2, 0.9, 0.4), 14.0, 32);
    let sky = OctahedronPolygon::full_sky();
    assert!(sky.contains(&r));
    let gone = r.difference(&sky);
    assert!(gone.is_empty() || gone.area() < 1e-9);
}
