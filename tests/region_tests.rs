mod support;

use nalgebra::Vector3;
use octsphere::OctahedronPolygon;
use std::f64::consts::PI;
use support::{approx_eq, cap_region, sample_sphere, unit};

#[test]
fn wedge_triangle_near_the_pole() {
    // Two corners just above the equator plus the pole; the whole interior
    // sits in the first octant.
    let region = OctahedronPolygon::from_contour(&[
        unit(1.0, 0.0, 0.01),
        unit(0.0, 1.0, 0.01),
        unit(0.0, 0.0, 1.0),
    ]);
    assert!(!region.is_empty());
    assert!(!region.sides()[0].is_empty());
    for i in 1..8 {
        assert!(region.sides()[i].is_empty(), "face {i} should stay empty");
    }
    // Girard: a 90 degree polar angle plus two slightly obtuse base angles.
    assert!(region.area() > 1.5 && region.area() < 1.65);

    let p = region.point_inside().unwrap();
    assert!(p.z > 0.0);
    assert!(region.contains_point(&p));
    assert!(region.contains_point(&unit(0.5, 0.5, 0.5)));
    assert!(!region.contains_point(&unit(0.5, 0.5, -0.5)));
    assert!(!region.contains_point(&unit(-0.5, 0.5, 0.5)));
}

#[test]
fn polar_cap_spans_the_four_northern_faces() {
    let region = cap_region(Vector3::z(), 25.0, 48);
    for i in [0usize, 2, 4, 6] {
        assert!(!region.sides()[i].is_empty(), "face {i} should hold a piece");
    }
    for i in [1usize, 3, 5, 7] {
        assert!(region.sides()[i].is_empty(), "face {i} should stay empty");
    }

    let p = region.point_inside().unwrap();
    assert!(p.z > 0.9);

    let expected = 2.0 * PI * (1.0 - 25f64.to_radians().cos());
    assert!(approx_eq(region.area(), expected, expected * 0.01));

    assert!(region.contains_point(&unit(0.1, 0.05, 0.99)));
    assert!(!region.contains_point(&unit(0.6, 0.1, 0.8)));
}

#[test]
fn quadrant_crossing_contour_closes_around_the_pole() {
    let corners = [
        unit(0.8, 0.6, 0.1),
        unit(-0.6, 0.8, 0.1),
        unit(-0.8, -0.6, 0.1),
        unit(0.6, -0.8, 0.1),
    ];
    let region = OctahedronPolygon::from_contour(&corners);
    for i in [0usize, 2, 4, 6] {
        assert!(!region.sides()[i].is_empty(), "face {i} should hold a piece");
    }
    for i in [1usize, 3, 5, 7] {
        assert!(region.sides()[i].is_empty(), "face {i} should stay empty");
    }

    // Cap-like area: corners sit at colatitude ~84.3 deg and the arcs
    // between them bulge poleward to ~82 deg.
    assert!(region.area() > 2.0 * PI * 0.85 && region.area() < 2.0 * PI * 0.901);

    // The four user corners appear on the outline; the synthetic pole
    // closure does not.
    let outline = region.outline_vertex_array();
    assert!(!outline.is_empty());
    for c in &corners {
        assert!(
            outline.iter().any(|v| (v - c).norm() < 1e-6),
            "corner missing from outline"
        );
    }
    assert!(outline.iter().all(|v| (v - Vector3::z()).norm() > 1e-3));
}

#[test]
fn fill_triangles_wind_outward() {
    let region = cap_region(unit(0.5, -0.6, 0.4), 20.0, 40);
    let fill = region.fill_vertex_array();
    assert_eq!(fill.len() % 3, 0);
    assert!(!fill.is_empty());
    for t in fill.chunks_exact(3) {
        let n = (t[1] - t[0]).cross(&(t[2] - t[0]));
        assert!(n.dot(&t[0]) > -1e-12, "triangle wound inward");
    }
}

#[test]
fn sampled_fraction_matches_area() {
    let region = cap_region(unit(0.3, -0.4, 0.85), 30.0, 64);
    let samples = sample_sphere(7, 10_000);
    let inside = samples.iter().filter(|p| region.contains_point(p)).count();
    let frac = inside as f64 / samples.len() as f64;
    let expected = region.area() / (4.0 * PI);
    let sigma = (expected * (1.0 - expected) / samples.len() as f64).sqrt();
    assert!(
        (frac - expected).abs() < 4.0 * sigma,
        "sampled {frac}, expected {expected} (sigma {sigma})"
    );
}

#[test]
fn universal_invariants_hold() {
    let regions = [
        OctahedronPolygon::empty(),
        cap_region(Vector3::z(), 20.0, 32),
        cap_region(unit(-0.6, 0.7, -0.3), 45.0, 48),
        OctahedronPolygon::full_sky(),
    ];
    for r in &regions {
        let area = r.area();
        assert!(area >= 0.0 && area <= 4.0 * PI + 1e-9);
        assert_eq!(r.intersects(r), !r.is_empty());
        assert!(r.contains(r));
    }
}
