//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::Vector3;
use octsphere::OctahedronPolygon;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

pub fn unit(x: f64, y: f64, z: f64) -> Vector3<f64> {
    Vector3::new(x, y, z).normalize()
}

/// Closed contour of `n` points at angular distance `radius_deg` around
/// `axis`, counter-clockwise as seen from outside the sphere (so the
/// enclosed region is the cap around the axis).
pub fn circle_contour(axis: Vector3<f64>, radius_deg: f64, n: usize) -> Vec<Vector3<f64>> {
    let axis = axis.normalize();
    let seed = if axis.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let e1 = (seed - axis * seed.dot(&axis)).normalize();
    let e2 = axis.cross(&e1);
    let r = radius_deg.to_radians();
    (0..n)
        .map(|k| {
            let t = k as f64 / n as f64 * std::f64::consts::TAU;
            (axis * r.cos() + (e1 * t.cos() + e2 * t.sin()) * r.sin()).normalize()
        })
        .collect()
}

/// Polygonal approximation of a spherical cap.
pub fn cap_region(axis: Vector3<f64>, radius_deg: f64, n: usize) -> OctahedronPolygon {
    OctahedronPolygon::from_contour(&circle_contour(axis, radius_deg, n))
}

/// `count` uniformly distributed unit vectors from a fixed seed.
pub fn sample_sphere(seed: u64, count: usize) -> Vec<Vector3<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let z: f64 = rng.gen_range(-1.0..1.0);
            let phi: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
            let r = (1.0 - z * z).sqrt();
            Vector3::new(r * phi.cos(), r * phi.sin(), z)
        })
        .collect()
}
