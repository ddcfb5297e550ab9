#![forbid(unsafe_code)]

//! Spherical-polygon boolean geometry on an octahedral tessellation of the
//! unit sphere.
//!
//! Arbitrary regions on the sphere (sky regions, survey footprints,
//! field-of-view masks) are projected onto the eight triangular faces of an
//! inscribed octahedron; all polygon work happens as planar 2D tessellation
//! per face and results are lifted back to unit vectors. Regions support
//! union, intersection, subtraction, containment and area queries with
//! astronomy-grade numerical behavior.
//!
//! # Example
//!
//! ```
//! use nalgebra::Vector3;
//! use octsphere::OctahedronPolygon;
//!
//! // A triangular region in the first octant, counter-clockwise as seen
//! // from outside the sphere.
//! let region = OctahedronPolygon::from_contour(&[
//!     Vector3::new(0.9f64, 0.3, 0.3).normalize(),
//!     Vector3::new(0.3, 0.9, 0.3).normalize(),
//!     Vector3::new(0.3, 0.3, 0.9).normalize(),
//! ]);
//!
//! assert!(!region.is_empty());
//! let p = region.point_inside().unwrap();
//! assert!(region.contains_point(&p));
//! assert!(region.area() > 0.0);
//! ```

pub mod cap;
pub mod contour;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod octant;
pub mod polygon;
pub mod splitter;
pub mod tess;

pub use contour::{EdgeVertex, SubContour};
pub use errors::{DecodeError, RegionError};
pub use octant::{side_number, SIDE_DIRECTIONS};
pub use polygon::OctahedronPolygon;
pub use splitter::great_circle_intersection;
pub use tess::WindingRule;
