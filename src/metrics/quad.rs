//! Quadrilateral quality primitives.
//!
//! These operate on 4-node faces in 3-space that are expected to be
//! roughly planar; they are the face-level building blocks for the
//! volumetric element metrics.

use nalgebra::{Point3, Vector3};

/// Directed edge vectors of the quad: 0→1, 1→2, 2→3, 3→0.
fn quad_edges(vertices: &[Point3<f64>; 4]) -> [Vector3<f64>; 4] {
    [
        vertices[1] - vertices[0],
        vertices[2] - vertices[1],
        vertices[3] - vertices[2],
        vertices[0] - vertices[3],
    ]
}

/// Signed corner areas of a quadrilateral face.
///
/// The area at corner i is the cross product of the two edges meeting at
/// that corner, projected onto the unit normal at the quad center (built
/// from the principal axes, so it is meaningful for mildly non-planar
/// faces). A non-positive area flags a concave or folded corner.
pub fn signed_corner_areas(vertices: &[Point3<f64>; 4]) -> [f64; 4] {
    let edges = quad_edges(vertices);

    let corner_normals = [
        edges[3].cross(&edges[0]),
        edges[0].cross(&edges[1]),
        edges[1].cross(&edges[2]),
        edges[2].cross(&edges[3]),
    ];

    // Principal axes of the quad
    let axis0 = edges[0] - edges[2];
    let axis1 = edges[1] - edges[3];

    let center_normal = axis0
        .cross(&axis1)
        .try_normalize(0.0)
        .unwrap_or_else(Vector3::zeros);

    [
        center_normal.dot(&corner_normals[0]),
        center_normal.dot(&corner_normals[1]),
        center_normal.dot(&corner_normals[2]),
        center_normal.dot(&corner_normals[3]),
    ]
}

/// Shape score of a quadrilateral face.
///
/// Worst corner of the signed corner area over the sum of the squared
/// lengths of the two edges meeting there, rescaled so a square scores
/// 1.0. Returns 0 for a face with any degenerate or folded corner.
pub fn shape(vertices: &[Point3<f64>; 4]) -> f64 {
    let corner_areas = signed_corner_areas(vertices);

    if corner_areas.iter().any(|&a| a <= f64::MIN_POSITIVE) {
        return 0.0;
    }

    let edges = quad_edges(vertices);
    let length_squared = [
        edges[0].norm_squared(),
        edges[1].norm_squared(),
        edges[2].norm_squared(),
        edges[3].norm_squared(),
    ];

    let min_quotient = (corner_areas[0] / (length_squared[0] + length_squared[3]))
        .min(corner_areas[1] / (length_squared[1] + length_squared[0]))
        .min(corner_areas[2] / (length_squared[2] + length_squared[1]))
        .min(corner_areas[3] / (length_squared[3] + length_squared[2]));

    (2.0 * min_quotient).max(0.0)
}
