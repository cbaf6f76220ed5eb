//! Tetrahedron quality primitives.

use nalgebra::Point3;

/// Jacobian of a 4-node tetrahedron.
///
/// Determinant of the map from the reference element to the physical
/// element, evaluated from the three edge vectors leaving node 0:
///
/// det(J) = (v1-v0) · ((v2-v0) × (v3-v0))
///
/// det(J) > 0: valid element
/// det(J) = 0: degenerate (zero volume)
/// det(J) < 0: inverted element
pub fn jacobian(vertices: &[Point3<f64>; 4]) -> f64 {
    let e1 = vertices[1] - vertices[0];
    let e2 = vertices[2] - vertices[0];
    let e3 = vertices[3] - vertices[0];

    e1.dot(&e2.cross(&e3))
}

/// Signed volume of a 4-node tetrahedron, one sixth of its Jacobian.
pub fn volume(vertices: &[Point3<f64>; 4]) -> f64 {
    jacobian(vertices) / 6.0
}
