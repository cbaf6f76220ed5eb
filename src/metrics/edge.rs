//! Edge quality primitives.

use nalgebra::Point3;

/// Length of a 2-node edge element: the distance between its end nodes.
pub fn length(vertices: &[Point3<f64>; 2]) -> f64 {
    (vertices[1] - vertices[0]).norm()
}
