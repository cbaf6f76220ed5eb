//! Quality metrics for 5-node pyramid elements.
//!
//! Node ordering: nodes 0-3 form the quadrilateral base, traversed so that
//! node i is adjacent to node i+1 (mod 4) and wound counter-clockwise when
//! viewed from node 4, the apex. With that winding the volume and Jacobian
//! metrics are positive on a well-formed element. Base planarity is not
//! checked: a warped base degrades the scores instead of erroring.
//!
//! A pyramid has no single canonical simplicial decomposition, so each
//! metric carries its own:
//!
//! 1. **Volume** splits the pyramid into two tetrahedra whose signed
//!    volumes sum to the pyramid volume for any base convexity.
//! 2. **Jacobian / scaled Jacobian** probe four corner-local tetrahedra
//!    and keep the worst corner.
//! 3. **Shape** works from the faces, the apex offset and the edges.
//!
//! All functions here are pure: stack-local scratch only, no caching, no
//! shared state, constant work per call. They are safe to call from any
//! number of threads at once.

use bitflags::bitflags;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

use super::{quad, tet};

/// Corner normalization factor: cos 45°, the corner angle of the right
/// pyramid with a square unit base and apex height 1/√2. Dividing by it
/// calibrates that ideal corner to a scaled Jacobian of exactly 1.
const SQRT2_HALF: f64 = std::f64::consts::FRAC_1_SQRT_2;

bitflags! {
    /// Metric families selectable in a quality request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PyramidMetrics: u32 {
        const VOLUME = 1 << 0;
        const JACOBIAN = 1 << 1;
        const SCALED_JACOBIAN = 1 << 2;
        const SHAPE = 1 << 3;
    }
}

/// Result record for a quality request, one field per metric family.
///
/// Zero-initialized; a dispatch call writes only the fields it computes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PyramidQuality {
    pub volume: f64,
    pub jacobian: f64,
    pub scaled_jacobian: f64,
    pub shape: f64,
}

/// Geometric degeneracy detected while evaluating a metric.
///
/// The plain metric entry points collapse these to the historical 0.0
/// sentinel; the `try_` variants keep them distinguishable from a
/// legitimately zero score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Degeneracy {
    /// An edge is shorter than the smallest positive normal float.
    #[error("element edge collapsed to zero length")]
    CollapsedEdge,
    /// The base quadrilateral is flat or has a folded corner.
    #[error("degenerate base quadrilateral")]
    DegenerateBase,
    /// The apex lies on the base plane or behind the outward base normal.
    #[error("apex on or behind the base plane")]
    DegenerateApex,
}

/// Two tetrahedra that tile the pyramid: (v0,v1,v3,v4) and (v2,v3,v1,v4).
///
/// Both tets share the base diagonal v1-v3, so their signed volumes sum to
/// the pyramid volume whether the base quad is convex or not.
pub fn volume_tets(coordinates: &[Point3<f64>; 5]) -> [[Point3<f64>; 4]; 2] {
    let c = coordinates;
    [[c[0], c[1], c[3], c[4]], [c[2], c[3], c[1], c[4]]]
}

/// Four corner tetrahedra for the Jacobian metrics.
///
/// Not a disjoint partition of the pyramid: each tet is a local probe of
/// the frame spanned at one base corner.
pub fn corner_tets(coordinates: &[Point3<f64>; 5]) -> [[Point3<f64>; 4]; 4] {
    let c = coordinates;
    [
        [c[0], c[1], c[2], c[4]],
        [c[0], c[2], c[3], c[4]],
        [c[0], c[1], c[3], c[4]],
        [c[1], c[2], c[3], c[4]],
    ]
}

/// The five faces: the quad base and the four apex-adjacent triangles.
pub fn faces(coordinates: &[Point3<f64>; 5]) -> ([Point3<f64>; 4], [[Point3<f64>; 3]; 4]) {
    let c = coordinates;
    (
        [c[0], c[1], c[2], c[3]],
        [
            [c[0], c[1], c[4]],
            [c[1], c[2], c[4]],
            [c[2], c[3], c[4]],
            [c[3], c[0], c[4]],
        ],
    )
}

/// Directed edge vectors: base edges 0→1, 1→2, 2→3, 3→0, then lateral
/// edges 0→4, 1→4, 2→4, 3→4.
pub fn edge_vectors(coordinates: &[Point3<f64>; 5]) -> [Vector3<f64>; 8] {
    let c = coordinates;
    [
        c[1] - c[0],
        c[2] - c[1],
        c[3] - c[2],
        c[0] - c[3],
        c[4] - c[0],
        c[4] - c[1],
        c[4] - c[2],
        c[4] - c[3],
    ]
}

/// Length of the longest of the eight pyramid edges.
fn largest_edge(coordinates: &[Point3<f64>; 5]) -> f64 {
    edge_vectors(coordinates)
        .iter()
        .map(|e| e.norm_squared())
        .fold(0.0, f64::max)
        .sqrt()
}

/// Apex offset relative to the base plane.
///
/// Returns the distance from the apex to the base centroid measured along
/// the base normal, and the cosine of the angle between the full apex
/// offset and that normal. Both go non-positive when the apex sits on or
/// behind the base plane.
fn apex_offset(coordinates: &[Point3<f64>; 5]) -> (f64, f64) {
    let c = coordinates;
    let centroid = Point3::from((c[0].coords + c[1].coords + c[2].coords + c[3].coords) / 4.0);

    let t1 = c[1] - c[0];
    let t2 = c[3] - c[0];
    let normal = t1.cross(&t2);

    let pq = c[4] - centroid;
    let distance = pq.dot(&normal) / normal.norm();
    let cos_angle = distance / pq.norm();

    (distance, cos_angle)
}

/// Volume of the pyramid.
///
/// Sum of the signed volumes of the two decomposition tetrahedra, each one
/// sixth of the scalar triple product of its edge vectors. Negative volume
/// indicates a clockwise (inverted) base winding.
pub fn volume(coordinates: &[Point3<f64>; 5]) -> f64 {
    let [tet_a, tet_b] = volume_tets(coordinates);
    tet::volume(&tet_a) + tet::volume(&tet_b)
}

/// Raw Jacobian bound: the minimum tetrahedron Jacobian over the four
/// corner tets.
///
/// The worst-corner convention makes the element only as good as its most
/// distorted corner. Units are length³, same as the tetrahedron Jacobian;
/// no normalization and no degeneracy guard.
pub fn jacobian(coordinates: &[Point3<f64>; 5]) -> f64 {
    corner_tets(coordinates)
        .iter()
        .map(tet::jacobian)
        .fold(f64::INFINITY, f64::min)
}

/// Scaled Jacobian with the degeneracy outcome kept explicit.
///
/// Each corner Jacobian is normalized by the lengths of the three edges
/// meeting at the probed corner and by cos 45°, so the ideal right-pyramid
/// corner scores exactly 1.0. Scores fall toward 0 as the element flattens
/// or skews and go negative when it inverts. Any edge collapsed below the
/// smallest positive normal float makes every length ratio meaningless and
/// is reported as [`Degeneracy::CollapsedEdge`].
pub fn try_scaled_jacobian(coordinates: &[Point3<f64>; 5]) -> Result<f64, Degeneracy> {
    let tets = corner_tets(coordinates);
    let j1 = tet::jacobian(&tets[0]);
    let j2 = tet::jacobian(&tets[1]);
    let j3 = tet::jacobian(&tets[2]);
    let j4 = tet::jacobian(&tets[3]);

    let edges = edge_vectors(coordinates);
    let mut length = [0.0_f64; 8];
    for (l, e) in length.iter_mut().zip(&edges) {
        *l = e.norm();
    }

    if length.iter().any(|&l| l < f64::MIN_POSITIVE) {
        return Err(Degeneracy::CollapsedEdge);
    }

    // Two base edges and one lateral edge meet at each probed corner.
    let ratios = [
        j1 / (length[0] * length[1] * length[5] * SQRT2_HALF),
        j2 / (length[2] * length[3] * length[7] * SQRT2_HALF),
        j3 / (length[0] * length[3] * length[4] * SQRT2_HALF),
        j4 / (length[1] * length[2] * length[6] * SQRT2_HALF),
    ];

    Ok(ratios.into_iter().fold(f64::INFINITY, f64::min))
}

/// Scaled Jacobian with the 0.0 sentinel for degenerate input.
pub fn scaled_jacobian(coordinates: &[Point3<f64>; 5]) -> f64 {
    try_scaled_jacobian(coordinates).unwrap_or(0.0)
}

/// Shape score with the degeneracy outcome kept explicit.
///
/// Multiplies three independent signals, stopping at the first
/// non-positive one instead of letting a bad factor cancel a good one:
///
/// 1. shape of the base quad,
/// 2. cosine of the angle between the apex offset and the base normal,
/// 3. an aspect penalty comparing the apex height against the longest
///    edge scaled by cos 45° (the height of the ideal right pyramid).
///
/// The product lands in (0, 1] for a valid element.
pub fn try_shape(coordinates: &[Point3<f64>; 5]) -> Result<f64, Degeneracy> {
    let (base, _) = faces(coordinates);
    let base_shape = quad::shape(&base);
    if base_shape == 0.0 {
        return Err(Degeneracy::DegenerateBase);
    }

    let (distance, cos_angle) = apex_offset(coordinates);
    if distance <= 0.0 || cos_angle <= 0.0 {
        return Err(Degeneracy::DegenerateApex);
    }

    let reference_height = largest_edge(coordinates) * SQRT2_HALF;
    let aspect = if distance < reference_height {
        distance / reference_height
    } else {
        reference_height / distance
    };

    Ok(base_shape * cos_angle * aspect)
}

/// Shape score with the 0.0 sentinel for degenerate input.
pub fn shape(coordinates: &[Point3<f64>; 5]) -> f64 {
    try_shape(coordinates).unwrap_or(0.0)
}

/// Compute the metric selected by `request` into a fresh result record.
///
/// Flags are tested in a fixed priority order (volume, Jacobian, scaled
/// Jacobian, shape) and only the **first** match is computed, preserving
/// the historical request semantics. [`quality_all`] is the variant that
/// honors every set flag.
pub fn quality(coordinates: &[Point3<f64>; 5], request: PyramidMetrics) -> PyramidQuality {
    let mut vals = PyramidQuality::default();

    if request.contains(PyramidMetrics::VOLUME) {
        vals.volume = volume(coordinates);
    } else if request.contains(PyramidMetrics::JACOBIAN) {
        vals.jacobian = jacobian(coordinates);
    } else if request.contains(PyramidMetrics::SCALED_JACOBIAN) {
        vals.scaled_jacobian = scaled_jacobian(coordinates);
    } else if request.contains(PyramidMetrics::SHAPE) {
        vals.shape = shape(coordinates);
    }

    vals
}

/// Compute every metric selected by `request` into a fresh result record.
pub fn quality_all(coordinates: &[Point3<f64>; 5], request: PyramidMetrics) -> PyramidQuality {
    let mut vals = PyramidQuality::default();

    if request.contains(PyramidMetrics::VOLUME) {
        vals.volume = volume(coordinates);
    }
    if request.contains(PyramidMetrics::JACOBIAN) {
        vals.jacobian = jacobian(coordinates);
    }
    if request.contains(PyramidMetrics::SCALED_JACOBIAN) {
        vals.scaled_jacobian = scaled_jacobian(coordinates);
    }
    if request.contains(PyramidMetrics::SHAPE) {
        vals.shape = shape(coordinates);
    }

    vals
}
