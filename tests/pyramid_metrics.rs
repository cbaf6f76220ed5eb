use approx::assert_relative_eq;
use element_quality::{pyramid, Degeneracy, PyramidMetrics};
use nalgebra::{Point3, Rotation3, Vector3};

const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Square unit base in the z=0 plane, apex centered above it.
fn right_pyramid(height: f64) -> [Point3<f64>; 5] {
    [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.5, 0.5, height),
    ]
}

/// A valid but visibly irregular pyramid, for tests where symmetry would
/// hide sign or ordering mistakes.
fn skewed_pyramid() -> [Point3<f64>; 5] {
    [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.1, -0.1, 0.0),
        Point3::new(1.3, 1.2, 0.0),
        Point3::new(-0.2, 0.9, 0.0),
        Point3::new(0.4, 0.6, 0.8),
    ]
}

#[test]
fn ideal_pyramid_scores() {
    // Apex height 1/sqrt(2) over a unit square base is the reference
    // element every normalization is calibrated against.
    let ideal = right_pyramid(FRAC_1_SQRT_2);

    assert_relative_eq!(pyramid::scaled_jacobian(&ideal), 1.0, epsilon = 1e-12);
    assert_relative_eq!(pyramid::shape(&ideal), 1.0, epsilon = 1e-12);
    assert_relative_eq!(pyramid::volume(&ideal), 2.0_f64.sqrt() / 6.0, epsilon = 1e-12);
}

#[test]
fn end_to_end_scenario() {
    let element = right_pyramid(FRAC_1_SQRT_2);

    let volume = pyramid::volume(&element);
    let scaled_jacobian = pyramid::scaled_jacobian(&element);
    let shape = pyramid::shape(&element);
    println!("volume={volume:.12}, scaled_jacobian={scaled_jacobian:.12}, shape={shape:.12}");

    assert!(volume > 0.0);
    assert_relative_eq!(scaled_jacobian, 1.0, epsilon = 1e-10);
    assert!(shape > 0.0 && shape <= 1.0);

    // Unit apex height gives the textbook V = (1/3) * base * height
    let tall = right_pyramid(1.0);
    assert_relative_eq!(pyramid::volume(&tall), 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn volume_is_rigid_motion_invariant() {
    let element = skewed_pyramid();
    let reference = pyramid::volume(&element);

    let rotation = Rotation3::from_euler_angles(0.3, -0.7, 1.9);
    let translation = Vector3::new(12.0, -3.5, 0.25);
    let moved = element.map(|p| rotation * p + translation);

    assert_relative_eq!(pyramid::volume(&moved), reference, epsilon = 1e-12);
}

#[test]
fn volume_changes_sign_under_winding_reversal() {
    let element = skewed_pyramid();
    let reference = pyramid::volume(&element);
    assert!(reference > 0.0);

    // Reversing the base traversal (apex fixed) inverts the element
    let mut reversed = element;
    reversed.swap(1, 3);
    assert_relative_eq!(pyramid::volume(&reversed), -reference, epsilon = 1e-12);
}

#[test]
fn jacobians_decay_continuously_as_a_lateral_edge_collapses() {
    let ideal = right_pyramid(FRAC_1_SQRT_2);
    let apex = ideal[4];
    let corner = ideal[1];

    // Slide the apex toward base corner 1, collapsing lateral edge 1->4
    let collapse = |t: f64| {
        let mut p = ideal;
        p[4] = corner + (apex - corner) * (1.0 - t);
        p
    };

    let mut previous_scaled = f64::INFINITY;
    let mut previous_raw = f64::INFINITY;
    for &t in &[0.0, 0.5, 0.9, 0.99, 0.999, 0.999_999] {
        let element = collapse(t);
        let scaled = pyramid::scaled_jacobian(&element);
        let raw = pyramid::jacobian(&element);

        assert!(scaled <= 1.0 + 1e-12, "perturbation cannot beat the ideal element");
        assert!(scaled <= previous_scaled && raw <= previous_raw, "decay must be monotone");
        previous_scaled = scaled;
        previous_raw = raw;
    }

    // Approaches the floor continuously rather than jumping to it
    assert!(previous_scaled > 0.0 && previous_scaled < 1e-4);
    assert!(previous_raw > 0.0 && previous_raw < 1e-4);

    let fully_collapsed = collapse(1.0);
    assert_eq!(
        pyramid::try_scaled_jacobian(&fully_collapsed),
        Err(Degeneracy::CollapsedEdge)
    );
    assert_eq!(pyramid::scaled_jacobian(&fully_collapsed), 0.0);
}

#[test]
fn shape_is_zero_for_flat_and_inverted_apex() {
    assert_eq!(pyramid::shape(&right_pyramid(0.0)), 0.0);
    assert_eq!(pyramid::shape(&right_pyramid(-1.0)), 0.0);
    assert_eq!(
        pyramid::try_shape(&right_pyramid(-1.0)),
        Err(Degeneracy::DegenerateApex)
    );
}

#[test]
fn dispatch_priority_short_circuits() {
    let element = right_pyramid(1.0);
    let request = PyramidMetrics::VOLUME | PyramidMetrics::SHAPE;

    let vals = pyramid::quality(&element, request);
    assert_relative_eq!(vals.volume, 1.0 / 3.0, epsilon = 1e-12);
    assert_eq!(vals.shape, 0.0, "lower-priority flag must stay zero-initialized");

    let all = pyramid::quality_all(&element, request);
    assert_relative_eq!(all.volume, 1.0 / 3.0, epsilon = 1e-12);
    assert!(all.shape > 0.0);
}

#[test]
fn metrics_are_idempotent() {
    let element = skewed_pyramid();

    assert_eq!(
        pyramid::volume(&element).to_bits(),
        pyramid::volume(&element).to_bits()
    );
    assert_eq!(
        pyramid::jacobian(&element).to_bits(),
        pyramid::jacobian(&element).to_bits()
    );
    assert_eq!(
        pyramid::scaled_jacobian(&element).to_bits(),
        pyramid::scaled_jacobian(&element).to_bits()
    );
    assert_eq!(
        pyramid::shape(&element).to_bits(),
        pyramid::shape(&element).to_bits()
    );
}
