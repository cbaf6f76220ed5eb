//! Scalar quality indicators for finite-element cells.
//!
//! The crate evaluates 5-node pyramid elements (volume, a raw Jacobian
//! bound, a length-normalized "scaled" Jacobian bound and a composite
//! shape score) so meshing and simulation pipelines can flag degenerate,
//! inverted or poorly shaped cells before numerical solving. The simple
//! tetrahedron, quadrilateral and edge primitives the pyramid metrics are
//! built from are exposed as well.
//!
//! Every metric is a pure function of its vertex array: no caching, no
//! global state, bounded work per call, safe to evaluate from parallel
//! workers without locking.

pub mod config;
pub mod metrics;
pub mod quality;

pub use config::QualityThresholds;
pub use metrics::{edge, pyramid, quad, tet};
pub use metrics::{Degeneracy, PyramidMetrics, PyramidQuality};
pub use quality::{assess_pyramids, QualityReport};
