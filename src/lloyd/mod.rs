//! Iterative relocation (Lloyd's algorithm) for facility location.
//!
//! Alternates two steps over a fixed set of weighted demand points:
//! assignment (every point joins its nearest facility) and update (every
//! facility moves to the weighted centroid of its cluster). The run
//! stops once no facility moves at least the convergence threshold, or
//! when the iteration budget runs out; non-convergence is a normal,
//! reportable outcome.
//!
//! The runner returns the full [`OptimizationTrace`], one snapshot per
//! iteration, rather than only the final positions.
//!
//! # References
//!
//! - Lloyd (1982), "Least Squares Quantization in PCM"
//! - Cooper (1964), "Heuristic Methods for Location-Allocation Problems"

mod config;
mod runner;
mod types;

pub use config::{ConfigError, LloydConfig};
pub use runner::{LloydRunner, ProgressSink};
pub use types::{DemandPoint, Facility, IterationRecord, OptimizationTrace, PointAssignment};
