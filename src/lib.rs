//! Facility location optimization over planar demand points.
//!
//! Computes facility sites that minimize total weighted travel distance
//! from a fixed spatial demand pattern, using iterative relocation
//! (Lloyd's algorithm / Voronoi iteration):
//!
//! - **Geometry**: pure planar distance and centroid primitives.
//! - **Lloyd**: the relocation engine: deterministic seeded
//!   initialization, nearest-facility assignment, weighted centroid
//!   update, convergence detection, and a full per-iteration
//!   optimization trace.
//!
//! # Architecture
//!
//! The crate is a pure in-memory library. It performs no I/O: reading
//! demand points from a data store, persisting or visualizing results,
//! and map integration belong to the host application. The host supplies
//! a slice of [`lloyd::DemandPoint`] records and receives back an
//! [`lloyd::OptimizationTrace`] with derived views for the common output
//! artifacts (final facilities, full iteration trail, per-point
//! assignments with distances).
//!
//! # Example
//!
//! ```
//! use u_locate::lloyd::{DemandPoint, LloydConfig, LloydRunner};
//!
//! let points = vec![
//!     DemandPoint::new(0, 0.0, 0.0),
//!     DemandPoint::new(1, 10.0, 0.0),
//!     DemandPoint::new(2, 0.0, 10.0),
//!     DemandPoint::new(3, 10.0, 10.0),
//!     DemandPoint::new(4, 5.0, 5.0),
//! ];
//!
//! let config = LloydConfig::default()
//!     .with_num_facilities(1)
//!     .with_max_iterations(10)
//!     .with_convergence_threshold(0.001);
//!
//! let trace = LloydRunner::run(&points, &config).unwrap();
//! assert!(trace.converged);
//!
//! let center = trace.final_facilities()[0];
//! assert!((center.x - 5.0).abs() < 1e-9);
//! assert!((center.y - 5.0).abs() < 1e-9);
//! ```

pub mod geometry;
pub mod lloyd;
