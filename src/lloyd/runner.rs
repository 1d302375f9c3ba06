//! Relocation loop execution.
//!
//! # Algorithm
//!
//! 1. Seed facilities at a deterministic draw of distinct demand points
//! 2. At each iteration:
//!    a. Assign every point to its nearest facility
//!    b. Score the assignment (weighted total distance, cluster sizes)
//!    c. Snapshot the iteration
//!    d. Move each facility to the weighted centroid of its cluster
//!    e. Stop once no facility moved at least the convergence threshold
//! 3. Terminate after convergence or the iteration budget
//!
//! # References
//!
//! - Lloyd, S. (1982). "Least Squares Quantization in PCM",
//!   *IEEE Transactions on Information Theory* 28(2), 129-137.
//! - Cooper, L. (1964). "Heuristic Methods for Location-Allocation
//!   Problems", *SIAM Review* 6(1), 37-53.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::config::{ConfigError, LloydConfig};
use super::types::{DemandPoint, Facility, IterationRecord, OptimizationTrace};
use crate::geometry;

/// Fallback seed for the initial facility draw when the configuration
/// does not provide one. Fixed so that identical input always produces
/// an identical trace.
const DEFAULT_SEED: u64 = 42;

/// Per-iteration progress callback: iteration number, objective value,
/// and per-facility cluster sizes.
pub type ProgressSink<'a> = &'a mut dyn FnMut(usize, f64, &[usize]);

/// Executes the relocation loop.
///
/// # Usage
///
/// ```
/// use u_locate::lloyd::{DemandPoint, LloydConfig, LloydRunner};
///
/// let points = vec![
///     DemandPoint::new(0, 0.0, 0.0),
///     DemandPoint::new(1, 10.0, 0.0),
///     DemandPoint::new(2, 0.0, 10.0),
///     DemandPoint::new(3, 10.0, 10.0),
/// ];
/// let config = LloydConfig::default().with_num_facilities(2);
/// let trace = LloydRunner::run(&points, &config).unwrap();
/// assert!(!trace.records.is_empty());
/// ```
pub struct LloydRunner;

impl LloydRunner {
    /// Runs the relocation loop over the given demand points.
    ///
    /// Fails with [`ConfigError`] before any iteration executes when the
    /// configuration is invalid, `points` is empty, fewer points than
    /// facilities are supplied, or a point carries a negative weight.
    pub fn run(
        points: &[DemandPoint],
        config: &LloydConfig,
    ) -> Result<OptimizationTrace, ConfigError> {
        Self::run_with_observers(points, config, None, None)
    }

    /// Runs the relocation loop with an optional cancellation token.
    ///
    /// When the flag is set, the run stops at the end of the current
    /// iteration and returns the partial trace with `cancelled = true`.
    /// A cancelled trace still contains at least one record.
    pub fn run_with_cancel(
        points: &[DemandPoint],
        config: &LloydConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<OptimizationTrace, ConfigError> {
        Self::run_with_observers(points, config, None, cancel)
    }

    /// Runs the relocation loop with optional progress and cancellation
    /// observers.
    ///
    /// The progress sink fires once per recorded iteration, in order.
    /// Observers never influence the computed trace.
    pub fn run_with_observers(
        points: &[DemandPoint],
        config: &LloydConfig,
        mut progress: Option<ProgressSink<'_>>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<OptimizationTrace, ConfigError> {
        config.validate()?;
        validate_points(points, config)?;

        let mut facilities = initialize_facilities(points, config);
        let mut records = Vec::new();
        let mut converged = false;
        let mut cancelled = false;

        for iteration in 1..=config.max_iterations {
            // Assignment and scoring against the current positions
            let assignments = assign_points(points, &facilities, config.parallel);
            let objective = weighted_objective(points, &facilities, &assignments);
            let cluster_sizes = count_cluster_sizes(&assignments, facilities.len());

            if let Some(sink) = progress.as_mut() {
                sink(iteration, objective, &cluster_sizes);
            }

            // Update step, computed before the snapshot consumes the
            // assignment vector
            let updated = relocate_facilities(points, &facilities, &assignments);
            let movement = max_displacement(&facilities, &updated);

            records.push(IterationRecord {
                iteration,
                facilities: facilities.clone(),
                assignments,
                objective,
                cluster_sizes,
            });

            facilities = updated;

            if movement < config.convergence_threshold {
                converged = true;
                if iteration < config.max_iterations {
                    // One final record scored against the settled positions
                    let assignments = assign_points(points, &facilities, config.parallel);
                    let objective = weighted_objective(points, &facilities, &assignments);
                    let cluster_sizes = count_cluster_sizes(&assignments, facilities.len());

                    if let Some(sink) = progress.as_mut() {
                        sink(iteration + 1, objective, &cluster_sizes);
                    }

                    records.push(IterationRecord {
                        iteration: iteration + 1,
                        facilities: facilities.clone(),
                        assignments,
                        objective,
                        cluster_sizes,
                    });
                }
                break;
            }

            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
        }

        Ok(OptimizationTrace {
            records,
            converged,
            cancelled,
        })
    }
}

/// Rejects inputs the loop cannot run over.
fn validate_points(points: &[DemandPoint], config: &LloydConfig) -> Result<(), ConfigError> {
    if points.is_empty() {
        return Err(ConfigError::new("at least one demand point is required"));
    }
    if points.len() < config.num_facilities {
        return Err(ConfigError::new(format!(
            "cannot place {} facilities with only {} demand points",
            config.num_facilities,
            points.len()
        )));
    }
    if let Some(point) = points.iter().find(|p| p.weight < 0.0) {
        return Err(ConfigError::new(format!(
            "demand point {} has negative weight {}",
            point.id, point.weight
        )));
    }
    Ok(())
}

/// Places the initial facilities at a seeded draw of distinct demand
/// points, ids `0..num_facilities` in draw order.
fn initialize_facilities(points: &[DemandPoint], config: &LloydConfig) -> Vec<Facility> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
    rand::seq::index::sample(&mut rng, points.len(), config.num_facilities)
        .iter()
        .enumerate()
        .map(|(id, index)| Facility {
            id,
            x: points[index].x,
            y: points[index].y,
        })
        .collect()
}

/// Id of the facility nearest to `point`. Facilities are scanned in
/// ascending id order with a strict comparison, so the lowest id wins
/// ties.
fn nearest_facility(point: &DemandPoint, facilities: &[Facility]) -> usize {
    let mut min_distance = f64::INFINITY;
    let mut nearest = 0;
    for facility in facilities {
        let d = geometry::distance(point.xy(), facility.xy());
        if d < min_distance {
            min_distance = d;
            nearest = facility.id;
        }
    }
    nearest
}

fn assign_points(points: &[DemandPoint], facilities: &[Facility], parallel: bool) -> Vec<usize> {
    if parallel {
        return assign_points_parallel(points, facilities);
    }
    points
        .iter()
        .map(|point| nearest_facility(point, facilities))
        .collect()
}

#[cfg(feature = "parallel")]
fn assign_points_parallel(points: &[DemandPoint], facilities: &[Facility]) -> Vec<usize> {
    use rayon::prelude::*;

    points
        .par_iter()
        .map(|point| nearest_facility(point, facilities))
        .collect()
}

/// Without the `parallel` feature the flag downgrades to the sequential
/// path.
#[cfg(not(feature = "parallel"))]
fn assign_points_parallel(points: &[DemandPoint], facilities: &[Facility]) -> Vec<usize> {
    points
        .iter()
        .map(|point| nearest_facility(point, facilities))
        .collect()
}

/// Total weighted distance from every point to its assigned facility.
fn weighted_objective(
    points: &[DemandPoint],
    facilities: &[Facility],
    assignments: &[usize],
) -> f64 {
    points
        .iter()
        .zip(assignments)
        .map(|(point, &facility_id)| {
            point.weight * geometry::distance(point.xy(), facilities[facility_id].xy())
        })
        .sum()
}

fn count_cluster_sizes(assignments: &[usize], num_facilities: usize) -> Vec<usize> {
    let mut sizes = vec![0usize; num_facilities];
    for &facility_id in assignments {
        sizes[facility_id] += 1;
    }
    sizes
}

/// Moves each facility to the weighted centroid of its cluster. A
/// cluster that is empty or has zero total weight leaves its facility in
/// place, keeping the id live for the rest of the trace.
fn relocate_facilities(
    points: &[DemandPoint],
    facilities: &[Facility],
    assignments: &[usize],
) -> Vec<Facility> {
    facilities
        .iter()
        .map(|facility| {
            let mut members = Vec::new();
            let mut weights = Vec::new();
            for (point, &assigned) in points.iter().zip(assignments) {
                if assigned == facility.id {
                    members.push(point.xy());
                    weights.push(point.weight);
                }
            }

            match geometry::weighted_centroid(&members, &weights) {
                Some((x, y)) => Facility {
                    id: facility.id,
                    x,
                    y,
                },
                None => *facility,
            }
        })
        .collect()
}

/// Largest single-facility displacement between two position sets.
fn max_displacement(old: &[Facility], new: &[Facility]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(a, b)| geometry::distance(a.xy(), b.xy()))
        .fold(0.0, f64::max)
}
