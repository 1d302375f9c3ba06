//! Data model for the relocation engine.
//!
//! Demand points are read-only inputs; facilities are the mutable
//! entities the loop relocates. Every iteration is captured as an owned
//! [`IterationRecord`], so the accumulated [`OptimizationTrace`] is an
//! immutable history: later engine state never aliases into it.

use crate::geometry;

/// A fixed demand location with an optional service weight.
///
/// # Examples
///
/// ```
/// use u_locate::lloyd::DemandPoint;
///
/// let plain = DemandPoint::new(17, 3.0, -1.5);
/// assert_eq!(plain.weight, 1.0);
///
/// let heavy = DemandPoint::new(18, 0.0, 0.0).with_weight(4.0);
/// assert_eq!(heavy.weight, 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandPoint {
    pub x: f64,
    pub y: f64,

    /// Opaque identifier carried through to derived views, e.g. a source
    /// row id. The engine never interprets it.
    pub id: i64,

    /// Non-negative service weight.
    pub weight: f64,
}

impl DemandPoint {
    /// Creates a demand point with the default weight of 1.0.
    pub fn new(id: i64, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            id,
            weight: 1.0,
        }
    }

    /// Sets the service weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub(crate) fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// A service location relocated between iterations.
///
/// The `id` is stable for the whole run and equals the facility's index
/// in every facility vector; only the coordinate moves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facility {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

impl Facility {
    pub(crate) fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Snapshot of one iteration, taken after scoring and before the update
/// step moves the facilities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationRecord {
    /// 1-based iteration number.
    pub iteration: usize,

    /// Facility states this iteration was scored against.
    pub facilities: Vec<Facility>,

    /// `assignments[i]` is the id of the facility nearest to the i-th
    /// demand point.
    pub assignments: Vec<usize>,

    /// Total weighted distance from every point to its assigned facility.
    pub objective: f64,

    /// `cluster_sizes[f]` counts the points assigned to facility `f`.
    pub cluster_sizes: Vec<usize>,
}

/// Final assignment of one demand point, with its distance to the
/// assigned facility.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointAssignment {
    /// The demand point's opaque identifier.
    pub point_id: i64,
    pub facility_id: usize,
    pub distance: f64,
}

/// Ordered sequence of per-iteration snapshots from one run.
///
/// Contains at least one record. A trace shorter than the iteration
/// budget always means the run converged; `converged` is also set when
/// convergence lands exactly on the final budgeted iteration, which the
/// length alone cannot show.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationTrace {
    /// One record per iteration, in order.
    pub records: Vec<IterationRecord>,

    /// Whether the maximum facility displacement dropped below the
    /// convergence threshold.
    pub converged: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

impl OptimizationTrace {
    /// Number of recorded iterations.
    pub fn iterations(&self) -> usize {
        self.records.len()
    }

    /// The last recorded iteration.
    pub fn final_record(&self) -> &IterationRecord {
        self.records
            .last()
            .expect("a completed run records at least one iteration")
    }

    /// Facility locations of the last recorded iteration.
    pub fn final_facilities(&self) -> &[Facility] {
        &self.final_record().facilities
    }

    /// Per-point final assignment with the distance to the assigned
    /// facility, recomputed against the last record.
    ///
    /// `points` must be the same sequence the run was executed over.
    pub fn final_assignments(&self, points: &[DemandPoint]) -> Vec<PointAssignment> {
        let record = self.final_record();
        points
            .iter()
            .zip(&record.assignments)
            .map(|(point, &facility_id)| PointAssignment {
                point_id: point.id,
                facility_id,
                distance: geometry::distance(point.xy(), record.facilities[facility_id].xy()),
            })
            .collect()
    }

    /// Relative objective improvement from the first to the last record,
    /// in `[0, 1]` for an improving run.
    ///
    /// `None` when the initial objective is zero (nothing to improve).
    pub fn improvement(&self) -> Option<f64> {
        let first = self.records.first()?.objective;
        if first == 0.0 {
            return None;
        }
        let last = self.final_record().objective;
        Some((first - last) / first)
    }
}
