//! The step-wise K-Means engine and its batch front.
//!
//! [`KmeansEngine`] holds the full algorithm state (dataset, centroids,
//! assignment, history) and advances it one Lloyd iteration per [`step`]
//! call, so a driver can replay the refinement process. [`Kmeans`] wraps the
//! engine in a one-shot `fit_predict` for callers that only want labels.
//!
//! # Convergence
//!
//! A step converges when every centroid's proposed update lies within a
//! fixed tolerance (1e-4) of its previous position. Old and new centroids
//! are compared strictly by index, not by nearest-match pairing: a
//! relabeling of clusters between iterations (not structurally prevented,
//! though it does not arise for plain Lloyd iterations) could defeat the
//! test. Known limitation, kept for compatibility with the reference
//! behavior.
//!
//! # Empty clusters
//!
//! A cluster that receives no points during an assignment pass gets its
//! centroid re-seeded from a uniformly random dataset point instead of
//! collapsing to NaN. The re-seed draws from the engine's own RNG, so a
//! seeded engine replays identically, including re-seeds.

use super::init::{self, InitMethod};
use super::point::Point;
use super::traits::Clustering;
use crate::error::{Error, Result};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Convergence tolerance on per-centroid movement.
const CONVERGENCE_TOL: f64 = 1e-4;

/// Snapshot of one moment of the algorithm: the centroids produced by a
/// step (or chosen at initialization) and the assignment computed against
/// the centroids that step started from.
///
/// The initialization entry always carries an empty assignment; no
/// assignment exists before centroids are chosen.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Centroid set recorded at this moment.
    pub centroids: Vec<Point>,
    /// Per-point cluster indices, parallel to the dataset.
    pub assignment: Vec<usize>,
}

/// Signal returned by [`KmeansEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Centroids moved; further steps will refine the clustering.
    Continue,
    /// No centroid moved beyond tolerance; the clustering is stable.
    Converged,
}

impl StepOutcome {
    /// True for [`StepOutcome::Converged`].
    pub fn is_converged(self) -> bool {
        self == StepOutcome::Converged
    }
}

/// Step-wise K-Means over a fixed 2D dataset.
///
/// The engine is synchronous and single-owner: every public operation runs
/// to completion before returning, and all state lives behind `&mut self`.
#[derive(Debug, Clone)]
pub struct KmeansEngine {
    /// The dataset, fixed for the engine's lifetime.
    data: Vec<Point>,
    /// Number of clusters.
    k: usize,
    /// Centroid initialization strategy.
    init: InitMethod,
    /// Optional cap on `run_full` iterations. `None` runs unbounded.
    max_iter: Option<usize>,
    /// RNG shared by initialization and empty-cluster re-seeding.
    rng: StdRng,
    /// Current centroids; empty until initialized. Indices are stable
    /// cluster identifiers across iterations.
    centroids: Vec<Point>,
    /// Current assignment, parallel to `data`; empty until the first step.
    assignment: Vec<usize>,
    /// Append-only record of every initialization and step.
    history: Vec<HistoryEntry>,
}

impl KmeansEngine {
    /// Create an engine over `data` with `k` clusters.
    ///
    /// Configuration is validated here, before any stepping: the dataset
    /// must be non-empty and `1 <= k <= data.len()`.
    pub fn new(data: Vec<Point>, k: usize, init: InitMethod) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }
        if k == 0 || k > data.len() {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_items: data.len(),
            });
        }

        let seed = rand::rng().random();
        Ok(Self {
            data,
            k,
            init,
            max_iter: None,
            rng: StdRng::seed_from_u64(seed),
            centroids: Vec::new(),
            assignment: Vec::new(),
            history: Vec::new(),
        })
    }

    /// Set a random seed so that an entire run (initialization and any
    /// empty-cluster re-seeds) replays identically.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Cap the number of iterations [`run_full`](Self::run_full) may take.
    ///
    /// Unset, `run_full` loops until convergence like the reference
    /// behavior.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    /// Choose initial centroids according to the configured strategy and
    /// record the initialization snapshot.
    ///
    /// Not valid under [`InitMethod::Manual`]; manual centroids arrive via
    /// [`set_manual_centroids`](Self::set_manual_centroids).
    pub fn initialize(&mut self) -> Result<()> {
        let centroids = match self.init {
            InitMethod::Random => init::random(&self.data, self.k, &mut self.rng),
            InitMethod::FarthestFirst => init::farthest_first(&self.data, self.k, &mut self.rng),
            InitMethod::KmeansPlusPlus => {
                init::kmeans_plus_plus(&self.data, self.k, &mut self.rng)
            }
            InitMethod::Manual => return Err(Error::ManualStrategy),
        };

        self.centroids = centroids;
        self.history.push(HistoryEntry {
            centroids: self.centroids.clone(),
            assignment: Vec::new(),
        });
        Ok(())
    }

    /// Install exactly `k` caller-chosen centroids.
    ///
    /// Only valid under [`InitMethod::Manual`]. A count other than `k`
    /// fails without touching any state.
    pub fn set_manual_centroids(&mut self, centroids: &[Point]) -> Result<()> {
        if self.init != InitMethod::Manual {
            return Err(Error::NotManualStrategy);
        }
        if centroids.len() != self.k {
            return Err(Error::CentroidCountMismatch {
                expected: self.k,
                found: centroids.len(),
            });
        }

        self.centroids = centroids.to_vec();
        self.history.push(HistoryEntry {
            centroids: self.centroids.clone(),
            assignment: Vec::new(),
        });
        Ok(())
    }

    /// Advance one Lloyd iteration.
    ///
    /// Assigns every point to its nearest current centroid, computes the
    /// candidate centroids, and appends one history snapshot carrying the
    /// candidates and the fresh assignment. If no centroid would move
    /// beyond tolerance the live centroids keep their previous value and
    /// the call returns [`StepOutcome::Converged`]; the snapshot still
    /// records what the algorithm would have moved to. Otherwise the
    /// candidates are adopted and the call returns
    /// [`StepOutcome::Continue`].
    ///
    /// Exactly one history entry is appended per call, converged or not.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.centroids.is_empty() {
            return Err(Error::NotInitialized);
        }

        self.assign_clusters();
        let candidates = self.update_centroids();
        self.history.push(HistoryEntry {
            centroids: candidates.clone(),
            assignment: self.assignment.clone(),
        });

        if self.has_converged(&candidates) {
            Ok(StepOutcome::Converged)
        } else {
            self.centroids = candidates;
            Ok(StepOutcome::Continue)
        }
    }

    /// Step until convergence; returns the number of steps taken.
    ///
    /// With [`with_max_iter`](Self::with_max_iter) set, stops with
    /// [`Error::ConvergenceFailure`] once the cap is exhausted. Steps
    /// already taken stay applied and recorded; the cap bounds the loop,
    /// it does not roll state back.
    pub fn run_full(&mut self) -> Result<usize> {
        if self.centroids.is_empty() {
            return Err(Error::NotInitialized);
        }

        let mut iterations = 0;
        loop {
            if let Some(cap) = self.max_iter {
                if iterations >= cap {
                    return Err(Error::ConvergenceFailure { iterations });
                }
            }
            iterations += 1;
            if self.step()?.is_converged() {
                return Ok(iterations);
            }
        }
    }

    /// Clear centroids, assignment, and history.
    ///
    /// The dataset, `k`, the strategy, and the RNG stream are untouched.
    /// Stepping again requires a fresh [`initialize`](Self::initialize) or
    /// [`set_manual_centroids`](Self::set_manual_centroids).
    pub fn reset(&mut self) {
        self.centroids.clear();
        self.assignment.clear();
        self.history.clear();
    }

    /// Current centroids; empty before initialization.
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    /// Current assignment, parallel to the dataset; empty before the first
    /// step.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Every snapshot recorded so far, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The dataset the engine was constructed over.
    pub fn data(&self) -> &[Point] {
        &self.data
    }

    /// The configured number of clusters.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The configured initialization strategy.
    pub fn init_method(&self) -> InitMethod {
        self.init
    }

    /// Assign every point the index of its nearest centroid.
    ///
    /// Ties go to the lowest index: the scan is ascending and only a
    /// strictly smaller distance displaces the current best.
    fn assign_clusters(&mut self) {
        let mut assignment = Vec::with_capacity(self.data.len());
        for point in &self.data {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (idx, centroid) in self.centroids.iter().enumerate() {
                let dist = point.squared_distance(centroid);
                if dist < best_dist {
                    best_dist = dist;
                    best = idx;
                }
            }
            assignment.push(best);
        }
        self.assignment = assignment;
    }

    /// Candidate centroids: the mean of each cluster's points, with empty
    /// clusters re-seeded from a random dataset point.
    fn update_centroids(&mut self) -> Vec<Point> {
        let mut sums = vec![Point::new(0.0, 0.0); self.k];
        let mut counts = vec![0usize; self.k];
        for (point, &cluster) in self.data.iter().zip(&self.assignment) {
            sums[cluster].x += point.x;
            sums[cluster].y += point.y;
            counts[cluster] += 1;
        }

        let mut candidates = Vec::with_capacity(self.k);
        for (sum, &count) in sums.iter().zip(&counts) {
            if count > 0 {
                candidates.push(Point::new(sum.x / count as f64, sum.y / count as f64));
            } else {
                let idx = self.rng.random_range(0..self.data.len());
                candidates.push(self.data[idx]);
            }
        }
        candidates
    }

    /// Index-paired convergence test: every centroid's proposed move must
    /// be within tolerance. See the module docs for the relabeling caveat.
    fn has_converged(&self, candidates: &[Point]) -> bool {
        self.centroids
            .iter()
            .zip(candidates)
            .all(|(current, candidate)| current.distance(candidate) <= CONVERGENCE_TOL)
    }
}

/// One-shot K-Means configuration for callers that only want labels.
///
/// Drives a [`KmeansEngine`] through initialization and run-to-convergence
/// internally; use the engine directly to inspect individual iterations.
#[derive(Debug, Clone)]
pub struct Kmeans {
    k: usize,
    init: InitMethod,
    max_iter: usize,
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new K-Means configuration with kmeans++ seeding.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            init: InitMethod::KmeansPlusPlus,
            max_iter: 100,
            seed: None,
        }
    }

    /// Set the initialization strategy.
    ///
    /// [`InitMethod::Manual`] is rejected at fit time; a batch fit has no
    /// caller-supplied centroids.
    #[must_use]
    pub fn with_init(mut self, init: InitMethod) -> Self {
        self.init = init;
        self
    }

    /// Set maximum iterations.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed for reproducibility.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Point]) -> Result<Vec<usize>> {
        let mut engine =
            KmeansEngine::new(data.to_vec(), self.k, self.init)?.with_max_iter(self.max_iter);
        if let Some(seed) = self.seed {
            engine = engine.with_seed(seed);
        }

        engine.initialize()?;
        engine.run_full()?;
        Ok(engine.assignment().to_vec())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
