//! The step-wise K-Means engine.
//!
//! This module exposes Lloyd's algorithm as an explicit state machine rather
//! than a single fit call, so each iteration can be inspected and replayed.
//!
//! ## The iteration
//!
//! K-means minimizes within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! Each step assigns every point to its nearest centroid, then moves every
//! centroid to the mean of its points. The engine stops once no centroid's
//! proposed move exceeds a fixed tolerance (1e-4).
//!
//! ## Initialization strategies
//!
//! - **Random**: k distinct dataset points, sampled without replacement.
//! - **Farthest-first**: a random seed point, then greedy maximin selection.
//! - **Kmeans++**: a random seed point, then D² weighted sampling. Spreads
//!   initial centroids and gives a provable O(log k) approximation bound.
//! - **Manual**: centroids supplied by the caller, one batch of exactly k.
//!
//! ## History
//!
//! Every successful `initialize`/`set_manual_centroids`/`step` call appends
//! one snapshot of (centroids, assignment) to an append-only history. The
//! initialization snapshot carries an empty assignment; a step's snapshot
//! carries the candidate centroids the update produced, even on the step
//! where the algorithm converges and the live centroids keep their previous
//! value.
//!
//! ## Usage
//!
//! ```rust
//! use lloyd::{InitMethod, KmeansEngine, Point};
//!
//! let data = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.1, 0.1),
//!     Point::new(10.0, 10.0),
//!     Point::new(10.1, 10.1),
//! ];
//!
//! let mut engine = KmeansEngine::new(data, 2, InitMethod::KmeansPlusPlus)
//!     .unwrap()
//!     .with_seed(42);
//! engine.initialize().unwrap();
//!
//! let steps = engine.run_full().unwrap();
//! assert!(steps >= 1);
//! assert_eq!(engine.assignment()[0], engine.assignment()[1]);
//! assert_ne!(engine.assignment()[0], engine.assignment()[2]);
//! // One snapshot for initialization plus one per step.
//! assert_eq!(engine.history().len(), steps + 1);
//! ```

mod init;
mod kmeans;
mod point;
mod traits;

pub use init::InitMethod;
pub use kmeans::{HistoryEntry, Kmeans, KmeansEngine, StepOutcome};
pub use point::Point;
pub use traits::Clustering;
