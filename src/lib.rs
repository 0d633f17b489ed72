//! Step-wise K-Means clustering for 2D point sets.
//!
//! `lloyd` is a small library implementing Lloyd's algorithm with the iteration
//! process exposed one step at a time, so an external driver (a plot, a REPL, a
//! test harness) can replay centroid refinement iteration by iteration.
//!
//! The primary public API is under [`engine`], which provides:
//! - [`KmeansEngine`]: initialization strategies (random, farthest-first,
//!   kmeans++, manual), single-step advance, run-to-convergence, and an
//!   append-only snapshot history
//! - [`Kmeans`]: a one-shot batch front over the same engine

#![forbid(unsafe_code)]

pub mod engine;
pub mod error;

pub use engine::{Clustering, HistoryEntry, InitMethod, Kmeans, KmeansEngine, Point, StepOutcome};
pub use error::{Error, Result};
