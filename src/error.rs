use thiserror::Error;

/// Errors returned by the clustering engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset is empty.
    #[error("empty dataset")]
    EmptyInput,

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} points")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of points in the dataset.
        n_items: usize,
    },

    /// A stepping operation was called before any centroids exist.
    #[error("no centroids: call initialize or set_manual_centroids before stepping")]
    NotInitialized,

    /// `initialize` was called under the manual strategy.
    #[error("manual strategy: centroids must be supplied via set_manual_centroids")]
    ManualStrategy,

    /// `set_manual_centroids` was called under a non-manual strategy.
    #[error("set_manual_centroids is only valid under the manual strategy")]
    NotManualStrategy,

    /// Manually supplied centroid count differs from k.
    #[error("centroid count mismatch: expected {expected}, found {found}")]
    CentroidCountMismatch {
        /// Configured number of clusters.
        expected: usize,
        /// Number of centroids supplied.
        found: usize,
    },

    /// Run-to-convergence exhausted its iteration cap.
    #[error("did not converge after {iterations} iterations")]
    ConvergenceFailure {
        /// Number of iterations attempted.
        iterations: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
