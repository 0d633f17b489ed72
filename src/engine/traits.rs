use super::point::Point;
use crate::error::Result;

/// Common interface for hard clustering (one label per point).
pub trait Clustering {
    /// Run the algorithm to completion and return one cluster label per
    /// input point.
    fn fit_predict(&self, data: &[Point]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
