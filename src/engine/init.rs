//! Centroid initialization strategies.

use super::point::Point;
use rand::prelude::*;
use rand::rngs::StdRng;

/// How the initial centroids are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMethod {
    /// k distinct dataset points, sampled uniformly without replacement.
    Random,
    /// Greedy maximin: each centroid maximizes the distance to its nearest
    /// already-chosen centroid. Deterministic after the random seed point.
    FarthestFirst,
    /// D² weighting: each centroid is sampled with probability proportional
    /// to the squared distance to its nearest already-chosen centroid
    /// (Arthur & Vassilvitskii, 2007).
    KmeansPlusPlus,
    /// Centroids are supplied by the caller via `set_manual_centroids`.
    Manual,
}

pub(crate) fn random(data: &[Point], k: usize, rng: &mut StdRng) -> Vec<Point> {
    rand::seq::index::sample(rng, data.len(), k)
        .iter()
        .map(|i| data[i])
        .collect()
}

pub(crate) fn farthest_first(data: &[Point], k: usize, rng: &mut StdRng) -> Vec<Point> {
    let first = rng.random_range(0..data.len());
    farthest_first_from(data, k, first)
}

/// Greedy maximin selection from a fixed seed point.
///
/// Ties break toward the first occurrence in dataset order.
pub(crate) fn farthest_first_from(data: &[Point], k: usize, first: usize) -> Vec<Point> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(data[first]);

    while centroids.len() < k {
        let mut farthest = 0;
        let mut max_dist = f64::NEG_INFINITY;
        for (idx, point) in data.iter().enumerate() {
            let min_dist = centroids
                .iter()
                .map(|c| point.distance(c))
                .fold(f64::INFINITY, f64::min);
            if min_dist > max_dist {
                max_dist = min_dist;
                farthest = idx;
            }
        }
        centroids.push(data[farthest]);
    }

    centroids
}

pub(crate) fn kmeans_plus_plus(data: &[Point], k: usize, rng: &mut StdRng) -> Vec<Point> {
    let mut centroids = Vec::with_capacity(k);
    let first = rng.random_range(0..data.len());
    centroids.push(data[first]);

    while centroids.len() < k {
        let weights: Vec<f64> = data
            .iter()
            .map(|point| {
                centroids
                    .iter()
                    .map(|c| point.squared_distance(c))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if total == 0.0 {
            // Every remaining point coincides with a centroid.
            let idx = rng.random_range(0..data.len());
            centroids.push(data[idx]);
            continue;
        }

        // One uniform draw mapped through the cumulative D² distribution.
        let threshold = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut selected = data.len() - 1;
        for (idx, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if cumulative > threshold {
                selected = idx;
                break;
            }
        }
        centroids.push(data[selected]);
    }

    centroids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spread_pairs() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 11.0),
        ]
    }

    #[test]
    fn test_random_samples_without_replacement() {
        let data: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 0.0)).collect();
        let mut rng = StdRng::seed_from_u64(42);

        let centroids = random(&data, 5, &mut rng);
        assert_eq!(centroids.len(), 5);
        for point in &data {
            assert!(centroids.contains(point), "missing {point:?}");
        }
    }

    #[test]
    fn test_farthest_first_picks_maximin_point() {
        let data = spread_pairs();

        // Seeded at (0, 0), the farthest point is (10, 11): d² = 221 beats 200.
        let centroids = farthest_first_from(&data, 2, 0);
        assert_eq!(centroids, vec![Point::new(0.0, 0.0), Point::new(10.0, 11.0)]);
    }

    #[test]
    fn test_farthest_first_tie_breaks_by_dataset_order() {
        let data = spread_pairs();

        // Third pick: (0, 1) and (10, 10) both sit at distance 1 from their
        // nearest chosen centroid; (0, 1) occurs first in the dataset.
        let centroids = farthest_first_from(&data, 3, 0);
        assert_eq!(centroids[2], Point::new(0.0, 1.0));
    }

    #[test]
    fn test_kmeans_pp_straddles_separated_clusters() {
        // Two tight blobs far apart. After the first centroid lands in one
        // blob, D² weighting should almost always pick the second from the
        // other blob.
        let mut data = Vec::new();
        for i in 0..20 {
            let jitter = (i % 5) as f64 * 0.1;
            data.push(Point::new(jitter, jitter));
            data.push(Point::new(100.0 + jitter, 100.0 + jitter));
        }

        let trials = 200;
        let mut straddles = 0;
        for seed in 0..trials {
            let mut rng = StdRng::seed_from_u64(seed);
            let centroids = kmeans_plus_plus(&data, 2, &mut rng);
            let near = centroids.iter().filter(|c| c.x < 50.0).count();
            if near == 1 {
                straddles += 1;
            }
        }

        assert!(
            straddles >= 190,
            "only {straddles}/{trials} runs straddled the clusters"
        );
    }

    #[test]
    fn test_kmeans_pp_handles_coincident_points() {
        // All-identical dataset: every D² weight is zero, so selection falls
        // back to a uniform draw instead of dividing by zero.
        let data = vec![Point::new(1.0, 1.0); 4];
        let mut rng = StdRng::seed_from_u64(7);

        let centroids = kmeans_plus_plus(&data, 2, &mut rng);
        assert_eq!(centroids.len(), 2);
        assert_eq!(centroids[0], Point::new(1.0, 1.0));
        assert_eq!(centroids[1], Point::new(1.0, 1.0));
    }
}
