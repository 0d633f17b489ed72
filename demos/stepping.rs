//! Step-by-step K-Means on a randomly generated 2D dataset.
//!
//! Plays the role of the presentation layer: it generates a point set,
//! drives the engine one step at a time, and reads back snapshots.

use lloyd::{Clustering, InitMethod, Kmeans, KmeansEngine, Point, StepOutcome};
use rand::prelude::*;

fn generate_random_dataset(num_points: usize, rng: &mut StdRng) -> Vec<Point> {
    (0..num_points)
        .map(|_| {
            Point::new(
                rng.random::<f64>() * 20.0 - 10.0,
                rng.random::<f64>() * 20.0 - 10.0,
            )
        })
        .collect()
}

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let data = generate_random_dataset(300, &mut rng);
    let k = 3;

    let mut engine = KmeansEngine::new(data.clone(), k, InitMethod::KmeansPlusPlus)
        .unwrap()
        .with_seed(42);
    engine.initialize().unwrap();

    println!("=== Stepping (kmeans++, k={k}) ===");
    for (i, c) in engine.centroids().iter().enumerate() {
        println!("  initial centroid {i}: ({:6.2}, {:6.2})", c.x, c.y);
    }

    loop {
        let before = engine.centroids().to_vec();
        let outcome = engine.step().unwrap();
        let step = engine.history().len() - 1;

        let moved: f64 = engine
            .centroids()
            .iter()
            .zip(&before)
            .map(|(now, was)| now.distance(was))
            .sum();
        println!("  step {step}: total centroid movement {moved:8.4}");

        if outcome == StepOutcome::Converged {
            println!("  converged after {step} steps");
            break;
        }
    }

    let mut sizes = vec![0usize; k];
    for &label in engine.assignment() {
        sizes[label] += 1;
    }
    for (i, (c, size)) in engine.centroids().iter().zip(&sizes).enumerate() {
        println!(
            "  cluster {i}: {size:3} points around ({:6.2}, {:6.2})",
            c.x, c.y
        );
    }

    // The one-shot front, for callers that only want labels.
    let labels = Kmeans::new(k).with_seed(42).fit_predict(&data).unwrap();
    println!("\n=== Batch fit_predict ===");
    println!("  first 10 labels: {:?}", &labels[..10]);
}
