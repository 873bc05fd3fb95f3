#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trajsquish::{SquishParams, Trajectory, TrajectoryPoint};

/// Seeded random walk around Beijing, one fix every 5 s.
pub fn random_walk(seed: u64, n: usize) -> Trajectory {
    let mut rng = StdRng::seed_from_u64(seed);
    let (mut lat, mut lon) = (39.9, 116.4);
    let mut time = 1_201_966_568_000.0;

    let samples: Vec<(f64, f64, f64)> = (0..n)
        .map(|_| {
            let sample = (lat, lon, time);
            lat += rng.random_range(-1e-4..1e-4);
            lon += rng.random_range(-1e-4..1e-4);
            time += 5_000.0;
            sample
        })
        .collect();
    Trajectory::from_points(samples)
}

/// `n` points on a straight line at constant speed (exactly representable coordinates).
pub fn collinear(n: usize) -> Trajectory {
    Trajectory::from_points((0..n).map(|i| (i as f64, 2.0 * i as f64, 1_000.0 * i as f64)))
}

pub fn params(initial_capacity: usize, ratio: f64, epsilon: f64) -> SquishParams {
    SquishParams::builder()
        .initial_capacity(initial_capacity)
        .ratio(ratio)
        .epsilon(epsilon)
        .build()
        .unwrap()
}

pub fn indices(points: &[TrajectoryPoint]) -> Vec<usize> {
    points.iter().map(|p| p.original_index).collect()
}
