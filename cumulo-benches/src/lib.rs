//! Shared support for the cumulo benchmarks.
//!
//! Provides deterministic synthetic point sets so benchmark runs are
//! reproducible across machines and commits.

use cumulo_core::Point;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

/// Errors raised while preparing benchmark inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BenchSetupError {
    /// A synthetic data set must contain at least one point.
    #[error("synthetic point count must be at least 1")]
    EmptyPointCount,
    /// The coordinate spread must be positive.
    #[error("coordinate spread must be at least 1 (got {got})")]
    InvalidSpread {
        /// The invalid spread supplied by the caller.
        got: i64,
    },
}

/// Configuration for a deterministic synthetic point set.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Seed for the generator; equal seeds produce equal point sets.
    pub seed: u64,
    /// Coordinates are drawn uniformly from `-spread..=spread`.
    pub spread: i64,
}

/// Generates a seeded, uniformly distributed point set.
///
/// # Errors
/// Returns [`BenchSetupError`] when the configuration is unusable.
pub fn synthetic_points(config: &SyntheticConfig) -> Result<Vec<Point>, BenchSetupError> {
    if config.point_count == 0 {
        return Err(BenchSetupError::EmptyPointCount);
    }
    if config.spread < 1 {
        return Err(BenchSetupError::InvalidSpread { got: config.spread });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let range = -config.spread..=config.spread;
    Ok((0..config.point_count)
        .map(|_| {
            Point::new(
                rng.gen_range(range.clone()),
                rng.gen_range(range.clone()),
                rng.gen_range(range.clone()),
            )
        })
        .collect())
}
