use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// How the Lloyd update treats a centroid that received no points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyClusterPolicy {
    /// Fail the whole computation.
    #[default]
    Error,
    /// Re-seed the centroid from a uniformly drawn dataset point.
    Reseed,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "ClusteringOptions::validate_self"))]
pub struct ClusteringOptions {
    /// Number of centroids per run.
    #[validate(range(min = 1, max = 1_000_000))]
    pub k: u32,
    /// Number of independent seedings refined concurrently.
    #[serde(default = "ClusteringOptions::default_runs")]
    #[validate(range(min = 1, max = 65_535))]
    pub runs: u32,
    /// Master seed for every random draw.
    #[serde(default)]
    pub seed: u64,
    /// Iteration stops once the centroid shift falls to this value or below.
    #[serde(default = "ClusteringOptions::default_converge_dist")]
    pub converge_dist: f32,
    /// Upper bound on Lloyd iterations. `None` reproduces the unbounded loop.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub max_iterations: Option<u32>,
    #[serde(default)]
    pub empty_cluster: EmptyClusterPolicy,
    /// Worker threads; 0 lets the pool pick one per core.
    #[serde(default = "ClusteringOptions::default_threads")]
    pub threads: u16,
}

impl ClusteringOptions {
    pub fn new(k: u32) -> Self {
        Self {
            k,
            runs: Self::default_runs(),
            seed: 0,
            converge_dist: Self::default_converge_dist(),
            max_iterations: None,
            empty_cluster: EmptyClusterPolicy::default(),
            threads: Self::default_threads(),
        }
    }
    fn default_runs() -> u32 {
        1
    }
    fn default_converge_dist() -> f32 {
        0.1
    }
    fn default_threads() -> u16 {
        0
    }
    fn validate_self(&self) -> Result<(), ValidationError> {
        if !(self.converge_dist.is_finite() && self.converge_dist > 0.0) {
            return Err(ValidationError::new("converge_dist must be a positive finite number"));
        }
        Ok(())
    }
}
