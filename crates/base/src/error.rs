use serde::{Deserialize, Serialize};
use thiserror::Error;

#[must_use]
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum DatasetError {
    #[error("Dataset is empty.")]
    Empty,
    #[error("Points must have at least one dimension.")]
    ZeroDimension,
    #[error("Point {index} has dimension {found}, expected {expected}.")]
    DimensionMismatch {
        index: usize,
        found: usize,
        expected: usize,
    },
    #[error("Got {keys} keys for {points} points.")]
    KeyCountMismatch { keys: usize, points: usize },
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum SeedError {
    #[error("Invalid clustering input: {reason}.")]
    InvalidInput { reason: String },
    #[error("Distance distribution of run {run} is all-zero after {chosen} centroids.")]
    DegenerateDistribution { run: usize, chosen: usize },
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ConvergeError {
    #[error("Centroid {centroid} of run {run} has no assigned points.")]
    EmptyCluster { run: usize, centroid: usize },
    #[error("No convergence after {limit} iterations.")]
    IterationLimit { limit: u32 },
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ClusterError {
    #[error("Invalid clustering options: {reason}.")]
    InvalidOptions { reason: String },
    #[error("{0}")]
    Seed(#[from] SeedError),
    #[error("{0}")]
    Converge(#[from] ConvergeError),
    #[error("Failed to build the thread pool: {reason}.")]
    ThreadPool { reason: String },
    #[error("The clustering job is stopped.")]
    Stopped,
}
