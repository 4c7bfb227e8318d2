//! Multi-run k-means clustering.
//!
//! Seeds `runs` independent centroid sets with k-means++, refines them
//! concurrently with Lloyd iterations until the centroid shift falls under
//! a threshold, and scores every run so callers can keep the best one. The
//! caller supplies an already materialized [`Dataset`]; loading, feature
//! extraction, and rendering stay outside this crate.

mod engine;

pub use base::dataset::Dataset;
pub use base::error::{ClusterError, ConvergeError, DatasetError, SeedError};
pub use base::options::{ClusteringOptions, EmptyClusterPolicy};
pub use engine::{cluster, cluster_in_pool, Clustering};
pub use k_means::{nearest_centroid, nearest_per_run, CentroidSet, RunCollection};
