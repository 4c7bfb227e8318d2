use base::dataset::Dataset;
use base::error::ClusterError;
use base::options::ClusteringOptions;
use common::vec2::Vec2;
use k_means::{evaluate, lloyd, seed, RunCollection};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Everything a finished computation produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    /// The converged centroid sets of all runs.
    pub collection: RunCollection,
    /// Nearest-centroid index per point (rows) and run (columns).
    pub assignments: Vec2<u32>,
    /// Total squared distance per run.
    pub costs: Vec<f64>,
    /// Joint-signature entropy per prefix of runs.
    pub entropy: Vec<f64>,
    /// Lloyd iterations until the shift fell under the threshold.
    pub iterations: u32,
    /// Run with the lowest cost; the lowest index wins ties.
    pub best: usize,
}

/// Validates the options, builds a scoped thread pool, and runs the whole
/// pipeline: seed, converge, evaluate, select.
pub fn cluster(dataset: &Dataset, options: &ClusteringOptions) -> Result<Clustering, ClusterError> {
    if let Err(err) = options.validate() {
        return Err(ClusterError::InvalidOptions {
            reason: err.to_string(),
        });
    }
    let r = stoppable_rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads as usize)
        .build_scoped(|pool| pool.install(|| cluster_in_pool(dataset, options)));
    match r {
        Ok(Some(clustering)) => clustering,
        Ok(None) => Err(ClusterError::Stopped),
        Err(e) => Err(ClusterError::ThreadPool {
            reason: e.to_string(),
        }),
    }
}

/// The pipeline on the caller's own pool. Callers that drive
/// [`stoppable_rayon::ThreadPool::stop`] themselves get cancellation at
/// every seeding and iteration boundary.
pub fn cluster_in_pool(
    dataset: &Dataset,
    options: &ClusteringOptions,
) -> Result<Clustering, ClusterError> {
    if let Err(err) = options.validate() {
        return Err(ClusterError::InvalidOptions {
            reason: err.to_string(),
        });
    }
    let mut rngs = base::rand::split_rngs(options.seed, options.runs as usize);
    let initial = seed::seed(dataset, options.k as usize, &mut rngs)?;
    let (collection, iterations) = lloyd::converge(dataset, initial, options, &mut rngs)?;
    let costs = evaluate::cost(dataset, &collection);
    let assignments = evaluate::assignments(dataset, &collection);
    let entropy = evaluate::entropy_profile(&assignments);
    let mut best = 0;
    for run in 1..costs.len() {
        if costs[run] < costs[best] {
            best = run;
        }
    }
    log::info!(
        "converged after {iterations} iterations; best run {best} with cost {:.6}",
        costs[best]
    );
    Ok(Clustering {
        collection,
        assignments,
        costs,
        entropy,
        iterations,
        best,
    })
}
