use crate::{nearest_centroid, CentroidSet, RunCollection, CHUNK};
use base::dataset::Dataset;
use base::error::ConvergeError;
use base::options::{ClusteringOptions, EmptyClusterPolicy};
use common::vec2::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::IntoParallelRefMutIterator;
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSlice;
use stoppable_rayon as rayon;

/// Refines the collection until the shift metric falls to
/// `options.converge_dist` or below. Returns the converged collection and
/// the number of iterations taken; at least one iteration always runs.
///
/// The loop itself is unbounded; `options.max_iterations` bounds it for
/// callers that need a guard against oscillating inputs. An external
/// `stoppable_rayon` stop cancels between iterations.
pub fn converge(
    dataset: &Dataset,
    initial: RunCollection,
    options: &ClusteringOptions,
    rngs: &mut [StdRng],
) -> Result<(RunCollection, u32), ConvergeError> {
    let mut collection = initial;
    let mut iterations = 0u32;
    loop {
        rayon::check();
        let (next, shift) = step(dataset, &collection, options, rngs)?;
        collection = next;
        iterations += 1;
        log::debug!("iteration {iterations}: shift = {shift}");
        if shift <= options.converge_dist {
            break;
        }
        if let Some(limit) = options.max_iterations {
            if iterations >= limit {
                return Err(ConvergeError::IterationLimit { limit });
            }
        }
    }
    Ok((collection, iterations))
}

/// One Lloyd iteration over every run.
///
/// Reads the current collection and returns the new collection together
/// with the shift metric: the maximum over runs of the summed Euclidean
/// distance the run's centroids moved. The old centroids serve the whole
/// assignment pass; a run's new set exists only in the returned value.
pub fn step(
    dataset: &Dataset,
    collection: &RunCollection,
    options: &ClusteringOptions,
    rngs: &mut [StdRng],
) -> Result<(RunCollection, f32), ConvergeError> {
    assert!(rngs.len() == collection.runs());
    let results = collection
        .sets()
        .par_iter()
        .zip(rngs.par_iter_mut())
        .enumerate()
        .map(|(run, (centroids, rng))| update_run(dataset, run, centroids, options.empty_cluster, rng))
        .collect::<Vec<_>>();
    let mut sets = Vec::with_capacity(results.len());
    let mut shift = 0.0f32;
    for result in results {
        let (set, moved) = result?;
        shift = shift.max(moved);
        sets.push(set);
    }
    Ok((RunCollection::new(sets), shift))
}

fn update_run(
    dataset: &Dataset,
    run: usize,
    centroids: &CentroidSet,
    policy: EmptyClusterPolicy,
    rng: &mut StdRng,
) -> Result<(CentroidSet, f32), ConvergeError> {
    let n = dataset.len();
    let dims = dataset.dims();
    let k = centroids.shape_0();

    let partials = dataset
        .as_slice()
        .par_chunks(CHUNK * dims)
        .map(|chunk| {
            let mut sum = Vec2::<f32>::zeros((k, dims));
            let mut count = vec![0u32; k];
            for point in chunk.chunks_exact(dims) {
                let (j, _) = nearest_centroid(point, centroids);
                base::scalar::vector_add_inplace(&mut sum[(j,)], point);
                count[j] += 1;
            }
            (sum, count)
        })
        .collect::<Vec<_>>();

    // chunk-ordered merge
    let mut sum = Vec2::<f32>::zeros((k, dims));
    let mut count = vec![0u32; k];
    for (sum_1, count_1) in partials {
        for j in 0..k {
            base::scalar::vector_add_inplace(&mut sum[(j,)], &sum_1[(j,)]);
            count[j] += count_1[j];
        }
    }

    let mut next = CentroidSet::zeros((k, dims));
    let mut moved = 0.0f32;
    for j in 0..k {
        if count[j] == 0 {
            match policy {
                EmptyClusterPolicy::Error => {
                    return Err(ConvergeError::EmptyCluster { run, centroid: j });
                }
                EmptyClusterPolicy::Reseed => {
                    next[(j,)].copy_from_slice(dataset.point(rng.gen_range(0..n)));
                }
            }
        } else {
            let mean = base::scalar::vector_mul_scalar(&sum[(j,)], 1.0 / count[j] as f32);
            next[(j,)].copy_from_slice(&mean);
        }
        moved += base::scalar::reduce_sum_of_d2(&centroids[(j,)], &next[(j,)]).sqrt();
    }
    Ok((next, moved))
}
