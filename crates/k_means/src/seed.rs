use crate::{CentroidSet, RunCollection};
use base::dataset::Dataset;
use base::error::SeedError;
use common::vec2::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use rayon::iter::IndexedParallelIterator;
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSliceMut;
use stoppable_rayon as rayon;

/// Multi-run k-means++ initialization.
///
/// One generator per run; `rngs.len()` is the number of runs. All runs share
/// a single distance-table sweep per added centroid: one parallel pass over
/// the dataset refreshes every run's cached distance against that run's most
/// recently added centroid. The weighted draws then happen per run, in
/// ascending run order, each from its own stream, so scheduling never
/// changes which point a run picks.
pub fn seed(dataset: &Dataset, k: usize, rngs: &mut [StdRng]) -> Result<RunCollection, SeedError> {
    let n = dataset.len();
    let runs = rngs.len();
    if k == 0 {
        return Err(SeedError::InvalidInput {
            reason: "k must be at least 1".to_string(),
        });
    }
    if runs == 0 {
        return Err(SeedError::InvalidInput {
            reason: "runs must be at least 1".to_string(),
        });
    }
    if k > n {
        return Err(SeedError::InvalidInput {
            reason: format!("k = {k} exceeds the {n} points of the dataset"),
        });
    }
    let mut sets = rngs
        .iter_mut()
        .map(|rng| {
            let mut set = CentroidSet::zeros((k, dataset.dims()));
            set[(0,)].copy_from_slice(dataset.point(rng.gen_range(0..n)));
            set
        })
        .collect::<Vec<_>>();
    let mut cache = DistanceCache::new(n, runs);
    for step in 1..k {
        rayon::check();
        let last = sets
            .iter()
            .map(|set| set[(step - 1,)].to_vec())
            .collect::<Vec<_>>();
        cache.update(dataset, &last);
        for (run, rng) in rngs.iter_mut().enumerate() {
            let weights = cache.column(run);
            let Some(index) = base::rand::sample_weighted(rng, &weights) else {
                return Err(SeedError::DegenerateDistribution { run, chosen: step });
            };
            sets[run][(step,)].copy_from_slice(dataset.point(index));
        }
    }
    Ok(RunCollection::new(sets))
}

/// Per point, per run, the squared distance to the nearest centroid chosen
/// so far in that run. Each update only compares against the newest
/// centroid, so entries never increase.
struct DistanceCache {
    table: Vec2<f32>,
}

impl DistanceCache {
    fn new(n: usize, runs: usize) -> Self {
        Self {
            table: Vec2::full((n, runs), f32::INFINITY),
        }
    }

    fn update(&mut self, dataset: &Dataset, last: &[Vec<f32>]) {
        let runs = self.table.shape_1();
        self.table
            .as_mut_slice()
            .par_chunks_mut(runs)
            .enumerate()
            .for_each(|(i, row)| {
                let point = dataset.point(i);
                for r in 0..runs {
                    let dis_2 = base::scalar::reduce_sum_of_d2(point, &last[r]);
                    if dis_2 < row[r] {
                        row[r] = dis_2;
                    }
                }
            });
    }

    fn column(&self, run: usize) -> Vec<f32> {
        (0..self.table.shape_0())
            .map(|i| self.table[(i, run)])
            .collect()
    }
}
