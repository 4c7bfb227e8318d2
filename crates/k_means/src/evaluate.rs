use crate::{nearest_centroid, RunCollection, CHUNK};
use base::dataset::Dataset;
use common::vec2::Vec2;
use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSlice;
use rayon::slice::ParallelSliceMut;
use std::collections::HashMap;
use stoppable_rayon as rayon;

/// Total squared distance of every point to its nearest centroid, one value
/// per run. Accumulated in f64, merged in chunk order.
pub fn cost(dataset: &Dataset, collection: &RunCollection) -> Vec<f64> {
    let dims = dataset.dims();
    collection
        .sets()
        .par_iter()
        .map(|centroids| {
            dataset
                .as_slice()
                .par_chunks(CHUNK * dims)
                .map(|chunk| {
                    let mut acc = 0.0f64;
                    for point in chunk.chunks_exact(dims) {
                        acc += nearest_centroid(point, centroids).1 as f64;
                    }
                    acc
                })
                .collect::<Vec<_>>()
                .into_iter()
                .sum()
        })
        .collect()
}

/// Nearest-centroid index of every point (rows) in every run (columns).
pub fn assignments(dataset: &Dataset, collection: &RunCollection) -> Vec2<u32> {
    let runs = collection.runs();
    let mut out = Vec2::zeros((dataset.len(), runs));
    out.as_mut_slice()
        .par_chunks_mut(runs)
        .enumerate()
        .for_each(|(i, row)| {
            let point = dataset.point(i);
            for (r, set) in collection.sets().iter().enumerate() {
                row[r] = nearest_centroid(point, set).0 as u32;
            }
        });
    out
}

/// Shannon entropy (base 2) of the distribution of points over their joint
/// assignment signature, for every prefix of runs `1..=runs`.
///
/// Each run refines the partition induced by the runs before it, so the
/// profile never decreases. Diagnostic only: it measures how much
/// distinguishing information additional runs contribute.
pub fn entropy_profile(assignments: &Vec2<u32>) -> Vec<f64> {
    let n = assignments.shape_0();
    let runs = assignments.shape_1();
    let mut groups = vec![0u32; n];
    let mut profile = Vec::with_capacity(runs);
    for r in 0..runs {
        let mut refined = HashMap::new();
        for i in 0..n {
            let next = refined.len() as u32;
            groups[i] = *refined.entry((groups[i], assignments[(i, r)])).or_insert(next);
        }
        let mut counts = vec![0usize; refined.len()];
        for i in 0..n {
            counts[groups[i] as usize] += 1;
        }
        let h = counts
            .iter()
            .map(|&c| {
                let p = c as f64 / n as f64;
                -p * p.log2()
            })
            .sum::<f64>();
        profile.push(h);
    }
    profile
}
