pub mod evaluate;
pub mod lloyd;
pub mod seed;

use common::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Points per task in the parallel passes over the dataset. Chunk partials
/// are always merged in chunk order, so reductions do not depend on
/// scheduling.
pub(crate) const CHUNK: usize = 1024;

pub type CentroidSet = Vec2<f32>;

/// The centroid sets of all runs. Every set has the same shape `(k, dims)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunCollection {
    sets: Vec<CentroidSet>,
}

impl RunCollection {
    pub fn new(sets: Vec<CentroidSet>) -> Self {
        assert!(!sets.is_empty());
        let k = sets[0].shape_0();
        let dims = sets[0].shape_1();
        assert!(k != 0);
        assert!(sets.iter().all(|s| s.shape_0() == k && s.shape_1() == dims));
        Self { sets }
    }
    pub fn runs(&self) -> usize {
        self.sets.len()
    }
    pub fn k(&self) -> usize {
        self.sets[0].shape_0()
    }
    pub fn dims(&self) -> usize {
        self.sets[0].shape_1()
    }
    pub fn set(&self, run: usize) -> &CentroidSet {
        &self.sets[run]
    }
    pub fn sets(&self) -> &[CentroidSet] {
        &self.sets
    }
}

/// Index and squared distance of the nearest centroid. On ties the lowest
/// index wins.
pub fn nearest_centroid(vector: &[f32], centroids: &CentroidSet) -> (usize, f32) {
    assert!(centroids.shape_0() != 0);
    let mut result = (0, f32::INFINITY);
    for i in 0..centroids.shape_0() {
        let dis_2 = base::scalar::reduce_sum_of_d2(vector, &centroids[(i,)]);
        if dis_2 < result.1 {
            result = (i, dis_2);
        }
    }
    result
}

/// Nearest-centroid index in every run's set.
pub fn nearest_per_run(vector: &[f32], collection: &RunCollection) -> Vec<usize> {
    collection
        .sets()
        .iter()
        .map(|set| nearest_centroid(vector, set).0)
        .collect()
}
