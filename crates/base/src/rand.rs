use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Splits a master seed into one generator per run.
///
/// Seeds are emitted in run order from a single master stream, so which
/// stream a run observes never depends on scheduling.
pub fn split_rngs(seed: u64, count: usize) -> Vec<StdRng> {
    let mut master = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| StdRng::seed_from_u64(master.gen()))
        .collect()
}

/// Draws an index from the discrete distribution proportional to `weights`.
///
/// Scaling a uniform draw by the total weight is equivalent to normalizing
/// the weights into probabilities first. Returns `None` when the weights sum
/// to zero and the distribution is undefined.
pub fn sample_weighted<R>(rng: &mut R, weights: &[f32]) -> Option<usize>
where
    R: Rng + ?Sized,
{
    let n = weights.len();
    let sum = crate::scalar::reduce_sum_of_x(weights);
    if !(sum > 0.0) {
        return None;
    }
    let mut choice = sum * rng.gen_range(0.0..1.0);
    for i in 0..(n - 1) {
        choice -= weights[i];
        if choice < 0.0 {
            return Some(i);
        }
    }
    Some(n - 1)
}
