use centroids::{cluster, ClusterError, ClusteringOptions, Dataset, EmptyClusterPolicy, SeedError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn four_points() -> Dataset {
    Dataset::from_rows(&[[0.0f32, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]]).unwrap()
}

fn uniform_points(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n)
        .map(|_| [rng.gen_range(0.0..1.0f32), rng.gen_range(0.0..1.0f32)])
        .collect::<Vec<_>>();
    Dataset::from_rows(&rows).unwrap()
}

#[test]
fn splits_two_tight_clusters() {
    let dataset = four_points();
    let mut options = ClusteringOptions::new(2);
    options.runs = 8;
    options.seed = 42;
    options.converge_dist = 0.01;
    let clustering = cluster(&dataset, &options).unwrap();

    assert_eq!(clustering.costs.len(), 8);
    assert_eq!(clustering.entropy.len(), 8);
    assert!(clustering.iterations >= 1);

    // the best run splits the points along the x axis
    let best = clustering.collection.set(clustering.best);
    let mut rows = [&best[(0,)], &best[(1,)]];
    rows.sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap());
    assert!((rows[0][0] - 0.0).abs() < 1e-4 && (rows[0][1] - 0.5).abs() < 1e-4);
    assert!((rows[1][0] - 10.0).abs() < 1e-4 && (rows[1][1] - 0.5).abs() < 1e-4);
    assert!(
        (clustering.costs[clustering.best] - 1.0).abs() < 1e-6,
        "best cost = {}.",
        clustering.costs[clustering.best]
    );

    // points sharing a side of the split share a centroid in the best run
    let a = &clustering.assignments;
    assert_eq!(a[(0, clustering.best)], a[(1, clustering.best)]);
    assert_eq!(a[(2, clustering.best)], a[(3, clustering.best)]);
    assert_ne!(a[(0, clustering.best)], a[(2, clustering.best)]);
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let dataset = uniform_points(500, 3);
    let mut options = ClusteringOptions::new(6);
    options.runs = 4;
    options.seed = 77;
    options.converge_dist = 0.001;
    options.empty_cluster = EmptyClusterPolicy::Reseed;
    let a = cluster(&dataset, &options).unwrap();
    let b = cluster(&dataset, &options).unwrap();
    assert_eq!(a, b);
}

#[test]
fn entropy_profile_is_non_decreasing() {
    let dataset = uniform_points(300, 9);
    let mut options = ClusteringOptions::new(4);
    options.runs = 6;
    options.seed = 5;
    options.converge_dist = 0.001;
    options.empty_cluster = EmptyClusterPolicy::Reseed;
    let clustering = cluster(&dataset, &options).unwrap();
    for w in clustering.entropy.windows(2) {
        assert!(w[1] >= w[0] - 1e-9, "entropy = {:?}", clustering.entropy);
    }
}

#[test]
fn assignment_matrix_covers_every_run() {
    let dataset = uniform_points(200, 21);
    let mut options = ClusteringOptions::new(3);
    options.runs = 5;
    options.seed = 1;
    options.empty_cluster = EmptyClusterPolicy::Reseed;
    let clustering = cluster(&dataset, &options).unwrap();
    assert_eq!(clustering.assignments.shape_0(), dataset.len());
    assert_eq!(clustering.assignments.shape_1(), 5);
    for i in 0..dataset.len() {
        for r in 0..5 {
            assert!(clustering.assignments[(i, r)] < 3);
        }
    }
}

#[test]
fn rejects_indistinct_dataset() {
    let rows = vec![[2.0f32, 2.0]; 6];
    let dataset = Dataset::from_rows(&rows).unwrap();
    let mut options = ClusteringOptions::new(2);
    options.runs = 2;
    let r = cluster(&dataset, &options);
    assert!(matches!(
        r,
        Err(ClusterError::Seed(SeedError::DegenerateDistribution { .. }))
    ));
}

#[test]
fn rejects_more_centroids_than_points() {
    let dataset = four_points();
    let options = ClusteringOptions::new(5);
    let r = cluster(&dataset, &options);
    assert!(matches!(
        r,
        Err(ClusterError::Seed(SeedError::InvalidInput { .. }))
    ));
}

#[test]
fn rejects_invalid_options() {
    let dataset = four_points();
    let r = cluster(&dataset, &ClusteringOptions::new(0));
    assert!(matches!(r, Err(ClusterError::InvalidOptions { .. })));

    let mut options = ClusteringOptions::new(2);
    options.runs = 0;
    let r = cluster(&dataset, &options);
    assert!(matches!(r, Err(ClusterError::InvalidOptions { .. })));
}

#[test]
fn honors_iteration_limit() {
    let dataset = uniform_points(300, 13);
    let mut options = ClusteringOptions::new(8);
    options.seed = 2;
    options.converge_dist = 1e-6;
    options.max_iterations = Some(1);
    let r = cluster(&dataset, &options);
    assert!(matches!(
        r,
        Err(ClusterError::Converge(
            centroids::ConvergeError::IterationLimit { limit: 1 }
        ))
    ));
}

#[test]
fn keys_ride_along_unchanged() {
    let rows = [[0.0f32, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
    let keys = vec![
        "USW00023188".to_string(),
        "USW00014771".to_string(),
        "USC00042319".to_string(),
        "USC00356750".to_string(),
    ];
    let dataset = Dataset::with_keys(&rows, keys.clone()).unwrap();
    let mut options = ClusteringOptions::new(2);
    options.seed = 4;
    let _ = cluster(&dataset, &options).unwrap();
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(dataset.key(i), Some(key.as_str()));
    }
}
