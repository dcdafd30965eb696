//! Property-based tests for the clustering pipeline
//!
//! These tests verify invariants that should hold for all valid inputs:
//! - The clusters partition the node set exactly
//! - No cluster exceeds the size cap unless it is a lone oversized node
//! - Identical input gives identical output
//! - Edges below the threshold never change the result

use context_cluster::{cluster, FileEdge, FileNode};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

/// Generate a small graph: node sizes plus edges as index pairs with weights
fn graph_strategy() -> impl Strategy<Value = (Vec<FileNode>, Vec<FileEdge>)> {
    prop::collection::vec(0u64..120, 0..14).prop_flat_map(|sizes| {
        let n = sizes.len();
        let nodes: Vec<FileNode> = sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| FileNode::new(format!("src/file_{}.rs", i), s))
            .collect();
        let edges: BoxedStrategy<Vec<FileEdge>> = if n == 0 {
            Just(Vec::new()).boxed()
        } else {
            prop::collection::vec((0..n, 0..n, 0.0f64..1.0), 0..30)
                .prop_map(|raw| {
                    raw.into_iter()
                        .map(|(s, d, w)| {
                            FileEdge::new(format!("src/file_{}.rs", s), format!("src/file_{}.rs", d), w)
                        })
                        .collect::<Vec<FileEdge>>()
                })
                .boxed()
        };
        (Just(nodes), edges)
    })
}

proptest! {
    /// Property: every node appears in exactly one cluster
    #[test]
    fn prop_clusters_partition_nodes(
        (nodes, edges) in graph_strategy(),
        max_size in 1u64..300,
        max_clusters in 1usize..6,
    ) {
        let clusters = cluster(nodes.clone(), edges, max_size, max_clusters).unwrap();

        let mut seen = HashSet::new();
        for c in &clusters {
            prop_assert!(!c.is_empty());
            for path in c {
                prop_assert!(seen.insert(path.clone()), "{} appears twice", path);
            }
        }
        let expected: HashSet<String> = nodes.iter().map(|n| n.path.clone()).collect();
        prop_assert_eq!(seen, expected);
    }

    /// Property: clusters respect the cap, except lone oversized nodes
    #[test]
    fn prop_clusters_respect_size_cap(
        (nodes, edges) in graph_strategy(),
        max_size in 1u64..300,
        max_clusters in 1usize..6,
    ) {
        let sizes: HashMap<String, u64> = nodes.iter().map(|n| (n.path.clone(), n.size)).collect();
        let clusters = cluster(nodes, edges, max_size, max_clusters).unwrap();

        for c in &clusters {
            let total: u64 = c.iter().map(|p| sizes[p]).sum();
            prop_assert!(total <= max_size || c.len() == 1, "cluster {:?} has size {}", c, total);
        }
    }

    /// Property: the same input always produces the same clusters
    #[test]
    fn prop_clustering_is_deterministic(
        (nodes, edges) in graph_strategy(),
        max_size in 1u64..300,
        max_clusters in 1usize..6,
    ) {
        let first = cluster(nodes.clone(), edges.clone(), max_size, max_clusters).unwrap();
        let second = cluster(nodes, edges, max_size, max_clusters).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: with no edges every node stays a singleton
    #[test]
    fn prop_no_edges_means_singletons(
        sizes in prop::collection::vec(0u64..50, 0..20),
        max_clusters in 1usize..4,
    ) {
        let nodes: Vec<FileNode> = sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| FileNode::new(format!("n{}", i), s))
            .collect();
        let clusters = cluster(nodes, Vec::new(), 100, max_clusters).unwrap();

        prop_assert_eq!(clusters.len(), sizes.len());
        prop_assert!(clusters.iter().all(|c| c.len() == 1));
    }
}

proptest! {
    /// Property: adding edges far below the threshold changes nothing.
    ///
    /// The extra edges carry weight 0 next to a heavy base edge, so the mean
    /// stays high enough that they are always filtered.
    #[test]
    fn prop_sub_threshold_edges_are_ignored(
        sizes in prop::collection::vec(1u64..40, 3..10),
        noise in prop::collection::vec((0usize..10, 0usize..10), 1..4),
        max_clusters in 1usize..4,
    ) {
        let n = sizes.len();
        let nodes: Vec<FileNode> = sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| FileNode::new(format!("n{}", i), s))
            .collect();
        let base = vec![FileEdge::new("n0", "n1", 10.0)];

        let mut noisy = base.clone();
        for (s, d) in noise {
            noisy.push(FileEdge::new(format!("n{}", s % n), format!("n{}", d % n), 0.0));
        }

        let clean = cluster(nodes.clone(), base, 100, max_clusters).unwrap();
        let with_noise = cluster(nodes, noisy, 100, max_clusters).unwrap();
        prop_assert_eq!(clean, with_noise);
    }
}
