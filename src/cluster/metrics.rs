//! Cluster statistics and metrics

use crate::cluster::Cluster;
use crate::graph::{FileGraph, WeightedAdjacency};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-cluster statistics, resolved to paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Position of the cluster in the final result
    pub id: usize,

    /// Aggregate size of the members
    pub size: u64,

    /// Number of members
    pub member_count: usize,

    /// Total weight of kept edges inside the cluster
    pub internal_weight: f64,

    /// Kept edges inside the cluster / possible node pairs
    pub density: f64,

    /// Member paths
    pub members: Vec<String>,
}

/// Weighted edge tally inside a set of nodes.
///
/// The adjacency stores every edge on both endpoints, so each internal edge
/// is seen twice.
fn internal_tally(adjacency: &WeightedAdjacency, members: &[u32]) -> (f64, usize) {
    let member_set: HashSet<u32> = members.iter().copied().collect();

    let mut weight = 0.0;
    let mut slots = 0;
    for &u in members {
        for (v, w) in adjacency.neighbors(u) {
            if member_set.contains(&v) {
                weight += w;
                slots += 1;
            }
        }
    }
    (weight / 2.0, slots / 2)
}

/// Sum of kept edge weights with both endpoints in the cluster
pub fn internal_weight(adjacency: &WeightedAdjacency, members: &[u32]) -> f64 {
    internal_tally(adjacency, members).0
}

/// Calculate density (internal edges / potential undirected pairs)
pub fn calculate_density(adjacency: &WeightedAdjacency, members: &[u32]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    let potential_edges = n * (n - 1) / 2;
    let (_, actual_edges) = internal_tally(adjacency, members);

    actual_edges as f64 / potential_edges as f64
}

/// Summarize one cluster
pub fn summarize_cluster(
    id: usize,
    cluster: &Cluster,
    graph: &FileGraph,
    adjacency: &WeightedAdjacency,
) -> ClusterSummary {
    let (internal_weight, _) = internal_tally(adjacency, &cluster.members);
    ClusterSummary {
        id,
        size: cluster.size,
        member_count: cluster.len(),
        internal_weight,
        density: calculate_density(adjacency, &cluster.members),
        members: cluster
            .members
            .iter()
            .map(|&n| graph.path(n).to_string())
            .collect(),
    }
}

/// Fraction of kept edge weight that ended up inside clusters
pub fn weight_coverage(adjacency: &WeightedAdjacency, clusters: &[Cluster]) -> f64 {
    let total: f64 = adjacency.weights.iter().sum::<f64>() / 2.0;
    if total <= 0.0 {
        return 1.0;
    }
    let inside: f64 = clusters
        .iter()
        .map(|c| internal_weight(adjacency, &c.members))
        .sum();
    inside / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightedEdge;

    fn triangle_with_tail() -> WeightedAdjacency {
        let edges = [(0, 1, 1.0), (1, 2, 0.5), (0, 2, 0.25), (2, 3, 2.0)];
        let edges: Vec<WeightedEdge> = edges
            .iter()
            .map(|&(src, dst, value)| WeightedEdge { src, dst, value })
            .collect();
        WeightedAdjacency::from_edges(4, &edges)
    }

    #[test]
    fn internal_weight_counts_each_edge_once() {
        let adj = triangle_with_tail();
        assert_eq!(internal_weight(&adj, &[0, 1, 2]), 1.75);
        assert_eq!(internal_weight(&adj, &[3]), 0.0);
    }

    #[test]
    fn density_of_full_triangle_is_one() {
        let adj = triangle_with_tail();
        assert_eq!(calculate_density(&adj, &[0, 1, 2]), 1.0);
        assert_eq!(calculate_density(&adj, &[0, 1, 3]), 1.0 / 3.0);
        assert_eq!(calculate_density(&adj, &[3]), 1.0);
    }

    #[test]
    fn coverage_is_share_of_total_weight() {
        let adj = triangle_with_tail();
        let clusters = vec![
            Cluster {
                members: vec![0, 1, 2],
                size: 3,
            },
            Cluster::singleton(3, 1),
        ];
        assert_eq!(weight_coverage(&adj, &clusters), 1.75 / 3.75);
    }
}
