//! Edge filtering and adjacency construction

use crate::config::EDGE_THRESHOLD_RATIO;
use crate::graph::builder::{FileGraph, WeightedEdge};
use crate::graph::compressed::WeightedAdjacency;
use log;

/// The graph after low-weight edges have been pruned
#[derive(Debug, Clone)]
pub struct FilteredGraph {
    /// Minimum weight an edge needed to be kept
    pub threshold: f64,

    /// Kept edges, in input order
    pub edges: Vec<WeightedEdge>,

    /// Symmetric adjacency over the kept edges
    pub adjacency: WeightedAdjacency,
}

/// Weight below which edges are dropped: a fixed fraction of the mean
pub fn edge_threshold(edges: &[WeightedEdge]) -> f64 {
    if edges.is_empty() {
        return 0.0;
    }
    let total: f64 = edges.iter().map(|e| e.value).sum();
    EDGE_THRESHOLD_RATIO * (total / edges.len() as f64)
}

/// Drop noise edges and build the adjacency used by every later stage
pub fn preprocess(graph: &FileGraph) -> FilteredGraph {
    let threshold = edge_threshold(&graph.edges);

    let edges: Vec<WeightedEdge> = graph
        .edges
        .iter()
        .filter(|e| e.value >= threshold)
        .copied()
        .collect();

    log::debug!(
        "Edge threshold {:.6}: kept {} of {} edges",
        threshold,
        edges.len(),
        graph.edges.len()
    );

    let adjacency = WeightedAdjacency::from_edges(graph.node_count(), &edges);

    FilteredGraph {
        threshold,
        edges,
        adjacency,
    }
}
