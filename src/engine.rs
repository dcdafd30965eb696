//! End-to-end clustering pipeline

use crate::cluster::components::{component_index, find_components};
use crate::cluster::detection::{partition_edges, ClusterBuilder};
use crate::cluster::merge::ClusterMerger;
use crate::cluster::metrics::{self, ClusterSummary};
use crate::cluster::Cluster;
use crate::config::Config;
use crate::error::Result;
use crate::graph::algorithms::preprocess;
use crate::graph::{ClusteringInput, FileEdge, FileGraph, FileNode, FilteredGraph};
use log;
use serde::Serialize;

/// Cluster `nodes` so that every cluster stays within `max_cluster_size`
/// and, where merging allows, at most `max_clusters` clusters remain.
///
/// Returns member paths per cluster. Fails only on invalid input.
pub fn cluster(
    nodes: Vec<FileNode>,
    edges: Vec<FileEdge>,
    max_cluster_size: u64,
    max_clusters: usize,
) -> Result<Vec<Vec<String>>> {
    let input = ClusteringInput::new(nodes, edges, Config::new(max_cluster_size, max_clusters));
    Ok(ContextClustering::new(input)?.get_clusters())
}

/// A validated clustering run.
///
/// Construction validates the input and derives the filtered adjacency and
/// the connected components; clusters are computed on demand.
pub struct ContextClustering {
    config: Config,
    graph: FileGraph,
    filtered: FilteredGraph,
    components: Vec<Vec<u32>>,
}

impl ContextClustering {
    pub fn new(input: ClusteringInput) -> Result<Self> {
        input.config.validate()?;
        let graph = FileGraph::from_records(&input.nodes, &input.edges)?;

        log::info!(
            "Clustering {} nodes and {} edges (N = {}, M = {})",
            graph.node_count(),
            graph.edges.len(),
            input.config.max_cluster_size,
            input.config.max_clusters
        );

        let filtered = preprocess(&graph);
        log::debug!(
            "Adjacency uses ~{} bytes",
            filtered.adjacency.memory_usage()
        );

        let components = find_components(&filtered.adjacency);

        Ok(Self {
            config: input.config,
            graph,
            filtered,
            components,
        })
    }

    /// Minimum weight a kept edge needed
    pub fn threshold(&self) -> f64 {
        self.filtered.threshold
    }

    pub fn kept_edge_count(&self) -> usize {
        self.filtered.edges.len()
    }

    /// Connected components, as sorted node index lists
    pub fn components(&self) -> &[Vec<u32>] {
        &self.components
    }

    /// Build clusters per component, then merge if there are too many
    pub fn clusters(&self) -> Vec<Cluster> {
        let max_size = self.config.max_cluster_size;
        let index = component_index(self.graph.node_count(), &self.components);
        let grouped = partition_edges(&self.filtered.edges, &index, self.components.len());

        let mut builder = ClusterBuilder::new(&self.graph, &self.filtered.adjacency, max_size);
        let mut all = Vec::new();
        for (component, comp_edges) in self.components.iter().zip(grouped) {
            all.extend(builder.build(component, comp_edges));
        }

        log::info!(
            "Built {} clusters from {} components",
            all.len(),
            self.components.len()
        );

        if all.len() > self.config.max_clusters {
            let merger =
                ClusterMerger::new(&self.filtered.adjacency, max_size, self.config.max_clusters);
            all = merger.merge(all);
        }

        all
    }

    /// Final clusters as member paths
    pub fn get_clusters(&self) -> Vec<Vec<String>> {
        self.clusters()
            .iter()
            .map(|c| {
                c.members
                    .iter()
                    .map(|&n| self.graph.path(n).to_string())
                    .collect()
            })
            .collect()
    }

    /// Run the pipeline and collect statistics for persistence
    pub fn report(&self) -> ClusteringReport {
        let clusters = self.clusters();
        let summaries: Vec<ClusterSummary> = clusters
            .iter()
            .enumerate()
            .map(|(id, c)| metrics::summarize_cluster(id, c, &self.graph, &self.filtered.adjacency))
            .collect();

        ClusteringReport {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edges.len(),
            kept_edge_count: self.kept_edge_count(),
            threshold: self.threshold(),
            max_cluster_size: self.config.max_cluster_size,
            max_clusters: self.config.max_clusters,
            component_count: self.components.len(),
            target_reached: clusters.len() <= self.config.max_clusters,
            weight_coverage: metrics::weight_coverage(&self.filtered.adjacency, &clusters),
            clusters: summaries,
        }
    }
}

/// Outcome of a run with per-cluster statistics
#[derive(Debug, Clone, Serialize)]
pub struct ClusteringReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub kept_edge_count: usize,
    pub threshold: f64,
    pub max_cluster_size: u64,
    pub max_clusters: usize,
    pub component_count: usize,

    /// Whether the final count is within the soft target M
    pub target_reached: bool,

    /// Share of kept edge weight inside clusters
    pub weight_coverage: f64,

    pub clusters: Vec<ClusterSummary>,
}

impl ClusteringReport {
    pub fn cluster_paths(&self) -> Vec<Vec<String>> {
        self.clusters.iter().map(|c| c.members.clone()).collect()
    }
}
