//! Greedy seeded cluster growth inside one component

use crate::cluster::Cluster;
use crate::graph::{FileGraph, WeightedAdjacency, WeightedEdge};
use log;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Components with at least this many nodes score growth candidates in parallel
const PARALLEL_GROWTH_THRESHOLD: usize = 1000;

/// Group kept edges by the component holding both endpoints
pub fn partition_edges(
    edges: &[WeightedEdge],
    component_index: &[u32],
    component_count: usize,
) -> Vec<Vec<WeightedEdge>> {
    let mut grouped = vec![Vec::new(); component_count];
    for edge in edges {
        let src_comp = component_index[edge.src as usize];
        if src_comp == component_index[edge.dst as usize] {
            grouped[src_comp as usize].push(*edge);
        }
    }
    grouped
}

/// Builds size-capped clusters component by component.
///
/// Membership flags are allocated once and reused across components.
pub struct ClusterBuilder<'a> {
    graph: &'a FileGraph,
    adjacency: &'a WeightedAdjacency,
    max_size: u64,

    /// Component length at which candidate scoring goes parallel
    parallel_threshold: usize,

    /// Nodes of the cluster currently being grown
    in_cluster: Vec<bool>,

    /// Nodes already assigned to a finalized cluster
    covered: Vec<bool>,
}

impl<'a> ClusterBuilder<'a> {
    pub fn new(graph: &'a FileGraph, adjacency: &'a WeightedAdjacency, max_size: u64) -> Self {
        let node_count = graph.node_count();
        Self {
            graph,
            adjacency,
            max_size,
            parallel_threshold: PARALLEL_GROWTH_THRESHOLD,
            in_cluster: vec![false; node_count],
            covered: vec![false; node_count],
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Cover one component with clusters.
    ///
    /// `component` must be sorted ascending and `comp_edges` must hold the
    /// kept edges with both endpoints inside it, in kept order.
    ///
    /// Seeds are the heaviest remaining edges (stable on ties). An edge is
    /// never a seed if it is a self-loop, touches a covered node, or its
    /// endpoints together exceed the size cap. Nodes left uncovered become
    /// singletons in ascending order.
    pub fn build(&mut self, component: &[u32], comp_edges: Vec<WeightedEdge>) -> Vec<Cluster> {
        let mut sorted = comp_edges;
        sorted.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        let mut remaining: VecDeque<WeightedEdge> = sorted.into();

        let mut clusters = Vec::new();

        while let Some(seed) = remaining.pop_front() {
            if !self.is_viable_seed(&seed) {
                continue;
            }

            let cluster = self.grow(component, &seed);

            for &node in &cluster.members {
                self.covered[node as usize] = true;
            }
            let in_cluster = &self.in_cluster;
            remaining.retain(|e| !(in_cluster[e.src as usize] && in_cluster[e.dst as usize]));
            for &node in &cluster.members {
                self.in_cluster[node as usize] = false;
            }

            log::trace!(
                "Finalized cluster of {} nodes (size {})",
                cluster.len(),
                cluster.size
            );
            clusters.push(cluster);
        }

        for &node in component {
            if !self.covered[node as usize] {
                self.covered[node as usize] = true;
                clusters.push(Cluster::singleton(node, self.graph.size(node)));
            }
        }

        clusters
    }

    fn is_viable_seed(&self, seed: &WeightedEdge) -> bool {
        if seed.src == seed.dst {
            return false;
        }
        if self.covered[seed.src as usize] || self.covered[seed.dst as usize] {
            return false;
        }
        let size = self
            .graph
            .size(seed.src)
            .saturating_add(self.graph.size(seed.dst));
        size <= self.max_size
    }

    /// Grow a cluster from a seed edge until no feasible candidate adds weight
    fn grow(&mut self, component: &[u32], seed: &WeightedEdge) -> Cluster {
        let mut cluster = Cluster {
            members: vec![seed.src, seed.dst],
            size: self.graph.size(seed.src) + self.graph.size(seed.dst),
        };
        self.in_cluster[seed.src as usize] = true;
        self.in_cluster[seed.dst as usize] = true;

        while let Some(node) = self.best_candidate(component, cluster.size) {
            self.in_cluster[node as usize] = true;
            cluster.members.push(node);
            cluster.size += self.graph.size(node);
        }

        cluster
    }

    /// Gain of adding `node`, or None when it is taken or would break the cap
    fn candidate_gain(&self, node: u32, cluster_size: u64) -> Option<f64> {
        let idx = node as usize;
        if self.in_cluster[idx] || self.covered[idx] {
            return None;
        }
        if cluster_size.saturating_add(self.graph.size(node)) > self.max_size {
            return None;
        }
        let in_cluster = &self.in_cluster;
        Some(
            self.adjacency
                .weight_into(node, |nbr| in_cluster[nbr as usize]),
        )
    }

    /// Candidate with the strictly greatest positive gain; the first one in
    /// component order wins ties
    fn best_candidate(&self, component: &[u32], cluster_size: u64) -> Option<u32> {
        let gains: Vec<Option<f64>> = if component.len() < self.parallel_threshold {
            component
                .iter()
                .map(|&node| self.candidate_gain(node, cluster_size))
                .collect()
        } else {
            component
                .par_iter()
                .map(|&node| self.candidate_gain(node, cluster_size))
                .collect()
        };

        let mut best_gain = 0.0;
        let mut best_node = None;
        for (&node, gain) in component.iter().zip(gains) {
            if let Some(gain) = gain {
                if gain > best_gain {
                    best_gain = gain;
                    best_node = Some(node);
                }
            }
        }
        best_node
    }
}
