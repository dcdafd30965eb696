//! Compressed weighted adjacency representation

use std::mem;

use crate::graph::builder::WeightedEdge;

/// Compressed sparse row layout shared by the adjacency and incoming indexes.
///
/// `offsets[i]..offsets[i+1]` is the slot range of node `i`.
fn build_offsets(node_count: usize, degrees: &[u32]) -> Vec<u32> {
    let mut offsets = Vec::with_capacity(node_count + 1);
    offsets.push(0);

    let mut offset = 0;
    for &degree in degrees {
        offset += degree;
        offsets.push(offset);
    }
    offsets
}

/// Symmetric weighted adjacency over the kept edges.
///
/// Every kept edge `(src, dst, w)` contributes `(dst, w)` to `src` and
/// `(src, w)` to `dst`, in edge order, so neighbor lists keep the order in
/// which edges were appended. Read-only once built.
#[derive(Debug, Clone)]
pub struct WeightedAdjacency {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's neighbors begin
    pub offsets: Vec<u32>,

    /// Neighbor array: concatenated neighbor lists
    pub neighbors: Vec<u32>,

    /// Weight array, parallel to `neighbors`
    pub weights: Vec<f64>,

    /// Offsets into `incoming`
    incoming_offsets: Vec<u32>,

    /// For each node `u`, the `src` of every kept edge with `dst == u`
    incoming: Vec<u32>,
}

impl WeightedAdjacency {
    /// Build the adjacency and the incoming index from kept edges
    pub fn from_edges(node_count: usize, edges: &[WeightedEdge]) -> Self {
        let mut degrees = vec![0u32; node_count];
        let mut in_degrees = vec![0u32; node_count];
        for edge in edges {
            degrees[edge.src as usize] += 1;
            degrees[edge.dst as usize] += 1;
            in_degrees[edge.dst as usize] += 1;
        }

        let offsets = build_offsets(node_count, &degrees);
        let incoming_offsets = build_offsets(node_count, &in_degrees);

        let slot_count = offsets[node_count] as usize;
        let mut neighbors = vec![0u32; slot_count];
        let mut weights = vec![0.0f64; slot_count];
        let mut incoming = vec![0u32; incoming_offsets[node_count] as usize];

        // Temporary counters for current insertion positions
        let mut current_pos = vec![0usize; node_count];
        let mut current_in_pos = vec![0usize; node_count];

        for edge in edges {
            let (src, dst) = (edge.src as usize, edge.dst as usize);

            let pos = offsets[src] as usize + current_pos[src];
            neighbors[pos] = edge.dst;
            weights[pos] = edge.value;
            current_pos[src] += 1;

            let pos = offsets[dst] as usize + current_pos[dst];
            neighbors[pos] = edge.src;
            weights[pos] = edge.value;
            current_pos[dst] += 1;

            let pos = incoming_offsets[dst] as usize + current_in_pos[dst];
            incoming[pos] = edge.src;
            current_in_pos[dst] += 1;
        }

        Self {
            node_count,
            offsets,
            neighbors,
            weights,
            incoming_offsets,
            incoming,
        }
    }

    /// Neighbors of a node with the weight of each connecting edge
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.offsets[node as usize] as usize;
        let end = self.offsets[node as usize + 1] as usize;
        self.neighbors[start..end]
            .iter()
            .copied()
            .zip(self.weights[start..end].iter().copied())
    }

    /// Sources of the kept edges pointing at `node`
    pub fn incoming_sources(&self, node: u32) -> &[u32] {
        let start = self.incoming_offsets[node as usize] as usize;
        let end = self.incoming_offsets[node as usize + 1] as usize;
        &self.incoming[start..end]
    }

    /// Sum of weights from `node` to every neighbor accepted by `member`
    pub fn weight_into<F>(&self, node: u32, member: F) -> f64
    where
        F: Fn(u32) -> bool,
    {
        self.neighbors(node)
            .filter(|&(nbr, _)| member(nbr))
            .map(|(_, w)| w)
            .sum()
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = (self.offsets.capacity() + self.incoming_offsets.capacity())
            * mem::size_of::<u32>();
        let neighbors =
            (self.neighbors.capacity() + self.incoming.capacity()) * mem::size_of::<u32>();
        let weights = self.weights.capacity() * mem::size_of::<f64>();

        base + offsets + neighbors + weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(src: u32, dst: u32, value: f64) -> WeightedEdge {
        WeightedEdge { src, dst, value }
    }

    #[test]
    fn adjacency_is_symmetric_and_ordered_by_edge() {
        let adj = WeightedAdjacency::from_edges(3, &[edge(0, 1, 0.9), edge(2, 0, 0.4)]);

        assert_eq!(adj.neighbors(0).collect::<Vec<_>>(), vec![(1, 0.9), (2, 0.4)]);
        assert_eq!(adj.neighbors(1).collect::<Vec<_>>(), vec![(0, 0.9)]);
        assert_eq!(adj.neighbors(2).collect::<Vec<_>>(), vec![(0, 0.4)]);
    }

    #[test]
    fn incoming_index_follows_edge_direction() {
        let adj = WeightedAdjacency::from_edges(3, &[edge(0, 1, 1.0), edge(2, 1, 1.0)]);

        assert_eq!(adj.incoming_sources(1), &[0, 2]);
        assert!(adj.incoming_sources(0).is_empty());
    }

    #[test]
    fn self_loop_fills_two_slots() {
        let adj = WeightedAdjacency::from_edges(1, &[edge(0, 0, 0.5)]);
        assert_eq!(adj.neighbors(0).count(), 2);
        assert_eq!(adj.weight_into(0, |n| n == 0), 1.0);
    }

    #[test]
    fn isolated_nodes_have_no_neighbors() {
        let adj = WeightedAdjacency::from_edges(2, &[]);
        assert_eq!(adj.neighbors(1).count(), 0);
        assert!(adj.memory_usage() > 0);
    }
}
