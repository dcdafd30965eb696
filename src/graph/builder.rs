//! Graph construction module

use crate::error::{ClusteringError, Result};
use crate::graph::model::{FileEdge, FileNode};
use std::collections::HashMap;

/// An edge with both endpoints resolved to node indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub src: u32,
    pub dst: u32,
    pub value: f64,
}

/// Validated file graph: a node arena plus the full, unfiltered edge list.
///
/// Node `i` is the `i`-th node handed to the builder.
#[derive(Debug, Clone)]
pub struct FileGraph {
    /// Node paths, indexed by node id
    pub paths: Vec<String>,

    /// Node sizes, indexed by node id
    pub sizes: Vec<u64>,

    /// All edges in input order
    pub edges: Vec<WeightedEdge>,
}

impl FileGraph {
    /// Validate nodes and edges and intern them into a graph
    pub fn from_records(nodes: &[FileNode], edges: &[FileEdge]) -> Result<Self> {
        let mut builder = GraphBuilder::with_capacity(nodes.len(), edges.len());
        for node in nodes {
            builder.add_node(&node.path, node.size)?;
        }
        for edge in edges {
            builder.add_edge(&edge.src, &edge.dst, edge.value)?;
        }
        Ok(builder.build())
    }

    pub fn node_count(&self) -> usize {
        self.paths.len()
    }

    pub fn path(&self, node: u32) -> &str {
        &self.paths[node as usize]
    }

    pub fn size(&self, node: u32) -> u64 {
        self.sizes[node as usize]
    }
}

/// Builder for incrementally constructing a validated FileGraph.
///
/// Every node must be added before the edges that reference it.
pub struct GraphBuilder {
    /// Mapping from paths to node indices
    id_to_index: HashMap<String, u32>,

    /// Node paths
    paths: Vec<String>,

    /// Node sizes
    sizes: Vec<u64>,

    /// Resolved edges
    edges: Vec<WeightedEdge>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(node_capacity),
            paths: Vec::with_capacity(node_capacity),
            sizes: Vec::with_capacity(node_capacity),
            edges: Vec::with_capacity(edge_capacity),
        }
    }

    /// Add a node, rejecting empty and duplicate paths
    pub fn add_node(&mut self, path: &str, size: u64) -> Result<u32> {
        let index = self.paths.len();
        if path.trim().is_empty() {
            return Err(ClusteringError::EmptyNodePath { index });
        }
        if self.id_to_index.contains_key(path) {
            return Err(ClusteringError::DuplicateNode {
                path: path.to_string(),
            });
        }

        let idx = index as u32;
        self.id_to_index.insert(path.to_string(), idx);
        self.paths.push(path.to_string());
        self.sizes.push(size);

        Ok(idx)
    }

    /// Add an edge between two previously added nodes
    pub fn add_edge(&mut self, src: &str, dst: &str, value: f64) -> Result<()> {
        let index = self.edges.len();

        let src_idx = self.resolve(index, src, "src")?;
        let dst_idx = self.resolve(index, dst, "dst")?;

        if !value.is_finite() || value < 0.0 {
            return Err(ClusteringError::InvalidWeight { index, value });
        }

        // -0.0 passes the sign check; store it as 0.0 so it ties with 0.0
        let value = if value == 0.0 { 0.0 } else { value };

        self.edges.push(WeightedEdge {
            src: src_idx,
            dst: dst_idx,
            value,
        });

        Ok(())
    }

    fn resolve(&self, index: usize, path: &str, endpoint: &'static str) -> Result<u32> {
        if path.trim().is_empty() {
            return Err(ClusteringError::EmptyEdgeEndpoint { index, endpoint });
        }
        self.id_to_index
            .get(path)
            .copied()
            .ok_or_else(|| ClusteringError::UnknownNode {
                index,
                path: path.to_string(),
            })
    }

    /// Build the file graph
    pub fn build(self) -> FileGraph {
        FileGraph {
            paths: self.paths,
            sizes: self.sizes,
            edges: self.edges,
        }
    }
}
