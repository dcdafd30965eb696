//! Cluster analysis module

pub mod components;
pub mod detection;
pub mod merge;
pub mod metrics;

use serde::{Deserialize, Serialize};

/// A group of nodes whose aggregate size respects the configured cap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Members of this cluster (node indices), in the order they joined
    pub members: Vec<u32>,

    /// Sum of the member sizes
    pub size: u64,
}

impl Cluster {
    /// A cluster holding a single node
    pub fn singleton(node: u32, size: u64) -> Self {
        Self {
            members: vec![node],
            size,
        }
    }

    /// Move every member of `other` into this cluster
    pub fn absorb(&mut self, other: Cluster) {
        self.members.extend(other.members);
        self.size += other.size;
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
