//! Configuration management for the clustering engine

use crate::error::{ClusteringError, Result};

/// Edges weighing less than this fraction of the mean edge weight are dropped
pub const EDGE_THRESHOLD_RATIO: f64 = 0.2;

/// Global constraints for a clustering run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum aggregate size of a cluster (N)
    pub max_cluster_size: u64,

    /// Soft target for the number of clusters (M)
    pub max_clusters: usize,
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(max_cluster_size: u64, max_clusters: usize) -> Self {
        Self {
            max_cluster_size,
            max_clusters,
        }
    }

    /// Check that both constraints are positive
    pub fn validate(&self) -> Result<()> {
        if self.max_cluster_size == 0 {
            return Err(ClusteringError::NonPositiveMaxSize);
        }
        if self.max_clusters == 0 {
            return Err(ClusteringError::NonPositiveMaxClusters);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_constraints_are_valid() {
        assert!(Config::new(250, 2).validate().is_ok());
    }

    #[test]
    fn zero_constraints_are_rejected() {
        assert_eq!(
            Config::new(0, 2).validate(),
            Err(ClusteringError::NonPositiveMaxSize)
        );
        assert_eq!(
            Config::new(10, 0).validate(),
            Err(ClusteringError::NonPositiveMaxClusters)
        );
    }
}
