//! Bounded pairwise merging toward the target cluster count

use crate::cluster::Cluster;
use crate::graph::WeightedAdjacency;
use log;
use rayon::prelude::*;
use std::collections::HashMap;

/// Cluster lists at least this long score merge candidates in parallel
const PARALLEL_MERGE_THRESHOLD: usize = 256;

/// Best merge partner found for one cluster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeCandidate {
    pub left: usize,
    pub right: usize,
    pub gain: f64,
}

/// Merges clusters pairwise until at most `max_clusters` remain or no
/// feasible pair shares any weight
pub struct ClusterMerger<'a> {
    adjacency: &'a WeightedAdjacency,
    max_size: u64,
    max_clusters: usize,

    /// Cluster count at which pair scoring goes parallel
    parallel_threshold: usize,
}

impl<'a> ClusterMerger<'a> {
    pub fn new(adjacency: &'a WeightedAdjacency, max_size: u64, max_clusters: usize) -> Self {
        Self {
            adjacency,
            max_size,
            max_clusters,
            parallel_threshold: PARALLEL_MERGE_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Repeatedly merge the best pair.
    ///
    /// Pairs `(i, j)` with `i < j` are scanned in list order; a pair is
    /// feasible when the combined size stays within the cap, and its gain
    /// is the weight from members of `i` into members of `j`. The first pair
    /// with the strictly greatest positive gain is merged: `j` is appended
    /// to `i` and removed, keeping the order of the rest.
    pub fn merge(&self, mut clusters: Vec<Cluster>) -> Vec<Cluster> {
        let initial = clusters.len();
        let mut owner = vec![0u32; self.adjacency.node_count];

        while clusters.len() > self.max_clusters {
            for (pos, cluster) in clusters.iter().enumerate() {
                for &node in &cluster.members {
                    owner[node as usize] = pos as u32;
                }
            }

            let Some(best) = self.best_pair(&clusters, &owner) else {
                log::info!(
                    "No feasible merge left; stopping at {} clusters (target {})",
                    clusters.len(),
                    self.max_clusters
                );
                break;
            };

            log::debug!(
                "Merging cluster {} into {} (gain {:.4})",
                best.right,
                best.left,
                best.gain
            );
            let absorbed = clusters.remove(best.right);
            clusters[best.left].absorb(absorbed);
        }

        log::debug!("Merged {} clusters down to {}", initial, clusters.len());

        clusters
    }

    /// Weight from every member of `clusters[left]` into each later cluster
    fn row_gains(&self, clusters: &[Cluster], owner: &[u32], left: usize) -> HashMap<usize, f64> {
        let mut gains: HashMap<usize, f64> = HashMap::new();
        for &u in &clusters[left].members {
            for (v, w) in self.adjacency.neighbors(u) {
                let right = owner[v as usize] as usize;
                if right > left {
                    *gains.entry(right).or_insert(0.0) += w;
                }
            }
        }
        gains
    }

    /// First feasible partner with the strictly greatest positive gain
    fn best_in_row(&self, clusters: &[Cluster], owner: &[u32], left: usize) -> Option<MergeCandidate> {
        let gains = self.row_gains(clusters, owner, left);
        let mut partners: Vec<(usize, f64)> = gains.into_iter().collect();
        partners.sort_unstable_by_key(|&(right, _)| right);

        let left_size = clusters[left].size;
        let mut best: Option<MergeCandidate> = None;
        for (right, gain) in partners {
            if left_size.saturating_add(clusters[right].size) > self.max_size {
                continue;
            }
            let best_gain = best.map_or(0.0, |b| b.gain);
            if gain > best_gain {
                best = Some(MergeCandidate { left, right, gain });
            }
        }
        best
    }

    /// Best pair across all rows, scanning rows in ascending order
    pub fn best_pair(&self, clusters: &[Cluster], owner: &[u32]) -> Option<MergeCandidate> {
        let rows: Vec<Option<MergeCandidate>> = if clusters.len() < self.parallel_threshold {
            (0..clusters.len())
                .map(|left| self.best_in_row(clusters, owner, left))
                .collect()
        } else {
            (0..clusters.len())
                .into_par_iter()
                .map(|left| self.best_in_row(clusters, owner, left))
                .collect()
        };

        let mut best: Option<MergeCandidate> = None;
        for candidate in rows.into_iter().flatten() {
            let best_gain = best.map_or(0.0, |b| b.gain);
            if candidate.gain > best_gain {
                best = Some(candidate);
            }
        }
        best
    }
}
