//! Size-constrained clustering of file affinity graphs

pub mod config;
pub mod error;
pub mod graph;
pub mod cluster;
pub mod engine;
pub mod data;
pub mod storage;

pub use config::Config;
pub use engine::{cluster, ClusteringReport, ContextClustering};
pub use error::ClusteringError;
pub use graph::{ClusteringInput, FileEdge, FileNode};
