//! Graph representation and preprocessing module

pub mod model;
pub mod builder;
pub mod compressed;
pub mod algorithms;

pub use algorithms::FilteredGraph;
pub use builder::{FileGraph, WeightedEdge};
pub use compressed::WeightedAdjacency;
pub use model::{ClusteringInput, FileEdge, FileNode};
