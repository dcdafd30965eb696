//! Input records for the clustering engine

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A file artifact: unique path plus its size (bytes, chars, tokens...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub path: String,
    pub size: u64,
}

impl FileNode {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// A weighted affinity between two files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEdge {
    pub src: String,
    pub dst: String,
    pub value: f64,
}

impl FileEdge {
    pub fn new(src: impl Into<String>, dst: impl Into<String>, value: f64) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            value,
        }
    }
}

/// Everything a clustering run needs, not yet validated
#[derive(Debug, Clone)]
pub struct ClusteringInput {
    pub nodes: Vec<FileNode>,
    pub edges: Vec<FileEdge>,
    pub config: Config,
}

impl ClusteringInput {
    pub fn new(nodes: Vec<FileNode>, edges: Vec<FileEdge>, config: Config) -> Self {
        Self {
            nodes,
            edges,
            config,
        }
    }
}
