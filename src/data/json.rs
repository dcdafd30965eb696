//! JSON input handling

use crate::config::Config;
use crate::error::ClusteringError;
use crate::graph::{ClusteringInput, FileEdge, FileNode};
use anyhow::{Context, Result};
use log;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk clustering request: `{ "nodes": [...], "edges": [...], "N": .., "M": .. }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDocument {
    pub nodes: Vec<FileNode>,

    #[serde(default)]
    pub edges: Vec<FileEdge>,

    /// Max cluster size
    #[serde(rename = "N", default, skip_serializing_if = "Option::is_none")]
    pub max_cluster_size: Option<u64>,

    /// Target max cluster count
    #[serde(rename = "M", default, skip_serializing_if = "Option::is_none")]
    pub max_clusters: Option<usize>,
}

impl InputDocument {
    /// Resolve constraints, letting explicit overrides win over the file
    pub fn into_input(
        self,
        max_cluster_size: Option<u64>,
        max_clusters: Option<usize>,
    ) -> std::result::Result<ClusteringInput, ClusteringError> {
        let n = max_cluster_size
            .or(self.max_cluster_size)
            .ok_or(ClusteringError::MissingConstraint("N"))?;
        let m = max_clusters
            .or(self.max_clusters)
            .ok_or(ClusteringError::MissingConstraint("M"))?;

        Ok(ClusteringInput::new(self.nodes, self.edges, Config::new(n, m)))
    }
}

/// Parse a clustering request from a string
pub fn parse_input(text: &str) -> Result<InputDocument> {
    let doc: InputDocument = serde_json::from_str(text)?;
    Ok(doc)
}

/// Load a clustering request from a JSON file
pub fn load_input(path: &Path) -> Result<InputDocument> {
    log::info!("Reading input file: {}", path.display());

    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = parse_input(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    log::info!(
        "Loaded {} nodes and {} edges",
        doc.nodes.len(),
        doc.edges.len()
    );

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "nodes": [
            {"path": "a.py", "size": 100},
            {"path": "b.py", "size": 200}
        ],
        "edges": [
            {"src": "a.py", "dst": "b.py", "value": 0.9}
        ],
        "N": 250,
        "M": 2
    }"#;

    #[test]
    fn parses_request_with_constraints() {
        let doc = parse_input(SAMPLE).unwrap();
        assert_eq!(doc.nodes[1], FileNode::new("b.py", 200));
        assert_eq!(doc.edges[0], FileEdge::new("a.py", "b.py", 0.9));

        let input = doc.into_input(None, None).unwrap();
        assert_eq!(input.config, Config::new(250, 2));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let input = parse_input(SAMPLE)
            .unwrap()
            .into_input(Some(500), None)
            .unwrap();
        assert_eq!(input.config, Config::new(500, 2));
    }

    #[test]
    fn missing_constraint_is_invalid_input() {
        let doc = parse_input(r#"{"nodes": []}"#).unwrap();
        assert!(doc.edges.is_empty());
        assert_eq!(
            doc.into_input(None, Some(3)).unwrap_err(),
            ClusteringError::MissingConstraint("N")
        );
    }

    #[test]
    fn negative_size_fails_to_parse() {
        let text = r#"{"nodes": [{"path": "a", "size": -1}], "N": 1, "M": 1}"#;
        assert!(parse_input(text).is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_input(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let doc = load_input(&path).unwrap();
        assert_eq!(doc.nodes.len(), 2);
    }
}
