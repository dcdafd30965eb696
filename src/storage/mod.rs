//! Results persistence module

use crate::engine::ClusteringReport;
use anyhow::Result;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Save a clustering report to the specified directory
pub fn save_results(report: &ClusteringReport, output_dir: &Path) -> Result<()> {
    log::info!(
        "Saving {} clusters to {}",
        report.clusters.len(),
        output_dir.display()
    );

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(report, output_dir)?;
    save_clusters(report, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save run-level statistics
fn save_summary(report: &ClusteringReport, output_dir: &Path) -> Result<()> {
    let path = output_dir.join("summary.json");
    let mut file = File::create(path)?;

    let sizes: Vec<u64> = report.clusters.iter().map(|c| c.size).collect();
    let cluster_count = report.clusters.len();

    let summary = json!({
        "graph_stats": {
            "node_count": report.node_count,
            "edge_count": report.edge_count,
            "kept_edge_count": report.kept_edge_count,
            "edge_threshold": report.threshold,
            "component_count": report.component_count,
        },
        "constraints": {
            "max_cluster_size": report.max_cluster_size,
            "max_clusters": report.max_clusters,
            "target_reached": report.target_reached,
        },
        "cluster_stats": {
            "cluster_count": cluster_count,
            "largest_cluster_size": sizes.iter().max().copied().unwrap_or(0),
            "smallest_cluster_size": sizes.iter().min().copied().unwrap_or(0),
            "avg_cluster_size": sizes.iter().map(|&s| s as f64).sum::<f64>() /
                                if cluster_count == 0 { 1.0 } else { cluster_count as f64 },
            "total_internal_weight": report.clusters.iter().map(|c| c.internal_weight).sum::<f64>(),
            "weight_coverage": report.weight_coverage,
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save every cluster with its members
fn save_clusters(report: &ClusteringReport, output_dir: &Path) -> Result<()> {
    let path = output_dir.join("clusters.json");
    let mut file = File::create(path)?;

    let clusters_json = json!({ "clusters": report.clusters });

    file.write_all(to_string_pretty(&clusters_json)?.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::ContextClustering;
    use crate::graph::{ClusteringInput, FileEdge, FileNode};

    #[test]
    fn writes_summary_and_clusters() {
        let input = ClusteringInput::new(
            vec![
                FileNode::new("a.py", 1),
                FileNode::new("b.py", 1),
                FileNode::new("c.py", 1),
            ],
            vec![FileEdge::new("a.py", "b.py", 1.0)],
            Config::new(2, 1),
        );
        let report = ContextClustering::new(input).unwrap().report();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("results");
        save_results(&report, &out).unwrap();

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["cluster_stats"]["cluster_count"], 2);
        assert_eq!(summary["cluster_stats"]["largest_cluster_size"], 2);
        assert_eq!(summary["constraints"]["target_reached"], false);

        let clusters: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("clusters.json")).unwrap()).unwrap();
        assert_eq!(clusters["clusters"][0]["members"], json!(["a.py", "b.py"]));
        assert_eq!(clusters["clusters"][1]["members"], json!(["c.py"]));
    }

    #[test]
    fn summary_handles_sizes_near_u64_max() {
        let input = ClusteringInput::new(
            vec![FileNode::new("huge.bin", u64::MAX), FileNode::new("b.py", 1)],
            Vec::new(),
            Config::new(10, 1),
        );
        let report = ContextClustering::new(input).unwrap().report();

        let dir = tempfile::tempdir().unwrap();
        save_results(&report, dir.path()).unwrap();

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["cluster_stats"]["largest_cluster_size"], u64::MAX);
        let avg = summary["cluster_stats"]["avg_cluster_size"].as_f64().unwrap();
        assert!(avg > 9.0e18);
    }
}
