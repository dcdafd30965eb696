//! Measuring files on disk so they can become graph nodes

use crate::graph::FileNode;
use anyhow::Result;
use log;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Number of leading bytes inspected for NUL when sniffing binary files
const BINARY_SNIFF_LEN: usize = 512;

/// Which measurement becomes the node size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SizeMetric {
    Bytes,
    #[default]
    Chars,
}

/// Size of one text file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    pub path: PathBuf,
    pub bytes: u64,
    pub chars: u64,
}

impl FileStats {
    pub fn to_node(&self, metric: SizeMetric) -> FileNode {
        let size = match metric {
            SizeMetric::Bytes => self.bytes,
            SizeMetric::Chars => self.chars,
        };
        FileNode::new(self.path.to_string_lossy(), size)
    }
}

/// True when a NUL byte shows up near the start of the file
pub fn is_binary(path: &Path) -> Result<bool> {
    let mut chunk = [0u8; BINARY_SNIFF_LEN];
    let mut file = File::open(path)?;
    let read = file.read(&mut chunk)?;
    Ok(chunk[..read].contains(&0))
}

/// Decode as UTF-8, replacing invalid sequences
pub fn read_text(path: &Path) -> Result<String> {
    let data = std::fs::read(path)?;
    Ok(match String::from_utf8(data) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Measure one file, or None when it is missing, unreadable or binary
pub fn measure_file(path: &Path) -> Option<FileStats> {
    if !path.exists() {
        log::warn!("File not found: {}", path.display());
        return None;
    }

    match is_binary(path) {
        Ok(true) => {
            log::warn!("Skipping binary file: {}", path.display());
            return None;
        }
        Ok(false) => {}
        Err(err) => {
            log::warn!("Cannot read {}: {}", path.display(), err);
            return None;
        }
    }

    let measured = std::fs::metadata(path)
        .map_err(anyhow::Error::from)
        .and_then(|meta| Ok((meta.len(), read_text(path)?)));

    match measured {
        Ok((bytes, text)) => Some(FileStats {
            path: path.to_path_buf(),
            bytes,
            chars: text.chars().count() as u64,
        }),
        Err(err) => {
            log::warn!("Cannot read {}: {}", path.display(), err);
            None
        }
    }
}

/// Measure every readable text file, in input order
pub fn measure_files<P: AsRef<Path>>(paths: &[P]) -> Vec<FileStats> {
    paths
        .iter()
        .filter_map(|p| measure_file(p.as_ref()))
        .collect()
}
