use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// One per-year export file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub year: i32,
    pub path: PathBuf,
}

impl SourceFile {
    pub fn new(year: i32, path: impl Into<PathBuf>) -> Self {
        Self {
            year,
            path: path.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("several exports match {year}: {}", describe(.candidates))]
    Ambiguous { year: i32, candidates: Vec<PathBuf> },

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::FileNotFound(_))
    }
}

fn describe(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
