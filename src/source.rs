use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;

use crate::models::bronze::{GuestCheckEnvelope, OrderRecord};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed guest check document {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Unable to walk input directory: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Anything that can hand the loader a batch of guest check records.
pub trait OrderSource {
    fn records(&self) -> Result<Vec<OrderRecord>, SourceError>;
}

/// Reads Bronze guest check documents from one JSON file or from every
/// `*.json` file below a directory, in path order.
#[derive(Debug, Clone)]
pub struct BronzeSource {
    root: PathBuf,
}

impl BronzeSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn files(&self) -> Result<Vec<PathBuf>, SourceError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let pattern = self.root.join("**").join("*.json");
        let mut files = glob::glob(&pattern.to_string_lossy())?
            .collect::<Result<Vec<_>, _>>()?;
        files.sort();
        Ok(files)
    }

    fn read_file(path: &Path) -> Result<Option<GuestCheckEnvelope>, SourceError> {
        let raw = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let envelope: GuestCheckEnvelope =
            serde_json::from_str(&raw).map_err(|source| SourceError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        if !envelope.has_guest_checks() {
            warn!("BronzeSource: {} has no guest checks, skipping", path.display());
            return Ok(None);
        }
        Ok(Some(envelope))
    }
}

impl OrderSource for BronzeSource {
    fn records(&self) -> Result<Vec<OrderRecord>, SourceError> {
        let files = self.files()?;
        if files.is_empty() {
            warn!("BronzeSource: no JSON files under {}", self.root.display());
        }

        let mut records = Vec::new();
        for path in &files {
            if let Some(envelope) = Self::read_file(path)? {
                let before = records.len();
                records.extend(envelope.into_records());
                info!(
                    "BronzeSource: {} guest checks from {}",
                    records.len() - before,
                    path.display()
                );
            }
        }
        Ok(records)
    }
}

impl OrderSource for Vec<OrderRecord> {
    fn records(&self) -> Result<Vec<OrderRecord>, SourceError> {
        Ok(self.clone())
    }
}
