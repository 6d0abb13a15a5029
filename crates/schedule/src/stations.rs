// crates/schedule/src/stations.rs

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use prigorod_core::{PrigorodError, PrigorodResult};
use tracing::info;

/// Immutable normalized-name → station-code table. Loaded once per process
/// and shared read-only across requests.
#[derive(Debug, Default)]
pub struct StationDirectory {
    codes: HashMap<String, String>,
}

impl StationDirectory {
    pub fn from_file(path: &Path) -> PrigorodResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PrigorodError::Config(format!("failed to read station directory {path:?}: {e}"))
        })?;
        let codes: HashMap<String, String> = serde_json::from_str(&content).map_err(|e| {
            PrigorodError::Config(format!("failed to parse station directory {path:?}: {e}"))
        })?;

        info!(stations = codes.len(), "loaded station directory");
        Ok(Self { codes })
    }

    pub fn from_table<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self {
            codes: entries
                .into_iter()
                .map(|(name, code)| (name.into(), code.into()))
                .collect(),
        }
    }

    /// Exact-match lookup; a miss carries the phrase back for the apology.
    pub fn resolve(&self, name: &str) -> PrigorodResult<&str> {
        self.codes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| PrigorodError::UnknownStation(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
