//! Dataset files: flat records in TOML, one `[[record]]` table each.
//!
//! ```toml
//! [[record]]
//! id = 1
//! label = "Menu Item 1"
//! selected = true
//!
//! [[record]]
//! id = 2
//! parent_id = 1
//! label = "Submenu Item 1"
//! status = 0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::Record;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("cannot read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, rename = "record")]
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, DatasetError> {
        Self::parse(content, Path::new("<inline>"))
    }

    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::parse(&content, path)?;
        debug!("load: {} records from {}", dataset.records.len(), path.display());
        Ok(dataset)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, DatasetError> {
        toml::from_str(content).map_err(|e| DatasetError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
