//! Session configuration.
//!
//! Read from TOML at startup. A missing file means defaults; a file that
//! exists but does not parse is an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crm_model::RecordKind;

use crate::drag::DEFAULT_ACTIVATION_DISTANCE;
use crate::error::{Result, StateError};
use crate::sort::SortState;
use crate::table::{DEFAULT_ROWS_PER_PAGE, TableView};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    pub display: DisplayConfig,
    pub drag: DragConfig,
    pub tables: TableDefaults,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub rows_per_page: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Pointer travel before a press on a drag handle becomes a drag.
    pub activation_distance: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: DEFAULT_ACTIVATION_DISTANCE,
        }
    }
}

/// Column each table is sorted by (ascending) when first shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableDefaults {
    pub leads: Option<String>,
    pub opportunities: Option<String>,
    pub contacts: Option<String>,
}

impl CrmConfig {
    /// Load from `explicit` if given, otherwise from the platform config dir.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::config_path()),
        }
    }

    /// Load from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(StateError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Self = toml::from_str(&content).map_err(|source| StateError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "PipelineDesk", "PipelineDesk")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("pipeline-desk.toml"))
    }

    /// Initial sort of a table.
    pub fn default_sort(&self, kind: RecordKind) -> SortState {
        let key = match kind {
            RecordKind::Leads => self.tables.leads.as_deref(),
            RecordKind::Opportunities => self.tables.opportunities.as_deref(),
            RecordKind::Contacts => self.tables.contacts.as_deref(),
        };
        key.map_or_else(SortState::new, SortState::ascending)
    }

    /// Fresh table view for `kind` with configured paging and sort.
    pub fn table_view(&self, kind: RecordKind) -> TableView {
        TableView::with_rows_per_page(self.display.rows_per_page).with_sort(self.default_sort(kind))
    }
}
