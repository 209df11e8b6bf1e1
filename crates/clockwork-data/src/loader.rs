//! Loading machine tables from data files into a [`MachineRegistry`].
//!
//! Format is detected from the file extension (RON/TOML/JSON).

use crate::schema::{MachineData, TomlMachines};
use clockwork_core::{MachineEntry, MachineRegistry, RegistryError};
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a machine table.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The table parsed but is not a valid registry.
    #[error("invalid machine table in {file}: {source}")]
    Registry {
        file: PathBuf,
        source: RegistryError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Loading
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Parse a machine table from file contents in the given format.
pub fn parse_machine_table(
    content: &str,
    format: Format,
    path: &Path,
) -> Result<Vec<MachineEntry>, DataLoadError> {
    let rows: Vec<MachineData> = match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(path, e))?,
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(path, e))?,
        Format::Toml => {
            let wrapper: TomlMachines =
                toml::from_str(content).map_err(|e| parse_error(path, e))?;
            wrapper.machines
        }
    };
    Ok(rows.into_iter().map(MachineEntry::from).collect())
}

/// Read a machine table file.
pub fn load_machine_table(path: &Path) -> Result<Vec<MachineEntry>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_machine_table(&content, format, path)
}

/// Read a machine table file and build a validated registry from it.
pub fn load_registry(path: &Path) -> Result<MachineRegistry, DataLoadError> {
    let table = load_machine_table(path)?;
    MachineRegistry::new(table).map_err(|source| DataLoadError::Registry {
        file: path.to_path_buf(),
        source,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
