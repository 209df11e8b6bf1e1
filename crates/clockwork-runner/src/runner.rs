//! Read, adjust and write a blueprint file pair.

use crate::error::RunError;
use clockwork_blueprint::{EncodedBlueprint, decode, encode};
use clockwork_core::{Adjustment, AdjustmentEngine, MachineRegistry, parse_specs};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Extension of the main blueprint file.
pub const MAIN_EXTENSION: &str = "sbp";

/// Extension of the blueprint config file.
pub const CONFIG_EXTENSION: &str = "sbpcfg";

/// Suffix appended to the blueprint name when no output name is given.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_modified";

/// What to adjust and where to write it.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding `<blueprint_name>.sbp` and `<blueprint_name>.sbpcfg`.
    pub input_dir: PathBuf,
    pub blueprint_name: String,
    /// Batch text, `Name:Multiplier,...`.
    pub specs: String,
    /// Defaults to `<blueprint_name>_modified`.
    pub output_name: Option<String>,
    /// Defaults to `input_dir`.
    pub output_dir: Option<PathBuf>,
    /// Machine table file; the built-in table is used when `None`.
    pub registry_file: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        blueprint_name: impl Into<String>,
        specs: impl Into<String>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            blueprint_name: blueprint_name.into(),
            specs: specs.into(),
            output_name: None,
            output_dir: None,
            registry_file: None,
        }
    }

    pub fn output_name(&self) -> String {
        self.output_name
            .clone()
            .unwrap_or_else(|| format!("{}{DEFAULT_OUTPUT_SUFFIX}", self.blueprint_name))
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.input_dir)
    }
}

/// Paths of the main and config file of blueprint `name` in `dir`.
pub fn file_pair(dir: &Path, name: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{name}.{MAIN_EXTENSION}")),
        dir.join(format!("{name}.{CONFIG_EXTENSION}")),
    )
}

/// Files written by a successful run, with the adjustment that produced them.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_main: PathBuf,
    pub output_config: PathBuf,
    pub adjustment: Adjustment,
}

fn read(path: &Path) -> Result<Vec<u8>, RunError> {
    std::fs::read(path).map_err(|source| RunError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), RunError> {
    std::fs::write(path, bytes).map_err(|source| RunError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Whether two directories are the same place on disk. Falls back to
/// comparing the paths as given when either cannot be resolved.
fn same_dir(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Write the output pair. A failure on either file removes the main file,
/// so a partial pair is never left behind.
fn write_pair(main: &Path, config: &Path, encoded: &EncodedBlueprint) -> Result<(), RunError> {
    let result = write(main, &encoded.main_file_bytes()).and_then(|()| write(config, &encoded.config));
    if result.is_err() && main.is_file() {
        let _ = std::fs::remove_file(main);
    }
    result
}

/// Run the full pipeline. On any error no output file is left behind.
pub fn run(config: &RunConfig) -> Result<RunSummary, RunError> {
    let specs = parse_specs(&config.specs)?;

    let output_name = config.output_name();
    let (input_main, input_config) = file_pair(&config.input_dir, &config.blueprint_name);
    let (output_main, output_config) = file_pair(config.output_dir(), &output_name);
    if output_name == config.blueprint_name && same_dir(config.output_dir(), &config.input_dir) {
        return Err(RunError::OutputIsInput(output_name));
    }

    let registry = match &config.registry_file {
        Some(path) => clockwork_data::load_registry(path)?,
        None => MachineRegistry::default(),
    };

    let main_bytes = read(&input_main)?;
    let config_bytes = read(&input_config)?;
    let mut blueprint = decode(&config.blueprint_name, &main_bytes, &config_bytes)?;
    info!(
        blueprint = %config.blueprint_name,
        entities = blueprint.entity_count(),
        "blueprint loaded"
    );

    let adjustment = AdjustmentEngine::new(&registry).adjust(&mut blueprint, &specs)?;
    if adjustment.total_matched() == 0 {
        warn!(blueprint = %config.blueprint_name, "no machines matched");
        return Err(RunError::NothingMatched {
            blueprint: config.blueprint_name.clone(),
        });
    }

    let encoded = encode(&blueprint)?;
    write_pair(&output_main, &output_config, &encoded)?;
    info!(
        output = %output_main.display(),
        matched = adjustment.total_matched(),
        "blueprint written"
    );

    Ok(RunSummary {
        output_main,
        output_config,
        adjustment,
    })
}
