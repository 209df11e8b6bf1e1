//! Serde structs for machine table files.
//!
//! RON and JSON files hold a bare list of machines. TOML has no top-level
//! arrays, so TOML files wrap the list in `[[machines]]` tables.

use clockwork_core::MachineEntry;
use serde::Deserialize;

/// A machine row in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct MachineData {
    pub name: String,
    pub type_path: String,
}

impl From<MachineData> for MachineEntry {
    fn from(data: MachineData) -> Self {
        MachineEntry::new(data.name, data.type_path)
    }
}

/// TOML wrapper: `[[machines]]` array of tables.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlMachines {
    pub machines: Vec<MachineData>,
}
