use std::collections::HashMap;

/// Prefix shared by every type path in the blueprint format. Spec names with
/// this prefix are treated as raw type paths.
pub const TYPE_PATH_PREFIX: &str = "/Game/";

/// Built-in production machines: `(friendly name, type path)`.
pub const DEFAULT_MACHINES: &[(&str, &str)] = &[
    (
        "constructor",
        "/Game/FactoryGame/Buildable/Factory/ConstructorMk1/Build_ConstructorMk1.Build_ConstructorMk1_C",
    ),
    (
        "assembler",
        "/Game/FactoryGame/Buildable/Factory/AssemblerMk1/Build_AssemblerMk1.Build_AssemblerMk1_C",
    ),
    (
        "manufacturer",
        "/Game/FactoryGame/Buildable/Factory/ManufacturerMk1/Build_ManufacturerMk1.Build_ManufacturerMk1_C",
    ),
    (
        "refinery",
        "/Game/FactoryGame/Buildable/Factory/OilRefinery/Build_OilRefinery.Build_OilRefinery_C",
    ),
    (
        "packager",
        "/Game/FactoryGame/Buildable/Factory/Packager/Build_Packager.Build_Packager_C",
    ),
    (
        "smelter",
        "/Game/FactoryGame/Buildable/Factory/SmelterMk1/Build_SmelterMk1.Build_SmelterMk1_C",
    ),
    (
        "foundry",
        "/Game/FactoryGame/Buildable/Factory/FoundryMk1/Build_FoundryMk1.Build_FoundryMk1_C",
    ),
    (
        "blender",
        "/Game/FactoryGame/Buildable/Factory/Blender/Build_Blender.Build_Blender_C",
    ),
    (
        "particle-accelerator",
        "/Game/FactoryGame/Buildable/Factory/HadronCollider/Build_HadronCollider.Build_HadronCollider_C",
    ),
    (
        "quantum-encoder",
        "/Game/FactoryGame/Buildable/Factory/QuantumEncoder/Build_QuantumEncoder.Build_QuantumEncoder_C",
    ),
    (
        "converter",
        "/Game/FactoryGame/Buildable/Factory/Converter/Build_Converter.Build_Converter_C",
    ),
];

/// Whether `input` has the shape of a raw type path.
pub fn is_raw_type_path(input: &str) -> bool {
    input.starts_with(TYPE_PATH_PREFIX)
}

/// One row of a machine table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineEntry {
    pub friendly_name: String,
    pub type_path: String,
}

impl MachineEntry {
    pub fn new(friendly_name: impl Into<String>, type_path: impl Into<String>) -> Self {
        Self {
            friendly_name: friendly_name.into(),
            type_path: type_path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("machine name is empty (type path '{0}')")]
    EmptyName(String),
    #[error("type path is empty for machine '{0}'")]
    EmptyTypePath(String),
    #[error("duplicate machine name: {0}")]
    DuplicateName(String),
    #[error("duplicate type path: {0}")]
    DuplicateTypePath(String),
}

/// Immutable friendly-name <-> type-path table.
///
/// Friendly names are stored lowercase and looked up case-insensitively.
/// Type paths are compared exactly.
#[derive(Debug, Clone)]
pub struct MachineRegistry {
    entries: Vec<MachineEntry>,
    name_to_index: HashMap<String, usize>,
    type_path_to_index: HashMap<String, usize>,
}

impl Default for MachineRegistry {
    /// Registry over [`DEFAULT_MACHINES`].
    fn default() -> Self {
        let mut registry = Self::empty();
        for &(name, type_path) in DEFAULT_MACHINES {
            registry.insert(MachineEntry::new(name, type_path));
        }
        registry
    }
}

impl MachineRegistry {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            name_to_index: HashMap::new(),
            type_path_to_index: HashMap::new(),
        }
    }

    fn insert(&mut self, entry: MachineEntry) {
        let index = self.entries.len();
        self.name_to_index.insert(entry.friendly_name.clone(), index);
        self.type_path_to_index.insert(entry.type_path.clone(), index);
        self.entries.push(entry);
    }

    /// Build a registry from a table, validating names and type paths.
    pub fn new(table: impl IntoIterator<Item = MachineEntry>) -> Result<Self, RegistryError> {
        let mut registry = Self::empty();
        for entry in table {
            let name = entry.friendly_name.trim().to_lowercase();
            if name.is_empty() {
                return Err(RegistryError::EmptyName(entry.type_path));
            }
            if entry.type_path.is_empty() {
                return Err(RegistryError::EmptyTypePath(name));
            }
            if registry.name_to_index.contains_key(&name) {
                return Err(RegistryError::DuplicateName(name));
            }
            if registry.type_path_to_index.contains_key(&entry.type_path) {
                return Err(RegistryError::DuplicateTypePath(entry.type_path));
            }
            registry.insert(MachineEntry {
                friendly_name: name,
                type_path: entry.type_path,
            });
        }
        Ok(registry)
    }

    /// Resolve a spec name to the type path to match against.
    ///
    /// Registered friendly names resolve case-insensitively. Inputs shaped
    /// like a raw type path are returned unchanged so unregistered machine
    /// kinds can still be targeted. Anything else is `None`.
    pub fn resolve_type_path<'a>(&'a self, input: &'a str) -> Option<&'a str> {
        let lowered = input.trim().to_lowercase();
        if let Some(&index) = self.name_to_index.get(&lowered) {
            return Some(self.entries[index].type_path.as_str());
        }
        is_raw_type_path(input).then_some(input)
    }

    /// Reverse lookup. Entities whose type path is not registered are not
    /// tracked by the engine, even if they are production machines.
    pub fn machine_name(&self, type_path: &str) -> Option<&str> {
        self.type_path_to_index
            .get(type_path)
            .map(|&index| self.entries[index].friendly_name.as_str())
    }

    /// Friendly names in table order.
    pub fn known_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.friendly_name.as_str())
    }

    pub fn entries(&self) -> &[MachineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Display label for a type path, e.g. `Constructor Mk1` for
/// `.../Build_ConstructorMk1.Build_ConstructorMk1_C`.
///
/// Cosmetic only; nothing in the matching logic calls this.
pub fn extract_class_name(type_path: &str) -> String {
    let segment = type_path
        .rsplit(['.', '/'])
        .find(|s| !s.is_empty())
        .unwrap_or(type_path);
    let core = segment.strip_prefix("Build_").unwrap_or(segment);
    let core = core.strip_suffix("_C").unwrap_or(core);
    if core.is_empty() {
        return segment.to_string();
    }

    if let Some(pos) = core.rfind("Mk") {
        let (base, tier) = core.split_at(pos);
        let digits = &tier[2..];
        if !base.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return format!("{base} {tier}");
        }
    }
    core.to_string()
}
