//! Clockwork Blueprint -- in-memory blueprint documents and their binary codec.
//!
//! A blueprint is a pair of files: a main file carrying a header and the
//! placed entities, and a small config file carrying the description, icon
//! and color. [`decode`] turns the two buffers into a [`Blueprint`];
//! [`encode`] produces the header block, body chunks and config block again.
//!
//! # Key Types
//!
//! - [`Blueprint`] -- Header, config, compression metadata and the ordered
//!   entity list.
//! - [`Entity`] -- One placed object: type path, instance name, properties.
//! - [`Property`] -- Tagged property value.
//! - [`codec`] -- Versioned, chunked serialization via bitcode.

pub mod codec;

pub use codec::{CodecError, EncodedBlueprint, decode, encode};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// A tagged property value stored on an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Property {
    /// Single-precision on disk in the game format; held as `f64` in memory
    /// so values written by the core read back unchanged.
    Float(f64),
    Double(f64),
    Int(i32),
    Int64(i64),
    Bool(bool),
    Byte(u8),
    Str(String),
    Name(String),
    /// Reference to another object by path.
    Object(String),
}

impl Property {
    /// Returns the value if this is a `Float` property.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Property::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// Properties of an entity, keyed by property name.
pub type PropertyMap = BTreeMap<String, Property>;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One placed object inside a blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    type_path: String,
    instance_name: String,
    properties: PropertyMap,
}

impl Entity {
    pub fn new(type_path: impl Into<String>, instance_name: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
            instance_name: instance_name.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, name: impl Into<String>, value: Property) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Create or overwrite a property. Returns the previous value, if any.
    pub fn set_property(&mut self, name: impl Into<String>, value: Property) -> Option<Property> {
        self.properties.insert(name.into(), value)
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}

// ---------------------------------------------------------------------------
// Header, config and compression metadata
// ---------------------------------------------------------------------------

/// An item cost entry listed in the blueprint header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCost {
    pub item_path: String,
    pub amount: i32,
}

/// Header block of the main blueprint file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintHeader {
    pub header_version: u32,
    pub save_version: u32,
    pub build_version: u32,
    /// Bounding box in foundation units (x, y, z).
    pub dimensions: [i32; 3],
    pub item_costs: Vec<ItemCost>,
    pub recipe_refs: Vec<String>,
}

impl Default for BlueprintHeader {
    fn default() -> Self {
        Self {
            header_version: 2,
            save_version: 46,
            build_version: 0,
            dimensions: [4, 4, 4],
            item_costs: Vec::new(),
            recipe_refs: Vec::new(),
        }
    }
}

/// Contents of the companion config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintConfig {
    pub config_version: u32,
    pub description: String,
    pub icon_id: i32,
    /// RGBA color.
    pub color: [f32; 4],
}

impl Default for BlueprintConfig {
    fn default() -> Self {
        Self {
            config_version: 2,
            description: String::new(),
            icon_id: 0,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Compression algorithm recorded in the file metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    #[default]
    Zlib,
}

/// Compression metadata carried alongside the body. The codec records it and
/// uses `chunk_size` to split the body; it does not compress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionInfo {
    pub chunk_size: u32,
    pub algorithm: CompressionAlgorithm,
}

/// Default maximum body chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: u32 = 131_072;

impl Default for CompressionInfo {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            algorithm: CompressionAlgorithm::Zlib,
        }
    }
}

// ---------------------------------------------------------------------------
// Blueprint
// ---------------------------------------------------------------------------

/// A decoded blueprint. Entities keep the order they had in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    pub name: String,
    pub header: BlueprintHeader,
    pub config: BlueprintConfig,
    pub compression: CompressionInfo,
    entities: Vec<Entity>,
}

impl Blueprint {
    /// Create an empty blueprint with default metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: BlueprintHeader::default(),
            config: BlueprintConfig::default(),
            compression: CompressionInfo::default(),
            entities: Vec::new(),
        }
    }

    pub fn with_entities(name: impl Into<String>, entities: Vec<Entity>) -> Self {
        let mut bp = Self::new(name);
        bp.entities = entities;
        bp
    }

    /// Append an entity. Returns its index.
    pub fn push_entity(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Mutable access to the entities. The slice cannot grow or shrink, so
    /// indices handed out earlier stay valid.
    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}
