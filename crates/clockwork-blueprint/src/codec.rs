//! Binary codec for blueprint file pairs.
//!
//! Main file layout: a length-prefixed header frame followed by one
//! length-prefixed frame per body chunk. Lengths are little-endian `u32`.
//! The body is a single bitcode payload holding the entity list, split into
//! chunks of at most `compression.chunk_size` bytes. The config file is one
//! bitcode frame without a length prefix.

use crate::{Blueprint, BlueprintConfig, BlueprintHeader, CompressionInfo, DEFAULT_CHUNK_SIZE, Entity};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic number identifying a blueprint main file.
pub const BLUEPRINT_MAGIC: u32 = 0xC10C_0001;

/// Magic number identifying a blueprint config file.
pub const CONFIG_MAGIC: u32 = 0xC10C_0002;

/// Current format version. Increment when breaking the wire format.
pub const FORMAT_VERSION: u32 = 1;

const LEN_PREFIX: usize = 4;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while encoding or decoding a blueprint.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("bitcode encoding failed: {0}")]
    Encode(String),
    #[error("bitcode decoding failed: {0}")]
    Decode(String),
    #[error("data too short: needed {needed} bytes at offset {offset}")]
    TooShort { offset: usize, needed: usize },
    #[error("invalid magic number: expected 0x{expected:08X}, got 0x{actual:08X}")]
    InvalidMagic { expected: u32, actual: u32 },
    #[error("unsupported format version: expected {}, got {}", FORMAT_VERSION, .0)]
    UnsupportedVersion(u32),
    #[error("blueprint from future version {0} (this build supports up to {FORMAT_VERSION})")]
    FutureVersion(u32),
    #[error("body length mismatch: header says {expected} bytes, chunks hold {actual}")]
    BodyLengthMismatch { expected: u64, actual: u64 },
    #[error("{0} trailing bytes after last body chunk")]
    TrailingBytes(usize),
    #[error("frame of {0} bytes exceeds the u32 length prefix")]
    FrameTooLarge(usize),
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct HeaderFrame {
    magic: u32,
    version: u32,
    header: BlueprintHeader,
    compression: CompressionInfo,
    body_len: u64,
    chunk_count: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct BodyFrame {
    entities: Vec<Entity>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConfigFrame {
    magic: u32,
    version: u32,
    config: BlueprintConfig,
}

fn check_version(expected_magic: u32, magic: u32, version: u32) -> Result<(), CodecError> {
    if magic != expected_magic {
        return Err(CodecError::InvalidMagic {
            expected: expected_magic,
            actual: magic,
        });
    }
    if version > FORMAT_VERSION {
        return Err(CodecError::FutureVersion(version));
    }
    if version < FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// The three blocks produced by [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlueprint {
    /// Length-prefixed header frame.
    pub header: Vec<u8>,
    /// Length-prefixed body chunks, in order.
    pub body_chunks: Vec<Vec<u8>>,
    /// Contents of the config file.
    pub config: Vec<u8>,
}

impl EncodedBlueprint {
    /// Concatenate the header and body chunks into the main file contents.
    pub fn main_file_bytes(&self) -> Vec<u8> {
        let total = self.header.len() + self.body_chunks.iter().map(Vec::len).sum::<usize>();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&self.header);
        for chunk in &self.body_chunks {
            out.extend_from_slice(chunk);
        }
        out
    }
}

fn length_prefixed(payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    let len = u32::try_from(payload.len()).map_err(|_| CodecError::FrameTooLarge(payload.len()))?;
    let mut out = Vec::with_capacity(LEN_PREFIX + payload.len());
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Encode a blueprint into a header block, body chunks and a config block.
///
/// Everything except the entity list is written back exactly as decoded.
pub fn encode(blueprint: &Blueprint) -> Result<EncodedBlueprint, CodecError> {
    let body = bitcode::serialize(&BodyFrame {
        entities: blueprint.entities().to_vec(),
    })
    .map_err(|e| CodecError::Encode(e.to_string()))?;

    let chunk_size = match blueprint.compression.chunk_size {
        0 => DEFAULT_CHUNK_SIZE as usize,
        n => n as usize,
    };
    let body_chunks = body
        .chunks(chunk_size)
        .map(length_prefixed)
        .collect::<Result<Vec<_>, _>>()?;

    let chunk_count =
        u32::try_from(body_chunks.len()).map_err(|_| CodecError::FrameTooLarge(body.len()))?;
    let header_frame = HeaderFrame {
        magic: BLUEPRINT_MAGIC,
        version: FORMAT_VERSION,
        header: blueprint.header.clone(),
        compression: blueprint.compression,
        body_len: body.len() as u64,
        chunk_count,
    };
    let header_bytes =
        bitcode::serialize(&header_frame).map_err(|e| CodecError::Encode(e.to_string()))?;

    let config = bitcode::serialize(&ConfigFrame {
        magic: CONFIG_MAGIC,
        version: FORMAT_VERSION,
        config: blueprint.config.clone(),
    })
    .map_err(|e| CodecError::Encode(e.to_string()))?;

    Ok(EncodedBlueprint {
        header: length_prefixed(&header_bytes)?,
        body_chunks,
        config,
    })
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Read one length-prefixed frame starting at `*offset`, advancing it.
fn read_frame<'a>(data: &'a [u8], offset: &mut usize) -> Result<&'a [u8], CodecError> {
    let start = *offset;
    let prefix = data
        .get(start..start + LEN_PREFIX)
        .ok_or(CodecError::TooShort {
            offset: start,
            needed: LEN_PREFIX,
        })?;
    let mut len_bytes = [0u8; LEN_PREFIX];
    len_bytes.copy_from_slice(prefix);
    let len = u32::from_le_bytes(len_bytes) as usize;

    let body_start = start + LEN_PREFIX;
    let frame = data
        .get(body_start..body_start + len)
        .ok_or(CodecError::TooShort {
            offset: body_start,
            needed: len,
        })?;
    *offset = body_start + len;
    Ok(frame)
}

/// Decode a blueprint from its main file and config file contents.
pub fn decode(name: &str, main: &[u8], config: &[u8]) -> Result<Blueprint, CodecError> {
    let mut offset = 0;
    let header_bytes = read_frame(main, &mut offset)?;
    let header_frame: HeaderFrame =
        bitcode::deserialize(header_bytes).map_err(|e| CodecError::Decode(e.to_string()))?;
    check_version(BLUEPRINT_MAGIC, header_frame.magic, header_frame.version)?;

    let mut body = Vec::with_capacity(main.len().saturating_sub(offset));
    for _ in 0..header_frame.chunk_count {
        body.extend_from_slice(read_frame(main, &mut offset)?);
    }
    if offset != main.len() {
        return Err(CodecError::TrailingBytes(main.len() - offset));
    }
    if body.len() as u64 != header_frame.body_len {
        return Err(CodecError::BodyLengthMismatch {
            expected: header_frame.body_len,
            actual: body.len() as u64,
        });
    }
    let body_frame: BodyFrame =
        bitcode::deserialize(&body).map_err(|e| CodecError::Decode(e.to_string()))?;

    let config_frame: ConfigFrame =
        bitcode::deserialize(config).map_err(|e| CodecError::Decode(e.to_string()))?;
    check_version(CONFIG_MAGIC, config_frame.magic, config_frame.version)?;

    let mut blueprint = Blueprint::with_entities(name, body_frame.entities);
    blueprint.header = header_frame.header;
    blueprint.config = config_frame.config;
    blueprint.compression = header_frame.compression;
    Ok(blueprint)
}
