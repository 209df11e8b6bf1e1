//! Parsing of `Name:Multiplier` batches.
//!
//! Grammar: `Name1:Mult1,Name2:Mult2,...`. Whitespace around names,
//! multipliers and separators is ignored; empty pairs (trailing commas) are
//! skipped. Each pair is split on its last colon.

use crate::registry::is_raw_type_path;
use std::fmt;

/// Errors produced while parsing a batch of specs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpecError {
    #[error("invalid spec '{pair}': expected 'Name:Multiplier'")]
    MissingSeparator { pair: String },
    #[error("invalid spec '{pair}': machine name is empty")]
    EmptyName { pair: String },
    #[error("invalid spec '{pair}': multiplier '{value}' is not a number")]
    InvalidMultiplier { pair: String, value: String },
    #[error("invalid spec '{pair}': multiplier must be greater than 0, got {value}")]
    NonPositiveMultiplier { pair: String, value: f64 },
    #[error("no valid specifications found")]
    Empty,
}

/// One validated instruction: set every machine of `machine_name` to
/// `clock_speed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Spec {
    machine_name: String,
    clock_speed: f64,
}

impl Spec {
    /// Build a spec from a name and multiplier, applying the same checks as
    /// [`parse_specs`].
    pub fn new(machine_name: &str, clock_speed: f64) -> Result<Self, SpecError> {
        let pair = format!("{machine_name}:{clock_speed}");
        let name = normalize_name(machine_name);
        if name.is_empty() {
            return Err(SpecError::EmptyName { pair });
        }
        if !clock_speed.is_finite() {
            return Err(SpecError::InvalidMultiplier {
                pair,
                value: clock_speed.to_string(),
            });
        }
        if clock_speed <= 0.0 {
            return Err(SpecError::NonPositiveMultiplier {
                pair,
                value: clock_speed,
            });
        }
        Ok(Self {
            machine_name: name,
            clock_speed,
        })
    }

    /// Lowercased machine name, or a raw type path kept verbatim.
    pub fn machine_name(&self) -> &str {
        &self.machine_name
    }

    pub fn clock_speed(&self) -> f64 {
        self.clock_speed
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.machine_name, self.clock_speed)
    }
}

/// Friendly names are case-insensitive. Raw type paths match exactly, so
/// they keep their case.
fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if is_raw_type_path(name) {
        name.to_string()
    } else {
        name.to_lowercase()
    }
}

fn parse_pair(pair: &str) -> Result<Spec, SpecError> {
    let (name, value) = pair
        .rsplit_once(':')
        .ok_or_else(|| SpecError::MissingSeparator {
            pair: pair.to_string(),
        })?;

    let name = normalize_name(name);
    if name.is_empty() {
        return Err(SpecError::EmptyName {
            pair: pair.to_string(),
        });
    }

    let value = value.trim();
    let clock_speed = value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SpecError::InvalidMultiplier {
            pair: pair.to_string(),
            value: value.to_string(),
        })?;
    if clock_speed <= 0.0 {
        return Err(SpecError::NonPositiveMultiplier {
            pair: pair.to_string(),
            value: clock_speed,
        });
    }

    Ok(Spec {
        machine_name: name,
        clock_speed,
    })
}

/// Parse a comma-separated batch of `Name:Multiplier` pairs.
///
/// Order is preserved and duplicate names are allowed. Fails on the first
/// malformed pair, or with [`SpecError::Empty`] when no pairs remain after
/// skipping empty ones.
pub fn parse_specs(text: &str) -> Result<Vec<Spec>, SpecError> {
    let mut specs = Vec::new();
    for pair in text.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        specs.push(parse_pair(pair)?);
    }

    if specs.is_empty() {
        return Err(SpecError::Empty);
    }
    Ok(specs)
}
