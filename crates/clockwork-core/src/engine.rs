//! Inventory and apply passes over a decoded blueprint.
//!
//! The engine borrows the blueprint mutably for the duration of one
//! [`AdjustmentEngine::adjust`] call and keeps nothing afterwards. Matching
//! is exact type-path equality; display helpers never take part in it.

use crate::clock::{clock_speed, set_clock_speed};
use crate::registry::MachineRegistry;
use crate::spec::Spec;
use clockwork_blueprint::Blueprint;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A tracked production machine.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineInfo {
    pub instance_name: String,
    pub type_path: String,
    pub friendly_name: String,
    pub current_clock_speed: f64,
    /// Position of the entity in [`Blueprint::entities`].
    pub index: usize,
}

/// Outcome of one spec. Produced for every spec, including zero matches.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub machine_name: String,
    pub matched_count: usize,
    pub requested_clock_speed: f64,
}

/// Final inventory and per-spec report of a successful call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Adjustment {
    pub inventory: Vec<MachineInfo>,
    pub report: Vec<ReportEntry>,
}

impl Adjustment {
    /// Sum of matched counts across all report entries.
    pub fn total_matched(&self) -> usize {
        self.report.iter().map(|r| r.matched_count).sum()
    }

    /// Tracked machines per friendly name, in first-seen order.
    pub fn inventory_summary(&self) -> Vec<(String, usize)> {
        summarize(&self.inventory)
    }
}

/// Count machines per friendly name, in first-seen order.
pub fn summarize(inventory: &[MachineInfo]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for machine in inventory {
        match counts.iter_mut().find(|(name, _)| *name == machine.friendly_name) {
            Some((_, count)) => *count += 1,
            None => counts.push((machine.friendly_name.clone(), 1)),
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdjustError {
    #[error("unknown machine type '{name}' (known types: {})", .known.join(", "))]
    UnknownMachine { name: String, known: Vec<String> },
}

// ---------------------------------------------------------------------------
// AdjustmentEngine
// ---------------------------------------------------------------------------

/// Applies clock-speed specs to the machines of a blueprint.
#[derive(Debug, Clone, Copy)]
pub struct AdjustmentEngine<'r> {
    registry: &'r MachineRegistry,
}

impl<'r> AdjustmentEngine<'r> {
    pub fn new(registry: &'r MachineRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r MachineRegistry {
        self.registry
    }

    /// Snapshot every entity whose type path is registered, in scan order.
    pub fn take_inventory(&self, blueprint: &Blueprint) -> Vec<MachineInfo> {
        blueprint
            .entities()
            .iter()
            .enumerate()
            .filter_map(|(index, entity)| {
                let friendly_name = self.registry.machine_name(entity.type_path())?;
                Some(MachineInfo {
                    instance_name: entity.instance_name().to_string(),
                    type_path: entity.type_path().to_string(),
                    friendly_name: friendly_name.to_string(),
                    current_clock_speed: clock_speed(entity),
                    index,
                })
            })
            .collect()
    }

    /// Apply `specs` in order and report per spec.
    ///
    /// Later specs override earlier ones for the same machine kind. A spec
    /// naming an unknown machine aborts the call with
    /// [`AdjustError::UnknownMachine`]; writes made by earlier specs in the
    /// same batch stay on `blueprint` and are not rolled back.
    pub fn adjust(
        &self,
        blueprint: &mut Blueprint,
        specs: &[Spec],
    ) -> Result<Adjustment, AdjustError> {
        let mut inventory = self.take_inventory(blueprint);
        debug!(
            entities = blueprint.entity_count(),
            tracked = inventory.len(),
            "inventory built"
        );

        let entities = blueprint.entities_mut();
        let mut report = Vec::with_capacity(specs.len());
        for spec in specs {
            let Some(target) = self.registry.resolve_type_path(spec.machine_name()) else {
                warn!(machine = spec.machine_name(), "unknown machine type");
                return Err(AdjustError::UnknownMachine {
                    name: spec.machine_name().to_string(),
                    known: self.registry.known_names().map(str::to_string).collect(),
                });
            };

            let mut matched_count = 0;
            for machine in inventory.iter_mut().filter(|m| m.type_path == target) {
                set_clock_speed(&mut entities[machine.index], spec.clock_speed());
                machine.current_clock_speed = spec.clock_speed();
                matched_count += 1;
                debug!(
                    instance = %machine.instance_name,
                    clock_speed = spec.clock_speed(),
                    "clock speed set"
                );
            }

            if matched_count == 0 {
                warn!(machine = spec.machine_name(), "no machines matched");
            } else {
                info!(
                    machine = spec.machine_name(),
                    matched = matched_count,
                    clock_speed = spec.clock_speed(),
                    "adjusted"
                );
            }
            report.push(ReportEntry {
                machine_name: spec.machine_name().to_string(),
                matched_count,
                requested_clock_speed: spec.clock_speed(),
            });
        }

        Ok(Adjustment { inventory, report })
    }
}

/// Shorthand for `AdjustmentEngine::new(registry).adjust(blueprint, specs)`.
pub fn adjust(
    registry: &MachineRegistry,
    blueprint: &mut Blueprint,
    specs: &[Spec],
) -> Result<Adjustment, AdjustError> {
    AdjustmentEngine::new(registry).adjust(blueprint, specs)
}
