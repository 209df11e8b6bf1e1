//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::clock::{CURRENT_POTENTIAL, PENDING_POTENTIAL};
use crate::registry::{DEFAULT_MACHINES, extract_class_name};
use clockwork_blueprint::{Blueprint, Entity, Property};

/// Type path of a built-in machine. Panics on unknown names.
pub fn type_path(friendly_name: &str) -> &'static str {
    DEFAULT_MACHINES
        .iter()
        .find(|(name, _)| *name == friendly_name)
        .map(|&(_, path)| path)
        .unwrap_or_else(|| panic!("no built-in machine named '{friendly_name}'"))
}

fn instance_name(type_path: &str, n: u32) -> String {
    let class = type_path.rsplit('.').next().unwrap_or(type_path);
    format!("Persistent_Level:PersistentLevel.{class}_{n}")
}

/// A built-in machine with no potential properties set.
pub fn machine(friendly_name: &str, n: u32) -> Entity {
    let path = type_path(friendly_name);
    Entity::new(path, instance_name(path, n))
        .with_property("mProductivityMonitorEnabled", Property::Bool(false))
}

/// A built-in machine with both potentials set to `clock_speed`.
pub fn machine_at(friendly_name: &str, n: u32, clock_speed: f64) -> Entity {
    machine(friendly_name, n)
        .with_property(CURRENT_POTENTIAL, Property::Float(clock_speed))
        .with_property(PENDING_POTENTIAL, Property::Float(clock_speed))
}

/// An entity of an arbitrary, usually unregistered, type path.
pub fn foreign_entity(type_path: &str, n: u32) -> Entity {
    Entity::new(type_path, instance_name(type_path, n))
        .with_property("mBuiltWithRecipe", Property::Object(extract_class_name(type_path)))
}

/// A blueprint named `test` holding `entities`.
pub fn blueprint(entities: Vec<Entity>) -> Blueprint {
    Blueprint::with_entities("test", entities)
}

/// A blueprint with `per_kind` instances of every built-in machine, plus one
/// unregistered entity between kinds.
pub fn mixed_factory(per_kind: u32) -> Blueprint {
    let mut bp = Blueprint::new("mixed");
    for (kind_index, &(name, _)) in DEFAULT_MACHINES.iter().enumerate() {
        for n in 0..per_kind {
            bp.push_entity(machine(name, n));
        }
        bp.push_entity(foreign_entity(
            "/Game/FactoryGame/Buildable/Factory/ConveyorBeltMk1/Build_ConveyorBeltMk1.Build_ConveyorBeltMk1_C",
            kind_index as u32,
        ));
    }
    bp
}
