//! Reading and writing the clock-speed property pair on an entity.

use clockwork_blueprint::{Entity, Property};

/// Property holding the clock speed a machine currently runs at.
pub const CURRENT_POTENTIAL: &str = "mCurrentPotential";

/// Property holding the clock speed the machine will switch to.
pub const PENDING_POTENTIAL: &str = "mPendingPotential";

/// Clock speed assumed when the property is missing (100%).
pub const DEFAULT_CLOCK_SPEED: f64 = 1.0;

fn read_potential(entity: &Entity, property: &str) -> f64 {
    entity
        .property(property)
        .and_then(Property::as_float)
        .unwrap_or(DEFAULT_CLOCK_SPEED)
}

/// Current clock speed, or `1.0` when absent or not a float.
pub fn clock_speed(entity: &Entity) -> f64 {
    read_potential(entity, CURRENT_POTENTIAL)
}

/// Pending clock speed, or `1.0` when absent or not a float.
pub fn pending_clock_speed(entity: &Entity) -> f64 {
    read_potential(entity, PENDING_POTENTIAL)
}

/// Create or overwrite both potential properties with `value`. No other
/// property is touched.
pub fn set_clock_speed(entity: &mut Entity, value: f64) {
    entity.set_property(CURRENT_POTENTIAL, Property::Float(value));
    entity.set_property(PENDING_POTENTIAL, Property::Float(value));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> Entity {
        Entity::new(
            "/Game/FactoryGame/Buildable/Factory/Blender/Build_Blender.Build_Blender_C",
            "Persistent_Level:PersistentLevel.Build_Blender_C_1",
        )
    }

    #[test]
    fn absent_defaults_to_one() {
        let e = machine();
        assert_eq!(clock_speed(&e), 1.0);
        assert_eq!(pending_clock_speed(&e), 1.0);
    }

    #[test]
    fn reads_stored_value() {
        let e = machine()
            .with_property(CURRENT_POTENTIAL, Property::Float(2.5))
            .with_property(PENDING_POTENTIAL, Property::Float(0.5));
        assert_eq!(clock_speed(&e), 2.5);
        assert_eq!(pending_clock_speed(&e), 0.5);
    }

    #[test]
    fn wrong_kind_defaults_to_one() {
        let e = machine()
            .with_property(CURRENT_POTENTIAL, Property::Int(3))
            .with_property(PENDING_POTENTIAL, Property::Str("2".into()));
        assert_eq!(clock_speed(&e), 1.0);
        assert_eq!(pending_clock_speed(&e), 1.0);
    }

    #[test]
    fn set_writes_both_properties() {
        let mut e = machine();
        set_clock_speed(&mut e, 1.5);
        assert_eq!(e.property(CURRENT_POTENTIAL), Some(&Property::Float(1.5)));
        assert_eq!(e.property(PENDING_POTENTIAL), Some(&Property::Float(1.5)));
        assert_eq!(clock_speed(&e), pending_clock_speed(&e));
    }

    #[test]
    fn set_reads_back_exactly() {
        let mut e = machine();
        for value in [3.66, 0.1, 2.345_678_9, 250.0 / 3.0] {
            set_clock_speed(&mut e, value);
            assert_eq!(clock_speed(&e), value);
            assert_eq!(pending_clock_speed(&e), value);
        }
    }

    #[test]
    fn set_overwrites_divergent_values() {
        let mut e = machine()
            .with_property(CURRENT_POTENTIAL, Property::Float(0.7))
            .with_property(PENDING_POTENTIAL, Property::Int(9));
        set_clock_speed(&mut e, 2.0);
        assert_eq!(clock_speed(&e), 2.0);
        assert_eq!(pending_clock_speed(&e), 2.0);
    }

    #[test]
    fn set_leaves_other_properties_alone() {
        let mut e = machine()
            .with_property("mIsProductionPaused", Property::Bool(true))
            .with_property("mCurrentRecipe", Property::Object("/Game/Recipe_X".into()));
        let before = e.properties().clone();
        set_clock_speed(&mut e, 0.25);
        assert_eq!(e.properties().len(), before.len() + 2);
        for (name, value) in &before {
            assert_eq!(e.property(name), Some(value));
        }
    }
}
