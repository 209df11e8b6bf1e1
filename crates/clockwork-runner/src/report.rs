//! Human-readable lines for an adjustment.

use clockwork_core::registry::extract_class_name;
use clockwork_core::{Adjustment, MachineInfo, format_clock_speed};

/// One line per tracked machine kind: `smelter x4`.
pub fn describe_inventory(adjustment: &Adjustment) -> Vec<String> {
    adjustment
        .inventory_summary()
        .into_iter()
        .map(|(name, count)| format!("{name} x{count}"))
        .collect()
}

/// One line per spec: `manufacturer: 2 machine(s) set to 366.0%`.
pub fn describe_report(adjustment: &Adjustment) -> Vec<String> {
    adjustment
        .report
        .iter()
        .map(|entry| {
            format!(
                "{}: {} machine(s) set to {}",
                entry.machine_name,
                entry.matched_count,
                format_clock_speed(entry.requested_clock_speed)
            )
        })
        .collect()
}

/// Detail line for a single machine: `Constructor Mk1 (...ConstructorMk1_C_3) @ 150.0%`.
pub fn describe_machine(machine: &MachineInfo) -> String {
    format!(
        "{} ({}) @ {}",
        extract_class_name(&machine.type_path),
        machine.instance_name,
        format_clock_speed(machine.current_clock_speed)
    )
}
