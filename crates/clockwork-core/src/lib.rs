//! Clockwork Core -- clock-speed adjustment for production machines in a
//! decoded blueprint.
//!
//! # Adjustment Pipeline
//!
//! 1. **Parse** -- [`spec::parse_specs`] turns `Name:Multiplier,...` text into
//!    an ordered list of [`spec::Spec`] values.
//! 2. **Inventory** -- [`engine::AdjustmentEngine`] scans the blueprint and
//!    tracks every entity whose type path the [`registry::MachineRegistry`]
//!    knows.
//! 3. **Apply** -- Each spec is resolved to a type path; every tracked machine
//!    of that type gets both potential properties overwritten through
//!    [`clock::set_clock_speed`].
//! 4. **Report** -- One [`engine::ReportEntry`] per spec, zero matches
//!    included.
//!
//! ```rust,ignore
//! let registry = MachineRegistry::default();
//! let specs = parse_specs("Refinery:2, Manufacturer:3.66")?;
//! let adjustment = adjust(&registry, &mut blueprint, &specs)?;
//! for entry in &adjustment.report {
//!     println!("{} x{} -> {}", entry.machine_name, entry.matched_count,
//!         format_clock_speed(entry.requested_clock_speed));
//! }
//! ```
//!
//! # Key Types
//!
//! - [`spec::Spec`] -- One validated `(machine name, multiplier)` pair.
//! - [`registry::MachineRegistry`] -- Friendly name <-> type path table,
//!   injected rather than global.
//! - [`engine::AdjustmentEngine`] -- Inventory and apply passes.
//! - [`engine::Adjustment`] -- Final inventory plus per-spec report.

pub mod clock;
pub mod engine;
pub mod format;
pub mod registry;
pub mod spec;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use engine::{AdjustError, Adjustment, AdjustmentEngine, MachineInfo, ReportEntry, adjust};
pub use format::format_clock_speed;
pub use registry::{MachineEntry, MachineRegistry, RegistryError};
pub use spec::{Spec, SpecError, parse_specs};
