pub mod loader;
pub mod schema;

pub use loader::{
    DataLoadError, Format, detect_format, load_machine_table, load_registry, parse_machine_table,
};
