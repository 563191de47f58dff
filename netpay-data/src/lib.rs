pub mod defaults;
pub mod loader;

pub use defaults::{
    default_bracket_rows, default_fx_rate, default_overlay_config, default_policy,
    default_schedule,
};
pub use loader::{BracketTableError, BracketTableLoader, BracketTableRecord};
