// atb-battle Schema - Shared record definitions
// This crate contains the immutable records a host's data layer hands to the
// battle core: per-kind combatant stats and move definitions. They are plain
// serde types so any loader can produce them.

pub use combatant_stats::*;
pub use move_types::*;

pub mod combatant_stats;
pub mod move_types;
