//! atb-battle: Active-Time Battle Core
//!
//! A turn-based battle simulation where every combatant fills a readiness
//! gauge over time. Enemies act automatically the moment their gauge is
//! full; the player picks a ready unit, a move and its targets through a
//! small menu state machine. The host owns the clock, the input device and
//! all rendering.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod combatant;
pub mod config;
pub mod errors;
pub mod roster;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{CombatantStats, Effect, MoveDefinition, TargetClass, TargetCount};

// --- From this crate's modules (`src/`) ---

// Battle driver and its observable state.
pub use battle::controller::BattleController;
pub use battle::rng::BattleRng;
pub use battle::selection::{Direction, SelectionPhase, SelectionState};
pub use battle::state::{BattleEvent, BattleOutcome, BattleState, EventBus};
pub use battle::view::{BattleView, CombatantView};

// Runtime participants.
pub use combatant::{Combatant, CombatantId};
pub use roster::{Roster, Side};

// Host data layer.
pub use config::{BattleConfig, ConfigError};

// Crate-specific error and result types.
pub use errors::{BattleEngineError, BattleResult, BattleStateError, RosterError, SelectionError};
