use crate::combatant::CombatantId;
use crate::roster::Side;
use thiserror::Error;

/// Main error type for the battle core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleEngineError {
    /// Error related to roster construction or lookup
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),
    /// Error related to cursor or target selection
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
}

/// Errors related to the combatants a battle is built from
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    /// A side was handed to the battle without any combatants
    #[error("The {0} roster is empty")]
    EmptyRoster(Side),
    /// Two combatants share the same id
    #[error("Combatant id {0} is used more than once")]
    DuplicateCombatant(CombatantId),
    /// Stats that would break the health or readiness invariants
    #[error("Combatant {id} has invalid stats: {reason}")]
    InvalidStats { id: CombatantId, reason: String },
    /// A combatant with nothing to do when its turn comes
    #[error("Combatant {0} has no moves")]
    NoMoves(CombatantId),
    /// The combatant is not (or no longer) in any roster
    #[error("Combatant {0} not found")]
    CombatantNotFound(CombatantId),
}

/// Errors related to cursor navigation and target resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Index is out of bounds for the collection it points into
    #[error("Invalid index {index} for a collection of {len}")]
    InvalidIndex { index: usize, len: usize },
    /// Targets or cursors were computed against a side with nobody left
    #[error("No combatants left on the {0} side")]
    EmptyRoster(Side),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    /// A scripted random source ran out of values
    #[error("Random source exhausted while choosing: {0}")]
    RngExhausted(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;
