use crate::battle::selection::SelectionState;
use crate::battle::state::{BattleOutcome, BattleState};
use crate::combatant::{Combatant, CombatantId};
use serde::{Deserialize, Serialize};

/// Information about the current battle for presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleView {
    pub battle_state: BattleState,
    pub outcome: Option<BattleOutcome>,
    pub selection: SelectionState,
    pub player: Vec<CombatantView>,
    pub enemy: Vec<CombatantView>,
}

/// Information about one live combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub current_health: i32,
    pub max_health: i32,
    pub current_readiness: f32,
    pub max_readiness: f32,
    /// Gauge fill in `0..=1`.
    pub readiness_fraction: f32,
    pub is_ready: bool,
    pub moves: Vec<String>,
}

impl CombatantView {
    pub fn from_combatant(combatant: &Combatant) -> Self {
        CombatantView {
            id: combatant.id(),
            name: combatant.name().to_string(),
            current_health: combatant.current_health(),
            max_health: combatant.max_health(),
            current_readiness: combatant.current_readiness(),
            max_readiness: combatant.max_readiness(),
            readiness_fraction: combatant.readiness_fraction(),
            is_ready: combatant.is_action_ready(),
            moves: combatant.moves().iter().map(|m| m.name.clone()).collect(),
        }
    }
}
