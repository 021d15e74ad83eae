use crate::battle::selection::SelectionPhase;
use crate::combatant::CombatantId;
use crate::roster::Side;
use schema::Effect;
use serde::{Deserialize, Serialize};

/// Battle-level state. Only `Active` lets time advance.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    Active,
    /// The player is mid-selection; readiness and enemy AI are frozen.
    Paused,
    /// Terminal. Every entry point is a no-op from here on.
    Finished,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Timing
    CombatantReady {
        side: Side,
        combatant: CombatantId,
        name: String,
    },

    // Player selection
    SelectionChanged {
        phase: SelectionPhase,
    },
    CursorMoved {
        phase: SelectionPhase,
        index: usize,
    },
    TargetsResolved {
        move_name: String,
        targets: Vec<CombatantId>,
    },

    // Move resolution
    MoveUsed {
        side: Side,
        actor: CombatantId,
        actor_name: String,
        move_name: String,
        target_names: Vec<String>,
    },
    DamageDealt {
        target: CombatantId,
        name: String,
        amount: i32,
        remaining_health: i32,
    },
    CombatantHealed {
        target: CombatantId,
        name: String,
        amount: i32,
        new_health: i32,
    },
    EffectIgnored {
        target: CombatantId,
        effect: Effect,
    },
    CombatantDefeated {
        side: Side,
        combatant: CombatantId,
        name: String,
    },

    // Battle End
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable line.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::CombatantReady { side, name, .. } => match side {
                Side::Player => Some(format!("{} is ready to act!", name)),
                Side::Enemy => None,
            },
            BattleEvent::SelectionChanged { .. }
            | BattleEvent::CursorMoved { .. }
            | BattleEvent::TargetsResolved { .. } => None,
            BattleEvent::MoveUsed {
                actor_name,
                move_name,
                target_names,
                ..
            } => {
                if target_names.is_empty() {
                    Some(format!("{} used {}!", actor_name, move_name))
                } else {
                    Some(format!(
                        "{} used {} on {}!",
                        actor_name,
                        move_name,
                        target_names.join(", ")
                    ))
                }
            }
            BattleEvent::DamageDealt { name, amount, .. } => {
                Some(format!("{} took {} damage!", name, amount))
            }
            BattleEvent::CombatantHealed { name, amount, .. } => {
                Some(format!("{} recovered {} health!", name, amount))
            }
            BattleEvent::EffectIgnored { .. } => None,
            BattleEvent::CombatantDefeated { name, .. } => Some(format!("{} was defeated!", name)),
            BattleEvent::BattleEnded { outcome } => match outcome {
                BattleOutcome::Victory => Some("Victory!".to_string()),
                BattleOutcome::Defeat => Some("Defeat...".to_string()),
            },
        }
    }
}

/// Event bus for collecting the events of one controller call.
///
/// ```rust,ignore
/// let events = controller.tick(dt)?;
/// for line in events.formatted() {
///     println!("{}", line);
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Human-readable lines for every non-silent event, in order.
    pub fn formatted(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}
