//! Applies a resolved move to its targets.

use crate::battle::state::{BattleEvent, EventBus};
use crate::combatant::CombatantId;
use crate::roster::{Roster, Side};
use schema::{Effect, MoveDefinition};

fn owning_side(rosters: &[Roster; 2], id: CombatantId) -> Option<Side> {
    [Side::Player, Side::Enemy]
        .into_iter()
        .find(|side| rosters[side.to_index()].contains(id))
}

/// Apply `move_def` to every id in `targets`, last to first.
///
/// A lethal hit removes the combatant from its owning roster and from
/// `targets` in the same step; iterating backwards keeps the remaining indices
/// valid while the list shrinks.
pub fn apply_move(
    move_def: &MoveDefinition,
    targets: &mut Vec<CombatantId>,
    rosters: &mut [Roster; 2],
    events: &mut EventBus,
) {
    for i in (0..targets.len()).rev() {
        let id = targets[i];
        let Some(side) = owning_side(rosters, id) else {
            tracing::warn!(target_id = %id, "skipping target that is no longer in any roster");
            targets.remove(i);
            continue;
        };
        let roster = &mut rosters[side.to_index()];
        let Some(target) = roster.find_mut(id) else {
            continue;
        };

        match move_def.effect {
            Effect::Damage => {
                let before = target.current_health();
                target.take_damage(move_def.magnitude);
                events.push(BattleEvent::DamageDealt {
                    target: id,
                    name: target.name().to_string(),
                    amount: before - target.current_health(),
                    remaining_health: target.current_health(),
                });
                if target.is_defeated() {
                    targets.remove(i);
                    if let Some(fallen) = roster.remove(id) {
                        tracing::debug!(target_id = %id, name = fallen.name(), %side, "combatant removed");
                        events.push(BattleEvent::CombatantDefeated {
                            side,
                            combatant: id,
                            name: fallen.name().to_string(),
                        });
                    }
                }
            }
            Effect::Heal => {
                let before = target.current_health();
                target.heal(move_def.magnitude);
                events.push(BattleEvent::CombatantHealed {
                    target: id,
                    name: target.name().to_string(),
                    amount: target.current_health() - before,
                    new_health: target.current_health(),
                });
            }
            Effect::Block => {
                tracing::debug!(move_name = %move_def.name, target_id = %id, "block has no effect yet");
                events.push(BattleEvent::EffectIgnored {
                    target: id,
                    effect: Effect::Block,
                });
            }
        }
    }
}
