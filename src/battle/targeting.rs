//! Turns a move's targeting rule into the concrete combatants it will hit.

use crate::battle::rng::BattleRng;
use crate::combatant::CombatantId;
use crate::errors::{BattleResult, SelectionError};
use crate::roster::{Roster, Side};
use schema::{MoveDefinition, TargetClass, TargetCount};

/// How a single-target move picks its one target.
pub enum TargetPick<'a> {
    /// Player path: the first enemy, or the acting unit itself for ally moves.
    /// The controller lets the player re-aim afterwards.
    Default,
    /// AI path: uniformly random over the candidate roster.
    Random(&'a mut BattleRng),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTargets {
    pub targets: Vec<CombatantId>,
    /// Index of the single target inside its roster, when it can be re-aimed.
    pub cursor: Option<usize>,
}

/// Resolve `move_def` used by the combatant at `actor_index` of `acting_side`.
///
/// Never cached: callers resolve again for every move choice, since removals
/// change both roster contents and indices.
pub fn resolve_targets(
    move_def: &MoveDefinition,
    acting_side: Side,
    actor_index: usize,
    rosters: &[Roster; 2],
    pick: TargetPick<'_>,
) -> BattleResult<ResolvedTargets> {
    let own = &rosters[acting_side.to_index()];
    let opposing = &rosters[acting_side.opponent().to_index()];
    let actor = own.get(actor_index).ok_or(SelectionError::InvalidIndex {
        index: actor_index,
        len: own.len(),
    })?;

    match (move_def.target_count, move_def.target_class) {
        (_, TargetClass::User) => Ok(ResolvedTargets {
            targets: vec![actor.id()],
            cursor: None,
        }),
        (TargetCount::Single, TargetClass::Enemy) => single_target(opposing, 0, pick),
        (TargetCount::Single, TargetClass::Ally) => single_target(own, actor_index, pick),
        (TargetCount::All, TargetClass::Enemy) => whole_roster(opposing),
        (TargetCount::All, TargetClass::Ally) => whole_roster(own),
    }
}

fn single_target(
    roster: &Roster,
    default_index: usize,
    pick: TargetPick<'_>,
) -> BattleResult<ResolvedTargets> {
    if roster.is_empty() {
        return Err(SelectionError::EmptyRoster(roster.side()).into());
    }
    let index = match pick {
        TargetPick::Default => default_index,
        TargetPick::Random(rng) => rng.pick_index(roster.len(), "single target")?,
    };
    let target = roster.get(index).ok_or(SelectionError::InvalidIndex {
        index,
        len: roster.len(),
    })?;
    Ok(ResolvedTargets {
        targets: vec![target.id()],
        cursor: Some(index),
    })
}

fn whole_roster(roster: &Roster) -> BattleResult<ResolvedTargets> {
    if roster.is_empty() {
        return Err(SelectionError::EmptyRoster(roster.side()).into());
    }
    Ok(ResolvedTargets {
        targets: roster.ids(),
        cursor: None,
    })
}
