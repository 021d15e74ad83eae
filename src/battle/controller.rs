use crate::battle::ai::{Behavior, RandomBehavior};
use crate::battle::move_effects::apply_move;
use crate::battle::rng::BattleRng;
use crate::battle::selection::{cycle, Direction, SelectionPhase, SelectionState};
use crate::battle::state::{BattleEvent, BattleOutcome, BattleState, EventBus};
use crate::battle::targeting::{resolve_targets, TargetPick};
use crate::battle::view::{BattleView, CombatantView};
use crate::combatant::{Combatant, CombatantId};
use crate::errors::{BattleResult, RosterError, SelectionError};
use crate::roster::{Roster, Side};
use schema::{MoveDefinition, TargetClass};
use std::collections::HashSet;
use std::sync::Arc;

/// Owns both rosters and runs the battle.
///
/// The host drives it with `tick` once per frame and with the four player
/// entry points between ticks. Every call returns the events it produced;
/// calls with nothing to do return an empty bus.
#[derive(Debug)]
pub struct BattleController<B: Behavior = RandomBehavior> {
    rosters: [Roster; 2],
    battle_state: BattleState,
    selection: SelectionState,
    outcome: Option<BattleOutcome>,
    rng: BattleRng,
    behavior: B,
}

impl BattleController<RandomBehavior> {
    /// Initialize a battle between two rosters, enemies choosing moves at random.
    pub fn new(player: Vec<Combatant>, enemy: Vec<Combatant>, rng: BattleRng) -> BattleResult<Self> {
        Self::with_behavior(player, enemy, rng, RandomBehavior::new())
    }
}

impl<B: Behavior> BattleController<B> {
    pub fn with_behavior(
        player: Vec<Combatant>,
        enemy: Vec<Combatant>,
        rng: BattleRng,
        behavior: B,
    ) -> BattleResult<Self> {
        let mut seen = HashSet::new();
        validate_roster(Side::Player, &player, &mut seen)?;
        validate_roster(Side::Enemy, &enemy, &mut seen)?;

        tracing::debug!(
            player_count = player.len(),
            enemy_count = enemy.len(),
            "battle initialized"
        );

        Ok(Self {
            rosters: [Roster::new(Side::Player, player), Roster::new(Side::Enemy, enemy)],
            battle_state: BattleState::Active,
            selection: SelectionState::new(),
            outcome: None,
            rng,
            behavior,
        })
    }

    // === Queries ===

    pub fn battle_state(&self) -> BattleState {
        self.battle_state
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn phase(&self) -> SelectionPhase {
        self.selection.phase
    }

    pub fn unit_cursor(&self) -> usize {
        self.selection.unit_cursor
    }

    pub fn move_cursor(&self) -> usize {
        self.selection.move_cursor
    }

    pub fn target_cursor(&self) -> Option<usize> {
        self.selection.target_cursor
    }

    pub fn held_targets(&self) -> &[CombatantId] {
        &self.selection.targets
    }

    pub fn roster(&self, side: Side) -> &Roster {
        &self.rosters[side.to_index()]
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.rosters.iter().find_map(|roster| roster.find(id))
    }

    /// The player unit under the unit cursor.
    pub fn selected_unit(&self) -> Option<&Combatant> {
        self.rosters[Side::Player.to_index()].get(self.selection.unit_cursor)
    }

    /// The move under the move cursor, once a unit has been chosen.
    pub fn selected_move(&self) -> Option<&MoveDefinition> {
        match self.selection.phase {
            SelectionPhase::UnitSelect => None,
            _ => self
                .selected_unit()
                .and_then(|unit| unit.move_at(self.selection.move_cursor))
                .map(|definition| definition.as_ref()),
        }
    }

    /// Set once the battle is Finished.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.battle_state == BattleState::Finished
    }

    /// Snapshot of everything a presentation layer draws.
    pub fn view(&self) -> BattleView {
        let side_view = |side: Side| -> Vec<CombatantView> {
            self.rosters[side.to_index()]
                .iter()
                .map(CombatantView::from_combatant)
                .collect()
        };
        BattleView {
            battle_state: self.battle_state,
            outcome: self.outcome,
            selection: self.selection.clone(),
            player: side_view(Side::Player),
            enemy: side_view(Side::Enemy),
        }
    }

    // === Time ===

    /// Advance readiness by `dt` seconds and let every ready enemy act.
    ///
    /// Does nothing unless the battle is Active. Enemies act in roster order,
    /// each against the rosters left by the previous action; an enemy removed
    /// earlier in the same tick does not act.
    ///
    /// An error from one enemy's turn aborts the rest of the tick. Actions
    /// already taken this tick stay applied, but their events are not returned.
    pub fn tick(&mut self, dt: f32) -> BattleResult<EventBus> {
        let mut events = EventBus::new();
        if self.battle_state != BattleState::Active {
            return Ok(events);
        }

        for unit in self.rosters[Side::Player.to_index()].iter_mut() {
            if unit.regen_readiness(dt) {
                tracing::debug!(unit = unit.name(), "player unit ready");
                events.push(BattleEvent::CombatantReady {
                    side: Side::Player,
                    combatant: unit.id(),
                    name: unit.name().to_string(),
                });
            }
        }

        for id in self.rosters[Side::Enemy.to_index()].ids() {
            if self.battle_state == BattleState::Finished {
                break;
            }
            let Some(enemy) = self.rosters[Side::Enemy.to_index()].find_mut(id) else {
                continue;
            };
            if enemy.regen_readiness(dt) {
                events.push(BattleEvent::CombatantReady {
                    side: Side::Enemy,
                    combatant: id,
                    name: enemy.name().to_string(),
                });
            }
            if !enemy.is_action_ready() {
                continue;
            }
            self.run_enemy_turn(id, &mut events)?;
        }

        Ok(events)
    }

    fn run_enemy_turn(&mut self, id: CombatantId, events: &mut EventBus) -> BattleResult<()> {
        let enemies = &self.rosters[Side::Enemy.to_index()];
        let actor_index = enemies
            .position(id)
            .ok_or(RosterError::CombatantNotFound(id))?;
        let actor = enemies
            .get(actor_index)
            .ok_or(RosterError::CombatantNotFound(id))?;

        let move_index = self.behavior.choose_move(actor, &mut self.rng)?;
        let move_def = actor
            .move_at(move_index)
            .cloned()
            .ok_or(SelectionError::InvalidIndex {
                index: move_index,
                len: actor.moves().len(),
            })?;

        let resolved = resolve_targets(
            &move_def,
            Side::Enemy,
            actor_index,
            &self.rosters,
            TargetPick::Random(&mut self.rng),
        )?;

        self.perform_move(Side::Enemy, id, &move_def, resolved.targets, events);
        self.check_battle_end(Side::Enemy, events);
        Ok(())
    }

    // === Player entry points ===

    pub fn confirm(&mut self) -> BattleResult<EventBus> {
        let mut events = EventBus::new();
        if self.is_finished() {
            return Ok(events);
        }

        match self.selection.phase {
            SelectionPhase::UnitSelect => {
                let unit = self.cursor_unit()?;
                if !unit.is_action_ready() {
                    tracing::debug!(unit = unit.name(), "unit not ready; confirm ignored");
                    return Ok(events);
                }
                self.battle_state = BattleState::Paused;
                // Opening the menu from unit selection always starts at the top.
                self.selection.move_cursor = 0;
                self.set_phase(SelectionPhase::MoveSelect, &mut events);
            }
            SelectionPhase::MoveSelect => {
                let move_def = self.pending_move()?;
                let resolved = resolve_targets(
                    &move_def,
                    Side::Player,
                    self.selection.unit_cursor,
                    &self.rosters,
                    TargetPick::Default,
                )?;
                events.push(BattleEvent::TargetsResolved {
                    move_name: move_def.name.clone(),
                    targets: resolved.targets.clone(),
                });
                self.selection.targets = resolved.targets;
                self.selection.target_cursor = resolved.cursor;
                self.set_phase(SelectionPhase::TargetSelect, &mut events);
            }
            SelectionPhase::TargetSelect => {
                let actor_id = self.cursor_unit()?.id();
                let move_def = self.pending_move()?;
                let targets = std::mem::take(&mut self.selection.targets);
                self.selection.target_cursor = None;

                self.perform_move(Side::Player, actor_id, &move_def, targets, &mut events);

                self.battle_state = BattleState::Active;
                self.set_phase(SelectionPhase::UnitSelect, &mut events);
                self.check_battle_end(Side::Player, &mut events);
            }
        }

        Ok(events)
    }

    pub fn cancel(&mut self) -> BattleResult<EventBus> {
        let mut events = EventBus::new();
        if self.is_finished() {
            return Ok(events);
        }

        match self.selection.phase {
            SelectionPhase::UnitSelect => {}
            SelectionPhase::MoveSelect => {
                self.battle_state = BattleState::Active;
                self.set_phase(SelectionPhase::UnitSelect, &mut events);
            }
            SelectionPhase::TargetSelect => {
                self.selection.clear_targets();
                self.set_phase(SelectionPhase::MoveSelect, &mut events);
            }
        }

        Ok(events)
    }

    pub fn navigate_up(&mut self) -> BattleResult<EventBus> {
        self.navigate(Direction::Up)
    }

    pub fn navigate_down(&mut self) -> BattleResult<EventBus> {
        self.navigate(Direction::Down)
    }

    /// Move whichever cursor the current phase owns, wrapping at either end.
    pub fn navigate(&mut self, direction: Direction) -> BattleResult<EventBus> {
        let mut events = EventBus::new();
        if self.is_finished() {
            return Ok(events);
        }

        let phase = self.selection.phase;
        let index = match phase {
            SelectionPhase::UnitSelect => {
                let len = self.rosters[Side::Player.to_index()].len();
                self.selection.unit_cursor = cycle(self.selection.unit_cursor, len, direction)?;
                self.selection.unit_cursor
            }
            SelectionPhase::MoveSelect => {
                let len = self.cursor_unit()?.moves().len();
                self.selection.move_cursor = cycle(self.selection.move_cursor, len, direction)?;
                self.selection.move_cursor
            }
            SelectionPhase::TargetSelect => {
                let move_def = self.pending_move()?;
                if !move_def.has_adjustable_target() {
                    return Ok(events);
                }
                let side = match move_def.target_class {
                    TargetClass::Ally => Side::Player,
                    TargetClass::Enemy => Side::Enemy,
                    TargetClass::User => return Ok(events),
                };
                let roster = &self.rosters[side.to_index()];
                let current = self.selection.target_cursor.unwrap_or(0);
                let next = cycle(current, roster.len(), direction)?;
                let target = roster.get(next).ok_or(SelectionError::InvalidIndex {
                    index: next,
                    len: roster.len(),
                })?;
                self.selection.targets = vec![target.id()];
                self.selection.target_cursor = Some(next);
                next
            }
        };

        events.push(BattleEvent::CursorMoved { phase, index });
        Ok(events)
    }

    // === Internals ===

    fn cursor_unit(&self) -> BattleResult<&Combatant> {
        let roster = &self.rosters[Side::Player.to_index()];
        roster.get(self.selection.unit_cursor).ok_or_else(|| {
            tracing::warn!(
                cursor = self.selection.unit_cursor,
                len = roster.len(),
                "unit cursor outside player roster"
            );
            SelectionError::InvalidIndex {
                index: self.selection.unit_cursor,
                len: roster.len(),
            }
            .into()
        })
    }

    fn pending_move(&self) -> BattleResult<Arc<MoveDefinition>> {
        let unit = self.cursor_unit()?;
        unit.move_at(self.selection.move_cursor)
            .cloned()
            .ok_or_else(|| {
                SelectionError::InvalidIndex {
                    index: self.selection.move_cursor,
                    len: unit.moves().len(),
                }
                .into()
            })
    }

    fn set_phase(&mut self, phase: SelectionPhase, events: &mut EventBus) {
        tracing::debug!(from = ?self.selection.phase, to = ?phase, state = ?self.battle_state, "selection phase");
        self.selection.phase = phase;
        events.push(BattleEvent::SelectionChanged { phase });
    }

    /// Apply a move for `actor_id` and reset the actor's gauge if it survived.
    fn perform_move(
        &mut self,
        side: Side,
        actor_id: CombatantId,
        move_def: &MoveDefinition,
        mut targets: Vec<CombatantId>,
        events: &mut EventBus,
    ) {
        let actor_name = self
            .combatant(actor_id)
            .map(|c| c.name().to_string())
            .unwrap_or_default();
        let target_names: Vec<String> = targets
            .iter()
            .filter_map(|id| self.combatant(*id).map(|c| c.name().to_string()))
            .collect();
        tracing::info!(
            %side,
            actor = %actor_name,
            move_name = %move_def.name,
            targets = ?target_names,
            "move used"
        );
        events.push(BattleEvent::MoveUsed {
            side,
            actor: actor_id,
            actor_name,
            move_name: move_def.name.clone(),
            target_names,
        });

        let selected_before = self.selected_unit().map(Combatant::id);
        apply_move(move_def, &mut targets, &mut self.rosters, events);

        if let Some(actor) = self.rosters[side.to_index()].find_mut(actor_id) {
            actor.reset_readiness();
        }
        self.follow_unit_cursor(selected_before);
    }

    /// Keep the unit cursor on the same combatant after removals, or inside the
    /// roster when that combatant is gone.
    fn follow_unit_cursor(&mut self, previous: Option<CombatantId>) {
        let roster = &self.rosters[Side::Player.to_index()];
        if let Some(index) = previous.and_then(|id| roster.position(id)) {
            self.selection.unit_cursor = index;
        } else if !roster.is_empty() && self.selection.unit_cursor >= roster.len() {
            self.selection.unit_cursor = roster.len() - 1;
        }
    }

    /// If one action empties both sides, the acting side wins.
    fn check_battle_end(&mut self, acting_side: Side, events: &mut EventBus) {
        let player_empty = self.rosters[Side::Player.to_index()].is_empty();
        let enemy_empty = self.rosters[Side::Enemy.to_index()].is_empty();

        let outcome = match acting_side {
            Side::Enemy if player_empty => Some(BattleOutcome::Defeat),
            Side::Enemy if enemy_empty => Some(BattleOutcome::Victory),
            Side::Player if enemy_empty => Some(BattleOutcome::Victory),
            Side::Player if player_empty => Some(BattleOutcome::Defeat),
            _ => None,
        };

        if let Some(outcome) = outcome {
            self.battle_state = BattleState::Finished;
            self.outcome = Some(outcome);
            self.selection.clear_targets();
            tracing::info!(?outcome, "battle finished");
            events.push(BattleEvent::BattleEnded { outcome });
        }
    }
}

fn validate_roster(
    side: Side,
    members: &[Combatant],
    seen: &mut HashSet<CombatantId>,
) -> BattleResult<()> {
    if members.is_empty() {
        return Err(RosterError::EmptyRoster(side).into());
    }
    for member in members {
        if !seen.insert(member.id()) {
            return Err(RosterError::DuplicateCombatant(member.id()).into());
        }
        member
            .stats()
            .validate()
            .map_err(|reason| RosterError::InvalidStats {
                id: member.id(),
                reason,
            })?;
        if member.is_defeated() {
            return Err(RosterError::InvalidStats {
                id: member.id(),
                reason: "starts the battle with no health".to_string(),
            }
            .into());
        }
        if member.moves().is_empty() {
            return Err(RosterError::NoMoves(member.id()).into());
        }
    }
    Ok(())
}
