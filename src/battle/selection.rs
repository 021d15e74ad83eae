//! Player-side selection state: which menu is open and where each cursor sits.

use crate::combatant::CombatantId;
use crate::errors::{BattleResult, SelectionError};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    UnitSelect,
    MoveSelect,
    TargetSelect,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn delta(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

/// Move `index` one step in `direction`, wrapping around a collection of `len`.
///
/// An empty collection has no valid cursor position and is rejected.
pub fn cycle(index: usize, len: usize, direction: Direction) -> BattleResult<usize> {
    if len == 0 {
        return Err(SelectionError::InvalidIndex { index, len }.into());
    }
    let len = len as isize;
    let start = (index as isize).rem_euclid(len);
    Ok((start + direction.delta()).rem_euclid(len) as usize)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub phase: SelectionPhase,
    /// Index into the player roster.
    pub unit_cursor: usize,
    /// Index into the selected unit's move list.
    pub move_cursor: usize,
    /// Targets the pending move will hit, in application order.
    pub targets: Vec<CombatantId>,
    /// Set only while a single ally/enemy target can be re-aimed.
    pub target_cursor: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            phase: SelectionPhase::UnitSelect,
            unit_cursor: 0,
            move_cursor: 0,
            targets: Vec::new(),
            target_cursor: None,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
        self.target_cursor = None;
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}
