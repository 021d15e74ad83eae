//! A module for defining AI behaviors for the enemy side.

use crate::battle::rng::BattleRng;
use crate::combatant::Combatant;
use crate::errors::{BattleResult, RosterError};

/// A trait for any system that can decide what a ready enemy does.
/// Target choice for the chosen move is left to the random targeting path.
pub trait Behavior {
    /// Returns an index into `actor.moves()`.
    fn choose_move(&self, actor: &Combatant, rng: &mut BattleRng) -> BattleResult<usize>;
}

/// Picks any of the actor's moves with equal probability.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBehavior;

impl RandomBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomBehavior {
    fn choose_move(&self, actor: &Combatant, rng: &mut BattleRng) -> BattleResult<usize> {
        if actor.moves().is_empty() {
            return Err(RosterError::NoMoves(actor.id()).into());
        }
        rng.pick_index(actor.moves().len(), "enemy move")
    }
}
