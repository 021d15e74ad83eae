use crate::battle::controller::BattleController;
use crate::battle::rng::BattleRng;
use crate::combatant::{Combatant, CombatantId};
use crate::errors::BattleResult;
use schema::{CombatantStats, Effect, MoveDefinition, TargetClass, TargetCount};
use std::sync::Arc;

/// A builder for creating test combatants with common defaults.
///
/// Defaults: 20 health, a 10-point readiness gauge regenerating at 1 per
/// second, and a single-target "Strike" for 3 damage.
///
/// # Example
/// ```ignore
/// let knight = TestCombatantBuilder::new(1, "Knight")
///     .with_max_health(10)
///     .with_health(4)
///     .ready()
///     .build();
/// ```
pub struct TestCombatantBuilder {
    id: u32,
    name: String,
    max_health: i32,
    max_readiness: f32,
    regen_rate: f32,
    moves: Option<Vec<Arc<MoveDefinition>>>,
    health: Option<i32>,
    readiness: Option<f32>,
}

impl TestCombatantBuilder {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            max_health: 20,
            max_readiness: 10.0,
            regen_rate: 1.0,
            moves: None,
            health: None,
            readiness: None,
        }
    }

    pub fn with_max_health(mut self, max_health: i32) -> Self {
        self.max_health = max_health;
        self
    }

    /// Sets current health. If not set, health will be max.
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_max_readiness(mut self, max_readiness: f32) -> Self {
        self.max_readiness = max_readiness;
        self
    }

    pub fn with_regen_rate(mut self, regen_rate: f32) -> Self {
        self.regen_rate = regen_rate;
        self
    }

    pub fn with_readiness(mut self, readiness: f32) -> Self {
        self.readiness = Some(readiness);
        self
    }

    /// Starts the combatant with a full gauge.
    pub fn ready(mut self) -> Self {
        self.readiness = Some(self.max_readiness);
        self
    }

    pub fn with_moves(mut self, moves: Vec<Arc<MoveDefinition>>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn build(self) -> Combatant {
        let stats = Arc::new(CombatantStats::new(
            self.max_health,
            self.max_readiness,
            self.regen_rate,
        ));
        let moves = self.moves.unwrap_or_else(|| {
            vec![single_move(
                "Strike",
                Effect::Damage,
                3,
                TargetClass::Enemy,
                TargetCount::Single,
            )]
        });
        let mut combatant = Combatant::new(CombatantId(self.id), self.name, stats, moves);
        if let Some(health) = self.health {
            combatant.set_health_for_test(health);
        }
        if let Some(readiness) = self.readiness {
            combatant.set_readiness_for_test(readiness);
        }
        combatant
    }
}

pub fn single_move(
    name: &str,
    effect: Effect,
    magnitude: i32,
    target_class: TargetClass,
    target_count: TargetCount,
) -> Arc<MoveDefinition> {
    Arc::new(MoveDefinition::new(
        name,
        effect,
        magnitude,
        target_class,
        target_count,
    ))
}

/// Creates a `BattleRng` with a long list of zeroes, so every random pick
/// takes the first candidate without running dry.
pub fn predictable_rng() -> BattleRng {
    BattleRng::new_for_test(vec![0; 100])
}

/// Creates a battle with a predictable RNG, panicking on invalid rosters.
pub fn create_test_battle(player: Vec<Combatant>, enemy: Vec<Combatant>) -> BattleController {
    assert_ok(BattleController::new(player, enemy, predictable_rng()))
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
