//! Host-side data layer: reads stats, moves and both rosters from RON.
//!
//! The battle core never reads files. This module exists so a host (the demo
//! binary, a test, a tool) can turn an authored document into the shared
//! records and combatants the core consumes.

use crate::battle::controller::BattleController;
use crate::battle::rng::BattleRng;
use crate::combatant::{Combatant, CombatantId};
use crate::errors::BattleEngineError;
use schema::{CombatantStats, MoveDefinition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// The battle shipped with the binary, used when no config path is given.
pub const DEFAULT_BATTLE_RON: &str = include_str!("../data/battle.ron");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("unit '{unit}' refers to unknown stats '{key}'")]
    UnknownStats { unit: String, key: String },
    #[error("unit '{unit}' refers to unknown move '{key}'")]
    UnknownMove { unit: String, key: String },
    #[error("config does not describe a playable battle: {0}")]
    Battle(#[from] BattleEngineError),
}

/// One combatant as authored: a display name plus keys into the shared tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConfig {
    pub name: String,
    pub stats: String,
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Fixed seed for the enemy AI; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    pub stats: BTreeMap<String, CombatantStats>,
    pub moves: BTreeMap<String, MoveDefinition>,
    pub player: Vec<UnitConfig>,
    pub enemy: Vec<UnitConfig>,
}

impl BattleConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            stats = config.stats.len(),
            moves = config.moves.len(),
            "loaded battle config"
        );
        Ok(config)
    }

    pub fn default_battle() -> Result<Self, ConfigError> {
        Self::from_ron_str(DEFAULT_BATTLE_RON)
    }

    /// Resolve every key into shared records and build both rosters.
    ///
    /// Each stats and move record is allocated once and shared by every unit
    /// that names it. Ids are assigned in document order, players first.
    pub fn build_rosters(&self) -> Result<(Vec<Combatant>, Vec<Combatant>), ConfigError> {
        let stats: BTreeMap<&str, Arc<CombatantStats>> = self
            .stats
            .iter()
            .map(|(key, value)| (key.as_str(), Arc::new(value.clone())))
            .collect();
        let moves: BTreeMap<&str, Arc<MoveDefinition>> = self
            .moves
            .iter()
            .map(|(key, value)| (key.as_str(), Arc::new(value.clone())))
            .collect();

        let mut next_id = 1;
        let mut build_side = |units: &[UnitConfig]| -> Result<Vec<Combatant>, ConfigError> {
            units
                .iter()
                .map(|unit| {
                    let unit_stats = stats.get(unit.stats.as_str()).cloned().ok_or_else(|| {
                        ConfigError::UnknownStats {
                            unit: unit.name.clone(),
                            key: unit.stats.clone(),
                        }
                    })?;
                    let unit_moves = unit
                        .moves
                        .iter()
                        .map(|key| {
                            moves.get(key.as_str()).cloned().ok_or_else(|| ConfigError::UnknownMove {
                                unit: unit.name.clone(),
                                key: key.clone(),
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    let id = CombatantId(next_id);
                    next_id += 1;
                    Ok(Combatant::new(id, unit.name.clone(), unit_stats, unit_moves))
                })
                .collect()
        };

        let player = build_side(&self.player)?;
        let enemy = build_side(&self.enemy)?;
        Ok((player, enemy))
    }

    /// Build a ready-to-run controller. `seed` overrides the document's seed.
    pub fn build_controller(&self, seed: Option<u64>) -> Result<BattleController, ConfigError> {
        let (player, enemy) = self.build_rosters()?;
        let rng = match seed.or(self.seed) {
            Some(seed) => BattleRng::from_seed(seed),
            None => BattleRng::new_random(),
        };
        Ok(BattleController::new(player, enemy, rng)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RosterError;
    use crate::roster::Side;
    use pretty_assertions::assert_eq;

    const SMALL_BATTLE: &str = r#"(
        seed: Some(7),
        stats: {
            "soldier": (max_health: 10, max_readiness: 5.0, regen_rate: 1.0),
        },
        moves: {
            "jab": (name: "Jab", effect: Damage, magnitude: 3, target_class: Enemy, target_count: Single),
            "rally": (name: "Rally", effect: Heal, magnitude: 2, target_class: Ally, target_count: All),
            "brace": (name: "Brace", effect: Block, magnitude: 0, target_class: Self, target_count: Single),
        },
        player: [
            (name: "Ann", stats: "soldier", moves: ["jab", "rally"]),
            (name: "Bo", stats: "soldier", moves: ["jab", "brace"]),
        ],
        enemy: [
            (name: "Grunt", stats: "soldier", moves: ["jab"]),
        ],
    )"#;

    #[test]
    fn test_build_rosters_shares_records_and_numbers_ids() {
        let config = BattleConfig::from_ron_str(SMALL_BATTLE).unwrap();
        assert_eq!(config.seed, Some(7));

        let (player, enemy) = config.build_rosters().unwrap();
        let ids: Vec<_> = player.iter().chain(enemy.iter()).map(Combatant::id).collect();
        assert_eq!(ids, vec![CombatantId(1), CombatantId(2), CombatantId(3)]);

        // Same record, same allocation.
        assert!(Arc::ptr_eq(&player[0].moves()[0], &enemy[0].moves()[0]));
        assert_eq!(player[1].moves()[1].target_class, schema::TargetClass::User);
        assert_eq!(player[0].current_health(), 10);
    }

    #[test]
    fn test_unknown_keys_are_reported() {
        let mut config = BattleConfig::from_ron_str(SMALL_BATTLE).unwrap();
        config.enemy[0].moves.push("fireball".to_string());
        match config.build_rosters() {
            Err(ConfigError::UnknownMove { unit, key }) => {
                assert_eq!(unit, "Grunt");
                assert_eq!(key, "fireball");
            }
            other => panic!("expected UnknownMove, got {:?}", other.map(|_| ())),
        }

        config.player[0].stats = "wizard".to_string();
        assert!(matches!(
            config.build_rosters(),
            Err(ConfigError::UnknownStats { .. })
        ));
    }

    #[test]
    fn test_empty_side_is_rejected_by_controller() {
        let mut config = BattleConfig::from_ron_str(SMALL_BATTLE).unwrap();
        config.enemy.clear();
        match config.build_controller(None) {
            Err(ConfigError::Battle(BattleEngineError::Roster(RosterError::EmptyRoster(side)))) => {
                assert_eq!(side, Side::Enemy)
            }
            other => panic!("expected EmptyRoster, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_malformed_document_is_a_parse_error() {
        assert!(matches!(
            BattleConfig::from_ron_str("(stats: {"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_default_battle_builds() {
        let config = BattleConfig::default_battle().unwrap();
        let controller = config.build_controller(Some(1)).unwrap();
        assert!(!controller.roster(Side::Player).is_empty());
        assert!(!controller.roster(Side::Enemy).is_empty());
    }
}
