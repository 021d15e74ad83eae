use serde::{Deserialize, Serialize};

/// Static numbers shared by every combatant of one kind.
///
/// Stats are never mutated during a battle; combatants hold them behind an
/// `Arc` and keep their own runtime health and readiness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantStats {
    pub max_health: i32,
    /// Carried for content authors; the core does not read it.
    #[serde(default)]
    pub attack_power: i32,
    pub max_readiness: f32,
    /// Carried for content authors; the core does not read it.
    #[serde(default)]
    pub max_stamina: f32,
    /// Readiness gained per second of battle time.
    pub regen_rate: f32,
}

impl CombatantStats {
    pub fn new(max_health: i32, max_readiness: f32, regen_rate: f32) -> Self {
        Self {
            max_health,
            attack_power: 0,
            max_readiness,
            max_stamina: 0.0,
            regen_rate,
        }
    }

    /// Describes the first field that makes these stats unusable in a battle.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_health <= 0 {
            return Err(format!("max_health must be positive, got {}", self.max_health));
        }
        if !(self.max_readiness > 0.0) {
            return Err(format!(
                "max_readiness must be positive, got {}",
                self.max_readiness
            ));
        }
        if !(self.regen_rate >= 0.0) {
            return Err(format!(
                "regen_rate must not be negative, got {}",
                self.regen_rate
            ));
        }
        Ok(())
    }
}
