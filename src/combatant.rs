use schema::{CombatantStats, MoveDefinition};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable handle for one combatant. Presentation layers key their visuals by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Runtime state for one participant of a battle.
///
/// Health and readiness are clamped on every write, so
/// `0 <= current_health <= max_health` and
/// `0 <= current_readiness <= max_readiness` hold after any sequence of calls.
/// Serialize-only: a combatant is always built through `new`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combatant {
    id: CombatantId,
    name: String,
    stats: Arc<CombatantStats>,
    current_health: i32,
    current_readiness: f32,
    moves: Vec<Arc<MoveDefinition>>,
}

impl Combatant {
    /// Create a combatant at full health with an empty readiness gauge.
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        stats: Arc<CombatantStats>,
        moves: Vec<Arc<MoveDefinition>>,
    ) -> Self {
        let current_health = stats.max_health.max(0);
        Combatant {
            id,
            name: name.into(),
            stats,
            current_health,
            current_readiness: 0.0,
            moves,
        }
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &CombatantStats {
        &self.stats
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn max_health(&self) -> i32 {
        self.stats.max_health
    }

    pub fn current_readiness(&self) -> f32 {
        self.current_readiness
    }

    pub fn max_readiness(&self) -> f32 {
        self.stats.max_readiness
    }

    pub fn moves(&self) -> &[Arc<MoveDefinition>] {
        &self.moves
    }

    pub fn move_at(&self, index: usize) -> Option<&Arc<MoveDefinition>> {
        self.moves.get(index)
    }

    pub fn is_defeated(&self) -> bool {
        self.current_health == 0
    }

    /// Subtract health. Negative amounts are accepted and heal instead.
    pub fn take_damage(&mut self, amount: i32) {
        self.set_health(self.current_health.saturating_sub(amount));
    }

    /// Add health. Negative amounts are accepted and hurt instead.
    pub fn heal(&mut self, amount: i32) {
        self.set_health(self.current_health.saturating_add(amount));
    }

    fn set_health(&mut self, value: i32) {
        self.current_health = value.clamp(0, self.stats.max_health.max(0));
    }

    /// Advance the readiness gauge by `dt` seconds.
    ///
    /// Returns true only on the call that fills the gauge.
    pub fn regen_readiness(&mut self, dt: f32) -> bool {
        if self.current_readiness == self.stats.max_readiness {
            return false;
        }
        let max = self.stats.max_readiness.max(0.0);
        let next = self.current_readiness + self.stats.regen_rate * dt;
        // A NaN step (bad dt, or 0 * inf) leaves the gauge where it was.
        if next.is_nan() {
            return false;
        }
        self.current_readiness = next.clamp(0.0, max);
        self.is_action_ready()
    }

    /// A full gauge. The gauge is clamped to its max, so exact equality is reachable.
    /// Degenerate gauges (max <= 0) never count as ready.
    pub fn is_action_ready(&self) -> bool {
        self.stats.max_readiness > 0.0 && self.current_readiness == self.stats.max_readiness
    }

    pub fn reset_readiness(&mut self) {
        self.current_readiness = 0.0;
    }

    /// Readiness as a 0..=1 fraction, for gauges drawn by a host.
    pub fn readiness_fraction(&self) -> f32 {
        if self.stats.max_readiness > 0.0 {
            self.current_readiness / self.stats.max_readiness
        } else {
            0.0
        }
    }

    #[cfg(test)]
    pub(crate) fn set_readiness_for_test(&mut self, value: f32) {
        self.current_readiness = value.clamp(0.0, self.stats.max_readiness.max(0.0));
    }

    #[cfg(test)]
    pub(crate) fn set_health_for_test(&mut self, value: i32) {
        self.set_health(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use schema::{Effect, TargetClass, TargetCount};

    fn knight(max_health: i32, max_readiness: f32, regen_rate: f32) -> Combatant {
        let stats = Arc::new(CombatantStats::new(max_health, max_readiness, regen_rate));
        let slash = Arc::new(MoveDefinition::new(
            "Slash",
            Effect::Damage,
            4,
            TargetClass::Enemy,
            TargetCount::Single,
        ));
        Combatant::new(CombatantId(1), "Knight", stats, vec![slash])
    }

    #[test]
    fn test_new_combatant_starts_full_and_unready() {
        let unit = knight(20, 10.0, 1.0);
        assert_eq!(unit.current_health(), 20);
        assert_eq!(unit.current_readiness(), 0.0);
        assert!(!unit.is_action_ready());
        assert_eq!(unit.moves().len(), 1);
    }

    #[rstest]
    #[case(20, 5, 15)]
    #[case(20, 20, 0)]
    #[case(20, 99, 0)]
    #[case(20, -5, 20)]
    #[case(20, i32::MAX, 0)]
    fn test_take_damage_clamps(#[case] max: i32, #[case] amount: i32, #[case] expected: i32) {
        let mut unit = knight(max, 10.0, 1.0);
        unit.take_damage(amount);
        assert_eq!(unit.current_health(), expected);
    }

    #[test]
    fn test_heal_caps_at_max_and_negative_heal_hurts() {
        let mut unit = knight(20, 10.0, 1.0);
        unit.take_damage(12);
        unit.heal(5);
        assert_eq!(unit.current_health(), 13);
        unit.heal(100);
        assert_eq!(unit.current_health(), 20);
        unit.heal(-30);
        assert_eq!(unit.current_health(), 0);
        assert!(unit.is_defeated());
    }

    #[test]
    fn test_regen_fills_exactly_and_reports_once() {
        let mut unit = knight(20, 10.0, 4.0);
        assert!(!unit.regen_readiness(1.0));
        assert!(!unit.regen_readiness(1.0));
        assert!(unit.regen_readiness(1.0));
        assert_eq!(unit.current_readiness(), 10.0);
        assert!(unit.is_action_ready());

        // Already full: no-op, no second report.
        assert!(!unit.regen_readiness(1.0));
        assert!(unit.is_action_ready());

        unit.reset_readiness();
        assert!(!unit.is_action_ready());
        assert_eq!(unit.current_readiness(), 0.0);
    }

    #[test]
    fn test_negative_dt_never_drops_below_zero() {
        let mut unit = knight(20, 10.0, 4.0);
        unit.regen_readiness(-3.0);
        assert_eq!(unit.current_readiness(), 0.0);
        unit.regen_readiness(f32::NAN);
        assert_eq!(unit.current_readiness(), 0.0);
    }

    #[rstest]
    #[case(1.0, f32::NAN)]
    #[case(0.0, f32::INFINITY)]
    fn test_nan_step_keeps_partial_gauge(#[case] regen_rate: f32, #[case] dt: f32) {
        let mut unit = knight(20, 10.0, regen_rate);
        unit.set_readiness_for_test(4.0);
        assert!(!unit.regen_readiness(dt));
        assert_eq!(unit.current_readiness(), 4.0);
    }

    #[test]
    fn test_serializes_runtime_state() {
        let mut unit = knight(20, 10.0, 1.0);
        unit.take_damage(5);
        let value = serde_json::to_value(&unit).unwrap();
        assert_eq!(value["current_health"], 15);
        assert_eq!(value["stats"]["max_health"], 20);
        assert_eq!(value["moves"][0]["name"], "Slash");
    }

    #[test]
    fn test_zero_max_readiness_is_never_ready() {
        let mut unit = knight(20, 0.0, 4.0);
        unit.regen_readiness(1.0);
        assert!(!unit.is_action_ready());
        unit.reset_readiness();
        assert!(!unit.is_action_ready());
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_bounds(
            max in 1i32..500,
            amounts in prop::collection::vec((any::<bool>(), -1000i32..1000), 0..40),
        ) {
            let mut unit = knight(max, 10.0, 1.0);
            for (is_heal, amount) in amounts {
                if is_heal { unit.heal(amount) } else { unit.take_damage(amount) }
                prop_assert!(unit.current_health() >= 0);
                prop_assert!(unit.current_health() <= max);
            }
        }

        #[test]
        fn prop_ready_iff_gauge_full(
            max in 0.5f32..50.0,
            rate in 0.0f32..20.0,
            steps in prop::collection::vec(0.0f32..2.0, 0..30),
        ) {
            let mut unit = knight(10, max, rate);
            for dt in steps {
                unit.regen_readiness(dt);
                prop_assert!(unit.current_readiness() >= 0.0);
                prop_assert!(unit.current_readiness() <= max);
                prop_assert_eq!(unit.is_action_ready(), unit.current_readiness() == max);
            }
            unit.reset_readiness();
            prop_assert!(!unit.is_action_ready());
        }
    }
}
