use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// What a move does to each of its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Effect {
    Damage,
    Heal,
    /// Declared by content but has no defined behavior yet.
    Block,
}

/// Whose side a move aims at, relative to the combatant using it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum TargetClass {
    Ally,
    Enemy,
    #[serde(rename = "Self", alias = "User")]
    #[strum(serialize = "Self")]
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum TargetCount {
    Single,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDefinition {
    pub name: String,
    pub effect: Effect,
    pub magnitude: i32,
    pub target_class: TargetClass,
    pub target_count: TargetCount,
}

impl MoveDefinition {
    pub fn new(
        name: impl Into<String>,
        effect: Effect,
        magnitude: i32,
        target_class: TargetClass,
        target_count: TargetCount,
    ) -> Self {
        Self {
            name: name.into(),
            effect,
            magnitude,
            target_class,
            target_count,
        }
    }

    /// True when the player may move a target cursor after the default pick.
    /// Only single-target moves aimed at a side (not the user) qualify.
    pub fn has_adjustable_target(&self) -> bool {
        self.target_count == TargetCount::Single && self.target_class != TargetClass::User
    }
}
