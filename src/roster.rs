use crate::combatant::{Combatant, CombatantId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the battle - provides type safety over raw roster indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn to_index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

/// The ordered live combatants of one side.
///
/// Order only matters for cursor indexing. A roster never holds a defeated
/// combatant: whoever drops one to zero health removes it in the same call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    side: Side,
    members: Vec<Combatant>,
}

impl Roster {
    pub fn new(side: Side, members: Vec<Combatant>) -> Self {
        Roster { side, members }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Combatant> {
        self.members.get(index)
    }

    pub fn position(&self, id: CombatantId) -> Option<usize> {
        self.members.iter().position(|c| c.id() == id)
    }

    pub fn find(&self, id: CombatantId) -> Option<&Combatant> {
        self.members.iter().find(|c| c.id() == id)
    }

    pub fn find_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.members.iter_mut().find(|c| c.id() == id)
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.position(id).is_some()
    }

    /// Remove a combatant, keeping the order of the others.
    pub fn remove(&mut self, id: CombatantId) -> Option<Combatant> {
        let index = self.position(id)?;
        Some(self.members.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Combatant> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Combatant> {
        self.members.iter_mut()
    }

    /// Snapshot of member ids in roster order.
    pub fn ids(&self) -> Vec<CombatantId> {
        self.members.iter().map(Combatant::id).collect()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Combatant;
    type IntoIter = std::slice::Iter<'a, Combatant>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
