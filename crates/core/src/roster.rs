//! Read-only view of who is still fighting.

use crate::types::CombatantId;

/// Ordered membership the decision states scan, plus the single hostile target.
pub trait Roster {
    fn active(&self) -> &[CombatantId];

    fn designated_opponent(&self) -> Option<CombatantId>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterView {
    members: Vec<CombatantId>,
    opponent: Option<CombatantId>,
}

impl RosterView {
    pub fn new(members: Vec<CombatantId>, opponent: Option<CombatantId>) -> Self {
        Self { members, opponent }
    }

    pub fn push(&mut self, id: CombatantId) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    /// Drops `id` from the member list and clears it as opponent. Order of the rest is kept.
    pub fn remove(&mut self, id: CombatantId) -> bool {
        if self.opponent == Some(id) {
            self.opponent = None;
        }
        let before = self.members.len();
        self.members.retain(|member| *member != id);
        self.members.len() != before
    }

    pub fn set_opponent(&mut self, id: Option<CombatantId>) {
        self.opponent = id;
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
}

impl Roster for RosterView {
    fn active(&self) -> &[CombatantId] {
        &self.members
    }

    fn designated_opponent(&self) -> Option<CombatantId> {
        self.opponent
    }
}
