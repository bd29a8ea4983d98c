//! Everything a state hook may touch during one combatant's tick.

use slotmap::SlotMap;

use super::*;
use crate::random::RandomSource;
use crate::roster::Roster;
use crate::sink::PresentationSink;

pub struct TickContext<'a> {
    pub(crate) actor: CombatantId,
    pub(crate) combatants: &'a mut SlotMap<CombatantId, Combatant>,
    pub(crate) roster: &'a dyn Roster,
    pub(crate) sink: &'a mut dyn PresentationSink,
    pub(crate) random: &'a mut dyn RandomSource,
    pub(crate) delta: f32,
}

impl<'a> TickContext<'a> {
    pub fn new(
        actor: CombatantId,
        combatants: &'a mut SlotMap<CombatantId, Combatant>,
        roster: &'a dyn Roster,
        sink: &'a mut dyn PresentationSink,
        random: &'a mut dyn RandomSource,
        delta: f32,
    ) -> Self {
        Self { actor, combatants, roster, sink, random, delta }
    }

    pub fn actor_id(&self) -> CombatantId {
        self.actor
    }

    /// The acting combatant, or `None` if it has already been removed from the arena.
    pub fn actor(&self) -> Option<&Combatant> {
        self.combatants.get(self.actor)
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub(crate) fn actor_name(&self) -> &str {
        self.actor().map_or("<gone>", |actor| actor.name.as_str())
    }

    pub(crate) fn notify_entered(&mut self, state: &'static str) {
        if let Some(who) = self.combatants.get(self.actor) {
            self.sink.on_state_entered(who, state);
        }
    }

    pub(crate) fn notify_exited(&mut self, state: &'static str) {
        if let Some(who) = self.combatants.get(self.actor) {
            self.sink.on_state_exited(who, state);
        }
    }

    pub(crate) fn notify_changed(&mut self, previous: Option<&'static str>, current: &'static str) {
        if let Some(who) = self.combatants.get(self.actor) {
            self.sink.on_state_changed(who, previous, current);
        }
    }

    pub(crate) fn notify_cooldown(&mut self, remaining: f32) {
        if let Some(who) = self.combatants.get(self.actor) {
            self.sink.on_cooldown_changed(who, remaining);
        }
    }

    pub(crate) fn notify_cue(&mut self, cue: Cue) {
        if let Some(who) = self.combatants.get(self.actor) {
            self.sink.on_symbolic_cue(who, cue);
        }
    }
}
