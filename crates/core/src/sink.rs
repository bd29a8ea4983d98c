//! Outward-facing notifications. The core calls these and never depends on how they render.

use crate::combatant::Combatant;
use crate::types::{CombatantId, Cue};

pub trait PresentationSink {
    fn on_state_entered(&mut self, who: &Combatant, state: &'static str);

    fn on_state_exited(&mut self, _who: &Combatant, _state: &'static str) {}

    fn on_state_changed(
        &mut self,
        who: &Combatant,
        previous: Option<&'static str>,
        current: &'static str,
    );

    fn on_vitals_changed(&mut self, who: &Combatant);

    fn on_cooldown_changed(&mut self, _who: &Combatant, _remaining: f32) {}

    fn on_symbolic_cue(&mut self, who: &Combatant, cue: Cue);

    fn on_death(&mut self, who: &Combatant);
}

/// Narrates every notification through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl PresentationSink for TracingSink {
    fn on_state_entered(&mut self, who: &Combatant, state: &'static str) {
        tracing::debug!(combatant = %who.name, state, "entered state");
    }

    fn on_state_exited(&mut self, who: &Combatant, state: &'static str) {
        tracing::debug!(combatant = %who.name, state, "exited state");
    }

    fn on_state_changed(
        &mut self,
        who: &Combatant,
        previous: Option<&'static str>,
        current: &'static str,
    ) {
        tracing::debug!(
            combatant = %who.name,
            previous = previous.unwrap_or("none"),
            current,
            "state changed"
        );
    }

    fn on_vitals_changed(&mut self, who: &Combatant) {
        tracing::info!(
            combatant = %who.name,
            hp = who.hp(),
            max_hp = who.max_hp(),
            "vitals changed"
        );
    }

    fn on_symbolic_cue(&mut self, who: &Combatant, cue: Cue) {
        tracing::trace!(combatant = %who.name, cue = cue.as_str(), "cue");
    }

    fn on_death(&mut self, who: &Combatant) {
        tracing::info!(combatant = %who.name, "is dead");
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn on_state_entered(&mut self, _who: &Combatant, _state: &'static str) {}

    fn on_state_changed(
        &mut self,
        _who: &Combatant,
        _previous: Option<&'static str>,
        _current: &'static str,
    ) {
    }

    fn on_vitals_changed(&mut self, _who: &Combatant) {}

    fn on_symbolic_cue(&mut self, _who: &Combatant, _cue: Cue) {}

    fn on_death(&mut self, _who: &Combatant) {}
}

#[derive(Clone, Debug, PartialEq)]
pub enum SinkEvent {
    Entered { combatant: CombatantId, state: &'static str },
    Exited { combatant: CombatantId, state: &'static str },
    Changed { combatant: CombatantId, previous: Option<&'static str>, current: &'static str },
    Vitals { combatant: CombatantId, hp: f32 },
    Cooldown { combatant: CombatantId, remaining: f32 },
    Cue { combatant: CombatantId, cue: Cue },
    Death { combatant: CombatantId },
}

/// Records every notification in call order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<SinkEvent>,
}

impl EventLog {
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn cues_for(&self, combatant: CombatantId) -> Vec<Cue> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Cue { combatant: who, cue } if *who == combatant => Some(*cue),
                _ => None,
            })
            .collect()
    }

    pub fn deaths(&self) -> usize {
        self.events.iter().filter(|event| matches!(event, SinkEvent::Death { .. })).count()
    }
}

impl PresentationSink for EventLog {
    fn on_state_entered(&mut self, who: &Combatant, state: &'static str) {
        self.events.push(SinkEvent::Entered { combatant: who.id, state });
    }

    fn on_state_exited(&mut self, who: &Combatant, state: &'static str) {
        self.events.push(SinkEvent::Exited { combatant: who.id, state });
    }

    fn on_state_changed(
        &mut self,
        who: &Combatant,
        previous: Option<&'static str>,
        current: &'static str,
    ) {
        self.events.push(SinkEvent::Changed { combatant: who.id, previous, current });
    }

    fn on_vitals_changed(&mut self, who: &Combatant) {
        self.events.push(SinkEvent::Vitals { combatant: who.id, hp: who.hp() });
    }

    fn on_cooldown_changed(&mut self, who: &Combatant, remaining: f32) {
        self.events.push(SinkEvent::Cooldown { combatant: who.id, remaining });
    }

    fn on_symbolic_cue(&mut self, who: &Combatant, cue: Cue) {
        self.events.push(SinkEvent::Cue { combatant: who.id, cue });
    }

    fn on_death(&mut self, who: &Combatant) {
        self.events.push(SinkEvent::Death { combatant: who.id });
    }
}
