//! Shared fixtures for the behavior test suite: a small arena, roster, recording sink and
//! scripted random source.

use slotmap::SlotMap;

use super::*;
use crate::combatant::CombatStats;
use crate::error::BehaviorError;
use crate::random::FixedSource;
use crate::roster::RosterView;
use crate::sink::{EventLog, SinkEvent};

pub(super) struct Fixture {
    pub combatants: SlotMap<CombatantId, Combatant>,
    pub roster: RosterView,
    pub log: EventLog,
    pub random: FixedSource,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            combatants: SlotMap::with_key(),
            roster: RosterView::default(),
            log: EventLog::default(),
            random: FixedSource::constant(0.0),
        }
    }

    pub fn add(&mut self, combatant: Combatant) -> CombatantId {
        let id = self.combatants.insert(combatant);
        self.combatants[id].id = id;
        self.roster.push(id);
        id
    }

    pub fn add_opponent(&mut self, combatant: Combatant) -> CombatantId {
        let id = self.combatants.insert(combatant);
        self.combatants[id].id = id;
        self.roster.set_opponent(Some(id));
        id
    }

    pub fn ctx(&mut self, actor: CombatantId, delta: f32) -> TickContext<'_> {
        TickContext::new(
            actor,
            &mut self.combatants,
            &self.roster,
            &mut self.log,
            &mut self.random,
            delta,
        )
    }

    pub fn start(&mut self, controller: &mut Controller, actor: CombatantId) {
        let mut ctx = self.ctx(actor, 1.0);
        controller.start(&mut ctx);
    }

    pub fn step(
        &mut self,
        controller: &mut Controller,
        actor: CombatantId,
    ) -> Result<(), BehaviorError> {
        let mut ctx = self.ctx(actor, 1.0);
        controller.update(&mut ctx)
    }

    pub fn hp(&self, id: CombatantId) -> f32 {
        self.combatants[id].hp()
    }

    /// Event kinds in call order, for protocol-ordering assertions.
    pub fn kinds(&self) -> Vec<String> {
        self.log
            .events()
            .iter()
            .map(|event| match event {
                SinkEvent::Entered { state, .. } => format!("enter {state}"),
                SinkEvent::Exited { state, .. } => format!("exit {state}"),
                SinkEvent::Changed { previous, current, .. } => {
                    format!("change {} -> {current}", previous.unwrap_or("none"))
                }
                SinkEvent::Vitals { .. } => "vitals".to_string(),
                SinkEvent::Cooldown { .. } => "cooldown".to_string(),
                SinkEvent::Cue { cue, .. } => format!("cue {}", cue.as_str()),
                SinkEvent::Death { .. } => "death".to_string(),
            })
            .collect()
    }
}

pub(super) fn unit(
    name: &str,
    max_hp: f32,
    attack: f32,
    defense: f32,
    speed: f32,
    personality: Personality,
) -> Combatant {
    Combatant::new(name, max_hp, CombatStats { attack, defense, speed }, personality)
        .expect("fixture combatant")
}

pub(super) fn rager() -> Personality {
    Personality { rage: 1.0, healing: 0.0, guarding: 0.0 }
}

pub(super) fn healer() -> Personality {
    Personality { rage: 0.0, healing: 1.0, guarding: 0.0 }
}

pub(super) fn guardian() -> Personality {
    Personality { rage: 0.0, healing: 0.0, guarding: 1.25 }
}

pub(super) fn assert_close(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 1e-3, "expected {expected}, got {actual}");
}
