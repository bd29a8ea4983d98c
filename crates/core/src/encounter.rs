//! Drives a whole fight: owns the arena and one controller per combatant, ticks them in
//! roster order, reaps the dead and decides the outcome.

use slotmap::{SecondaryMap, SlotMap};

use crate::behavior::{BehaviorState, Controller, TickContext};
use crate::combat::PLAYER_CHARGE_LIMIT;
use crate::combatant::Combatant;
use crate::error::EncounterError;
use crate::random::RandomSource;
use crate::roster::{Roster, RosterView};
use crate::sink::PresentationSink;
use crate::types::*;

mod player;


#[derive(Clone, Copy, Debug, PartialEq)]
struct PlayerState {
    id: CombatantId,
    charge: f32,
    target: Option<CombatantId>,
}

pub struct Encounter<S: PresentationSink, R: RandomSource> {
    combatants: SlotMap<CombatantId, Combatant>,
    controllers: SecondaryMap<CombatantId, Controller>,
    roster: RosterView,
    player: Option<PlayerState>,
    sink: S,
    random: R,
    fallen: Vec<Combatant>,
    outcome: Option<RunOutcome>,
    tick: u64,
}

impl<S: PresentationSink, R: RandomSource> Encounter<S, R> {
    pub fn new(sink: S, random: R) -> Self {
        Self {
            combatants: SlotMap::with_key(),
            controllers: SecondaryMap::new(),
            roster: RosterView::default(),
            player: None,
            sink,
            random,
            fallen: Vec::new(),
            outcome: None,
            tick: 0,
        }
    }

    /// Places the player in the arena as every enemy's designated opponent. The charge meter
    /// starts full and the first roster member, if any, becomes the target.
    pub fn spawn_player(&mut self, combatant: Combatant) -> CombatantId {
        let id = self.insert(combatant);
        self.controllers.insert(id, Controller::idle());
        self.roster.set_opponent(Some(id));
        self.player = Some(PlayerState {
            id,
            charge: PLAYER_CHARGE_LIMIT,
            target: self.roster.active().first().copied(),
        });
        tracing::debug!(combatant = %self.combatants[id].name, "player spawned");
        id
    }

    /// Appends a combatant to the roster and enters `start`. `None` spawns an idle member that
    /// still counts towards victory.
    pub fn spawn(&mut self, combatant: Combatant, start: Option<BehaviorState>) -> CombatantId {
        let id = self.insert(combatant);
        self.roster.push(id);
        if let Some(player) = self.player.as_mut()
            && player.target.is_none()
        {
            player.target = Some(id);
        }

        let mut controller = start.map_or_else(Controller::idle, Controller::new);
        let mut ctx = TickContext::new(
            id,
            &mut self.combatants,
            &self.roster,
            &mut self.sink,
            &mut self.random,
            0.0,
        );
        controller.start(&mut ctx);
        self.controllers.insert(id, controller);
        id
    }

    fn insert(&mut self, combatant: Combatant) -> CombatantId {
        let id = self.combatants.insert(combatant);
        self.combatants[id].id = id;
        id
    }

    /// One simulation step. Roster order is snapshotted up front; a member reaped earlier in
    /// the step is not updated.
    pub fn tick(&mut self, delta: f32) -> Result<(), EncounterError> {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(EncounterError::InvalidDelta(delta));
        }
        if self.outcome.is_some() {
            return Ok(());
        }

        self.recharge_player(delta);

        let order = self.roster.active().to_vec();
        for id in order {
            if !self.roster.contains(id) {
                continue;
            }
            let Some(controller) = self.controllers.get_mut(id) else {
                continue;
            };
            if controller.is_idle() {
                continue;
            }

            let mut ctx = TickContext::new(
                id,
                &mut self.combatants,
                &self.roster,
                &mut self.sink,
                &mut self.random,
                delta,
            );
            controller
                .update(&mut ctx)
                .map_err(|source| EncounterError::Behavior { combatant: id, source })?;

            self.reap();
        }

        self.tick += 1;
        self.update_outcome();
        Ok(())
    }

    pub fn advance(&mut self, max_ticks: u32, delta: f32) -> Result<AdvanceResult, EncounterError> {
        let mut ticks = 0;

        while ticks < max_ticks {
            if let Some(outcome) = self.outcome {
                return Ok(AdvanceResult {
                    simulated_ticks: ticks,
                    stop_reason: AdvanceStopReason::Finished(outcome),
                });
            }
            self.tick(delta)?;
            ticks += 1;
        }

        let stop_reason = match self.outcome {
            Some(outcome) => AdvanceStopReason::Finished(outcome),
            None => AdvanceStopReason::BudgetExhausted,
        };
        Ok(AdvanceResult { simulated_ticks: ticks, stop_reason })
    }

    /// Moves every dead roster member out of the arena. The player is never reaped, only
    /// withdrawn as the opponent.
    fn reap(&mut self) {
        let dead: Vec<CombatantId> = self
            .roster
            .active()
            .iter()
            .copied()
            .filter(|id| !self.combatants.get(*id).is_some_and(Combatant::is_alive))
            .collect();

        for id in dead {
            if let Some(controller) = self.controllers.get(id) {
                let ctx = TickContext::new(
                    id,
                    &mut self.combatants,
                    &self.roster,
                    &mut self.sink,
                    &mut self.random,
                    0.0,
                );
                controller.signal_stop(&ctx);
            }
            self.controllers.remove(id);
            self.roster.remove(id);
            if let Some(record) = self.combatants.remove(id) {
                tracing::debug!(combatant = %record.name, "reaped");
                self.fallen.push(record);
            }
            if let Some(player) = self.player.as_mut()
                && player.target == Some(id)
            {
                player.target = None;
            }
        }

        if let Some(player) = self.player
            && !self.player_alive(player.id)
        {
            self.roster.set_opponent(None);
        }
    }

    fn update_outcome(&mut self) {
        let Some(player) = self.player else {
            return;
        };

        let outcome = if !self.player_alive(player.id) {
            RunOutcome::Defeat
        } else if self.roster.is_empty() {
            RunOutcome::Victory
        } else {
            return;
        };

        if self.outcome.is_none() {
            tracing::info!(?outcome, tick = self.tick, "encounter finished");
            self.outcome = Some(outcome);
        }
    }

    fn player_alive(&self, id: CombatantId) -> bool {
        self.combatants.get(id).is_some_and(Combatant::is_alive)
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id)
    }

    pub fn combatants(&self) -> &SlotMap<CombatantId, Combatant> {
        &self.combatants
    }

    pub fn roster(&self) -> &RosterView {
        &self.roster
    }

    pub fn controller(&self, id: CombatantId) -> Option<&Controller> {
        self.controllers.get(id)
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Records of reaped combatants in the order they fell.
    pub fn fallen(&self) -> &[Combatant] {
        &self.fallen
    }
}
