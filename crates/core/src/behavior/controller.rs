//! The blackboard: current/previous state for one combatant and the transition protocol.

use super::*;
use crate::error::BehaviorError;

/// Holds the running state of one combatant. Between ticks `current` is either fully entered
/// or absent; `previous` is kept for diagnostics and never consulted for behavior.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Controller {
    current: Option<BehaviorState>,
    previous: Option<BehaviorState>,
}

impl Controller {
    /// Installs `start` without entering it; call [`Controller::start`] once the combatant is
    /// in the arena.
    pub fn new(start: BehaviorState) -> Self {
        Self { current: Some(start), previous: None }
    }

    /// A controller with no behavior, e.g. for the player.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&BehaviorState> {
        self.current.as_ref()
    }

    pub fn previous(&self) -> Option<&BehaviorState> {
        self.previous.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn start(&mut self, ctx: &mut TickContext<'_>) {
        match self.current.as_mut() {
            Some(state) => state.enter(ctx),
            None => tracing::debug!(combatant = ctx.actor_name(), "no behavior state to start"),
        }
    }

    /// Runs the current state's update and performs at most one transition.
    pub fn update(&mut self, ctx: &mut TickContext<'_>) -> Result<(), BehaviorError> {
        let state = self.current.as_mut().ok_or(BehaviorError::NoCurrentState)?;

        if let Some(transition) = state.update(ctx) {
            self.change_state(transition.next, ctx);
            if let Some(cue) = transition.cue {
                ctx.notify_cue(cue);
            }
        }
        Ok(())
    }

    /// Exit old, record previous, install new, enter new. Enter has finished when this returns.
    pub fn change_state(&mut self, next: BehaviorState, ctx: &mut TickContext<'_>) {
        if let Some(state) = self.current.as_mut() {
            state.exit(ctx);
        }

        self.previous = self.current.take();
        ctx.notify_changed(self.previous.as_ref().map(BehaviorState::name), next.name());
        self.current = Some(next);
        self.start(ctx);
    }

    pub fn signal_stop(&self, ctx: &TickContext<'_>) {
        match &self.current {
            Some(state) => tracing::debug!(
                combatant = ctx.actor_name(),
                state = state.name(),
                "signaled state to stop"
            ),
            None => tracing::debug!(combatant = ctx.actor_name(), "no state to stop"),
        }
    }
}
