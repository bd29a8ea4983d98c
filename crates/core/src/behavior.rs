//! Per-combatant behavior controller and the state variants it runs.
//! Decision states only route; action states mutate vitals and always fall back to Wait.

use crate::combat::*;
use crate::combatant::{Combatant, Personality};
use crate::types::{CombatantId, Cue};

mod action;
mod context;
mod controller;
mod decision;
mod state;
mod wait;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use context::TickContext;
pub use controller::Controller;
pub use state::{BehaviorState, Transition};
pub use wait::next_decision;
