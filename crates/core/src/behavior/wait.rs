//! Cooldown gate between actions.

use super::*;

pub(super) fn enter(cooldown: &mut f32, ctx: &mut TickContext<'_>) {
    *cooldown = ctx.actor().map_or(0.0, |actor| cooldown_for(actor.speed()));
    ctx.notify_cooldown(*cooldown);
}

/// Faster combatants both start with a shorter cooldown and drain it faster.
pub(super) fn update(cooldown: &mut f32, ctx: &mut TickContext<'_>) -> Option<Transition> {
    let actor = ctx.actor()?;
    let (speed, personality) = (actor.speed(), actor.personality());

    if *cooldown <= 0.0 {
        return Some(Transition::to(next_decision(personality)));
    }

    // Step at least one ulp so a drain too small for f32 precision still terminates.
    let drained = *cooldown - speed * ctx.delta;
    *cooldown = if drained < *cooldown { drained } else { cooldown.next_down() };
    ctx.notify_cooldown(*cooldown);
    None
}

/// Fixed priority chain, evaluated when the cooldown expires. Ties fall through.
pub fn next_decision(personality: Personality) -> BehaviorState {
    if personality.guarding > personality.healing {
        BehaviorState::GuardianInitialDecision
    } else if personality.healing > personality.rage {
        BehaviorState::HealCritical
    } else {
        BehaviorState::RageDecision
    }
}
