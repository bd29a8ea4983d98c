//! Routing states. They read vitals and the roster and never mutate anything.

use super::*;

/// Lash out once hurt, idle otherwise.
pub(super) fn rage(ctx: &TickContext<'_>) -> Option<Transition> {
    let actor = ctx.actor()?;
    actor.is_injured().then(|| Transition::with_cue(BehaviorState::RageAttack, Cue::Attack))
}

/// Same routing as [`rage`] but silent: the generic decision has no presentation trigger.
pub(super) fn generic(ctx: &TickContext<'_>) -> Option<Transition> {
    let actor = ctx.actor()?;
    actor.is_injured().then(|| Transition::to(BehaviorState::RageAttack))
}

pub(super) fn heal_critical(ctx: &TickContext<'_>) -> Option<Transition> {
    let actor = ctx.actor()?;
    if actor.health_ratio() <= CRITICAL_HEALTH {
        Some(Transition::with_cue(BehaviorState::Heal, Cue::HealSelf))
    } else {
        Some(Transition::with_cue(BehaviorState::HealDecision, Cue::HealDecision))
    }
}

pub(super) fn heal_decision(ctx: &TickContext<'_>) -> Option<Transition> {
    let actor = ctx.actor()?;
    let own_ratio = actor.health_ratio();

    if let Some((target, ally_ratio)) = first_injured_ally(ctx)
        && ally_ratio < own_ratio
    {
        return Some(Transition::with_cue(BehaviorState::HealAlly { target }, Cue::HealAlly));
    }

    if actor.is_injured() {
        return Some(Transition::with_cue(BehaviorState::Heal, Cue::HealSelf));
    }
    None
}

pub(super) fn guardian_initial(ctx: &TickContext<'_>) -> Option<Transition> {
    let actor = ctx.actor()?;
    if actor.health_ratio() <= CRITICAL_HEALTH {
        Some(Transition::with_cue(BehaviorState::Heal, Cue::HealSelf))
    } else {
        Some(Transition::with_cue(BehaviorState::GuardAttackDecision, Cue::AttackDecision))
    }
}

pub(super) fn guard_attack(ctx: &mut TickContext<'_>) -> Option<Transition> {
    let guarding = ctx.actor()?.personality().guarding;
    let roll = ctx.random.next_unit();
    let modifier = guarding * roll;
    tracing::trace!(combatant = ctx.actor_name(), guarding, roll, modifier, "guard attack roll");

    if modifier >= GUARDIAN_SPECIAL_THRESHOLD {
        Some(Transition::with_cue(BehaviorState::GuardianAttack, Cue::GuardianAttack))
    } else {
        Some(Transition::with_cue(BehaviorState::RageAttack, Cue::RageAttack))
    }
}

/// First living roster member other than the actor (and the opponent) below full health,
/// in roster order, with its health ratio.
fn first_injured_ally(ctx: &TickContext<'_>) -> Option<(CombatantId, f32)> {
    let opponent = ctx.roster.designated_opponent();
    ctx.roster
        .active()
        .iter()
        .copied()
        .filter(|id| *id != ctx.actor && Some(*id) != opponent)
        .filter_map(|id| {
            let ally = ctx.combatants.get(id).filter(|ally| ally.is_alive())?;
            Some((id, ally.health_ratio()))
        })
        .find(|(_, ratio)| *ratio < 1.0)
}
