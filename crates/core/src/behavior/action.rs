//! Action states: apply one effect, then hand over to Wait.
//! A target that died or left the arena is skipped; the cooldown still starts.

use super::*;

fn cooldown() -> Option<Transition> {
    Some(Transition::with_cue(BehaviorState::wait(), Cue::Cooldown))
}

pub(super) fn rage_attack(ctx: &mut TickContext<'_>) -> Option<Transition> {
    strike_opponent(ctx, "rage attack", |attacker, _| rage_attack_raw(attacker));
    cooldown()
}

pub(super) fn guardian_attack(ctx: &mut TickContext<'_>) -> Option<Transition> {
    strike_opponent(ctx, "guardian attack", guardian_attack_raw);
    cooldown()
}

pub(super) fn heal_self(ctx: &mut TickContext<'_>) -> Option<Transition> {
    let actor = ctx.actor;
    if let Some(restored) = resolve_heal(ctx.combatants, ctx.sink, actor, SELF_HEAL_AMOUNT) {
        tracing::debug!(combatant = ctx.actor_name(), restored, "healed self");
    }
    cooldown()
}

pub(super) fn heal_ally(target: CombatantId, ctx: &mut TickContext<'_>) -> Option<Transition> {
    match resolve_heal(ctx.combatants, ctx.sink, target, ALLY_HEAL_AMOUNT) {
        Some(restored) => {
            let ally = ctx.combatants.get(target).map_or("<gone>", |ally| ally.name.as_str());
            tracing::debug!(combatant = ctx.actor_name(), ally, restored, "healed ally");
        }
        None => tracing::debug!(combatant = ctx.actor_name(), "heal target is gone, skipping"),
    }
    cooldown()
}

/// Exit hook of GuardianAttack.
pub(super) fn guardian_recover(ctx: &mut TickContext<'_>) {
    let Some(amount) = ctx.actor().map(guardian_recovery) else {
        return;
    };
    let actor = ctx.actor;
    if let Some(restored) = resolve_heal(ctx.combatants, ctx.sink, actor, amount) {
        tracing::debug!(combatant = ctx.actor_name(), restored, "guardian recovered");
    }
}

fn strike_opponent(
    ctx: &mut TickContext<'_>,
    label: &'static str,
    raw_damage: impl FnOnce(&Combatant, &Combatant) -> f32,
) {
    let Some(target) = ctx.roster.designated_opponent() else {
        tracing::debug!(combatant = ctx.actor_name(), "no opponent to strike");
        return;
    };
    let victim = ctx.combatants.get(target).filter(|victim| victim.is_alive());
    let (Some(attacker), Some(victim)) = (ctx.actor(), victim) else {
        tracing::debug!(combatant = ctx.actor_name(), "strike target is gone, skipping");
        return;
    };
    let raw = raw_damage(attacker, victim);

    if let Some(report) = resolve_hit(ctx.combatants, ctx.sink, target, raw) {
        tracing::debug!(
            combatant = ctx.actor_name(),
            attack = label,
            raw,
            dealt = report.dealt,
            killed = report.killed,
            "struck opponent"
        );
    }
}
