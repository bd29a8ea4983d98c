//! Damage, healing and cooldown formulas, plus hit/heal resolution against the arena.

use slotmap::SlotMap;

use crate::combatant::{Combatant, DamageReport};
use crate::sink::PresentationSink;
use crate::types::{CombatantId, Cue};

pub const CRITICAL_HEALTH: f32 = 0.25;
pub const SELF_HEAL_AMOUNT: f32 = 25.0;
pub const ALLY_HEAL_AMOUNT: f32 = 7.5;
pub const GUARDIAN_ATTACK_MULTIPLIER: f32 = 2.0;
pub const GUARDIAN_RECOVERY_RATIO: f32 = 0.33;
pub const GUARDIAN_SPECIAL_THRESHOLD: f32 = 0.75;
pub const COOLDOWN_BASE: f32 = 10.0;

pub const PLAYER_CHARGE_LIMIT: f32 = 100.0;
pub const PLAYER_HEAL_AMOUNT: f32 = 75.0;
pub const CUT_ATTACK_RATIO: f32 = 0.75;

/// Initial cooldown for a combatant entering Wait. Halves round to even.
pub fn cooldown_for(speed: f32) -> f32 {
    (COOLDOWN_BASE / speed).round_ties_even()
}

pub fn rage_attack_raw(attacker: &Combatant) -> f32 {
    attacker.attack()
}

/// Adds the target's defense back so the receiver-side subtraction cancels out.
pub fn guardian_attack_raw(attacker: &Combatant, target: &Combatant) -> f32 {
    attacker.attack() * GUARDIAN_ATTACK_MULTIPLIER + target.defense()
}

pub fn guardian_recovery(actor: &Combatant) -> f32 {
    GUARDIAN_RECOVERY_RATIO * actor.max_hp()
}

pub fn cut_attack_raw(target: &Combatant) -> f32 {
    target.max_hp() * CUT_ATTACK_RATIO + target.defense()
}

/// Applies `raw` damage to `target` and narrates it. Returns `None` when the target is gone
/// or already dead, in which case nothing is applied.
pub fn resolve_hit(
    combatants: &mut SlotMap<CombatantId, Combatant>,
    sink: &mut dyn PresentationSink,
    target: CombatantId,
    raw: f32,
) -> Option<DamageReport> {
    let victim = combatants.get_mut(target).filter(|c| c.is_alive())?;
    let report = victim.receive_damage(raw);

    let victim = &combatants[target];
    sink.on_vitals_changed(victim);
    if report.killed {
        sink.on_symbolic_cue(victim, Cue::Death);
        sink.on_death(victim);
    }
    Some(report)
}

/// Heals `target` by `amount` and narrates it. Returns the restored amount, or `None` for a
/// stale target.
pub fn resolve_heal(
    combatants: &mut SlotMap<CombatantId, Combatant>,
    sink: &mut dyn PresentationSink,
    target: CombatantId,
    amount: f32,
) -> Option<f32> {
    let patient = combatants.get_mut(target).filter(|c| c.is_alive())?;
    let restored = patient.heal(amount);
    sink.on_vitals_changed(&combatants[target]);
    Some(restored)
}
