use slotmap::new_key_type;

new_key_type! {
    pub struct CombatantId;
}

/// Symbolic presentation cue. Stands in for animation triggers; the core only names them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Attack,
    RageAttack,
    GuardianAttack,
    HealSelf,
    HealAlly,
    HealDecision,
    AttackDecision,
    Cooldown,
    Death,
}

impl Cue {
    pub fn as_str(self) -> &'static str {
        match self {
            Cue::Attack => "AttackTrigger",
            Cue::RageAttack => "RageAttackTrigger",
            Cue::GuardianAttack => "GuardianAttackTrigger",
            Cue::HealSelf => "HealSelfTrigger",
            Cue::HealAlly => "HealAllyTrigger",
            Cue::HealDecision => "HealDecisionTrigger",
            Cue::AttackDecision => "AttackDecisionTrigger",
            Cue::Cooldown => "CooldownTrigger",
            Cue::Death => "DeathTrigger",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    Finished(RunOutcome),
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug)]
pub struct AdvanceResult {
    pub simulated_ticks: u32,
    pub stop_reason: AdvanceStopReason,
}
