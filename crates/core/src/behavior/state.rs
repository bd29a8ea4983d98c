use super::*;

/// One phase of a combatant's turn cycle. Payloads carry the only per-state data: the heal
/// target and the remaining cooldown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BehaviorState {
    Decision,
    RageDecision,
    RageAttack,
    HealCritical,
    HealDecision,
    HealAlly { target: CombatantId },
    Heal,
    GuardianInitialDecision,
    GuardAttackDecision,
    GuardianAttack,
    Wait { cooldown: f32 },
}

/// A transition requested by a state's update, with the cue presentation should play once
/// the new state has been entered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub next: BehaviorState,
    pub cue: Option<Cue>,
}

impl Transition {
    pub fn to(next: BehaviorState) -> Self {
        Self { next, cue: None }
    }

    pub fn with_cue(next: BehaviorState, cue: Cue) -> Self {
        Self { next, cue: Some(cue) }
    }
}

impl BehaviorState {
    /// Wait with its cooldown still unset; entering computes it from the combatant's speed.
    pub fn wait() -> Self {
        BehaviorState::Wait { cooldown: 0.0 }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BehaviorState::Decision => "Decision",
            BehaviorState::RageDecision => "Rage Decision",
            BehaviorState::RageAttack => "Rage Attack",
            BehaviorState::HealCritical => "Heal Critical",
            BehaviorState::HealDecision => "Heal Decision",
            BehaviorState::HealAlly { .. } => "Heal Ally",
            BehaviorState::Heal => "Heal Self",
            BehaviorState::GuardianInitialDecision => "Guardian Initial Decision",
            BehaviorState::GuardAttackDecision => "Guard Attack Decision",
            BehaviorState::GuardianAttack => "Guardian Attack",
            BehaviorState::Wait { .. } => "Wait",
        }
    }

    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            BehaviorState::Decision
                | BehaviorState::RageDecision
                | BehaviorState::HealCritical
                | BehaviorState::HealDecision
                | BehaviorState::GuardianInitialDecision
                | BehaviorState::GuardAttackDecision
        )
    }

    pub fn is_action(&self) -> bool {
        matches!(
            self,
            BehaviorState::RageAttack
                | BehaviorState::Heal
                | BehaviorState::HealAlly { .. }
                | BehaviorState::GuardianAttack
        )
    }

    pub(crate) fn enter(&mut self, ctx: &mut TickContext<'_>) {
        if let BehaviorState::Wait { cooldown } = self {
            wait::enter(cooldown, ctx);
        }
        ctx.notify_entered(self.name());
    }

    pub(crate) fn update(&mut self, ctx: &mut TickContext<'_>) -> Option<Transition> {
        match self {
            BehaviorState::Decision => decision::generic(ctx),
            BehaviorState::RageDecision => decision::rage(ctx),
            BehaviorState::HealCritical => decision::heal_critical(ctx),
            BehaviorState::HealDecision => decision::heal_decision(ctx),
            BehaviorState::GuardianInitialDecision => decision::guardian_initial(ctx),
            BehaviorState::GuardAttackDecision => decision::guard_attack(ctx),
            BehaviorState::RageAttack => action::rage_attack(ctx),
            BehaviorState::Heal => action::heal_self(ctx),
            BehaviorState::HealAlly { target } => action::heal_ally(*target, ctx),
            BehaviorState::GuardianAttack => action::guardian_attack(ctx),
            BehaviorState::Wait { cooldown } => wait::update(cooldown, ctx),
        }
    }

    pub(crate) fn exit(&mut self, ctx: &mut TickContext<'_>) {
        if let BehaviorState::GuardianAttack = self {
            action::guardian_recover(ctx);
        }
        ctx.notify_exited(self.name());
    }
}
