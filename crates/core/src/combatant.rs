//! Combatant records: vitals, fixed combat stats and personality weights.
//!
//! Every mutator keeps `0 <= hp <= max_hp`. The `Active -> Dead` transition happens at most
//! once, inside [`Combatant::receive_damage`].

use crate::error::CombatantError;
use crate::types::CombatantId;

/// Upper bound for each personality weight.
pub const PERSONALITY_MAX: f32 = 10.0;
/// Damage applied when an attack does not get through the receiver's defense.
pub const CHIP_DAMAGE: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombatStats {
    pub attack: f32,
    pub defense: f32,
    pub speed: f32,
}

/// Weights that bias which decision branch a combatant takes after a cooldown.
/// Only compared against each other, never mixed with vitals.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Personality {
    pub rage: f32,
    pub healing: f32,
    pub guarding: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageReport {
    pub raw: f32,
    /// Amount subtracted after defense and the chip floor, before clamping at zero.
    pub dealt: f32,
    /// True only for the hit that moved the combatant from `Active` to `Dead`.
    pub killed: bool,
}

#[derive(Clone, Debug)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    hp: f32,
    max_hp: f32,
    stats: CombatStats,
    personality: Personality,
    lifecycle: Lifecycle,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        max_hp: f32,
        stats: CombatStats,
        personality: Personality,
    ) -> Result<Self, CombatantError> {
        if !max_hp.is_finite() || max_hp <= 0.0 {
            return Err(CombatantError::InvalidMaxHp(max_hp));
        }
        if !stats.speed.is_finite() || stats.speed <= 0.0 {
            return Err(CombatantError::InvalidSpeed(stats.speed));
        }
        for (stat, value) in [("attack", stats.attack), ("defense", stats.defense)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CombatantError::InvalidStat { stat, value });
            }
        }
        for (trait_name, value) in [
            ("rage", personality.rage),
            ("healing", personality.healing),
            ("guarding", personality.guarding),
        ] {
            if !(0.0..=PERSONALITY_MAX).contains(&value) {
                return Err(CombatantError::PersonalityOutOfRange {
                    trait_name,
                    value,
                    max: PERSONALITY_MAX,
                });
            }
        }

        Ok(Self {
            id: CombatantId::default(), // assigned on spawn
            name: name.into(),
            hp: max_hp,
            max_hp,
            stats,
            personality,
            lifecycle: Lifecycle::Active,
        })
    }

    /// Starts the combatant below full health. Clamped into `[0, max_hp]`; a non-positive
    /// value still leaves the combatant `Active` until it takes damage.
    pub fn with_hp(mut self, hp: f32) -> Self {
        self.hp = if hp.is_nan() { self.max_hp } else { hp.clamp(0.0, self.max_hp) };
        self
    }

    pub fn hp(&self) -> f32 {
        self.hp
    }

    pub fn max_hp(&self) -> f32 {
        self.max_hp
    }

    pub fn health_ratio(&self) -> f32 {
        self.hp / self.max_hp
    }

    pub fn is_injured(&self) -> bool {
        self.hp < self.max_hp
    }

    pub fn stats(&self) -> CombatStats {
        self.stats
    }

    pub fn attack(&self) -> f32 {
        self.stats.attack
    }

    pub fn defense(&self) -> f32 {
        self.stats.defense
    }

    pub fn speed(&self) -> f32 {
        self.stats.speed
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn receive_damage(&mut self, raw: f32) -> DamageReport {
        if !self.is_alive() {
            return DamageReport { raw, dealt: 0.0, killed: false };
        }

        let net = raw - self.stats.defense;
        let dealt = if net <= 0.0 { CHIP_DAMAGE } else { net };
        self.hp = (self.hp - dealt).max(0.0);

        let killed = self.hp <= 0.0;
        if killed {
            self.lifecycle = Lifecycle::Dead;
        }
        DamageReport { raw, dealt, killed }
    }

    /// Returns the amount actually restored. Dead combatants cannot be healed.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    pub fn restore_full(&mut self) {
        if self.is_alive() {
            self.hp = self.max_hp;
        }
    }
}
