//! TOML description of an encounter: who fights, how they start, and how the run is paced.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::behavior::BehaviorState;
use crate::combatant::{CombatStats, Combatant, Personality};
use crate::content::{Archetype, profile};
use crate::encounter::Encounter;
use crate::error::{CombatantError, ConfigError};
use crate::random::RandomSource;
use crate::sink::PresentationSink;

pub const DEFAULT_TICK_DELTA: f32 = 0.1;
pub const DEFAULT_MAX_TICKS: u32 = 5_000;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncounterConfig {
    /// Absent means the caller seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_tick_delta")]
    pub tick_delta: f32,
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u32,
    #[serde(default = "default_player")]
    pub player: CombatantConfig,
    #[serde(rename = "combatant", default)]
    pub combatants: Vec<CombatantConfig>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CombatantConfig {
    pub archetype: Archetype,
    pub name: Option<String>,
    pub start: Option<StartState>,
    pub hp: Option<f32>,
    pub max_hp: Option<f32>,
    pub attack: Option<f32>,
    pub defense: Option<f32>,
    pub speed: Option<f32>,
    pub rage: Option<f32>,
    pub healing: Option<f32>,
    pub guarding: Option<f32>,
}

/// Entry states a config may name. Action states need a live decision behind them and are
/// not offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartState {
    Decision,
    RageDecision,
    HealCritical,
    HealDecision,
    GuardianInitialDecision,
    GuardAttackDecision,
    Wait,
    None,
}

fn default_tick_delta() -> f32 {
    DEFAULT_TICK_DELTA
}

fn default_max_ticks() -> u32 {
    DEFAULT_MAX_TICKS
}

fn default_player() -> CombatantConfig {
    CombatantConfig::of(Archetype::Player)
}

impl StartState {
    pub fn state(self) -> Option<BehaviorState> {
        match self {
            StartState::Decision => Some(BehaviorState::Decision),
            StartState::RageDecision => Some(BehaviorState::RageDecision),
            StartState::HealCritical => Some(BehaviorState::HealCritical),
            StartState::HealDecision => Some(BehaviorState::HealDecision),
            StartState::GuardianInitialDecision => Some(BehaviorState::GuardianInitialDecision),
            StartState::GuardAttackDecision => Some(BehaviorState::GuardAttackDecision),
            StartState::Wait => Some(BehaviorState::wait()),
            StartState::None => None,
        }
    }
}

impl CombatantConfig {
    pub fn of(archetype: Archetype) -> Self {
        Self {
            archetype,
            name: None,
            start: None,
            hp: None,
            max_hp: None,
            attack: None,
            defense: None,
            speed: None,
            rage: None,
            healing: None,
            guarding: None,
        }
    }

    /// Archetype profile with every override applied.
    pub fn combatant(&self) -> Result<Combatant, CombatantError> {
        let base = profile(self.archetype);
        let stats = CombatStats {
            attack: self.attack.unwrap_or(base.stats.attack),
            defense: self.defense.unwrap_or(base.stats.defense),
            speed: self.speed.unwrap_or(base.stats.speed),
        };
        let personality = Personality {
            rage: self.rage.unwrap_or(base.personality.rage),
            healing: self.healing.unwrap_or(base.personality.healing),
            guarding: self.guarding.unwrap_or(base.personality.guarding),
        };
        let name = self.name.clone().unwrap_or_else(|| base.name.to_string());
        let max_hp = self.max_hp.unwrap_or(base.max_hp);

        let combatant = Combatant::new(name, max_hp, stats, personality)?;
        match self.hp {
            // A living combatant at 0 hp would never be reaped.
            Some(hp) if !hp.is_finite() || hp <= 0.0 => Err(CombatantError::InvalidHp(hp)),
            Some(hp) => Ok(combatant.with_hp(hp)),
            None => Ok(combatant),
        }
    }

    pub fn start_state(&self) -> Option<BehaviorState> {
        match self.start {
            Some(start) => start.state(),
            None => profile(self.archetype).start,
        }
    }
}

impl Default for EncounterConfig {
    /// One of each enemy archetype against the player.
    fn default() -> Self {
        Self {
            seed: None,
            tick_delta: DEFAULT_TICK_DELTA,
            max_ticks: DEFAULT_MAX_TICKS,
            player: default_player(),
            combatants: vec![
                CombatantConfig::of(Archetype::Rage),
                CombatantConfig::of(Archetype::Guardian),
                CombatantConfig::of(Archetype::Healer),
            ],
        }
    }
}

impl EncounterConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_delta.is_finite() || self.tick_delta <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tick_delta must be finite and positive, got {}",
                self.tick_delta
            )));
        }
        if self.max_ticks == 0 {
            return Err(ConfigError::Invalid("max_ticks must be at least 1".to_string()));
        }
        if self.combatants.is_empty() {
            return Err(ConfigError::Invalid("at least one [[combatant]] is needed".to_string()));
        }
        if self.player.start.and_then(StartState::state).is_some() {
            return Err(ConfigError::Invalid("the player cannot have a start state".to_string()));
        }

        self.player.combatant()?;
        for combatant in &self.combatants {
            combatant.combatant()?;
        }
        Ok(())
    }

    /// Spawns the player, then each combatant in file order, which is also roster order.
    pub fn build<S, R>(&self, sink: S, random: R) -> Result<Encounter<S, R>, ConfigError>
    where
        S: PresentationSink,
        R: RandomSource,
    {
        self.validate()?;

        let mut encounter = Encounter::new(sink, random);
        encounter.spawn_player(self.player.combatant()?);
        for combatant in &self.combatants {
            encounter.spawn(combatant.combatant()?, combatant.start_state());
        }
        Ok(encounter)
    }
}
