//! Error types surfaced by the behavior engine.
//!
//! Precondition violations are returned as typed errors. Stale targets and decisions with
//! nothing to do are normal control flow and never show up here.

use std::io;
use std::path::PathBuf;

use crate::types::CombatantId;

/// Rejected combatant construction.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CombatantError {
    #[error("max hp must be finite and positive, got {0}")]
    InvalidMaxHp(f32),
    #[error("starting hp must be finite and positive, got {0}")]
    InvalidHp(f32),
    #[error("speed must be finite and positive, got {0}")]
    InvalidSpeed(f32),
    #[error("{stat} must be finite and non-negative, got {value}")]
    InvalidStat { stat: &'static str, value: f32 },
    #[error("{trait_name} must lie in [0, {max}], got {value}")]
    PersonalityOutOfRange { trait_name: &'static str, value: f32, max: f32 },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BehaviorError {
    #[error("controller has no current state to update")]
    NoCurrentState,
}

/// Failures of the encounter driver and of player commands.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EncounterError {
    #[error("tick delta must be finite and positive, got {0}")]
    InvalidDelta(f32),
    #[error("no player has been spawned")]
    NoPlayer,
    #[error("the player is dead")]
    PlayerDead,
    #[error("player charge {charge} has not reached {limit}")]
    NotCharged { charge: f32, limit: f32 },
    #[error("the player has no target")]
    NoTarget,
    #[error("combatant {0:?} is not an active roster member")]
    UnknownCombatant(CombatantId),
    #[error("behavior update failed for {combatant:?}: {source}")]
    Behavior {
        combatant: CombatantId,
        #[source]
        source: BehaviorError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read encounter config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse encounter config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid encounter config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Combatant(#[from] CombatantError),
}
