pub mod behavior;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod content;
pub mod encounter;
pub mod error;
pub mod random;
pub mod roster;
pub mod sink;
pub mod types;

pub use behavior::{BehaviorState, Controller, TickContext, Transition};
pub use combatant::{CombatStats, Combatant, DamageReport, Lifecycle, Personality};
pub use config::{CombatantConfig, EncounterConfig, StartState};
pub use content::{Archetype, ArchetypeProfile, profile};
pub use encounter::Encounter;
pub use error::{BehaviorError, CombatantError, ConfigError, EncounterError};
pub use random::{FixedSource, RandomSource, SeededSource};
pub use roster::{Roster, RosterView};
pub use sink::{EventLog, NullSink, PresentationSink, SinkEvent, TracingSink};
pub use types::*;
