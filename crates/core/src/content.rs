use serde::{Deserialize, Serialize};

use crate::behavior::BehaviorState;
use crate::combatant::{CombatStats, Combatant, Personality};
use crate::error::CombatantError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    Player,
    Rage,
    Guardian,
    Healer,
    Default,
}

pub struct ArchetypeProfile {
    pub name: &'static str,
    pub max_hp: f32,
    pub stats: CombatStats,
    pub personality: Personality,
    pub start: Option<BehaviorState>,
}

pub fn profile(archetype: Archetype) -> ArchetypeProfile {
    match archetype {
        Archetype::Player => ArchetypeProfile {
            name: "Player",
            max_hp: 250.0,
            stats: CombatStats { attack: 15.0, defense: 10.0, speed: 60.0 },
            personality: Personality::default(),
            start: None,
        },
        Archetype::Rage => ArchetypeProfile {
            name: "Rage Enemy",
            max_hp: 35.0,
            stats: CombatStats { attack: 25.0, defense: 4.0, speed: 1.75 },
            personality: Personality { rage: 1.0, healing: 0.0, guarding: 0.0 },
            start: Some(BehaviorState::RageDecision),
        },
        Archetype::Guardian => ArchetypeProfile {
            name: "Guardian Enemy",
            max_hp: 100.0,
            stats: CombatStats { attack: 25.0, defense: 5.0, speed: 2.0 },
            personality: Personality { rage: 0.0, healing: 0.0, guarding: 1.25 },
            start: Some(BehaviorState::GuardianInitialDecision),
        },
        Archetype::Healer => ArchetypeProfile {
            name: "Heal Enemy",
            max_hp: 60.0,
            stats: CombatStats { attack: 8.0, defense: 3.0, speed: 1.5 },
            personality: Personality { rage: 0.0, healing: 1.0, guarding: 0.0 },
            start: Some(BehaviorState::HealCritical),
        },
        Archetype::Default => ArchetypeProfile {
            name: "Default Enemy",
            max_hp: 10.0,
            stats: CombatStats { attack: 1.0, defense: 1.0, speed: 1.0 },
            personality: Personality::default(),
            start: Some(BehaviorState::RageDecision),
        },
    }
}

impl ArchetypeProfile {
    pub fn build(&self) -> Result<Combatant, CombatantError> {
        Combatant::new(self.name, self.max_hp, self.stats, self.personality)
    }
}
