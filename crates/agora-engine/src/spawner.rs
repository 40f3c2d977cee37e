//! Character spawner for seeding the simulation.
//!
//! When the config file lists no characters, the spawner builds a default
//! roster: unique names drawn from a built-in pool, personalities drawn
//! from the world seed, and two goal phrases each. The same seed always
//! yields the same roster.

use agora_agents::{CharacterManager, CharacterSpec};
use agora_core::SimulationState;
use agora_types::PersonalityTraits;
use agora_world::{SeedMix, uniform};
use rand::seq::IndexedRandom;
use tracing::info;

use crate::error::EngineError;

/// Number of characters in the default roster.
pub const DEFAULT_ROSTER_SIZE: usize = 6;

/// Goal phrases handed out per character.
const GOALS_PER_CHARACTER: usize = 2;

// -----------------------------------------------------------------------
// Pools
// -----------------------------------------------------------------------

/// Built-in pool of character names. Names are drawn without replacement.
const NAME_POOL: &[&str] = &[
    "Aldric", "Brenna", "Cassius", "Delia", "Edmund", "Fiora", "Gideon", "Helena",
    "Ivo", "Junia", "Kaspar", "Livia", "Marius", "Nerissa", "Orsino", "Petra",
    "Quintus", "Rosalind", "Silas", "Thalia", "Ulric", "Vesna", "Wendel", "Xanthe",
];

/// Goal phrases, each matching at least one scoring keyword.
const GOAL_POOL: &[&str] = &[
    "accumulate wealth",
    "gain power over rivals",
    "learn the secrets of the Library",
    "keep the peace",
    "live in harmony with neighbors",
    "survive the lean seasons",
    "build influence in the Council Hall",
    "make lasting friendships",
    "explore the Wilderness",
    "trade fairly at the market",
    "protect the weak",
    "take revenge on old enemies",
];

// -----------------------------------------------------------------------
// Roster
// -----------------------------------------------------------------------

/// Build `count` character specs from the world seed. The roster is capped
/// at the size of the name pool.
pub fn default_roster(count: usize, seed: u64) -> Vec<CharacterSpec> {
    let mut rng = SeedMix::new(seed, "roster").rng();
    let names: Vec<&str> = NAME_POOL.choose_multiple(&mut rng, count).copied().collect();

    names
        .into_iter()
        .map(|name| {
            let traits = PersonalityTraits::new(
                uniform(&mut rng, 0.1, 0.9),
                uniform(&mut rng, 0.1, 0.9),
                uniform(&mut rng, 0.1, 0.9),
                uniform(&mut rng, 0.1, 0.9),
                uniform(&mut rng, 0.1, 0.9),
            );
            let goals: Vec<&str> = GOAL_POOL
                .choose_multiple(&mut rng, GOALS_PER_CHARACTER)
                .copied()
                .collect();
            CharacterSpec::new(name, traits).with_goals(goals)
        })
        .collect()
}

/// Create a character for every spec and add it to the roster.
///
/// Returns the manager that now owns the roster's names, so later
/// additions keep names unique.
pub fn spawn_roster(
    state: &mut SimulationState,
    specs: &[CharacterSpec],
) -> Result<CharacterManager, EngineError> {
    let mut manager = CharacterManager::new();
    for spec in specs {
        let character = manager.create(spec.clone(), state.config.seed)?;
        info!(
            character = %character.id,
            name = %character.name,
            dominant_trait = ?character.traits.dominant(),
            goals = ?character.goals,
            "Character spawned"
        );
        state.add_character(character);
    }
    Ok(manager)
}
