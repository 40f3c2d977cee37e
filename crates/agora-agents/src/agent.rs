//! Character creation and name bookkeeping.
//!
//! The [`CharacterManager`] turns a [`CharacterSpec`] (as written in a
//! config file or sent by a caller) into a living [`Character`] with
//! default emotions, empty memory, and the standard starting resources.
//! Characters without an explicit position are scattered deterministically
//! around the Market Square.

use std::collections::{BTreeMap, BTreeSet};

use agora_types::{Character, CharacterId, PersonalityTraits, Position};
use agora_world::{SeedMix, uniform};
use serde::Deserialize;

use crate::error::AgentError;

/// Half-width of the square new characters are scattered across.
const SPAWN_SPREAD: f64 = 80.0;

/// Everything needed to create a character.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CharacterSpec {
    /// Display name; must be unique within a simulation.
    pub name: String,

    /// Free-text background.
    #[serde(default)]
    pub profile: String,

    /// Personality scores; out-of-range values are clamped.
    #[serde(default)]
    pub traits: PersonalityTraits,

    /// Goal phrases.
    #[serde(default)]
    pub goals: Vec<String>,

    /// Free-text motivations.
    #[serde(default)]
    pub motivations: Vec<String>,

    /// Starting position; scattered near the origin when absent.
    #[serde(default)]
    pub position: Option<Position>,

    /// Starting resources merged over the defaults.
    #[serde(default)]
    pub resources: BTreeMap<String, f64>,
}

impl CharacterSpec {
    /// A spec with only a name and traits.
    pub fn new(name: impl Into<String>, traits: PersonalityTraits) -> Self {
        Self {
            name: name.into(),
            profile: String::new(),
            traits,
            goals: Vec::new(),
            motivations: Vec::new(),
            position: None,
            resources: BTreeMap::new(),
        }
    }

    /// Add goal phrases.
    #[must_use]
    pub fn with_goals<I, S>(mut self, goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.goals.extend(goals.into_iter().map(Into::into));
        self
    }

    /// Fix the starting position.
    #[must_use]
    pub const fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Creates characters and enforces name uniqueness.
#[derive(Debug, Default)]
pub struct CharacterManager {
    /// Names currently in use.
    names_in_use: BTreeSet<String>,
    /// Characters created so far; feeds the scatter seed.
    created: u64,
}

impl CharacterManager {
    /// Create an empty manager.
    pub const fn new() -> Self {
        Self {
            names_in_use: BTreeSet::new(),
            created: 0,
        }
    }

    /// Create a character from `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::EmptyName`] for a blank name and
    /// [`AgentError::DuplicateName`] if the name is taken.
    pub fn create(&mut self, spec: CharacterSpec, world_seed: u64) -> Result<Character, AgentError> {
        let name = spec.name.trim().to_owned();
        if name.is_empty() {
            return Err(AgentError::EmptyName);
        }
        if self.names_in_use.contains(&name) {
            return Err(AgentError::DuplicateName(name));
        }

        let position = spec
            .position
            .unwrap_or_else(|| self.scatter(world_seed, &name));
        let t = spec.traits;
        let traits = PersonalityTraits::new(
            t.openness,
            t.conscientiousness,
            t.extraversion,
            t.agreeableness,
            t.neuroticism,
        );

        let mut character = Character::new(CharacterId::new(), name.clone(), traits);
        character.profile = spec.profile;
        character.goals = spec.goals;
        character.motivations = spec.motivations;
        character.position = position;
        character.resources.extend(spec.resources);

        self.names_in_use.insert(name);
        self.created = self.created.saturating_add(1);
        tracing::debug!(
            character = %character.id,
            name = %character.name,
            x = position.x,
            y = position.y,
            "Character created"
        );
        Ok(character)
    }

    /// Forget a name so it can be reused.
    pub fn release(&mut self, name: &str) {
        self.names_in_use.remove(name);
    }

    /// Whether `name` is taken.
    pub fn is_taken(&self, name: &str) -> bool {
        self.names_in_use.contains(name)
    }

    fn scatter(&self, world_seed: u64, name: &str) -> Position {
        let mut rng = SeedMix::new(world_seed, "spawn")
            .bytes(name.as_bytes())
            .tick(self.created)
            .rng();
        let x = uniform(&mut rng, -SPAWN_SPREAD, SPAWN_SPREAD);
        let y = uniform(&mut rng, -SPAWN_SPREAD, SPAWN_SPREAD);
        Position::new(x, y)
    }
}
