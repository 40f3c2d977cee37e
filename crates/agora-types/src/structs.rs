//! Core entity structs for the Agora simulation.
//!
//! Characters, their inner state (traits, emotions, memory), the actions
//! they choose, the events those actions produce, the shared environment,
//! and the simulation's tunable knobs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ActionType, Belief, Emotion, EventKind, EventType, PersonalityTrait};
use crate::ids::{CharacterId, EventId};
use crate::outcome::OutcomeDelta;

/// Name of the energy resource.
pub const ENERGY: &str = "energy";
/// Name of the influence resource.
pub const INFLUENCE: &str = "influence";
/// Name of the wealth resource.
pub const WEALTH: &str = "wealth";

// ---------------------------------------------------------------------------
// Personality
// ---------------------------------------------------------------------------

/// Big-five personality scores, each in `[0, 1]`. Fixed after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PersonalityTraits {
    /// Curiosity and openness to experience.
    pub openness: f64,
    /// Diligence; drives rest recovery, gathering yield, competition.
    pub conscientiousness: f64,
    /// Sociability; drives negotiation skill.
    pub extraversion: f64,
    /// Warmth; drives negotiation skill and discourages hostility.
    pub agreeableness: f64,
    /// Emotional volatility; amplifies fear and anger under threat.
    pub neuroticism: f64,
}

impl PersonalityTraits {
    /// Build a trait set, clamping every score into `[0, 1]`.
    pub const fn new(
        openness: f64,
        conscientiousness: f64,
        extraversion: f64,
        agreeableness: f64,
        neuroticism: f64,
    ) -> Self {
        Self {
            openness: openness.clamp(0.0, 1.0),
            conscientiousness: conscientiousness.clamp(0.0, 1.0),
            extraversion: extraversion.clamp(0.0, 1.0),
            agreeableness: agreeableness.clamp(0.0, 1.0),
            neuroticism: neuroticism.clamp(0.0, 1.0),
        }
    }

    /// Score for a single dimension.
    pub const fn value(&self, which: PersonalityTrait) -> f64 {
        match which {
            PersonalityTrait::Openness => self.openness,
            PersonalityTrait::Conscientiousness => self.conscientiousness,
            PersonalityTrait::Extraversion => self.extraversion,
            PersonalityTrait::Agreeableness => self.agreeableness,
            PersonalityTrait::Neuroticism => self.neuroticism,
        }
    }

    /// The highest-scoring dimension. Earlier dimensions win ties.
    pub fn dominant(&self) -> PersonalityTrait {
        let mut best = PersonalityTrait::Openness;
        for candidate in PersonalityTrait::ALL {
            if self.value(candidate) > self.value(best) {
                best = candidate;
            }
        }
        best
    }
}

impl Default for PersonalityTraits {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5, 0.5, 0.5)
    }
}

// ---------------------------------------------------------------------------
// Emotions
// ---------------------------------------------------------------------------

/// Seven emotional dimensions, each kept in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EmotionalState {
    /// Contentment.
    pub happiness: f64,
    /// Hostility.
    pub anger: f64,
    /// Apprehension.
    pub fear: f64,
    /// Confidence in others.
    pub trust: f64,
    /// Reaction to the unexpected.
    pub surprise: f64,
    /// Low mood.
    pub sadness: f64,
    /// Aversion.
    pub disgust: f64,
}

impl EmotionalState {
    /// Current value of one emotion.
    pub const fn value(&self, which: Emotion) -> f64 {
        match which {
            Emotion::Happiness => self.happiness,
            Emotion::Anger => self.anger,
            Emotion::Fear => self.fear,
            Emotion::Trust => self.trust,
            Emotion::Surprise => self.surprise,
            Emotion::Sadness => self.sadness,
            Emotion::Disgust => self.disgust,
        }
    }

    const fn slot(&mut self, which: Emotion) -> &mut f64 {
        match which {
            Emotion::Happiness => &mut self.happiness,
            Emotion::Anger => &mut self.anger,
            Emotion::Fear => &mut self.fear,
            Emotion::Trust => &mut self.trust,
            Emotion::Surprise => &mut self.surprise,
            Emotion::Sadness => &mut self.sadness,
            Emotion::Disgust => &mut self.disgust,
        }
    }

    /// Add `delta` to one emotion and clamp the result into `[-1, 1]`.
    pub fn adjust(&mut self, which: Emotion, delta: f64) {
        let slot = self.slot(which);
        *slot = (*slot + delta).clamp(-1.0, 1.0);
    }

    /// Multiply one emotion by `factor` and clamp.
    pub fn scale(&mut self, which: Emotion, factor: f64) {
        let slot = self.slot(which);
        *slot = (*slot * factor).clamp(-1.0, 1.0);
    }

    /// Whether every dimension lies in `[-1, 1]`.
    pub fn is_bounded(&self) -> bool {
        Emotion::ALL
            .iter()
            .all(|e| (-1.0..=1.0).contains(&self.value(*e)))
    }
}

// ---------------------------------------------------------------------------
// Memory
// ---------------------------------------------------------------------------

/// One remembered event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MemoryEntry {
    /// The tick when the memory was formed.
    pub tick: u64,
    /// `"{title}: {description}"` of the remembered event.
    pub content: String,
    /// Importance in `[0, 1]`, copied from the event.
    pub importance: f64,
    /// Other characters involved.
    pub related: Vec<CharacterId>,
    /// Emotional state at the time of recording.
    pub emotional_context: EmotionalState,
}

/// A character's memory: a bounded short-term list, an unbounded long-term
/// list, and the beliefs inferred from both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Memory {
    /// Recent memories, soft-capped by consolidation.
    pub short_term: Vec<MemoryEntry>,
    /// Memories promoted out of short-term.
    pub long_term: Vec<MemoryEntry>,
    /// Belief labels about other characters.
    pub beliefs: BTreeMap<CharacterId, Belief>,
}

impl Memory {
    /// Short-term entries followed by long-term entries.
    pub fn all_entries(&self) -> impl Iterator<Item = &MemoryEntry> {
        self.short_term.iter().chain(self.long_term.iter())
    }
}

// ---------------------------------------------------------------------------
// Space
// ---------------------------------------------------------------------------

/// A point on the simulation plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// A new position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The point `fraction` of the way from `self` to `target`.
    pub fn toward(self, target: Self, fraction: f64) -> Self {
        Self {
            x: (target.x - self.x).mul_add(fraction, self.x),
            y: (target.y - self.y).mul_add(fraction, self.y),
        }
    }
}

/// A named place in the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Location {
    /// Display name.
    pub name: String,
    /// Where it sits.
    pub position: Position,
    /// What happens there (trade, conflict, diplomacy, ...).
    pub kind: String,
}

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

/// A simulated character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Character {
    /// Unique identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Free-text background.
    pub profile: String,
    /// Personality scores.
    pub traits: PersonalityTraits,
    /// Goal phrases; keywords in them bias action choice.
    pub goals: Vec<String>,
    /// Free-text motivations.
    pub motivations: Vec<String>,
    /// Current emotions.
    pub emotional_state: EmotionalState,
    /// Memories and beliefs.
    pub memory: Memory,
    /// Named resource balances; missing names read as zero.
    pub resources: BTreeMap<String, f64>,
    /// Relationship scores toward others in `[-1, 1]`; missing reads as zero.
    pub relationships: BTreeMap<CharacterId, f64>,
    /// The action chosen on the most recent tick.
    pub last_action: Option<Action>,
    /// Explanation for the most recent choice.
    pub last_reasoning: String,
    /// Dead characters are skipped by every phase.
    pub alive: bool,
    /// Where the character stands.
    pub position: Position,
}

impl Character {
    /// A living character with default emotions, empty memory, and the
    /// standard starting resources.
    pub fn new(id: CharacterId, name: impl Into<String>, traits: PersonalityTraits) -> Self {
        let resources = BTreeMap::from([
            (ENERGY.to_owned(), 100.0),
            (INFLUENCE.to_owned(), 50.0),
            (WEALTH.to_owned(), 50.0),
        ]);
        Self {
            id,
            name: name.into(),
            profile: String::new(),
            traits,
            goals: Vec::new(),
            motivations: Vec::new(),
            emotional_state: EmotionalState::default(),
            memory: Memory::default(),
            resources,
            relationships: BTreeMap::new(),
            last_action: None,
            last_reasoning: String::new(),
            alive: true,
            position: Position::default(),
        }
    }

    /// Balance of a named resource, zero if absent.
    pub fn resource(&self, name: &str) -> f64 {
        self.resources.get(name).copied().unwrap_or(0.0)
    }

    /// Relationship toward `other`, zero if absent.
    pub fn relationship(&self, other: CharacterId) -> f64 {
        self.relationships.get(&other).copied().unwrap_or(0.0)
    }

    /// Sum of every resource balance.
    pub fn total_resources(&self) -> f64 {
        self.resources.values().sum()
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// What a character intends to do this tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Action {
    /// The chosen action.
    pub action_type: ActionType,
    /// The other character involved, for target-requiring actions.
    pub target: Option<CharacterId>,
    /// Short description of the intent.
    pub detail: String,
    /// Why it was chosen.
    pub reasoning: String,
}

impl Action {
    /// An action without text.
    pub const fn new(action_type: ActionType, target: Option<CharacterId>) -> Self {
        Self {
            action_type,
            target,
            detail: String::new(),
            reasoning: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Something that happened during a tick. Events are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Identifier, assigned when the event is appended to the log.
    pub id: EventId,
    /// Tick the event happened on.
    pub tick: u64,
    /// Coarse classification, derived from `kind`.
    pub event_type: EventType,
    /// The concrete resolution that produced it.
    pub kind: EventKind,
    /// Short headline.
    pub title: String,
    /// One-sentence narrative.
    pub description: String,
    /// Characters involved.
    pub participants: Vec<CharacterId>,
    /// Human-readable consequences.
    pub outcomes: Vec<String>,
    /// Importance in `[0, 1]`.
    pub importance: f64,
    /// The winning side of a contest, if any.
    pub winner: Option<CharacterId>,
    /// Numeric consequences applied after resolution.
    pub deltas: Vec<OutcomeDelta>,
}

impl Event {
    /// A new event of `kind` at `tick` with default importance 0.5.
    pub fn new(
        tick: u64,
        kind: EventKind,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: EventId::derived(tick, 0),
            tick,
            event_type: kind.event_type(),
            kind,
            title: title.into(),
            description: description.into(),
            participants: Vec::new(),
            outcomes: Vec::new(),
            importance: 0.5,
            winner: None,
            deltas: Vec::new(),
        }
    }

    /// Set the participants.
    #[must_use]
    pub fn with_participants(mut self, participants: Vec<CharacterId>) -> Self {
        self.participants = participants;
        self
    }

    /// Set the outcome texts.
    #[must_use]
    pub fn with_outcomes(mut self, outcomes: Vec<String>) -> Self {
        self.outcomes = outcomes;
        self
    }

    /// Set the importance, clamped into `[0, 1]`.
    #[must_use]
    pub const fn with_importance(mut self, importance: f64) -> Self {
        self.importance = importance.clamp(0.0, 1.0);
        self
    }

    /// Record the winning side.
    #[must_use]
    pub const fn with_winner(mut self, winner: CharacterId) -> Self {
        self.winner = Some(winner);
        self
    }

    /// Set the numeric deltas.
    #[must_use]
    pub fn with_deltas(mut self, deltas: Vec<OutcomeDelta>) -> Self {
        self.deltas = deltas;
        self
    }

    /// Whether `character` took part.
    pub fn involves(&self, character: CharacterId) -> bool {
        self.participants.contains(&character)
    }

    /// Whether the deltas leave `character` with any gain and any loss of
    /// resources, as `(gained, lost)`. Energy spent on effort is not a loss.
    pub fn resource_flow(&self, character: CharacterId) -> (bool, bool) {
        let mut gained = false;
        let mut lost = false;
        for delta in &self.deltas {
            match delta {
                OutcomeDelta::Resource {
                    character: who,
                    resource,
                    amount,
                } if *who == character && !(resource == ENERGY && *amount < 0.0) => {
                    gained |= *amount > 0.0;
                    lost |= *amount < 0.0;
                }
                OutcomeDelta::Transfer {
                    from, to, amount, ..
                } if *amount > 0.0 => {
                    gained |= *to == character;
                    lost |= *from == character;
                }
                _ => {}
            }
        }
        (gained, lost)
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// The shared world all characters live in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Environment {
    /// Display name.
    pub name: String,
    /// Flavor text.
    pub description: String,
    /// Shared resource pools; never negative.
    pub resources: BTreeMap<String, f64>,
    /// Condition flags such as weather and scarcity.
    pub conditions: BTreeMap<String, String>,
    /// Named places.
    pub locations: Vec<Location>,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// The tunable knobs of one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SimulationConfig {
    /// Scales decision noise, softmax temperature, and event probabilities.
    #[serde(default = "default_randomness")]
    pub randomness: f64,
    /// Scales perception radius; above 0.7 others' resources are visible.
    #[serde(default = "default_information_symmetry")]
    pub information_symmetry: f64,
    /// Per-tick drain applied to environment pools.
    #[serde(default = "default_resource_scarcity")]
    pub resource_scarcity: f64,
    /// Tick limit; zero or negative means the simulation never advances.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: i64,
    /// World seed mixed into every random stream.
    #[serde(default)]
    pub seed: u64,
}

impl SimulationConfig {
    /// Copy with every ratio clamped into `[0, 1]`.
    #[must_use]
    pub const fn normalized(self) -> Self {
        Self {
            randomness: self.randomness.clamp(0.0, 1.0),
            information_symmetry: self.information_symmetry.clamp(0.0, 1.0),
            resource_scarcity: self.resource_scarcity.clamp(0.0, 1.0),
            max_ticks: self.max_ticks,
            seed: self.seed,
        }
    }

    /// The tick limit as an unsigned count; non-positive limits become zero.
    pub fn tick_limit(&self) -> u64 {
        u64::try_from(self.max_ticks).unwrap_or(0)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            randomness: default_randomness(),
            information_symmetry: default_information_symmetry(),
            resource_scarcity: default_resource_scarcity(),
            max_ticks: default_max_ticks(),
            seed: 0,
        }
    }
}

const fn default_randomness() -> f64 {
    0.3
}

const fn default_information_symmetry() -> f64 {
    0.5
}

const fn default_resource_scarcity() -> f64 {
    0.3
}

const fn default_max_ticks() -> i64 {
    1000
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn traits_are_clamped() {
        let traits = PersonalityTraits::new(1.4, -0.2, 0.5, 0.5, 0.5);
        assert_eq!(traits.openness, 1.0);
        assert_eq!(traits.conscientiousness, 0.0);
    }

    #[test]
    fn dominant_trait_prefers_earliest_on_tie() {
        let traits = PersonalityTraits::new(0.5, 0.9, 0.9, 0.1, 0.1);
        assert_eq!(traits.dominant(), PersonalityTrait::Conscientiousness);
    }

    #[test]
    fn emotion_adjust_clamps() {
        let mut state = EmotionalState::default();
        state.adjust(Emotion::Anger, 3.0);
        state.adjust(Emotion::Trust, -3.0);
        assert_eq!(state.anger, 1.0);
        assert_eq!(state.trust, -1.0);
        assert!(state.is_bounded());
    }

    #[test]
    fn missing_resources_and_relationships_read_zero() {
        let c = Character::new(CharacterId::new(), "Ada", PersonalityTraits::default());
        assert_eq!(c.resource("food"), 0.0);
        assert_eq!(c.resource(ENERGY), 100.0);
        assert_eq!(c.relationship(CharacterId::new()), 0.0);
        assert_eq!(c.total_resources(), 200.0);
    }

    #[test]
    fn resource_flow_reads_transfers() {
        let a = CharacterId::new();
        let b = CharacterId::new();
        let event = Event::new(0, EventKind::Sharing, "t", "d").with_deltas(vec![
            OutcomeDelta::Transfer {
                from: a,
                to: b,
                resource: WEALTH.to_owned(),
                amount: 5.0,
            },
            OutcomeDelta::Resource {
                character: a,
                resource: INFLUENCE.to_owned(),
                amount: 3.0,
            },
        ]);
        assert_eq!(event.resource_flow(a), (true, true));
        assert_eq!(event.resource_flow(b), (true, false));
    }

    #[test]
    fn spent_energy_is_not_a_loss() {
        let a = CharacterId::new();
        let event = Event::new(0, EventKind::Gathering, "t", "d").with_deltas(vec![
            OutcomeDelta::resource(a, ENERGY, -8.0),
            OutcomeDelta::resource(a, WEALTH, 7.5),
        ]);
        assert_eq!(event.resource_flow(a), (true, false));
    }

    #[test]
    fn config_defaults_and_tick_limit() {
        let config: SimulationConfig = serde_json::from_str("{\"max_ticks\": -4}").unwrap();
        assert_eq!(config.randomness, 0.3);
        assert_eq!(config.tick_limit(), 0);
        let clamped = SimulationConfig {
            randomness: 2.0,
            ..SimulationConfig::default()
        }
        .normalized();
        assert_eq!(clamped.randomness, 1.0);
    }

    #[test]
    fn position_moves_toward_target() {
        let p = Position::new(0.0, 0.0).toward(Position::new(100.0, 0.0), 0.3);
        assert!((p.x - 30.0).abs() < 1e-9);
        assert!((Position::new(0.0, 0.0).distance_to(Position::new(3.0, 4.0)) - 5.0).abs() < 1e-9);
    }
}
