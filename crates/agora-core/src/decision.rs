//! Decision sources: how characters choose what to do each tick.
//!
//! The [`DecisionSource`] trait abstracts over decision-making so the tick
//! loop does not care where actions come from. [`UtilityDecisionSource`]
//! runs the personality-driven utility engine; [`ScriptedDecisionSource`]
//! plays fixed actions for chosen characters and defers to the utility
//! engine for everyone else.
//!
//! # The utility engine
//!
//! 1. Perceive, then recall memories relevant to the names and event
//!    titles in view.
//! 2. Score one option per solo action, and one per visible character for
//!    each target-requiring action.
//! 3. Shift options aimed at remembered characters by memory influence.
//! 4. Add Gaussian noise scaled by the simulation's randomness.
//! 5. Keep the five best and sample one through a softmax whose
//!    temperature also grows with randomness.
//!
//! All draws come from one generator seeded by the world seed, the
//! character, and the tick, so a decision replays exactly.

use std::collections::BTreeMap;

use agora_agents::{base_score, memory_influence, recall_relevant};
use agora_types::{
    Action, ActionType, Belief, Character, CharacterId, ENERGY, Perception, VisibleCharacter,
};
use agora_world::{SeedMix, SimRng, gaussian};
use rand::Rng;
use tracing::debug;

use crate::perception::perceive;
use crate::tick::SimulationState;

/// Noise standard deviation per unit of randomness.
pub const NOISE_SCALE: f64 = 0.5;

/// Number of best options kept for sampling.
pub const TOP_N: usize = 5;

/// Softmax temperature at zero randomness.
pub const BASE_TEMPERATURE: f64 = 0.3;

/// Temperature added per unit of randomness.
pub const TEMPERATURE_SCALE: f64 = 0.7;

/// Temperature floor.
pub const MIN_TEMPERATURE: f64 = 0.01;

/// Distance at which the proximity bonus vanishes.
pub const PROXIMITY_RANGE: f64 = 200.0;

/// Proximity bonus for a target standing on top of the chooser.
pub const PROXIMITY_BONUS: f64 = 0.2;

/// Energy below which resting is favored.
pub const LOW_ENERGY: f64 = 40.0;

/// Resource balance below which gathering is favored.
pub const LOW_RESOURCE: f64 = 30.0;

// ---------------------------------------------------------------------------
// Decision sources
// ---------------------------------------------------------------------------

/// Trait for anything that can produce one action per character per tick.
///
/// Implementations receive the character and the start-of-tick state and
/// must return an action; they cannot fail.
pub trait DecisionSource {
    /// Choose an action for `character`.
    fn decide(&mut self, character: &Character, state: &SimulationState) -> Action;
}

/// The personality-driven utility engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityDecisionSource;

impl DecisionSource for UtilityDecisionSource {
    fn decide(&mut self, character: &Character, state: &SimulationState) -> Action {
        decide(character, state)
    }
}

/// Fixed actions for selected characters, utility decisions for the rest.
///
/// A scripted action repeats every tick until it is cleared.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisionSource {
    script: BTreeMap<CharacterId, Action>,
}

impl ScriptedDecisionSource {
    /// An empty script.
    pub const fn new() -> Self {
        Self {
            script: BTreeMap::new(),
        }
    }

    /// Builder form of [`ScriptedDecisionSource::set`].
    #[must_use]
    pub fn with(mut self, character: CharacterId, action: Action) -> Self {
        self.set(character, action);
        self
    }

    /// Script `character` to take `action` every tick.
    pub fn set(&mut self, character: CharacterId, action: Action) {
        self.script.insert(character, action);
    }

    /// Return `character` to the utility engine.
    pub fn clear(&mut self, character: CharacterId) {
        self.script.remove(&character);
    }
}

impl DecisionSource for ScriptedDecisionSource {
    fn decide(&mut self, character: &Character, state: &SimulationState) -> Action {
        self.script
            .get(&character.id)
            .cloned()
            .unwrap_or_else(|| decide(character, state))
    }
}

/// Store `action` as the character's most recent choice.
pub fn record_decision(character: &mut Character, action: &Action) {
    character.last_reasoning.clone_from(&action.reasoning);
    character.last_action = Some(action.clone());
}

// ---------------------------------------------------------------------------
// Utility engine
// ---------------------------------------------------------------------------

/// A candidate action and its current score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredOption {
    /// The candidate.
    pub action: Action,
    /// Higher is better.
    pub score: f64,
}

/// Choose an action for `character` in `state` with the utility engine.
///
/// Pure apart from logging: the same character and state always yield the
/// same action.
pub fn decide(character: &Character, state: &SimulationState) -> Action {
    let perception = perceive(character, state);
    let context = recall_context(&perception);
    let recalled = recall_relevant(&character.memory, &context, &state.memory_config);
    let influence = memory_influence(&recalled);

    let mut options = evaluate_options(character, &perception);
    apply_memory_influence(&mut options, &influence);

    let randomness = state.config.randomness;
    let mut rng = SeedMix::new(state.config.seed, "decide")
        .character(character.id)
        .tick(state.tick)
        .rng();
    for option in &mut options {
        option.score += gaussian(&mut rng, 0.0, randomness * NOISE_SCALE);
    }

    let action = select_action(options, randomness, &mut rng);
    debug!(
        tick = state.tick,
        character = %character.name,
        action = %action.action_type,
        target = ?action.target,
        "Decision made"
    );
    action
}

/// Names of visible characters followed by recent event titles.
pub fn recall_context(perception: &Perception) -> String {
    perception
        .nearby_characters
        .iter()
        .map(|v| v.name.as_str())
        .chain(perception.recent_events.iter().map(|e| e.title.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Score every available option before memory and noise.
///
/// Options are produced in [`ActionType::ALL`] order; target-requiring
/// actions expand to one option per visible character in roster order and
/// produce nothing when nobody is in view.
pub fn evaluate_options(character: &Character, perception: &Perception) -> Vec<ScoredOption> {
    let mut options = Vec::new();
    for action_type in ActionType::ALL {
        let base = base_score(character, action_type);
        if action_type.requires_target() {
            for visible in &perception.nearby_characters {
                let score = base + target_adjustment(action_type, visible);
                options.push(ScoredOption {
                    action: Action {
                        action_type,
                        target: Some(visible.id),
                        detail: target_detail(action_type, &visible.name),
                        reasoning: target_reasoning(action_type, character, visible, score),
                    },
                    score,
                });
            }
        } else {
            let score = base + solo_adjustment(action_type, character);
            options.push(ScoredOption {
                action: Action {
                    action_type,
                    target: None,
                    detail: solo_detail(action_type, perception),
                    reasoning: solo_reasoning(action_type, character, score),
                },
                score,
            });
        }
    }
    options
}

/// Relationship, belief, and proximity terms for a targeted option.
fn target_adjustment(action_type: ActionType, visible: &VisibleCharacter) -> f64 {
    let relationship = if action_type.is_affiliative() {
        visible.relationship * 0.5
    } else if action_type.is_hostile() {
        -visible.relationship * 0.4
    } else {
        0.0
    };

    let belief = match visible.belief {
        Some(Belief::Untrustworthy) if action_type.is_cooperative() => -0.6,
        Some(Belief::Untrustworthy)
            if matches!(action_type, ActionType::Defend | ActionType::Compete) =>
        {
            0.3
        }
        Some(Belief::Ally) if action_type.is_cooperative() => 0.4,
        Some(Belief::Ally) if matches!(action_type, ActionType::Attack | ActionType::Betray) => {
            -0.7
        }
        _ => 0.0,
    };

    let proximity = (1.0 - visible.distance / PROXIMITY_RANGE).max(0.0) * PROXIMITY_BONUS;
    relationship + belief + proximity
}

/// Need-driven bonus for a solo option.
fn solo_adjustment(action_type: ActionType, character: &Character) -> f64 {
    match action_type {
        ActionType::Rest if character.resource(ENERGY) < LOW_ENERGY => 0.5,
        ActionType::Gather if character.resources.values().any(|v| *v < LOW_RESOURCE) => 0.4,
        _ => 0.0,
    }
}

/// Add remembered goodwill to cooperative options and subtract it from
/// hostile ones, for options aimed at a remembered character.
pub fn apply_memory_influence(options: &mut [ScoredOption], influence: &BTreeMap<CharacterId, f64>) {
    for option in options {
        let Some(adjustment) = option.action.target.and_then(|t| influence.get(&t)) else {
            continue;
        };
        if option.action.action_type.is_cooperative() {
            option.score += adjustment;
        } else if option.action.action_type.is_hostile() {
            option.score -= adjustment;
        }
    }
}

/// Sample one of the best [`TOP_N`] options through a softmax.
///
/// Falls back to observing when there is nothing to choose from.
pub fn select_action(mut options: Vec<ScoredOption>, randomness: f64, rng: &mut SimRng) -> Action {
    if options.is_empty() {
        return fallback_action();
    }

    options.sort_by(|a, b| b.score.total_cmp(&a.score));
    options.truncate(TOP_N);

    let temperature = TEMPERATURE_SCALE
        .mul_add(randomness, BASE_TEMPERATURE)
        .max(MIN_TEMPERATURE);
    let best = options.first().map_or(0.0, |o| o.score);
    let weights: Vec<f64> = options
        .iter()
        .map(|o| ((o.score - best) / temperature).exp())
        .collect();
    let total: f64 = weights.iter().sum();

    let draw = rng.random::<f64>();
    let chosen = weights
        .iter()
        .scan(0.0, |cumulative, w| {
            *cumulative += w / total;
            Some(*cumulative)
        })
        .position(|cumulative| draw <= cumulative)
        .unwrap_or(0);

    options
        .into_iter()
        .nth(chosen)
        .map_or_else(fallback_action, |o| o.action)
}

/// What a character does when it has no options at all.
pub fn fallback_action() -> Action {
    Action {
        action_type: ActionType::Observe,
        target: None,
        detail: "Nothing to do".to_owned(),
        reasoning: "No options available".to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

fn target_detail(action_type: ActionType, name: &str) -> String {
    match action_type {
        ActionType::Cooperate => format!("Working together with {name} on a shared objective"),
        ActionType::Compete => format!("Competing against {name} for resources"),
        ActionType::Negotiate => format!("Proposing a deal to {name}"),
        ActionType::Ally => format!("Forming an alliance with {name}"),
        ActionType::Betray => format!("Betraying {name}'s trust for personal gain"),
        ActionType::Attack => format!("Attacking {name}"),
        ActionType::Defend => format!("Defending against {name}"),
        ActionType::Share => format!("Sharing resources with {name}"),
        ActionType::Communicate => format!("Exchanging information with {name}"),
        ActionType::Explore | ActionType::Rest | ActionType::Gather | ActionType::Observe => {
            format!("Interacting with {name}")
        }
    }
}

fn solo_detail(action_type: ActionType, perception: &Perception) -> String {
    match action_type {
        ActionType::Explore => perception.nearby_locations.first().map_or_else(
            || "Venturing into unknown territory".to_owned(),
            |n| format!("Exploring toward {}", n.location.name),
        ),
        ActionType::Rest => "Resting to recover energy".to_owned(),
        ActionType::Gather => "Gathering resources from the environment".to_owned(),
        ActionType::Observe => "Carefully observing surroundings".to_owned(),
        other => format!("Performing {other}"),
    }
}

fn target_reasoning(
    action_type: ActionType,
    character: &Character,
    visible: &VisibleCharacter,
    score: f64,
) -> String {
    let mut parts = Vec::new();
    let rel = visible.relationship;
    if rel > 0.3 {
        parts.push(format!("positive relationship with {} ({rel:.1})", visible.name));
    } else if rel < -0.3 {
        parts.push(format!("negative relationship with {} ({rel:.1})", visible.name));
    }
    if let Some(belief) = visible.belief {
        parts.push(format!("believes {} is {}", visible.name, belief.as_str()));
    }
    parts.push(format!("driven by high {}", character.traits.dominant().as_str()));
    if let Some(goal) = character.goals.first() {
        parts.push(format!("pursuing goal: {goal}"));
    }
    format!(
        "Chose to {action_type} because: {}. Score: {score:.2}",
        parts.join(", ")
    )
}

fn solo_reasoning(action_type: ActionType, character: &Character, score: f64) -> String {
    let mut parts = Vec::new();
    if character.resource(ENERGY) < LOW_ENERGY {
        parts.push("low energy".to_owned());
    }
    if let Some(goal) = character.goals.first() {
        parts.push(format!("pursuing: {goal}"));
    }
    parts.push(format!("personality: high {}", character.traits.dominant().as_str()));
    format!(
        "Chose to {action_type} based on {}. Score: {score:.2}",
        parts.join(", ")
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use agora_types::{MemoryEntry, PersonalityTraits, Position, SimulationConfig};

    use super::*;

    fn make_state(randomness: f64) -> (SimulationState, CharacterId, CharacterId) {
        let mut state = SimulationState::new(SimulationConfig {
            randomness,
            seed: 7,
            ..SimulationConfig::default()
        });
        let mut a = Character::new(CharacterId::new(), "Ada", PersonalityTraits::default());
        let mut b = Character::new(CharacterId::new(), "Bram", PersonalityTraits::default());
        a.position = Position::new(0.0, 0.0);
        b.position = Position::new(20.0, 0.0);
        let (ida, idb) = (a.id, b.id);
        state.add_character(a);
        state.add_character(b);
        (state, ida, idb)
    }

    fn option_score(options: &[ScoredOption], action_type: ActionType, target: Option<CharacterId>) -> f64 {
        options
            .iter()
            .find(|o| o.action.action_type == action_type && o.action.target == target)
            .map(|o| o.score)
            .unwrap()
    }

    #[test]
    fn options_cover_solo_and_each_visible_target() {
        let (state, a, _) = make_state(0.3);
        let ada = state.character(a).unwrap();
        let options = evaluate_options(ada, &perceive(ada, &state));
        // Nine targeted actions times one visible character, four solo.
        assert_eq!(options.len(), 13);
        assert_eq!(options.first().unwrap().action.action_type, ActionType::Cooperate);
    }

    #[test]
    fn nobody_in_view_means_only_solo_options() {
        let (mut state, a, b) = make_state(0.3);
        state.characters.get_mut(&b).unwrap().position = Position::new(900.0, 900.0);
        let ada = state.character(a).unwrap();
        let options = evaluate_options(ada, &perceive(ada, &state));
        assert_eq!(options.len(), 4);
        assert!(options.iter().all(|o| o.action.target.is_none()));
    }

    #[test]
    fn untrustworthy_belief_lowers_cooperation() {
        let (mut state, a, b) = make_state(0.3);
        let before = {
            let ada = state.character(a).unwrap();
            option_score(&evaluate_options(ada, &perceive(ada, &state)), ActionType::Cooperate, Some(b))
        };
        state
            .characters
            .get_mut(&a)
            .unwrap()
            .memory
            .beliefs
            .insert(b, Belief::Untrustworthy);
        let ada = state.character(a).unwrap();
        let options = evaluate_options(ada, &perceive(ada, &state));
        let after = option_score(&options, ActionType::Cooperate, Some(b));
        assert!((before - after - 0.6).abs() < 1e-9);
        let reasoning = &options.first().unwrap().action.reasoning;
        assert!(reasoning.contains("believes Bram is untrustworthy"), "{reasoning}");
    }

    #[test]
    fn relationship_and_proximity_terms() {
        let (mut state, a, b) = make_state(0.3);
        state.characters.get_mut(&a).unwrap().relationships.insert(b, 0.8);
        let ada = state.character(a).unwrap();
        let options = evaluate_options(ada, &perceive(ada, &state));
        let cooperate = option_score(&options, ActionType::Cooperate, Some(b));
        let expected = base_score(ada, ActionType::Cooperate) + 0.4 + 0.9 * 0.2;
        assert!((cooperate - expected).abs() < 1e-9);
        let attack = option_score(&options, ActionType::Attack, Some(b));
        let expected = base_score(ada, ActionType::Attack) - 0.32 + 0.9 * 0.2;
        assert!((attack - expected).abs() < 1e-9);
    }

    #[test]
    fn low_energy_favors_rest() {
        let (mut state, a, _) = make_state(0.3);
        let ada = state.characters.get_mut(&a).unwrap();
        ada.resources.insert(ENERGY.to_owned(), 10.0);
        let ada = state.character(a).unwrap();
        let options = evaluate_options(ada, &perceive(ada, &state));
        let rest = options
            .iter()
            .find(|o| o.action.action_type == ActionType::Rest)
            .unwrap();
        assert!((rest.score - (base_score(ada, ActionType::Rest) + 0.5)).abs() < 1e-9);
        assert!(rest.action.reasoning.starts_with("Chose to rest based on low energy"));
    }

    #[test]
    fn memory_influence_shifts_only_matching_targets() {
        let target = CharacterId::new();
        let mut options = vec![
            ScoredOption {
                action: Action::new(ActionType::Cooperate, Some(target)),
                score: 1.0,
            },
            ScoredOption {
                action: Action::new(ActionType::Attack, Some(target)),
                score: 1.0,
            },
            ScoredOption {
                action: Action::new(ActionType::Communicate, Some(target)),
                score: 1.0,
            },
            ScoredOption {
                action: Action::new(ActionType::Cooperate, Some(CharacterId::new())),
                score: 1.0,
            },
        ];
        apply_memory_influence(&mut options, &BTreeMap::from([(target, -0.6)]));
        let scores: Vec<f64> = options.iter().map(|o| o.score).collect();
        assert!((scores[0] - 0.4).abs() < 1e-9);
        assert!((scores[1] - 1.6).abs() < 1e-9);
        assert_eq!(scores[2], 1.0);
        assert_eq!(scores[3], 1.0);
    }

    #[test]
    fn selection_stays_within_top_five() {
        let options: Vec<ScoredOption> = (0..9)
            .map(|i| ScoredOption {
                action: Action {
                    detail: format!("option {i}"),
                    ..Action::new(ActionType::Observe, None)
                },
                score: f64::from(i),
            })
            .collect();
        for seed in 0..200 {
            let mut rng = SeedMix::new(seed, "select").rng();
            let chosen = select_action(options.clone(), 1.0, &mut rng);
            let index: u32 = chosen.detail.trim_start_matches("option ").parse().unwrap();
            assert!(index >= 4, "picked option {index}");
        }
    }

    #[test]
    fn empty_options_fall_back_to_observe() {
        let mut rng = SeedMix::new(0, "select").rng();
        let action = select_action(Vec::new(), 0.5, &mut rng);
        assert_eq!(action.action_type, ActionType::Observe);
        assert_eq!(action.detail, "Nothing to do");
        assert_eq!(action.reasoning, "No options available");
    }

    #[test]
    fn decide_is_deterministic() {
        let (state, a, _) = make_state(0.8);
        let ada = state.character(a).unwrap();
        let first = decide(ada, &state);
        for _ in 0..5 {
            assert_eq!(decide(ada, &state), first);
        }
    }

    #[test]
    fn recalled_betrayals_make_hostility_likelier() {
        let (mut state, a, b) = make_state(0.3);
        let ada = state.characters.get_mut(&a).unwrap();
        for tick in 0..3 {
            ada.memory.short_term.push(MemoryEntry {
                tick,
                content: "Bram betrays Ada: Bram betrayed Ada's trust".to_owned(),
                importance: 0.8,
                related: vec![b],
                emotional_context: agora_types::EmotionalState::default(),
            });
        }
        let ada = state.character(a).unwrap();
        let perception = perceive(ada, &state);
        let context = recall_context(&perception);
        assert_eq!(context, "Bram");
        let influence = memory_influence(&recall_relevant(&ada.memory, &context, &state.memory_config));
        assert!((influence.get(&b).copied().unwrap() + 0.9).abs() < 1e-9);
    }

    #[test]
    fn scripted_source_overrides_and_falls_back() {
        let (state, a, b) = make_state(0.3);
        let mut source = ScriptedDecisionSource::new()
            .with(a, Action::new(ActionType::Attack, Some(b)));
        let ada = state.character(a).unwrap();
        let bram = state.character(b).unwrap();
        assert_eq!(source.decide(ada, &state).action_type, ActionType::Attack);
        assert_eq!(source.decide(bram, &state), decide(bram, &state));
        source.clear(a);
        assert_eq!(source.decide(ada, &state), decide(ada, &state));
    }

    #[test]
    fn record_decision_sets_last_action() {
        let mut c = Character::new(CharacterId::new(), "Ada", PersonalityTraits::default());
        let action = fallback_action();
        record_decision(&mut c, &action);
        assert_eq!(c.last_action, Some(action));
        assert_eq!(c.last_reasoning, "No options available");
    }
}
