//! Tick cycle: the engine step that advances a simulation by one tick.
//!
//! Each tick runs through these phases:
//!
//! 1. **Roster** -- snapshot the living characters in insertion order.
//!
//! 2. **Decision** -- ask the [`DecisionSource`] for one [`Action`] per
//!    living character. Every character decides against the same
//!    start-of-tick state; the choices are recorded afterwards.
//!
//! 3. **Resolution** -- turn solo actions and targeted pairs into events
//!    carrying structured [`OutcomeDelta`]s.
//!
//! 4. **Environment** -- roll resource fluctuation, weather, and discovery,
//!    then drain every pool by the scarcity rate.
//!
//! 5. **Emergence** -- detect coalitions, crises, dominance, trust
//!    collapse, and escalation over the tick's events.
//!
//! 6. **Outcomes** -- apply every delta in event order.
//!
//! 7. **Reflection** -- update each living character's emotions, then
//!    consolidate its memory and rebuild its beliefs.
//!
//! 8. **Commit** -- stamp event ids, append to the log, advance the tick.
//!
//! Once the tick reaches the configured limit the simulation is
//! [`SimulationStatus::Completed`] and further steps do nothing.
//!
//! [`OutcomeDelta`]: agora_types::OutcomeDelta

use std::collections::BTreeMap;

use agora_agents::{EmotionConfig, MemoryConfig, consolidate_memory, update_emotions};
use agora_types::{
    Action, Character, CharacterId, Environment, Event, EventId, SimulationConfig,
    SimulationStatus,
};
use agora_world::{default_environment, detect_emergent_events, generate_environmental_events};
use tracing::{debug, info};

use crate::decision::{self, DecisionSource, UtilityDecisionSource};
use crate::outcome;
use crate::resolution;

/// Summary of a single executed tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Number of living characters during this tick.
    pub characters_alive: u32,
    /// The action each living character chose.
    pub decisions: BTreeMap<CharacterId, Action>,
    /// Every event the tick produced, in log order.
    pub events: Vec<Event>,
    /// Status after the tick was committed.
    pub status: SimulationStatus,
}

/// The mutable simulation state passed through the tick cycle.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// The next tick to execute.
    pub tick: u64,
    /// Every character, living or not.
    pub characters: BTreeMap<CharacterId, Character>,
    /// Character ids in insertion order; drives iteration everywhere.
    pub roster: Vec<CharacterId>,
    /// The shared world.
    pub environment: Environment,
    /// Append-only event log.
    pub events: Vec<Event>,
    /// Tunable knobs, kept normalized.
    pub config: SimulationConfig,
    /// Whether steps still advance the tick.
    pub status: SimulationStatus,
    /// Memory capacities.
    pub memory_config: MemoryConfig,
    /// Emotional decay rates.
    pub emotion_config: EmotionConfig,
}

impl SimulationState {
    /// A fresh simulation in the default environment with no characters.
    pub fn new(config: SimulationConfig) -> Self {
        let mut state = Self {
            tick: 0,
            characters: BTreeMap::new(),
            roster: Vec::new(),
            environment: default_environment(),
            events: Vec::new(),
            config: config.normalized(),
            status: SimulationStatus::Running,
            memory_config: MemoryConfig::default(),
            emotion_config: EmotionConfig::default(),
        };
        state.refresh_status();
        state
    }

    /// Add a character at the end of the roster. Re-adding an existing id
    /// replaces the character in place.
    pub fn add_character(&mut self, character: Character) -> CharacterId {
        let id = character.id;
        if self.characters.insert(id, character).is_none() {
            self.roster.push(id);
        }
        id
    }

    /// Remove a character from the roster.
    pub fn remove_character(&mut self, id: CharacterId) -> Option<Character> {
        let removed = self.characters.remove(&id)?;
        self.roster.retain(|r| *r != id);
        Some(removed)
    }

    /// Look up a character.
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Characters in roster order.
    pub fn roster_characters(&self) -> impl Iterator<Item = &Character> {
        self.roster.iter().filter_map(|id| self.characters.get(id))
    }

    /// Ids of living characters in roster order.
    pub fn living_ids(&self) -> Vec<CharacterId> {
        self.roster_characters()
            .filter(|c| c.alive)
            .map(|c| c.id)
            .collect()
    }

    /// Replace the configuration. Raising the tick limit resumes a
    /// completed simulation.
    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config.normalized();
        self.refresh_status();
    }

    /// Recompute [`SimulationState::status`] from the tick and the limit.
    pub fn refresh_status(&mut self) {
        self.status = if self.tick >= self.config.tick_limit() {
            SimulationStatus::Completed
        } else {
            SimulationStatus::Running
        };
    }

    /// Whether the tick limit has been reached.
    pub fn is_completed(&self) -> bool {
        self.status == SimulationStatus::Completed
    }
}

/// Execute one tick using `source` for decisions.
///
/// Returns `None` without touching the state when the simulation has
/// reached its tick limit.
pub fn run_tick(
    state: &mut SimulationState,
    source: &mut dyn DecisionSource,
) -> Option<TickSummary> {
    state.refresh_status();
    if state.is_completed() {
        debug!(tick = state.tick, "Step ignored, simulation completed");
        return None;
    }

    let tick = state.tick;
    let living = state.living_ids();
    info!(tick, characters = living.len(), "Tick started");

    // Phase 2: Decision
    let decisions: Vec<(CharacterId, Action)> = living
        .iter()
        .filter_map(|id| {
            state
                .characters
                .get(id)
                .map(|c| (*id, source.decide(c, state)))
        })
        .collect();

    // Phase 3: Resolution
    let mut events = resolution::resolve_actions(state, &decisions);
    let interactions = events.len();

    for (id, action) in &decisions {
        if let Some(character) = state.characters.get_mut(id) {
            decision::record_decision(character, action);
        }
    }

    // Phase 4: Environment
    events.extend(generate_environmental_events(
        &mut state.environment,
        &state.config,
        &living,
        tick,
    ));

    // Phase 5: Emergence
    let living_characters: Vec<&Character> = living
        .iter()
        .filter_map(|id| state.characters.get(id))
        .collect();
    let emergent = detect_emergent_events(&living_characters, &mut state.environment, &events, tick);
    let emergent_count = emergent.len();
    events.extend(emergent);

    // Phase 6: Outcomes
    outcome::apply_events(state, &events);

    // Phase 7: Reflection
    for id in &living {
        if let Some(character) = state.characters.get_mut(id) {
            update_emotions(character, &events, &state.emotion_config);
            consolidate_memory(character, &events, tick, &state.memory_config);
        }
    }

    // Phase 8: Commit
    for (event, sequence) in events.iter_mut().zip(0_u64..) {
        event.tick = tick;
        event.id = EventId::derived(tick, sequence);
    }
    state.events.extend(events.iter().cloned());
    state.tick = tick.saturating_add(1);
    state.refresh_status();

    info!(
        tick,
        interactions,
        emergent = emergent_count,
        events = events.len(),
        status = ?state.status,
        "Tick completed"
    );

    Some(TickSummary {
        tick,
        characters_alive: u32::try_from(living.len()).unwrap_or(u32::MAX),
        decisions: decisions.into_iter().collect(),
        events,
        status: state.status,
    })
}

/// Advance one tick with the utility decision engine and return the
/// events it produced. A completed simulation returns no events.
pub fn step(state: &mut SimulationState) -> Vec<Event> {
    run_tick(state, &mut UtilityDecisionSource)
        .map(|summary| summary.events)
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use agora_types::{ActionType, PersonalityTraits};

    use super::*;
    use crate::decision::ScriptedDecisionSource;

    fn make_state(max_ticks: i64, names: &[&str]) -> SimulationState {
        let mut state = SimulationState::new(SimulationConfig {
            max_ticks,
            seed: 42,
            ..SimulationConfig::default()
        });
        for name in names {
            state.add_character(Character::new(
                CharacterId::new(),
                *name,
                PersonalityTraits::default(),
            ));
        }
        state
    }

    #[test]
    fn roster_keeps_insertion_order_and_dedupes() {
        let mut state = make_state(10, &["A", "B"]);
        let first = *state.roster.first().unwrap();
        let again = state.character(first).cloned().unwrap();
        state.add_character(again);
        assert_eq!(state.roster.len(), 2);
        assert!(state.remove_character(first).is_some());
        assert_eq!(state.roster.len(), 1);
        assert!(state.remove_character(first).is_none());
    }

    #[test]
    fn step_advances_tick_and_logs_events() {
        let mut state = make_state(10, &["A", "B", "C"]);
        let events = step(&mut state);
        assert_eq!(state.tick, 1);
        assert!(!events.is_empty());
        assert_eq!(state.events.len(), events.len());
        assert!(events.iter().all(|e| e.tick == 0));
        for c in state.characters.values() {
            assert!(c.last_action.is_some());
            assert!(!c.last_reasoning.is_empty());
        }
    }

    #[test]
    fn event_ids_are_unique_and_sequential() {
        let mut state = make_state(10, &["A", "B", "C"]);
        step(&mut state);
        step(&mut state);
        let mut ids: Vec<EventId> = state.events.iter().map(|e| e.id).collect();
        let total = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert!(state.events.windows(2).all(|w| match w {
            [a, b] => a.id < b.id,
            _ => true,
        }));
    }

    #[test]
    fn completed_simulation_is_a_no_op() {
        let mut state = make_state(1, &["A"]);
        assert_eq!(state.status, SimulationStatus::Running);
        step(&mut state);
        assert!(state.is_completed());
        let before = state.events.len();
        assert!(step(&mut state).is_empty());
        assert_eq!(state.tick, 1);
        assert_eq!(state.events.len(), before);
    }

    #[test]
    fn non_positive_limit_never_advances() {
        let mut state = make_state(0, &["A"]);
        assert!(state.is_completed());
        assert!(step(&mut state).is_empty());
        let mut negative = make_state(-5, &["A"]);
        assert!(step(&mut negative).is_empty());
        assert_eq!(negative.tick, 0);
    }

    #[test]
    fn raising_limit_resumes() {
        let mut state = make_state(1, &["A"]);
        step(&mut state);
        assert!(state.is_completed());
        state.set_config(SimulationConfig {
            max_ticks: 3,
            ..state.config
        });
        assert_eq!(state.status, SimulationStatus::Running);
        assert!(!step(&mut state).is_empty());
    }

    #[test]
    fn dead_characters_do_not_act() {
        let mut state = make_state(10, &["A", "B"]);
        let dead = *state.roster.first().unwrap();
        state.characters.get_mut(&dead).unwrap().alive = false;
        let summary = run_tick(&mut state, &mut UtilityDecisionSource).unwrap();
        assert_eq!(summary.characters_alive, 1);
        assert!(!summary.decisions.contains_key(&dead));
        assert!(state.character(dead).unwrap().last_action.is_none());
    }

    #[test]
    fn summary_reports_scripted_decisions() {
        let mut state = make_state(10, &["A"]);
        let id = *state.roster.first().unwrap();
        let mut source =
            ScriptedDecisionSource::new().with(id, Action::new(ActionType::Rest, None));
        let summary = run_tick(&mut state, &mut source).unwrap();
        assert_eq!(
            summary.decisions.get(&id).map(|a| a.action_type),
            Some(ActionType::Rest)
        );
        assert_eq!(summary.status, SimulationStatus::Running);
    }

    #[test]
    fn emotions_and_relationships_stay_bounded() {
        let mut state = make_state(60, &["A", "B", "C", "D", "E"]);
        for c in state.characters.values_mut() {
            c.position = agora_types::Position::new(0.0, 0.0);
        }
        state.config.randomness = 1.0;
        while !step(&mut state).is_empty() {}
        assert_eq!(state.tick, 60);
        for c in state.characters.values() {
            assert!(c.emotional_state.is_bounded());
            assert!(c.relationships.values().all(|r| (-1.0..=1.0).contains(r)));
            assert!(c.memory.short_term.len() <= 20);
            assert!(c.resources.values().all(|v| *v >= 0.0));
        }
        assert!(state.environment.resources.values().all(|v| *v >= 0.0));
    }
}
