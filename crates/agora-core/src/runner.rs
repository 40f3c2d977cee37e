//! Simulation loop runner.
//!
//! [`run_simulation`] drives [`run_tick`] until the simulation completes,
//! handing each tick's summary to a [`TickCallback`]. The loop stops when
//! the tick limit is reached or when no living character remains.
//!
//! [`run_tick`]: crate::tick::run_tick

use tracing::{info, warn};

use crate::decision::DecisionSource;
use crate::tick::{self, SimulationState, TickSummary};

/// Why a simulation run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// The configured tick limit was reached.
    MaxTicksReached,
    /// No living character was left to act.
    Extinction,
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
///
/// Implementations can use this to print progress, collect metrics, or
/// stream events elsewhere. The callback receives the tick summary and
/// the state after the tick was committed.
pub trait TickCallback: Send {
    /// Called after a tick completes.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// # Arguments
///
/// * `state` - Mutable simulation state
/// * `decision_source` - Source of character decisions
/// * `callback` - Called after each tick
pub fn run_simulation(
    state: &mut SimulationState,
    decision_source: &mut dyn DecisionSource,
    callback: &mut dyn TickCallback,
) -> SimulationResult {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        start_tick = state.tick,
        max_ticks = state.config.max_ticks,
        characters = state.roster.len(),
        seed = state.config.seed,
        "Simulation starting"
    );

    loop {
        if state.living_ids().is_empty() {
            info!(tick = state.tick, "No living characters -- extinction");
            return SimulationResult {
                end_reason: SimulationEndReason::Extinction,
                final_summary: last_summary,
                total_ticks,
            };
        }

        let Some(summary) = tick::run_tick(state, decision_source) else {
            info!(
                tick = state.tick,
                max_ticks = state.config.max_ticks,
                "Tick limit reached"
            );
            return SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: last_summary,
                total_ticks,
            };
        };

        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&summary, state);
        last_summary = Some(summary);
    }
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            characters_alive = summary.characters_alive,
            events = summary.events.len(),
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use agora_types::{Character, CharacterId, PersonalityTraits, SimulationConfig};

    use super::*;
    use crate::decision::UtilityDecisionSource;

    struct CountingCallback {
        ticks: Vec<u64>,
    }

    impl TickCallback for CountingCallback {
        fn on_tick(&mut self, summary: &TickSummary, _state: &SimulationState) {
            self.ticks.push(summary.tick);
        }
    }

    fn make_state(max_ticks: i64, characters: usize) -> SimulationState {
        let mut state = SimulationState::new(SimulationConfig {
            max_ticks,
            seed: 5,
            ..SimulationConfig::default()
        });
        for i in 0..characters {
            state.add_character(Character::new(
                CharacterId::new(),
                format!("C{i}"),
                PersonalityTraits::default(),
            ));
        }
        state
    }

    #[test]
    fn runs_until_tick_limit() {
        let mut state = make_state(5, 3);
        let mut callback = CountingCallback { ticks: Vec::new() };
        let result = run_simulation(&mut state, &mut UtilityDecisionSource, &mut callback);
        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(callback.ticks, vec![0, 1, 2, 3, 4]);
        assert_eq!(result.final_summary.unwrap().tick, 4);
        assert!(state.is_completed());
    }

    #[test]
    fn zero_limit_runs_nothing() {
        let mut state = make_state(0, 2);
        let result = run_simulation(&mut state, &mut UtilityDecisionSource, &mut NoOpCallback);
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
        log_simulation_end(&result);
    }

    #[test]
    fn empty_roster_is_extinction() {
        let mut state = make_state(10, 0);
        let result = run_simulation(&mut state, &mut UtilityDecisionSource, &mut NoOpCallback);
        assert_eq!(result.end_reason, SimulationEndReason::Extinction);
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn seeded_runs_replay_identically() {
        let mut first = make_state(8, 4);
        let mut second = first.clone();
        run_simulation(&mut first, &mut UtilityDecisionSource, &mut NoOpCallback);
        run_simulation(&mut second, &mut UtilityDecisionSource, &mut NoOpCallback);
        assert_eq!(first.events, second.events);
        assert_eq!(first.characters, second.characters);
        assert_eq!(first.environment, second.environment);
    }
}
