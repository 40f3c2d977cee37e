//! Engine binary for the Agora simulation.
//!
//! Wires together configuration, logging, the character roster, and the
//! tick cycle, then runs a single simulation to completion.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `agora-config.yaml` (or `$AGORA_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Assemble the simulation state from the config
//! 4. Spawn the configured roster, or a seeded default roster
//! 5. Run the simulation on a blocking thread until it completes
//! 6. Log the result

mod error;
mod log_callback;
mod spawner;

use std::path::PathBuf;

use agora_core::config::LoggingConfig;
use agora_core::{AgoraConfig, LogFormat, SimulationState, UtilityDecisionSource, runner};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::log_callback::LoggingCallback;
use crate::spawner::DEFAULT_ROSTER_SIZE;

/// Environment variable that overrides the config file path.
const CONFIG_PATH_VAR: &str = "AGORA_CONFIG";

/// Config file looked up in the working directory by default.
const DEFAULT_CONFIG_PATH: &str = "agora-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if the config file is unreadable or invalid, if a
/// roster entry is rejected, or if the simulation thread panics.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let (config, config_path, found) =
        load_config().context("failed to load configuration")?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("agora-engine starting");
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    // 3. Assemble simulation state.
    let mut state = SimulationState::new(config.simulation);
    state.memory_config = config.memory;
    state.emotion_config = config.emotion;
    info!(
        randomness = state.config.randomness,
        information_symmetry = state.config.information_symmetry,
        resource_scarcity = state.config.resource_scarcity,
        max_ticks = state.config.max_ticks,
        seed = state.config.seed,
        "Simulation state assembled"
    );

    // 4. Spawn the roster.
    let specs = if config.characters.is_empty() {
        info!(count = DEFAULT_ROSTER_SIZE, "No characters configured, spawning default roster");
        spawner::default_roster(DEFAULT_ROSTER_SIZE, state.config.seed)
    } else {
        config.characters
    };
    spawner::spawn_roster(&mut state, &specs).context("failed to spawn roster")?;
    info!(characters = state.roster.len(), "Roster spawned");

    // 5. Run the simulation.
    let (state, result) = tokio::task::spawn_blocking(move || {
        let mut callback = LoggingCallback::new();
        let result = runner::run_simulation(&mut state, &mut UtilityDecisionSource, &mut callback);
        info!(totals = ?callback.totals(), "Event totals");
        (state, result)
    })
    .await
    .context("simulation thread failed")?;

    // 6. Log results.
    runner::log_simulation_end(&result);
    for character in state.roster_characters() {
        info!(
            name = %character.name,
            resources = ?character.resources,
            beliefs = character.memory.beliefs.len(),
            long_term_memories = character.memory.long_term.len(),
            "Final character state"
        );
    }

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        events = state.events.len(),
        "agora-engine shutdown complete"
    );

    Ok(())
}

/// Resolve the config path and load it, falling back to defaults when the
/// file does not exist. Returns the config, the path looked at, and whether
/// the file was found.
fn load_config() -> Result<(AgoraConfig, PathBuf, bool), EngineError> {
    let path = std::env::var_os(CONFIG_PATH_VAR)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = AgoraConfig::from_file(&path)?;
        Ok((config, path, true))
    } else {
        Ok((AgoraConfig::default(), path, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
