//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup so that `main`
//! can propagate them with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: agora_core::ConfigError,
    },

    /// A roster entry could not be turned into a character.
    #[error("spawner error: {source}")]
    Spawner {
        /// The underlying agent error.
        #[from]
        source: agora_agents::AgentError,
    },
}
