//! Error types for the agora-agents crate.
//!
//! Tick-time operations never fail; these errors cover character creation
//! and lookups performed by callers outside a tick.

use agora_types::CharacterId;

/// Errors that can occur during character operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Character with the given ID was not found.
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// Character name already exists in the simulation.
    #[error("duplicate character name: {0}")]
    DuplicateName(String),

    /// Character name was empty or whitespace.
    #[error("character name must not be empty")]
    EmptyName,
}
