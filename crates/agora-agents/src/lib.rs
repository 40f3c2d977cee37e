//! Character state logic for the Agora simulation.
//!
//! Everything here operates on a single character's inner state without
//! touching the rest of the simulation: how personality, emotion, and goals
//! weigh each action, what a character remembers and believes, how its
//! emotions move, and how relationships shift.
//!
//! # Modules
//!
//! - [`agent`] -- Character creation from a [`CharacterSpec`]
//! - [`config`] -- Tunables for memory and emotion ([`MemoryConfig`], [`EmotionConfig`])
//! - [`emotion`] -- Per-tick emotional decay and event reactions
//! - [`error`] -- Error types for character operations ([`AgentError`])
//! - [`memory`] -- Recall, consolidation, belief inference, memory influence
//! - [`social`] -- Bounded relationship arithmetic
//! - [`weights`] -- Personality, emotion, and goal scoring tables

pub mod agent;
pub mod config;
pub mod emotion;
pub mod error;
pub mod memory;
pub mod social;
pub mod weights;

// Re-export primary types at crate root for convenience.
pub use agent::{CharacterManager, CharacterSpec};
pub use config::{EmotionConfig, MemoryConfig};
pub use emotion::update_emotions;
pub use error::AgentError;
pub use memory::{consolidate_memory, infer_beliefs, memory_influence, recall_relevant};
pub use social::{adjust_relationship, clamp_score};
pub use weights::base_score;
