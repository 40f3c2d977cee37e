//! Shared type definitions for the Agora simulation.
//!
//! This crate is the single source of truth for the records that flow
//! between the brain, the world, and the engine. Types are exported to
//! `TypeScript` via `ts-rs` for any front end that renders a simulation.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for characters, events, simulations
//! - [`enums`] -- Actions, event types and kinds, beliefs, scoring axes
//! - [`structs`] -- Characters, memory, events, environment, configuration
//! - [`outcome`] -- Structured numeric deltas emitted by resolvers
//! - [`perception`] -- Perception payload assembled before each decision

pub mod enums;
pub mod ids;
pub mod outcome;
pub mod perception;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    ActionType, Belief, Emotion, EventKind, EventType, PersonalityTrait, SimulationStatus, Valence,
};
pub use ids::{CharacterId, EventId, SimulationId};
pub use outcome::OutcomeDelta;
pub use perception::{NearbyLocation, Perception, VisibleCharacter};
pub use structs::{
    Action, Character, ENERGY, EmotionalState, Environment, Event, INFLUENCE, Location, Memory,
    MemoryEntry, PersonalityTraits, Position, SimulationConfig, WEALTH,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::CharacterId::export_all();
        let _ = crate::ids::EventId::export_all();
        let _ = crate::ids::SimulationId::export_all();

        // Enums
        let _ = crate::enums::ActionType::export_all();
        let _ = crate::enums::EventType::export_all();
        let _ = crate::enums::EventKind::export_all();
        let _ = crate::enums::Valence::export_all();
        let _ = crate::enums::Belief::export_all();
        let _ = crate::enums::PersonalityTrait::export_all();
        let _ = crate::enums::Emotion::export_all();
        let _ = crate::enums::SimulationStatus::export_all();

        // Structs
        let _ = crate::structs::PersonalityTraits::export_all();
        let _ = crate::structs::EmotionalState::export_all();
        let _ = crate::structs::MemoryEntry::export_all();
        let _ = crate::structs::Memory::export_all();
        let _ = crate::structs::Position::export_all();
        let _ = crate::structs::Location::export_all();
        let _ = crate::structs::Character::export_all();
        let _ = crate::structs::Action::export_all();
        let _ = crate::structs::Event::export_all();
        let _ = crate::structs::Environment::export_all();
        let _ = crate::structs::SimulationConfig::export_all();
        let _ = crate::outcome::OutcomeDelta::export_all();

        // Perception
        let _ = crate::perception::Perception::export_all();
        let _ = crate::perception::VisibleCharacter::export_all();
        let _ = crate::perception::NearbyLocation::export_all();
    }
}
