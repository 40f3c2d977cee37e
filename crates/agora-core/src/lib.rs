//! Tick cycle and orchestration for the Agora simulation.
//!
//! This crate owns the step that drives the simulation: Perception,
//! Decision, Resolution, Environment, Emergence, Outcomes, and Reflection.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `agora-config.yaml` into
//!   strongly-typed structs.
//! - [`decision`] -- [`DecisionSource`] trait, the utility-based
//!   [`UtilityDecisionSource`], and a scripted source for tests.
//! - [`outcome`] -- Applying event deltas to characters and the world.
//! - [`perception`] -- Per-character perception assembly from world state.
//! - [`registry`] -- Many independent simulations keyed by id.
//! - [`resolution`] -- Turning actions and action pairs into events.
//! - [`runner`] -- The run-to-completion loop.
//! - [`tick`] -- The tick cycle engine step.
//!
//! [`DecisionSource`]: decision::DecisionSource
//! [`UtilityDecisionSource`]: decision::UtilityDecisionSource

pub mod config;
pub mod decision;
pub mod outcome;
pub mod perception;
pub mod registry;
pub mod resolution;
pub mod runner;
pub mod tick;

pub use config::{AgoraConfig, ConfigError, LogFormat, LoggingConfig};
pub use decision::{DecisionSource, ScriptedDecisionSource, UtilityDecisionSource, decide};
pub use registry::{RegistryError, SimulationRegistry};
pub use runner::{NoOpCallback, SimulationEndReason, SimulationResult, TickCallback, run_simulation};
pub use tick::{SimulationState, TickSummary, run_tick, step};
