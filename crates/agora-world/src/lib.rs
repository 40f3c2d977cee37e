//! The shared world of the Agora simulation.
//!
//! This crate owns everything that happens to characters rather than by
//! them: the environment's resource pools and conditions, their random
//! drift each tick, and the detectors that turn a tick's events into
//! system-level emergent events.
//!
//! # Modules
//!
//! - [`seed`] -- Deterministic seed mixing, the simulation RNG, and
//!   Gaussian sampling.
//! - [`environment`] -- The starting environment and per-tick
//!   environmental events (fluctuation, weather, discovery, drain).
//! - [`emergent`] -- Coalition, crisis, dominance, trust-collapse, and
//!   escalation detection.

pub mod emergent;
pub mod environment;
pub mod seed;

// Re-export primary items at crate root.
pub use emergent::detect_emergent_events;
pub use environment::{default_environment, generate_environmental_events};
pub use seed::{SeedMix, SimRng, gaussian, uniform};
