//! Tunables for the memory and emotion systems.
//!
//! The defaults reproduce the reference behavior; callers (the tick loop,
//! tests, a config file) may override them. Missing fields in a config
//! file fall back to the defaults.

use serde::Deserialize;

/// Memory capacity and recall limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Short-term entries kept after consolidation (default: 20).
    pub short_term_capacity: usize,

    /// Entries promoted to long-term when short-term overflows (default: 5).
    pub promote_count: usize,

    /// Maximum entries returned by recall (default: 10).
    pub recall_limit: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            short_term_capacity: 20,
            promote_count: 5,
            recall_limit: 10,
        }
    }
}

/// Emotional decay rates applied at the start of every update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmotionConfig {
    /// Fraction of every emotion lost per tick (default: 0.05).
    pub decay_rate: f64,

    /// Fraction of surprise lost per tick (default: 0.15).
    pub surprise_decay_rate: f64,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.05,
            surprise_decay_rate: 0.15,
        }
    }
}
