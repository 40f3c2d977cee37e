//! Relationship arithmetic.
//!
//! Relationship scores range from -1.0 (hostile) to 1.0 (allied) and are
//! clamped on every update. Missing entries read as 0.0.

use agora_types::{Character, CharacterId};

/// Maximum relationship score.
pub const SCORE_MAX: f64 = 1.0;

/// Minimum relationship score.
pub const SCORE_MIN: f64 = -1.0;

/// Clamp a score into `[-1, 1]`.
pub const fn clamp_score(score: f64) -> f64 {
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// Shift `character`'s relationship toward `other` by `delta`.
///
/// Returns the new score.
pub fn adjust_relationship(character: &mut Character, other: CharacterId, delta: f64) -> f64 {
    let entry = character.relationships.entry(other).or_insert(0.0);
    *entry = clamp_score(*entry + delta);
    *entry
}
