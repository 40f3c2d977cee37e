//! Character memory: recall, consolidation, and belief inference.
//!
//! - **Recall** scores every memory against a free-text context by keyword
//!   overlap and importance, and returns the best matches.
//! - **Consolidation** records one memory per event the character took
//!   part in, and when short-term memory overflows promotes the most
//!   important entries to long-term and drops the rest of the overflow.
//! - **Belief inference** rebuilds belief labels from scratch by counting
//!   betrayal and cooperation keywords in every memory about each other
//!   character.
//! - **Memory influence** turns recalled memories into a per-character
//!   score adjustment for the decision engine.

use std::collections::{BTreeMap, BTreeSet};

use agora_types::{Belief, Character, CharacterId, Event, Memory, MemoryEntry};

use crate::config::MemoryConfig;

// ---------------------------------------------------------------------------
// Keyword lists
// ---------------------------------------------------------------------------

/// Substrings that mark a memory as evidence of betrayal for belief inference.
const BETRAYAL_KEYWORDS: &[&str] = &["betray", "attack", "stole", "lied", "backstab"];

/// Substrings that mark a memory as evidence of cooperation for belief inference.
const COOPERATION_KEYWORDS: &[&str] = &["cooperat", "shared", "helped", "ally", "alliance"];

/// Substrings that make a recalled memory count against its subjects.
const HOSTILE_RECALL_KEYWORDS: &[&str] = &["betray", "attack", "stole", "lied"];

/// Substrings that make a recalled memory count in favor of its subjects.
const FRIENDLY_RECALL_KEYWORDS: &[&str] = &["helped", "cooperat", "shared", "ally"];

/// Score added per overlapping recall keyword.
const OVERLAP_WEIGHT: f64 = 0.3;

/// Score added per unit of importance during recall.
const IMPORTANCE_WEIGHT: f64 = 0.7;

/// Influence of a hostile recalled memory on each related character.
const HOSTILE_INFLUENCE: f64 = -0.3;

/// Influence of a friendly recalled memory on each related character.
const FRIENDLY_INFLUENCE: f64 = 0.2;

/// Check if `text` (already lowercased) contains any keyword.
fn matches_any_keyword(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

fn keyword_set(text: &str) -> BTreeSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

// ---------------------------------------------------------------------------
// Recall
// ---------------------------------------------------------------------------

/// Memories relevant to `context`, best first.
///
/// Each entry (short-term first, then long-term) scores
/// `0.3 * overlap + 0.7 * importance`, where `overlap` is the number of
/// distinct lowercase words shared with the context. Entries with no
/// overlap are dropped. Ties keep insertion order.
#[allow(clippy::cast_precision_loss)]
pub fn recall_relevant<'a>(
    memory: &'a Memory,
    context: &str,
    config: &MemoryConfig,
) -> Vec<&'a MemoryEntry> {
    let context_words = keyword_set(context);
    if context_words.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(&MemoryEntry, f64)> = memory
        .all_entries()
        .filter_map(|entry| {
            let overlap = keyword_set(&entry.content)
                .intersection(&context_words)
                .count();
            (overlap > 0).then(|| {
                let score =
                    OVERLAP_WEIGHT.mul_add(overlap as f64, IMPORTANCE_WEIGHT * entry.importance);
                (entry, score)
            })
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
        .into_iter()
        .take(config.recall_limit)
        .map(|(entry, _)| entry)
        .collect()
}

/// Per-character score adjustment implied by recalled memories.
///
/// Every character related to a recalled memory gets an entry. A memory
/// mentioning betrayal, attack, theft, or lies subtracts 0.3; otherwise a
/// memory mentioning help, cooperation, sharing, or alliance adds 0.2.
pub fn memory_influence(recalled: &[&MemoryEntry]) -> BTreeMap<CharacterId, f64> {
    let mut influence: BTreeMap<CharacterId, f64> = BTreeMap::new();
    for entry in recalled {
        let content = entry.content.to_lowercase();
        let delta = if matches_any_keyword(&content, HOSTILE_RECALL_KEYWORDS) {
            HOSTILE_INFLUENCE
        } else if matches_any_keyword(&content, FRIENDLY_RECALL_KEYWORDS) {
            FRIENDLY_INFLUENCE
        } else {
            0.0
        };
        for related in &entry.related {
            *influence.entry(*related).or_insert(0.0) += delta;
        }
    }
    influence
}

// ---------------------------------------------------------------------------
// Consolidation
// ---------------------------------------------------------------------------

/// Record the events `character` took part in, trim short-term memory, and
/// rebuild beliefs.
///
/// Returns the number of entries promoted to long-term memory.
pub fn consolidate_memory(
    character: &mut Character,
    events: &[Event],
    tick: u64,
    config: &MemoryConfig,
) -> usize {
    let id = character.id;
    let snapshot = character.emotional_state;
    for event in events.iter().filter(|e| e.involves(id)) {
        character.memory.short_term.push(MemoryEntry {
            tick,
            content: format!("{}: {}", event.title, event.description),
            importance: event.importance,
            related: event
                .participants
                .iter()
                .copied()
                .filter(|p| *p != id)
                .collect(),
            emotional_context: snapshot,
        });
    }

    let promoted = trim_short_term(&mut character.memory, config);
    if promoted > 0 {
        tracing::debug!(
            character = %id,
            tick,
            promoted,
            short_term = character.memory.short_term.len(),
            long_term = character.memory.long_term.len(),
            "Short-term memory consolidated"
        );
    }

    character.memory.beliefs = infer_beliefs(&character.memory);
    promoted
}

/// If short-term memory exceeds capacity, sort it by importance (stable),
/// promote the first `promote_count` entries, and keep the next
/// `capacity - promote_count`.
fn trim_short_term(memory: &mut Memory, config: &MemoryConfig) -> usize {
    if memory.short_term.len() <= config.short_term_capacity {
        return 0;
    }
    let mut entries = std::mem::take(&mut memory.short_term);
    entries.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    let promote = config.promote_count.min(entries.len());
    let keep = config.short_term_capacity.saturating_sub(promote);
    let mut rest = entries.split_off(promote);
    rest.truncate(keep);
    memory.long_term.extend(entries);
    memory.short_term = rest;
    promote
}

// ---------------------------------------------------------------------------
// Beliefs
// ---------------------------------------------------------------------------

/// Belief labels derived from every memory.
///
/// | Evidence | Belief |
/// |----------|--------|
/// | ≥ 3 betrayals | untrustworthy |
/// | ≥ 2 betrayals, fewer cooperations | suspicious |
/// | ≥ 3 cooperations, no betrayals | ally |
/// | ≥ 2 cooperations, no betrayals | friendly |
pub fn infer_beliefs(memory: &Memory) -> BTreeMap<CharacterId, Belief> {
    let mut betrayals: BTreeMap<CharacterId, usize> = BTreeMap::new();
    let mut cooperations: BTreeMap<CharacterId, usize> = BTreeMap::new();

    for entry in memory.all_entries() {
        let content = entry.content.to_lowercase();
        let betrayed = matches_any_keyword(&content, BETRAYAL_KEYWORDS);
        let cooperated = matches_any_keyword(&content, COOPERATION_KEYWORDS);
        for related in &entry.related {
            if betrayed {
                let count = betrayals.entry(*related).or_insert(0);
                *count = count.saturating_add(1);
            }
            if cooperated {
                let count = cooperations.entry(*related).or_insert(0);
                *count = count.saturating_add(1);
            }
        }
    }

    let subjects: BTreeSet<CharacterId> = betrayals
        .keys()
        .chain(cooperations.keys())
        .copied()
        .collect();

    subjects
        .into_iter()
        .filter_map(|id| {
            let b = betrayals.get(&id).copied().unwrap_or(0);
            let c = cooperations.get(&id).copied().unwrap_or(0);
            let belief = if b >= 3 {
                Some(Belief::Untrustworthy)
            } else if b >= 2 && c < b {
                Some(Belief::Suspicious)
            } else if c >= 3 && b == 0 {
                Some(Belief::Ally)
            } else if c >= 2 && b == 0 {
                Some(Belief::Friendly)
            } else {
                None
            };
            belief.map(|label| (id, label))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use agora_types::{EmotionalState, EventKind, PersonalityTraits};

    use super::*;

    fn make_memory(content: &str, importance: f64, related: &[CharacterId]) -> MemoryEntry {
        MemoryEntry {
            tick: 0,
            content: content.to_owned(),
            importance,
            related: related.to_vec(),
            emotional_context: EmotionalState::default(),
        }
    }

    fn make_character() -> Character {
        Character::new(CharacterId::new(), "Ada", PersonalityTraits::default())
    }

    #[test]
    fn recall_requires_overlap_and_ranks_by_score() {
        let mut memory = Memory::default();
        memory.short_term.push(make_memory("Bram shared bread", 0.1, &[]));
        memory.short_term.push(make_memory("Bram attacked Cora", 0.9, &[]));
        memory.long_term.push(make_memory("quiet evening", 1.0, &[]));

        let recalled = recall_relevant(&memory, "bram", &MemoryConfig::default());
        assert_eq!(recalled.len(), 2);
        assert_eq!(recalled[0].content, "Bram attacked Cora");
    }

    #[test]
    fn recall_counts_distinct_words_once() {
        let mut memory = Memory::default();
        memory.short_term.push(make_memory("ash ash ash", 0.0, &[]));
        memory.short_term.push(make_memory("ash birch", 0.0, &[]));
        let recalled = recall_relevant(&memory, "ash birch ash", &MemoryConfig::default());
        assert_eq!(recalled[0].content, "ash birch");
    }

    #[test]
    fn recall_caps_results() {
        let mut memory = Memory::default();
        for _ in 0..15 {
            memory.short_term.push(make_memory("market", 0.5, &[]));
        }
        assert_eq!(
            recall_relevant(&memory, "market", &MemoryConfig::default()).len(),
            10
        );
    }

    #[test]
    fn influence_prefers_hostile_reading() {
        let other = CharacterId::new();
        let hostile = make_memory("Bram helped then betrayed me", 0.5, &[other]);
        let friendly = make_memory("Bram helped me", 0.5, &[other]);
        let influence = memory_influence(&[&hostile, &friendly]);
        assert!((influence[&other] - (-0.1)).abs() < 1e-9);
    }

    #[test]
    fn consolidation_records_only_participated_events() {
        let mut c = make_character();
        let other = CharacterId::new();
        let mine = Event::new(2, EventKind::Communication, "Talk", "they talked")
            .with_participants(vec![c.id, other])
            .with_importance(0.25);
        let theirs = Event::new(2, EventKind::Rest, "Rest", "").with_participants(vec![other]);

        consolidate_memory(&mut c, &[mine, theirs], 2, &MemoryConfig::default());
        assert_eq!(c.memory.short_term.len(), 1);
        let entry = &c.memory.short_term[0];
        assert_eq!(entry.content, "Talk: they talked");
        assert_eq!(entry.related, vec![other]);
        assert_eq!(entry.tick, 2);
    }

    #[test]
    fn overflow_promotes_top_five_and_keeps_fifteen() {
        let mut c = make_character();
        let events: Vec<Event> = (0..21)
            .map(|i| {
                Event::new(0, EventKind::Observation, format!("e{i}"), "")
                    .with_participants(vec![c.id])
                    .with_importance(f64::from(i) / 20.0)
            })
            .collect();

        let promoted = consolidate_memory(&mut c, &events, 0, &MemoryConfig::default());
        assert_eq!(promoted, 5);
        assert_eq!(c.memory.long_term.len(), 5);
        assert_eq!(c.memory.short_term.len(), 15);
        assert!(c.memory.long_term[0].content.starts_with("e20"));
        assert!(c.memory.short_term.len() <= 20);
    }

    #[test]
    fn belief_thresholds() {
        let villain = CharacterId::new();
        let schemer = CharacterId::new();
        let friend = CharacterId::new();
        let pal = CharacterId::new();
        let mut memory = Memory::default();
        for _ in 0..3 {
            memory.short_term.push(make_memory("x betrays me", 0.5, &[villain]));
            memory.short_term.push(make_memory("x and me cooperate", 0.5, &[friend]));
        }
        for _ in 0..2 {
            memory.short_term.push(make_memory("x stole my bread", 0.5, &[schemer]));
            memory.short_term.push(make_memory("x shared a meal", 0.5, &[pal]));
        }
        memory.short_term.push(make_memory("x helped me", 0.5, &[schemer]));

        let beliefs = infer_beliefs(&memory);
        assert_eq!(beliefs.get(&villain), Some(&Belief::Untrustworthy));
        assert_eq!(beliefs.get(&schemer), Some(&Belief::Suspicious));
        assert_eq!(beliefs.get(&friend), Some(&Belief::Ally));
        assert_eq!(beliefs.get(&pal), Some(&Belief::Friendly));
    }

    #[test]
    fn two_betrayals_alone_are_not_untrustworthy() {
        let villain = CharacterId::new();
        let mut memory = Memory::default();
        for _ in 0..2 {
            memory.short_term.push(make_memory("x attacked me", 0.5, &[villain]));
        }
        assert_eq!(infer_beliefs(&memory).get(&villain), Some(&Belief::Suspicious));
    }

    #[test]
    fn beliefs_are_rebuilt_not_merged() {
        let mut c = make_character();
        let stale = CharacterId::new();
        c.memory.beliefs.insert(stale, Belief::Ally);
        consolidate_memory(&mut c, &[], 0, &MemoryConfig::default());
        assert!(c.memory.beliefs.is_empty());
    }
}
