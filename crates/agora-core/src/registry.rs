//! Multi-instance registry of simulations.
//!
//! Each simulation lives behind its own [`tokio::sync::Mutex`], so steps on
//! one instance are serialized while independent instances advance
//! concurrently. The map itself sits behind a [`RwLock`] that is only held
//! long enough to find or insert an instance handle.

use std::collections::BTreeMap;
use std::sync::Arc;

use agora_agents::{AgentError, CharacterManager, CharacterSpec};
use agora_types::{Character, CharacterId, Event, SimulationConfig, SimulationId};
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::config::AgoraConfig;
use crate::tick::{self, SimulationState};

/// Errors returned by [`SimulationRegistry`] operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No simulation is registered under the given id.
    #[error("simulation not found: {0}")]
    SimulationNotFound(SimulationId),

    /// The simulation has no character with the given id.
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// Character creation was rejected.
    #[error("character operation failed: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}

/// A registered simulation: its state plus the name bookkeeping for new
/// characters.
#[derive(Debug)]
struct Instance {
    state: SimulationState,
    manager: CharacterManager,
    created_at: DateTime<Utc>,
}

/// Lightweight description of a registered simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationInfo {
    /// Registry key.
    pub id: SimulationId,
    /// When the simulation was registered.
    pub created_at: DateTime<Utc>,
    /// The next tick to execute.
    pub tick: u64,
    /// Number of characters on the roster.
    pub characters: usize,
    /// Whether the tick limit has been reached.
    pub completed: bool,
}

/// Holds any number of independent simulations keyed by [`SimulationId`].
#[derive(Debug, Default)]
pub struct SimulationRegistry {
    instances: RwLock<BTreeMap<SimulationId, Arc<Mutex<Instance>>>>,
}

impl SimulationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh simulation with no characters.
    pub async fn create(&self, config: SimulationConfig) -> SimulationId {
        let instance = Instance {
            state: SimulationState::new(config),
            manager: CharacterManager::new(),
            created_at: Utc::now(),
        };
        self.insert(instance).await
    }

    /// Register a simulation built from a full [`AgoraConfig`], including
    /// its starting roster.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Agent`] if a roster entry is invalid. Nothing
    /// is registered in that case.
    pub async fn create_from(&self, config: &AgoraConfig) -> Result<SimulationId, RegistryError> {
        let mut state = SimulationState::new(config.simulation);
        state.memory_config = config.memory.clone();
        state.emotion_config = config.emotion.clone();

        let mut manager = CharacterManager::new();
        for spec in &config.characters {
            let character = manager.create(spec.clone(), state.config.seed)?;
            state.add_character(character);
        }

        let instance = Instance {
            state,
            manager,
            created_at: Utc::now(),
        };
        Ok(self.insert(instance).await)
    }

    /// A copy of the simulation's current state.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SimulationNotFound`] for an unknown id.
    pub async fn snapshot(&self, id: SimulationId) -> Result<SimulationState, RegistryError> {
        let handle = self.handle(id).await?;
        let instance = handle.lock().await;
        Ok(instance.state.clone())
    }

    /// Logged events from `since_tick` onward, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SimulationNotFound`] for an unknown id.
    pub async fn events_since(
        &self,
        id: SimulationId,
        since_tick: u64,
    ) -> Result<Vec<Event>, RegistryError> {
        let handle = self.handle(id).await?;
        let instance = handle.lock().await;
        Ok(instance
            .state
            .events
            .iter()
            .filter(|e| e.tick >= since_tick)
            .cloned()
            .collect())
    }

    /// A copy of one character, including its memory and last reasoning.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SimulationNotFound`] or
    /// [`RegistryError::CharacterNotFound`].
    pub async fn character(
        &self,
        id: SimulationId,
        character: CharacterId,
    ) -> Result<Character, RegistryError> {
        let handle = self.handle(id).await?;
        let instance = handle.lock().await;
        instance
            .state
            .character(character)
            .cloned()
            .ok_or(RegistryError::CharacterNotFound(character))
    }

    /// Create a character from `spec` and add it to the roster.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SimulationNotFound`] for an unknown id, or
    /// [`RegistryError::Agent`] if the spec is rejected.
    pub async fn add_character(
        &self,
        id: SimulationId,
        spec: CharacterSpec,
    ) -> Result<CharacterId, RegistryError> {
        let handle = self.handle(id).await?;
        let mut instance = handle.lock().await;
        let seed = instance.state.config.seed;
        let character = instance.manager.create(spec, seed)?;
        let character_id = instance.state.add_character(character);
        info!(simulation = %id, character = %character_id, "Character added");
        Ok(character_id)
    }

    /// Remove a character, freeing its name for reuse.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SimulationNotFound`] or
    /// [`RegistryError::CharacterNotFound`].
    pub async fn remove_character(
        &self,
        id: SimulationId,
        character: CharacterId,
    ) -> Result<Character, RegistryError> {
        let handle = self.handle(id).await?;
        let mut instance = handle.lock().await;
        let removed = instance
            .state
            .remove_character(character)
            .ok_or(RegistryError::CharacterNotFound(character))?;
        instance.manager.release(&removed.name);
        info!(simulation = %id, character = %character, "Character removed");
        Ok(removed)
    }

    /// Replace the simulation's configuration. Raising the tick limit
    /// resumes a completed simulation.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SimulationNotFound`] for an unknown id.
    pub async fn update_config(
        &self,
        id: SimulationId,
        config: SimulationConfig,
    ) -> Result<(), RegistryError> {
        let handle = self.handle(id).await?;
        let mut instance = handle.lock().await;
        instance.state.set_config(config);
        info!(
            simulation = %id,
            max_ticks = instance.state.config.max_ticks,
            status = ?instance.state.status,
            "Configuration updated"
        );
        Ok(())
    }

    /// Advance the simulation by one tick with utility-based decisions.
    /// Returns the events the tick produced, empty once completed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SimulationNotFound`] for an unknown id.
    pub async fn step(&self, id: SimulationId) -> Result<Vec<Event>, RegistryError> {
        let handle = self.handle(id).await?;
        let mut instance = handle.lock().await;
        Ok(tick::step(&mut instance.state))
    }

    /// Drop a simulation.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SimulationNotFound`] for an unknown id.
    pub async fn delete(&self, id: SimulationId) -> Result<(), RegistryError> {
        let removed = self.instances.write().await.remove(&id);
        if removed.is_none() {
            warn!(simulation = %id, "Delete requested for unknown simulation");
            return Err(RegistryError::SimulationNotFound(id));
        }
        info!(simulation = %id, "Simulation deleted");
        Ok(())
    }

    /// Describe every registered simulation, ordered by id.
    pub async fn list(&self) -> Vec<SimulationInfo> {
        let handles: Vec<_> = self
            .instances
            .read()
            .await
            .iter()
            .map(|(id, handle)| (*id, Arc::clone(handle)))
            .collect();

        let mut infos = Vec::with_capacity(handles.len());
        for (id, handle) in handles {
            let instance = handle.lock().await;
            infos.push(SimulationInfo {
                id,
                created_at: instance.created_at,
                tick: instance.state.tick,
                characters: instance.state.roster.len(),
                completed: instance.state.is_completed(),
            });
        }
        infos
    }

    async fn insert(&self, instance: Instance) -> SimulationId {
        let id = SimulationId::new();
        info!(
            simulation = %id,
            characters = instance.state.roster.len(),
            seed = instance.state.config.seed,
            "Simulation created"
        );
        self.instances
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(instance)));
        id
    }

    async fn handle(&self, id: SimulationId) -> Result<Arc<Mutex<Instance>>, RegistryError> {
        self.instances
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RegistryError::SimulationNotFound(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use agora_types::PersonalityTraits;

    use super::*;

    fn make_config(max_ticks: i64) -> SimulationConfig {
        SimulationConfig {
            max_ticks,
            seed: 11,
            ..SimulationConfig::default()
        }
    }

    fn spec(name: &str) -> CharacterSpec {
        CharacterSpec::new(name, PersonalityTraits::default())
    }

    #[tokio::test]
    async fn create_add_and_step() {
        let registry = SimulationRegistry::new();
        let id = registry.create(make_config(10)).await;
        let ada = registry.add_character(id, spec("Ada")).await.unwrap();
        registry.add_character(id, spec("Bram")).await.unwrap();

        let events = registry.step(id).await.unwrap();
        assert!(!events.is_empty());

        let state = registry.snapshot(id).await.unwrap();
        assert_eq!(state.tick, 1);
        assert!(state.character(ada).is_some());
        assert_eq!(state.events.len(), events.len());
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected_until_released() {
        let registry = SimulationRegistry::new();
        let id = registry.create(make_config(10)).await;
        let ada = registry.add_character(id, spec("Ada")).await.unwrap();

        let err = registry.add_character(id, spec("Ada")).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Agent {
                source: AgentError::DuplicateName(_)
            }
        ));

        let removed = registry.remove_character(id, ada).await.unwrap();
        assert_eq!(removed.name, "Ada");
        registry.add_character(id, spec("Ada")).await.unwrap();
    }

    #[tokio::test]
    async fn unknown_ids_are_errors() {
        let registry = SimulationRegistry::new();
        let missing = SimulationId::new();
        assert!(matches!(
            registry.step(missing).await,
            Err(RegistryError::SimulationNotFound(_))
        ));
        assert!(matches!(
            registry.delete(missing).await,
            Err(RegistryError::SimulationNotFound(_))
        ));

        let id = registry.create(make_config(10)).await;
        assert!(matches!(
            registry.remove_character(id, CharacterId::new()).await,
            Err(RegistryError::CharacterNotFound(_))
        ));
    }

    #[tokio::test]
    async fn raising_the_limit_resumes() {
        let registry = SimulationRegistry::new();
        let id = registry.create(make_config(1)).await;
        registry.add_character(id, spec("Ada")).await.unwrap();

        assert!(!registry.step(id).await.unwrap().is_empty());
        assert!(registry.step(id).await.unwrap().is_empty());

        registry.update_config(id, make_config(3)).await.unwrap();
        assert!(!registry.step(id).await.unwrap().is_empty());
        assert_eq!(registry.snapshot(id).await.unwrap().tick, 2);
    }

    #[tokio::test]
    async fn instances_are_independent() {
        let registry = Arc::new(SimulationRegistry::new());
        let first = registry.create(make_config(5)).await;
        let second = registry.create(make_config(5)).await;
        registry.add_character(first, spec("Ada")).await.unwrap();
        registry.add_character(second, spec("Ada")).await.unwrap();

        let a = tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { registry.step(first).await.map(|e| e.len()) }
        });
        let b = tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { registry.step(second).await.map(|e| e.len()) }
        });
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let infos = registry.list().await;
        assert_eq!(infos.len(), 2);
        assert!(infos.iter().all(|i| i.tick == 1 && i.characters == 1));

        registry.delete(first).await.unwrap();
        assert_eq!(registry.list().await.len(), 1);
    }

    #[tokio::test]
    async fn create_from_spawns_roster() {
        let config = AgoraConfig::parse(
            "simulation: { max_ticks: 4, seed: 3 }\ncharacters:\n  - name: Ada\n  - name: Bram\n",
        )
        .unwrap();
        let registry = SimulationRegistry::new();
        let id = registry.create_from(&config).await.unwrap();
        let state = registry.snapshot(id).await.unwrap();
        assert_eq!(state.roster.len(), 2);

        let bad = AgoraConfig::parse("characters:\n  - name: Ada\n  - name: Ada\n").unwrap();
        assert!(registry.create_from(&bad).await.is_err());
        assert_eq!(registry.list().await.len(), 1);
    }

    #[tokio::test]
    async fn events_since_filters_by_tick() {
        let registry = SimulationRegistry::new();
        let id = registry.create(make_config(10)).await;
        let ada = registry.add_character(id, spec("Ada")).await.unwrap();
        registry.add_character(id, spec("Bram")).await.unwrap();
        for _ in 0..3 {
            registry.step(id).await.unwrap();
        }

        let all = registry.events_since(id, 0).await.unwrap();
        assert_eq!(all.len(), registry.snapshot(id).await.unwrap().events.len());

        let recent = registry.events_since(id, 2).await.unwrap();
        assert!(!recent.is_empty());
        assert!(recent.iter().all(|e| e.tick >= 2));
        assert!(recent.len() < all.len());
        assert!(registry.events_since(id, 3).await.unwrap().is_empty());

        let character = registry.character(id, ada).await.unwrap();
        assert_eq!(character.name, "Ada");
        assert!(!character.last_reasoning.is_empty());
        assert!(matches!(
            registry.character(id, CharacterId::new()).await,
            Err(RegistryError::CharacterNotFound(_))
        ));
    }
}
