//! Game state and lifecycle
//!
//! Owns the entity store, the score, the power-up timer and the seeded RNG.
//! Everything that changes during play goes through here or `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::entity::{Entity, EntityId, KindTag};
use super::spawn::{Placement, generate_locations};
use super::store::EntityStore;
use super::torus::Coord;
use crate::config::GameConfig;
use crate::error::{DodgerError, Result};

/// Where the game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Waiting for the first valid key; ticks only render
    Idle,
    /// Active gameplay
    Running,
    /// Terminal; ticks are ignored
    Over,
}

/// Something notable that happened during a tick or timer callback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    PlayerMoved { player: EntityId, to: Coord },
    PlayerBlocked { player: EntityId },
    CoinCollected { player: EntityId, at: Coord },
    StrawberryEaten { player: EntityId, at: Coord },
    StrawberrySpawned { at: Coord },
    EnemyEaten { enemy: EntityId, at: Coord },
    PlayerCaught { player: EntityId, by: EntityId },
    PowerUpExpired,
}

/// Seed record so a run can be replayed
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    pub rng_state: RngState,
    pub(crate) rng: Pcg32,
    pub store: EntityStore,
    pub score: u64,
    pub started: bool,
    pub over: bool,
    /// Ticks of enemy reversal remaining
    pub reversed_timer: u32,
    /// Advanced (non-idle) ticks so far
    pub tick_count: u64,
    next_id: EntityId,
}

impl GameState {
    /// Validate `config`, then lay out terrain, players, coins and enemies
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut state = Self::from_layout(config, EntityStore::new())?;
        state.populate()?;
        log::info!(
            "New game: {}x{} grid, {} coin(s), {} enemy(ies), seed {}",
            state.config.size,
            state.config.size,
            state.store.coins().len(),
            state.store.enemies().len(),
            state.rng_state.seed
        );
        Ok(state)
    }

    /// Validate `config` and adopt an already-built store as-is
    pub fn from_layout(config: GameConfig, store: EntityStore) -> Result<Self> {
        config.validate()?;
        if let Some(stray) = store.all().find(|e| !e.position.in_grid(config.size)) {
            return Err(DodgerError::Config(format!(
                "entity {} at ({}, {}) lies outside a {}x{} grid",
                stray.id, stray.position.row, stray.position.col, config.size, config.size
            )));
        }
        let seed = config.seed.unwrap_or_else(rand::random);
        let rng_state = RngState::new(seed);
        let next_id = store.all().map(|e| e.id + 1).max().unwrap_or(1);
        Ok(Self {
            rng: rng_state.to_rng(),
            rng_state,
            config,
            store,
            score: 0,
            started: false,
            over: false,
            reversed_timer: 0,
            tick_count: 0,
            next_id,
        })
    }

    fn populate(&mut self) -> Result<()> {
        let size = self.config.size;
        let terrain = self.config.terrain.clone();
        for &at in &terrain.walls {
            let id = self.next_entity_id();
            self.store.insert(Entity::wall(id, at));
        }
        for &at in &terrain.floors {
            let id = self.next_entity_id();
            self.store.insert(Entity::floor(id, at));
        }
        for &at in &terrain.doors {
            let id = self.next_entity_id();
            self.store.insert(Entity::door(id, at));
        }
        for &at in &terrain.stairs {
            let id = self.next_entity_id();
            self.store.insert(Entity::stairs(id, at));
        }

        let spots = generate_locations(
            &mut self.rng,
            size,
            1,
            &[Placement::Collision],
            self.store.all(),
        )?;
        for at in spots {
            let id = self.next_entity_id();
            let bindings = self.config.key_bindings.clone();
            self.store.insert(Entity::player(id, at, bindings));
        }

        let spots = generate_locations(
            &mut self.rng,
            size,
            self.config.num_coins,
            &[Placement::Collision],
            self.store.all(),
        )?;
        for at in spots {
            let id = self.next_entity_id();
            self.store.insert(Entity::coin(id, at, self.config.coin_lifetime));
        }

        let spots = generate_locations(
            &mut self.rng,
            size,
            self.config.num_enemies,
            &[
                Placement::Collision,
                Placement::MinDistanceFrom {
                    kind: KindTag::Player,
                    distance: self.config.min_enemy_distance,
                },
            ],
            self.store.all(),
        )?;
        for at in spots {
            let id = self.next_entity_id();
            self.store.insert(Entity::enemy(id, at, self.config.enemy_speed));
        }

        Ok(())
    }

    /// The bundle this game was built from
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn phase(&self) -> GamePhase {
        if self.over {
            GamePhase::Over
        } else if self.started {
            GamePhase::Running
        } else {
            GamePhase::Idle
        }
    }

    /// Enemies flee instead of chase while the power-up timer runs
    pub fn enemies_reversed(&self) -> bool {
        self.reversed_timer > 0
    }

    /// Buffer a raw key for a player. Unbound keys are ignored. The first
    /// bound key starts the game.
    pub fn set_last_direction(&mut self, player_index: usize, raw_key: &str) -> bool {
        if self.over {
            return false;
        }
        let Some(controls) = self
            .store
            .players_mut()
            .get_mut(player_index)
            .and_then(Entity::controls_mut)
        else {
            return false;
        };
        if controls.bindings.direction_for(raw_key).is_none() {
            return false;
        }
        controls.last_key = Some(raw_key.to_string());

        if !self.started {
            self.started = true;
            log::info!("Game started");
        }
        true
    }

    /// Take the buffered key for a player, leaving the slot empty
    pub fn consume_last_direction(&mut self, player_index: usize) -> Option<String> {
        self.store
            .players_mut()
            .get_mut(player_index)
            .and_then(Entity::controls_mut)
            .and_then(|controls| controls.last_key.take())
    }

    /// Place a strawberry if none is live and the game is running.
    /// Returns the spawn event, or `None` if nothing was placed.
    pub fn spawn_strawberry(&mut self) -> Option<GameEvent> {
        if self.phase() != GamePhase::Running || !self.store.strawberries().is_empty() {
            return None;
        }
        let size = self.config.size;
        match generate_locations(
            &mut self.rng,
            size,
            1,
            &[Placement::Collision],
            self.store.all(),
        ) {
            Ok(spots) => {
                let at = spots[0];
                let id = self.next_entity_id();
                self.store.insert(Entity::strawberry(id, at));
                log::debug!("Strawberry spawned at {:?}", at);
                Some(GameEvent::StrawberrySpawned { at })
            }
            Err(err) => {
                log::warn!("Skipping strawberry spawn: {}", err);
                None
            }
        }
    }

    /// Draw the next strawberry timer interval in milliseconds
    pub fn next_strawberry_delay_ms(&mut self) -> u64 {
        use rand::Rng;
        let interval = self.config.strawberry_interval_ms;
        self.rng.random_range(interval.min..=interval.max)
    }

    /// Open the door with `id`. Returns false if there is no such door.
    pub fn open_door(&mut self, id: EntityId) -> bool {
        self.store
            .doors_mut()
            .iter_mut()
            .find(|d| d.id == id)
            .is_some_and(|d| d.open())
    }

    /// Close the door with `id`. Returns false if there is no such door.
    pub fn close_door(&mut self, id: EntityId) -> bool {
        self.store
            .doors_mut()
            .iter_mut()
            .find(|d| d.id == id)
            .is_some_and(|d| d.close())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Terrain;

    fn config() -> GameConfig {
        GameConfig {
            size: 12,
            num_coins: 3,
            num_enemies: 4,
            min_enemy_distance: 3.0,
            seed: Some(2024),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_new_populates_store() {
        let state = GameState::new(config()).unwrap();
        assert_eq!(state.store.players().len(), 1);
        assert_eq!(state.store.coins().len(), 3);
        assert_eq!(state.store.enemies().len(), 4);
        assert!(state.store.strawberries().is_empty());
        assert_eq!(state.phase(), GamePhase::Idle);
        assert!(!state.enemies_reversed());
    }

    #[test]
    fn test_enemies_spawn_away_from_player() {
        let state = GameState::new(config()).unwrap();
        let player = state.store.players()[0].position;
        for enemy in state.store.enemies() {
            let dist = crate::sim::torus::torus_distance(12, player, enemy.position);
            assert!(dist >= 3.0);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(config()).unwrap();
        let b = GameState::new(config()).unwrap();
        let pa: Vec<Coord> = a.store.all().map(|e| e.position).collect();
        let pb: Vec<Coord> = b.store.all().map(|e| e.position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_terrain_from_config() {
        let cfg = GameConfig {
            terrain: Terrain {
                walls: vec![Coord::new(0, 0), Coord::new(0, 1)],
                doors: vec![Coord::new(1, 1)],
                stairs: vec![Coord::new(2, 2)],
                floors: vec![Coord::new(3, 3)],
            },
            ..config()
        };
        let state = GameState::new(cfg).unwrap();
        assert_eq!(state.store.walls().len(), 2);
        assert_eq!(state.store.doors().len(), 1);
        assert_eq!(state.store.stairs().len(), 1);
        assert_eq!(state.store.floors().len(), 1);
        let player = state.store.players()[0].position;
        assert!(!state.store.walls().iter().any(|w| w.position == player));
    }

    #[test]
    fn test_infeasible_layout_is_configuration_error() {
        let cfg = GameConfig {
            size: 3,
            num_coins: 0,
            num_enemies: 1,
            min_enemy_distance: 10.0,
            ..config()
        };
        let err = GameState::new(cfg).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_input_starts_game_and_is_consumed_once() {
        let mut state = GameState::new(config()).unwrap();
        assert!(!state.set_last_direction(0, "q"));
        assert!(!state.started);

        assert!(state.set_last_direction(0, "a"));
        assert!(state.set_last_direction(0, "d"));
        assert!(state.started);
        assert_eq!(state.phase(), GamePhase::Running);

        assert_eq!(state.consume_last_direction(0).as_deref(), Some("d"));
        assert_eq!(state.consume_last_direction(0), None);
    }

    #[test]
    fn test_input_for_missing_player_ignored() {
        let mut state = GameState::new(config()).unwrap();
        assert!(!state.set_last_direction(3, "a"));
        assert!(!state.started);
    }

    #[test]
    fn test_strawberry_spawn_rules() {
        let mut state = GameState::new(config()).unwrap();
        // Not running yet
        assert!(state.spawn_strawberry().is_none());

        state.set_last_direction(0, "a");
        assert!(matches!(
            state.spawn_strawberry(),
            Some(GameEvent::StrawberrySpawned { .. })
        ));
        // At most one live
        assert!(state.spawn_strawberry().is_none());
        assert_eq!(state.store.strawberries().len(), 1);

        state.over = true;
        let berry = state.store.strawberries()[0].id;
        state.store.remove(berry);
        assert!(state.spawn_strawberry().is_none());
    }

    #[test]
    fn test_strawberry_delay_in_bounds() {
        let mut state = GameState::new(config()).unwrap();
        let bounds = state.config().strawberry_interval_ms;
        for _ in 0..50 {
            let delay = state.next_strawberry_delay_ms();
            assert!((bounds.min..=bounds.max).contains(&delay));
        }
    }

    #[test]
    fn test_door_controls() {
        let cfg = GameConfig {
            terrain: Terrain {
                doors: vec![Coord::new(4, 4)],
                ..Terrain::default()
            },
            ..config()
        };
        let mut state = GameState::new(cfg).unwrap();
        let door = state.store.doors()[0].id;
        assert!(state.open_door(door));
        assert!(!state.store.doors()[0].is_blocking());
        assert!(state.close_door(door));
        assert!(state.store.doors()[0].is_blocking());

        let player = state.store.players()[0].id;
        assert!(!state.open_door(player));
    }

    #[test]
    fn test_layout_outside_grid_rejected() {
        let mut store = EntityStore::new();
        store.insert(Entity::wall(1, Coord::new(0, 0)));
        store.insert(Entity::coin(2, Coord::new(12, 3), -1));
        let err = GameState::from_layout(config(), store).unwrap_err();
        assert!(matches!(err, DodgerError::Config(_)));
    }
}
