//! Game configuration
//!
//! An immutable bundle handed to `GameState::new`. Loaded from JSON by the
//! front-end; every field has a default so partial files are fine.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{DodgerError, Result};
use crate::sim::torus::{Coord, Direction};

/// Raw input identifiers for each movement direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: String,
    pub up: String,
    pub right: String,
    pub down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "a".to_string(),
            up: "w".to_string(),
            right: "d".to_string(),
            down: "s".to_string(),
        }
    }
}

impl KeyBindings {
    /// Direction bound to `raw_key`, if any
    pub fn direction_for(&self, raw_key: &str) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.key_for(direction) == raw_key)
    }

    pub fn key_for(&self, direction: Direction) -> &str {
        match direction {
            Direction::Left => &self.left,
            Direction::Up => &self.up,
            Direction::Right => &self.right,
            Direction::Down => &self.down,
        }
    }
}

/// Inclusive millisecond range for the strawberry spawn timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnInterval {
    pub min: u64,
    pub max: u64,
}

impl Default for SpawnInterval {
    fn default() -> Self {
        Self {
            min: DEFAULT_STRAWBERRY_MIN_MS,
            max: DEFAULT_STRAWBERRY_MAX_MS,
        }
    }
}

/// Fixed map features placed before anything random
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Terrain {
    pub walls: Vec<Coord>,
    pub floors: Vec<Coord>,
    pub doors: Vec<Coord>,
    pub stairs: Vec<Coord>,
}

impl Terrain {
    fn cells(&self) -> impl Iterator<Item = &Coord> {
        self.walls
            .iter()
            .chain(&self.floors)
            .chain(&self.doors)
            .chain(&self.stairs)
    }
}

/// Everything the simulation needs to know up front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid edge length
    pub size: i32,
    /// Pause between the end of one tick and the start of the next
    pub tick_delay_ms: u64,
    pub num_coins: usize,
    pub num_enemies: usize,
    /// Minimum torus distance between a new enemy and any player
    pub min_enemy_distance: f32,
    pub strawberry_interval_ms: SpawnInterval,
    /// Reversal ticks granted per strawberry
    pub power_up_ticks: u32,
    /// Chance an enemy takes its step each tick
    pub enemy_speed: f32,
    /// Coin lifetime (-1 = infinite)
    pub coin_lifetime: i32,
    /// Fixed seed for a reproducible run
    pub seed: Option<u64>,
    pub key_bindings: KeyBindings,
    pub terrain: Terrain,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            tick_delay_ms: DEFAULT_TICK_DELAY_MS,
            num_coins: DEFAULT_NUM_COINS,
            num_enemies: DEFAULT_NUM_ENEMIES,
            min_enemy_distance: DEFAULT_MIN_ENEMY_DISTANCE,
            strawberry_interval_ms: SpawnInterval::default(),
            power_up_ticks: POWER_UP_TICKS,
            enemy_speed: DEFAULT_ENEMY_SPEED,
            coin_lifetime: INFINITE_LIFETIME,
            seed: None,
            key_bindings: KeyBindings::default(),
            terrain: Terrain::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject bundles the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(DodgerError::Config(msg));

        if self.size <= 0 {
            return invalid(format!("grid size must be positive, got {}", self.size));
        }
        if self.tick_delay_ms == 0 {
            return invalid("tick delay must be at least 1 ms".to_string());
        }
        if !(0.0..=1.0).contains(&self.enemy_speed) {
            return invalid(format!(
                "enemy speed must be within [0, 1], got {}",
                self.enemy_speed
            ));
        }
        if self.min_enemy_distance.is_nan() || self.min_enemy_distance < 0.0 {
            return invalid(format!(
                "minimum enemy distance must be non-negative, got {}",
                self.min_enemy_distance
            ));
        }
        let interval = self.strawberry_interval_ms;
        if interval.min == 0 || interval.min > interval.max {
            return invalid(format!(
                "strawberry interval must satisfy 0 < min <= max, got {}..={}",
                interval.min, interval.max
            ));
        }

        let keys: Vec<&str> = Direction::ALL
            .into_iter()
            .map(|d| self.key_bindings.key_for(d))
            .collect();
        if keys.iter().any(|k| k.is_empty()) {
            return invalid("key bindings must not be empty".to_string());
        }
        if keys.iter().collect::<HashSet<_>>().len() != keys.len() {
            return invalid(format!("key bindings must be distinct, got {:?}", keys));
        }

        if let Some(cell) = self.terrain.cells().find(|c| !c.in_grid(self.size)) {
            return invalid(format!(
                "terrain cell ({}, {}) lies outside a {}x{} grid",
                cell.row, cell.col, self.size, self.size
            ));
        }

        let cells = self.size as usize * self.size as usize;
        let wanted = 1 + self.num_coins + self.num_enemies + self.terrain.cells().count();
        if wanted > cells {
            return invalid(format!(
                "{} entities cannot fit on {} cells",
                wanted, cells
            ));
        }

        Ok(())
    }
}
