//! Torus Dodger - a chase game on a wrap-around grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (torus math, entities, placement, movement, enemy AI, tick)
//! - `renderer`: Frame snapshots and render sinks (text, JSON lines)
//! - `platform`: Input channel and the cooperative tick scheduler
//! - `config`: Immutable game configuration bundle

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, KeyBindings, SpawnInterval, Terrain};
pub use error::{DodgerError, Result};

/// Default tuning values
pub mod consts {
    /// Grid edge length (the grid is `size` x `size`)
    pub const DEFAULT_GRID_SIZE: i32 = 20;
    /// Delay between the end of one tick and the start of the next
    pub const DEFAULT_TICK_DELAY_MS: u64 = 300;

    /// Initial population
    pub const DEFAULT_NUM_COINS: usize = 2;
    pub const DEFAULT_NUM_ENEMIES: usize = 5;
    /// Enemies never spawn closer than this (torus distance) to a player
    pub const DEFAULT_MIN_ENEMY_DISTANCE: f32 = 5.0;

    /// Probability that an enemy actually takes its step on a given tick
    pub const DEFAULT_ENEMY_SPEED: f32 = 0.5;

    /// Strawberry spawn timer bounds (milliseconds, inclusive)
    pub const DEFAULT_STRAWBERRY_MIN_MS: u64 = 5_000;
    pub const DEFAULT_STRAWBERRY_MAX_MS: u64 = 15_000;

    /// Ticks of enemy reversal granted per strawberry (cumulative)
    pub const POWER_UP_TICKS: u32 = 30;

    /// Random draws allowed per requested location before placement gives up
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

    /// Lifetime value meaning "never expires"
    pub const INFINITE_LIFETIME: i32 = -1;
}
