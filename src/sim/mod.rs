//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-driven only; wall-clock timing belongs to the scheduler
//! - Seeded RNG only
//! - Stable iteration order (insertion order per kind)
//! - No rendering or platform dependencies

pub mod ai;
pub mod entity;
pub mod movement;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;
pub mod torus;

pub use ai::{nearest_player, steer};
pub use entity::{Controls, Entity, EntityId, EntityKind, KindTag};
pub use movement::{BlockingSet, REVERSED_PLAYER_BLOCKERS, try_move};
pub use spawn::{Placement, generate_locations};
pub use state::{GameEvent, GamePhase, GameState, RngState};
pub use store::EntityStore;
pub use tick::{TickOutcome, tick};
pub use torus::{Bounds, Coord, Direction, minimal_displacement, torus_distance, wrap};
