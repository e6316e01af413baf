//! Movement resolution
//!
//! A unit step is accepted unless a blocking entity from the caller-supplied
//! set already occupies the destination. Which entities count is decided by
//! the caller, so the same resolver serves players and enemies.

use rand::Rng;

use super::entity::{Entity, KindTag};
use super::torus::{Coord, Direction};

/// Which entity kinds take part in a blocking check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingSet {
    /// Every entity in the store
    Everything,
    /// Only the listed kinds
    Only(&'static [KindTag]),
}

/// Player blockers while enemies are reversed
pub const REVERSED_PLAYER_BLOCKERS: BlockingSet = BlockingSet::Only(&[
    KindTag::Coin,
    KindTag::Door,
    KindTag::Floor,
    KindTag::Player,
]);

impl BlockingSet {
    pub fn admits(&self, kind: KindTag) -> bool {
        match self {
            BlockingSet::Everything => true,
            BlockingSet::Only(kinds) => kinds.contains(&kind),
        }
    }

    /// Narrow `entities` down to the members of this set
    pub fn filter<'a, I>(self, entities: I) -> impl Iterator<Item = &'a Entity>
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        entities.into_iter().filter(move |e| self.admits(e.tag()))
    }
}

/// True if any blocking entity in `blockers` sits on `cell`
pub fn is_blocked<'a, I>(cell: Coord, blockers: I) -> bool
where
    I: IntoIterator<Item = &'a Entity>,
{
    blockers
        .into_iter()
        .any(|e| e.is_blocking() && e.position == cell)
}

/// Bernoulli draw against an entity's speed. Speeds of 1 or more always pass
/// without consuming randomness.
pub fn passes_speed_gate<R: Rng>(speed: f32, rng: &mut R) -> bool {
    if speed >= 1.0 {
        return true;
    }
    if speed <= 0.0 {
        return false;
    }
    rng.random_bool(f64::from(speed))
}

/// Step `(d_row, d_col)` from `from`; `None` if the destination is blocked
pub fn try_step<'a, I>(from: Coord, d_row: i32, d_col: i32, size: i32, blockers: I) -> Option<Coord>
where
    I: IntoIterator<Item = &'a Entity>,
{
    let destination = from.offset(d_row, d_col, size);
    (!is_blocked(destination, blockers)).then_some(destination)
}

/// Resolve a directional move for `mover`, returning the accepted position
/// (unchanged if gated by speed or blocked)
pub fn try_move<'a, R, I>(
    mover: &Entity,
    direction: Direction,
    size: i32,
    blockers: I,
    rng: &mut R,
) -> Coord
where
    R: Rng,
    I: IntoIterator<Item = &'a Entity>,
{
    if !passes_speed_gate(mover.speed, rng) {
        return mover.position;
    }
    let (d_row, d_col) = direction.delta();
    try_step(mover.position, d_row, d_col, size, blockers).unwrap_or(mover.position)
}
