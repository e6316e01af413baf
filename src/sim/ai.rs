//! Enemy steering
//!
//! Each enemy steps one cell along the longer axis of its shortest torus path
//! to the nearest player (or away from it while reversed), falling back to the
//! other axis and then a single step back along the primary axis when
//! blocked. Every candidate is one cell away.

use super::entity::Entity;
use super::movement::try_step;
use super::torus::{Coord, minimal_displacement, torus_distance};

/// Nearest player by torus distance; ties go to the earliest player
pub fn nearest_player<'a>(size: i32, from: Coord, players: &'a [Entity]) -> Option<&'a Entity> {
    players.iter().min_by(|a, b| {
        torus_distance(size, from, a.position)
            .partial_cmp(&torus_distance(size, from, b.position))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Where an enemy at `from` wants to go this tick, given its target.
///
/// `blockers` is consulted for every candidate in turn. Returns `from` when
/// the enemy is already on the target or every candidate is blocked.
pub fn steer<'a, I>(size: i32, from: Coord, target: Coord, reversed: bool, blockers: I) -> Coord
where
    I: IntoIterator<Item = &'a Entity> + Clone,
{
    let d = minimal_displacement(size, from, target);
    let (d_row, d_col) = (d.x, d.y);
    if d_row == 0 && d_col == 0 {
        return from;
    }

    let multiplier = if reversed { -1 } else { 1 };

    // (primary delta, secondary delta) expressed as (row, col) steps
    let col_primary = d_col.abs() >= d_row.abs();
    let (primary_sign, secondary_sign) = if col_primary {
        (d_col.signum(), d_row.signum())
    } else {
        (d_row.signum(), d_col.signum())
    };
    let along = |primary: i32, secondary: i32| {
        if col_primary {
            (secondary, primary)
        } else {
            (primary, secondary)
        }
    };

    let primary = along(primary_sign * multiplier, 0);
    let secondary = (secondary_sign != 0).then(|| along(0, secondary_sign * multiplier));
    // One cell against the preferred primary step
    let lateral = along(-primary_sign * multiplier, 0);

    std::iter::once(primary)
        .chain(secondary)
        .chain(std::iter::once(lateral))
        .find_map(|(dr, dc)| try_step(from, dr, dc, size, blockers.clone()))
        .unwrap_or(from)
}
