//! Constrained random placement
//!
//! Rejection sampling: draw a uniform cell, keep it only if no existing entity
//! trips any placement predicate against it. Locations accepted in the same
//! batch are not checked against each other.

use rand::Rng;

use super::entity::{Entity, KindTag};
use super::torus::{Coord, torus_distance};
use crate::consts::MAX_SPAWN_ATTEMPTS;
use crate::error::{DodgerError, Result};

/// A rejection rule between an existing entity and a candidate cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Reject cells already occupied by anything
    Collision,
    /// Reject cells closer than `distance` (torus) to anything
    MinDistance(f32),
    /// Reject cells closer than `distance` to entities of one kind
    MinDistanceFrom { kind: KindTag, distance: f32 },
}

impl Placement {
    /// True if `existing` rules out `candidate`
    pub fn rejects(&self, size: i32, existing: (KindTag, Coord), candidate: Coord) -> bool {
        let (kind, position) = existing;
        match *self {
            Placement::Collision => position == candidate,
            Placement::MinDistance(distance) => {
                torus_distance(size, position, candidate) < distance
            }
            Placement::MinDistanceFrom {
                kind: only,
                distance,
            } => kind == only && torus_distance(size, position, candidate) < distance,
        }
    }
}

/// Uniform random cell in `[0, size)^2`
pub fn random_coord<R: Rng>(rng: &mut R, size: i32) -> Coord {
    Coord::new(rng.random_range(0..size), rng.random_range(0..size))
}

/// Produce exactly `quantity` cells satisfying every predicate against
/// `existing` as it was at call time.
///
/// Gives up with `DodgerError::Infeasible` after `MAX_SPAWN_ATTEMPTS` draws per
/// requested location.
pub fn generate_locations<'a, R, I>(
    rng: &mut R,
    size: i32,
    quantity: usize,
    predicates: &[Placement],
    existing: I,
) -> Result<Vec<Coord>>
where
    R: Rng,
    I: IntoIterator<Item = &'a Entity>,
{
    if size <= 0 {
        return Err(DodgerError::Config(format!(
            "grid size must be positive, got {size}"
        )));
    }

    let occupied: Vec<(KindTag, Coord)> = existing
        .into_iter()
        .map(|e| (e.tag(), e.position))
        .collect();

    let max_attempts = quantity as u64 * MAX_SPAWN_ATTEMPTS as u64;
    let mut locations = Vec::with_capacity(quantity);
    let mut attempts = 0u64;

    while locations.len() < quantity {
        if attempts >= max_attempts {
            return Err(DodgerError::Infeasible {
                quantity,
                attempts,
            });
        }
        attempts += 1;

        let candidate = random_coord(rng, size);
        let accepted = predicates.iter().all(|predicate| {
            !occupied
                .iter()
                .any(|&existing| predicate.rejects(size, existing, candidate))
        });

        if accepted {
            locations.push(candidate);
        }
    }

    log::debug!(
        "Placed {} location(s) in {} attempt(s)",
        locations.len(),
        attempts
    );
    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyBindings;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_collision_avoids_occupied_cells() {
        let mut rng = Pcg32::seed_from_u64(7);
        // Fill all but one cell of a 3x3 grid
        let walls: Vec<Entity> = (0..3)
            .flat_map(|row| (0..3).map(move |col| Coord::new(row, col)))
            .filter(|&c| c != Coord::new(1, 2))
            .enumerate()
            .map(|(i, c)| Entity::wall(i as u32, c))
            .collect();

        let spots = generate_locations(&mut rng, 3, 4, &[Placement::Collision], &walls).unwrap();
        assert_eq!(spots.len(), 4);
        assert!(spots.iter().all(|&c| c == Coord::new(1, 2)));
    }

    #[test]
    fn test_infeasible_gives_up() {
        let mut rng = Pcg32::seed_from_u64(1);
        let walls = vec![Entity::wall(1, Coord::new(0, 0))];
        let err = generate_locations(&mut rng, 1, 1, &[Placement::Collision], &walls).unwrap_err();
        assert!(matches!(err, DodgerError::Infeasible { quantity: 1, .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_rejects_non_positive_size() {
        let mut rng = Pcg32::seed_from_u64(1);
        let none: Vec<Entity> = Vec::new();
        let err = generate_locations(&mut rng, 0, 1, &[], &none).unwrap_err();
        assert!(matches!(err, DodgerError::Config(_)));
    }

    #[test]
    fn test_min_distance_from_kind_only() {
        let size = 10;
        let player = Entity::player(1, Coord::new(0, 0), KeyBindings::default());
        let coin = Entity::coin(2, Coord::new(5, 5), -1);
        let rule = Placement::MinDistanceFrom {
            kind: KindTag::Player,
            distance: 3.0,
        };

        assert!(rule.rejects(size, (player.tag(), player.position), Coord::new(9, 9)));
        assert!(!rule.rejects(size, (player.tag(), player.position), Coord::new(3, 0)));
        // Coins are ignored by a player-only rule
        assert!(!rule.rejects(size, (coin.tag(), coin.position), Coord::new(5, 5)));
    }

    #[test]
    fn test_min_distance_applies_to_every_kind() {
        let size = 10;
        let rule = Placement::MinDistance(2.5);
        let wall = (KindTag::Wall, Coord::new(0, 0));
        let coin = (KindTag::Coin, Coord::new(5, 5));

        // Distance measured the short way round
        assert!(rule.rejects(size, wall, Coord::new(9, 9)));
        assert!(rule.rejects(size, coin, Coord::new(6, 6)));
        assert!(!rule.rejects(size, wall, Coord::new(0, 3)));

        let mut rng = Pcg32::seed_from_u64(21);
        let existing = vec![Entity::wall(1, Coord::new(0, 0)), Entity::coin(2, Coord::new(5, 5), -1)];
        let spots = generate_locations(&mut rng, size, 8, &[rule], &existing).unwrap();
        for spot in spots {
            assert!(torus_distance(size, spot, Coord::new(0, 0)) >= 2.5);
            assert!(torus_distance(size, spot, Coord::new(5, 5)) >= 2.5);
        }
    }

    #[test]
    fn test_batch_is_not_self_checked() {
        // With a single free cell every location in the batch lands on it
        let mut rng = Pcg32::seed_from_u64(3);
        let none: Vec<Entity> = Vec::new();
        let spots = generate_locations(&mut rng, 1, 3, &[Placement::Collision], &none).unwrap();
        assert_eq!(spots, vec![Coord::new(0, 0); 3]);
    }

    proptest! {
        #[test]
        fn prop_locations_satisfy_predicates(
            seed in any::<u64>(),
            size in 6i32..16,
            quantity in 1usize..6,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let existing = vec![
                Entity::player(1, Coord::new(0, 0), KeyBindings::default()),
                Entity::wall(2, Coord::new(size / 2, size / 2)),
                Entity::coin(3, Coord::new(1, size - 1), -1),
            ];
            let predicates = [
                Placement::Collision,
                Placement::MinDistanceFrom { kind: KindTag::Player, distance: 2.0 },
            ];

            let spots = generate_locations(&mut rng, size, quantity, &predicates, &existing).unwrap();
            prop_assert_eq!(spots.len(), quantity);
            for spot in spots {
                prop_assert!(spot.in_grid(size));
                for e in &existing {
                    for p in &predicates {
                        prop_assert!(!p.rejects(size, (e.tag(), e.position), spot));
                    }
                }
            }
        }
    }
}
