//! Per-tick state transition
//!
//! Order within a running tick: player moves, coin pickups, strawberry
//! pickups, enemy steering, player/enemy contact, power-up decay. Rendering
//! happens outside, once per completed tick.

use super::ai::{nearest_player, steer};
use super::entity::{Entity, EntityId};
use super::movement::{BlockingSet, REVERSED_PLAYER_BLOCKERS, passes_speed_gate, try_move};
use super::spawn::{Placement, generate_locations};
use super::state::{GameEvent, GamePhase, GameState};

/// What a call to `tick` did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Game is over; nothing changed
    Ignored,
    /// Game has not started; only a render is due
    Idle,
    /// State advanced one step
    Advanced(Vec<GameEvent>),
}

impl TickOutcome {
    /// True if the caller should render after this tick
    pub fn needs_render(&self) -> bool {
        !matches!(self, TickOutcome::Ignored)
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) -> TickOutcome {
    match state.phase() {
        GamePhase::Over => return TickOutcome::Ignored,
        GamePhase::Idle => return TickOutcome::Idle,
        GamePhase::Running => {}
    }

    state.tick_count += 1;
    let mut events = Vec::new();

    move_players(state, &mut events);
    collect_coins(state, &mut events);
    collect_strawberries(state, &mut events);
    move_enemies(state);
    resolve_contacts(state, &mut events);
    decay_power_up(state, &mut events);

    TickOutcome::Advanced(events)
}

fn move_players(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let size = state.config().size;
    // Walls and enemies stop counting for players while enemies flee
    let blockers = if state.enemies_reversed() {
        REVERSED_PLAYER_BLOCKERS
    } else {
        BlockingSet::Everything
    };

    for index in 0..state.store.players().len() {
        let Some(key) = state.consume_last_direction(index) else {
            continue;
        };

        let player = &state.store.players()[index];
        let Some(direction) = player
            .controls()
            .and_then(|controls| controls.bindings.direction_for(&key))
        else {
            continue;
        };

        let from = player.position;
        let to = try_move(
            player,
            direction,
            size,
            blockers.filter(state.store.all()),
            &mut state.rng,
        );
        let id = player.id;
        state.store.players_mut()[index].position = to;

        events.push(if to == from {
            GameEvent::PlayerBlocked { player: id }
        } else {
            GameEvent::PlayerMoved { player: id, to }
        });
    }
}

fn collect_coins(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let size = state.config().size;
    let pickups: Vec<(EntityId, EntityId)> = state
        .store
        .players()
        .iter()
        .filter_map(|player| {
            state
                .store
                .coins()
                .iter()
                .find(|coin| coin.position == player.position)
                .map(|coin| (player.id, coin.id))
        })
        .collect();

    for (player, coin) in pickups {
        let Some(coin) = state.store.remove(coin) else {
            continue;
        };
        state.score += 1;
        events.push(GameEvent::CoinCollected {
            player,
            at: coin.position,
        });

        match generate_locations(
            &mut state.rng,
            size,
            1,
            &[Placement::Collision],
            state.store.all(),
        ) {
            Ok(spots) => {
                let id = state.next_entity_id();
                let lifetime = state.config().coin_lifetime;
                state.store.insert(Entity::coin(id, spots[0], lifetime));
            }
            Err(err) => log::warn!("No room for a replacement coin: {}", err),
        }
    }
}

fn collect_strawberries(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let pickups: Vec<(EntityId, EntityId)> = state
        .store
        .players()
        .iter()
        .filter_map(|player| {
            state
                .store
                .strawberries()
                .iter()
                .find(|berry| berry.position == player.position)
                .map(|berry| (player.id, berry.id))
        })
        .collect();

    for (player, berry) in pickups {
        let Some(berry) = state.store.remove(berry) else {
            continue;
        };
        let granted = state.config().power_up_ticks;
        state.reversed_timer += granted;
        log::info!(
            "Strawberry eaten, enemies reversed for {} tick(s)",
            state.reversed_timer
        );
        events.push(GameEvent::StrawberryEaten {
            player,
            at: berry.position,
        });
    }
}

fn move_enemies(state: &mut GameState) {
    let size = state.config().size;
    let reversed = state.enemies_reversed();

    for index in 0..state.store.enemies().len() {
        let enemy = &state.store.enemies()[index];
        let Some(target) = nearest_player(size, enemy.position, state.store.players()) else {
            // Nobody to chase
            return;
        };
        if !passes_speed_gate(enemy.speed, &mut state.rng) {
            continue;
        }

        let to = steer(
            size,
            enemy.position,
            target.position,
            reversed,
            state.store.all(),
        );
        state.store.enemies_mut()[index].position = to;
    }
}

fn resolve_contacts(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let reversed = state.enemies_reversed();
    let contacts: Vec<(EntityId, Vec<EntityId>)> = state
        .store
        .players()
        .iter()
        .map(|player| {
            let hits: Vec<EntityId> = state
                .store
                .enemies()
                .iter()
                .filter(|enemy| enemy.position == player.position)
                .map(|enemy| enemy.id)
                .collect();
            (player.id, hits)
        })
        .filter(|(_, hits)| !hits.is_empty())
        .collect();

    for (player, hits) in contacts {
        if reversed {
            for enemy in hits {
                if let Some(eaten) = state.store.remove(enemy) {
                    state.score += 1;
                    events.push(GameEvent::EnemyEaten {
                        enemy,
                        at: eaten.position,
                    });
                }
            }
        } else {
            state.over = true;
            log::info!(
                "Game over after {} tick(s), score {}",
                state.tick_count,
                state.score
            );
            events.push(GameEvent::PlayerCaught {
                player,
                by: hits[0],
            });
            return;
        }
    }
}

fn decay_power_up(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.reversed_timer == 0 {
        return;
    }
    state.reversed_timer -= 1;
    if state.reversed_timer == 0 {
        log::info!("Power-up expired");
        events.push(GameEvent::PowerUpExpired);
    }
}
