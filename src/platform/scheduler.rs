//! Cooperative tick scheduler
//!
//! One task owns the game state and multiplexes three sources: queued key
//! input, the tick timer and the strawberry timer. Nothing else touches the
//! store, so handlers never interleave.

use std::time::Duration;

use tokio::time::{Instant, sleep};

use super::input::{InputEvent, InputReceiver};
use crate::renderer::RenderSink;
use crate::sim::{GameState, TickOutcome, tick};

/// Drives a game to completion in real time
pub struct Scheduler<S: RenderSink> {
    state: GameState,
    sink: S,
}

impl<S: RenderSink> Scheduler<S> {
    pub fn new(state: GameState, sink: S) -> Self {
        Self { state, sink }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run until the game is over and hand back the final state.
    ///
    /// The next tick is armed only after the current tick and its render
    /// finish, so a slow sink stretches the cadence instead of queueing ticks.
    pub async fn run(mut self, mut inputs: InputReceiver) -> GameState {
        let tick_delay = Duration::from_millis(self.state.config().tick_delay_ms);
        let tick_timer = sleep(tick_delay);
        tokio::pin!(tick_timer);

        let first_berry = Duration::from_millis(self.state.next_strawberry_delay_ms());
        let berry_timer = sleep(first_berry);
        tokio::pin!(berry_timer);

        let mut inputs_open = true;

        loop {
            tokio::select! {
                biased;

                event = inputs.recv(), if inputs_open => match event {
                    Some(InputEvent { player, key }) => {
                        if !self.state.set_last_direction(player, &key) {
                            log::debug!("Ignored key {:?} for player {}", key, player);
                        }
                    }
                    None => {
                        log::debug!("Input channel closed");
                        inputs_open = false;
                    }
                },

                () = &mut tick_timer => {
                    let outcome = tick(&mut self.state);
                    if outcome.needs_render() {
                        self.sink.render(&self.state.frame());
                    }
                    if let TickOutcome::Advanced(events) = &outcome {
                        for event in events {
                            log::debug!("tick {}: {:?}", self.state.tick_count, event);
                        }
                    }
                    if self.state.over {
                        break;
                    }
                    tick_timer.as_mut().reset(Instant::now() + tick_delay);
                }

                () = &mut berry_timer => {
                    self.state.spawn_strawberry();
                    let next = Duration::from_millis(self.state.next_strawberry_delay_ms());
                    berry_timer.as_mut().reset(Instant::now() + next);
                }
            }
        }

        log::info!(
            "Scheduler stopped after {} tick(s) with score {}",
            self.state.tick_count,
            self.state.score
        );
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, KeyBindings, SpawnInterval};
    use crate::platform::input::input_channel;
    use crate::renderer::Frame;
    use crate::sim::{Coord, Entity, EntityStore, KindTag};

    fn chase_state(berry_ms: u64) -> GameState {
        let mut store = EntityStore::new();
        store.insert(Entity::player(1, Coord::new(0, 0), KeyBindings::default()));
        store.insert(Entity::enemy(2, Coord::new(0, 2), 1.0));
        let config = GameConfig {
            size: 10,
            num_coins: 0,
            num_enemies: 1,
            enemy_speed: 1.0,
            strawberry_interval_ms: SpawnInterval {
                min: berry_ms,
                max: berry_ms,
            },
            seed: Some(5),
            ..GameConfig::default()
        };
        GameState::from_layout(config, store).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_until_caught() {
        let (tx, rx) = input_channel();
        tx.send(InputEvent::new(0, "d")).unwrap();

        let mut frames: Vec<Frame> = Vec::new();
        let sink = |frame: &Frame| frames.push(frame.clone());
        let state = Scheduler::new(chase_state(1_000_000), sink).run(rx).await;

        // Player steps into (0, 1), the enemy steps onto it the same tick
        assert!(state.over);
        assert_eq!(state.tick_count, 1);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].over);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_ticks_render_until_first_key() {
        let (tx, rx) = input_channel();
        tokio::spawn(async move {
            sleep(Duration::from_millis(1_000)).await;
            tx.send(InputEvent::new(0, "d")).unwrap();
        });

        let mut frames: Vec<Frame> = Vec::new();
        let sink = |frame: &Frame| frames.push(frame.clone());
        let start = Instant::now();
        let state = Scheduler::new(chase_state(1_000_000), sink).run(rx).await;

        // Idle at 300, 600 and 900 ms, then the deciding tick at 1200 ms
        assert_eq!(frames.len(), 4);
        assert!(frames[..3].iter().all(|f| !f.started && f.tick == 0));
        assert!(frames[3].over);
        assert_eq!(state.tick_count, 1);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1_200) && elapsed < Duration::from_millis(1_300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_strawberry_timer_spawns_while_running() {
        let (tx, rx) = input_channel();
        tx.send(InputEvent::new(0, "x")).unwrap();
        tx.send(InputEvent::new(0, "w")).unwrap();

        let mut state = chase_state(500);
        // Park the enemy where it cannot reach the player
        state.store.enemies_mut()[0].speed = 0.0;

        let mut frames: Vec<Frame> = Vec::new();
        let sink = |frame: &Frame| frames.push(frame.clone());
        let run = Scheduler::new(state, sink).run(rx);
        let finished = tokio::time::timeout(Duration::from_millis(1_000), run).await;

        assert!(finished.is_err());
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|f| f.started));
        let berries = |f: &Frame| {
            f.sprites
                .iter()
                .filter(|s| s.kind == KindTag::Strawberry)
                .count()
        };
        assert_eq!(berries(&frames[0]), 0);
        assert_eq!(berries(&frames[1]), 1);
        assert_eq!(berries(&frames[2]), 1);
    }
}
