//! Render snapshots

use serde::Serialize;

use crate::sim::{Coord, EntityId, GameState, KindTag};

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub id: EntityId,
    pub kind: KindTag,
    pub position: Coord,
    pub styles: &'static [&'static str],
}

/// Everything a renderer needs from one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub score: u64,
    pub started: bool,
    pub over: bool,
    pub reversed: bool,
    pub size: i32,
    pub sprites: Vec<Sprite>,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let sprites = state
            .store
            .all()
            .map(|entity| Sprite {
                id: entity.id,
                kind: entity.tag(),
                position: entity.position,
                styles: entity.styles,
            })
            .collect();

        Self {
            tick: state.tick_count,
            score: state.score,
            started: state.started,
            over: state.over,
            reversed: state.enemies_reversed(),
            size: state.config().size,
            sprites,
        }
    }

    /// Sprites standing on `cell`
    pub fn sprites_at(&self, cell: Coord) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter().filter(move |s| s.position == cell)
    }
}

impl GameState {
    /// Snapshot the current state for rendering
    pub fn frame(&self) -> Frame {
        Frame::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, KeyBindings};
    use crate::sim::{Entity, EntityStore};

    #[test]
    fn test_capture_lists_every_entity() {
        let mut store = EntityStore::new();
        store.insert(Entity::player(1, Coord::new(0, 0), KeyBindings::default()));
        store.insert(Entity::enemy(2, Coord::new(1, 1), 1.0));
        store.insert(Entity::wall(3, Coord::new(2, 2)));
        let config = GameConfig {
            size: 4,
            num_coins: 0,
            num_enemies: 0,
            seed: Some(1),
            ..GameConfig::default()
        };
        let mut state = GameState::from_layout(config, store).unwrap();
        state.reversed_timer = 3;
        state.score = 7;

        let frame = state.frame();
        assert_eq!(frame.size, 4);
        assert_eq!(frame.score, 7);
        assert!(frame.reversed);
        assert!(!frame.started);
        assert_eq!(frame.sprites.len(), 3);
        assert_eq!(frame.sprites[0].kind, KindTag::Player);
        assert_eq!(frame.sprites_at(Coord::new(1, 1)).count(), 1);
        assert_eq!(frame.sprites_at(Coord::new(3, 3)).count(), 0);
    }
}
