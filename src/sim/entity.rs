//! Entity data model
//!
//! A single closed set of kinds sharing one attribute record. Kind-specific
//! state lives in the `EntityKind` payload; everything else is a plain field.

use serde::Serialize;

use super::torus::Coord;
use crate::config::KeyBindings;
use crate::consts::INFINITE_LIFETIME;

/// Stable identifier, unique within one game
pub type EntityId = u32;

/// Input binding and buffered input for a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Controls {
    /// Most recent raw key since the last tick (collapses repeated presses)
    pub last_key: Option<String>,
    pub bindings: KeyBindings,
}

impl Controls {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            last_key: None,
            bindings,
        }
    }
}

/// What an entity is, with kind-specific state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EntityKind {
    Player(Controls),
    Enemy,
    Coin,
    Strawberry,
    Wall,
    Floor,
    Door,
    Stairs,
}

/// Payload-free mirror of `EntityKind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KindTag {
    Player,
    Enemy,
    Coin,
    Strawberry,
    Wall,
    Floor,
    Door,
    Stairs,
}

impl EntityKind {
    pub fn tag(&self) -> KindTag {
        match self {
            EntityKind::Player(_) => KindTag::Player,
            EntityKind::Enemy => KindTag::Enemy,
            EntityKind::Coin => KindTag::Coin,
            EntityKind::Strawberry => KindTag::Strawberry,
            EntityKind::Wall => KindTag::Wall,
            EntityKind::Floor => KindTag::Floor,
            EntityKind::Door => KindTag::Door,
            EntityKind::Stairs => KindTag::Stairs,
        }
    }
}

const PLAYER_STYLES: &[&str] = &["player"];
const ENEMY_STYLES: &[&str] = &["enemy"];
const COIN_STYLES: &[&str] = &["coin"];
const STRAWBERRY_STYLES: &[&str] = &["strawberry"];
const WALL_STYLES: &[&str] = &["wall"];
const FLOOR_STYLES: &[&str] = &["floor"];
const DOOR_CLOSED_STYLES: &[&str] = &["door"];
const DOOR_OPEN_STYLES: &[&str] = &["door", "door-open"];
const STAIRS_STYLES: &[&str] = &["stairs"];

/// A live entity on the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Coord,
    /// Other blocking-respecting moves cannot enter this cell
    pub blocking: bool,
    pub carryable: bool,
    pub weight: f32,
    /// Ticks left to live; `-1` is infinite
    pub lifetime: i32,
    /// Probability in `[0, 1]` that a requested move is applied
    pub speed: f32,
    /// Visual tags for the renderer
    pub styles: &'static [&'static str],
}

impl Entity {
    #[allow(clippy::too_many_arguments)]
    fn with_attributes(
        id: EntityId,
        kind: EntityKind,
        position: Coord,
        blocking: bool,
        carryable: bool,
        weight: f32,
        lifetime: i32,
        speed: f32,
        styles: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            kind,
            position,
            blocking,
            carryable,
            weight,
            lifetime,
            speed,
            styles,
        }
    }

    pub fn player(id: EntityId, position: Coord, bindings: KeyBindings) -> Self {
        Self::with_attributes(
            id,
            EntityKind::Player(Controls::new(bindings)),
            position,
            false,
            false,
            1.0,
            INFINITE_LIFETIME,
            1.0,
            PLAYER_STYLES,
        )
    }

    pub fn enemy(id: EntityId, position: Coord, speed: f32) -> Self {
        Self::with_attributes(
            id,
            EntityKind::Enemy,
            position,
            true,
            false,
            1000.0,
            INFINITE_LIFETIME,
            speed,
            ENEMY_STYLES,
        )
    }

    pub fn coin(id: EntityId, position: Coord, lifetime: i32) -> Self {
        Self::with_attributes(
            id,
            EntityKind::Coin,
            position,
            false,
            true,
            0.0,
            lifetime,
            0.0,
            COIN_STYLES,
        )
    }

    pub fn strawberry(id: EntityId, position: Coord) -> Self {
        Self::with_attributes(
            id,
            EntityKind::Strawberry,
            position,
            false,
            true,
            0.0,
            INFINITE_LIFETIME,
            0.0,
            STRAWBERRY_STYLES,
        )
    }

    pub fn wall(id: EntityId, position: Coord) -> Self {
        Self::with_attributes(
            id,
            EntityKind::Wall,
            position,
            true,
            false,
            -1.0,
            INFINITE_LIFETIME,
            0.0,
            WALL_STYLES,
        )
    }

    pub fn floor(id: EntityId, position: Coord) -> Self {
        Self::with_attributes(
            id,
            EntityKind::Floor,
            position,
            false,
            false,
            -1.0,
            INFINITE_LIFETIME,
            0.0,
            FLOOR_STYLES,
        )
    }

    /// Doors start closed (blocking)
    pub fn door(id: EntityId, position: Coord) -> Self {
        Self::with_attributes(
            id,
            EntityKind::Door,
            position,
            true,
            false,
            -1.0,
            INFINITE_LIFETIME,
            0.0,
            DOOR_CLOSED_STYLES,
        )
    }

    pub fn stairs(id: EntityId, position: Coord) -> Self {
        Self::with_attributes(
            id,
            EntityKind::Stairs,
            position,
            false,
            false,
            -1.0,
            INFINITE_LIFETIME,
            0.0,
            STAIRS_STYLES,
        )
    }

    #[inline]
    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    #[inline]
    pub fn is_carryable(&self) -> bool {
        self.carryable
    }

    pub fn is_immortal(&self) -> bool {
        self.lifetime == INFINITE_LIFETIME
    }

    /// Controls, if this is a player
    pub fn controls(&self) -> Option<&Controls> {
        match &self.kind {
            EntityKind::Player(controls) => Some(controls),
            _ => None,
        }
    }

    pub fn controls_mut(&mut self) -> Option<&mut Controls> {
        match &mut self.kind {
            EntityKind::Player(controls) => Some(controls),
            _ => None,
        }
    }

    /// Open a door. Returns false for anything that is not a door.
    pub fn open(&mut self) -> bool {
        if self.tag() != KindTag::Door {
            return false;
        }
        self.blocking = false;
        self.styles = DOOR_OPEN_STYLES;
        true
    }

    /// Close a door. Returns false for anything that is not a door.
    pub fn close(&mut self) -> bool {
        if self.tag() != KindTag::Door {
            return false;
        }
        self.blocking = true;
        self.styles = DOOR_CLOSED_STYLES;
        true
    }
}
