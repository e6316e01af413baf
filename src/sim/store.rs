//! Categorized ownership of every live entity
//!
//! Each entity lives in exactly one collection, chosen by its kind on insert.
//! `all()` is the disjoint union in a fixed order.

use super::entity::{Entity, EntityId, KindTag};
use super::torus::{Bounds, Coord};

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    players: Vec<Entity>,
    enemies: Vec<Entity>,
    coins: Vec<Entity>,
    strawberries: Vec<Entity>,
    walls: Vec<Entity>,
    floors: Vec<Entity>,
    doors: Vec<Entity>,
    stairs: Vec<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, kind: KindTag) -> &Vec<Entity> {
        match kind {
            KindTag::Player => &self.players,
            KindTag::Enemy => &self.enemies,
            KindTag::Coin => &self.coins,
            KindTag::Strawberry => &self.strawberries,
            KindTag::Wall => &self.walls,
            KindTag::Floor => &self.floors,
            KindTag::Door => &self.doors,
            KindTag::Stairs => &self.stairs,
        }
    }

    fn collection_mut(&mut self, kind: KindTag) -> &mut Vec<Entity> {
        match kind {
            KindTag::Player => &mut self.players,
            KindTag::Enemy => &mut self.enemies,
            KindTag::Coin => &mut self.coins,
            KindTag::Strawberry => &mut self.strawberries,
            KindTag::Wall => &mut self.walls,
            KindTag::Floor => &mut self.floors,
            KindTag::Door => &mut self.doors,
            KindTag::Stairs => &mut self.stairs,
        }
    }

    /// Add an entity to the collection matching its kind
    pub fn insert(&mut self, entity: Entity) {
        self.collection_mut(entity.tag()).push(entity);
    }

    /// Remove an entity by id from whichever collection holds it
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        [
            &mut self.players,
            &mut self.enemies,
            &mut self.coins,
            &mut self.strawberries,
            &mut self.walls,
            &mut self.floors,
            &mut self.doors,
            &mut self.stairs,
        ]
        .into_iter()
        .find_map(|list| {
            list.iter()
                .position(|e| e.id == id)
                .map(|index| list.remove(index))
        })
    }

    /// Entities of one kind, in insertion order
    pub fn of_kind(&self, kind: KindTag) -> &[Entity] {
        self.collection(kind)
    }

    pub fn players(&self) -> &[Entity] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Entity] {
        &mut self.players
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Entity] {
        &mut self.enemies
    }

    pub fn coins(&self) -> &[Entity] {
        &self.coins
    }

    pub fn strawberries(&self) -> &[Entity] {
        &self.strawberries
    }

    pub fn walls(&self) -> &[Entity] {
        &self.walls
    }

    pub fn floors(&self) -> &[Entity] {
        &self.floors
    }

    pub fn doors(&self) -> &[Entity] {
        &self.doors
    }

    pub fn doors_mut(&mut self) -> &mut [Entity] {
        &mut self.doors
    }

    pub fn stairs(&self) -> &[Entity] {
        &self.stairs
    }

    /// Every live entity: players, enemies, coins, strawberries, walls, floors, doors, stairs
    pub fn all(&self) -> impl Iterator<Item = &Entity> + Clone {
        self.players
            .iter()
            .chain(&self.enemies)
            .chain(&self.coins)
            .chain(&self.strawberries)
            .chain(&self.walls)
            .chain(&self.floors)
            .chain(&self.doors)
            .chain(&self.stairs)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.all().find(|e| e.id == id)
    }

    /// Everything occupying `position`
    pub fn entities_at(&self, position: Coord) -> impl Iterator<Item = &Entity> {
        self.all().filter(move |e| e.position == position)
    }

    /// Everything inside an inclusive rectangle
    pub fn entities_in_area(&self, area: Bounds) -> impl Iterator<Item = &Entity> {
        self.all().filter(move |e| area.contains(e.position))
    }

    pub fn len(&self) -> usize {
        [
            &self.players,
            &self.enemies,
            &self.coins,
            &self.strawberries,
            &self.walls,
            &self.floors,
            &self.doors,
            &self.stairs,
        ]
        .iter()
        .map(|list| list.len())
        .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
