use tank_engine::{Graphics, Rect, Texture};
use tracing::warn;

use crate::app::assets::Assets;
use crate::app::capacity::CapacityExceeded;

pub(crate) const MAX_ENTITIES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EntityKind {
    Wall,
    // No level directive places these yet.
    #[allow(dead_code)]
    Enemy,
    #[allow(dead_code)]
    Goal,
}

impl EntityKind {
    // Enemy and goal borrow the wall art until they have their own.
    pub(crate) const fn texture_key(self) -> &'static str {
        match self {
            EntityKind::Wall | EntityKind::Enemy | EntityKind::Goal => "res/ent/wall.png",
        }
    }

    pub(crate) const fn draw_size(self) -> (i32, i32) {
        match self {
            EntityKind::Wall | EntityKind::Enemy | EntityKind::Goal => (64, 64),
        }
    }
}

/// Slot index into the entity table; stays valid after removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct EntityId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EntitySpawn {
    pub(crate) kind: EntityKind,
    pub(crate) health: u8,
    pub(crate) can_damage: bool,
    pub(crate) x: i32,
    pub(crate) y: i32,
    /// Quarter turns, 0..=3.
    pub(crate) orientation: u8,
}

#[derive(Debug)]
pub(crate) struct Entity {
    pub(crate) kind: EntityKind,
    #[allow(dead_code)]
    pub(crate) health: u8,
    pub(crate) can_damage: bool,
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) orientation: u8,
    removed: bool,
    texture: Option<Texture>,
}

impl Entity {
    fn dest_rect(&self) -> Rect {
        let (w, h) = self.kind.draw_size();
        Rect::new(self.x, self.y, w, h)
    }

    fn rotation_degrees(&self) -> f64 {
        f64::from(self.orientation) * 90.0
    }
}

/// Entity table with soft deletion.
///
/// Removed entities keep their slot so `EntityId`s never shift. Capacity is
/// counted in slots, not live entities.
#[derive(Debug)]
pub(crate) struct EntityStore {
    slots: Vec<Entity>,
    live_count: usize,
    capacity: usize,
}

impl EntityStore {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            live_count: 0,
            capacity,
        }
    }

    pub(crate) fn add(
        &mut self,
        gfx: &mut dyn Graphics,
        assets: &mut Assets,
        spawn: EntitySpawn,
    ) -> Result<EntityId, CapacityExceeded> {
        if self.slots.len() >= self.capacity {
            warn!(
                kind = ?spawn.kind,
                capacity = self.capacity,
                "entity_rejected_capacity"
            );
            return Err(CapacityExceeded {
                what: "entity",
                capacity: self.capacity,
            });
        }

        let (w, h) = spawn.kind.draw_size();
        let texture =
            assets.load_or_placeholder(gfx, spawn.kind.texture_key(), w as u32, h as u32);
        let id = EntityId(self.slots.len());
        self.slots.push(Entity {
            kind: spawn.kind,
            health: spawn.health,
            can_damage: spawn.can_damage,
            x: spawn.x,
            y: spawn.y,
            orientation: spawn.orientation,
            removed: false,
            texture: Some(texture),
        });
        self.live_count += 1;
        Ok(id)
    }

    pub(crate) fn iter_live(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, entity)| !entity.removed)
            .map(|(index, entity)| (EntityId(index), entity))
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live_count
    }

    pub(crate) fn render(&self, gfx: &mut dyn Graphics) {
        for (_, entity) in self.iter_live() {
            if let Some(texture) = &entity.texture {
                gfx.draw_textured_rect(texture, None, entity.dest_rect(), entity.rotation_degrees());
            }
        }
    }

    pub(crate) fn destroy(self, gfx: &mut dyn Graphics) {
        for texture in self.slots.into_iter().filter_map(|entity| entity.texture) {
            gfx.release(texture);
        }
    }
}

// Editing API with no in-game trigger yet.
#[allow(dead_code)]
impl EntityStore {
    /// Marks the entity removed and releases its texture. Returns false for
    /// unknown or already removed ids.
    pub(crate) fn remove(&mut self, gfx: &mut dyn Graphics, id: EntityId) -> bool {
        let Some(entity) = self.slots.get_mut(id.0) else {
            return false;
        };
        if entity.removed {
            return false;
        }
        entity.removed = true;
        if let Some(texture) = entity.texture.take() {
            gfx.release(texture);
        }
        self.live_count -= 1;
        true
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id.0).filter(|entity| !entity.removed)
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::RecordingGraphics;

    fn wall_at(x: i32, y: i32, orientation: u8) -> EntitySpawn {
        EntitySpawn {
            kind: EntityKind::Wall,
            health: 100,
            can_damage: false,
            x,
            y,
            orientation,
        }
    }

    #[test]
    fn add_returns_sequential_ids_and_counts_live() {
        let mut gfx = RecordingGraphics::new();
        let mut assets = Assets::default();
        let mut store = EntityStore::new(MAX_ENTITIES);

        let first = store.add(&mut gfx, &mut assets, wall_at(0, 0, 0)).expect("first");
        let second = store.add(&mut gfx, &mut assets, wall_at(64, 0, 1)).expect("second");

        assert_eq!((first, second), (EntityId(0), EntityId(1)));
        assert_eq!(store.live_count(), 2);
        assert_eq!(gfx.live_count(), 2);
        store.destroy(&mut gfx);
        assert_eq!(gfx.live_count(), 0);
    }

    #[test]
    fn rejected_add_leaves_store_untouched() {
        let mut gfx = RecordingGraphics::new();
        let mut assets = Assets::default();
        let mut store = EntityStore::new(2);
        store.add(&mut gfx, &mut assets, wall_at(0, 0, 0)).expect("first");
        store.add(&mut gfx, &mut assets, wall_at(1, 0, 0)).expect("second");

        let error = store
            .add(&mut gfx, &mut assets, wall_at(2, 0, 0))
            .expect_err("full");

        assert_eq!(
            error,
            CapacityExceeded {
                what: "entity",
                capacity: 2
            }
        );
        assert_eq!(store.live_count(), 2);
        assert_eq!(store.slot_count(), 2);
        assert_eq!(gfx.live_count(), 2);
        store.destroy(&mut gfx);
    }

    #[test]
    fn live_count_never_exceeds_capacity() {
        let mut gfx = RecordingGraphics::new();
        let mut assets = Assets::default();
        let mut store = EntityStore::new(MAX_ENTITIES);

        for i in 0..(MAX_ENTITIES + 25) {
            let _ = store.add(&mut gfx, &mut assets, wall_at(i as i32, 0, 0));
            assert!(store.live_count() <= MAX_ENTITIES);
        }

        assert_eq!(store.live_count(), MAX_ENTITIES);
        store.destroy(&mut gfx);
        assert_eq!(gfx.live_count(), 0);
    }

    #[test]
    fn removed_slots_still_count_toward_capacity() {
        let mut gfx = RecordingGraphics::new();
        let mut assets = Assets::default();
        let mut store = EntityStore::new(1);
        let id = store.add(&mut gfx, &mut assets, wall_at(0, 0, 0)).expect("add");

        assert!(store.remove(&mut gfx, id));

        assert!(store.add(&mut gfx, &mut assets, wall_at(0, 0, 0)).is_err());
        assert_eq!(store.live_count(), 0);
        store.destroy(&mut gfx);
    }

    #[test]
    fn remove_releases_texture_once_and_hides_entity() {
        let mut gfx = RecordingGraphics::new();
        let mut assets = Assets::default();
        let mut store = EntityStore::new(MAX_ENTITIES);
        let keep = store.add(&mut gfx, &mut assets, wall_at(0, 0, 0)).expect("keep");
        let gone = store.add(&mut gfx, &mut assets, wall_at(100, 0, 0)).expect("gone");

        assert!(store.remove(&mut gfx, gone));
        assert!(!store.remove(&mut gfx, gone));
        assert!(!store.remove(&mut gfx, EntityId(99)));

        assert_eq!(store.live_count(), 1);
        assert_eq!(gfx.releases, 1);
        assert!(store.get(gone).is_none());
        assert!(store.get(keep).is_some());

        store.render(&mut gfx);
        assert_eq!(gfx.draws.len(), 1);
        assert_eq!(gfx.draws[0].dest, Rect::new(0, 0, 64, 64));

        store.destroy(&mut gfx);
        assert_eq!(gfx.live_count(), 0);
        assert_eq!(gfx.releases, 2);
    }

    #[test]
    fn render_rotates_by_quarter_turns() {
        let mut gfx = RecordingGraphics::new();
        let mut assets = Assets::default();
        let mut store = EntityStore::new(MAX_ENTITIES);
        store.add(&mut gfx, &mut assets, wall_at(10, 20, 3)).expect("add");

        store.render(&mut gfx);

        assert_eq!(gfx.draws[0].rotation, 270.0);
        assert_eq!(gfx.draws[0].label, "res/ent/wall.png");
        store.destroy(&mut gfx);
    }

    #[test]
    fn iteration_skips_removed_and_keeps_ids_stable() {
        let mut gfx = RecordingGraphics::new();
        let mut assets = Assets::default();
        let mut store = EntityStore::new(MAX_ENTITIES);
        for x in 0..3 {
            store.add(&mut gfx, &mut assets, wall_at(x, 0, 0)).expect("add");
        }

        store.remove(&mut gfx, EntityId(1));

        let ids: Vec<EntityId> = store.iter_live().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![EntityId(0), EntityId(2)]);
        assert_eq!(store.slot_count(), 3);
        assert_eq!(store.get(EntityId(2)).map(|entity| entity.x), Some(2));
        store.destroy(&mut gfx);
    }
}
