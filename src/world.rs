//! Storage for the objects scrolling through a session.
use glam::Vec3;
use hashbrown::HashMap;
use log::trace;

use crate::entity::{ObjectId, ObjectTag, WorldObject};
use crate::focus::{FocusObject, ObjectLookup};

/// Objects keyed by a monotonically increasing id.
///
/// Ids are never reused within a store, so a stale id held by the focus
/// queue can only ever resolve to the object it was issued for.
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
    objects: HashMap<ObjectId, WorldObject>,
    next_id: u32,
}

impl ObjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object and returns its id.
    pub fn spawn(&mut self, tag: ObjectTag, position: Vec3, velocity: Vec3, size: Vec3) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        trace!("spawned {id:?} as {tag:?} at {position}");
        self.objects
            .insert(id, WorldObject::new(tag, position, velocity, size));
        id
    }

    /// Object with `id`, if present.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.get(&id)
    }

    /// Mutable access to the object with `id`.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut WorldObject> {
        self.objects.get_mut(&id)
    }

    /// Removes and returns the object with `id`.
    pub fn remove(&mut self, id: ObjectId) -> Option<WorldObject> {
        self.objects.remove(&id)
    }

    /// Every object with its id, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &WorldObject)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    /// Every object, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut WorldObject)> {
        self.objects.iter_mut().map(|(id, object)| (*id, object))
    }

    /// Number of stored objects, including inactive ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects still in play.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.objects.values().filter(|o| o.is_active()).count()
    }

    /// Drops every object that is out of play.
    pub fn prune_inactive(&mut self) {
        self.objects.retain(|_, object| object.is_active());
    }

    /// Removes every object. Ids keep counting up.
    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

impl ObjectLookup for ObjectStore {
    fn focus_object(&self, id: ObjectId) -> Option<FocusObject> {
        self.get(id).map(|object| FocusObject {
            id,
            tag: object.tag,
            position: object.position,
            extent: object.extent(),
            velocity: object.velocity,
            contacted: object.contacted,
        })
    }
}
