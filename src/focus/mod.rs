//! Sequential focus queue driving the companion's autonomous targeting.
//!
//! Objects are processed strictly one at a time in enqueue order. The
//! active routine is stepped once per frame and yields a [`TargetCommand`]
//! for the companion. The queue advances when the routine terminates, the
//! object disappears, or the object scrolls past the companion.
pub mod avoid;
pub mod pursue;

use std::collections::VecDeque;

use glam::Vec3;
use log::{debug, warn};
use rand::Rng;

use crate::entity::{FocusClass, ObjectId, ObjectTag};
use crate::geometry::Extent;
use crate::lane::LaneBounds;

pub use avoid::{AvoidRoutine, AvoidSide, AvoidState, EscapePositions};
pub use pursue::{is_reachable, PursuitRoutine, PursuitState};

/// What the companion is doing, as seen by a routine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompanionView {
    /// Live lateral coordinate.
    pub x: f32,
    /// Current bounding box.
    pub extent: Extent,
    /// Maximum lateral speed.
    pub max_speed: f32,
    /// Lane the companion is confined to.
    pub lane: LaneBounds,
    /// Clearance kept when escaping an obstacle.
    pub avoid_buffer: f32,
}

/// Snapshot of a world object taken for one routine step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusObject {
    /// Handle of the object.
    pub id: ObjectId,
    /// Classification at snapshot time.
    pub tag: ObjectTag,
    /// Centre of the bounding box.
    pub position: Vec3,
    /// Bounding box.
    pub extent: Extent,
    /// Scroll velocity.
    pub velocity: Vec3,
    /// Whether the companion has ever touched it.
    pub contacted: bool,
}

/// Effect of one routine step on the companion's target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetCommand {
    /// Leave the target as it is.
    Unchanged,
    /// Retarget onto the companion's own position.
    Hold,
    /// Move the lateral target to the given coordinate.
    SetX(f32),
}

/// Source of object snapshots for the queue.
pub trait ObjectLookup {
    /// Snapshot of `id`, or `None` once it no longer exists.
    fn focus_object(&self, id: ObjectId) -> Option<FocusObject>;
}

/// Routine attached to the object in focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    /// Steering clear of an obstacle.
    Avoid(AvoidRoutine),
    /// Chasing waste.
    Pursue(PursuitRoutine),
}

impl Routine {
    const fn for_class(class: FocusClass) -> Self {
        match class {
            FocusClass::Avoid => Self::Avoid(AvoidRoutine::new()),
            FocusClass::Seek => Self::Pursue(PursuitRoutine::new()),
        }
    }

    /// Whether the routine has given up on its object.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        match self {
            Self::Avoid(routine) => routine.state() == AvoidState::Terminated,
            Self::Pursue(routine) => routine.state() == PursuitState::Terminated,
        }
    }
}

/// The object currently in focus and its routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTask {
    /// Object being handled.
    pub object: ObjectId,
    /// Routine handling it.
    pub routine: Routine,
}

/// FIFO of objects awaiting the companion's attention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusQueue {
    pending: VecDeque<ObjectId>,
    current: Option<FocusTask>,
    obstacles_cleared: u32,
}

impl FocusQueue {
    /// Creates an idle, empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` and starts on it straight away if nothing is in focus.
    ///
    /// A busy queue is never preempted.
    pub fn enqueue<L: ObjectLookup + ?Sized>(&mut self, id: ObjectId, lookup: &L) {
        self.pending.push_back(id);
        if self.current.is_none() {
            self.process_next(lookup);
        }
    }

    /// Drops the current task and dispatches the next classifiable object.
    ///
    /// Ids that no longer resolve, or whose tag has no focus class, are
    /// skipped. The queue goes idle once nothing is left.
    pub fn process_next<L: ObjectLookup + ?Sized>(&mut self, lookup: &L) {
        self.current = None;
        while let Some(id) = self.pending.pop_front() {
            let Some(object) = lookup.focus_object(id) else {
                debug!("skipping {id:?}: no longer in the world");
                continue;
            };
            let Some(class) = object.tag.focus_class() else {
                warn!("skipping {id:?}: {:?} has no focus class", object.tag);
                continue;
            };
            debug!("focusing on {id:?} ({class:?})");
            self.current = Some(FocusTask {
                object: id,
                routine: Routine::for_class(class),
            });
            return;
        }
    }

    /// Steps the routine in focus by one frame.
    ///
    /// Advances the queue when the object is gone, has scrolled behind the
    /// companion or its routine has terminated. A passed avoid-class object
    /// that never touched the companion counts as cleared.
    pub fn step<L, R>(
        &mut self,
        companion: &CompanionView,
        lookup: &L,
        rng: &mut R,
    ) -> TargetCommand
    where
        L: ObjectLookup + ?Sized,
        R: Rng + ?Sized,
    {
        let Some(task) = self.current.as_mut() else {
            return TargetCommand::Unchanged;
        };
        let Some(object) = lookup.focus_object(task.object) else {
            debug!("{:?} vanished while in focus", task.object);
            self.process_next(lookup);
            return TargetCommand::Unchanged;
        };

        if object.extent.is_behind(&companion.extent) {
            if matches!(task.routine, Routine::Avoid(_)) && !object.contacted {
                self.obstacles_cleared += 1;
            }
            debug!("{:?} passed the companion", object.id);
            self.process_next(lookup);
            return TargetCommand::Unchanged;
        }

        let command = match &mut task.routine {
            Routine::Avoid(routine) => routine.step(&object, companion, rng),
            Routine::Pursue(routine) => routine.step(&object, companion),
        };
        if task.routine.is_terminated() {
            self.process_next(lookup);
        }
        command
    }

    /// Abandons the current routine and every pending object.
    pub fn cancel(&mut self) {
        self.pending.clear();
        self.current = None;
    }

    /// Whether an object is in focus.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// Task in focus.
    #[must_use]
    pub const fn current(&self) -> Option<&FocusTask> {
        self.current.as_ref()
    }

    /// Number of objects waiting behind the current one.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Avoid-class objects that scrolled past without touching the
    /// companion.
    #[must_use]
    pub const fn obstacles_cleared(&self) -> u32 {
        self.obstacles_cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Objects(HashMap<ObjectId, FocusObject>);

    impl Objects {
        fn put(&mut self, raw: u32, tag: ObjectTag, x: f32, z: f32) -> ObjectId {
            let id = ObjectId(raw);
            let position = Vec3::new(x, 0.0, z);
            self.0.insert(
                id,
                FocusObject {
                    id,
                    tag,
                    position,
                    extent: Extent::from_centre(position, Vec3::ONE),
                    velocity: Vec3::new(0.0, 0.0, -2.0),
                    contacted: false,
                },
            );
            id
        }

        fn object_mut(&mut self, id: ObjectId) -> &mut FocusObject {
            self.0
                .get_mut(&id)
                .unwrap_or_else(|| panic!("{id:?} should exist"))
        }
    }

    impl ObjectLookup for Objects {
        fn focus_object(&self, id: ObjectId) -> Option<FocusObject> {
            self.0.get(&id).copied()
        }
    }

    fn companion() -> CompanionView {
        CompanionView {
            x: 0.0,
            extent: Extent::from_centre(Vec3::new(0.0, 0.0, 2.0), Vec3::splat(0.5)),
            max_speed: 3.0,
            lane: LaneBounds::default(),
            avoid_buffer: 0.1,
        }
    }

    #[test]
    fn first_enqueue_dispatches_immediately() {
        let mut objects = Objects::default();
        let id = objects.put(1, ObjectTag::Waste, 1.0, 6.0);
        let mut queue = FocusQueue::new();
        queue.enqueue(id, &objects);
        assert!(queue.is_busy());
        assert_eq!(queue.pending_len(), 0);
        assert!(matches!(
            queue.current().map(|task| task.routine),
            Some(Routine::Pursue(_))
        ));
    }

    #[test]
    fn busy_queue_is_not_preempted() {
        let mut objects = Objects::default();
        let first = objects.put(1, ObjectTag::Obstacle, 0.0, 6.0);
        let second = objects.put(2, ObjectTag::Waste, 1.0, 8.0);
        let mut queue = FocusQueue::new();
        queue.enqueue(first, &objects);
        queue.enqueue(second, &objects);
        assert_eq!(queue.current().map(|task| task.object), Some(first));
        assert_eq!(queue.pending_len(), 1);
    }

    #[test]
    fn unclassified_and_missing_ids_are_skipped() {
        let mut objects = Objects::default();
        let inactive = objects.put(1, ObjectTag::Inactive, 0.0, 6.0);
        let waste = objects.put(3, ObjectTag::Waste, 1.0, 8.0);
        let mut queue = FocusQueue::new();
        queue.enqueue(ObjectId(99), &objects);
        assert!(!queue.is_busy());
        queue.cancel();
        queue.pending.extend([inactive, ObjectId(42), waste]);
        queue.process_next(&objects);
        assert_eq!(queue.current().map(|task| task.object), Some(waste));
    }

    #[test]
    fn passed_obstacle_advances_and_counts_as_cleared() {
        let mut objects = Objects::default();
        let obstacle = objects.put(1, ObjectTag::Obstacle, 2.5, 6.0);
        let waste = objects.put(2, ObjectTag::Waste, 0.5, 9.0);
        let mut queue = FocusQueue::new();
        let mut rng = StdRng::seed_from_u64(1);
        queue.enqueue(obstacle, &objects);
        queue.enqueue(waste, &objects);

        assert_eq!(queue.step(&companion(), &objects, &mut rng), TargetCommand::Hold);
        objects.object_mut(obstacle).extent =
            Extent::from_centre(Vec3::new(2.5, 0.0, 0.0), Vec3::ONE);
        assert_eq!(
            queue.step(&companion(), &objects, &mut rng),
            TargetCommand::Unchanged
        );
        assert_eq!(queue.obstacles_cleared(), 1);
        assert_eq!(queue.current().map(|task| task.object), Some(waste));
    }

    #[test]
    fn touched_obstacle_is_not_cleared() {
        let mut objects = Objects::default();
        let obstacle = objects.put(1, ObjectTag::Pole, 2.5, 0.0);
        objects.object_mut(obstacle).contacted = true;
        let mut queue = FocusQueue::new();
        let mut rng = StdRng::seed_from_u64(1);
        queue.enqueue(obstacle, &objects);
        queue.step(&companion(), &objects, &mut rng);
        assert_eq!(queue.obstacles_cleared(), 0);
        assert!(!queue.is_busy());
    }

    #[test]
    fn collected_waste_terminates_its_routine() {
        let mut objects = Objects::default();
        let waste = objects.put(1, ObjectTag::Waste, 0.5, 6.0);
        let mut queue = FocusQueue::new();
        let mut rng = StdRng::seed_from_u64(1);
        queue.enqueue(waste, &objects);
        objects.object_mut(waste).tag = ObjectTag::Inactive;
        assert_eq!(
            queue.step(&companion(), &objects, &mut rng),
            TargetCommand::Unchanged
        );
        assert!(!queue.is_busy());
    }

    #[test]
    fn vanished_object_advances() {
        let mut objects = Objects::default();
        let waste = objects.put(1, ObjectTag::Waste, 0.5, 6.0);
        let obstacle = objects.put(2, ObjectTag::Obstacle, 0.0, 8.0);
        let mut queue = FocusQueue::new();
        let mut rng = StdRng::seed_from_u64(1);
        queue.enqueue(waste, &objects);
        queue.enqueue(obstacle, &objects);
        objects.0.remove(&waste);
        queue.step(&companion(), &objects, &mut rng);
        assert_eq!(queue.current().map(|task| task.object), Some(obstacle));
    }

    #[test]
    fn cancel_drops_everything() {
        let mut objects = Objects::default();
        let first = objects.put(1, ObjectTag::Obstacle, 0.0, 6.0);
        let second = objects.put(2, ObjectTag::Waste, 1.0, 8.0);
        let mut queue = FocusQueue::new();
        queue.enqueue(first, &objects);
        queue.enqueue(second, &objects);
        queue.cancel();
        assert!(!queue.is_busy());
        assert_eq!(queue.pending_len(), 0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            queue.step(&companion(), &objects, &mut rng),
            TargetCommand::Unchanged
        );
    }
}
