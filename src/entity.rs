//! Scrolling world objects the companion reacts to.
use glam::Vec3;

use crate::geometry::Extent;

/// Stable handle of a world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Classification tag carried by a world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectTag {
    /// Solid obstacle, such as a bench or planter.
    Obstacle,
    /// Light pole; avoided like an obstacle.
    Pole,
    /// Dog waste the companion seeks out.
    Waste,
    /// Collected or scrolled out of play.
    Inactive,
}

/// Behaviour category a tag falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusClass {
    /// Steer clear of it.
    Avoid,
    /// Try to reach it.
    Seek,
}

impl ObjectTag {
    /// Focus category of the tag, if it has one.
    ///
    /// # Examples
    /// ```
    /// use leashline::entity::{FocusClass, ObjectTag};
    /// assert_eq!(ObjectTag::Pole.focus_class(), Some(FocusClass::Avoid));
    /// assert_eq!(ObjectTag::Inactive.focus_class(), None);
    /// ```
    #[must_use]
    pub const fn focus_class(self) -> Option<FocusClass> {
        match self {
            Self::Obstacle | Self::Pole => Some(FocusClass::Avoid),
            Self::Waste => Some(FocusClass::Seek),
            Self::Inactive => None,
        }
    }
}

/// An object scrolling down the lane.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    /// Current classification.
    pub tag: ObjectTag,
    /// Centre of the bounding box.
    pub position: Vec3,
    /// Scroll velocity.
    pub velocity: Vec3,
    /// Full bounding box size.
    pub size: Vec3,
    /// Whether the companion is currently touching it.
    pub touching_companion: bool,
    /// Whether the walker is currently touching it.
    pub touching_walker: bool,
    /// Whether the companion has touched it at any point.
    pub contacted: bool,
}

impl WorldObject {
    /// Creates an untouched object.
    #[must_use]
    pub const fn new(tag: ObjectTag, position: Vec3, velocity: Vec3, size: Vec3) -> Self {
        Self {
            tag,
            position,
            velocity,
            size,
            touching_companion: false,
            touching_walker: false,
            contacted: false,
        }
    }

    /// Current bounding box.
    #[must_use]
    pub fn extent(&self) -> Extent {
        Extent::from_centre(self.position, self.size)
    }

    /// Whether the object is still in play.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.tag != ObjectTag::Inactive
    }

    /// Takes the object out of play and stops it.
    pub fn deactivate(&mut self) {
        self.tag = ObjectTag::Inactive;
        self.velocity = Vec3::ZERO;
    }

    /// Moves the object along its velocity.
    pub fn scroll(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}
