//! The autonomous companion on the other end of the leash.
use glam::Vec3;

use crate::agent::Agent;
use crate::config::{AgentTuning, ConfigError};
use crate::focus::{CompanionView, FocusQueue, TargetCommand};
use crate::lane::LaneBounds;

/// Companion agent and the queue of objects it attends to.
#[derive(Debug, Clone, PartialEq)]
pub struct Companion {
    /// Controlled body.
    pub agent: Agent,
    /// Objects awaiting attention.
    pub focus: FocusQueue,
}

impl Companion {
    /// Creates an idle companion at `position`.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigError`] from invalid tuning.
    pub fn new(position: Vec3, tuning: &AgentTuning) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: Agent::new(position, tuning)?,
            focus: FocusQueue::new(),
        })
    }

    /// Snapshot handed to focus routines.
    #[must_use]
    pub fn view(&self, lane: LaneBounds, avoid_buffer: f32) -> CompanionView {
        CompanionView {
            x: self.agent.x(),
            extent: self.agent.extent(),
            max_speed: self.agent.max_speed(),
            lane,
            avoid_buffer,
        }
    }

    /// Applies a routine's decision to the target.
    pub fn apply(&mut self, command: TargetCommand) {
        match command {
            TargetCommand::Unchanged => {}
            TargetCommand::Hold => self.agent.hold(),
            TargetCommand::SetX(x) => self.agent.set_target_x(x),
        }
    }
}
