//! One run of the chase: agents, leash, scrolling objects and scores.
//!
//! A [`Session`] is driven by two entry points mirroring an engine's
//! schedule. [`Session::frame_step`] reads input and steps the companion's
//! focus routine; [`Session::physics_step`] couples the agents through the
//! leash, integrates them and resolves collisions. [`Session::advance`]
//! interleaves both at the configured fixed timestep for headless use.
//!
//! Either agent may be absent. Everything that needs both agents is then
//! skipped for that tick.
//!
//! The run ends when its [`Health`] runs out. Walker hits and waste picked
//! up by the companion each cost a point; a pole caught on the leash
//! between the agents costs everything. A finished session ignores further
//! steps until [`Session::reset`].

use glam::Vec3;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::companion::Companion;
use crate::config::{ConfigError, SessionConfig};
use crate::drag::DragSample;
use crate::entity::{FocusClass, ObjectId, ObjectTag};
use crate::health::Health;
use crate::input::InputSource;
use crate::leash::{companion_pull_target, walker_pull_target, CompanionPull, Leash, WalkerPull};
use crate::walker::Walker;
use crate::world::ObjectStore;
use crate::{COMPANION_Z, SNAG_MARGIN, WALKER_Z};

/// Running score of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Times the companion ran into an obstacle or pole.
    pub obstacles_hit: u32,
    /// Obstacles and poles that passed without touching the companion.
    pub obstacles_cleared: u32,
    /// Waste picked up by the companion.
    pub waste_collected: u32,
    /// Times the walker ran into an obstacle or pole.
    pub walker_hits: u32,
    /// Debuffs picked up by the walker.
    pub debuffs: u32,
    /// Poles caught on the leash.
    pub snags: u32,
}

/// Where the agents start. `None` leaves an agent out of the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionBuilder {
    config: SessionConfig,
    seed: u64,
    walker: Option<Vec3>,
    companion: Option<Vec3>,
}

impl SessionBuilder {
    /// Starts from `config` with both agents at their resting positions.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            seed: 0,
            walker: Some(Vec3::new(0.0, 0.0, WALKER_Z)),
            companion: Some(Vec3::new(0.0, 0.0, COMPANION_Z)),
        }
    }

    /// Seeds the avoidance tie-break.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Places the walker, or leaves it out.
    #[must_use]
    pub const fn walker(mut self, position: Option<Vec3>) -> Self {
        self.walker = position;
        self
    }

    /// Places the companion, or leaves it out.
    #[must_use]
    pub const fn companion(mut self, position: Option<Vec3>) -> Self {
        self.companion = position;
        self
    }

    /// Validates the configuration and builds the session.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] in the configuration.
    pub fn build(self) -> Result<Session, ConfigError> {
        let config = self.config;
        config.validate()?;
        let companion_x = self.companion.map_or(0.0, |p| p.x);
        let walker = self
            .walker
            .map(|p| Walker::new(p, &config.walker, config.drag_rate, companion_x))
            .transpose()?;
        let companion = self
            .companion
            .map(|p| Companion::new(p, &config.companion))
            .transpose()?;
        Ok(Session {
            leash: Leash::new(config.leash_length)?,
            config,
            walker,
            companion,
            objects: ObjectStore::new(),
            rng: StdRng::seed_from_u64(self.seed),
            tally: Tally::default(),
            health: Health::new(config.max_health),
            accumulator: 0.0,
            elapsed: 0.0,
        })
    }
}

/// State of one chase.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    walker: Option<Walker>,
    companion: Option<Companion>,
    leash: Leash,
    objects: ObjectStore,
    rng: StdRng,
    tally: Tally,
    health: Health,
    accumulator: f32,
    elapsed: f32,
}

impl Session {
    /// Builds a session with both agents at their resting positions.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] in `config`.
    ///
    /// # Examples
    /// ```
    /// use leashline::input::PlayerInput;
    /// use leashline::{Session, SessionConfig};
    /// let mut session = Session::new(SessionConfig::default(), 3).unwrap();
    /// session.advance(&mut PlayerInput::walking(1.0), 1.0);
    /// assert!(session.walker().map_or(0.0, |w| w.agent.x()) > 0.0);
    /// ```
    pub fn new(config: SessionConfig, seed: u64) -> Result<Self, ConfigError> {
        SessionBuilder::new(config).seed(seed).build()
    }

    /// Starts a [`SessionBuilder`].
    #[must_use]
    pub fn builder(config: SessionConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    /// Validated configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Walker, if present.
    #[must_use]
    pub const fn walker(&self) -> Option<&Walker> {
        self.walker.as_ref()
    }

    /// Mutable walker, if present.
    pub fn walker_mut(&mut self) -> Option<&mut Walker> {
        self.walker.as_mut()
    }

    /// Companion, if present.
    #[must_use]
    pub const fn companion(&self) -> Option<&Companion> {
        self.companion.as_ref()
    }

    /// Mutable companion, if present.
    pub fn companion_mut(&mut self) -> Option<&mut Companion> {
        self.companion.as_mut()
    }

    /// Leash joining the agents.
    #[must_use]
    pub const fn leash(&self) -> &Leash {
        &self.leash
    }

    /// Objects in play.
    #[must_use]
    pub const fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    /// Mutable objects, for scripted scenarios.
    pub fn objects_mut(&mut self) -> &mut ObjectStore {
        &mut self.objects
    }

    /// Score so far.
    #[must_use]
    pub const fn tally(&self) -> Tally {
        self.tally
    }

    /// Health left in this run.
    #[must_use]
    pub const fn health(&self) -> Health {
        self.health
    }

    /// Whether the run has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.health.is_empty()
    }

    /// Simulated seconds of physics run so far.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Adds an object without bringing it to the companion's attention.
    pub fn place_object(
        &mut self,
        tag: ObjectTag,
        position: Vec3,
        velocity: Vec3,
        size: Vec3,
    ) -> ObjectId {
        self.objects.spawn(tag, position, velocity, size)
    }

    /// Queues `id` for the companion. Ignored without a companion.
    pub fn focus_on(&mut self, id: ObjectId) {
        if let Some(companion) = self.companion.as_mut() {
            companion.focus.enqueue(id, &self.objects);
        }
    }

    /// Adds an object and queues it for the companion.
    pub fn spawn_object(
        &mut self,
        tag: ObjectTag,
        position: Vec3,
        velocity: Vec3,
        size: Vec3,
    ) -> ObjectId {
        let id = self.place_object(tag, position, velocity, size);
        self.focus_on(id);
        id
    }

    /// Inverts the walker's controls for `seconds`.
    pub fn apply_debuff(&mut self, seconds: f32) {
        if let Some(walker) = self.walker.as_mut() {
            walker.apply_debuff(seconds);
            self.tally.debuffs += 1;
        }
    }

    /// Per-frame update: input, drag gesture, walker target and focus.
    pub fn frame_step<I: InputSource + ?Sized>(&mut self, source: &mut I, dt: f32) {
        if self.is_over() {
            return;
        }
        let input = source.sample();
        let lane = self.config.lane;

        if let Some(walker) = self.walker.as_mut() {
            walker.read_input(&input, dt);
            if self.companion.is_some() {
                let sample = DragSample {
                    pointer_held: input.pointer_held,
                    pointer: input.pointer_position,
                    walker_x: walker.agent.x(),
                    companion_direction: self.leash.direction(),
                    leash_length: self.leash.length(),
                };
                walker.drag.update(&sample);
            }
            walker.apply_move_target(&lane);
        }

        if let Some(companion) = self.companion.as_mut() {
            let view = companion.view(lane, self.config.avoid_buffer);
            let cleared_before = companion.focus.obstacles_cleared();
            let command = companion.focus.step(&view, &self.objects, &mut self.rng);
            self.tally.obstacles_cleared += companion
                .focus
                .obstacles_cleared()
                .saturating_sub(cleared_before);
            companion.apply(command);
        }
    }

    /// Fixed-rate update: leash coupling, clamping, integration, scrolling,
    /// collisions and the leash snag check, in that order.
    pub fn physics_step(&mut self, dt: f32) {
        if self.is_over() {
            return;
        }
        self.objects.prune_inactive();
        self.couple_agents();
        if let Some(walker) = self.walker.as_mut() {
            walker.agent.physics_step(dt);
        }
        if let Some(companion) = self.companion.as_mut() {
            companion.agent.physics_step(dt);
        }
        self.scroll_objects(dt);
        self.resolve_collisions();
        self.check_leash_snag();
        self.elapsed += dt;
    }

    /// Runs one frame and one physics step per fixed timestep in `seconds`.
    ///
    /// Partial steps round to the nearest whole step and the remainder
    /// carries over to the next call. Stepping stops once the run is over.
    /// Returns the number of steps run.
    pub fn advance<I: InputSource + ?Sized>(&mut self, source: &mut I, seconds: f32) -> u32 {
        let dt = self.config.fixed_timestep;
        let mut steps = 0;
        self.accumulator += seconds.max(0.0);
        while self.accumulator >= dt * 0.5 && !self.is_over() {
            self.physics_step(dt);
            self.frame_step(source, dt);
            self.accumulator -= dt;
            steps += 1;
        }
        if self.is_over() {
            self.accumulator = 0.0;
        }
        steps
    }

    /// Starts a fresh run with the agents where they stand.
    ///
    /// Focus routines are cancelled, the drag gesture goes idle, any debuff
    /// ends, every object is removed, and health and score start afresh.
    pub fn reset(&mut self) {
        if let Some(companion) = self.companion.as_mut() {
            companion.focus.cancel();
            companion.agent.hold();
        }
        if let Some(walker) = self.walker.as_mut() {
            walker.drag.cancel();
            walker.clear_debuff();
            walker.agent.hold();
        }
        self.leash.slacken();
        self.objects.clear();
        info!("session reset after {:.1}s: {:?}", self.elapsed, self.tally);
        self.tally = Tally::default();
        self.health.restore();
        self.accumulator = 0.0;
        self.elapsed = 0.0;
    }

    fn couple_agents(&mut self) {
        let lane = self.config.lane;
        match (self.walker.as_mut(), self.companion.as_mut()) {
            (Some(walker), Some(companion)) => {
                self.leash
                    .update(walker.agent.x(), companion.agent.x(), walker.pointer_held());

                let companion_pull = CompanionPull {
                    horizontal: walker.horizontal(),
                    pointer_held: walker.pointer_held(),
                    walker_x: walker.agent.x(),
                    drag_x: walker.drag.position(),
                };
                if let Some(x) = companion_pull_target(&self.leash, &companion_pull) {
                    companion.agent.set_target_x(x);
                }
                companion.agent.clamp_target(&lane);

                let walker_pull = WalkerPull {
                    horizontal: walker.horizontal(),
                    dragging: walker.drag.is_dragging(),
                    companion_x: companion.agent.x(),
                    companion_target_x: companion.agent.target.x,
                };
                if let Some(x) = walker_pull_target(&self.leash, &walker_pull) {
                    walker.agent.set_target_x(x);
                }
                walker.agent.clamp_target(&lane);
            }
            (lone_walker, lone_companion) => {
                if let Some(walker) = lone_walker {
                    walker.agent.clamp_target(&lane);
                }
                if let Some(companion) = lone_companion {
                    companion.agent.clamp_target(&lane);
                }
            }
        }
    }

    fn scroll_objects(&mut self, dt: f32) {
        let despawn_z = self.config.despawn_z;
        for (id, object) in self.objects.iter_mut() {
            if !object.is_active() {
                continue;
            }
            object.scroll(dt);
            if object.position.z < despawn_z {
                debug!("{id:?} scrolled out of play");
                object.deactivate();
            }
        }
    }

    fn resolve_collisions(&mut self) {
        let companion_extent = self.companion.as_ref().map(|c| c.agent.extent());
        let walker_extent = self.walker.as_ref().map(|w| w.agent.extent());
        let mut debuffed = false;

        for (id, object) in self.objects.iter_mut() {
            if !object.is_active() {
                continue;
            }
            let extent = object.extent();
            let class = object.tag.focus_class();

            if let Some(companion) = companion_extent {
                let touching = companion.overlaps(&extent);
                if touching && !object.touching_companion {
                    object.contacted = true;
                    match class {
                        Some(FocusClass::Avoid) => {
                            self.tally.obstacles_hit += 1;
                            debug!("companion hit {id:?}");
                        }
                        Some(FocusClass::Seek) => {
                            self.tally.waste_collected += 1;
                            if walker_extent.is_some() {
                                self.health.decrement(1);
                            }
                            debug!("companion collected {id:?}");
                            object.deactivate();
                        }
                        None => {}
                    }
                }
                object.touching_companion = touching;
            }

            if !object.is_active() {
                continue;
            }
            if let Some(walker) = walker_extent {
                let touching = walker.overlaps(&extent);
                if touching && !object.touching_walker {
                    match class {
                        Some(FocusClass::Avoid) => {
                            self.tally.walker_hits += 1;
                            self.health.decrement(1);
                            debug!("walker hit {id:?}");
                        }
                        Some(FocusClass::Seek) => debuffed = true,
                        None => {}
                    }
                }
                object.touching_walker = touching;
            }
        }

        if debuffed {
            self.apply_debuff(self.config.debuff_seconds);
        }
        if self.health.is_empty() {
            info!("health ran out after {:.1}s", self.elapsed);
        }
    }

    /// Ends the run when a pole crosses the leash between the agents.
    ///
    /// The leash runs from the walker to the companion. A pole catches it
    /// when its scroll extent reaches the leash, its centre is short of the
    /// companion and it sits laterally between the agents, clear of either
    /// by [`SNAG_MARGIN`].
    fn check_leash_snag(&mut self) {
        if self.is_over() {
            return;
        }
        let (Some(walker), Some(companion)) = (self.walker.as_ref(), self.companion.as_ref())
        else {
            return;
        };
        let walker_at = walker.agent.position();
        let companion_at = companion.agent.position();
        let near_z = walker_at.z.min(companion_at.z);
        let far_z = walker_at.z.max(companion_at.z);
        let left = walker_at.x.min(companion_at.x) + SNAG_MARGIN;
        let right = walker_at.x.max(companion_at.x) - SNAG_MARGIN;

        let snag = self.objects.iter().find(|(_, object)| {
            let extent = object.extent();
            object.tag == ObjectTag::Pole
                && extent.min.z <= far_z
                && extent.max.z >= near_z
                && object.position.z < companion_at.z
                && object.position.x > left
                && object.position.x < right
        });
        if let Some((id, _)) = snag {
            info!("leash snagged on {id:?}");
            self.tally.snags += 1;
            self.health.drain();
        }
    }
}
