//! Population owner and frame stepper.

use crate::config::SimConfig;
use crate::integrator::{step, StepOutcome};
use crate::lighting;
use crate::params::{Domain, EnvironmentParams, InitParams};
use crate::particle::{Flake, RenderAttributes};
use crate::spawn::Spawner;
use crate::trails::{Trail, TrailConfig};

/// Sub-steps each frame is split into.
pub const SUBSTEPS: u32 = 4;

/// What happened during one [`Simulation::advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Sub-steps actually run (0 for a skipped frame).
    pub substeps: u32,
    /// Flakes that hit the ground and were replaced.
    pub respawned: usize,
    /// Flakes left with non-finite state after the frame.
    pub non_finite: usize,
}

/// A population of flakes and the machinery to move them.
///
/// Use method chaining to configure, then [`reset`](Self::reset) to spawn the
/// population and [`advance`](Self::advance) once per frame.
///
/// ```
/// use flakefall::prelude::*;
///
/// let init = InitParams::default();
/// let env = EnvironmentParams::default();
///
/// let mut sim = Simulation::new()
///     .with_domain(Domain::default())
///     .with_seed(7);
/// sim.reset(&init, &env);
/// sim.advance(1.0 / 60.0, &init, &env);
///
/// assert_eq!(sim.len(), init.num_flakes);
/// ```
pub struct Simulation {
    domain: Domain,
    substeps: u32,
    trail_config: TrailConfig,
    spawner: Spawner,
    flakes: Vec<Flake>,
    trails: Vec<Trail>,
}

impl Simulation {
    /// Empty simulation with the default domain and a clock-seeded spawner.
    pub fn new() -> Self {
        Self {
            domain: Domain::default(),
            substeps: SUBSTEPS,
            trail_config: TrailConfig::default(),
            spawner: Spawner::new(),
            flakes: Vec::new(),
            trails: Vec::new(),
        }
    }

    /// Build from a configuration, spawning the initial population.
    pub fn from_config(config: &SimConfig) -> Self {
        let mut sim = Self::new()
            .with_domain(config.domain)
            .with_substeps(config.substeps)
            .with_trails(config.trails);
        if let Some(seed) = config.seed {
            sim = sim.with_seed(seed);
        }
        sim.reset(&config.init, &config.environment);
        sim
    }

    /// Set the domain geometry.
    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    /// Set the number of sub-steps per frame (at least 1).
    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps.max(1);
        self
    }

    /// Configure trail recording.
    pub fn with_trails(mut self, trails: TrailConfig) -> Self {
        self.set_trail_config(trails);
        self
    }

    /// Use a seeded spawner for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.spawner = Spawner::seeded(seed);
        self
    }

    /// Throw away every flake and trail and spawn `init.num_flakes` new ones.
    pub fn reset(&mut self, init: &InitParams, env: &EnvironmentParams) {
        let flakes = self.spawner.spawn_population(init, env, &self.domain);
        let trails = (0..flakes.len())
            .map(|_| Trail::with_capacity(self.trail_config.capacity))
            .collect();
        self.flakes = flakes;
        self.trails = trails;
        log::debug!("reset population to {} flakes", self.flakes.len());
    }

    /// Reset only if the population size changed.
    ///
    /// Returns whether a reset happened. Other spawn distributions take
    /// effect as flakes respawn.
    pub fn apply_init(&mut self, init: &InitParams, env: &EnvironmentParams) -> bool {
        if init.num_flakes != self.flakes.len() {
            self.reset(init, env);
            true
        } else {
            false
        }
    }

    /// Advance every flake by `frame_dt` seconds.
    ///
    /// The frame is split into equal sub-steps; in each, flakes are stepped
    /// in population order. A flake that lands is replaced in place by a
    /// fresh one and its trail cleared. Non-positive or non-finite deltas
    /// are ignored.
    pub fn advance(
        &mut self,
        frame_dt: f32,
        init: &InitParams,
        env: &EnvironmentParams,
    ) -> StepStats {
        let mut stats = StepStats::default();
        if !(frame_dt.is_finite() && frame_dt > 0.0) {
            return stats;
        }

        let dt = frame_dt / self.substeps as f32;
        for _ in 0..self.substeps {
            for (flake, trail) in self.flakes.iter_mut().zip(self.trails.iter_mut()) {
                match step(flake, dt, env, &self.domain) {
                    StepOutcome::Grounded => {
                        *flake = self.spawner.spawn(init, env, &self.domain);
                        trail.clear();
                        stats.respawned += 1;
                        log::trace!("flake respawned at x = {:.3}", flake.position.x);
                    }
                    StepOutcome::Airborne => {
                        if self.trail_config.enabled {
                            trail.push(flake.position);
                        }
                    }
                }
            }
            stats.substeps += 1;
        }

        stats.non_finite = self.flakes.iter().filter(|f| !f.is_finite()).count();
        if stats.non_finite > 0 {
            log::warn!("{} flakes have non-finite state", stats.non_finite);
        }
        stats
    }

    /// Change trail settings. Disabling recording clears existing trails.
    pub fn set_trail_config(&mut self, config: TrailConfig) {
        self.trail_config = config;
        for trail in &mut self.trails {
            trail.set_capacity(config.capacity);
            if !config.enabled {
                trail.clear();
            }
        }
    }

    /// Brightness of one flake under the current lighting.
    pub fn brightness_of(&self, flake: &Flake, env: &EnvironmentParams) -> f32 {
        lighting::brightness(flake.position, flake.face_normal(), env, self.domain.light_position())
    }

    /// Per-flake render attributes, in population order.
    pub fn render_attributes<'a>(
        &'a self,
        env: &'a EnvironmentParams,
    ) -> impl Iterator<Item = RenderAttributes> + 'a {
        self.flakes.iter().map(move |flake| RenderAttributes {
            position: flake.position,
            theta: flake.theta,
            diameter: flake.diameter,
            brightness: self.brightness_of(flake, env),
        })
    }

    #[inline]
    pub fn flakes(&self) -> &[Flake] {
        &self.flakes
    }

    /// Trail of the flake at `index`, oldest point first.
    #[inline]
    pub fn trail(&self, index: usize) -> Option<&Trail> {
        self.trails.get(index)
    }

    #[inline]
    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    #[inline]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    #[inline]
    pub fn substeps(&self) -> u32 {
        self.substeps
    }

    #[inline]
    pub fn trail_config(&self) -> TrailConfig {
        self.trail_config
    }

    /// Mutable access to a single flake, for scripted scenarios.
    #[inline]
    pub fn flake_mut(&mut self, index: usize) -> Option<&mut Flake> {
        self.flakes.get_mut(index)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
