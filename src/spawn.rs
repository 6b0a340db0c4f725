//! Flake creation.
//!
//! [`Spawner`] owns the random source and turns [`InitParams`] into fresh
//! [`Flake`]s. The simulation calls it for the initial population and again
//! whenever a flake reaches the ground.

use crate::integrator::normalize_angle;
use crate::params::{
    Domain, DrawPolicy, EnvironmentParams, InitParams, MIN_DIAMETER_M, MIN_MASS_KG,
};
use crate::particle::Flake;
use crate::random::NormalSampler;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// Milligrams per kilogram.
const MG_PER_KG: f32 = 1e6;
/// Millimeters per meter.
const MM_PER_M: f32 = 1000.0;
/// Square degrees to square radians, for the angle variance.
const DEG2_TO_RAD2: f32 = (PI / 180.0) * (PI / 180.0);

/// Source of new flakes.
pub struct Spawner {
    rng: SmallRng,
}

impl Spawner {
    /// Spawner seeded from the clock, different every program execution.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Reproducible spawner.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Sample one flake. See [`spawn_flake`].
    pub fn spawn(&mut self, init: &InitParams, env: &EnvironmentParams, domain: &Domain) -> Flake {
        spawn_flake(&mut self.rng, init, env, domain)
    }

    /// Sample `init.num_flakes` flakes.
    pub fn spawn_population(
        &mut self,
        init: &InitParams,
        env: &EnvironmentParams,
        domain: &Domain,
    ) -> Vec<Flake> {
        (0..init.num_flakes)
            .map(|_| self.spawn(init, env, domain))
            .collect()
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample one flake from `init`'s distributions.
///
/// The flake starts at the spawn height at a uniformly random `x`, moving
/// with the top-of-domain wind and not spinning.
pub fn spawn_flake<R: Rng + ?Sized>(
    rng: &mut R,
    init: &InitParams,
    env: &EnvironmentParams,
    domain: &Domain,
) -> Flake {
    let x = if domain.width > 0.0 {
        rng.gen_range(0.0..domain.width)
    } else {
        0.0
    };

    let theta_var = init.theta_var * DEG2_TO_RAD2;
    let theta = normalize_angle(rng.normal(init.theta_mean.to_radians(), theta_var));
    let mass = rng.normal(init.mass_mean, init.mass_var) / MG_PER_KG;
    let diameter = rng.normal(init.diameter_mean, init.diameter_var) / MM_PER_M;

    let (mass, diameter) = match init.draw_policy {
        DrawPolicy::ClampPositive => (mass.max(MIN_MASS_KG), diameter.max(MIN_DIAMETER_M)),
        DrawPolicy::Permissive => (mass, diameter),
    };

    Flake {
        position: Vec2::new(x, domain.spawn_height),
        velocity: Vec2::new(env.wind_speed_top, 0.0),
        theta,
        omega: 0.0,
        mass,
        diameter,
    }
}
