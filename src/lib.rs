//! # flakefall
//!
//! Falling flakes under simplified aerodynamics, shaded by a cone light.
//!
//! Each flake is a thin 2-D plate with its own mass, diameter and
//! orientation. Every frame the simulation splits the elapsed time into
//! fixed sub-steps and, for every flake independently, derives drag, lift
//! and torque from the airflow around it, integrates with forward Euler,
//! wraps it horizontally and respawns it at the top once it lands. A
//! stateless lighting model then turns position and orientation into a
//! brightness for the renderer.
//!
//! ## Quick Start
//!
//! ```
//! use flakefall::prelude::*;
//!
//! let init = InitParams::default();
//! let mut env = EnvironmentParams::default();
//!
//! let mut sim = Simulation::new().with_seed(1);
//! sim.reset(&init, &env);
//!
//! let mut clock = FrameClock::new();
//! clock.start(0.0);
//!
//! for frame in 1..=60 {
//!     // The operator may change parameters between any two frames.
//!     env.wind_speed_top = 1.0 + frame as f32 * 0.05;
//!
//!     if let Some(dt) = clock.tick(frame as f64 / 60.0) {
//!         sim.advance(dt, &init, &env);
//!     }
//!     for attrs in sim.render_attributes(&env) {
//!         assert!((0.0..=1.0).contains(&attrs.brightness));
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Parameters
//!
//! - [`EnvironmentParams`] - live forces and lighting, read fresh every call
//! - [`InitParams`] - spawn distributions, read only when a flake is created
//! - [`Domain`] - fixed geometry: width, height, spawn and ground levels
//!
//! ### Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Normal draws | [`random`] |
//! | Flake creation | [`spawn`] |
//! | Forces | [`forces`] |
//! | Euler step, wrap, landing | [`integrator`] |
//! | Sub-stepping, respawn, trails | [`Simulation`] |
//! | Brightness | [`lighting`] |

pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod lighting;
pub mod params;
mod particle;
pub mod random;
mod simulation;
pub mod spawn;
pub mod time;
pub mod trails;

pub use config::SimConfig;
pub use error::ConfigError;
pub use glam::Vec2;
pub use integrator::StepOutcome;
pub use params::{Domain, DrawPolicy, EnvironmentParams, InitParams};
pub use particle::{Flake, RenderAttributes};
pub use simulation::{Simulation, StepStats, SUBSTEPS};
pub use spawn::Spawner;
pub use time::FrameClock;
pub use trails::{Trail, TrailConfig};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```
/// use flakefall::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::params::{Domain, DrawPolicy, EnvironmentParams, InitParams};
    pub use crate::particle::{Flake, RenderAttributes};
    pub use crate::simulation::{Simulation, StepStats};
    pub use crate::time::FrameClock;
    pub use crate::trails::TrailConfig;
    pub use crate::Vec2;
}
