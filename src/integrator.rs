//! Forward-Euler integration of a single flake.

use crate::forces::accelerations;
use crate::params::{Domain, EnvironmentParams};
use crate::particle::Flake;
use std::f32::consts::TAU;

/// Result of one integration sub-step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Still above (or exactly at) ground level.
    Airborne,
    /// Fell strictly below ground level and must be replaced.
    Grounded,
}

/// Advance `flake` by `dt` seconds.
///
/// Accelerations are evaluated once, at the start of the step. Angular state
/// is integrated first, then linear state, each velocity before its position.
/// Afterwards `theta` is folded into `[0, 2π)` and `x` wrapped into `[0, W)`.
pub fn step(flake: &mut Flake, dt: f32, env: &EnvironmentParams, domain: &Domain) -> StepOutcome {
    let acc = accelerations(flake, env, domain);

    flake.omega += acc.angular * dt;
    flake.theta = normalize_angle(flake.theta + flake.omega * dt);

    flake.velocity += acc.linear * dt;
    flake.position += flake.velocity * dt;
    flake.position.x = wrap_coordinate(flake.position.x, domain.width);

    if flake.position.y < domain.ground_level {
        StepOutcome::Grounded
    } else {
        StepOutcome::Airborne
    }
}

/// Fold an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(theta: f32) -> f32 {
    wrap_coordinate(theta, TAU)
}

/// Wrap `value` into `[0, period)`.
///
/// `rem_euclid` on `f32` can round a tiny negative input up to exactly
/// `period`; that case maps to `0`. Non-finite input stays non-finite.
#[inline]
pub fn wrap_coordinate(value: f32, period: f32) -> f32 {
    let wrapped = value.rem_euclid(period);
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn resting_flake() -> Flake {
        Flake {
            position: Vec2::new(3.0, 5.0),
            velocity: Vec2::ZERO,
            theta: 0.0,
            omega: 0.0,
            mass: 3e-6,
            diameter: 5e-3,
        }
    }

    #[test]
    fn test_free_fall_in_vacuum() {
        let env = EnvironmentParams {
            gravity: 9.81,
            air_pressure: 0.0,
            ..Default::default()
        };
        let mut flake = resting_flake();
        let outcome = step(&mut flake, 0.1, &env, &Domain::default());

        assert_eq!(outcome, StepOutcome::Airborne);
        assert!((flake.velocity.y + 0.981).abs() < 1e-5);
        assert_eq!(flake.position.x, 3.0);
        assert!((flake.position.y - (5.0 - 0.0981)).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_at_width() {
        assert_eq!(wrap_coordinate(10.0, 10.0), 0.0);
        let w = wrap_coordinate(-f32::EPSILON, 10.0);
        assert!((0.0..10.0).contains(&w));
        let w = wrap_coordinate(-1e-6, 10.0);
        assert!((0.0..10.0).contains(&w));
        assert!((wrap_coordinate(12.5, 10.0) - 2.5).abs() < 1e-6);
        assert!((wrap_coordinate(-2.5, 10.0) - 7.5).abs() < 1e-6);
    }

    #[test]
    fn test_step_wraps_horizontally() {
        let env = EnvironmentParams {
            air_pressure: 0.0,
            gravity: 0.0,
            ..Default::default()
        };
        let domain = Domain::default();

        let mut flake = resting_flake();
        flake.position.x = 9.9;
        flake.velocity.x = 1.0;
        step(&mut flake, 0.1, &env, &domain);
        assert!(flake.position.x >= 0.0 && flake.position.x < domain.width);

        flake.position.x = 0.05;
        flake.velocity.x = -1.0;
        step(&mut flake, 0.1, &env, &domain);
        assert!(flake.position.x >= 0.0 && flake.position.x < domain.width);
        assert!((flake.position.x - 9.95).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_angle() {
        for raw in [-7.0, -TAU, -1e-7, 0.0, 3.0, TAU, 100.0] {
            let theta = normalize_angle(raw);
            assert!((0.0..TAU).contains(&theta), "{} -> {}", raw, theta);
        }
    }

    #[test]
    fn test_ground_boundary() {
        let env = EnvironmentParams {
            air_pressure: 0.0,
            gravity: 0.0,
            ..Default::default()
        };
        let domain = Domain::default();

        let mut at_ground = resting_flake();
        at_ground.position.y = domain.ground_level;
        assert_eq!(step(&mut at_ground, 0.1, &env, &domain), StepOutcome::Airborne);

        let mut below = resting_flake();
        below.position.y = domain.ground_level - 1e-3;
        assert_eq!(step(&mut below, 0.1, &env, &domain), StepOutcome::Grounded);
    }

    #[test]
    fn test_mass_and_diameter_are_untouched() {
        let env = EnvironmentParams::default();
        let domain = Domain {
            height: 1000.0,
            spawn_height: 1000.0,
            ..Default::default()
        };
        let mut flake = resting_flake();
        flake.position.y = 1000.0;
        flake.theta = 0.4;
        let (mass, diameter) = (flake.mass, flake.diameter);

        for _ in 0..500 {
            step(&mut flake, 0.004, &env, &domain);
            assert_eq!(flake.mass, mass);
            assert_eq!(flake.diameter, diameter);
            assert!((0.0..TAU).contains(&flake.theta));
        }
    }
}
