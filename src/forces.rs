//! Aerodynamic force model.
//!
//! A flake is treated as a thin plate falling through air that moves
//! horizontally with a height-dependent wind. The plate's face normal is
//! `(cos θ, sin θ)`. From the airflow relative to the plate we derive:
//!
//! - angle of attack between the airflow and the face normal
//! - projected area, between `0.7 d²` edge-on and `d²` face-on
//! - drag along the airflow (constant `Cd`)
//! - lift along the face normal (`Cl = 0.5 sin 2α`, peaking at 45°)
//! - a torque proportional to lift, turned into angular acceleration with
//!   the moment of inertia `m d² / 12`
//!
//! Gravity always acts on top of the aerodynamic terms.
//!
//! Everything here is a pure function of the flake and the parameters passed
//! in. Nothing guards against non-positive mass or diameter: those produce
//! non-finite accelerations.

use crate::params::{Domain, EnvironmentParams};
use crate::particle::Flake;
use glam::Vec2;

/// Drag coefficient of a flat plate.
pub const DRAG_COEFFICIENT: f32 = 1.28;

/// Peak lift coefficient, reached at a 45° angle of attack.
pub const LIFT_COEFFICIENT_PEAK: f32 = 0.5;

/// Edge-on projected area as a fraction of `d²`.
pub const EDGE_ON_AREA_FRACTION: f32 = 0.7;

/// Torque per unit of lift and diameter.
pub const TORQUE_COEFFICIENT: f32 = 0.01;

/// Relative speeds at or below this are treated as still air.
pub const MIN_RELATIVE_SPEED: f32 = 1e-6;

/// Translational and rotational acceleration of one flake.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accelerations {
    /// m/s².
    pub linear: Vec2,
    /// rad/s².
    pub angular: f32,
}

/// Every intermediate quantity of one force evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceBreakdown {
    /// Air density in kg/m³.
    pub density: f32,
    /// Horizontal wind at the flake's altitude.
    pub wind: f32,
    /// Velocity relative to the air.
    pub relative_velocity: Vec2,
    /// Unit airflow direction, `(0, -1)` in still air.
    pub flow_direction: Vec2,
    /// Angle of attack in radians.
    pub angle_of_attack: f32,
    /// Projected area in m².
    pub area: f32,
    pub drag_coefficient: f32,
    pub lift_coefficient: f32,
    /// Drag magnitude in newtons.
    pub drag: f32,
    /// Lift magnitude in newtons.
    pub lift: f32,
    /// N·m.
    pub torque: f32,
    /// Moment of inertia in kg·m².
    pub inertia: f32,
    pub accelerations: Accelerations,
}

/// Accelerations acting on `flake` under the current environment.
#[inline]
pub fn accelerations(flake: &Flake, env: &EnvironmentParams, domain: &Domain) -> Accelerations {
    breakdown(flake, env, domain).accelerations
}

/// Full force evaluation, keeping every intermediate term.
///
/// The still-air branch zeroes the aerodynamic forces but still divides by
/// the mass, so a zero mass gives a non-finite linear acceleration there too.
pub fn breakdown(flake: &Flake, env: &EnvironmentParams, domain: &Domain) -> ForceBreakdown {
    let density = env.air_density();
    let wind = env.wind_at(flake.position.y, domain.height);
    let relative_velocity = flake.velocity - Vec2::new(wind, 0.0);
    let speed = relative_velocity.length();
    let d = flake.diameter;
    let normal = flake.face_normal();

    let still_air = speed <= MIN_RELATIVE_SPEED;
    let (flow_direction, angle_of_attack) = if still_air {
        (Vec2::NEG_Y, flake.theta)
    } else {
        let dir = relative_velocity / speed;
        (dir, dir.dot(normal).clamp(-1.0, 1.0).acos())
    };

    let face_on = d * d;
    let edge_on = EDGE_ON_AREA_FRACTION * face_on;
    let area = edge_on + (face_on - edge_on) * angle_of_attack.sin();

    let drag_coefficient = DRAG_COEFFICIENT;
    let lift_coefficient = lift_coefficient(angle_of_attack);

    // Still air carries no dynamic pressure; only gravity is left.
    let dynamic_pressure = if still_air {
        0.0
    } else {
        0.5 * density * speed * speed
    };
    let drag = dynamic_pressure * drag_coefficient * area;
    let lift = dynamic_pressure * lift_coefficient * area;

    let force = -flow_direction * drag + normal * lift;
    let mut linear = force / flake.mass;
    linear.y -= env.gravity;

    let torque = -TORQUE_COEFFICIENT * d * lift;
    let inertia = flake.mass * d * d / 12.0;
    let angular = if still_air { 0.0 } else { torque / inertia };

    ForceBreakdown {
        density,
        wind,
        relative_velocity,
        flow_direction,
        angle_of_attack,
        area,
        drag_coefficient,
        lift_coefficient,
        drag,
        lift,
        torque,
        inertia,
        accelerations: Accelerations { linear, angular },
    }
}

/// Lift coefficient at a given angle of attack.
#[inline]
pub fn lift_coefficient(angle_of_attack: f32) -> f32 {
    LIFT_COEFFICIENT_PEAK * (2.0 * angle_of_attack).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn flake(velocity: Vec2, theta: f32) -> Flake {
        Flake {
            position: Vec2::new(5.0, 5.0),
            velocity,
            theta,
            omega: 0.0,
            mass: 3e-6,
            diameter: 5e-3,
        }
    }

    fn still_env() -> EnvironmentParams {
        EnvironmentParams {
            wind_speed_top: 0.0,
            wind_speed_bottom: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_relative_velocity_is_pure_gravity() {
        let env = still_env();
        let acc = accelerations(&flake(Vec2::ZERO, 0.7), &env, &Domain::default());
        assert_eq!(acc.linear.x, 0.0);
        assert_eq!(acc.linear.y, -env.gravity);
        assert_eq!(acc.angular, 0.0);
    }

    #[test]
    fn test_matching_wind_is_still_air() {
        // Flake drifting with the wind at its altitude.
        let env = EnvironmentParams {
            wind_speed_top: 2.0,
            wind_speed_bottom: 2.0,
            ..Default::default()
        };
        let b = breakdown(&flake(Vec2::new(2.0, 0.0), 1.0), &env, &Domain::default());
        assert_eq!(b.drag, 0.0);
        assert_eq!(b.lift, 0.0);
        assert_eq!(b.flow_direction, Vec2::NEG_Y);
        assert_eq!(b.angle_of_attack, 1.0);
        assert_eq!(b.accelerations.linear, Vec2::new(0.0, -env.gravity));
    }

    #[test]
    fn test_vacuum_has_no_aerodynamics() {
        let env = EnvironmentParams {
            air_pressure: 0.0,
            ..still_env()
        };
        let acc = accelerations(&flake(Vec2::new(1.0, -3.0), 0.3), &env, &Domain::default());
        assert!(acc.linear.x.abs() < 1e-9);
        assert!((acc.linear.y + env.gravity).abs() < 1e-6);
        assert!(acc.angular.abs() < 1e-9);
    }

    #[test]
    fn test_face_on_fall_has_full_drag_and_no_lift() {
        // Falling straight down with the face normal pointing up: flow is
        // anti-parallel to the normal, so aoa = π.
        let env = still_env();
        let b = breakdown(&flake(Vec2::new(0.0, -1.0), FRAC_PI_2), &env, &Domain::default());

        assert!((b.angle_of_attack - std::f32::consts::PI).abs() < 1e-3);
        assert!(b.lift.abs() < 1e-9);
        // Drag opposes the motion: pushes up.
        assert!(b.accelerations.linear.y > -env.gravity);
        assert!(b.accelerations.linear.x.abs() < 1e-4);
    }

    #[test]
    fn test_drag_magnitude() {
        let env = still_env();
        let f = flake(Vec2::new(0.0, -2.0), 0.0);
        let b = breakdown(&f, &env, &Domain::default());

        // Flow (0,-1) against normal (1,0): aoa = 90°, face-on area.
        assert!((b.angle_of_attack - FRAC_PI_2).abs() < 1e-5);
        let d2 = f.diameter * f.diameter;
        assert!((b.area - d2).abs() < 1e-10);

        let expected = 0.5 * 1.225 * DRAG_COEFFICIENT * d2 * 4.0;
        assert!((b.drag - expected).abs() / expected < 1e-4);
    }

    #[test]
    fn test_lift_peaks_at_45_degrees() {
        assert!((lift_coefficient(FRAC_PI_4) - LIFT_COEFFICIENT_PEAK).abs() < 1e-6);
        assert!(lift_coefficient(0.0).abs() < 1e-6);
        assert!(lift_coefficient(FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_oblique_flow_produces_torque() {
        let env = still_env();
        // Flow (0,-1), normal at 45° up-right: aoa = 135°, Cl = -0.5.
        let b = breakdown(&flake(Vec2::new(0.0, -1.0), FRAC_PI_4), &env, &Domain::default());
        assert!(b.lift < 0.0);
        assert!(b.torque > 0.0);
        assert!(b.accelerations.angular > 0.0);
        assert!((b.inertia - 3e-6 * 25e-6 / 12.0).abs() < 1e-15);
    }

    #[test]
    fn test_wind_uses_altitude() {
        let env = EnvironmentParams {
            wind_speed_top: 4.0,
            wind_speed_bottom: 0.0,
            ..Default::default()
        };
        let mut f = flake(Vec2::ZERO, 0.0);
        f.position.y = 2.5;
        let b = breakdown(&f, &env, &Domain::default());
        assert!((b.wind - 1.0).abs() < 1e-6);
        assert!((b.relative_velocity - Vec2::new(-1.0, 0.0)).length() < 1e-6);
        // Wind blows to +x, so drag pushes the flake to +x.
        assert!(b.accelerations.linear.x > 0.0);
    }

    #[test]
    fn test_degenerate_mass_is_not_finite() {
        let mut f = flake(Vec2::new(0.0, -1.0), 0.3);
        f.mass = 0.0;
        let acc = accelerations(&f, &still_env(), &Domain::default());
        assert!(!acc.linear.is_finite() || !acc.angular.is_finite());
    }

    #[test]
    fn test_zero_mass_in_still_air_is_not_finite() {
        let mut f = flake(Vec2::ZERO, 0.3);
        f.mass = 0.0;
        let acc = accelerations(&f, &still_env(), &Domain::default());
        assert!(acc.linear.is_nan());
        assert_eq!(acc.angular, 0.0);
    }
}
