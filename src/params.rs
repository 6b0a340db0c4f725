//! Operator-facing parameter records.
//!
//! These are plain data. The control layer owns and mutates them; the
//! simulation only borrows them for the duration of a call and reads the
//! current values every time a force or brightness is evaluated. Fields are
//! independent scalars, so a value changed between two sub-steps simply takes
//! effect on the next one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Sea-level air density in kg/m³.
pub const SEA_LEVEL_AIR_DENSITY: f32 = 1.225;

/// Smallest mass a clamped draw may produce, in kilograms.
pub const MIN_MASS_KG: f32 = 1e-9;

/// Smallest diameter a clamped draw may produce, in meters.
pub const MIN_DIAMETER_M: f32 = 1e-5;

/// Live physics and lighting parameters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentParams {
    /// Gravitational acceleration in m/s².
    pub gravity: f32,
    /// Air density relative to sea level. `0.0` is vacuum.
    pub air_pressure: f32,
    /// Horizontal wind at the top of the domain (m/s).
    pub wind_speed_top: f32,
    /// Horizontal wind at ground level (m/s).
    pub wind_speed_bottom: f32,
    /// Ambient light level.
    pub ambient: f32,
    /// Diffuse light level.
    pub diffuse: f32,
    /// Specular strength.
    pub specular_strength: f32,
    /// Specular exponent (shininess).
    pub specular_exponent: f32,
    /// Beam half-angle in degrees.
    pub beam_angle: f32,
    /// Inverse-square falloff coefficient `k` in `1 / (1 + k d²)`.
    pub falloff: f32,
    /// Opacity of the drawn light cone. Passed through to the renderer.
    pub cone_opacity: f32,
}

impl Default for EnvironmentParams {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            air_pressure: 1.0,
            wind_speed_top: 1.0,
            wind_speed_bottom: 0.0,
            ambient: 0.2,
            diffuse: 0.6,
            specular_strength: 0.4,
            specular_exponent: 16.0,
            beam_angle: 30.0,
            falloff: 0.05,
            cone_opacity: 0.1,
        }
    }
}

impl EnvironmentParams {
    /// Air density in kg/m³ for the current pressure setting.
    #[inline]
    pub fn air_density(&self) -> f32 {
        SEA_LEVEL_AIR_DENSITY * self.air_pressure
    }

    /// Beam half-angle in radians.
    #[inline]
    pub fn beam_half_angle(&self) -> f32 {
        self.beam_angle.to_radians()
    }

    /// Horizontal wind at altitude `y`, interpolated linearly between the
    /// bottom (y = 0) and top (y = `height`) speeds. Altitudes outside
    /// `[0, height]` extrapolate.
    #[inline]
    pub fn wind_at(&self, y: f32, height: f32) -> f32 {
        let height_ratio = y / height;
        self.wind_speed_bottom + (self.wind_speed_top - self.wind_speed_bottom) * height_ratio
    }
}

/// What to do with non-positive mass or diameter draws.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawPolicy {
    /// Clamp to [`MIN_MASS_KG`] / [`MIN_DIAMETER_M`].
    #[default]
    ClampPositive,
    /// Keep the raw draw. Degenerate flakes may end up with non-finite state.
    Permissive,
}

/// Spawn distributions.
///
/// Units are the operator-facing ones: milligrams, millimeters and degrees.
/// Variances are in the squared unit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InitParams {
    pub num_flakes: usize,
    pub mass_mean: f32,
    pub mass_var: f32,
    pub diameter_mean: f32,
    pub diameter_var: f32,
    pub theta_mean: f32,
    pub theta_var: f32,
    pub draw_policy: DrawPolicy,
}

impl Default for InitParams {
    fn default() -> Self {
        Self {
            num_flakes: 200,
            mass_mean: 3.0,
            mass_var: 0.5,
            diameter_mean: 5.0,
            diameter_var: 1.0,
            theta_mean: 0.0,
            theta_var: 900.0,
            draw_policy: DrawPolicy::ClampPositive,
        }
    }
}

/// Fixed geometry of the simulated region.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Domain {
    /// Width `W` in meters. Horizontal positions wrap into `[0, W)`.
    pub width: f32,
    /// Height `H` in meters. Used for the wind profile and the light position.
    pub height: f32,
    /// Altitude new flakes start at.
    pub spawn_height: f32,
    /// Flakes strictly below this altitude are respawned.
    pub ground_level: f32,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
            spawn_height: 10.0,
            ground_level: 0.0,
        }
    }
}

impl Domain {
    /// Position of the cone light: horizontal center, top of the domain.
    #[inline]
    pub fn light_position(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height)
    }
}
