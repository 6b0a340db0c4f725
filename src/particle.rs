//! The flake particle and its render attributes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One falling flake.
///
/// `mass` and `diameter` are set at spawn and never touched again; the
/// integrator only writes the kinematic fields.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flake {
    /// Meters. `x` stays in `[0, W)`.
    pub position: Vec2,
    /// Meters per second.
    pub velocity: Vec2,
    /// Orientation in radians, kept in `[0, 2π)`.
    pub theta: f32,
    /// Angular velocity in rad/s.
    pub omega: f32,
    /// Kilograms.
    pub mass: f32,
    /// Meters.
    pub diameter: f32,
}

impl Flake {
    /// Unit normal of the flake's face, `(cos θ, sin θ)`.
    #[inline]
    pub fn face_normal(&self) -> Vec2 {
        Vec2::from_angle(self.theta)
    }

    /// Whether every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.theta.is_finite()
            && self.omega.is_finite()
            && self.mass.is_finite()
            && self.diameter.is_finite()
    }
}

/// Everything a renderer needs to draw one flake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderAttributes {
    /// Meters; the renderer scales to pixels.
    pub position: Vec2,
    /// Radians.
    pub theta: f32,
    /// Meters.
    pub diameter: f32,
    /// Shading in `[0, 1]`.
    pub brightness: f32,
}
