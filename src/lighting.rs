//! Cone-light shading.
//!
//! A spotlight hangs at the top center of the domain and points straight
//! down. A flake's brightness combines four terms:
//!
//! | Term | Inside the cone | Outside |
//! |------|-----------------|---------|
//! | Ambient | `ambient` | `ambient` |
//! | Diffuse | `diffuse · angular · distance` | 0 |
//! | Specular | `strength · abs(l·n)^exponent · angular` | 0 |
//!
//! where `angular = cos(angle / half_angle · π/2)` tapers to zero at the cone
//! edge and `distance = 1 / (1 + k d²)`. Inside the cone the sum is divided
//! by `ambient + diffuse + strength`, so the result stays in `[0, 1]`. Outside
//! the cone, and at the light itself, the ambient level is returned as is.

use crate::params::EnvironmentParams;
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Flakes closer to the light than this get ambient light only.
pub const MIN_LIGHT_DISTANCE: f32 = 1e-6;

/// The individual shading terms before normalization.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightTerms {
    /// Angle between the light-to-flake direction and straight down.
    pub angle: f32,
    pub inside_cone: bool,
    /// Cosine taper across the cone, 1 on the axis.
    pub angular_falloff: f32,
    /// Inverse-square attenuation.
    pub distance_falloff: f32,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
}

impl LightTerms {
    /// Brightness in `[0, 1]`.
    ///
    /// Ambient-only terms give the ambient level clamped to `[0, 1]`. Lit
    /// terms are normalized by the coefficient sum; a zero (or negative) sum
    /// yields `0`.
    pub fn brightness(&self, env: &EnvironmentParams) -> f32 {
        if !self.inside_cone {
            return if self.ambient.is_nan() { 0.0 } else { self.ambient.clamp(0.0, 1.0) };
        }
        let total = env.ambient + env.diffuse + env.specular_strength;
        if total <= 0.0 {
            return 0.0;
        }
        let value = (self.ambient + self.diffuse + self.specular) / total;
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, 1.0)
    }
}

/// Compute every shading term for a flake at `position` with face normal
/// `face_normal`, lit from `light`.
pub fn light_terms(
    position: Vec2,
    face_normal: Vec2,
    env: &EnvironmentParams,
    light: Vec2,
) -> LightTerms {
    let offset = position - light;
    let dist = offset.length();

    let ambient_only = |angle: f32| LightTerms {
        angle,
        ambient: env.ambient,
        ..Default::default()
    };

    if dist < MIN_LIGHT_DISTANCE {
        return ambient_only(0.0);
    }

    let dir = offset / dist;
    let angle = dir.dot(Vec2::NEG_Y).clamp(-1.0, 1.0).acos();
    let half_angle = env.beam_half_angle();

    if angle > half_angle {
        return ambient_only(angle);
    }

    let angle_ratio = if half_angle > 0.0 { angle / half_angle } else { 0.0 };
    let angular_falloff = (angle_ratio * FRAC_PI_2).cos();
    let distance_falloff = 1.0 / (1.0 + env.falloff * dist * dist);

    let diffuse = env.diffuse * angular_falloff * distance_falloff;
    let alignment = dir.dot(face_normal).abs();
    let specular = env.specular_strength * alignment.powf(env.specular_exponent) * angular_falloff;

    LightTerms {
        angle,
        inside_cone: true,
        angular_falloff,
        distance_falloff,
        ambient: env.ambient,
        diffuse,
        specular,
    }
}

/// Brightness in `[0, 1]` of a flake at `position` with face normal
/// `face_normal`, lit from `light`.
#[inline]
pub fn brightness(position: Vec2, face_normal: Vec2, env: &EnvironmentParams, light: Vec2) -> f32 {
    light_terms(position, face_normal, env, light).brightness(env)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIGHT: Vec2 = Vec2::new(5.0, 10.0);

    #[test]
    fn test_on_axis_has_full_angular_weight() {
        let env = EnvironmentParams {
            beam_angle: 30.0,
            ..Default::default()
        };
        let terms = light_terms(Vec2::new(5.0, 4.0), Vec2::Y, &env, LIGHT);

        assert!(terms.inside_cone);
        assert!(terms.angle.abs() < 1e-6);
        assert!((terms.angular_falloff - 1.0).abs() < 1e-6);

        let expected_distance = 1.0 / (1.0 + env.falloff * 36.0);
        assert!((terms.distance_falloff - expected_distance).abs() < 1e-6);
        assert!((terms.diffuse - env.diffuse * expected_distance).abs() < 1e-6);
        // Normal faces the light head-on, so |l·n| = 1.
        assert!((terms.specular - env.specular_strength).abs() < 1e-5);
    }

    #[test]
    fn test_outside_cone_is_ambient_only() {
        let env = EnvironmentParams {
            beam_angle: 10.0,
            ..Default::default()
        };
        let terms = light_terms(Vec2::new(9.0, 9.0), Vec2::Y, &env, LIGHT);
        assert!(!terms.inside_cone);
        assert_eq!(terms.diffuse, 0.0);
        assert_eq!(terms.specular, 0.0);

        assert_eq!(terms.brightness(&env), env.ambient);
        assert_eq!(brightness(Vec2::new(9.0, 9.0), Vec2::Y, &env, LIGHT), 0.2);
    }

    #[test]
    fn test_at_light_source_is_ambient() {
        let env = EnvironmentParams::default();
        let terms = light_terms(LIGHT, Vec2::X, &env, LIGHT);
        assert!(!terms.inside_cone);
        assert_eq!(terms.diffuse, 0.0);
        assert_eq!(terms.specular, 0.0);
        assert_eq!(terms.ambient, env.ambient);
        assert_eq!(brightness(LIGHT, Vec2::X, &env, LIGHT), env.ambient);
    }

    #[test]
    fn test_ambient_only_is_clamped() {
        let env = EnvironmentParams {
            ambient: 1.5,
            ..Default::default()
        };
        assert_eq!(brightness(LIGHT, Vec2::X, &env, LIGHT), 1.0);

        let env = EnvironmentParams {
            ambient: -0.3,
            ..Default::default()
        };
        assert_eq!(brightness(LIGHT, Vec2::X, &env, LIGHT), 0.0);
    }

    #[test]
    fn test_inside_cone_is_normalized() {
        let env = EnvironmentParams {
            beam_angle: 30.0,
            falloff: 0.0,
            ..Default::default()
        };
        // On the axis with the face toward the light every term is at full level.
        let b = brightness(Vec2::new(5.0, 4.0), Vec2::Y, &env, LIGHT);
        assert!((b - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_brightness_in_unit_range() {
        let envs = [
            EnvironmentParams::default(),
            EnvironmentParams {
                ambient: 1.0,
                diffuse: 1.0,
                specular_strength: 1.0,
                specular_exponent: 1.0,
                falloff: 0.0,
                beam_angle: 89.0,
                ..Default::default()
            },
            EnvironmentParams {
                ambient: 0.0,
                diffuse: 0.0,
                specular_strength: 0.0,
                ..Default::default()
            },
        ];
        for env in &envs {
            for ix in 0..21 {
                for iy in 0..21 {
                    let pos = Vec2::new(ix as f32 * 0.5, iy as f32 * 0.5 - 0.5);
                    for k in 0..8 {
                        let normal = Vec2::from_angle(k as f32 * 0.8);
                        let b = brightness(pos, normal, env, LIGHT);
                        assert!((0.0..=1.0).contains(&b), "brightness {} at {:?}", b, pos);
                    }
                }
            }
        }
    }

    #[test]
    fn test_edge_of_cone_is_dark() {
        let env = EnvironmentParams {
            beam_angle: 45.0,
            ambient: 0.0,
            ..Default::default()
        };
        // Just inside the 45° edge.
        let pos = LIGHT + Vec2::new(1.0, -1.0001);
        let terms = light_terms(pos, Vec2::X, &env, LIGHT);
        assert!(terms.inside_cone);
        assert!(terms.angular_falloff < 1e-3);
    }
}
