//! Normally-distributed draws for flake initialization.
//!
//! Every spawn attribute that varies between flakes (mass, diameter, initial
//! angle) is sampled from a normal distribution. The samples come from the
//! Box–Muller transform over two uniform draws, so any [`rand::Rng`] can act
//! as the entropy source.
//!
//! # Example
//!
//! ```
//! use flakefall::random::NormalSampler;
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mass_mg = rng.normal(3.0, 0.25);
//! assert!(mass_mg.is_finite());
//! ```

use rand::Rng;
use std::f32::consts::TAU;

/// Uniform draw in the open interval (0, 1).
///
/// `Rng::gen::<f32>()` yields [0, 1); an exact zero is re-drawn so the
/// logarithm in [`normal`] stays finite.
pub fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    loop {
        let u: f32 = rng.gen();
        if u > 0.0 {
            return u;
        }
    }
}

/// Sample `N(mean, variance)` with the Box–Muller transform.
///
/// `variance` is a variance, not a standard deviation. A variance of zero
/// returns `mean` exactly, whatever the uniform draws were. Negative
/// variances are not validated and produce NaN.
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f32, variance: f32) -> f32 {
    let u = open_unit(rng);
    let v = open_unit(rng);
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return mean;
    }
    mean + std_dev * (-2.0 * u.ln()).sqrt() * (TAU * v).cos()
}

/// Extension trait giving every [`Rng`] a `normal` method.
pub trait NormalSampler {
    /// See [`normal`].
    fn normal(&mut self, mean: f32, variance: f32) -> f32;
}

impl<R: Rng + ?Sized> NormalSampler for R {
    #[inline]
    fn normal(&mut self, mean: f32, variance: f32) -> f32 {
        normal(self, mean, variance)
    }
}
