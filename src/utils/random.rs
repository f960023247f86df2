//! Sampling helpers over an injected random source
//!
//! Every draw goes through the caller's `Rng`, so a simulator seeded the
//! same way produces the same sequence of normals and uniforms.

use rand::Rng;

/// Smallest first uniform fed to Box-Muller, keeps `ln` finite
const MIN_UNIFORM: f64 = 1e-300;

/// Draw a uniform value in `[0, 1)`
pub fn uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Draw a standard normal value using the Box-Muller transform
///
/// Consumes exactly two uniforms; the second Box-Muller output is
/// discarded.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = uniform(rng).max(MIN_UNIFORM);
    let u2 = uniform(rng);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Draw from `Normal(mean, std_dev)`
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    mean + std_dev * standard_normal(rng)
}
