//! PERT-like three-point sampling.

use rand::Rng;

/// Draw one sample from a PERT-like three-point distribution via the
/// two-branch inverse-transform formula.
///
/// With `u ~ Uniform(0,1)` and `f = (likely - min) / (max - min)`:
///
/// - `u <= f`: `min + sqrt(u * (max - min) * (likely - min))`
/// - `u >  f`: `max - sqrt((1 - u) * (max - min) * (max - likely))`
///
/// Degenerate inputs (`max <= min`) collapse to `likely`.
pub fn pert_sample<R: Rng + ?Sized>(rng: &mut R, min: f64, likely: f64, max: f64) -> f64 {
    let range = max - min;
    if range <= 0.0 {
        return likely;
    }

    let u: f64 = rng.gen_range(0.0..1.0);
    let f = (likely - min) / range;

    if u <= f {
        min + (u * range * (likely - min)).sqrt()
    } else {
        max - ((1.0 - u) * range * (max - likely)).sqrt()
    }
}
