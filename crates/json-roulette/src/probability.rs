//! Quantised Bernoulli trials.
//!
//! Every random decision in the generator goes through [`decide`], so the
//! order in which it is called fixes the output for a given seed.

use rand::Rng;

use crate::error::GenerationError;

/// Number of decimal places the uniform draw is rounded to.
const DECIMAL_SCALE: f64 = 1000.0;

/// Returns `true` with probability `chance`.
///
/// One uniform value in `[0, 1)` is drawn and rounded half-to-even to three
/// decimal places before it is compared with `chance`. A negative `chance`
/// always yields `false`, which is how callers disable a feature; a draw is
/// still consumed so the stream advances identically either way.
///
/// # Errors
///
/// Returns [`GenerationError::ProbabilityOutOfRange`] when `chance` is above
/// one or NaN.
///
/// # Example
///
/// ```
/// use json_roulette::decide;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// assert!(decide(&mut rng, 1.0).expect("valid probability"));
/// assert!(!decide(&mut rng, -1.0).expect("valid probability"));
/// assert!(decide(&mut rng, 1.5).is_err());
/// ```
pub fn decide<R>(rng: &mut R, chance: f64) -> Result<bool, GenerationError>
where
    R: Rng + ?Sized,
{
    if chance.is_nan() || chance > 1.0 {
        return Err(GenerationError::ProbabilityOutOfRange { value: chance });
    }
    let draw: f64 = rng.random();
    Ok(quantise(draw) <= chance)
}

#[expect(
    clippy::float_arithmetic,
    reason = "rounding to a fixed number of decimals is inherently float arithmetic"
)]
fn quantise(draw: f64) -> f64 {
    (draw * DECIMAL_SCALE).round_ties_even() / DECIMAL_SCALE
}
