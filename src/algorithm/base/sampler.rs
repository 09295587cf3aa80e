use std::f64::{INFINITY, NEG_INFINITY};
use rand::RngCore;
use crate::utils::error::Result;


/// Draws a uniform value in `[0, 1)` from 53 random bits. A failing source
/// is reported, never papered over.
pub fn unit<R: RngCore + ?Sized>(rng: &mut R) -> Result<f64> {
    let mut bytes = [0u8; 8];
    rng.try_fill_bytes(&mut bytes)?;
    let bits = u64::from_le_bytes(bytes) >> 11;
    Ok(bits as f64 / (1u64 << 53) as f64)
}

/// Picks an index with probability proportional to `exp(score)`.
///
/// Scores are natural logarithms of selection weights; `-inf` (or NaN)
/// marks a candidate that cannot be chosen. Weights are taken relative to
/// the largest score before summing, which keeps long products of small
/// pheromone levels from underflowing. Returns `None` when no candidate
/// has a positive weight.
pub fn sample<R: RngCore + ?Sized>(scores: &[f64], rng: &mut R) -> Result<Option<usize>> {
    let top = scores.iter()
        .copied()
        .filter(|s| !s.is_nan())
        .fold(NEG_INFINITY, f64::max);
    if top == NEG_INFINITY {
        return Ok(None);
    }
    let weights: Vec<f64> = scores.iter()
        .map(|&score| match score {
            s if s.is_nan()       => 0.0,
            s if top == INFINITY  => if s == INFINITY { 1.0 } else { 0.0 },
            s                     => (s - top).exp(),
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    let target = unit(rng)? * sum;
    let mut accumulation = 0.0;
    let mut last = None;
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 { continue; }
        accumulation += weight;
        last = Some(i);
        if accumulation > target {
            return Ok(Some(i));
        }
    }
    Ok(last)
}
