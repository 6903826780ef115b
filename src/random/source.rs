use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::preset::MotionParams;

/// Source of uniform samples in `[0, 1)`.
///
/// The animation draws all of its randomness through this trait so tests can inject a
/// scripted or seeded source and replay a run exactly.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// `floor(u * max)`, an integer-valued sample in `[0, max)`.
    fn next_floor(&mut self, max: f64) -> f64 {
        (self.next_unit() * max).floor()
    }

    /// Heading in degrees, uniform in `[0, 360)`.
    fn next_angle_deg(&mut self) -> f64 {
        self.next_unit() * 360.0
    }

    /// Drift speed: mostly slow, occasionally fast.
    ///
    /// Draws a roll first; a roll above `fast_speed_probability` picks the slow band.
    fn next_drift_speed(&mut self, motion: &MotionParams) -> f64 {
        let roll = self.next_unit();
        let band = if roll > motion.fast_speed_probability {
            motion.slow_speed_max
        } else {
            motion.fast_speed_max
        };
        self.next_unit() * band
    }
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl RandomSource for rand::rngs::ThreadRng {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Seeded, reproducible source.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Replays a fixed list of samples, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
    drawn: u64,
}

impl SequenceRandom {
    /// Build a source from samples; each is clamped into `[0, 1)`.
    ///
    /// An empty list behaves as a constant `0.0`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self {
            values,
            cursor: 0,
            drawn: 0,
        }
    }

    /// How many samples have been drawn so far.
    pub fn drawn(&self) -> u64 {
        self.drawn
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        self.drawn += 1;
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/random/source.rs"]
mod tests;
