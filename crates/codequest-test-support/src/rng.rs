//! Test RNG: deterministic `DeterministicRng` implementations for tests.

use codequest_core::rng::DeterministicRng;

/// An RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Suitable for tests that never reach a random branch.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from a predetermined sequence, clamped into the
/// requested range. Panics if the sequence is exhausted. Used in tests that
/// need to steer the free-exploration path to a specific candidate.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val.clamp(min, max)
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}
