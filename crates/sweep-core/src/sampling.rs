//! Uniform sample grid over a closed interval.

use crate::domain::{Chunk, Sample, SweepError, SweepResult};

/// Immutable, ordered grid of `count` inputs spanning `[start, end]` inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSpace {
    start: f64,
    end: f64,
    samples: Vec<Sample>,
}

impl SampleSpace {
    pub fn generate(start: f64, end: f64, count: usize) -> SweepResult<Self> {
        if count < 2 || !start.is_finite() || !end.is_finite() || end <= start {
            return Err(SweepError::InvalidRange { start, end, count });
        }

        let step = (end - start) / (count - 1) as f64;
        let last = count - 1;
        let samples = (0..count)
            .map(|index| Sample {
                index,
                // Pin the final point so rounding never moves it off `end`.
                input: if index == last {
                    end
                } else {
                    start + index as f64 * step
                },
            })
            .collect();

        Ok(Self {
            start,
            end,
            samples,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        (self.end - self.start) / (self.samples.len() - 1) as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        self.samples.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Samples covered by `chunk`, or `None` when it reaches past the grid.
    pub fn slice(&self, chunk: &Chunk) -> Option<&[Sample]> {
        self.samples.get(chunk.range())
    }
}
