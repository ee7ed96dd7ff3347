pub mod errors;

pub use errors::{EvaluationFailure, SweepError, SweepErrorCategory, SweepResult};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::Range;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Sequential,
    #[default]
    Parallel,
}

impl ExecutionMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }
}

impl Display for ExecutionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = SweepError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "sequential" | "serial" => Ok(Self::Sequential),
            "parallel" | "concurrent" => Ok(Self::Parallel),
            other => Err(SweepError::config(format!(
                "unknown execution mode '{other}'; expected 'sequential' or 'parallel'"
            ))),
        }
    }
}

/// One point of the sweep: its global rank and the scalar handed to the evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub input: f64,
}

/// Contiguous run of samples owned by a single worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk {
    pub worker: usize,
    pub start: usize,
    pub len: usize,
}

impl Chunk {
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleResult {
    pub index: usize,
    pub input: f64,
    pub output: f64,
}

impl SampleResult {
    pub const fn new(sample: Sample, output: f64) -> Self {
        Self {
            index: sample.index,
            input: sample.input,
            output,
        }
    }
}

/// Complete sweep, ordered by ascending sample index.
///
/// Only the aggregator builds one, after checking that every index of the
/// sweep is present exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSpace {
    results: Vec<SampleResult>,
}

impl ResultSpace {
    pub(crate) fn from_ordered(results: Vec<SampleResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SampleResult> {
        self.results.iter()
    }

    pub fn as_slice(&self) -> &[SampleResult] {
        &self.results
    }

    pub fn output_at(&self, index: usize) -> Option<f64> {
        self.results.get(index).map(|result| result.output)
    }

    pub fn inputs(&self) -> Vec<f64> {
        self.results.iter().map(|result| result.input).collect()
    }

    pub fn outputs(&self) -> Vec<f64> {
        self.results.iter().map(|result| result.output).collect()
    }

    pub fn input_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.results.iter().map(|result| result.input))
    }

    pub fn output_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.results.iter().map(|result| result.output))
    }
}

impl<'a> IntoIterator for &'a ResultSpace {
    type Item = &'a SampleResult;
    type IntoIter = std::slice::Iter<'a, SampleResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}
