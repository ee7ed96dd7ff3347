//! End-to-end sweep: grid, partition, dispatch, merge.

use crate::aggregate::merge;
use crate::dispatch::{MAX_THREADS, dispatcher_for};
use crate::domain::{ExecutionMode, ResultSpace, SweepError, SweepResult};
use crate::evaluator::Evaluator;
use crate::partition::{MAX_WORKERS, chunk_lengths, partition};
use crate::sampling::SampleSpace;
use crate::sink::SweepReport;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SweepConfig {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    pub workers: usize,
    pub mode: ExecutionMode,
    /// Worker pool size; defaults to `min(workers, available parallelism)`.
    pub threads: Option<usize>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: 0.25,
            end: 0.6,
            count: 351,
            workers: available_parallelism(),
            mode: ExecutionMode::Parallel,
            threads: None,
        }
    }
}

impl SweepConfig {
    pub fn from_json_str(content: &str) -> SweepResult<Self> {
        serde_json::from_str(content)
            .map_err(|source| SweepError::config(format!("invalid sweep config: {source}")))
    }

    pub fn validate(&self) -> SweepResult<()> {
        let finite = self.start.is_finite() && self.end.is_finite();
        if self.count < 2 || !finite || self.end <= self.start {
            return Err(SweepError::InvalidRange {
                start: self.start,
                end: self.end,
                count: self.count,
            });
        }
        if !(1..=MAX_WORKERS).contains(&self.workers) {
            return Err(SweepError::InvalidPartition {
                samples: self.count,
                workers: self.workers,
            });
        }
        let out_of_bounds = |threads: &usize| !(1..=MAX_THREADS).contains(threads);
        if let Some(threads) = self.threads.filter(out_of_bounds) {
            return Err(SweepError::config(format!(
                "thread count {threads} must be between 1 and {MAX_THREADS}"
            )));
        }
        Ok(())
    }

    pub fn pool_size(&self) -> usize {
        match self.mode {
            ExecutionMode::Sequential => 1,
            ExecutionMode::Parallel => self
                .threads
                .unwrap_or_else(|| self.workers.min(available_parallelism()))
                .max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    pub results: ResultSpace,
    pub report: SweepReport,
}

pub fn run_sweep(config: &SweepConfig, evaluator: &dyn Evaluator) -> SweepResult<SweepOutcome> {
    config.validate()?;
    let started = Instant::now();

    let space = SampleSpace::generate(config.start, config.end, config.count)?;
    let chunks = partition(space.len(), config.workers)?;
    let threads = config.pool_size();
    info!(
        evaluator = evaluator.name(),
        mode = %config.mode,
        count = space.len(),
        workers = chunks.len(),
        threads,
        "starting sweep"
    );

    let dispatcher = dispatcher_for(config.mode, threads);
    let chunk_results = dispatcher.run(&space, &chunks, evaluator)?;
    let results = merge(chunk_results, space.len())?;

    let elapsed_seconds = started.elapsed().as_secs_f64();
    let (output_min, output_max) = results.output_bounds().unwrap_or((f64::NAN, f64::NAN));
    info!(elapsed_seconds, output_min, output_max, "sweep completed");

    let report = SweepReport {
        evaluator: evaluator.name().to_string(),
        mode: config.mode,
        start: config.start,
        end: config.end,
        count: space.len(),
        workers: chunks.len(),
        threads,
        chunk_lengths: chunk_lengths(&chunks),
        elapsed_seconds,
        output_min,
        output_max,
    };
    Ok(SweepOutcome { results, report })
}

pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(usize::from)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::{SweepConfig, run_sweep};
    use crate::dispatch::MAX_THREADS;
    use crate::partition::MAX_WORKERS;
    use crate::domain::{EvaluationFailure, ExecutionMode, Sample, SweepError};

    fn config(mode: ExecutionMode, workers: usize) -> SweepConfig {
        SweepConfig {
            start: 0.0,
            end: 0.9,
            count: 10,
            workers,
            mode,
            threads: Some(3),
        }
    }

    #[test]
    fn config_defaults_match_reference_sweep() {
        let config = SweepConfig::default();
        assert_eq!((config.start, config.end, config.count), (0.25, 0.6, 351));
        assert_eq!(config.mode, ExecutionMode::Parallel);
        assert!(config.workers >= 1);
    }

    #[test]
    fn config_file_fields_override_defaults() {
        let config = SweepConfig::from_json_str(
            r#"{ "count": 350, "start": 0.251, "mode": "sequential" }"#,
        )
        .expect("config should parse");
        assert_eq!(config.count, 350);
        assert_eq!(config.start, 0.251);
        assert_eq!(config.end, 0.6);
        assert_eq!(config.mode, ExecutionMode::Sequential);
        assert_eq!(config.pool_size(), 1);
    }

    #[test]
    fn unknown_config_fields_are_rejected() {
        let error = SweepConfig::from_json_str(r#"{ "numBasis": 70 }"#)
            .expect_err("unknown field should fail");
        assert_eq!(error.placeholder(), "INPUT.CONFIG");
    }

    #[test]
    fn validation_rejects_zero_workers_and_threads() {
        let mut bad = config(ExecutionMode::Parallel, 0);
        assert_eq!(
            bad.validate().expect_err("zero workers"),
            SweepError::InvalidPartition {
                samples: 10,
                workers: 0
            }
        );
        bad.workers = 2;
        bad.threads = Some(0);
        let error = bad.validate().expect_err("zero threads");
        assert_eq!(error.placeholder(), "INPUT.CONFIG");
    }

    #[test]
    fn validation_bounds_workers_and_threads() {
        let mut bad = config(ExecutionMode::Parallel, usize::MAX);
        assert_eq!(
            bad.validate().expect_err("oversized worker count"),
            SweepError::InvalidPartition {
                samples: 10,
                workers: usize::MAX
            }
        );

        bad.workers = MAX_WORKERS;
        bad.threads = Some(MAX_THREADS);
        bad.validate().expect("upper bounds are accepted");

        bad.threads = Some(MAX_THREADS + 1);
        let error = bad.validate().expect_err("oversized pool");
        assert_eq!(error.placeholder(), "INPUT.CONFIG");
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn index_over_count_evaluator_yields_tenths() {
        let evaluator =
            |sample: &Sample| -> Result<f64, EvaluationFailure> { Ok(sample.index as f64 / 10.0) };

        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let outcome = run_sweep(&config(mode, 3), &evaluator).expect("sweep should succeed");
            let pairs: Vec<(usize, f64)> =
                outcome.results.iter().map(|r| (r.index, r.output)).collect();
            let expected: Vec<(usize, f64)> = (0..10).map(|i| (i, i as f64 / 10.0)).collect();
            assert_eq!(pairs, expected, "mode {mode}");
            assert_eq!(outcome.report.chunk_lengths, vec![4, 3, 3]);
            assert_eq!(outcome.report.output_max, 0.9);
        }
    }

    #[test]
    fn evaluation_failure_aborts_without_partial_results() {
        let evaluator = |sample: &Sample| -> Result<f64, EvaluationFailure> {
            if sample.index == 9 {
                Err(EvaluationFailure::new("non-convergent"))
            } else {
                Ok(0.5)
            }
        };

        let error = run_sweep(&config(ExecutionMode::Parallel, 4), &evaluator)
            .expect_err("sweep should fail");
        assert_eq!(error.exit_code(), 4);
        assert!(matches!(error, SweepError::Evaluation { index: 9, .. }));
    }
}
