//! Execution strategies that run an evaluator over partitioned chunks.
//!
//! Both strategies return one result vector per chunk, in chunk order, with
//! each vector in ascending index order. A failing sample fails the whole
//! run; nothing is zero-filled or skipped.

use crate::domain::{Chunk, ExecutionMode, Sample, SampleResult, SweepError, SweepResult};
use crate::evaluator::Evaluator;
use crate::sampling::SampleSpace;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, warn};

/// Upper bound on the worker pool size.
pub const MAX_THREADS: usize = 1024;

pub type ChunkResults = Vec<Vec<SampleResult>>;

pub trait Dispatch {
    fn run(
        &self,
        space: &SampleSpace,
        chunks: &[Chunk],
        evaluator: &dyn Evaluator,
    ) -> SweepResult<ChunkResults>;

    fn mode(&self) -> ExecutionMode;
}

pub fn dispatcher_for(mode: ExecutionMode, threads: usize) -> Box<dyn Dispatch> {
    match mode {
        ExecutionMode::Sequential => Box::new(SequentialDispatcher),
        ExecutionMode::Parallel => Box::new(ParallelDispatcher::with_threads(threads)),
    }
}

/// Evaluates every sample on the calling thread in global index order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialDispatcher;

impl Dispatch for SequentialDispatcher {
    fn run(
        &self,
        space: &SampleSpace,
        chunks: &[Chunk],
        evaluator: &dyn Evaluator,
    ) -> SweepResult<ChunkResults> {
        chunks
            .iter()
            .map(|chunk| {
                let samples = chunk_samples(space, chunk)?;
                debug!(
                    worker = chunk.worker,
                    start = chunk.start,
                    len = chunk.len,
                    "evaluating chunk"
                );
                samples
                    .iter()
                    .map(|sample| evaluate_sample(evaluator, sample))
                    .collect::<SweepResult<Vec<_>>>()
            })
            .collect()
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}

/// Evaluates chunks concurrently on a dedicated rayon pool.
#[derive(Debug, Clone, Copy)]
pub struct ParallelDispatcher {
    threads: usize,
}

impl ParallelDispatcher {
    pub fn new() -> Self {
        Self::with_threads(rayon::current_num_threads())
    }

    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads: threads.clamp(1, MAX_THREADS),
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Default for ParallelDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

enum ChunkOutcome {
    Completed(Vec<SampleResult>),
    Failed(SweepError),
    Cancelled,
}

impl Dispatch for ParallelDispatcher {
    fn run(
        &self,
        space: &SampleSpace,
        chunks: &[Chunk],
        evaluator: &dyn Evaluator,
    ) -> SweepResult<ChunkResults> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|index| format!("sweep-worker-{index}"))
            .build()
            .map_err(|source| SweepError::WorkerPool(source.to_string()))?;

        let cancelled = AtomicBool::new(false);
        let outcomes: Vec<ChunkOutcome> = pool.install(|| {
            chunks
                .par_iter()
                .map(|chunk| run_chunk(space, chunk, evaluator, &cancelled))
                .collect()
        });

        let mut results = Vec::with_capacity(outcomes.len());
        let mut saw_cancelled = false;
        for outcome in outcomes {
            match outcome {
                ChunkOutcome::Completed(chunk_results) => results.push(chunk_results),
                ChunkOutcome::Failed(error) => return Err(error),
                ChunkOutcome::Cancelled => saw_cancelled = true,
            }
        }

        if saw_cancelled {
            // Cancellation is only ever raised by a failing chunk.
            return Err(SweepError::WorkerPool(
                "chunk cancelled without a recorded failure".to_string(),
            ));
        }
        Ok(results)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

fn run_chunk(
    space: &SampleSpace,
    chunk: &Chunk,
    evaluator: &dyn Evaluator,
    cancelled: &AtomicBool,
) -> ChunkOutcome {
    let samples = match chunk_samples(space, chunk) {
        Ok(samples) => samples,
        Err(error) => {
            cancelled.store(true, Ordering::Relaxed);
            return ChunkOutcome::Failed(error);
        }
    };
    debug!(
        worker = chunk.worker,
        start = chunk.start,
        len = chunk.len,
        "evaluating chunk"
    );

    let mut results = Vec::with_capacity(samples.len());
    for sample in samples {
        if cancelled.load(Ordering::Relaxed) {
            warn!(
                worker = chunk.worker,
                completed = results.len(),
                "chunk cancelled after a peer failure"
            );
            return ChunkOutcome::Cancelled;
        }
        match evaluate_sample(evaluator, sample) {
            Ok(result) => results.push(result),
            Err(error) => {
                cancelled.store(true, Ordering::Relaxed);
                return ChunkOutcome::Failed(error);
            }
        }
    }

    debug!(worker = chunk.worker, len = results.len(), "chunk completed");
    ChunkOutcome::Completed(results)
}

fn chunk_samples<'a>(space: &'a SampleSpace, chunk: &Chunk) -> SweepResult<&'a [Sample]> {
    space.slice(chunk).ok_or(SweepError::InvalidPartition {
        samples: space.len(),
        workers: chunk.worker + 1,
    })
}

fn evaluate_sample(evaluator: &dyn Evaluator, sample: &Sample) -> SweepResult<SampleResult> {
    evaluator
        .evaluate(sample)
        .map(|output| SampleResult::new(*sample, output))
        .map_err(|cause| {
            error!(index = sample.index, input = sample.input, %cause, "evaluation failed");
            SweepError::Evaluation {
                index: sample.index,
                input: sample.input,
                cause,
            }
        })
}
