//! Parallel frequency-sweep harness.
//!
//! A sweep evaluates a pure per-sample function over a uniform grid. The grid
//! is split into contiguous chunks, the chunks are evaluated sequentially or on
//! a worker pool, and the per-chunk results are merged back into index order
//! with a completeness check before anything is persisted or plotted.

pub mod aggregate;
pub mod dispatch;
pub mod domain;
pub mod evaluator;
pub mod harness;
pub mod optics;
pub mod partition;
pub mod sampling;
pub mod sink;

pub use aggregate::merge;
pub use dispatch::{
    Dispatch, MAX_THREADS, ParallelDispatcher, SequentialDispatcher, dispatcher_for,
};
pub use domain::{
    Chunk, EvaluationFailure, ExecutionMode, ResultSpace, Sample, SampleResult, SweepError,
    SweepErrorCategory, SweepResult,
};
pub use evaluator::Evaluator;
pub use harness::{SweepConfig, SweepOutcome, run_sweep};
pub use partition::{MAX_WORKERS, partition};
pub use sampling::SampleSpace;
