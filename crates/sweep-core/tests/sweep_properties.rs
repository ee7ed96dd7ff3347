use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use sweep_core::optics::SlabReflectance;
use sweep_core::{
    Dispatch, EvaluationFailure, ExecutionMode, ParallelDispatcher, Sample, SampleSpace,
    SequentialDispatcher, SweepConfig, SweepError, merge, partition, run_sweep,
};

fn cubic(sample: &Sample) -> Result<f64, EvaluationFailure> {
    Ok(sample.input.powi(3) - 0.5 * sample.input)
}

#[test]
fn sequential_and_parallel_sweeps_are_identical() {
    for count in [2, 3, 17, 64, 351] {
        for workers in [1, 2, 3, 4, 7, 16, 400] {
            let space = SampleSpace::generate(0.25, 0.6, count).expect("grid should build");
            let chunks = partition(count, workers).expect("partition should succeed");

            let sequential = SequentialDispatcher
                .run(&space, &chunks, &cubic)
                .and_then(|results| merge(results, count))
                .expect("sequential sweep should succeed");
            let parallel = ParallelDispatcher::with_threads(4)
                .run(&space, &chunks, &cubic)
                .and_then(|results| merge(results, count))
                .expect("parallel sweep should succeed");

            assert_eq!(sequential, parallel, "N={count} W={workers}");
        }
    }
}

#[test]
fn out_of_order_completion_does_not_change_the_sweep() {
    // Later chunks finish first: the first chunk sleeps longest.
    let slow_head = |sample: &Sample| -> Result<f64, EvaluationFailure> {
        if sample.index < 4 {
            thread::sleep(Duration::from_millis(20));
        }
        Ok(sample.index as f64 / 10.0)
    };
    let config = SweepConfig {
        start: 0.0,
        end: 9.0,
        count: 10,
        workers: 3,
        mode: ExecutionMode::Parallel,
        threads: Some(3),
    };

    let outcome = run_sweep(&config, &slow_head).expect("sweep should succeed");
    let outputs = outcome.results.outputs();
    let expected: Vec<f64> = (0..10).map(|i| i as f64 / 10.0).collect();
    assert_eq!(outputs, expected);
}

#[test]
fn more_workers_than_samples_still_covers_every_index() {
    let config = SweepConfig {
        start: 1.0,
        end: 2.0,
        count: 5,
        workers: 9,
        mode: ExecutionMode::Parallel,
        threads: Some(2),
    };

    let outcome = run_sweep(&config, &cubic).expect("sweep should succeed");
    assert_eq!(outcome.results.len(), 5);
    assert_eq!(outcome.report.chunk_lengths, vec![1, 1, 1, 1, 1, 0, 0, 0, 0]);
    let indices: Vec<usize> = outcome.results.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn failure_cancels_remaining_parallel_work() {
    let calls = AtomicUsize::new(0);
    let fail_first = |sample: &Sample| -> Result<f64, EvaluationFailure> {
        calls.fetch_add(1, Ordering::SeqCst);
        if sample.index == 0 {
            return Err(EvaluationFailure::new("eigensolver diverged"));
        }
        thread::sleep(Duration::from_millis(2));
        Ok(0.0)
    };
    let config = SweepConfig {
        start: 0.0,
        end: 1.0,
        count: 400,
        workers: 2,
        mode: ExecutionMode::Parallel,
        threads: Some(2),
    };

    let error = run_sweep(&config, &fail_first).expect_err("sweep should fail");
    assert_eq!(
        error,
        SweepError::Evaluation {
            index: 0,
            input: 0.0,
            cause: EvaluationFailure::new("eigensolver diverged"),
        }
    );
    assert!(
        calls.load(Ordering::SeqCst) < 400,
        "the surviving chunk should stop early"
    );
}

#[test]
fn reference_slab_sweep_is_reproducible_across_modes() {
    let slab = SlabReflectance::default();
    let mut config = SweepConfig {
        workers: 4,
        ..SweepConfig::default()
    };

    config.mode = ExecutionMode::Sequential;
    let sequential = run_sweep(&config, &slab).expect("sequential sweep should succeed");
    config.mode = ExecutionMode::Parallel;
    let parallel = run_sweep(&config, &slab).expect("parallel sweep should succeed");

    assert_eq!(sequential.results, parallel.results);
    assert_eq!(sequential.report.chunk_lengths, vec![88, 88, 88, 87]);
    assert_eq!(sequential.report.evaluator, "slab-reflectance");
    let outputs = parallel.results.outputs();
    assert!(outputs.iter().all(|r| (0.0..=1.0).contains(r)));
}
