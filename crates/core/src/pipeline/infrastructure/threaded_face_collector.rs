use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::thread::{Scope, ScopedJoinHandle};

use crossbeam_channel::{Receiver, Sender};

use crate::detection::domain::face_locator::{FaceLocator, LocatorFactory};
use crate::pipeline::face_collector::{FaceCollector, OutcomeSink};
use crate::pipeline::face_processor::{FaceProcessor, ImageOutcome};
use crate::shared::error::AnalysisError;

const CHANNEL_CAPACITY_PER_WORKER: usize = 2;

type Job<'a> = (usize, &'a Path);
type WorkerResult = Result<ImageOutcome, AnalysisError>;

/// Processes images on a pool of worker threads.
///
/// Layout: `feeder → workers [decode/locate/normalize/extract] → caller`
///
/// Each worker owns a locator built by the factory, so locators never need
/// to be shared. Outcomes arrive out of order and are re-sequenced by image
/// index on the calling thread before they reach the sink.
pub struct ThreadedFaceCollector {
    workers: usize,
}

impl ThreadedFaceCollector {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl FaceCollector for ThreadedFaceCollector {
    fn collect(
        &self,
        paths: &[PathBuf],
        processor: &FaceProcessor,
        locators: &LocatorFactory,
        sink: &mut OutcomeSink<'_>,
    ) -> Result<(), AnalysisError> {
        if paths.is_empty() {
            return Ok(());
        }
        let worker_count = self.workers.min(paths.len());
        let cap = worker_count * CHANNEL_CAPACITY_PER_WORKER;

        std::thread::scope(|scope| -> Result<(), AnalysisError> {
            let (job_tx, job_rx) = crossbeam_channel::bounded::<Job<'_>>(cap);
            let (result_tx, result_rx) = crossbeam_channel::bounded::<WorkerResult>(cap);

            let worker_handles: Vec<_> = (0..worker_count)
                .map(|_| {
                    spawn_worker(
                        scope,
                        locators(),
                        processor,
                        job_rx.clone(),
                        result_tx.clone(),
                    )
                })
                .collect();
            drop(job_rx);
            drop(result_tx);

            let feeder_handle = spawn_feeder(scope, paths, job_tx);

            // Dropping the receiver on early return unblocks the workers.
            let delivered = deliver_in_order(result_rx, sink);

            join_threads(feeder_handle, worker_handles)?;
            let delivered = delivered?;
            if delivered != paths.len() {
                return Err(AnalysisError::Worker(format!(
                    "{delivered} of {} images processed",
                    paths.len()
                )));
            }
            Ok(())
        })
    }
}

fn spawn_feeder<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    paths: &'env [PathBuf],
    job_tx: Sender<Job<'env>>,
) -> ScopedJoinHandle<'scope, ()> {
    scope.spawn(move || {
        for (index, path) in paths.iter().enumerate() {
            if job_tx.send((index, path.as_path())).is_err() {
                break;
            }
        }
    })
}

fn spawn_worker<'scope, 'env>(
    scope: &'scope Scope<'scope, 'env>,
    mut locator: Box<dyn FaceLocator>,
    processor: &'env FaceProcessor,
    job_rx: Receiver<Job<'env>>,
    result_tx: Sender<WorkerResult>,
) -> ScopedJoinHandle<'scope, ()> {
    scope.spawn(move || {
        for (index, path) in job_rx {
            let result = processor.process(locator.as_mut(), path, index);
            if result_tx.send(result).is_err() {
                break;
            }
        }
    })
}

/// Feeds outcomes to `sink` strictly by image index, buffering early
/// arrivals. Returns how many outcomes were delivered.
fn deliver_in_order(
    results: Receiver<WorkerResult>,
    sink: &mut OutcomeSink<'_>,
) -> Result<usize, AnalysisError> {
    let mut pending: BTreeMap<usize, ImageOutcome> = BTreeMap::new();
    let mut next = 0;
    for result in results {
        let outcome = result?;
        pending.insert(outcome.index, outcome);
        while let Some(outcome) = pending.remove(&next) {
            sink(outcome)?;
            next += 1;
        }
    }
    Ok(next)
}

/// Joins all collector threads and reports the first panic.
fn join_threads(
    feeder_handle: ScopedJoinHandle<'_, ()>,
    worker_handles: Vec<ScopedJoinHandle<'_, ()>>,
) -> Result<(), AnalysisError> {
    let mut first_error = None;
    if feeder_handle.join().is_err() {
        first_error = Some(AnalysisError::Worker("feeder thread panicked".into()));
    }
    for handle in worker_handles {
        if handle.join().is_err() && first_error.is_none() {
            first_error = Some(AnalysisError::Worker("face worker thread panicked".into()));
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
