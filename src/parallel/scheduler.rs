//! Fixed-size worker pool
//!
//! Paths go into a bounded queue that is filled and closed before any worker
//! starts pulling. Each of the `workers` lanes drains that queue, applies the
//! operation and pushes one [`Outcome`] per file onto the result queue. The
//! calling thread collects results until every lane has hung up.

use std::path::PathBuf;
use crossbeam::channel;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::error::{ImgaiError, Result};
use crate::parallel::progress::ProgressIndicator;
use crate::parallel::{ImageOperation, Outcome};

/// A pool of exactly `workers` OS threads
pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("imgai-worker-{}", i))
            .build()
            .map_err(|e| ImgaiError::worker_pool(e.to_string()))?;

        debug!("Started worker pool with {} threads", workers);
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `op` once for every path; outcomes come back in completion order
    pub fn run<O>(&self, files: &[PathBuf], op: &O, progress: &dyn ProgressIndicator) -> Vec<Outcome>
    where
        O: ImageOperation + ?Sized,
    {
        let (job_tx, job_rx) = channel::bounded::<PathBuf>(files.len().max(1));
        let (result_tx, result_rx) = channel::unbounded::<Outcome>();

        for path in files {
            // Capacity matches the file count, so this never blocks
            if job_tx.send(path.clone()).is_err() {
                break;
            }
        }
        drop(job_tx);
        debug!("Queued {} files for {} workers", files.len(), self.workers);

        self.pool.in_place_scope(|scope| {
            for lane in 0..self.workers {
                let jobs = job_rx.clone();
                let results = result_tx.clone();
                scope.spawn(move |_| {
                    while let Ok(path) = jobs.recv() {
                        trace!("Worker {} processing {:?}", lane, path);
                        let result = op.apply(&path);
                        let outcome = Outcome::from_result(path, result);
                        progress.advance(1);
                        if results.send(outcome).is_err() {
                            break;
                        }
                    }
                    trace!("Worker {} finished", lane);
                });
            }
            drop(result_tx);

            debug!("Draining results");
            result_rx.iter().collect()
        })
    }
}
