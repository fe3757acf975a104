use futures_lite::FutureExt;
use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_WORKER_COUNT: usize = 5;

/// An item whose load or processing panicked, or whose worker died before finishing it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Batch item aborted: {0}")]
pub struct ItemAborted(pub String);

/// Fixed number of workers draining one bounded queue of item ids.
///
/// Every id is attempted even after another one failed. Failures, panics included, are
/// collected on a channel sized to the batch and only the first one is reported once all
/// workers finish.
#[derive(Debug, Clone, Copy)]
pub struct BatchWorkerPool {
    workers: usize,
}

impl Default for BatchWorkerPool {
    fn default() -> Self {
        BatchWorkerPool::new(DEFAULT_WORKER_COUNT)
    }
}

impl BatchWorkerPool {
    pub fn new(workers: usize) -> Self {
        BatchWorkerPool {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn run<I, T, E, L, LF, P, PF>(
        &self,
        ids: Vec<I>,
        load: L,
        process: P,
    ) -> Result<(), E>
    where
        I: Send + 'static,
        T: Send + 'static,
        E: Display + From<ItemAborted> + Send + 'static,
        L: Fn(I) -> LF + Send + Sync + 'static,
        LF: Future<Output = Result<T, E>> + Send + 'static,
        P: Fn(T) -> PF + Send + Sync + 'static,
        PF: Future<Output = Result<(), E>> + Send + 'static,
    {
        if ids.is_empty() {
            return Ok(());
        }

        let (job_sender, jobs) = async_channel::bounded::<I>(ids.len());
        let (error_sender, errors) = async_channel::bounded::<E>(ids.len());

        for id in ids {
            if job_sender.send(id).await.is_err() {
                break;
            }
        }
        job_sender.close();

        let load = Arc::new(load);
        let process = Arc::new(process);
        let mut handles = Vec::with_capacity(self.workers);

        for worker in 0..self.workers {
            let jobs = jobs.clone();
            let error_sender = error_sender.clone();
            let load = load.clone();
            let process = process.clone();

            handles.push(tokio::spawn(async move {
                while let Ok(id) = jobs.recv().await {
                    let attempt = async {
                        match load(id).await {
                            Ok(item) => process(item).await,
                            Err(e) => Err(e),
                        }
                    };
                    let result = match AssertUnwindSafe(attempt).catch_unwind().await {
                        Ok(result) => result,
                        Err(panic) => Err(E::from(ItemAborted(panic_message(panic)))),
                    };

                    if let Err(e) = result {
                        tracing::warn!(worker = worker, "Batch item failed: {}", e);
                        let _ = error_sender.send(e).await;
                    }
                }
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Batch worker stopped abnormally: {}", e);
                let _ = error_sender.try_send(E::from(ItemAborted(e.to_string())));
            }
        }
        drop(error_sender);

        match errors.try_recv() {
            Ok(error) => Err(error),
            Err(_) => Ok(()),
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked".to_string()
    }
}
