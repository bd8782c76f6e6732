//! Running requests off the caller's thread.
//!
//! Each request owns its cursor, shift accumulator and model, so distinct
//! requests never share mutable state. `compute_paths` fans a batch out
//! with rayon; `PathWorker` runs requests one at a time, FIFO, on a
//! dedicated thread and hands results back through futures.

use std::future::Future;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use futures::channel::oneshot;
use kurbo::{BezPath, Size};
use rayon::prelude::*;

use crate::config::ComposeConfig;
use crate::error::TextPathError;
use crate::model::ComposedTextPath;
use crate::shaping::Shaper;
use crate::text::AttributedText;

/// Compute independent requests in parallel. Results keep request order.
pub fn compute_paths(
    shaper: &dyn Shaper,
    requests: &[(AttributedText, Size)],
    config: &ComposeConfig,
) -> Vec<Result<Option<ComposedTextPath>, TextPathError>> {
    requests
        .par_iter()
        .map(|(text, bounds)| crate::compute_path(shaper, text, *bounds, config))
        .collect()
}

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A single designated worker thread with a FIFO request queue.
///
/// A request whose future is dropped before the worker reaches it is
/// skipped; one that has started always runs to completion.
pub struct PathWorker {
    shaper: Arc<dyn Shaper>,
    config: Arc<ComposeConfig>,
    sender: Option<mpsc::Sender<Job>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl PathWorker {
    pub fn spawn(shaper: Arc<dyn Shaper>, config: ComposeConfig) -> Result<Self, TextPathError> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let handle = thread::Builder::new()
            .name("textpath-worker".to_string())
            .spawn(move || {
                for job in receiver {
                    job();
                }
                log::trace!("path worker queue closed");
            })?;
        Ok(Self {
            shaper,
            config: Arc::new(config),
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Asynchronous [`compute_path`](crate::compute_path) with the worker's
    /// shaper and config.
    pub fn compute_path(
        &self,
        text: AttributedText,
        bounds: Size,
    ) -> impl Future<Output = Result<Option<ComposedTextPath>, TextPathError>> + Send + 'static {
        let shaper = Arc::clone(&self.shaper);
        let config = Arc::clone(&self.config);
        self.run(move || crate::compute_path(shaper.as_ref(), &text, bounds, &config))
    }

    /// Asynchronous [`to_curve_text`](crate::to_curve_text).
    pub fn curve_text(
        &self,
        path: BezPath,
    ) -> impl Future<Output = Result<String, TextPathError>> + Send + 'static {
        self.run(move || Ok(crate::curve::to_curve_text(&path)))
    }

    fn run<T, F>(&self, work: F) -> impl Future<Output = Result<T, TextPathError>> + Send + 'static
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, TextPathError> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Job = Box::new(move || {
            if tx.is_canceled() {
                log::debug!("request dropped before it started, skipping");
                return;
            }
            // The receiver may go away mid-run; the result is then discarded.
            let _ = tx.send(work());
        });
        let submitted = match &self.sender {
            Some(sender) => sender.send(job).map_err(|_| TextPathError::WorkerUnavailable),
            None => Err(TextPathError::WorkerUnavailable),
        };

        async move {
            submitted?;
            rx.await.map_err(|_| TextPathError::WorkerUnavailable)?
        }
    }
}

impl Drop for PathWorker {
    fn drop(&mut self) {
        // Closing the queue lets the thread drain and exit.
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("path worker panicked");
            }
        }
    }
}
