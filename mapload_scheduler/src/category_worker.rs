//! One single-threaded execution context per coalescible category.
//!
//! A worker is created lazily on the first request of its category and lives
//! for the rest of the process. It processes exactly one job at a time: the
//! next job is only picked up after the previous job's `run` has returned.
//! Spawning waits on a one-shot ready signal from the worker task.

use crate::pending_job::PendingJob;
use anyhow::{Context, Result, anyhow};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Handle to a category's serial worker task.
#[derive(Debug)]
pub(crate) struct CategoryWorker {
	name: &'static str,
	sender: mpsc::UnboundedSender<Arc<dyn PendingJob>>,
}

impl CategoryWorker {
	/// Spawns the worker task and waits until it is ready to accept jobs.
	pub async fn spawn(name: &'static str) -> Result<CategoryWorker> {
		let (sender, mut receiver) = mpsc::unbounded_channel::<Arc<dyn PendingJob>>();
		let (ready_sender, ready_receiver) = oneshot::channel::<()>();
		tokio::spawn(async move {
			if ready_sender.send(()).is_err() {
				return;
			}
			// Strictly serial: recv is only polled again once run() returned
			while let Some(job) = receiver.recv().await {
				job.run().await;
			}
			log::debug!("category worker '{name}' shut down");
		});
		ready_receiver
			.await
			.with_context(|| format!("category worker '{name}' failed to start"))?;
		log::debug!("category worker '{name}' started");
		Ok(CategoryWorker { name, sender })
	}

	/// Hands a job to the worker. Non-blocking; the job starts once the worker
	/// is free.
	pub fn post(&self, job: Arc<dyn PendingJob>) -> Result<()> {
		self
			.sender
			.send(job)
			.map_err(|_| anyhow!("category worker '{}' is gone", self.name))
	}
}
