//! Pending jobs: the single in-flight unit of work tracked per coalescible
//! category, plus the coalescing decision applied to incoming requests.
//!
//! A job is created by the dispatcher when it decides to start or replace work
//! for a category. At that moment the raw viewport is expanded by half its
//! extent on every side and stored; subsequent staleness checks compare
//! incoming raw bounds against this expanded box. Once the job has been handed
//! to its category worker only the worker touches it, and only through its
//! atomic flags. A superseded job is replaced in the dispatcher's slot, never
//! mutated.

use async_trait::async_trait;
use mapload_core::{
	Amenity, AmenityIndexTrait, AmenityQuery, DownloaderTrait, PoiFilter, ResultSink, TRANSPORT_STOP_LIMIT,
	TransportIndexTrait, TransportQuery, TransportStop, ViewportBounds,
};
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A unit of work a category worker can run. Strictly one at a time.
#[async_trait]
pub(crate) trait PendingJob: Debug + Send + Sync {
	async fn run(&self);
}

/// Completion and cancellation state shared between dispatcher and worker.
#[derive(Debug, Default)]
struct JobFlags {
	finished: AtomicBool,
	cancelled: AtomicBool,
}

impl JobFlags {
	fn finish(&self) {
		self.finished.store(true, Ordering::SeqCst);
	}

	fn is_finished(&self) -> bool {
		self.finished.load(Ordering::SeqCst)
	}

	fn cancel(&self) {
		self.cancelled.store(true, Ordering::SeqCst);
	}

	fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::SeqCst)
	}
}

/// The in-flight amenity load for the single amenity slot.
#[derive(Debug)]
pub(crate) struct AmenityJob {
	zoom: u8,
	filter: PoiFilter,
	repositories: Vec<Arc<dyn AmenityIndexTrait>>,
	/// Expanded bounds, fixed at preparation time.
	bounds: ViewportBounds,
	downloader: Arc<dyn DownloaderTrait>,
	flags: JobFlags,
}

impl AmenityJob {
	/// Builds the job from a query, applying the expansion buffer to the raw
	/// viewport once.
	pub fn prepare(query: AmenityQuery, downloader: Arc<dyn DownloaderTrait>) -> AmenityJob {
		AmenityJob {
			zoom: query.zoom,
			filter: query.filter,
			repositories: query.repositories,
			bounds: query.bounds.expand_by_half(),
			downloader,
			flags: JobFlags::default(),
		}
	}

	/// The coalescing decision: `true` if `incoming` invalidates this job.
	///
	/// A different zoom or filter always invalidates; otherwise the incoming
	/// raw viewport must escape the stored expanded bounds.
	pub fn needs_restart(&self, incoming: &AmenityQuery) -> bool {
		if self.zoom != incoming.zoom || self.filter != incoming.filter {
			return true;
		}
		!self.bounds.contains(&incoming.bounds)
	}

	pub fn is_finished(&self) -> bool {
		self.flags.is_finished()
	}

	pub fn cancel(&self) {
		self.flags.cancel();
	}

	#[cfg(test)]
	pub fn bounds(&self) -> &ViewportBounds {
		&self.bounds
	}

	fn finish(&self) {
		self.flags.finish();
		for listener in self.downloader.listeners() {
			listener.tile_downloaded(None);
		}
	}
}

#[async_trait]
impl PendingJob for AmenityJob {
	async fn run(&self) {
		for repository in &self.repositories {
			if self.flags.is_cancelled() {
				break;
			}
			if let Err(error) = repository
				.query_amenities(&self.bounds, self.zoom, &self.filter, self)
				.await
			{
				// The job still finishes so a later request can retry
				log::error!("amenity query against {repository:?} failed: {error:#}");
			}
		}
		self.finish();
	}
}

impl ResultSink<Amenity> for AmenityJob {
	fn is_cancelled(&self) -> bool {
		self.flags.is_cancelled()
	}

	fn accept(&self, _item: Amenity) -> bool {
		true
	}
}

/// The in-flight transport-stop load for the single transport slot.
#[derive(Debug)]
pub(crate) struct TransportJob {
	zoom: u8,
	repositories: Vec<Arc<dyn TransportIndexTrait>>,
	/// Expanded bounds, fixed at preparation time.
	bounds: ViewportBounds,
	downloader: Arc<dyn DownloaderTrait>,
	flags: JobFlags,
	accepted: AtomicUsize,
}

impl TransportJob {
	pub fn prepare(query: TransportQuery, downloader: Arc<dyn DownloaderTrait>) -> TransportJob {
		TransportJob {
			zoom: query.zoom,
			repositories: query.repositories,
			bounds: query.bounds.expand_by_half(),
			downloader,
			flags: JobFlags::default(),
			accepted: AtomicUsize::new(0),
		}
	}

	/// The coalescing decision: `true` if `incoming` invalidates this job.
	pub fn needs_restart(&self, incoming: &TransportQuery) -> bool {
		if self.zoom != incoming.zoom {
			return true;
		}
		!self.bounds.contains(&incoming.bounds)
	}

	pub fn is_finished(&self) -> bool {
		self.flags.is_finished()
	}

	pub fn cancel(&self) {
		self.flags.cancel();
	}

	/// Number of stops the sink has accepted, never above the ceiling.
	pub fn accepted_count(&self) -> usize {
		self.accepted.load(Ordering::SeqCst).min(TRANSPORT_STOP_LIMIT)
	}

	fn finish(&self) {
		self.flags.finish();
		for listener in self.downloader.listeners() {
			listener.tile_downloaded(None);
		}
	}
}

#[async_trait]
impl PendingJob for TransportJob {
	async fn run(&self) {
		for repository in &self.repositories {
			if self.flags.is_cancelled() {
				break;
			}
			if let Err(error) = repository
				.query_stops(&self.bounds, self.zoom, TRANSPORT_STOP_LIMIT, self)
				.await
			{
				log::error!("transport query against {repository:?} failed: {error:#}");
			}
		}
		self.finish();
	}
}

impl ResultSink<TransportStop> for TransportJob {
	fn is_cancelled(&self) -> bool {
		self.flags.is_cancelled()
	}

	/// Accepts stops until the result ceiling is reached, even across
	/// repositories that ignore the limit they were given.
	fn accept(&self, _item: TransportStop) -> bool {
		let previous = self.accepted.fetch_add(1, Ordering::SeqCst);
		previous < TRANSPORT_STOP_LIMIT
	}
}
