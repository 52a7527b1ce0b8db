//! The dispatcher loop: drains the intake queue once per cycle, applies the
//! per-category coalescing policy, hands jobs to the category workers or the
//! synchronous renderer path, and keeps the busy status published.
//!
//! The dispatcher runs on its own task and owns all scheduling state: the
//! per-category job slots and worker handles never leave this context, so
//! replace-or-drop decisions need no locking. A fault inside one cycle is
//! logged and never terminates the loop.

use crate::category_worker::CategoryWorker;
use crate::dispatch_queue::DispatchQueue;
use crate::download_bridge::DownloadBridge;
use crate::pending_job::{AmenityJob, TransportJob};
use crate::status_publisher::StatusPublisher;
use itertools::Itertools;
use mapload_core::{
	ActivitySnapshot, AmenityQuery, BusyStatus, DownloaderTrait, LoadRequest, RenderSnapshot, RoutePlannerTrait,
	StatusSinkTrait, TileFetchRequest, TileStoreTrait, TransportQuery,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// Pause between the end of one cycle and the start of the next. The cycle
/// period is processing time plus this pause, not a fixed-rate clock.
pub(crate) const DISPATCH_PAUSE: Duration = Duration::from_millis(750);

pub(crate) struct Dispatcher {
	queue: Arc<DispatchQueue>,
	store: Arc<dyn TileStoreTrait>,
	downloader: Arc<dyn DownloaderTrait>,
	route_planner: Arc<dyn RoutePlannerTrait>,
	bridge: DownloadBridge,
	status: StatusPublisher,
	amenity_worker: Option<CategoryWorker>,
	transport_worker: Option<CategoryWorker>,
	amenity_job: Option<Arc<AmenityJob>>,
	transport_job: Option<Arc<TransportJob>>,
}

impl Dispatcher {
	pub fn new(
		queue: Arc<DispatchQueue>,
		store: Arc<dyn TileStoreTrait>,
		downloader: Arc<dyn DownloaderTrait>,
		route_planner: Arc<dyn RoutePlannerTrait>,
		status_sink: Arc<dyn StatusSinkTrait>,
	) -> Dispatcher {
		Dispatcher {
			queue,
			store,
			bridge: DownloadBridge::new(downloader.clone()),
			downloader,
			route_planner,
			status: StatusPublisher::new(status_sink),
			amenity_worker: None,
			transport_worker: None,
			amenity_job: None,
			transport_job: None,
		}
	}

	/// Runs cycles until the exit signal fires. Only returns on shutdown.
	pub async fn run(mut self, mut exit_receiver: oneshot::Receiver<()>) {
		log::debug!("dispatcher started");
		loop {
			self.cycle().await;
			tokio::select! {
				_ = &mut exit_receiver => {
					log::debug!("dispatcher stopped");
					return;
				}
				() = tokio::time::sleep(DISPATCH_PAUSE) => {}
			}
		}
	}

	/// One full drain-classify-dispatch pass.
	pub async fn cycle(&mut self) {
		let progress_before = self.current_status();
		self.status.publish_if_changed(progress_before);

		let drained = self.queue.drain_all();
		log::trace!("dispatch cycle: {} request(s) drained", drained.len());

		// Newest first. Within one drain only the first request of a category
		// is considered; later (older) requests of that category are discarded
		// unexamined, which keeps a fast-panning viewport responsive.
		let mut tile_requests: Vec<TileFetchRequest> = Vec::new();
		let mut amenity_winner: Option<AmenityQuery> = None;
		let mut transport_winner: Option<TransportQuery> = None;
		let mut render_winner: Option<RenderSnapshot> = None;
		for request in drained.into_iter().rev() {
			match request {
				LoadRequest::Tile(tile) => tile_requests.push(tile),
				LoadRequest::Amenity(query) => {
					if amenity_winner.is_none() {
						amenity_winner = Some(query);
					}
				}
				LoadRequest::Transport(query) => {
					if transport_winner.is_none() {
						transport_winner = Some(query);
					}
				}
				LoadRequest::MapRender(snapshot) => {
					if render_winner.is_none() {
						render_winner = Some(snapshot);
					}
				}
			}
		}

		let mut tile_loaded = false;
		for request in tile_requests
			.into_iter()
			.unique_by(|request| request.tile_id.clone())
		{
			match self.store.lookup_tile(&request).await {
				Ok(cached) => tile_loaded |= cached.is_some(),
				Err(error) => log::error!("tile lookup for '{}' failed: {error:#}", request.tile_id),
			}
		}

		let mut amenity_started = false;
		if let Some(query) = amenity_winner {
			amenity_started = self.dispatch_amenity(query).await;
		}

		let mut transport_started = false;
		if let Some(query) = transport_winner {
			transport_started = self.dispatch_transport(query).await;
		}

		let mut map_rendered = false;
		if let Some(snapshot) = render_winner {
			self.render_map(&snapshot).await;
			map_rendered = true;
		}

		// Single fan-out per cycle, no matter how many categories fired
		if tile_loaded || amenity_started || transport_started || map_rendered {
			self.bridge.notify_listeners();
		}

		let progress_after = self.current_status();
		if progress_after != progress_before {
			self.status.publish_if_changed(progress_after);
		}
	}

	fn current_status(&self) -> BusyStatus {
		BusyStatus::from_snapshot(&ActivitySnapshot {
			downloading: self.downloader.is_active(),
			route_calculating: self.route_planner.is_route_being_calculated(),
			queue_occupied: !self.queue.is_empty(),
			amenity_pending: self.amenity_job.as_ref().is_some_and(|job| !job.is_finished()),
			transport_pending: self.transport_job.as_ref().is_some_and(|job| !job.is_finished()),
		})
	}

	/// Applies the coalescing policy to the cycle's amenity winner. Returns
	/// `true` if a job was started.
	async fn dispatch_amenity(&mut self, query: AmenityQuery) -> bool {
		let restart = match (&self.amenity_job, &self.amenity_worker) {
			(Some(job), Some(_)) => job.needs_restart(&query),
			_ => true,
		};
		if !restart {
			log::trace!("amenity request absorbed by the current job");
			return false;
		}
		if self.amenity_worker.is_none() {
			match CategoryWorker::spawn("amenity-loader").await {
				Ok(worker) => self.amenity_worker = Some(worker),
				Err(error) => {
					log::error!("failed to start amenity worker: {error:#}");
					return false;
				}
			}
		}
		let Some(worker) = &self.amenity_worker else {
			return false;
		};
		if let Some(previous) = &self.amenity_job {
			previous.cancel();
		}
		let job = Arc::new(AmenityJob::prepare(query, self.downloader.clone()));
		match worker.post(job.clone()) {
			Ok(()) => {
				self.amenity_job = Some(job);
				true
			}
			Err(error) => {
				log::error!("failed to post amenity job: {error:#}");
				false
			}
		}
	}

	/// Applies the coalescing policy to the cycle's transport winner. Returns
	/// `true` if a job was started.
	async fn dispatch_transport(&mut self, query: TransportQuery) -> bool {
		let restart = match (&self.transport_job, &self.transport_worker) {
			(Some(job), Some(_)) => job.needs_restart(&query),
			_ => true,
		};
		if !restart {
			log::trace!("transport request absorbed by the current job");
			return false;
		}
		if self.transport_worker.is_none() {
			match CategoryWorker::spawn("transport-loader").await {
				Ok(worker) => self.transport_worker = Some(worker),
				Err(error) => {
					log::error!("failed to start transport worker: {error:#}");
					return false;
				}
			}
		}
		let Some(worker) = &self.transport_worker else {
			return false;
		};
		if let Some(previous) = &self.transport_job {
			previous.cancel();
		}
		let job = Arc::new(TransportJob::prepare(query, self.downloader.clone()));
		match worker.post(job.clone()) {
			Ok(()) => {
				self.transport_job = Some(job);
				true
			}
			Err(error) => {
				log::error!("failed to post transport job: {error:#}");
				false
			}
		}
	}

	/// Renders the map synchronously inside the dispatcher, handing the
	/// downloader's listener set to the renderer. Blocks the cycle until the
	/// render returns.
	async fn render_map(&self, snapshot: &RenderSnapshot) {
		let listeners = self.bridge.listeners();
		if let Err(error) = self.store.render_viewport(snapshot, &listeners).await {
			log::error!("map render failed: {error:#}");
		}
	}
}
