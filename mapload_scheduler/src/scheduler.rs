//! The public scheduler facade handed to UI-side producers.
//!
//! All submit operations are non-blocking fire-and-forget pushes onto the
//! dispatch queue; the dispatcher task drains them on its own cadence. The
//! collaborators (tile store, downloader, route planner, status sink) are
//! injected once at construction and shared by reference from then on.

use crate::dispatch_queue::DispatchQueue;
use crate::dispatcher::Dispatcher;
use crate::download_bridge::DownloadBridge;
use mapload_core::{
	AmenityQuery, DownloaderTrait, LoadRequest, RenderSnapshot, RoutePlannerTrait, StatusSinkTrait, TileFetchRequest,
	TileStoreTrait, TransportQuery,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::oneshot::Sender;
use tokio::task::JoinHandle;

/// The request-coalescing background scheduler.
///
/// # Examples
///
/// ```no_run
/// # use std::sync::Arc;
/// # use mapload_core::{DownloaderTrait, RoutePlannerTrait, StatusSinkTrait, TileStoreTrait};
/// use mapload_scheduler::LoadScheduler;
///
/// # async fn example(
/// #     store: Arc<dyn TileStoreTrait>,
/// #     downloader: Arc<dyn DownloaderTrait>,
/// #     route_planner: Arc<dyn RoutePlannerTrait>,
/// #     status_sink: Arc<dyn StatusSinkTrait>,
/// # ) {
/// let mut scheduler = LoadScheduler::new(store, downloader, route_planner, status_sink);
/// scheduler.start().await;
/// // ... submit requests from the UI ...
/// scheduler.stop().await;
/// # }
/// ```
pub struct LoadScheduler {
	queue: Arc<DispatchQueue>,
	bridge: DownloadBridge,
	store: Arc<dyn TileStoreTrait>,
	downloader: Arc<dyn DownloaderTrait>,
	route_planner: Arc<dyn RoutePlannerTrait>,
	status_sink: Arc<dyn StatusSinkTrait>,
	exit_signal: Option<Sender<()>>,
	task: Option<JoinHandle<()>>,
}

impl LoadScheduler {
	#[must_use]
	pub fn new(
		store: Arc<dyn TileStoreTrait>,
		downloader: Arc<dyn DownloaderTrait>,
		route_planner: Arc<dyn RoutePlannerTrait>,
		status_sink: Arc<dyn StatusSinkTrait>,
	) -> LoadScheduler {
		LoadScheduler {
			queue: Arc::new(DispatchQueue::new()),
			bridge: DownloadBridge::new(downloader.clone()),
			store,
			downloader,
			route_planner,
			status_sink,
			exit_signal: None,
			task: None,
		}
	}

	/// Spawns the dispatcher task. An already running dispatcher is stopped
	/// first.
	pub async fn start(&mut self) {
		if self.exit_signal.is_some() {
			self.stop().await;
		}

		log::info!("starting load scheduler");

		let dispatcher = Dispatcher::new(
			self.queue.clone(),
			self.store.clone(),
			self.downloader.clone(),
			self.route_planner.clone(),
			self.status_sink.clone(),
		);
		let (exit_sender, exit_receiver) = tokio::sync::oneshot::channel::<()>();
		self.task = Some(tokio::spawn(dispatcher.run(exit_receiver)));
		self.exit_signal = Some(exit_sender);
	}

	/// Signals the dispatcher task to exit and waits for it to finish.
	pub async fn stop(&mut self) {
		let Some(exit_signal) = self.exit_signal.take() else {
			return;
		};

		log::info!("stopping load scheduler");

		if exit_signal.send(()).is_err() {
			log::warn!("dispatcher was already gone on stop");
		}
		if let Some(task) = self.task.take() {
			if let Err(error) = task.await {
				log::error!("dispatcher task failed: {error}");
			}
		}
	}

	/// Queues a tile cache lookup. Non-blocking.
	pub fn request_tile_load(&self, request: TileFetchRequest) {
		self.queue.push(LoadRequest::Tile(request));
	}

	/// Queues a points-of-interest load. Non-blocking.
	pub fn request_amenity_load(&self, query: AmenityQuery) {
		self.queue.push(LoadRequest::Amenity(query));
	}

	/// Queues a transport-stop load. Non-blocking.
	pub fn request_transport_load(&self, query: TransportQuery) {
		self.queue.push(LoadRequest::Transport(query));
	}

	/// Queues a full map render. Non-blocking.
	pub fn request_map_render(&self, snapshot: RenderSnapshot) {
		self.queue.push(LoadRequest::MapRender(snapshot));
	}

	/// Returns `true` if a download targeting `path` is currently running.
	pub fn is_file_currently_downloaded(&self, path: &Path) -> bool {
		self.bridge.is_file_currently_downloaded(path)
	}

	/// Passes a tile download on to the downloader. Non-blocking.
	pub fn request_download(&self, request: TileFetchRequest) {
		self.bridge.request_download(request);
	}
}
