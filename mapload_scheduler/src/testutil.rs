//! Shared test doubles for the scheduler's collaborators.

use anyhow::{Result, bail};
use async_trait::async_trait;
use mapload_core::{
	Amenity, AmenityIndexTrait, BusyStatus, CachedTile, DownloadListener, DownloaderTrait, GeoPoint, PoiFilter,
	RenderSnapshot, ResultSink, RoutePlannerTrait, StatusSinkTrait, TileCoord, TileFetchRequest, TileStoreTrait,
	TransportIndexTrait, TransportStop, ViewportBounds,
};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

pub fn bounds(north: f64, south: f64, west: f64, east: f64) -> ViewportBounds {
	ViewportBounds::new(north, south, west, east).unwrap()
}

pub fn tile_request(x: u32, y: u32, zoom: u8) -> TileFetchRequest {
	let coord = TileCoord::new(zoom, x, y).unwrap();
	TileFetchRequest::new(
		&format!("https://tiles.example.org/{zoom}/{x}/{y}.png"),
		PathBuf::from(format!("/cache/osm/{zoom}/{x}/{y}.png")),
		coord,
		"osm",
		PathBuf::from("/cache/osm"),
	)
}

pub fn render_snapshot() -> RenderSnapshot {
	RenderSnapshot {
		bounds: bounds(10.0, 0.0, 0.0, 10.0),
		rotation: 0.0,
		zoom: 14.5,
		screen_width: 1080,
		screen_height: 1920,
	}
}

/// Polls `condition` until it holds, panicking after a generous deadline.
pub async fn wait_until(description: &str, condition: impl Fn() -> bool) {
	for _ in 0..200 {
		if condition() {
			return;
		}
		tokio::time::sleep(Duration::from_millis(10)).await;
	}
	panic!("timed out waiting until {description}");
}

#[derive(Debug, Default)]
pub struct RecordingStatusSink {
	published: Mutex<Vec<BusyStatus>>,
}

impl RecordingStatusSink {
	pub fn published(&self) -> Vec<BusyStatus> {
		self.published.lock().unwrap().clone()
	}
}

impl StatusSinkTrait for RecordingStatusSink {
	fn publish(&self, status: BusyStatus) {
		self.published.lock().unwrap().push(status);
	}
}

#[derive(Debug, Default)]
pub struct CountingListener {
	notifications: AtomicUsize,
}

impl CountingListener {
	pub fn notifications(&self) -> usize {
		self.notifications.load(Ordering::SeqCst)
	}
}

impl DownloadListener for CountingListener {
	fn tile_downloaded(&self, _request: Option<&TileFetchRequest>) {
		self.notifications.fetch_add(1, Ordering::SeqCst);
	}
}

#[derive(Default)]
pub struct MockDownloader {
	pub active: AtomicBool,
	downloading: Mutex<HashSet<PathBuf>>,
	enqueued: Mutex<Vec<TileFetchRequest>>,
	listener_list: Mutex<Vec<Arc<dyn DownloadListener>>>,
}

impl MockDownloader {
	pub fn add_listener(&self, listener: Arc<dyn DownloadListener>) {
		self.listener_list.lock().unwrap().push(listener);
	}

	pub fn mark_downloading(&self, path: PathBuf) {
		self.downloading.lock().unwrap().insert(path);
	}

	pub fn enqueued(&self) -> usize {
		self.enqueued.lock().unwrap().len()
	}
}

impl Debug for MockDownloader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockDownloader")
			.field("active", &self.active)
			.field("enqueued", &self.enqueued.lock().unwrap().len())
			.finish()
	}
}

impl DownloaderTrait for MockDownloader {
	fn is_active(&self) -> bool {
		self.active.load(Ordering::SeqCst)
	}

	fn is_file_downloading(&self, path: &Path) -> bool {
		self.downloading.lock().unwrap().contains(path)
	}

	fn enqueue_download(&self, request: TileFetchRequest) {
		self.enqueued.lock().unwrap().push(request);
	}

	fn listeners(&self) -> Vec<Arc<dyn DownloadListener>> {
		self.listener_list.lock().unwrap().clone()
	}
}

#[derive(Debug, Default)]
pub struct MockRoutePlanner {
	pub calculating: AtomicBool,
}

impl RoutePlannerTrait for MockRoutePlanner {
	fn is_route_being_calculated(&self) -> bool {
		self.calculating.load(Ordering::SeqCst)
	}
}

#[derive(Debug, Default)]
pub struct MockTileStore {
	tiles: Mutex<HashMap<String, CachedTile>>,
	lookups: Mutex<Vec<String>>,
	renders: AtomicUsize,
}

impl MockTileStore {
	pub fn insert_tile(&self, tile_id: &str) {
		self
			.tiles
			.lock()
			.unwrap()
			.insert(tile_id.to_string(), CachedTile { data: vec![0u8; 4] });
	}

	pub fn lookups(&self) -> Vec<String> {
		self.lookups.lock().unwrap().clone()
	}

	pub fn renders(&self) -> usize {
		self.renders.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl TileStoreTrait for MockTileStore {
	async fn lookup_tile(&self, request: &TileFetchRequest) -> Result<Option<CachedTile>> {
		self.lookups.lock().unwrap().push(request.tile_id.clone());
		Ok(self.tiles.lock().unwrap().get(&request.tile_id).cloned())
	}

	async fn render_viewport(&self, _snapshot: &RenderSnapshot, _listeners: &[Arc<dyn DownloadListener>]) -> Result<()> {
		self.renders.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}
}

fn sample_amenity(id: u64) -> Amenity {
	Amenity {
		id,
		name: format!("amenity {id}"),
		kind: "cafe".to_string(),
		position: GeoPoint::new(52.5, 13.4),
	}
}

fn sample_stop(id: u64) -> TransportStop {
	TransportStop {
		id,
		name: format!("stop {id}"),
		position: GeoPoint::new(52.5, 13.4),
	}
}

/// Serves a fixed number of amenities immediately.
#[derive(Debug, Default)]
pub struct StaticAmenityIndex {
	items: usize,
	queries: AtomicUsize,
}

impl StaticAmenityIndex {
	pub fn with_items(items: usize) -> StaticAmenityIndex {
		StaticAmenityIndex {
			items,
			queries: AtomicUsize::new(0),
		}
	}

	pub fn queries(&self) -> usize {
		self.queries.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl AmenityIndexTrait for StaticAmenityIndex {
	async fn query_amenities(
		&self,
		_bounds: &ViewportBounds,
		_zoom: u8,
		_filter: &PoiFilter,
		sink: &dyn ResultSink<Amenity>,
	) -> Result<()> {
		self.queries.fetch_add(1, Ordering::SeqCst);
		for id in 0..self.items {
			if sink.is_cancelled() || !sink.accept(sample_amenity(id as u64)) {
				break;
			}
		}
		Ok(())
	}
}

/// Blocks inside the query until a permit is released, to keep a job
/// unfinished for as long as a test needs.
#[derive(Debug)]
pub struct GatedAmenityIndex {
	pub gate: Semaphore,
	queries: AtomicUsize,
}

impl Default for GatedAmenityIndex {
	fn default() -> Self {
		GatedAmenityIndex {
			gate: Semaphore::new(0),
			queries: AtomicUsize::new(0),
		}
	}
}

impl GatedAmenityIndex {
	pub fn queries(&self) -> usize {
		self.queries.load(Ordering::SeqCst)
	}

	pub fn release_one(&self) {
		self.gate.add_permits(1);
	}
}

#[async_trait]
impl AmenityIndexTrait for GatedAmenityIndex {
	async fn query_amenities(
		&self,
		_bounds: &ViewportBounds,
		_zoom: u8,
		_filter: &PoiFilter,
		_sink: &dyn ResultSink<Amenity>,
	) -> Result<()> {
		self.queries.fetch_add(1, Ordering::SeqCst);
		let permit = self.gate.acquire().await?;
		permit.forget();
		Ok(())
	}
}

/// Always fails, for exercising the job-runner error boundary.
#[derive(Debug, Default)]
pub struct FailingAmenityIndex {
	queries: AtomicUsize,
}

impl FailingAmenityIndex {
	pub fn queries(&self) -> usize {
		self.queries.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl AmenityIndexTrait for FailingAmenityIndex {
	async fn query_amenities(
		&self,
		_bounds: &ViewportBounds,
		_zoom: u8,
		_filter: &PoiFilter,
		_sink: &dyn ResultSink<Amenity>,
	) -> Result<()> {
		self.queries.fetch_add(1, Ordering::SeqCst);
		bail!("index offline");
	}
}

/// Offers more stops than any sink should accept, ignoring the limit it was
/// given, and counts how many the sink actually took.
#[derive(Debug, Default)]
pub struct FloodingTransportIndex {
	available: usize,
	fed: AtomicUsize,
}

impl FloodingTransportIndex {
	pub fn with_stops(available: usize) -> FloodingTransportIndex {
		FloodingTransportIndex {
			available,
			fed: AtomicUsize::new(0),
		}
	}

	pub fn fed(&self) -> usize {
		self.fed.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl TransportIndexTrait for FloodingTransportIndex {
	async fn query_stops(
		&self,
		_bounds: &ViewportBounds,
		_zoom: u8,
		_limit: usize,
		sink: &dyn ResultSink<TransportStop>,
	) -> Result<()> {
		for id in 0..self.available {
			if sink.is_cancelled() || !sink.accept(sample_stop(id as u64)) {
				break;
			}
			self.fed.fetch_add(1, Ordering::SeqCst);
		}
		Ok(())
	}
}
