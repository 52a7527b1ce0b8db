//! Request types accepted by the load scheduler.
//!
//! Every unit of work the UI can ask for is one [`LoadRequest`] variant. Tile
//! and map-render requests are serviced directly by the dispatcher; amenity and
//! transport requests are coalescible and go through a category worker.

use crate::traits::{AmenityIndexTrait, TransportIndexTrait};
use crate::types::{TileCoord, ViewportBounds};
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

/// Maximum number of transport stops a single transport job may return.
pub const TRANSPORT_STOP_LIMIT: usize = 200;

/// The request category, used for per-category coalescing in the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
	Tile,
	Amenity,
	Transport,
	MapRender,
}

/// An opaque, equality-comparable filter applied to amenity queries.
///
/// The scheduler only ever compares filters for equality; their meaning is
/// owned by the amenity indexes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoiFilter(pub String);

impl PoiFilter {
	#[must_use]
	pub fn new(filter: &str) -> PoiFilter {
		PoiFilter(filter.to_string())
	}
}

/// A request to resolve one raster tile, either from the file cache or by
/// handing it to the downloader.
///
/// Carries everything the downloader needs so it can be enqueued unchanged:
/// the remote `url`, the `destination` file, the owning `cache_dir`, the tile
/// `coord`, the identity of the tile `source` and the textual `tile_id` used
/// as the cache-lookup and per-cycle deduplication key.
#[derive(Debug, Clone, PartialEq)]
pub struct TileFetchRequest {
	pub url: String,
	pub destination: PathBuf,
	pub coord: TileCoord,
	pub tile_id: String,
	pub source: String,
	pub cache_dir: PathBuf,
}

impl TileFetchRequest {
	#[must_use]
	pub fn new(url: &str, destination: PathBuf, coord: TileCoord, source: &str, cache_dir: PathBuf) -> TileFetchRequest {
		TileFetchRequest {
			url: url.to_string(),
			destination,
			tile_id: coord.as_tile_id(source),
			coord,
			source: source.to_string(),
			cache_dir,
		}
	}
}

/// A request to load points of interest for a viewport.
///
/// Created with the *raw* viewport bounds; the expansion buffer is applied
/// once, when the job is started, and lives on the pending job from then on.
#[derive(Debug, Clone)]
pub struct AmenityQuery {
	pub zoom: u8,
	pub filter: PoiFilter,
	pub repositories: Vec<Arc<dyn AmenityIndexTrait>>,
	pub bounds: ViewportBounds,
}

/// A request to load transport stops for a viewport.
///
/// Like [`AmenityQuery`] this carries raw bounds only. The result count is
/// capped at [`TRANSPORT_STOP_LIMIT`].
#[derive(Debug, Clone)]
pub struct TransportQuery {
	pub zoom: u8,
	pub repositories: Vec<Arc<dyn TransportIndexTrait>>,
	pub bounds: ViewportBounds,
}

/// An immutable snapshot of the viewport transform handed to the map renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot {
	pub bounds: ViewportBounds,
	pub rotation: f64,
	pub zoom: f64,
	pub screen_width: u32,
	pub screen_height: u32,
}

/// A unit of work submitted to the scheduler by the UI.
#[derive(Debug, Clone)]
pub enum LoadRequest {
	Tile(TileFetchRequest),
	Amenity(AmenityQuery),
	Transport(TransportQuery),
	MapRender(RenderSnapshot),
}

impl LoadRequest {
	/// The coalescing category this request belongs to.
	#[must_use]
	pub fn category(&self) -> Category {
		match self {
			LoadRequest::Tile(_) => Category::Tile,
			LoadRequest::Amenity(_) => Category::Amenity,
			LoadRequest::Transport(_) => Category::Transport,
			LoadRequest::MapRender(_) => Category::MapRender,
		}
	}
}
