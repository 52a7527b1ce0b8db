//! Defines the interface of the externally owned tile downloader and its
//! completion-listener fan-out.
//!
//! The downloader is injected explicitly and shared by reference between the
//! dispatcher, the download bridge and the pending jobs; its listener list is
//! reused to notify the UI of *any* category's completion, not only finished
//! downloads.

use crate::types::TileFetchRequest;
use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

/// Callback notified when background work completes.
///
/// A `Some(request)` argument identifies a finished tile download; `None` is
/// the generic "something completed, refresh the map" signal used by the
/// dispatcher and the pending jobs.
pub trait DownloadListener: Send + Sync {
	fn tile_downloaded(&self, request: Option<&TileFetchRequest>);
}

/// The network downloader fetching missing tiles.
pub trait DownloaderTrait: Debug + Send + Sync {
	/// Returns `true` while any transfer is in flight.
	fn is_active(&self) -> bool;

	/// Returns `true` if a download targeting `path` is currently running.
	fn is_file_downloading(&self, path: &Path) -> bool;

	/// Enqueues a tile download. Non-blocking.
	fn enqueue_download(&self, request: TileFetchRequest);

	/// The currently registered completion listeners.
	fn listeners(&self) -> Vec<Arc<dyn DownloadListener>>;
}
