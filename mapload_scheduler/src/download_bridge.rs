//! A stateless facade over the injected tile downloader.
//!
//! The bridge exists so the dispatcher, the jobs and the UI all share one
//! reference to "what's downloading" and one listener fan-out, without any of
//! them holding the downloader as a global.

use mapload_core::{DownloadListener, DownloaderTrait, TileFetchRequest};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DownloadBridge {
	downloader: Arc<dyn DownloaderTrait>,
}

impl DownloadBridge {
	#[must_use]
	pub fn new(downloader: Arc<dyn DownloaderTrait>) -> DownloadBridge {
		DownloadBridge { downloader }
	}

	/// Returns `true` if a download targeting `path` is currently running.
	pub fn is_file_currently_downloaded(&self, path: &Path) -> bool {
		self.downloader.is_file_downloading(path)
	}

	/// Passes a tile download on to the downloader. Non-blocking.
	pub fn request_download(&self, request: TileFetchRequest) {
		self.downloader.enqueue_download(request);
	}

	/// Notifies every registered download listener with the generic
	/// "something completed" signal.
	pub fn notify_listeners(&self) {
		for listener in self.downloader.listeners() {
			listener.tile_downloaded(None);
		}
	}

	/// The downloader's current listener set, e.g. for handing to the
	/// renderer.
	#[must_use]
	pub fn listeners(&self) -> Vec<Arc<dyn DownloadListener>> {
		self.downloader.listeners()
	}
}
