//! Defines the [`TileStoreTrait`], the interface to the resource store that
//! owns the tile file cache and the map renderer.

use crate::traits::DownloadListener;
use crate::types::{RenderSnapshot, TileFetchRequest};
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// A raster tile resolved from the file cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedTile {
	pub data: Vec<u8>,
}

/// The resource store consulted by the dispatcher for tile lookups and full
/// map renders.
#[async_trait]
pub trait TileStoreTrait: Debug + Send + Sync {
	/// Attempts to resolve the requested tile from the cache.
	///
	/// Returns `Ok(None)` on a cache miss; the store is free to schedule a
	/// download for the missing tile as a side effect.
	async fn lookup_tile(&self, request: &TileFetchRequest) -> Result<Option<CachedTile>>;

	/// Renders the map for the given viewport snapshot.
	///
	/// The dispatcher invokes this synchronously inside its own cycle and
	/// passes along the downloader's listener set so the renderer can trigger
	/// UI refreshes for tiles it fetches on the way.
	async fn render_viewport(&self, snapshot: &RenderSnapshot, listeners: &[Arc<dyn DownloadListener>]) -> Result<()>;
}
