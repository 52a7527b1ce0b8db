//! Defines the spatial-index traits consumed by the scheduler and the
//! [`ResultSink`] abstraction through which query results flow back.
//!
//! Implementations wrap whatever storage actually holds points of interest or
//! transport stops; the scheduler only cares that a query can be run against
//! expanded viewport bounds and that the sink can stop it cooperatively.

use crate::types::{Amenity, PoiFilter, TransportStop, ViewportBounds};
use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;

/// Receives the items produced by a spatial-index query.
///
/// The sink belongs to the pending job that issued the query. A query checks
/// [`is_cancelled`](Self::is_cancelled) between items and stops feeding when
/// [`accept`](Self::accept) returns `false`; both are cooperative, the query
/// is never forcibly interrupted.
pub trait ResultSink<T>: Send + Sync {
	/// Returns `true` once the owning job has been superseded and the query
	/// should stop early.
	fn is_cancelled(&self) -> bool;

	/// Offers one item to the sink. Returns `false` when no further items are
	/// wanted (e.g. a result-count ceiling has been reached).
	fn accept(&self, item: T) -> bool;
}

/// A searchable repository of points of interest.
#[async_trait]
pub trait AmenityIndexTrait: Debug + Send + Sync {
	/// Queries all amenities within `bounds` at `zoom` matching `filter`,
	/// feeding them into `sink`.
	async fn query_amenities(
		&self,
		bounds: &ViewportBounds,
		zoom: u8,
		filter: &PoiFilter,
		sink: &dyn ResultSink<Amenity>,
	) -> Result<()>;
}

/// A searchable repository of public transport stops.
#[async_trait]
pub trait TransportIndexTrait: Debug + Send + Sync {
	/// Queries up to `limit` transport stops within `bounds` at `zoom`,
	/// feeding them into `sink`.
	async fn query_stops(
		&self,
		bounds: &ViewportBounds,
		zoom: u8,
		limit: usize,
		sink: &dyn ResultSink<TransportStop>,
	) -> Result<()>;
}
