//! The aggregated background-activity indicator shown to the UI.
//!
//! `BusyStatus` is a single ordered value, not a set: of all currently active
//! conditions only the highest-priority one is reported. Network downloads
//! outrank a running route calculation, which outranks locally pending work.

/// Composite busy status, ordered from least to most significant.
///
/// # Examples
/// ```
/// use mapload_core::BusyStatus;
///
/// assert!(BusyStatus::Downloading > BusyStatus::RouteCalculating);
/// assert!(BusyStatus::RouteCalculating > BusyStatus::QueuePending);
/// assert!(BusyStatus::QueuePending > BusyStatus::Idle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BusyStatus {
	/// No background activity at all.
	Idle,
	/// Requests are queued or a category job has not finished yet.
	QueuePending,
	/// A route is currently being computed.
	RouteCalculating,
	/// The downloader has active transfers.
	Downloading,
}

/// A point-in-time capture of every activity source the status is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivitySnapshot {
	/// The downloader reports active transfers.
	pub downloading: bool,
	/// The route planner reports an ongoing calculation.
	pub route_calculating: bool,
	/// The dispatch queue holds unprocessed requests.
	pub queue_occupied: bool,
	/// The amenity job exists and has not finished.
	pub amenity_pending: bool,
	/// The transport job exists and has not finished.
	pub transport_pending: bool,
}

impl BusyStatus {
	/// Derives the single reported status from an activity snapshot.
	///
	/// First match wins: downloading, then route calculation, then any locally
	/// pending work, then idle.
	///
	/// # Examples
	/// ```
	/// use mapload_core::{ActivitySnapshot, BusyStatus};
	///
	/// let snapshot = ActivitySnapshot {
	/// 	downloading: true,
	/// 	route_calculating: true,
	/// 	..Default::default()
	/// };
	/// assert_eq!(BusyStatus::from_snapshot(&snapshot), BusyStatus::Downloading);
	/// ```
	#[must_use]
	pub fn from_snapshot(snapshot: &ActivitySnapshot) -> BusyStatus {
		if snapshot.downloading {
			BusyStatus::Downloading
		} else if snapshot.route_calculating {
			BusyStatus::RouteCalculating
		} else if snapshot.queue_occupied || snapshot.amenity_pending || snapshot.transport_pending {
			BusyStatus::QueuePending
		} else {
			BusyStatus::Idle
		}
	}
}
