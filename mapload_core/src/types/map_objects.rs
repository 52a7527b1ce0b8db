//! Minimal data model for the map objects flowing out of the spatial indexes.
//!
//! The scheduler never inspects these items itself; they pass through the
//! result sink of the pending job straight to whatever the UI registered.

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
	pub lat: f64,
	pub lon: f64,
}

impl GeoPoint {
	#[must_use]
	pub fn new(lat: f64, lon: f64) -> GeoPoint {
		GeoPoint { lat, lon }
	}
}

/// A point of interest returned by an amenity index.
#[derive(Debug, Clone, PartialEq)]
pub struct Amenity {
	pub id: u64,
	pub name: String,
	pub kind: String,
	pub position: GeoPoint,
}

/// A public transport stop returned by a transport index.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportStop {
	pub id: u64,
	pub name: String,
	pub position: GeoPoint,
}
