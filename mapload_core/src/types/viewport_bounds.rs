use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A viewport rectangle (`ViewportBounds`) represents the rectangular area of a map
/// that is currently visible, defined by its latitude/longitude edges.
///
/// The rectangle is defined by four `f64` values:
/// - `north`: Top edge (latitude).
/// - `south`: Bottom edge (latitude).
/// - `west`: Left edge (longitude).
/// - `east`: Right edge (longitude).
///
/// A pending load job stores the *expanded* form of the viewport it was started
/// for (see [`expand_by_half`](Self::expand_by_half)), which may exceed the
/// world range of ±90°/±180°. Only the edge ordering is therefore validated.
///
/// # Examples
///
/// ## Creating a new `ViewportBounds`
/// ```
/// use mapload_core::ViewportBounds;
///
/// let bounds = ViewportBounds::new(10.0, 0.0, 0.0, 10.0).unwrap();
/// assert_eq!(bounds.as_tuple(), (10.0, 0.0, 0.0, 10.0));
/// ```
///
/// ## Expanding a viewport by half its extent
/// ```
/// use mapload_core::ViewportBounds;
///
/// let bounds = ViewportBounds::new(10.0, 0.0, 0.0, 10.0).unwrap();
/// let expanded = bounds.expand_by_half();
/// assert_eq!(expanded.as_tuple(), (15.0, -5.0, -5.0, 15.0));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct ViewportBounds {
	pub north: f64,
	pub south: f64,
	pub west: f64,
	pub east: f64,
}

impl ViewportBounds {
	/// Creates a new `ViewportBounds` from four `f64` values:
	/// `north, south, west, east`.
	///
	/// # Errors
	///
	/// Returns an error if `north < south` or `east < west`.
	///
	/// # Examples
	/// ```
	/// use mapload_core::ViewportBounds;
	///
	/// let bounds = ViewportBounds::new(52.6, 52.4, 13.2, 13.6).unwrap();
	/// assert_eq!(bounds.north, 52.6);
	/// assert_eq!(bounds.south, 52.4);
	/// assert_eq!(bounds.west, 13.2);
	/// assert_eq!(bounds.east, 13.6);
	/// ```
	pub fn new(north: f64, south: f64, west: f64, east: f64) -> Result<ViewportBounds> {
		ViewportBounds {
			north,
			south,
			west,
			east,
		}
		.checked()
	}

	/// Returns a new `ViewportBounds` enlarged by half the extent on every side.
	///
	/// This is the staleness buffer applied to a viewport when a load job is
	/// started for it: small pans stay within the expanded rectangle and do not
	/// retrigger a reload.
	///
	/// - `north' = north + (north - south) / 2`
	/// - `south' = south - (north - south) / 2`
	/// - `west' = west - (east - west) / 2`
	/// - `east' = east + (east - west) / 2`
	///
	/// # Examples
	/// ```
	/// use mapload_core::ViewportBounds;
	///
	/// let bounds = ViewportBounds::new(10.0, 0.0, 0.0, 10.0).unwrap();
	/// assert_eq!(bounds.expand_by_half().as_tuple(), (15.0, -5.0, -5.0, 15.0));
	/// ```
	#[must_use]
	pub fn expand_by_half(&self) -> ViewportBounds {
		let lat_buffer = (self.north - self.south) / 2.0;
		let lon_buffer = (self.east - self.west) / 2.0;
		ViewportBounds {
			north: self.north + lat_buffer,
			south: self.south - lat_buffer,
			west: self.west - lon_buffer,
			east: self.east + lon_buffer,
		}
	}

	/// Returns `true` if `other` lies fully inside `self`.
	///
	/// Used for staleness checks: a running job whose (expanded) bounds contain
	/// an incoming viewport already covers it.
	///
	/// # Examples
	/// ```
	/// use mapload_core::ViewportBounds;
	///
	/// let outer = ViewportBounds::new(15.0, -5.0, -5.0, 15.0).unwrap();
	/// let inner = ViewportBounds::new(12.0, 2.0, 2.0, 12.0).unwrap();
	/// assert!(outer.contains(&inner));
	/// assert!(!inner.contains(&outer));
	/// ```
	#[must_use]
	pub fn contains(&self, other: &ViewportBounds) -> bool {
		self.north >= other.north && self.south <= other.south && self.west <= other.west && self.east >= other.east
	}

	/// Returns the bounds as a tuple `(north, south, west, east)`.
	#[must_use]
	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.north, self.south, self.west, self.east)
	}

	/// Latitude extent of the rectangle in degrees.
	#[must_use]
	pub fn lat_extent(&self) -> f64 {
		self.north - self.south
	}

	/// Longitude extent of the rectangle in degrees.
	#[must_use]
	pub fn lon_extent(&self) -> f64 {
		self.east - self.west
	}

	fn checked(self) -> Result<Self> {
		ensure!(
			self.north >= self.south,
			"north ({}) must be >= south ({})",
			self.north,
			self.south
		);
		ensure!(
			self.east >= self.west,
			"east ({}) must be >= west ({})",
			self.east,
			self.west
		);
		Ok(self)
	}
}

impl Debug for ViewportBounds {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		// Renders the bounds in the form "ViewportBounds(10, 0, 0, 10)" for example
		write!(
			f,
			"ViewportBounds({}, {}, {}, {})",
			self.north, self.south, self.west, self.east
		)
	}
}
