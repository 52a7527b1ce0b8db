//! This module defines the `TileCoord` structure, representing the coordinates of a
//! single raster tile: column, row and zoom level. It includes methods for creating
//! tile coordinates, validating them, and deriving the textual tile identifier used
//! as the cache-lookup key.
//!
//! # Examples
//!
//! ```
//! use mapload_core::TileCoord;
//!
//! let coord = TileCoord::new(5, 17, 11).unwrap();
//! assert_eq!(coord.zoom, 5);
//! assert_eq!(coord.x, 17);
//! assert_eq!(coord.y, 11);
//! assert_eq!(coord.as_tile_id("osm"), "osm/5/17/11");
//! ```

use anyhow::{Result, ensure};
use std::fmt::{self, Debug};

#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	pub x: u32,
	pub y: u32,
	pub zoom: u8,
}

impl TileCoord {
	pub fn new(zoom: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(zoom <= 31, "zoom ({zoom}) must be <= 31");
		Ok(TileCoord { x, y, zoom })
	}

	/// Checks that the column and row fit the tile grid of this zoom level.
	pub fn is_valid(&self) -> bool {
		if self.zoom > 30 {
			return false;
		};
		let max = 2u32.pow(u32::from(self.zoom));
		(self.x < max) && (self.y < max)
	}

	/// Builds the textual tile identifier for a tile source, e.g. `"osm/5/17/11"`.
	///
	/// The identifier doubles as the relative cache path of the tile and as the
	/// deduplication key during a dispatch cycle.
	#[must_use]
	pub fn as_tile_id(&self, source: &str) -> String {
		format!("{}/{}/{}/{}", source, self.zoom, self.x, self.y)
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("TileCoord({}, [{}, {}])", &self.zoom, &self.x, &self.y))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn test_new() {
		let coord = TileCoord::new(5, 17, 11).unwrap();
		assert_eq!(coord.zoom, 5);
		assert_eq!(coord.x, 17);
		assert_eq!(coord.y, 11);
	}

	#[test]
	fn test_new_invalid_zoom() {
		assert!(TileCoord::new(32, 0, 0).is_err());
	}

	#[rstest]
	#[case(0, 0, 0, true)]
	#[case(5, 31, 31, true)]
	#[case(5, 32, 0, false)]
	#[case(5, 0, 32, false)]
	#[case(31, 0, 0, false)]
	fn test_is_valid(#[case] zoom: u8, #[case] x: u32, #[case] y: u32, #[case] expected: bool) {
		let coord = TileCoord { x, y, zoom };
		assert_eq!(coord.is_valid(), expected);
	}

	#[test]
	fn test_as_tile_id() {
		let coord = TileCoord::new(5, 1, 1).unwrap();
		assert_eq!(coord.as_tile_id("osm"), "osm/5/1/1");
		assert_eq!(coord.as_tile_id("cycle"), "cycle/5/1/1");
	}

	#[test]
	fn test_debug_format() {
		let coord = TileCoord::new(5, 17, 11).unwrap();
		assert_eq!(format!("{coord:?}"), "TileCoord(5, [17, 11])");
	}
}
