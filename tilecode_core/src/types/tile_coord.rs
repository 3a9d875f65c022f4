//! Tile coordinates with their dense id
//!
//! A [`TileCoord`] is created by a [`TileCodec`](crate::TileCodec), either from `(x, y, z)` or
//! from an encoded id, and carries all four values. It cannot be constructed in any other way,
//! so `x`, `y`, `z` and the id always agree.
//!
//! # Examples
//!
//! ```
//! use tilecode_core::TileCodec;
//!
//! let codec = TileCodec::new(15)?;
//! let coord = codec.encode(1, 1, 1)?;
//! assert_eq!((coord.x(), coord.y(), coord.z()), (1, 1, 1));
//! assert_eq!(coord.encoded(), 3);
//!
//! let [lon, lat] = coord.as_geo();
//! assert_eq!(lon, 0.0);
//! assert!(lat.abs() < 1e-9);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::{GeoBBox, TileExtents};
use crate::utils::projection::{TILE_SIZE, lat, lon, world_x, world_y};
use anyhow::Result;
use std::{
	cmp::Ordering,
	fmt::{self, Debug, Display},
	hash::{Hash, Hasher},
};

/// One tile of a Web Mercator pyramid and its TMS-ordered id.
///
/// Equality, hashing and ordering only look at [`encoded`](Self::encoded), so sorting tile
/// coordinates sorts them by zoom level first, then by column, then by descending row.
#[derive(Clone, Copy)]
pub struct TileCoord {
	encoded: u32,
	x: u32,
	y: u32,
	z: u8,
}

impl TileCoord {
	/// Only the codec creates coordinates; it guarantees that all fields agree.
	pub(crate) fn from_parts(encoded: u32, x: u32, y: u32, z: u8) -> TileCoord {
		TileCoord { encoded, x, y, z }
	}

	/// Column, `0` is the western-most column just east of the antimeridian.
	#[must_use]
	#[inline]
	pub fn x(&self) -> u32 {
		self.x
	}

	/// Row, `0` is the northern-most row.
	#[must_use]
	#[inline]
	pub fn y(&self) -> u32 {
		self.y
	}

	/// Zoom level.
	#[must_use]
	#[inline]
	pub fn z(&self) -> u8 {
		self.z
	}

	/// Dense id in TMS order.
	#[must_use]
	#[inline]
	pub fn encoded(&self) -> u32 {
		self.encoded
	}

	fn scale(&self) -> f64 {
		f64::from(1u32 << self.z)
	}

	/// Longitude/latitude of the north-west corner as `[lon, lat]`.
	#[must_use]
	pub fn as_geo(&self) -> [f64; 2] {
		let scale = self.scale();
		[
			lon(f64::from(self.x) / scale),
			lat(f64::from(self.y) / scale),
		]
	}

	/// Geographic area covered by this tile.
	#[must_use]
	pub fn to_geo_bbox(&self) -> GeoBBox {
		let scale = self.scale();
		GeoBBox::new_unchecked(
			lon(f64::from(self.x) / scale),
			lat(f64::from(self.y + 1) / scale),
			lon(f64::from(self.x + 1) / scale),
			lat(f64::from(self.y) / scale),
		)
	}

	/// Pixel position `[px, py]` of a longitude/latitude inside a 256×256 image of this tile's
	/// grid cell.
	///
	/// Only the fractional part of the world position at this zoom is used, so the result is
	/// always in `[0, 256)`, even for points outside of this tile.
	#[must_use]
	pub fn pixel_offset(&self, lon: f64, lat: f64) -> [f64; 2] {
		let scale = self.scale();
		let x = world_x(lon) * scale;
		let y = world_y(lat) * scale;
		[(x - x.floor()) * TILE_SIZE, (y - y.floor()) * TILE_SIZE]
	}

	/// How far this tile is through its level when tiles are processed in TMS order, estimated
	/// from the column position within `extents`. The result is clamped to `[0, 1]`.
	///
	/// # Errors
	/// Fails if `extents` do not reach this tile's zoom level.
	pub fn raster_progress(&self, extents: &TileExtents) -> Result<f64> {
		let level = extents.for_zoom(self.z)?;
		let done = f64::from(self.x) - f64::from(level.min_x());
		Ok((done / f64::from(level.width())).clamp(0.0, 1.0))
	}

	/// Link to openstreetmap.org centered on the north-west corner of this tile.
	#[must_use]
	pub fn debug_url(&self) -> String {
		let [lon, lat] = self.as_geo();
		format!("https://www.openstreetmap.org/#map={}/{lat:.5}/{lon:.5}", self.z)
	}

	/// Compact JSON representation `{"z":…,"x":…,"y":…}`.
	#[must_use]
	pub fn as_json(&self) -> String {
		format!("{{\"z\":{},\"x\":{},\"y\":{}}}", self.z, self.x, self.y)
	}
}

impl PartialEq for TileCoord {
	fn eq(&self, other: &Self) -> bool {
		self.encoded == other.encoded
	}
}

impl Eq for TileCoord {}

impl Hash for TileCoord {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.encoded.hash(state);
	}
}

impl PartialOrd for TileCoord {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for TileCoord {
	fn cmp(&self, other: &Self) -> Ordering {
		self.encoded.cmp(&other.encoded)
	}
}

/// Formats as `TileCoord(z, [x, y])`.
impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.z, self.x, self.y)
	}
}

/// Formats as `{x=… y=… z=…}`.
impl Display for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{{x={} y={} z={}}}", self.x, self.y, self.z)
	}
}

#[cfg(test)]
mod tests {
	use crate::{GeoBBox, TileCodec, TileExtents};
	use approx::assert_relative_eq;
	use rstest::rstest;
	use std::collections::HashSet;

	fn codec() -> TileCodec {
		TileCodec::new(15).unwrap()
	}

	#[test]
	fn accessors() {
		let coord = codec().encode(3, 4, 5).unwrap();
		assert_eq!(coord.x(), 3);
		assert_eq!(coord.y(), 4);
		assert_eq!(coord.z(), 5);
		assert_eq!(coord.encoded(), 341 + 3 * 32 + (31 - 4));
	}

	#[test]
	fn equality_and_hash_follow_the_id() {
		let codec = codec();
		let a = codec.encode(2, 2, 2).unwrap();
		let b = codec.decode(a.encoded()).unwrap();
		assert_eq!(a, b);
		assert_ne!(a, codec.encode(2, 2, 3).unwrap());
		assert_ne!(a, codec.encode(2, 3, 2).unwrap());

		let set: HashSet<_> = [a, b, codec.curve_decode(codec.curve_encoded(&a).unwrap()).unwrap()].into();
		assert_eq!(set.len(), 1);
	}

	#[test]
	fn sorting_is_zoom_then_tms() {
		let codec = codec();
		let mut coords = vec![
			codec.encode(0, 0, 2).unwrap(),
			codec.encode(1, 0, 1).unwrap(),
			codec.encode(0, 1, 1).unwrap(),
			codec.encode(0, 0, 0).unwrap(),
			codec.encode(0, 0, 1).unwrap(),
			codec.encode(3, 3, 2).unwrap(),
		];
		coords.sort();
		let xyz: Vec<_> = coords.iter().map(|c| (c.x(), c.y(), c.z())).collect();
		assert_eq!(
			xyz,
			vec![(0, 0, 0), (0, 1, 1), (0, 0, 1), (1, 0, 1), (0, 0, 2), (3, 3, 2)]
		);
	}

	#[test]
	fn formatting() {
		let coord = codec().encode(7, 8, 4).unwrap();
		assert_eq!(format!("{coord:?}"), "TileCoord(4, [7, 8])");
		assert_eq!(coord.to_string(), "{x=7 y=8 z=4}");
		assert_eq!(coord.as_json(), "{\"z\":4,\"x\":7,\"y\":8}");
	}

	#[test]
	fn as_geo() {
		let coord = codec().encode(3, 4, 5).unwrap();
		let [lon, lat] = coord.as_geo();
		assert_relative_eq!(lon, -146.25);
		assert_relative_eq!(lat, 79.17133464081945, epsilon = 1e-10);

		let [lon, lat] = codec().encode(0, 0, 0).unwrap().as_geo();
		assert_relative_eq!(lon, -180.0);
		assert_relative_eq!(lat, 85.05112877980659, epsilon = 1e-10);
	}

	#[test]
	fn to_geo_bbox() {
		let bbox = codec().encode(3, 4, 5).unwrap().to_geo_bbox();
		let expected = [-146.25, 76.84081641443098, -135.0, 79.17133464081945];
		for (value, expected) in bbox.as_array().into_iter().zip(expected) {
			assert_relative_eq!(value, expected, epsilon = 1e-10);
		}

		let root = codec().encode(0, 0, 0).unwrap().to_geo_bbox();
		let world = GeoBBox::world();
		for (value, expected) in root.as_array().into_iter().zip(world.as_array()) {
			assert_relative_eq!(value, expected, epsilon = 1e-10);
		}
	}

	#[rstest]
	#[case(0, 0.0, 0.0, [128.0, 128.0])]
	#[case(1, 0.0, 0.0, [0.0, 0.0])]
	#[case(1, 90.0, 0.0, [128.0, 0.0])]
	#[case(2, -135.0, 0.0, [128.0, 0.0])]
	fn pixel_offset(#[case] z: u8, #[case] lon: f64, #[case] lat: f64, #[case] expected: [f64; 2]) {
		let codec = codec();
		let coord = codec.from_geo(lon, lat, z).unwrap();
		let [px, py] = coord.pixel_offset(lon, lat);
		assert_relative_eq!(px, expected[0], epsilon = 1e-9);
		assert_relative_eq!(py, expected[1], epsilon = 1e-9);
	}

	#[test]
	fn pixel_offset_stays_inside_tile() {
		let codec = codec();
		for (lon, lat) in [(13.404954, 52.520008), (-73.9857, 40.7484), (151.2093, -33.8688)] {
			let coord = codec.from_geo(lon, lat, 12).unwrap();
			let [px, py] = coord.pixel_offset(lon, lat);
			assert!((0.0..256.0).contains(&px), "{px}");
			assert!((0.0..256.0).contains(&py), "{py}");
		}
	}

	#[rstest]
	#[case(0, 0.0)]
	#[case(2, 0.25)]
	#[case(4, 0.5)]
	#[case(7, 0.875)]
	fn raster_progress_full_level(#[case] x: u32, #[case] expected: f64) {
		let extents = TileExtents::new_full(3).unwrap();
		let coord = codec().encode(x, 5, 3).unwrap();
		assert_relative_eq!(coord.raster_progress(&extents).unwrap(), expected);
	}

	#[test]
	fn raster_progress_is_clamped_and_checked() {
		let bbox = GeoBBox::new(0.0, 0.0, 90.0, 45.0).unwrap();
		let extents = TileExtents::from_geo_bbox(4, &bbox).unwrap();
		let level = extents.for_zoom(4).unwrap();
		assert_eq!((level.min_x(), level.max_x()), (8, 12));

		let codec = codec();
		assert_relative_eq!(codec.encode(0, 0, 4).unwrap().raster_progress(&extents).unwrap(), 0.0);
		assert_relative_eq!(codec.encode(10, 0, 4).unwrap().raster_progress(&extents).unwrap(), 0.5);
		assert_relative_eq!(codec.encode(15, 0, 4).unwrap().raster_progress(&extents).unwrap(), 1.0);
		assert!(codec.encode(0, 0, 5).unwrap().raster_progress(&extents).is_err());
	}

	#[test]
	fn debug_url() {
		let codec = codec();
		assert_eq!(
			codec.encode(0, 0, 1).unwrap().debug_url(),
			"https://www.openstreetmap.org/#map=1/85.05113/-180.00000"
		);
		assert_eq!(
			codec.encode(1, 1, 2).unwrap().debug_url(),
			"https://www.openstreetmap.org/#map=2/66.51326/-90.00000"
		);
	}
}
