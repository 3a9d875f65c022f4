//! Encoding and decoding of tile coordinates to dense ids.
//!
//! The [`TileCodec`] owns a [`ZoomOffsets`] table and a [`CurveIndex`] implementation. Every
//! zoom level `z` gets the id range `offset(z)..offset(z + 1)`; inside that range a tile's local
//! position is either its TMS position or its position along the curve:
//!
//! ```text
//! tms:    id = offset(z) + x · 2ᶻ + (2ᶻ − 1 − y)
//! curve:  id = offset(z) + curve.xy_to_index(z, x, y)
//! ```
//!
//! The codec holds no mutable state and can be shared between threads (e.g. in an `Arc`).

use super::{TileCoord, TileOrder, ZoomOffsets};
use crate::utils::{
	CurveIndex, HilbertCurve,
	projection::{world_x, world_y},
};
use anyhow::{Context, Result, ensure};
use std::{fmt::Debug, ops::Range};

/// Position of `(x, y)` within level `z` in TMS order: x ascending, then y descending.
///
/// Coordinates must be valid for `z`.
#[must_use]
#[inline]
pub fn tms_xy_to_position(z: u8, x: u32, y: u32) -> u32 {
	let dim = 1u32 << z;
	x * dim + (dim - 1 - y)
}

/// Inverse of [`tms_xy_to_position`]. `position` must be below `4^z`.
#[must_use]
#[inline]
pub fn tms_position_to_xy(z: u8, position: u32) -> (u32, u32) {
	if z == 0 {
		return (0, 0);
	}
	let dim = 1u32 << z;
	(position / dim, dim - 1 - position % dim)
}

/// Converts between tile coordinates and dense `u32` ids for zoom levels `0..=max_zoom`.
///
/// # Examples
/// ```
/// use tilecode_core::{TileCodec, TileOrder};
///
/// let codec = TileCodec::new(15)?;
/// assert_eq!(codec.encode(0, 0, 1)?.encoded(), 2);
///
/// // curve ids stay inside the same level range
/// let id = codec.curve_encode(0, 0, 1)?;
/// assert!(codec.level_range(1)?.contains(&id));
/// assert_eq!(codec.curve_decode(id)?, codec.encode(0, 0, 1)?);
///
/// let tiles: Vec<_> = codec.iter_level(TileOrder::Curve, 1)?.map(|t| (t.x(), t.y())).collect();
/// assert_eq!(tiles, [(0, 0), (0, 1), (1, 1), (1, 0)]);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone)]
pub struct TileCodec<C = HilbertCurve> {
	offsets: ZoomOffsets,
	curve: C,
}

impl TileCodec<HilbertCurve> {
	/// Creates a codec for levels `0..=max_zoom` that uses the Hilbert curve for curve order.
	///
	/// # Errors
	/// Fails if `max_zoom` is too large for `u32` ids (see [`ZoomOffsets::new`]).
	pub fn new(max_zoom: u8) -> Result<Self> {
		TileCodec::with_curve(max_zoom, HilbertCurve)
	}
}

impl<C: CurveIndex> TileCodec<C> {
	/// Creates a codec for levels `0..=max_zoom` using `curve` for curve order.
	///
	/// # Errors
	/// Fails if `max_zoom` is too large for `u32` ids (see [`ZoomOffsets::new`]).
	pub fn with_curve(max_zoom: u8, curve: C) -> Result<Self> {
		let offsets = ZoomOffsets::new(max_zoom).context("Failed to create tile codec")?;
		log::debug!(
			"tile codec ready: levels 0..={max_zoom}, {} ids, {} curve",
			offsets.tile_count(),
			curve.name()
		);
		Ok(TileCodec { offsets, curve })
	}

	#[must_use]
	pub fn offsets(&self) -> &ZoomOffsets {
		&self.offsets
	}

	#[must_use]
	pub fn curve(&self) -> &C {
		&self.curve
	}

	#[must_use]
	pub fn max_zoom(&self) -> u8 {
		self.offsets.max_zoom()
	}

	/// The ids of all tiles on level `z`, in either order.
	///
	/// # Errors
	/// Fails if `z > max_zoom`.
	pub fn level_range(&self, z: u8) -> Result<Range<u32>> {
		self.offsets.level_range(z)
	}

	fn check_coord(&self, x: u32, y: u32, z: u8) -> Result<()> {
		self.offsets.check_zoom(z)?;
		let size = 1u32 << z;
		ensure!(x < size, "x ({x}) out of bounds for level {z}");
		ensure!(y < size, "y ({y}) out of bounds for level {z}");
		Ok(())
	}

	/// Builds a coordinate from already validated parts.
	fn tms_coord(&self, x: u32, y: u32, z: u8) -> TileCoord {
		TileCoord::from_parts(self.offsets.start(z) + tms_xy_to_position(z, x, y), x, y, z)
	}

	/// Builds the coordinate at curve position `position` of level `z`, both already validated.
	fn curve_coord(&self, z: u8, position: u32) -> TileCoord {
		let (x, y) = self.curve.index_to_xy(z, u64::from(position));
		debug_assert!(x < (1 << z) && y < (1 << z), "{} curve left the grid", self.curve.name());
		self.tms_coord(x, y, z)
	}

	/// Encodes tile `(x, y)` of level `z` with its TMS id.
	///
	/// # Errors
	/// Fails if `z > max_zoom` or `x`/`y` are not below `2^z`.
	pub fn encode(&self, x: u32, y: u32, z: u8) -> Result<TileCoord> {
		self.check_coord(x, y, z)?;
		Ok(self.tms_coord(x, y, z))
	}

	/// Decodes a TMS id.
	///
	/// # Errors
	/// Fails if `encoded` is not below the total tile count.
	pub fn decode(&self, encoded: u32) -> Result<TileCoord> {
		let z = self.offsets.zoom_for_index(encoded)?;
		let (x, y) = tms_position_to_xy(z, encoded - self.offsets.start(z));
		Ok(TileCoord::from_parts(encoded, x, y, z))
	}

	/// The curve-ordered id of tile `(x, y)` of level `z`.
	///
	/// # Errors
	/// Fails if `z > max_zoom` or `x`/`y` are not below `2^z`.
	pub fn curve_encode(&self, x: u32, y: u32, z: u8) -> Result<u32> {
		self.check_coord(x, y, z)?;
		let position = self.curve.xy_to_index(z, x, y);
		debug_assert!(position < 1 << (2 * u32::from(z)), "{} curve left the level", self.curve.name());
		Ok(self.offsets.start(z) + position as u32)
	}

	/// The curve-ordered id of `coord`.
	///
	/// # Errors
	/// Fails if `coord` lies deeper than this codec's `max_zoom`.
	pub fn curve_encoded(&self, coord: &TileCoord) -> Result<u32> {
		self.curve_encode(coord.x(), coord.y(), coord.z())
	}

	/// Decodes a curve-ordered id. The returned coordinate carries its TMS id.
	///
	/// # Errors
	/// Fails if `encoded` is not below the total tile count.
	pub fn curve_decode(&self, encoded: u32) -> Result<TileCoord> {
		let z = self.offsets.zoom_for_index(encoded)?;
		Ok(self.curve_coord(z, encoded - self.offsets.start(z)))
	}

	/// The id of `coord` in `order`.
	///
	/// # Errors
	/// Fails if `coord` lies deeper than this codec's `max_zoom`.
	pub fn encode_ordered(&self, order: TileOrder, coord: &TileCoord) -> Result<u32> {
		match order {
			TileOrder::Tms => {
				self.offsets.check_zoom(coord.z())?;
				Ok(coord.encoded())
			}
			TileOrder::Curve => self.curve_encoded(coord),
		}
	}

	/// Decodes an id produced in `order`.
	///
	/// # Errors
	/// Fails if `encoded` is not below the total tile count.
	pub fn decode_ordered(&self, order: TileOrder, encoded: u32) -> Result<TileCoord> {
		match order {
			TileOrder::Tms => self.decode(encoded),
			TileOrder::Curve => self.curve_decode(encoded),
		}
	}

	/// All tiles of level `z`, in ascending id order of `order`.
	///
	/// # Errors
	/// Fails if `z > max_zoom`.
	pub fn iter_level(&self, order: TileOrder, z: u8) -> Result<impl Iterator<Item = TileCoord> + '_> {
		let range = self.level_range(z)?;
		let start = range.start;
		Ok(range.map(move |id| match order {
			TileOrder::Tms => {
				let (x, y) = tms_position_to_xy(z, id - start);
				TileCoord::from_parts(id, x, y, z)
			}
			TileOrder::Curve => self.curve_coord(z, id - start),
		}))
	}

	/// The tile one level up that contains `coord`.
	///
	/// # Errors
	/// Fails for the root tile, which has no parent, or if `coord` lies deeper than `max_zoom`.
	pub fn parent(&self, coord: &TileCoord) -> Result<TileCoord> {
		ensure!(coord.z() > 0, "tile {coord} on level 0 has no parent");
		self.encode(coord.x() / 2, coord.y() / 2, coord.z() - 1)
	}

	/// The tile of level `z` containing the point `(lon, lat)` in degrees.
	///
	/// Points on the eastern or southern edge of the map are placed in the last column/row.
	///
	/// # Errors
	/// Fails if the point is outside `[-180, 180] × [-90, 90]` or `z > max_zoom`.
	pub fn from_geo(&self, lon: f64, lat: f64, z: u8) -> Result<TileCoord> {
		self.tile_at_geo(lon, lat, z)
			.with_context(|| format!("Failed to convert geo coordinates ({lon}, {lat}, {z}) to TileCoord"))
	}

	fn tile_at_geo(&self, lon: f64, lat: f64, z: u8) -> Result<TileCoord> {
		self.offsets.check_zoom(z)?;
		ensure!((-180.0..=180.0).contains(&lon), "lon ({lon}) must be within [-180, 180]");
		ensure!((-90.0..=90.0).contains(&lat), "lat ({lat}) must be within [-90, 90]");

		let scale = f64::from(1u32 << z);
		let max = scale - 1.0;
		let x = (world_x(lon) * scale).floor().clamp(0.0, max) as u32;
		let y = (world_y(lat) * scale).floor().clamp(0.0, max) as u32;
		Ok(self.tms_coord(x, y, z))
	}

	/// How far `coord` is through its level when tiles are processed in curve order, in `[0, 1)`.
	#[must_use]
	pub fn curve_progress(&self, coord: &TileCoord) -> f64 {
		let position = self.curve.xy_to_index(coord.z(), coord.x(), coord.y());
		position as f64 / (1u64 << (2 * u32::from(coord.z()))) as f64
	}
}

impl<C: CurveIndex> Debug for TileCodec<C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TileCodec")
			.field("max_zoom", &self.max_zoom())
			.field("tile_count", &self.offsets.tile_count())
			.field("curve", &self.curve.name())
			.finish()
	}
}
