//! Per-zoom tile extents of an area, used to estimate progress through a level.

use super::GeoBBox;
use crate::utils::projection::{world_x, world_y};
use anyhow::{Result, ensure};
use std::fmt::{self, Debug};

/// Columns `min_x..max_x` and rows `min_y..max_y` of one zoom level. Upper bounds are exclusive,
/// and an extent always covers at least one tile.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelExtent {
	level: u8,
	min_x: u32,
	min_y: u32,
	max_x: u32,
	max_y: u32,
}

impl LevelExtent {
	/// # Errors
	/// Fails if the extent is empty or does not fit into the `2^level` grid.
	pub fn new(level: u8, min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Result<LevelExtent> {
		ensure!(level <= 31, "level ({level}) must be <= 31");
		let size = 1u32 << level;
		ensure!(min_x < max_x, "min_x ({min_x}) must be < max_x ({max_x})");
		ensure!(min_y < max_y, "min_y ({min_y}) must be < max_y ({max_y})");
		ensure!(max_x <= size, "max_x ({max_x}) must be <= {size}");
		ensure!(max_y <= size, "max_y ({max_y}) must be <= {size}");
		Ok(LevelExtent {
			level,
			min_x,
			min_y,
			max_x,
			max_y,
		})
	}

	/// The whole grid of `level`.
	fn full(level: u8) -> LevelExtent {
		let size = 1u32 << level;
		LevelExtent {
			level,
			min_x: 0,
			min_y: 0,
			max_x: size,
			max_y: size,
		}
	}

	/// The tiles of `level` touched by `bbox`.
	fn from_geo(level: u8, bbox: &GeoBBox) -> LevelExtent {
		let size = 1u32 << level;
		let scale = f64::from(size);
		let max = f64::from(size - 1);

		// north maps to the smaller row
		let min_x = (world_x(bbox.x_min) * scale).floor().clamp(0.0, max) as u32;
		let min_y = (world_y(bbox.y_max) * scale).floor().clamp(0.0, max) as u32;
		let max_x = ((world_x(bbox.x_max) * scale).ceil() as u32).clamp(min_x + 1, size);
		let max_y = ((world_y(bbox.y_min) * scale).ceil() as u32).clamp(min_y + 1, size);

		LevelExtent {
			level,
			min_x,
			min_y,
			max_x,
			max_y,
		}
	}

	#[must_use]
	pub fn level(&self) -> u8 {
		self.level
	}

	#[must_use]
	pub fn min_x(&self) -> u32 {
		self.min_x
	}

	#[must_use]
	pub fn min_y(&self) -> u32 {
		self.min_y
	}

	/// First column after the extent.
	#[must_use]
	pub fn max_x(&self) -> u32 {
		self.max_x
	}

	/// First row after the extent.
	#[must_use]
	pub fn max_y(&self) -> u32 {
		self.max_y
	}

	#[must_use]
	pub fn width(&self) -> u32 {
		self.max_x - self.min_x
	}

	#[must_use]
	pub fn height(&self) -> u32 {
		self.max_y - self.min_y
	}

	#[must_use]
	pub fn contains(&self, x: u32, y: u32) -> bool {
		(self.min_x..self.max_x).contains(&x) && (self.min_y..self.max_y).contains(&y)
	}
}

impl Debug for LevelExtent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}: [{},{},{},{}] ({}x{})",
			self.level,
			self.min_x,
			self.min_y,
			self.max_x,
			self.max_y,
			self.width(),
			self.height()
		)
	}
}

/// Tile extents of an area on every zoom level `0..=max_zoom`.
///
/// # Examples
/// ```
/// use tilecode_core::{GeoBBox, TileExtents};
///
/// let bbox = GeoBBox::new(8.0653, 51.3563, 12.3528, 52.2564)?;
/// let extents = TileExtents::from_geo_bbox(9, &bbox)?;
/// let level = extents.for_zoom(9)?;
/// assert_eq!((level.min_x(), level.max_x()), (267, 274));
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct TileExtents {
	levels: Vec<LevelExtent>,
}

impl TileExtents {
	/// Extents covering the whole world on every level up to `max_zoom`.
	///
	/// # Errors
	/// Fails if `max_zoom > 31`.
	pub fn new_full(max_zoom: u8) -> Result<TileExtents> {
		ensure!(max_zoom <= 31, "max_zoom ({max_zoom}) must be <= 31");
		Ok(TileExtents {
			levels: (0..=max_zoom).map(LevelExtent::full).collect(),
		})
	}

	/// Extents of `bbox` on every level up to `max_zoom`.
	///
	/// # Errors
	/// Fails if `max_zoom > 31`.
	pub fn from_geo_bbox(max_zoom: u8, bbox: &GeoBBox) -> Result<TileExtents> {
		ensure!(max_zoom <= 31, "max_zoom ({max_zoom}) must be <= 31");
		Ok(TileExtents {
			levels: (0..=max_zoom).map(|z| LevelExtent::from_geo(z, bbox)).collect(),
		})
	}

	#[must_use]
	pub fn max_zoom(&self) -> u8 {
		(self.levels.len() - 1) as u8
	}

	/// # Errors
	/// Fails if `z` is deeper than the extents reach.
	pub fn for_zoom(&self, z: u8) -> Result<&LevelExtent> {
		ensure!(
			z <= self.max_zoom(),
			"zoom level ({z}) not covered by extents up to level {}",
			self.max_zoom()
		);
		Ok(&self.levels[usize::from(z)])
	}

	/// Whether tile `(x, y)` of level `z` lies inside the extents.
	#[must_use]
	pub fn contains(&self, x: u32, y: u32, z: u8) -> bool {
		self.levels.get(usize::from(z)).is_some_and(|level| level.contains(x, y))
	}
}

impl Debug for TileExtents {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.levels.iter()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn full_extents() {
		let extents = TileExtents::new_full(3).unwrap();
		assert_eq!(extents.max_zoom(), 3);
		let level = extents.for_zoom(3).unwrap();
		assert_eq!((level.width(), level.height()), (8, 8));
		assert!(extents.contains(7, 7, 3));
		assert!(!extents.contains(8, 0, 3));
		assert!(!extents.contains(0, 0, 4));
		assert_eq!(
			format!("{extents:?}"),
			"[0: [0,0,1,1] (1x1), 1: [0,0,2,2] (2x2), 2: [0,0,4,4] (4x4), 3: [0,0,8,8] (8x8)]"
		);
	}

	#[test]
	fn world_bbox_matches_full_extents() {
		let extents = TileExtents::from_geo_bbox(10, &GeoBBox::world()).unwrap();
		assert_eq!(extents, TileExtents::new_full(10).unwrap());
	}

	#[test]
	fn from_geo_bbox() {
		let bbox = GeoBBox::new(8.0653, 51.3563, 12.3528, 52.2564).unwrap();
		let extents = TileExtents::from_geo_bbox(9, &bbox).unwrap();
		assert_eq!(
			*extents.for_zoom(9).unwrap(),
			LevelExtent::new(9, 267, 168, 274, 171).unwrap()
		);
		assert_eq!(
			*extents.for_zoom(0).unwrap(),
			LevelExtent::new(0, 0, 0, 1, 1).unwrap()
		);
	}

	#[test]
	fn point_bbox_is_not_empty() {
		let bbox = GeoBBox::new(-132.0, -40.0, -132.0, -40.0).unwrap();
		let extents = TileExtents::from_geo_bbox(14, &bbox).unwrap();
		for z in 0..=14 {
			let level = extents.for_zoom(z).unwrap();
			assert_eq!((level.width(), level.height()), (1, 1), "level {z}");
		}
	}

	#[test]
	fn errors() {
		assert!(TileExtents::new_full(32).is_err());
		assert_eq!(
			TileExtents::new_full(2).unwrap().for_zoom(3).unwrap_err().to_string(),
			"zoom level (3) not covered by extents up to level 2"
		);
		assert!(LevelExtent::new(2, 1, 0, 1, 1).is_err());
		assert!(LevelExtent::new(2, 0, 0, 5, 1).is_err());
	}
}
