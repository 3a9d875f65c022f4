//! Cumulative tile counts per zoom level.
//!
//! Zoom level `z` holds `4ᶻ` tiles. Packing all levels `0..=max_zoom` into one dense id space
//! means level `z` starts right after the tiles of every shallower level:
//!
//! ```text
//! offset(z) = 4⁰ + 4¹ + … + 4ᶻ⁻¹       offset(0) = 0, offset(1) = 1, offset(2) = 5, …
//! ```

use anyhow::{Result, anyhow, ensure};
use std::{
	fmt::{self, Debug},
	ops::Range,
};

/// Highest zoom level whose ids still fit into a `u32`.
pub const MAX_SUPPORTED_ZOOM: u8 = 15;

/// Zoom ceiling used when nothing else is configured.
pub const DEFAULT_MAX_ZOOM: u8 = 15;

/// Lookup table from zoom level to the first id of that level.
///
/// Built once by [`ZoomOffsets::new`] and read-only afterwards.
///
/// # Examples
/// ```
/// use tilecode_core::ZoomOffsets;
///
/// let offsets = ZoomOffsets::new(15)?;
/// assert_eq!(offsets.offset_for_zoom(2)?, 5);
/// assert_eq!(offsets.zoom_for_index(4)?, 1);
/// assert!(ZoomOffsets::new(16).is_err());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ZoomOffsets {
	/// `offsets[z]` for `z in 0..=max_zoom`, followed by the total tile count.
	offsets: Vec<u32>,
}

impl ZoomOffsets {
	/// Builds the table for levels `0..=max_zoom`.
	///
	/// # Errors
	/// Fails if the total number of tiles up to `max_zoom` does not fit into a `u32`, which is the
	/// case for every `max_zoom` above [`MAX_SUPPORTED_ZOOM`].
	pub fn new(max_zoom: u8) -> Result<ZoomOffsets> {
		let mut offsets = Vec::with_capacity(usize::from(max_zoom) + 2);
		let mut index = 0u32;
		for z in 0..=u32::from(max_zoom) {
			offsets.push(index);
			let next = 1u32
				.checked_shl(2 * z)
				.and_then(|count| index.checked_add(count));
			index = match next {
				Some(next) => next,
				None => {
					log::warn!("rejecting max zoom {max_zoom}: tile ids of level {z} overflow u32");
					return Err(anyhow!(
						"too many zoom levels: max zoom ({max_zoom}) must be <= {MAX_SUPPORTED_ZOOM}"
					));
				}
			};
		}
		offsets.push(index);

		log::debug!("built zoom offset table up to level {max_zoom} ({index} tiles)");
		Ok(ZoomOffsets { offsets })
	}

	/// The deepest zoom level covered by the table.
	#[must_use]
	pub fn max_zoom(&self) -> u8 {
		(self.offsets.len() - 2) as u8
	}

	/// Number of tiles on all levels, i.e. the first id that is out of range.
	#[must_use]
	pub fn tile_count(&self) -> u32 {
		self.offsets[self.offsets.len() - 1]
	}

	/// Number of tiles on all levels below `z`.
	///
	/// `z` may be `max_zoom + 1`, which yields [`tile_count`](Self::tile_count).
	///
	/// # Errors
	/// Fails if `z > max_zoom + 1`.
	pub fn offset_for_zoom(&self, z: u8) -> Result<u32> {
		self.offsets.get(usize::from(z)).copied().ok_or_else(|| {
			anyhow!(
				"zoom level ({z}) must be <= {}",
				usize::from(self.max_zoom()) + 1
			)
		})
	}

	/// The zoom level whose id range contains `index`.
	///
	/// # Errors
	/// Fails if `index` is not below [`tile_count`](Self::tile_count).
	pub fn zoom_for_index(&self, index: u32) -> Result<u8> {
		ensure!(
			index < self.tile_count(),
			"tile index ({index}) out of range, must be < {}",
			self.tile_count()
		);
		// offsets[0] == 0, so at least one entry is <= index
		Ok((self.offsets.partition_point(|&offset| offset <= index) - 1) as u8)
	}

	/// The ids of all tiles on level `z`.
	///
	/// # Errors
	/// Fails if `z > max_zoom`.
	pub fn level_range(&self, z: u8) -> Result<Range<u32>> {
		self.check_zoom(z)?;
		Ok(self.start(z)..self.start(z + 1))
	}

	/// # Errors
	/// Fails if `z > max_zoom`.
	pub fn check_zoom(&self, z: u8) -> Result<()> {
		ensure!(
			z <= self.max_zoom(),
			"zoom level ({z}) must be <= {}",
			self.max_zoom()
		);
		Ok(())
	}

	/// Offset of level `z` without bounds check. `z` must be `<= max_zoom + 1`.
	#[inline]
	pub(crate) fn start(&self, z: u8) -> u32 {
		self.offsets[usize::from(z)]
	}
}

impl Debug for ZoomOffsets {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ZoomOffsets({:?})", self.offsets)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, 0)]
	#[case(1, 1)]
	#[case(2, 5)]
	#[case(3, 21)]
	#[case(10, 349_525)]
	#[case(15, 357_913_941)]
	#[case(16, 1_431_655_765)]
	fn offsets(#[case] z: u8, #[case] expected: u32) {
		let offsets = ZoomOffsets::new(15).unwrap();
		assert_eq!(offsets.offset_for_zoom(z).unwrap(), expected);
	}

	#[test]
	fn offsets_are_strictly_increasing() {
		let offsets = ZoomOffsets::new(MAX_SUPPORTED_ZOOM).unwrap();
		for z in 0..=MAX_SUPPORTED_ZOOM {
			let start = offsets.offset_for_zoom(z).unwrap();
			let end = offsets.offset_for_zoom(z + 1).unwrap();
			assert_eq!(u64::from(end - start), 1u64 << (2 * z));
		}
	}

	#[test]
	fn small_tables() {
		let offsets = ZoomOffsets::new(0).unwrap();
		assert_eq!(offsets.max_zoom(), 0);
		assert_eq!(offsets.tile_count(), 1);
		assert_eq!(offsets.zoom_for_index(0).unwrap(), 0);
		assert!(offsets.zoom_for_index(1).is_err());

		let offsets = ZoomOffsets::new(3).unwrap();
		assert_eq!(format!("{offsets:?}"), "ZoomOffsets([0, 1, 5, 21, 85])");
		assert_eq!(offsets.tile_count(), 85);
	}

	#[rstest]
	#[case(16)]
	#[case(17)]
	#[case(31)]
	#[case(255)]
	fn overflow_is_rejected(#[case] max_zoom: u8) {
		assert_eq!(
			ZoomOffsets::new(max_zoom).unwrap_err().to_string(),
			format!("too many zoom levels: max zoom ({max_zoom}) must be <= 15")
		);
	}

	#[rstest]
	#[case(0, 0)]
	#[case(1, 1)]
	#[case(4, 1)]
	#[case(5, 2)]
	#[case(20, 2)]
	#[case(21, 3)]
	#[case(349_524, 9)]
	#[case(349_525, 10)]
	#[case(1_431_655_764, 15)]
	fn zoom_for_index(#[case] index: u32, #[case] z: u8) {
		let offsets = ZoomOffsets::new(15).unwrap();
		assert_eq!(offsets.zoom_for_index(index).unwrap(), z);
	}

	#[test]
	fn zoom_for_index_out_of_range() {
		let offsets = ZoomOffsets::new(15).unwrap();
		assert_eq!(
			offsets.zoom_for_index(1_431_655_765).unwrap_err().to_string(),
			"tile index (1431655765) out of range, must be < 1431655765"
		);
		assert!(offsets.zoom_for_index(u32::MAX).is_err());
	}

	#[test]
	fn level_range_and_bounds() {
		let offsets = ZoomOffsets::new(4).unwrap();
		assert_eq!(offsets.level_range(0).unwrap(), 0..1);
		assert_eq!(offsets.level_range(2).unwrap(), 5..21);
		assert_eq!(offsets.level_range(4).unwrap(), 85..341);
		assert_eq!(
			offsets.level_range(5).unwrap_err().to_string(),
			"zoom level (5) must be <= 4"
		);
		assert_eq!(offsets.offset_for_zoom(5).unwrap(), 341);
		assert_eq!(
			offsets.offset_for_zoom(6).unwrap_err().to_string(),
			"zoom level (6) must be <= 5"
		);
	}
}
