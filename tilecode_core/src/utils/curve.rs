//! Space-filling curves over the tile grid of a single zoom level.
//!
//! A [`CurveIndex`] maps the `2ᶻ × 2ᶻ` grid of a zoom level onto the local positions `0..4ᶻ` and
//! back. The tile codec adds the zoom level offset on top, so implementations only ever deal with
//! one level at a time.

/// Bijection between the tiles of one zoom level and their position along a curve.
///
/// Implementors must guarantee, for every `level <= 31` and every `x, y < 2^level`, that
/// `index_to_xy(level, xy_to_index(level, x, y)) == (x, y)` and that
/// `xy_to_index(level, x, y) < 4^level`.
///
/// Inputs are not validated; callers (the codec) check bounds before calling.
///
/// # Examples
/// ```
/// use tilecode_core::utils::{CurveIndex, HilbertCurve};
///
/// let index = HilbertCurve.xy_to_index(3, 5, 3);
/// assert_eq!(HilbertCurve.index_to_xy(3, index), (5, 3));
/// ```
pub trait CurveIndex: Send + Sync {
	/// Short name used in log messages.
	fn name(&self) -> &'static str;

	/// Position of tile `(x, y)` along the curve at `level`.
	fn xy_to_index(&self, level: u8, x: u32, y: u32) -> u64;

	/// Tile `(x, y)` at position `index` along the curve at `level`.
	fn index_to_xy(&self, level: u8, index: u64) -> (u32, u32);
}

/// The Hilbert curve: consecutive positions are always edge-neighbours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HilbertCurve;

impl CurveIndex for HilbertCurve {
	fn name(&self) -> &'static str {
		"hilbert"
	}

	fn xy_to_index(&self, level: u8, x: u32, y: u32) -> u64 {
		let n = 1u64 << level;
		let mut tx = u64::from(x);
		let mut ty = u64::from(y);
		let mut d = 0u64;
		let mut s = n / 2;
		while s > 0 {
			let rx = u64::from(tx & s > 0);
			let ry = u64::from(ty & s > 0);
			d += s * s * ((3 * rx) ^ ry);
			// only the bits below `s` matter from here on
			tx &= s - 1;
			ty &= s - 1;
			rotate(s, &mut tx, &mut ty, rx, ry);
			s /= 2;
		}
		d
	}

	fn index_to_xy(&self, level: u8, index: u64) -> (u32, u32) {
		let n = 1u64 << level;
		let mut t = index;
		let mut tx = 0u64;
		let mut ty = 0u64;
		let mut s = 1u64;
		while s < n {
			let rx = (t / 2) & 1;
			let ry = (t ^ rx) & 1;
			rotate(s, &mut tx, &mut ty, rx, ry);
			tx += s * rx;
			ty += s * ry;
			t /= 4;
			s *= 2;
		}
		(tx as u32, ty as u32)
	}
}

/// Rotates/reflects the partial coordinate `(tx, ty)` inside an `s × s` square according to the
/// quadrant bits `rx`/`ry`. Requires `tx, ty < s`.
#[inline]
fn rotate(s: u64, tx: &mut u64, ty: &mut u64, rx: u64, ry: u64) {
	if ry == 0 {
		if rx == 1 {
			*tx = s - 1 - *tx;
			*ty = s - 1 - *ty;
		}
		std::mem::swap(tx, ty);
	}
}

/// The Morton (Z-order) curve: interleaves the bits of `x` (even bits) and `y` (odd bits).
///
/// Cheaper than [`HilbertCurve`] but with jumps between quadrants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MortonCurve;

impl CurveIndex for MortonCurve {
	fn name(&self) -> &'static str {
		"morton"
	}

	fn xy_to_index(&self, _level: u8, x: u32, y: u32) -> u64 {
		spread_bits(x) | (spread_bits(y) << 1)
	}

	fn index_to_xy(&self, _level: u8, index: u64) -> (u32, u32) {
		(compact_bits(index), compact_bits(index >> 1))
	}
}

/// Spreads the 32 bits of `v` into the even bits of a `u64`.
fn spread_bits(v: u32) -> u64 {
	let mut v = u64::from(v);
	v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
	v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
	v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
	v = (v | (v << 2)) & 0x3333_3333_3333_3333;
	(v | (v << 1)) & 0x5555_5555_5555_5555
}

/// Inverse of [`spread_bits`].
fn compact_bits(v: u64) -> u32 {
	let mut v = v & 0x5555_5555_5555_5555;
	v = (v | (v >> 1)) & 0x3333_3333_3333_3333;
	v = (v | (v >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
	v = (v | (v >> 4)) & 0x00FF_00FF_00FF_00FF;
	v = (v | (v >> 8)) & 0x0000_FFFF_0000_FFFF;
	v = (v | (v >> 16)) & 0x0000_0000_FFFF_FFFF;
	v as u32
}
