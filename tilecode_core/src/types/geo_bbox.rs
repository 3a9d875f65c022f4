use anyhow::{Result, ensure};
use std::fmt::Debug;

/// A geographic rectangle in WGS84 degrees, as `west, south, east, north`.
///
/// # Examples
/// ```
/// use tilecode_core::GeoBBox;
///
/// let bbox = GeoBBox::new(-10.0, -5.0, 10.0, 5.0).unwrap();
/// assert_eq!(bbox.as_tuple(), (-10.0, -5.0, 10.0, 5.0));
/// assert!(GeoBBox::new(10.0, -5.0, -10.0, 5.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
#[allow(clippy::manual_non_exhaustive)]
pub struct GeoBBox {
	/// West, minimum longitude.
	pub x_min: f64,
	/// South, minimum latitude.
	pub y_min: f64,
	/// East, maximum longitude.
	pub x_max: f64,
	/// North, maximum latitude.
	pub y_max: f64,
	phantom: (),
}

impl GeoBBox {
	/// Creates a bounding box from `west, south, east, north`.
	///
	/// # Errors
	/// Fails if a value lies outside `[-180, 180]` / `[-90, 90]` or if min > max.
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<GeoBBox> {
		GeoBBox::new_unchecked(x_min, y_min, x_max, y_max).checked()
	}

	/// The whole area covered by the Web Mercator projection.
	#[must_use]
	pub fn world() -> GeoBBox {
		use crate::utils::projection::{MAX_LAT, MAX_LON};
		GeoBBox::new_unchecked(-MAX_LON, -MAX_LAT, MAX_LON, MAX_LAT)
	}

	pub(crate) fn new_unchecked(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> GeoBBox {
		GeoBBox {
			x_min,
			y_min,
			x_max,
			y_max,
			phantom: (),
		}
	}

	/// Returns `[west, south, east, north]`.
	#[must_use]
	pub fn as_array(&self) -> [f64; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}

	/// Returns `(west, south, east, north)`.
	#[must_use]
	pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
		(self.x_min, self.y_min, self.x_max, self.y_max)
	}

	/// Whether the point `(lon, lat)` lies inside or on the border of this box.
	#[must_use]
	pub fn contains(&self, lon: f64, lat: f64) -> bool {
		(self.x_min..=self.x_max).contains(&lon) && (self.y_min..=self.y_max).contains(&lat)
	}

	fn checked(self) -> Result<Self> {
		ensure!(self.x_min >= -180., "x_min ({}) must be >= -180", self.x_min);
		ensure!(self.y_min >= -90., "y_min ({}) must be >= -90", self.y_min);
		ensure!(self.x_max <= 180., "x_max ({}) must be <= 180", self.x_max);
		ensure!(self.y_max <= 90., "y_max ({}) must be <= 90", self.y_max);
		ensure!(
			self.x_min <= self.x_max,
			"x_min ({}) must be <= x_max ({})",
			self.x_min,
			self.x_max
		);
		ensure!(
			self.y_min <= self.y_max,
			"y_min ({}) must be <= y_max ({})",
			self.y_min,
			self.y_max
		);
		Ok(self)
	}
}

impl Debug for GeoBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"GeoBBox({}, {}, {}, {})",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}
