//! Web Mercator projection between WGS84 degrees and normalized world coordinates.
//!
//! World coordinates span `[0, 1]` on both axes: `(0, 0)` is the north-west corner of the map at
//! `(-180°, 85.0511°)`, `(1, 1)` the south-east corner. Tile `(x, y)` at zoom `z` covers
//! `[x / 2ᶻ, (x + 1) / 2ᶻ) × [y / 2ᶻ, (y + 1) / 2ᶻ)`.

use std::f64::consts::PI;

/// Latitude limit of the Web Mercator projection in degrees.
pub const MAX_LAT: f64 = 85.051_128_779_806_59;

/// Longitude limit in degrees.
pub const MAX_LON: f64 = 180.0;

/// Edge length in pixels of the tile images pixel offsets refer to.
pub const TILE_SIZE: f64 = 256.0;

/// Normalized world x of a longitude in degrees. Clamped to `[0, 1]`.
#[must_use]
pub fn world_x(lon: f64) -> f64 {
	(lon.clamp(-MAX_LON, MAX_LON) / 360.0 + 0.5).clamp(0.0, 1.0)
}

/// Normalized world y of a latitude in degrees. Latitudes beyond [`MAX_LAT`] are clamped, so the
/// result is always in `[0, 1]`.
#[must_use]
pub fn world_y(lat: f64) -> f64 {
	let lat = lat.clamp(-MAX_LAT, MAX_LAT);
	(0.5 - 0.5 * (lat * PI / 360.0 + PI / 4.0).tan().ln() / PI).clamp(0.0, 1.0)
}

/// Longitude in degrees of a normalized world x.
#[must_use]
pub fn lon(world_x: f64) -> f64 {
	(world_x - 0.5) * 360.0
}

/// Latitude in degrees of a normalized world y.
#[must_use]
pub fn lat(world_y: f64) -> f64 {
	((PI * (1.0 - 2.0 * world_y)).exp().atan() / PI - 0.25) * 360.0
}
