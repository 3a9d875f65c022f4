//! Orderings of tile ids within one zoom level.
//!
//! Both orderings share the same zoom partitioning, so ids always sort by zoom level first.
//! Inside a level, [`TileOrder::Tms`] follows the MBTiles index (x ascending, then y descending)
//! while [`TileOrder::Curve`] follows the codec's space-filling curve for better locality.
//!
//! ```
//! use tilecode_core::TileOrder;
//!
//! assert_eq!(TileOrder::parse_str("hilbert").unwrap(), TileOrder::Curve);
//! assert_eq!(TileOrder::default().to_string(), "tms");
//! ```

use anyhow::{Result, bail};
#[cfg(feature = "cli")]
use clap::ValueEnum;
use std::fmt::Display;

/// Selects how tiles of one zoom level are numbered. Pick one per collection: ids of different
/// orders only compare meaningfully across zoom levels.
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TileOrder {
	/// Row-major TMS order: x ascending, then y descending.
	#[default]
	Tms,
	/// Position along the codec's space-filling curve.
	Curve,
}

impl TileOrder {
	pub fn as_str(&self) -> &str {
		match self {
			TileOrder::Tms => "tms",
			TileOrder::Curve => "curve",
		}
	}

	/// Parses an order name, case-insensitive.
	///
	/// # Errors
	/// Fails for unknown names.
	pub fn parse_str(value: &str) -> Result<Self> {
		Ok(match value.to_lowercase().trim() {
			"tms" | "raster" => TileOrder::Tms,
			"curve" | "hilbert" => TileOrder::Curve,
			_ => bail!("Unknown tile order '{value}'. Expected tms or curve"),
		})
	}
}

impl Display for TileOrder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
