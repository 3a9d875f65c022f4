//! Dense, invertible integer ids for web map tiles.
//!
//! A [`TileCoord`] addresses one tile of a Web Mercator pyramid by zoom level, column and row.
//! The [`TileCodec`] packs every tile of levels `0..=max_zoom` into one dense `u32` range so that
//! ids sort by zoom level first and, within a level, either in TMS raster order (the default, which
//! matches the MBTiles index) or along a space-filling curve.
//!
//! ```
//! use tilecode_core::TileCodec;
//!
//! let codec = TileCodec::new(15)?;
//! let tile = codec.encode(308, 381, 10)?;
//! assert_eq!(codec.decode(tile.encoded())?, tile);
//! assert_eq!(codec.parent(&tile)?, codec.encode(154, 190, 9)?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod types;
pub use types::*;

pub mod utils;
