//! Contains the tile codec, tile coordinates, offset table, orderings and extents.

mod geo_bbox;
pub use geo_bbox::*;

mod tile_codec;
pub use tile_codec::*;

mod tile_coord;
pub use tile_coord::*;

mod tile_extents;
pub use tile_extents::*;

mod tile_order;
pub use tile_order::*;

mod zoom_offsets;
pub use zoom_offsets::*;
