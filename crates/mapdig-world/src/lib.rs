//! World coordinates, height model, and renderer tile geometry.
#![forbid(unsafe_code)]

pub mod coords;
pub mod height;
pub mod tile;

pub use coords::{ChunkCoord, RegionCoord};
pub use height::WorldHeight;
pub use tile::{TileCoord, TileSpan, ZoomShift};
