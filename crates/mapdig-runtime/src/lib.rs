//! Tile-facing queries over a world's saved chunks: existence probing with a
//! shared region cache, and read-only chunk views for the renderer.
#![forbid(unsafe_code)]

mod chunk;
mod digger;
mod live;
pub mod probe;
mod region_set;
mod session;

pub use chunk::WorldChunk;
pub use digger::{BlockDigger, Session};
pub use live::{LiveWorld, NoLiveWorld};
pub use probe::{ProbeContext, tile_has_terrain};
pub use region_set::{RegionSetStats, ValidatedRegionSet};
pub use session::{SessionCache, SessionCacheStats};
