use std::sync::Arc;

use mapdig_chunk::ChunkView;
use mapdig_world::ChunkCoord;

/// The running engine's view of which chunks it holds in memory.
pub trait LiveWorld: Send + Sync {
    fn is_chunk_loaded(&self, coord: ChunkCoord) -> bool;

    /// Read-only view of a loaded chunk, if the engine still holds it.
    fn loaded_view(&self, coord: ChunkCoord) -> Option<Arc<dyn ChunkView + Send + Sync>>;
}

/// No engine attached: only persisted chunks are visible.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLiveWorld;

impl LiveWorld for NoLiveWorld {
    fn is_chunk_loaded(&self, _coord: ChunkCoord) -> bool {
        false
    }

    fn loaded_view(&self, _coord: ChunkCoord) -> Option<Arc<dyn ChunkView + Send + Sync>> {
        None
    }
}
