use std::sync::Arc;

use mapdig_blocks::{BiomeId, Block, FluidState};
use mapdig_chunk::{ChunkStatus, ChunkView, SnapshotChunkView};
use mapdig_world::{ChunkCoord, WorldHeight};

/// A chunk as handed to the renderer: either held by the engine or rebuilt from disk.
#[derive(Clone)]
pub enum WorldChunk {
    Live(Arc<dyn ChunkView + Send + Sync>),
    Snapshot(SnapshotChunkView),
}

impl WorldChunk {
    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self, WorldChunk::Live(_))
    }

    pub fn as_snapshot(&self) -> Option<&SnapshotChunkView> {
        match self {
            WorldChunk::Snapshot(view) => Some(view),
            WorldChunk::Live(_) => None,
        }
    }

    #[inline]
    fn view(&self) -> &dyn ChunkView {
        match self {
            WorldChunk::Live(view) => view.as_ref(),
            WorldChunk::Snapshot(view) => view,
        }
    }
}

impl ChunkView for WorldChunk {
    fn coord(&self) -> ChunkCoord {
        self.view().coord()
    }

    fn height(&self) -> WorldHeight {
        self.view().height()
    }

    fn block_state(&self, x: i32, y: i32, z: i32) -> Block {
        self.view().block_state(x, y, z)
    }

    fn fluid_state(&self, x: i32, y: i32, z: i32) -> FluidState {
        self.view().fluid_state(x, y, z)
    }

    fn biome(&self, x: i32, y: i32, z: i32) -> Option<BiomeId> {
        self.view().biome(x, y, z)
    }

    fn sample_heightmap(&self, x: i32, z: i32) -> i32 {
        self.view().sample_heightmap(x, z)
    }

    fn status(&self) -> ChunkStatus {
        self.view().status()
    }
}

impl std::fmt::Debug for WorldChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_live() { "Live" } else { "Snapshot" };
        f.debug_tuple(kind).field(&self.coord()).finish()
    }
}
