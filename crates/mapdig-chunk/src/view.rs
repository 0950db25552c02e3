use mapdig_blocks::{BiomeId, Block, FluidState};
use mapdig_world::{ChunkCoord, WorldHeight};

use crate::section::Section;
use crate::snapshot::{ChunkSnapshot, RecoverableError};
use crate::status::ChunkStatus;

/// Read contract shared by loaded and reconstructed chunks.
///
/// `x` and `z` are masked to the chunk, so local and world block coordinates
/// both work; `y` is a world Y. Nothing here mutates: callers that only hold a
/// `ChunkView` cannot tell a live chunk from a snapshot.
pub trait ChunkView {
    fn coord(&self) -> ChunkCoord;

    fn height(&self) -> WorldHeight;

    fn block_state(&self, x: i32, y: i32, z: i32) -> Block;

    fn fluid_state(&self, x: i32, y: i32, z: i32) -> FluidState;

    fn biome(&self, x: i32, y: i32, z: i32) -> Option<BiomeId>;

    /// Y of the highest non-air block in the column, or `min_y - 1` if the column is empty.
    fn sample_heightmap(&self, x: i32, z: i32) -> i32;

    fn status(&self) -> ChunkStatus {
        ChunkStatus::Full
    }
}

/// [`ChunkView`] over a decoded [`ChunkSnapshot`].
#[derive(Clone, Debug)]
pub struct SnapshotChunkView {
    snapshot: ChunkSnapshot,
}

impl SnapshotChunkView {
    pub fn new(snapshot: ChunkSnapshot) -> Self {
        Self { snapshot }
    }

    #[inline]
    pub fn snapshot(&self) -> &ChunkSnapshot {
        &self.snapshot
    }

    #[inline]
    pub fn sections(&self) -> &[Option<Section>] {
        self.snapshot.sections()
    }

    #[inline]
    pub fn diagnostics(&self) -> &[RecoverableError] {
        self.snapshot.diagnostics()
    }

    pub fn into_snapshot(self) -> ChunkSnapshot {
        self.snapshot
    }

    #[inline]
    fn populated_section(&self, y: i32) -> Option<&Section> {
        self.snapshot.section_at_y(y).filter(|s| !s.is_empty())
    }
}

impl ChunkView for SnapshotChunkView {
    fn coord(&self) -> ChunkCoord {
        self.snapshot.coord()
    }

    fn height(&self) -> WorldHeight {
        self.snapshot.height()
    }

    fn block_state(&self, x: i32, y: i32, z: i32) -> Block {
        match self.populated_section(y) {
            Some(s) => s.block((x & 15) as usize, (y & 15) as usize, (z & 15) as usize),
            None => Block::AIR,
        }
    }

    fn fluid_state(&self, x: i32, y: i32, z: i32) -> FluidState {
        match self.populated_section(y) {
            Some(s) => s.fluid((x & 15) as usize, (y & 15) as usize, (z & 15) as usize),
            None => FluidState::EMPTY,
        }
    }

    fn biome(&self, x: i32, y: i32, z: i32) -> Option<BiomeId> {
        self.snapshot
            .section_at_y(y)
            .map(|s| s.biome((x & 15) as usize, (y & 15) as usize, (z & 15) as usize))
    }

    fn sample_heightmap(&self, x: i32, z: i32) -> i32 {
        self.snapshot.heightmap().get(x, z) - 1
    }
}
