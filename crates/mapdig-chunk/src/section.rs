use mapdig_blocks::{BiomeId, Block, FluidState, StateLookup};

use crate::palette::{BIOME_CELLS, BLOCK_CELLS, Palette, biome_index, block_index};

/// One assembled 16x16x16 slice of a chunk.
#[derive(Clone, Debug)]
pub struct Section {
    y: i32,
    blocks: Palette<Block>,
    biomes: Palette<BiomeId>,
    // Per block-palette entry, filled by `finalize`
    fluids: Vec<FluidState>,
    non_air_blocks: u16,
    fluid_cells: u16,
}

impl Section {
    /// Unfinalized section; counts read as zero until [`Section::finalize`].
    pub fn new(y: i32, blocks: Palette<Block>, biomes: Palette<BiomeId>) -> Self {
        Self {
            y,
            blocks,
            biomes,
            fluids: Vec::new(),
            non_air_blocks: 0,
            fluid_cells: 0,
        }
    }

    /// All air, uniform biome.
    pub fn empty(y: i32, biome: BiomeId) -> Self {
        Self::new(
            y,
            Palette::uniform(Block::AIR, BLOCK_CELLS),
            Palette::uniform(biome, BIOME_CELLS),
        )
    }

    /// Computes the non-air and fluid counts used for emptiness checks.
    pub fn finalize(&mut self, lookup: &dyn StateLookup) {
        let entries = self.blocks.entries();
        let air: Vec<bool> = entries.iter().map(|b| lookup.is_air(*b)).collect();
        self.fluids = entries.iter().map(|b| lookup.fluid_state(*b)).collect();
        let mut non_air = 0usize;
        let mut fluid = 0usize;
        for (i, count) in self.blocks.histogram().into_iter().enumerate() {
            if !air[i] {
                non_air += count;
            }
            if !self.fluids[i].is_empty() {
                fluid += count;
            }
        }
        self.non_air_blocks = non_air as u16;
        self.fluid_cells = fluid as u16;
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn block_palette(&self) -> &Palette<Block> {
        &self.blocks
    }

    #[inline]
    pub fn biome_palette(&self) -> &Palette<BiomeId> {
        &self.biomes
    }

    #[inline]
    pub fn non_air_blocks(&self) -> u16 {
        self.non_air_blocks
    }

    #[inline]
    pub fn fluid_cells(&self) -> u16 {
        self.fluid_cells
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.non_air_blocks == 0
    }

    /// Local coordinates, each 0..16.
    #[inline]
    pub fn block(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks.get(block_index(x, y, z))
    }

    #[inline]
    pub fn fluid(&self, x: usize, y: usize, z: usize) -> FluidState {
        let entry = self.blocks.index_at(block_index(x, y, z));
        self.fluids.get(entry).copied().unwrap_or(FluidState::EMPTY)
    }

    /// Local block coordinates, each 0..16; biomes are stored per 4x4x4 cell.
    #[inline]
    pub fn biome(&self, x: usize, y: usize, z: usize) -> BiomeId {
        self.biomes.get(biome_index(x >> 2, y >> 2, z >> 2))
    }
}
