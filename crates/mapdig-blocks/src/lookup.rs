use std::collections::HashMap;

use crate::types::{BiomeId, Block, FluidState};

/// Identifier lookup consulted while decoding persisted palettes.
///
/// Implemented by [`crate::BlockRegistry`]; engines embedding the decoder can
/// supply their own table as long as `Block::AIR` resolves to air.
pub trait StateLookup: Send + Sync {
    /// Resolves a namespaced block name plus its persisted properties.
    fn resolve_block(&self, name: &str, props: &HashMap<String, String>) -> Option<Block>;

    fn resolve_biome(&self, name: &str) -> Option<BiomeId>;

    fn default_biome(&self) -> BiomeId;

    fn is_air(&self, block: Block) -> bool;

    fn fluid_state(&self, block: Block) -> FluidState;
}
