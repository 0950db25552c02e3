//! Block, biome, and fluid types plus the identifier registry used to resolve
//! persisted palette names.
#![forbid(unsafe_code)]

pub mod config;
pub mod lookup;
pub mod registry;
pub mod types;

pub use lookup::StateLookup;
pub use registry::BlockRegistry;
pub use types::{BiomeId, Block, BlockId, BlockState, Fluid, FluidState};
