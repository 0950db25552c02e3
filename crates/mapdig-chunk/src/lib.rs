//! Decoded chunk data: palettes, sections, heightmaps, and the read-only
//! chunk view contract shared by live and reconstructed chunks.
#![forbid(unsafe_code)]

pub mod heightmap;
pub mod palette;
pub mod section;
pub mod snapshot;
pub mod status;
pub mod view;

pub use heightmap::Heightmap;
pub use palette::Palette;
pub use section::Section;
pub use snapshot::{ChunkSnapshot, RecoverableError, SchemaGeneration};
pub use status::ChunkStatus;
pub use view::{ChunkView, SnapshotChunkView};
