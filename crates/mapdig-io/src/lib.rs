//! Persisted chunk records: region container access, palette decoding, and
//! reconstruction of read-only chunk snapshots from both save generations.
#![forbid(unsafe_code)]

pub mod decode;
pub mod error;
pub mod nbt;
pub mod packed;
pub mod palette;
pub mod sections;
pub mod storage;

pub use decode::{ChunkDecoder, decode_chunk};
pub use error::{DecodeError, RegionError};
pub use nbt::RawChunkRecord;
pub use storage::{AnvilStorage, ChunkStorage};
