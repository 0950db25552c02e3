use std::io;

use mapdig_chunk::ChunkStatus;
use mapdig_world::ChunkCoord;
use thiserror::Error;

/// Why a record could not become a snapshot. Only ever fatal for one chunk.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Partially generated chunks count as absent, not broken.
    #[error("chunk is not fully generated (status {0})")]
    NotFullyGenerated(ChunkStatus),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("unknown chunk status `{0}`")]
    UnknownStatus(String),
    #[error("section {y}: {reason}")]
    SectionShape { y: i32, reason: String },
}

impl DecodeError {
    #[inline]
    pub fn is_absence(&self) -> bool {
        matches!(self, DecodeError::NotFullyGenerated(_))
    }
}

/// Failure reading a record out of a region container.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("chunk {0:?}: unsupported compression scheme {1}")]
    UnsupportedCompression(ChunkCoord, u8),
    #[error("chunk {0:?} is stored in an external file")]
    External(ChunkCoord),
    #[error("chunk {0:?}: corrupt header: {1}")]
    CorruptHeader(ChunkCoord, String),
    #[error("chunk {0:?}: invalid NBT: {1}")]
    Nbt(ChunkCoord, String),
    #[error("chunk {0:?}: record root is not a compound")]
    NotACompound(ChunkCoord),
}
