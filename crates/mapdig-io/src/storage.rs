//! Region container access.
//!
//! A region file starts with a 4 KiB location table of 1024 big-endian
//! entries: a 3-byte sector offset followed by a 1-byte sector count. Each
//! record begins with a 4-byte length and a compression byte.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use flate2::read::{GzDecoder, ZlibDecoder};
use mapdig_world::{ChunkCoord, RegionCoord};

use crate::error::RegionError;
use crate::nbt::RawChunkRecord;

pub const SECTOR_BYTES: u64 = 4096;
const HEADER_ENTRIES: usize = 1024;
const EXTERNAL_FLAG: u8 = 0x80;

/// Read-only source of persisted chunk records.
pub trait ChunkStorage: Send + Sync {
    /// Whether the region's backing file exists.
    fn region_exists(&self, region: RegionCoord) -> io::Result<bool>;

    /// The chunk's record, or None when the region or the slot is empty.
    fn read_chunk(&self, coord: ChunkCoord) -> Result<Option<RawChunkRecord>, RegionError>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Zlib,
    None,
}

impl Compression {
    pub fn from_byte(coord: ChunkCoord, b: u8) -> Result<Self, RegionError> {
        if b & EXTERNAL_FLAG != 0 {
            return Err(RegionError::External(coord));
        }
        match b {
            1 => Ok(Compression::Gzip),
            2 => Ok(Compression::Zlib),
            3 => Ok(Compression::None),
            other => Err(RegionError::UnsupportedCompression(coord, other)),
        }
    }

    pub fn decompress(self, payload: &[u8]) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(payload.len() * 4);
        match self {
            Compression::Gzip => {
                GzDecoder::new(payload).read_to_end(&mut out)?;
            }
            Compression::Zlib => {
                ZlibDecoder::new(payload).read_to_end(&mut out)?;
            }
            Compression::None => out.extend_from_slice(payload),
        }
        Ok(out)
    }
}

/// Anvil region directory (`r.<rx>.<rz>.<ext>` files).
#[derive(Clone, Debug)]
pub struct AnvilStorage {
    dir: PathBuf,
    extension: String,
}

impl AnvilStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_extension(dir, "mca")
    }

    pub fn with_extension(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn region_path(&self, region: RegionCoord) -> PathBuf {
        self.dir.join(region.file_name(&self.extension))
    }

    fn open_region(&self, region: RegionCoord) -> io::Result<Option<File>> {
        match File::open(self.region_path(region)) {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Raw payload and compression byte for one chunk slot.
    fn read_payload(&self, coord: ChunkCoord) -> Result<Option<(u8, Vec<u8>)>, RegionError> {
        let Some(mut file) = self.open_region(coord.region())? else {
            return Ok(None);
        };
        let file_len = file.metadata()?.len();
        if file_len < SECTOR_BYTES {
            // Freshly created, header not yet written
            return Ok(None);
        }

        let slot = coord.index_in_region();
        debug_assert!(slot < HEADER_ENTRIES);
        let mut entry = [0u8; 4];
        file.seek(SeekFrom::Start(slot as u64 * 4))?;
        file.read_exact(&mut entry)?;
        let sector = u64::from(u32::from_be_bytes([0, entry[0], entry[1], entry[2]]));
        let sectors = u64::from(entry[3]);
        if sector == 0 || sectors == 0 {
            return Ok(None);
        }
        if sector < 2 {
            return Err(RegionError::CorruptHeader(
                coord,
                format!("record points into the header (sector {sector})"),
            ));
        }

        let start = sector * SECTOR_BYTES;
        if start + 5 > file_len {
            return Err(RegionError::CorruptHeader(
                coord,
                format!("sector {sector} is past the end of the file"),
            ));
        }
        let mut head = [0u8; 5];
        file.seek(SeekFrom::Start(start))?;
        file.read_exact(&mut head)?;
        let length = u64::from(u32::from_be_bytes([head[0], head[1], head[2], head[3]]));
        if length == 0 {
            return Ok(None);
        }
        if length > sectors * SECTOR_BYTES || start + 4 + length > file_len {
            return Err(RegionError::CorruptHeader(
                coord,
                format!("record length {length} overruns its {sectors} sectors"),
            ));
        }
        let mut payload = vec![0u8; (length - 1) as usize];
        file.read_exact(&mut payload)?;
        Ok(Some((head[4], payload)))
    }
}

impl ChunkStorage for AnvilStorage {
    fn region_exists(&self, region: RegionCoord) -> io::Result<bool> {
        self.region_path(region).try_exists()
    }

    fn read_chunk(&self, coord: ChunkCoord) -> Result<Option<RawChunkRecord>, RegionError> {
        let Some((scheme, payload)) = self.read_payload(coord)? else {
            log::trace!("No record for chunk [{}, {}]", coord.cx, coord.cz);
            return Ok(None);
        };
        let bytes = Compression::from_byte(coord, scheme)?.decompress(&payload)?;
        RawChunkRecord::from_nbt_bytes(coord, &bytes).map(Some)
    }
}
