use std::sync::Arc;

use mapdig_blocks::StateLookup;
use mapdig_chunk::heightmap::COLUMNS;
use mapdig_chunk::{ChunkSnapshot, ChunkStatus, Heightmap, SchemaGeneration};
use mapdig_world::{ChunkCoord, WorldHeight};

use crate::error::DecodeError;
use crate::nbt::{self, Compound, RawChunkRecord};
use crate::packed;
use crate::sections;

/// Turns one raw record into an immutable snapshot.
///
/// Partially generated chunks come back as [`DecodeError::NotFullyGenerated`],
/// which callers treat as absence.
pub fn decode_chunk(
    coord: ChunkCoord,
    raw: &RawChunkRecord,
    height: WorldHeight,
    lookup: &dyn StateLookup,
) -> Result<ChunkSnapshot, DecodeError> {
    let generation = raw.generation();
    let level = raw.level();

    let status_id = nbt::string(level, "Status")?.ok_or(DecodeError::MissingField("Status"))?;
    let status = ChunkStatus::from_id(status_id)
        .ok_or_else(|| DecodeError::UnknownStatus(status_id.to_string()))?;
    if !status.is_at_least(ChunkStatus::Full) {
        return Err(DecodeError::NotFullyGenerated(status));
    }

    let list_key = match generation {
        SchemaGeneration::Legacy => "Sections",
        SchemaGeneration::Modern => "sections",
    };
    let records = nbt::list(level, list_key)?.unwrap_or(&[]);
    let (sections, diagnostics) =
        sections::assemble(coord, records, generation, height, lookup)?;

    let source_height = match generation {
        SchemaGeneration::Legacy => WorldHeight::LEGACY,
        SchemaGeneration::Modern => height,
    };
    let heightmap = match embedded_heightmap(coord, level, source_height, height)? {
        Some(heightmap) => heightmap,
        None => Heightmap::compute(&sections, height, |b| lookup.is_air(b)),
    };

    Ok(ChunkSnapshot::new(
        coord,
        height,
        generation,
        status,
        sections,
        heightmap,
        diagnostics,
    ))
}

/// Reads `Heightmaps.WORLD_SURFACE`, stored relative to the bottom of `source`.
///
/// Returns None when the record has none or its length does not fit `source`.
fn embedded_heightmap(
    coord: ChunkCoord,
    level: &Compound,
    source: WorldHeight,
    target: WorldHeight,
) -> Result<Option<Heightmap>, DecodeError> {
    let Some(maps) = nbt::compound(level, "Heightmaps")? else {
        return Ok(None);
    };
    let Some(data) = nbt::long_array(maps, "WORLD_SURFACE")? else {
        return Ok(None);
    };
    let bits = packed::ceil_log2(source.height() as usize + 1);
    let Some(values) = packed::unpack_any(data, bits, COLUMNS) else {
        log::warn!(
            "Chunk [{}, {}]: WORLD_SURFACE heightmap has {} longs, expected {}; recomputing",
            coord.cx,
            coord.cz,
            data.len(),
            packed::padded_len(COLUMNS, bits)
        );
        return Ok(None);
    };
    let heights = values
        .into_iter()
        .map(|v| {
            if v == 0 {
                target.min_y()
            } else {
                source.min_y() + i32::from(v)
            }
        })
        .collect();
    Ok(Some(Heightmap::from_heights(heights, target.min_y())))
}

/// Decoder bound to a height model and a block lookup.
#[derive(Clone)]
pub struct ChunkDecoder {
    height: WorldHeight,
    lookup: Arc<dyn StateLookup>,
}

impl ChunkDecoder {
    pub fn new(height: WorldHeight, lookup: Arc<dyn StateLookup>) -> Self {
        Self { height, lookup }
    }

    #[inline]
    pub fn height(&self) -> WorldHeight {
        self.height
    }

    #[inline]
    pub fn lookup(&self) -> &dyn StateLookup {
        self.lookup.as_ref()
    }

    pub fn decode(
        &self,
        coord: ChunkCoord,
        raw: &RawChunkRecord,
    ) -> Result<ChunkSnapshot, DecodeError> {
        decode_chunk(coord, raw, self.height, self.lookup.as_ref())
    }
}

impl std::fmt::Debug for ChunkDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkDecoder")
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
