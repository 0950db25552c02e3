//! Palette codec: persisted palette blobs to [`Palette`]s.
//!
//! Individual bad entries never fail a section. They are replaced with the
//! layer default (air, or the default biome) and reported as
//! [`RecoverableError`]s; only a malformed container shape is fatal.

use fastnbt::Value;
use mapdig_blocks::{BiomeId, Block, StateLookup};
use mapdig_chunk::Palette;
use mapdig_chunk::RecoverableError;
use mapdig_chunk::palette::{BIOME_CELLS, BLOCK_CELLS};

use crate::error::DecodeError;
use crate::nbt::{self, Compound};
use crate::packed;

pub type Decoded<T> = (Palette<T>, Vec<RecoverableError>);

fn shape_error(y: i32, reason: impl Into<String>) -> DecodeError {
    DecodeError::SectionShape {
        y,
        reason: reason.into(),
    }
}

fn remap_warning(y: i32, layer: &str, remapped: usize) -> Option<RecoverableError> {
    (remapped > 0).then(|| {
        RecoverableError::new(
            y,
            format!("{remapped} {layer} cells referenced missing palette entries"),
        )
    })
}

/// Modern `block_states` compound: `palette` of `{Name, Properties}` plus packed `data`.
pub fn decode_block_states(
    blob: &Compound,
    section_y: i32,
    lookup: &dyn StateLookup,
) -> Result<Decoded<Block>, DecodeError> {
    let entries = nbt::list(blob, "palette")?.ok_or(DecodeError::MissingField("palette"))?;
    if entries.is_empty() {
        return Err(shape_error(section_y, "empty block palette"));
    }
    let mut errors = Vec::new();
    let table: Vec<Block> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| match resolve_block_entry(entry, lookup) {
            Ok(block) => block,
            Err(message) => {
                errors.push(RecoverableError::new(
                    section_y,
                    format!("block palette entry {i}: {message}"),
                ));
                Block::AIR
            }
        })
        .collect();
    let bits = packed::ceil_log2(table.len()).max(4);
    let palette = unpack_layer(blob, section_y, table, bits, BLOCK_CELLS, Block::AIR, "block", &mut errors)?;
    Ok((palette, errors))
}

/// Modern `biomes` compound: `palette` of biome ids plus packed `data`.
pub fn decode_biomes(
    blob: &Compound,
    section_y: i32,
    lookup: &dyn StateLookup,
) -> Result<Decoded<BiomeId>, DecodeError> {
    let entries = nbt::list(blob, "palette")?.ok_or(DecodeError::MissingField("palette"))?;
    if entries.is_empty() {
        return Err(shape_error(section_y, "empty biome palette"));
    }
    let default = lookup.default_biome();
    let mut errors = Vec::new();
    let table: Vec<BiomeId> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let resolved = match entry {
                Value::String(name) => lookup
                    .resolve_biome(name)
                    .ok_or_else(|| format!("unknown biome `{name}`")),
                _ => Err("entry is not a string".to_string()),
            };
            resolved.unwrap_or_else(|message| {
                errors.push(RecoverableError::new(
                    section_y,
                    format!("biome palette entry {i}: {message}"),
                ));
                default
            })
        })
        .collect();
    let bits = packed::ceil_log2(table.len());
    let palette = unpack_layer(blob, section_y, table, bits, BIOME_CELLS, default, "biome", &mut errors)?;
    Ok((palette, errors))
}

/// Biome layer for sections that carry no biome data.
pub fn default_biomes(lookup: &dyn StateLookup) -> Palette<BiomeId> {
    Palette::uniform(lookup.default_biome(), BIOME_CELLS)
}

/// Legacy section: `Palette` name list plus a raw `BlockStates` array.
///
/// The table starts out all air and each resolvable name is written into its
/// slot; names the lookup does not know keep air.
pub fn decode_legacy_block_states(
    section: &Compound,
    section_y: i32,
    lookup: &dyn StateLookup,
) -> Result<Decoded<Block>, DecodeError> {
    let Some(names) = nbt::list(section, "Palette")? else {
        // Light-only section
        return Ok((Palette::uniform(Block::AIR, BLOCK_CELLS), Vec::new()));
    };
    if names.is_empty() {
        return Ok((Palette::uniform(Block::AIR, BLOCK_CELLS), Vec::new()));
    }
    let mut errors = Vec::new();
    let mut indices = match nbt::long_array(section, "BlockStates")? {
        None => vec![0u16; BLOCK_CELLS],
        Some(data) => {
            let bits = packed::ceil_log2(names.len()).max(4);
            packed::unpack_any(data, bits, BLOCK_CELLS).ok_or_else(|| {
                shape_error(
                    section_y,
                    format!(
                        "BlockStates holds {} longs, expected {} or {} for {bits}-bit entries",
                        data.len(),
                        packed::padded_len(BLOCK_CELLS, bits),
                        packed::spanning_len(BLOCK_CELLS, bits),
                    ),
                )
            })?
        }
    };
    // Stray indices get their own air slot so `set_entry_at` below cannot reach them
    let mut table = vec![Block::AIR; names.len()];
    let mut remapped = 0;
    for idx in indices.iter_mut().filter(|i| usize::from(**i) >= names.len()) {
        *idx = names.len() as u16;
        remapped += 1;
    }
    if remapped > 0 {
        table.push(Block::AIR);
    }
    let (mut palette, _) = Palette::from_indices(table, indices, Block::AIR);
    errors.extend(remap_warning(section_y, "block", remapped));
    for (i, entry) in names.iter().enumerate() {
        match resolve_block_entry(entry, lookup) {
            Ok(block) => {
                palette.set_entry_at(i, block);
            }
            Err(message) => errors.push(RecoverableError::new(
                section_y,
                format!("legacy palette entry {i}: {message}"),
            )),
        }
    }
    Ok((palette, errors))
}

fn resolve_block_entry(entry: &Value, lookup: &dyn StateLookup) -> Result<Block, String> {
    let Value::Compound(entry) = entry else {
        return Err("entry is not a compound".to_string());
    };
    let Some(Value::String(name)) = entry.get("Name") else {
        return Err("entry has no Name".to_string());
    };
    lookup
        .resolve_block(name, &nbt::properties(entry))
        .ok_or_else(|| format!("unknown block `{name}`"))
}

#[allow(clippy::too_many_arguments)]
fn unpack_layer<T: Copy + PartialEq>(
    blob: &Compound,
    section_y: i32,
    table: Vec<T>,
    bits: u32,
    cells: usize,
    default: T,
    layer: &str,
    errors: &mut Vec<RecoverableError>,
) -> Result<Palette<T>, DecodeError> {
    if table.len() == 1 {
        return Ok(Palette::uniform(table[0], cells));
    }
    let data = nbt::long_array(blob, "data")?
        .ok_or_else(|| shape_error(section_y, format!("{layer} data missing for non-zero storage")))?;
    let indices = packed::unpack_padded(data, bits, cells).ok_or_else(|| {
        shape_error(
            section_y,
            format!(
                "{layer} data holds {} longs, expected {}",
                data.len(),
                packed::padded_len(cells, bits)
            ),
        )
    })?;
    let (palette, remapped) = Palette::from_indices(table, indices, default);
    errors.extend(remap_warning(section_y, layer, remapped));
    Ok(palette)
}
