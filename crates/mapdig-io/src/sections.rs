use fastnbt::Value;
use mapdig_blocks::{Block, StateLookup};
use mapdig_chunk::palette::BLOCK_CELLS;
use mapdig_chunk::{Palette, RecoverableError, SchemaGeneration, Section};
use mapdig_world::{ChunkCoord, WorldHeight};

use crate::error::DecodeError;
use crate::nbt::{self, Compound};
use crate::palette;

/// Sections a legacy save can hold: Y 0..16.
pub const LEGACY_SECTIONS: std::ops::Range<i32> = 0..16;

pub type SectionArray = Vec<Option<Section>>;

/// Builds the full vertical stack of sections for one chunk.
///
/// The result always has `height.section_count` slots. For legacy records,
/// slots outside the legacy range are filled with empty sections so the array
/// has the same shape as a modern chunk.
pub fn assemble(
    coord: ChunkCoord,
    records: &[Value],
    generation: SchemaGeneration,
    height: WorldHeight,
    lookup: &dyn StateLookup,
) -> Result<(SectionArray, Vec<RecoverableError>), DecodeError> {
    let mut slots: SectionArray = vec![None; height.section_count];
    if generation == SchemaGeneration::Legacy {
        let biome = lookup.default_biome();
        for y in height.section_ys().filter(|y| !LEGACY_SECTIONS.contains(y)) {
            if let Some(slot) = height.section_index(y) {
                let mut section = Section::empty(y, biome);
                section.finalize(lookup);
                slots[slot] = Some(section);
            }
        }
    }

    let mut diagnostics = Vec::new();
    let mut listed = vec![false; height.section_count];
    for record in records {
        let Value::Compound(record) = record else {
            return Err(DecodeError::WrongType {
                field: "sections",
                expected: "list of compounds",
            });
        };
        let y = nbt::int(record, "Y").ok_or(DecodeError::MissingField("Y"))?;
        let Some(slot) = height.section_index(y) else {
            log::debug!(
                "Skipping section {y} of chunk [{}, {}]: outside the world height",
                coord.cx,
                coord.cz
            );
            continue;
        };
        let (mut section, errors) = match generation {
            SchemaGeneration::Modern => modern_section(record, y, lookup)?,
            SchemaGeneration::Legacy => legacy_section(record, y, lookup)?,
        };
        if !errors.is_empty() {
            let joined: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
            log::error!(
                "Recoverable errors when loading section [{}, {}, {}]: {}",
                coord.cx,
                y,
                coord.cz,
                joined.join("; ")
            );
            diagnostics.extend(errors);
        }
        section.finalize(lookup);
        slots[slot] = Some(section);
        // Legacy light-only records at Y -1 and 16 replace placeholders silently
        if std::mem::replace(&mut listed[slot], true) {
            log::warn!(
                "Chunk [{}, {}] lists section {y} more than once; keeping the last",
                coord.cx,
                coord.cz
            );
        }
    }
    Ok((slots, diagnostics))
}

fn modern_section(
    record: &Compound,
    y: i32,
    lookup: &dyn StateLookup,
) -> Result<(Section, Vec<RecoverableError>), DecodeError> {
    let (blocks, mut errors) = match nbt::compound(record, "block_states")? {
        Some(blob) => palette::decode_block_states(blob, y, lookup)?,
        None => (Palette::uniform(Block::AIR, BLOCK_CELLS), Vec::new()),
    };
    let biomes = match nbt::compound(record, "biomes")? {
        Some(blob) => {
            let (biomes, biome_errors) = palette::decode_biomes(blob, y, lookup)?;
            errors.extend(biome_errors);
            biomes
        }
        None => palette::default_biomes(lookup),
    };
    Ok((Section::new(y, blocks, biomes), errors))
}

fn legacy_section(
    record: &Compound,
    y: i32,
    lookup: &dyn StateLookup,
) -> Result<(Section, Vec<RecoverableError>), DecodeError> {
    let (blocks, errors) = palette::decode_legacy_block_states(record, y, lookup)?;
    Ok((Section::new(y, blocks, palette::default_biomes(lookup)), errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapdig_blocks::BlockRegistry;
    use std::collections::HashMap;

    fn section_record(y: i8, name: &str) -> Value {
        let mut entry = HashMap::new();
        entry.insert("Name".to_string(), Value::String(name.to_string()));
        let mut states = HashMap::new();
        states.insert("palette".to_string(), Value::List(vec![Value::Compound(entry)]));
        let mut record = HashMap::new();
        record.insert("Y".to_string(), Value::Byte(y));
        record.insert("block_states".to_string(), Value::Compound(states));
        Value::Compound(record)
    }

    #[test]
    fn duplicate_y_keeps_the_last_record() {
        let reg = BlockRegistry::vanilla().unwrap();
        let records = vec![section_record(2, "minecraft:stone"), section_record(2, "minecraft:dirt")];
        let (slots, errors) = assemble(
            ChunkCoord::new(0, 0),
            &records,
            SchemaGeneration::Modern,
            WorldHeight::OVERWORLD,
            &reg,
        )
        .unwrap();
        assert!(errors.is_empty());
        let slot = WorldHeight::OVERWORLD.section_index(2).unwrap();
        let dirt = reg.make_block_by_name("dirt", None).unwrap();
        assert_eq!(slots[slot].as_ref().unwrap().block(0, 0, 0), dirt);
        assert_eq!(slots.iter().filter(|s| s.is_some()).count(), 1);
    }

    #[test]
    fn out_of_range_y_is_skipped() {
        let reg = BlockRegistry::vanilla().unwrap();
        let records = vec![section_record(-5, "minecraft:stone"), section_record(20, "minecraft:stone")];
        let (slots, _) = assemble(
            ChunkCoord::new(0, 0),
            &records,
            SchemaGeneration::Modern,
            WorldHeight::OVERWORLD,
            &reg,
        )
        .unwrap();
        assert!(slots.iter().all(Option::is_none));
    }

    fn light_only_record(y: i8) -> Value {
        let mut record = HashMap::new();
        record.insert("Y".to_string(), Value::Byte(y));
        record.insert("SkyLight".to_string(), Value::ByteArray(fastnbt::ByteArray::new(vec![0; 2048])));
        Value::Compound(record)
    }

    #[test]
    fn legacy_light_only_sections_fill_their_slots() {
        let reg = BlockRegistry::vanilla().unwrap();
        let records = vec![light_only_record(-1), light_only_record(0), light_only_record(16)];
        let (slots, errors) = assemble(
            ChunkCoord::new(0, 0),
            &records,
            SchemaGeneration::Legacy,
            WorldHeight::OVERWORLD,
            &reg,
        )
        .unwrap();
        assert!(errors.is_empty());
        assert_eq!(slots.len(), 24);
        for y in [-1, 0, 16] {
            let slot = WorldHeight::OVERWORLD.section_index(y).unwrap();
            let section = slots[slot].as_ref().unwrap();
            assert_eq!(section.y(), y);
            assert!(section.is_empty());
        }
        assert!(slots[WorldHeight::OVERWORLD.section_index(1).unwrap()].is_none());
    }

    #[test]
    fn legacy_stack_is_padded_to_modern_shape() {
        let reg = BlockRegistry::vanilla().unwrap();
        let (slots, _) = assemble(
            ChunkCoord::new(0, 0),
            &[],
            SchemaGeneration::Legacy,
            WorldHeight::OVERWORLD,
            &reg,
        )
        .unwrap();
        assert_eq!(slots.len(), 24);
        for (slot, section) in slots.iter().enumerate() {
            let y = WorldHeight::OVERWORLD.section_y_at(slot);
            assert_eq!(section.is_some(), !LEGACY_SECTIONS.contains(&y));
            if let Some(s) = section {
                assert!(s.is_empty());
            }
        }
    }
}
