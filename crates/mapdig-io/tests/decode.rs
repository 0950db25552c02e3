mod common;

use common::*;
use fastnbt::{LongArray, Value};
use mapdig_blocks::{Block, BlockRegistry, StateLookup};
use mapdig_chunk::{ChunkStatus, ChunkView, SchemaGeneration, SnapshotChunkView};
use mapdig_io::packed::pack_padded;
use mapdig_io::{DecodeError, RawChunkRecord, decode_chunk};
use mapdig_world::{ChunkCoord, WorldHeight};

const AT: ChunkCoord = ChunkCoord { cx: 3, cz: -2 };

fn registry() -> BlockRegistry {
    BlockRegistry::vanilla().unwrap()
}

fn view(raw: &RawChunkRecord, reg: &BlockRegistry) -> SnapshotChunkView {
    SnapshotChunkView::new(decode_chunk(AT, raw, WorldHeight::OVERWORLD, reg).unwrap())
}

#[test]
fn modern_two_section_chunk_reads_back() {
    let reg = registry();
    let stone = reg.make_block_by_name("stone", None).unwrap();
    let mut cells = vec![0u16; 4096];
    cells[cell(3, 3, 3)] = 1;
    let raw = modern_record(
        "minecraft:full",
        vec![
            modern_section(0, block_states(vec![block("minecraft:air")], None)),
            modern_section(
                1,
                block_states(vec![block("minecraft:air"), block("minecraft:stone")], Some(&cells)),
            ),
        ],
    );
    let view = view(&raw, &reg);
    assert_eq!(view.block_state(3, 19, 3), stone);
    assert_eq!(view.block_state(0, 0, 0), Block::AIR);
    assert_eq!(view.block_state(3, 3, 3), Block::AIR);
    assert_eq!(view.sample_heightmap(3, 3), 19);
    assert_eq!(view.sample_heightmap(0, 0), -65);
    assert_eq!(view.status(), ChunkStatus::Full);
    assert_eq!(view.snapshot().generation(), SchemaGeneration::Modern);
    assert!(view.diagnostics().is_empty());
    assert_eq!(view.biome(3, 19, 3), reg.resolve_biome("plains"));
}

#[test]
fn partially_generated_chunk_is_absent() {
    let reg = registry();
    for status in ["minecraft:features", "noise", "heightmaps", "empty"] {
        let raw = modern_record(status, Vec::new());
        let err = decode_chunk(AT, &raw, WorldHeight::OVERWORLD, &reg).unwrap_err();
        assert!(err.is_absence(), "{status} decoded as {err:?}");
    }
}

#[test]
fn unknown_or_missing_status_is_structural() {
    let reg = registry();
    let raw = modern_record("bogus", Vec::new());
    assert!(matches!(
        decode_chunk(AT, &raw, WorldHeight::OVERWORLD, &reg),
        Err(DecodeError::UnknownStatus(s)) if s == "bogus"
    ));

    let raw = RawChunkRecord::from_value(compound(vec![("sections", Value::List(Vec::new()))])).unwrap();
    assert!(matches!(
        decode_chunk(AT, &raw, WorldHeight::OVERWORLD, &reg),
        Err(DecodeError::MissingField("Status"))
    ));
}

#[test]
fn one_unresolvable_entry_yields_one_diagnostic() {
    let reg = registry();
    let stone = reg.make_block_by_name("stone", None).unwrap();
    let dirt = reg.make_block_by_name("dirt", None).unwrap();
    let mut cells = vec![0u16; 4096];
    cells[cell(1, 1, 1)] = 1;
    cells[cell(2, 2, 2)] = 2;
    cells[cell(4, 4, 4)] = 3;
    let raw = modern_record(
        "full",
        vec![modern_section(
            2,
            block_states(
                vec![
                    block("minecraft:air"),
                    block("minecraft:not_a_block"),
                    block("minecraft:stone"),
                    block("minecraft:dirt"),
                ],
                Some(&cells),
            ),
        )],
    );
    let view = view(&raw, &reg);
    assert_eq!(view.diagnostics().len(), 1);
    assert_eq!(view.diagnostics()[0].section_y, 2);
    assert_eq!(view.block_state(1, 33, 1), Block::AIR);
    assert_eq!(view.block_state(2, 34, 2), stone);
    assert_eq!(view.block_state(4, 36, 4), dirt);
}

#[test]
fn unknown_biome_falls_back_to_default() {
    let reg = registry();
    let mut section = match modern_section(0, block_states(vec![block("minecraft:stone")], None)) {
        Value::Compound(c) => c,
        _ => unreachable!(),
    };
    section.insert("biomes".to_string(), biomes(&["minecraft:moon"]));
    let raw = modern_record("full", vec![Value::Compound(section)]);
    let view = view(&raw, &reg);
    assert_eq!(view.diagnostics().len(), 1);
    assert_eq!(view.biome(0, 0, 0), Some(reg.default_biome()));
}

#[test]
fn data_length_mismatch_is_structural() {
    let reg = registry();
    let states = compound(vec![
        (
            "palette",
            Value::List(vec![block("minecraft:air"), block("minecraft:stone")]),
        ),
        ("data", Value::LongArray(LongArray::new(vec![0; 10]))),
    ]);
    let raw = modern_record("full", vec![modern_section(0, states)]);
    assert!(matches!(
        decode_chunk(AT, &raw, WorldHeight::OVERWORLD, &reg),
        Err(DecodeError::SectionShape { y: 0, .. })
    ));
}

#[test]
fn legacy_chunk_fills_modern_height_model() {
    let reg = registry();
    // 17 entries force 5-bit values that straddle longs
    let mut names = vec![block("minecraft:air")];
    names.extend((0..16).map(|lvl| block_with("minecraft:water", &[("level", &lvl.to_string())])));
    let mut cells = vec![0u16; 4096];
    cells[cell(5, 7, 9)] = 1;
    cells[cell(6, 7, 9)] = 16;
    let raw = legacy_record("postprocessed", vec![legacy_section(2, names, &cells, true)], None);

    let snapshot = decode_chunk(AT, &raw, WorldHeight::OVERWORLD, &reg).unwrap();
    assert_eq!(snapshot.generation(), SchemaGeneration::Legacy);
    assert_eq!(snapshot.sections().len(), 24);
    for (slot, section) in snapshot.sections().iter().enumerate() {
        let y = WorldHeight::OVERWORLD.section_y_at(slot);
        match y {
            2 => assert!(!section.as_ref().unwrap().is_empty()),
            0..16 => assert!(section.is_none()),
            _ => assert!(section.as_ref().unwrap().is_empty()),
        }
    }

    let view = SnapshotChunkView::new(snapshot);
    assert!(view.fluid_state(5, 39, 9).is_source());
    let flowing = view.fluid_state(6, 39, 9);
    assert!(!flowing.is_empty() && !flowing.is_source());
    assert_eq!(view.sample_heightmap(5, 9), 39);
}

#[test]
fn legacy_unresolved_name_stays_air() {
    let reg = registry();
    let names = vec![block("minecraft:air"), block("minecraft:ancient_thing")];
    let mut cells = vec![0u16; 4096];
    cells[cell(0, 0, 0)] = 1;
    let raw = legacy_record("full", vec![legacy_section(0, names, &cells, false)], None);
    let view = view(&raw, &reg);
    assert_eq!(view.block_state(0, 0, 0), Block::AIR);
    assert_eq!(view.diagnostics().len(), 1);
}

#[test]
fn legacy_embedded_heightmap_is_used() {
    let reg = registry();
    let mut heights = vec![0u16; 256];
    heights[3 * 16 + 2] = 70;
    let raw = legacy_record("full", Vec::new(), Some(pack_padded(&heights, 9)));
    let view = view(&raw, &reg);
    assert_eq!(view.sample_heightmap(2, 3), 69);
    assert_eq!(view.sample_heightmap(0, 0), -65);
}

#[test]
fn malformed_heightmap_is_recomputed() {
    let reg = registry();
    let mut cells = vec![0u16; 4096];
    cells[cell(8, 15, 8)] = 1;
    let record = modern_record(
        "full",
        vec![modern_section(
            4,
            block_states(vec![block("minecraft:air"), block("minecraft:stone")], Some(&cells)),
        )],
    );
    let mut root = record.root().clone();
    root.insert(
        "Heightmaps".to_string(),
        compound(vec![("WORLD_SURFACE", Value::LongArray(LongArray::new(vec![0; 5])))]),
    );
    let raw = RawChunkRecord::new(root);
    let view = view(&raw, &reg);
    assert_eq!(view.sample_heightmap(8, 8), 79);
}
