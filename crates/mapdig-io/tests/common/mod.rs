#![allow(dead_code)]

use std::collections::HashMap;

use fastnbt::{LongArray, Value};
use mapdig_io::RawChunkRecord;
use mapdig_io::packed::{ceil_log2, pack_padded};

pub fn compound(pairs: Vec<(&str, Value)>) -> Value {
    Value::Compound(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<HashMap<_, _>>(),
    )
}

pub fn block(name: &str) -> Value {
    compound(vec![("Name", Value::String(name.to_string()))])
}

pub fn block_with(name: &str, props: &[(&str, &str)]) -> Value {
    let props = props
        .iter()
        .map(|(k, v)| (*k, Value::String(v.to_string())))
        .collect();
    compound(vec![
        ("Name", Value::String(name.to_string())),
        ("Properties", compound(props)),
    ])
}

/// Modern `block_states` blob; `cells` are palette indices in `(y*16+z)*16+x` order.
pub fn block_states(palette: Vec<Value>, cells: Option<&[u16]>) -> Value {
    let bits = ceil_log2(palette.len()).max(4);
    let mut pairs = vec![("palette", Value::List(palette))];
    if let Some(cells) = cells {
        pairs.push(("data", Value::LongArray(LongArray::new(pack_padded(cells, bits)))));
    }
    compound(pairs)
}

pub fn biomes(names: &[&str]) -> Value {
    compound(vec![(
        "palette",
        Value::List(names.iter().map(|n| Value::String(n.to_string())).collect()),
    )])
}

pub fn modern_section(y: i8, states: Value) -> Value {
    compound(vec![
        ("Y", Value::Byte(y)),
        ("block_states", states),
        ("biomes", biomes(&["minecraft:plains"])),
    ])
}

pub fn modern_record(status: &str, sections: Vec<Value>) -> RawChunkRecord {
    let root = compound(vec![
        ("DataVersion", Value::Int(3465)),
        ("Status", Value::String(status.to_string())),
        ("sections", Value::List(sections)),
    ]);
    RawChunkRecord::from_value(root).unwrap()
}

/// Legacy section with spanning or padded `BlockStates` depending on `spanning`.
pub fn legacy_section(y: i8, names: Vec<Value>, cells: &[u16], spanning: bool) -> Value {
    let bits = ceil_log2(names.len()).max(4);
    let data = if spanning {
        pack_spanning(cells, bits)
    } else {
        pack_padded(cells, bits)
    };
    compound(vec![
        ("Y", Value::Byte(y)),
        ("Palette", Value::List(names)),
        ("BlockStates", Value::LongArray(LongArray::new(data))),
    ])
}

pub fn legacy_record(status: &str, sections: Vec<Value>, heightmap: Option<Vec<i64>>) -> RawChunkRecord {
    let mut level = vec![
        ("Status", Value::String(status.to_string())),
        ("Sections", Value::List(sections)),
    ];
    if let Some(hm) = heightmap {
        level.push((
            "Heightmaps",
            compound(vec![("WORLD_SURFACE", Value::LongArray(LongArray::new(hm)))]),
        ));
    }
    let root = compound(vec![("DataVersion", Value::Int(2230)), ("Level", compound(level))]);
    RawChunkRecord::from_value(root).unwrap()
}

pub fn pack_spanning(values: &[u16], bits: u32) -> Vec<i64> {
    let mut out = vec![0u64; (values.len() * bits as usize).div_ceil(64)];
    for (i, &v) in values.iter().enumerate() {
        let bit = i * bits as usize;
        let word = bit / 64;
        let offset = (bit % 64) as u32;
        out[word] |= u64::from(v) << offset;
        if offset + bits > 64 {
            out[word + 1] |= u64::from(v) >> (64 - offset);
        }
    }
    out.into_iter().map(|w| w as i64).collect()
}

pub fn cell(x: usize, y: usize, z: usize) -> usize {
    (y * 16 + z) * 16 + x
}
