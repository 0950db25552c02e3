//! Raw chunk records and typed field access over NBT compounds.

use std::collections::HashMap;

use fastnbt::Value;
use mapdig_chunk::SchemaGeneration;
use mapdig_world::ChunkCoord;

use crate::error::{DecodeError, RegionError};

pub type Compound = HashMap<String, Value>;

/// Decoded NBT tree of one chunk, exactly as stored.
#[derive(Clone, Debug)]
pub struct RawChunkRecord {
    root: Compound,
}

impl RawChunkRecord {
    pub fn new(root: Compound) -> Self {
        Self { root }
    }

    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Compound(root) => Some(Self { root }),
            _ => None,
        }
    }

    /// Parses uncompressed NBT bytes.
    pub fn from_nbt_bytes(coord: ChunkCoord, bytes: &[u8]) -> Result<Self, RegionError> {
        let value: Value =
            fastnbt::from_bytes(bytes).map_err(|e| RegionError::Nbt(coord, e.to_string()))?;
        Self::from_value(value).ok_or(RegionError::NotACompound(coord))
    }

    #[inline]
    pub fn root(&self) -> &Compound {
        &self.root
    }

    /// Legacy records wrap everything in a `Level` compound.
    pub fn generation(&self) -> SchemaGeneration {
        match self.root.get("Level") {
            Some(Value::Compound(_)) => SchemaGeneration::Legacy,
            _ => SchemaGeneration::Modern,
        }
    }

    /// Compound holding status, sections, and heightmaps for this record's generation.
    pub fn level(&self) -> &Compound {
        match self.root.get("Level") {
            Some(Value::Compound(level)) => level,
            _ => &self.root,
        }
    }

    pub fn data_version(&self) -> Option<i32> {
        int(&self.root, "DataVersion")
    }
}

pub fn compound<'a>(map: &'a Compound, field: &'static str) -> Result<Option<&'a Compound>, DecodeError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::Compound(c)) => Ok(Some(c)),
        Some(_) => Err(DecodeError::WrongType {
            field,
            expected: "compound",
        }),
    }
}

pub fn list<'a>(map: &'a Compound, field: &'static str) -> Result<Option<&'a [Value]>, DecodeError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::List(items)) => Ok(Some(items.as_slice())),
        Some(_) => Err(DecodeError::WrongType {
            field,
            expected: "list",
        }),
    }
}

pub fn string<'a>(map: &'a Compound, field: &'static str) -> Result<Option<&'a str>, DecodeError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(DecodeError::WrongType {
            field,
            expected: "string",
        }),
    }
}

pub fn long_array<'a>(
    map: &'a Compound,
    field: &'static str,
) -> Result<Option<&'a [i64]>, DecodeError> {
    match map.get(field) {
        None => Ok(None),
        Some(Value::LongArray(arr)) => Ok(Some(&arr[..])),
        // Empty arrays sometimes round-trip as empty lists
        Some(Value::List(items)) if items.is_empty() => Ok(Some(&[])),
        Some(_) => Err(DecodeError::WrongType {
            field,
            expected: "long array",
        }),
    }
}

/// Any integral tag widened to i32; None when missing or not integral.
pub fn int(map: &Compound, field: &str) -> Option<i32> {
    match map.get(field)? {
        Value::Byte(v) => Some(i32::from(*v)),
        Value::Short(v) => Some(i32::from(*v)),
        Value::Int(v) => Some(*v),
        Value::Long(v) => i32::try_from(*v).ok(),
        _ => None,
    }
}

/// Block properties as string pairs; non-string values are ignored.
pub fn properties(entry: &Compound) -> HashMap<String, String> {
    match entry.get("Properties") {
        Some(Value::Compound(props)) => props
            .iter()
            .filter_map(|(k, v)| match v {
                Value::String(s) => Some((k.clone(), s.clone())),
                _ => None,
            })
            .collect(),
        _ => HashMap::new(),
    }
}
