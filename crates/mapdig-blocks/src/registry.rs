use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::BlocksConfig;
use super::lookup::StateLookup;
use super::types::{BiomeId, Block, BlockId, BlockState, Fluid, FluidState};

const VANILLA_TOML: &str = include_str!("../assets/vanilla.toml");
const AIR_NAME: &str = "minecraft:air";
const FALLBACK_BIOME: &str = "minecraft:plains";

/// Adds the `minecraft:` namespace to bare identifiers.
pub fn normalize_name(name: &str) -> String {
    if name.contains(':') {
        name.to_string()
    } else {
        format!("minecraft:{name}")
    }
}

#[derive(Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub biomes: Vec<String>,
    pub biome_by_name: HashMap<String, BiomeId>,
    pub default_biome: BiomeId,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    /// Registry holding only air and the fallback biome.
    pub fn new() -> Self {
        let mut air = BlockType::placeholder(0);
        air.name = AIR_NAME.to_string();
        air.air = true;
        Self {
            blocks: vec![air],
            by_name: HashMap::from([(AIR_NAME.to_string(), 0)]),
            biomes: vec![FALLBACK_BIOME.to_string()],
            biome_by_name: HashMap::from([(FALLBACK_BIOME.to_string(), BiomeId(0))]),
            default_biome: BiomeId(0),
        }
    }

    /// Embedded table covering common overworld terrain blocks and biomes.
    pub fn vanilla() -> Result<Self, Box<dyn Error>> {
        Self::from_toml_str(VANILLA_TOML)
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(&normalize_name(name)).copied()
    }

    pub fn biome_name(&self, id: BiomeId) -> Option<&str> {
        self.biomes.get(id.0 as usize).map(|s| s.as_str())
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry::new();
        // Id 0 stays reserved for air so Block::AIR is always air
        let mut next_id: u16 = 1;
        for def in cfg.blocks.into_iter() {
            let name = normalize_name(&def.name);
            let id = if name == AIR_NAME {
                0
            } else {
                def.id.unwrap_or(next_id)
            };
            if id == 0 && name != AIR_NAME {
                return Err(format!("block id 0 is reserved for air, got {name}").into());
            }
            next_id = next_id.max(id.saturating_add(1));
            let state_schema = def.state_schema.unwrap_or_default();
            let (state_fields, prop_index) = compute_state_layout(&state_schema);
            let ty = BlockType {
                id,
                name,
                air: def.air.unwrap_or(id == 0),
                fluid: def.fluid.unwrap_or_default(),
                state_fields,
                prop_index,
            };
            if reg.blocks.len() <= id as usize {
                reg.blocks
                    .resize(id as usize + 1, BlockType::placeholder(id));
            }
            reg.blocks[id as usize] = ty;
        }
        reg.by_name = reg
            .blocks
            .iter()
            .filter(|t| !t.name.is_empty())
            .map(|t| (t.name.clone(), t.id))
            .collect();

        let default_name = normalize_name(cfg.default_biome.as_deref().unwrap_or(FALLBACK_BIOME));
        let mut biomes: Vec<String> = cfg.biomes.iter().map(|b| normalize_name(b)).collect();
        if !biomes.contains(&default_name) {
            biomes.insert(0, default_name.clone());
        }
        reg.biome_by_name = biomes
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), BiomeId(i as u16)))
            .collect();
        reg.default_biome = reg.biome_by_name[&default_name];
        reg.biomes = biomes;
        Ok(reg)
    }

    pub fn make_block_by_name(
        &self,
        name: &str,
        props: Option<&HashMap<String, String>>,
    ) -> Option<Block> {
        let id = self.id_by_name(name)?;
        let state = match props {
            Some(p) => self.get(id).map(|ty| ty.pack_state(p)).unwrap_or(0),
            None => 0,
        };
        Some(Block { id, state })
    }
}

impl StateLookup for BlockRegistry {
    fn resolve_block(&self, name: &str, props: &HashMap<String, String>) -> Option<Block> {
        self.make_block_by_name(name, Some(props))
    }

    fn resolve_biome(&self, name: &str) -> Option<BiomeId> {
        self.biome_by_name.get(&normalize_name(name)).copied()
    }

    fn default_biome(&self) -> BiomeId {
        self.default_biome
    }

    fn is_air(&self, block: Block) -> bool {
        self.get(block.id).map(|ty| ty.air).unwrap_or(false)
    }

    fn fluid_state(&self, block: Block) -> FluidState {
        let Some(ty) = self.get(block.id) else {
            return FluidState::EMPTY;
        };
        match ty.fluid {
            Fluid::Empty => {
                if ty.state_prop_is_value(block.state, "waterlogged", "true") {
                    FluidState::source(Fluid::Water)
                } else {
                    FluidState::EMPTY
                }
            }
            fluid => {
                let level = ty
                    .state_prop_value(block.state, "level")
                    .and_then(|v| v.parse::<u8>().ok())
                    .unwrap_or(0);
                FluidState::from_block_level(fluid, level)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub air: bool,
    pub fluid: Fluid,
    // Precomputed, sorted layout for fast state packing/unpacking
    pub state_fields: Vec<StateField>,
    pub prop_index: HashMap<String, usize>,
}

impl BlockType {
    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            air: false,
            fluid: Fluid::Empty,
            state_fields: Vec::new(),
            prop_index: HashMap::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StateField {
    pub name: String,
    pub values: Vec<String>,
    pub bits: u32,
    pub offset: u32,
}

fn compute_state_layout(
    schema: &HashMap<String, Vec<String>>,
) -> (Vec<StateField>, HashMap<String, usize>) {
    let mut keys: Vec<&String> = schema.keys().collect();
    keys.sort();
    let mut offset: u32 = 0;
    let mut fields: Vec<StateField> = Vec::with_capacity(keys.len());
    for k in keys.into_iter() {
        let vals = schema.get(k).cloned().unwrap_or_default();
        let vlen = vals.len() as u32;
        let bits: u32 = if vlen <= 1 {
            0
        } else {
            32 - (vlen - 1).leading_zeros()
        };
        fields.push(StateField {
            name: k.to_string(),
            values: vals,
            bits,
            offset,
        });
        offset = offset.saturating_add(bits);
    }
    let mut index: HashMap<String, usize> = HashMap::with_capacity(fields.len());
    for (i, f) in fields.iter().enumerate() {
        index.insert(f.name.clone(), i);
    }
    (fields, index)
}

impl BlockType {
    pub fn state_prop_value<'a>(&'a self, state: BlockState, prop: &str) -> Option<&'a str> {
        if self.state_fields.is_empty() {
            return None;
        }
        let &i = self.prop_index.get(prop)?;
        let f = &self.state_fields[i];
        if f.bits == 0 {
            return f.values.first().map(|s| s.as_str());
        }
        let mask: u32 = if f.bits >= 32 {
            u32::MAX
        } else {
            (1u32 << f.bits) - 1
        };
        let idx: usize = (((state as u32) >> f.offset) & mask) as usize;
        f.values.get(idx).map(|s| s.as_str())
    }

    pub fn state_prop_is_value(&self, state: BlockState, prop: &str, expect: &str) -> bool {
        self.state_prop_value(state, prop) == Some(expect)
    }

    pub fn pack_state(&self, props: &HashMap<String, String>) -> BlockState {
        if self.state_fields.is_empty() {
            return 0;
        }
        let mut acc: u32 = 0;
        for f in &self.state_fields {
            if f.bits == 0 {
                continue;
            }
            let sel_idx: u32 = match props.get(&f.name) {
                Some(val) => f.values.iter().position(|s| s == val).unwrap_or(0) as u32,
                None => 0,
            };
            acc |= (sel_idx & ((1u32 << f.bits) - 1)) << f.offset;
        }
        acc as BlockState
    }
}
