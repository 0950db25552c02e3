use serde::Deserialize;
use std::collections::HashMap;

use crate::types::Fluid;

// Top-level registry config file
#[derive(Deserialize, Debug, Default)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    // Biome identifiers in id order
    #[serde(default)]
    pub biomes: Vec<String>,
    // Biome substituted for unresolved or missing biome data; plains when absent
    #[serde(default)]
    pub default_biome: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub air: Option<bool>,
    #[serde(default)]
    pub fluid: Option<Fluid>,
    #[serde(default)]
    pub state_schema: Option<HashMap<String, Vec<String>>>,
}
