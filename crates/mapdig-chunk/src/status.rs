use std::fmt;

/// Generation progress of a persisted chunk, in pipeline order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChunkStatus {
    Empty,
    StructureStarts,
    StructureReferences,
    Biomes,
    Noise,
    Surface,
    Carvers,
    LiquidCarvers,
    Features,
    InitializeLight,
    Light,
    Spawn,
    Heightmaps,
    Full,
}

impl ChunkStatus {
    /// Parses a persisted status id, with or without the `minecraft:` namespace.
    /// Ids written by pre-1.14 saves map onto their current equivalents.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.strip_prefix("minecraft:").unwrap_or(id);
        let status = match id {
            "empty" => ChunkStatus::Empty,
            "structure_starts" => ChunkStatus::StructureStarts,
            "structure_references" => ChunkStatus::StructureReferences,
            "biomes" => ChunkStatus::Biomes,
            "noise" | "base" => ChunkStatus::Noise,
            "surface" => ChunkStatus::Surface,
            "carvers" | "carved" => ChunkStatus::Carvers,
            "liquid_carvers" | "liquid_carved" => ChunkStatus::LiquidCarvers,
            "features" | "decorated" => ChunkStatus::Features,
            "initialize_light" => ChunkStatus::InitializeLight,
            "light" | "lighted" => ChunkStatus::Light,
            "spawn" | "mobs_spawned" => ChunkStatus::Spawn,
            "heightmaps" => ChunkStatus::Heightmaps,
            "full" | "fullchunk" | "postprocessed" => ChunkStatus::Full,
            _ => return None,
        };
        Some(status)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChunkStatus::Empty => "empty",
            ChunkStatus::StructureStarts => "structure_starts",
            ChunkStatus::StructureReferences => "structure_references",
            ChunkStatus::Biomes => "biomes",
            ChunkStatus::Noise => "noise",
            ChunkStatus::Surface => "surface",
            ChunkStatus::Carvers => "carvers",
            ChunkStatus::LiquidCarvers => "liquid_carvers",
            ChunkStatus::Features => "features",
            ChunkStatus::InitializeLight => "initialize_light",
            ChunkStatus::Light => "light",
            ChunkStatus::Spawn => "spawn",
            ChunkStatus::Heightmaps => "heightmaps",
            ChunkStatus::Full => "full",
        }
    }

    #[inline]
    pub fn is_at_least(self, other: ChunkStatus) -> bool {
        self >= other
    }
}

impl fmt::Display for ChunkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_and_legacy_ids() {
        assert_eq!(ChunkStatus::from_id("minecraft:full"), Some(ChunkStatus::Full));
        assert_eq!(ChunkStatus::from_id("full"), Some(ChunkStatus::Full));
        assert_eq!(ChunkStatus::from_id("postprocessed"), Some(ChunkStatus::Full));
        assert_eq!(ChunkStatus::from_id("minecraft:noise"), Some(ChunkStatus::Noise));
        assert_eq!(ChunkStatus::from_id("bogus"), None);
    }

    #[test]
    fn ordering_follows_the_pipeline() {
        assert!(ChunkStatus::Full.is_at_least(ChunkStatus::Full));
        assert!(!ChunkStatus::Heightmaps.is_at_least(ChunkStatus::Full));
        assert!(ChunkStatus::Features < ChunkStatus::Light);
    }
}
