use std::fmt;

use mapdig_world::{ChunkCoord, WorldHeight};

use crate::heightmap::Heightmap;
use crate::section::Section;
use crate::status::ChunkStatus;

/// On-disk record layout a snapshot was decoded from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SchemaGeneration {
    /// Wrapped in a `Level` compound, sections 0..16 only.
    Legacy,
    /// Flat layout with per-section biomes and an extended height model.
    Modern,
}

/// A palette problem that was patched with a default value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoverableError {
    pub section_y: i32,
    pub message: String,
}

impl RecoverableError {
    pub fn new(section_y: i32, message: impl Into<String>) -> Self {
        Self {
            section_y,
            message: message.into(),
        }
    }
}

impl fmt::Display for RecoverableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section {}: {}", self.section_y, self.message)
    }
}

/// Immutable reconstruction of one persisted chunk.
#[derive(Clone, Debug)]
pub struct ChunkSnapshot {
    coord: ChunkCoord,
    height: WorldHeight,
    generation: SchemaGeneration,
    status: ChunkStatus,
    sections: Vec<Option<Section>>,
    heightmap: Heightmap,
    diagnostics: Vec<RecoverableError>,
}

impl ChunkSnapshot {
    /// `sections` must hold exactly `height.section_count` slots.
    pub fn new(
        coord: ChunkCoord,
        height: WorldHeight,
        generation: SchemaGeneration,
        status: ChunkStatus,
        sections: Vec<Option<Section>>,
        heightmap: Heightmap,
        diagnostics: Vec<RecoverableError>,
    ) -> Self {
        debug_assert_eq!(sections.len(), height.section_count);
        Self {
            coord,
            height,
            generation,
            status,
            sections,
            heightmap,
            diagnostics,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn height(&self) -> WorldHeight {
        self.height
    }

    #[inline]
    pub fn generation(&self) -> SchemaGeneration {
        self.generation
    }

    #[inline]
    pub fn status(&self) -> ChunkStatus {
        self.status
    }

    #[inline]
    pub fn sections(&self) -> &[Option<Section>] {
        &self.sections
    }

    /// Section containing world Y, if present.
    #[inline]
    pub fn section_at_y(&self, y: i32) -> Option<&Section> {
        let slot = self.height.section_index_for_y(y)?;
        self.sections.get(slot)?.as_ref()
    }

    #[inline]
    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    #[inline]
    pub fn diagnostics(&self) -> &[RecoverableError] {
        &self.diagnostics
    }
}
