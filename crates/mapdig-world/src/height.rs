use serde::{Deserialize, Serialize};

use crate::coords::CHUNK_SIZE;

/// Vertical extent of a dimension, in sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldHeight {
    pub min_section: i32,
    pub section_count: usize,
}

impl Default for WorldHeight {
    fn default() -> Self {
        Self::OVERWORLD
    }
}

impl WorldHeight {
    /// Y -64..320, the sectioned height model of current saves.
    pub const OVERWORLD: WorldHeight = WorldHeight {
        min_section: -4,
        section_count: 24,
    };

    /// Y 0..256, the fixed span of pre-extension saves.
    pub const LEGACY: WorldHeight = WorldHeight {
        min_section: 0,
        section_count: 16,
    };

    #[inline]
    pub const fn new(min_section: i32, section_count: usize) -> Self {
        Self {
            min_section,
            section_count,
        }
    }

    #[inline]
    pub fn max_section(&self) -> i32 {
        self.min_section + self.section_count as i32
    }

    #[inline]
    pub fn min_y(&self) -> i32 {
        self.min_section * CHUNK_SIZE as i32
    }

    /// Exclusive top.
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.max_section() * CHUNK_SIZE as i32
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.section_count as i32 * CHUNK_SIZE as i32
    }

    #[inline]
    pub fn contains_section(&self, section_y: i32) -> bool {
        section_y >= self.min_section && section_y < self.max_section()
    }

    /// Array slot of a section Y, if inside the model.
    #[inline]
    pub fn section_index(&self, section_y: i32) -> Option<usize> {
        if self.contains_section(section_y) {
            Some((section_y - self.min_section) as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn section_index_for_y(&self, y: i32) -> Option<usize> {
        self.section_index(y >> 4)
    }

    #[inline]
    pub fn section_y_at(&self, index: usize) -> i32 {
        self.min_section + index as i32
    }

    pub fn section_ys(&self) -> impl Iterator<Item = i32> {
        self.min_section..self.max_section()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overworld_slots() {
        let h = WorldHeight::OVERWORLD;
        assert_eq!(h.min_y(), -64);
        assert_eq!(h.max_y(), 320);
        assert_eq!(h.section_index(-4), Some(0));
        assert_eq!(h.section_index(19), Some(23));
        assert_eq!(h.section_index(20), None);
        assert_eq!(h.section_index_for_y(-1), Some(3));
        assert_eq!(h.section_y_at(4), 0);
    }

    #[test]
    fn deserializes_from_toml() {
        let h: WorldHeight = toml::from_str("min_section = 0\nsection_count = 16\n").unwrap();
        assert_eq!(h, WorldHeight::LEGACY);
    }
}
