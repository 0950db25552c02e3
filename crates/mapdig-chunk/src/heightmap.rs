use mapdig_blocks::Block;
use mapdig_world::WorldHeight;

use crate::section::Section;

pub const COLUMNS: usize = 256;

#[inline]
fn column_index(x: usize, z: usize) -> usize {
    z * 16 + x
}

/// World-surface heightmap: per column, the first Y above the highest non-air
/// block, or the world bottom for empty columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heightmap {
    heights: Vec<i32>,
}

impl Heightmap {
    /// Absolute heights in column order (`z * 16 + x`); short input is padded with `fill`.
    pub fn from_heights(mut heights: Vec<i32>, fill: i32) -> Self {
        heights.resize(COLUMNS, fill);
        Self { heights }
    }

    pub fn flat(height: i32) -> Self {
        Self {
            heights: vec![height; COLUMNS],
        }
    }

    /// Scans each column top-down for the first block `is_air` rejects.
    pub fn compute(
        sections: &[Option<Section>],
        height: WorldHeight,
        is_air: impl Fn(Block) -> bool,
    ) -> Self {
        let mut heights = vec![height.min_y(); COLUMNS];
        for z in 0..16 {
            for x in 0..16 {
                'column: for (slot, section) in sections.iter().enumerate().rev() {
                    let Some(section) = section else { continue };
                    if section.is_empty() {
                        continue;
                    }
                    let base_y = height.section_y_at(slot) * 16;
                    for ly in (0..16).rev() {
                        if !is_air(section.block(x, ly, z)) {
                            heights[column_index(x, z)] = base_y + ly as i32 + 1;
                            break 'column;
                        }
                    }
                }
            }
        }
        Self { heights }
    }

    /// First free Y of a column; x and z are masked to the chunk.
    #[inline]
    pub fn get(&self, x: i32, z: i32) -> i32 {
        self.heights[column_index((x & 15) as usize, (z & 15) as usize)]
    }

    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.heights
    }
}
