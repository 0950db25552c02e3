use serde::{Deserialize, Serialize};

/// Chunks per region edge, as a shift.
pub const REGION_SHIFT: u32 = 5;
pub const CHUNKS_PER_REGION: i32 = 1 << REGION_SHIFT;
/// Blocks per chunk/section edge.
pub const CHUNK_SIZE: usize = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn region(self) -> RegionCoord {
        RegionCoord::new(self.cx >> REGION_SHIFT, self.cz >> REGION_SHIFT)
    }

    /// Slot of this chunk in its region's location table.
    #[inline]
    pub fn index_in_region(self) -> usize {
        let mask = CHUNKS_PER_REGION - 1;
        ((self.cx & mask) + (self.cz & mask) * CHUNKS_PER_REGION) as usize
    }

    #[inline]
    pub fn min_block_x(self) -> i32 {
        self.cx * CHUNK_SIZE as i32
    }

    #[inline]
    pub fn min_block_z(self) -> i32 {
        self.cz * CHUNK_SIZE as i32
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionCoord {
    pub rx: i32,
    pub rz: i32,
}

impl RegionCoord {
    #[inline]
    pub const fn new(rx: i32, rz: i32) -> Self {
        Self { rx, rz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            rx: self.rx + dx,
            rz: self.rz + dz,
        }
    }

    /// Backing file name, e.g. `r.-1.2.mca`.
    pub fn file_name(self, extension: &str) -> String {
        format!("r.{}.{}.{}", self.rx, self.rz, extension)
    }

    #[inline]
    pub fn contains(self, chunk: ChunkCoord) -> bool {
        chunk.region() == self
    }
}

impl From<(i32, i32)> for RegionCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_chunks_floor_into_regions() {
        assert_eq!(ChunkCoord::new(-1, -32).region(), RegionCoord::new(-1, -1));
        assert_eq!(ChunkCoord::new(-33, 31).region(), RegionCoord::new(-2, 0));
        assert_eq!(ChunkCoord::new(40, 40).region(), RegionCoord::new(1, 1));
        assert_eq!(ChunkCoord::new(-1, -1).index_in_region(), 1023);
        assert_eq!(ChunkCoord::new(33, 2).index_in_region(), 65);
    }

    #[test]
    fn region_file_names() {
        assert_eq!(RegionCoord::new(-1, 2).file_name("mca"), "r.-1.2.mca");
    }
}
