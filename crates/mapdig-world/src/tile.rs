//! Renderer tile geometry.
//!
//! A tile spans 256 blocks at zoom shift 0. Every positive zoom step doubles
//! the span and every negative one halves it, so at shift 1 a tile covers
//! exactly one region and at shift -4 exactly one chunk.

use serde::{Deserialize, Serialize};

use crate::coords::{ChunkCoord, RegionCoord};

/// Region coordinate = tile coordinate shifted right by this at zoom 0.
pub const TILE_TO_REGION_SHIFT: i32 = 1;
/// Chunk coordinate = tile coordinate shifted right by this at zoom 0.
pub const TILE_TO_CHUNK_SHIFT: i32 = -4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoomShift(pub i32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub tx: i32,
    pub tz: i32,
}

impl TileCoord {
    #[inline]
    pub const fn new(tx: i32, tz: i32) -> Self {
        Self { tx, tz }
    }
}

/// Right shift for non-negative `shift`, left shift by `-shift` otherwise.
#[inline]
pub fn shift_reversible(value: i32, shift: i32) -> i32 {
    if shift >= 0 {
        value
            .checked_shr(shift as u32)
            .unwrap_or(if value < 0 { -1 } else { 0 })
    } else {
        value.checked_shl(shift.unsigned_abs()).unwrap_or(0)
    }
}

/// Square block of coordinates covered by one tile: `origin .. origin + size` on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSpan {
    pub origin_x: i32,
    pub origin_z: i32,
    /// Never below 1.
    pub size: i32,
    /// True when the unclamped span was at least one unit.
    pub whole: bool,
}

impl TileSpan {
    fn compute(tile: TileCoord, shift: i32) -> Self {
        let raw = shift_reversible(1, shift);
        Self {
            origin_x: shift_reversible(tile.tx, shift),
            origin_z: shift_reversible(tile.tz, shift),
            size: raw.max(1),
            whole: raw >= 1,
        }
    }

    /// Regions overlapped by the tile.
    pub fn regions(tile: TileCoord, zoom: ZoomShift) -> Self {
        Self::compute(tile, TILE_TO_REGION_SHIFT - zoom.0)
    }

    /// Chunks overlapped by the tile.
    pub fn chunks(tile: TileCoord, zoom: ZoomShift) -> Self {
        Self::compute(tile, TILE_TO_CHUNK_SHIFT - zoom.0)
    }

    /// Row-major (x outer, z inner) walk over the covered cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.size).flat_map(move |dx| {
            (0..self.size).map(move |dz| (self.origin_x + dx, self.origin_z + dz))
        })
    }

    pub fn region_coords(&self) -> impl Iterator<Item = RegionCoord> + '_ {
        self.cells().map(RegionCoord::from)
    }

    pub fn chunk_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.cells().map(ChunkCoord::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_one_covers_exactly_one_region() {
        let span = TileSpan::regions(TileCoord::new(3, -2), ZoomShift(1));
        assert!(span.whole);
        assert_eq!(span.size, 1);
        assert_eq!((span.origin_x, span.origin_z), (3, -2));
    }

    #[test]
    fn zoom_zero_is_half_a_region() {
        let regions = TileSpan::regions(TileCoord::new(5, -3), ZoomShift(0));
        assert!(!regions.whole);
        assert_eq!(regions.size, 1);
        assert_eq!((regions.origin_x, regions.origin_z), (2, -2));

        let chunks = TileSpan::chunks(TileCoord::new(5, -3), ZoomShift(0));
        assert_eq!(chunks.size, 16);
        assert_eq!((chunks.origin_x, chunks.origin_z), (80, -48));
    }

    #[test]
    fn deep_zoom_resolves_to_a_single_chunk() {
        let chunks = TileSpan::chunks(TileCoord::new(81, 81), ZoomShift(-5));
        assert_eq!(chunks.size, 1);
        assert!(!chunks.whole);
        assert_eq!((chunks.origin_x, chunks.origin_z), (40, 40));
        assert_eq!(chunks.chunk_coords().count(), 1);
    }

    #[test]
    fn coarse_zoom_spans_many_regions() {
        let span = TileSpan::regions(TileCoord::new(1, 0), ZoomShift(3));
        assert_eq!(span.size, 4);
        assert_eq!((span.origin_x, span.origin_z), (4, 0));
        assert_eq!(span.region_coords().count(), 16);
    }
}
