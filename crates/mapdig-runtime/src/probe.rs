//! Tiered terrain existence check for renderer tiles.
//!
//! Cheapest evidence first: the shared region set, then the region file, then
//! (below region granularity) the live engine and the chunk record itself.

use mapdig_io::ChunkStorage;
use mapdig_world::{RegionCoord, TileCoord, TileSpan, ZoomShift};

use crate::live::LiveWorld;
use crate::region_set::ValidatedRegionSet;
use crate::session::SessionCache;

/// Collaborators shared by every probe of one world.
#[derive(Clone, Copy)]
pub struct ProbeContext<'a> {
    pub storage: &'a dyn ChunkStorage,
    pub live: &'a dyn LiveWorld,
    pub regions: &'a ValidatedRegionSet,
}

impl ProbeContext<'_> {
    /// Set hit, or a successful file check that is then recorded.
    pub fn region_present(&self, region: RegionCoord) -> bool {
        if self.regions.contains(region) {
            return true;
        }
        match self.storage.region_exists(region) {
            Ok(true) => {
                if self.regions.insert(region) {
                    log::debug!("Validated region [{}, {}]", region.rx, region.rz);
                }
                true
            }
            Ok(false) => {
                log::trace!("Region [{}, {}] has no file", region.rx, region.rz);
                false
            }
            Err(e) => {
                log::warn!(
                    "Failed to check region [{}, {}], treating it as absent: {e}",
                    region.rx,
                    region.rz
                );
                false
            }
        }
    }
}

/// Whether any generated terrain exists under `tile` at `zoom`.
pub fn tile_has_terrain(
    ctx: ProbeContext<'_>,
    cache: &mut SessionCache,
    tile: TileCoord,
    zoom: ZoomShift,
) -> bool {
    let regions = TileSpan::regions(tile, zoom);
    if !regions.region_coords().any(|r| ctx.region_present(r)) {
        return false;
    }
    if regions.whole {
        return true;
    }

    let chunks = TileSpan::chunks(tile, zoom);
    for coord in chunks.chunk_coords() {
        if ctx.live.is_chunk_loaded(coord) {
            return true;
        }
        // A known region still says nothing about this chunk, but a missing one rules it out
        if !ctx.region_present(coord.region()) {
            continue;
        }
        if cache.probe(ctx.storage, coord) {
            return true;
        }
    }
    false
}
