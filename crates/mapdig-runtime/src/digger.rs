use std::sync::Arc;

use mapdig_chunk::SnapshotChunkView;
use mapdig_io::{ChunkDecoder, ChunkStorage};
use mapdig_world::{ChunkCoord, TileCoord, ZoomShift};

use crate::chunk::WorldChunk;
use crate::live::LiveWorld;
use crate::probe::{ProbeContext, tile_has_terrain};
use crate::region_set::ValidatedRegionSet;
use crate::session::SessionCache;

/// Query surface for the tile renderer over one world.
///
/// Cheap to clone; clones share the storage, decoder and the validated
/// region set. Per-request state lives in a [`SessionCache`] owned by the caller.
#[derive(Clone)]
pub struct BlockDigger {
    storage: Arc<dyn ChunkStorage>,
    live: Arc<dyn LiveWorld>,
    decoder: ChunkDecoder,
    regions: Arc<ValidatedRegionSet>,
}

impl BlockDigger {
    pub fn new(
        storage: Arc<dyn ChunkStorage>,
        live: Arc<dyn LiveWorld>,
        decoder: ChunkDecoder,
    ) -> Self {
        Self {
            storage,
            live,
            decoder,
            regions: Arc::new(ValidatedRegionSet::new()),
        }
    }

    #[inline]
    pub fn regions(&self) -> &ValidatedRegionSet {
        &self.regions
    }

    #[inline]
    pub fn decoder(&self) -> &ChunkDecoder {
        &self.decoder
    }

    fn probe_context(&self) -> ProbeContext<'_> {
        ProbeContext {
            storage: self.storage.as_ref(),
            live: self.live.as_ref(),
            regions: &self.regions,
        }
    }

    pub fn probe_exists(&self, cache: &mut SessionCache, tile: TileCoord, zoom: ZoomShift) -> bool {
        tile_has_terrain(self.probe_context(), cache, tile, zoom)
    }

    /// Loaded chunk if the engine holds it, else a snapshot decoded from disk.
    pub fn get_view(&self, cache: &mut SessionCache, coord: ChunkCoord) -> Option<WorldChunk> {
        if let Some(view) = self.live.loaded_view(coord) {
            return Some(WorldChunk::Live(view));
        }
        let raw = cache.take(self.storage.as_ref(), coord)?;
        match self.decoder.decode(coord, &raw) {
            Ok(snapshot) => Some(WorldChunk::Snapshot(SnapshotChunkView::new(snapshot))),
            Err(e) if e.is_absence() => {
                log::trace!("Chunk [{}, {}] skipped: {e}", coord.cx, coord.cz);
                None
            }
            Err(e) => {
                log::warn!("Failed to decode chunk [{}, {}]: {e}", coord.cx, coord.cz);
                None
            }
        }
    }

    /// Opens a request-scoped session with its own cache.
    pub fn session(&self) -> Session<'_> {
        Session {
            digger: self,
            cache: SessionCache::new(),
        }
    }
}

/// A [`BlockDigger`] paired with one request's cache; dropping it discards the cache.
pub struct Session<'a> {
    digger: &'a BlockDigger,
    cache: SessionCache,
}

impl Session<'_> {
    pub fn probe_exists(&mut self, tile: TileCoord, zoom: ZoomShift) -> bool {
        self.digger.probe_exists(&mut self.cache, tile, zoom)
    }

    pub fn get_view(&mut self, coord: ChunkCoord) -> Option<WorldChunk> {
        self.digger.get_view(&mut self.cache, coord)
    }

    #[inline]
    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }
}
