use hashbrown::HashMap;
use mapdig_io::{ChunkStorage, RawChunkRecord};
use mapdig_world::ChunkCoord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub fetch_errors: u64,
    pub entries: usize,
}

#[derive(Debug)]
enum CachedRecord {
    Present(RawChunkRecord),
    Absent,
}

/// Records fetched during one renderer request.
///
/// A record fetched while probing is handed to the decoder by [`SessionCache::take`]
/// instead of being read again. Confirmed absences are remembered so a failing
/// fetch is not retried within the session.
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: HashMap<ChunkCoord, CachedRecord>,
    hits: u64,
    misses: u64,
    fetch_errors: u64,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the chunk has a record, fetching and caching it on first use.
    pub fn probe(&mut self, storage: &dyn ChunkStorage, coord: ChunkCoord) -> bool {
        if let Some(entry) = self.entries.get(&coord) {
            self.hits += 1;
            return matches!(entry, CachedRecord::Present(_));
        }
        self.misses += 1;
        let entry = match self.fetch(storage, coord) {
            Some(record) => CachedRecord::Present(record),
            None => CachedRecord::Absent,
        };
        let present = matches!(entry, CachedRecord::Present(_));
        self.entries.insert(coord, entry);
        present
    }

    /// Hands the record over to the caller; a cached record is removed.
    pub fn take(&mut self, storage: &dyn ChunkStorage, coord: ChunkCoord) -> Option<RawChunkRecord> {
        if matches!(self.entries.get(&coord), Some(CachedRecord::Absent)) {
            self.hits += 1;
            return None;
        }
        if let Some(CachedRecord::Present(record)) = self.entries.remove(&coord) {
            self.hits += 1;
            return Some(record);
        }
        self.misses += 1;
        let record = self.fetch(storage, coord);
        if record.is_none() {
            self.entries.insert(coord, CachedRecord::Absent);
        }
        record
    }

    fn fetch(&mut self, storage: &dyn ChunkStorage, coord: ChunkCoord) -> Option<RawChunkRecord> {
        match storage.read_chunk(coord) {
            Ok(Some(record)) => Some(record),
            Ok(None) => {
                log::trace!("Chunk [{}, {}] has no record", coord.cx, coord.cz);
                None
            }
            Err(e) => {
                self.fetch_errors += 1;
                log::warn!(
                    "Failed to read chunk [{}, {}], treating it as absent: {e}",
                    coord.cx,
                    coord.cz
                );
                None
            }
        }
    }

    pub fn clear(&mut self) {
        log::debug!("Session cache cleared ({} entries)", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> SessionCacheStats {
        SessionCacheStats {
            hits: self.hits,
            misses: self.misses,
            fetch_errors: self.fetch_errors,
            entries: self.entries.len(),
        }
    }
}
