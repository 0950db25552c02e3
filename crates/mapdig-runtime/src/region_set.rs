use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use hashbrown::HashSet;
use mapdig_world::RegionCoord;

#[derive(Clone, Copy, Debug, Default)]
pub struct RegionSetStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Regions known to exist on disk, shared by every session.
///
/// Append-only: a region file never disappears while the process runs. The
/// lock covers a single check or insert and is never held across storage I/O,
/// so concurrent sessions may test the same region twice; inserting is idempotent.
#[derive(Debug, Default)]
pub struct ValidatedRegionSet {
    regions: Mutex<HashSet<RegionCoord>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ValidatedRegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned set still only holds confirmed regions
    fn locked(&self) -> MutexGuard<'_, HashSet<RegionCoord>> {
        self.regions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn contains(&self, region: RegionCoord) -> bool {
        let found = self.locked().contains(&region);
        let counter = if found { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Returns true if the region was not yet known.
    pub fn insert(&self, region: RegionCoord) -> bool {
        self.locked().insert(region)
    }

    pub fn len(&self) -> usize {
        self.locked().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> RegionSetStats {
        RegionSetStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let set = ValidatedRegionSet::new();
        assert!(set.insert(RegionCoord::new(2, 2)));
        assert!(!set.insert(RegionCoord::new(2, 2)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(RegionCoord::new(2, 2)));
        assert!(!set.contains(RegionCoord::new(2, 3)));
        let stats = set.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
    }
}
