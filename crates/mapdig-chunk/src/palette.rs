//! Palette-indexed cell storage for one section layer.

/// Cells in a 16x16x16 block layer.
pub const BLOCK_CELLS: usize = 4096;
/// Cells in a 4x4x4 biome layer.
pub const BIOME_CELLS: usize = 64;

#[inline]
pub fn block_index(x: usize, y: usize, z: usize) -> usize {
    (y * 16 + z) * 16 + x
}

#[inline]
pub fn biome_index(x: usize, y: usize, z: usize) -> usize {
    (y * 4 + z) * 4 + x
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Storage {
    Single { cells: usize },
    Indexed(Vec<u16>),
}

/// Value table plus per-cell indices into it.
///
/// Every stored index has a table entry; construction remaps anything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette<T> {
    entries: Vec<T>,
    storage: Storage,
}

impl<T: Copy + PartialEq> Palette<T> {
    /// Every cell holds `value`.
    pub fn uniform(value: T, cells: usize) -> Self {
        Self {
            entries: vec![value],
            storage: Storage::Single { cells },
        }
    }

    /// Builds a palette from a decoded table and index array.
    ///
    /// Indices past the table resolve to `default`, which is appended to the
    /// table if needed. Returns the palette and the number of remapped cells.
    pub fn from_indices(mut entries: Vec<T>, mut indices: Vec<u16>, default: T) -> (Self, usize) {
        if entries.is_empty() {
            entries.push(default);
        }
        let len = entries.len();
        let mut remapped = 0usize;
        if indices.iter().any(|&i| i as usize >= len) {
            let fallback = match entries.iter().position(|e| *e == default) {
                Some(pos) => pos,
                None => {
                    entries.push(default);
                    len
                }
            };
            for idx in indices.iter_mut() {
                if *idx as usize >= len {
                    *idx = fallback as u16;
                    remapped += 1;
                }
            }
        }
        if entries.len() == 1 {
            let cells = indices.len();
            return (Self::uniform(entries[0], cells), remapped);
        }
        (
            Self {
                entries,
                storage: Storage::Indexed(indices),
            },
            remapped,
        )
    }

    /// Overwrites one table entry in place. Returns false when `index` is not in the table.
    pub fn set_entry_at(&mut self, index: usize, value: T) -> bool {
        match self.entries.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Number of cells covered.
    #[inline]
    pub fn cells(&self) -> usize {
        match &self.storage {
            Storage::Single { cells } => *cells,
            Storage::Indexed(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_uniform(&self) -> bool {
        matches!(self.storage, Storage::Single { .. })
    }

    /// Table index of a cell.
    #[inline]
    pub fn index_at(&self, cell: usize) -> usize {
        match &self.storage {
            Storage::Single { .. } => 0,
            Storage::Indexed(v) => v.get(cell).copied().unwrap_or(0) as usize,
        }
    }

    #[inline]
    pub fn get(&self, cell: usize) -> T {
        self.entries[self.index_at(cell)]
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.cells()).map(move |c| self.get(c))
    }

    /// Counts cells per table entry.
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.entries.len()];
        match &self.storage {
            Storage::Single { cells } => counts[0] = *cells,
            Storage::Indexed(v) => {
                for &i in v {
                    counts[i as usize] += 1;
                }
            }
        }
        counts
    }
}
