//! Fixed-width integers packed into 64-bit longs.
//!
//! Two layouts exist on disk. Padded storage keeps `64 / bits` values per long
//! and wastes the remainder; spanning storage (saves before 20w17a) lets values
//! straddle long boundaries. When `bits` divides 64 the layouts coincide.

#[inline]
pub fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

#[inline]
pub fn padded_len(count: usize, bits: u32) -> usize {
    let per_long = 64 / bits as usize;
    count.div_ceil(per_long)
}

#[inline]
pub fn spanning_len(count: usize, bits: u32) -> usize {
    (count * bits as usize).div_ceil(64)
}

#[inline]
fn mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

/// None when `data` does not have the padded length for `count` values.
pub fn unpack_padded(data: &[i64], bits: u32, count: usize) -> Option<Vec<u16>> {
    if bits == 0 || bits > 16 || data.len() != padded_len(count, bits) {
        return None;
    }
    let per_long = 64 / bits as usize;
    let m = mask(bits);
    let out = (0..count)
        .map(|i| {
            let word = data[i / per_long] as u64;
            ((word >> ((i % per_long) as u32 * bits)) & m) as u16
        })
        .collect();
    Some(out)
}

/// None when `data` does not have the spanning length for `count` values.
pub fn unpack_spanning(data: &[i64], bits: u32, count: usize) -> Option<Vec<u16>> {
    if bits == 0 || bits > 16 || data.len() != spanning_len(count, bits) {
        return None;
    }
    let m = mask(bits);
    let out = (0..count)
        .map(|i| {
            let bit = i * bits as usize;
            let word = bit / 64;
            let offset = (bit % 64) as u32;
            let mut v = (data[word] as u64) >> offset;
            if offset + bits > 64 {
                v |= (data[word + 1] as u64) << (64 - offset);
            }
            (v & m) as u16
        })
        .collect();
    Some(out)
}

/// Unpacks whichever layout matches the array length, preferring padded.
pub fn unpack_any(data: &[i64], bits: u32, count: usize) -> Option<Vec<u16>> {
    unpack_padded(data, bits, count).or_else(|| unpack_spanning(data, bits, count))
}

/// Packs values in the padded layout; used to build fixtures and benches.
pub fn pack_padded(values: &[u16], bits: u32) -> Vec<i64> {
    let per_long = 64 / bits as usize;
    let mut out = vec![0u64; padded_len(values.len(), bits)];
    for (i, &v) in values.iter().enumerate() {
        out[i / per_long] |= (u64::from(v) & mask(bits)) << ((i % per_long) as u32 * bits);
    }
    out.into_iter().map(|w| w as i64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pack_spanning(values: &[u16], bits: u32) -> Vec<i64> {
        let mut out = vec![0u64; spanning_len(values.len(), bits)];
        for (i, &v) in values.iter().enumerate() {
            let bit = i * bits as usize;
            let word = bit / 64;
            let offset = (bit % 64) as u32;
            out[word] |= u64::from(v) << offset;
            if offset + bits > 64 {
                out[word + 1] |= u64::from(v) >> (64 - offset);
            }
        }
        out.into_iter().map(|w| w as i64).collect()
    }

    #[test]
    fn ceil_log2_matches_palette_sizes() {
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(16), 4);
        assert_eq!(ceil_log2(17), 5);
        assert_eq!(ceil_log2(385), 9);
    }

    #[test]
    fn heightmap_lengths_differ_between_layouts() {
        assert_eq!(padded_len(256, 9), 37);
        assert_eq!(spanning_len(256, 9), 36);
        assert_eq!(padded_len(4096, 4), spanning_len(4096, 4));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(unpack_padded(&[0; 10], 4, 4096).is_none());
        assert!(unpack_any(&[0; 10], 5, 4096).is_none());
    }

    proptest! {
        #[test]
        fn padded_values_unpack(bits in 1u32..=12, seed in prop::collection::vec(any::<u16>(), 1..300)) {
            let values: Vec<u16> = seed.iter().map(|v| v & ((1u16 << bits) - 1)).collect();
            let packed = pack_padded(&values, bits);
            prop_assert_eq!(unpack_padded(&packed, bits, values.len()), Some(values));
        }

        #[test]
        fn spanning_values_unpack(bits in 1u32..=12, seed in prop::collection::vec(any::<u16>(), 1..300)) {
            let values: Vec<u16> = seed.iter().map(|v| v & ((1u16 << bits) - 1)).collect();
            let packed = pack_spanning(&values, bits);
            prop_assert_eq!(unpack_spanning(&packed, bits, values.len()), Some(values));
        }
    }
}
