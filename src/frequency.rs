//! Contains [`FrequencyTable`], the per-symbol occurrence counts
//! that drive tree construction.

use crate::common::MAX_SYMBOLS;

/// Occurrence counts of every byte value in some input.
///
/// Only symbols that actually occur are reported by [`FrequencyTable::iter`];
/// absent symbols are indistinguishable from never having been counted.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// Index is the symbol, value is the number of times it occurred
    counts: [u64; MAX_SYMBOLS],
}

impl FrequencyTable {
    /// Count every byte of `data` in a single pass.
    pub fn of(data: &[u8]) -> Self {
        let mut counts = [0u64; MAX_SYMBOLS];
        for byte in data {
            counts[*byte as usize] += 1;
        }
        FrequencyTable { counts }
    }

    /// How often `symbol` occurred, zero if it never did.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Iterate over `(symbol, count)` for every observed symbol, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, count)| (symbol as u8, *count))
    }

    /// Number of distinct symbols observed
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|count| **count > 0).count()
    }

    /// Sum of all counts, which is the length of the analyzed input.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.distinct() == 0
    }
}

impl core::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
