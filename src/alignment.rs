//! Raw-position to alignment-column mapping.
//!
//! An aligned sequence interleaves residues with gap characters. Walking it
//! left to right and counting only residues gives, for every raw (ungapped)
//! position, the alignment column it occupies.

/// Characters treated as alignment gaps.
pub const GAP_CHARS: [char; 2] = ['-', '.'];

/// Returns true if `c` is an alignment gap.
#[inline]
pub fn is_gap(c: char) -> bool {
    GAP_CHARS.contains(&c)
}

/// Mapping from 1-based raw positions to 1-based alignment columns.
///
/// Raw positions are contiguous (`1..=len()`), so the columns are stored
/// densely, indexed by `raw - 1`. Columns are strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateMap {
    columns: Vec<usize>,
}

impl CoordinateMap {
    /// Build the mapping for one aligned sequence.
    ///
    /// Never fails: an empty or all-gap input yields an empty map.
    pub fn build(aligned: &str) -> Self {
        let columns = aligned
            .chars()
            .enumerate()
            .filter(|(_, c)| !is_gap(*c))
            .map(|(idx, _)| idx + 1)
            .collect();

        CoordinateMap { columns }
    }

    /// Alignment column of a raw position, or `None` if the position is not
    /// represented in the alignment.
    pub fn get(&self, raw_position: usize) -> Option<usize> {
        raw_position
            .checked_sub(1)
            .and_then(|idx| self.columns.get(idx).copied())
    }

    /// Number of mapped raw positions (non-gap characters).
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate `(raw_position, column)` pairs in raw order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.columns.iter().enumerate().map(|(idx, &col)| (idx + 1, col))
    }
}

/// Build the raw-position to column mapping for an aligned sequence.
pub fn build_map(aligned: &str) -> CoordinateMap {
    CoordinateMap::build(aligned)
}
