//! Site matching in raw and alignment coordinates.
//!
//! Both modes pair sites by an exact key: `(position, residue)` in raw mode,
//! `(column, residue)` in alignment mode. Each site of the second sequence is
//! used at most once; when a key repeats, its first occurrence is used first.

use std::collections::VecDeque;
use std::hash::Hash;

use ahash::AHashMap;

use crate::types::{
    Comparison, MappedSite, MsaSiteComparison, Site, SiteComparison, SiteMatch,
};

/// Index pairs produced by exact-key pairing.
struct Pairing {
    pairs: Vec<(usize, usize)>,
    unmatched_first: Vec<usize>,
    unmatched_second: Vec<usize>,
}

/// Pair entries of `first` with entries of `second` sharing the same key.
fn pair_by_key<T, K, F>(first: &[T], second: &[T], key: F) -> Pairing
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut index: AHashMap<K, VecDeque<usize>> = AHashMap::with_capacity(second.len());
    for (idx, item) in second.iter().enumerate() {
        index.entry(key(item)).or_default().push_back(idx);
    }

    let mut consumed = vec![false; second.len()];
    let mut pairs = Vec::new();
    let mut unmatched_first = Vec::new();

    for (idx, item) in first.iter().enumerate() {
        match index.get_mut(&key(item)).and_then(|queue| queue.pop_front()) {
            Some(other) => {
                consumed[other] = true;
                pairs.push((idx, other));
            }
            None => unmatched_first.push(idx),
        }
    }

    let unmatched_second = (0..second.len()).filter(|&idx| !consumed[idx]).collect();

    Pairing {
        pairs,
        unmatched_first,
        unmatched_second,
    }
}

/// Match sites whose raw positions and residues are equal.
///
/// Assumes both sequences share a numbering. Output collections are sorted
/// by position.
pub fn match_sites_raw(first: &[Site], second: &[Site]) -> SiteComparison {
    let pairing = pair_by_key(first, second, |s| (s.position, s.residue));

    let mut result: SiteComparison = Comparison {
        common: pairing
            .pairs
            .iter()
            .map(|&(a, b)| SiteMatch {
                coordinate: first[a].position,
                position_first: first[a].position,
                position_second: second[b].position,
                residue: first[a].residue,
                score_first: first[a].score,
                score_second: second[b].score,
            })
            .collect(),
        unique_first: pairing.unmatched_first.iter().map(|&i| first[i].clone()).collect(),
        unique_second: pairing.unmatched_second.iter().map(|&i| second[i].clone()).collect(),
    };

    result.common.sort_by_key(|m| m.coordinate);
    result.unique_first.sort_by_key(|s| s.position);
    result.unique_second.sort_by_key(|s| s.position);
    result
}

/// Match sites sharing an alignment column and residue.
///
/// Raw positions may differ between the two sequences. Output collections are
/// sorted by alignment column.
pub fn match_sites_msa(first: &[MappedSite], second: &[MappedSite]) -> MsaSiteComparison {
    let pairing = pair_by_key(first, second, |s| (s.column, s.residue));

    let mut result: MsaSiteComparison = Comparison {
        common: pairing
            .pairs
            .iter()
            .map(|&(a, b)| SiteMatch {
                coordinate: first[a].column,
                position_first: first[a].position,
                position_second: second[b].position,
                residue: first[a].residue,
                score_first: first[a].score,
                score_second: second[b].score,
            })
            .collect(),
        unique_first: pairing.unmatched_first.iter().map(|&i| first[i].clone()).collect(),
        unique_second: pairing.unmatched_second.iter().map(|&i| second[i].clone()).collect(),
    };

    result.common.sort_by_key(|m| m.coordinate);
    result.unique_first.sort_by_key(|s| s.column);
    result.unique_second.sort_by_key(|s| s.column);
    result
}
