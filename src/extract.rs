//! Site filtering and coordinate conversion.
//!
//! Both steps run per sequence, before matching, and are lossy by design of
//! the input: low-scoring sites and sites outside the alignment are dropped
//! without raising.

use crate::alignment::CoordinateMap;
use crate::types::{MappedSite, Site};

/// Keep only sites with `score >= cutoff`, preserving order.
pub fn filter_by_cutoff(sites: &[Site], cutoff: f64) -> Vec<Site> {
    sites.iter().filter(|s| s.score >= cutoff).cloned().collect()
}

/// Express sites in alignment-column coordinates.
///
/// Sites whose raw position has no column in `map` (e.g. a trimmed region)
/// are skipped.
pub fn convert(sites: &[Site], map: &CoordinateMap) -> Vec<MappedSite> {
    sites
        .iter()
        .filter_map(|site| {
            map.get(site.position).map(|column| MappedSite {
                column,
                position: site.position,
                residue: site.residue,
                score: site.score,
            })
        })
        .collect()
}
