//! Per-pair comparison pipelines.
//!
//! Each function takes already-parsed inputs, runs extraction, matching and
//! summarizing for one pair of sequences, and reports missing-data conditions
//! as errors rather than producing an empty report.

use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;

use crate::alignment::CoordinateMap;
use crate::config::Config;
use crate::error::CompareError;
use crate::extract::{convert, filter_by_cutoff};
use crate::matcher::{match_domains, match_sites_msa, match_sites_raw};
use crate::parser::{AlignedSequences, DomainIndex, SiteIndex};
use crate::summary::summarize;
use crate::types::{DeltaSummary, DomainComparison, HeaderPair, MsaSiteComparison, SiteComparison};

/// Result of comparing the domains of one pair.
#[derive(Debug, Clone)]
pub struct DomainReport {
    pub pair: HeaderPair,
    pub comparison: DomainComparison,
    pub summary: IndexMap<String, DeltaSummary>,
}

/// Result of comparing sites of one pair in raw coordinates.
#[derive(Debug, Clone)]
pub struct SiteReport {
    pub pair: HeaderPair,
    pub comparison: SiteComparison,
}

/// Result of comparing sites of one pair in alignment coordinates.
#[derive(Debug, Clone)]
pub struct MsaSiteReport {
    pub pair: HeaderPair,
    pub comparison: MsaSiteComparison,
    /// Sites that passed the cutoff but had no alignment column, per sequence.
    pub unmapped: (usize, usize),
}

/// Collect the distinct headers of a set of pairs, for parser filtering.
pub fn header_set(pairs: &[HeaderPair]) -> AHashSet<String> {
    pairs
        .iter()
        .flat_map(|p| [p.first.clone(), p.second.clone()])
        .collect()
}

fn annotations_for<'a, T>(index: &'a AHashMap<String, Vec<T>>, header: &str) -> &'a [T] {
    index.get(header).map(Vec::as_slice).unwrap_or(&[])
}

fn pair_headers(pair: &HeaderPair) -> Vec<String> {
    vec![pair.first.clone(), pair.second.clone()]
}

/// Compare the domains of two sequences.
pub fn compare_domains(index: &DomainIndex, pair: &HeaderPair) -> Result<DomainReport, CompareError> {
    let first = annotations_for(index, &pair.first);
    let second = annotations_for(index, &pair.second);

    if first.is_empty() && second.is_empty() {
        return Err(CompareError::NoAnnotations {
            kind: "domains",
            headers: pair_headers(pair),
        });
    }

    let comparison = match_domains(first, second);
    let summary = summarize(&comparison.common);

    Ok(DomainReport {
        pair: pair.clone(),
        comparison,
        summary,
    })
}

/// Compare site predictions of two sequences sharing a numbering.
pub fn compare_sites(
    index: &SiteIndex,
    pair: &HeaderPair,
    config: &Config,
) -> Result<SiteReport, CompareError> {
    let first = annotations_for(index, &pair.first);
    let second = annotations_for(index, &pair.second);

    if first.is_empty() && second.is_empty() {
        return Err(CompareError::NoAnnotations {
            kind: "sites",
            headers: pair_headers(pair),
        });
    }

    let first = filter_by_cutoff(first, config.cutoff);
    let second = filter_by_cutoff(second, config.cutoff);
    if first.is_empty() && second.is_empty() {
        return Err(CompareError::NoComparableData(pair.to_string()));
    }

    Ok(SiteReport {
        pair: pair.clone(),
        comparison: match_sites_raw(&first, &second),
    })
}

/// Compare site predictions of two sequences in alignment coordinates.
pub fn compare_msa_sites(
    index: &SiteIndex,
    msa: &AlignedSequences,
    pair: &HeaderPair,
    config: &Config,
) -> Result<MsaSiteReport, CompareError> {
    let missing: Vec<String> = pair
        .as_array()
        .iter()
        .filter(|h| !msa.contains_key(**h))
        .map(|h| h.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CompareError::MissingAlignment(missing));
    }

    let first = annotations_for(index, &pair.first);
    let second = annotations_for(index, &pair.second);
    if first.is_empty() && second.is_empty() {
        return Err(CompareError::NoAnnotations {
            kind: "sites",
            headers: pair_headers(pair),
        });
    }

    let first = filter_by_cutoff(first, config.cutoff);
    let second = filter_by_cutoff(second, config.cutoff);

    let map_first = CoordinateMap::build(&msa[pair.first.as_str()]);
    let map_second = CoordinateMap::build(&msa[pair.second.as_str()]);
    let mapped_first = convert(&first, &map_first);
    let mapped_second = convert(&second, &map_second);

    let unmapped = (
        first.len() - mapped_first.len(),
        second.len() - mapped_second.len(),
    );
    if unmapped != (0, 0) {
        log::debug!(
            "{}: {} and {} sites fall outside the alignment",
            pair,
            unmapped.0,
            unmapped.1
        );
    }

    if mapped_first.is_empty() && mapped_second.is_empty() {
        return Err(CompareError::NoComparableData(pair.to_string()));
    }

    Ok(MsaSiteReport {
        pair: pair.clone(),
        comparison: match_sites_msa(&mapped_first, &mapped_second),
        unmapped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Domain, Residue, Site};

    fn pair(a: &str, b: &str) -> HeaderPair {
        HeaderPair::new(&[a, b]).unwrap()
    }

    #[test]
    fn test_domains_missing_both() {
        let index = DomainIndex::new();
        let err = compare_domains(&index, &pair("A", "B")).unwrap_err();
        assert!(matches!(err, CompareError::NoAnnotations { kind: "domains", .. }));
    }

    #[test]
    fn test_domains_one_side_only() {
        let mut index = DomainIndex::new();
        index.insert(
            "A".to_string(),
            vec![Domain::new("Pfam".to_string(), "Kinase".to_string(), 1, 10)],
        );
        let report = compare_domains(&index, &pair("A", "B")).unwrap();
        assert_eq!(report.comparison.unique_first.len(), 1);
        assert!(report.summary.is_empty());
    }

    #[test]
    fn test_sites_nothing_survives_cutoff() {
        let mut index = SiteIndex::new();
        index.insert("A".to_string(), vec![Site::new(5, Residue::Ser, 0.3)]);
        let mut config = Config::default();
        config.set_cutoff(0.5).unwrap();

        let err = compare_sites(&index, &pair("A", "B"), &config).unwrap_err();
        assert!(matches!(err, CompareError::NoComparableData(_)));
    }

    #[test]
    fn test_msa_missing_header() {
        let index = SiteIndex::new();
        let mut msa = AlignedSequences::new();
        msa.insert("A".to_string(), "MKT".to_string());

        let err = compare_msa_sites(&index, &msa, &pair("A", "B"), &Config::default()).unwrap_err();
        assert!(matches!(err, CompareError::MissingAlignment(ref m) if m == &vec!["B".to_string()]));
    }

    #[test]
    fn test_msa_all_unmappable() {
        let mut index = SiteIndex::new();
        index.insert("A".to_string(), vec![Site::new(99, Residue::Ser, 1.0)]);
        let mut msa = AlignedSequences::new();
        msa.insert("A".to_string(), "MKS".to_string());
        msa.insert("B".to_string(), "MKS".to_string());

        let err = compare_msa_sites(&index, &msa, &pair("A", "B"), &Config::default()).unwrap_err();
        assert!(matches!(err, CompareError::NoComparableData(_)));
    }

    #[test]
    fn test_header_set() {
        let pairs = vec![pair("A", "B"), pair("B", "C")];
        let set = header_set(&pairs);
        assert_eq!(set.len(), 3);
        assert!(set.contains("C"));
    }
}
