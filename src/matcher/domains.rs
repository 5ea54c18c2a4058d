//! Domain/motif matching between two sequences.
//!
//! Domains are paired by exact label. Within a label, each domain of the
//! first sequence takes the not-yet-used domain of the second sequence whose
//! start is nearest to its own.

use indexmap::IndexMap;

use crate::types::{Comparison, Domain, DomainComparison, DomainMatch};

/// Index of the unconsumed bucket entry whose start is nearest to `start`.
///
/// Ties go to the entry seen first in bucket order.
fn nearest_start(
    bucket: &[usize],
    domains: &[Domain],
    consumed: &[bool],
    start: i64,
) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;

    for &idx in bucket {
        if consumed[idx] {
            continue;
        }
        let distance = (domains[idx].start - start).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((idx, distance)),
        }
    }

    best.map(|(idx, _)| idx)
}

/// Partition two domain lists into common pairs and per-sequence uniques.
///
/// Start proximity is the only pairing criterion: two same-label domains are
/// matched even when their intervals do not overlap.
///
/// Unique domains of the second sequence are reported grouped by label, in
/// order of each label's first appearance.
pub fn match_domains(first: &[Domain], second: &[Domain]) -> DomainComparison {
    // label -> indices into `second`, insertion ordered
    let mut buckets: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (idx, domain) in second.iter().enumerate() {
        buckets.entry(domain.label.as_str()).or_default().push(idx);
    }

    let mut consumed = vec![false; second.len()];
    let mut result: DomainComparison = Comparison::default();

    for domain in first {
        let nearest = buckets
            .get(domain.label.as_str())
            .and_then(|bucket| nearest_start(bucket, second, &consumed, domain.start));

        match nearest {
            Some(idx) => {
                consumed[idx] = true;
                let other = &second[idx];
                result.common.push(DomainMatch {
                    label: domain.label.clone(),
                    first: (domain.start, domain.end),
                    second: (other.start, other.end),
                    source_first: domain.predictor.clone(),
                    source_second: other.predictor.clone(),
                });
            }
            None => result.unique_first.push(domain.clone()),
        }
    }

    result.unique_second = buckets
        .values()
        .flatten()
        .filter(|&&idx| !consumed[idx])
        .map(|&idx| second[idx].clone())
        .collect();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(predictor: &str, label: &str, start: i64, end: i64) -> Domain {
        Domain::new(predictor.to_string(), label.to_string(), start, end)
    }

    #[test]
    fn test_basic_match() {
        let first = vec![domain("tool1", "Kinase", 10, 50)];
        let second = vec![
            domain("tool2", "Kinase", 12, 55),
            domain("tool2", "SH2", 100, 130),
        ];

        let result = match_domains(&first, &second);
        assert_eq!(result.common.len(), 1);
        assert_eq!(result.common[0].label, "Kinase");
        assert_eq!(result.common[0].first, (10, 50));
        assert_eq!(result.common[0].second, (12, 55));
        assert_eq!(result.common[0].source_first, "tool1");
        assert_eq!(result.common[0].source_second, "tool2");
        assert!(result.unique_first.is_empty());
        assert_eq!(result.unique_second, vec![domain("tool2", "SH2", 100, 130)]);
    }

    #[test]
    fn test_nearest_start_wins() {
        let first = vec![domain("a", "PH", 200, 260)];
        let second = vec![domain("b", "PH", 10, 70), domain("b", "PH", 190, 250)];

        let result = match_domains(&first, &second);
        assert_eq!(result.common[0].second, (190, 250));
        assert_eq!(result.unique_second, vec![domain("b", "PH", 10, 70)]);
    }

    #[test]
    fn test_tie_goes_to_first_in_bucket() {
        let first = vec![domain("a", "PH", 100, 150)];
        let second = vec![domain("b", "PH", 90, 140), domain("c", "PH", 110, 160)];

        let result = match_domains(&first, &second);
        assert_eq!(result.common[0].source_second, "b");
    }

    #[test]
    fn test_consumed_entries_are_not_reused() {
        let first = vec![domain("a", "WD40", 10, 50), domain("a", "WD40", 12, 52)];
        let second = vec![domain("b", "WD40", 11, 51)];

        let result = match_domains(&first, &second);
        assert_eq!(result.common.len(), 1);
        assert_eq!(result.common[0].first, (10, 50));
        assert_eq!(result.unique_first, vec![domain("a", "WD40", 12, 52)]);
        assert!(result.unique_second.is_empty());
    }

    #[test]
    fn test_non_overlapping_same_label_still_match() {
        let first = vec![domain("a", "Zinc finger", 10, 30)];
        let second = vec![domain("b", "Zinc finger", 900, 920)];

        let result = match_domains(&first, &second);
        assert_eq!(result.common.len(), 1);
        assert_eq!(result.common[0].delta_start(), 890);
    }

    #[test]
    fn test_identical_duplicates_are_consumed_individually() {
        let first = vec![domain("a", "SH3", 5, 60), domain("a", "SH3", 5, 60)];
        let second = vec![domain("b", "SH3", 5, 60), domain("b", "SH3", 5, 60)];

        let result = match_domains(&first, &second);
        assert_eq!(result.common.len(), 2);
        assert!(result.unique_first.is_empty());
        assert!(result.unique_second.is_empty());
    }

    #[test]
    fn test_unique_second_grouped_by_label() {
        let second = vec![
            domain("b", "A", 1, 2),
            domain("b", "B", 3, 4),
            domain("b", "A", 5, 6),
        ];
        let result = match_domains(&[], &second);
        let starts: Vec<i64> = result.unique_second.iter().map(|d| d.start).collect();
        assert_eq!(starts, vec![1, 5, 3]);
    }
}
