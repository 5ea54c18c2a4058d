//! Per-label positional disagreement for matched domains.

use indexmap::IndexMap;

use crate::types::{DeltaSummary, DomainMatch};

/// Compute the maximum Δstart and Δend per domain label.
///
/// The worst case is kept rather than an average so that a single badly
/// placed call remains visible in the report. Labels appear in order of
/// their first match; labels without matches are absent.
pub fn summarize(common: &[DomainMatch]) -> IndexMap<String, DeltaSummary> {
    let mut summary: IndexMap<String, DeltaSummary> = IndexMap::new();

    for m in common {
        let entry = summary.entry(m.label.clone()).or_default();
        entry.delta_start = entry.delta_start.max(m.delta_start());
        entry.delta_end = entry.delta_end.max(m.delta_end());
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(label: &str, first: (i64, i64), second: (i64, i64)) -> DomainMatch {
        DomainMatch {
            label: label.to_string(),
            first,
            second,
            source_first: "a".to_string(),
            source_second: "b".to_string(),
        }
    }

    #[test]
    fn test_keeps_maximum_per_label() {
        let common = vec![
            matched("Kinase", (10, 50), (12, 55)),
            matched("Kinase", (100, 150), (90, 151)),
            matched("SH2", (200, 260), (200, 260)),
        ];

        let summary = summarize(&common);
        assert_eq!(summary.len(), 2);
        assert_eq!(
            summary["Kinase"],
            DeltaSummary {
                delta_start: 10,
                delta_end: 5
            }
        );
        assert_eq!(summary["SH2"], DeltaSummary::default());
    }

    #[test]
    fn test_first_match_order() {
        let common = vec![
            matched("Z", (1, 2), (1, 2)),
            matched("A", (1, 2), (1, 2)),
        ];
        let binding = summarize(&common);
        let labels: Vec<&String> = binding.keys().collect();
        assert_eq!(labels, vec!["Z", "A"]);
    }

    #[test]
    fn test_empty() {
        assert!(summarize(&[]).is_empty());
    }
}
