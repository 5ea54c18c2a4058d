//! Core data structures for protcmp.
//!
//! This module contains the annotation and match record types shared by the
//! parsers, the matchers and the report writers.

use std::fmt;
use std::str::FromStr;

use crate::error::CompareError;
use crate::parser::util::short_header;

/// Residue alphabet accepted for modification sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Residue {
    Ser,
    Thr,
    Tyr,
}

/// Error type for parsing a residue from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResidueError;

impl fmt::Display for ParseResidueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid residue: expected 'S', 'T' or 'Y'")
    }
}

impl std::error::Error for ParseResidueError {}

impl FromStr for Residue {
    type Err = ParseResidueError;

    /// Parse a one-letter residue code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Residue::Ser),
            "T" => Ok(Residue::Thr),
            "Y" => Ok(Residue::Tyr),
            _ => Err(ParseResidueError),
        }
    }
}

impl Residue {
    /// All residues, in report order.
    pub const ALL: [Residue; 3] = [Residue::Ser, Residue::Thr, Residue::Tyr];

    /// Convert residue to its one-letter code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Residue::Ser => "S",
            Residue::Thr => "T",
            Residue::Tyr => "Y",
        }
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A labeled interval called on one sequence by one predictor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub predictor: String,
    pub label: String,
    pub start: i64,
    pub end: i64,
}

impl Domain {
    /// Create a new domain. Reversed coordinates are swapped so that
    /// `start <= end` always holds.
    pub fn new(predictor: String, label: String, start: i64, end: i64) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Domain {
            predictor,
            label,
            start,
            end,
        }
    }
}

/// A single-residue prediction in raw sequence coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// 1-based position in the ungapped sequence.
    pub position: usize,
    pub residue: Residue,
    pub score: f64,
}

impl Site {
    pub fn new(position: usize, residue: Residue, score: f64) -> Self {
        Site {
            position,
            residue,
            score,
        }
    }
}

/// A site expressed in alignment-column coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedSite {
    /// 1-based alignment column.
    pub column: usize,
    /// Original raw position, kept for reporting.
    pub position: usize,
    pub residue: Residue,
    pub score: f64,
}

/// Two same-label domains, one from each sequence, paired by the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMatch {
    pub label: String,
    /// `(start, end)` on the first sequence.
    pub first: (i64, i64),
    /// `(start, end)` on the second sequence.
    pub second: (i64, i64),
    pub source_first: String,
    pub source_second: String,
}

impl DomainMatch {
    /// Absolute difference between the two start positions.
    pub fn delta_start(&self) -> i64 {
        (self.first.0 - self.second.0).abs()
    }

    /// Absolute difference between the two end positions.
    pub fn delta_end(&self) -> i64 {
        (self.first.1 - self.second.1).abs()
    }
}

/// Two sites judged to be the same call on both sequences.
///
/// `coordinate` is the shared raw position in raw mode and the shared
/// alignment column in alignment mode.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteMatch {
    pub coordinate: usize,
    pub position_first: usize,
    pub position_second: usize,
    pub residue: Residue,
    pub score_first: f64,
    pub score_second: f64,
}

/// The three disjoint collections produced by a matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison<M, U> {
    pub common: Vec<M>,
    pub unique_first: Vec<U>,
    pub unique_second: Vec<U>,
}

impl<M, U> Comparison<M, U> {
    /// Number of input annotations accounted for by this comparison.
    ///
    /// Every match consumes one annotation from each side, so this equals
    /// the combined length of both input lists.
    pub fn accounted(&self) -> usize {
        self.common.len() * 2 + self.unique_first.len() + self.unique_second.len()
    }

    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.unique_first.is_empty() && self.unique_second.is_empty()
    }
}

impl<M, U> Default for Comparison<M, U> {
    fn default() -> Self {
        Comparison {
            common: Vec::new(),
            unique_first: Vec::new(),
            unique_second: Vec::new(),
        }
    }
}

pub type DomainComparison = Comparison<DomainMatch, Domain>;
pub type SiteComparison = Comparison<SiteMatch, Site>;
pub type MsaSiteComparison = Comparison<SiteMatch, MappedSite>;

/// Worst-case positional disagreement for one domain label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeltaSummary {
    pub delta_start: i64,
    pub delta_end: i64,
}

/// The two sequence identifiers of one comparison, already shortened.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderPair {
    pub first: String,
    pub second: String,
}

impl HeaderPair {
    /// Build a pair from user-supplied headers; exactly two are required.
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Result<Self, CompareError> {
        match headers {
            [first, second] => Ok(HeaderPair {
                first: short_header(first.as_ref()).to_string(),
                second: short_header(second.as_ref()).to_string(),
            }),
            _ => Err(CompareError::InvalidHeaderCount(headers.len())),
        }
    }

    /// File name used for this pair's report in batch mode.
    pub fn report_name(&self) -> String {
        format!("{}__vs__{}.tsv", self.first, self.second)
    }

    pub fn as_array(&self) -> [&str; 2] {
        [self.first.as_str(), self.second.as_str()]
    }
}

impl fmt::Display for HeaderPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residue_parsing() {
        assert_eq!("S".parse::<Residue>(), Ok(Residue::Ser));
        assert_eq!("t".parse::<Residue>(), Ok(Residue::Thr));
        assert_eq!("Y".parse::<Residue>(), Ok(Residue::Tyr));
        assert!("K".parse::<Residue>().is_err());
        assert!("".parse::<Residue>().is_err());
        assert!("ST".parse::<Residue>().is_err());
    }

    #[test]
    fn test_domain_swaps_reversed_coordinates() {
        let domain = Domain::new("Pfam".to_string(), "Kinase".to_string(), 50, 10);
        assert_eq!(domain.start, 10);
        assert_eq!(domain.end, 50);
    }

    #[test]
    fn test_domain_match_deltas() {
        let m = DomainMatch {
            label: "Kinase".to_string(),
            first: (10, 50),
            second: (12, 55),
            source_first: "tool1".to_string(),
            source_second: "tool2".to_string(),
        };
        assert_eq!(m.delta_start(), 2);
        assert_eq!(m.delta_end(), 5);
    }

    #[test]
    fn test_header_pair_requires_two() {
        assert!(HeaderPair::new(&["A"]).is_err());
        assert!(HeaderPair::new(&["A", "B", "C"]).is_err());
        let pair = HeaderPair::new(&["sp|P1|KIN_HUMAN", "KIN_MOUSE"]).unwrap();
        assert_eq!(pair.first, "KIN_HUMAN");
        assert_eq!(pair.second, "KIN_MOUSE");
        assert_eq!(pair.report_name(), "KIN_HUMAN__vs__KIN_MOUSE.tsv");
    }

    #[test]
    fn test_comparison_accounted() {
        let mut cmp: Comparison<u8, u8> = Comparison::default();
        assert!(cmp.is_empty());
        cmp.common.push(1);
        cmp.unique_second.push(2);
        assert_eq!(cmp.accounted(), 3);
    }
}
