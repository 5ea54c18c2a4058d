//! Domain prediction table parser.
//!
//! Reads InterProScan-style TSV output: one predicted domain or motif per
//! row, keyed by the full sequence header in the first column.

use ahash::{AHashMap, AHashSet};
use std::io::{self, BufRead};
use std::path::Path;

use crate::error::CompareError;
use crate::parser::util::{open_input, short_header};
use crate::types::Domain;

/// Domains per shortened sequence header, in file order.
pub type DomainIndex = AHashMap<String, Vec<Domain>>;

const HEADER_COL: usize = 0;
const PREDICTOR_COL: usize = 3;
const LABEL_COL: usize = 5;
const START_COL: usize = 6;
const END_COL: usize = 7;
const MIN_FIELDS: usize = 8;

/// Parse a domain TSV file (plain or gzipped), keeping only rows whose
/// shortened header is in `headers`.
pub fn parse_domains(path: &Path, headers: &AHashSet<String>) -> Result<DomainIndex, CompareError> {
    let reader = open_input(path)?;
    parse_domains_reader(reader, headers).map_err(|e| CompareError::io(path, e))
}

/// Parse domain rows from a reader.
///
/// Short rows and rows with non-integer coordinates are skipped.
pub fn parse_domains_reader<R: BufRead>(
    reader: R,
    headers: &AHashSet<String>,
) -> io::Result<DomainIndex> {
    let mut index = DomainIndex::new();
    let mut malformed = 0usize;

    for line_result in reader.lines() {
        let line = line_result?;
        let fields: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
        if fields.len() < MIN_FIELDS {
            continue;
        }

        let header = short_header(fields[HEADER_COL]);
        if !headers.contains(header) {
            continue;
        }

        let (start, end) = match (
            fields[START_COL].trim().parse::<i64>(),
            fields[END_COL].trim().parse::<i64>(),
        ) {
            (Ok(start), Ok(end)) => (start, end),
            _ => {
                malformed += 1;
                continue;
            }
        };

        let domain = Domain::new(
            fields[PREDICTOR_COL].to_string(),
            fields[LABEL_COL].to_string(),
            start,
            end,
        );
        index.entry(header.to_string()).or_default().push(domain);
    }

    if malformed > 0 {
        log::debug!("Skipped {} domain rows with non-integer coordinates", malformed);
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn headers(names: &[&str]) -> AHashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(header: &str, predictor: &str, label: &str, start: &str, end: &str) -> String {
        format!("{header}\tmd5\t500\t{predictor}\tPF00069\t{label}\t{start}\t{end}\t1e-30\n")
    }

    #[test]
    fn test_parse_basic() {
        let content = row("sp|P1|KIN_HUMAN", "Pfam", "Kinase", "10", "50")
            + &row("sp|P2|KIN_MOUSE", "SMART", "Kinase", "12", "55");

        let reader = BufReader::new(content.as_bytes());
        let index = parse_domains_reader(reader, &headers(&["KIN_HUMAN", "KIN_MOUSE"])).unwrap();

        assert_eq!(index["KIN_HUMAN"].len(), 1);
        let d = &index["KIN_HUMAN"][0];
        assert_eq!(d.predictor, "Pfam");
        assert_eq!(d.label, "Kinase");
        assert_eq!((d.start, d.end), (10, 50));
        assert_eq!(index["KIN_MOUSE"][0].predictor, "SMART");
    }

    #[test]
    fn test_skips_unrequested_short_and_malformed_rows() {
        let content = row("KIN_HUMAN", "Pfam", "Kinase", "10", "50")
            + &row("OTHER", "Pfam", "Kinase", "10", "50")
            + &row("KIN_HUMAN", "Pfam", "SH2", "start", "50")
            + "KIN_HUMAN\ttoo\tshort\n";

        let reader = BufReader::new(content.as_bytes());
        let index = parse_domains_reader(reader, &headers(&["KIN_HUMAN"])).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index["KIN_HUMAN"].len(), 1);
    }

    #[test]
    fn test_reversed_coordinates_swapped() {
        let content = row("KIN_HUMAN", "Pfam", "Kinase", "50", "10");
        let reader = BufReader::new(content.as_bytes());
        let index = parse_domains_reader(reader, &headers(&["KIN_HUMAN"])).unwrap();
        assert_eq!(index["KIN_HUMAN"][0].start, 10);
        assert_eq!(index["KIN_HUMAN"][0].end, 50);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_domains(Path::new("/nonexistent/domains.tsv"), &headers(&["A"]));
        assert!(matches!(err, Err(CompareError::Io { .. })));
    }
}
