//! Site prediction table parser.
//!
//! Each row holds one residue-level prediction:
//! `full_header <TAB> position <TAB> residue <TAB> score`.

use ahash::{AHashMap, AHashSet};
use std::io::{self, BufRead};
use std::path::Path;

use crate::config::Config;
use crate::error::CompareError;
use crate::parser::util::{open_input, short_header};
use crate::types::{Residue, Site};

/// Sites per shortened sequence header, in file order.
pub type SiteIndex = AHashMap<String, Vec<Site>>;

/// Parse a site TSV file (plain or gzipped), keeping rows whose shortened
/// header is in `headers` and whose residue is allowed by `config`.
pub fn parse_sites(
    path: &Path,
    headers: &AHashSet<String>,
    config: &Config,
) -> Result<SiteIndex, CompareError> {
    let reader = open_input(path)?;
    parse_sites_reader(reader, headers, config).map_err(|e| CompareError::io(path, e))
}

/// Parse one site row. Returns `None` for short or malformed rows.
fn parse_line(line: &str) -> Option<(&str, Site)> {
    let mut fields = line.split('\t');
    let header = fields.next()?;
    let position: usize = fields.next()?.trim().parse().ok()?;
    let residue: Residue = fields.next()?.parse().ok()?;
    let score: f64 = fields.next()?.trim().parse().ok()?;

    Some((short_header(header), Site::new(position, residue, score)))
}

/// Parse site rows from a reader.
pub fn parse_sites_reader<R: BufRead>(
    reader: R,
    headers: &AHashSet<String>,
    config: &Config,
) -> io::Result<SiteIndex> {
    let mut index = SiteIndex::new();
    let mut skipped = 0usize;

    for line_result in reader.lines() {
        let line = line_result?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let Some((header, site)) = parse_line(line) else {
            skipped += 1;
            continue;
        };

        if !config.allows(site.residue) || !headers.contains(header) {
            continue;
        }
        index.entry(header.to_string()).or_default().push(site);
    }

    if skipped > 0 {
        log::debug!("Skipped {} malformed or non-S/T/Y site rows", skipped);
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

    #[test]
    fn test_parse_basic() {
        let content = "sp|P1|A\t5\ts\t0.3\nsp|P1|A\t6\tT\t0.9\nB\t7\tY\t0.5\n";
        let reader = BufReader::new(content.as_bytes());
        let index = parse_sites_reader(reader, &headers(&["A", "B"]), &Config::default()).unwrap();

        assert_eq!(
            index["A"],
            vec![
                Site::new(5, Residue::Ser, 0.3),
                Site::new(6, Residue::Thr, 0.9)
            ]
        );
        assert_eq!(index["B"], vec![Site::new(7, Residue::Tyr, 0.5)]);
    }

    #[test]
    fn test_header_row_and_malformed_rows_skipped() {
        let content = "Sequence\tPosition\tResidue\tScore\nA\tx\tS\t0.5\nA\t3\tS\tNaNx\nA\t4\tK\t0.9\nA\t9\tS\t0.5\n";
        let reader = BufReader::new(content.as_bytes());
        let index = parse_sites_reader(reader, &headers(&["A"]), &Config::default()).unwrap();
        assert_eq!(index["A"], vec![Site::new(9, Residue::Ser, 0.5)]);
    }

    #[test]
    fn test_residue_filter() {
        let content = "A\t1\tS\t0.5\nA\t2\tT\t0.5\nA\t3\tY\t0.5\n";
        let config = Config::for_predictions(Path::new("netphos_Y.tsv"));
        let reader = BufReader::new(content.as_bytes());
        let index = parse_sites_reader(reader, &headers(&["A"]), &config).unwrap();
        assert_eq!(index["A"], vec![Site::new(3, Residue::Tyr, 0.5)]);
    }

    #[test]
    fn test_gzipped_input() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sites.tsv.gz");
        let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"A\t1\tS\t0.5\n").unwrap();
        encoder.finish().unwrap();

        let index = parse_sites(&path, &headers(&["A"]), &Config::default()).unwrap();
        assert_eq!(index["A"].len(), 1);
    }
}
