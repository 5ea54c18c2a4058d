//! Pair list parser for batch comparisons.

use ahash::AHashSet;
use std::io::BufRead;
use std::path::Path;

use crate::error::CompareError;
use crate::parser::util::open_input;
use crate::types::HeaderPair;

/// Parse a pairs file: two whitespace-separated headers per line.
///
/// Blank lines and `#` comments are skipped. Repeated pairs are kept once.
pub fn parse_pairs(path: &Path) -> Result<Vec<HeaderPair>, CompareError> {
    let reader = open_input(path)?;
    parse_pairs_reader(reader).map_err(|e| match e {
        CompareError::Io { source, .. } => CompareError::io(path, source),
        other => other,
    })
}

/// Each pair names its own report file, so a header may not contain a path
/// separator or be empty.
fn usable_as_file_name(header: &str) -> bool {
    !header.is_empty() && header != "." && header != ".." && !header.contains(['/', '\\'])
}

/// Parse pairs from a reader.
pub fn parse_pairs_reader<R: BufRead>(reader: R) -> Result<Vec<HeaderPair>, CompareError> {
    let mut pairs = Vec::new();
    let mut seen: AHashSet<(String, String)> = AHashSet::new();

    for (i, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| CompareError::io("<pairs>", e))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let pair = HeaderPair::new(&fields).map_err(|_| CompareError::InvalidPairsLine {
            line: i + 1,
            fields: fields.len(),
        })?;
        if let Some(bad) = pair.as_array().into_iter().find(|h| !usable_as_file_name(h)) {
            return Err(CompareError::InvalidReportHeader {
                line: i + 1,
                header: bad.to_string(),
            });
        }

        if !seen.insert((pair.first.clone(), pair.second.clone())) {
            log::debug!("Skipping repeated pair on line {}: {}", i + 1, pair);
            continue;
        }
        pairs.push(pair);
    }

    Ok(pairs)
}
