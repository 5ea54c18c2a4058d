//! FASTA / MSA parser.
//!
//! Returns aligned sequences (gap characters included) keyed by shortened
//! header, in file order.

use indexmap::IndexMap;
use std::io::BufRead;
use std::path::Path;

use crate::error::CompareError;
use crate::parser::util::{open_input, short_header};

/// Aligned sequence per shortened header.
pub type AlignedSequences = IndexMap<String, String>;

/// Parse a FASTA or aligned FASTA file (plain or gzipped).
pub fn parse_fasta(path: &Path) -> Result<AlignedSequences, CompareError> {
    let reader = open_input(path)?;
    parse_fasta_reader(reader).map_err(|e| match e {
        CompareError::Io { source, .. } => CompareError::io(path, source),
        other => other,
    })
}

/// Parse FASTA records from a reader.
///
/// Duplicate shortened headers and sequence data before the first header are
/// rejected.
pub fn parse_fasta_reader<R: BufRead>(reader: R) -> Result<AlignedSequences, CompareError> {
    let mut records = AlignedSequences::new();
    let mut current: Option<String> = None;

    for line_result in reader.lines() {
        let line = line_result.map_err(|e| CompareError::io("<fasta>", e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            let header = short_header(header.trim()).to_string();
            if records.contains_key(&header) {
                return Err(CompareError::DuplicateHeader(header));
            }
            records.insert(header.clone(), String::new());
            current = Some(header);
        } else {
            let Some(header) = current.as_ref() else {
                return Err(CompareError::InvalidFasta(
                    "file does not start with a '>' header line".to_string(),
                ));
            };
            if let Some(seq) = records.get_mut(header) {
                seq.push_str(line);
            }
        }
    }

    Ok(records)
}
