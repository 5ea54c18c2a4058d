//! Utility functions for file parsing.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::CompareError;

/// Open an input file for buffered reading. Paths ending in `.gz` are
/// decompressed on the fly.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>, CompareError> {
    let file = File::open(path).map_err(|e| CompareError::io(path, e))?;
    let gzipped = path.extension().is_some_and(|ext| ext == "gz");
    Ok(if gzipped {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    })
}

/// Shorten a pipe-delimited header to its identifier: the part after the
/// final `|`, or the whole string when there is none.
///
/// This is the join key between prediction files and alignments.
pub fn short_header(full: &str) -> &str {
    full.rsplit('|').next().unwrap_or(full)
}
