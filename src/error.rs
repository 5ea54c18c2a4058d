//! Error types for protcmp.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("exactly two sequence headers are required, got {0}")]
    InvalidHeaderCount(usize),

    #[error("duplicate FASTA header: {0}")]
    DuplicateHeader(String),

    #[error("invalid FASTA/MSA file: {0}")]
    InvalidFasta(String),

    #[error("headers not found in the alignment: {}", .0.join(", "))]
    MissingAlignment(Vec<String>),

    #[error("no {kind} found for headers: {}", .headers.join(", "))]
    NoAnnotations {
        kind: &'static str,
        headers: Vec<String>,
    },

    #[error("no comparable data for {0}: no sites remain after cutoff and alignment mapping")]
    NoComparableData(String),

    #[error("invalid pairs file line {line}: expected two headers, found {fields}")]
    InvalidPairsLine { line: usize, fields: usize },

    #[error("invalid pairs file line {line}: header {header:?} cannot name a report file")]
    InvalidReportHeader { line: usize, header: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompareError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompareError::Io {
            path: path.into(),
            source,
        }
    }
}
