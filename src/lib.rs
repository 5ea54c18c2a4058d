//! protcmp - Compare positional annotations between two protein sequences.
//!
//! This library reconciles two independently generated sets of annotations,
//! either domain/motif calls or residue-level modification sites, on a pair
//! of sequences whose lengths and numbering may differ.
//!
//! # Features
//!
//! - Parse domain and site prediction tables and aligned FASTA (with gzip support)
//! - Match domains by label, pairing the nearest start positions
//! - Match sites by position and residue, in raw or alignment coordinates
//! - Summarize worst-case start/end disagreement per domain label
//! - Build a shared-domain matrix across many pairwise reports
//!
//! # Example
//!
//! ```ignore
//! use protcmp::compare::{compare_domains, header_set};
//! use protcmp::output::write_domain_report;
//! use protcmp::parser::parse_domains;
//! use protcmp::types::HeaderPair;
//! use std::path::Path;
//!
//! let pair = HeaderPair::new(&["KIN_HUMAN", "KIN_MOUSE"])?;
//! let index = parse_domains(Path::new("interproscan.tsv"), &header_set(&[pair.clone()]))?;
//! let report = compare_domains(&index, &pair)?;
//! write_domain_report(&mut std::io::stdout(), &report)?;
//! ```

pub mod alignment;
pub mod compare;
pub mod config;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod matrix;
pub mod output;
pub mod parser;
pub mod summary;
pub mod types;

pub use alignment::{build_map, CoordinateMap};
pub use config::Config;
pub use error::CompareError;
pub use types::{
    Comparison, DeltaSummary, Domain, DomainMatch, HeaderPair, MappedSite, Residue, Site,
    SiteMatch,
};
