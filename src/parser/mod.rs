//! Parsers for prediction tables, alignments and pair lists.

pub mod domains;
pub mod fasta;
pub mod pairs;
pub mod sites;
pub mod util;

pub use domains::{parse_domains, DomainIndex};
pub use fasta::{parse_fasta, AlignedSequences};
pub use pairs::parse_pairs;
pub use sites::{parse_sites, SiteIndex};
pub use util::short_header;
