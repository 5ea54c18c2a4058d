//! Matching logic for domain and site annotations.

pub mod domains;
pub mod sites;

pub use domains::match_domains;
pub use sites::{match_sites_msa, match_sites_raw};
