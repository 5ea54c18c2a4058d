//! Configuration and defaults for protcmp.
//!
//! This module contains the configuration structure and default values
//! that control which site predictions take part in a comparison.

use std::path::Path;

use crate::error::CompareError;
use crate::types::Residue;

/// Default minimum score for a site to be kept.
pub const DEFAULT_CUTOFF: f64 = 0.0;

/// Configuration for site comparisons.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum inclusive score threshold.
    pub cutoff: f64,
    /// Residues allowed through the site parser.
    pub residues: Vec<Residue>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cutoff: DEFAULT_CUTOFF,
            residues: Residue::ALL.to_vec(),
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config whose residue set is inferred from the prediction
    /// file name.
    ///
    /// Predictors write tyrosine-only results to `*_Y*` files and
    /// serine/threonine results to `*_SorT*` files.
    pub fn for_predictions(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let residues = if file_name.contains("_Y") {
            vec![Residue::Tyr]
        } else if file_name.contains("_SorT") {
            vec![Residue::Ser, Residue::Thr]
        } else {
            Residue::ALL.to_vec()
        };

        Config {
            residues,
            ..Self::default()
        }
    }

    /// Parse and validate a residue set from a comma-separated string.
    ///
    /// Returns true if at least one residue was given and all were valid.
    pub fn parse_residues(&mut self, residues_str: &str) -> bool {
        let mut new_residues = Vec::new();

        for tag in residues_str.split(',') {
            match tag.parse::<Residue>() {
                Ok(residue) => {
                    if !new_residues.contains(&residue) {
                        new_residues.push(residue);
                    }
                }
                Err(_) => return false,
            }
        }

        if new_residues.is_empty() {
            return false;
        }
        new_residues.sort();
        self.residues = new_residues;
        true
    }

    /// Set the score cutoff. Non-finite values are rejected.
    pub fn set_cutoff(&mut self, cutoff: f64) -> Result<(), CompareError> {
        if !cutoff.is_finite() {
            return Err(CompareError::InvalidConfig(format!(
                "score cutoff must be a finite number, got {}",
                cutoff
            )));
        }
        self.cutoff = cutoff;
        Ok(())
    }

    /// Whether a residue passes the configured residue set.
    pub fn allows(&self, residue: Residue) -> bool {
        self.residues.contains(&residue)
    }
}
