//! Domain overlap matrix across many pairwise domain reports.
//!
//! Batch runs leave one `<p1>__vs__<p2>.tsv` report per pair. Loading a set
//! of such directories gives, for every protein, the labels it carries; the
//! matrix cell for two proteins is the number of labels they share.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::output::write_to_file;

/// Labels carried by each protein.
pub type FeatureSets = BTreeMap<String, BTreeSet<String>>;

/// Split a report file name into its two protein identifiers.
pub fn split_report_name(file_name: &str) -> Option<(&str, &str)> {
    let stem = file_name.strip_suffix(".tsv")?;
    let (first, second) = stem.split_once("__vs__")?;
    if first.is_empty() || second.is_empty() || second.contains("__vs__") {
        return None;
    }
    Some((first, second))
}

/// Add the labels of one domain report to `sets`.
///
/// `Common` rows count for both proteins, `Unique_to_<p>` rows for `p`.
/// Header and `Summary` rows are ignored.
pub fn add_report(sets: &mut FeatureSets, first: &str, second: &str, content: &str) {
    for line in content.lines() {
        let mut fields = line.split('\t');
        let (Some(category), Some(label)) = (fields.next(), fields.next()) else {
            continue;
        };
        if label.is_empty() {
            continue;
        }

        let (in_first, in_second) = match category {
            "Common" => (true, true),
            c => match c.strip_prefix("Unique_to_") {
                Some(owner) => (owner == first, owner == second),
                None => (false, false),
            },
        };
        if in_first {
            sets.entry(first.to_string()).or_default().insert(label.to_string());
        }
        if in_second {
            sets.entry(second.to_string()).or_default().insert(label.to_string());
        }
    }
}

/// Load feature sets from every report in `dirs`, in file-name order.
pub fn load_feature_sets<P: AsRef<Path>>(dirs: &[P]) -> Result<FeatureSets> {
    let mut sets = FeatureSets::new();

    for dir in dirs {
        let dir = dir.as_ref();
        let mut names: Vec<String> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        for name in &names {
            let Some((first, second)) = split_report_name(name) else {
                continue;
            };
            let path = dir.join(name);
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read report: {}", path.display()))?;
            add_report(&mut sets, first, second, &content);
        }
        log::debug!("Loaded {} reports from {}", names.len(), dir.display());
    }

    Ok(sets)
}

/// Write the square shared-label matrix, proteins in sorted order.
pub fn write_overlap_matrix<W: Write>(writer: &mut W, sets: &FeatureSets, header_label: &str) -> Result<()> {
    let proteins: Vec<&String> = sets.keys().collect();

    write!(writer, "{}", header_label)?;
    for p in &proteins {
        write!(writer, "\t{}", p)?;
    }
    writeln!(writer)?;

    for (p1, labels1) in sets {
        write!(writer, "{}", p1)?;
        for labels2 in sets.values() {
            write!(writer, "\t{}", labels1.intersection(labels2).count())?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Summarize the reports in `dirs` into a matrix file at `output`.
///
/// Nothing is written when no reports are found.
pub fn summarize_overlap<P: AsRef<Path>>(dirs: &[P], output: &Path) -> Result<usize> {
    let sets = load_feature_sets(dirs)?;
    if sets.is_empty() {
        return Ok(0);
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    write_to_file(output, |w| write_overlap_matrix(w, &sets, "Domains"))?;
    Ok(sets.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "Category\tDomain\tProtein1_Source\n\
Common\tKinase\tPfam\n\
Unique_to_A\tPH\tPfam\n\
Unique_to_B\tSH2\t\n\
Summary\tKinase\t\n";

    #[test]
    fn test_split_report_name() {
        assert_eq!(split_report_name("A__vs__B.tsv"), Some(("A", "B")));
        assert_eq!(split_report_name("A__vs__B.txt"), None);
        assert_eq!(split_report_name("A_B.tsv"), None);
        assert_eq!(split_report_name("__vs__B.tsv"), None);
    }

    #[test]
    fn test_add_report_attributes_by_category() {
        let mut sets = FeatureSets::new();
        add_report(&mut sets, "A", "B", REPORT);

        let a: Vec<&String> = sets["A"].iter().collect();
        let b: Vec<&String> = sets["B"].iter().collect();
        assert_eq!(a, vec!["Kinase", "PH"]);
        assert_eq!(b, vec!["Kinase", "SH2"]);
    }

    #[test]
    fn test_matrix() {
        let mut sets = FeatureSets::new();
        add_report(&mut sets, "A", "B", REPORT);

        let mut output = Vec::new();
        write_overlap_matrix(&mut output, &sets, "Domains").unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "Domains\tA\tB\nA\t2\t1\nB\t1\t2\n");
    }

    #[test]
    fn test_summarize_overlap_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A__vs__B.tsv"), REPORT).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let out = dir.path().join("summary").join("matrix.tsv");
        let n = summarize_overlap(&[dir.path()], &out).unwrap();
        assert_eq!(n, 2);
        assert!(out.exists());
    }

    #[test]
    fn test_summarize_overlap_empty_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("matrix.tsv");
        let n = summarize_overlap(&[dir.path()], &out).unwrap();
        assert_eq!(n, 0);
        assert!(!out.exists());
    }
}
