//! Output formatting for protcmp reports.
//!
//! Each report kind has a fixed column layout. Unique rows leave the cells
//! of the other sequence empty.

use anyhow::{Context, Result};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::compare::{DomainReport, MsaSiteReport, SiteReport};
use crate::types::{Domain, DomainMatch, MappedSite, Site, SiteMatch};

const DOMAIN_HEADER: [&str; 10] = [
    "Category",
    "Domain",
    "Protein1_Source",
    "Protein1_Start",
    "Protein1_End",
    "Protein2_Source",
    "Protein2_Start",
    "Protein2_End",
    "Delta_Start",
    "Delta_End",
];

fn unique_category(header: &str) -> String {
    format!("Unique_to_{}", header)
}

/// Format a `Common` row of the domain report.
pub fn format_domain_match(m: &DomainMatch) -> String {
    format!(
        "Common\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        m.label,
        m.source_first,
        m.first.0,
        m.first.1,
        m.source_second,
        m.second.0,
        m.second.1,
        m.delta_start(),
        m.delta_end()
    )
}

/// Format a unique-domain row, placing the domain on the given side.
pub fn format_unique_domain(category: &str, domain: &Domain, first_side: bool) -> String {
    let cells = format!("{}\t{}\t{}", domain.predictor, domain.start, domain.end);
    if first_side {
        format!("{}\t{}\t{}\t\t\t\t\t", category, domain.label, cells)
    } else {
        format!("{}\t{}\t\t\t\t{}\t\t", category, domain.label, cells)
    }
}

/// Write a full domain report.
pub fn write_domain_report<W: Write>(writer: &mut W, report: &DomainReport) -> Result<()> {
    let first = unique_category(&report.pair.first);
    let second = unique_category(&report.pair.second);

    writeln!(writer, "{}", DOMAIN_HEADER.join("\t"))?;
    for m in &report.comparison.common {
        writeln!(writer, "{}", format_domain_match(m))?;
    }
    for d in &report.comparison.unique_first {
        writeln!(writer, "{}", format_unique_domain(&first, d, true))?;
    }
    for d in &report.comparison.unique_second {
        writeln!(writer, "{}", format_unique_domain(&second, d, false))?;
    }
    for (label, delta) in &report.summary {
        writeln!(
            writer,
            "Summary\t{}\t\t\t\t\t\t\t{}\t{}",
            label, delta.delta_start, delta.delta_end
        )?;
    }

    Ok(())
}

/// Format a unique row of the raw-coordinate site report.
pub fn format_unique_site(category: &str, s: &Site, first_side: bool) -> String {
    if first_side {
        format!("{}\t{}\t{}\t{}\t", category, s.position, s.residue, s.score)
    } else {
        format!("{}\t{}\t{}\t\t{}", category, s.position, s.residue, s.score)
    }
}

/// Write a raw-coordinate site report.
pub fn write_site_report<W: Write>(writer: &mut W, report: &SiteReport) -> Result<()> {
    let pair = &report.pair;
    writeln!(
        writer,
        "Category\tPosition\tResidue\t{}_Score\t{}_Score",
        pair.first, pair.second
    )?;

    for m in &report.comparison.common {
        writeln!(
            writer,
            "Common\t{}\t{}\t{}\t{}",
            m.coordinate, m.residue, m.score_first, m.score_second
        )?;
    }
    let first = unique_category(&pair.first);
    for s in &report.comparison.unique_first {
        writeln!(writer, "{}", format_unique_site(&first, s, true))?;
    }
    let second = unique_category(&pair.second);
    for s in &report.comparison.unique_second {
        writeln!(writer, "{}", format_unique_site(&second, s, false))?;
    }

    Ok(())
}

/// Format a `Common` row of the alignment-coordinate site report.
pub fn format_msa_match(m: &SiteMatch) -> String {
    format!(
        "Common\t{}\t{}\t{}\t{}\t{}\t{}",
        m.coordinate, m.residue, m.position_first, m.score_first, m.position_second, m.score_second
    )
}

/// Format a unique row of the alignment-coordinate site report.
pub fn format_unique_mapped(category: &str, s: &MappedSite, first_side: bool) -> String {
    if first_side {
        format!(
            "{}\t{}\t{}\t{}\t{}\t\t",
            category, s.column, s.residue, s.position, s.score
        )
    } else {
        format!(
            "{}\t{}\t{}\t\t\t{}\t{}",
            category, s.column, s.residue, s.position, s.score
        )
    }
}

/// Write an alignment-coordinate site report.
pub fn write_msa_site_report<W: Write>(writer: &mut W, report: &MsaSiteReport) -> Result<()> {
    let pair = &report.pair;
    writeln!(
        writer,
        "Category\tMSA_col\tResidue\t{0}_RawPos\t{0}_Score\t{1}_RawPos\t{1}_Score",
        pair.first, pair.second
    )?;

    for m in &report.comparison.common {
        writeln!(writer, "{}", format_msa_match(m))?;
    }
    let first = unique_category(&pair.first);
    for s in &report.comparison.unique_first {
        writeln!(writer, "{}", format_unique_mapped(&first, s, true))?;
    }
    let second = unique_category(&pair.second);
    for s in &report.comparison.unique_second {
        writeln!(writer, "{}", format_unique_mapped(&second, s, false))?;
    }

    Ok(())
}

/// Create `path` and write a report into it through a buffered writer.
pub fn write_to_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()?;
    Ok(())
}
