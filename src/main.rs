//! CLI entry point for protcmp.
//!
//! Each comparison subcommand either compares two headers into one report,
//! or, with `--pairs`, compares every listed pair in parallel into one report
//! per pair.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use protcmp::compare::{compare_domains, compare_msa_sites, compare_sites, header_set};
use protcmp::config::Config;
use protcmp::matrix::summarize_overlap;
use protcmp::output::{
    write_domain_report, write_msa_site_report, write_site_report, write_to_file,
};
use protcmp::parser::{parse_domains, parse_fasta, parse_pairs, parse_sites};
use protcmp::types::HeaderPair;

/// Compare domain and modification-site predictions between protein sequences.
#[derive(Parser, Debug)]
#[command(name = "protcmp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbosity: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare domain/motif predictions between two sequences
    Domains(DomainArgs),
    /// Compare site predictions by raw sequence position
    Sites(SiteArgs),
    /// Compare site predictions in MSA column coordinates
    MsaSites(MsaSiteArgs),
    /// Count shared domains across pairwise domain reports
    Overlap(OverlapArgs),
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// File of header pairs to compare, one whitespace-separated pair per line
    #[arg(long = "pairs", requires = "output_dir")]
    pairs: Option<PathBuf>,

    /// Output directory for per-pair reports (batch mode)
    #[arg(long = "output-dir", requires = "pairs")]
    output_dir: Option<PathBuf>,

    /// Number of worker threads in batch mode (0 = auto-detect)
    #[arg(long = "threads", short = 'j', default_value = "0")]
    threads: usize,
}

#[derive(Args, Debug)]
struct SiteFilterArgs {
    /// Minimum prediction score to include a site
    #[arg(long = "cut-off", default_value = "0.0", allow_negative_numbers = true)]
    cutoff: f64,

    /// Allowed residues, comma-separated (default: inferred from the file name)
    #[arg(long = "residues")]
    residues: Option<String>,
}

#[derive(Args, Debug)]
struct DomainArgs {
    /// Input TSV file of domain predictions
    tsv: PathBuf,

    /// Two sequence headers to compare (the part after the last '|')
    headers: Vec<String>,

    /// Output TSV file
    #[arg(short = 'o', long = "output", default_value = "comparison_results.tsv")]
    output: PathBuf,

    #[command(flatten)]
    batch: BatchArgs,
}

#[derive(Args, Debug)]
struct SiteArgs {
    /// Input TSV file of site predictions
    tsv: PathBuf,

    /// Two sequence headers to compare (the part after the last '|')
    headers: Vec<String>,

    /// Output TSV file
    #[arg(short = 'o', long = "output", default_value = "phospho_comparison.tsv")]
    output: PathBuf,

    #[command(flatten)]
    filter: SiteFilterArgs,

    #[command(flatten)]
    batch: BatchArgs,
}

#[derive(Args, Debug)]
struct MsaSiteArgs {
    /// Input TSV file of site predictions
    tsv: PathBuf,

    /// Multiple sequence alignment in FASTA format
    msa: PathBuf,

    /// Two sequence headers to compare (the part after the last '|')
    headers: Vec<String>,

    /// Output TSV file
    #[arg(short = 'o', long = "output", default_value = "phospho_comparison.tsv")]
    output: PathBuf,

    #[command(flatten)]
    filter: SiteFilterArgs,

    #[command(flatten)]
    batch: BatchArgs,
}

#[derive(Args, Debug)]
struct OverlapArgs {
    /// Comma-separated directories of `<p1>__vs__<p2>.tsv` domain reports
    #[arg(value_delimiter = ',', required = true)]
    input_dirs: Vec<PathBuf>,

    /// Output matrix TSV file
    #[arg(short = 'o', long = "output")]
    output: PathBuf,
}

/// What a comparison subcommand should produce.
enum Plan {
    Single {
        pair: HeaderPair,
        output: PathBuf,
    },
    Batch {
        pairs: Vec<HeaderPair>,
        output_dir: PathBuf,
        threads: usize,
    },
}

impl Plan {
    fn new(headers: &[String], output: &Path, batch: &BatchArgs) -> Result<Self> {
        let (Some(pairs_path), Some(output_dir)) = (&batch.pairs, &batch.output_dir) else {
            let pair = HeaderPair::new(headers)?;
            return Ok(Plan::Single {
                pair,
                output: output.to_path_buf(),
            });
        };

        if !headers.is_empty() {
            bail!("Provide either two sequence headers or --pairs, not both.");
        }
        let pairs = parse_pairs(pairs_path)?;
        if pairs.is_empty() {
            bail!("No header pairs found in {}", pairs_path.display());
        }

        Ok(Plan::Batch {
            pairs,
            output_dir: output_dir.clone(),
            threads: batch.threads,
        })
    }

    fn pairs(&self) -> &[HeaderPair] {
        match self {
            Plan::Single { pair, .. } => std::slice::from_ref(pair),
            Plan::Batch { pairs, .. } => pairs,
        }
    }

    /// Run `compare` for every pair, writing each report to its own path.
    fn execute<F>(&self, compare: F) -> Result<()>
    where
        F: Fn(&HeaderPair, &Path) -> Result<()> + Sync,
    {
        match self {
            Plan::Single { pair, output } => {
                compare(pair, output)?;
                log::info!("Comparison results saved to {}", output.display());
                Ok(())
            }
            Plan::Batch {
                pairs,
                output_dir,
                threads,
            } => run_batch(pairs, output_dir, *threads, compare),
        }
    }
}

/// Compare independent pairs on a rayon pool. Failed pairs are logged and
/// skipped; the run fails only when no pair succeeds.
fn run_batch<F>(pairs: &[HeaderPair], output_dir: &Path, threads: usize, compare: F) -> Result<()>
where
    F: Fn(&HeaderPair, &Path) -> Result<()> + Sync,
{
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let num_threads = if threads == 0 { num_cpus::get() } else { threads };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .context("Failed to create thread pool")?;

    log::info!("Comparing {} pairs with {} threads", pairs.len(), num_threads);

    // Results come back in pairs-file order.
    let outcomes: Vec<Result<PathBuf>> = pool.install(|| {
        pairs
            .par_iter()
            .map(|pair| {
                let path = output_dir.join(pair.report_name());
                compare(pair, &path).map(|_| path)
            })
            .collect()
    });

    let mut failed = 0usize;
    for (pair, outcome) in pairs.iter().zip(&outcomes) {
        match outcome {
            Ok(path) => log::debug!("{}: saved to {}", pair, path.display()),
            Err(e) => {
                failed += 1;
                log::warn!("{}: {:#}", pair, e);
            }
        }
    }

    if failed == pairs.len() {
        bail!("All {} comparisons failed", failed);
    }
    log::info!(
        "{} of {} comparisons saved to {}",
        pairs.len() - failed,
        pairs.len(),
        output_dir.display()
    );
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .init();
}

fn ensure_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file not found: {}", what, path.display());
    }
    Ok(())
}

fn site_config(tsv: &Path, filter: &SiteFilterArgs) -> Result<Config> {
    let mut config = Config::for_predictions(tsv);
    if let Some(residues) = &filter.residues {
        if !config.parse_residues(residues) {
            bail!("Residues must be a comma-separated list of S, T and Y.");
        }
    }
    config.set_cutoff(filter.cutoff)?;

    log::debug!(
        "Site filter: cutoff {} residues {:?}",
        config.cutoff,
        config.residues
    );
    Ok(config)
}

fn run_domains(args: &DomainArgs) -> Result<()> {
    ensure_exists(&args.tsv, "TSV")?;
    let plan = Plan::new(&args.headers, &args.output, &args.batch)?;

    log::info!("Parsing domain predictions: {}", args.tsv.display());
    let index = parse_domains(&args.tsv, &header_set(plan.pairs()))?;

    plan.execute(|pair, path| {
        let report = compare_domains(&index, pair)?;
        write_to_file(path, |w| write_domain_report(w, &report))
    })
}

fn run_sites(args: &SiteArgs) -> Result<()> {
    ensure_exists(&args.tsv, "TSV")?;
    let config = site_config(&args.tsv, &args.filter)?;
    let plan = Plan::new(&args.headers, &args.output, &args.batch)?;

    log::info!("Parsing site predictions: {}", args.tsv.display());
    let index = parse_sites(&args.tsv, &header_set(plan.pairs()), &config)?;

    plan.execute(|pair, path| {
        let report = compare_sites(&index, pair, &config)?;
        write_to_file(path, |w| write_site_report(w, &report))
    })
}

fn run_msa_sites(args: &MsaSiteArgs) -> Result<()> {
    ensure_exists(&args.tsv, "TSV")?;
    ensure_exists(&args.msa, "FASTA/MSA")?;
    let config = site_config(&args.tsv, &args.filter)?;
    let plan = Plan::new(&args.headers, &args.output, &args.batch)?;

    log::info!("Parsing alignment: {}", args.msa.display());
    let msa = parse_fasta(&args.msa)?;
    log::info!("Parsing site predictions: {}", args.tsv.display());
    let index = parse_sites(&args.tsv, &header_set(plan.pairs()), &config)?;

    plan.execute(|pair, path| {
        let report = compare_msa_sites(&index, &msa, pair, &config)?;
        write_to_file(path, |w| write_msa_site_report(w, &report))
    })
}

fn run_overlap(args: &OverlapArgs) -> Result<()> {
    let proteins = summarize_overlap(&args.input_dirs, &args.output)?;
    if proteins == 0 {
        log::warn!("No domain reports found; nothing written");
    } else {
        log::info!(
            "Overlap matrix for {} proteins saved to {}",
            proteins,
            args.output.display()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);
    log::info!("Running {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Domains(args) => run_domains(args)?,
        Command::Sites(args) => run_sites(args)?,
        Command::MsaSites(args) => run_msa_sites(args)?,
        Command::Overlap(args) => run_overlap(args)?,
    }

    log::info!("Done");
    Ok(())
}
