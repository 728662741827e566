//! relclauses - relative clause statistics for a treebank directory
//!
//! ```bash
//! # Summary only
//! relclauses path/to/patb/data/penntree
//!
//! # Also export one row per classified clause
//! relclauses path/to/penntree --table rcs.tsv
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use relclauses::{
    CorpusReport, ExtractConfig, Treebank, WindowBounds, analyze, export_table, records,
};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Extract subject and object relative clauses from bracketed tree files
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding *.tree (or *.tree.gz) files
    dir: PathBuf,

    /// Write per-clause rows here (.jsonl for JSON lines, otherwise TSV)
    #[arg(long, value_name = "PATH")]
    table: Option<PathBuf>,

    /// Chunks kept before each relative-clause trigger
    #[arg(long, default_value_t = WindowBounds::default().preceding)]
    preceding: usize,

    /// Chunks kept after each relative-clause trigger
    #[arg(long, default_value_t = WindowBounds::default().following)]
    following: usize,
}

impl Args {
    fn config(&self) -> ExtractConfig {
        ExtractConfig {
            window: WindowBounds {
                preceding: self.preceding,
                following: self.following,
            },
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let treebank = Treebank::from_dir(&args.dir)?;
    let analysis = analyze(&treebank, &args.config())
        .with_context(|| format!("Failed to analyze {}", args.dir.display()))?;
    let report = CorpusReport::from_analysis(&analysis)?;

    println!("{}", report);
    println!("{}", report.unmarked_line());

    if let Some(path) = &args.table {
        export_table(path, &records(&analysis.clauses))?;
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
