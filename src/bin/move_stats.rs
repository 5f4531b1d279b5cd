use anyhow::{Context, Result};
use clap::Parser;
use npuzzle_solver::statistics::MoveComparison;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compares the move counts recorded in report files", long_about = None)]
struct Args {
    /// Directory holding the report files written by `solve`
    #[clap(short, long, default_value = ".")]
    dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let comparison = MoveComparison::load(&args.dir);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    comparison
        .write_to(&mut out)
        .and_then(|_| out.flush())
        .context("Failed to write the comparison")?;
    Ok(())
}
