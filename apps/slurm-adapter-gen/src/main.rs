//! Slurm adapter generator
//!
//! Renders the per-revision converter and binding modules of `cf-slurm-client`
//! and its validation rules from `codegen/adapters.yaml`, reading field types
//! from the model and wire sources.
//!
//! # Usage
//!
//! ```bash
//! # Regenerate after editing the table or a wire type
//! cargo run -p slurm-adapter-gen
//!
//! # CI: fail when the checked-in files are stale
//! cargo run -p slurm-adapter-gen -- --check
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;
mod emit;
mod infer;
mod source;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use colored::Colorize;

use crate::config::AdapterConfig;
use crate::emit::{HEADER, Output};

/// Slurm adapter generator
///
/// Pairs each wire struct with its model struct, infers the conversion of
/// every field and writes the generated sources in place.
#[derive(Parser, Debug)]
#[command(name = "slurm-adapter-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Adapter table, relative to the root
    #[arg(long, default_value = "codegen/adapters.yaml")]
    config: PathBuf,

    /// Workspace root
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Compare instead of writing; fail when a file is stale
    #[arg(long, conflicts_with = "dry_run")]
    check: bool,

    /// Render everything but write nothing
    #[arg(long)]
    dry_run: bool,

    /// List every file, not only the changed ones
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Unchanged,
    Changed,
    Created,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(stale) if cli.check && stale > 0 => {
            eprintln!(
                "{} {stale} generated file(s) are stale; run `cargo run -p slurm-adapter-gen`",
                "error:".red().bold()
            );
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Generate and write or compare; returns the number of files that differ.
fn run(cli: &Cli) -> anyhow::Result<usize> {
    let config = AdapterConfig::load(&cli.root.join(&cli.config))?;
    let outputs = emit::generate(&cli.root, &config)?;
    let mut stale = 0;
    for output in &outputs {
        let status = compare(&cli.root, output)?;
        if status != Status::Unchanged {
            stale += 1;
        }
        if !cli.check && !cli.dry_run && status != Status::Unchanged {
            let path = cli.root.join(&output.path);
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("cannot create {}", dir.display()))?;
            }
            fs::write(&path, &output.content)
                .with_context(|| format!("cannot write {}", path.display()))?;
        }
        report(&output.path, status, cli.verbose);
    }
    println!(
        "{} {} file(s), {stale} {}",
        "slurm-adapter-gen:".bold(),
        outputs.len(),
        if cli.check { "stale" } else { "updated" }
    );
    Ok(stale)
}

/// State of the checked-in copy of `output`. Files that exist without the
/// generated header are hand-written and never overwritten.
fn compare(root: &Path, output: &Output) -> anyhow::Result<Status> {
    let path = root.join(&output.path);
    if !path.exists() {
        return Ok(Status::Created);
    }
    let current =
        fs::read_to_string(&path).with_context(|| format!("cannot read {}", path.display()))?;
    if !current.starts_with(HEADER) {
        bail!("{} is not a generated file", path.display());
    }
    Ok(if current == output.content {
        Status::Unchanged
    } else {
        Status::Changed
    })
}

fn report(path: &Path, status: Status, verbose: bool) {
    let label = match status {
        Status::Unchanged if !verbose => return,
        Status::Unchanged => "unchanged".dimmed(),
        Status::Changed => "changed".yellow(),
        Status::Created => "created".green(),
    };
    println!("  {label:>9} {}", path.display());
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn workspace_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    #[test]
    fn checked_in_sources_are_current() {
        let root = workspace_root();
        let config = AdapterConfig::load(&root.join("codegen/adapters.yaml")).unwrap();
        let outputs = emit::generate(&root, &config).unwrap();
        assert!(outputs.len() > 50);
        for output in &outputs {
            assert_eq!(
                compare(&root, output).unwrap(),
                Status::Unchanged,
                "{} is stale",
                output.path.display()
            );
        }
    }

    #[test]
    fn hand_written_files_are_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("job_extra.rs"), "pub fn hook() {}\n").unwrap();
        let output = Output {
            path: PathBuf::from("job_extra.rs"),
            content: format!("{HEADER}\n"),
        };
        assert!(compare(dir.path(), &output).is_err());

        let fresh = Output {
            path: PathBuf::from("new.rs"),
            content: format!("{HEADER}\n"),
        };
        assert_eq!(compare(dir.path(), &fresh).unwrap(), Status::Created);
    }
}
