//! `tally <bootstrap-file>`
//!
//! Loads the bootstrap file into a [`TallyTree`], then reads one command per line
//! from stdin and writes one reply per line to stdout until `quit`, a blank line,
//! or end of input. Log verbosity follows `RUST_LOG` (default `warn`), on stderr.

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::{env, fs};

use tally_tree::TallyTree;
use tally_tree::bootstrap;
use tally_tree::command::Command;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum CliError {
    #[error("usage: tally <bootstrap-file>")]
    Usage,

    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{}: {source}", .path.display())]
    Bootstrap { path: PathBuf, source: tally_tree::Error },

    #[error("input line {line}: {source}")]
    Command { line: usize, source: tally_tree::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tally: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let mut args = env::args_os().skip(1);
    let (Some(path), None) = (args.next(), args.next()) else {
        return Err(CliError::Usage);
    };
    let path = PathBuf::from(path);

    let input = fs::read_to_string(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;

    let mut tree = TallyTree::new();
    let summary = bootstrap::load(&mut tree, &input).map_err(|source| CliError::Bootstrap { path, source })?;
    tracing::info!(records = summary.records, keys = tree.len(), height = tree.height(), "bootstrap complete");

    let mut out = BufWriter::new(io::stdout().lock());
    for (index, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        let command = Command::parse(&line).map_err(|source| CliError::Command {
            line: index + 1,
            source,
        })?;
        tracing::debug!(command = command.name(), "executing");

        let Some(reply) = command.execute(&mut tree) else {
            break;
        };
        writeln!(out, "{reply}")?;
        out.flush()?;
    }

    out.flush()?;
    Ok(())
}
