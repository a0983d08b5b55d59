use std::collections::BTreeSet;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use pipemark::{Preprocessor, Processed};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

const STDIN_NAME: &str = "<stdin>";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flag
    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pipemark={level},pipemark_cli={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = cli.config()?;
    debug!(?config, "resolved configuration");
    let preprocessor = config.preprocessor();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list_pipes {
        let names = list_pipes(&preprocessor, &cli)?;
        for name in names {
            writeln!(out, "{}", name)?;
        }
        return Ok(());
    }

    if cli.files.is_empty() {
        let content = read_stdin()?;
        let processed = preprocessor.markup(&content, STDIN_NAME);
        report(STDIN_NAME, &processed);
        out.write_all(processed.code.as_bytes())?;
        return Ok(());
    }

    for path in &cli.files {
        let name = path.display().to_string();
        let content = read(path)?;
        let processed = preprocessor.markup(&content, &name);
        report(&name, &processed);

        if cli.in_place {
            if !processed.skipped && processed.code != content {
                std::fs::write(path, &processed.code)
                    .with_context(|| format!("writing {}", name))?;
                info!(file = %name, "rewrote");
            }
        } else {
            out.write_all(processed.code.as_bytes())?;
        }
    }

    Ok(())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("reading stdin")?;
    Ok(content)
}

/// Prints the debug records of one document to stderr.
fn report(name: &str, processed: &Processed) {
    if processed.skipped {
        debug!(file = name, "excluded");
        return;
    }
    for record in &processed.rewrites {
        eprintln!("{}:{}: {} -> {}", name, record.offset, record.before, record.after);
    }
}

/// Collects the pipe names every non-excluded input calls.
fn list_pipes(preprocessor: &Preprocessor, cli: &Cli) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();

    if cli.files.is_empty() {
        let content = read_stdin()?;
        names.extend(preprocessor.referenced_pipes(&content));
        return Ok(names);
    }

    for path in &cli.files {
        let name = path.display().to_string();
        if preprocessor.path_exclusions().is_excluded(&name) {
            continue;
        }
        names.extend(preprocessor.referenced_pipes(&read(path)?));
    }
    Ok(names)
}
