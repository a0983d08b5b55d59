//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pipemark::Config;

/// Rewrite `{value | pipe:args}` blocks into nested function calls.
///
/// Reads the given files (or stdin when none are given) and writes the
/// preprocessed markup to stdout, or back to each file with --in-place.
#[derive(Debug, Parser)]
#[command(name = "pipemark", version)]
pub struct Cli {
    /// Template files to preprocess
    pub files: Vec<PathBuf>,

    /// Prefix prepended to every generated call name (e.g. "utils.")
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Report every rewritten block on stderr
    #[arg(short, long)]
    pub debug: bool,

    /// Skip files whose path contains this text (repeatable)
    #[arg(short = 'x', long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Also skip SvelteKit's generated files and node_modules
    #[arg(long)]
    pub sveltekit_defaults: bool,

    /// YAML config file; flags override its values
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Rewrite files in place instead of printing them
    #[arg(short, long, requires = "files", conflicts_with = "list_pipes")]
    pub in_place: bool,

    /// Print the pipe functions the input calls, one per line
    #[arg(long)]
    pub list_pipes: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Loads the config file, if any, and applies the flag overrides.
    pub fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        config.debug |= self.debug;
        config.sveltekit_defaults |= self.sveltekit_defaults;
        config.exclude.extend(self.exclude.iter().cloned());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_without_config_file() {
        let cli = Cli::parse_from(["pipemark", "-p", "utils.", "-x", "vendor/", "a.svelte"]);
        let config = cli.config().unwrap();
        assert_eq!(config.prefix, "utils.");
        assert_eq!(config.exclude, vec!["vendor/"]);
        assert!(!config.debug);
        assert_eq!(cli.files, vec![PathBuf::from("a.svelte")]);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipemark.yaml");
        std::fs::write(&path, "prefix: file.\nexclude: [legacy/]\n").unwrap();

        let cli = Cli::parse_from([
            "pipemark",
            "--config",
            path.to_str().unwrap(),
            "--prefix",
            "flag.",
            "--exclude",
            "vendor/",
            "--debug",
        ]);
        let config = cli.config().unwrap();
        assert_eq!(config.prefix, "flag.");
        assert_eq!(config.exclude, vec!["legacy/", "vendor/"]);
        assert!(config.debug);
    }

    #[test]
    fn config_file_prefix_kept_without_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipemark.yaml");
        std::fs::write(&path, "prefix: file.\n").unwrap();

        let cli = Cli::parse_from(["pipemark", "-c", path.to_str().unwrap()]);
        assert_eq!(cli.config().unwrap().prefix, "file.");
    }

    #[test]
    fn in_place_requires_files() {
        assert!(Cli::try_parse_from(["pipemark", "--in-place"]).is_err());
        assert!(Cli::try_parse_from(["pipemark", "--in-place", "a.svelte"]).is_ok());
    }

    #[test]
    fn in_place_conflicts_with_list() {
        assert!(Cli::try_parse_from(["pipemark", "-i", "--list-pipes", "a.svelte"]).is_err());
    }
}
