pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "svc-scaffold")]
#[command(version)]
#[command(about = "Scaffold a service from a parameterized template project")]
pub struct CliConfig {
    /// Template source: an archive URL, host/owner/repo, or a template family name (e.g. `node`)
    pub template: String,

    /// Service name in hyphen-case; skips the prompt
    #[arg(long)]
    pub name: Option<String>,

    /// Route segment; skips the prompt
    #[arg(long)]
    pub route: Option<String>,

    /// Port; skips the prompt
    #[arg(long)]
    pub port: Option<String>,

    /// Accept suggested values instead of prompting
    #[arg(long)]
    pub no_input: bool,

    /// Directory the project is created in (defaults to the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Settings file (defaults to <bootstrap dir>/config.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scratch directory for the download and extraction (defaults to ~/.svc-scaffold)
    #[arg(long)]
    pub bootstrap_dir: Option<PathBuf>,

    /// Show what would be generated without downloading anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("template", &self.template)?;

        for (field, path) in [
            ("output", &self.output),
            ("config", &self.config),
            ("bootstrap_dir", &self.bootstrap_dir),
        ] {
            if let Some(path) = path {
                validate_path(field, &path.to_string_lossy())?;
            }
        }

        Ok(())
    }
}
