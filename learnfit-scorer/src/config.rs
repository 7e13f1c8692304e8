//! Command line and service settings for learnfit-scorer
//!
//! Priority for every setting: command line → environment → TOML → default.
//! clap covers the first two; `ServiceSettings::resolve` folds in the rest.

use clap::{Parser, Subcommand};
use learnfit_common::config::{CompiledDefaults, RootFolderResolver, TomlConfig};
use learnfit_common::{Error, Result};
use std::path::PathBuf;
use uuid::Uuid;

pub const MODULE_NAME: &str = "learnfit-scorer";

#[derive(Debug, Parser)]
#[command(name = "learnfit-scorer", version, about = "Video learning-style compatibility scorer")]
pub struct Cli {
    /// Config file (default: <config dir>/learnfit/config.toml)
    #[arg(long, env = "LEARNFIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root folder holding learnfit.db (env: LEARNFIT_ROOT_FOLDER)
    #[arg(long)]
    pub root_folder: Option<PathBuf>,

    /// HTTP port
    #[arg(long, env = "LEARNFIT_PORT")]
    pub port: Option<u16>,

    /// Keyword taxonomy override file
    #[arg(long, env = "LEARNFIT_TAXONOMY")]
    pub taxonomy: Option<PathBuf>,

    /// Videos recalculated in parallel during batch runs
    #[arg(long, env = "LEARNFIT_BATCH_CONCURRENCY")]
    pub batch_concurrency: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Recalculate scores and exit; all videos unless --video is given
    Recalculate {
        #[arg(long = "video")]
        videos: Vec<Uuid>,
    },
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub root_folder: PathBuf,
    pub port: u16,
    /// `None` means the built-in taxonomy
    pub taxonomy_path: Option<PathBuf>,
    pub batch_concurrency: usize,
}

impl ServiceSettings {
    pub fn resolve(cli: &Cli, toml: &TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::for_current_platform();

        let root_folder = RootFolderResolver::new(MODULE_NAME)
            .with_cli_arg(cli.root_folder.clone())
            .with_toml(toml)
            .resolve();

        let batch_concurrency = cli
            .batch_concurrency
            .or(toml.batch_concurrency)
            .unwrap_or(defaults.batch_concurrency);
        if batch_concurrency == 0 {
            return Err(Error::Config("batch_concurrency must be at least 1".to_string()));
        }

        Ok(Self {
            root_folder,
            port: cli.port.or(toml.port).unwrap_or(defaults.port),
            taxonomy_path: cli.taxonomy.clone().or_else(|| toml.taxonomy_path.clone()),
            batch_concurrency,
        })
    }
}
