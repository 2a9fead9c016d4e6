//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::autolink::{AutolinkOptions, ExtensionKind, Extensions};
use crate::repository::Repository;

/// Input path that reads markdown from stdin.
pub const STDIN_PATH: &str = "-";

/// Command line configuration for gh-autolink.
#[derive(Debug, Clone, Parser)]
#[command(name = "gh-autolink", version, about, long_about = None)]
pub struct Config {
    /// Markdown file to render (`-` reads stdin)
    #[arg(default_value = STDIN_PATH)]
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Repository (owner/repo) that bare references link into
    #[arg(short, long)]
    pub repository: Option<String>,

    /// Only enable the named extension (repeatable)
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,

    /// Render markdown without GitHub autolinks
    #[arg(long, conflicts_with = "only")]
    pub plain: bool,

    /// Print extension names in registration order and exit
    #[arg(long)]
    pub list: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Whether input comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input == Path::new(STDIN_PATH)
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input file does not exist, the repository is not
    /// `owner/repo`, or an `--only` name is not a known extension.
    pub fn validate(&self) -> Result<()> {
        if !self.reads_stdin() && !self.input.exists() {
            bail!("Input file does not exist: {}", self.input.display());
        }

        Repository::parse_optional(self.repository.as_deref())
            .context("Invalid --repository")?;

        for name in &self.only {
            name.parse::<ExtensionKind>()
                .context("Invalid --only")?;
        }

        Ok(())
    }

    /// Options every extension is built with.
    pub fn autolink_options(&self) -> AutolinkOptions {
        AutolinkOptions {
            repository: self.repository.clone(),
        }
    }

    /// Builds the autolink bundle, or `None` in plain mode.
    ///
    /// # Errors
    ///
    /// Returns error if an extension name is unknown or the repository is
    /// malformed.
    pub fn extensions(&self) -> Result<Option<Extensions>> {
        if self.plain {
            return Ok(None);
        }

        let options = self.autolink_options();
        let extensions = if self.only.is_empty() {
            Extensions::all(&options)
        } else {
            Extensions::from_names(&self.only, &options)
        }
        .context("Failed to build autolink extensions")?;

        Ok(Some(extensions))
    }
}
