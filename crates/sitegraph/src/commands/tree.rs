//! `sitegraph tree` command implementation.

use std::path::PathBuf;

use clap::Args;
use sitegraph_config::CliSettings;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Path to configuration file (default: auto-discover sitegraph.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page manifest (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Only print the children of the branch at this path.
    #[arg(short, long)]
    prefix: Option<String>,
}

impl TreeArgs {
    /// Print the ordered tree as JSON.
    ///
    /// Without a prefix the full build output (nodes, tree, errors) is printed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            manifest: self.manifest,
            ..CliSettings::default()
        };
        let (_, site) = super::load_site(self.config.as_deref(), &cli_settings)?;

        let json = match self.prefix {
            Some(prefix) => serde_json::to_string_pretty(&site.tree.filter_by_prefix(&prefix)?),
            None => serde_json::to_string_pretty(&site.output()),
        }
        .map_err(std::io::Error::other)?;

        output.document(&json)?;
        Ok(())
    }
}
