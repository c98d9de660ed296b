//! `sitegraph nav` command implementation.

use std::path::PathBuf;

use clap::Args;
use sitegraph_config::CliSettings;
use sitegraph_engine::{NavItem, NavOptions};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Path to configuration file (default: auto-discover sitegraph.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page manifest (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Section to show navigation for.
    #[arg(short, long, default_value = "/")]
    prefix: String,
}

impl NavArgs {
    /// Print the navigation view as an indented list.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            manifest: self.manifest,
            ..CliSettings::default()
        };
        let (config, site) = super::load_site(self.config.as_deref(), &cli_settings)?;

        let options = NavOptions::default().with_landing_pages(config.landing_pages());
        let items = sitegraph_engine::navigation(&site.tree, &self.prefix, &options)?;

        if items.is_empty() {
            output.warning(&format!("No pages below {}", self.prefix));
        }
        for line in render_lines(&items) {
            output.document(&line)?;
        }
        Ok(())
    }
}

/// Render items depth-first, two spaces of indent per level.
fn render_lines(items: &[NavItem]) -> Vec<String> {
    fn walk(items: &[NavItem], depth: usize, lines: &mut Vec<String>) {
        for item in items {
            lines.push(format!("{}- {} ({})", "  ".repeat(depth), item.title, item.path));
            walk(&item.children, depth + 1, lines);
        }
    }

    let mut lines = Vec::new();
    walk(items, 0, &mut lines);
    lines
}
