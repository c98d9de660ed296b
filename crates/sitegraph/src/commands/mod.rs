//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod nav;
pub(crate) mod tree;

use std::path::Path;

use sitegraph_config::{CliSettings, Config};
use sitegraph_engine::SiteBuild;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use tree::TreeArgs;

use crate::error::CliError;
use crate::manifest;

/// Load configuration and manifest, then run the engine.
fn load_site(
    config_path: Option<&Path>,
    cli_settings: &CliSettings,
) -> Result<(Config, SiteBuild), CliError> {
    let config = Config::load(config_path, Some(cli_settings))?;
    let input = manifest::load(&config)?;
    let site = sitegraph_engine::build(&input);
    Ok((config, site))
}
