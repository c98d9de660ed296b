//! `sitegraph check` command implementation.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sitegraph_config::{CheckConfig, CliSettings};
use sitegraph_engine::{Issue, IssueKind};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover sitegraph.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page manifest (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Issue kinds that fail the check, comma separated (overrides config).
    #[arg(long, value_delimiter = ',', value_parser = parse_issue_kind)]
    fail_on: Option<Vec<IssueKind>>,

    /// Print the report as JSON to stdout.
    #[arg(long)]
    json: bool,
}

/// Issues split by the configured check policy.
#[derive(Debug, Default, Serialize)]
struct CheckReport<'a> {
    failures: Vec<&'a Issue>,
    warnings: Vec<&'a Issue>,
    ignored: usize,
}

impl<'a> CheckReport<'a> {
    fn new(issues: &'a [Issue], policy: &CheckConfig) -> Self {
        let mut report = Self::default();
        for issue in issues {
            if policy.is_ignored(&issue.path()) {
                report.ignored += 1;
            } else if policy.is_failure(issue.kind()) {
                report.failures.push(issue);
            } else {
                report.warnings.push(issue);
            }
        }
        report
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Validation` if any failing issue remains after filtering.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let cli_settings = CliSettings {
            manifest: self.manifest,
            fail_on: self.fail_on,
        };
        let (config, site) = super::load_site(self.config.as_deref(), &cli_settings)?;

        output.info(&format!(
            "Manifest: {}",
            config.site_resolved.manifest.display()
        ));
        output.info(&format!(
            "Checked {} pages against {} known paths",
            site.nodes.len(),
            site.index.len()
        ));

        let report = CheckReport::new(&site.issues, &config.check);

        if self.json {
            let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
            output.document(&json)?;
        } else {
            for issue in &report.failures {
                output.error(&issue.to_string());
            }
            for issue in &report.warnings {
                output.warning(&issue.to_string());
            }
        }

        if report.ignored > 0 {
            output.info(&format!("Ignored {} issue(s)", report.ignored));
        }

        if !report.failures.is_empty() {
            return Err(CliError::Validation(format!(
                "{} failing issue(s), {} warning(s)",
                report.failures.len(),
                report.warnings.len()
            )));
        }

        if report.warnings.is_empty() {
            output.success("No issues found");
        } else {
            output.highlight(&format!(
                "Passed with {} warning(s)",
                report.warnings.len()
            ));
        }
        Ok(())
    }
}

fn parse_issue_kind(value: &str) -> Result<IssueKind, String> {
    IssueKind::ALL
        .into_iter()
        .find(|kind| kind.as_str() == value)
        .ok_or_else(|| {
            let known: Vec<_> = IssueKind::ALL.iter().map(|k| k.as_str()).collect();
            format!("unknown issue kind '{value}' (expected one of: {})", known.join(", "))
        })
}
