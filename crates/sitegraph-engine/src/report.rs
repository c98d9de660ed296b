//! Issues reported by a build run.
//!
//! The engine only reports. Whether an [`IssueKind`] fails a build, is logged
//! as a warning or is filtered out by path is decided by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::link::CanonicalPath;

/// Message attached to [`MissingBackingPage`] diagnostics.
pub const MISSING_BACKING_PAGE_MESSAGE: &str = "branch node without a backing page - verify an index file/frontmatter title exists for this path segment";

/// Message attached to broken link errors.
pub const BROKEN_LINK_MESSAGE: &str = "destination not found in known page list";

/// Kind of every reportable issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Relative link, blank link, or neither external nor absolute.
    MalformedLink,
    /// Well-formed internal path missing from the site index.
    BrokenLink,
    /// Structural tree branch with no page behind it.
    MissingBackingPage,
}

impl IssueKind {
    /// All kinds, in report order.
    pub const ALL: [Self; 3] = [
        Self::MalformedLink,
        Self::BrokenLink,
        Self::MissingBackingPage,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedLink => "malformed_link",
            Self::BrokenLink => "broken_link",
            Self::MissingBackingPage => "missing_backing_page",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link-level error category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkErrorKind {
    MalformedLink,
    BrokenLink,
}

impl From<LinkErrorKind> for IssueKind {
    fn from(kind: LinkErrorKind) -> Self {
        match kind {
            LinkErrorKind::MalformedLink => Self::MalformedLink,
            LinkErrorKind::BrokenLink => Self::BrokenLink,
        }
    }
}

/// Outgoing link that failed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub kind: LinkErrorKind,
    /// Slug of the page containing the link, as authored.
    pub source_slug: String,
    /// The offending link, as authored.
    pub broken_link: String,
    pub message: String,
}

/// Tree branch without a backing page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingBackingPage {
    /// Canonical slug of the branch.
    pub slug: CanonicalPath,
    /// Title synthesized for the branch.
    pub title: String,
    pub message: String,
}

impl MissingBackingPage {
    pub(crate) fn new(slug: CanonicalPath, title: String) -> Self {
        Self {
            slug,
            title,
            message: MISSING_BACKING_PAGE_MESSAGE.to_owned(),
        }
    }
}

/// Any issue found during a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Issue {
    Link(ValidationError),
    MissingBackingPage(MissingBackingPage),
}

impl Issue {
    #[must_use]
    pub fn kind(&self) -> IssueKind {
        match self {
            Self::Link(error) => error.kind.into(),
            Self::MissingBackingPage(_) => IssueKind::MissingBackingPage,
        }
    }

    /// Path the issue is reported against: the source page for link errors,
    /// the branch itself for missing pages.
    #[must_use]
    pub fn path(&self) -> CanonicalPath {
        match self {
            Self::Link(error) => CanonicalPath::new(&error.source_slug),
            Self::MissingBackingPage(diag) => diag.slug.clone(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Link(error) => &error.message,
            Self::MissingBackingPage(diag) => &diag.message,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(error) => write!(
                f,
                "[{}] {}: {} ({})",
                self.kind(),
                error.source_slug,
                error.broken_link,
                error.message
            ),
            Self::MissingBackingPage(diag) => {
                write!(f, "[{}] {}: {}", self.kind(), diag.slug, diag.message)
            }
        }
    }
}
