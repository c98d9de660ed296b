//! Link canonicalization and classification.
//!
//! Raw links are authored by hand in page content and come in many shapes:
//! `/courses/cs1675/`, `/About/index`, `www.example.com`, `#section`,
//! `./relative`. This module reduces them to a [`CanonicalPath`] and decides
//! which of them may be checked against the site index.
//!
//! # Canonical Form
//!
//! - Lowercase
//! - Always ends with `/`
//! - No trailing `/index` segment
//! - No trailing `#word` heading fragment
//!
//! Stripping is repeated until nothing changes, so `canonicalize` is
//! idempotent for every input.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Trailing heading fragment, with an optional leading slash, before the final slash.
static FRAGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/?#\w+/$").unwrap());

/// Literal prefixes that mark a link as pointing outside the site.
const EXTERNAL_PREFIXES: [&str; 3] = ["www", "http", "mail"];

/// Category of a raw link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Reference to a heading within the same page (`#section`).
    Anchor,
    /// Reference outside the site (`www`, `http`, `mail` prefixes).
    External,
    /// Internal link whose canonical form is an absolute site path.
    Absolute,
    /// Internal link that cannot be mapped to a site path.
    Malformed,
}

impl LinkKind {
    /// Whether the link is a candidate for checking against the site index.
    #[must_use]
    pub fn is_internal_candidate(self) -> bool {
        matches!(self, Self::Absolute | Self::Malformed)
    }
}

/// Normalized site path: lowercase, trailing slash, no `index` or fragment suffix.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    /// Canonicalize a raw link or slug.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(canonical_string(raw))
    }

    /// Site root (`/`).
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path without the leading slash (e.g., `"a/b/"`, `""` for root).
    #[must_use]
    pub fn id(&self) -> &str {
        self.0.strip_prefix('/').unwrap_or(&self.0)
    }

    /// Non-empty `/`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Path of the child segment `key` below this path.
    #[must_use]
    pub(crate) fn join(&self, key: &str) -> Self {
        Self(format!("{}{key}/", self.0))
    }

    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Whether this path equals `prefix` or lies below it.
    #[must_use]
    pub fn starts_with(&self, prefix: &CanonicalPath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error returned when a raw link cannot be resolved to a site path.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// Link is empty or whitespace only.
    #[error("empty link")]
    Empty,
    /// Link starts with `.` (`./page`, `../page`).
    #[error("relative links unsupported by policy")]
    Relative,
    /// Link is neither external nor an absolute internal path.
    #[error("malformed link")]
    Malformed,
}

/// Classify a raw link.
///
/// Anchor and external detection look at the link exactly as authored. All
/// other links are internal candidates: `Absolute` when the canonical form
/// starts with `/`, `Malformed` otherwise.
#[must_use]
pub fn classify(raw: &str) -> LinkKind {
    if raw.starts_with('#') {
        LinkKind::Anchor
    } else if is_external(raw) {
        LinkKind::External
    } else if canonical_string(raw).starts_with('/') {
        LinkKind::Absolute
    } else {
        LinkKind::Malformed
    }
}

/// Canonicalize a raw link or slug.
#[must_use]
pub fn canonicalize(raw: &str) -> CanonicalPath {
    CanonicalPath::new(raw)
}

/// Resolve a raw link to its canonical path.
///
/// External links resolve to their canonical form unchanged in meaning; they
/// are never looked up in the site index by callers.
///
/// # Errors
///
/// - [`LinkError::Empty`] for blank links
/// - [`LinkError::Relative`] when the canonical form starts with `.`
/// - [`LinkError::Malformed`] when it is neither external nor absolute
pub fn resolve(raw: &str) -> Result<CanonicalPath, LinkError> {
    if raw.trim().is_empty() {
        return Err(LinkError::Empty);
    }

    let path = CanonicalPath::new(raw);
    if path.0.starts_with('.') {
        return Err(LinkError::Relative);
    }
    if !path.is_absolute() && !is_external(raw) {
        return Err(LinkError::Malformed);
    }
    Ok(path)
}

fn is_external(raw: &str) -> bool {
    EXTERNAL_PREFIXES.iter().any(|prefix| raw.starts_with(prefix))
}

fn canonical_string(raw: &str) -> String {
    let mut path = raw.to_lowercase();
    if !path.ends_with('/') {
        path.push('/');
    }

    loop {
        let before = path.len();
        if let Some(m) = FRAGMENT_RE.find(&path) {
            path.truncate(m.start());
            if !path.ends_with('/') {
                path.push('/');
            }
        }
        if path.ends_with("/index/") {
            path.truncate(path.len() - "index/".len());
        }
        if path.starts_with('/') && path.contains("//") {
            path = collapse_slashes(&path);
        }
        if path.len() == before {
            return path;
        }
    }
}

/// Replace runs of `/` with a single `/`.
fn collapse_slashes(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    for c in path.chars() {
        if c != '/' || !collapsed.ends_with('/') {
            collapsed.push(c);
        }
    }
    collapsed
}
