//! Cross-page link validation.
//!
//! Works purely over the flat page list and the [`SiteIndex`]; it never
//! looks at the navigation tree. Every page and every link is visited and all
//! errors are collected in one pass.

use crate::index::SiteIndex;
use crate::link::{self, LinkKind};
use crate::page::PageNode;
use crate::report::{BROKEN_LINK_MESSAGE, LinkErrorKind, ValidationError};

/// Validate every outgoing link of every page.
///
/// - Anchor links are skipped
/// - Links that fail to resolve are reported as [`LinkErrorKind::MalformedLink`]
/// - Internal links missing from `index` are reported as [`LinkErrorKind::BrokenLink`]
/// - External links are never looked up
#[must_use]
pub fn validate(pages: &[PageNode], index: &SiteIndex) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for page in pages {
        for raw in &page.links {
            let kind = link::classify(raw);
            if kind == LinkKind::Anchor {
                continue;
            }

            match link::resolve(raw) {
                Err(e) => {
                    tracing::debug!(source = %page.slug, link = %raw, error = %e, "Malformed link");
                    errors.push(ValidationError {
                        kind: LinkErrorKind::MalformedLink,
                        source_slug: page.slug.clone(),
                        broken_link: raw.clone(),
                        message: e.to_string(),
                    });
                }
                Ok(path) if kind != LinkKind::External && !index.contains(&path) => {
                    tracing::debug!(source = %page.slug, link = %raw, "Broken link");
                    errors.push(ValidationError {
                        kind: LinkErrorKind::BrokenLink,
                        source_slug: page.slug.clone(),
                        broken_link: raw.clone(),
                        message: BROKEN_LINK_MESSAGE.to_owned(),
                    });
                }
                Ok(_) => {}
            }
        }
    }

    errors
}
