//! Navigation view for list and card renderers.
//!
//! Renderers walk the tree (optionally projected onto a prefix), sort
//! children alphabetically by title, and never expand a landing page: a
//! section's top-level landing path is a leaf in the navigation of its parent.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::link::CanonicalPath;
use crate::tree::{SiteTree, TreeError, TreeNode};

/// Navigation item with children for UI tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target path (canonical, with leading slash).
    pub path: String,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Options for [`navigation`].
#[derive(Clone, Debug, Default)]
pub struct NavOptions {
    landing_pages: BTreeSet<CanonicalPath>,
}

impl NavOptions {
    /// Register landing pages whose children are never expanded.
    #[must_use]
    pub fn with_landing_pages<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.landing_pages
            .extend(slugs.into_iter().map(|s| CanonicalPath::new(s.as_ref())));
        self
    }

    #[must_use]
    pub fn is_landing_page(&self, path: &CanonicalPath) -> bool {
        self.landing_pages.contains(path)
    }
}

/// Build navigation items below `prefix`.
///
/// # Errors
///
/// Returns [`TreeError::PrefixNotFound`] if `prefix` matches no branch.
pub fn navigation(
    tree: &SiteTree,
    prefix: &str,
    options: &NavOptions,
) -> Result<Vec<NavItem>, TreeError> {
    let node = tree.find_prefix(prefix)?;
    Ok(build_items(node, options))
}

/// Build sorted items for the children of `node`, stopping at landing pages.
fn build_items(node: &TreeNode, options: &NavOptions) -> Vec<NavItem> {
    let mut items: Vec<NavItem> = node
        .children
        .values()
        .map(|child| {
            let children = if options.is_landing_page(&child.slug) {
                Vec::new()
            } else {
                build_items(child, options)
            };
            NavItem {
                title: child.display_title(),
                path: child.slug.to_string(),
                children,
            }
        })
        .collect();

    items.sort_by_cached_key(|item| (item.title.to_lowercase(), item.path.clone()));
    items
}
