//! Navigation tree built from the flat page list.
//!
//! # Architecture
//!
//! The tree is a strict prefix tree over canonical path segments. Each
//! [`TreeNode`] owns its children in a `BTreeMap` keyed by segment, so two
//! trees are structurally equal exactly when `==` says so.
//!
//! Pages are inserted with merge-not-overwrite semantics:
//! - Intermediate segments get an empty placeholder node when none exists
//! - An existing node is always reused together with its children
//! - Page data arriving at an existing node is attached, children are kept
//!
//! A node may therefore be seen first as the ancestor of a deeper page and
//! later as the target of its own page, or the other way round. Both orders
//! converge to the same tree.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::index::SiteIndex;
use crate::link::CanonicalPath;
use crate::page::PageNode;
use crate::report::MissingBackingPage;

/// Error returned by tree projections.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// No branch matches the requested prefix.
    #[error("No tree branch matches prefix: {prefix}")]
    PrefixNotFound {
        /// Canonical form of the requested prefix.
        prefix: String,
    },
}

/// Page data attached to a tree node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageRef {
    /// Canonical path without leading slash.
    pub id: String,
    /// Slug as authored.
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub is_index_page: bool,
}

impl PageRef {
    /// Ordering used when two pages land on the same node.
    ///
    /// Titled pages win over untitled ones, then the smaller authored slug,
    /// then the smaller title. Picking the maximum is commutative.
    fn rank(&self) -> (bool, Reverse<&str>, Reverse<Option<&str>>) {
        (
            self.title.is_some(),
            Reverse(self.slug.as_str()),
            Reverse(self.title.as_deref()),
        )
    }
}

impl From<&PageNode> for PageRef {
    fn from(page: &PageNode) -> Self {
        Self {
            id: page.id.clone(),
            slug: page.slug.clone(),
            title: page.title.clone(),
            is_index_page: page.is_index_page,
        }
    }
}

/// Node of the keyed navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    /// Path segment this node is keyed by (empty for root).
    pub key: String,
    /// Canonical slug of this position in the tree.
    pub slug: CanonicalPath,
    /// Display title (page title, or synthesized by [`SiteTree::resolve_titles`]).
    pub title: Option<String>,
    /// Backing page, `None` for structural placeholders.
    pub page: Option<PageRef>,
    pub children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    fn placeholder(key: &str, slug: CanonicalPath) -> Self {
        Self {
            key: key.to_owned(),
            slug,
            title: None,
            page: None,
            children: BTreeMap::new(),
        }
    }

    /// Whether this node only exists as an ancestor of deeper pages.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.page.is_none()
    }

    /// Title if set, otherwise the capitalized segment key.
    #[must_use]
    pub fn display_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| capitalize(&self.key))
    }

    /// Attach page data, keeping existing children.
    fn merge_page(&mut self, page: PageRef) {
        if let Some(existing) = &self.page {
            tracing::warn!(
                path = %self.slug,
                existing = %existing.slug,
                incoming = %page.slug,
                "Multiple pages share one path"
            );
            if existing.rank() >= page.rank() {
                return;
            }
        }
        self.title.clone_from(&page.title);
        self.page = Some(page);
    }

    fn resolve_titles(&mut self, index: &SiteIndex, missing: &mut Vec<MissingBackingPage>) {
        for child in self.children.values_mut() {
            if child.title.is_none() {
                let title = capitalize(&child.key);
                if !index.contains(&child.slug) {
                    tracing::debug!(path = %child.slug, "Branch without backing page");
                    missing.push(MissingBackingPage::new(child.slug.clone(), title.clone()));
                }
                child.title = Some(title);
            }
            child.resolve_titles(index, missing);
        }
    }

    fn count(&self) -> usize {
        1 + self.children.values().map(TreeNode::count).sum::<usize>()
    }
}

/// Ordered-array form of a tree node for rendering consumers.
///
/// Children are emitted in a stable but unspecified order; consumers that
/// need alphabetical order sort by title themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavNode {
    pub key: String,
    pub slug: CanonicalPath,
    pub title: String,
    /// Authored slug of the backing page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_slug: Option<String>,
    pub has_page: bool,
    pub is_index_page: bool,
    pub children: Vec<NavNode>,
}

impl From<&TreeNode> for NavNode {
    fn from(node: &TreeNode) -> Self {
        Self {
            key: node.key.clone(),
            slug: node.slug.clone(),
            title: node.display_title(),
            page_slug: node.page.as_ref().map(|p| p.slug.clone()),
            has_page: node.page.is_some(),
            is_index_page: node.page.as_ref().is_some_and(|p| p.is_index_page),
            children: node.children.values().map(NavNode::from).collect(),
        }
    }
}

/// Keyed navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteTree {
    root: TreeNode,
}

impl Default for SiteTree {
    fn default() -> Self {
        Self {
            root: TreeNode::placeholder("", CanonicalPath::root()),
        }
    }
}

impl SiteTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from pages in a single fold.
    ///
    /// The result does not depend on the order of `pages`.
    #[must_use]
    pub fn build(pages: &[PageNode]) -> Self {
        pages.iter().fold(Self::new(), |mut tree, page| {
            tree.insert(page);
            tree
        })
    }

    /// Insert a page at the position implied by its id.
    pub fn insert(&mut self, page: &PageNode) {
        let path = page.path();
        let mut node = &mut self.root;
        for segment in path.segments() {
            let slug = node.slug.join(segment);
            node = node
                .children
                .entry(segment.to_owned())
                .or_insert_with(|| TreeNode::placeholder(segment, slug));
        }
        node.merge_page(PageRef::from(page));
    }

    /// Root node (key `""`, slug `/`).
    #[must_use]
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Node at `path`, if the tree has a branch there.
    #[must_use]
    pub fn get(&self, path: &CanonicalPath) -> Option<&TreeNode> {
        path.segments()
            .try_fold(&self.root, |node, segment| node.children.get(segment))
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Fill missing titles and report placeholder branches absent from `index`.
    ///
    /// Every node below the root without a title gets its segment key,
    /// capitalized. If that node's slug is not in `index`, a
    /// [`MissingBackingPage`] diagnostic is emitted for it.
    pub fn resolve_titles(&mut self, index: &SiteIndex) -> Vec<MissingBackingPage> {
        let mut missing = Vec::new();
        self.root.resolve_titles(index, &mut missing);
        missing
    }

    /// Convert to the ordered-array form (children of the root).
    #[must_use]
    pub fn to_ordered(&self) -> Vec<NavNode> {
        self.root.children.values().map(NavNode::from).collect()
    }

    /// Node reached by descending through the segments of `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PrefixNotFound`] if some segment has no matching child.
    pub fn find_prefix(&self, prefix: &str) -> Result<&TreeNode, TreeError> {
        let path = CanonicalPath::new(prefix);
        self.get(&path).ok_or_else(|| TreeError::PrefixNotFound {
            prefix: path.to_string(),
        })
    }

    /// Children of the node reached by descending through `prefix`.
    ///
    /// The root prefix (`/` or empty) returns the whole ordered tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::PrefixNotFound`] if no branch matches.
    pub fn filter_by_prefix(&self, prefix: &str) -> Result<Vec<NavNode>, TreeError> {
        let node = self.find_prefix(prefix)?;
        Ok(node.children.values().map(NavNode::from).collect())
    }
}

/// Uppercase the first character, leave the rest unchanged.
pub(crate) fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
