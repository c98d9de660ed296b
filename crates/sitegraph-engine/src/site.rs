//! One build run over a [`SiteInput`] snapshot.
//!
//! # Data Flow
//!
//! - The [`SiteIndex`] and the flat [`PageNode`] list come from the same input
//! - The tree is built from the page list, then titles are resolved against the index
//! - Link validation reads the page list and the index, never the tree
//!
//! Tree building and validation share no mutable state and run concurrently
//! via `rayon::join`.

use std::time::Instant;

use serde::Serialize;

use crate::index::SiteIndex;
use crate::page::{PageNode, SiteInput};
use crate::report::Issue;
use crate::tree::{NavNode, SiteTree};
use crate::validate::validate;

/// Everything derived from one input snapshot.
#[derive(Clone, Debug)]
pub struct SiteBuild {
    /// Flat page list, same cardinality and order as the input pages.
    pub nodes: Vec<PageNode>,
    pub index: SiteIndex,
    /// Tree with titles resolved.
    pub tree: SiteTree,
    /// Link errors in page and link order, then missing-page diagnostics in tree order.
    pub issues: Vec<Issue>,
}

/// Serializable output handed to rendering and CI consumers.
#[derive(Clone, Debug, Serialize)]
pub struct BuildOutput<'a> {
    pub nodes: &'a [PageNode],
    pub tree: Vec<NavNode>,
    pub errors: &'a [Issue],
}

impl SiteBuild {
    #[must_use]
    pub fn output(&self) -> BuildOutput<'_> {
        BuildOutput {
            nodes: &self.nodes,
            tree: self.tree.to_ordered(),
            errors: &self.issues,
        }
    }

    /// Whether the page set is fully internally consistent.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Run the engine over `input`.
#[must_use]
pub fn build(input: &SiteInput) -> SiteBuild {
    let start = Instant::now();

    let index = SiteIndex::build(&input.slugs);
    let nodes: Vec<PageNode> = input.pages.iter().map(PageNode::from_input).collect();

    let ((tree, missing), link_errors) = rayon::join(
        || {
            let mut tree = SiteTree::build(&nodes);
            let missing = tree.resolve_titles(&index);
            (tree, missing)
        },
        || validate(&nodes, &index),
    );

    let issues: Vec<Issue> = link_errors
        .into_iter()
        .map(Issue::Link)
        .chain(missing.into_iter().map(Issue::MissingBackingPage))
        .collect();

    tracing::info!(
        page_count = nodes.len(),
        slug_count = index.len(),
        node_count = tree.node_count(),
        issue_count = issues.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Site graph built"
    );

    SiteBuild {
        nodes,
        index,
        tree,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::page::PageInput;
    use crate::report::IssueKind;

    #[test]
    fn test_build_consistent_site_is_clean() {
        let input = SiteInput {
            slugs: vec!["/a/".to_owned(), "/a/b/".to_owned()],
            pages: vec![
                PageInput::new("/a/").with_title("A").with_links(["/a/b/"]),
                PageInput::new("/a/b/").with_title("B").with_links(["/a/", "#top"]),
            ],
        };

        let build = build(&input);

        assert!(build.is_clean());
        assert_eq!(build.nodes.len(), 2);
        let a = &build.tree.root().children["a"];
        assert_eq!(a.children.keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_build_collects_every_issue_kind() {
        let input = SiteInput {
            slugs: vec!["/a/b/".to_owned()],
            pages: vec![
                PageInput::new("/a/b/")
                    .with_title("B")
                    .with_links(["./c", "/missing-page/", "www.example.com"]),
            ],
        };

        let build = build(&input);

        let kinds: Vec<_> = build.issues.iter().map(Issue::kind).collect();
        assert_eq!(
            kinds,
            vec![
                IssueKind::MalformedLink,
                IssueKind::BrokenLink,
                IssueKind::MissingBackingPage,
            ]
        );
        assert_eq!(build.issues[2].path().as_str(), "/a/");
    }

    #[test]
    fn test_virtual_pages_join_the_index() {
        let input = SiteInput {
            slugs: vec!["/courses/cs1675/".to_owned()],
            pages: vec![
                PageInput::new("/courses/cs1675/")
                    .with_title("ML")
                    .with_links(["/about/", "/courses/"]),
            ],
        }
        .with_virtual_pages(["/about/", "/courses/"]);

        let build = build(&input);

        assert!(build.is_clean());
    }

    #[test]
    fn test_output_serializes_contract() {
        let input = SiteInput {
            slugs: vec!["/a/".to_owned()],
            pages: vec![PageInput::new("/a/").with_title("A")],
        };
        let build = build(&input);

        let json = serde_json::to_value(build.output()).unwrap();

        assert_eq!(json["nodes"][0]["id"], "a/");
        assert_eq!(json["tree"][0]["title"], "A");
        assert_eq!(json["tree"][0]["children"], serde_json::json!([]));
        assert_eq!(json["errors"], serde_json::json!([]));
    }
}
