//! Page input records and the immutable [`PageNode`] built from them.
//!
//! Content discovery and front matter extraction happen outside the engine.
//! The collaborator hands over a [`SiteInput`]: every known slug plus
//! per-page metadata.

use serde::{Deserialize, Serialize};

use crate::link::CanonicalPath;

/// Per-page metadata supplied by the content layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInput {
    /// Path-like slug as authored (e.g., `/courses/cs1675/`, `/about/index`).
    pub slug: String,
    /// Front matter title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Outgoing links, only present when link extraction ran.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl PageInput {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.links = links.into_iter().map(Into::into).collect();
        self
    }
}

/// Snapshot of everything the engine needs for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInput {
    /// Every known destination slug.
    #[serde(default)]
    pub slugs: Vec<String>,
    /// Per-page metadata.
    #[serde(default)]
    pub pages: Vec<PageInput>,
}

impl SiteInput {
    /// Append manually registered virtual pages (e.g., an about page) to the slug list.
    #[must_use]
    pub fn with_virtual_pages<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slugs.extend(slugs.into_iter().map(Into::into));
        self
    }
}

/// One content page, immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageNode {
    /// Canonical path without leading slash (e.g., `"courses/cs1675/"`).
    pub id: String,
    /// Slug as authored.
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub links: Vec<String>,
    /// Slug named an `index` page explicitly (e.g., `/courses/index`).
    pub is_index_page: bool,
}

impl PageNode {
    #[must_use]
    pub fn from_input(input: &PageInput) -> Self {
        let path = CanonicalPath::new(&input.slug);
        Self {
            id: path.id().to_owned(),
            slug: input.slug.clone(),
            title: input.title.clone(),
            links: input.links.clone(),
            is_index_page: is_index_slug(&input.slug),
        }
    }

    /// Canonical path of this page.
    #[must_use]
    pub fn path(&self) -> CanonicalPath {
        CanonicalPath::new(&format!("/{}", self.id))
    }
}

/// Whether the last non-empty segment of `slug` is `index`.
fn is_index_slug(slug: &str) -> bool {
    slug.split('/')
        .rfind(|segment| !segment.is_empty())
        .is_some_and(|segment| segment.eq_ignore_ascii_case("index"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_sets_id_without_leading_slash() {
        let node = PageNode::from_input(&PageInput::new("/Courses/CS1675").with_title("CS 1675"));

        assert_eq!(node.id, "courses/cs1675/");
        assert_eq!(node.slug, "/Courses/CS1675");
        assert_eq!(node.title.as_deref(), Some("CS 1675"));
        assert!(!node.is_index_page);
    }

    #[test]
    fn test_from_input_detects_index_page() {
        let node = PageNode::from_input(&PageInput::new("/courses/index"));

        assert_eq!(node.id, "courses/");
        assert!(node.is_index_page);
    }

    #[test]
    fn test_from_input_detects_index_page_with_trailing_slash() {
        assert!(PageNode::from_input(&PageInput::new("/courses/Index/")).is_index_page);
        assert!(!PageNode::from_input(&PageInput::new("/reindex")).is_index_page);
    }

    #[test]
    fn test_root_page_has_empty_id() {
        let node = PageNode::from_input(&PageInput::new("/"));

        assert_eq!(node.id, "");
        assert_eq!(node.path(), CanonicalPath::root());
    }

    #[test]
    fn test_path_round_trips_through_id() {
        let node = PageNode::from_input(&PageInput::new("/a/b"));

        assert_eq!(node.path().as_str(), "/a/b/");
    }

    #[test]
    fn test_with_virtual_pages_appends_slugs() {
        let input = SiteInput {
            slugs: vec!["/a/".to_owned()],
            pages: Vec::new(),
        }
        .with_virtual_pages(["/about/", "/courses/"]);

        assert_eq!(input.slugs, vec!["/a/", "/about/", "/courses/"]);
    }

    #[test]
    fn test_page_input_deserializes_without_optional_fields() {
        let input: SiteInput =
            serde_json::from_str(r#"{"slugs": ["/a/"], "pages": [{"slug": "/a/"}]}"#).unwrap();

        assert_eq!(input.pages[0], PageInput::new("/a/"));
        assert!(input.pages[0].links.is_empty());
    }
}
