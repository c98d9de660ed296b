//! Site graph engine.
//!
//! Turns a flat collection of content pages into:
//! - A hierarchical navigation tree mirroring slug path segments
//! - A complete list of link integrity issues
//!
//! The engine is pure: it performs no I/O and keeps no state between runs.
//! Content discovery and front matter extraction belong to the caller, which
//! supplies a [`SiteInput`] snapshot.
//!
//! # Quick Start
//!
//! ```
//! use sitegraph_engine::{IssueKind, PageInput, SiteInput, build};
//!
//! let input = SiteInput {
//!     slugs: vec!["/courses/cs1675/".to_owned()],
//!     pages: vec![
//!         PageInput::new("/courses/cs1675/")
//!             .with_title("Intro to Machine Learning")
//!             .with_links(["/about/", "#grading"]),
//!     ],
//! }
//! .with_virtual_pages(["/about/"]);
//!
//! let site = build(&input);
//!
//! // `/courses/` only exists as an ancestor of the course page
//! let kinds: Vec<_> = site.issues.iter().map(|i| i.kind()).collect();
//! assert_eq!(kinds, vec![IssueKind::MissingBackingPage]);
//! assert_eq!(site.tree.root().children["courses"].title.as_deref(), Some("Courses"));
//! ```

mod index;
pub mod link;
mod navigation;
mod page;
mod report;
mod site;
mod tree;
mod validate;

pub use index::SiteIndex;
pub use link::{CanonicalPath, LinkError, LinkKind, canonicalize, classify, resolve};
pub use navigation::{NavItem, NavOptions, navigation};
pub use page::{PageInput, PageNode, SiteInput};
pub use report::{
    BROKEN_LINK_MESSAGE, Issue, IssueKind, LinkErrorKind, MISSING_BACKING_PAGE_MESSAGE,
    MissingBackingPage, ValidationError,
};
pub use site::{BuildOutput, SiteBuild, build};
pub use tree::{NavNode, PageRef, SiteTree, TreeError, TreeNode};
pub use validate::validate;
