//! Closed set of valid navigation destinations.

use std::collections::BTreeSet;

use crate::link::CanonicalPath;

/// Canonical paths considered valid internal link targets.
///
/// Built once per run from every known slug (content pages plus manually
/// registered virtual pages) and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteIndex {
    paths: BTreeSet<CanonicalPath>,
}

impl SiteIndex {
    /// Build an index by canonicalizing every slug.
    pub fn build<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        slugs
            .into_iter()
            .map(|slug| CanonicalPath::new(slug.as_ref()))
            .collect()
    }

    #[must_use]
    pub fn contains(&self, path: &CanonicalPath) -> bool {
        self.paths.contains(path)
    }

    /// Canonicalize `raw` and check membership.
    #[must_use]
    pub fn contains_raw(&self, raw: &str) -> bool {
        self.contains(&CanonicalPath::new(raw))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalPath> {
        self.paths.iter()
    }
}

impl FromIterator<CanonicalPath> for SiteIndex {
    fn from_iter<T: IntoIterator<Item = CanonicalPath>>(iter: T) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}
