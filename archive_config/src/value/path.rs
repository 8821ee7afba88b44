//! Canonical, index-bearing node paths.

use std::borrow::Cow;
use std::fmt;

/// One step of a [`Path`]: a map key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal map key.
    Key(String),
    /// Zero-based list index.
    Index(usize),
}

impl Segment {
    /// The segment as a map key. Indexes render as their decimal form.
    #[must_use]
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Self::Key(key) => Cow::Borrowed(key),
            Self::Index(index) => Cow::Owned(index.to_string()),
        }
    }

    /// The segment as a list index, when it is one.
    #[must_use]
    pub const fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(_) => None,
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A `/`-delimited path from the document root, such as `/holdings/0/ciStore`.
///
/// Paths are recomputed by traversal and matched against rule patterns; they
/// are never stored on the tree itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The document root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parses a canonical path string. Purely numeric segments become indexes.
    ///
    /// # Examples
    ///
    /// ```
    /// use archive_config::{Path, Segment};
    ///
    /// let path = Path::parse("/holdings/0/ciStore");
    /// assert_eq!(path.segments()[1], Segment::Index(0));
    /// assert_eq!(path.to_string(), "/holdings/0/ciStore");
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        text.split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                segment
                    .parse::<usize>()
                    .map_or_else(|_| Segment::from(segment), Segment::Index)
            })
            .collect()
    }

    /// Returns a copy extended with a map key.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.child(Segment::Key(key.into()))
    }

    /// Returns a copy extended with a list index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    /// Returns a copy extended with `segment`.
    #[must_use]
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// The segments from the root downwards.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments; zero for the root.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, if this is not the root.
    #[must_use]
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// The enclosing path, if this is not the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.segments
            .split_last()
            .map(|(_, parents)| Self::from(parents.to_vec()))
    }

    /// The first `depth` segments.
    #[must_use]
    pub fn prefix(&self, depth: usize) -> Self {
        Self::from(self.segments.iter().take(depth).cloned().collect::<Vec<_>>())
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment.as_key())?;
        }
        Ok(())
    }
}
