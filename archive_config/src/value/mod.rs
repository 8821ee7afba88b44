//! Semi-structured tree model for configuration documents.
//!
//! A document is a [`Value`]: a map, a list or a scalar. Scalars are strings,
//! booleans or an explicit null. Absence is never encoded as a value; lookups
//! return `None` for a missing node and `Some(Value::Scalar(Scalar::Null))` for
//! an explicit null, and the passes treat the two differently.

mod mapping;
mod path;
mod serde_impl;
mod visit;

pub use mapping::Mapping;
pub use path::{Path, Segment};

use crate::error::{ConfigError, ConfigResult};

/// A scalar leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// Any textual value. Numbers are carried as their textual form.
    String(String),
    /// A boolean.
    Bool(bool),
    /// An explicit null.
    Null,
}

/// A node of a configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Mapping from unique string keys to values.
    Map(Mapping),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Leaf value.
    Scalar(Scalar),
}

impl Default for Value {
    fn default() -> Self {
        Self::Map(Mapping::new())
    }
}

impl Value {
    /// An explicit null.
    #[must_use]
    pub const fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// A string scalar.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(text.into()))
    }

    /// Describes the variant for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Map(_) => "map",
            Self::List(_) => "list",
            Self::Scalar(Scalar::String(_)) => "string",
            Self::Scalar(Scalar::Bool(_)) => "boolean",
            Self::Scalar(Scalar::Null) => "null",
        }
    }

    /// Returns `true` for an explicit null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    /// Borrows the mapping when this node is a map.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Mutably borrows the mapping when this node is a map.
    pub const fn as_map_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrows the items when this node is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Mutably borrows the items when this node is a list.
    pub const fn as_list_mut(&mut self) -> Option<&mut Vec<Self>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrows the text of a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(text)) => Some(text),
            _ => None,
        }
    }

    /// Reads a boolean scalar. The strings `true` and `false` are coerced.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(Scalar::Bool(flag)) => Some(*flag),
            Self::Scalar(Scalar::String(text)) => text.parse().ok(),
            _ => None,
        }
    }

    /// Renders a scalar as text: strings verbatim, booleans as `true`/`false`.
    /// Null and containers have no textual form.
    #[must_use]
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Self::Scalar(Scalar::String(text)) => Some(text.clone()),
            Self::Scalar(Scalar::Bool(flag)) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Navigates to the node at `path`.
    ///
    /// Returns `Ok(None)` when a map key or list index is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Structure`] when the path descends into a scalar
    /// or uses a key on a list.
    ///
    /// # Examples
    ///
    /// ```
    /// use archive_config::{Mapping, Path, Value};
    ///
    /// let doc = Value::Map(Mapping::new().with(
    ///     "holdings",
    ///     Value::List(vec![Value::Map(Mapping::new().with("name", "Animals"))]),
    /// ));
    /// let name = doc.get(&Path::parse("/holdings/0/name"))?;
    /// assert_eq!(name.and_then(Value::as_str), Some("Animals"));
    /// assert!(doc.get(&Path::parse("/holdings/1"))?.is_none());
    /// # Ok::<_, archive_config::ConfigError>(())
    /// ```
    pub fn get(&self, path: &Path) -> ConfigResult<Option<&Self>> {
        let mut current = self;
        for (depth, segment) in path.segments().iter().enumerate() {
            let next = match current {
                Self::Map(map) => map.get(&segment.as_key()),
                Self::List(items) => items.get(list_index(path, depth, segment)?),
                Self::Scalar(_) => return Err(descend_into_scalar(path, depth)),
            };
            match next {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Mutable counterpart of [`Value::get`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Structure`] when the path descends into a scalar
    /// or uses a key on a list.
    pub fn get_mut(&mut self, path: &Path) -> ConfigResult<Option<&mut Self>> {
        let mut current = self;
        for (depth, segment) in path.segments().iter().enumerate() {
            let next = match current {
                Self::Map(map) => map.get_mut(&segment.as_key()),
                Self::List(items) => items.get_mut(list_index(path, depth, segment)?),
                Self::Scalar(_) => return Err(descend_into_scalar(path, depth)),
            };
            match next {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Lenient lookup that treats shape mismatches as absence.
    #[must_use]
    pub fn find(&self, path: &Path) -> Option<&Self> {
        self.get(path).ok().flatten()
    }

    /// Stores `value` at `path`, creating intermediate maps and lists.
    ///
    /// A missing intermediate becomes a list when the following segment is an
    /// index and a map otherwise. An index equal to the list length appends.
    /// Returns the replaced node, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Structure`] when the path descends into a scalar,
    /// uses a key on a list, or skips past the end of a list.
    pub fn put(&mut self, path: &Path, value: Self) -> ConfigResult<Option<Self>> {
        let Some((last, parents)) = path.segments().split_last() else {
            return Ok(Some(std::mem::replace(self, value)));
        };
        let mut current = self;
        for (depth, segment) in parents.iter().enumerate() {
            let next_is_index = path
                .segments()
                .get(depth + 1)
                .is_some_and(|next| matches!(next, Segment::Index(_)));
            current = child_or_insert(current, path, depth, segment, || {
                if next_is_index {
                    Self::List(Vec::new())
                } else {
                    Self::Map(Mapping::new())
                }
            })?;
        }
        let depth = parents.len();
        match current {
            Self::Map(map) => Ok(map.insert(last.as_key(), value)),
            Self::List(items) => {
                let index = list_index(path, depth, last)?;
                if index == items.len() {
                    items.push(value);
                    Ok(None)
                } else if let Some(slot) = items.get_mut(index) {
                    Ok(Some(std::mem::replace(slot, value)))
                } else {
                    Err(out_of_bounds(path, depth, items.len()))
                }
            }
            Self::Scalar(_) => Err(descend_into_scalar(path, depth)),
        }
    }

    /// Removes and returns the node at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Structure`] when the path descends into a scalar.
    pub fn remove(&mut self, path: &Path) -> ConfigResult<Option<Self>> {
        let Some(parent_path) = path.parent() else {
            return Err(ConfigError::structure(path.to_string(), "cannot remove the root"));
        };
        let Some(last) = path.last() else {
            return Ok(None);
        };
        match self.get_mut(&parent_path)? {
            Some(Self::Map(map)) => Ok(map.remove(&last.as_key())),
            Some(Self::List(items)) => Ok(last
                .as_index()
                .filter(|index| *index < items.len())
                .map(|index| items.remove(index))),
            Some(Self::Scalar(_)) => Err(descend_into_scalar(path, parent_path.len())),
            None => Ok(None),
        }
    }
}

fn child_or_insert<'a>(
    current: &'a mut Value,
    path: &Path,
    depth: usize,
    segment: &Segment,
    make: impl FnOnce() -> Value,
) -> ConfigResult<&'a mut Value> {
    match current {
        Value::Map(map) => Ok(map.entry_or_insert_with(segment.as_key(), make)),
        Value::List(items) => {
            let index = list_index(path, depth, segment)?;
            let len = items.len();
            if index == len {
                items.push(make());
            }
            items
                .get_mut(index)
                .ok_or_else(|| out_of_bounds(path, depth, len))
        }
        Value::Scalar(_) => Err(descend_into_scalar(path, depth)),
    }
}

fn list_index(path: &Path, depth: usize, segment: &Segment) -> ConfigResult<usize> {
    segment.as_index().ok_or_else(|| {
        ConfigError::structure(
            path.prefix(depth).to_string(),
            format!("cannot use key '{}' on a list", segment.as_key()),
        )
    })
}

fn out_of_bounds(path: &Path, depth: usize, len: usize) -> ConfigError {
    ConfigError::structure(
        path.prefix(depth + 1).to_string(),
        format!("index is past the end of a list of {len} items"),
    )
}

fn descend_into_scalar(path: &Path, depth: usize) -> ConfigError {
    ConfigError::structure(
        path.prefix(depth).to_string(),
        format!("cannot descend into a scalar to reach '{path}'"),
    )
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::string(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::string(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Scalar(Scalar::Bool(flag))
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}
