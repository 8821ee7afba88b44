//! Traversal helpers enumerating `(path, node)` pairs.

use regex::Regex;

use super::{Path, Value};

impl Value {
    /// Every node below this one, depth first, parents before children.
    ///
    /// The receiver itself is not included.
    #[must_use]
    pub fn descendants(&self) -> Vec<(Path, &Self)> {
        let mut found = Vec::new();
        collect(self, &Path::root(), &mut found);
        found
    }

    /// Paths of the descendants accepted by `predicate`, in traversal order.
    pub fn paths_where<F>(&self, mut predicate: F) -> Vec<Path>
    where
        F: FnMut(&Path, &Self) -> bool,
    {
        self.descendants()
            .into_iter()
            .filter_map(|(path, node)| predicate(&path, node).then_some(path))
            .collect()
    }

    /// Paths of the descendants whose canonical form matches `pattern`.
    ///
    /// Patterns are expected to be anchored; see [`crate::rules`].
    #[must_use]
    pub fn paths_matching(&self, pattern: &Regex) -> Vec<Path> {
        self.paths_where(|path, _| pattern.is_match(&path.to_string()))
    }

    /// Paths of the map descendants whose canonical form matches `pattern`.
    #[must_use]
    pub fn maps_matching(&self, pattern: &Regex) -> Vec<Path> {
        self.paths_where(|path, node| {
            matches!(node, Self::Map(_)) && pattern.is_match(&path.to_string())
        })
    }
}

fn collect<'a>(node: &'a Value, path: &Path, found: &mut Vec<(Path, &'a Value)>) {
    match node {
        Value::Map(map) => {
            for (key, child) in map.iter() {
                let child_path = path.key(key);
                found.push((child_path.clone(), child));
                collect(child, &child_path, found);
            }
        }
        Value::List(items) => {
            for (index, child) in items.iter().enumerate() {
                let child_path = path.index(index);
                found.push((child_path.clone(), child));
                collect(child, &child_path, found);
            }
        }
        Value::Scalar(_) => {}
    }
}
