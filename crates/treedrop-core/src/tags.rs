#![forbid(unsafe_code)]

//! Type tags for drag payload compatibility.
//!
//! A draggable advertises one or more [`DraggableType`]s; a droppable
//! declares the tag keys it accepts as a [`TypeSet`]. Compatibility is a
//! plain data check: the two sets must intersect.

use std::collections::BTreeSet;
use std::fmt;

/// A type tag carried by a draggable.
///
/// `key` is the tag matched against droppables; `value` is optional data
/// written into the drag transfer under the tag (defaults to `"true"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DraggableType {
    /// Tag key, e.g. `"task"`.
    pub key: String,
    /// Optional tag payload.
    pub value: Option<String>,
}

impl DraggableType {
    /// A tag with no value.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// A tag with a value.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

impl From<&str> for DraggableType {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// An ordered set of type tag keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypeSet {
    tags: BTreeSet<String>,
}

impl TypeSet {
    /// The empty set. Accepts nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace separated list (`"task column"`).
    #[must_use]
    pub fn parse(list: &str) -> Self {
        list.split_whitespace().collect()
    }

    /// Tag keys of a draggable's types.
    #[must_use]
    pub fn of_types(types: &[DraggableType]) -> Self {
        types.iter().map(|t| t.key.as_str()).collect()
    }

    /// Add a tag. Returns false if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Whether `tag` is in the set.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Compatibility check: true iff the sets share at least one tag.
    #[must_use]
    pub fn is_compatible(&self, other: &TypeSet) -> bool {
        // Iterate the smaller set.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|tag| large.contains(tag))
    }

    /// Space separated attribute form, e.g. for `data-accepts`.
    #[must_use]
    pub fn to_attribute(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for TypeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_attribute())
    }
}
