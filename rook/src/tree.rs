//! Ordered property tree for structured command results.
//!
//! Commands that produce structured output build one of these per
//! invocation and hand it to the output formatter. Child order is
//! insertion order and is preserved across JSON round trips.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A recursive result node: a scalar string or an ordered list of
/// key/child pairs. Duplicate keys are permitted and kept in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyTree {
    /// A leaf value.
    Scalar(String),
    /// An ordered mapping from key to child tree.
    Node(Vec<(String, PropertyTree)>),
}

impl PropertyTree {
    /// Create a leaf from anything displayable.
    pub fn scalar(value: impl fmt::Display) -> Self {
        Self::Scalar(value.to_string())
    }

    /// Create an empty interior node.
    #[must_use]
    pub const fn node() -> Self {
        Self::Node(Vec::new())
    }

    /// Append a child, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, child: PropertyTree) -> Self {
        self.push(key, child);
        self
    }

    /// Append a scalar child, builder style.
    #[must_use]
    pub fn with_value(self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.with(key, Self::scalar(value))
    }

    /// Append a child in place.
    ///
    /// # Panics
    ///
    /// Panics if called on a scalar; interior nodes are always built
    /// with [`PropertyTree::node`] before children are attached.
    pub fn push(&mut self, key: impl Into<String>, child: PropertyTree) {
        match self {
            Self::Node(children) => children.push((key.into(), child)),
            Self::Scalar(_) => panic!("cannot attach a child to a scalar node"),
        }
    }

    /// First child under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyTree> {
        match self {
            Self::Node(children) => children
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, child)| child),
            Self::Scalar(_) => None,
        }
    }

    /// The scalar value of this node, if it is a leaf.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    /// Children of this node; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[(String, PropertyTree)] {
        match self {
            Self::Node(children) => children,
            Self::Scalar(_) => &[],
        }
    }

    /// Leaf scalars in document order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Scalar(value) => out.push(value),
            Self::Node(children) => {
                for (_, child) in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

impl Serialize for PropertyTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(value) => serializer.serialize_str(value),
            Self::Node(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for (key, child) in children {
                    map.serialize_entry(key, child)?;
                }
                map.end()
            }
        }
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = PropertyTree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or an object")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(PropertyTree::Scalar(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(PropertyTree::Scalar(value))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut children = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, child)) = access.next_entry::<String, PropertyTree>()? {
            children.push((key, child));
        }
        Ok(PropertyTree::Node(children))
    }
}

impl<'de> Deserialize<'de> for PropertyTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TreeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let tree = PropertyTree::node()
            .with_value("zulu", "1")
            .with_value("alpha", "2");
        let keys: Vec<_> = tree.children().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["zulu", "alpha"]);
    }

    #[test]
    fn test_get_returns_first_match() {
        let tree = PropertyTree::node()
            .with_value("k", "first")
            .with_value("k", "second");
        assert_eq!(tree.get("k").and_then(PropertyTree::as_scalar), Some("first"));
    }

    #[test]
    fn test_leaves_in_document_order() {
        let tree = PropertyTree::node()
            .with(
                "outer",
                PropertyTree::node()
                    .with_value("a", "1")
                    .with_value("b", "2"),
            )
            .with_value("c", "3");
        assert_eq!(tree.leaves(), ["1", "2", "3"]);
    }
}
