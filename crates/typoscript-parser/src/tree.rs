//! Configuration tree addressed by dotted keys
//!
//! Every node carries an optional scalar value and an ordered map of child
//! nodes, so `page = PAGE` and `page.10 = TEXT` can coexist. Keys are split
//! with [`parse_next_key_segment`](crate::key::parse_next_key_segment) and
//! therefore honour `\.` escapes.

use crate::error::{ParseError, Result};
use crate::key::split_key_path;
use crate::modifier::ModifierEngine;
use indexmap::IndexMap;
use serde::Serialize;

/// A node of the configuration tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigNode {
    /// Scalar value assigned with `=`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Child nodes in insertion order
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, ConfigNode>,
}

impl ConfigNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            children: IndexMap::new(),
        }
    }

    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Render as a classic setup array: `key` holds the value and `key.`
    /// holds the children.
    pub fn to_setup_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (name, child) in &self.children {
            if let Some(value) = &child.value {
                map.insert(name.clone(), serde_json::Value::String(value.clone()));
            }
            if !child.children.is_empty() {
                map.insert(format!("{}.", name), child.to_setup_json());
            }
        }
        serde_json::Value::Object(map)
    }
}

/// Configuration tree built by the TypoScript parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigTree {
    root: ConfigNode,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &ConfigNode {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    fn segments(path: &str) -> Result<Vec<String>> {
        let path = path.trim();
        if path.is_empty() {
            return Err(ParseError::InvalidPath(path.to_string()));
        }
        let segments = split_key_path(path);
        if segments.iter().any(String::is_empty) {
            return Err(ParseError::InvalidPath(path.to_string()));
        }
        Ok(segments)
    }

    fn node_mut_or_create(&mut self, segments: &[String]) -> &mut ConfigNode {
        let mut node = &mut self.root;
        for segment in segments {
            node = node.children.entry(segment.clone()).or_default();
        }
        node
    }

    /// Node at `path`, if any
    pub fn node(&self, path: &str) -> Option<&ConfigNode> {
        let segments = Self::segments(path).ok()?;
        let mut node = &self.root;
        for segment in &segments {
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    /// Scalar value at `path`, if any
    pub fn value(&self, path: &str) -> Option<&str> {
        self.node(path).and_then(|node| node.value.as_deref())
    }

    /// Assign a scalar value, creating intermediate nodes
    pub fn set_value(&mut self, path: &str, value: impl Into<String>) -> Result<()> {
        let segments = Self::segments(path)?;
        self.node_mut_or_create(&segments).value = Some(value.into());
        Ok(())
    }

    /// Remove the node at `path` with its value and children
    ///
    /// Returns whether anything was removed.
    pub fn unset(&mut self, path: &str) -> Result<bool> {
        let segments = Self::segments(path)?;
        let (last, parents) = match segments.split_last() {
            Some(split) => split,
            None => return Ok(false),
        };

        let mut node = &mut self.root;
        for segment in parents {
            node = match node.children.get_mut(segment) {
                Some(child) => child,
                None => return Ok(false),
            };
        }
        Ok(node.children.shift_remove(last).is_some())
    }

    /// Replace the node at `to` with a copy of the node at `from`
    ///
    /// A missing source leaves an empty node at the target. Returns whether
    /// the source existed.
    pub fn copy(&mut self, from: &str, to: &str) -> Result<bool> {
        let source = self.node(from).cloned();
        let found = source.is_some();
        let target_segments = Self::segments(to)?;
        *self.node_mut_or_create(&target_segments) = source.unwrap_or_default();
        Ok(found)
    }

    /// Run a value modifier on the scalar value at `path` and store the result
    pub fn modify(
        &mut self,
        path: &str,
        modifiers: &ModifierEngine,
        name: &str,
        argument: &str,
    ) -> Result<String> {
        let segments = Self::segments(path)?;
        let node = self.node_mut_or_create(&segments);
        let current = node.value.as_deref().unwrap_or("");
        let modified = modifiers.apply(name, argument, current);
        node.value = Some(modified.clone());
        Ok(modified)
    }

    /// Render the whole tree as a classic setup array
    pub fn to_setup_json(&self) -> serde_json::Value {
        self.root.to_setup_json()
    }
}
