//! Component tree: the in-memory project/module/directory/file hierarchy that
//! formulas are executed over.
//!
//! The tree is built by the caller and never mutated by the executor. Files
//! are constructed without children. Deserialized trees can still carry a
//! file with children; the crawler rejects those.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a node in the component tree.
///
/// The ordering follows depth: a project contains modules, a module contains
/// directories, a directory contains files. `ComponentType::File` is the
/// deepest type and is used as the default crawler depth limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Project,
    Module,
    Directory,
    File,
}

impl ComponentType {
    /// Whether components of this type are deeper than `limit`.
    pub fn is_deeper_than(self, limit: ComponentType) -> bool {
        self > limit
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => write!(f, "PROJECT"),
            Self::Module => write!(f, "MODULE"),
            Self::Directory => write!(f, "DIRECTORY"),
            Self::File => write!(f, "FILE"),
        }
    }
}

/// A node of the component tree.
///
/// `key` identifies the component and is used by measure repositories to key
/// measures, so it must be unique within one tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    key: String,
    name: String,
    component_type: ComponentType,
    children: Vec<Component>,
}

impl Component {
    fn new(component_type: ComponentType, key: impl Into<String>, children: Vec<Component>) -> Self {
        let key = key.into();
        let name = key
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(&key)
            .to_string();
        Self {
            key,
            name,
            component_type,
            children,
        }
    }

    pub fn project(key: impl Into<String>, children: Vec<Component>) -> Self {
        Self::new(ComponentType::Project, key, children)
    }

    pub fn module(key: impl Into<String>, children: Vec<Component>) -> Self {
        Self::new(ComponentType::Module, key, children)
    }

    pub fn directory(key: impl Into<String>, children: Vec<Component>) -> Self {
        Self::new(ComponentType::Directory, key, children)
    }

    pub fn file(key: impl Into<String>) -> Self {
        Self::new(ComponentType::File, key, Vec::new())
    }

    /// Override the display name derived from the key.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn is_file(&self) -> bool {
        self.component_type == ComponentType::File
    }

    /// Children in tree order. Always empty for files.
    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Pre-order iterator over this component and all its descendants.
    pub fn iter(&self) -> ComponentIter<'_> {
        ComponentIter { stack: vec![self] }
    }

    /// Find a component by key in this subtree.
    pub fn find(&self, key: &str) -> Option<&Component> {
        self.iter().find(|component| component.key == key)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.component_type, self.key)
    }
}

/// Pre-order iterator returned by [`Component::iter`].
pub struct ComponentIter<'a> {
    stack: Vec<&'a Component>,
}

impl<'a> Iterator for ComponentIter<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}
