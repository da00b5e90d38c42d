//! Depth-first component tree walking with a per-level element stack.
//!
//! A [`PathAwareVisitor`] gets, for every visited node, a [`Path`] holding
//! one element per ancestor currently open plus one for the node itself.
//! Elements are created when a node is entered and dropped once the node
//! and its subtree are done, so state attached to a level is only reachable
//! while that level is open.

pub mod crawler;
pub mod path;

pub use crawler::{Order, PathAwareCrawler};
pub use path::Path;

use crate::core::{Component, Result};

/// Visitor receiving the path of per-level elements from the root to the
/// visited component.
pub trait PathAwareVisitor {
    type Element;

    /// Element for a project, module or directory.
    fn create_for_any(&mut self, component: &Component) -> Self::Element;

    /// Element for a file. Visitors that never accumulate anything below a
    /// file return `None`.
    fn create_for_file(&mut self, file: &Component) -> Option<Self::Element> {
        Some(self.create_for_any(file))
    }

    fn visit_project(&mut self, project: &Component, path: &mut Path<Self::Element>) -> Result<()> {
        self.visit_any(project, path)
    }

    fn visit_module(&mut self, module: &Component, path: &mut Path<Self::Element>) -> Result<()> {
        self.visit_any(module, path)
    }

    fn visit_directory(
        &mut self,
        directory: &Component,
        path: &mut Path<Self::Element>,
    ) -> Result<()> {
        self.visit_any(directory, path)
    }

    fn visit_file(&mut self, file: &Component, path: &mut Path<Self::Element>) -> Result<()> {
        self.visit_any(file, path)
    }

    /// Fallback for every `visit_*` method that is not overridden.
    fn visit_any(&mut self, _component: &Component, _path: &mut Path<Self::Element>) -> Result<()> {
        Ok(())
    }
}
