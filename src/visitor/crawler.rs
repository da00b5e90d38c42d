use super::{Path, PathAwareVisitor};
use crate::core::{Component, ComponentType, Error, Result};

/// When a component is visited relative to its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Component first, then its children.
    PreOrder,
    /// Children (and their whole subtrees) first, then the component.
    PostOrder,
}

/// Depth-first walker driving a [`PathAwareVisitor`].
///
/// Components deeper than `max_depth` are neither visited nor descended
/// into.
#[derive(Debug, Clone, Copy)]
pub struct PathAwareCrawler {
    max_depth: ComponentType,
    order: Order,
}

impl PathAwareCrawler {
    pub fn new(max_depth: ComponentType, order: Order) -> Self {
        Self { max_depth, order }
    }

    /// Walk the tree rooted at `root`. The first visitor error aborts the
    /// walk and is returned; the path state is discarded with it.
    ///
    /// A file with children is a configuration error.
    pub fn visit<V: PathAwareVisitor>(&self, visitor: &mut V, root: &Component) -> Result<()> {
        let mut path = Path::new();
        self.visit_component(visitor, root, &mut path)
    }

    fn visit_component<V: PathAwareVisitor>(
        &self,
        visitor: &mut V,
        component: &Component,
        path: &mut Path<V::Element>,
    ) -> Result<()> {
        if component.component_type().is_deeper_than(self.max_depth) {
            return Ok(());
        }
        // trees coming from serde bypass the constructors
        if component.is_file() && !component.children().is_empty() {
            return Err(Error::configuration(format!(
                "file '{}' has {} children, files must be leaves",
                component.key(),
                component.children().len()
            )));
        }

        let element = if component.is_file() {
            visitor.create_for_file(component)
        } else {
            Some(visitor.create_for_any(component))
        };
        path.push(element);

        if self.order == Order::PreOrder {
            dispatch(visitor, component, path)?;
        }
        for child in component.children() {
            self.visit_component(visitor, child, path)?;
        }
        if self.order == Order::PostOrder {
            dispatch(visitor, component, path)?;
        }

        path.pop();
        Ok(())
    }
}

fn dispatch<V: PathAwareVisitor>(
    visitor: &mut V,
    component: &Component,
    path: &mut Path<V::Element>,
) -> Result<()> {
    match component.component_type() {
        ComponentType::Project => visitor.visit_project(component, path),
        ComponentType::Module => visitor.visit_module(component, path),
        ComponentType::Directory => visitor.visit_directory(component, path),
        ComponentType::File => visitor.visit_file(component, path),
    }
}
