/// Stack of per-level elements from the root down to the current component.
///
/// Levels whose visitor returned no element (files, typically) still occupy
/// a slot so that [`Path::parent_mut`] always addresses the direct parent.
#[derive(Debug)]
pub struct Path<T> {
    levels: Vec<Option<T>>,
}

impl<T> Path<T> {
    pub(crate) fn new() -> Self {
        Self { levels: Vec::new() }
    }

    pub(crate) fn push(&mut self, element: Option<T>) {
        self.levels.push(element);
    }

    pub(crate) fn pop(&mut self) -> Option<Option<T>> {
        self.levels.pop()
    }

    /// Element of the component being visited.
    pub fn current(&self) -> Option<&T> {
        self.levels.last().and_then(Option::as_ref)
    }

    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.levels.last_mut().and_then(Option::as_mut)
    }

    /// Element of the parent of the component being visited, `None` at the
    /// root.
    pub fn parent(&self) -> Option<&T> {
        self.parent_index()
            .and_then(|index| self.levels[index].as_ref())
    }

    pub fn parent_mut(&mut self) -> Option<&mut T> {
        self.parent_index()
            .and_then(|index| self.levels[index].as_mut())
    }

    pub fn root(&self) -> Option<&T> {
        self.levels.first().and_then(Option::as_ref)
    }

    pub fn is_root(&self) -> bool {
        self.levels.len() == 1
    }

    /// Number of open levels, the current component included.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    fn parent_index(&self) -> Option<usize> {
        self.levels.len().checked_sub(2)
    }
}
