//! Ordered history of finished strokes.

use std::fmt;

use crate::types::Path;

/// Change listener, called with the whole stack and the path just committed
pub type ChangeListener = Box<dyn Fn(&[Path], &Path) + Send + Sync>;

/// Append-only (per session) sequence of persisted paths.
///
/// Later paths draw over earlier ones. The whole sequence can be swapped
/// out when the host supplies new data.
#[derive(Default)]
pub struct PaintStack {
    paths: Vec<Path>,
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for PaintStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaintStack")
            .field("path_count", &self.paths.len())
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl PaintStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths(paths: Vec<Path>) -> Self {
        Self {
            paths,
            listeners: Vec::new(),
        }
    }

    /// Append a finished path
    pub fn push(&mut self, path: Path) {
        self.paths.push(path);
    }

    /// Swap in a new history, returning the old one. Listeners are kept.
    pub fn replace(&mut self, paths: Vec<Path>) -> Vec<Path> {
        std::mem::replace(&mut self.paths, paths)
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn last(&self) -> Option<&Path> {
        self.paths.last()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.paths.iter()
    }

    /// Register a change listener
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&[Path], &Path) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Tell every listener that `path` was committed
    pub fn notify(&self, path: &Path) {
        for listener in &self.listeners {
            listener(&self.paths, path);
        }
    }
}

impl<'a> IntoIterator for &'a PaintStack {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
