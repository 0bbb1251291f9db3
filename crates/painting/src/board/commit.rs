//! Deferred compositing of completed paths
//!
//! A completed path is not drawn onto the persisted layer right away. It
//! waits [`COMMIT_DELAY`] so the host can finish the frame that ended the
//! gesture; then the active layer is redrawn without it and the path is
//! patched into the persisted layer.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, warn};

use crate::constants::COMMIT_DELAY;
use crate::surface::Surface;
use crate::types::Path;

use super::{Board, BoardError};

#[derive(Debug, Clone)]
struct PendingCommit {
    path: Path,
    due: Instant,
}

/// FIFO of completed paths waiting to be composited
#[derive(Debug, Default)]
pub struct CommitQueue {
    pending: VecDeque<PendingCommit>,
}

impl CommitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `path`, returning when it becomes due
    pub fn schedule(&mut self, path: Path, now: Instant) -> Instant {
        let due = now + COMMIT_DELAY;
        self.pending.push_back(PendingCommit { path, due });
        due
    }

    /// Remove and return every path due at `now`, in completion order.
    ///
    /// Stops at the first path that is not yet due.
    pub fn pop_due(&mut self, now: Instant) -> Vec<Path> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|p| p.due <= now) {
            if let Some(commit) = self.pending.pop_front() {
                due.push(commit.path);
            }
        }
        due
    }

    /// Remove every pending path regardless of due time
    pub fn drain(&mut self) -> Vec<Path> {
        self.pending.drain(..).map(|p| p.path).collect()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.front().map(|p| p.due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending path
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<S: Surface> Board<S> {
    /// Composite every completed path due at `now`.
    ///
    /// For each path the active layer is cleared and redrawn, then the path
    /// is drawn onto the persisted layer and change listeners are notified.
    /// Returns the number of paths composited.
    pub fn run_due_commits(&mut self, now: Instant) -> Result<usize, BoardError> {
        if self.torn_down {
            if !self.commits.is_empty() {
                warn!("Dropping {} commits queued after teardown", self.commits.len());
                self.commits.clear();
            }
            return Ok(0);
        }
        let due = self.commits.pop_due(now);
        self.commit_all(due)
    }

    /// Composite every pending path immediately
    pub fn flush_commits(&mut self) -> Result<usize, BoardError> {
        if self.torn_down {
            return Ok(0);
        }
        let pending = self.commits.drain();
        self.commit_all(pending)
    }

    /// Composite `paths` in order.
    ///
    /// A path that fails to draw does not stop the ones after it; the first
    /// error is returned once every path has been tried.
    fn commit_all(&mut self, paths: Vec<Path>) -> Result<usize, BoardError> {
        let mut committed = 0;
        let mut first_error = None;
        for path in paths {
            let result = self
                .draw_active(true)
                .and_then(|()| self.patch(&path));
            match result {
                Ok(()) => committed += 1,
                Err(e) => {
                    warn!("Failed to commit {:?} path: {}", path.kind(), e);
                    first_error.get_or_insert(e);
                }
            }
        }
        if committed > 0 {
            debug!("Committed {} paths, {} still pending", committed, self.commits.len());
        }
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(committed),
        }
    }

    /// Completed paths not yet composited
    pub fn pending_commits(&self) -> usize {
        self.commits.len()
    }

    /// When the oldest pending commit becomes due
    pub fn next_commit_due(&self) -> Option<Instant> {
        self.commits.next_due()
    }

    /// Cancel pending commits and stop accepting input.
    ///
    /// Paths already on the paint stack stay there; only their compositing
    /// is skipped.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        debug!(
            "Tearing down board: {} pending commits, {} active paths",
            self.commits.len(),
            self.active.len()
        );
        self.commits.clear();
        self.active.clear();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
