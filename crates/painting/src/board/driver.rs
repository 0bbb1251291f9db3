//! Tokio driver for a shared board
//!
//! Wraps a [`Board`] in a mutex and schedules each deferred commit as a
//! timer task, so hosts only forward events.

use std::sync::{Arc, Mutex, MutexGuard};

use quill_ipc::RawEvent;
use tokio::task::JoinSet;
use tokio::time::{self, Instant};
use tracing::{error, warn};

use crate::constants::COMMIT_DELAY;
use crate::surface::Surface;
use crate::types::Path;

use super::{Board, BoardError};

pub struct BoardDriver<S: Surface> {
    board: Arc<Mutex<Board<S>>>,
    tasks: Mutex<JoinSet<()>>,
}

impl<S> BoardDriver<S>
where
    S: Surface + Send + 'static,
{
    pub fn new(board: Board<S>) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// Lock the board for direct access
    pub fn lock(&self) -> MutexGuard<'_, Board<S>> {
        self.board.lock().expect("Board lock poisoned")
    }

    pub fn board(&self) -> Arc<Mutex<Board<S>>> {
        Arc::clone(&self.board)
    }

    /// Feed a raw input event and schedule a commit timer for every path it
    /// completed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn handle_event(&self, event: &mut RawEvent) -> Result<Vec<Path>, BoardError> {
        let now = Instant::now();
        let (result, scheduled) = {
            let mut board = self.lock();
            let before = board.pending_commits();
            let result = board.handle_event_at(event, now.into_std());
            (result, board.pending_commits().saturating_sub(before))
        };

        // Paths completed alongside a failing record still need their timer
        if scheduled > 0 {
            let due = now + COMMIT_DELAY;
            let mut tasks = self.tasks.lock().expect("Task set lock poisoned");
            for _ in 0..scheduled {
                let board = Arc::clone(&self.board);
                tasks.spawn(async move {
                    time::sleep_until(due).await;
                    let mut board = board.lock().expect("Board lock poisoned");
                    if let Err(e) = board.run_due_commits(due.into_std()) {
                        error!("Failed to commit path: {}", e);
                    }
                });
            }
        }
        result
    }

    /// Wait until every scheduled commit has run
    pub async fn settle(&self) {
        let mut tasks = std::mem::take(&mut *self.tasks.lock().expect("Task set lock poisoned"));
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                if !e.is_cancelled() {
                    warn!("Commit task failed: {}", e);
                }
            }
        }
    }

    /// Abort outstanding commit timers and tear the board down
    pub fn shutdown(&self) {
        self.tasks.lock().expect("Task set lock poisoned").abort_all();
        self.lock().teardown();
    }
}

impl<S: Surface> Drop for BoardDriver<S> {
    fn drop(&mut self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.abort_all();
        }
    }
}
