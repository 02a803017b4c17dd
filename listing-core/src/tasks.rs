//! Task manager for async operations
//!
//! Provides lifecycle management for async tasks with support for:
//! - Automatic cancellation when spawning with same key
//! - Delayed execution
//! - Manual cancellation, also through an exported `AbortHandle`
//! - Failure reporting to subscribed handlers
//!
//! # Example
//!
//! ```ignore
//! use listing_core::{TaskKey, TaskManager};
//! use std::time::Duration;
//!
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(action_tx);
//!
//! // Runs after 500ms unless cancelled first
//! tasks.spawn_after("listings.load", Duration::from_millis(500), async {
//!     Action::ListingsDidLoad(seed_listings())
//! });
//!
//! // Unmounting before the delay means no result is ever sent
//! tasks.cancel(&TaskKey::new("listings.load"));
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use crate::listeners::{Listeners, Subscription};
use crate::Action;

/// Identifies a task for cancellation and replacement.
///
/// Tasks with the same key are mutually exclusive - spawning a new task
/// with a key that's already running will cancel the existing task.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    /// Create a new task key.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the key name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A task that panicked instead of producing its action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskFailure {
    pub key: TaskKey,
    pub message: String,
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}

/// Manages async task lifecycle with automatic cancellation.
///
/// Each task's output action is sent to the action channel. A cancelled task
/// sends nothing; a panicking task sends nothing and is reported to the
/// handlers registered with [`TaskManager::on_failure`].
pub struct TaskManager<A> {
    tasks: HashMap<TaskKey, Running>,
    action_tx: mpsc::UnboundedSender<A>,
    failures: Listeners<TaskFailure>,
}

/// Handles of one launched task.
///
/// `work` runs the delay and the future; `watcher` forwards its result and
/// finishes only after the action is on the channel.
struct Running {
    work: AbortHandle,
    watcher: AbortHandle,
}

impl Running {
    fn is_finished(&self) -> bool {
        self.watcher.is_finished()
    }
}

impl<A> TaskManager<A>
where
    A: Action,
{
    /// Create a new task manager sending completed actions to `action_tx`.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
            failures: Listeners::new(),
        }
    }

    /// Spawn a task that starts after `delay`, cancelling any existing task
    /// with the same key.
    ///
    /// Cancelling before the delay elapses means the future never runs.
    pub fn spawn_after<F>(&mut self, key: impl Into<TaskKey>, delay: Duration, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let work = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            future.await
        });
        let work_abort = work.abort_handle();

        let tx = self.action_tx.clone();
        let failures = self.failures.clone();
        let watch_key = key.clone();
        let watcher = tokio::spawn(async move {
            match work.await {
                Ok(action) => {
                    let _ = tx.send(action);
                }
                Err(err) if err.is_panic() => {
                    let failure = TaskFailure {
                        key: watch_key,
                        message: panic_message(err.into_panic()),
                    };
                    warn!(task = %failure.key.name(), message = %failure.message, "Task failed");
                    failures.notify(&failure);
                }
                Err(_) => {
                    debug!(task = %watch_key.name(), "Task cancelled");
                }
            }
        });

        self.tasks.insert(
            key,
            Running {
                work: work_abort,
                watcher: watcher.abort_handle(),
            },
        );
        self
    }

    /// Cancel a task by key.
    ///
    /// If no task exists with the given key, this is a no-op.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(running) = self.tasks.remove(key) {
            running.work.abort();
        }
    }

    /// Abort handle for a task's work, for release from outside the manager.
    pub fn abort_handle(&self, key: &TaskKey) -> Option<AbortHandle> {
        self.tasks.get(key).map(|running| running.work.clone())
    }

    /// Whether a task's result is still outstanding.
    ///
    /// Turns false only once the action has been sent, or the task was
    /// cancelled or panicked.
    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks.get(key).is_some_and(|running| !running.is_finished())
    }

    /// Number of tasks still running.
    pub fn len(&self) -> usize {
        self.tasks
            .values()
            .filter(|running| !running.is_finished())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Report task panics to `handler` until the returned handle is dropped.
    pub fn on_failure<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&TaskFailure) + Send + 'static,
    {
        self.failures.subscribe(handler)
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        for (_, running) in self.tasks.drain() {
            running.work.abort();
        }
    }
}
