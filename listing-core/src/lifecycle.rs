//! Mount/unmount lifecycle support
//!
//! Setup code registers everything it acquires (subscriptions, running tasks,
//! arbitrary release closures) on a [`Teardown`]. Running the teardown, or
//! dropping it, releases them once in reverse order of registration.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tokio::task::AbortHandle;
use tracing::{debug, warn};

use crate::listeners::Subscription;

type Step = Box<dyn FnOnce() + Send>;

/// Release steps collected during mount.
#[must_use = "dropping a Teardown immediately runs it"]
#[derive(Default)]
pub struct Teardown {
    steps: Vec<(&'static str, Step)>,
    done: bool,
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown")
            .field("steps", &self.steps.iter().map(|(l, _)| *l).collect::<Vec<_>>())
            .field("done", &self.done)
            .finish()
    }
}

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a release closure.
    pub fn on_teardown<F>(&mut self, label: &'static str, step: F) -> &mut Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.steps.push((label, Box::new(step)));
        self
    }

    /// Keep a subscription alive until teardown.
    pub fn hold(&mut self, label: &'static str, subscription: Subscription) -> &mut Self {
        self.on_teardown(label, move || subscription.unsubscribe())
    }

    /// Abort a spawned task at teardown.
    pub fn abort(&mut self, label: &'static str, handle: AbortHandle) -> &mut Self {
        self.on_teardown(label, move || handle.abort())
    }

    /// Number of steps still pending.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether `run` has already happened.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Run every pending step, newest first. Later calls do nothing.
    ///
    /// A panicking step is logged and does not stop the remaining steps.
    /// Returns the number of steps that completed.
    pub fn run(&mut self) -> usize {
        if self.done {
            return 0;
        }
        self.done = true;

        let mut completed = 0;
        while let Some((label, step)) = self.steps.pop() {
            match catch_unwind(AssertUnwindSafe(step)) {
                Ok(()) => {
                    debug!(step = label, "Teardown step released");
                    completed += 1;
                }
                Err(_) => warn!(step = label, "Teardown step panicked"),
            }
        }
        completed
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.run();
    }
}
