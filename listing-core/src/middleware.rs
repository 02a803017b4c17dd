//! Middleware hooks around dispatch

use crate::action::ActionSummary;
use crate::Action;

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging or other cross-cutting concerns to a
/// store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
    dispatched: u64,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
            dispatched: 0,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
            dispatched: 0,
        }
    }

    /// Number of actions that went through this middleware.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

impl<A: ActionSummary> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.summary(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        self.dispatched += 1;
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed = state_changed,
                seq = self.dispatched,
                "Action processed"
            );
        }
    }
}
