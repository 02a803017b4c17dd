//! Listing store - owns the state and drives the simulated load
//!
//! Wraps the effect store with the task manager that runs its effects and
//! the teardown that releases what `mount` acquired.

use std::time::Duration;

use listing_core::{
    EffectStoreWithMiddleware, LoggingMiddleware, RuntimeStore, Subscription, TaskKey, TaskManager,
    Teardown,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::config::Config;
use crate::effect::Effect;
use crate::fetch;
use crate::reducer::reducer;
use crate::state::{ListingRecord, Listings, ListingsState};

/// Task key of the pending listing fetch.
pub const LOAD_TASK: &str = "listings.load";

pub struct ListingStore {
    store: EffectStoreWithMiddleware<ListingsState, Action, Effect, LoggingMiddleware>,
    tasks: TaskManager<Action>,
    load_delay: Duration,
    teardown: Option<Teardown>,
    mounted: bool,
}

impl ListingStore {
    /// Create an unmounted store whose tasks report back on `action_tx`.
    pub fn new(config: &Config, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        let middleware = if config.debug {
            LoggingMiddleware::verbose()
        } else {
            LoggingMiddleware::new()
        };
        Self {
            store: EffectStoreWithMiddleware::new(
                ListingsState::new(config.id_policy),
                reducer,
                middleware,
            ),
            tasks: TaskManager::new(action_tx),
            load_delay: config.load_delay,
            teardown: None,
            mounted: false,
        }
    }

    /// Mount hook: register the failure listener and start the load.
    ///
    /// Must run inside a tokio runtime. Mounting twice is a no-op.
    pub fn mount(&mut self) {
        if self.mounted {
            debug!("Listing store already mounted");
            return;
        }
        self.mounted = true;

        let mut teardown = Teardown::new();
        teardown.hold(
            "task-failure-listener",
            self.tasks.on_failure(|failure| {
                warn!(task = %failure.key.name(), message = %failure.message, "Listing task failed");
            }),
        );

        self.load();
        if let Some(handle) = self.tasks.abort_handle(&TaskKey::new(LOAD_TASK)) {
            teardown.abort("listings-load", handle);
        }

        info!(delay_ms = self.load_delay.as_millis() as u64, "Listing store mounted");
        self.teardown = Some(teardown);
    }

    /// Start the initial load. Only acts before the first load.
    pub fn load(&mut self) -> bool {
        self.dispatch(Action::ListingsLoad)
    }

    /// Append `record` after the current listings.
    pub fn append(&mut self, record: ListingRecord) -> bool {
        self.dispatch(Action::ListingAdd(record))
    }

    /// Append the demo record under the configured id policy.
    pub fn append_demo(&mut self) -> bool {
        self.dispatch(Action::ListingAddDemo)
    }

    pub fn increment_counter(&mut self) -> bool {
        self.dispatch(Action::CounterIncrement)
    }

    /// Observe every state change until the returned handle is dropped.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(&ListingsState) + Send + 'static,
    {
        self.store.subscribe(observer)
    }

    /// Release everything `mount` acquired and stop accepting writes.
    ///
    /// Idempotent.
    pub fn unmount(&mut self) {
        let Some(mut teardown) = self.teardown.take() else {
            if self.state().is_mounted() {
                self.dispatch(Action::ListingsUnmount);
            }
            return;
        };
        let released = teardown.run();
        self.tasks.cancel(&TaskKey::new(LOAD_TASK));
        self.dispatch(Action::ListingsUnmount);
        info!(released, "Listing store unmounted");
    }

    /// Dispatch an action and run the effects it produces.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.handle_effect(effect);
        }
        result.changed
    }

    fn handle_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchListings => {
                debug!(delay_ms = self.load_delay.as_millis() as u64, "Scheduling listing fetch");
                self.tasks
                    .spawn_after(LOAD_TASK, self.load_delay, fetch::fetch_listings());
            }
        }
    }

    pub fn state(&self) -> &ListingsState {
        self.store.state()
    }

    /// Current listings snapshot.
    pub fn snapshot(&self) -> Listings {
        self.state().listings.clone()
    }

    pub fn counter(&self) -> u64 {
        self.state().counter
    }

    /// True until the fetch result is on the action channel, or the fetch
    /// was cancelled.
    pub fn is_load_pending(&self) -> bool {
        self.tasks.is_running(&TaskKey::new(LOAD_TASK))
    }

    pub fn observer_count(&self) -> usize {
        self.store.observer_count()
    }

    /// Number of actions the logging middleware has seen.
    pub fn dispatched(&self) -> u64 {
        self.store.middleware().dispatched()
    }
}

impl RuntimeStore<Action> for ListingStore {
    type State = ListingsState;

    fn dispatch(&mut self, action: Action) -> bool {
        ListingStore::dispatch(self, action)
    }

    fn state(&self) -> &ListingsState {
        ListingStore::state(self)
    }

    fn subscribe(&mut self, observer: Box<dyn FnMut(&ListingsState) + Send>) -> Subscription {
        ListingStore::subscribe(self, observer)
    }

    fn teardown(&mut self) {
        self.unmount();
    }
}
