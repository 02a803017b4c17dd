//! Event/action/render loop
//!
//! [`DispatchRuntime`] owns a store and the action channel, polls terminal
//! events, maps them to actions, dispatches actions and redraws. It learns
//! about state changes by subscribing to the store, not by inspecting
//! dispatch results, so anything that changes the store triggers a redraw.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::listeners::Subscription;
use crate::Action;

/// Configuration for the event poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    /// Actions to enqueue.
    pub actions: Vec<A>,
    /// Whether to force a re-render.
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    /// No actions and no render.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// Wrap a single action.
    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Create from any iterator of actions, e.g. a `Component::handle_event` result.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Mark that a render is needed.
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        match action {
            Some(action) => Self::action(action),
            None => Self::ignored(),
        }
    }
}

/// Store interface used by [`DispatchRuntime`].
pub trait RuntimeStore<A: Action> {
    type State: 'static;

    /// Dispatch an action and return whether the state changed.
    fn dispatch(&mut self, action: A) -> bool;

    /// Get the current state.
    fn state(&self) -> &Self::State;

    /// Observe state changes until the handle is dropped.
    fn subscribe(&mut self, observer: Box<dyn FnMut(&Self::State) + Send>) -> Subscription;

    /// Release everything the store acquired. Called once when the loop ends.
    fn teardown(&mut self) {}
}

/// Runtime helper driving a [`RuntimeStore`].
pub struct DispatchRuntime<A: Action, St: RuntimeStore<A>> {
    store: St,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    poller_config: PollerConfig,
    dirty: Arc<AtomicBool>,
    observer: Option<Subscription>,
}

impl<A: Action, St: RuntimeStore<A>> DispatchRuntime<A, St> {
    /// Build a runtime from a store and the channel its tasks send into.
    pub fn from_parts(
        mut store: St,
        action_tx: mpsc::UnboundedSender<A>,
        action_rx: mpsc::UnboundedReceiver<A>,
    ) -> Self {
        // First frame is always drawn
        let dirty = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&dirty);
        let observer = store.subscribe(Box::new(move |_| flag.store(true, Ordering::Release)));

        Self {
            store,
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            dirty,
            observer: Some(observer),
        }
    }

    /// Configure event polling behavior.
    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Clone the action sender.
    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    /// Access the current state.
    pub fn state(&self) -> &St::State {
        self.store.state()
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut St {
        &mut self.store
    }

    /// Whether a redraw is pending.
    pub fn needs_render(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Run the event/action loop until `should_quit` accepts an action.
    ///
    /// The store is torn down when the loop ends, whatever the reason.
    pub async fn run<B, FRender, FEvent, FQuit, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &St::State),
        FEvent: FnMut(&EventKind, &St::State) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            self.poller_config.poll_timeout,
            self.poller_config.loop_sleep,
            cancel_token.clone(),
        );

        let result = self
            .event_loop(terminal, &mut render, &mut map_event, &mut should_quit, &mut event_rx)
            .await;

        cancel_token.cancel();
        self.shutdown();
        result
    }

    async fn event_loop<B, FRender, FEvent, FQuit, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        render: &mut FRender,
        map_event: &mut FEvent,
        should_quit: &mut FQuit,
        event_rx: &mut mpsc::UnboundedReceiver<RawEvent>,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &St::State),
        FEvent: FnMut(&EventKind, &St::State) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
    {
        loop {
            if self.dirty.swap(false, Ordering::AcqRel) {
                let state = self.store.state();
                terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                })?;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);
                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    if outcome.needs_render {
                        self.dirty.store(true, Ordering::Release);
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        info!(action = action.name(), "Quit requested");
                        return Ok(());
                    }
                    self.store.dispatch(action);
                }

                else => {
                    debug!("All event sources closed");
                    return Ok(());
                }
            }
        }
    }

    fn shutdown(&mut self) {
        self.observer.take();
        self.store.teardown();
    }
}

impl<A: Action, St: RuntimeStore<A>> Drop for DispatchRuntime<A, St> {
    fn drop(&mut self) {
        // No-op when run() already shut down
        if self.observer.is_some() {
            self.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{DispatchResult, EffectStore};

    #[derive(Clone, Debug)]
    enum TestAction {
        Bump,
        Quit,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Bump => "Bump",
                TestAction::Quit => "Quit",
            }
        }
    }

    fn reducer(count: &mut u32, action: TestAction) -> DispatchResult<()> {
        match action {
            TestAction::Bump => {
                *count += 1;
                DispatchResult::changed()
            }
            TestAction::Quit => DispatchResult::unchanged(),
        }
    }

    struct CountStore {
        inner: EffectStore<u32, TestAction, ()>,
        torn_down: bool,
    }

    impl RuntimeStore<TestAction> for CountStore {
        type State = u32;

        fn dispatch(&mut self, action: TestAction) -> bool {
            self.inner.dispatch(action).changed
        }

        fn state(&self) -> &u32 {
            self.inner.state()
        }

        fn subscribe(&mut self, observer: Box<dyn FnMut(&u32) + Send>) -> Subscription {
            self.inner.subscribe(observer)
        }

        fn teardown(&mut self) {
            self.torn_down = true;
        }
    }

    #[test]
    fn test_event_outcome_builders() {
        let outcome: EventOutcome<u8> = None.into();
        assert_eq!(outcome, EventOutcome::ignored());

        let outcome: EventOutcome<u8> = Some(3).into();
        assert_eq!(outcome.actions, vec![3]);

        let outcome = EventOutcome::from_actions([1u8, 2]).with_render();
        assert!(outcome.needs_render);
        assert_eq!(outcome.actions.len(), 2);
    }

    #[tokio::test]
    async fn test_run_dispatches_until_quit_and_tears_down() {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = CountStore {
            inner: EffectStore::new(0, reducer),
            torn_down: false,
        };
        let mut runtime = DispatchRuntime::from_parts(store, tx, rx);
        assert_eq!(runtime.store().inner.observer_count(), 1);

        runtime.enqueue(TestAction::Bump);
        runtime.enqueue(TestAction::Bump);
        runtime.enqueue(TestAction::Quit);

        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(20, 3)).unwrap();
        let mut frames = 0;
        runtime
            .run(
                &mut terminal,
                |_, _, _| frames += 1,
                |_, _| None::<TestAction>,
                |action| matches!(action, TestAction::Quit),
            )
            .await
            .unwrap();

        assert_eq!(*runtime.state(), 2);
        assert!(frames >= 1);
        assert!(runtime.store().torn_down);
        assert_eq!(runtime.store().inner.observer_count(), 0);
    }
}
