//! Effect-based state management
//!
//! Reducers take `&mut S` and an action and return a [`DispatchResult`]: whether
//! the state changed plus a list of effects. Effects are declarative
//! descriptions of work (spawn a delayed fetch, ...), handled by the caller
//! after the reducer returns so the reducer itself stays synchronous.
//!
//! Every dispatch that reports a change notifies the store's observers with the
//! new state. Observers are attached with [`EffectStore::subscribe`] and stay
//! attached until their [`Subscription`] is dropped.
//!
//! # Example
//!
//! ```
//! use listing_core::{Action, DispatchResult, EffectStore};
//!
//! #[derive(Clone, Debug)]
//! enum Msg { Bump, Fetch }
//!
//! impl Action for Msg {
//!     fn name(&self) -> &'static str {
//!         match self { Msg::Bump => "Bump", Msg::Fetch => "Fetch" }
//!     }
//! }
//!
//! #[derive(Debug, PartialEq)]
//! enum Effect { StartFetch }
//!
//! fn reducer(count: &mut u32, msg: Msg) -> DispatchResult<Effect> {
//!     match msg {
//!         Msg::Bump => { *count += 1; DispatchResult::changed() }
//!         Msg::Fetch => DispatchResult::effect(Effect::StartFetch),
//!     }
//! }
//!
//! let mut store = EffectStore::new(0u32, reducer);
//! assert!(store.dispatch(Msg::Bump).changed);
//! assert_eq!(store.dispatch(Msg::Fetch).effects, vec![Effect::StartFetch]);
//! assert_eq!(*store.state(), 1);
//! ```

use std::marker::PhantomData;

use crate::action::Action;
use crate::listeners::{Listeners, Subscription};
use crate::middleware::Middleware;

/// Result of dispatching an action to an effect-aware store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// A single effect without a state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// State changed with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer function that can emit effects.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// A store driven by an effect-emitting reducer.
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    observers: Listeners<S>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    A: Action,
{
    /// Create a new effect store with the given initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            observers: Listeners::new(),
            _marker: PhantomData,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Dispatch an action to the store.
    ///
    /// Observers are notified after the reducer reports a change.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        let result = (self.reducer)(&mut self.state, action);
        if result.changed {
            self.observers.notify(&self.state);
        }
        result
    }

    /// Number of attached observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<S: 'static, A: Action, E> EffectStore<S, A, E> {
    /// Observe state changes until the returned handle is dropped.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(&S) + Send + 'static,
    {
        self.observers.subscribe(observer)
    }
}

/// An effect store with middleware support.
///
/// Middleware sees every action and the change flag, not the effects.
pub struct EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    store: EffectStore<S, A, E>,
    middleware: M,
}

impl<S, A, E, M> EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    /// Create a new effect store with middleware.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            middleware,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Dispatch an action through middleware and store.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }

    pub fn observer_count(&self) -> usize {
        self.store.observer_count()
    }
}

impl<S: 'static, A: Action, E, M: Middleware<A>> EffectStoreWithMiddleware<S, A, E, M> {
    /// Observe state changes until the returned handle is dropped.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(&S) + Send + 'static,
    {
        self.store.subscribe(observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Decrement,
        NoOp,
        TriggerEffect,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Increment => "Increment",
                TestAction::Decrement => "Decrement",
                TestAction::NoOp => "NoOp",
                TestAction::TriggerEffect => "TriggerEffect",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestEffect {
        Log(String),
        Save,
    }

    #[derive(Default)]
    struct TestState {
        count: i32,
    }

    fn test_reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Increment => {
                state.count += 1;
                DispatchResult::changed()
            }
            TestAction::Decrement => {
                state.count -= 1;
                DispatchResult::changed_with(TestEffect::Log(format!("count: {}", state.count)))
            }
            TestAction::NoOp => DispatchResult::unchanged(),
            TestAction::TriggerEffect => {
                DispatchResult::effect(TestEffect::Log("triggered".into())).with(TestEffect::Save)
            }
        }
    }

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r = DispatchResult::changed_with(TestEffect::Save);
        assert!(r.changed);
        assert_eq!(r.effects, vec![TestEffect::Save]);

        let r = DispatchResult::<TestEffect>::changed().with(TestEffect::Save);
        assert!(r.changed);
        assert!(r.has_effects());
    }

    #[test]
    fn test_effect_store_with_effects() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);

        let result = store.dispatch(TestAction::Decrement);
        assert!(result.changed);
        assert!(matches!(&result.effects[0], TestEffect::Log(s) if s == "count: -1"));

        let result = store.dispatch(TestAction::TriggerEffect);
        assert!(!result.changed);
        assert_eq!(result.effects.len(), 2);
    }

    #[test]
    fn test_observers_see_only_changes() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(AtomicI32::new(0));

        let (c, s) = (calls.clone(), seen.clone());
        let sub = store.subscribe(move |state: &TestState| {
            c.fetch_add(1, Ordering::SeqCst);
            s.store(state.count, Ordering::SeqCst);
        });

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::NoOp);
        store.dispatch(TestAction::Increment);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(seen.load(Ordering::SeqCst), 2);

        drop(sub);
        assert_eq!(store.observer_count(), 0);
        store.dispatch(TestAction::Increment);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[derive(Default)]
    struct CountingMiddleware {
        before_count: usize,
        changed_count: usize,
    }

    impl<A: Action> Middleware<A> for CountingMiddleware {
        fn before(&mut self, _action: &A) {
            self.before_count += 1;
        }

        fn after(&mut self, _action: &A, state_changed: bool) {
            if state_changed {
                self.changed_count += 1;
            }
        }
    }

    #[test]
    fn test_store_with_middleware() {
        let mut store = EffectStoreWithMiddleware::new(
            TestState::default(),
            test_reducer,
            CountingMiddleware::default(),
        );

        store.dispatch(TestAction::Increment);
        store.dispatch(TestAction::NoOp);

        assert_eq!(store.middleware().before_count, 2);
        assert_eq!(store.middleware().changed_count, 1);
        assert_eq!(store.state().count, 1);
    }
}
