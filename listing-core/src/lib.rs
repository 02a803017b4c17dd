//! Core traits and types for the listing board
//!
//! A Redux/Elm-style state core for terminal apps:
//!
//! - **Action**: events that describe state changes
//! - **EffectStore**: state container driven by a reducer that returns
//!   [`DispatchResult`] (changed flag + effects) and notifies observers
//! - **TaskManager**: keyed async tasks (delayed, cancellable) whose results come
//!   back as actions
//! - **Listeners / Subscription**: scoped registration with release-on-drop
//! - **Teardown**: everything acquired at mount, released once at unmount
//! - **MemoCache**: per-identity render memoization
//! - **Component**: pure UI elements rendering from props
//! - **DispatchRuntime**: the event -> action -> dispatch -> render loop
//!
//! # Async pattern
//!
//! Intent actions make the reducer emit an effect; the effect handler spawns a
//! task; the task's result comes back as a `*DidLoad` action:
//!
//! ```ignore
//! fn reducer(state: &mut State, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::ListingsLoad => {
//!             state.phase = LoadPhase::Loading;
//!             DispatchResult::changed_with(Effect::FetchListings)
//!         }
//!         Action::ListingsDidLoad(records) => {
//!             state.listings = records;
//!             DispatchResult::changed()
//!         }
//!         // ...
//!     }
//! }
//!
//! for effect in store.dispatch(action).effects {
//!     match effect {
//!         Effect::FetchListings => {
//!             tasks.spawn_after("listings.load", delay, async { Action::ListingsDidLoad(fetch()) });
//!         }
//!     }
//! }
//! ```

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod keybindings;
pub mod lifecycle;
pub mod listeners;
pub mod memo;
pub mod middleware;
pub mod runtime;
pub mod tasks;
pub mod testing;

pub use action::{Action, ActionSummary};
pub use component::Component;
pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
pub use keybindings::{format_key_for_display, parse_key_string, Keybindings};
pub use lifecycle::Teardown;
pub use listeners::{Listeners, Subscription};
pub use memo::{MemoCache, MemoStats};
pub use middleware::{LoggingMiddleware, Middleware};
pub use runtime::{DispatchRuntime, EventOutcome, PollerConfig, RuntimeStore};
pub use tasks::{TaskFailure, TaskKey, TaskManager};

