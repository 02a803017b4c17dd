//! House listing board
//!
//! A terminal page listing houses on the market. The listings load once,
//! after a simulated fetch delay, when the page mounts; `a` appends a demo
//! listing and `i` bumps an interaction counter.
//!
//! Flow:
//! 1. Key event -> `Page::handle_event` -> actions
//! 2. Actions dispatched to the [`store::ListingStore`]
//! 3. Reducer updates state and returns effects
//! 4. Effects run through the task manager (the delayed fetch)
//! 5. Store observers (the runtime) mark the frame dirty and it is redrawn

pub mod action;
pub mod components;
pub mod config;
pub mod currency;
pub mod effect;
pub mod fetch;
pub mod keymap;
pub mod reducer;
pub mod state;
pub mod store;

pub use action::Action;
pub use config::{Args, Config, ConfigError};
pub use state::{IdPolicy, ListingRecord, Listings, ListingsState, LoadPhase};
pub use store::ListingStore;
