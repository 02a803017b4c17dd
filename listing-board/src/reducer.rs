//! Reducer - pure function: (state, action) -> DispatchResult<Effect>
//!
//! - All state mutations happen here
//! - Every applied mutation bumps `revision` and installs a new collection
//! - No side effects: the fetch is requested as [`Effect::FetchListings`]

use std::sync::Arc;

use listing_core::DispatchResult;
use tracing::{debug, warn};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{ListingRecord, Listings, ListingsState, LoadPhase};

pub fn reducer(state: &mut ListingsState, action: Action) -> DispatchResult<Effect> {
    if !state.is_mounted() {
        if !matches!(action, Action::ListingsUnmount | Action::Quit) {
            debug!(action = ?action, "Dropped write after unmount");
        }
        return DispatchResult::unchanged();
    }

    match action {
        // ===== Listings =====
        Action::ListingsLoad => {
            if state.phase != LoadPhase::Uninitialized {
                debug!(phase = ?state.phase, "Load already scheduled");
                return DispatchResult::unchanged();
            }
            state.phase = LoadPhase::Loading;
            bump(state);
            DispatchResult::changed_with(Effect::FetchListings)
        }

        Action::ListingsDidLoad(records) => {
            if state.phase != LoadPhase::Loading {
                debug!(phase = ?state.phase, "Ignoring unexpected load result");
                return DispatchResult::unchanged();
            }
            state.listings = records;
            state.phase = LoadPhase::Loaded;
            bump(state);
            DispatchResult::changed()
        }

        Action::ListingsUnmount => {
            state.phase = LoadPhase::Unmounted;
            bump(state);
            DispatchResult::changed()
        }

        Action::ListingAdd(record) => append(state, record),

        // Resolved against the current state so queued adds never share an id
        Action::ListingAddDemo => {
            let record = state.next_demo_record();
            append(state, record)
        }

        // ===== Counter =====
        Action::CounterIncrement => {
            state.counter = state.counter.wrapping_add(1);
            bump(state);
            DispatchResult::changed()
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn append(state: &mut ListingsState, record: ListingRecord) -> DispatchResult<Effect> {
    if !record.is_well_formed() {
        warn!(id = record.id, price = record.price, "Rejected malformed listing");
        return DispatchResult::unchanged();
    }
    if state.contains_id(record.id) {
        warn!(id = record.id, "Appending listing with duplicate id");
    }
    state.listings = appended(&state.listings, record);
    bump(state);
    DispatchResult::changed()
}

fn bump(state: &mut ListingsState) {
    state.revision = state.revision.wrapping_add(1);
}

/// New collection sharing the existing records, plus `record` at the end.
fn appended(listings: &Listings, record: ListingRecord) -> Listings {
    listings
        .iter()
        .cloned()
        .chain(std::iter::once(Arc::new(record)))
        .collect()
}
