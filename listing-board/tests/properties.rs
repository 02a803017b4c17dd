//! Property tests for listing and counter updates

use std::sync::Arc;

use listing_board::currency;
use listing_board::fetch::seed_listings;
use listing_board::reducer::reducer;
use listing_board::{Action, ListingRecord, ListingsState, LoadPhase};
use proptest::prelude::*;

fn loaded_state() -> ListingsState {
    let mut state = ListingsState::default();
    reducer(&mut state, Action::ListingsLoad);
    reducer(&mut state, Action::ListingsDidLoad(seed_listings()));
    state
}

fn record_strategy() -> impl Strategy<Value = ListingRecord> {
    (any::<u32>(), "[A-Za-z0-9 ,]{1,40}", "[A-Za-z ]{1,20}", 0.0f64..1e9)
        .prop_map(|(id, address, country, price)| ListingRecord::new(id, address, country, price))
}

proptest! {
    #[test]
    fn prop_append_grows_by_one_at_the_end(records in prop::collection::vec(record_strategy(), 0..20)) {
        let mut state = loaded_state();
        for record in records {
            let before = Arc::clone(&state.listings);
            let result = reducer(&mut state, Action::ListingAdd(record.clone()));

            prop_assert!(result.changed);
            prop_assert_eq!(state.listings.len(), before.len() + 1);
            prop_assert_eq!(state.listings.last().map(|r| ListingRecord::clone(r)), Some(record));
            for (old, new) in before.iter().zip(state.listings.iter()) {
                prop_assert!(Arc::ptr_eq(old, new));
            }
        }
    }

    #[test]
    fn prop_counter_counts_increments(n in 0usize..200) {
        let mut state = loaded_state();
        let listings = Arc::clone(&state.listings);
        for _ in 0..n {
            reducer(&mut state, Action::CounterIncrement);
        }
        prop_assert_eq!(state.counter, n as u64);
        prop_assert!(Arc::ptr_eq(&listings, &state.listings));
    }

    #[test]
    fn prop_interleaved_appends_and_increments_are_independent(
        steps in prop::collection::vec(prop::option::of(record_strategy()), 0..40)
    ) {
        let mut state = loaded_state();
        let seed = Arc::clone(&state.listings);
        let mut appended = Vec::new();
        let mut increments = 0u64;

        // Some(record) appends it, None increments the counter
        for step in steps {
            match step {
                Some(record) => {
                    reducer(&mut state, Action::ListingAdd(record.clone()));
                    appended.push(record);
                }
                None => {
                    reducer(&mut state, Action::CounterIncrement);
                    increments += 1;
                }
            }
        }

        prop_assert_eq!(state.counter, increments);
        prop_assert_eq!(state.listings.len(), seed.len() + appended.len());
        for (old, new) in seed.iter().zip(state.listings.iter()) {
            prop_assert!(Arc::ptr_eq(old, new));
        }
        let tail: Vec<ListingRecord> = state.listings[seed.len()..]
            .iter()
            .map(|r| ListingRecord::clone(r))
            .collect();
        prop_assert_eq!(tail, appended);
    }

    #[test]
    fn prop_unmounted_state_never_changes(adds in 0usize..5, increments in 0usize..5) {
        let mut state = loaded_state();
        reducer(&mut state, Action::ListingsUnmount);
        let revision = state.revision;

        for _ in 0..adds {
            prop_assert!(!reducer(&mut state, Action::ListingAdd(ListingRecord::demo(3))).changed);
        }
        for _ in 0..increments {
            prop_assert!(!reducer(&mut state, Action::CounterIncrement).changed);
        }
        prop_assert_eq!(state.revision, revision);
        prop_assert_eq!(state.phase, LoadPhase::Unmounted);
        prop_assert_eq!(state.listings.len(), 2);
    }

    #[test]
    fn prop_currency_has_two_decimals_and_grouping(cents in 0u64..10_000_000_000) {
        let formatted = currency::format(cents as f64 / 100.0);
        prop_assert!(formatted.starts_with('$'));
        let (whole, fraction) = formatted[1..].split_once('.').unwrap();
        prop_assert_eq!(fraction.len(), 2);
        prop_assert_eq!(whole.replace(',', ""), (cents / 100).to_string());
        for group in whole.split(',').skip(1) {
            prop_assert_eq!(group.len(), 3);
        }
    }
}
