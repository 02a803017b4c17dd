//! Simulated listing source
//!
//! There is no server: the "fetch" resolves to a fixed seed. The delay is
//! applied by the task that runs it (see [`crate::store::ListingStore`]).

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::action::Action;
use crate::state::{ListingRecord, Listings};

/// Delay before the seed arrives, unless configured otherwise.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(500);

/// The two records every load produces, in display order.
pub fn seed_listings() -> Listings {
    vec![
        Arc::new(ListingRecord::new(
            1,
            "12 Valley of Kings, Geneva",
            "Switzerland",
            900_000.0,
        )),
        Arc::new(ListingRecord::new(
            2,
            "89 Road of Forks, Bern",
            "Switzerland",
            500_000.0,
        )),
    ]
    .into()
}

/// Resolve the listing fetch into its result action.
pub async fn fetch_listings() -> Action {
    let records = seed_listings();
    debug!(records = records.len(), "Listings fetched");
    Action::ListingsDidLoad(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_order_and_values() {
        let seed = seed_listings();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].id, 1);
        assert_eq!(seed[0].country, "Switzerland");
        assert_eq!(seed[0].price, 900_000.0);
        assert_eq!(seed[1].address, "89 Road of Forks, Bern");
        assert_eq!(seed[1].price, 500_000.0);
    }

    #[tokio::test]
    async fn test_fetch_resolves_to_seed() {
        match fetch_listings().await {
            Action::ListingsDidLoad(records) => assert_eq!(records, seed_listings()),
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
