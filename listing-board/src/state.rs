//! Application state - single source of truth
//!
//! Components receive `&ListingsState` as props; only the reducer mutates it.
//! Records are shared behind `Arc` and never edited in place: a mutation
//! installs a new collection that reuses the unchanged records.

use std::sync::Arc;

/// One house on the market.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingRecord {
    pub id: u32,
    pub address: String,
    pub country: String,
    pub price: f64,
}

impl ListingRecord {
    pub fn new(id: u32, address: impl Into<String>, country: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            address: address.into(),
            country: country.into(),
            price,
        }
    }

    /// The record the Add action appends, with the given id.
    pub fn demo(id: u32) -> Self {
        Self::new(id, "32 Valley Way, New York", "USA", 1_000_000.0)
    }

    /// Finite, non-negative price.
    pub fn is_well_formed(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0
    }
}

/// Ordered listing snapshot; insertion order is display order.
pub type Listings = Arc<[Arc<ListingRecord>]>;

/// Id the Add action uses when ids are not generated.
pub const DEMO_RECORD_ID: u32 = 3;

/// Where the listing view is in its mount lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Uninitialized,
    Loading,
    Loaded,
    /// Terminal: the view is gone and writes are dropped.
    Unmounted,
}

/// How the Add action picks an id for the appended record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// Always [`DEMO_RECORD_ID`]; repeated adds produce duplicate ids.
    #[default]
    Fixed,
    /// One past the largest id currently listed.
    NextFree,
}

/// Everything the listing view needs to render.
#[derive(Clone, Debug)]
pub struct ListingsState {
    pub listings: Listings,

    /// Interaction counter, unrelated to the listings.
    pub counter: u64,

    pub phase: LoadPhase,

    /// Bumped on every applied mutation.
    pub revision: u64,

    pub id_policy: IdPolicy,
}

impl ListingsState {
    pub fn new(id_policy: IdPolicy) -> Self {
        Self {
            listings: Arc::from(Vec::new()),
            counter: 0,
            phase: LoadPhase::default(),
            revision: 0,
            id_policy,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.phase != LoadPhase::Unmounted
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.listings.iter().any(|record| record.id == id)
    }

    /// The record an Add should append under the current id policy.
    pub fn next_demo_record(&self) -> ListingRecord {
        let id = match self.id_policy {
            IdPolicy::Fixed => DEMO_RECORD_ID,
            IdPolicy::NextFree => self
                .listings
                .iter()
                .map(|record| record.id)
                .max()
                .map_or(1, |max| max.saturating_add(1)),
        };
        ListingRecord::demo(id)
    }
}

impl Default for ListingsState {
    fn default() -> Self {
        Self::new(IdPolicy::default())
    }
}
