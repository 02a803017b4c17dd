//! Effects - side effects declared by the reducer
//!
//! The reducer stays pure; [`crate::store::ListingStore`] turns effects into
//! tasks.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run the simulated fetch; its result arrives as `ListingsDidLoad`
    FetchListings,
}
